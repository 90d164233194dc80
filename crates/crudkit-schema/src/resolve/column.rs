use crate::{
    component::{BindingKind, ComponentBinding, resolve_binding},
    prelude::*,
    resolve::relation,
};

///
/// Column
///
/// Read-only view over one column declaration. Every derived property
/// is computed from the declaration (and, for relation/literal, the
/// registries) on each read; nothing is cached, so results always
/// reflect the current attributes.
///

#[derive(Clone, Copy)]
pub struct Column<'a> {
    ctx: &'a SchemaContext,
    parent: &'a TypeDecl,
    decl: &'a ColumnDecl,
}

impl<'a> Column<'a> {
    #[must_use]
    pub const fn new(ctx: &'a SchemaContext, parent: &'a TypeDecl, decl: &'a ColumnDecl) -> Self {
        Self { ctx, parent, decl }
    }

    #[must_use]
    pub const fn decl(&self) -> &'a ColumnDecl {
        self.decl
    }

    #[must_use]
    pub const fn parent(&self) -> &'a TypeDecl {
        self.parent
    }

    pub(crate) const fn ctx(&self) -> &'a SchemaContext {
        self.ctx
    }

    #[must_use]
    pub fn name(&self) -> &'a str {
        &self.decl.name
    }

    /// The declared scalar/enum/type/model name.
    #[must_use]
    pub fn type_name(&self) -> &'a str {
        &self.decl.type_name
    }

    /// The declared type as a primitive, if it is one.
    #[must_use]
    pub fn field_type(&self) -> Option<FieldType> {
        self.decl.type_name.parse().ok()
    }

    //
    // declaration flags
    //

    #[must_use]
    pub const fn required(&self) -> bool {
        self.decl.required
    }

    #[must_use]
    pub const fn multiple(&self) -> bool {
        self.decl.multiple
    }

    #[must_use]
    pub fn unique(&self) -> bool {
        self.decl.attributes.flag("unique")
    }

    #[must_use]
    pub fn id(&self) -> bool {
        self.decl.attributes.flag("id")
    }

    #[must_use]
    pub fn generated(&self) -> bool {
        self.decl.attributes.flag("generated")
    }

    #[must_use]
    pub fn filterable(&self) -> bool {
        self.decl.attributes.flag("filterable")
    }

    #[must_use]
    pub fn searchable(&self) -> bool {
        self.decl.attributes.flag("searchable")
    }

    #[must_use]
    pub fn sortable(&self) -> bool {
        self.decl.attributes.flag("sortable")
    }

    #[must_use]
    pub fn active(&self) -> bool {
        self.decl.attributes.flag("active")
    }

    #[must_use]
    pub fn created(&self) -> bool {
        self.decl.attributes.flag("created")
    }

    #[must_use]
    pub fn updated(&self) -> bool {
        self.decl.attributes.flag("updated")
    }

    #[must_use]
    pub fn autoincrement(&self) -> bool {
        self.decl.attributes.flag("autoincrement")
    }

    //
    // derived properties
    //

    /// Display label; falls back to the column name.
    #[must_use]
    pub fn label(&self) -> &'a str {
        self.decl
            .attributes
            .first("label")
            .and_then(AttrValue::as_str)
            .unwrap_or(&self.decl.name)
    }

    /// The declared default, with generator calls recognized.
    #[must_use]
    pub fn default_value(&self) -> Option<DefaultValue> {
        self.decl
            .attributes
            .first("default")
            .map(DefaultValue::parse)
    }

    /// The form widget binding for this column.
    #[must_use]
    pub fn field(&self) -> ComponentBinding {
        resolve_binding(BindingKind::Field, &self.decl.attributes)
    }

    /// The list (search-result) format binding for this column.
    #[must_use]
    pub fn list(&self) -> ComponentBinding {
        resolve_binding(BindingKind::List, &self.decl.attributes)
    }

    /// The detail-view format binding for this column.
    #[must_use]
    pub fn view(&self) -> ComponentBinding {
        resolve_binding(BindingKind::View, &self.decl.attributes)
    }

    /// Range filtering is only offered for filterable columns whose
    /// literal kind supports ordering.
    #[must_use]
    pub fn spanable(&self) -> bool {
        self.filterable()
            && self
                .field_type()
                .is_some_and(|ty| ty.literal().is_range_capable())
    }

    #[must_use]
    pub fn indexable(&self) -> bool {
        self.searchable() || self.filterable() || self.spanable() || self.sortable()
    }

    /// Resolve the declared type against the built-in map, then the
    /// enum, type and model registries. First match wins.
    #[must_use]
    pub fn literal(&self) -> Option<Literal<'a>> {
        if let Some(ty) = self.field_type() {
            return Some(Literal::Scalar(ty.literal()));
        }
        if let Some(decl) = self.ctx.get_enum(self.type_name()) {
            return Some(Literal::Enum(decl));
        }
        if let Some(decl) = self.ctx.get_type(self.type_name()) {
            return Some(Literal::Composite(decl));
        }
        if let Some(decl) = self.ctx.get_model(self.type_name()) {
            return Some(Literal::Model(decl));
        }
        None
    }

    /// The resolved relation descriptor, or None when the declaration
    /// carries no relation or names a model/column that does not exist.
    #[must_use]
    pub fn relation(&self) -> Option<Relation<'a>> {
        relation::resolve(self)
    }

    /// The reverse edge: the column on the foreign model (named by this
    /// column's type) whose relation points back at this column.
    #[must_use]
    pub fn related(&self) -> Option<Related<'a>> {
        let decl = self.ctx.get_model(self.type_name())?;
        let model = Model::from_decl(self.ctx, decl);
        let column = model
            .columns()
            .into_iter()
            .find(|column| column.relation().is_some_and(|r| r.foreign == self.name()))?;

        let cardinality = (
            Cardinality::of(self.required(), self.multiple()),
            Cardinality::of(column.required(), column.multiple()),
        );

        Some(Related {
            model,
            column,
            cardinality,
        })
    }

    /// Assemble the column's validators. Explicit `is.<method>` flags
    /// come first in catalog order; the implied type, unique and
    /// required validators are each prepended only when no validator
    /// with the same method exists yet.
    #[must_use]
    pub fn validators(&self) -> Vec<Validator> {
        let mut validators = Vec::new();

        // system-generated values are never validated
        if self.generated() {
            return validators;
        }

        for &method in ValidatorMethod::EXPLICIT {
            let key = format!("is.{method}");
            let Some(flag) = self.decl.attributes.get(&key) else {
                continue;
            };
            let mut parameters = flag.as_list().map(<[AttrValue]>::to_vec).unwrap_or_default();
            let message = take_message(&mut parameters);
            validators.push(Validator {
                method,
                parameters,
                message,
            });
        }

        if let Some(ty) = self.field_type() {
            let scalar = ty.validator();
            if self.multiple() {
                if !has_method(&validators, ValidatorMethod::Array) {
                    validators.insert(
                        0,
                        Validator {
                            method: ValidatorMethod::Array,
                            parameters: vec![AttrValue::String(scalar.as_str().to_string())],
                            message: "Invalid format".to_string(),
                        },
                    );
                }
            } else if !has_method(&validators, scalar) {
                validators.insert(
                    0,
                    Validator {
                        method: scalar,
                        parameters: Vec::new(),
                        message: "Invalid format".to_string(),
                    },
                );
            }
        }

        if self.unique() && !has_method(&validators, ValidatorMethod::Unique) {
            validators.insert(
                0,
                Validator {
                    method: ValidatorMethod::Unique,
                    parameters: Vec::new(),
                    message: "Already exists".to_string(),
                },
            );
        }

        if self.required()
            && self.default_value().is_none()
            && !has_method(&validators, ValidatorMethod::Required)
        {
            validators.insert(
                0,
                Validator {
                    method: ValidatorMethod::Required,
                    parameters: Vec::new(),
                    message: format!("{} is required", self.decl.name),
                },
            );
        }

        validators
    }
}

// A trailing string parameter is the custom error message.
fn take_message(parameters: &mut Vec<AttrValue>) -> String {
    if matches!(parameters.last(), Some(AttrValue::String(_))) {
        if let Some(AttrValue::String(text)) = parameters.pop() {
            if !text.is_empty() {
                return text;
            }
        }
    }

    "Invalid value".to_string()
}

fn has_method(validators: &[Validator], method: ValidatorMethod) -> bool {
    validators.iter().any(|validator| validator.method == method)
}

///
/// Validator
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Validator {
    pub method: ValidatorMethod,
    pub parameters: Vec<AttrValue>,
    pub message: String,
}

///
/// Literal
/// What a column's declared type name resolves to.
///

#[derive(Clone, Copy, Debug)]
pub enum Literal<'a> {
    Scalar(LiteralKind),
    Enum(&'a EnumDecl),
    Composite(&'a TypeDecl),
    Model(&'a TypeDecl),
}

///
/// Related
/// The reverse side of a relation edge.
///

#[derive(Clone)]
pub struct Related<'a> {
    pub model: Model<'a>,
    pub column: Column<'a>,
    pub cardinality: (Cardinality, Cardinality),
}

///
/// TESTS
///
