use crate::{Error, prelude::*};
use crudkit_utils::case;
use derive_more::Deref;

///
/// Type
///
/// View over one registered composite-type or model declaration.
///

#[derive(Clone, Copy)]
pub struct Type<'a> {
    ctx: &'a SchemaContext,
    decl: &'a TypeDecl,
}

impl<'a> Type<'a> {
    #[must_use]
    pub const fn from_decl(ctx: &'a SchemaContext, decl: &'a TypeDecl) -> Self {
        Self { ctx, decl }
    }

    /// Look a composite type up by name. Absence is fatal: generation
    /// cannot proceed against a name that was never registered.
    pub fn lookup(ctx: &'a SchemaContext, name: &str) -> Result<Self, Error> {
        ctx.get_type(name)
            .map(|decl| Self { ctx, decl })
            .ok_or_else(|| Error::TypeNotFound(name.to_string()))
    }

    #[must_use]
    pub const fn decl(&self) -> &'a TypeDecl {
        self.decl
    }

    #[must_use]
    pub fn name(&self) -> &'a str {
        &self.decl.name
    }

    #[must_use]
    pub const fn attributes(&self) -> &'a Attributes {
        &self.decl.attributes
    }

    /// Singular display label, falling back to the declared name.
    #[must_use]
    pub fn singular(&self) -> &'a str {
        self.label_part(0)
    }

    /// Plural display label, falling back to the declared name.
    #[must_use]
    pub fn plural(&self) -> &'a str {
        self.label_part(1)
    }

    fn label_part(&self, index: usize) -> &'a str {
        self.decl
            .attributes
            .items("label")
            .and_then(|label| label.get(index))
            .and_then(AttrValue::as_str)
            .unwrap_or(&self.decl.name)
    }

    /// Column views in declaration order.
    #[must_use]
    pub fn columns(&self) -> Vec<Column<'a>> {
        self.decl
            .columns
            .iter()
            .map(|column| Column::new(self.ctx, self.decl, column))
            .collect()
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<Column<'a>> {
        self.decl
            .column(name)
            .map(|column| Column::new(self.ctx, self.decl, column))
    }

    //
    // naming conventions
    //

    #[must_use]
    pub fn name_camel(&self) -> String {
        case::camel(&self.decl.name)
    }

    #[must_use]
    pub fn name_lower(&self) -> String {
        case::lower(&self.decl.name)
    }

    #[must_use]
    pub fn name_title(&self) -> String {
        case::title(&self.decl.name)
    }
}

///
/// Model
///
/// A Type registered as a persisted entity, with the derived column
/// subsets emitters plan against. Subsets are plain filters over the
/// column list; model column counts are small, so each access rescans
/// rather than caching.
///

#[derive(Clone, Copy, Deref)]
pub struct Model<'a>(Type<'a>);

impl<'a> Model<'a> {
    #[must_use]
    pub const fn from_decl(ctx: &'a SchemaContext, decl: &'a TypeDecl) -> Self {
        Self(Type::from_decl(ctx, decl))
    }

    /// Look a model up by name. Absence is fatal.
    pub fn lookup(ctx: &'a SchemaContext, name: &str) -> Result<Self, Error> {
        ctx.get_model(name)
            .map(|decl| Self(Type::from_decl(ctx, decl)))
            .ok_or_else(|| Error::ModelNotFound(name.to_string()))
    }

    //
    // column subsets
    //

    /// Primary key columns.
    #[must_use]
    pub fn ids(&self) -> Vec<Column<'a>> {
        self.filtered(|column| column.id())
    }

    #[must_use]
    pub fn uniques(&self) -> Vec<Column<'a>> {
        self.filtered(|column| column.unique())
    }

    #[must_use]
    pub fn filterables(&self) -> Vec<Column<'a>> {
        self.filtered(|column| column.filterable())
    }

    #[must_use]
    pub fn searchables(&self) -> Vec<Column<'a>> {
        self.filtered(|column| column.searchable())
    }

    #[must_use]
    pub fn sortables(&self) -> Vec<Column<'a>> {
        self.filtered(|column| column.sortable())
    }

    #[must_use]
    pub fn spanables(&self) -> Vec<Column<'a>> {
        self.filtered(|column| column.spanable())
    }

    #[must_use]
    pub fn indexables(&self) -> Vec<Column<'a>> {
        self.filtered(|column| column.indexable())
    }

    /// Columns with a resolvable relation descriptor. Columns whose
    /// relation attribute fails to resolve are absent here, not errors.
    #[must_use]
    pub fn relations(&self) -> Vec<Column<'a>> {
        self.filtered(|column| column.relation().is_some())
    }

    /// Columns whose declared type names a registered model.
    #[must_use]
    pub fn related(&self) -> Vec<Column<'a>> {
        self.filtered(|column| self.ctx().get_model(column.type_name()).is_some())
    }

    fn filtered(&self, keep: impl Fn(&Column<'a>) -> bool) -> Vec<Column<'a>> {
        self.columns().into_iter().filter(keep).collect()
    }

    //
    // singletons
    //

    /// The soft-delete toggle column, if any.
    #[must_use]
    pub fn active(&self) -> Option<Column<'a>> {
        self.columns().into_iter().find(Column::active)
    }

    /// The creation-stamp column, if any.
    #[must_use]
    pub fn created(&self) -> Option<Column<'a>> {
        self.columns().into_iter().find(Column::created)
    }

    /// The update-stamp column, if any.
    #[must_use]
    pub fn updated(&self) -> Option<Column<'a>> {
        self.columns().into_iter().find(Column::updated)
    }

    /// A model with a soft-delete toggle supports restore.
    #[must_use]
    pub fn restorable(&self) -> bool {
        self.active().is_some()
    }

    /// Render the suggested item label: the third label element (or the
    /// lower name) with each `[column]` token replaced by the template,
    /// `%s` standing for the token.
    #[must_use]
    pub fn suggested(&self, template: &str) -> String {
        let source = self
            .attributes()
            .items("label")
            .and_then(|label| label.get(2))
            .and_then(AttrValue::as_str)
            .map_or_else(|| self.name_lower(), ToString::to_string);

        substitute_tokens(&source, template)
    }

    const fn ctx(&self) -> &'a SchemaContext {
        self.0.ctx
    }
}

// Replace [ident] tokens; anything that is not a bare identifier in
// brackets passes through unchanged.
fn substitute_tokens(source: &str, template: &str) -> String {
    let mut result = String::with_capacity(source.len());
    let mut rest = source;

    while let Some(start) = rest.find('[') {
        result.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let Some(end) = after.find(']') else {
            result.push('[');
            rest = after;
            continue;
        };

        let token = &after[..end];
        if !token.is_empty()
            && token
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_')
        {
            result.push_str(&template.replace("%s", token));
        } else {
            result.push('[');
            result.push_str(token);
            result.push(']');
        }
        rest = &after[end + 1..];
    }

    result.push_str(rest);
    result
}

///
/// TESTS
///
