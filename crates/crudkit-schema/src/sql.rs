use crate::prelude::*;

///
/// SqlColumn
/// One derived column definition, structured for emitters.
///

#[derive(Clone, Debug, PartialEq)]
pub struct SqlColumn {
    pub name: String,
    pub ty: SqlType,
    pub modifiers: Vec<SqlModifier>,
}

///
/// SqlType
///

#[derive(Clone, Copy, Debug, PartialEq)]
#[remain::sorted]
pub enum SqlType {
    Bigint,
    Boolean,
    Char {
        length: u32,
    },
    Date,
    Datetime,
    Float {
        precision: u32,
        scale: u32,
        unsigned: bool,
    },
    Integer {
        precision: Option<u32>,
        unsigned: bool,
    },
    /// sqlite integer in boolean mode.
    IntegerBoolean,
    Json,
    Jsonb,
    Numeric {
        precision: u32,
        scale: u32,
        unsigned: bool,
    },
    Real,
    Smallint,
    Text {
        json: bool,
    },
    Time,
    Timestamp,
    Varchar {
        length: u32,
    },
}

///
/// SqlModifier
///

#[derive(Clone, Debug, PartialEq)]
pub enum SqlModifier {
    NotNull,
    Default(DefaultValue),
    PrimaryKey,
    Autoincrement,
    References { model: String, column: String },
}

/// Derive one column definition under a dialect. Non-primitive types
/// (enum, composite, model references) yield None; callers resolve
/// those through the relation path instead.
#[must_use]
pub fn sql_column(column: &Column<'_>, dialect: SqlDialect) -> Option<SqlColumn> {
    let field_type = column.field_type()?;

    Some(SqlColumn {
        name: column.name().to_string(),
        ty: column_type(column, field_type, dialect),
        modifiers: modifiers(column),
    })
}

/// Character-length bound `[min, max]` derived from the count
/// validators; defaults to `[0, 255]`, and a max below one resets to
/// 255.
#[must_use]
pub fn char_length(column: &Column<'_>) -> (u32, u32) {
    let mut min = 0.0_f64;
    let mut max = 255.0_f64;

    for validator in column.validators() {
        let Some(param) = validator
            .parameters
            .first()
            .and_then(AttrValue::as_number)
        else {
            continue;
        };
        match validator.method {
            ValidatorMethod::Ceq => {
                min = param;
                max = param;
            }
            ValidatorMethod::Cgt | ValidatorMethod::Cge => min = param,
            ValidatorMethod::Clt | ValidatorMethod::Cle => max = param,
            _ => {}
        }
    }

    if max < 1.0 {
        max = 255.0;
    }

    (min as u32, max as u32)
}

///
/// NumericProfile
/// Digit-count analysis of a numeric column's declared bounds.
///

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NumericProfile {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub integer_length: u32,
    pub decimal_length: u32,
}

/// Bounds from the comparison validators plus the `step` attribute;
/// digit counts take the maximum across min, max and step.
#[must_use]
pub fn numeric_profile(column: &Column<'_>) -> NumericProfile {
    let mut min = 0.0_f64;
    let mut max = 0.0_f64;

    for validator in column.validators() {
        let Some(param) = validator
            .parameters
            .first()
            .and_then(AttrValue::as_number)
        else {
            continue;
        };
        match validator.method {
            ValidatorMethod::Eq => {
                min = param;
                max = param;
            }
            ValidatorMethod::Gt | ValidatorMethod::Ge => min = param,
            ValidatorMethod::Lt | ValidatorMethod::Le => max = param,
            _ => {}
        }
    }

    let step = column
        .decl()
        .attributes
        .first("step")
        .and_then(AttrValue::as_number)
        .unwrap_or(0.0);

    let (min_int, min_dec) = digit_lengths(min);
    let (max_int, max_dec) = digit_lengths(max);
    let (step_int, step_dec) = digit_lengths(step);

    NumericProfile {
        min,
        max,
        step,
        integer_length: min_int.max(max_int).max(step_int),
        decimal_length: min_dec.max(max_dec).max(step_dec),
    }
}

// Digit counts of the decimal rendering; the sign counts toward the
// integer length.
fn digit_lengths(value: f64) -> (u32, u32) {
    let text = format!("{value}");
    let mut parts = text.splitn(2, '.');
    let int_len = parts.next().map_or(0, str::len) as u32;
    let dec_len = parts.next().map_or(0, str::len) as u32;

    (int_len, dec_len)
}

fn column_type(column: &Column<'_>, field_type: FieldType, dialect: SqlDialect) -> SqlType {
    match (dialect, field_type.sql_class(dialect)) {
        (SqlDialect::Sqlite, SqlClass::Str) => SqlType::Text {
            json: field_type.is_structured(),
        },
        (SqlDialect::Sqlite, SqlClass::Number) => {
            if field_type == FieldType::Boolean {
                SqlType::IntegerBoolean
            } else if numeric_profile(column).decimal_length > 0 {
                SqlType::Real
            } else {
                SqlType::Integer {
                    precision: None,
                    unsigned: false,
                }
            }
        }
        (_, SqlClass::Str) => {
            let (min, max) = char_length(column);
            if min == max {
                SqlType::Char { length: max }
            } else {
                SqlType::Varchar { length: max }
            }
        }
        (_, SqlClass::Number) => {
            let profile = numeric_profile(column);
            let unsigned = profile.min < 0.0;

            if profile.decimal_length > 0 {
                let precision = profile.integer_length + profile.decimal_length;
                let scale = profile.decimal_length;
                match dialect {
                    SqlDialect::Mysql => SqlType::Float {
                        precision,
                        scale,
                        unsigned,
                    },
                    _ => SqlType::Numeric {
                        precision,
                        scale,
                        unsigned,
                    },
                }
            } else if profile.integer_length == 1 {
                SqlType::Smallint
            } else if profile.integer_length > 8 {
                SqlType::Bigint
            } else {
                SqlType::Integer {
                    precision: Some(profile.integer_length),
                    unsigned,
                }
            }
        }
        (_, SqlClass::Text) => SqlType::Text { json: false },
        (_, SqlClass::Boolean) => SqlType::Boolean,
        (_, SqlClass::Date) => SqlType::Date,
        (_, SqlClass::Datetime) => SqlType::Datetime,
        (_, SqlClass::Time) => SqlType::Time,
        (_, SqlClass::Timestamp) => SqlType::Timestamp,
        (_, SqlClass::Json) => SqlType::Json,
        (_, SqlClass::Jsonb) => SqlType::Jsonb,
        (_, SqlClass::Real) => SqlType::Real,
    }
}

fn modifiers(column: &Column<'_>) -> Vec<SqlModifier> {
    let mut modifiers = Vec::new();

    if column.required() {
        modifiers.push(SqlModifier::NotNull);
    }
    if let Some(default) = column.default_value() {
        modifiers.push(SqlModifier::Default(default));
    }
    if column.id() {
        modifiers.push(SqlModifier::PrimaryKey);
    }
    if column.autoincrement() {
        modifiers.push(SqlModifier::Autoincrement);
    }
    if let Some(relation) = local_relation(column) {
        modifiers.push(SqlModifier::References {
            model: relation.model.name().to_string(),
            column: relation.foreign,
        });
    }

    modifiers
}

// The relation whose local key is this column, if the parent declares
// one.
fn local_relation<'a>(column: &Column<'a>) -> Option<Relation<'a>> {
    let parent = Model::from_decl(column.ctx(), column.parent());
    parent
        .relations()
        .into_iter()
        .filter_map(|related| related.relation())
        .find(|relation| relation.local == column.name())
}

///
/// TESTS
///
