use crate::prelude::*;
use derive_more::{Display, FromStr};

///
/// Cardinality
///

#[derive(Clone, Copy, Default, Debug, Deserialize, Display, Eq, FromStr, PartialEq, Serialize)]
pub enum Cardinality {
    #[default]
    One,
    Opt,
    Many,
}

impl Cardinality {
    /// Derive one side of a relation from that side's column flags.
    #[must_use]
    pub const fn of(required: bool, multiple: bool) -> Self {
        if multiple {
            Self::Many
        } else if required {
            Self::One
        } else {
            Self::Opt
        }
    }

    /// Stable numeric code used by emitters (0 = opt, 1 = one, 2 = many).
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Opt => 0,
            Self::One => 1,
            Self::Many => 2,
        }
    }
}

///
/// FieldType
///
/// The abstract field types a column can declare. A declared type name
/// outside this set is not a primitive scalar; callers resolve it via
/// the enum/type/model registries instead.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, PartialEq, Serialize)]
#[remain::sorted]
pub enum FieldType {
    Boolean,
    Date,
    Datetime,
    Float,
    Hash,
    Integer,
    Json,
    Number,
    Object,
    String,
    Text,
    Time,
}

impl FieldType {
    /// In-memory model shape for this type.
    #[must_use]
    pub const fn model_shape(self) -> ValueShape {
        match self {
            Self::Number | Self::Integer | Self::Float => ValueShape::Number,
            Self::Boolean => ValueShape::Boolean,
            Self::Json | Self::Object | Self::Hash => ValueShape::Object,
            Self::String | Self::Text | Self::Date | Self::Time | Self::Datetime => {
                ValueShape::String
            }
        }
    }

    /// Wire/storage shape; structured kinds flatten to strings.
    #[must_use]
    pub const fn wire_shape(self) -> ValueShape {
        match self.model_shape() {
            ValueShape::Object => ValueShape::String,
            shape => shape,
        }
    }

    /// The implied validator method for this type.
    #[must_use]
    pub const fn validator(self) -> ValidatorMethod {
        match self {
            Self::String | Self::Text => ValidatorMethod::String,
            Self::Number => ValidatorMethod::Number,
            Self::Integer => ValidatorMethod::Integer,
            Self::Float => ValidatorMethod::Float,
            Self::Boolean => ValidatorMethod::Boolean,
            Self::Date | Self::Datetime | Self::Time => ValidatorMethod::Date,
            Self::Json | Self::Object | Self::Hash => ValidatorMethod::Object,
        }
    }

    /// The literal validation/format category this type reduces to.
    #[must_use]
    pub const fn literal(self) -> LiteralKind {
        match self {
            Self::String | Self::Text => LiteralKind::String,
            Self::Number => LiteralKind::Number,
            Self::Integer => LiteralKind::Integer,
            Self::Float => LiteralKind::Float,
            Self::Boolean => LiteralKind::Boolean,
            Self::Date => LiteralKind::Date,
            Self::Time => LiteralKind::Time,
            Self::Datetime => LiteralKind::Datetime,
            Self::Json | Self::Object | Self::Hash => LiteralKind::Json,
        }
    }

    /// The coercion helper emitters call to format a value for SQL.
    #[must_use]
    pub const fn helper(self) -> SqlHelper {
        match self {
            Self::String | Self::Text | Self::Json | Self::Object | Self::Hash => {
                SqlHelper::ToSqlString
            }
            Self::Number | Self::Float => SqlHelper::ToSqlFloat,
            Self::Integer => SqlHelper::ToSqlInteger,
            Self::Boolean => SqlHelper::ToSqlBoolean,
            Self::Date | Self::Time | Self::Datetime => SqlHelper::ToSqlDate,
        }
    }

    /// The abstract column class this type maps to under a dialect.
    /// Dialect-specific refinement (char vs varchar, integer widths)
    /// happens in the sql module.
    #[must_use]
    pub const fn sql_class(self, dialect: SqlDialect) -> SqlClass {
        match dialect {
            SqlDialect::Mysql => match self {
                Self::String => SqlClass::Str,
                Self::Text => SqlClass::Text,
                Self::Number | Self::Integer | Self::Float => SqlClass::Number,
                Self::Boolean => SqlClass::Boolean,
                Self::Date => SqlClass::Date,
                Self::Datetime => SqlClass::Datetime,
                Self::Time => SqlClass::Time,
                Self::Json | Self::Object | Self::Hash => SqlClass::Json,
            },
            SqlDialect::Postgres => match self {
                Self::String => SqlClass::Str,
                Self::Text => SqlClass::Text,
                Self::Number | Self::Integer | Self::Float => SqlClass::Number,
                Self::Boolean => SqlClass::Boolean,
                Self::Date => SqlClass::Date,
                Self::Datetime => SqlClass::Timestamp,
                Self::Time => SqlClass::Time,
                Self::Json | Self::Object | Self::Hash => SqlClass::Jsonb,
            },
            SqlDialect::Sqlite => match self {
                Self::String
                | Self::Text
                | Self::Date
                | Self::Datetime
                | Self::Time
                | Self::Json
                | Self::Object
                | Self::Hash => SqlClass::Str,
                Self::Number | Self::Integer | Self::Boolean => SqlClass::Number,
                Self::Float => SqlClass::Real,
            },
        }
    }

    /// True for the structured kinds that sqlite stores as json text.
    #[must_use]
    pub const fn is_structured(self) -> bool {
        matches!(self, Self::Json | Self::Object | Self::Hash)
    }
}

///
/// ValueShape
/// Target-language-agnostic shape tag for model and wire types.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, PartialEq, Serialize)]
#[remain::sorted]
pub enum ValueShape {
    Boolean,
    Number,
    Object,
    String,
}

///
/// LiteralKind
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, PartialEq, Serialize)]
#[remain::sorted]
pub enum LiteralKind {
    Boolean,
    Date,
    Datetime,
    Float,
    Integer,
    Json,
    Number,
    String,
    Time,
}

impl LiteralKind {
    /// True for kinds eligible for range (min/max) filtering.
    #[must_use]
    pub const fn is_range_capable(self) -> bool {
        matches!(
            self,
            Self::Number | Self::Integer | Self::Float | Self::Date | Self::Time | Self::Datetime
        )
    }
}

///
/// SqlDialect
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, FromStr, PartialEq, Serialize)]
pub enum SqlDialect {
    Postgres,
    Mysql,
    Sqlite,
}

impl SqlDialect {
    /// Map a configured engine name to its dialect. Unknown engines
    /// yield None and callers skip column emission for them.
    #[must_use]
    pub fn from_engine(engine: &str) -> Option<Self> {
        match engine {
            "neon" | "xata" | "postgres" | "pg" | "vercel" => Some(Self::Postgres),
            "planetscale" | "mysql" => Some(Self::Mysql),
            "sqlite" => Some(Self::Sqlite),
            _ => None,
        }
    }
}

impl std::fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Postgres => "postgres",
            Self::Mysql => "mysql",
            Self::Sqlite => "sqlite",
        };
        write!(f, "{label}")
    }
}

///
/// SqlClass
/// The dialect table's abstract column class, before refinement.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[remain::sorted]
pub enum SqlClass {
    Boolean,
    Date,
    Datetime,
    Json,
    Jsonb,
    Number,
    Real,
    Str,
    Text,
    Time,
    Timestamp,
}

///
/// SqlHelper
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum SqlHelper {
    ToSqlBoolean,
    ToSqlDate,
    ToSqlFloat,
    ToSqlInteger,
    ToSqlString,
}

impl SqlHelper {
    /// Helper function name as emitters spell it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToSqlBoolean => "toSqlBoolean",
            Self::ToSqlDate => "toSqlDate",
            Self::ToSqlFloat => "toSqlFloat",
            Self::ToSqlInteger => "toSqlInteger",
            Self::ToSqlString => "toSqlString",
        }
    }
}

///
/// ValidatorMethod
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum ValidatorMethod {
    Array,
    Boolean,
    Cc,
    Ceq,
    Cge,
    Cgt,
    Cle,
    Clt,
    Color,
    Date,
    Email,
    Eq,
    Float,
    Future,
    Ge,
    Gt,
    Hex,
    Integer,
    Le,
    Lt,
    Ne,
    Notempty,
    Number,
    Object,
    Option,
    Past,
    Present,
    Price,
    Regex,
    Required,
    String,
    Unique,
    Url,
    Wge,
    Wgt,
    Wle,
    Wlt,
}

impl ValidatorMethod {
    /// Catalog scan order for explicit `is.<method>` flags. `unique` is
    /// deliberately absent; it is only ever implied by the unique flag.
    pub const EXPLICIT: &'static [Self] = &[
        Self::Required,
        Self::Notempty,
        Self::Eq,
        Self::Ne,
        Self::Option,
        Self::Regex,
        Self::Date,
        Self::Future,
        Self::Past,
        Self::Present,
        Self::Number,
        Self::Float,
        Self::Price,
        Self::Integer,
        Self::Boolean,
        Self::Gt,
        Self::Ge,
        Self::Lt,
        Self::Le,
        Self::Ceq,
        Self::Cgt,
        Self::Cge,
        Self::Clt,
        Self::Cle,
        Self::Wgt,
        Self::Wge,
        Self::Wlt,
        Self::Wle,
        Self::Cc,
        Self::Email,
        Self::Hex,
        Self::Color,
        Self::Url,
        Self::String,
        Self::Object,
        Self::Array,
    ];

    /// Method key as it appears in `is.<method>` attribute paths.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::Boolean => "boolean",
            Self::Cc => "cc",
            Self::Ceq => "ceq",
            Self::Cge => "cge",
            Self::Cgt => "cgt",
            Self::Cle => "cle",
            Self::Clt => "clt",
            Self::Color => "color",
            Self::Date => "date",
            Self::Email => "email",
            Self::Eq => "eq",
            Self::Float => "float",
            Self::Future => "future",
            Self::Ge => "ge",
            Self::Gt => "gt",
            Self::Hex => "hex",
            Self::Integer => "integer",
            Self::Le => "le",
            Self::Lt => "lt",
            Self::Ne => "ne",
            Self::Notempty => "notempty",
            Self::Number => "number",
            Self::Object => "object",
            Self::Option => "option",
            Self::Past => "past",
            Self::Present => "present",
            Self::Price => "price",
            Self::Regex => "regex",
            Self::Required => "required",
            Self::String => "string",
            Self::Unique => "unique",
            Self::Url => "url",
            Self::Wge => "wge",
            Self::Wgt => "wgt",
            Self::Wle => "wle",
            Self::Wlt => "wlt",
        }
    }
}

impl std::fmt::Display for ValidatorMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

///
/// TESTS
///
