pub mod ast;
pub mod component;
pub mod context;
pub mod default_value;
pub mod paths;
pub mod resolve;
pub mod sql;
pub mod types;

use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        ast::{AttrValue, Attributes, ColumnDecl, EnumDecl, Scalar, TypeDecl},
        component::{BindingKind, ComponentBinding},
        context::SchemaContext,
        default_value::{DefaultValue, IdKind},
        resolve::{Column, Literal, Model, Related, Relation, Type, Validator},
        types::{
            Cardinality, FieldType, LiteralKind, SqlClass, SqlDialect, SqlHelper, ValidatorMethod,
            ValueShape,
        },
    };
    pub use serde::{Deserialize, Serialize};
}

///
/// Error
///
/// Only registry lookups by name are fatal; every other unresolvable
/// condition degrades to an empty/None result the caller checks for.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("model '{0}' is not registered")]
    ModelNotFound(String),

    #[error("type '{0}' is not registered")]
    TypeNotFound(String),
}
