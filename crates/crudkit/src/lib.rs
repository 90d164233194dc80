//! Facade crate: one dependency line for consumers that want the
//! whole resolution surface.

pub use crudkit_schema as schema;
pub use crudkit_utils as utils;

pub use crudkit_schema::Error;

///
/// Prelude
///

pub mod prelude {
    pub use crudkit_schema::{
        Error,
        paths::{self, JoinKind, PathKind, PathNode, PathSet, RouteKind},
        prelude::*,
        sql::{self, SqlColumn, SqlModifier, SqlType},
    };
    pub use crudkit_utils::case;
}
