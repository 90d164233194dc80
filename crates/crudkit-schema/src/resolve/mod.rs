mod column;
mod model;
mod relation;

pub use column::{Column, Literal, Related, Validator};
pub use model::{Model, Type};
pub use relation::Relation;
