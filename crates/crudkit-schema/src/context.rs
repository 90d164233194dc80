use crate::prelude::*;
use std::collections::BTreeMap;

///
/// SchemaContext
///
/// The three declaration registries for one generation run. The loader
/// registers every parsed declaration up front; resolvers borrow the
/// context immutably for the rest of the run, so registration can
/// never interleave with cross-model lookups.
///
/// Last registration wins when names collide; rejecting collisions is
/// a loader concern, not a registry one.
///

#[derive(Clone, Debug, Default)]
pub struct SchemaContext {
    enums: BTreeMap<String, EnumDecl>,
    types: BTreeMap<String, TypeDecl>,
    models: BTreeMap<String, TypeDecl>,
}

impl SchemaContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_enum(&mut self, decl: EnumDecl) {
        self.enums.insert(decl.name.clone(), decl);
    }

    pub fn register_type(&mut self, decl: TypeDecl) {
        self.types.insert(decl.name.clone(), decl);
    }

    pub fn register_model(&mut self, decl: TypeDecl) {
        self.models.insert(decl.name.clone(), decl);
    }

    #[must_use]
    pub fn get_enum(&self, name: &str) -> Option<&EnumDecl> {
        self.enums.get(name)
    }

    #[must_use]
    pub fn get_type(&self, name: &str) -> Option<&TypeDecl> {
        self.types.get(name)
    }

    #[must_use]
    pub fn get_model(&self, name: &str) -> Option<&TypeDecl> {
        self.models.get(name)
    }

    /// Iterate registered models in name order.
    pub fn models(&self) -> impl Iterator<Item = &TypeDecl> {
        self.models.values()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn model(name: &str) -> TypeDecl {
        serde_json::from_value(json!({ "name": name })).expect("model should deserialize")
    }

    #[test]
    fn lookups_only_see_registered_declarations() {
        let mut ctx = SchemaContext::new();
        assert!(ctx.get_model("User").is_none());

        ctx.register_model(model("User"));
        assert!(ctx.get_model("User").is_some());
        assert!(ctx.get_type("User").is_none());
    }

    #[test]
    fn last_registration_wins_on_collision() {
        let mut ctx = SchemaContext::new();

        let mut first = model("User");
        first.columns.push(
            serde_json::from_value(json!({ "name": "id", "type": "String" }))
                .expect("column should deserialize"),
        );
        ctx.register_model(first);
        ctx.register_model(model("User"));

        let decl = ctx.get_model("User").expect("model should be registered");
        assert!(decl.columns.is_empty());
    }
}
