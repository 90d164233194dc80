use crate::prelude::*;
use crudkit_utils::case;

///
/// Relation
///
/// The resolved local-key/foreign-key binding for a column referencing
/// another model, with the cardinality of both sides.
///

#[derive(Clone)]
pub struct Relation<'a> {
    pub local: String,
    pub foreign: String,

    /// Relation name; defaults to the owning model's lower name and
    /// becomes the sub-resource segment in derived paths.
    pub name: String,

    /// (owning side, foreign side)
    pub cardinality: (Cardinality, Cardinality),

    /// The foreign model the declared type resolves to.
    pub model: Model<'a>,
}

/// Resolve a column's `relation` attribute. The attribute value is a
/// single-element array holding a `{local, foreign, name?}` map; the
/// declared type must name a registered model and the foreign key must
/// name one of its columns. Anything else degrades to no relation.
pub(crate) fn resolve<'a>(column: &Column<'a>) -> Option<Relation<'a>> {
    let spec = column.decl().attributes.first("relation")?.as_map()?;
    let local = spec.get("local")?.as_str()?.to_string();
    let foreign = spec.get("foreign")?.as_str()?.to_string();

    let decl = column.ctx().get_model(column.type_name())?;
    let model = Model::from_decl(column.ctx(), decl);
    let foreign_column = model.column(&foreign)?;

    let name = spec.get("name").and_then(AttrValue::as_str).map_or_else(
        || case::lower(&column.parent().name),
        ToString::to_string,
    );
    let cardinality = (
        Cardinality::of(column.required(), column.multiple()),
        Cardinality::of(foreign_column.required(), foreign_column.multiple()),
    );

    Some(Relation {
        local,
        foreign,
        name,
        cardinality,
        model,
    })
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx_with_user() -> SchemaContext {
        let mut ctx = SchemaContext::new();
        ctx.register_model(
            serde_json::from_value(json!({
                "name": "User",
                "columns": [
                    { "name": "id", "type": "String", "required": true,
                      "attributes": { "id": true } },
                ],
            }))
            .expect("model should deserialize"),
        );
        ctx
    }

    fn post_with(column: serde_json::Value) -> TypeDecl {
        serde_json::from_value(json!({ "name": "Post", "columns": [column] }))
            .expect("model should deserialize")
    }

    #[test]
    fn relations_round_trip_through_the_registry() {
        let mut ctx = ctx_with_user();
        let post = post_with(json!({
            "name": "userId", "type": "User", "required": true,
            "attributes": { "relation": [{ "local": "userId", "foreign": "id" }] },
        }));
        ctx.register_model(post.clone());

        let model = Model::lookup(&ctx, "Post").expect("post should be registered");
        let relations = model.relations();
        assert_eq!(relations.len(), 1);

        let relation = relations[0].relation().expect("relation should resolve");
        assert_eq!(relation.local, "userId");
        assert_eq!(relation.foreign, "id");
        assert_eq!(relation.model.name(), "User");
        assert_eq!(relation.name, "post");
        assert_eq!(relation.cardinality, (Cardinality::One, Cardinality::One));
    }

    #[test]
    fn explicit_relation_names_win() {
        let ctx = ctx_with_user();
        let post = post_with(json!({
            "name": "authorId", "type": "User",
            "attributes": {
                "relation": [{ "local": "authorId", "foreign": "id", "name": "author" }],
            },
        }));

        let model = Model::from_decl(&ctx, &post);
        let relation = model.columns()[0].relation().expect("relation should resolve");
        assert_eq!(relation.name, "author");
        assert_eq!(relation.cardinality.0, Cardinality::Opt);
    }

    #[test]
    fn missing_foreign_column_degrades_to_no_relation() {
        let ctx = ctx_with_user();
        let post = post_with(json!({
            "name": "userId", "type": "User",
            "attributes": { "relation": [{ "local": "userId", "foreign": "missingCol" }] },
        }));

        let model = Model::from_decl(&ctx, &post);
        assert!(model.columns()[0].relation().is_none());
        assert!(model.relations().is_empty());
    }

    #[test]
    fn missing_foreign_model_degrades_to_no_relation() {
        let ctx = SchemaContext::new();
        let post = post_with(json!({
            "name": "userId", "type": "User",
            "attributes": { "relation": [{ "local": "userId", "foreign": "id" }] },
        }));

        let model = Model::from_decl(&ctx, &post);
        assert!(model.columns()[0].relation().is_none());
    }

    #[test]
    fn malformed_relation_values_degrade_to_no_relation() {
        let ctx = ctx_with_user();
        let post = post_with(json!({
            "name": "userId", "type": "User",
            "attributes": { "relation": ["userId"] },
        }));

        let model = Model::from_decl(&ctx, &post);
        assert!(model.columns()[0].relation().is_none());
    }
}
