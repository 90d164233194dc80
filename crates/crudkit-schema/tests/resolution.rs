//! End-to-end resolution over a small application schema: three
//! models, an enum, a composite type, relations and derived paths.

use crudkit_schema::{
    paths::{self, JoinKind, PathKind, RouteKind},
    prelude::*,
    sql::{self, SqlModifier, SqlType},
};
use serde_json::json;

fn load() -> SchemaContext {
    let mut ctx = SchemaContext::new();

    ctx.register_enum(
        serde_json::from_value(json!({
            "name": "Currency",
            "variants": { "Usd": "usd", "Eur": "eur" },
        }))
        .expect("enum should deserialize"),
    );

    ctx.register_type(
        serde_json::from_value(json!({
            "name": "Address",
            "columns": [
                { "name": "street", "type": "String", "required": true },
                { "name": "city", "type": "String", "required": true },
            ],
        }))
        .expect("type should deserialize"),
    );

    ctx.register_model(
        serde_json::from_value(json!({
            "name": "Profile",
            "attributes": { "label": ["Profile", "Profiles", "[name]"] },
            "columns": [
                { "name": "id", "type": "String", "required": true,
                  "attributes": { "id": true, "generated": true, "default": ["cuid()"] } },
                { "name": "name", "type": "String", "required": true,
                  "attributes": {
                      "searchable": true, "sortable": true,
                      "field.text": { "placeholder": "Name" },
                      "list.text": true,
                      "is.cle": [64.0, "Keep it short"],
                  } },
                { "name": "age", "type": "Integer",
                  "attributes": { "filterable": true, "is.ge": [18.0], "is.le": [120.0] } },
                { "name": "currency", "type": "Currency",
                  "attributes": { "filterable": true } },
                { "name": "address", "type": "Address" },
                { "name": "active", "type": "Boolean", "required": true,
                  "attributes": { "active": true, "default": [true] } },
                { "name": "created", "type": "Datetime", "required": true,
                  "attributes": { "created": true, "sortable": true, "default": ["now()"] } },
                { "name": "updated", "type": "Datetime", "required": true,
                  "attributes": { "updated": true, "default": ["now()"] } },
            ],
        }))
        .expect("model should deserialize"),
    );

    ctx.register_model(
        serde_json::from_value(json!({
            "name": "Auth",
            "attributes": { "label": ["Auth", "Auths"] },
            "columns": [
                { "name": "token", "type": "String", "required": true,
                  "attributes": { "id": true, "default": ["nanoid(24)"] } },
                { "name": "profileId", "type": "String", "required": true },
                { "name": "profile", "type": "Profile", "required": true,
                  "attributes": {
                      "relation": [{ "local": "profileId", "foreign": "id" }],
                  } },
            ],
        }))
        .expect("model should deserialize"),
    );

    ctx.register_model(
        serde_json::from_value(json!({
            "name": "Connection",
            "columns": [
                { "name": "id", "type": "String", "required": true,
                  "attributes": { "id": true } },
                { "name": "ownerId", "type": "String", "required": true },
                { "name": "owner", "type": "Profile", "required": true,
                  "attributes": {
                      "relation": [{ "local": "ownerId", "foreign": "id", "name": "owned" }],
                  } },
                { "name": "targetId", "type": "String", "required": true },
                { "name": "target", "type": "Profile", "required": true,
                  "attributes": {
                      "relation": [{ "local": "targetId", "foreign": "id", "name": "targeted" }],
                  } },
            ],
        }))
        .expect("model should deserialize"),
    );

    ctx
}

#[test]
fn lookup_is_fatal_only_for_unknown_names() {
    let ctx = load();

    assert!(Model::lookup(&ctx, "Profile").is_ok());
    assert!(Model::lookup(&ctx, "Session").is_err());
    assert!(Type::lookup(&ctx, "Address").is_ok());
}

#[test]
fn profile_resolves_its_derived_surface() {
    let ctx = load();
    let profile = Model::lookup(&ctx, "Profile").expect("profile should be registered");

    assert_eq!(profile.singular(), "Profile");
    assert_eq!(profile.plural(), "Profiles");
    assert_eq!(profile.suggested("{%s}"), "{name}");
    assert!(profile.restorable());

    let ids: Vec<_> = profile.ids().iter().map(|c| c.name().to_string()).collect();
    assert_eq!(ids, vec!["id"]);

    // generated id carries no validators despite flags and default
    let id = profile.column("id").expect("id should exist");
    assert!(id.validators().is_empty());
    assert_eq!(
        id.default_value(),
        Some(DefaultValue::GeneratedId(IdKind::Cuid))
    );

    // name: explicit cle with custom message, implied string + required
    let name = profile.column("name").expect("name should exist");
    let validators = name.validators();
    let methods: Vec<_> = validators.iter().map(|v| v.method).collect();
    assert_eq!(
        methods,
        vec![
            ValidatorMethod::Required,
            ValidatorMethod::String,
            ValidatorMethod::Cle,
        ]
    );
    assert_eq!(validators[2].message, "Keep it short");

    // field binding merges catalog defaults with the flag map
    let field = name.field();
    assert_eq!(field.method, "text");
    assert_eq!(field.component, Some("Input"));
    assert_eq!(
        field.attributes.get("placeholder").and_then(AttrValue::as_str),
        Some("Name")
    );
    assert_eq!(
        field.attributes.get("type").and_then(AttrValue::as_str),
        Some("text")
    );
    assert_eq!(name.list().method, "text");
    assert_eq!(name.view().method, "none");
}

#[test]
fn literals_resolve_through_each_registry() {
    let ctx = load();
    let profile = Model::lookup(&ctx, "Profile").expect("profile should be registered");

    assert!(matches!(
        profile.column("age").and_then(|c| c.literal()),
        Some(Literal::Scalar(LiteralKind::Integer))
    ));
    assert!(matches!(
        profile.column("currency").and_then(|c| c.literal()),
        Some(Literal::Enum(decl)) if decl.name == "Currency"
    ));
    assert!(matches!(
        profile.column("address").and_then(|c| c.literal()),
        Some(Literal::Composite(decl)) if decl.name == "Address"
    ));

    let auth = Model::lookup(&ctx, "Auth").expect("auth should be registered");
    assert!(matches!(
        auth.column("profile").and_then(|c| c.literal()),
        Some(Literal::Model(decl)) if decl.name == "Profile"
    ));
}

#[test]
fn spanables_exclude_enum_typed_filterables() {
    let ctx = load();
    let profile = Model::lookup(&ctx, "Profile").expect("profile should be registered");

    let spanables: Vec<_> = profile
        .spanables()
        .iter()
        .map(|c| c.name().to_string())
        .collect();
    assert_eq!(spanables, vec!["age"]);

    // currency is filterable but its literal is an enum value set
    let filterables: Vec<_> = profile
        .filterables()
        .iter()
        .map(|c| c.name().to_string())
        .collect();
    assert_eq!(filterables, vec!["age", "currency"]);
}

#[test]
fn auth_relation_round_trips() {
    let ctx = load();
    let auth = Model::lookup(&ctx, "Auth").expect("auth should be registered");

    let relations = auth.relations();
    assert_eq!(relations.len(), 1);

    let relation = relations[0].relation().expect("relation should resolve");
    assert_eq!(relation.local, "profileId");
    assert_eq!(relation.foreign, "id");
    assert_eq!(relation.name, "auth");
    assert_eq!(relation.model.name(), "Profile");
    assert_eq!(relation.cardinality, (Cardinality::One, Cardinality::One));

    assert_eq!(paths::join_kind(&auth, &relation), JoinKind::Inner);
}

#[test]
fn paths_nest_and_stay_complete() {
    let ctx = load();

    let profile = Model::lookup(&ctx, "Profile").expect("profile should be registered");
    let sets = paths::path_sets(&profile);
    assert_eq!(sets.len(), 1);
    assert_eq!(sets[0].route(RouteKind::Root, "[%s]"), "profile");
    assert_eq!(sets[0].route(RouteKind::Detail, "[%s]"), "profile/[id]");
    assert_eq!(
        sets[0].route(RouteKind::Restore, "[%s]"),
        "profile/[id]/restore"
    );

    let auth = Model::lookup(&ctx, "Auth").expect("auth should be registered");
    let sets = paths::path_sets(&auth);
    assert_eq!(sets.len(), 1);
    assert_eq!(
        sets[0].route(RouteKind::Detail, "[id%i]"),
        "profile/[id0]/auth/[id1]"
    );
    assert_eq!(
        sets[0].route(RouteKind::Create, "[%s]"),
        "profile/[profileId]/auth/create"
    );

    // two parent relations mean two distinct url shapes
    let connection = Model::lookup(&ctx, "Connection").expect("connection should be registered");
    let sets = paths::path_sets(&connection);
    assert_eq!(sets.len(), 2);
    let details: Vec<_> = sets
        .iter()
        .map(|set| set.route(RouteKind::Detail, "[%s]"))
        .collect();
    assert!(details.contains(&"profile/[ownerId]/owned/[id]".to_string()));
    assert!(details.contains(&"profile/[targetId]/targeted/[id]".to_string()));

    // every path addresses every primary key exactly once
    for set in &sets {
        for id in connection.ids() {
            let count = set
                .paths
                .iter()
                .filter(|node| node.kind == PathKind::Id && node.name == id.name())
                .count();
            assert_eq!(count, 1);
        }
    }
}

#[test]
fn sql_columns_derive_per_dialect() {
    let ctx = load();
    let profile = Model::lookup(&ctx, "Profile").expect("profile should be registered");

    let name = profile.column("name").expect("name should exist");
    assert_eq!(
        sql::sql_column(&name, SqlDialect::Postgres).map(|c| c.ty),
        Some(SqlType::Varchar { length: 64 })
    );

    let age = profile.column("age").expect("age should exist");
    assert_eq!(
        sql::sql_column(&age, SqlDialect::Mysql).map(|c| c.ty),
        Some(SqlType::Integer {
            precision: Some(3),
            unsigned: false,
        })
    );

    // enum-typed columns are not primitive scalars
    let currency = profile.column("currency").expect("currency should exist");
    assert!(sql::sql_column(&currency, SqlDialect::Postgres).is_none());

    let created = profile.column("created").expect("created should exist");
    let derived =
        sql::sql_column(&created, SqlDialect::Postgres).expect("primitive should derive");
    assert_eq!(derived.ty, SqlType::Timestamp);
    assert!(
        derived
            .modifiers
            .contains(&SqlModifier::Default(DefaultValue::Expression(
                "now()".to_string()
            )))
    );

    // the scalar fk column picks up the references modifier
    let auth = Model::lookup(&ctx, "Auth").expect("auth should be registered");
    let fk = auth.column("profileId").expect("profileId should exist");
    let derived = sql::sql_column(&fk, SqlDialect::Postgres).expect("primitive should derive");
    assert!(derived.modifiers.contains(&SqlModifier::References {
        model: "Profile".to_string(),
        column: "id".to_string(),
    }));

    let token = auth.column("token").expect("token should exist");
    let derived = sql::sql_column(&token, SqlDialect::Sqlite).expect("primitive should derive");
    assert_eq!(derived.ty, SqlType::Text { json: false });
    assert!(
        derived
            .modifiers
            .contains(&SqlModifier::Default(DefaultValue::GeneratedId(
                IdKind::Nanoid { length: Some(24) }
            )))
    );
}

#[test]
fn reverse_edges_resolve_from_the_foreign_side() {
    let ctx = load();
    let auth = Model::lookup(&ctx, "Auth").expect("auth should be registered");

    // Auth.profile points at Profile; Profile.id is what it binds to,
    // so the reverse edge from a Profile-typed column finds nothing
    // unless the foreign key matches. Exercise via Auth itself: a
    // Profile-typed column whose name is the foreign key of a relation
    // declared on Auth.
    let profile_col = auth.column("profile").expect("profile should exist");
    assert!(profile_col.related().is_none());

    let mut ctx2 = SchemaContext::new();
    ctx2.register_model(
        serde_json::from_value(json!({
            "name": "Team",
            "columns": [
                { "name": "id", "type": "String", "required": true,
                  "attributes": { "id": true } },
                { "name": "captainId", "type": "Member",
                  "attributes": { "relation": [{ "local": "captainId", "foreign": "id" }] } },
            ],
        }))
        .expect("model should deserialize"),
    );
    ctx2.register_model(
        serde_json::from_value(json!({
            "name": "Member",
            "columns": [
                { "name": "id", "type": "Team", "required": true,
                  "attributes": { "id": true } },
            ],
        }))
        .expect("model should deserialize"),
    );

    let member = Model::lookup(&ctx2, "Member").expect("member should be registered");
    let id = member.column("id").expect("id should exist");
    let related = id.related().expect("reverse edge should resolve");
    assert_eq!(related.model.name(), "Team");
    assert_eq!(related.column.name(), "captainId");
    assert_eq!(related.cardinality, (Cardinality::One, Cardinality::Opt));
}
