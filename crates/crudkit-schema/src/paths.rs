use crate::prelude::*;

///
/// PathKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PathKind {
    /// A root resource segment named after a model.
    Model,
    /// An identifier segment addressing one primary key value.
    Id,
    /// A sub-resource segment named after a relation.
    Column,
}

///
/// PathNode
///

#[derive(Clone)]
pub struct PathNode<'a> {
    pub kind: PathKind,
    pub name: String,
    pub model: Model<'a>,
    pub index: Option<usize>,
}

///
/// RouteKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RouteKind {
    Root,
    Search,
    Create,
    Detail,
    Update,
    Remove,
    Restore,
}

///
/// JoinKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum JoinKind {
    Inner,
    Left,
}

/// Enumerate the model's nested path branches. A model with no
/// relations is a root resource; otherwise each relation contributes
/// the foreign model's own branches extended with an identifier
/// segment (the local key) and a sub-resource segment (the relation
/// name). A model reachable through two parents gets two branches.
#[must_use]
pub fn path_meta<'a>(model: &Model<'a>) -> Vec<Vec<PathNode<'a>>> {
    let relations = model.relations();
    if relations.is_empty() {
        return vec![vec![PathNode {
            kind: PathKind::Model,
            name: model.name_lower(),
            model: *model,
            index: None,
        }]];
    }

    let mut branches = Vec::new();
    for column in relations {
        let Some(relation) = column.relation() else {
            continue;
        };
        for mut branch in path_meta(&relation.model) {
            branch.push(PathNode {
                kind: PathKind::Id,
                name: relation.local.clone(),
                model: *model,
                index: None,
            });
            branch.push(PathNode {
                kind: PathKind::Column,
                name: relation.name.clone(),
                model: *model,
                index: None,
            });
            branches.push(branch);
        }
    }

    branches
}

///
/// PathSet
///
/// One completed branch: the reference branch as derived, plus the
/// addressable variant with indexed identifier segments and every one
/// of the model's primary keys present.
///

#[derive(Clone)]
pub struct PathSet<'a> {
    pub reference: Vec<PathNode<'a>>,
    pub paths: Vec<PathNode<'a>>,
}

impl PathSet<'_> {
    /// Render one route. Identifier segments go through the template
    /// (`%s` is the segment name, `%i` its positional index).
    #[must_use]
    pub fn route(&self, kind: RouteKind, template: &str) -> String {
        let root = render(&self.reference, template);
        let detail = render(&self.paths, template);

        match kind {
            RouteKind::Create => format!("{root}/create"),
            RouteKind::Detail => detail,
            RouteKind::Remove => format!("{detail}/remove"),
            RouteKind::Restore => format!("{detail}/restore"),
            RouteKind::Update => format!("{detail}/update"),
            RouteKind::Root | RouteKind::Search => root,
        }
    }
}

/// Complete every branch of [`path_meta`] so each one can address all
/// of the model's primary key columns: identifier segments get
/// sequential indices, and ids a relation chain never surfaced are
/// appended at the end.
#[must_use]
pub fn path_sets<'a>(model: &Model<'a>) -> Vec<PathSet<'a>> {
    path_meta(model)
        .into_iter()
        .map(|reference| {
            let mut index = 0;
            let mut paths: Vec<PathNode<'a>> = reference
                .iter()
                .cloned()
                .map(|mut node| {
                    if node.kind == PathKind::Id {
                        node.index = Some(index);
                        index += 1;
                    }
                    node
                })
                .collect();

            for id in model.ids() {
                if !paths.iter().any(|node| node.name == id.name()) {
                    paths.push(PathNode {
                        kind: PathKind::Id,
                        name: id.name().to_string(),
                        model: *model,
                        index: Some(index),
                    });
                    index += 1;
                }
            }

            PathSet { reference, paths }
        })
        .collect()
}

/// Join strategy for one relation: a left join when the local key
/// column itself holds multiple values, an inner join otherwise.
#[must_use]
pub fn join_kind(model: &Model<'_>, relation: &Relation<'_>) -> JoinKind {
    let outer = model
        .columns()
        .into_iter()
        .any(|column| column.name() == relation.local && column.multiple());

    if outer { JoinKind::Left } else { JoinKind::Inner }
}

fn render(nodes: &[PathNode<'_>], template: &str) -> String {
    nodes
        .iter()
        .map(|node| match node.kind {
            PathKind::Id => template
                .replace("%s", &node.name)
                .replace("%i", &node.index.unwrap_or(0).to_string()),
            PathKind::Model | PathKind::Column => node.name.clone(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

///
/// TESTS
///
