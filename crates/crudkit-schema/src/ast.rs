use derive_more::Deref;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// AttrValue
///
/// Declared attribute values are open-ended: the loader hands them
/// over exactly as parsed and every derived behavior reads them back
/// through the accessors below.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<AttrValue>),
    Map(BTreeMap<String, AttrValue>),
}

impl AttrValue {
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(values) => Some(values),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_map(&self) -> Option<&BTreeMap<String, Self>> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }
}

///
/// Attributes
///
/// Mapping from attribute-path strings (`label`, `field.text`,
/// `is.required`, `relation`) to declared values. This is the entire
/// configuration surface the resolvers derive behavior from.
///

#[derive(Clone, Debug, Default, Deref, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Attributes(pub BTreeMap<String, AttrValue>);

impl Attributes {
    /// True when the attribute is declared as a bare `true` flag.
    #[must_use]
    pub fn flag(&self, key: &str) -> bool {
        self.0.get(key).and_then(AttrValue::as_bool) == Some(true)
    }

    /// The attribute's declared array elements, if it is an array.
    #[must_use]
    pub fn items(&self, key: &str) -> Option<&[AttrValue]> {
        self.0.get(key).and_then(AttrValue::as_list)
    }

    /// The first element of an array-valued attribute. Single-value
    /// attributes (`default`, `step`) are declared as one-element
    /// arrays.
    #[must_use]
    pub fn first(&self, key: &str) -> Option<&AttrValue> {
        self.items(key).and_then(<[AttrValue]>::first)
    }
}

///
/// Scalar
/// A member value of a declared enum.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(f64),
    String(String),
}

///
/// EnumDecl
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct EnumDecl {
    pub name: String,
    pub variants: BTreeMap<String, Scalar>,
}

impl EnumDecl {
    /// The enum's value set, the literal a column of this type takes.
    #[must_use]
    pub fn values(&self) -> Vec<&Scalar> {
        self.variants.values().collect()
    }
}

///
/// ColumnDecl
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ColumnDecl {
    pub name: String,

    /// Reference to a primitive, enum, composite type or model name.
    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub multiple: bool,

    #[serde(default)]
    pub attributes: Attributes,
}

///
/// TypeDecl
///
/// One named declaration with an ordered column list. Models and
/// composite types share this shape; the distinction is which registry
/// the loader places them in.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TypeDecl {
    pub name: String,

    #[serde(default)]
    pub attributes: Attributes,

    #[serde(default)]
    pub columns: Vec<ColumnDecl>,
}

impl TypeDecl {
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnDecl> {
        self.columns.iter().find(|column| column.name == name)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attributes(value: serde_json::Value) -> Attributes {
        serde_json::from_value(value).expect("attributes should deserialize")
    }

    #[test]
    fn flag_requires_a_true_boolean() {
        let attrs = attributes(json!({
            "id": true,
            "unique": false,
            "label": ["User", "Users"],
        }));

        assert!(attrs.flag("id"));
        assert!(!attrs.flag("unique"));
        assert!(!attrs.flag("label"));
        assert!(!attrs.flag("missing"));
    }

    #[test]
    fn first_reads_single_element_arrays() {
        let attrs = attributes(json!({ "default": ["now()"], "step": [0.01] }));

        assert_eq!(
            attrs.first("default").and_then(AttrValue::as_str),
            Some("now()")
        );
        assert_eq!(
            attrs.first("step").and_then(AttrValue::as_number),
            Some(0.01)
        );
    }

    #[test]
    fn column_decl_deserializes_with_defaults() {
        let column: ColumnDecl = serde_json::from_value(json!({
            "name": "email",
            "type": "String",
        }))
        .expect("column should deserialize");

        assert_eq!(column.name, "email");
        assert_eq!(column.type_name, "String");
        assert!(!column.required);
        assert!(!column.multiple);
        assert!(column.attributes.is_empty());
    }
}
