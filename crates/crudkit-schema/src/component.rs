use crate::prelude::*;
use std::collections::BTreeMap;

///
/// ComponentSpec
/// One configured UI-component binding the catalog knows about.
///

pub struct ComponentSpec {
    pub method: &'static str,
    pub component: Option<&'static str>,
    pub defaults: &'static [(&'static str, &'static str)],
}

/// Field widgets a column can bind with `field.<name>`.
pub const FIELDS: &[ComponentSpec] = &[
    spec("active", None, &[]),
    spec("autocomplete", Some("Autocomplete"), &[]),
    spec("checkbox", Some("Checkbox"), &[]),
    spec("checklist", Some("Checklist"), &[]),
    spec("code", Some("CodeEditor"), &[]),
    spec("color", Some("Input"), &[("type", "color")]),
    spec("country", Some("SelectCountry"), &[]),
    spec("created", None, &[]),
    spec("currency", Some("SelectCurrency"), &[]),
    spec("date", Some("Input"), &[("type", "date")]),
    spec("datetime", Some("Input"), &[("type", "datetime-local")]),
    spec("email", Some("Input"), &[("type", "email")]),
    spec("fieldset", Some("Fieldset"), &[]),
    spec("file", Some("FileInput"), &[]),
    spec("filelist", Some("FileList"), &[]),
    spec("image", Some("ImageInput"), &[]),
    spec("imagelist", Some("ImageList"), &[]),
    spec("input", Some("Input"), &[("type", "text")]),
    spec("integer", Some("NumberInput"), &[("step", "1")]),
    spec("json", Some("CodeEditor"), &[("language", "json")]),
    spec("mask", Some("MaskInput"), &[]),
    spec("metadata", Some("MetadataInput"), &[]),
    spec("number", Some("NumberInput"), &[]),
    spec("password", Some("Input"), &[("type", "password")]),
    spec("phone", Some("Input"), &[("type", "tel")]),
    spec("price", Some("NumberInput"), &[("step", "0.01")]),
    spec("radio", Some("Radio"), &[]),
    spec("radiolist", Some("RadioList"), &[]),
    spec("range", Some("Input"), &[("type", "range")]),
    spec("rating", Some("Rating"), &[]),
    spec("select", Some("Select"), &[]),
    spec("slider", Some("Slider"), &[]),
    spec("slug", Some("SlugInput"), &[]),
    spec("small", Some("Input"), &[("type", "text")]),
    spec("switch", Some("Switch"), &[]),
    spec("table", Some("TableInput"), &[]),
    spec("tags", Some("TagInput"), &[]),
    spec("text", Some("Input"), &[("type", "text")]),
    spec("textarea", Some("Textarea"), &[]),
    spec("textlist", Some("TextList"), &[]),
    spec("time", Some("Input"), &[("type", "time")]),
    spec("updated", None, &[]),
    spec("url", Some("Input"), &[("type", "url")]),
    spec("wysiwyg", Some("RichTextEditor"), &[]),
];

/// Formats a column can bind with `list.<name>` or `view.<name>`.
pub const FORMATS: &[ComponentSpec] = &[
    spec("capital", None, &[]),
    spec("carousel", Some("Carousel"), &[]),
    spec("char", None, &[("length", "100")]),
    spec("color", Some("ColorSwatch"), &[]),
    spec("comma", None, &[]),
    spec("country", Some("CountryLabel"), &[]),
    spec("currency", Some("CurrencyLabel"), &[]),
    spec("date", None, &[("format", "YYYY-MM-DD HH:mm:ss")]),
    spec("email", Some("Link"), &[("scheme", "mailto")]),
    spec("escaped", None, &[]),
    spec("formula", None, &[]),
    spec("hide", None, &[]),
    spec("html", Some("HtmlBlock"), &[]),
    spec("image", Some("Image"), &[]),
    spec("json", Some("CodeBlock"), &[("language", "json")]),
    spec("line", None, &[]),
    spec("link", Some("Link"), &[]),
    spec("list", Some("ItemList"), &[]),
    spec("lower", None, &[]),
    spec("markdown", Some("Markdown"), &[]),
    spec("metadata", Some("MetadataTable"), &[]),
    spec("number", None, &[("separator", ",")]),
    spec("ol", Some("ItemList"), &[("ordered", "true")]),
    spec("phone", Some("Link"), &[("scheme", "tel")]),
    spec("pretty", Some("CodeBlock"), &[]),
    spec("price", None, &[("decimals", "2")]),
    spec("rating", Some("Rating"), &[]),
    spec("rel", Some("RelatedItem"), &[]),
    spec("relative", None, &[]),
    spec("space", None, &[]),
    spec("table", Some("Table"), &[]),
    spec("tags", Some("TagList"), &[]),
    spec("text", None, &[]),
    spec("ul", Some("ItemList"), &[]),
    spec("upper", None, &[]),
    spec("word", None, &[("length", "100")]),
    spec("yesno", None, &[]),
];

const fn spec(
    method: &'static str,
    component: Option<&'static str>,
    defaults: &'static [(&'static str, &'static str)],
) -> ComponentSpec {
    ComponentSpec {
        method,
        component,
        defaults,
    }
}

///
/// BindingKind
/// Which of the three binding surfaces an attribute flag configures.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BindingKind {
    Field,
    List,
    View,
}

impl BindingKind {
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Field => "field",
            Self::List => "list",
            Self::View => "view",
        }
    }

    #[must_use]
    pub const fn catalog(self) -> &'static [ComponentSpec] {
        match self {
            Self::Field => FIELDS,
            Self::List | Self::View => FORMATS,
        }
    }
}

///
/// ComponentBinding
/// The resolved widget/format for one column surface.
///

#[derive(Clone, Debug, PartialEq)]
pub struct ComponentBinding {
    pub method: &'static str,
    pub component: Option<&'static str>,
    pub attributes: BTreeMap<String, AttrValue>,
}

impl ComponentBinding {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            method: "none",
            component: None,
            attributes: BTreeMap::new(),
        }
    }
}

/// Resolve a column's binding for one surface: the first catalog entry
/// whose `<prefix>.<method>` flag is present wins; catalog defaults are
/// overlaid with the flag's map value when the flag carries one.
#[must_use]
pub fn resolve_binding(kind: BindingKind, attributes: &Attributes) -> ComponentBinding {
    for entry in kind.catalog() {
        let key = format!("{}.{}", kind.prefix(), entry.method);
        let Some(flag) = attributes.get(&key) else {
            continue;
        };

        let mut merged: BTreeMap<String, AttrValue> = entry
            .defaults
            .iter()
            .map(|(name, value)| ((*name).to_string(), AttrValue::String((*value).to_string())))
            .collect();
        if let Some(overrides) = flag.as_map() {
            for (name, value) in overrides {
                merged.insert(name.clone(), value.clone());
            }
        }

        return ComponentBinding {
            method: entry.method,
            component: entry.component,
            attributes: merged,
        };
    }

    ComponentBinding::none()
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
    fn first_matching_flag_wins() {
        let attrs = attributes(json!({ "field.text": true, "field.textarea": true }));
        let binding = resolve_binding(BindingKind::Field, &attrs);

        assert_eq!(binding.method, "text");
        assert_eq!(binding.component, Some("Input"));
    }

    #[test]
    fn flag_map_overlays_catalog_defaults() {
        let attrs = attributes(json!({ "field.text": { "placeholder": "Email" } }));
        let binding = resolve_binding(BindingKind::Field, &attrs);

        assert_eq!(
            binding.attributes.get("type").and_then(AttrValue::as_str),
            Some("text")
        );
        assert_eq!(
            binding
                .attributes
                .get("placeholder")
                .and_then(AttrValue::as_str),
            Some("Email")
        );
    }

    #[test]
    fn bare_flags_keep_defaults_only() {
        let attrs = attributes(json!({ "list.date": true }));
        let binding = resolve_binding(BindingKind::List, &attrs);

        assert_eq!(binding.method, "date");
        assert_eq!(
            binding.attributes.get("format").and_then(AttrValue::as_str),
            Some("YYYY-MM-DD HH:mm:ss")
        );
    }

    #[test]
    fn unbound_surfaces_fall_back_to_none() {
        let attrs = attributes(json!({ "field.text": true }));
        let binding = resolve_binding(BindingKind::View, &attrs);

        assert_eq!(binding, ComponentBinding::none());
    }
}
