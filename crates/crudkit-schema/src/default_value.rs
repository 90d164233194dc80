use crate::prelude::*;

///
/// DefaultValue
///
/// A column's declared default, with generator calls recognized up
/// front so no consumer has to pattern-match raw strings.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum DefaultValue {
    /// A plain literal stored as declared.
    Literal(AttrValue),
    /// A client-side id factory invoked per insert.
    GeneratedId(IdKind),
    /// A raw expression the database evaluates, eg. `now()`.
    Expression(String),
}

///
/// IdKind
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum IdKind {
    Cuid,
    Nanoid { length: Option<u32> },
}

impl DefaultValue {
    /// Classify a declared default. Only the fixed generator-call
    /// spellings are special; everything else is a literal.
    #[must_use]
    pub fn parse(value: &AttrValue) -> Self {
        let Some(text) = value.as_str() else {
            return Self::Literal(value.clone());
        };

        match text {
            "now()" => Self::Expression(text.to_string()),
            "cuid()" => Self::GeneratedId(IdKind::Cuid),
            "nanoid()" => Self::GeneratedId(IdKind::Nanoid { length: None }),
            _ => nanoid_length(text).map_or_else(
                || Self::Literal(value.clone()),
                |length| {
                    Self::GeneratedId(IdKind::Nanoid {
                        length: Some(length),
                    })
                },
            ),
        }
    }
}

// Match the `nanoid(N)` spelling where N is one or more digits.
fn nanoid_length(text: &str) -> Option<u32> {
    let digits = text.strip_prefix("nanoid(")?.strip_suffix(')')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

///
/// TESTS
///
