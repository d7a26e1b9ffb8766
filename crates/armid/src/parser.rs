//! strict, schema-driven parser
//!
//! Walks the `/`-separated tokens of an identifier in lock-step with a [Schema]. Literal
//! segments must match, value segments are captured verbatim.
//!
//! Checks run in a fixed order so the same input always yields the same error:
//! 1. empty input
//! 2. leading `/`
//! 3. zero-length tokens (doubled or trailing `/`)
//! 4. odd token count
//! 5. literal comparison
//! 6. token count against schema length
use crate::error::ParseError;
use crate::segment::Schema;
use indexmap::IndexMap;

/// How literal segments are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Casing {
    /// Byte-equal. Used for values a human typed into configuration.
    #[default]
    Sensitive,
    /// ASCII case-insensitive. Used for values returned by the remote API.
    Insensitive,
}

impl Casing {
    pub fn matches(self, expected: &str, found: &str) -> bool {
        match self {
            Casing::Sensitive => expected == found,
            Casing::Insensitive => expected.eq_ignore_ascii_case(found),
        }
    }
}

/// Values of a parsed identifier keyed by segment label, in schema order
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct ParseResult {
    values: IndexMap<String, String>,
}

impl ParseResult {
    pub fn get(&self, label: &str) -> Option<&str> {
        self.values.get(label).map(String::as_str)
    }

    /// Move a value out of the result
    pub fn take(&mut self, label: &str) -> Result<String, ParseError> {
        self.values
            .shift_remove(label)
            .ok_or_else(|| ParseError::EmptySegmentValue {
                label: label.to_string(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(label, value)| (label.as_str(), value.as_str()))
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.values.values().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn insert(&mut self, label: impl Into<String>, value: impl Into<String>) {
        let previous = self.values.insert(label.into(), value.into());
        debug_assert!(previous.is_none(), "labels are unique within a schema");
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParseResult {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(label, value)| (label.into(), value.into()))
                .collect(),
        }
    }
}

impl IntoIterator for ParseResult {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

pub fn parse(input: &str, schema: &Schema, casing: Casing) -> Result<ParseResult, ParseError> {
    if input.is_empty() || input == "/" {
        return Err(ParseError::EmptyInput);
    }

    let Some(path) = input.strip_prefix('/') else {
        return Err(ParseError::Malformed {
            reason: "ID must start with `/`",
        });
    };

    let tokens: Vec<&str> = path.split('/').collect();

    if let Some(position) = tokens.iter().position(|token| token.is_empty()) {
        return Err(ParseError::EmptySegmentValue {
            label: blank_label(schema, position).to_string(),
        });
    }

    if tokens.len() % 2 != 0 {
        return Err(ParseError::Malformed {
            reason: "ID has an odd number of segments",
        });
    }

    let mut result = ParseResult::default();
    for (segment, token) in schema.segments().iter().zip(&tokens) {
        match segment.match_value() {
            Some(expected) => {
                if !casing.matches(expected, token) {
                    return Err(ParseError::UnexpectedSegment {
                        expected: expected.to_string(),
                        found: token.to_string(),
                    });
                }
            }
            None => result.insert(segment.label(), *token),
        }
    }

    if tokens.len() != schema.len() {
        return Err(ParseError::SegmentCountMismatch {
            expected: schema.len(),
            found: tokens.len(),
        });
    }

    Ok(result)
}

/// Label of the value left empty by a blank token at `position`
///
/// A blank key leaves its value empty as well. Past the end of the schema the blank
/// belongs to the final value segment.
fn blank_label(schema: &Schema, position: usize) -> &str {
    let segments = schema.segments();
    segments
        .get(position | 1)
        .or_else(|| segments.iter().rev().find(|segment| !segment.is_literal()))
        .or(segments.last())
        .map(|segment| segment.label())
        .unwrap_or_default()
}

impl Schema {
    /// Parse user-authored input, see [parse]
    pub fn parse(&self, input: &str) -> Result<ParseResult, ParseError> {
        parse(input, self, Casing::Sensitive)
    }

    /// Parse input echoed back by the remote API, see [parse]
    pub fn parse_insensitively(&self, input: &str) -> Result<ParseResult, ParseError> {
        parse(input, self, Casing::Insensitive)
    }
}
