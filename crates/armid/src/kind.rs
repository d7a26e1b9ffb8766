//! one identifier kind, parsed by either strategy
use crate::error::Error;
use crate::format;
use crate::legacy::PopSequence;
use crate::parser::{self, Casing, ParseResult};
use crate::segment::Schema;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdKind {
    /// Strict matching against a full schema. Used by every new kind.
    Schema(Schema),
    /// Sequential pops by literal name. Kept for kinds whose full shape is not known to all
    /// callers.
    Sequential(PopSequence),
}

impl IdKind {
    /// Parse `input` into labelled values
    ///
    /// Sequential kinds always match their literals exactly and ignore `casing`.
    pub fn parse(&self, input: &str, casing: Casing) -> Result<ParseResult, Error> {
        match self {
            IdKind::Schema(schema) => Ok(parser::parse(input, schema, casing)?),
            IdKind::Sequential(sequence) => Ok(sequence.extract(input)?),
        }
    }

    /// The schema identifiers of this kind are formatted with
    pub fn canonical(&self) -> &Schema {
        match self {
            IdKind::Schema(schema) => schema,
            IdKind::Sequential(sequence) => sequence.canonical(),
        }
    }

    /// see [format::format]
    pub fn format(&self, values: &[&str]) -> String {
        format::format(self.canonical(), values)
    }

    pub fn value_labels(&self) -> Vec<&str> {
        self.canonical().value_labels().collect()
    }

    pub fn shape(&self) -> String {
        self.canonical().shape()
    }

    pub fn example(&self) -> String {
        self.canonical().example()
    }

    pub fn strategy(&self) -> &'static str {
        match self {
            IdKind::Schema(_) => "schema",
            IdKind::Sequential(_) => "sequential",
        }
    }
}

impl From<Schema> for IdKind {
    fn from(value: Schema) -> Self {
        IdKind::Schema(value)
    }
}

impl From<PopSequence> for IdKind {
    fn from(value: PopSequence) -> Self {
        IdKind::Sequential(value)
    }
}
