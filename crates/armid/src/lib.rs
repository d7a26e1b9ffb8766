//! # armid - cloud resource identifiers
//!
//! Parse, validate and canonically format hierarchical resource identifiers such as
//!
//! ```text
//! /subscriptions/{sub}/resourceGroups/{rg}/providers/{Namespace}/{type}/{name}/.../{childType}/{childName}
//! ```
//!
//! ## Introduction for developers
//!
//! Read this to understand how `armid` works internally.
//!
//! ### Terms
//!
//! - a `segment` is one `/`-separated position of an identifier
//! - segments come in `key/value` pairs: `resourceGroups/my-group`
//! - a `literal` segment has fixed text (`resourceGroups`, `Microsoft.Compute`)
//! - a `value` segment varies per identifier (`my-group`) and has a `label` (`resourceGroupName`)
//!
//! ### Schemas
//!
//! see [segment::Schema]
//!
//! A schema is the ordered list of segments of one identifier shape. Schemas are data,
//! built once at startup. An invalid built-in schema is a bug and panics; schemas from
//! user files are checked and rejected with [segment::SchemaError].
//!
//! ### Two ways to take an identifier apart
//!
//! [kind::IdKind] is either of:
//!
//! - [parser::parse]: strict. Walks the tokens in lock-step with a schema. Literals must
//!   match, exactly for user input ([parser::Casing::Sensitive]) or ignoring ASCII case for
//!   values the remote API returned ([parser::Casing::Insensitive]).
//! - [legacy::PopSequence]: sequential. Pops `literal/value` pairs by name from a working
//!   copy of the path and finally asserts nothing is left. Tolerates skipped segments and
//!   always matches exactly.
//!
//! Both produce a [parser::ParseResult]: label -> value, in schema order.
//!
//! ### Formatting
//!
//! [format::format] walks a schema and writes literals with their canonical casing. For any
//! valid values `parse(format(values)) == values`.
//!
//! ### Typed identifiers
//!
//! [ids::ResourceId] types ([ids::WorkspaceId], [ids::AlertRuleId], ...) copy their fields
//! out of a parse result. They are read-only records.
//!
//! ### Validation
//!
//! [validate] holds the adapters the configuration layer calls: `is_valid_id`,
//! `validate_id` and `parse_or_error`. [registry::Registry] is an explicit value that binds
//! attribute names to kinds; [check::check] uses it to validate terraform files loaded
//! into [hcl_documents::HclDocuments].
//!
//! ### Errors and logging
//!
//! The engine ([parser], [format], [legacy]) never logs and never panics on input. Every
//! failure is returned as [error::ParseError] or [error::ExtractError] and phrased for the
//! user by the caller.
//!
pub mod check;
pub mod error;
pub mod format;
pub mod hcl_documents;
pub mod ids;
pub mod kind;
pub mod legacy;
pub mod parser;
pub mod registry;
pub mod segment;
pub mod validate;
mod visit;
