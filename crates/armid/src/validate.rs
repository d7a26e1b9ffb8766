//! validation entry points for the configuration layer
//!
//! Thin adapters over the parsers. They never touch the value they check; they only
//! report pass/fail and phrase the failure for the user.
use crate::error::{Diagnostic, IdError};
use crate::ids::ResourceId;
use crate::kind::IdKind;
use crate::legacy::LegacyResourceId;
use crate::parser::Casing;
use crate::registry::Registry;

/// Shape reported when any identifier will do
pub const ANY_RESOURCE_ID: &str = "/subscriptions/{subscriptionId}/{key}/{value}/...";

/// Whether `input` is a valid identifier of `kind`, matched case-sensitively
pub fn is_valid_id(input: &str, kind: &IdKind) -> bool {
    kind.parse(input, Casing::Sensitive).is_ok()
}

/// Validate the value of a configuration attribute
pub fn validate_id(attribute: &str, input: &str, kind: &IdKind) -> Result<(), Diagnostic> {
    kind.parse(input, Casing::Sensitive)
        .map(drop)
        .map_err(|err| Diagnostic::new(attribute.to_string(), err.to_string(), kind.shape()))
}

/// Whether `input` is a well-formed identifier of any kind
///
/// A `subscriptions` segment followed by `key/value` pairs, none of them empty.
pub fn is_valid_resource_id(input: &str) -> bool {
    validate_resource_id("id", input).is_ok()
}

/// Like [is_valid_resource_id], but an empty value is valid too
pub fn is_valid_resource_id_or_empty(input: &str) -> bool {
    validate_resource_id_or_empty("id", input).is_ok()
}

/// Validate an attribute that takes an identifier of any kind
pub fn validate_resource_id(attribute: &str, input: &str) -> Result<(), Diagnostic> {
    LegacyResourceId::parse(input)
        .and_then(|id| id.validate_pairs())
        .map_err(|err| {
            Diagnostic::new(
                attribute.to_string(),
                err.to_string(),
                ANY_RESOURCE_ID.to_string(),
            )
        })
}

/// Validate an optional attribute that takes an identifier of any kind
pub fn validate_resource_id_or_empty(attribute: &str, input: &str) -> Result<(), Diagnostic> {
    if input.is_empty() {
        return Ok(());
    }

    validate_resource_id(attribute, input)
}

/// Parse a stored identifier before it is used, failing with the field and input attached
pub fn parse_or_error<T: ResourceId>(field: &str, input: &str) -> Result<T, IdError> {
    T::parse(input).map_err(|source| IdError {
        field: field.to_string(),
        kind: T::NAME,
        input: input.to_string(),
        source,
    })
}

/// Validates attributes by the kind the [Registry] binds them to
#[derive(derive_new::new)]
pub struct Validator<'r> {
    registry: &'r Registry,
}

impl<'r> Validator<'r> {
    /// `None` when no kind is bound to `attribute`
    pub fn validate_attribute(
        &self,
        attribute: &str,
        input: &str,
    ) -> Option<Result<(), Diagnostic>> {
        self.registry
            .kind_for_attribute(attribute)
            .map(|(_, kind)| validate_id(attribute, input, kind))
    }

    /// Validate `input` against the kind named `kind`
    pub fn validate_kind(
        &self,
        kind: &str,
        attribute: &str,
        input: &str,
    ) -> Result<(), Diagnostic> {
        let Some(id_kind) = self.registry.get(kind) else {
            return Err(Diagnostic::new(
                attribute.to_string(),
                format!("unknown identifier kind `{kind}`"),
                String::from("a registered kind"),
            ));
        };

        validate_id(attribute, input, id_kind)
    }
}
