//! typed identifiers
//!
//! Each type copies its fields out of a [ParseResult] and formats itself through the
//! canonical schema of its [IdKind]. Values are never mutated after construction.
use crate::error::Error;
use crate::kind::IdKind;
use crate::parser::{Casing, ParseResult};

mod automation;
mod compute;
mod log_analytics;
mod resource_group;
mod sentinel;

pub use automation::AutomationAccountId;
pub use compute::ImageId;
pub use log_analytics::WorkspaceId;
pub use resource_group::ResourceGroupId;
pub use sentinel::{AlertRuleActionId, AlertRuleId, DataConnectorId};

pub trait ResourceId: Sized {
    /// Human readable name, e.g. `Log Analytics Workspace`
    const NAME: &'static str;

    fn kind() -> &'static IdKind;

    /// Build from a result parsed with [Self::kind]
    ///
    /// Fails when a label of the kind is missing, e.g. for a result of another kind.
    fn from_parsed(parsed: ParseResult) -> Result<Self, Error>;

    /// Values in the order of the kind's value segments
    fn segment_values(&self) -> Vec<&str>;

    /// Canonical form
    fn id(&self) -> String {
        Self::kind().format(&self.segment_values())
    }

    /// Parse user-authored input
    fn parse(input: &str) -> Result<Self, Error> {
        Self::kind()
            .parse(input, Casing::Sensitive)
            .and_then(Self::from_parsed)
    }

    /// Parse input echoed back by the remote API
    fn parse_insensitively(input: &str) -> Result<Self, Error> {
        Self::kind()
            .parse(input, Casing::Insensitive)
            .and_then(Self::from_parsed)
    }
}

/// `Display` as the canonical id and `FromStr` as a case-sensitive parse
macro_rules! impl_id_traits {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(&$crate::ids::ResourceId::id(self))
                }
            }

            impl std::str::FromStr for $ty {
                type Err = $crate::error::Error;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    <Self as $crate::ids::ResourceId>::parse(s)
                }
            }
        )+
    };
}

impl_id_traits!(
    AutomationAccountId,
    ImageId,
    WorkspaceId,
    ResourceGroupId,
    AlertRuleId,
    AlertRuleActionId,
    DataConnectorId,
);
