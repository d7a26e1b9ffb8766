//! sequential "pop the next named segment" extraction
//!
//! The older way of taking identifiers apart, kept for kinds whose full shape is not
//! statically known by every caller. There is no schema: the caller pops the values it
//! cares about by the literal that names them, then asserts nothing is left over.
//!
//! ```
//! # use armid::legacy::LegacyResourceId;
//! let input = "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.Automation/automationAccounts/acc1";
//! let mut id = LegacyResourceId::parse(input)?;
//! let account = id.pop_segment("automationAccounts")?;
//! id.validate_no_empty_segments()?;
//!
//! assert_eq!(account, "acc1");
//! assert_eq!(id.resource_group.as_deref(), Some("rg"));
//! # Ok::<(), armid::error::ExtractError>(())
//! ```
//!
//! Literal matching is always exact. Callers that need tolerant matching normalize both
//! sides themselves.
use crate::error::ExtractError;
use crate::parser::ParseResult;
use crate::segment::{
    Schema, SchemaError, PROVIDERS, RESOURCE_GROUPS, RESOURCE_GROUP_LABEL, SUBSCRIPTIONS,
    SUBSCRIPTION_ID_LABEL,
};

/// Working state of one sequential extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyResourceId {
    pub subscription_id: String,
    pub resource_group: Option<String>,
    /// namespace following the first `providers` key
    pub provider: Option<String>,
    remaining: Vec<String>,
    has_empty_segments: bool,
}

impl LegacyResourceId {
    /// Split `input` and pop the scope segments every identifier shares
    ///
    /// `subscriptions` is required, `resourceGroups` and `providers` are popped when present.
    pub fn parse(input: &str) -> Result<Self, ExtractError> {
        if input.is_empty() {
            return Err(ExtractError::EmptyInput);
        }

        let path = input.strip_prefix('/').unwrap_or(input);
        let remaining: Vec<String> = path.split('/').map(str::to_string).collect();
        let has_empty_segments = remaining.iter().any(String::is_empty);

        let mut id = Self {
            subscription_id: String::new(),
            resource_group: None,
            provider: None,
            remaining,
            has_empty_segments,
        };

        id.pop_scope().map_err(|err| id.blame_blank_segment(err))?;
        Ok(id)
    }

    fn pop_scope(&mut self) -> Result<(), ExtractError> {
        self.subscription_id = self.pop_segment(SUBSCRIPTIONS)?;
        self.resource_group = self.pop_optional_segment(RESOURCE_GROUPS)?;
        self.provider = self.pop_optional_segment(PROVIDERS)?;
        Ok(())
    }

    /// A blank segment shifts every following `key/value` pair, so literals behind it are
    /// not found. Report the blank instead.
    fn blame_blank_segment(&self, err: ExtractError) -> ExtractError {
        match err {
            ExtractError::NotFound { .. } | ExtractError::DanglingLiteral { .. }
                if self.has_empty_segments =>
            {
                ExtractError::EmptySegment
            }
            err => err,
        }
    }

    /// Remove the first `literal/value` pair named `literal` and return its value
    ///
    /// The pair does not have to be at the front, so callers may skip segments they do not
    /// care about. Only key positions are searched: a value that happens to equal `literal`
    /// is never mistaken for a key.
    pub fn pop_segment(&mut self, literal: &str) -> Result<String, ExtractError> {
        let position = self
            .remaining
            .iter()
            .step_by(2)
            .position(|token| token == literal)
            .map(|pair| pair * 2)
            .ok_or_else(|| ExtractError::NotFound {
                literal: literal.to_string(),
            })?;

        if position + 1 >= self.remaining.len() {
            return Err(ExtractError::DanglingLiteral {
                literal: literal.to_string(),
            });
        }

        let value = self.remaining.remove(position + 1);
        self.remaining.remove(position);
        Ok(value)
    }

    fn pop_optional_segment(&mut self, literal: &str) -> Result<Option<String>, ExtractError> {
        match self.pop_segment(literal) {
            Ok(value) => Ok(Some(value)),
            Err(ExtractError::NotFound { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Assert the identifier was fully consumed and never contained a zero-length segment
    pub fn validate_no_empty_segments(&self) -> Result<(), ExtractError> {
        if self.has_empty_segments {
            return Err(ExtractError::EmptySegment);
        }

        if !self.remaining.is_empty() {
            return Err(ExtractError::Unconsumed {
                remaining: self.remaining.join("/"),
            });
        }

        Ok(())
    }

    /// Assert the segments not popped so far form `key/value` pairs, none of them empty
    ///
    /// Used where any identifier will do and nothing is popped past the scope.
    pub fn validate_pairs(&self) -> Result<(), ExtractError> {
        if self.has_empty_segments {
            return Err(ExtractError::EmptySegment);
        }

        if self.remaining.len() % 2 != 0 {
            return Err(ExtractError::DanglingLiteral {
                literal: self.remaining.last().cloned().unwrap_or_default(),
            });
        }

        Ok(())
    }

    /// Segments not popped so far
    pub fn remaining(&self) -> &[String] {
        &self.remaining
    }
}

/// The literals a legacy identifier kind pops, in order
///
/// A sequence also knows the canonical shape of its kind (the resource group scope, the
/// provider namespace and one `literal/value` pair per pop) so it can be formatted. Parsing
/// ignores the namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopSequence {
    pops: Vec<(String, String)>,
    canonical: Schema,
}

impl PopSequence {
    /// # Panic
    /// Panics when the pops do not form a valid shape, see [Schema::new]
    pub fn new<L, V>(namespace: &str, pops: impl IntoIterator<Item = (L, V)>) -> Self
    where
        L: Into<String>,
        V: Into<String>,
    {
        match Self::try_new(namespace, pops) {
            Ok(sequence) => sequence,
            Err(err) => panic!("invalid built-in pop sequence: {err}"),
        }
    }

    /// `pops` are `(literal, label)` pairs
    pub fn try_new<L, V>(
        namespace: &str,
        pops: impl IntoIterator<Item = (L, V)>,
    ) -> Result<Self, SchemaError>
    where
        L: Into<String>,
        V: Into<String>,
    {
        let pops: Vec<(String, String)> = pops
            .into_iter()
            .map(|(literal, label)| (literal.into(), label.into()))
            .collect();

        let mut builder = Schema::builder().resource_group_scope().provider(namespace);
        for (literal, label) in &pops {
            builder = builder.child(literal, label);
        }

        Ok(Self {
            canonical: builder.try_build()?,
            pops,
        })
    }

    pub fn extract(&self, input: &str) -> Result<ParseResult, ExtractError> {
        let mut id = LegacyResourceId::parse(input)?;
        self.pop_all(&mut id)
            .map_err(|err| id.blame_blank_segment(err))
    }

    fn pop_all(&self, id: &mut LegacyResourceId) -> Result<ParseResult, ExtractError> {
        let resource_group = id
            .resource_group
            .take()
            .ok_or_else(|| ExtractError::NotFound {
                literal: RESOURCE_GROUPS.to_string(),
            })?;

        let mut result = ParseResult::default();
        result.insert(SUBSCRIPTION_ID_LABEL, std::mem::take(&mut id.subscription_id));
        result.insert(RESOURCE_GROUP_LABEL, resource_group);
        for (literal, label) in &self.pops {
            result.insert(label.as_str(), id.pop_segment(literal)?);
        }

        id.validate_no_empty_segments()?;
        Ok(result)
    }

    /// The shape identifiers of this kind are formatted as
    pub fn canonical(&self) -> &Schema {
        &self.canonical
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    const ACCOUNT: &str =
        "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.Automation/automationAccounts/acc1";

    fn automation_account() -> PopSequence {
        PopSequence::new("Microsoft.Automation", [("automationAccounts", "name")])
    }

    #[test]
    fn pops_scope_segments() {
        let id = LegacyResourceId::parse(ACCOUNT).unwrap();
        assert_eq!(id.subscription_id, "sub");
        assert_eq!(id.resource_group.as_deref(), Some("rg"));
        assert_eq!(id.provider.as_deref(), Some("Microsoft.Automation"));
        assert_eq!(id.remaining(), ["automationAccounts", "acc1"]);
    }

    #[test]
    fn missing_literal() {
        let input = ACCOUNT.replace("automationAccounts", "notAnAutomationAccount");
        let mut id = LegacyResourceId::parse(&input).unwrap();
        assert_eq!(
            id.pop_segment("automationAccounts"),
            Err(ExtractError::NotFound {
                literal: "automationAccounts".to_string()
            })
        );
    }

    #[test]
    fn literal_match_is_exact() {
        let input = ACCOUNT.replace("automationAccounts", "AutomationAccounts");
        assert_eq!(
            automation_account().extract(&input),
            Err(ExtractError::NotFound {
                literal: "automationAccounts".to_string()
            })
        );
    }

    #[test]
    fn dangling_literal() {
        let mut id = LegacyResourceId::parse("/subscriptions/sub/resourceGroups/rg/images").unwrap();
        assert_eq!(
            id.pop_segment("images"),
            Err(ExtractError::DanglingLiteral {
                literal: "images".to_string()
            })
        );
    }

    #[test]
    fn skipped_segments_are_tolerated() {
        let input = "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.Compute/galleries/g1/images/img1";
        let mut id = LegacyResourceId::parse(input).unwrap();

        assert_eq!(id.pop_segment("images").unwrap(), "img1");
        assert_eq!(
            id.validate_no_empty_segments(),
            Err(ExtractError::Unconsumed {
                remaining: "galleries/g1".to_string()
            })
        );

        assert_eq!(id.pop_segment("galleries").unwrap(), "g1");
        assert_eq!(id.validate_no_empty_segments(), Ok(()));
    }

    #[test]
    fn values_are_not_keys() {
        let input = "/subscriptions/sub/resourceGroups/images/providers/Microsoft.Compute/images/img1";
        let mut id = LegacyResourceId::parse(input).unwrap();
        assert_eq!(id.resource_group.as_deref(), Some("images"));
        assert_eq!(id.pop_segment("images").unwrap(), "img1");
    }

    #[test]
    fn trailing_slash() {
        let input = format!("{ACCOUNT}/");
        assert_eq!(
            automation_account().extract(&input),
            Err(ExtractError::EmptySegment)
        );

        let input = ACCOUNT.strip_suffix("acc1").unwrap();
        assert_eq!(
            automation_account().extract(input),
            Err(ExtractError::EmptySegment)
        );
    }

    #[test]
    fn doubled_slash() {
        for doubled in ["//resourceGroups/", "//providers/", "//automationAccounts/"] {
            let input = ACCOUNT.replacen(&doubled[1..], doubled, 1);
            assert_eq!(
                automation_account().extract(&input),
                Err(ExtractError::EmptySegment),
                "{input}"
            );
        }

        assert_eq!(
            LegacyResourceId::parse("//subscriptions/sub"),
            Err(ExtractError::EmptySegment)
        );
    }

    #[test]
    fn any_pairs_are_accepted() {
        let id = LegacyResourceId::parse(
            "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.Network/virtualNetworks/net/subnets/s1",
        )
        .unwrap();
        assert_eq!(id.validate_pairs(), Ok(()));

        let id = LegacyResourceId::parse(
            "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.Network/virtualNetworks",
        )
        .unwrap();
        assert_eq!(
            id.validate_pairs(),
            Err(ExtractError::DanglingLiteral {
                literal: "virtualNetworks".to_string()
            })
        );

        let id = LegacyResourceId::parse("/subscriptions/sub/resourceGroups/rg/").unwrap();
        assert_eq!(id.validate_pairs(), Err(ExtractError::EmptySegment));
    }

    #[test]
    fn subscription_is_required() {
        assert_eq!(
            LegacyResourceId::parse("/resourceGroups/rg"),
            Err(ExtractError::NotFound {
                literal: "subscriptions".to_string()
            })
        );
        assert_eq!(LegacyResourceId::parse(""), Err(ExtractError::EmptyInput));
    }

    #[test]
    fn extract_labels_values() {
        let result = automation_account().extract(ACCOUNT).unwrap();
        assert_eq!(
            result.iter().collect::<Vec<_>>(),
            [
                ("subscriptionId", "sub"),
                ("resourceGroupName", "rg"),
                ("name", "acc1")
            ]
        );
        assert_eq!(result.to_id(automation_account().canonical()), ACCOUNT);
    }

    #[test]
    fn resource_group_is_required_for_sequences() {
        let input = "/subscriptions/sub/providers/Microsoft.Automation/automationAccounts/acc1";
        assert_eq!(
            automation_account().extract(input),
            Err(ExtractError::NotFound {
                literal: "resourceGroups".to_string()
            })
        );
    }
}
