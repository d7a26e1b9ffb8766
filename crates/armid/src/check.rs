//! configuration checker
//!
//! Walks every attribute of every document and validates those the [Registry] binds to an
//! identifier kind. Only literal strings are checked: references and interpolations are
//! not known until plan time and are skipped.
use crate::error::Diagnostic;
use crate::hcl_documents::{HclDocuments, Source};
use crate::registry::Registry;
use crate::validate::Validator;
use crate::visit::VisitAttributes;
use hcl_edit::expr::Expression;
use hcl_edit::structure::Attribute;
use std::fmt::{Display, Formatter};

/// An invalid identifier found in configuration
#[derive(Debug, Clone, PartialEq, Eq, derive_new::new)]
pub struct Finding {
    pub source: Source,
    /// block path, e.g. `resource.azurerm_sentinel_alert_rule_action.example`
    pub scope: String,
    pub kind: String,
    pub diagnostic: Diagnostic,
}

impl Display for Finding {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.source {
            Some(path) => write!(f, "{}: ", path.display())?,
            None => f.write_str("<stdin>: ")?,
        }
        if !self.scope.is_empty() {
            write!(f, "{}: ", self.scope)?;
        }
        write!(f, "{} ({})", self.diagnostic, self.kind)
    }
}

pub fn check(documents: &HclDocuments, registry: &Registry) -> Vec<Finding> {
    let validator = Validator::new(registry);
    let mut findings = vec![];

    for (source, body) in documents.documents() {
        let mut visitor = |scope: &[String], attribute: &Attribute| {
            let key = attribute.key.value().as_str();
            let Some((kind, _)) = registry.kind_for_attribute(key) else {
                return;
            };

            let Expression::String(value) = &attribute.value else {
                tracing::trace!(attribute = key, "not a literal string, skipped");
                return;
            };

            tracing::debug!(attribute = key, kind, "checking");
            if let Some(Err(diagnostic)) = validator.validate_attribute(key, value.value()) {
                findings.push(Finding::new(
                    source.clone(),
                    scope.join("."),
                    kind.to_string(),
                    diagnostic,
                ));
            }
        };

        body.visit_attributes(&mut visitor);
    }

    tracing::info!(findings = findings.len(), "check done");
    findings
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::hcl_documents;
    use pretty_assertions::assert_eq;

    #[test]
    fn finds_invalid_literals_only() {
        let documents = hcl_documents! {
            "main.tf" => r#"
            resource "azurerm_sentinel_alert_rule_action" "ok" {
              alert_rule_id = "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.OperationalInsights/workspaces/ws/providers/Microsoft.SecurityInsights/alertRules/rule1"
            }

            resource "azurerm_sentinel_alert_rule_action" "bad" {
              alert_rule_id = "/subscriptions/sub/resourceGroups/rg"
              name          = "/not/an/id/at/all"
            }

            resource "azurerm_sentinel_alert_rule_action" "reference" {
              alert_rule_id = azurerm_sentinel_alert_rule.example.id
            }

            resource "azurerm_sentinel_alert_rule_action" "interpolated" {
              alert_rule_id = "${var.prefix}/alertRules/rule1"
            }
            "#
        };

        let findings = check(&documents, &Registry::builtin());
        assert_eq!(findings.len(), 1);

        let finding = &findings[0];
        assert_eq!(
            finding.scope,
            "resource.azurerm_sentinel_alert_rule_action.bad"
        );
        assert_eq!(finding.kind, "sentinel_alert_rule");
        assert_eq!(finding.diagnostic.attribute, "alert_rule_id");
        assert_eq!(
            finding.diagnostic.message,
            "expected 12 segments but found 4"
        );
    }

    #[test]
    fn display() {
        let finding = Finding::new(
            None,
            String::new(),
            "compute_image".to_string(),
            Diagnostic::new(
                "source_image_id".to_string(),
                "ID was empty".to_string(),
                "/x".to_string(),
            ),
        );

        assert_eq!(
            finding.to_string(),
            "<stdin>: `source_image_id` is not a valid ID: ID was empty, expected /x (compute_image)"
        );
    }
}
