//! Sentinel resources, nested below a Log Analytics workspace
//!
//! ```text
//! /subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}
//!   /providers/Microsoft.OperationalInsights/workspaces/{workspaceName}
//!   /providers/Microsoft.SecurityInsights/alertRules/{name}
//! ```
use super::{ResourceId, WorkspaceId};
use crate::error::Error;
use crate::kind::IdKind;
use crate::parser::ParseResult;
use crate::segment::{Schema, SchemaBuilder, RESOURCE_GROUP_LABEL, SUBSCRIPTION_ID_LABEL};
use once_cell::sync::Lazy;

const NAMESPACE: &str = "Microsoft.SecurityInsights";
const WORKSPACE_LABEL: &str = "workspaceName";
const ALERT_RULE_LABEL: &str = "alertRuleName";

fn workspace_scope() -> SchemaBuilder {
    Schema::builder()
        .resource_group_scope()
        .provider(super::log_analytics::NAMESPACE)
        .child("workspaces", WORKSPACE_LABEL)
        .provider(NAMESPACE)
}

static ALERT_RULE: Lazy<IdKind> = Lazy::new(|| {
    workspace_scope()
        .child("alertRules", "name")
        .build()
        .into()
});

static ALERT_RULE_ACTION: Lazy<IdKind> = Lazy::new(|| {
    workspace_scope()
        .child("alertRules", ALERT_RULE_LABEL)
        .child("actions", "name")
        .build()
        .into()
});

static DATA_CONNECTOR: Lazy<IdKind> = Lazy::new(|| {
    workspace_scope()
        .child("dataConnectors", "name")
        .build()
        .into()
});

#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_new::new)]
pub struct AlertRuleId {
    #[new(into)]
    pub subscription_id: String,
    #[new(into)]
    pub resource_group: String,
    #[new(into)]
    pub workspace_name: String,
    #[new(into)]
    pub name: String,
}

impl AlertRuleId {
    pub fn workspace_id(&self) -> WorkspaceId {
        WorkspaceId::new(
            &self.subscription_id,
            &self.resource_group,
            &self.workspace_name,
        )
    }
}

impl ResourceId for AlertRuleId {
    const NAME: &'static str = "Sentinel Alert Rule";

    fn kind() -> &'static IdKind {
        &ALERT_RULE
    }

    fn from_parsed(mut parsed: ParseResult) -> Result<Self, Error> {
        Ok(Self {
            subscription_id: parsed.take(SUBSCRIPTION_ID_LABEL)?,
            resource_group: parsed.take(RESOURCE_GROUP_LABEL)?,
            workspace_name: parsed.take(WORKSPACE_LABEL)?,
            name: parsed.take("name")?,
        })
    }

    fn segment_values(&self) -> Vec<&str> {
        vec![
            self.subscription_id.as_str(),
            self.resource_group.as_str(),
            self.workspace_name.as_str(),
            self.name.as_str(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_new::new)]
pub struct AlertRuleActionId {
    #[new(into)]
    pub subscription_id: String,
    #[new(into)]
    pub resource_group: String,
    #[new(into)]
    pub workspace_name: String,
    #[new(into)]
    pub alert_rule_name: String,
    #[new(into)]
    pub name: String,
}

impl AlertRuleActionId {
    pub fn alert_rule_id(&self) -> AlertRuleId {
        AlertRuleId::new(
            &self.subscription_id,
            &self.resource_group,
            &self.workspace_name,
            &self.alert_rule_name,
        )
    }
}

impl ResourceId for AlertRuleActionId {
    const NAME: &'static str = "Sentinel Alert Rule Action";

    fn kind() -> &'static IdKind {
        &ALERT_RULE_ACTION
    }

    fn from_parsed(mut parsed: ParseResult) -> Result<Self, Error> {
        Ok(Self {
            subscription_id: parsed.take(SUBSCRIPTION_ID_LABEL)?,
            resource_group: parsed.take(RESOURCE_GROUP_LABEL)?,
            workspace_name: parsed.take(WORKSPACE_LABEL)?,
            alert_rule_name: parsed.take(ALERT_RULE_LABEL)?,
            name: parsed.take("name")?,
        })
    }

    fn segment_values(&self) -> Vec<&str> {
        vec![
            self.subscription_id.as_str(),
            self.resource_group.as_str(),
            self.workspace_name.as_str(),
            self.alert_rule_name.as_str(),
            self.name.as_str(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_new::new)]
pub struct DataConnectorId {
    #[new(into)]
    pub subscription_id: String,
    #[new(into)]
    pub resource_group: String,
    #[new(into)]
    pub workspace_name: String,
    #[new(into)]
    pub name: String,
}

impl DataConnectorId {
    pub fn workspace_id(&self) -> WorkspaceId {
        WorkspaceId::new(
            &self.subscription_id,
            &self.resource_group,
            &self.workspace_name,
        )
    }
}

impl ResourceId for DataConnectorId {
    const NAME: &'static str = "Sentinel Data Connector";

    fn kind() -> &'static IdKind {
        &DATA_CONNECTOR
    }

    fn from_parsed(mut parsed: ParseResult) -> Result<Self, Error> {
        Ok(Self {
            subscription_id: parsed.take(SUBSCRIPTION_ID_LABEL)?,
            resource_group: parsed.take(RESOURCE_GROUP_LABEL)?,
            workspace_name: parsed.take(WORKSPACE_LABEL)?,
            name: parsed.take("name")?,
        })
    }

    fn segment_values(&self) -> Vec<&str> {
        vec![
            self.subscription_id.as_str(),
            self.resource_group.as_str(),
            self.workspace_name.as_str(),
            self.name.as_str(),
        ]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::{Error, ParseError};
    use pretty_assertions::assert_eq;

    const ALERT_RULE_INPUT: &str = "/subscriptions/00000000-0000-0000-0000-000000000000/resourceGroups/resGroup1/providers/Microsoft.OperationalInsights/workspaces/space1/providers/Microsoft.SecurityInsights/alertRules/rule1";

    #[test]
    fn alert_rule() {
        let id = AlertRuleId::parse(ALERT_RULE_INPUT).unwrap();
        assert_eq!(
            id,
            AlertRuleId::new(
                "00000000-0000-0000-0000-000000000000",
                "resGroup1",
                "space1",
                "rule1"
            )
        );
        assert_eq!(
            id.workspace_id().to_string(),
            "/subscriptions/00000000-0000-0000-0000-000000000000/resourceGroups/resGroup1/providers/Microsoft.OperationalInsights/workspaces/space1"
        );
    }

    #[test]
    fn alert_rule_wrong_casing() {
        let input = ALERT_RULE_INPUT.replace("/alertRules/", "/AlertRules/");
        assert_eq!(
            AlertRuleId::parse(&input),
            Err(Error::Parse(ParseError::UnexpectedSegment {
                expected: "alertRules".to_string(),
                found: "AlertRules".to_string()
            }))
        );
    }

    #[test]
    fn alert_rule_trailing_slash() {
        let input = ALERT_RULE_INPUT.strip_suffix("rule1").unwrap();
        assert_eq!(
            AlertRuleId::parse(input),
            Err(Error::Parse(ParseError::EmptySegmentValue {
                label: "name".to_string()
            }))
        );
    }

    #[test]
    fn alert_rule_action() {
        let id = AlertRuleActionId::new(
            "12345678-1234-9876-4563-123456789012",
            "resGroup1",
            "space1",
            "rule1",
            "action1",
        );
        assert_eq!(
            id.to_string(),
            "/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/resGroup1/providers/Microsoft.OperationalInsights/workspaces/space1/providers/Microsoft.SecurityInsights/alertRules/rule1/actions/action1"
        );
        assert_eq!(id.alert_rule_id().name, "rule1");
        assert_eq!(AlertRuleActionId::parse(&id.id()).unwrap(), id);
    }

    #[test]
    fn action_is_not_an_alert_rule() {
        let action = AlertRuleActionId::new("sub", "rg", "space1", "rule1", "action1");
        assert_eq!(
            AlertRuleId::parse(&action.id()),
            Err(Error::Parse(ParseError::SegmentCountMismatch {
                expected: 12,
                found: 14
            }))
        );
    }

    #[test]
    fn data_connector() {
        let input = "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.OperationalInsights/workspaces/space1/providers/Microsoft.SecurityInsights/dataConnectors/dc1";
        let id = DataConnectorId::parse(input).unwrap();
        assert_eq!(id.name, "dc1");
        assert_eq!(id.workspace_id().name, "space1");
        assert_eq!(id.id(), input);

        assert!(AlertRuleId::parse(input).is_err());
    }
}
