use super::ResourceId;
use crate::error::Error;
use crate::kind::IdKind;
use crate::parser::ParseResult;
use crate::segment::{Schema, RESOURCE_GROUP_LABEL, SUBSCRIPTION_ID_LABEL};
use once_cell::sync::Lazy;

pub(crate) const NAMESPACE: &str = "Microsoft.OperationalInsights";

static KIND: Lazy<IdKind> = Lazy::new(|| {
    Schema::builder()
        .resource_group_scope()
        .provider(NAMESPACE)
        .child("workspaces", "name")
        .build()
        .into()
});

#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_new::new)]
pub struct WorkspaceId {
    #[new(into)]
    pub subscription_id: String,
    #[new(into)]
    pub resource_group: String,
    #[new(into)]
    pub name: String,
}

impl ResourceId for WorkspaceId {
    const NAME: &'static str = "Log Analytics Workspace";

    fn kind() -> &'static IdKind {
        &KIND
    }

    fn from_parsed(mut parsed: ParseResult) -> Result<Self, Error> {
        Ok(Self {
            subscription_id: parsed.take(SUBSCRIPTION_ID_LABEL)?,
            resource_group: parsed.take(RESOURCE_GROUP_LABEL)?,
            name: parsed.take("name")?,
        })
    }

    fn segment_values(&self) -> Vec<&str> {
        vec![
            self.subscription_id.as_str(),
            self.resource_group.as_str(),
            self.name.as_str(),
        ]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::{Error, ParseError};
    use pretty_assertions::assert_eq;

    #[test]
    fn workspace() {
        let input = "/subscriptions/00000000-0000-0000-0000-000000000000/resourceGroups/resGroup1/providers/Microsoft.OperationalInsights/workspaces/space1";
        let id = WorkspaceId::parse(input).unwrap();
        assert_eq!(
            id,
            WorkspaceId::new("00000000-0000-0000-0000-000000000000", "resGroup1", "space1")
        );
        assert_eq!(id.id(), input);
    }

    #[test]
    fn api_casing() {
        let input = "/subscriptions/sub/resourcegroups/rg/providers/microsoft.operationalinsights/workspaces/space1";
        assert!(matches!(
            WorkspaceId::parse(input),
            Err(Error::Parse(ParseError::UnexpectedSegment { .. }))
        ));

        let id = WorkspaceId::parse_insensitively(input).unwrap();
        assert_eq!(
            id.to_string(),
            "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.OperationalInsights/workspaces/space1"
        );
    }
}
