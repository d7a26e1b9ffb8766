use super::ResourceId;
use crate::error::Error;
use crate::kind::IdKind;
use crate::legacy::PopSequence;
use crate::parser::ParseResult;
use crate::segment::{RESOURCE_GROUP_LABEL, SUBSCRIPTION_ID_LABEL};
use once_cell::sync::Lazy;

// callers hand in ids with and without the provider segment
static KIND: Lazy<IdKind> = Lazy::new(|| {
    PopSequence::new("Microsoft.Automation", [("automationAccounts", "name")]).into()
});

#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_new::new)]
pub struct AutomationAccountId {
    #[new(into)]
    pub subscription_id: String,
    #[new(into)]
    pub resource_group: String,
    #[new(into)]
    pub name: String,
}

impl ResourceId for AutomationAccountId {
    const NAME: &'static str = "Automation Account";

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
