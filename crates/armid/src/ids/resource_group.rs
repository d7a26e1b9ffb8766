use super::ResourceId;
use crate::error::Error;
use crate::kind::IdKind;
use crate::parser::ParseResult;
use crate::segment::{Schema, RESOURCE_GROUP_LABEL, SUBSCRIPTION_ID_LABEL};
use once_cell::sync::Lazy;

static KIND: Lazy<IdKind> = Lazy::new(|| Schema::builder().resource_group_scope().build().into());

#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_new::new)]
pub struct ResourceGroupId {
    #[new(into)]
    pub subscription_id: String,
    #[new(into)]
    pub resource_group: String,
}

impl ResourceId for ResourceGroupId {
    const NAME: &'static str = "Resource Group";

    fn kind() -> &'static IdKind {
        &KIND
    }

    fn from_parsed(mut parsed: ParseResult) -> Result<Self, Error> {
        Ok(Self {
            subscription_id: parsed.take(SUBSCRIPTION_ID_LABEL)?,
            resource_group: parsed.take(RESOURCE_GROUP_LABEL)?,
        })
    }

    fn segment_values(&self) -> Vec<&str> {
        vec![self.subscription_id.as_str(), self.resource_group.as_str()]
    }
}
