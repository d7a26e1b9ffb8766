use super::ResourceId;
use crate::error::Error;
use crate::kind::IdKind;
use crate::parser::ParseResult;
use crate::segment::{Schema, RESOURCE_GROUP_LABEL, SUBSCRIPTION_ID_LABEL};
use once_cell::sync::Lazy;

static KIND: Lazy<IdKind> = Lazy::new(|| {
    Schema::builder()
        .resource_group_scope()
        .provider("Microsoft.Compute")
        .child("images", "name")
        .build()
        .into()
});

/// Managed image, e.g. the source of a virtual machine or an image builder output
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_new::new)]
pub struct ImageId {
    #[new(into)]
    pub subscription_id: String,
    #[new(into)]
    pub resource_group: String,
    #[new(into)]
    pub name: String,
}

impl ResourceId for ImageId {
    const NAME: &'static str = "Image";

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
    use pretty_assertions::assert_eq;

    #[test]
    fn image() {
        let id = ImageId::new("sub", "rg", "img1");
        assert_eq!(
            id.id(),
            "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.Compute/images/img1"
        );
        assert_eq!(ImageId::parse(&id.id()).unwrap(), id);
    }

    #[test]
    fn gallery_image_is_not_a_managed_image() {
        let input = "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.Compute/galleries/g1/images/img1";
        assert!(ImageId::parse(input).is_err());
    }
}
