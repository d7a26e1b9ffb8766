//! path schema: an ordered list of [Segment] descriptors
//!
//! A [Schema] describes exactly one identifier shape. Segments pair up as `key/value`:
//! every even position holds a [SegmentKind::Static] key and the following odd position
//! holds the value that key names.
//!
//! ```text
//! /subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Compute/images/{name}
//!  ^ key         ^ value          ^ key          ^ value             ^ key     ^ value           ^ key  ^ value
//! ```
//!
//! Built-in schemas are compiled-in data: [Schema::new] and [SchemaBuilder::build] panic
//! when the shape is invalid. Schemas read from user files go through [Schema::try_new]
//! or [Schema::from_template].
use std::borrow::Cow;
use std::fmt::{Display, Formatter};

pub const SUBSCRIPTIONS: &str = "subscriptions";
pub const RESOURCE_GROUPS: &str = "resourceGroups";
pub const PROVIDERS: &str = "providers";

pub const SUBSCRIPTION_ID_LABEL: &str = "subscriptionId";
pub const RESOURCE_GROUP_LABEL: &str = "resourceGroupName";

const EXAMPLE_SUBSCRIPTION_ID: &str = "12345678-1234-9876-4563-123456789012";
const EXAMPLE_RESOURCE_GROUP: &str = "example-resource-group";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// fixed text, e.g. `resourceGroups`
    Static,
    SubscriptionId,
    ResourceGroup,
    /// fixed provider namespace, e.g. `Microsoft.OperationalInsights`
    ResourceProvider,
    UserSpecified,
}

impl SegmentKind {
    /// Literal segments carry a match value and never show up in a parse result
    pub fn is_literal(self) -> bool {
        matches!(self, SegmentKind::Static | SegmentKind::ResourceProvider)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    kind: SegmentKind,
    label: String,
    match_value: Option<String>,
}

impl Segment {
    pub fn literal(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: SegmentKind::Static,
            label: label.into(),
            match_value: Some(text.into()),
        }
    }

    pub fn subscription_id(label: impl Into<String>) -> Self {
        Self::value(SegmentKind::SubscriptionId, label)
    }

    pub fn resource_group(label: impl Into<String>) -> Self {
        Self::value(SegmentKind::ResourceGroup, label)
    }

    pub fn resource_provider(label: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            kind: SegmentKind::ResourceProvider,
            label: label.into(),
            match_value: Some(namespace.into()),
        }
    }

    pub fn user_specified(label: impl Into<String>) -> Self {
        Self::value(SegmentKind::UserSpecified, label)
    }

    fn value(kind: SegmentKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            match_value: None,
        }
    }

    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The text a literal segment must match; `None` for value segments
    pub fn match_value(&self) -> Option<&str> {
        self.match_value.as_deref()
    }

    pub fn is_literal(&self) -> bool {
        self.kind.is_literal()
    }

    /// A plausible value for documentation and diagnostics
    pub fn example_value(&self) -> Cow<'_, str> {
        match (self.kind, &self.match_value) {
            (_, Some(text)) => Cow::Borrowed(text),
            (SegmentKind::SubscriptionId, None) => Cow::Borrowed(EXAMPLE_SUBSCRIPTION_ID),
            (SegmentKind::ResourceGroup, None) => Cow::Borrowed(EXAMPLE_RESOURCE_GROUP),
            (_, None) => Cow::Owned(format!("{}Value", self.label)),
        }
    }

    /// How the segment is shown in a shape string: literals verbatim, values as `{label}`
    fn placeholder(&self) -> Cow<'_, str> {
        match &self.match_value {
            Some(text) => Cow::Borrowed(text),
            None => Cow::Owned(format!("{{{}}}", self.label)),
        }
    }
}

/// Label for a static segment, e.g. `alertRules` becomes `staticAlertRules`
pub fn static_label(text: &str) -> String {
    let mut label = String::from("static");
    let mut upper = true;
    for c in text.chars() {
        if !c.is_ascii_alphanumeric() {
            upper = true;
            continue;
        }
        if upper {
            label.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            label.push(c);
        }
    }
    label
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Schema {
    segments: Vec<Segment>,
}

impl Schema {
    /// Create a compiled-in schema
    ///
    /// # Panic
    /// Panics when the segments do not describe a valid identifier shape
    pub fn new(segments: Vec<Segment>) -> Self {
        match Self::try_new(segments) {
            Ok(schema) => schema,
            Err(err) => panic!("invalid built-in schema: {err}"),
        }
    }

    pub fn try_new(segments: Vec<Segment>) -> Result<Self, SchemaError> {
        let first = segments.first().ok_or(SchemaError::Empty)?;
        if first.kind != SegmentKind::Static || first.match_value() != Some(SUBSCRIPTIONS) {
            return Err(SchemaError::MissingSubscriptionsPrefix);
        }

        if segments.len() % 2 != 0 {
            return Err(SchemaError::UnpairedKey {
                label: segments[segments.len() - 1].label.clone(),
            });
        }

        for segment in &segments {
            if segment.label.is_empty() {
                return Err(SchemaError::EmptyLabel);
            }
            if let Some(text) = segment.match_value() {
                if text.is_empty() || text.contains('/') {
                    return Err(SchemaError::InvalidLiteral {
                        label: segment.label.clone(),
                    });
                }
            }
        }

        for pair in segments.chunks(2) {
            let (key, value) = (&pair[0], &pair[1]);
            let Some(key_text) = key.match_value().filter(|_| key.kind == SegmentKind::Static)
            else {
                return Err(SchemaError::KeyNotStatic {
                    label: key.label.clone(),
                });
            };

            let expected_key = match value.kind {
                SegmentKind::SubscriptionId => Some(SUBSCRIPTIONS),
                SegmentKind::ResourceGroup => Some(RESOURCE_GROUPS),
                SegmentKind::ResourceProvider => Some(PROVIDERS),
                SegmentKind::Static | SegmentKind::UserSpecified => None,
            };
            let misplaced = match expected_key {
                Some(expected) => key_text != expected,
                None => key_text == PROVIDERS,
            };
            if misplaced {
                return Err(SchemaError::MisplacedSegment {
                    label: value.label.clone(),
                    key: key_text.to_string(),
                });
            }
        }

        let mut seen = std::collections::HashSet::new();
        for segment in segments.iter().filter(|segment| !segment.is_literal()) {
            if !seen.insert(segment.label.as_str()) {
                return Err(SchemaError::DuplicateLabel {
                    label: segment.label.clone(),
                });
            }
        }

        Ok(Self { segments })
    }

    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Build a schema from a shape such as
    /// `/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Storage/storageAccounts/{name}`
    ///
    /// `{label}` tokens are value segments. Their kind follows the key in front of them:
    /// `subscriptions` and `resourceGroups` are typed, anything else is user specified.
    /// The literal after `providers` is the resource provider namespace.
    pub fn from_template(template: &str) -> Result<Self, SchemaError> {
        let Some(path) = template.strip_prefix('/') else {
            return Err(SchemaError::MissingLeadingSlash);
        };

        let mut segments = Vec::new();
        let mut previous: Option<&str> = None;
        for token in path.split('/') {
            if token.is_empty() {
                return Err(SchemaError::EmptyToken);
            }

            let is_value_position = segments.len() % 2 == 1;
            let placeholder = token
                .strip_prefix('{')
                .and_then(|rest| rest.strip_suffix('}'));

            let segment = match (placeholder, previous) {
                (Some(label), Some(SUBSCRIPTIONS)) if is_value_position => {
                    Segment::subscription_id(label)
                }
                (Some(label), Some(RESOURCE_GROUPS)) if is_value_position => {
                    Segment::resource_group(label)
                }
                (Some(label), _) if is_value_position => Segment::user_specified(label),
                (Some(label), _) => {
                    return Err(SchemaError::KeyNotStatic {
                        label: label.to_string(),
                    })
                }
                (None, Some(PROVIDERS)) if is_value_position => {
                    Segment::resource_provider(static_label(token), token)
                }
                (None, _) => Segment::literal(static_label(token), token),
            };

            segments.push(segment);
            previous = Some(token);
        }

        Self::try_new(segments)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segments that end up in a parse result, in schema order
    pub fn value_segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|segment| !segment.is_literal())
    }

    pub fn value_labels(&self) -> impl Iterator<Item = &str> {
        self.value_segments().map(Segment::label)
    }

    /// e.g. `/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}`
    pub fn shape(&self) -> String {
        self.join(Segment::placeholder)
    }

    /// An identifier of this shape filled with example values
    pub fn example(&self) -> String {
        self.join(Segment::example_value)
    }

    fn join<'a, F>(&'a self, render: F) -> String
    where
        F: Fn(&'a Segment) -> Cow<'a, str>,
    {
        let mut out = String::new();
        for segment in &self.segments {
            out.push('/');
            out.push_str(&render(segment));
        }
        out
    }
}

impl Display for Schema {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.shape())
    }
}

/// Assembles a schema pair by pair
///
/// ```
/// # use armid::segment::Schema;
/// let schema = Schema::builder()
///     .resource_group_scope()
///     .provider("Microsoft.Compute")
///     .child("images", "name")
///     .build();
///
/// assert_eq!(
///     schema.shape(),
///     "/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Compute/images/{name}"
/// );
/// ```
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    segments: Vec<Segment>,
}

impl SchemaBuilder {
    /// `/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}`
    pub fn resource_group_scope(self) -> Self {
        self.segment(Segment::literal(static_label(SUBSCRIPTIONS), SUBSCRIPTIONS))
            .segment(Segment::subscription_id(SUBSCRIPTION_ID_LABEL))
            .segment(Segment::literal(static_label(RESOURCE_GROUPS), RESOURCE_GROUPS))
            .segment(Segment::resource_group(RESOURCE_GROUP_LABEL))
    }

    /// `/providers/{namespace}`
    pub fn provider(self, namespace: &str) -> Self {
        self.segment(Segment::literal(static_label(PROVIDERS), PROVIDERS))
            .segment(Segment::resource_provider(static_label(namespace), namespace))
    }

    /// `/{resource_type}/{label}`
    pub fn child(self, resource_type: &str, label: &str) -> Self {
        self.segment(Segment::literal(static_label(resource_type), resource_type))
            .segment(Segment::user_specified(label))
    }

    pub fn segment(mut self, segment: Segment) -> Self {
        self.segments.push(segment);
        self
    }

    /// # Panic
    /// Panics on an invalid shape, see [Schema::new]
    pub fn build(self) -> Schema {
        Schema::new(self.segments)
    }

    pub fn try_build(self) -> Result<Schema, SchemaError> {
        Schema::try_new(self.segments)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("schema has no segments")]
    Empty,
    #[error("schema must start with a `subscriptions` segment")]
    MissingSubscriptionsPrefix,
    #[error("template must start with `/`")]
    MissingLeadingSlash,
    #[error("template contains an empty segment")]
    EmptyToken,
    #[error("schema contains a segment without a label")]
    EmptyLabel,
    #[error("segment `{label}` has no text to match")]
    InvalidLiteral { label: String },
    #[error("segment `{label}` is a key without a value")]
    UnpairedKey { label: String },
    #[error("segment `{label}` is in a key position but is not a static segment")]
    KeyNotStatic { label: String },
    #[error("segment `{label}` cannot follow `{key}`")]
    MisplacedSegment { label: String, key: String },
    #[error("label `{label}` is used more than once")]
    DuplicateLabel { label: String },
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn workspace() -> Schema {
        Schema::builder()
            .resource_group_scope()
            .provider("Microsoft.OperationalInsights")
            .child("workspaces", "name")
            .build()
    }

    #[test]
    fn shape_and_example() {
        let schema = workspace();
        assert_eq!(
            schema.shape(),
            "/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.OperationalInsights/workspaces/{name}"
        );
        assert_eq!(
            schema.example(),
            "/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/example-resource-group/providers/Microsoft.OperationalInsights/workspaces/nameValue"
        );
        assert_eq!(
            schema.value_labels().collect::<Vec<_>>(),
            ["subscriptionId", "resourceGroupName", "name"]
        );
    }

    #[test]
    fn static_labels() {
        assert_eq!(static_label("alertRules"), "staticAlertRules");
        assert_eq!(
            static_label("Microsoft.OperationalInsights"),
            "staticMicrosoftOperationalInsights"
        );
    }

    #[test]
    fn template_matches_builder() {
        let schema = Schema::from_template(&workspace().shape()).unwrap();
        assert_eq!(schema, workspace());
    }

    #[test]
    fn template_errors() {
        assert_eq!(
            Schema::from_template("subscriptions/{subscriptionId}"),
            Err(SchemaError::MissingLeadingSlash)
        );
        assert_eq!(
            Schema::from_template("/subscriptions//resourceGroups/{rg}"),
            Err(SchemaError::EmptyToken)
        );
        assert_eq!(
            Schema::from_template("/resourceGroups/{rg}"),
            Err(SchemaError::MissingSubscriptionsPrefix)
        );
        assert_eq!(
            Schema::from_template("/subscriptions/{subscriptionId}/{type}/{name}"),
            Err(SchemaError::KeyNotStatic {
                label: "type".to_string()
            })
        );
        assert_eq!(
            Schema::from_template("/subscriptions/{id}/resourceGroups/{id}"),
            Err(SchemaError::DuplicateLabel {
                label: "id".to_string()
            })
        );
        assert_eq!(
            Schema::from_template("/subscriptions/{subscriptionId}/providers/{namespace}"),
            Err(SchemaError::MisplacedSegment {
                label: "namespace".to_string(),
                key: "providers".to_string()
            })
        );
        assert_eq!(
            Schema::from_template("/subscriptions/{subscriptionId}/resourceGroups"),
            Err(SchemaError::UnpairedKey {
                label: "staticResourceGroups".to_string()
            })
        );
    }

    #[test]
    fn singleton_static_value() {
        let schema = Schema::from_template(
            "/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Web/sites/{siteName}/config/web",
        )
        .unwrap();
        assert_eq!(schema.segments()[9].kind(), SegmentKind::Static);
        assert_eq!(schema.value_segments().count(), 3);
    }

    #[test]
    #[should_panic(expected = "invalid built-in schema")]
    fn invalid_builtin_panics() {
        Schema::builder().child("workspaces", "name").build();
    }
}
