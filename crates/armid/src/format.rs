//! canonical formatter
//!
//! Renders values back into the canonical `/`-delimited form. Literal segments are always
//! written with the casing of the schema, so formatting the result of a case-insensitive
//! parse canonicalizes the identifier.
use crate::kind::IdKind;
use crate::parser::ParseResult;
use crate::segment::Schema;
use indexmap::IndexMap;

/// Format `values` (one per value segment, in schema order)
///
/// # Panic
/// Panics when the number of values does not match the schema. Typed identifiers always
/// pass the right number.
pub fn format(schema: &Schema, values: &[&str]) -> String {
    let expected = schema.value_segments().count();
    assert_eq!(
        values.len(),
        expected,
        "schema {schema} takes {expected} values"
    );

    let mut values = values.iter();
    let mut id = String::new();
    for segment in schema.segments() {
        id.push('/');
        match segment.match_value() {
            Some(text) => id.push_str(text),
            None => id.push_str(values.next().copied().unwrap_or_default()),
        }
    }
    id
}

/// Format values given by label, e.g. from the command line
pub fn format_labeled(
    kind: &IdKind,
    values: &IndexMap<String, String>,
) -> Result<String, FormatError> {
    let labels = kind.value_labels();

    if let Some(unknown) = values
        .keys()
        .find(|label| !labels.contains(&label.as_str()))
    {
        return Err(FormatError::UnknownLabel {
            label: unknown.clone(),
        });
    }

    let ordered = labels
        .iter()
        .map(|label| match values.get(*label) {
            None => Err(FormatError::MissingValue {
                label: label.to_string(),
            }),
            Some(value) if value.is_empty() || value.contains('/') => {
                Err(FormatError::InvalidValue {
                    label: label.to_string(),
                    value: value.clone(),
                })
            }
            Some(value) => Ok(value.as_str()),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(kind.format(&ordered))
}

impl Schema {
    /// see [format]
    pub fn format(&self, values: &[&str]) -> String {
        format(self, values)
    }
}

impl ParseResult {
    /// Canonical form of a result that was produced by parsing against `schema`
    pub fn to_id(&self, schema: &Schema) -> String {
        format(schema, &self.values().collect::<Vec<_>>())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("no value given for `{label}`")]
    MissingValue { label: String },
    #[error("`{label}` is not part of this ID")]
    UnknownLabel { label: String },
    #[error("{value:?} is not a valid value for `{label}`")]
    InvalidValue { label: String, value: String },
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn alert_rule_action() -> Schema {
        Schema::builder()
            .resource_group_scope()
            .provider("Microsoft.OperationalInsights")
            .child("workspaces", "workspaceName")
            .provider("Microsoft.SecurityInsights")
            .child("alertRules", "alertRuleName")
            .child("actions", "name")
            .build()
    }

    #[test]
    fn formats_alert_rule_action() {
        let id = alert_rule_action().format(&[
            "12345678-1234-9876-4563-123456789012",
            "resGroup1",
            "space1",
            "rule1",
            "action1",
        ]);

        assert_eq!(
            id,
            "/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/resGroup1/providers/Microsoft.OperationalInsights/workspaces/space1/providers/Microsoft.SecurityInsights/alertRules/rule1/actions/action1"
        );
    }

    #[test]
    fn insensitive_parse_canonicalizes() {
        let schema = alert_rule_action();
        let sloppy = schema
            .example()
            .replace("/providers/", "/PROVIDERS/")
            .replace("/actions/", "/Actions/");

        let result = schema.parse_insensitively(&sloppy).unwrap();
        assert_eq!(result.to_id(&schema), schema.example());
    }

    #[test]
    fn labeled_values() {
        let kind = IdKind::from(alert_rule_action());
        let mut values: IndexMap<String, String> = [
            ("name", "action1"),
            ("alertRuleName", "rule1"),
            ("workspaceName", "space1"),
            ("resourceGroupName", "resGroup1"),
            ("subscriptionId", "sub"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        assert_eq!(
            format_labeled(&kind, &values).unwrap(),
            "/subscriptions/sub/resourceGroups/resGroup1/providers/Microsoft.OperationalInsights/workspaces/space1/providers/Microsoft.SecurityInsights/alertRules/rule1/actions/action1"
        );

        values.insert("ruleName".to_string(), "x".to_string());
        assert_eq!(
            format_labeled(&kind, &values),
            Err(FormatError::UnknownLabel {
                label: "ruleName".to_string()
            })
        );

        values.shift_remove("ruleName");
        values.insert("name".to_string(), String::new());
        assert_eq!(
            format_labeled(&kind, &values),
            Err(FormatError::InvalidValue {
                label: "name".to_string(),
                value: String::new()
            })
        );

        values.shift_remove("name");
        assert_eq!(
            format_labeled(&kind, &values),
            Err(FormatError::MissingValue {
                label: "name".to_string()
            })
        );
    }

    #[test]
    #[should_panic(expected = "takes 5 values")]
    fn wrong_value_count_panics() {
        alert_rule_action().format(&["only", "three", "values"]);
    }
}
