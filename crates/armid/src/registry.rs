//! explicit registry of identifier kinds
//!
//! Built once at startup and handed to whoever validates: there is no process-wide table.
//! The registry also binds configuration attribute names (`log_analytics_workspace_id`,
//! ...) to the kind their values must have.
//!
//! Extra kinds can be loaded from HCL files:
//!
//! ```hcl
//! schema "storage_account" {
//!   id         = "/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Storage/storageAccounts/{name}"
//!   attributes = ["storage_account_id"]
//! }
//!
//! legacy "automation_runbook" {
//!   namespace  = "Microsoft.Automation"
//!   segments   = { automationAccounts = "automationAccountName", runbooks = "name" }
//!   attributes = ["runbook_id"]
//! }
//! ```
use crate::ids::{
    AlertRuleActionId, AlertRuleId, AutomationAccountId, DataConnectorId, ImageId,
    ResourceGroupId, ResourceId, WorkspaceId,
};
use crate::kind::IdKind;
use crate::legacy::PopSequence;
use crate::segment::{Schema, SchemaError};
use indexmap::IndexMap;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct Registry {
    kinds: IndexMap<String, IdKind>,
    /// attribute name -> kind name
    attributes: IndexMap<String, String>,
}

impl Registry {
    /// All kinds this crate knows about, with their usual attribute names
    pub fn builtin() -> Self {
        let mut registry = Self::default();

        registry.register_builtin::<ResourceGroupId>("resource_group", &["resource_group_id"]);
        registry.register_builtin::<WorkspaceId>(
            "log_analytics_workspace",
            &["log_analytics_workspace_id"],
        );
        registry.register_builtin::<AlertRuleId>("sentinel_alert_rule", &["alert_rule_id"]);
        registry.register_builtin::<AlertRuleActionId>("sentinel_alert_rule_action", &[]);
        registry.register_builtin::<DataConnectorId>(
            "sentinel_data_connector",
            &["data_connector_id"],
        );
        registry.register_builtin::<ImageId>(
            "compute_image",
            &["source_image_id", "managed_image_id"],
        );
        registry.register_builtin::<AutomationAccountId>(
            "automation_account",
            &["automation_account_id"],
        );

        registry
    }

    fn register_builtin<T: ResourceId>(&mut self, name: &str, attributes: &[&str]) {
        assert!(
            self.register(name, T::kind().clone()).is_ok(),
            "built-in kind registered twice: {name}"
        );
        for attribute in attributes {
            assert!(
                self.bind(attribute, name).is_ok(),
                "built-in attribute bound twice: {attribute}"
            );
        }
    }

    pub fn register(&mut self, name: &str, kind: IdKind) -> Result<(), RegistryError> {
        if self.kinds.contains_key(name) {
            return Err(RegistryError::DuplicateKind {
                name: name.to_string(),
            });
        }

        tracing::debug!(kind = name, strategy = kind.strategy(), "registered");
        self.kinds.insert(name.to_string(), kind);
        Ok(())
    }

    /// Require values of `attribute` to be identifiers of kind `name`
    pub fn bind(&mut self, attribute: &str, name: &str) -> Result<(), RegistryError> {
        if !self.kinds.contains_key(name) {
            return Err(RegistryError::UnknownKind {
                name: name.to_string(),
            });
        }

        if self.attributes.contains_key(attribute) {
            return Err(RegistryError::DuplicateAttribute {
                attribute: attribute.to_string(),
            });
        }

        self.attributes
            .insert(attribute.to_string(), name.to_string());
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&IdKind> {
        self.kinds.get(name)
    }

    /// The kind bound to `attribute` and its name
    pub fn kind_for_attribute(&self, attribute: &str) -> Option<(&str, &IdKind)> {
        let name = self.attributes.get(attribute)?;
        self.kinds
            .get_key_value(name)
            .map(|(name, kind)| (name.as_str(), kind))
    }

    pub fn kinds(&self) -> impl Iterator<Item = (&str, &IdKind)> {
        self.kinds.iter().map(|(name, kind)| (name.as_str(), kind))
    }

    /// Attributes bound to kind `name`
    pub fn attributes_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> {
        self.attributes
            .iter()
            .filter(move |(_, kind)| kind.as_str() == name)
            .map(|(attribute, _)| attribute.as_str())
    }
}

impl Registry {
    pub fn load_file(&mut self, path: &Path) -> Result<(), LoadError> {
        tracing::info!(path=%path.display(), "loading schema file");
        let source = std::fs::read_to_string(path)?;
        self.load_str(&source)
    }

    /// Register every kind in an HCL schema file
    ///
    /// Nothing is registered unless the whole file loads.
    pub fn load_str(&mut self, source: &str) -> Result<(), LoadError> {
        let file: SchemaFile = hcl::from_str(source)?;
        let mut staged = self.clone();

        for (name, block) in file.schema {
            let schema = Schema::from_template(&block.id).map_err(|source| {
                LoadError::InvalidSchema {
                    name: name.clone(),
                    source,
                }
            })?;
            staged.register(&name, schema.into())?;
            for attribute in &block.attributes {
                staged.bind(attribute, &name)?;
            }
        }

        for (name, block) in file.legacy {
            let sequence = PopSequence::try_new(&block.namespace, block.segments)
                .map_err(|source| LoadError::InvalidSchema {
                    name: name.clone(),
                    source,
                })?;
            staged.register(&name, sequence.into())?;
            for attribute in &block.attributes {
                staged.bind(attribute, &name)?;
            }
        }

        *self = staged;
        Ok(())
    }
}

#[derive(serde::Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct SchemaFile {
    #[serde(default)]
    schema: IndexMap<String, SchemaBlock>,
    #[serde(default)]
    legacy: IndexMap<String, LegacyBlock>,
}

#[derive(serde::Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct SchemaBlock {
    id: String,
    #[serde(default)]
    attributes: Vec<String>,
}

#[derive(serde::Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct LegacyBlock {
    namespace: String,
    /// literal -> label, in pop order
    segments: IndexMap<String, String>,
    #[serde(default)]
    attributes: Vec<String>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("kind `{name}` is already registered")]
    DuplicateKind { name: String },
    #[error("kind `{name}` is not registered")]
    UnknownKind { name: String },
    #[error("attribute `{attribute}` is already bound to a kind")]
    DuplicateAttribute { attribute: String },
}

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("IO error")]
    IoError(#[from] std::io::Error),
    #[error("Unable to parse schema file")]
    HclParseFailed(#[from] hcl::Error),
    #[error("Invalid schema `{name}`")]
    InvalidSchema {
        name: String,
        #[source]
        source: SchemaError,
    },
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
