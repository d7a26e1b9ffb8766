//! collection of terraform/hcl documents ([Body] and path to source file)
//!
//! The path is kept so findings can point at the file they came from.
use hcl_edit::structure::Body;
use std::path::Path;

#[derive(Default, Debug)]
pub struct HclDocuments {
    documents: Vec<(Source, Body)>,
}

impl HclDocuments {
    /// Inserts an hcl document
    pub fn insert(&mut self, document: Body, path: impl Into<Option<std::path::PathBuf>>) {
        self.documents.push((path.into(), document));
    }

    pub fn documents(&self) -> impl Iterator<Item = SourceDocument> {
        self.documents.iter().map(|(source, body)| (source, body))
    }

    pub fn source_count(&self) -> usize {
        self.documents.len()
    }
}

impl HclDocuments {
    pub fn load_file(&mut self, file_path: &Path) -> Result<(), LoadError> {
        let file_path = file_path.canonicalize()?;
        tracing::info!(path=%file_path.display(), "loading file");

        let file_contents = std::fs::read_to_string(&file_path)?;
        let body = hcl_edit::parser::parse_body(&file_contents)?;

        self.insert(body, Some(file_path));
        Ok(())
    }

    /// Load every `*.tf` and `*.hcl` file in `dir_path` (not recursive)
    pub fn load_directory(&mut self, dir_path: &Path) -> Result<(), LoadError> {
        let mut any_files_loaded = false;

        let mut entries = std::fs::read_dir(dir_path)?.collect::<Result<Vec<_>, _>>()?;
        entries.sort_by_key(|entry| entry.file_name());

        for dir_entry in entries {
            if !dir_entry.file_type()?.is_file() {
                continue;
            }

            let file_path = dir_entry.path();
            let is_config_file = matches!(
                file_path.extension().and_then(|ext| ext.to_str()),
                Some("tf" | "hcl")
            );
            if !is_config_file {
                continue;
            }

            self.load_file(&file_path)?;
            any_files_loaded = true;
        }

        if !any_files_loaded {
            return Err(LoadError::NoFilesFound);
        }

        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("No files found in directory")]
    NoFilesFound,
    #[error("IO error")]
    IoError(#[from] std::io::Error),
    #[error("Unable to parse hcl file")]
    HclParseFailed(#[from] hcl_edit::parser::Error),
}

impl From<Body> for HclDocuments {
    fn from(value: Body) -> Self {
        let mut documents = HclDocuments::default();
        documents.insert(value, None);
        documents
    }
}

/// Utility macro to create [HclDocuments]
///
/// Create from a single document
/// ```
/// # use armid::hcl_documents;
/// hcl_documents!(r#"resource "a" "b" { name = "c" }"#);
/// ```
///
/// Create from multiple documents (path required)
/// ```
/// # use armid::hcl_documents;
/// hcl_documents! {
///   "one.tf" => "attribute_one = 1",
///   "two.tf" => "attribute_two = 2"
/// };
/// ```
///
/// # Panic
/// Panics on invalid input
///
/// ```should_panic
/// # use armid::hcl_documents;
/// hcl_documents!("not = valid = hcl");
/// ```
#[macro_export]
macro_rules! hcl_documents {
    // single document without source
    { $expr:expr } => {
        $crate::hcl_documents::HclDocuments::from(hcl_edit::parser::parse_body($expr).expect("body must parse"))
    };
    // multi document with sources
    { $($source:expr => $expr:expr),+ } => {{
        let mut docs = $crate::hcl_documents::HclDocuments::default();
        $(
            docs.insert(hcl_edit::parser::parse_body($expr).expect("body must parse"), Some($source.into()));
        )+

        docs
    }};
}

pub type Source = Option<std::path::PathBuf>;
pub type SourceDocument<'a> = (&'a Source, &'a Body);

#[cfg(test)]
pub(crate) mod test {
    #[test]
    fn documents_keep_their_source() {
        let hcl_documents = hcl_documents! {
            "main.tf" => "a = 1",
            "other.tf" => "b = 2"
        };

        assert_eq!(hcl_documents.source_count(), 2);
        let sources: Vec<_> = hcl_documents
            .documents()
            .map(|(source, _)| source.as_ref().map(|path| path.display().to_string()))
            .collect();
        assert_eq!(
            sources,
            [Some("main.tf".to_string()), Some("other.tf".to_string())]
        );
    }
}
