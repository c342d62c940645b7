//! YAML configuration for the command-line front end.
//!
//! ```yaml
//! source-key: G
//! target-key: Bb
//! capo: 3
//! update-header: true
//! ```
//!
//! Every field is optional. Keys must be one of the 12 canonical spellings.

use crate::error::TransposeError;
use crate::header::SheetHeader;
use crate::pitch::Key;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct TransposeConfig {
    pub source_key: Option<Key>,
    pub target_key: Option<Key>,
    pub capo: u32,
    pub update_header: bool,
}

impl TransposeConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, TransposeError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: &Path) -> Result<Self, TransposeError> {
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    /// Fill in whatever the config leaves open from the sheet itself.
    ///
    /// The source key falls back to the sheet's `Key:` header; the target key
    /// falls back to the source key.
    pub fn resolve(&self, sheet: &str) -> Result<(Key, Key), TransposeError> {
        let source = self
            .source_key
            .or_else(|| SheetHeader::parse(sheet).key)
            .ok_or_else(|| {
                TransposeError::Config("no source key given and none found in the sheet header".to_string())
            })?;
        let target = self.target_key.unwrap_or(source);
        Ok((source, target))
    }
}
