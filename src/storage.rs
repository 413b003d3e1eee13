//! Local persistence for finished plans.
//!
//! Each plan is one JSON file named after its star:
//!
//! ```text
//! <root>/<star>.json   # { "template1": {...}, "template2": {...}, ... }
//! ```
//!
//! Downstream tooling reads the templates by numbered key, so the ordered
//! template list is turned into numbered keys only here, on the way out.

use std::{fs, io, path::PathBuf};

use serde_json::{Map, Value};

use crate::{
    model::{SequencePlan, Template},
    validate::is_plain_name,
};

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("star name '{0}' cannot be used as a file name")]
    InvalidName(String),
}

pub type Result<T> = core::result::Result<T, StorageError>;

/// File-based storage for plans.
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Creates a new storage instance rooted at the given directory.
    ///
    /// The directory is created if it doesn't exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Where the plan for a star lives. Names that would leave the root are refused.
    pub fn plan_path(&self, star: &str) -> Result<PathBuf> {
        if !is_plain_name(star) {
            return Err(StorageError::InvalidName(star.to_string()));
        }
        Ok(self.root.join(format!("{star}.json")))
    }

    /// Writes a plan, replacing any earlier plan for the same star.
    pub fn write_plan(&self, plan: &SequencePlan) -> Result<PathBuf> {
        let path = self.plan_path(&plan.star)?;
        let json = serde_json::to_string_pretty(&numbered(&plan.templates)?)?;
        fs::write(&path, json)?;
        tracing::info!(path = %path.display(), templates = plan.templates.len(), "wrote plan");
        Ok(path)
    }
}

/// Templates keyed `template1`, `template2`, … in emission order.
pub fn numbered(templates: &[Template]) -> Result<Map<String, Value>> {
    templates
        .iter()
        .enumerate()
        .map(|(i, template)| -> Result<(String, Value)> {
            Ok((format!("template{}", i + 1), serde_json::to_value(template)?))
        })
        .collect()
}
