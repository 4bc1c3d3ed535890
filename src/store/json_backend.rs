use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::info;

use super::{Result, StoreBackend, StoreContents};
use crate::utils::write_atomic;

/// Keeps the store in a single pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StoreBackend for JsonStore {
    fn save(&self, contents: &StoreContents) -> Result<()> {
        save_contents_to_path(contents, &self.path)
    }

    /// An absent file loads as an empty store.
    fn load(&self) -> Result<StoreContents> {
        if !self.path.exists() {
            return Ok(StoreContents::default());
        }
        load_contents_from_path(&self.path)
    }
}

pub fn save_contents_to_path(contents: &StoreContents, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(contents)?;
    write_atomic(path, &json)?;
    info!(
        path = %path.display(),
        reports = contents.reports.len(),
        transactions = contents.transactions.len(),
        "store saved"
    );
    Ok(())
}

pub fn load_contents_from_path(path: &Path) -> Result<StoreContents> {
    let data = fs::read_to_string(path)?;
    let contents: StoreContents = serde_json::from_str(&data)?;
    Ok(contents)
}
