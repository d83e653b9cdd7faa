//! Persistence of accepted command lines.
//!
//! A saved knowledge base is a plain text file in the store directory holding
//! one accepted `define`/`load` line per line, in the order they were
//! accepted. Loading hands the lines back for replay; blank lines and lines
//! starting with `#` are skipped.

use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::error::{Result, SyllogyError};

// ------------- Persistence -------------
#[derive(Debug, Clone)]
pub struct Persistor {
    directory: PathBuf,
    extension: String,
}

impl Persistor {
    pub fn new(directory: impl Into<PathBuf>, extension: &str) -> Self {
        Self {
            directory: directory.into(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }
    /// Where the knowledge saved under `name` lives.
    pub fn path(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() || name.starts_with('.') || name.contains(['/', '\\']) {
            return Err(SyllogyError::Persistence(format!("invalid name '{}'", name)));
        }
        Ok(self.directory.join(format!("{}.{}", name, self.extension)))
    }
    pub fn save(&self, name: &str, lines: &[String]) -> Result<PathBuf> {
        let path = self.path(name)?;
        fs::create_dir_all(&self.directory)?;
        let mut contents = lines.join("\n");
        contents.push('\n');
        fs::write(&path, contents)?;
        info!(path = %path.display(), lines = lines.len(), "saved");
        Ok(path)
    }
    pub fn load(&self, name: &str) -> Result<Vec<String>> {
        let path = self.path(name)?;
        if !path.is_file() {
            return Err(SyllogyError::Persistence(format!(
                "nothing saved under '{}' ({})",
                name,
                path.display()
            )));
        }
        let contents = fs::read_to_string(&path)?;
        Ok(contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect())
    }
}
