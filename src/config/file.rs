//! File-based and inline TOML configuration sources.

use std::path::{Path, PathBuf};

use toml::Table;
use tracing::debug;

use super::source::{ConfigEntry, ConfigSource};
use super::ConfigError;

/// A configuration source that loads from a TOML file.
///
/// Files can be marked as required or optional. Required files that don't exist
/// cause an error; optional files that don't exist are silently skipped.
///
/// By default the file's table lands at the configuration root; use
/// [`mounted_at`](Self::mounted_at) to place it below a key path instead.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    required: bool,
    mount: Vec<String>,
}

impl FileSource {
    /// Creates a new file source.
    ///
    /// If `required` is true, the build will fail if the file doesn't exist.
    pub fn new(path: impl AsRef<Path>, required: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            required,
            mount: Vec::new(),
        }
    }

    /// Merges the file's contents at `mount` rather than at the root.
    pub fn mounted_at<I, S>(mut self, mount: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mount = mount.into_iter().map(Into::into).collect();
        self
    }
}

impl ConfigSource for FileSource {
    fn entries(&self) -> Result<Vec<ConfigEntry>, ConfigError> {
        match load_config_file(&self.path, self.required)? {
            Some(table) => {
                debug!(path = %self.path.display(), mount = ?self.mount, "loaded config file");
                Ok(vec![ConfigEntry::at_path(
                    self.mount.clone(),
                    toml::Value::Table(table),
                )])
            }
            None => {
                debug!(path = %self.path.display(), "optional config file not found, skipping");
                Ok(vec![])
            }
        }
    }
}

/// A configuration source holding TOML text in memory.
#[derive(Debug, Clone)]
pub struct TomlSource {
    contents: String,
}

impl TomlSource {
    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
        }
    }
}

impl ConfigSource for TomlSource {
    fn entries(&self) -> Result<Vec<ConfigEntry>, ConfigError> {
        let table: Table =
            toml::from_str(&self.contents).map_err(ConfigError::InlineParseError)?;
        Ok(vec![ConfigEntry::root(table)])
    }
}

/// Loads and parses a TOML config file.
///
/// Returns `Ok(None)` if the file doesn't exist and `required` is false.
fn load_config_file(path: &Path, required: bool) -> Result<Option<Table>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let table = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?;
            Ok(Some(table))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if required {
                Err(ConfigError::FileNotFound(path.to_path_buf()))
            } else {
                Ok(None)
            }
        }
        Err(e) => Err(ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
