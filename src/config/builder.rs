use std::path::Path;

use toml::Table;
use tracing::debug;

use super::file::{FileSource, TomlSource};
use super::source::ConfigSource;
use super::{Config, ConfigError};

/// Builder for loading configuration from TOML files and inline TOML text.
///
/// Sources are merged in registration order, with later sources overriding
/// earlier ones. Nested tables are merged recursively; other values
/// (including arrays) are replaced entirely.
///
/// ## Example
///
/// ```no_run
/// use flagconf::Config;
///
/// let config = Config::builder()
///     .with_file("config/default.toml", true)
///     .with_file("config/local.toml", false)
///     .build()?;
///
/// let port = config.get("server.port");
/// # Ok::<(), flagconf::ConfigError>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct ConfigBuilder {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigBuilder {
    /// Adds a TOML file to be loaded at the configuration root.
    ///
    /// If `required` is `true`, the build will fail if the file doesn't exist.
    /// Optional files that are missing are silently skipped.
    pub fn with_file(self, path: impl AsRef<Path>, required: bool) -> Self {
        self.with_source(FileSource::new(path, required))
    }

    /// Adds a TOML file whose contents are merged below the key path `mount`.
    ///
    /// ```no_run
    /// # use flagconf::Config;
    /// // the file's `retries = 3` becomes `plugins.fetcher.retries`
    /// let config = Config::builder()
    ///     .with_file_at("fetcher.toml", true, ["plugins", "fetcher"])
    ///     .build()?;
    /// # Ok::<(), flagconf::ConfigError>(())
    /// ```
    pub fn with_file_at<I, S>(self, path: impl AsRef<Path>, required: bool, mount: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_source(FileSource::new(path, required).mounted_at(mount))
    }

    /// Adds TOML text held in memory.
    pub fn with_toml(self, contents: impl Into<String>) -> Self {
        self.with_source(TomlSource::new(contents))
    }

    /// Adds a custom configuration source.
    pub fn with_source(mut self, source: impl ConfigSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Loads and merges all sources into a [`Config`].
    pub fn build(self) -> Result<Config, ConfigError> {
        let mut merged = Table::new();

        for source in &self.sources {
            let entries = source.entries()?;
            debug!(source = ?source, entries = entries.len(), "merging config source");
            for entry in entries {
                entry.apply(&mut merged);
            }
        }

        Ok(Config::from_table(merged))
    }
}
