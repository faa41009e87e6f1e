//! Configuration loading and lookup.

mod builder;
mod error;
mod file;
mod source;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use toml::{Table, Value};

pub use builder::ConfigBuilder;
pub use error::ConfigError;
pub use file::{FileSource, TomlSource};
pub use source::{merge_at, merge_at_path, ConfigEntry, ConfigSource};

/// Separator between the keys of a configuration path.
pub const PATH_DELIMITER: char = '.';

/// Read access to raw configuration values by dotted path.
pub trait Store {
    /// Returns the raw value at `path`, or `None` if there is none.
    fn get(&self, path: &str) -> Option<&Value>;
}

/// Merged configuration data, addressed by dotted paths such as `server.port`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    root: Table,
}

impl Config {
    /// Creates a new configuration builder.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn from_table(root: Table) -> Self {
        Self { root }
    }

    pub fn as_table(&self) -> &Table {
        &self.root
    }

    /// Returns the raw value at `path`.
    ///
    /// Paths that are empty, contain empty segments, or run through a
    /// non-table value have no value.
    pub fn get(&self, path: &str) -> Option<&Value> {
        lookup(&self.root, path)
    }

    pub fn exists(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Deserializes the subtree at `path` into `T`; the empty path selects
    /// the whole configuration.
    pub fn unmarshal<T: DeserializeOwned>(&self, path: &str) -> Result<T, ConfigError> {
        let value = if path.is_empty() {
            Value::Table(self.root.clone())
        } else {
            self.get(path)
                .cloned()
                .ok_or_else(|| ConfigError::PathNotFound(path.to_string()))?
        };
        value.try_into().map_err(ConfigError::DeserializeError)
    }
}

fn lookup<'a>(root: &'a Table, path: &str) -> Option<&'a Value> {
    let mut keys = path.split(PATH_DELIMITER);
    let mut current = root.get(keys.next()?)?;
    for key in keys {
        current = current.as_table()?.get(key)?;
    }
    Some(current)
}

impl Store for Config {
    fn get(&self, path: &str) -> Option<&Value> {
        Config::get(self, path)
    }
}

impl Store for Table {
    fn get(&self, path: &str) -> Option<&Value> {
        lookup(self, path)
    }
}

impl<S: Store + ?Sized> Store for &S {
    fn get(&self, path: &str) -> Option<&Value> {
        (**self).get(path)
    }
}

impl<S: Store + ?Sized> Store for Box<S> {
    fn get(&self, path: &str) -> Option<&Value> {
        (**self).get(path)
    }
}

impl<S: Store + ?Sized> Store for Arc<S> {
    fn get(&self, path: &str) -> Option<&Value> {
        (**self).get(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn make_config(toml_str: &str) -> Config {
        Config::from_table(toml::from_str(toml_str).unwrap())
    }

    #[test]
    fn test_get_nested_path() {
        let config = make_config(
            r#"
            [server]
            host = "example.com"

            [server.tls]
            enabled = true
            "#,
        );

        assert_eq!(config.get("server.host").unwrap().as_str(), Some("example.com"));
        assert_eq!(config.get("server.tls.enabled").unwrap().as_bool(), Some(true));
        assert!(config.get("server").unwrap().is_table());
    }

    #[test]
    fn test_get_absent_paths() {
        let config = make_config(
            r#"
            [server]
            host = "example.com"
            "#,
        );

        assert!(config.get("").is_none());
        assert!(config.get("server.").is_none());
        assert!(config.get(".server").is_none());
        assert!(config.get("server.port").is_none());
        assert!(config.get("server.host.name").is_none());
        assert!(!config.exists("foo.bar"));
    }

    #[test]
    fn test_store_forwarding() {
        fn port<S: Store>(store: S) -> Option<i64> {
            store.get("server.port").and_then(Value::as_integer)
        }

        let config = make_config("[server]\nport = 80");
        assert_eq!(port(&config), Some(80));
        assert_eq!(port(Arc::new(config.clone())), Some(80));
        assert_eq!(port(Box::new(config.as_table().clone())), Some(80));
    }

    #[test]
    fn test_unmarshal() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Server {
            host: String,
            port: u16,
        }

        let config = make_config(
            r#"
            [server]
            host = "localhost"
            port = 8080
            "#,
        );

        let server: Server = config.unmarshal("server").unwrap();
        assert_eq!(
            server,
            Server {
                host: "localhost".into(),
                port: 8080
            }
        );

        let root: Table = config.unmarshal("").unwrap();
        assert!(root.contains_key("server"));

        let missing = config.unmarshal::<Server>("client");
        assert!(matches!(missing, Err(ConfigError::PathNotFound(p)) if p == "client"));

        let wrong = config.unmarshal::<u16>("server.host");
        assert!(matches!(wrong, Err(ConfigError::DeserializeError(_))));
    }
}
