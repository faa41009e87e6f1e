use toml::{Table, Value};

use super::ConfigError;

/// A value contributed by a source, addressed by its key path.
#[derive(Debug, Clone)]
pub struct ConfigEntry {
    pub path: Vec<String>,
    pub value: Value,
}

impl ConfigEntry {
    pub fn root(table: Table) -> Self {
        Self {
            path: Vec::new(),
            value: Value::Table(table),
        }
    }

    pub fn at_path(path: Vec<String>, value: Value) -> Self {
        Self { path, value }
    }

    /// Applies this entry to `table`.
    ///
    /// Tables are merged at the entry's path; any other value is set at the
    /// path, with intermediate tables created as needed. A scalar entry with
    /// an empty path has nowhere to go and is dropped.
    pub(crate) fn apply(self, table: &mut Table) {
        match self.value {
            Value::Table(src) => merge_at_path(table, &self.path, src),
            value => {
                if let Some((last, parents)) = self.path.split_last() {
                    let mut leaf = Table::new();
                    leaf.insert(last.clone(), value);
                    merge_at_path(table, parents, leaf);
                }
            }
        }
    }
}

/// A provider of configuration entries.
pub trait ConfigSource: Send + Sync + std::fmt::Debug {
    fn entries(&self) -> Result<Vec<ConfigEntry>, ConfigError>;
}

/// Merges `src` into `dest` at the location named by `path`.
///
/// Missing path elements are created as empty tables. An existing element
/// that is not a table is replaced by an empty table, dropping whatever value
/// it held. Once the path is exhausted, `src` is deep-merged into the node:
/// nested tables merge key by key, and every other value in `src` (arrays
/// included) overwrites the destination.
pub fn merge_at_path(dest: &mut Table, path: &[String], src: Table) {
    let Some((first, rest)) = path.split_first() else {
        deep_merge(dest, src);
        return;
    };

    if !matches!(dest.get(first), Some(Value::Table(_))) {
        dest.insert(first.clone(), Value::Table(Table::new()));
    }

    if let Some(Value::Table(nested)) = dest.get_mut(first) {
        merge_at_path(nested, rest, src);
    }
}

/// Returns a merge callback bound to `path`, taking `(src, dest)`.
pub fn merge_at<I, S>(path: I) -> impl Fn(Table, &mut Table)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let path: Vec<String> = path.into_iter().map(Into::into).collect();
    move |src: Table, dest: &mut Table| merge_at_path(dest, &path, src)
}

fn deep_merge(base: &mut Table, overlay: Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(Value::Table(base_table)), Value::Table(overlay_table)) => {
                deep_merge(base_table, overlay_table);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    fn make_table(toml_str: &str) -> Table {
        toml::from_str(toml_str).unwrap()
    }

    #[test]
    fn test_creates_missing_tables() {
        let mut dest = Table::new();
        merge_at_path(&mut dest, &path(&["inside", "job"]), Table::new());

        assert_eq!(
            dest,
            make_table(
                r#"
                [inside.job]
                "#
            )
        );
    }

    #[test]
    fn test_keeps_existing_tables() {
        let mut dest = make_table(
            r#"
            [inside]
            fool = "bar"
            "#,
        );
        merge_at_path(&mut dest, &path(&["inside", "job"]), Table::new());

        assert_eq!(dest["inside"]["fool"].as_str(), Some("bar"));
        assert!(dest["inside"]["job"].as_table().unwrap().is_empty());
    }

    #[test]
    fn test_replaces_non_table_elements() {
        let mut dest = make_table("inside = 42");
        merge_at_path(&mut dest, &path(&["inside", "job"]), Table::new());

        assert_eq!(
            dest,
            make_table(
                r#"
                [inside.job]
                "#
            )
        );
    }

    #[test]
    fn test_merges_at_deeper_level() {
        let mut dest = make_table(
            r#"
            [config]
            fool = "bar"
            "#,
        );
        let src = make_table(r#"truth = "false""#);
        merge_at_path(&mut dest, &path(&["config"]), src);

        assert_eq!(
            dest,
            make_table(
                r#"
                [config]
                fool = "bar"
                truth = "false"
                "#
            )
        );
    }

    #[test]
    fn test_arrays_are_replaced_not_appended() {
        let mut dest = make_table(
            r#"
            [net]
            hosts = ["a", "b"]
            port = 1
            "#,
        );
        let src = make_table(r#"hosts = ["c"]"#);
        merge_at_path(&mut dest, &path(&["net"]), src);

        let hosts = dest["net"]["hosts"].as_array().unwrap();
        assert_eq!(hosts.len(), 1);
        assert_eq!(hosts[0].as_str(), Some("c"));
        assert_eq!(dest["net"]["port"].as_integer(), Some(1));
    }

    #[test]
    fn test_curried_merge() {
        let merge = merge_at(["a", "b"]);
        let mut dest = Table::new();
        merge(make_table("x = 1"), &mut dest);
        merge(make_table("y = 2"), &mut dest);

        assert_eq!(dest["a"]["b"]["x"].as_integer(), Some(1));
        assert_eq!(dest["a"]["b"]["y"].as_integer(), Some(2));
    }

    #[test]
    fn test_scalar_entry_is_set_at_path() {
        let mut dest = make_table(
            r#"
            [server]
            host = "localhost"
            "#,
        );
        ConfigEntry::at_path(path(&["server", "port"]), Value::Integer(8080)).apply(&mut dest);
        ConfigEntry::at_path(Vec::new(), Value::Integer(1)).apply(&mut dest);

        assert_eq!(dest["server"]["host"].as_str(), Some("localhost"));
        assert_eq!(dest["server"]["port"].as_integer(), Some(8080));
        assert_eq!(dest.len(), 1);
    }
}
