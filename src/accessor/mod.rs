//! Typed, flag-style access to configuration values.

mod error;

use std::net::IpAddr;
use std::ops::Deref;
use std::time::Duration;

use ipnet::IpNet;
use toml::Value;

use crate::config::Store;
use crate::flag::{self, Flag, FlagSet};

pub use error::AccessError;

/// Wraps a configuration [`Store`] with typed getters that convert values
/// exactly like the corresponding command-line flags would.
///
/// Code that used to read `--addr` from parsed arguments can read `addr`
/// from configuration instead, getting the same accepted formats and the
/// same error texts.
///
/// ## Example
///
/// ```
/// use flagconf::{Accessor, Config};
///
/// let config = Config::builder()
///     .with_toml(r#"
///         [server]
///         port = "8080"
///         timeouts = ["250ms", "1.5s"]
///     "#)
///     .build()?;
/// let settings = Accessor::new(config);
///
/// assert_eq!(settings.get_u16("server.port")?, 8080);
/// assert_eq!(settings.get_duration_slice("server.timeouts")?.len(), 2);
/// assert!(settings.get_u16("server.host").is_err());
/// # Ok::<(), flagconf::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Accessor<S> {
    store: S,
}

impl<S: Store> Accessor<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Looks up `path` and converts its value using flag `F`.
    ///
    /// Sequence flags require the stored value to be an array, unless
    /// `treat_as_scalar` is set; each element is then rendered to a string and
    /// either handed to the flag one by one, or joined with commas and set in
    /// one go, depending on what the flag supports. Everything else is set
    /// from the value's string form.
    pub fn get_as<F: Flag>(
        &self,
        path: &str,
        treat_as_scalar: bool,
    ) -> Result<F::Output, AccessError> {
        let raw = self
            .store
            .get(path)
            .ok_or_else(|| AccessError::NotFound(path.to_string()))?;

        let flags = FlagSet::<F>::new();
        let converted = if !treat_as_scalar && F::SEQUENCE {
            let Value::Array(items) = raw else {
                return Err(AccessError::ShapeMismatch(path.to_string()));
            };
            let rendered: Vec<String> = items.iter().map(render).collect();
            if F::REPLACE {
                flags.replace(rendered)
            } else {
                flags.set(&rendered.join(","))
            }
        } else {
            flags.set(&render(raw))
        };

        converted.map_err(|source| AccessError::conversion(path, source))
    }

    /// Returns the bool value of the configuration setting at `path`.
    pub fn get_bool(&self, path: &str) -> Result<bool, AccessError> {
        self.get_as::<flag::Bool>(path, false)
    }

    /// Returns the bytes encoded in base64 at `path`.
    pub fn get_bytes_base64(&self, path: &str) -> Result<Vec<u8>, AccessError> {
        self.get_as::<flag::BytesBase64>(path, true)
    }

    /// Returns the bytes encoded as hex digits at `path`.
    pub fn get_bytes_hex(&self, path: &str) -> Result<Vec<u8>, AccessError> {
        self.get_as::<flag::BytesHex>(path, true)
    }

    /// Returns the counter value at `path`.
    pub fn get_count(&self, path: &str) -> Result<isize, AccessError> {
        self.get_as::<flag::Count>(path, false)
    }

    pub fn get_duration(&self, path: &str) -> Result<Duration, AccessError> {
        self.get_as::<flag::Dur>(path, false)
    }

    pub fn get_duration_slice(&self, path: &str) -> Result<Vec<Duration>, AccessError> {
        self.get_as::<flag::DurSlice>(path, false)
    }

    pub fn get_f32(&self, path: &str) -> Result<f32, AccessError> {
        self.get_as::<flag::Float32>(path, false)
    }

    pub fn get_f32_slice(&self, path: &str) -> Result<Vec<f32>, AccessError> {
        self.get_as::<flag::Float32Slice>(path, false)
    }

    pub fn get_f64(&self, path: &str) -> Result<f64, AccessError> {
        self.get_as::<flag::Float64>(path, false)
    }

    pub fn get_f64_slice(&self, path: &str) -> Result<Vec<f64>, AccessError> {
        self.get_as::<flag::Float64Slice>(path, false)
    }

    /// Returns the native-width signed integer at `path`.
    pub fn get_isize(&self, path: &str) -> Result<isize, AccessError> {
        self.get_as::<flag::Int>(path, false)
    }

    pub fn get_isize_slice(&self, path: &str) -> Result<Vec<isize>, AccessError> {
        self.get_as::<flag::IntSlice>(path, false)
    }

    pub fn get_i8(&self, path: &str) -> Result<i8, AccessError> {
        self.get_as::<flag::Int8>(path, false)
    }

    pub fn get_i16(&self, path: &str) -> Result<i16, AccessError> {
        self.get_as::<flag::Int16>(path, false)
    }

    pub fn get_i32(&self, path: &str) -> Result<i32, AccessError> {
        self.get_as::<flag::Int32>(path, false)
    }

    pub fn get_i32_slice(&self, path: &str) -> Result<Vec<i32>, AccessError> {
        self.get_as::<flag::Int32Slice>(path, false)
    }

    pub fn get_i64(&self, path: &str) -> Result<i64, AccessError> {
        self.get_as::<flag::Int64>(path, false)
    }

    pub fn get_i64_slice(&self, path: &str) -> Result<Vec<i64>, AccessError> {
        self.get_as::<flag::Int64Slice>(path, false)
    }

    /// Returns the IP address at `path`.
    ///
    /// A value that is not a valid address is not an error: it yields
    /// `Ok(None)`. Only a missing setting fails.
    pub fn get_ip(&self, path: &str) -> Result<Option<IpAddr>, AccessError> {
        self.get_as::<flag::Ip>(path, true)
    }

    pub fn get_ip_slice(&self, path: &str) -> Result<Vec<IpAddr>, AccessError> {
        self.get_as::<flag::IpSlice>(path, false)
    }

    /// Returns the IP network at `path`, written as `address/prefix`.
    ///
    /// Host bits are cleared: `127.0.0.1/8` reads as `127.0.0.0/8`.
    pub fn get_ip_net(&self, path: &str) -> Result<IpNet, AccessError> {
        self.get_as::<flag::IpNetwork>(path, false)
    }

    pub fn get_ip_net_slice(&self, path: &str) -> Result<Vec<IpNet>, AccessError> {
        self.get_as::<flag::IpNetworkSlice>(path, false)
    }

    /// Returns the string form of the value at `path`.
    pub fn get_string(&self, path: &str) -> Result<String, AccessError> {
        self.get_as::<flag::Str>(path, false)
    }

    pub fn get_string_slice(&self, path: &str) -> Result<Vec<String>, AccessError> {
        self.get_as::<flag::StrSlice>(path, false)
    }

    pub fn get_string_array(&self, path: &str) -> Result<Vec<String>, AccessError> {
        self.get_as::<flag::StrArray>(path, false)
    }

    /// Returns the native-width unsigned integer at `path`.
    pub fn get_usize(&self, path: &str) -> Result<usize, AccessError> {
        self.get_as::<flag::Uint>(path, false)
    }

    pub fn get_usize_slice(&self, path: &str) -> Result<Vec<usize>, AccessError> {
        self.get_as::<flag::UintSlice>(path, false)
    }

    pub fn get_u8(&self, path: &str) -> Result<u8, AccessError> {
        self.get_as::<flag::Uint8>(path, false)
    }

    pub fn get_u16(&self, path: &str) -> Result<u16, AccessError> {
        self.get_as::<flag::Uint16>(path, false)
    }

    pub fn get_u32(&self, path: &str) -> Result<u32, AccessError> {
        self.get_as::<flag::Uint32>(path, false)
    }

    pub fn get_u64(&self, path: &str) -> Result<u64, AccessError> {
        self.get_as::<flag::Uint64>(path, false)
    }
}

impl<S> Deref for Accessor<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.store
    }
}

/// Renders a raw value the way it would be typed on a command line.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Datetime(dt) => dt.to_string(),
        Value::Array(_) | Value::Table(_) => value.to_string(),
    }
}
