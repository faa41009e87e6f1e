use crate::accessor::AccessError;
use crate::config::ConfigError;
use thiserror::Error;

/// Top-level error type for the flagconf library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Access(#[from] AccessError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Accessor, Config};

    fn port(toml_str: &str) -> Result<u16, Error> {
        let config = Config::builder().with_toml(toml_str).build()?;
        Ok(Accessor::new(config).get_u16("server.port")?)
    }

    #[test]
    fn test_errors_convert() {
        assert_eq!(port("[server]\nport = 80").unwrap(), 80);
        assert!(matches!(port("[server"), Err(Error::Config(_))));
        assert!(matches!(
            port("[server]"),
            Err(Error::Access(AccessError::NotFound(_)))
        ));
    }
}
