//! Flag-style conversion of strings into typed values.
//!
//! Every supported value type is a zero-sized marker implementing [`Flag`].
//! A flag knows how to register itself as a `clap` argument, so the actual
//! parsing and validation, including accepted formats, ranges and error
//! wording, is whatever `clap` does for that argument on a command line.
//!
//! [`FlagSet`] is the scaffolding around a single such argument: build it,
//! feed it one value (or a whole sequence), take the converted value out,
//! and drop it.

mod duration;
mod kinds;
mod parse;

use std::marker::PhantomData;

use clap::error::ErrorKind;
use clap::{Arg, ArgMatches, Command};

pub use duration::{parse_duration, DurationError};
pub use kinds::*;
pub use parse::{
    decode_base64, decode_hex, parse_count, parse_ip_lenient, parse_ip_net, parse_ip_net_list,
    IpNetListError,
};

/// Name of the throwaway flag.
pub const FLAG_NAME: &str = "flag";

/// Usage text of the throwaway flag, never shown to anyone.
pub const FLAG_USAGE: &str = "not a trace of hint";

/// A value type that can be set through a command-line style flag.
pub trait Flag {
    /// The typed value a conversion produces.
    type Output;

    /// Whether the value is represented as a sequence.
    const SEQUENCE: bool = false;

    /// Whether a sequence flag accepts its elements one by one, replacing
    /// the whole sequence at once. Sequence flags without this take a single
    /// comma-separated string instead.
    const REPLACE: bool = false;

    /// Registers the flag under `name`, with the value parser, action and
    /// default for this type.
    fn arg(name: &'static str, usage: &'static str) -> Arg;

    /// Takes the converted value out of the parsed matches.
    fn take(matches: &mut ArgMatches, name: &str) -> Option<Self::Output>;
}

/// A single-flag command used for exactly one conversion.
#[derive(Debug)]
pub struct FlagSet<F> {
    command: Command,
    flag: PhantomData<F>,
}

impl<F: Flag> FlagSet<F> {
    pub fn new() -> Self {
        let command = Command::new("flagconf")
            .no_binary_name(true)
            .disable_help_flag(true)
            .disable_version_flag(true)
            .arg(F::arg(FLAG_NAME, FLAG_USAGE));
        Self {
            command,
            flag: PhantomData,
        }
    }

    /// Sets the flag from a single string, as if given once on the command
    /// line.
    pub fn set(self, value: &str) -> Result<F::Output, clap::Error> {
        self.parse([value])
    }

    /// Replaces the flag's sequence with `values`, one occurrence per
    /// element. Any element failing conversion fails the whole sequence.
    pub fn replace<I, S>(self, values: I) -> Result<F::Output, clap::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.parse(values)
    }

    fn parse<I, S>(mut self, values: I) -> Result<F::Output, clap::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        // `--flag=value` keeps values starting with `-` from being taken
        // for flags.
        let args = values
            .into_iter()
            .map(|value| format!("--{FLAG_NAME}={}", value.as_ref()));
        let mut matches = self.command.try_get_matches_from_mut(args)?;
        match F::take(&mut matches, FLAG_NAME) {
            Some(value) => Ok(value),
            None => Err(self
                .command
                .error(ErrorKind::MissingRequiredArgument, "flag value was never set")),
        }
    }
}

impl<F: Flag> Default for FlagSet<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders a conversion error the way clap reports it, without the leading
/// `error: ` and without any trailing usage or help hints.
pub fn error_message(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let first = rendered.split("\n\n").next().unwrap_or_default().trim_end();
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_set_scalar() {
        assert_eq!(FlagSet::<Int8>::new().set("42").unwrap(), 42);
        assert_eq!(FlagSet::<Int64>::new().set("-7").unwrap(), -7);
        assert_eq!(FlagSet::<Str>::new().set("").unwrap(), "");
        assert_eq!(FlagSet::<Str>::new().set("--a=b").unwrap(), "--a=b");
        assert!(FlagSet::<Bool>::new().set("true").unwrap());
        assert_eq!(
            FlagSet::<Dur>::new().set("1m30s").unwrap(),
            Duration::from_secs(90)
        );
    }

    #[test]
    fn test_set_reports_clap_errors() {
        let err = FlagSet::<Int>::new().set("42nd").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        let message = error_message(&err);
        assert!(message.contains("'42nd'"), "{message}");
        assert!(message.contains("invalid digit found in string"), "{message}");
        assert!(!message.starts_with("error:"), "{message}");

        let err = FlagSet::<Uint8>::new().set("300").unwrap_err();
        assert!(error_message(&err).contains("300"));
    }

    #[test]
    fn test_replace_sequence() {
        let values = FlagSet::<Int64Slice>::new()
            .replace(["1", "-2", "3"])
            .unwrap();
        assert_eq!(values, vec![1, -2, 3]);

        let values = FlagSet::<StrSlice>::new()
            .replace(["a,b", "c"])
            .unwrap();
        assert_eq!(values, vec!["a,b", "c"]);

        let empty = FlagSet::<Float64Slice>::new()
            .replace(Vec::<String>::new())
            .unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_replace_is_all_or_nothing() {
        let err = FlagSet::<IntSlice>::new()
            .replace(["1234", "abc"])
            .unwrap_err();
        assert!(error_message(&err).contains("'abc'"));
    }

    #[test]
    fn test_joined_sequence() {
        let nets = FlagSet::<IpNetworkSlice>::new()
            .set("127.0.0.1/8,192.168.0.1/24")
            .unwrap();
        assert_eq!(nets.len(), 2);
        assert_eq!(nets[1].prefix_len(), 24);

        let empty = FlagSet::<IpNetworkSlice>::new().set("").unwrap();
        assert!(empty.is_empty());

        let err = FlagSet::<IpNetworkSlice>::new()
            .set("127.0.0.1/8,abc/666")
            .unwrap_err();
        assert!(error_message(&err).contains("'abc/666'"));
    }

    #[test]
    fn test_count() {
        assert_eq!(FlagSet::<Count>::new().set("+1").unwrap(), 1);
        assert_eq!(FlagSet::<Count>::new().set("666").unwrap(), 666);
        assert!(FlagSet::<Count>::new().set("many").is_err());
    }

    #[test]
    fn test_lenient_ip() {
        assert_eq!(
            FlagSet::<Ip>::new().set(" 10.0.0.1 ").unwrap(),
            Some(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)))
        );
        assert_eq!(FlagSet::<Ip>::new().set("not-an-ip").unwrap(), None);
    }
}
