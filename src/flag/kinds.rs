//! The supported flag types.

use std::net::IpAddr;
use std::time::Duration;

use clap::{value_parser, Arg, ArgAction, ArgMatches};

use super::duration::parse_duration;
use super::parse::{
    decode_base64, decode_hex, parse_count, parse_ip_lenient, parse_ip_net, parse_ip_net_list,
};
use super::Flag;

macro_rules! scalar_flags {
    ($($(#[$meta:meta])* $name:ident: $ty:ty = $parser:expr;)*) => {$(
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl Flag for $name {
            type Output = $ty;

            fn arg(name: &'static str, usage: &'static str) -> Arg {
                Arg::new(name)
                    .long(name)
                    .help(usage)
                    .required(true)
                    .action(ArgAction::Set)
                    .value_parser($parser)
            }

            fn take(matches: &mut ArgMatches, name: &str) -> Option<$ty> {
                matches.remove_one::<$ty>(name)
            }
        }
    )*};
}

macro_rules! slice_flags {
    ($($(#[$meta:meta])* $name:ident: $elem:ty = $parser:expr;)*) => {$(
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl Flag for $name {
            type Output = Vec<$elem>;

            const SEQUENCE: bool = true;
            const REPLACE: bool = true;

            fn arg(name: &'static str, usage: &'static str) -> Arg {
                Arg::new(name)
                    .long(name)
                    .help(usage)
                    .action(ArgAction::Append)
                    .value_parser($parser)
            }

            fn take(matches: &mut ArgMatches, name: &str) -> Option<Vec<$elem>> {
                Some(
                    matches
                        .remove_many::<$elem>(name)
                        .map(Iterator::collect)
                        .unwrap_or_default(),
                )
            }
        }
    )*};
}

// Byte buffers are sequences underneath but are set from one encoded string.
macro_rules! encoded_bytes_flags {
    ($($(#[$meta:meta])* $name:ident = $decoder:expr;)*) => {$(
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl Flag for $name {
            type Output = Vec<u8>;

            const SEQUENCE: bool = true;

            fn arg(name: &'static str, usage: &'static str) -> Arg {
                Arg::new(name)
                    .long(name)
                    .help(usage)
                    .required(true)
                    .action(ArgAction::Set)
                    .value_parser($decoder)
            }

            fn take(matches: &mut ArgMatches, name: &str) -> Option<Vec<u8>> {
                matches.remove_one::<Vec<u8>>(name)
            }
        }
    )*};
}

scalar_flags! {
    /// `true` or `false`.
    Bool: bool = value_parser!(bool);
    Dur: Duration = parse_duration;
    Float32: f32 = value_parser!(f32);
    Float64: f64 = value_parser!(f64);
    Int: isize = value_parser!(isize);
    Int8: i8 = value_parser!(i8);
    Int16: i16 = value_parser!(i16);
    Int32: i32 = value_parser!(i32);
    Int64: i64 = value_parser!(i64);
    /// An IP address; text that is not an address sets no address instead of
    /// failing.
    Ip: Option<IpAddr> = parse_ip_lenient;
    /// An IP network in `address/prefix` notation, host bits cleared.
    IpNetwork: ipnet::IpNet = parse_ip_net;
    Str: String = value_parser!(String);
    Uint: usize = value_parser!(usize);
    Uint8: u8 = value_parser!(u8);
    Uint16: u16 = value_parser!(u16);
    Uint32: u32 = value_parser!(u32);
    Uint64: u64 = value_parser!(u64);
}

slice_flags! {
    DurSlice: Duration = parse_duration;
    Float32Slice: f32 = value_parser!(f32);
    Float64Slice: f64 = value_parser!(f64);
    IntSlice: isize = value_parser!(isize);
    Int32Slice: i32 = value_parser!(i32);
    Int64Slice: i64 = value_parser!(i64);
    IpSlice: IpAddr = value_parser!(IpAddr);
    StrSlice: String = value_parser!(String);
    /// Like [`StrSlice`]; both keep every element as given.
    StrArray: String = value_parser!(String);
    UintSlice: usize = value_parser!(usize);
}

encoded_bytes_flags! {
    /// Bytes in standard base64 encoding.
    BytesBase64 = decode_base64;
    /// Bytes as hex digits.
    BytesHex = decode_hex;
}

/// An occurrence counter, zero unless set.
#[derive(Debug, Clone, Copy, Default)]
pub struct Count;

impl Flag for Count {
    type Output = isize;

    fn arg(name: &'static str, usage: &'static str) -> Arg {
        Arg::new(name)
            .long(name)
            .help(usage)
            .action(ArgAction::Set)
            .default_value("0")
            .value_parser(parse_count)
    }

    fn take(matches: &mut ArgMatches, name: &str) -> Option<isize> {
        matches.remove_one::<isize>(name)
    }
}

/// IP networks, set from a single comma-separated string.
#[derive(Debug, Clone, Copy, Default)]
pub struct IpNetworkSlice;

impl Flag for IpNetworkSlice {
    type Output = Vec<ipnet::IpNet>;

    const SEQUENCE: bool = true;

    fn arg(name: &'static str, usage: &'static str) -> Arg {
        Arg::new(name)
            .long(name)
            .help(usage)
            .required(true)
            .action(ArgAction::Set)
            .value_parser(parse_ip_net_list)
    }

    fn take(matches: &mut ArgMatches, name: &str) -> Option<Vec<ipnet::IpNet>> {
        matches.remove_one::<Vec<ipnet::IpNet>>(name)
    }
}
