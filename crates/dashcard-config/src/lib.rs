//! Dashcard Config - dashboard documents in and out
//!
//! Converts raw YAML/JSON dashboard definitions into the typed model
//! and back:
//! - Parsing is fail-fast on malformed source text (no partial
//!   dashboards) but never rejects unknown card types or fields; those
//!   degrade to passthrough data.
//! - Serializing emits recognized fields plus everything captured in
//!   the passthrough bags, so a parse/serialize round trip is lossless.

#![warn(unreachable_pub)]

pub mod error;
pub mod parse;
pub mod serialize;

pub use error::{ParseError, SerializeError};
pub use parse::{parse_action, parse_json, parse_yaml, ConfigParser, ParseOptions, DEFAULT_MAX_DEPTH};
pub use serialize::{card_to_value, dashboard_to_value, to_json, to_yaml};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
