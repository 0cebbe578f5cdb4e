//! Quell Core Library
//!
//! Shared errors, setting identifiers, filter types, configuration and
//! logging setup for the Quell popup and options surfaces.

pub mod config;
pub mod error;
pub mod logging;
pub mod settings;
pub mod types;

pub use config::ClientConfig;
pub use error::{ChannelError, FilterFormatError, QuellError, QuellResult};
pub use logging::{init_logging, LogConfig, LogFormat};
pub use settings::{SettingKind, SettingName, SettingValue};
pub use types::{CustomFilter, FilterContent, FilterInfo};
