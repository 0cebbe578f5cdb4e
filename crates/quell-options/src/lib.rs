//! Options page logic for Quell

pub mod custom_filter;

pub use custom_filter::{report, Callbacks, CustomFilterLoader, IngestOutcome, OutcomeHandler};
