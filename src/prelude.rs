//! Crate-internal prelude.
//!
//! Pulls in the `Display` derive from derive_more and the `log` macros used on
//! degraded paths.

pub use derive_more::Display;
pub use log::{debug, warn};
