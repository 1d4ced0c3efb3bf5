//! View models for the court dashboard.
//!
//! These mirror the backend's JSON records field for field. They are read-only
//! projections, replaced wholesale by the next fetch.

mod calendar;
mod case;
mod court;
mod document;
mod judge;
mod ml;
mod scheduling;
mod user;

pub use calendar::*;
pub use case::*;
pub use court::*;
pub use document::*;
pub use judge::*;
pub use ml::*;
pub use scheduling::*;
pub use user::*;

use serde::{Deserialize, Serialize};

/// Acknowledgement body returned by simple mutations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}
