//! Storm event impact report.
//!
//! Loads NOAA storm event records, keeps the 1982-2011 events that caused
//! harm, collapses free-text event types into canonical labels, decodes the
//! damage exponent codes into dollar amounts, and ranks event types by
//! fatalities, injuries, crop damage and property damage.

pub mod canonicalize;
pub mod config;
pub mod damage;
pub mod error;
pub mod filter;
pub mod loader;
pub mod output;
pub mod pipeline;
pub mod reports;
pub mod types;
pub mod util;
