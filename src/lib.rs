//! A client for the FACEIT open data API.
//!
//! Fetches player match histories, groups them into competitions, and folds
//! per-match stat sheets into season-level summaries. Upstream access is
//! rate-limit aware (bounded retry with backoff on 429) and read-through
//! cached, so repeated lookups for active players do not hammer the API.
//!
//! See [`FaceitClient`] for the full operation surface.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub(crate) mod faceit;
pub mod model;

pub use cache::{CacheLayer, TtlCache};
pub use client::{CompetitionFilter, FaceitClient};
pub use config::Config;
pub use error::{FaceitError, Result};
pub use faceit::{HttpTransport, RawResponse, Transport, ESEA_ORGANIZER_ID, FACEIT_API_BASE};
