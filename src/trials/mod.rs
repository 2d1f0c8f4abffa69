//! Clinical trial lookup against the ClinicalTrials.gov v2 API.
//!
//! The registry returns deeply nested study documents; this module flattens
//! each one into a [`TrialRecord`] holding only the fields the explorer shows.

mod client;
mod parser;
mod types;
mod util;

pub use self::client::TrialsClient;
pub use self::parser::{parse_studies, parse_study, sort_by_last_updated};
pub use self::types::*;
pub use self::util::{normalize_nct_id, parse_registry_date, study_link};
