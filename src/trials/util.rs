//! Utility functions for registry data.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ExplorerError, Result};

const STUDY_URL_PREFIX: &str = "https://clinicaltrials.gov/study/";

static NCT_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?i:nct)([0-9]{8})$").unwrap());

/// Parse a registry date. The registry reports day, month or year precision
/// (`2024-03-15`, `2024-03`, `2024`); coarser dates resolve to the first day.
pub fn parse_registry_date(date_str: &str) -> Option<NaiveDate> {
    let date_str = date_str.trim();
    if date_str.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        return Some(date);
    }

    // chrono refuses partial dates, so pin the missing components
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", date_str), "%Y-%m-%d") {
        return Some(date);
    }

    if date_str.len() == 4 && date_str.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(year) = date_str.parse::<i32>() {
            return NaiveDate::from_ymd_opt(year, 1, 1);
        }
    }

    None
}

/// Public study page for an NCT id.
pub fn study_link(nct_id: &str) -> String {
    format!("{}{}", STUDY_URL_PREFIX, nct_id)
}

/// Validates an NCT id (`NCT` + 8 digits) and returns it with an upper-case prefix.
pub fn normalize_nct_id(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    NCT_ID
        .captures(trimmed)
        .map(|caps| format!("NCT{}", &caps[1]))
        .ok_or_else(|| ExplorerError::InvalidNctId(raw.to_string()))
}
