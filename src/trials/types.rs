//! Type definitions for the trials module.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::util::parse_registry_date;
use crate::util::truncate_chars;

/// Maximum title length shown in a result label.
pub const LABEL_TITLE_CHARS: usize = 65;

/// A single clinical trial, flattened from the registry's study document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialRecord {
    pub nct_id: String,
    pub title: String,
    pub interventions: Vec<String>,
    pub conditions: Vec<String>,
    pub phases: Vec<String>,
    pub status: String,
    pub sponsor: String,
    pub start_date: String,
    pub first_posted: String,
    pub last_updated: String,
    pub location: Location,
    pub link: String,
}

impl TrialRecord {
    pub fn intervention_summary(&self) -> String {
        self.interventions.join(", ")
    }

    pub fn condition_summary(&self) -> String {
        self.conditions.join(", ")
    }

    pub fn phase_summary(&self) -> String {
        self.phases.join(", ")
    }

    pub fn last_updated_date(&self) -> Option<NaiveDate> {
        parse_registry_date(&self.last_updated)
    }

    /// One-line label used in result lists, e.g. `NCT01234567 — A Study of ...`.
    pub fn label(&self) -> String {
        let (title, cut) = truncate_chars(&self.title, LABEL_TITLE_CHARS);
        format!(
            "{} — {}{}",
            self.nct_id,
            title,
            if cut { "…" } else { "" }
        )
    }
}

/// First listed site of a trial.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub state: String,
    pub country: String,
}

impl Location {
    /// Non-empty parts joined with `", "`.
    pub fn display(&self) -> String {
        [&self.city, &self.state, &self.country]
            .iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn is_empty(&self) -> bool {
        self.display().is_empty()
    }
}

// ---------------------------------------------------------------------------
// Registry wire format (API v2). Every section is optional upstream.
// ---------------------------------------------------------------------------

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StudiesResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub studies: Vec<Study>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Study {
    #[serde(deserialize_with = "null_as_default")]
    pub protocol_section: ProtocolSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProtocolSection {
    #[serde(deserialize_with = "null_as_default")]
    pub identification_module: IdentificationModule,
    #[serde(deserialize_with = "null_as_default")]
    pub status_module: StatusModule,
    #[serde(deserialize_with = "null_as_default")]
    pub sponsor_collaborators_module: SponsorCollaboratorsModule,
    #[serde(deserialize_with = "null_as_default")]
    pub conditions_module: ConditionsModule,
    #[serde(deserialize_with = "null_as_default")]
    pub design_module: DesignModule,
    #[serde(deserialize_with = "null_as_default")]
    pub arms_interventions_module: ArmsInterventionsModule,
    #[serde(deserialize_with = "null_as_default")]
    pub contacts_locations_module: ContactsLocationsModule,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IdentificationModule {
    #[serde(deserialize_with = "null_as_default")]
    pub nct_id: String,
    pub official_title: Option<String>,
    pub brief_title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatusModule {
    #[serde(deserialize_with = "null_as_default")]
    pub overall_status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub start_date_struct: DateStruct,
    #[serde(deserialize_with = "null_as_default")]
    pub study_first_post_date_struct: DateStruct,
    #[serde(deserialize_with = "null_as_default")]
    pub last_update_post_date_struct: DateStruct,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DateStruct {
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SponsorCollaboratorsModule {
    #[serde(deserialize_with = "null_as_default")]
    pub lead_sponsor: Sponsor,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Sponsor {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConditionsModule {
    #[serde(deserialize_with = "null_as_default")]
    pub conditions: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DesignModule {
    #[serde(deserialize_with = "null_as_default")]
    pub phases: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ArmsInterventionsModule {
    #[serde(deserialize_with = "null_as_default")]
    pub interventions: Vec<Intervention>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Intervention {
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContactsLocationsModule {
    #[serde(deserialize_with = "null_as_default")]
    pub locations: Vec<SiteLocation>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SiteLocation {
    #[serde(deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
}
