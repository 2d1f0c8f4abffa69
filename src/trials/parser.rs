//! Conversion of registry study documents into [`TrialRecord`]s.

use std::cmp::Ordering;
use tracing::debug;

use super::types::{Study, StudiesResponse, TrialRecord, Location};
use super::util::study_link;
use crate::error::{ExplorerError, Result};
use crate::TARGET_WEB_REQUEST;

impl From<Study> for TrialRecord {
    fn from(study: Study) -> Self {
        let protocol = study.protocol_section;
        let ident = protocol.identification_module;
        let status = protocol.status_module;

        // Blank titles fall through to the next candidate
        let title = [ident.official_title, ident.brief_title]
            .into_iter()
            .flatten()
            .find(|t| !t.trim().is_empty())
            .unwrap_or_default();

        let interventions = protocol
            .arms_interventions_module
            .interventions
            .into_iter()
            .filter_map(|inv| inv.name)
            .collect();

        let location = protocol
            .contacts_locations_module
            .locations
            .into_iter()
            .next()
            .map(|site| Location {
                city: site.city,
                state: site.state,
                country: site.country,
            })
            .unwrap_or_default();

        let link = study_link(&ident.nct_id);

        TrialRecord {
            nct_id: ident.nct_id,
            title,
            interventions,
            conditions: protocol.conditions_module.conditions,
            phases: protocol.design_module.phases,
            status: status.overall_status,
            sponsor: protocol.sponsor_collaborators_module.lead_sponsor.name,
            start_date: status.start_date_struct.date,
            first_posted: status.study_first_post_date_struct.date,
            last_updated: status.last_update_post_date_struct.date,
            location,
            link,
        }
    }
}

/// Parse a `/studies` search response body.
pub fn parse_studies(body: &str, url: &str) -> Result<Vec<TrialRecord>> {
    let response: StudiesResponse =
        serde_json::from_str(body).map_err(|e| ExplorerError::decode(url, e))?;
    debug!(target: TARGET_WEB_REQUEST, "Decoded {} studies from {}", response.studies.len(), url);
    Ok(response.studies.into_iter().map(TrialRecord::from).collect())
}

/// Parse a single `/studies/{nct_id}` response body.
pub fn parse_study(body: &str, url: &str) -> Result<TrialRecord> {
    let study: Study = serde_json::from_str(body).map_err(|e| ExplorerError::decode(url, e))?;
    Ok(TrialRecord::from(study))
}

/// Newest update first; trials without a usable date go last, otherwise
/// upstream order is kept.
pub fn sort_by_last_updated(trials: &mut [TrialRecord]) {
    trials.sort_by(|a, b| match (a.last_updated_date(), b.last_updated_date()) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const URL: &str = "https://clinicaltrials.gov/api/v2/studies";

    fn full_study() -> serde_json::Value {
        json!({
            "protocolSection": {
                "identificationModule": {
                    "nctId": "NCT04368728",
                    "briefTitle": "Vaccine Study",
                    "officialTitle": "A Phase 1/2/3 Study to Evaluate an RNA Vaccine"
                },
                "statusModule": {
                    "overallStatus": "COMPLETED",
                    "startDateStruct": { "date": "2020-04-29" },
                    "studyFirstPostDateStruct": { "date": "2020-04-30" },
                    "lastUpdatePostDateStruct": { "date": "2024-02-09" }
                },
                "sponsorCollaboratorsModule": { "leadSponsor": { "name": "BioNTech SE" } },
                "conditionsModule": { "conditions": ["SARS-CoV-2 Infection", "COVID-19"] },
                "designModule": { "phases": ["PHASE2", "PHASE3"] },
                "armsInterventionsModule": {
                    "interventions": [
                        { "type": "BIOLOGICAL", "name": "BNT162b2" },
                        { "type": "OTHER" },
                        { "type": "OTHER", "name": "Placebo" }
                    ]
                },
                "contactsLocationsModule": {
                    "locations": [
                        { "city": "Birmingham", "state": "Alabama", "country": "United States" },
                        { "city": "Berlin", "country": "Germany" }
                    ]
                }
            }
        })
    }

    #[test]
    fn test_full_study_conversion() {
        let body = json!({ "studies": [full_study()] }).to_string();
        let trials = parse_studies(&body, URL).unwrap();
        assert_eq!(trials.len(), 1);

        let trial = &trials[0];
        assert_eq!(trial.nct_id, "NCT04368728");
        assert_eq!(trial.title, "A Phase 1/2/3 Study to Evaluate an RNA Vaccine");
        assert_eq!(trial.intervention_summary(), "BNT162b2, Placebo");
        assert_eq!(trial.condition_summary(), "SARS-CoV-2 Infection, COVID-19");
        assert_eq!(trial.phase_summary(), "PHASE2, PHASE3");
        assert_eq!(trial.status, "COMPLETED");
        assert_eq!(trial.sponsor, "BioNTech SE");
        assert_eq!(trial.start_date, "2020-04-29");
        assert_eq!(trial.first_posted, "2020-04-30");
        assert_eq!(trial.last_updated, "2024-02-09");
        assert_eq!(trial.location.display(), "Birmingham, Alabama, United States");
        assert_eq!(trial.link, "https://clinicaltrials.gov/study/NCT04368728");
    }

    #[test]
    fn test_title_falls_back_to_brief_title() {
        let body = json!({
            "protocolSection": {
                "identificationModule": {
                    "nctId": "NCT00000001",
                    "officialTitle": "",
                    "briefTitle": "Short Title"
                }
            }
        })
        .to_string();
        let trial = parse_study(&body, URL).unwrap();
        assert_eq!(trial.title, "Short Title");
    }

    #[test]
    fn test_missing_sections_become_empty() {
        let body = json!({
            "studies": [
                { "protocolSection": { "identificationModule": { "nctId": "NCT00000002" } } },
                { "protocolSection": null },
                {}
            ]
        })
        .to_string();
        let trials = parse_studies(&body, URL).unwrap();
        assert_eq!(trials.len(), 3);

        let trial = &trials[0];
        assert_eq!(trial.title, "");
        assert!(trial.interventions.is_empty());
        assert!(trial.conditions.is_empty());
        assert_eq!(trial.status, "");
        assert!(trial.location.is_empty());
        assert_eq!(trials[2].nct_id, "");
    }

    #[test]
    fn test_null_lists_become_empty() {
        let body = json!({
            "protocolSection": {
                "identificationModule": { "nctId": "NCT00000003" },
                "conditionsModule": { "conditions": null },
                "contactsLocationsModule": { "locations": null }
            }
        })
        .to_string();
        let trial = parse_study(&body, URL).unwrap();
        assert!(trial.conditions.is_empty());
        assert!(trial.location.is_empty());
    }

    #[test]
    fn test_empty_response() {
        assert!(parse_studies("{}", URL).unwrap().is_empty());
        assert!(parse_studies(r#"{"studies": []}"#, URL).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_body() {
        let err = parse_studies("<html>busy</html>", URL).unwrap_err();
        assert!(matches!(err, ExplorerError::Decode { .. }));
    }

    fn trial(nct_id: &str, last_updated: &str) -> TrialRecord {
        TrialRecord {
            nct_id: nct_id.to_string(),
            title: String::new(),
            interventions: vec![],
            conditions: vec![],
            phases: vec![],
            status: String::new(),
            sponsor: String::new(),
            start_date: String::new(),
            first_posted: String::new(),
            last_updated: last_updated.to_string(),
            location: Location::default(),
            link: study_link(nct_id),
        }
    }

    #[test]
    fn test_sort_by_last_updated() {
        let mut trials = vec![
            trial("NCT00000001", "2021-05-01"),
            trial("NCT00000002", ""),
            trial("NCT00000003", "2024"),
            trial("NCT00000004", "2024-06"),
            trial("NCT00000005", "unknown"),
            trial("NCT00000006", "2023-12-31"),
        ];
        sort_by_last_updated(&mut trials);
        let order: Vec<&str> = trials.iter().map(|t| t.nct_id.as_str()).collect();
        assert_eq!(
            order,
            vec![
                "NCT00000004",
                "NCT00000003",
                "NCT00000006",
                "NCT00000001",
                "NCT00000002",
                "NCT00000005",
            ]
        );
    }

    #[test]
    fn test_label_truncation() {
        let mut record = trial("NCT00000001", "");
        record.title = "x".repeat(65);
        assert_eq!(record.label(), format!("NCT00000001 — {}", "x".repeat(65)));

        record.title = "y".repeat(66);
        assert_eq!(record.label(), format!("NCT00000001 — {}…", "y".repeat(65)));
    }

    #[test]
    fn test_location_display_skips_empty_parts() {
        let location = Location {
            city: "Boston".to_string(),
            state: String::new(),
            country: "United States".to_string(),
        };
        assert_eq!(location.display(), "Boston, United States");
        assert_eq!(Location::default().display(), "");
    }
}
