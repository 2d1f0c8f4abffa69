//! The request-scoped explorer pipeline: keyword in, trial list out, then
//! detail and related news for one selected trial.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::environment::Config;
use crate::error::Result;
use crate::news::{NewsClient, NewsItem};
use crate::trials::{sort_by_last_updated, TrialRecord, TrialsClient};
use crate::util::or_dash;

/// Query used when the keyword is blank.
pub const DEFAULT_QUERY: &str = "phase";

pub const DEFAULT_DISPLAY_COUNT: usize = 25;
pub const MIN_DISPLAY_COUNT: usize = 10;
pub const MAX_DISPLAY_COUNT: usize = 100;

pub fn resolve_query(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        DEFAULT_QUERY.to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn clamp_display_count(count: usize) -> usize {
    count.clamp(MIN_DISPLAY_COUNT, MAX_DISPLAY_COUNT)
}

/// Trials returned for one search, newest update first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    pub query: String,
    pub trials: Vec<TrialRecord>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }

    /// The trial with the given NCT id, or the first trial when none is given.
    pub fn select(&self, nct_id: Option<&str>) -> Option<&TrialRecord> {
        match nct_id {
            Some(id) => {
                let id = id.trim();
                self.trials
                    .iter()
                    .find(|t| t.nct_id.eq_ignore_ascii_case(id))
            }
            None => self.trials.first(),
        }
    }
}

/// Display-ready fields of one trial. Blank values read `"—"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialDetail {
    pub nct_id: String,
    pub title: String,
    pub interventions: String,
    pub conditions: String,
    pub phase: String,
    pub status: String,
    pub sponsor: String,
    pub start_date: String,
    pub last_updated: String,
    /// Omitted when the trial lists no site.
    pub location: Option<String>,
    pub link: String,
}

impl From<&TrialRecord> for TrialDetail {
    fn from(trial: &TrialRecord) -> Self {
        let location = trial.location.display();
        Self {
            nct_id: trial.nct_id.clone(),
            title: trial.title.clone(),
            interventions: or_dash(&trial.intervention_summary()).to_string(),
            conditions: or_dash(&trial.condition_summary()).to_string(),
            phase: or_dash(&trial.phase_summary()).to_string(),
            status: or_dash(&trial.status).to_string(),
            sponsor: or_dash(&trial.sponsor).to_string(),
            start_date: or_dash(&trial.start_date).to_string(),
            last_updated: or_dash(&trial.last_updated).to_string(),
            location: (!location.is_empty()).then_some(location),
            link: trial.link.clone(),
        }
    }
}

/// A selected trial together with its related news.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialView {
    pub detail: TrialDetail,
    pub news: Vec<NewsItem>,
}

#[derive(Clone, Debug)]
pub struct Explorer {
    trials: TrialsClient,
    news: NewsClient,
    fetch_limit: usize,
}

impl Explorer {
    pub fn new(trials: TrialsClient, news: NewsClient, fetch_limit: usize) -> Self {
        Self {
            trials,
            news,
            fetch_limit,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            TrialsClient::from_config(config)?,
            NewsClient::from_config(config)?,
            config.fetch_limit,
        ))
    }

    /// Search the registry and keep the `display` most recently updated trials.
    pub async fn search(&self, input: &str, display: usize) -> Result<SearchResults> {
        let query = resolve_query(input);
        let display = clamp_display_count(display);

        let mut trials = self.trials.search(&query, self.fetch_limit).await?;
        sort_by_last_updated(&mut trials);
        trials.truncate(display);

        info!("Search {:?} returned {} trials", query, trials.len());
        Ok(SearchResults { query, trials })
    }

    pub async fn trial(&self, nct_id: &str) -> Result<TrialRecord> {
        self.trials.fetch(nct_id).await
    }

    /// News matched on the trial's intervention and condition terms.
    pub async fn related_news(&self, trial: &TrialRecord) -> Vec<NewsItem> {
        debug!("Loading related news for {}", trial.nct_id);
        self.news
            .related(&trial.intervention_summary(), &trial.condition_summary())
            .await
    }

    /// Detail and news for one trial, fetched by NCT id.
    pub async fn trial_view(&self, nct_id: &str) -> Result<TrialView> {
        let trial = self.trials.fetch(nct_id).await?;
        Ok(self.view_of(&trial).await)
    }

    /// Detail and news for a trial already in hand.
    pub async fn view_of(&self, trial: &TrialRecord) -> TrialView {
        TrialView {
            detail: TrialDetail::from(trial),
            news: self.related_news(trial).await,
        }
    }
}
