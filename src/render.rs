//! Terminal rendering for the `trial_search` binary.

use colored::Colorize;
use prettytable::{Cell, Row, Table};

use crate::explorer::{SearchResults, TrialDetail};
use crate::news::NewsItem;
use crate::trials::TrialRecord;
use crate::util::or_dash;

pub const NO_TRIALS: &str = "No trials found. Try a different search.";
pub const NO_NEWS: &str = "No recent news found.";
pub const LOAD_FAILED: &str = "Unable to load trial data.";

/// Result list, one row per trial. The selected trial is marked with `>`.
pub fn results_table(results: &SearchResults, selected: Option<&TrialRecord>) -> Table {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new(""),
        Cell::new("Trial"),
        Cell::new("Phase"),
        Cell::new("Status"),
        Cell::new("Last Updated"),
    ]));

    for trial in &results.trials {
        let marker = match selected {
            Some(s) if s.nct_id == trial.nct_id => ">",
            _ => "",
        };
        table.add_row(Row::new(vec![
            Cell::new(marker),
            Cell::new(&trial.label()),
            Cell::new(or_dash(&trial.phase_summary())),
            Cell::new(or_dash(&trial.status)),
            Cell::new(or_dash(&trial.last_updated)),
        ]));
    }

    table
}

pub fn render_detail(detail: &TrialDetail) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", detail.title.bold()));
    out.push_str(&format!("{}\n\n", detail.nct_id.dimmed()));

    let field = |name: &str, value: &str| format!("{}: {}\n", name.bright_blue(), value);
    out.push_str(&field("Drug / Intervention", &detail.interventions));
    out.push_str(&field("Condition(s)", &detail.conditions));
    out.push_str(&field("Phase", &detail.phase));
    out.push_str(&field("Status", &detail.status));
    out.push_str(&field("Sponsor", &detail.sponsor));
    out.push_str(&format!("{}\n", "─".repeat(60).dimmed()));
    out.push_str(&field("Start Date", &detail.start_date));
    out.push_str(&field("Last Updated", &detail.last_updated));
    if let Some(location) = &detail.location {
        out.push_str(&field("Location", location));
    }
    out.push_str(&format!("\nView full study: {}\n", detail.link.underline()));
    out
}

pub fn render_news(items: &[NewsItem]) -> String {
    let mut out = format!("{}\n", "Related Articles".bold());
    if items.is_empty() {
        out.push_str(NO_NEWS);
        out.push('\n');
        return out;
    }

    for item in items {
        out.push_str(&format!("\n{}\n", item.title.bright_white().bold()));
        out.push_str(&format!("{}\n", item.link.underline()));
        if let Some(published) = &item.published {
            out.push_str(&format!("{}\n", published.dimmed()));
        }
        if !item.summary.is_empty() {
            out.push_str(&format!("{}...\n", item.summary));
        }
    }
    out
}
