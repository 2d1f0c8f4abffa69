use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use serde_json::json;
use std::process;
use tracing::error;

use trialscope::environment::Config;
use trialscope::explorer::{Explorer, TrialDetail, TrialView, DEFAULT_DISPLAY_COUNT};
use trialscope::logging;
use trialscope::render::{self, LOAD_FAILED, NO_TRIALS};

#[derive(Parser)]
#[clap(
    name = "trial_search",
    about = "Search clinical trials and show related news"
)]
struct Cli {
    /// Drug, disease, company or medical term (blank searches "phase")
    query: Vec<String>,

    /// Number of trials to list (10-100)
    #[clap(short, long, default_value_t = DEFAULT_DISPLAY_COUNT)]
    limit: usize,

    /// NCT id of the trial to show; defaults to the first result
    #[clap(short, long)]
    select: Option<String>,

    /// Skip the related news lookup
    #[clap(long)]
    no_news: bool,

    /// Print JSON instead of formatted text
    #[clap(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::configure_cli_logging();
    let cli = Cli::parse();

    let config = Config::from_env()?;
    let explorer = Explorer::from_config(&config)?;

    let results = match explorer.search(&cli.query.join(" "), cli.limit).await {
        Ok(results) => results,
        Err(err) => {
            error!("Trial search failed: {}", err);
            eprintln!("{}", LOAD_FAILED.bright_red());
            process::exit(1);
        }
    };

    if results.is_empty() {
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&json!({ "results": results }))?);
        } else {
            println!("{}", NO_TRIALS.bright_yellow());
        }
        return Ok(());
    }

    let selected = match results.select(cli.select.as_deref()) {
        Some(trial) => trial,
        None => {
            eprintln!(
                "{}",
                format!(
                    "Trial {} is not among the results for {:?}.",
                    cli.select.as_deref().unwrap_or_default(),
                    results.query
                )
                .bright_red()
            );
            process::exit(1);
        }
    };

    let view = if cli.no_news {
        TrialView {
            detail: TrialDetail::from(selected),
            news: Vec::new(),
        }
    } else {
        explorer.view_of(selected).await
    };

    if cli.json {
        let output = json!({ "results": results, "selected": view });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{}  {}\n",
        "TRIALS".bright_blue(),
        results.query.bright_yellow()
    );
    render::results_table(&results, Some(selected)).printstd();
    println!("\n{}", "═".repeat(80).bright_blue());
    print!("{}", render::render_detail(&view.detail));
    if !cli.no_news {
        println!("{}", "═".repeat(80).bright_blue());
        print!("{}", render::render_news(&view.news));
    }

    Ok(())
}
