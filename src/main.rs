use anyhow::Result;
use tracing::info;

use trialscope::environment::Config;
use trialscope::explorer::Explorer;
use trialscope::logging;
use trialscope::web;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    logging::configure_logging(&config.log_dir);

    info!(
        "Starting trialscope {} (registry {}, news {})",
        env!("CARGO_PKG_VERSION"),
        config.ctgov_api_url,
        config.news_rss_url
    );

    let explorer = Explorer::from_config(&config)?;
    web::app_api_loop(&config, explorer).await
}
