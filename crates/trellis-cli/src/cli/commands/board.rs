//! Interactive board command.

use anyhow::Result;
use tracing::info;
use trellis_core::config::Config;

pub async fn run(config: &Config, token: Option<&str>) -> Result<()> {
    let token = token
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .or_else(|| config.profile.token());
    info!(
        authenticated = token.is_some(),
        api_base = %config.profile.api_base,
        "starting board"
    );
    trellis_tui::run_board(config, token).await
}
