use crate::shared::api_utils::{api_url, fetch_json};
use contracts::dashboards::d401_market_trend::{FooterStats, MarketStat};
use contracts::shared::analytics::market::with_market_growth;

/// Weekly whole-market totals, oldest first, growth recomputed locally
pub async fn get_market_stats() -> Result<Vec<MarketStat>, String> {
    let stats: Vec<MarketStat> = fetch_json(&api_url("/market-stats")).await?;
    Ok(with_market_growth(stats))
}

/// Snapshot for the status bar
pub async fn get_footer_stats() -> Result<FooterStats, String> {
    fetch_json(&api_url("/stats")).await
}
