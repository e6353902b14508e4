//! Runtime configuration: `/config.toml` next to the bundle, embedded defaults otherwise.

use anyhow::{anyhow, bail, Context};
use contracts::shared::config::{AnalyticsConfig, DEFAULT_CONFIG};
use gloo_net::http::Request;
use leptos::prelude::*;
use leptos::task::spawn_local;

const CONFIG_PATH: &str = "/config.toml";

pub async fn load_config() -> anyhow::Result<AnalyticsConfig> {
    let response = Request::get(CONFIG_PATH)
        .send()
        .await
        .map_err(|e| anyhow!("Request failed: {}", e))?;

    if !response.ok() {
        bail!("HTTP error: {}", response.status());
    }

    let text = response
        .text()
        .await
        .context("Failed to read config body")?;
    AnalyticsConfig::from_toml_str(&text).context("Invalid config.toml")
}

fn embedded_config() -> AnalyticsConfig {
    AnalyticsConfig::from_toml_str(DEFAULT_CONFIG).unwrap_or_default()
}

/// Put the config signal into context and refresh it from the server once.
///
/// The returned flag turns true when the refresh has settled either way.
pub fn provide_config() -> RwSignal<bool> {
    let config = RwSignal::new(embedded_config());
    let settled = RwSignal::new(false);
    provide_context(config);

    spawn_local(async move {
        match load_config().await {
            Ok(loaded) => {
                log::info!("Loaded {}", CONFIG_PATH);
                config.set(loaded);
            }
            Err(e) => log::warn!("Using embedded config: {:#}", e),
        }
        settled.set(true);
    });

    settled
}

pub fn use_config() -> RwSignal<AnalyticsConfig> {
    use_context::<RwSignal<AnalyticsConfig>>().unwrap_or_else(|| RwSignal::new(embedded_config()))
}
