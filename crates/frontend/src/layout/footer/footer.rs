use crate::dashboards::d401_market_trend::api;
use crate::shared::number_format::{format_compact, format_number_int};
use contracts::dashboards::d401_market_trend::FooterStats;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

#[derive(Clone, Debug, PartialEq)]
enum ServerStatus {
    Online(FooterStats),
    Offline,
    Checking,
}

impl ServerStatus {
    fn display_text(&self) -> &'static str {
        match self {
            ServerStatus::Online(_) => "服務: 連線中",
            ServerStatus::Offline => "服務: 離線",
            ServerStatus::Checking => "服務: 檢查中...",
        }
    }

    fn css_class(&self) -> &'static str {
        match self {
            ServerStatus::Online(_) => "status-online",
            ServerStatus::Offline => "status-offline",
            ServerStatus::Checking => "status-checking",
        }
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    let status = RwSignal::new(ServerStatus::Checking);

    let check_server = move || {
        status.set(ServerStatus::Checking);

        spawn_local(async move {
            match api::get_footer_stats().await {
                Ok(stats) => status.set(ServerStatus::Online(stats)),
                Err(e) => {
                    log::warn!("Reporting service unreachable: {}", e);
                    status.set(ServerStatus::Offline);
                }
            }
        });
    };

    // Check once on mount
    Effect::new(move |_| {
        check_server();
    });

    let stats_view = move || match status.get() {
        ServerStatus::Online(stats) => Some(view! {
            <span class="status-item">{format!("上映中 {} 部", format_number_int(f64::from(stats.active_movie_count)))}</span>
            <span class="status-item">{format!("本週票房 ${}", format_compact(stats.weekly_total_revenue))}</span>
            <span class="status-item">{format!("本月新片 {} 部", stats.monthly_new_releases)}</span>
        }),
        _ => None,
    };

    view! {
        <footer data-zone="footer" class="status-bar">
            <span class=move || status.with(|s| s.css_class())>
                {move || status.with(|s| s.display_text())}
            </span>
            {stats_view}
        </footer>
    }
}
