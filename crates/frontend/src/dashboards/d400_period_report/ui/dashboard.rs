use crate::dashboards::d400_period_report::api;
use crate::dashboards::d401_market_trend::api as market_api;
use crate::shared::components::{CardFormat, PageHeader, PaginationControls, Segmented, StatCard};
use crate::shared::config::use_config;
use crate::shared::number_format::{format_money, format_tickets};
use chrono::{Datelike, Utc};
use contracts::dashboards::d400_period_report::{
    PeriodReportRequest, PeriodStatsResponse, PeriodType, RankingEntry,
};
use contracts::shared::analytics::market::available_years;
use contracts::shared::analytics::{LoadState, PageCursor, RequestSequence, WeekDateResolver};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

/// Ranking table rows of the current page with their display rank
fn page_rows(
    cursor: &PageCursor<PeriodReportRequest>,
    rankings: &[RankingEntry],
) -> Vec<(usize, RankingEntry)> {
    cursor
        .slice(rankings)
        .iter()
        .enumerate()
        .map(|(i, entry)| (entry.display_rank(cursor.display_rank(i)), entry.clone()))
        .collect()
}

/// Period report: summary cards plus a paginated box-office ranking
#[component]
pub fn PeriodReportDashboard() -> impl IntoView {
    let config = use_config();
    let now = Utc::now().date_naive();

    let period_type = RwSignal::new(PeriodType::Month);
    let year = RwSignal::new(now.year());
    let month = RwSignal::new(now.month());
    let week = RwSignal::new(now.iso_week().week());
    let years = RwSignal::new(vec![now.year()]);

    let report = RwSignal::new(LoadState::<PeriodStatsResponse>::Idle);
    let sequence = StoredValue::new(RequestSequence::new());
    let cursor = RwSignal::new(
        PageCursor::<PeriodReportRequest>::new(config.get_untracked().report.page_size)
            .unwrap_or_default(),
    );

    let request = Memo::new(move |_| match period_type.get() {
        PeriodType::Week => PeriodReportRequest::week(year.get(), week.get()),
        PeriodType::Month => PeriodReportRequest::month(year.get(), month.get()),
        PeriodType::Year => PeriodReportRequest::year(year.get()),
        PeriodType::AllTime => PeriodReportRequest::all_time(year.get()),
    });

    let month_weeks = Memo::new(move |_| {
        WeekDateResolver::weeks_in_month(year.get(), month.get()).unwrap_or_default()
    });

    // Keep the picked week inside the picked month
    Effect::new(move |_| {
        let weeks = month_weeks.get();
        if !weeks.contains(&week.get_untracked()) {
            if let Some(first) = weeks.first() {
                week.set(*first);
            }
        }
    });

    // Year options come from the market series
    Effect::new(move |_| {
        spawn_local(async move {
            match market_api::get_market_stats().await {
                Ok(stats) => {
                    let found = available_years(&stats);
                    if !found.is_empty() {
                        years.set(found);
                    }
                }
                Err(e) => log::warn!("Failed to load report years: {}", e),
            }
        });
    });

    Effect::new(move |_| {
        let req = request.get();
        let Some(ticket) = sequence.try_update_value(|s| s.issue()) else {
            return;
        };
        report.set(LoadState::Loading);

        spawn_local(async move {
            let result = api::get_period_report(&req).await;
            let Some(result) = sequence.with_value(|s| s.accept(ticket, result)) else {
                return;
            };
            if let Err(e) = &result {
                log::error!("Failed to load {} report: {}", req.label(), e);
            }
            let state = LoadState::from_result(result, |r| r.rankings.is_empty());
            let total = state.data().map(|r| r.rankings.len()).unwrap_or(0);
            cursor.update(|c| {
                c.sync(&req, total);
            });
            report.set(state);
        });
    });

    let summary = move || report.with(|r| r.data().map(|d| d.summary.clone()));
    let rows = move || {
        report.with(|r| {
            r.data()
                .map(|d| cursor.with(|c| page_rows(c, &d.rankings)))
                .unwrap_or_default()
        })
    };

    let subtitle = Signal::derive(move || {
        let req = request.get();
        let range = summary()
            .map(|s| (s.start_date, s.end_date))
            .or_else(|| req.date_range());
        Some(match range {
            Some((start, end)) => format!(
                "{} · {} ~ {}",
                req.label(),
                start.format("%Y/%m/%d"),
                end.format("%Y/%m/%d")
            ),
            None => req.label(),
        })
    });

    view! {
        <div id="d400_period_report--dashboard" class="d400-dashboard">
            <PageHeader title="票房報表" subtitle=subtitle icon_name="calendar">
                <Segmented
                    options={PeriodType::all().into_iter().map(|p| (p, p.label())).collect::<Vec<_>>()}
                    value=period_type
                    on_change=move |p| period_type.set(p)
                />
                <Show when=move || period_type.get() != PeriodType::AllTime>
                    <select
                        class="period-select"
                        prop:value=move || year.get().to_string()
                        on:change=move |ev| {
                            if let Ok(y) = event_target_value(&ev).parse() {
                                year.set(y);
                            }
                        }
                    >
                        {move || years.get().into_iter().map(|y| view! {
                            <option value=y.to_string() selected=move || year.get() == y>{format!("{}年", y)}</option>
                        }).collect_view()}
                    </select>
                </Show>
                <Show when=move || matches!(period_type.get(), PeriodType::Week | PeriodType::Month)>
                    <select
                        class="period-select"
                        prop:value=move || month.get().to_string()
                        on:change=move |ev| {
                            if let Ok(m) = event_target_value(&ev).parse() {
                                month.set(m);
                            }
                        }
                    >
                        {(1..=12u32).map(|m| view! {
                            <option value=m.to_string() selected=move || month.get() == m>{format!("{}月", m)}</option>
                        }).collect_view()}
                    </select>
                </Show>
                <Show when=move || period_type.get() == PeriodType::Week>
                    <select
                        class="period-select"
                        prop:value=move || week.get().to_string()
                        on:change=move |ev| {
                            if let Ok(w) = event_target_value(&ev).parse() {
                                week.set(w);
                            }
                        }
                    >
                        {move || month_weeks.get().into_iter().map(|w| {
                            let label = WeekDateResolver::resolve(year.get_untracked(), i64::from(w))
                                .full_label()
                                .to_string();
                            view! {
                                <option value=w.to_string() selected=move || week.get() == w>
                                    {format!("第{}週 ({})", w, label)}
                                </option>
                            }
                        }).collect_view()}
                    </select>
                </Show>
            </PageHeader>

            <div class="stat-grid">
                <StatCard
                    label="區間總票房"
                    icon_name="dollar"
                    value=Signal::derive(move || summary().map(|s| s.total_revenue))
                    format=CardFormat::Money
                    growth=Signal::derive(move || summary().and_then(|s| s.growth_rate))
                />
                <StatCard
                    label="上映電影數"
                    icon_name="film"
                    value=Signal::derive(move || summary().map(|s| f64::from(s.movie_count)))
                    format=CardFormat::Integer
                />
            </div>

            {move || match report.get() {
                LoadState::Idle | LoadState::Ready(_) => view! { <></> }.into_any(),
                LoadState::Loading => view! {
                    <div class="d400-loading"><span>"載入報表中..."</span></div>
                }.into_any(),
                LoadState::Empty => view! {
                    <div class="d400-empty">"此期間沒有票房資料"</div>
                }.into_any(),
                LoadState::Unavailable(err) => view! {
                    <div class="d400-error">
                        <strong>"⚠ 錯誤: "</strong>
                        {err}
                    </div>
                }.into_any(),
            }}

            <Show when=move || report.with(|r| r.data().is_some())>
                <table class="data-table ranking-table">
                    <thead>
                        <tr>
                            <th>"排名"</th>
                            <th>"片名"</th>
                            <th class="num">"票房"</th>
                            <th class="num">"票數"</th>
                            <th>"上映日期"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || rows().into_iter().map(|(rank, entry)| {
                            let release = entry
                                .release_date
                                .map(|d| d.format("%Y-%m-%d").to_string())
                                .unwrap_or_else(|| "—".to_string());
                            let entry_name = entry.name.clone();
                            let name = match entry.id.filter(|_| entry.is_clickable()) {
                                Some(id) => view! {
                                    <A href=format!("/movies/{}", id)>{entry_name}</A>
                                }.into_any(),
                                None => view! { <span>{entry.name.clone()}</span> }.into_any(),
                            };
                            view! {
                                <tr class:clickable=entry.is_clickable()>
                                    <td>{rank}</td>
                                    <td>{name}</td>
                                    <td class="num">{format_money(entry.revenue)}</td>
                                    <td class="num">{format_tickets(entry.tickets)}</td>
                                    <td>{release}</td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                </table>
                <PaginationControls
                    current_page=Signal::derive(move || cursor.with(|c| c.page()))
                    total_pages=Signal::derive(move || cursor.with(|c| c.total_pages()))
                    total_count=Signal::derive(move || cursor.with(|c| c.total_items()))
                    page_size=Signal::derive(move || cursor.with(|c| c.page_size()))
                    on_page_change=Callback::new(move |page| {
                        cursor.update(|c| {
                            if let Err(e) = c.go_to(page) {
                                log::warn!("{}", e);
                            }
                        })
                    })
                    on_page_size_change=Callback::new(move |size| {
                        cursor.update(|c| {
                            if let Err(e) = c.set_page_size(size) {
                                log::warn!("{}", e);
                            }
                        })
                    })
                />
            </Show>
        </div>
    }
}
