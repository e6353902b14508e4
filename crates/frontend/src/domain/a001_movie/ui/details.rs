use crate::domain::a001_movie::api;
use crate::shared::chart_frame::{ChartFrame, ChartPayload};
use crate::shared::components::{CardFormat, PageHeader, Segmented, StatCard};
use crate::shared::number_format::{format_money, format_tickets};
use contracts::domain::a001_movie::MovieDetail;
use contracts::shared::analytics::cumulative::DiscrepancyKind;
use contracts::shared::analytics::{
    accumulate, align_view, run_summary, series_labels, AccumulatedSeries, AlignMode, LoadState,
    MovieRunSummary, RequestSequence, SeriesView, WeekDateResolver,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

/// Everything the page derives from one detail response
#[derive(Debug, Clone, PartialEq)]
struct MovieView {
    detail: MovieDetail,
    accumulated: AccumulatedSeries,
    summary: MovieRunSummary,
}

impl MovieView {
    fn new(detail: MovieDetail) -> Self {
        let accumulated = accumulate(&detail.to_series());
        let summary = run_summary(&accumulated);
        Self {
            detail,
            accumulated,
            summary,
        }
    }

    fn chart(&self, view: SeriesView) -> ChartPayload {
        let series = [self.detail.to_series()];
        let points = align_view(&series, AlignMode::Relative, view);
        let labels = self
            .accumulated
            .points
            .iter()
            .map(|p| {
                WeekDateResolver::resolve(p.year, i64::from(p.week))
                    .short_label()
                    .to_string()
            })
            .collect();
        ChartPayload::new(&points, series_labels(&series), "week")
            .with_x_labels(labels)
            .with_y_label("票房")
    }
}

#[component]
pub fn MovieDetails() -> impl IntoView {
    let params = use_params_map();
    let movie_id = Memo::new(move |_| params.read().get("id").and_then(|s| s.parse::<i64>().ok()));

    let state = RwSignal::new(LoadState::<MovieView>::Idle);
    let chart_view = RwSignal::new(SeriesView::Weekly);
    let sequence = StoredValue::new(RequestSequence::new());

    Effect::new(move |_| {
        let Some(id) = movie_id.get() else {
            state.set(LoadState::Unavailable("無效的電影編號".to_string()));
            return;
        };
        let Some(ticket) = sequence.try_update_value(|s| s.issue()) else {
            return;
        };
        state.set(LoadState::Loading);

        spawn_local(async move {
            let result = api::get_movie_detail(id).await;
            let Some(result) = sequence.with_value(|s| s.accept(ticket, result)) else {
                return;
            };
            match result {
                Ok(detail) => {
                    let view = MovieView::new(detail);
                    for d in &view.accumulated.discrepancies {
                        log::debug!("Movie {} week #{}: {:?}", id, d.axis_key, d.kind);
                    }
                    state.set(LoadState::Ready(view));
                }
                Err(e) => {
                    log::error!("Failed to load movie {}: {}", id, e);
                    state.set(LoadState::Unavailable(e));
                }
            }
        });
    });

    let movie = move || state.with(|s| s.data().cloned());
    let summary = move || movie().map(|m| m.summary);
    let chart = Signal::derive(move || {
        let view = chart_view.get();
        state.with(|s| s.data().map(|m| m.chart(view)))
    });

    view! {
        <div id="a001_movie--details" class="movie-details">
            {move || match state.get() {
                LoadState::Idle | LoadState::Loading => view! {
                    <div class="loading">"載入中..."</div>
                }.into_any(),
                LoadState::Empty | LoadState::Unavailable(_) => {
                    let message = state
                        .with(|s| s.error().map(str::to_string))
                        .unwrap_or_else(|| "找不到電影資訊".to_string());
                    view! {
                        <div class="error-panel">
                            <div>{message}</div>
                            <A href="/">"← 返回首頁"</A>
                        </div>
                    }.into_any()
                }
                LoadState::Ready(_) => view! { <></> }.into_any(),
            }}

            <Show when=move || movie().is_some()>
                {move || movie().map(|m| {
                    let meta = m.detail.metadata.clone();
                    let release = meta
                        .release_date
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| "N/A".to_string());
                    let status = if m.summary.has_recent_revenue { "上映中" } else { "已下檔" };
                    view! {
                        <PageHeader title=meta.name.clone() icon_name="film".to_string()>
                            <span class="movie-status">{status}</span>
                        </PageHeader>
                        <div class="movie-meta">
                            <div><span class="movie-meta__label">"上映日期"</span><p>{release}</p></div>
                            <div><span class="movie-meta__label">"出品國家"</span><p>{meta.display_country().to_string()}</p></div>
                            <div><span class="movie-meta__label">"發行商"</span><p>{meta.distributor.clone().unwrap_or_else(|| "N/A".to_string())}</p></div>
                        </div>
                    }
                })}

                <div class="stat-grid">
                    <StatCard
                        label="累計票房"
                        icon_name="dollar"
                        value=Signal::derive(move || summary().map(|s| s.total_revenue))
                        format=CardFormat::Money
                    />
                    <StatCard
                        label="累計票數"
                        icon_name="layers"
                        value=Signal::derive(move || summary().and_then(|s| s.total_tickets))
                        format=CardFormat::Integer
                    />
                    <StatCard
                        label="上映週數"
                        icon_name="calendar"
                        value=Signal::derive(move || summary().map(|s| s.weeks_in_release as f64))
                        format=CardFormat::Integer
                    />
                    <StatCard
                        label="單週最高"
                        icon_name="trending-up"
                        value=Signal::derive(move || summary().map(|s| s.peak_revenue))
                        format=CardFormat::Money
                        subtitle=Signal::derive(move || {
                            summary().and_then(|s| s.peak_week).map(|w| format!("上映第 {} 週", w))
                        })
                    />
                </div>

                <div class="chart-panel">
                    <Segmented
                        options=vec![(SeriesView::Weekly, "週票房"), (SeriesView::Cumulative, "累計票房")]
                        value=chart_view
                        on_change=move |v| chart_view.set(v)
                    />
                    <ChartFrame payload=chart height=360 />
                </div>

                <DiscrepancyNotice state=state />

                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"週次"</th>
                            <th>"期間"</th>
                            <th class="num">"週票房"</th>
                            <th class="num">"累計票房"</th>
                            <th class="num">"累計票數"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || movie().map(|m| {
                            m.accumulated.points.iter().map(|p| {
                                let week = WeekDateResolver::resolve(p.year, i64::from(p.week));
                                view! {
                                    <tr>
                                        <td>{format!("第 {} 週", p.axis_key)}</td>
                                        <td>{week.full_label().to_string()}</td>
                                        <td class="num">{format_money(p.weekly_revenue)}</td>
                                        <td class="num">{format_money(p.cumulative_revenue)}</td>
                                        <td class="num">{format_tickets(p.cumulative_tickets)}</td>
                                    </tr>
                                }
                            }).collect_view()
                        })}
                    </tbody>
                </table>
            </Show>
        </div>
    }
}

/// Weeks where upstream totals disagree with the recomputed ones
#[component]
fn DiscrepancyNotice(state: RwSignal<LoadState<MovieView>>) -> impl IntoView {
    let discrepancies = move || {
        state.with(|s| {
            s.data()
                .map(|m| m.accumulated.discrepancies.clone())
                .unwrap_or_default()
        })
    };

    view! {
        <Show when=move || !discrepancies().is_empty()>
            <details class="discrepancy-notice">
                <summary>{move || format!("資料校正 {} 筆", discrepancies().len())}</summary>
                <ul>
                    {move || discrepancies().into_iter().map(|d| {
                        let text = match d.kind {
                            DiscrepancyKind::NegativeWeekly => format!(
                                "第 {} 週 週票房為負值 ({}), 以 0 計算",
                                d.axis_key,
                                format_money(d.upstream)
                            ),
                            DiscrepancyKind::UpstreamMismatch => format!(
                                "第 {} 週 來源累計 {} 與重算 {} 不符",
                                d.axis_key,
                                format_money(d.upstream),
                                format_money(d.recomputed)
                            ),
                        };
                        view! { <li>{text}</li> }
                    }).collect_view()}
                </ul>
            </details>
        </Show>
    }
}
