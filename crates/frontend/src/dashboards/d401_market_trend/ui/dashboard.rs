use crate::dashboards::d401_market_trend::api;
use crate::shared::chart_frame::{ChartFrame, ChartPayload};
use crate::shared::components::{CardFormat, PageHeader, Segmented, StatCard};
use crate::shared::config::use_config;
use crate::shared::number_format::format_money;
use contracts::dashboards::d401_market_trend::MarketStat;
use contracts::shared::analytics::market::{available_years, default_years, series_by_year};
use contracts::shared::analytics::{
    align_view, format_growth, series_labels, week_axis_labels, AlignMode, LoadState, SeriesView,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Rows shown in the recent-weeks table
const RECENT_WEEKS: usize = 8;

fn build_chart(stats: &[MarketStat], years: &[i32], view: SeriesView) -> Option<ChartPayload> {
    let newest = *years.iter().max()?;
    let series = series_by_year(stats, years);
    let points = align_view(&series, AlignMode::Absolute, view);
    let y_label = match view {
        SeriesView::Weekly => "週票房",
        SeriesView::Cumulative => "累計票房",
    };
    Some(
        ChartPayload::new(&points, series_labels(&series), "week")
            .with_x_labels(week_axis_labels(newest, &points))
            .with_y_label(y_label),
    )
}

/// Year-over-year comparison of weekly whole-market revenue
#[component]
pub fn MarketTrendDashboard() -> impl IntoView {
    let config = use_config();

    let stats = RwSignal::new(LoadState::<Vec<MarketStat>>::Idle);
    let selected_years = RwSignal::new(Vec::<i32>::new());
    let chart_view = RwSignal::new(SeriesView::Weekly);

    Effect::new(move |_| {
        stats.set(LoadState::Loading);
        spawn_local(async move {
            let result = api::get_market_stats().await;
            if let Err(e) = &result {
                log::error!("Failed to load market stats: {}", e);
            }
            let state = LoadState::from_vec_result(result);
            if let Some(rows) = state.data() {
                let count = config.get_untracked().trend.default_year_count;
                selected_years.set(default_years(rows, count));
            }
            stats.set(state);
        });
    });

    let years = move || stats.with(|s| s.data().map(|rows| available_years(rows)).unwrap_or_default());

    let toggle_year = move |year: i32| {
        selected_years.update(|selected| {
            if let Some(pos) = selected.iter().position(|y| *y == year) {
                selected.remove(pos);
            } else {
                selected.push(year);
                selected.sort_unstable_by(|a, b| b.cmp(a));
            }
        });
    };

    let chart = Signal::derive(move || {
        let view = chart_view.get();
        let years = selected_years.get();
        stats.with(|s| s.data().and_then(|rows| build_chart(rows, &years, view)))
    });

    let latest = move || stats.with(|s| s.data().and_then(|rows| rows.last().cloned()));

    let recent_rows = move || {
        stats.with(|s| {
            s.data()
                .map(|rows| rows.iter().rev().take(RECENT_WEEKS).cloned().collect::<Vec<_>>())
                .unwrap_or_default()
        })
    };

    view! {
        <div id="d401_market_trend--dashboard" class="d401-dashboard">
            <PageHeader title="市場趨勢" subtitle="全台週票房年度比較".to_string() icon_name="trending-up">
                <Segmented
                    options=vec![(SeriesView::Weekly, "週票房"), (SeriesView::Cumulative, "累計票房")]
                    value=chart_view
                    on_change=move |v| chart_view.set(v)
                />
            </PageHeader>

            <div class="stat-grid">
                <StatCard
                    label="最新一週總票房"
                    icon_name="dollar"
                    value=Signal::derive(move || latest().map(|s| s.total_revenue))
                    format=CardFormat::Compact
                    growth=Signal::derive(move || latest().and_then(|s| s.growth_rate))
                    subtitle=Signal::derive(move || latest().map(|s| {
                        format!("{} ~ {}", s.start_date.format("%m/%d"), s.end_date.format("%m/%d"))
                    }))
                />
                <StatCard
                    label="上映電影數"
                    icon_name="film"
                    value=Signal::derive(move || latest().map(|s| f64::from(s.movie_count)))
                    format=CardFormat::Integer
                    subtitle=Signal::derive(move || latest().map(|s| format!("冠軍: {}", s.top_movie)))
                />
            </div>

            {move || match stats.get() {
                LoadState::Idle | LoadState::Ready(_) => view! { <></> }.into_any(),
                LoadState::Loading => view! {
                    <div class="d401-loading"><span>"載入市場資料中..."</span></div>
                }.into_any(),
                LoadState::Empty => view! {
                    <div class="d401-empty">"尚無市場資料"</div>
                }.into_any(),
                LoadState::Unavailable(err) => view! {
                    <div class="d401-error">
                        <strong>"⚠ 錯誤: "</strong>
                        {err}
                    </div>
                }.into_any(),
            }}

            <div class="year-toggles">
                {move || years().into_iter().map(|y| view! {
                    <button
                        class="year-toggle"
                        class:year-toggle--active=move || selected_years.with(|s| s.contains(&y))
                        on:click=move |_| toggle_year(y)
                    >
                        {format!("{}年", y)}
                    </button>
                }).collect_view()}
            </div>

            <ChartFrame payload=chart />

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"週次"</th>
                        <th>"期間"</th>
                        <th class="num">"總票房"</th>
                        <th class="num">"週增長"</th>
                        <th class="num">"電影數"</th>
                        <th>"冠軍"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || recent_rows().into_iter().map(|s| view! {
                        <tr>
                            <td>{format!("{} W{}", s.year, s.week)}</td>
                            <td>{format!("{} ~ {}", s.start_date.format("%m/%d"), s.end_date.format("%m/%d"))}</td>
                            <td class="num">{format_money(s.total_revenue)}</td>
                            <td class="num">{format_growth(s.growth_rate)}</td>
                            <td class="num">{s.movie_count}</td>
                            <td>{s.top_movie.clone()}</td>
                        </tr>
                    }).collect_view()}
                </tbody>
            </table>
        </div>
    }
}
