use crate::dashboards::d403_market_overview::api;
use crate::shared::components::{
    CardFormat, MovieSearch, PageHeader, PaginationControls, Segmented, StatCard,
};
use crate::shared::config::use_config;
use crate::shared::icons::icon;
use crate::shared::number_format::{format_compact, format_money, format_tickets};
use contracts::dashboards::d403_market_overview::{
    DashboardStatsResponse, MovieListQuery, MovieSort, ALL_COUNTRIES,
};
use contracts::domain::a001_movie::Movie;
use contracts::shared::analytics::overview::{
    city_breakdown, country_group, country_options, market_share, recent_trend, sort_value,
    ShareSlice, TrendBar, RECENT_TREND_WEEKS,
};
use contracts::shared::analytics::{format_growth, LoadState, PageCursor, RequestSequence};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

fn share_percent(slice: &ShareSlice) -> String {
    match slice.share {
        Some(s) => format!("{:.1}%", s * 100.0),
        None => "—".to_string(),
    }
}

/// Horizontal bars scaled to the largest slice
#[component]
fn ShareBars(#[prop(into)] slices: Signal<Vec<ShareSlice>>) -> impl IntoView {
    view! {
        <ul class="share-bars">
            {move || {
                let rows = slices.get();
                let max = rows.iter().map(|s| s.revenue).fold(0.0_f64, f64::max);
                rows.into_iter().map(|s| {
                    let width = if max > 0.0 { s.revenue / max * 100.0 } else { 0.0 };
                    view! {
                        <li class="share-bars__row">
                            <span class="share-bars__name">{s.name.clone()}</span>
                            <span class="share-bars__track">
                                <span class="share-bars__fill" style=format!("width: {:.1}%", width)></span>
                            </span>
                            <span class="share-bars__value">{format!("${}", format_compact(s.revenue))}</span>
                            <span class="share-bars__pct">{share_percent(&s)}</span>
                        </li>
                    }
                }).collect_view()
            }}
        </ul>
    }
}

/// Home page: this month at a glance plus the searchable movie list
#[component]
pub fn MarketOverviewDashboard() -> impl IntoView {
    let config = use_config();

    let stats = RwSignal::new(LoadState::<DashboardStatsResponse>::Idle);
    let movies = RwSignal::new(LoadState::<Vec<Movie>>::Idle);
    let sequence = StoredValue::new(RequestSequence::new());
    let cursor = RwSignal::new(
        PageCursor::<MovieListQuery>::new(config.get_untracked().overview.page_size)
            .unwrap_or_default(),
    );

    let search = RwSignal::new(String::new());
    let sort_by = RwSignal::new(MovieSort::WeeklyRevenue);
    let country = RwSignal::new(ALL_COUNTRIES.to_string());

    let query = Memo::new(move |_| {
        search.with(|s| country.with(|c| MovieListQuery::new(s, sort_by.get(), c)))
    });

    Effect::new(move |_| {
        stats.set(LoadState::Loading);
        spawn_local(async move {
            let result = api::get_dashboard_stats().await;
            if let Err(e) = &result {
                log::error!("Failed to load dashboard stats: {}", e);
            }
            stats.set(LoadState::from_result(result, |d| {
                d.market_share.is_empty() && d.four_week_trend.is_empty()
            }));
        });
    });

    Effect::new(move |_| {
        let q = query.get();
        let Some(ticket) = sequence.try_update_value(|s| s.issue()) else {
            return;
        };
        movies.set(LoadState::Loading);

        spawn_local(async move {
            let result = api::get_movie_list(&q).await;
            let Some(result) = sequence.with_value(|s| s.accept(ticket, result)) else {
                return;
            };
            if let Err(e) = &result {
                log::error!("Failed to load movie list: {}", e);
            }
            let state = LoadState::from_vec_result(result);
            let total = state.data().map(|rows| rows.len()).unwrap_or(0);
            cursor.update(|c| {
                c.sync(&q, total);
            });
            movies.set(state);
        });
    });

    let kpis = move || stats.with(|s| s.data().map(|d| d.kpis.clone()));
    let share = Signal::derive(move || {
        stats.with(|s| s.data().map(|d| market_share(&d.market_share)).unwrap_or_default())
    });
    let cities = Signal::derive(move || {
        stats.with(|s| s.data().map(|d| city_breakdown(&d.city_distribution)).unwrap_or_default())
    });
    let trend = move || -> Vec<TrendBar> {
        stats.with(|s| {
            s.data()
                .map(|d| recent_trend(&d.four_week_trend, RECENT_TREND_WEEKS))
                .unwrap_or_default()
        })
    };

    let page_rows = move || {
        movies.with(|m| {
            m.data()
                .map(|rows| {
                    cursor.with(|c| {
                        c.slice(rows)
                            .iter()
                            .enumerate()
                            .map(|(i, movie)| (c.display_rank(i), movie.clone()))
                            .collect::<Vec<_>>()
                    })
                })
                .unwrap_or_default()
        })
    };

    view! {
        <div id="d403_market_overview--dashboard" class="d403-dashboard">
            <PageHeader title="本月概況" subtitle="台灣電影票房戰情室".to_string() icon_name="pie-chart">
                <A href="/report">"完整報表"</A>
            </PageHeader>

            <div class="stat-grid">
                <StatCard
                    label="本週票房"
                    icon_name="dollar"
                    value=Signal::derive(move || kpis().map(|k| k.current_week_total))
                    format=CardFormat::Compact
                />
                <StatCard
                    label="本月總票房"
                    icon_name="calendar"
                    value=Signal::derive(move || kpis().map(|k| k.current_month_total))
                    format=CardFormat::Compact
                    subtitle=Signal::derive(move || kpis().map(|k| format!("上映中 {} 部", k.active_movie_count)))
                />
                <StatCard
                    label="本週新片"
                    icon_name="film"
                    value=Signal::derive(move || kpis().map(|k| f64::from(k.weekly_new_releases)))
                    format=CardFormat::Integer
                />
                <StatCard
                    label="本月新片"
                    icon_name="film"
                    value=Signal::derive(move || kpis().map(|k| f64::from(k.monthly_new_releases)))
                    format=CardFormat::Integer
                />
            </div>

            {move || match stats.get() {
                LoadState::Idle | LoadState::Ready(_) => view! { <></> }.into_any(),
                LoadState::Loading => view! {
                    <div class="d403-loading"><span>"載入概況中..."</span></div>
                }.into_any(),
                LoadState::Empty => view! {
                    <div class="d403-empty">"尚無本月票房資料"</div>
                }.into_any(),
                LoadState::Unavailable(err) => view! {
                    <div class="d403-error">
                        <strong>"⚠ 錯誤: "</strong>
                        {err}
                    </div>
                }.into_any(),
            }}

            <div class="d403-panels">
                <section class="panel">
                    <h3>"當月銷售國別市佔率"</h3>
                    <ShareBars slices=share />
                </section>

                <section class="panel">
                    <h3>"前四週銷售金額趨勢"</h3>
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>"週次"</th>
                                <th class="num">"票房"</th>
                                <th class="num">"週增長"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || trend().into_iter().map(|bar| view! {
                                <tr title=bar.full_label.clone()>
                                    <td>{format!("W{} ({})", bar.week, bar.short_label)}</td>
                                    <td class="num">{format_money(bar.revenue)}</td>
                                    <td class="num">{format_growth(bar.growth_rate)}</td>
                                </tr>
                            }).collect_view()}
                        </tbody>
                    </table>
                </section>

                <Show when=move || cities.with(|c| !c.is_empty())>
                    <section class="panel">
                        <h3>"城市票房分布"</h3>
                        <ShareBars slices=cities />
                    </section>
                </Show>
            </div>

            <div class="movie-list__filters">
                <MovieSearch
                    on_select=move |m: Movie| search.set(m.name)
                    placeholder="搜尋電影..."
                />
                <Show when=move || search.with(|s| !s.is_empty())>
                    <span class="chip">
                        {move || search.get()}
                        <button class="chip__remove" title="清除" on:click=move |_| search.set(String::new())>
                            {icon("x")}
                        </button>
                    </span>
                </Show>
                <select
                    class="period-select"
                    prop:value=move || country.get()
                    on:change=move |ev| country.set(event_target_value(&ev))
                >
                    {move || country_options(&share.get()).into_iter().map(|c| {
                        let value = c.clone();
                        view! {
                            <option value=value.clone() selected=move || country.with(|cur| *cur == value)>{c}</option>
                        }
                    }).collect_view()}
                </select>
                <Segmented
                    options=vec![
                        (MovieSort::WeeklyRevenue, MovieSort::WeeklyRevenue.label()),
                        (MovieSort::CumulativeRevenue, MovieSort::CumulativeRevenue.label()),
                    ]
                    value=sort_by
                    on_change=move |s| sort_by.set(s)
                />
            </div>

            {move || match movies.get() {
                LoadState::Idle | LoadState::Ready(_) => view! { <></> }.into_any(),
                LoadState::Loading => view! {
                    <div class="d403-loading"><span>"載入電影清單中..."</span></div>
                }.into_any(),
                LoadState::Empty => view! {
                    <div class="d403-empty">"找不到符合條件的電影"</div>
                }.into_any(),
                LoadState::Unavailable(err) => view! {
                    <div class="d403-error">
                        <strong>"⚠ 錯誤: "</strong>
                        {err}
                    </div>
                }.into_any(),
            }}

            <Show when=move || movies.with(|m| m.data().is_some())>
                <table class="data-table movie-list">
                    <thead>
                        <tr>
                            <th>"#"</th>
                            <th>"片名"</th>
                            <th>"國家"</th>
                            <th class="num">{move || sort_by.get().label()}</th>
                            <th class="num">"票數"</th>
                            <th class="num">"院數"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let sort = sort_by.get();
                            page_rows().into_iter().map(|(rank, movie)| {
                                let value = sort_value(&movie, sort)
                                    .map(format_money)
                                    .unwrap_or_else(|| "無資料".to_string());
                                let group = movie
                                    .country
                                    .as_deref()
                                    .map(country_group)
                                    .unwrap_or("N/A");
                                view! {
                                    <tr class="clickable">
                                        <td>{rank}</td>
                                        <td><A href=format!("/movies/{}", movie.id)>{movie.name.clone()}</A></td>
                                        <td>{group}</td>
                                        <td class="num">{value}</td>
                                        <td class="num">{format_tickets(movie.tickets)}</td>
                                        <td class="num">{movie.theater_count}</td>
                                    </tr>
                                }
                            }).collect_view()
                        }}
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
