use crate::dashboards::d402_trajectory_compare::api;
use crate::shared::chart_frame::{ChartFrame, ChartPayload};
use crate::shared::components::{MovieSearch, PageHeader, Segmented};
use crate::shared::config::use_config;
use crate::shared::number_format::{format_money, format_tickets};
use contracts::dashboards::d402_trajectory_compare::TrajectoryRequest;
use contracts::domain::a001_movie::{Movie, MovieSeries};
use contracts::shared::analytics::{
    accumulate, align_view, relative_weeks, run_summary, series_labels, AlignMode,
    ComparisonSelection, LoadState, RequestSequence, SeriesView, Ticket,
};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

/// Series in the order the movies were picked; movies without data are skipped
fn ordered_series(selection: &ComparisonSelection, fetched: &[MovieSeries]) -> Vec<MovieSeries> {
    selection
        .ids()
        .into_iter()
        .filter_map(|id| fetched.iter().find(|s| s.id == id).cloned())
        .collect()
}

fn build_chart(series: &[MovieSeries], mode: AlignMode, view: SeriesView) -> ChartPayload {
    let points = align_view(series, mode, view);
    let x_labels = points
        .iter()
        .map(|p| match mode {
            AlignMode::Relative => format!("第{}週", p.axis_key),
            AlignMode::Absolute => format!("W{}", p.axis_key),
        })
        .collect();
    ChartPayload::new(&points, series_labels(series), "week")
        .with_x_labels(x_labels)
        .with_y_label(match view {
            SeriesView::Weekly => "週票房",
            SeriesView::Cumulative => "累計票房",
        })
}

/// Side-by-side box-office runs of up to `max_movies` movies
#[component]
pub fn TrajectoryCompareDashboard() -> impl IntoView {
    let compare_config = use_config().get_untracked().compare;

    let selection = RwSignal::new(ComparisonSelection::new(compare_config.max_movies));
    let trajectories = RwSignal::new(LoadState::<Vec<MovieSeries>>::Idle);
    let align_mode = RwSignal::new(AlignMode::Relative);
    let chart_view = RwSignal::new(SeriesView::Weekly);
    let notice = RwSignal::new(None::<String>);

    let sequence = StoredValue::new(RequestSequence::new());
    let fetch_timer = StoredValue::new_local(None::<Timeout>);
    let delay_ms = compare_config.debounce_ms.min(u64::from(u32::MAX)) as u32;

    let fetch = move |ticket: Ticket, request: TrajectoryRequest| {
        spawn_local(async move {
            let result = api::get_trajectories(&request)
                .await
                .map(|rows| rows.into_iter().map(MovieSeries::from).collect::<Vec<_>>());
            let Some(result) = sequence.with_value(|s| s.accept(ticket, result)) else {
                return;
            };
            if let Err(e) = &result {
                log::error!("Failed to load trajectories {:?}: {}", request.movie_ids, e);
            }
            trajectories.set(LoadState::from_vec_result(result));
        });
    };

    // Every selection change supersedes whatever is in flight
    Effect::new(move |_| {
        let ids = selection.with(|s| s.ids());
        if ids.is_empty() {
            sequence.update_value(|s| s.invalidate());
            fetch_timer.set_value(None);
            trajectories.set(LoadState::Idle);
            return;
        }
        let Some(ticket) = sequence.try_update_value(|s| s.issue()) else {
            return;
        };
        trajectories.set(LoadState::Loading);
        let request = TrajectoryRequest { movie_ids: ids };
        fetch_timer.set_value(Some(Timeout::new(delay_ms, move || fetch(ticket, request))));
    });

    let add_movie = move |movie: Movie| {
        let name = movie.name.clone();
        let mut outcome = Ok(());
        selection.update(|s| outcome = s.add(movie));
        match outcome {
            Ok(()) => notice.set(None),
            Err(e) => {
                log::debug!("Not adding '{}': {}", name, e);
                notice.set(Some(e.to_string()));
            }
        }
    };

    let remove_movie = move |id: i64| {
        selection.update(|s| {
            s.remove(id);
        });
        notice.set(None);
    };

    let series = Memo::new(move |_| {
        trajectories.with(|t| {
            t.data()
                .map(|rows| selection.with(|s| ordered_series(s, rows)))
                .unwrap_or_default()
        })
    });

    let chart = Signal::derive(move || {
        let mode = align_mode.get();
        let view = chart_view.get();
        series.with(|s| (!s.is_empty()).then(|| build_chart(s, mode, view)))
    });

    let summaries = move || {
        series.with(|all| {
            all.iter()
                .map(|s| (s.id, s.name.clone(), run_summary(&accumulate(s))))
                .collect::<Vec<_>>()
        })
    };

    let week_rows = move || series.with(|all| relative_weeks(all));
    let names = move || {
        series.with(|all| all.iter().map(|s| (s.id, s.name.clone())).collect::<Vec<_>>())
    };

    view! {
        <div id="d402_trajectory_compare--dashboard" class="d402-dashboard">
            <PageHeader
                title="票房走勢比較"
                subtitle=format!("最多可比較 {} 部電影", compare_config.max_movies)
                icon_name="layers"
            >
                <Segmented
                    options=vec![(AlignMode::Relative, "上映週數"), (AlignMode::Absolute, "日曆週")]
                    value=align_mode
                    on_change=move |m| align_mode.set(m)
                />
                <Segmented
                    options=vec![(SeriesView::Weekly, "週票房"), (SeriesView::Cumulative, "累計票房")]
                    value=chart_view
                    on_change=move |v| chart_view.set(v)
                />
            </PageHeader>

            <div class="compare-picker">
                <MovieSearch
                    on_select=add_movie
                    placeholder="搜尋並加入電影..."
                    exclude=Signal::derive(move || selection.with(|s| s.ids()))
                    disabled=Signal::derive(move || selection.with(|s| s.is_full()))
                />
                <div class="compare-chips">
                    {move || selection.with(|s| s.movies().to_vec()).into_iter().map(|m| {
                        let id = m.id;
                        view! {
                            <span class="chip">
                                {m.name}
                                <button class="chip__remove" title="移除" on:click=move |_| remove_movie(id)>
                                    "×"
                                </button>
                            </span>
                        }
                    }).collect_view()}
                </div>
                {move || notice.get().map(|n| view! { <div class="compare-notice">{n}</div> })}
            </div>

            {move || match trajectories.get() {
                LoadState::Idle => view! {
                    <div class="d402-empty">"請先選擇要比較的電影"</div>
                }.into_any(),
                LoadState::Loading => view! {
                    <div class="d402-loading"><span>"載入走勢中..."</span></div>
                }.into_any(),
                LoadState::Empty => view! {
                    <div class="d402-empty">"所選電影沒有票房紀錄"</div>
                }.into_any(),
                LoadState::Unavailable(err) => view! {
                    <div class="d402-error">
                        <strong>"⚠ 錯誤: "</strong>
                        {err}
                    </div>
                }.into_any(),
                LoadState::Ready(_) => view! { <></> }.into_any(),
            }}

            <ChartFrame payload=chart />

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"片名"</th>
                        <th class="num">"累計票房"</th>
                        <th class="num">"上映週數"</th>
                        <th class="num">"單週最高"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || summaries().into_iter().map(|(id, name, s)| view! {
                        <tr>
                            <td><A href=format!("/movies/{}", id)>{name}</A></td>
                            <td class="num">{format_money(s.total_revenue)}</td>
                            <td class="num">{s.weeks_in_release}</td>
                            <td class="num">
                                {format_money(s.peak_revenue)}
                                {s.peak_week.map(|w| format!(" (第{}週)", w))}
                            </td>
                        </tr>
                    }).collect_view()}
                </tbody>
            </table>

            <Show when=move || series.with(|s| !s.is_empty())>
                <h3>"逐週明細"</h3>
                <table class="data-table compare-weeks">
                    <thead>
                        <tr>
                            <th>"上映週數"</th>
                            {move || names().into_iter().map(|(_, name)| view! {
                                <th class="num">{name}</th>
                            }).collect_view()}
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let ids: Vec<i64> = names().into_iter().map(|(id, _)| id).collect();
                            week_rows().into_iter().map(|row| {
                                let cells = ids.iter().map(|id| match row.cells.get(id) {
                                    Some(cell) => view! {
                                        <td class="num">
                                            <div>{format_money(cell.weekly_revenue)}</div>
                                            <div class="muted">{format!("累計 {}", format_money(cell.cumulative_revenue))}</div>
                                            <div class="muted">
                                                {format!("{} 院 · 票數 {}", cell.theater_count, format_tickets(cell.tickets))}
                                            </div>
                                        </td>
                                    }.into_any(),
                                    None => view! { <td class="num muted">"—"</td> }.into_any(),
                                }).collect_view();
                                view! {
                                    <tr>
                                        <td>{format!("第{}週", row.axis_key)}</td>
                                        {cells}
                                    </tr>
                                }
                            }).collect_view()
                        }}
                    </tbody>
                </table>
            </Show>
        </div>
    }
}
