//! Movie search box with debounced suggestions.
//!
//! Keystrokes go through `SearchDebouncer`; a gloo `Timeout` is armed for the
//! due time it reports (dropping the previous one cancels it). Responses carry
//! the ticket they were issued with and are dropped unless still the latest.

use crate::domain::a001_movie::api;
use crate::shared::clock::now_ms;
use crate::shared::config::use_config;
use crate::shared::icons::icon;
use contracts::domain::a001_movie::Movie;
use contracts::shared::analytics::debounce::Millis;
use contracts::shared::analytics::{InputOutcome, LoadState, SearchDebouncer, SearchQuery};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy)]
struct SearchState {
    debouncer: StoredValue<SearchDebouncer>,
    timer: StoredValue<Option<Timeout>, LocalStorage>,
    suggestions: RwSignal<LoadState<Vec<Movie>>>,
    limit: usize,
}

impl SearchState {
    fn arm_timer(self, now: Millis) {
        let Some(due_at) = self.debouncer.with_value(|d| d.next_due()) else {
            return;
        };
        let wait = due_at.saturating_sub(now).min(u64::from(u32::MAX)) as u32;
        // Replacing the handle drops (and cancels) the previous timer
        self.timer
            .set_value(Some(Timeout::new(wait, move || self.on_timer())));
    }

    fn on_timer(self) {
        let now = now_ms();
        match self.debouncer.try_update_value(|d| d.poll(now)).flatten() {
            Some(query) => self.dispatch(query),
            // Fired early relative to our clock, wait for the remainder
            None => self.arm_timer(now),
        }
    }

    fn dispatch(self, query: SearchQuery) {
        self.suggestions.set(LoadState::Loading);
        spawn_local(async move {
            let result = api::search_movies(&query.text, self.limit).await;
            let accepted = self
                .debouncer
                .with_value(|d| d.accept(query.ticket, result));
            if let Some(result) = accepted {
                if let Err(e) = &result {
                    log::warn!("Movie search '{}' failed: {}", query.text, e);
                }
                self.suggestions.set(LoadState::from_vec_result(result));
            }
        });
    }

    fn reset(self) {
        self.debouncer.update_value(|d| d.cancel());
        self.timer.set_value(None);
        self.suggestions.set(LoadState::Idle);
    }
}

/// Search-as-you-type movie picker
#[component]
pub fn MovieSearch(
    /// Called with the picked movie; the box is cleared afterwards
    #[prop(into)]
    on_select: Callback<Movie>,
    #[prop(optional, into)] placeholder: String,
    /// Ids to leave out of the suggestion list
    #[prop(optional, into)]
    exclude: Signal<Vec<i64>>,
    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "搜尋電影...".to_string()
    } else {
        placeholder
    };

    let search_config = use_config().get_untracked().search;
    let state = SearchState {
        debouncer: StoredValue::new(SearchDebouncer::with_min_len(
            search_config.debounce_ms,
            search_config.min_query_len,
        )),
        timer: StoredValue::new_local(None::<Timeout>),
        suggestions: RwSignal::new(LoadState::Idle),
        limit: search_config.suggestion_limit,
    };

    let (input_value, set_input_value) = signal(String::new());

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());
        let now = now_ms();
        let outcome = state
            .debouncer
            .try_update_value(|d| d.on_input(&new_value, now))
            .unwrap_or(InputOutcome::Unchanged);

        match outcome {
            InputOutcome::Scheduled { .. } => state.arm_timer(now),
            InputOutcome::Unchanged => {}
            InputOutcome::Cleared => {
                state.timer.set_value(None);
                state.suggestions.set(LoadState::Idle);
            }
        }
    };

    let clear = move || {
        set_input_value.set(String::new());
        state.reset();
    };

    let pick = move |movie: Movie| {
        clear();
        on_select.run(movie);
    };

    let visible_suggestions = move || {
        let excluded = exclude.get();
        state.suggestions.with(|s| {
            s.data()
                .map(|movies| {
                    movies
                        .iter()
                        .filter(|m| !excluded.contains(&m.id))
                        .cloned()
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default()
        })
    };

    view! {
        <div class="movie-search">
            <div class="movie-search__box">
                <span class="movie-search__icon">{icon("search")}</span>
                <input
                    type="text"
                    class="movie-search__input"
                    placeholder=placeholder
                    disabled=move || disabled.get()
                    prop:value=move || input_value.get()
                    on:input=move |ev| handle_input_change(event_target_value(&ev))
                />
                <Show when=move || !input_value.get().is_empty()>
                    <button class="movie-search__clear" title="清除" on:click=move |_| clear()>
                        {icon("x")}
                    </button>
                </Show>
            </div>

            {move || match state.suggestions.get() {
                LoadState::Idle => view! { <></> }.into_any(),
                LoadState::Loading => view! {
                    <div class="movie-search__dropdown movie-search__hint">"搜尋中..."</div>
                }.into_any(),
                LoadState::Empty => view! {
                    <div class="movie-search__dropdown movie-search__hint">"找不到符合的電影"</div>
                }.into_any(),
                LoadState::Unavailable(err) => view! {
                    <div class="movie-search__dropdown movie-search__error">{err}</div>
                }.into_any(),
                LoadState::Ready(_) => view! {
                    <ul class="movie-search__dropdown">
                        {visible_suggestions()
                            .into_iter()
                            .map(|movie| {
                                let year = movie
                                    .release_date
                                    .map(|d| d.format("%Y").to_string())
                                    .unwrap_or_default();
                                let name = movie.name.clone();
                                view! {
                                    <li class="movie-search__item" on:click=move |_| pick(movie.clone())>
                                        <span>{name}</span>
                                        <span class="movie-search__year">{year}</span>
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                }.into_any(),
            }}
        </div>
    }
}
