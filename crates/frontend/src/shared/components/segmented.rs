use leptos::prelude::*;

/// Row of mutually exclusive buttons (weekly/cumulative, absolute/relative, ...)
#[component]
pub fn Segmented<T>(
    options: Vec<(T, &'static str)>,
    #[prop(into)] value: Signal<T>,
    #[prop(into)] on_change: Callback<T>,
) -> impl IntoView
where
    T: Copy + PartialEq + Send + Sync + 'static,
{
    view! {
        <div class="segmented">
            {options
                .into_iter()
                .map(|(option, label)| {
                    view! {
                        <button
                            class="segmented__btn"
                            class:segmented__btn--active=move || value.get() == option
                            on:click=move |_| on_change.run(option)
                        >
                            {label}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
