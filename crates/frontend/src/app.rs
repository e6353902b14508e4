use crate::routes::routes::AppRoutes;
use crate::shared::config::provide_config;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Pages read the config once when they are created
    let config_settled = provide_config();

    view! {
        <Show
            when=move || config_settled.get()
            fallback=|| view! { <div class="loading">"載入設定..."</div> }
        >
            <AppRoutes />
        </Show>
    }
}
