use crate::shared::icons::icon;
use leptos::prelude::*;
use leptos_router::components::A;

const NAV_ITEMS: [(&str, &str, &str); 4] = [
    ("/", "pie-chart", "本月概況"),
    ("/report", "calendar", "票房報表"),
    ("/trend", "trending-up", "市場趨勢"),
    ("/compare", "layers", "走勢比較"),
];

#[component]
pub fn Navbar() -> impl IntoView {
    view! {
        <nav class="navbar">
            <div class="navbar__brand">
                {icon("film")}
                <span>"台灣票房分析"</span>
            </div>
            <div class="navbar__links">
                {NAV_ITEMS.into_iter().map(|(href, icon_name, label)| view! {
                    <A href=href attr:class="navbar__link">
                        {icon(icon_name)}
                        <span>{label}</span>
                    </A>
                }).collect_view()}
            </div>
        </nav>
    }
}
