use crate::dashboards::{
    MarketOverviewDashboard, MarketTrendDashboard, PeriodReportDashboard,
    TrajectoryCompareDashboard,
};
use crate::domain::a001_movie::ui::MovieDetails;
use crate::layout::Shell;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
fn NotFound() -> impl IntoView {
    view! { <div class="not-found">"找不到頁面"</div> }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Shell>
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/") view=MarketOverviewDashboard />
                    <Route path=path!("/report") view=PeriodReportDashboard />
                    <Route path=path!("/trend") view=MarketTrendDashboard />
                    <Route path=path!("/compare") view=TrajectoryCompareDashboard />
                    <Route path=path!("/movies/:id") view=MovieDetails />
                </Routes>
            </Shell>
        </Router>
    }
}
