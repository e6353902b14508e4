pub mod footer;
pub mod navbar;

use footer::Footer;
use leptos::prelude::*;
use navbar::Navbar;

/// Application shell.
///
/// ```text
/// +------------------------------------------+
/// |                 Navbar                    |
/// +------------------------------------------+
/// |                 Content                   |
/// +------------------------------------------+
/// |             Footer (status bar)           |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    view! {
        <div class="app-layout">
            <Navbar />
            <main class="app-main">
                {children()}
            </main>
            <Footer />
        </div>
    }
}
