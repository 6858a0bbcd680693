//! App Root Component
//!
//! Mounts every screen once; the view state decides which one is shown.

use leptos::*;

use crate::components::{
    AuthScreen, DashboardScreen, LeaderboardScreen, LoadingOverlay, Nav, Toast,
};
use crate::state::{display, provide_app_state};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let ctx = provide_app_state();
    let snapshot = ctx.snapshot;

    // Restore theme and session on load
    let controller = ctx.controller.clone();
    spawn_local(async move {
        controller.bootstrap().await;
    });

    create_effect(move |_| {
        let theme = snapshot.with(|s| s.theme);
        if let Some(root) = document().document_element() {
            if let Err(e) = root.set_attribute("data-theme", theme.as_str()) {
                web_sys::console::error_1(&e);
            }
        }
    });

    view! {
        <div class="app">
            <div style:display=move || display(snapshot.with(|s| s.visibility.navbar))>
                <Nav />
            </div>

            <main class="container">
                <section
                    id="auth-section"
                    style:display=move || display(snapshot.with(|s| s.visibility.auth))
                >
                    <AuthScreen />
                </section>

                <section
                    id="dashboard-section"
                    style:display=move || display(snapshot.with(|s| s.visibility.dashboard))
                >
                    <DashboardScreen />
                </section>

                <section
                    id="leaderboard-section"
                    style:display=move || display(snapshot.with(|s| s.visibility.leaderboard))
                >
                    <LeaderboardScreen />
                </section>
            </main>

            <LoadingOverlay />
            <Toast />
        </div>
    }
}
