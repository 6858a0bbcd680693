//! Navigation Component
//!
//! Section links, theme toggle and logout.

use leptos::*;

use dsa_tracker::Section;

use crate::state::use_app;

/// Navigation bar component
#[component]
pub fn Nav() -> impl IntoView {
    let ctx = use_app();
    let snapshot = ctx.snapshot;

    let theme_controller = ctx.controller.clone();
    let logout_controller = ctx.controller.clone();

    view! {
        <nav class="navbar">
            <div class="nav-brand">
                <i class="fas fa-code"></i>
                <span>"DSA Tracker"</span>
            </div>

            <div class="nav-links">
                {Section::ALL
                    .into_iter()
                    .map(|section| view! { <NavLink section=section /> })
                    .collect_view()}
            </div>

            <div class="nav-actions">
                <span class="nav-user">
                    {move || snapshot.with(|s| s.user.as_ref().map(|u| u.username.clone()))}
                </span>
                <button
                    class="theme-toggle"
                    title="Toggle theme"
                    on:click=move |_| {
                        theme_controller.toggle_theme();
                    }
                >
                    <i class=move || snapshot.with(|s| s.theme.icon_class())></i>
                </button>
                <button class="btn btn-logout" on:click=move |_| logout_controller.logout()>
                    "Logout"
                </button>
            </div>
        </nav>
    }
}

/// Individual navigation link
#[component]
fn NavLink(section: Section) -> impl IntoView {
    let ctx = use_app();
    let snapshot = ctx.snapshot;
    let controller = ctx.controller;

    let on_click = move |ev: ev::MouseEvent| {
        ev.prevent_default();
        let controller = controller.clone();
        spawn_local(async move {
            let _ = controller.show_section(section).await;
        });
    };

    view! {
        <a
            href="#"
            class="nav-link"
            class:active=move || snapshot.with(|s| s.is_active(section))
            on:click=on_click
        >
            {section.label()}
        </a>
    }
}
