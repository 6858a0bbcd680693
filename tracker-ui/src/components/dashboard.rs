//! Dashboard Screen
//!
//! Score counters, recent problems and the add-problem form.

use leptos::*;

use dsa_tracker::{DashboardView, ProblemItem, RecentProblems};

use crate::components::AddProblemForm;
use crate::state::use_app;

#[component]
pub fn DashboardScreen() -> impl IntoView {
    let snapshot = use_app().snapshot;
    let dashboard = create_memo(move |_| snapshot.with(|s| s.dashboard.clone()));

    view! {
        <div class="dashboard">
            <h2 class="welcome">
                "Welcome back, "
                <span id="username">
                    {move || dashboard.with(|d| d.as_ref().map(|d| d.username.clone()))}
                </span>
                "!"
            </h2>

            <div class="stats-grid">
                {move || dashboard.get().map(|d| view! { <StatTiles dashboard=d /> })}
            </div>

            <div class="dashboard-grid">
                <div class="card">
                    <h3>"Add Solved Problem"</h3>
                    <AddProblemForm />
                </div>

                <div class="card">
                    <h3>"Recent Problems"</h3>
                    <div id="recent-problems" class="problem-list">
                        {move || dashboard.get().map(|d| view! { <RecentList recent=d.recent /> })}
                    </div>
                </div>
            </div>
        </div>
    }
}

#[component]
fn StatTiles(dashboard: DashboardView) -> impl IntoView {
    dashboard
        .stats
        .into_iter()
        .map(|stat| {
            view! {
                <div class="stat-card">
                    <div class="stat-value" id=stat.id>{stat.value}</div>
                    <div class="stat-label">{stat.label}</div>
                </div>
            }
        })
        .collect_view()
}

#[component]
fn RecentList(recent: RecentProblems) -> impl IntoView {
    match recent {
        RecentProblems::Placeholder(message) => {
            view! { <p class="empty-state">{message}</p> }.into_view()
        }
        RecentProblems::Items(items) => items
            .into_iter()
            .map(|item| view! { <ProblemRow item=item /> })
            .collect_view(),
    }
}

#[component]
fn ProblemRow(item: ProblemItem) -> impl IntoView {
    let link = item.link.map(|href| {
        view! {
            <a href=href class="problem-link" target="_blank" rel="noopener noreferrer">
                "View Problem"
            </a>
        }
    });

    view! {
        <div class=item.item_class>
            <div class="problem-info">
                <div class="problem-title">{item.title}</div>
                <div class="problem-date">{item.solved_on}</div>
                {link}
            </div>
            <div class="problem-meta">
                <span class=item.badge_class>{item.difficulty.as_str()}</span>
                <span class="problem-points">{item.points_label}</span>
            </div>
        </div>
    }
}
