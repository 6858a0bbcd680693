//! Toast Notification Component
//!
//! Paints the notifier's active list; expiry is handled by the core.

use leptos::*;

use dsa_tracker::{Notification, NotificationKind};

use crate::state::use_app;

/// Toast notification container
#[component]
pub fn Toast() -> impl IntoView {
    let snapshot = use_app().snapshot;

    view! {
        <div id="toast-container" class="toast-container">
            <For
                each=move || snapshot.with(|s| s.notifications.clone())
                key=|n| n.id
                children=|n| view! { <ToastMessage notification=n /> }
            />
        </div>
    }
}

fn icon(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => "fas fa-check-circle",
        NotificationKind::Error => "fas fa-exclamation-circle",
        NotificationKind::Info => "fas fa-info-circle",
    }
}

#[component]
fn ToastMessage(notification: Notification) -> impl IntoView {
    view! {
        <div class=notification.css_class()>
            <i class=icon(notification.kind)></i>
            <span>{notification.message}</span>
        </div>
    }
}
