//! Loading Component

use leptos::*;

use crate::state::{display, use_app};

/// Global busy overlay; on while any request is in flight
#[component]
pub fn LoadingOverlay() -> impl IntoView {
    let snapshot = use_app().snapshot;

    view! {
        <div
            id="loading"
            class="loading-overlay"
            style:display=move || display(snapshot.with(|s| s.busy))
        >
            <div class="loading-spinner" />
        </div>
    }
}
