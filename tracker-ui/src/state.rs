//! Application State
//!
//! The core controller plus a signal holding its latest snapshot. Every
//! controller change republishes the snapshot, and components read from
//! the signal.

use leptos::*;
use std::rc::Rc;

use dsa_tracker::{AppSnapshot, ClientConfig, Controller};

use crate::platform::{self, BrowserStorage, GlooTransport, TimeoutScheduler};

pub type UiController = Controller<GlooTransport, BrowserStorage>;

/// Provided to all components
#[derive(Clone)]
pub struct AppContext {
    pub controller: UiController,
    pub snapshot: RwSignal<AppSnapshot>,
}

/// Build the controller and provide it to the component tree
pub fn provide_app_state() -> AppContext {
    let mut config = ClientConfig::default();
    config.api.base_url = platform::api_base_url();

    let controller = Controller::new(
        GlooTransport::new(),
        Rc::new(BrowserStorage::new()),
        Rc::new(TimeoutScheduler),
        &config,
    );

    let snapshot = create_rw_signal(controller.snapshot());
    let handle = controller.clone();
    controller.subscribe(move || snapshot.set(handle.snapshot()));

    let ctx = AppContext {
        controller,
        snapshot,
    };
    provide_context(ctx.clone());
    ctx
}

pub fn use_app() -> AppContext {
    use_context::<AppContext>().expect("AppContext not found")
}

/// CSS `display` value for a visibility flag
pub fn display(shown: bool) -> &'static str {
    if shown {
        "block"
    } else {
        "none"
    }
}
