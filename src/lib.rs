//! # DSA Tracker
//!
//! Client core for the DSA problem tracker: session handling, the REST API
//! client, view state, rendering and notifications. Platform-independent;
//! the `tracker-ui` crate plugs in browser storage, fetch and timers.
//!
//! ## Modules
//!
//! - [`api`]: typed client for the tracker API and the transport seam
//! - [`app`]: the controller that runs every user action
//! - [`view`]: the exclusive screen state machine
//! - [`render`]: API data to display fragments
//! - [`notify`]: transient toasts and the timer seam
//! - [`storage`], [`session`], [`theme`]: persisted client state
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::rc::Rc;
//! use dsa_tracker::*;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::load_default();
//!     let store = Rc::new(FileStore::open_default()?);
//!     let clock = Rc::new(ManualScheduler::new());
//!
//!     let app = Controller::new(ReqwestTransport::new(), store, clock, &config);
//!     app.bootstrap().await;
//!
//!     if app.view_state() == ViewState::Auth {
//!         app.login("ada@example.com", "hunter2").await?;
//!     }
//!     app.show_leaderboard().await?;
//!
//!     println!("{:?}", app.snapshot().leaderboard);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod app;
pub mod busy;
pub mod config;
pub mod error;
pub mod listeners;
#[cfg(feature = "native")]
pub mod logging;
pub mod models;
pub mod notify;
pub mod render;
pub mod sequence;
pub mod session;
pub mod storage;
pub mod theme;
pub mod view;

// Re-export top-level types for convenience
pub use api::{ApiClient, HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};

#[cfg(feature = "native")]
pub use api::ReqwestTransport;

pub use app::{AppSnapshot, Controller};

pub use busy::{BusyGuard, BusyIndicator};

pub use config::{ApiConfig, ClientConfig, ConfigError, LoggingConfig, NotificationConfig};

pub use error::{ClientError, ClientResult};

pub use listeners::Listeners;

pub use models::{
    AddProblemResponse, AuthResponse, DashboardData, Difficulty, LeaderboardEntry, NewProblem,
    Problem, User,
};

pub use notify::{ManualScheduler, Notification, NotificationKind, Notifier, Scheduler};

pub use render::{
    render_dashboard, render_leaderboard, DashboardView, LeaderboardRow, LeaderboardView, Medal,
    ProblemItem, RecentProblems, StatCounter,
};

pub use sequence::{Action, RequestTracker, Ticket};

pub use session::SessionStore;

#[cfg(feature = "native")]
pub use storage::FileStore;
pub use storage::{KeyValueStore, MemoryStore};

pub use theme::{Theme, ThemeStore};

pub use view::{AuthForm, Section, ViewController, ViewState, Visibility};
