//! UI Components
//!
//! Leptos components for each screen of the tracker.

pub mod add_problem;
pub mod auth;
pub mod dashboard;
pub mod leaderboard;
pub mod loading;
pub mod nav;
pub mod toast;

pub use add_problem::AddProblemForm;
pub use auth::AuthScreen;
pub use dashboard::DashboardScreen;
pub use leaderboard::LeaderboardScreen;
pub use loading::LoadingOverlay;
pub use nav::Nav;
pub use toast::Toast;
