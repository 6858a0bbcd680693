//! Application controller
//!
//! Owns the app state and runs every user-facing action: bootstrap,
//! login/registration, navigation, adding problems, theme switching.
//! The display layer calls these methods, subscribes for changes, and
//! paints [`AppSnapshot`]s.
//!
//! All methods take `&self`; the controller is a cheap `Rc` handle, so an
//! event handler can clone it into a spawned future. State borrows never
//! span an await.

use std::cell::RefCell;
use std::rc::Rc;

use crate::api::{ApiClient, HttpTransport};
use crate::busy::BusyIndicator;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::listeners::Listeners;
use crate::models::{AuthResponse, NewProblem, Problem, User};
use crate::notify::{Notification, Notifier, Scheduler};
use crate::render::{render_dashboard, render_leaderboard, DashboardView, LeaderboardView};
use crate::sequence::{Action, RequestTracker};
use crate::session::SessionStore;
use crate::storage::KeyValueStore;
use crate::theme::{Theme, ThemeStore};
use crate::view::{AuthForm, Section, ViewController, ViewState, Visibility};

pub const LOGIN_SUCCESS: &str = "Login successful!";
pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTER_SUCCESS: &str = "Account created successfully!";
pub const REGISTER_FAILED: &str = "Registration failed";
pub const LOGOUT_SUCCESS: &str = "Logged out successfully";
pub const SESSION_EXPIRED: &str = "Session expired. Please log in again.";
pub const DASHBOARD_FAILED: &str = "Failed to load dashboard";
pub const LEADERBOARD_FAILED: &str = "Failed to load leaderboard";
pub const ADD_PROBLEM_FAILED: &str = "Failed to add problem";
pub const NETWORK_ERROR: &str = "Network error";
pub const NETWORK_ERROR_RETRY: &str = "Network error. Please try again.";

/// Everything the display layer needs for one paint
#[derive(Debug, Clone, PartialEq)]
pub struct AppSnapshot {
    pub view: ViewState,
    pub auth_form: AuthForm,
    pub visibility: Visibility,
    pub user: Option<User>,
    pub dashboard: Option<DashboardView>,
    pub leaderboard: Option<LeaderboardView>,
    pub theme: Theme,
    pub busy: bool,
    pub notifications: Vec<Notification>,
}

impl AppSnapshot {
    pub fn is_active(&self, section: Section) -> bool {
        self.view == ViewState::from(section)
    }
}

#[derive(Debug, Default)]
struct AppState {
    view: ViewController,
    user: Option<User>,
    dashboard: Option<DashboardView>,
    leaderboard: Option<LeaderboardView>,
    theme: Theme,
}

struct Inner<T, S> {
    api: ApiClient<T>,
    session: SessionStore<S>,
    themes: ThemeStore<S>,
    state: RefCell<AppState>,
    tracker: RequestTracker,
    busy: BusyIndicator,
    notifier: Notifier,
    listeners: Listeners,
}

/// Shared handle to the running client
pub struct Controller<T, S> {
    inner: Rc<Inner<T, S>>,
}

impl<T, S> Clone for Controller<T, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: HttpTransport, S: KeyValueStore> Controller<T, S> {
    pub fn new(
        transport: T,
        store: Rc<S>,
        scheduler: Rc<dyn Scheduler>,
        config: &ClientConfig,
    ) -> Self {
        let listeners = Listeners::new();
        let inner = Inner {
            api: ApiClient::new(transport, config.api.clone()),
            session: SessionStore::new(Rc::clone(&store)),
            themes: ThemeStore::new(store),
            state: RefCell::new(AppState::default()),
            tracker: RequestTracker::new(),
            busy: BusyIndicator::new(listeners.clone()),
            notifier: Notifier::new(
                scheduler,
                config.notifications.display_time(),
                listeners.clone(),
            ),
            listeners,
        };

        Self {
            inner: Rc::new(inner),
        }
    }

    /// Called after every visible change
    pub fn subscribe(&self, listener: impl Fn() + 'static) {
        self.inner.listeners.subscribe(listener);
    }

    pub fn snapshot(&self) -> AppSnapshot {
        let state = self.inner.state.borrow();
        AppSnapshot {
            view: state.view.current(),
            auth_form: state.view.auth_form(),
            visibility: state.view.visibility(),
            user: state.user.clone(),
            dashboard: state.dashboard.clone(),
            leaderboard: state.leaderboard.clone(),
            theme: state.theme,
            busy: self.inner.busy.is_busy(),
            notifications: self.inner.notifier.active(),
        }
    }

    pub fn view_state(&self) -> ViewState {
        self.inner.state.borrow().view.current()
    }

    pub fn current_user(&self) -> Option<User> {
        self.inner.state.borrow().user.clone()
    }

    pub fn theme(&self) -> Theme {
        self.inner.state.borrow().theme
    }

    pub fn api(&self) -> &ApiClient<T> {
        &self.inner.api
    }

    pub fn notifier(&self) -> &Notifier {
        &self.inner.notifier
    }

    pub fn busy(&self) -> &BusyIndicator {
        &self.inner.busy
    }

    fn update<R>(&self, f: impl FnOnce(&mut AppState) -> R) -> R {
        let result = {
            let mut state = self.inner.state.borrow_mut();
            f(&mut state)
        };
        self.inner.listeners.emit();
        result
    }

    /// Restore theme and session on page load.
    ///
    /// A stored token is probed once; the probe's dashboard data is
    /// rendered directly, so a valid session costs exactly one fetch.
    pub async fn bootstrap(&self) {
        let theme = self.inner.themes.load();
        self.update(|s| s.theme = theme);

        let Some(token) = self.inner.session.token() else {
            tracing::info!("No stored session");
            self.update(|s| s.view.show_auth());
            return;
        };

        let ticket = self.inner.tracker.issue(Action::Session);
        let result = self.inner.api.check_session(&token).await;
        if !self.inner.tracker.is_current(&ticket) {
            return;
        }

        match result {
            Ok(data) => {
                tracing::info!(user = %data.user.username, "Session restored");
                let view = render_dashboard(&data);
                self.update(|s| {
                    s.user = Some(data.user);
                    s.dashboard = Some(view);
                    s.view.enter_app();
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "Stored session rejected");
                self.end_session();
            }
        }
    }

    pub fn show_login_form(&self) {
        self.update(|s| s.view.show_form(AuthForm::Login));
    }

    pub fn show_register_form(&self) {
        self.update(|s| s.view.show_form(AuthForm::Register));
    }

    pub async fn login(&self, email: &str, password: &str) -> ClientResult<()> {
        let _busy = self.inner.busy.begin();
        let ticket = self.inner.tracker.issue(Action::Session);
        let result = self.inner.api.login(email, password).await;
        if !self.inner.tracker.is_current(&ticket) {
            return Err(ClientError::Superseded);
        }

        match result {
            Ok(auth) => self.start_session(auth, LOGIN_SUCCESS).await,
            Err(e) => {
                tracing::info!(error = %e, "Login rejected");
                self.inner
                    .notifier
                    .error(e.user_message(LOGIN_FAILED, NETWORK_ERROR_RETRY));
                Err(e)
            }
        }
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> ClientResult<()> {
        let _busy = self.inner.busy.begin();
        let ticket = self.inner.tracker.issue(Action::Session);
        let result = self.inner.api.register(username, email, password).await;
        if !self.inner.tracker.is_current(&ticket) {
            return Err(ClientError::Superseded);
        }

        match result {
            Ok(auth) => self.start_session(auth, REGISTER_SUCCESS).await,
            Err(e) => {
                tracing::info!(error = %e, "Registration rejected");
                self.inner
                    .notifier
                    .error(e.user_message(REGISTER_FAILED, NETWORK_ERROR_RETRY));
                Err(e)
            }
        }
    }

    async fn start_session(&self, auth: AuthResponse, message: &str) -> ClientResult<()> {
        if let Err(e) = self.inner.session.save_token(&auth.token) {
            tracing::error!(error = %e, "Could not persist token");
            self.inner.notifier.error(e.to_string());
            return Err(e);
        }

        tracing::info!(user = %auth.user.username, "Session started");
        self.update(|s| {
            s.user = Some(auth.user);
            s.view.enter_app();
        });
        self.inner.notifier.success(message);

        if let Err(e) = self.refresh_dashboard().await {
            tracing::debug!(error = %e, "Initial dashboard load failed");
        }
        Ok(())
    }

    pub fn logout(&self) {
        tracing::info!("Logged out");
        self.end_session();
        self.inner.notifier.success(LOGOUT_SUCCESS);
    }

    /// Drop token and cached data, return to the auth screen
    fn end_session(&self) {
        if let Err(e) = self.inner.session.clear_token() {
            tracing::warn!(error = %e, "Could not clear stored token");
        }
        self.inner.tracker.invalidate_session();
        self.update(|s| {
            s.user = None;
            s.dashboard = None;
            s.leaderboard = None;
            s.view.show_auth();
        });
    }

    fn expire_session(&self) {
        tracing::warn!("Session token rejected by server");
        self.end_session();
        self.inner.notifier.error(SESSION_EXPIRED);
    }

    pub async fn show_dashboard(&self) -> ClientResult<()> {
        if !self.update(|s| s.view.navigate(Section::Dashboard)) {
            return Err(ClientError::NotAuthenticated);
        }
        self.refresh_dashboard().await
    }

    pub async fn show_leaderboard(&self) -> ClientResult<()> {
        if !self.update(|s| s.view.navigate(Section::Leaderboard)) {
            return Err(ClientError::NotAuthenticated);
        }
        self.refresh_leaderboard().await
    }

    /// Navigate to a section by value
    pub async fn show_section(&self, section: Section) -> ClientResult<()> {
        match section {
            Section::Dashboard => self.show_dashboard().await,
            Section::Leaderboard => self.show_leaderboard().await,
        }
    }

    /// Fetch the dashboard and refresh the cached user
    pub async fn refresh_dashboard(&self) -> ClientResult<()> {
        let Some(token) = self.inner.session.token() else {
            self.expire_session();
            return Err(ClientError::NotAuthenticated);
        };

        let _busy = self.inner.busy.begin();
        let ticket = self.inner.tracker.issue(Action::Dashboard);
        let result = self.inner.api.fetch_dashboard(&token).await;
        if !self.inner.tracker.is_current(&ticket) {
            tracing::debug!("Dropping superseded dashboard response");
            return Err(ClientError::Superseded);
        }

        match result {
            Ok(data) => {
                let view = render_dashboard(&data);
                self.update(|s| {
                    s.user = Some(data.user);
                    s.dashboard = Some(view);
                });
                Ok(())
            }
            Err(e) if e.is_auth_failure() => {
                self.expire_session();
                Err(e)
            }
            Err(e) => {
                self.inner
                    .notifier
                    .error(e.user_message(DASHBOARD_FAILED, NETWORK_ERROR));
                Err(e)
            }
        }
    }

    pub async fn refresh_leaderboard(&self) -> ClientResult<()> {
        let _busy = self.inner.busy.begin();
        let ticket = self.inner.tracker.issue(Action::Leaderboard);
        let result = self.inner.api.fetch_leaderboard().await;
        if !self.inner.tracker.is_current(&ticket) {
            tracing::debug!("Dropping superseded leaderboard response");
            return Err(ClientError::Superseded);
        }

        match result {
            Ok(entries) => {
                let view = render_leaderboard(&entries);
                self.update(|s| s.leaderboard = Some(view));
                Ok(())
            }
            Err(e) => {
                self.inner
                    .notifier
                    .error(e.user_message(LEADERBOARD_FAILED, NETWORK_ERROR));
                Err(e)
            }
        }
    }

    /// Submit a solved problem, then reload the dashboard.
    ///
    /// Every submission is its own action: overlapping adds all report,
    /// only a logout in between silences a late response.
    pub async fn add_problem(&self, problem: NewProblem) -> ClientResult<Problem> {
        let Some(token) = self.inner.session.token() else {
            self.expire_session();
            return Err(ClientError::NotAuthenticated);
        };

        let _busy = self.inner.busy.begin();
        let epoch = self.inner.tracker.epoch();
        let result = self.inner.api.add_problem(&token, &problem).await;
        if self.inner.tracker.epoch() != epoch {
            return Err(ClientError::Superseded);
        }

        match result {
            Ok(created) => {
                tracing::info!(title = %created.problem.title, points = created.problem.points, "Problem added");
                self.inner.notifier.success(format!(
                    "Problem added! +{} points",
                    created.problem.points
                ));
                if let Err(e) = self.refresh_dashboard().await {
                    tracing::debug!(error = %e, "Dashboard reload after add failed");
                }
                Ok(created.problem)
            }
            Err(e) if e.is_auth_failure() => {
                self.expire_session();
                Err(e)
            }
            Err(e) => {
                self.inner
                    .notifier
                    .error(e.user_message(ADD_PROBLEM_FAILED, NETWORK_ERROR));
                Err(e)
            }
        }
    }

    /// Flip and persist the theme; returns the new one
    pub fn toggle_theme(&self) -> Theme {
        let next = self.theme().toggled();
        if let Err(e) = self.inner.themes.save(next) {
            tracing::warn!(error = %e, "Could not persist theme");
        }
        self.update(|s| s.theme = next);
        next
    }
}
