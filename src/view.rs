//! View state machine
//!
//! Exactly one top-level screen is visible at a time. The screens are the
//! variants of [`ViewState`], so two can never be shown together.
//!
//! ```text
//!            login / register ok
//!   Auth ───────────────────────────▶ Dashboard ◀──┐
//!    ▲                                   │         │ navigate
//!    │ logout / session invalid          ▼         │
//!    └──────────────────────────────  Leaderboard ─┘
//! ```

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Auth,
    Dashboard,
    Leaderboard,
}

/// Sections reachable from the navigation bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Dashboard,
    Leaderboard,
}

impl Section {
    pub const ALL: [Section; 2] = [Section::Dashboard, Section::Leaderboard];

    pub fn label(&self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Leaderboard => "Leaderboard",
        }
    }
}

impl From<Section> for ViewState {
    fn from(section: Section) -> Self {
        match section {
            Section::Dashboard => ViewState::Dashboard,
            Section::Leaderboard => ViewState::Leaderboard,
        }
    }
}

/// Which form the auth screen shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthForm {
    #[default]
    Login,
    Register,
}

/// Display flags for each element the view state drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    pub auth: bool,
    pub navbar: bool,
    pub dashboard: bool,
    pub leaderboard: bool,
    pub login_form: bool,
    pub register_form: bool,
}

impl Visibility {
    /// How many of the three screens are shown (always 1)
    pub fn screens_shown(&self) -> usize {
        [self.auth, self.dashboard, self.leaderboard]
            .iter()
            .filter(|shown| **shown)
            .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewController {
    current: ViewState,
    auth_form: AuthForm,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> ViewState {
        self.current
    }

    pub fn auth_form(&self) -> AuthForm {
        self.auth_form
    }

    pub fn is_authenticated_view(&self) -> bool {
        self.current != ViewState::Auth
    }

    /// Go to the auth screen, login form first
    pub fn show_auth(&mut self) {
        self.current = ViewState::Auth;
        self.auth_form = AuthForm::Login;
    }

    /// Switch between login and register; only meaningful on the auth screen
    pub fn show_form(&mut self, form: AuthForm) {
        self.auth_form = form;
    }

    /// Leave the auth screen after a successful login or registration
    pub fn enter_app(&mut self) {
        self.current = ViewState::Dashboard;
    }

    /// Move to a section. Ignored on the auth screen. Returns whether the
    /// section is now showing (callers refetch on every entry).
    pub fn navigate(&mut self, section: Section) -> bool {
        if self.current == ViewState::Auth {
            return false;
        }
        self.current = section.into();
        true
    }

    /// Navigation control highlight
    pub fn is_active(&self, section: Section) -> bool {
        self.current == ViewState::from(section)
    }

    pub fn visibility(&self) -> Visibility {
        let auth = self.current == ViewState::Auth;
        Visibility {
            auth,
            navbar: !auth,
            dashboard: self.current == ViewState::Dashboard,
            leaderboard: self.current == ViewState::Leaderboard,
            login_form: auth && self.auth_form == AuthForm::Login,
            register_form: auth && self.auth_form == AuthForm::Register,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_auth() {
        let view = ViewController::new();
        assert_eq!(view.current(), ViewState::Auth);
        let vis = view.visibility();
        assert!(vis.auth && vis.login_form);
        assert!(!vis.navbar && !vis.register_form);
    }

    #[test]
    fn test_navigation_ignored_until_authenticated() {
        let mut view = ViewController::new();
        assert!(!view.navigate(Section::Leaderboard));
        assert_eq!(view.current(), ViewState::Auth);

        view.enter_app();
        assert!(view.navigate(Section::Leaderboard));
        assert_eq!(view.current(), ViewState::Leaderboard);
        assert!(view.is_active(Section::Leaderboard));
        assert!(!view.is_active(Section::Dashboard));
    }

    #[test]
    fn test_exactly_one_screen_after_any_step() {
        enum Step {
            EnterApp,
            Go(Section),
            Logout,
            Form(AuthForm),
        }

        let mut view = ViewController::new();
        let steps = [
            Step::EnterApp,
            Step::Go(Section::Leaderboard),
            Step::Go(Section::Dashboard),
            Step::Go(Section::Dashboard),
            Step::Logout,
            Step::Form(AuthForm::Register),
            Step::Go(Section::Leaderboard),
        ];

        for step in steps {
            match step {
                Step::EnterApp => view.enter_app(),
                Step::Go(section) => {
                    view.navigate(section);
                }
                Step::Logout => view.show_auth(),
                Step::Form(form) => view.show_form(form),
            }
            let vis = view.visibility();
            assert_eq!(vis.screens_shown(), 1);
            assert_eq!(vis.navbar, !vis.auth);
        }
    }

    #[test]
    fn test_show_auth_resets_form() {
        let mut view = ViewController::new();
        view.show_form(AuthForm::Register);
        assert!(view.visibility().register_form);

        view.enter_app();
        let vis = view.visibility();
        assert!(!vis.register_form && !vis.login_form);

        view.show_auth();
        assert_eq!(view.auth_form(), AuthForm::Login);
    }
}
