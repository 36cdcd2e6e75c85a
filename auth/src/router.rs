//! Screen routing.

use crate::state::{AuthState, Mode};

/// Which screen the shell should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// The auth form, in one of its three variants.
    AuthForm(Mode),

    /// The signed-in dashboard.
    Dashboard,
}

/// Derive the screen from state.
///
/// Session presence is the only input: any session shows the dashboard,
/// none shows the form. There is no intermediate screen.
#[must_use]
pub fn route(state: &AuthState) -> Screen {
    if state.session.is_some() {
        Screen::Dashboard
    } else {
        Screen::AuthForm(state.mode)
    }
}
