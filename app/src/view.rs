//! Terminal rendering of the two screens.

use crate::dashboard::stat_cards;
use cantina_auth::router::Screen;
use cantina_auth::state::{AuthState, Feedback, Mode};

/// Render the current screen to a string.
#[must_use]
pub fn render(state: &AuthState) -> String {
    match cantina_auth::router::route(state) {
        Screen::AuthForm(mode) => render_form(state, mode),
        Screen::Dashboard => render_dashboard(state),
    }
}

fn render_form(state: &AuthState, mode: Mode) -> String {
    let mut out = String::new();
    out.push_str(&format!("── Cantina · {} ──\n", mode.title()));
    out.push_str(&format!("  email:    {}\n", state.draft.email));

    // The reset form has no password field.
    if !matches!(mode, Mode::ResetRequest) {
        let masked = "*".repeat(state.draft.password.len());
        out.push_str(&format!("  password: {masked}\n"));
    }

    match &state.feedback {
        Feedback::None => {}
        Feedback::Error(message) => out.push_str(&format!("  ✗ {message}\n")),
        Feedback::Info(message) => out.push_str(&format!("  ✓ {message}\n")),
    }

    if state.loading {
        out.push_str("  …working\n");
    }

    out.push_str(match mode {
        Mode::SignIn => "  [submit] [create] [forgot] [oauth google|github]\n",
        Mode::SignUp | Mode::ResetRequest => "  [submit] [back]\n",
    });

    out
}

fn render_dashboard(state: &AuthState) -> String {
    let email = state
        .session
        .as_ref()
        .map_or("", |session| session.user.email.as_str());

    let mut out = String::new();
    out.push_str(&format!("── Cantina Dashboard · {email} ──\n"));
    for card in stat_cards() {
        out.push_str(&format!("  {:<12} {}\n", card.label, card.value));
    }
    out.push_str("  [signout] [quit]\n");
    out
}
