//! Paged Site Shell
//!
//! A login gate in front of four static pages.
//!
//! - **Auth**: the injected `CredentialVerifier` capability
//! - **Session**: `SessionState`, threaded through every handler
//! - **Pages**: static content and the render pass
//!
//! # State machine
//!
//! ```text
//!  LOGGED_OUT ──login(valid)──▶ LOGGED_IN ──navigate(page)──▶ LOGGED_IN
//!      │                            │
//!      └──login(invalid)──▶ LOGGED_OUT
//! ```
//!
//! Logout and session expiry are not implemented.

mod auth;
mod error;
mod pages;
mod session;

pub use auth::{CredentialVerifier, StaticCredentials};
pub use error::{SiteError, SiteResult};
pub use pages::{
    render_page, render_site, LoginForm, MetricTile, MonthlySales, NavItem, PageContent,
    SiteBody, SiteView, FOOTER_TEXT, SITE_TITLE,
};
pub use session::{AuthState, LoginOutcome, Page, SessionState};

use std::sync::Arc;
use std::time::Duration;

/// The site shell as a host drives it
pub struct Site {
    verifier: Arc<dyn CredentialVerifier>,
    landing_page: Page,
    login_delay: Duration,
}

impl Site {
    pub fn new(verifier: Arc<dyn CredentialVerifier>, landing_page: Page, login_delay: Duration) -> Self {
        Self {
            verifier,
            landing_page,
            login_delay,
        }
    }

    /// Start a new logged-out session
    pub fn start_session(&self) -> SessionState {
        SessionState::new(self.landing_page)
    }

    /// Pause the host applies after a successful login before re-rendering
    pub fn login_delay(&self) -> Duration {
        self.login_delay
    }

    pub fn login(&self, session: SessionState, username: &str, password: &str) -> (SessionState, LoginOutcome) {
        session.login(self.verifier.as_ref(), username, password)
    }

    pub fn navigate(&self, session: SessionState, page: Page) -> SiteResult<SessionState> {
        session.navigate(page)
    }

    pub fn render(&self, session: &SessionState) -> SiteView {
        render_site(session)
    }
}
