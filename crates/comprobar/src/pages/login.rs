//! Page object for the login screen.

use super::DASHBOARD_URL_MARKER;
use crate::actions::ElementActions;
use crate::driver::BrowserDriver;
use crate::locator::Locator;
use crate::logging::LogContext;
use crate::result::{ComprobarError, ComprobarResult};
use crate::wait::{LoadState, UrlPattern};
use std::time::Duration;

/// Login page lifecycle.
///
/// `enter_email`/`enter_password` are valid only on the form; `submit` moves
/// to `Authenticating`; `await_success` settles into `OnDashboard` or
/// `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    /// The login page has not been navigated to yet
    NotLoaded,
    /// The login form is displayed
    OnLoginForm,
    /// Credentials submitted, navigation in flight
    Authenticating,
    /// The dashboard URL was reached
    OnDashboard,
    /// The dashboard URL was not reached within the timeout
    Failed,
}

/// Page object for the login page
#[derive(Debug)]
pub struct LoginPage<'d, D: BrowserDriver> {
    actions: ElementActions<'d, D>,
    log: LogContext,
    state: LoginState,
    email_input: Locator,
    password_input: Locator,
    login_button: Locator,
}

impl<'d, D: BrowserDriver> LoginPage<'d, D> {
    /// Create the page object over a driver
    #[must_use]
    pub fn new(driver: &'d D, log: LogContext) -> Self {
        Self {
            actions: ElementActions::new(driver, log.clone()),
            log,
            state: LoginState::NotLoaded,
            // Accessible names as the storefront renders them; the password
            // placeholder typo is the site's own
            email_input: Locator::role("textbox", "email@example.com"),
            password_input: Locator::role("textbox", "enter your passsword"),
            login_button: Locator::role("button", "Login"),
        }
    }

    /// Override the process-wide default timeout for this page's actions
    #[must_use]
    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.actions = self.actions.with_default_timeout(timeout);
        self
    }

    /// Current lifecycle state
    #[must_use]
    pub const fn state(&self) -> LoginState {
        self.state
    }

    /// The action layer, for composing with other pages in a workflow
    #[must_use]
    pub const fn actions(&self) -> &ElementActions<'d, D> {
        &self.actions
    }

    fn require(&self, expected: LoginState, operation: &str) -> ComprobarResult<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(ComprobarError::InvalidState {
                message: format!(
                    "{operation} requires {expected:?} but the login page is {:?}",
                    self.state
                ),
            })
        }
    }

    /// Navigate to the login page
    pub async fn navigate(&mut self, url: &str) -> ComprobarResult<()> {
        self.actions.navigate(url).await?;
        self.state = LoginState::OnLoginForm;
        Ok(())
    }

    /// Enter the email address. Valid only on the login form.
    pub async fn enter_email(&mut self, email: &str) -> ComprobarResult<()> {
        self.require(LoginState::OnLoginForm, "enter_email")?;
        self.log.info(format!("Entering email: {email}"));
        self.actions.fill(&self.email_input, email, None).await
    }

    /// Enter the password. Valid only on the login form.
    pub async fn enter_password(&mut self, password: &str) -> ComprobarResult<()> {
        self.require(LoginState::OnLoginForm, "enter_password")?;
        self.log.info("Entering password");
        self.actions.fill(&self.password_input, password, None).await
    }

    /// Click the login button and wait out the triggered navigation.
    /// Transitions `OnLoginForm → Authenticating`.
    pub async fn submit(&mut self) -> ComprobarResult<()> {
        self.require(LoginState::OnLoginForm, "submit")?;
        self.log.info("Clicking login button");
        self.actions.click(&self.login_button, None).await?;
        self.state = LoginState::Authenticating;
        self.actions
            .wait_for_load_state(LoadState::NetworkIdle, None)
            .await?;
        Ok(())
    }

    /// Wait for the dashboard URL.
    ///
    /// Success is the URL containing [`DASHBOARD_URL_MARKER`]; on a match the
    /// page is `OnDashboard`, on expiry it is `Failed` and the call fails with
    /// `LoginTimeout`.
    pub async fn await_success(&mut self, timeout: Option<Duration>) -> ComprobarResult<()> {
        self.require(LoginState::Authenticating, "await_success")?;
        self.log.info("Waiting for successful login");
        let pattern = UrlPattern::contains(DASHBOARD_URL_MARKER);
        match self.actions.wait_for_url(&pattern, timeout).await {
            Ok(_) => {
                self.state = LoginState::OnDashboard;
                self.log.info("Successfully navigated to dashboard");
                Ok(())
            }
            Err(ComprobarError::Timeout { ms }) => {
                self.state = LoginState::Failed;
                let last_url = self.actions.current_url().await.unwrap_or_default();
                Err(ComprobarError::LoginTimeout { ms, last_url })
            }
            Err(other) => {
                self.state = LoginState::Failed;
                Err(other)
            }
        }
    }

    /// Fill both credentials and submit
    pub async fn login(&mut self, email: &str, password: &str) -> ComprobarResult<()> {
        self.log.info(format!("Performing login with email: {email}"));
        self.enter_email(email).await?;
        self.enter_password(password).await?;
        self.submit().await
    }

    /// Whether the login form is currently displayed
    pub async fn is_on_login_form(&self) -> bool {
        self.actions.is_visible(&self.login_button, None).await
            && self.actions.is_visible(&self.email_input, None).await
    }
}
