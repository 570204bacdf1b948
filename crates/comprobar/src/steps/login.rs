//! Login workflows.

use crate::config::Credentials;
use crate::driver::BrowserDriver;
use crate::logging::LogContext;
use crate::pages::{LoginPage, DASHBOARD_URL_MARKER};
use crate::result::ComprobarResult;

/// Login-related business workflows
#[derive(Debug)]
pub struct LoginSteps<'d, D: BrowserDriver> {
    page: LoginPage<'d, D>,
    log: LogContext,
}

impl<'d, D: BrowserDriver> LoginSteps<'d, D> {
    /// Create the workflow over a driver
    #[must_use]
    pub fn new(driver: &'d D, log: LogContext) -> Self {
        let page = LoginPage::new(driver, log.child("LoginPage"));
        Self { page, log }
    }

    /// Override the process-wide default timeout for this workflow's actions
    #[must_use]
    pub fn with_default_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.page = self.page.with_default_timeout(timeout);
        self
    }

    /// The underlying page object
    #[must_use]
    pub const fn page(&self) -> &LoginPage<'d, D> {
        &self.page
    }

    /// Navigate to the login page
    pub async fn navigate_to_login(&mut self, url: &str) -> ComprobarResult<()> {
        self.log.step(format!("Navigating to login page: {url}"));
        self.page.navigate(url).await?;
        self.log.info("Successfully navigated to login page");
        Ok(())
    }

    /// Log in and wait for the dashboard redirect
    pub async fn perform_login(&mut self, credentials: &Credentials) -> ComprobarResult<()> {
        self.log
            .step(format!("Performing login with email: {}", credentials.email));
        self.page
            .login(&credentials.email, &credentials.password)
            .await?;
        self.page.await_success(None).await?;
        self.log.info("Login workflow completed successfully");
        Ok(())
    }

    /// Verify the login landed on the dashboard, by URL alone
    pub async fn verify_login_success(&self) -> ComprobarResult<bool> {
        self.log.step("Verifying login success");
        let url = self.page.actions().current_url().await?;
        let success = url.contains(DASHBOARD_URL_MARKER);
        if success {
            self.log.assertion(
                "User successfully logged in and redirected to dashboard",
                true,
            );
        } else {
            self.log.assertion(
                format!("User login failed or not redirected to dashboard. Current URL: {url}"),
                false,
            );
        }
        Ok(success)
    }

    /// Complete flow: log in, then verify the redirect
    pub async fn login_and_verify(&mut self, credentials: &Credentials) -> ComprobarResult<bool> {
        self.log
            .step(format!("Starting login flow for user: {}", credentials.email));
        self.perform_login(credentials).await?;
        self.verify_login_success().await
    }
}
