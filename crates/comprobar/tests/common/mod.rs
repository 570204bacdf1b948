//! In-process fake storefront implementing the driver boundary.
//!
//! Models just enough of the real site for the scenarios: a login form that
//! redirects to the dashboard on the right credentials, a three-product
//! catalog, and a search box that filters it case-insensitively.

#![allow(dead_code)]

use async_trait::async_trait;
use comprobar::{
    BrowserDriver, ComprobarError, ComprobarResult, Credentials, ElementHandle, LoadState,
    Selector, UrlPattern, WaitOptions, WaitResult,
};
use std::sync::Mutex;
use std::time::Duration;

/// The storefront's full catalog
pub const CATALOG: [&str; 3] = ["ZARA COAT 3", "ADIDAS ORIGINAL", "IPHONE 13 PRO"];

/// Login URL served by the fake
pub const LOGIN_URL: &str = "https://shop.example/client/#/auth/login";

/// Dashboard URL after a successful login
pub const DASHBOARD_URL: &str = "https://shop.example/client/#/dashboard/dash";

#[derive(Debug, Default)]
struct StoreState {
    url: String,
    logged_in: bool,
    email_value: String,
    password_value: String,
    search_value: String,
    active_query: Option<String>,
}

/// Fake storefront driver
#[derive(Debug)]
pub struct FakeStorefront {
    credentials: Credentials,
    state: Mutex<StoreState>,
}

impl FakeStorefront {
    /// Create a fake accepting the given credentials
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            state: Mutex::new(StoreState::default()),
        }
    }

    /// Create a fake accepting the default test-account credentials
    pub fn with_default_account() -> Self {
        Self::new(Credentials::default())
    }

    fn visible_products(state: &StoreState) -> Vec<&'static str> {
        match &state.active_query {
            None => CATALOG.to_vec(),
            Some(query) => {
                let needle = query.to_lowercase();
                CATALOG
                    .iter()
                    .copied()
                    .filter(|name| name.to_lowercase().contains(&needle))
                    .collect()
            }
        }
    }

    fn handle(id: &str, tag: &str) -> ElementHandle {
        ElementHandle::new(id, tag)
    }

    /// Whether a selector's role + accessible-name query matches an element
    fn role_matches(element_role: &str, element_name: &str, sel_role: &str, sel_name: &str) -> bool {
        sel_role == element_role
            && element_name
                .to_lowercase()
                .contains(&sel_name.to_lowercase())
    }
}

#[async_trait]
impl BrowserDriver for FakeStorefront {
    async fn navigate(&self, url: &str) -> ComprobarResult<()> {
        let mut state = self.state.lock().unwrap();
        state.url = url.to_string();
        state.logged_in = url.contains("/dashboard/");
        state.active_query = None;
        Ok(())
    }

    async fn current_url(&self) -> ComprobarResult<String> {
        Ok(self.state.lock().unwrap().url.clone())
    }

    async fn resolve(&self, selector: &Selector) -> ComprobarResult<Vec<ElementHandle>> {
        let state = self.state.lock().unwrap();
        let handles = match selector {
            Selector::Role { role, name } if !state.logged_in => {
                if Self::role_matches("textbox", "email@example.com", role, name) {
                    vec![Self::handle("email-input", "input")]
                } else if Self::role_matches("textbox", "enter your passsword", role, name) {
                    vec![Self::handle("password-input", "input")]
                } else if Self::role_matches("button", "Login", role, name) {
                    vec![Self::handle("login-button", "button")]
                } else {
                    vec![]
                }
            }
            Selector::Role { role, name } if state.logged_in => {
                if Self::role_matches("textbox", "search", role, name) {
                    vec![Self::handle("search-input", "input")]
                } else if Self::role_matches("button", "Sign Out", role, name) {
                    vec![Self::handle("signout-button", "button")]
                } else {
                    vec![]
                }
            }
            Selector::Css(css) if css == ".card-body" && state.logged_in => {
                Self::visible_products(&state)
                    .iter()
                    .enumerate()
                    .map(|(i, _)| Self::handle(&format!("card-{i}"), "div"))
                    .collect()
            }
            Selector::Css(css) if css == "h5.card-title" && state.logged_in => {
                Self::visible_products(&state)
                    .iter()
                    .enumerate()
                    .map(|(i, name)| Self::handle(&format!("title-{i}"), "h5").with_text(*name))
                    .collect()
            }
            Selector::CssWithText { css, text }
                if css == "div" && text == "Showing" && state.logged_in =>
            {
                vec![Self::handle("results-label", "div")]
            }
            _ => vec![],
        };
        Ok(handles)
    }

    async fn click(&self, handle: &ElementHandle) -> ComprobarResult<()> {
        let mut state = self.state.lock().unwrap();
        match handle.id.as_str() {
            "login-button" => {
                if state.email_value == self.credentials.email
                    && state.password_value == self.credentials.password
                {
                    state.url = DASHBOARD_URL.to_string();
                    state.logged_in = true;
                    state.active_query = None;
                }
                Ok(())
            }
            "signout-button" => {
                state.url = LOGIN_URL.to_string();
                state.logged_in = false;
                state.active_query = None;
                state.search_value.clear();
                Ok(())
            }
            _ => Ok(()),
        }
    }

    async fn fill(&self, handle: &ElementHandle, text: &str) -> ComprobarResult<()> {
        let mut state = self.state.lock().unwrap();
        match handle.id.as_str() {
            "email-input" => state.email_value = text.to_string(),
            "password-input" => state.password_value = text.to_string(),
            "search-input" => state.search_value = text.to_string(),
            other => {
                return Err(ComprobarError::InputError {
                    message: format!("{other} is not fillable"),
                })
            }
        }
        Ok(())
    }

    async fn check(&self, _handle: &ElementHandle) -> ComprobarResult<()> {
        Ok(())
    }

    async fn press_key(&self, key: &str) -> ComprobarResult<()> {
        if key == "Enter" {
            let mut state = self.state.lock().unwrap();
            if state.logged_in {
                state.active_query = Some(state.search_value.clone());
            }
        }
        Ok(())
    }

    async fn text_content(&self, handle: &ElementHandle) -> ComprobarResult<String> {
        let state = self.state.lock().unwrap();
        if let Some(index) = handle.id.strip_prefix("title-") {
            let index: usize = index.parse().unwrap_or(usize::MAX);
            return Ok(Self::visible_products(&state)
                .get(index)
                .copied()
                .unwrap_or_default()
                .to_string());
        }
        if handle.id == "results-label" {
            return Ok(format!(
                "Showing {} results |",
                Self::visible_products(&state).len()
            ));
        }
        Ok(handle.text.clone().unwrap_or_default())
    }

    async fn attribute(
        &self,
        _handle: &ElementHandle,
        _name: &str,
    ) -> ComprobarResult<Option<String>> {
        Ok(None)
    }

    async fn is_visible(&self, _handle: &ElementHandle) -> ComprobarResult<bool> {
        Ok(true)
    }

    async fn is_enabled(&self, _handle: &ElementHandle) -> ComprobarResult<bool> {
        Ok(true)
    }

    async fn wait_for_url(
        &self,
        pattern: &UrlPattern,
        options: &WaitOptions,
    ) -> ComprobarResult<WaitResult> {
        let start = std::time::Instant::now();
        loop {
            let url = self.state.lock().unwrap().url.clone();
            if pattern.matches(&url) {
                return Ok(WaitResult::success(
                    start.elapsed(),
                    format!("URL matching {pattern}"),
                ));
            }
            if start.elapsed() >= options.timeout() {
                return Err(ComprobarError::Timeout {
                    ms: options.timeout_ms,
                });
            }
            tokio::time::sleep(options.poll_interval()).await;
        }
    }

    async fn wait_for_load_state(
        &self,
        state: LoadState,
        _options: &WaitOptions,
    ) -> ComprobarResult<WaitResult> {
        Ok(WaitResult::success(Duration::ZERO, state.to_string()))
    }

    async fn screenshot(&self) -> ComprobarResult<Vec<u8>> {
        Ok(Vec::new())
    }

    async fn close(&self) -> ComprobarResult<()> {
        Ok(())
    }
}
