//! Element Action Layer.
//!
//! Translates a logical locator plus an action into driver calls. Every
//! action first resolves the locator against the current page, polling until
//! at least one element matches within the effective timeout (else
//! `ElementNotFound`), then polls actionability — visible and enabled — within
//! the same deadline (else `NotInteractable`). The effective timeout is the
//! per-call override if given, else the locator's own, else the process-wide
//! default of [`DEFAULT_TIMEOUT_MS`](crate::locator::DEFAULT_TIMEOUT_MS).
//!
//! Read-only queries (`is_visible`, `is_enabled`) never return an error: any
//! underlying failure becomes `false`.

use crate::driver::{BrowserDriver, ElementHandle};
use crate::locator::{Locator, Selector, DEFAULT_TIMEOUT_MS};
use crate::logging::LogContext;
use crate::result::{ComprobarError, ComprobarResult};
use crate::wait::{LoadState, UrlPattern, WaitOptions, WaitResult};
use std::time::{Duration, Instant};

/// The target of an action: still-symbolic, or already resolved.
///
/// Symbolic targets are resolved once at the action boundary; resolved handles
/// are used as-is for the current page state.
#[derive(Debug, Clone)]
pub enum Target {
    /// A locator to resolve against the current page
    Symbolic(Locator),
    /// An element handle from a previous resolution
    Resolved(ElementHandle),
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Symbolic(locator) => locator.fmt(f),
            Self::Resolved(handle) => write!(f, "handle={}", handle.id),
        }
    }
}

impl From<Locator> for Target {
    fn from(locator: Locator) -> Self {
        Self::Symbolic(locator)
    }
}

impl From<&Locator> for Target {
    fn from(locator: &Locator) -> Self {
        Self::Symbolic(locator.clone())
    }
}

impl From<Selector> for Target {
    fn from(selector: Selector) -> Self {
        Self::Symbolic(Locator::from_selector(selector))
    }
}

impl From<ElementHandle> for Target {
    fn from(handle: ElementHandle) -> Self {
        Self::Resolved(handle)
    }
}

/// Element actions bound to one driver.
///
/// Page objects build their screen-specific operations on top of this layer;
/// no layer above it talks to the driver directly.
#[derive(Debug)]
pub struct ElementActions<'d, D: BrowserDriver> {
    driver: &'d D,
    log: LogContext,
    default_timeout: Duration,
    poll_interval: Duration,
}

impl<'d, D: BrowserDriver> ElementActions<'d, D> {
    /// Create an action layer over a driver
    #[must_use]
    pub fn new(driver: &'d D, log: LogContext) -> Self {
        Self {
            driver,
            log,
            default_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(crate::locator::DEFAULT_POLL_INTERVAL_MS),
        }
    }

    /// Override the process-wide default timeout
    #[must_use]
    pub const fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// The underlying driver
    #[must_use]
    pub const fn driver(&self) -> &'d D {
        self.driver
    }

    fn effective_timeout(&self, target: &Target, timeout: Option<Duration>) -> Duration {
        timeout
            .or(match target {
                Target::Symbolic(locator) => locator.options().timeout,
                Target::Resolved(_) => None,
            })
            .unwrap_or(self.default_timeout)
    }

    /// Navigate to a URL and wait for the DOM to be ready
    pub async fn navigate(&self, url: &str) -> ComprobarResult<()> {
        self.log.info(format!("Navigating to URL: {url}"));
        self.driver.navigate(url).await?;
        self.driver
            .wait_for_load_state(LoadState::DomContentLoaded, &WaitOptions::default())
            .await?;
        self.log.info(format!("Successfully navigated to: {url}"));
        Ok(())
    }

    /// Get the current page URL
    pub async fn current_url(&self) -> ComprobarResult<String> {
        let url = self.driver.current_url().await?;
        self.log.debug(format!("Current URL: {url}"));
        Ok(url)
    }

    /// Resolve a target to a single element handle, waiting for the page to
    /// produce a match within the effective timeout
    pub async fn resolve(
        &self,
        target: &Target,
        timeout: Option<Duration>,
    ) -> ComprobarResult<ElementHandle> {
        let locator = match target {
            Target::Resolved(handle) => return Ok(handle.clone()),
            Target::Symbolic(locator) => locator,
        };
        let deadline = self.effective_timeout(target, timeout);
        let start = Instant::now();
        loop {
            let handles = self.driver.resolve(locator.selector()).await?;
            if let Some(first) = handles.into_iter().next() {
                return Ok(first);
            }
            if start.elapsed() >= deadline {
                return Err(ComprobarError::ElementNotFound {
                    selector: locator.to_string(),
                    ms: deadline.as_millis() as u64,
                });
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Resolve every current match without waiting; an empty result set is a
    /// valid answer (e.g. a search with no hits)
    pub async fn resolve_all_now(&self, locator: &Locator) -> ComprobarResult<Vec<ElementHandle>> {
        self.driver.resolve(locator.selector()).await
    }

    async fn ensure_actionable(
        &self,
        target: &Target,
        handle: &ElementHandle,
        deadline: Duration,
        started: Instant,
    ) -> ComprobarResult<()> {
        let require_visible = match target {
            Target::Symbolic(locator) => locator.options().visible,
            Target::Resolved(_) => true,
        };
        loop {
            let visible = !require_visible
                || self.driver.is_visible(handle).await.unwrap_or(false);
            let enabled = self.driver.is_enabled(handle).await.unwrap_or(false);
            if visible && enabled {
                return Ok(());
            }
            if started.elapsed() >= deadline {
                return Err(ComprobarError::NotInteractable {
                    selector: target.to_string(),
                    ms: deadline.as_millis() as u64,
                });
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn actionable(
        &self,
        target: &Target,
        timeout: Option<Duration>,
    ) -> ComprobarResult<ElementHandle> {
        let deadline = self.effective_timeout(target, timeout);
        let start = Instant::now();
        let handle = self.resolve(target, Some(deadline)).await?;
        self.ensure_actionable(target, &handle, deadline, start)
            .await?;
        Ok(handle)
    }

    /// Click an element
    pub async fn click(
        &self,
        target: impl Into<Target>,
        timeout: Option<Duration>,
    ) -> ComprobarResult<()> {
        let target = target.into();
        self.log.info(format!("Clicking on element: {target}"));
        let handle = self.actionable(&target, timeout).await?;
        self.driver.click(&handle).await?;
        self.log.debug(format!("Clicked on element: {target}"));
        Ok(())
    }

    /// Fill text into an input field, replacing its current value
    pub async fn fill(
        &self,
        target: impl Into<Target>,
        text: &str,
        timeout: Option<Duration>,
    ) -> ComprobarResult<()> {
        let target = target.into();
        self.log
            .info(format!("Filling text '{text}' into element: {target}"));
        let handle = self.actionable(&target, timeout).await?;
        self.driver.fill(&handle, text).await?;
        self.log.debug(format!("Filled text into element: {target}"));
        Ok(())
    }

    /// Check a checkbox
    pub async fn check(
        &self,
        target: impl Into<Target>,
        timeout: Option<Duration>,
    ) -> ComprobarResult<()> {
        let target = target.into();
        self.log.info(format!("Checking checkbox: {target}"));
        let handle = self.actionable(&target, timeout).await?;
        self.driver.check(&handle).await
    }

    /// Press a keyboard key on the focused element
    pub async fn press_key(&self, key: &str) -> ComprobarResult<()> {
        self.log.info(format!("Pressing key: {key}"));
        self.driver.press_key(key).await
    }

    /// Get an element's text content
    pub async fn text_of(
        &self,
        target: impl Into<Target>,
        timeout: Option<Duration>,
    ) -> ComprobarResult<String> {
        let target = target.into();
        let handle = self.resolve(&target, timeout).await?;
        let text = self.driver.text_content(&handle).await?;
        self.log
            .debug(format!("Retrieved text '{text}' from element: {target}"));
        Ok(text)
    }

    /// Get an element's attribute value
    pub async fn attribute_of(
        &self,
        target: impl Into<Target>,
        name: &str,
        timeout: Option<Duration>,
    ) -> ComprobarResult<Option<String>> {
        let target = target.into();
        let handle = self.resolve(&target, timeout).await?;
        let value = self.driver.attribute(&handle, name).await?;
        self.log.debug(format!(
            "Retrieved attribute '{name}' = {value:?} from element: {target}"
        ));
        Ok(value)
    }

    /// Text content of every current match, in document order
    pub async fn texts_of_all(&self, locator: &Locator) -> ComprobarResult<Vec<String>> {
        let handles = self.resolve_all_now(locator).await?;
        let mut texts = Vec::with_capacity(handles.len());
        for handle in &handles {
            texts.push(self.driver.text_content(handle).await?);
        }
        self.log
            .debug(format!("Found {} elements for locator: {locator}", texts.len()));
        Ok(texts)
    }

    /// Number of elements currently matching the locator
    pub async fn count(&self, locator: &Locator) -> ComprobarResult<usize> {
        Ok(self.resolve_all_now(locator).await?.len())
    }

    /// Whether the element is visible. Never errors: resolution failures,
    /// timeouts, and driver errors all yield `false`.
    pub async fn is_visible(&self, target: impl Into<Target>, timeout: Option<Duration>) -> bool {
        let target = target.into();
        match self.resolve(&target, timeout).await {
            Ok(handle) => self.driver.is_visible(&handle).await.unwrap_or(false),
            Err(_) => false,
        }
    }

    /// Whether the element is enabled. Never errors, like [`Self::is_visible`].
    pub async fn is_enabled(&self, target: impl Into<Target>, timeout: Option<Duration>) -> bool {
        let target = target.into();
        match self.resolve(&target, timeout).await {
            Ok(handle) => self.driver.is_enabled(&handle).await.unwrap_or(false),
            Err(_) => false,
        }
    }

    /// Wait for the URL to match a pattern
    pub async fn wait_for_url(
        &self,
        pattern: &UrlPattern,
        timeout: Option<Duration>,
    ) -> ComprobarResult<WaitResult> {
        self.log.info(format!("Waiting for URL to match: {pattern}"));
        let options = WaitOptions::new()
            .with_timeout(timeout.unwrap_or(self.default_timeout).as_millis() as u64);
        self.driver.wait_for_url(pattern, &options).await
    }

    /// Wait for the page to reach a load state
    pub async fn wait_for_load_state(
        &self,
        state: LoadState,
        timeout: Option<Duration>,
    ) -> ComprobarResult<WaitResult> {
        self.log.info(format!("Waiting for load state: {state}"));
        let options = WaitOptions::new().with_timeout(
            timeout
                .map_or(state.default_timeout_ms(), |t| t.as_millis() as u64),
        );
        self.driver.wait_for_load_state(state, &options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::MockDriver;

    const FAST: Option<Duration> = Some(Duration::from_millis(50));

    fn actions(driver: &MockDriver) -> ElementActions<'_, MockDriver> {
        ElementActions::new(driver, LogContext::new("ElementActions"))
    }

    #[tokio::test]
    async fn test_click_resolves_then_acts() {
        let driver = MockDriver::new();
        let button = Locator::role("button", "Login");
        driver.add_element(
            button.selector().clone(),
            ElementHandle::new("login-button", "button"),
        );

        actions(&driver).click(&button, FAST).await.unwrap();
        assert!(driver.was_called("click:login-button"));
    }

    #[tokio::test]
    async fn test_missing_element_is_element_not_found() {
        let driver = MockDriver::new();
        let err = actions(&driver)
            .click(Locator::new("#missing"), FAST)
            .await
            .unwrap_err();
        assert!(matches!(err, ComprobarError::ElementNotFound { .. }));
    }

    #[tokio::test]
    async fn test_hidden_element_is_not_interactable() {
        let driver = MockDriver::new();
        let button = Locator::new("#hidden");
        driver.add_element(
            button.selector().clone(),
            ElementHandle::new("hidden-button", "button").with_visible(false),
        );

        let err = actions(&driver).click(&button, FAST).await.unwrap_err();
        assert!(matches!(err, ComprobarError::NotInteractable { .. }));
    }

    #[tokio::test]
    async fn test_disabled_element_is_not_interactable() {
        let driver = MockDriver::new();
        let button = Locator::new("#disabled");
        driver.add_element(
            button.selector().clone(),
            ElementHandle::new("disabled-button", "button").with_enabled(false),
        );

        let err = actions(&driver).click(&button, FAST).await.unwrap_err();
        assert!(matches!(err, ComprobarError::NotInteractable { .. }));
    }

    #[tokio::test]
    async fn test_fill_goes_through_driver() {
        let driver = MockDriver::new();
        let input = Locator::role("textbox", "search");
        driver.add_element(
            input.selector().clone(),
            ElementHandle::new("search-input", "input"),
        );

        actions(&driver).fill(&input, "iphone", FAST).await.unwrap();
        assert_eq!(driver.filled_value("search-input").as_deref(), Some("iphone"));
    }

    #[tokio::test]
    async fn test_is_visible_false_on_any_failure() {
        let driver = MockDriver::new();
        // Nothing registered: resolution fails, query converts it to false
        assert!(!actions(&driver).is_visible(Locator::new("#ghost"), FAST).await);
    }

    #[tokio::test]
    async fn test_is_enabled_false_on_any_failure() {
        let driver = MockDriver::new();
        assert!(!actions(&driver).is_enabled(Locator::new("#ghost"), FAST).await);
    }

    #[tokio::test]
    async fn test_texts_of_all_empty_is_ok() {
        let driver = MockDriver::new();
        let names = actions(&driver)
            .texts_of_all(&Locator::new("h5.card-title"))
            .await
            .unwrap();
        assert!(names.is_empty());
    }

    #[tokio::test]
    async fn test_texts_of_all_in_document_order() {
        let driver = MockDriver::new();
        let titles = Locator::new("h5.card-title");
        driver.add_element(
            titles.selector().clone(),
            ElementHandle::new("t0", "h5").with_text("ZARA COAT 3"),
        );
        driver.add_element(
            titles.selector().clone(),
            ElementHandle::new("t1", "h5").with_text("IPHONE 13 PRO"),
        );

        let names = actions(&driver).texts_of_all(&titles).await.unwrap();
        assert_eq!(names, vec!["ZARA COAT 3", "IPHONE 13 PRO"]);
    }

    #[tokio::test]
    async fn test_count_counts_current_matches() {
        let driver = MockDriver::new();
        let cards = Locator::new(".card-body");
        for i in 0..3 {
            driver.add_element(
                cards.selector().clone(),
                ElementHandle::new(format!("card-{i}"), "div"),
            );
        }
        assert_eq!(actions(&driver).count(&cards).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_resolved_target_skips_resolution() {
        let driver = MockDriver::new();
        let handle = ElementHandle::new("prefetched", "button");
        // Not registered with the driver: lookup during actionability fails,
        // so the click times out as NotInteractable rather than NotFound
        let err = actions(&driver)
            .click(handle, FAST)
            .await
            .unwrap_err();
        assert!(matches!(err, ComprobarError::NotInteractable { .. }));
    }

    #[tokio::test]
    async fn test_locator_timeout_wins_over_default() {
        let driver = MockDriver::new();
        let locator = Locator::new("#missing").with_timeout(Duration::from_millis(30));
        let started = Instant::now();
        let err = actions(&driver).click(&locator, None).await.unwrap_err();
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(matches!(err, ComprobarError::ElementNotFound { ms: 30, .. }));
    }
}
