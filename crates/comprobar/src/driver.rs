//! Abstract browser-automation boundary.
//!
//! The framework never talks to a browser directly: everything goes through
//! the [`BrowserDriver`] trait, whose capability set is deliberately small
//! (navigate, resolve, act, query, wait). The default backend is
//! [`ChromiumDriver`], a CDP implementation via chromiumoxide behind the
//! `browser` feature. Unit tests use [`MockDriver`]; the integration suite
//! drives an in-process fake storefront implementing the same trait.
//!
//! Handles are transient: an [`ElementHandle`] records the query it came from
//! and its match index so a backend can re-resolve at act time. Nothing caches
//! element state across page mutations.

use crate::locator::Selector;
use crate::result::ComprobarResult;
use crate::wait::{LoadState, UrlPattern, WaitOptions, WaitResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A resolved reference to a DOM element.
///
/// Valid only for the page state it was resolved against; backends may
/// re-resolve from `query` + `index` when acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Backend-assigned identifier
    pub id: String,
    /// The query expression this handle was resolved from
    pub query: String,
    /// Index of this element among the query's matches
    pub index: usize,
    /// Element tag name
    pub tag_name: String,
    /// Element text content at resolution time
    pub text: Option<String>,
    /// Whether the element was visible at resolution time
    pub visible: bool,
    /// Whether the element was enabled at resolution time
    pub enabled: bool,
}

impl ElementHandle {
    /// Create a new element handle
    #[must_use]
    pub fn new(id: impl Into<String>, tag_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            query: String::new(),
            index: 0,
            tag_name: tag_name.into(),
            text: None,
            visible: true,
            enabled: true,
        }
    }

    /// Set the originating query and match index
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>, index: usize) -> Self {
        self.query = query.into();
        self.index = index;
        self
    }

    /// Set the text content
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set visibility
    #[must_use]
    pub const fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Set enabled state
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Browser configuration for driver backends
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Timeout for navigation
    pub navigation_timeout: Duration,
    /// Executable path override
    pub executable_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1920,
            viewport_height: 1080,
            navigation_timeout: Duration::from_secs(30),
            executable_path: None,
            sandbox: true,
        }
    }
}

impl DriverConfig {
    /// Create new config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set headless mode
    #[must_use]
    pub const fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set viewport dimensions
    #[must_use]
    pub const fn viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set navigation timeout
    #[must_use]
    pub const fn navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout = timeout;
        self
    }

    /// Set browser executable path
    #[must_use]
    pub fn executable_path(mut self, path: impl Into<String>) -> Self {
        self.executable_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

/// Abstract driver trait for browser automation.
///
/// Any conformant browser-automation library satisfies this boundary; the
/// framework adds no DOM or event logic of its own on top of it.
#[async_trait]
pub trait BrowserDriver: Send + Sync {
    /// Navigate to a URL
    async fn navigate(&self, url: &str) -> ComprobarResult<()>;

    /// Get the current page URL
    async fn current_url(&self) -> ComprobarResult<String>;

    /// Resolve a selector against the current page
    async fn resolve(&self, selector: &Selector) -> ComprobarResult<Vec<ElementHandle>>;

    /// Click an element
    async fn click(&self, handle: &ElementHandle) -> ComprobarResult<()>;

    /// Fill an input element with text, replacing its current value
    async fn fill(&self, handle: &ElementHandle, text: &str) -> ComprobarResult<()>;

    /// Check a checkbox element
    async fn check(&self, handle: &ElementHandle) -> ComprobarResult<()>;

    /// Press a keyboard key on the focused element
    async fn press_key(&self, key: &str) -> ComprobarResult<()>;

    /// Get an element's text content
    async fn text_content(&self, handle: &ElementHandle) -> ComprobarResult<String>;

    /// Get an element's attribute value
    async fn attribute(
        &self,
        handle: &ElementHandle,
        name: &str,
    ) -> ComprobarResult<Option<String>>;

    /// Check whether an element is currently visible
    async fn is_visible(&self, handle: &ElementHandle) -> ComprobarResult<bool>;

    /// Check whether an element is currently enabled
    async fn is_enabled(&self, handle: &ElementHandle) -> ComprobarResult<bool>;

    /// Wait for the URL to match a pattern
    async fn wait_for_url(
        &self,
        pattern: &UrlPattern,
        options: &WaitOptions,
    ) -> ComprobarResult<WaitResult>;

    /// Wait for the page to reach a load state
    async fn wait_for_load_state(
        &self,
        state: LoadState,
        options: &WaitOptions,
    ) -> ComprobarResult<WaitResult>;

    /// Capture a PNG screenshot of the current page
    async fn screenshot(&self) -> ComprobarResult<Vec<u8>>;

    /// Close the browser
    async fn close(&self) -> ComprobarResult<()>;
}

// ============================================================================
// Mock driver for unit testing
// ============================================================================

/// Scriptable in-memory driver for unit tests.
///
/// Elements are registered per selector; clicks can be scripted to change the
/// URL, which is how login-style navigation is simulated without a browser.
#[derive(Debug, Default)]
pub struct MockDriver {
    state: std::sync::Mutex<MockState>,
}

#[derive(Debug, Default)]
struct MockState {
    url: String,
    elements: Vec<(Selector, ElementHandle)>,
    filled: std::collections::HashMap<String, String>,
    navigate_on_click: std::collections::HashMap<String, String>,
    call_history: Vec<String>,
}

impl MockDriver {
    /// Create a new mock driver
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current URL
    pub fn set_url(&self, url: impl Into<String>) {
        self.state.lock().unwrap().url = url.into();
    }

    /// Register an element under a selector
    pub fn add_element(&self, selector: Selector, handle: ElementHandle) {
        self.state.lock().unwrap().elements.push((selector, handle));
    }

    /// Remove all elements registered under a selector
    pub fn clear_elements(&self, selector: &Selector) {
        self.state
            .lock()
            .unwrap()
            .elements
            .retain(|(s, _)| s != selector);
    }

    /// Script a URL change when the element with `id` is clicked
    pub fn navigate_on_click(&self, id: impl Into<String>, url: impl Into<String>) {
        self.state
            .lock()
            .unwrap()
            .navigate_on_click
            .insert(id.into(), url.into());
    }

    /// Value last filled into the element with `id`
    #[must_use]
    pub fn filled_value(&self, id: &str) -> Option<String> {
        self.state.lock().unwrap().filled.get(id).cloned()
    }

    /// Recorded call history
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.state.lock().unwrap().call_history.clone()
    }

    /// Check if a method was called
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .call_history
            .iter()
            .any(|c| c.starts_with(method))
    }

    fn record(&self, call: String) {
        self.state.lock().unwrap().call_history.push(call);
    }

    fn lookup(&self, id: &str) -> ComprobarResult<ElementHandle> {
        self.state
            .lock()
            .unwrap()
            .elements
            .iter()
            .map(|(_, h)| h)
            .find(|h| h.id == id)
            .cloned()
            .ok_or_else(|| crate::result::ComprobarError::PageError {
                message: format!("no such element: {id}"),
            })
    }
}

#[async_trait]
impl BrowserDriver for MockDriver {
    async fn navigate(&self, url: &str) -> ComprobarResult<()> {
        self.record(format!("navigate:{url}"));
        self.set_url(url);
        Ok(())
    }

    async fn current_url(&self) -> ComprobarResult<String> {
        Ok(self.state.lock().unwrap().url.clone())
    }

    async fn resolve(&self, selector: &Selector) -> ComprobarResult<Vec<ElementHandle>> {
        self.record(format!("resolve:{selector}"));
        Ok(self
            .state
            .lock()
            .unwrap()
            .elements
            .iter()
            .filter(|(s, _)| s == selector)
            .map(|(_, h)| h.clone())
            .collect())
    }

    async fn click(&self, handle: &ElementHandle) -> ComprobarResult<()> {
        self.record(format!("click:{}", handle.id));
        let target = self
            .state
            .lock()
            .unwrap()
            .navigate_on_click
            .get(&handle.id)
            .cloned();
        if let Some(url) = target {
            self.set_url(url);
        }
        Ok(())
    }

    async fn fill(&self, handle: &ElementHandle, text: &str) -> ComprobarResult<()> {
        self.record(format!("fill:{}={text}", handle.id));
        self.state
            .lock()
            .unwrap()
            .filled
            .insert(handle.id.clone(), text.to_string());
        Ok(())
    }

    async fn check(&self, handle: &ElementHandle) -> ComprobarResult<()> {
        self.record(format!("check:{}", handle.id));
        Ok(())
    }

    async fn press_key(&self, key: &str) -> ComprobarResult<()> {
        self.record(format!("press_key:{key}"));
        Ok(())
    }

    async fn text_content(&self, handle: &ElementHandle) -> ComprobarResult<String> {
        Ok(self.lookup(&handle.id)?.text.unwrap_or_default())
    }

    async fn attribute(
        &self,
        handle: &ElementHandle,
        name: &str,
    ) -> ComprobarResult<Option<String>> {
        self.record(format!("attribute:{}:{name}", handle.id));
        Ok(None)
    }

    async fn is_visible(&self, handle: &ElementHandle) -> ComprobarResult<bool> {
        Ok(self.lookup(&handle.id)?.visible)
    }

    async fn is_enabled(&self, handle: &ElementHandle) -> ComprobarResult<bool> {
        Ok(self.lookup(&handle.id)?.enabled)
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
                return Err(crate::result::ComprobarError::Timeout {
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
        self.record(format!("wait_for_load_state:{state}"));
        Ok(WaitResult::success(Duration::ZERO, state.to_string()))
    }

    async fn screenshot(&self) -> ComprobarResult<Vec<u8>> {
        self.record("screenshot".to_string());
        Ok(Vec::new())
    }

    async fn close(&self) -> ComprobarResult<()> {
        self.record("close".to_string());
        Ok(())
    }
}

// ============================================================================
// Real CDP implementation (when `browser` feature is enabled)
// ============================================================================

#[cfg(feature = "browser")]
mod cdp {
    use super::{
        BrowserDriver, ComprobarResult, DriverConfig, ElementHandle, LoadState, Selector,
        UrlPattern, WaitOptions, WaitResult,
    };
    use crate::result::ComprobarError;
    use async_trait::async_trait;
    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::cdp::browser_protocol::input::{
        DispatchKeyEventParams, DispatchKeyEventType,
    };
    use chromiumoxide::cdp::browser_protocol::page::{
        CaptureScreenshotFormat, CaptureScreenshotParams,
    };
    use chromiumoxide::page::Page as CdpPage;
    use futures::StreamExt;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    /// CDP-backed driver using chromiumoxide.
    ///
    /// Element interaction happens through page-context JavaScript evaluated
    /// over the selector's query expression; handles are re-resolved from
    /// `query` + `index` on every act, matching the no-caching locator model.
    #[derive(Debug)]
    pub struct ChromiumDriver {
        config: DriverConfig,
        browser: Arc<Mutex<CdpBrowser>>,
        page: Arc<Mutex<CdpPage>>,
        #[allow(dead_code)]
        handler: tokio::task::JoinHandle<()>,
    }

    impl ChromiumDriver {
        /// Launch a browser and open a blank page
        pub async fn launch(config: DriverConfig) -> ComprobarResult<Self> {
            let mut builder = CdpConfig::builder();

            if !config.headless {
                builder = builder.with_head();
            }
            if !config.sandbox {
                builder = builder.no_sandbox();
            }
            if let Some(ref path) = config.executable_path {
                builder = builder.chrome_executable(path);
            }
            builder = builder.window_size(config.viewport_width, config.viewport_height);

            let cdp_config = builder
                .build()
                .map_err(|e| ComprobarError::BrowserLaunchError { message: e })?;

            let (browser, mut handler) = CdpBrowser::launch(cdp_config).await.map_err(|e| {
                ComprobarError::BrowserLaunchError {
                    message: e.to_string(),
                }
            })?;

            let handle = tokio::spawn(async move {
                while let Some(h) = handler.next().await {
                    if h.is_err() {
                        break;
                    }
                }
            });

            let page = browser
                .new_page("about:blank")
                .await
                .map_err(|e| ComprobarError::PageError {
                    message: e.to_string(),
                })?;

            Ok(Self {
                config,
                browser: Arc::new(Mutex::new(browser)),
                page: Arc::new(Mutex::new(page)),
                handler: handle,
            })
        }

        /// Get the driver configuration
        #[must_use]
        pub const fn config(&self) -> &DriverConfig {
            &self.config
        }

        async fn eval_json(&self, expr: &str) -> ComprobarResult<serde_json::Value> {
            let page = self.page.lock().await;
            let result = page
                .evaluate(expr)
                .await
                .map_err(|e| ComprobarError::PageError {
                    message: e.to_string(),
                })?;
            result.into_value().map_err(|e| ComprobarError::PageError {
                message: e.to_string(),
            })
        }

        /// JS expression addressing the element a handle was resolved from
        fn element_expr(handle: &ElementHandle) -> String {
            format!("({})[{}]", handle.query, handle.index)
        }

        async fn key_event(
            &self,
            kind: DispatchKeyEventType,
            key: &str,
            text: Option<&str>,
        ) -> ComprobarResult<()> {
            let mut builder = DispatchKeyEventParams::builder().r#type(kind).key(key);
            if let Some(text) = text {
                builder = builder.text(text);
            }
            let params = builder
                .build()
                .map_err(|e| ComprobarError::InputError { message: e })?;
            let page = self.page.lock().await;
            page.execute(params)
                .await
                .map_err(|e| ComprobarError::InputError {
                    message: e.to_string(),
                })?;
            Ok(())
        }
    }

    #[async_trait]
    impl BrowserDriver for ChromiumDriver {
        async fn navigate(&self, url: &str) -> ComprobarResult<()> {
            let page = self.page.lock().await;
            page.goto(url)
                .await
                .map_err(|e| ComprobarError::NavigationError {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
            Ok(())
        }

        async fn current_url(&self) -> ComprobarResult<String> {
            let page = self.page.lock().await;
            let url = page.url().await.map_err(|e| ComprobarError::PageError {
                message: e.to_string(),
            })?;
            Ok(url.unwrap_or_else(|| "about:blank".to_string()))
        }

        async fn resolve(&self, selector: &Selector) -> ComprobarResult<Vec<ElementHandle>> {
            let query = selector.to_all_query();
            let expr = format!(
                "{query}.map(el => ({{ \
                   tag: el.tagName.toLowerCase(), \
                   text: el.textContent, \
                   visible: !!(el.offsetWidth || el.offsetHeight || el.getClientRects().length), \
                   enabled: !el.disabled \
                 }}))"
            );
            let value = self.eval_json(&expr).await?;
            let metas: Vec<serde_json::Value> = serde_json::from_value(value)?;
            Ok(metas
                .into_iter()
                .enumerate()
                .map(|(index, meta)| ElementHandle {
                    id: format!("{selector}[{index}]"),
                    query: query.clone(),
                    index,
                    tag_name: meta["tag"].as_str().unwrap_or_default().to_string(),
                    text: meta["text"].as_str().map(str::to_string),
                    visible: meta["visible"].as_bool().unwrap_or(false),
                    enabled: meta["enabled"].as_bool().unwrap_or(false),
                })
                .collect())
        }

        async fn click(&self, handle: &ElementHandle) -> ComprobarResult<()> {
            let el = Self::element_expr(handle);
            let expr = format!(
                "(() => {{ const el = {el}; \
                   if (!el) throw new Error('element gone'); \
                   el.scrollIntoView({{ block: 'center' }}); \
                   el.click(); return true; }})()"
            );
            self.eval_json(&expr).await.map(|_| ())
        }

        async fn fill(&self, handle: &ElementHandle, text: &str) -> ComprobarResult<()> {
            // Set the value through the native setter and fire input/change so
            // framework-bound inputs (Angular/React) observe the edit.
            let el = Self::element_expr(handle);
            let expr = format!(
                "(() => {{ const el = {el}; \
                   if (!el) throw new Error('element gone'); \
                   el.focus(); \
                   const proto = Object.getPrototypeOf(el); \
                   const setter = Object.getOwnPropertyDescriptor(proto, 'value').set; \
                   setter.call(el, {text:?}); \
                   el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
                   el.dispatchEvent(new Event('change', {{ bubbles: true }})); \
                   return true; }})()"
            );
            self.eval_json(&expr).await.map(|_| ())
        }

        async fn check(&self, handle: &ElementHandle) -> ComprobarResult<()> {
            let el = Self::element_expr(handle);
            let expr = format!(
                "(() => {{ const el = {el}; \
                   if (!el) throw new Error('element gone'); \
                   if (!el.checked) el.click(); return true; }})()"
            );
            self.eval_json(&expr).await.map(|_| ())
        }

        async fn press_key(&self, key: &str) -> ComprobarResult<()> {
            let text = match key {
                "Enter" => Some("\r"),
                _ => None,
            };
            self.key_event(DispatchKeyEventType::KeyDown, key, text)
                .await?;
            self.key_event(DispatchKeyEventType::KeyUp, key, None).await
        }

        async fn text_content(&self, handle: &ElementHandle) -> ComprobarResult<String> {
            let el = Self::element_expr(handle);
            let value = self
                .eval_json(&format!("({el} && {el}.textContent) || ''"))
                .await?;
            Ok(value.as_str().unwrap_or_default().to_string())
        }

        async fn attribute(
            &self,
            handle: &ElementHandle,
            name: &str,
        ) -> ComprobarResult<Option<String>> {
            let el = Self::element_expr(handle);
            let value = self
                .eval_json(&format!("{el} ? {el}.getAttribute({name:?}) : null"))
                .await?;
            Ok(value.as_str().map(str::to_string))
        }

        async fn is_visible(&self, handle: &ElementHandle) -> ComprobarResult<bool> {
            let el = Self::element_expr(handle);
            let value = self
                .eval_json(&format!(
                    "(() => {{ const el = {el}; \
                       return !!el && !!(el.offsetWidth || el.offsetHeight || \
                       el.getClientRects().length); }})()"
                ))
                .await?;
            Ok(value.as_bool().unwrap_or(false))
        }

        async fn is_enabled(&self, handle: &ElementHandle) -> ComprobarResult<bool> {
            let el = Self::element_expr(handle);
            let value = self
                .eval_json(&format!("(() => {{ const el = {el}; return !!el && !el.disabled; }})()"))
                .await?;
            Ok(value.as_bool().unwrap_or(false))
        }

        async fn wait_for_url(
            &self,
            pattern: &UrlPattern,
            options: &WaitOptions,
        ) -> ComprobarResult<WaitResult> {
            let start = std::time::Instant::now();
            loop {
                let url = self.current_url().await?;
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
            options: &WaitOptions,
        ) -> ComprobarResult<WaitResult> {
            let start = std::time::Instant::now();
            let wanted = match state {
                LoadState::DomContentLoaded => "interactive",
                LoadState::Load | LoadState::NetworkIdle => "complete",
            };
            loop {
                let ready = self.eval_json("document.readyState").await?;
                let ready = ready.as_str().unwrap_or_default();
                let reached = ready == "complete" || ready == wanted;
                if reached {
                    if state == LoadState::NetworkIdle {
                        // CDP exposes no direct idle signal here; settle for a
                        // quiescence window after the load event.
                        tokio::time::sleep(std::time::Duration::from_millis(
                            crate::wait::NETWORK_IDLE_THRESHOLD_MS,
                        ))
                        .await;
                    }
                    return Ok(WaitResult::success(start.elapsed(), state.to_string()));
                }
                if start.elapsed() >= options.timeout() {
                    return Err(ComprobarError::Timeout {
                        ms: options.timeout_ms,
                    });
                }
                tokio::time::sleep(options.poll_interval()).await;
            }
        }

        async fn screenshot(&self) -> ComprobarResult<Vec<u8>> {
            let page = self.page.lock().await;
            let params = CaptureScreenshotParams::builder()
                .format(CaptureScreenshotFormat::Png)
                .build();
            let shot = page
                .execute(params)
                .await
                .map_err(|e| ComprobarError::PageError {
                    message: e.to_string(),
                })?;
            use base64::Engine;
            base64::engine::general_purpose::STANDARD
                .decode(&shot.data)
                .map_err(|e| ComprobarError::PageError {
                    message: e.to_string(),
                })
        }

        async fn close(&self) -> ComprobarResult<()> {
            let mut browser = self.browser.lock().await;
            browser
                .close()
                .await
                .map_err(|e| ComprobarError::BrowserLaunchError {
                    message: e.to_string(),
                })?;
            Ok(())
        }
    }
}

#[cfg(feature = "browser")]
pub use cdp::ChromiumDriver;
