//! Locator abstraction for element selection.
//!
//! Locators are symbolic: they describe how to find elements on the *current*
//! page and are re-resolved on every use. Nothing here caches element handles
//! across page state.
//!
//! # Design
//!
//! - **Auto-Waiting**: the action layer polls until a locator resolves and the
//!   element is actionable, up to the effective timeout
//! - **Role selectors**: the storefront is located primarily by ARIA role plus
//!   accessible name, falling back to CSS for structural queries
//! - **Fluent API**: chainable methods for composing selectors

use std::time::Duration;

/// Default timeout for element resolution and actionability (30 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default polling interval while auto-waiting (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Selector type for locating elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// CSS selector (e.g., ".card-body")
    Css(String),
    /// ARIA role plus accessible name (e.g., role=textbox, name="search")
    Role {
        /// ARIA role (textbox, button, link, checkbox, ...)
        role: String,
        /// Accessible name, matched case-insensitively against
        /// aria-label/placeholder/name/text content
        name: String,
    },
    /// Text content selector
    Text(String),
    /// Combined selector with text filter
    CssWithText {
        /// Base CSS selector
        css: String,
        /// Text content to match
        text: String,
    },
    /// Child selector scoped to every element the root selector matches
    Within {
        /// Root selector establishing the scope
        root: Box<Selector>,
        /// Child selector resolved inside each root match
        child: Box<Selector>,
    },
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create a role selector with an accessible name
    #[must_use]
    pub fn role(role: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Role {
            role: role.into(),
            name: name.into(),
        }
    }

    /// Create a text selector
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Scope a child selector to every element this selector matches
    #[must_use]
    pub fn within(self, child: Self) -> Self {
        Self::Within {
            root: Box::new(self),
            child: Box::new(child),
        }
    }

    /// CSS group covering a role's implicit and explicit elements
    fn role_group(role: &str) -> String {
        match role {
            "textbox" => "input:not([type=checkbox]):not([type=radio]), textarea, [role='textbox']".to_string(),
            "button" => "button, input[type='submit'], input[type='button'], [role='button']".to_string(),
            "link" => "a[href], [role='link']".to_string(),
            "checkbox" => "input[type='checkbox'], [role='checkbox']".to_string(),
            other => format!("[role='{other}']"),
        }
    }

    /// Convert to a JavaScript expression evaluating to the array of all
    /// matching elements. Backends resolve and re-resolve from this.
    #[must_use]
    pub fn to_all_query(&self) -> String {
        self.all_query_on("document")
    }

    fn all_query_on(&self, scope: &str) -> String {
        match self {
            Self::Css(s) => format!("Array.from({scope}.querySelectorAll({s:?}))"),
            Self::Role { role, name } => {
                let group = Self::role_group(role);
                let needle = name.to_lowercase();
                format!(
                    "Array.from({scope}.querySelectorAll({group:?})).filter(el => \
                     ((el.getAttribute('aria-label') || el.getAttribute('placeholder') || \
                       el.getAttribute('name') || el.textContent) || '')\
                     .trim().toLowerCase().includes({needle:?}))"
                )
            }
            Self::Text(t) => {
                format!("Array.from({scope}.querySelectorAll('*')).filter(el => el.textContent.includes({t:?}))")
            }
            Self::CssWithText { css, text } => {
                format!("Array.from({scope}.querySelectorAll({css:?})).filter(el => el.textContent.includes({text:?}))")
            }
            Self::Within { root, child } => {
                format!(
                    "{}.flatMap(r => {})",
                    root.all_query_on(scope),
                    child.all_query_on("r")
                )
            }
        }
    }

    /// Convert to a JavaScript query expression returning the first match
    #[must_use]
    pub fn to_query(&self) -> String {
        format!("{}[0]", self.to_all_query())
    }

    /// Convert to a JavaScript query counting all matches
    #[must_use]
    pub fn to_count_query(&self) -> String {
        format!("{}.length", self.to_all_query())
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Css(s) => write!(f, "css={s}"),
            Self::Role { role, name } => write!(f, "role={role}[name={name:?}]"),
            Self::Text(t) => write!(f, "text={t:?}"),
            Self::CssWithText { css, text } => write!(f, "css={css}[text={text:?}]"),
            Self::Within { root, child } => write!(f, "{root} >> {child}"),
        }
    }
}

/// Locator options for customizing auto-wait behavior
#[derive(Debug, Clone)]
pub struct LocatorOptions {
    /// Per-locator timeout override; `None` uses the action layer's
    /// process-wide default
    pub timeout: Option<Duration>,
    /// Polling interval for auto-waiting
    pub poll_interval: Duration,
    /// Whether the element must be visible to be considered actionable
    pub visible: bool,
}

impl Default for LocatorOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            visible: true,
        }
    }
}

/// A locator for finding and interacting with elements
#[derive(Debug, Clone)]
pub struct Locator {
    /// The selector for finding elements
    selector: Selector,
    /// Options for locator behavior
    options: LocatorOptions,
}

impl Locator {
    /// Create a new locator with a CSS selector
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: Selector::Css(selector.into()),
            options: LocatorOptions::default(),
        }
    }

    /// Create a locator from a selector
    #[must_use]
    pub fn from_selector(selector: Selector) -> Self {
        Self {
            selector,
            options: LocatorOptions::default(),
        }
    }

    /// Create a role locator (role + accessible name)
    #[must_use]
    pub fn role(role: impl Into<String>, name: impl Into<String>) -> Self {
        Self::from_selector(Selector::role(role, name))
    }

    /// Filter by text content
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        let selector = match self.selector {
            Selector::Css(css) => Selector::CssWithText {
                css,
                text: text.into(),
            },
            other => other,
        };
        Self {
            selector,
            options: self.options,
        }
    }

    /// Set a custom timeout overriding the process-wide default
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = Some(timeout);
        self
    }

    /// Set visibility requirement
    #[must_use]
    pub const fn with_visible(mut self, visible: bool) -> Self {
        self.options.visible = visible;
        self
    }

    /// Get the selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Get the options
    #[must_use]
    pub const fn options(&self) -> &LocatorOptions {
        &self.options
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.selector.fmt(f)
    }
}

impl From<Selector> for Locator {
    fn from(selector: Selector) -> Self {
        Self::from_selector(selector)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod selector_tests {
        use super::*;

        #[test]
        fn test_css_selector_query() {
            let selector = Selector::css(".card-body");
            let query = selector.to_query();
            assert!(query.contains("querySelector"));
            assert!(query.contains(".card-body"));
        }

        #[test]
        fn test_role_selector_query() {
            let selector = Selector::role("textbox", "search");
            let query = selector.to_query();
            assert!(query.contains("placeholder"));
            assert!(query.contains("aria-label"));
            assert!(query.contains("search"));
        }

        #[test]
        fn test_role_selector_lowercases_name() {
            let selector = Selector::role("button", "Login");
            let query = selector.to_query();
            assert!(query.contains("login"));
        }

        #[test]
        fn test_text_selector_query() {
            let selector = Selector::text("Sign Out");
            let query = selector.to_query();
            assert!(query.contains("textContent"));
            assert!(query.contains("Sign Out"));
        }

        #[test]
        fn test_count_query() {
            let selector = Selector::css("h5.card-title");
            let query = selector.to_count_query();
            assert!(query.contains("querySelectorAll"));
            assert!(query.contains(".length"));
        }

        #[test]
        fn test_css_with_text_count_query() {
            let selector = Selector::CssWithText {
                css: "button".to_string(),
                text: "Add To Cart".to_string(),
            };
            let query = selector.to_count_query();
            assert!(query.contains("filter"));
            assert!(query.contains("Add To Cart"));
        }

        #[test]
        fn test_unknown_role_falls_back_to_attribute() {
            let selector = Selector::role("tabpanel", "Orders");
            let query = selector.to_query();
            assert!(query.contains("[role='tabpanel']"));
        }

        #[test]
        fn test_within_scopes_child_query() {
            let selector = Selector::CssWithText {
                css: ".card-body".to_string(),
                text: "ZARA COAT 3".to_string(),
            }
            .within(Selector::CssWithText {
                css: "button".to_string(),
                text: "Add To Cart".to_string(),
            });
            let query = selector.to_all_query();
            assert!(query.contains("flatMap"));
            assert!(query.contains("r.querySelectorAll"));
            assert!(query.contains("ZARA COAT 3"));
            assert!(query.contains("Add To Cart"));
        }

        #[test]
        fn test_display() {
            assert_eq!(Selector::css("#id").to_string(), "css=#id");
            assert_eq!(
                Selector::role("button", "Login").to_string(),
                "role=button[name=\"Login\"]"
            );
            let composed = Selector::css(".card-body").within(Selector::css("button"));
            assert_eq!(composed.to_string(), "css=.card-body >> css=button");
        }
    }

    mod locator_tests {
        use super::*;

        #[test]
        fn test_locator_new_is_css() {
            let locator = Locator::new("button");
            assert!(matches!(locator.selector(), Selector::Css(_)));
        }

        #[test]
        fn test_locator_with_text() {
            let locator = Locator::new("button").with_text("View");
            assert!(matches!(locator.selector(), Selector::CssWithText { .. }));
        }

        #[test]
        fn test_with_text_keeps_non_css_selector() {
            let locator = Locator::role("button", "Login").with_text("View");
            assert!(matches!(locator.selector(), Selector::Role { .. }));
        }

        #[test]
        fn test_locator_timeout_override() {
            let locator = Locator::new("button").with_timeout(Duration::from_secs(10));
            assert_eq!(locator.options().timeout, Some(Duration::from_secs(10)));
        }

        #[test]
        fn test_default_options_defer_to_process_timeout() {
            let opts = LocatorOptions::default();
            assert!(opts.timeout.is_none());
            assert_eq!(opts.poll_interval, Duration::from_millis(50));
            assert!(opts.visible);
        }
    }
}
