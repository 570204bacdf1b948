//! Page object for the products/dashboard screen with search.

use super::DASHBOARD_URL_MARKER;
use crate::actions::ElementActions;
use crate::assertion::{self, missing_keyword};
use crate::driver::BrowserDriver;
use crate::locator::{Locator, Selector};
use crate::logging::LogContext;
use crate::result::{ComprobarError, ComprobarResult};
use crate::wait::LoadState;

/// Page object for the products/dashboard page
#[derive(Debug)]
pub struct ProductsPage<'d, D: BrowserDriver> {
    actions: ElementActions<'d, D>,
    log: LogContext,
    search_input: Locator,
    product_cards: Locator,
    product_names: Locator,
    results_label: Locator,
    signout_button: Locator,
}

impl<'d, D: BrowserDriver> ProductsPage<'d, D> {
    /// Create the page object over a driver
    #[must_use]
    pub fn new(driver: &'d D, log: LogContext) -> Self {
        Self {
            actions: ElementActions::new(driver, log.clone()),
            log,
            search_input: Locator::role("textbox", "search"),
            product_cards: Locator::new(".card-body"),
            product_names: Locator::new("h5.card-title"),
            results_label: Locator::from_selector(Selector::CssWithText {
                css: "div".to_string(),
                text: "Showing".to_string(),
            }),
            signout_button: Locator::role("button", "Sign Out"),
        }
    }

    /// Override the process-wide default timeout for this page's actions
    #[must_use]
    pub fn with_default_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.actions = self.actions.with_default_timeout(timeout);
        self
    }

    /// The action layer, for composing with other pages in a workflow
    #[must_use]
    pub const fn actions(&self) -> &ElementActions<'d, D> {
        &self.actions
    }

    /// Perform a complete product search: focus the box, fill the term,
    /// trigger with Enter, and wait for the results to settle
    pub async fn search(&self, term: &str) -> ComprobarResult<()> {
        self.log.info(format!("Searching for product: {term}"));
        self.actions.click(&self.search_input, None).await?;
        self.actions.fill(&self.search_input, term, None).await?;
        self.actions.press_key("Enter").await?;
        self.actions
            .wait_for_load_state(LoadState::NetworkIdle, None)
            .await?;
        self.log.info(format!("Search completed for: {term}"));
        Ok(())
    }

    /// Names of all currently rendered products, in document order
    pub async fn product_names(&self) -> ComprobarResult<Vec<String>> {
        let names = self.actions.texts_of_all(&self.product_names).await?;
        self.log
            .info(format!("Found {} products: {names:?}", names.len()));
        Ok(names)
    }

    /// Number of rendered product cards.
    ///
    /// Counts card elements; never derived from the results label.
    pub async fn rendered_count(&self) -> ComprobarResult<usize> {
        let count = self.actions.count(&self.product_cards).await?;
        self.log.info(format!("Product count: {count}"));
        Ok(count)
    }

    /// Raw text of the "Showing N results" label
    pub async fn results_label_text(&self) -> ComprobarResult<String> {
        let text = self.actions.text_of(&self.results_label, None).await?;
        self.log.debug(format!("Results count text: {text}"));
        Ok(text)
    }

    /// Count parsed out of the "Showing N results" label
    pub async fn displayed_count(&self) -> ComprobarResult<usize> {
        let label = self.results_label_text().await?;
        assertion::parse_showing_count(&label)
    }

    /// Rendered card count, cross-checked against the label.
    ///
    /// A divergence between the two is a defect in the page, not a flaky
    /// condition, and surfaces as `AssertionFailed`.
    pub async fn consistent_count(&self) -> ComprobarResult<usize> {
        let rendered = self.rendered_count().await?;
        let displayed = self.displayed_count().await?;
        if rendered == displayed {
            Ok(rendered)
        } else {
            Err(ComprobarError::AssertionFailed {
                message: format!(
                    "results label says {displayed} but {rendered} product cards are rendered"
                ),
            })
        }
    }

    /// Whether every rendered product name contains the keyword,
    /// case-insensitively. Vacuously false when nothing is rendered.
    pub async fn verify_all_contain(&self, keyword: &str) -> ComprobarResult<bool> {
        self.log
            .info(format!("Verifying all products contain keyword: {keyword}"));
        let names = self.product_names().await?;

        if names.is_empty() {
            self.log.warn("No products found");
            return Ok(false);
        }

        let offenders = missing_keyword(&names, keyword);
        if offenders.is_empty() {
            self.log
                .info(format!("All {} products contain '{keyword}'", names.len()));
            Ok(true)
        } else {
            self.log
                .error(format!("Products not containing '{keyword}': {offenders:?}"));
            Ok(false)
        }
    }

    /// Add a product to the cart by its card title
    pub async fn add_to_cart(&self, product_name: &str) -> ComprobarResult<()> {
        self.log
            .info(format!("Adding product '{product_name}' to cart"));
        let button = Selector::CssWithText {
            css: ".card-body".to_string(),
            text: product_name.to_string(),
        }
        .within(Selector::CssWithText {
            css: "button".to_string(),
            text: "Add To Cart".to_string(),
        });
        self.actions.click(button, None).await?;
        self.log
            .info(format!("Product '{product_name}' added to cart"));
        Ok(())
    }

    /// Sign out of the storefront
    pub async fn sign_out(&self) -> ComprobarResult<()> {
        self.log.info("Clicking sign out button");
        self.actions.click(&self.signout_button, None).await?;
        self.actions
            .wait_for_load_state(LoadState::NetworkIdle, None)
            .await?;
        Ok(())
    }

    /// Whether the dashboard is the current screen
    pub async fn is_on_products_page(&self) -> bool {
        let url = self.actions.current_url().await.unwrap_or_default();
        url.contains(DASHBOARD_URL_MARKER)
            && self.actions.is_visible(&self.search_input, None).await
    }
}
