//! Product-search workflows.

use crate::driver::BrowserDriver;
use crate::logging::LogContext;
use crate::pages::ProductsPage;
use crate::result::ComprobarResult;

/// Search-related business workflows
#[derive(Debug)]
pub struct SearchSteps<'d, D: BrowserDriver> {
    page: ProductsPage<'d, D>,
    log: LogContext,
}

impl<'d, D: BrowserDriver> SearchSteps<'d, D> {
    /// Create the workflow over a driver
    #[must_use]
    pub fn new(driver: &'d D, log: LogContext) -> Self {
        let page = ProductsPage::new(driver, log.child("ProductsPage"));
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
    pub const fn page(&self) -> &ProductsPage<'d, D> {
        &self.page
    }

    /// Search for a product
    pub async fn search_for_product(&self, term: &str) -> ComprobarResult<()> {
        self.log.step(format!("Searching for product: {term}"));
        self.page.search(term).await?;
        self.log.info(format!("Search workflow completed for: {term}"));
        Ok(())
    }

    /// All product names currently rendered
    pub async fn product_names(&self) -> ComprobarResult<Vec<String>> {
        self.log
            .step("Retrieving all product names from search results");
        let names = self.page.product_names().await?;
        self.log
            .info(format!("Retrieved {} product names: {names:?}", names.len()));
        Ok(names)
    }

    /// Number of rendered products
    pub async fn product_count(&self) -> ComprobarResult<usize> {
        let count = self.page.rendered_count().await?;
        self.log.info(format!("Current product count: {count}"));
        Ok(count)
    }

    /// Verify every result contains the keyword (case-insensitive; false on
    /// an empty result set)
    pub async fn verify_all_contain_keyword(&self, keyword: &str) -> ComprobarResult<bool> {
        self.log
            .step(format!("Verifying all search results contain keyword: '{keyword}'"));
        let passed = self.page.verify_all_contain(keyword).await?;
        self.log.assertion(
            format!("All products contain the keyword '{keyword}'"),
            passed,
        );
        Ok(passed)
    }

    /// Verify the rendered product count equals `expected`
    pub async fn verify_product_count(&self, expected: usize) -> ComprobarResult<bool> {
        self.log
            .step(format!("Verifying product count equals {expected}"));
        let actual = self.page.rendered_count().await?;
        let passed = actual == expected;
        let description = if passed {
            format!("Product count matches expected: {expected}")
        } else {
            format!("Product count mismatch. Expected: {expected}, Actual: {actual}")
        };
        self.log.assertion(description, passed);
        Ok(passed)
    }

    /// Verify the "Showing N results" label agrees with the rendered cards
    /// and return the agreed count. Divergence is a defect and fails the
    /// workflow with `AssertionFailed`.
    pub async fn verify_count_consistency(&self) -> ComprobarResult<usize> {
        self.log
            .step("Verifying displayed results label matches rendered cards");
        match self.page.consistent_count().await {
            Ok(count) => {
                self.log.assertion(
                    format!("Displayed count matches rendered cards: {count}"),
                    true,
                );
                Ok(count)
            }
            Err(err) => {
                self.log.assertion(err.to_string(), false);
                Err(err)
            }
        }
    }

    /// Complete workflow: search, then verify keyword containment
    pub async fn search_and_verify(&self, term: &str) -> ComprobarResult<bool> {
        self.log
            .step(format!("Starting search and verify workflow for: {term}"));
        self.search_for_product(term).await?;
        self.verify_all_contain_keyword(term).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{ElementHandle, MockDriver};
    use crate::locator::Selector;
    use crate::result::ComprobarError;

    fn seed_results(driver: &MockDriver, names: &[&str], label_count: usize) {
        driver.add_element(
            Selector::role("textbox", "search"),
            ElementHandle::new("search-input", "input"),
        );
        for (i, name) in names.iter().enumerate() {
            driver.add_element(
                Selector::css(".card-body"),
                ElementHandle::new(format!("card-{i}"), "div"),
            );
            driver.add_element(
                Selector::css("h5.card-title"),
                ElementHandle::new(format!("title-{i}"), "h5").with_text(*name),
            );
        }
        driver.add_element(
            Selector::CssWithText {
                css: "div".to_string(),
                text: "Showing".to_string(),
            },
            ElementHandle::new("results-label", "div")
                .with_text(format!("Showing {label_count} results |")),
        );
    }

    fn steps(driver: &MockDriver) -> SearchSteps<'_, MockDriver> {
        SearchSteps::new(driver, LogContext::new("SearchSteps"))
    }

    #[tokio::test]
    async fn test_search_and_verify_all_match() {
        let driver = MockDriver::new();
        seed_results(&driver, &["IPHONE 13 PRO"], 1);
        assert!(steps(&driver).search_and_verify("iphone").await.unwrap());
    }

    #[tokio::test]
    async fn test_search_and_verify_empty_results_is_false() {
        let driver = MockDriver::new();
        seed_results(&driver, &[], 0);
        assert!(!steps(&driver).search_and_verify("iphone").await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_product_count() {
        let driver = MockDriver::new();
        seed_results(&driver, &["A", "B", "C"], 3);
        let steps = steps(&driver);
        assert!(steps.verify_product_count(3).await.unwrap());
        assert!(!steps.verify_product_count(2).await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_count_consistency_agrees() {
        let driver = MockDriver::new();
        seed_results(&driver, &["A", "B", "C"], 3);
        assert_eq!(steps(&driver).verify_count_consistency().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_verify_count_consistency_divergence_is_a_defect() {
        let driver = MockDriver::new();
        seed_results(&driver, &["A", "B", "C"], 2);
        let err = steps(&driver).verify_count_consistency().await.unwrap_err();
        assert!(matches!(err, ComprobarError::AssertionFailed { .. }));
    }
}
