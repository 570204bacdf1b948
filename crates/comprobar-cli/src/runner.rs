//! Scenario runner: executes the storefront scenarios against one driver.

use comprobar::{
    BrowserDriver, ComprobarResult, LogContext, LoginSteps, ScenarioConfig, SearchSteps,
    VerificationOutcome,
};
use std::time::{Duration, Instant};

/// Rendered product count on the test account's dashboard
pub const EXPECTED_DASHBOARD_RESULTS: usize = 3;

/// Search term every rendered result must contain
pub const IPHONE_KEYWORD: &str = "iphone";

/// Search term that matches nothing in the catalog
pub const NONEXISTENT_KEYWORD: &str = "xyz123nonexistent";

/// Names of all scenarios, in execution order
pub const SCENARIO_NAMES: [&str; 4] = [
    "login_with_valid_credentials_shows_three_results",
    "search_iphone_matches_all_results",
    "search_nonexistent_shows_no_results",
    "displayed_count_matches_rendered_cards",
];

/// Result of running a single scenario
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    /// Scenario name
    pub name: String,
    /// Whether the scenario passed
    pub passed: bool,
    /// Error message if failed
    pub error: Option<String>,
    /// Scenario duration
    pub duration: Duration,
}

impl ScenarioOutcome {
    /// Create a passing outcome
    #[must_use]
    pub fn pass(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            error: None,
            duration: Duration::ZERO,
        }
    }

    /// Create a failing outcome
    #[must_use]
    pub fn fail(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            error: Some(error.into()),
            duration: Duration::ZERO,
        }
    }

    /// Set duration
    #[must_use]
    pub const fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Results from one full run
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Individual scenario outcomes
    pub outcomes: Vec<ScenarioOutcome>,
    /// Total duration
    pub duration: Duration,
}

impl RunReport {
    /// Check if every scenario passed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }

    /// Count passed scenarios
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    /// Count failed scenarios
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.passed).count()
    }

    /// Total scenario count
    #[must_use]
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Failed scenarios
    #[must_use]
    pub fn failures(&self) -> Vec<&ScenarioOutcome> {
        self.outcomes.iter().filter(|o| !o.passed).collect()
    }
}

/// Runs the storefront scenarios sequentially against one driver
#[derive(Debug)]
pub struct ScenarioRunner {
    config: ScenarioConfig,
    filter: Option<String>,
}

impl ScenarioRunner {
    /// Create a runner for a scenario configuration
    #[must_use]
    pub fn new(config: ScenarioConfig) -> Self {
        Self {
            config,
            filter: None,
        }
    }

    /// Only run scenarios whose name contains the given substring
    #[must_use]
    pub fn with_filter(mut self, filter: Option<String>) -> Self {
        self.filter = filter;
        self
    }

    /// Scenario names selected by the current filter
    #[must_use]
    pub fn selected(&self) -> Vec<&'static str> {
        SCENARIO_NAMES
            .into_iter()
            .filter(|name| {
                self.filter
                    .as_deref()
                    .map_or(true, |needle| name.contains(needle))
            })
            .collect()
    }

    /// Run the selected scenarios in order
    pub async fn run<D: BrowserDriver>(&self, driver: &D) -> RunReport {
        let started = Instant::now();
        let mut outcomes = Vec::new();
        for name in self.selected() {
            let scenario_started = Instant::now();
            let outcome = match self.run_scenario(name, driver).await {
                Ok(()) => ScenarioOutcome::pass(name),
                Err(err) => ScenarioOutcome::fail(name, err.to_string()),
            };
            outcomes.push(outcome.with_duration(scenario_started.elapsed()));
        }
        RunReport {
            outcomes,
            duration: started.elapsed(),
        }
    }

    async fn run_scenario<D: BrowserDriver>(
        &self,
        name: &str,
        driver: &D,
    ) -> ComprobarResult<()> {
        match name {
            "login_with_valid_credentials_shows_three_results" => {
                self.login_shows_three_results(driver).await
            }
            "search_iphone_matches_all_results" => self.search_iphone(driver).await,
            "search_nonexistent_shows_no_results" => self.search_nonexistent(driver).await,
            "displayed_count_matches_rendered_cards" => self.count_cross_check(driver).await,
            other => Err(comprobar::ComprobarError::AssertionFailed {
                message: format!("unknown scenario: {other}"),
            }),
        }
    }

    async fn log_in<'d, D: BrowserDriver>(
        &self,
        driver: &'d D,
    ) -> ComprobarResult<LoginSteps<'d, D>> {
        let mut login = LoginSteps::new(driver, LogContext::new("LoginSteps"))
            .with_default_timeout(self.config.default_timeout());
        login.navigate_to_login(&self.config.base_url).await?;
        login.perform_login(&self.config.credentials).await?;
        Ok(login)
    }

    fn search_steps<'d, D: BrowserDriver>(&self, driver: &'d D) -> SearchSteps<'d, D> {
        SearchSteps::new(driver, LogContext::new("SearchSteps"))
            .with_default_timeout(self.config.default_timeout())
    }

    async fn login_shows_three_results<D: BrowserDriver>(
        &self,
        driver: &D,
    ) -> ComprobarResult<()> {
        let login = self.log_in(driver).await?;
        let verified = login.verify_login_success().await?;
        VerificationOutcome::from_check("login redirected to the dashboard", verified)
            .into_result()?;

        let search = self.search_steps(driver);
        let passed = search.verify_product_count(EXPECTED_DASHBOARD_RESULTS).await?;
        VerificationOutcome::from_check(
            format!("dashboard renders {EXPECTED_DASHBOARD_RESULTS} products"),
            passed,
        )
        .into_result()
    }

    async fn search_iphone<D: BrowserDriver>(&self, driver: &D) -> ComprobarResult<()> {
        self.log_in(driver).await?;
        let search = self.search_steps(driver);
        search.search_for_product(IPHONE_KEYWORD).await?;

        let names = search.product_names().await?;
        VerificationOutcome::from_check("search returned at least one product", !names.is_empty())
            .into_result()?;

        let passed = search.verify_all_contain_keyword(IPHONE_KEYWORD).await?;
        VerificationOutcome::from_check(
            format!("all results contain '{IPHONE_KEYWORD}'"),
            passed,
        )
        .into_result()
    }

    async fn search_nonexistent<D: BrowserDriver>(&self, driver: &D) -> ComprobarResult<()> {
        self.log_in(driver).await?;
        let search = self.search_steps(driver);
        search.search_for_product(NONEXISTENT_KEYWORD).await?;

        let count = search.product_count().await?;
        VerificationOutcome::from_check(
            format!("no products rendered for '{NONEXISTENT_KEYWORD}' (found {count})"),
            count == 0,
        )
        .into_result()
    }

    async fn count_cross_check<D: BrowserDriver>(&self, driver: &D) -> ComprobarResult<()> {
        self.log_in(driver).await?;
        let search = self.search_steps(driver);
        search.verify_count_consistency().await.map(|_| ())
    }
}
