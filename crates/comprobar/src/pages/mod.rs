//! Page objects for the storefront.
//!
//! Each page object holds the symbolic locators for one logical screen and
//! exposes screen-specific operations built from the Element Action Layer.
//! Page objects never talk to the driver directly.

mod login;
mod products;

pub use login::{LoginPage, LoginState};
pub use products::ProductsPage;

/// URL substring marking a successful login.
///
/// Login success is defined purely by this URL transition, never by an
/// on-page message; the target site's success banner is not load-bearing.
pub const DASHBOARD_URL_MARKER: &str = "/dashboard/dash";
