//! Workflow layer: business-level compositions of page-object operations.
//!
//! Steps add no state of their own — only ordering, step banners, and
//! verification logging. Any failure below propagates unchanged; verification
//! methods return booleans for the scenario to assert on.

mod login;
mod search;

pub use login::LoginSteps;
pub use search::SearchSteps;
