#![doc(test(attr(deny(warnings))))]

//! Money Report Core decides which actions and status banners the header of an
//! expense report offers, given the report, its policy, transactions and the
//! current session.

pub mod cli;
pub mod config;
pub mod currency;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod flows;
pub mod rules;
pub mod store;
pub mod utils;

use std::sync::Once;

pub use engine::{evaluate, HeaderDecision, HeaderSnapshot, StatusBanner};
pub use errors::ReportError;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Money Report Core tracing initialized.");
    });
}

/// Build metadata captured by `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_status: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
}

pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: env!("MONEY_REPORT_BUILD_HASH"),
        git_status: env!("MONEY_REPORT_BUILD_STATUS"),
        timestamp: env!("MONEY_REPORT_BUILD_TIMESTAMP"),
        target: env!("MONEY_REPORT_BUILD_TARGET"),
        profile: env!("MONEY_REPORT_BUILD_PROFILE"),
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }

    #[test]
    fn build_info_carries_package_version() {
        assert_eq!(super::build_info().version, env!("CARGO_PKG_VERSION"));
    }
}
