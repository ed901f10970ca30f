//! Subscriber installation for hosts of the guard.

use std::str::FromStr;
use std::sync::Once;
use tracing_subscriber::EnvFilter;

use super::test_capture::init_test_capture;

const DEVELOPMENT_FILTER: &str = "lzguard_core=debug,lzguard_engine=debug";
const PRODUCTION_FILTER: &str = "lzguard_core=info,lzguard_engine=info";

/// Output profile of the hosting process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output, guard events at debug
    Development,
    /// JSON lines for pipeline log collection, guard events at info
    Production,
    /// In-memory capture for assertions
    Test,
}

impl FromStr for Profile {
    type Err = String;

    /// Accepts `development`, `production` or `test`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Profile::Development),
            "production" | "prod" => Ok(Profile::Production),
            "test" => Ok(Profile::Test),
            other => Err(format!("unknown logging profile: {}", other)),
        }
    }
}

static INIT_ONCE: Once = Once::new();

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global subscriber for `profile`.
///
/// Only the first call in a process has any effect. Library code never calls
/// this; the pipeline step hosting the guard does. `RUST_LOG` replaces the
/// profile's default filter.
///
/// # Example
///
/// ```
/// use lzguard_core::logging_facility::{init, Profile};
///
/// init("test".parse().unwrap_or(Profile::Development));
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(DEVELOPMENT_FILTER))
                .try_init()
                .ok();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(env_filter(PRODUCTION_FILTER))
                .try_init()
                .ok();
        }
        Profile::Test => {
            init_test_capture();
        }
    });
}
