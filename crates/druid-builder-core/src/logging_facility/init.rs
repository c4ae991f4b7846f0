//! Subscriber installation

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Output profile for the subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable, debug level
    Development,
    /// JSON lines, info level
    Production,
    /// Bare registry; tests attach a capture layer instead
    Test,
}

static INIT_ONCE: Once = Once::new();

impl Profile {
    fn default_directive(&self) -> &'static str {
        match self {
            Profile::Development => "druid_builder_core=debug",
            Profile::Production | Profile::Test => "druid_builder_core=info",
        }
    }
}

/// Install the global subscriber. Later calls are ignored.
///
/// `RUST_LOG` overrides the profile's default filter.
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let filter = || {
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(profile.default_directive()))
        };
        // a host may already have installed its own subscriber
        let installed = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_env_filter(filter())
                .try_init()
                .is_ok(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter())
                .try_init()
                .is_ok(),
            Profile::Test => tracing_subscriber::registry().try_init().is_ok(),
        };
        if !installed {
            tracing::debug!(?profile, "subscriber already installed, keeping it");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init(Profile::Test);
        init(Profile::Test);
        init(Profile::Development);
    }

    #[test]
    fn test_profiles_pick_levels() {
        assert_eq!(
            Profile::Development.default_directive(),
            "druid_builder_core=debug"
        );
        assert_eq!(
            Profile::Production.default_directive(),
            "druid_builder_core=info"
        );
    }
}
