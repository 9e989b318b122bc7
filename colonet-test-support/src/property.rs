//! Environment-driven tuning for property-based suites.
//!
//! Suites call [`PropertyProfile::load`] with their own defaults; CI or a
//! developer can then raise or lower the case count and the size of
//! generated exact-tour instances without touching code.

use std::env;

/// Environment variable overriding the number of cases per property.
pub const CASES_ENV_KEY: &str = "COLONET_PBT_CASES";
/// Environment variable overriding the largest generated tour instance.
pub const MAX_TOUR_NODES_ENV_KEY: &str = "COLONET_PBT_MAX_TOUR_NODES";

/// Exact tour search is factorial, so overrides above this are refused.
const TOUR_NODE_CEILING: usize = 11;

/// Run profile for property tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropertyProfile {
    cases: u32,
    max_tour_nodes: usize,
}

impl PropertyProfile {
    /// Loads the profile from the environment, falling back to the given
    /// defaults for unset or invalid values.
    ///
    /// # Examples
    /// ```
    /// use colonet_test_support::property::PropertyProfile;
    ///
    /// let profile = PropertyProfile::load(64, 6);
    /// assert!(profile.cases() > 0);
    /// assert!(profile.max_tour_nodes() >= 2);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_max_tour_nodes: usize) -> Self {
        Self {
            cases: read_env_or_default(CASES_ENV_KEY, default_cases, parse_cases),
            max_tour_nodes: read_env_or_default(
                MAX_TOUR_NODES_ENV_KEY,
                default_max_tour_nodes,
                parse_tour_nodes,
            ),
        }
    }

    /// Number of cases to run per property.
    #[must_use]
    pub fn cases(&self) -> u32 {
        self.cases
    }

    /// Largest node count for generated exact-tour instances.
    #[must_use]
    pub fn max_tour_nodes(&self) -> usize {
        self.max_tour_nodes
    }
}

fn read_env_or_default<T: Copy>(
    key: &'static str,
    default: T,
    parser: impl Fn(&str) -> Result<T, String>,
) -> T {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parser(&raw).unwrap_or_else(|reason| {
        tracing::warn!(
            env = key,
            raw = %raw,
            reason = %reason,
            "ignoring invalid property-test override",
        );
        default
    })
}

fn parse_cases(raw: &str) -> Result<u32, String> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err("cases must be > 0".to_owned()),
        Ok(cases) => Ok(cases),
        Err(error) => Err(format!("parse error: {error}")),
    }
}

fn parse_tour_nodes(raw: &str) -> Result<usize, String> {
    let nodes = raw
        .trim()
        .parse::<usize>()
        .map_err(|error| format!("parse error: {error}"))?;
    if (2..=TOUR_NODE_CEILING).contains(&nodes) {
        Ok(nodes)
    } else {
        Err(format!("tour nodes must be within 2..={TOUR_NODE_CEILING}"))
    }
}
