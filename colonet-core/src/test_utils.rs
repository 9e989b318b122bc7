//! Shared test utilities for `colonet-core`.

use colonet_test_support::property::PropertyProfile;
use proptest::test_runner::Config as ProptestConfig;

/// Largest tour instance the property suites generate unless overridden.
const DEFAULT_MAX_TOUR_NODES: usize = 7;

/// Builds a standard proptest configuration from the shared run profile.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = PropertyProfile::load(default_cases, DEFAULT_MAX_TOUR_NODES);
    ProptestConfig {
        cases: profile.cases(),
        ..ProptestConfig::default()
    }
}

/// Returns the node ceiling for generated exact-tour instances.
#[must_use]
pub(crate) fn max_tour_nodes() -> usize {
    PropertyProfile::load(1, DEFAULT_MAX_TOUR_NODES).max_tour_nodes()
}
