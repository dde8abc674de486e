//! Environment variables set by the build system for the test runner.

use std::collections::HashMap;

/// Test-name filter forwarded from the build tool; fills `--test_filter`
/// when the flag itself was not given.
pub const TESTBRIDGE_TEST_ONLY: &str = "TESTBRIDGE_TEST_ONLY";

/// Set to `1` to stop at the first failing test.
pub const TESTBRIDGE_TEST_RUNNER_FAIL_FAST: &str = "TESTBRIDGE_TEST_RUNNER_FAIL_FAST";

/// Snapshot of the process environment. Variables that are not valid
/// unicode are skipped.
pub fn capture() -> HashMap<String, String> {
    std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect()
}

/// The include filter from the environment, if set to something non-empty.
pub fn test_only(env: &HashMap<String, String>) -> Option<&str> {
    env.get(TESTBRIDGE_TEST_ONLY)
        .map(String::as_str)
        .filter(|v| !v.is_empty())
}

pub fn fail_fast(env: &HashMap<String, String>) -> bool {
    env.get(TESTBRIDGE_TEST_RUNNER_FAIL_FAST)
        .is_some_and(|v| v == "1")
}
