//! The parsed, read-only options record handed to the rest of the runner.

use std::collections::HashMap;

use serde::Serialize;
use testbridge_common::OptionsError;
use tracing::debug;

use crate::args::{self, OptionKey, ScannedArgs};
use crate::categories::{build_categories_filter, CategoryFilter, TypeResolver};
use crate::env;

/// Runner options built from the command line and environment.
///
/// Parsing the empty argument list with an empty environment yields
/// [`Options::default`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Options {
    fail_fast: bool,
    include_filter: Option<String>,
    exclude_filter: Option<String>,
    category_filter: CategoryFilter,
    unparsed_args: Vec<String>,
}

impl Options {
    pub fn new(
        fail_fast: bool,
        include_filter: Option<String>,
        exclude_filter: Option<String>,
        category_filter: CategoryFilter,
        unparsed_args: Vec<String>,
    ) -> Self {
        Self {
            fail_fast,
            include_filter,
            exclude_filter,
            category_filter,
            unparsed_args,
        }
    }

    /// Parse `args` and the environment into an options record.
    ///
    /// `--test_filter` falls back to `TESTBRIDGE_TEST_ONLY` when absent from
    /// `args`. Fail-fast comes only from `TESTBRIDGE_TEST_RUNNER_FAIL_FAST`.
    /// Category names are resolved through `resolver`; any that cannot be
    /// resolved fail the whole parse.
    pub fn parse<I, S, R>(
        env_vars: &HashMap<String, String>,
        args: I,
        resolver: &R,
    ) -> Result<Self, OptionsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        R: TypeResolver + ?Sized,
    {
        Self::from_scanned(env_vars, args::scan(args)?, resolver)
    }

    /// Finish parsing from an argument list that was already scanned.
    pub fn from_scanned<R>(
        env_vars: &HashMap<String, String>,
        mut scanned: ScannedArgs,
        resolver: &R,
    ) -> Result<Self, OptionsError>
    where
        R: TypeResolver + ?Sized,
    {
        let include_filter = match scanned.take(OptionKey::TestFilter) {
            Some(filter) => Some(filter),
            None => {
                let from_env = env::test_only(env_vars).map(str::to_string);
                if from_env.is_some() {
                    debug!("using {} as the test filter", env::TESTBRIDGE_TEST_ONLY);
                }
                from_env
            }
        };
        let exclude_filter = scanned.take(OptionKey::TestExcludeFilter);
        let fail_fast = env::fail_fast(env_vars);

        let category_filter = build_categories_filter(
            resolver,
            scanned.get(OptionKey::TestCategories),
            scanned.get(OptionKey::TestExcludeCategories),
        )?;

        let options = Self {
            fail_fast,
            include_filter,
            exclude_filter,
            category_filter,
            unparsed_args: scanned.into_unparsed(),
        };
        debug!(
            fail_fast = options.fail_fast,
            include = ?options.include_filter,
            exclude = ?options.exclude_filter,
            categories = %options.category_filter,
            unparsed = options.unparsed_args.len(),
            "parsed runner options"
        );
        Ok(options)
    }

    /// Whether the runner stops at the first failing test.
    pub fn fail_fast(&self) -> bool {
        self.fail_fast
    }

    /// The `--test_filter` pattern, or `None` if it was not given.
    pub fn include_filter(&self) -> Option<&str> {
        self.include_filter.as_deref()
    }

    /// The `--test_exclude_filter` pattern, or `None` if it was not given.
    pub fn exclude_filter(&self) -> Option<&str> {
        self.exclude_filter.as_deref()
    }

    pub fn category_filter(&self) -> &CategoryFilter {
        &self.category_filter
    }

    /// Arguments that did not match any known option, in their original order.
    pub fn unparsed_args(&self) -> &[String] {
        &self.unparsed_args
    }
}
