//! Single-pass scanner for the runner's command-line flags.
//!
//! Recognized flags may be given as `--flag=value` or as `--flag value`.
//! Everything else is kept, in order, for downstream handling.

use std::collections::HashMap;
use std::fmt;

use testbridge_common::OptionsError;
use tracing::debug;

/// A flag the scanner recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKey {
    TestFilter,
    TestExcludeFilter,
    TestCategories,
    TestExcludeCategories,
}

impl OptionKey {
    pub const ALL: [OptionKey; 4] = [
        OptionKey::TestFilter,
        OptionKey::TestExcludeFilter,
        OptionKey::TestCategories,
        OptionKey::TestExcludeCategories,
    ];

    pub fn as_flag(self) -> &'static str {
        match self {
            OptionKey::TestFilter => "--test_filter",
            OptionKey::TestExcludeFilter => "--test_exclude_filter",
            OptionKey::TestCategories => "--test_categories",
            OptionKey::TestExcludeCategories => "--test_exclude_categories",
        }
    }

    pub fn from_flag(flag: &str) -> Option<OptionKey> {
        Self::ALL.into_iter().find(|key| key.as_flag() == flag)
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_flag())
    }
}

/// Result of one scan over the argument list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannedArgs {
    values: HashMap<OptionKey, String>,
    unparsed: Vec<String>,
}

impl ScannedArgs {
    pub fn get(&self, key: OptionKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    pub fn take(&mut self, key: OptionKey) -> Option<String> {
        self.values.remove(&key)
    }

    pub fn unparsed(&self) -> &[String] {
        &self.unparsed
    }

    pub fn into_unparsed(self) -> Vec<String> {
        self.unparsed
    }
}

/// Scan `args` left to right, recording recognized flags.
///
/// A repeated flag overwrites the earlier value.
pub fn scan<I, S>(args: I) -> Result<ScannedArgs, OptionsError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut scanned = ScannedArgs::default();
    let mut it = args.into_iter();

    while let Some(arg) = it.next() {
        let arg = arg.as_ref();

        if let Some((name, value)) = split_assignment(arg) {
            if let Some(key) = OptionKey::from_flag(name) {
                debug!(flag = %key, value, "recognized flag");
                scanned.values.insert(key, value.to_string());
                continue;
            }
        } else if let Some(key) = OptionKey::from_flag(arg) {
            let value = it
                .next()
                .ok_or_else(|| OptionsError::MissingArgument(arg.to_string()))?;
            debug!(flag = %key, value = value.as_ref(), "recognized flag");
            scanned.values.insert(key, value.as_ref().to_string());
            continue;
        }

        scanned.unparsed.push(arg.to_string());
    }

    Ok(scanned)
}

/// Split `name=value` at the first `=`, but only when the name is non-empty.
fn split_assignment(arg: &str) -> Option<(&str, &str)> {
    match arg.find('=') {
        Some(idx) if idx > 0 => Some((&arg[..idx], &arg[idx + 1..])),
        _ => None,
    }
}
