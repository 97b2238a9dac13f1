//! Environment snapshot type

use indexmap::IndexMap;
use std::ffi::{OsStr, OsString};
use std::ops::Deref;

/// Ordered snapshot of environment variables.
///
/// Captured once at process start and passed explicitly to the scanner, the
/// resolver and the delegate launcher. Iteration follows insertion order, so a
/// snapshot taken from the process environment scans deterministically.
///
/// Variables whose name or value is not valid UTF-8 cannot hold a secret
/// reference. They are kept aside, invisible to lookups and iteration, and
/// only come back out through [`EnvironmentVariables::iter_os`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentVariables {
    vars: IndexMap<String, String>,
    opaque: Vec<(OsString, OsString)>,
}

impl EnvironmentVariables {
    /// Create a new empty environment
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current process environment
    #[must_use]
    pub fn from_process() -> Self {
        Self::from_vars_os(std::env::vars_os())
    }

    /// Build a snapshot from raw OS pairs, setting aside non-UTF-8 entries
    #[must_use]
    pub fn from_vars_os<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut env = Self::new();
        for (key, value) in vars {
            match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => {
                    env.vars.insert(key, value);
                }
                (key, value) => env.opaque.push((
                    key.map_or_else(|raw| raw, OsString::from),
                    value.map_or_else(|raw| raw, OsString::from),
                )),
            }
        }
        env
    }

    /// Insert a variable, returning the previous value if any
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.vars.insert(key.into(), value.into())
    }

    /// Get a variable by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&String> {
        self.vars.get(key)
    }

    /// Get a variable, treating an empty value as unset
    #[must_use]
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Check if a variable exists
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// Return a copy of this environment with `overrides` layered on top.
    ///
    /// Existing keys keep their position and take the new value; new keys are
    /// appended. `self` is left untouched.
    #[must_use]
    pub fn merged_with<I, K, V>(&self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut merged = self.clone();
        for (key, value) in overrides {
            merged.insert(key, value);
        }
        merged
    }

    /// Get the number of UTF-8 variables
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Check if there are no UTF-8 variables
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Get an iterator over the UTF-8 variables in insertion order
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, String> {
        self.vars.iter()
    }

    /// Every entry as OS strings, non-UTF-8 ones included, for handing the
    /// snapshot to a child process
    pub fn iter_os(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.opaque
            .iter()
            .map(|(key, value)| (key.as_os_str(), value.as_os_str()))
            .chain(
                self.vars
                    .iter()
                    .map(|(key, value)| (OsStr::new(key), OsStr::new(value))),
            )
    }
}

impl Deref for EnvironmentVariables {
    type Target = IndexMap<String, String>;

    fn deref(&self) -> &Self::Target {
        &self.vars
    }
}

impl<K, V> FromIterator<(K, V)> for EnvironmentVariables
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
            opaque: Vec::new(),
        }
    }
}

impl<'a> IntoIterator for &'a EnvironmentVariables {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.vars.iter()
    }
}
