//! Shared test doubles.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use crate::fixture::{FixtureError, FixtureLoader};
use crate::suite::Case;

/// Fixtures held in memory, keyed by case id. Missing ids report `NotFound`
/// at `mem/<id>`.
#[derive(Default)]
pub(crate) struct MemoryFixtures(HashMap<String, String>);

impl MemoryFixtures {
    /// Empty fixtures for each id.
    pub(crate) fn with(ids: &[&str]) -> Self {
        Self(ids.iter().map(|id| (id.to_string(), String::new())).collect())
    }

    pub(crate) fn insert(mut self, id: &str, content: &str) -> Self {
        self.0.insert(id.to_string(), content.to_string());
        self
    }
}

impl FixtureLoader for MemoryFixtures {
    fn load(&self, case: &Case) -> Result<String, FixtureError> {
        self.0
            .get(&case.id)
            .cloned()
            .ok_or_else(|| FixtureError::NotFound {
                path: PathBuf::from(format!("mem/{}", case.id)),
                source: io::Error::from(io::ErrorKind::NotFound),
            })
    }

    fn check(&self, case: &Case) -> Result<(), FixtureError> {
        self.load(case).map(|_| ())
    }
}
