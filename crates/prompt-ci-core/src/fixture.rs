//! Fixture resolution and loading.
//!
//! Fixtures are pre-recorded model outputs. On disk a case's fixture lives at
//! `<root>/<subdir>/<case-id><ext>`, with `subdir` and `ext` chosen by the
//! case's [`CaseKind`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::classify::CaseKind;
use crate::suite::Case;

/// Errors from loading a fixture.
#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("failed to read fixture {}: {source}", .path.display())]
    NotFound { path: PathBuf, source: io::Error },

    #[error("failed to read fixture {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
}

impl FixtureError {
    fn from_io(path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            FixtureError::NotFound { path, source }
        } else {
            FixtureError::Read { path, source }
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            FixtureError::NotFound { path, .. } | FixtureError::Read { path, .. } => path,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FixtureError::NotFound { .. })
    }
}

/// Source of fixture content for cases.
pub trait FixtureLoader {
    /// Load the raw fixture text for a case.
    fn load(&self, case: &Case) -> Result<String, FixtureError>;

    /// Check that a fixture is present without reading it.
    fn check(&self, case: &Case) -> Result<(), FixtureError>;
}

/// Compute the fixture path for a case id of the given kind.
pub fn fixture_path(root: &Path, case_id: &str, kind: CaseKind) -> PathBuf {
    root.join(kind.fixture_subdir())
        .join(format!("{}{}", case_id, kind.fixture_extension(case_id)))
}

/// Fixtures stored in a directory tree.
#[derive(Debug, Clone)]
pub struct FixtureDir {
    root: PathBuf,
}

impl FixtureDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, case: &Case) -> PathBuf {
        fixture_path(&self.root, &case.id, case.kind)
    }
}

impl FixtureLoader for FixtureDir {
    fn load(&self, case: &Case) -> Result<String, FixtureError> {
        let path = self.path_for(case);
        match fs::read(&path) {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Err(source) => Err(FixtureError::from_io(path, source)),
        }
    }

    fn check(&self, case: &Case) -> Result<(), FixtureError> {
        let path = self.path_for(case);
        match fs::metadata(&path) {
            Ok(_) => Ok(()),
            Err(source) => Err(FixtureError::from_io(path, source)),
        }
    }
}
