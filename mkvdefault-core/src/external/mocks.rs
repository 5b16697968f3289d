// mkvdefault-core/src/external/mocks.rs

// --- Fakes for the container tools ---

// Compiled for the crate's own tests and, through the "test-mocks" feature,
// for downstream test suites.

use super::{ContainerEditor, ContainerInspector, EditorOutcome};
use crate::error::{CoreError, CoreResult};
use crate::tracks::Container;
use crate::translator::EditCommand;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Inspector answering from a fixed table of containers.
///
/// Paths without an entry fail inspection.
#[derive(Debug, Default)]
pub struct FakeInspector {
    containers: HashMap<PathBuf, Container>,
    failures: HashMap<PathBuf, String>,
    calls: Mutex<Vec<PathBuf>>,
}

impl FakeInspector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a container under its own path.
    pub fn with_container(mut self, container: Container) -> Self {
        self.containers.insert(container.path.clone(), container);
        self
    }

    /// Makes inspection of `path` fail with `message`.
    pub fn with_failure(mut self, path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        self.failures.insert(path.into(), message.into());
        self
    }

    /// Paths inspected so far, in call order.
    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl ContainerInspector for FakeInspector {
    fn inspect(&self, path: &Path) -> CoreResult<Container> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(path.to_path_buf());
        }

        if let Some(message) = self.failures.get(path) {
            return Err(CoreError::InspectionFailed {
                path: path.to_path_buf(),
                message: message.clone(),
            });
        }

        self.containers
            .get(path)
            .cloned()
            .ok_or_else(|| CoreError::InspectionFailed {
                path: path.to_path_buf(),
                message: "no such file".to_string(),
            })
    }
}

/// One recorded editor invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorCall {
    pub path: PathBuf,
    pub commands: Vec<EditCommand>,
}

/// Editor that records invocations instead of touching files.
#[derive(Debug, Default)]
pub struct FakeEditor {
    rejections: HashMap<PathBuf, String>,
    unstartable: bool,
    calls: Mutex<Vec<EditorCall>>,
}

impl FakeEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the editor exit non-zero for `path` with `diagnostic`.
    pub fn with_rejection(mut self, path: impl Into<PathBuf>, diagnostic: impl Into<String>) -> Self {
        self.rejections.insert(path.into(), diagnostic.into());
        self
    }

    /// Makes every invocation fail to start, as if the binary were missing.
    pub fn unstartable(mut self) -> Self {
        self.unstartable = true;
        self
    }

    pub fn calls(&self) -> Vec<EditorCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl ContainerEditor for FakeEditor {
    fn apply(&self, path: &Path, commands: &[EditCommand]) -> CoreResult<EditorOutcome> {
        if self.unstartable {
            return Err(CoreError::DependencyNotFound("mkvpropedit".to_string()));
        }

        if let Ok(mut calls) = self.calls.lock() {
            calls.push(EditorCall {
                path: path.to_path_buf(),
                commands: commands.to_vec(),
            });
        }

        Ok(match self.rejections.get(path) {
            Some(diagnostic) => EditorOutcome::failed(diagnostic.clone()),
            None => EditorOutcome::succeeded(),
        })
    }
}
