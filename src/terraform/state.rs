//! Local backend state written by `terraform init`.
//!
//! Only the `backend` block is modelled; every other key in the document is ignored.

use std::io;
use std::path::Path;

use serde::Deserialize;

use crate::error::{RemoteOpsError, Result};

/// Location of the backend state, relative to the project directory.
pub const STATEFILE_PATH: &str = ".terraform/terraform.tfstate";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Statefile {
    #[serde(default)]
    pub backend: Option<BackendBlock>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BackendBlock {
    #[serde(rename = "type", default)]
    pub backend_type: Option<String>,
    #[serde(default)]
    pub config: Option<BackendConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub workspaces: Option<Workspaces>,
}

/// Older state files record `workspaces` as a list, newer ones as a single object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Workspaces {
    List(Vec<WorkspaceEntry>),
    Single(WorkspaceEntry),
}

impl Workspaces {
    pub fn first(&self) -> Option<&WorkspaceEntry> {
        match self {
            Workspaces::List(entries) => entries.first(),
            Workspaces::Single(entry) => Some(entry),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Workspaces::List(entries) => entries.len(),
            Workspaces::Single(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WorkspaceEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub prefix: Option<String>,
}

impl Statefile {
    pub fn from_json(json: &str, path: &Path) -> Result<Self> {
        serde_json::from_str(json).map_err(|source| RemoteOpsError::StateParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Reads `<project>/.terraform/terraform.tfstate`.
///
/// A missing file is not an error: `Ok(None)` means the project was never
/// initialised against a backend.
pub fn load_statefile(project_dir: &Path) -> Result<Option<Statefile>> {
    let path = project_dir.join(STATEFILE_PATH);

    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::warn!(
                path = %path.display(),
                "statefile does not exist, assuming not using remote ops"
            );
            return Ok(None);
        }
        Err(source) => return Err(RemoteOpsError::StateRead { path, source }),
    };

    Statefile::from_json(&contents, &path).map(Some)
}
