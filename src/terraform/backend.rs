use crate::error::{RemoteOpsError, Result};

use super::state::Statefile;

/// Hostname assumed when the remote backend config does not name one.
pub const DEFAULT_HOSTNAME: &str = "app.terraform.io";

pub const REMOTE_BACKEND_TYPE: &str = "remote";

/// How the remote workspace is named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceSelector {
    /// Exactly this remote workspace, whatever the local CLI workspace is.
    Name(String),
    /// Remote workspace is `<prefix><local workspace>`.
    Prefix(String),
}

impl WorkspaceSelector {
    pub fn remote_name(&self, local_workspace: &str) -> String {
        match self {
            WorkspaceSelector::Name(name) => name.clone(),
            WorkspaceSelector::Prefix(prefix) => format!("{}{}", prefix, local_workspace),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteBackend {
    pub hostname: String,
    pub organization: String,
    pub workspace: WorkspaceSelector,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendResolution {
    /// No backend block: local state.
    NotConfigured,
    /// Some backend other than `remote` (or one with no type recorded).
    OtherType(String),
    Remote(RemoteBackend),
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn invalid(reason: &str) -> RemoteOpsError {
    RemoteOpsError::Config(format!(
        "statefile backend is of type \"remote\" but {}",
        reason
    ))
}

pub fn resolve_backend(statefile: &Statefile) -> Result<BackendResolution> {
    let Some(backend) = &statefile.backend else {
        tracing::debug!("statefile had no backend block so remote ops are not being used");
        return Ok(BackendResolution::NotConfigured);
    };

    let backend_type = backend.backend_type.as_deref().unwrap_or_default();
    if backend_type != REMOTE_BACKEND_TYPE {
        tracing::debug!(
            backend_type,
            "statefile backend is not \"remote\" so remote ops are not being used"
        );
        return Ok(BackendResolution::OtherType(backend_type.to_string()));
    }

    let config = backend
        .config
        .as_ref()
        .ok_or_else(|| invalid("has no backend.config block"))?;

    let organization =
        non_empty(&config.organization).ok_or_else(|| invalid("has no organization set"))?;

    let workspaces = config
        .workspaces
        .as_ref()
        .filter(|w| !w.is_empty())
        .ok_or_else(|| invalid("has no workspaces set"))?;

    if workspaces.len() > 1 {
        tracing::debug!(
            count = workspaces.len(),
            "multiple workspace entries in backend config, using the first"
        );
    }

    let entry = workspaces
        .first()
        .ok_or_else(|| invalid("has no workspaces set"))?;

    let workspace = match (non_empty(&entry.name), non_empty(&entry.prefix)) {
        (_, Some(prefix)) => WorkspaceSelector::Prefix(prefix.to_string()),
        (Some(name), None) => WorkspaceSelector::Name(name.to_string()),
        (None, None) => return Err(invalid("workspace has neither name nor prefix set")),
    };

    let hostname = non_empty(&config.hostname)
        .unwrap_or(DEFAULT_HOSTNAME)
        .to_string();

    Ok(BackendResolution::Remote(RemoteBackend {
        hostname,
        organization: organization.to_string(),
        workspace,
    }))
}
