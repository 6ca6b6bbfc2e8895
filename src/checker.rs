//! Decides whether a Terraform project runs its operations remotely.
//!
//! The check runs four stages in order and stops at the first definitive answer:
//! backend state on disk, backend validation, token lookup, then the
//! organization entitlement and workspace settings on the remote API.

use std::path::Path;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::CheckOptions;
use crate::credentials::CredentialsFile;
use crate::error::{RemoteOpsError, Result};
use crate::terraform::{BackendResolution, RemoteBackend, load_statefile, resolve_backend};
use crate::tfe::{Entitlements, TfeClient, TfeError, Workspace};

const ENTITLEMENT_CONTEXT: &str = "determining remote ops entitlement";
const WORKSPACE_CONTEXT: &str = "reading remote workspace to determine if using remote ops";

/// The two remote calls the check needs.
#[async_trait]
pub trait OperationsApi: Send + Sync {
    async fn entitlements(
        &self,
        organization: &str,
    ) -> std::result::Result<Option<Entitlements>, TfeError>;
    async fn workspace(
        &self,
        organization: &str,
        name: &str,
    ) -> std::result::Result<Option<Workspace>, TfeError>;
}

#[async_trait]
impl OperationsApi for TfeClient {
    async fn entitlements(
        &self,
        organization: &str,
    ) -> std::result::Result<Option<Entitlements>, TfeError> {
        TfeClient::entitlements(self, organization).await
    }

    async fn workspace(
        &self,
        organization: &str,
        name: &str,
    ) -> std::result::Result<Option<Workspace>, TfeError> {
        TfeClient::workspace(self, organization, name).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum RemoteOpsOutcome {
    NoStatefile,
    NoBackend,
    OtherBackend {
        backend_type: String,
    },
    NotEntitled {
        hostname: String,
        organization: String,
    },
    Workspace {
        hostname: String,
        organization: String,
        remote_workspace: String,
        operations: bool,
    },
}

impl RemoteOpsOutcome {
    pub fn using_remote_ops(&self) -> bool {
        matches!(
            self,
            RemoteOpsOutcome::Workspace {
                operations: true,
                ..
            }
        )
    }
}

/// Stage four: entitlement, then the workspace's own `operations` flag.
///
/// The workspace endpoint is only called when the organization is entitled.
pub async fn check_remote_operations(
    api: &dyn OperationsApi,
    backend: &RemoteBackend,
    local_workspace: &str,
) -> Result<RemoteOpsOutcome> {
    let organization = backend.organization.as_str();

    tracing::debug!(organization, "calling TFE API to determine entitlements");
    let entitlements = api
        .entitlements(organization)
        .await
        .map_err(|source| RemoteOpsError::RemoteApi {
            context: ENTITLEMENT_CONTEXT,
            source,
        })?
        .ok_or_else(|| {
            RemoteOpsError::UnexpectedResponse(format!(
                "got nil entitlements for organization {:?} calling TFE API to determine if using remote ops",
                organization
            ))
        })?;

    let entitled = entitlements.operations.ok_or_else(|| {
        RemoteOpsError::UnexpectedResponse(format!(
            "entitlements for organization {:?} did not include the operations flag",
            organization
        ))
    })?;

    if !entitled {
        tracing::debug!(
            organization,
            "organization does not have the operations entitlement so remote ops are not being used"
        );
        return Ok(RemoteOpsOutcome::NotEntitled {
            hostname: backend.hostname.clone(),
            organization: organization.to_string(),
        });
    }

    let remote_workspace = backend.workspace.remote_name(local_workspace);
    tracing::debug!(
        organization,
        workspace = %remote_workspace,
        "organization has the operations entitlement, checking workspace"
    );

    let workspace = api
        .workspace(organization, &remote_workspace)
        .await
        .map_err(|source| RemoteOpsError::RemoteApi {
            context: WORKSPACE_CONTEXT,
            source,
        })?
        .ok_or_else(|| {
            RemoteOpsError::UnexpectedResponse(format!(
                "got nil workspace {:?} calling TFE API to determine if using remote ops",
                remote_workspace
            ))
        })?;

    let operations = workspace.operations.ok_or_else(|| {
        RemoteOpsError::UnexpectedResponse(format!(
            "workspace {:?} did not include the operations flag",
            remote_workspace
        ))
    })?;

    tracing::debug!(
        workspace = %remote_workspace,
        operations,
        "workspace remote ops setting"
    );

    Ok(RemoteOpsOutcome::Workspace {
        hostname: backend.hostname.clone(),
        organization: organization.to_string(),
        remote_workspace,
        operations,
    })
}

#[derive(Debug, Clone, Default)]
pub struct RemoteOpsChecker {
    options: CheckOptions,
}

impl RemoteOpsChecker {
    pub fn new(options: CheckOptions) -> Self {
        Self { options }
    }

    /// Full procedure, returning the reason behind the answer.
    pub async fn inspect(
        &self,
        local_workspace: &str,
        project_dir: &Path,
    ) -> Result<RemoteOpsOutcome> {
        tracing::debug!(
            project = %project_dir.display(),
            "reading statefile to check if using TFE remote ops"
        );

        let Some(statefile) = load_statefile(project_dir)? else {
            return Ok(RemoteOpsOutcome::NoStatefile);
        };

        let backend = match resolve_backend(&statefile)? {
            BackendResolution::NotConfigured => return Ok(RemoteOpsOutcome::NoBackend),
            BackendResolution::OtherType(backend_type) => {
                return Ok(RemoteOpsOutcome::OtherBackend { backend_type });
            }
            BackendResolution::Remote(backend) => backend,
        };

        tracing::debug!(
            hostname = %backend.hostname,
            organization = %backend.organization,
            workspace = ?backend.workspace,
            "determined using remote backend"
        );

        let credentials_path = self.options.credentials_path()?;
        tracing::debug!(path = %credentials_path.display(), "retrieving TFE token");
        let token = CredentialsFile::load(&credentials_path)?.token_for(&backend.hostname)?;
        tracing::debug!(hostname = %backend.hostname, "found token for hostname");

        let client = self
            .client_for(&backend.hostname, &token)
            .map_err(RemoteOpsError::Client)?;

        check_remote_operations(&client, &backend, local_workspace).await
    }

    pub async fn check(&self, local_workspace: &str, project_dir: &Path) -> Result<bool> {
        self.inspect(local_workspace, project_dir)
            .await
            .map(|outcome| outcome.using_remote_ops())
    }

    fn client_for(
        &self,
        hostname: &str,
        token: &str,
    ) -> std::result::Result<TfeClient, TfeError> {
        match &self.options.api_base_url {
            Some(base_url) => {
                TfeClient::with_base_url(base_url.clone(), token, self.options.timeout)
            }
            None => TfeClient::new(hostname, token, self.options.timeout),
        }
    }
}

/// Whether `project_abs_path` executes Terraform on a remote operations backend,
/// using default options (`~/.terraformrc`, 30s request deadline).
pub async fn check_using_remote_ops(
    workspace_name: &str,
    project_abs_path: &Path,
) -> Result<bool> {
    RemoteOpsChecker::default()
        .check(workspace_name, project_abs_path)
        .await
}
