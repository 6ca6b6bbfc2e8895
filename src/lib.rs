//! remops - Terraform remote operations detection
//!
//! Given a Terraform project directory, determines whether `plan`/`apply` execute
//! on a Terraform Cloud/Enterprise remote operations backend instead of locally.

pub mod checker;
pub mod cli;
pub mod config;
pub mod credentials;
pub mod error;
pub mod output;
pub mod terraform;
pub mod tfe;

pub use checker::{
    OperationsApi, RemoteOpsChecker, RemoteOpsOutcome, check_remote_operations,
    check_using_remote_ops,
};
pub use config::CheckOptions;
pub use error::{ErrorKind, RemoteOpsError, Result};
pub use terraform::{BackendResolution, DEFAULT_HOSTNAME, RemoteBackend, WorkspaceSelector};
pub use tfe::{TfeClient, TfeError};
