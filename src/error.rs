use std::path::PathBuf;

use thiserror::Error;

use crate::tfe::TfeError;

pub type Result<T> = std::result::Result<T, RemoteOpsError>;

/// Coarse classification of [`RemoteOpsError`], stable for callers that branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Config,
    Parse,
    Client,
    RemoteApi,
    UnexpectedResponse,
    Type,
    Io,
}

#[derive(Debug, Error)]
pub enum RemoteOpsError {
    #[error("reading statefile {path}: {source}")]
    StateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing statefile {path}: {source}")]
    StateParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("retrieving token from .terraformrc file: unable to determine home directory")]
    HomeDirUnavailable,

    #[error("retrieving token from .terraformrc file {path}: {source}")]
    CredentialsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing {path} to retrieve TFE token: {source}")]
    CredentialsParse {
        path: PathBuf,
        #[source]
        source: hcl::Error,
    },

    #[error("found no credentials config for hostname {hostname:?} in {path:?}")]
    MissingCredentials { hostname: String, path: PathBuf },

    #[error("found no token key in config for hostname {hostname:?} in {path:?}")]
    MissingToken { hostname: String, path: PathBuf },

    #[error("token for hostname {hostname:?} in {path:?} must be a string, found {found}")]
    TokenNotText {
        hostname: String,
        path: PathBuf,
        found: &'static str,
    },

    #[error("creating TFE API client to determine if using remote ops: {0}")]
    Client(#[source] TfeError),

    #[error("{context}: {source}")]
    RemoteApi {
        context: &'static str,
        #[source]
        source: TfeError,
    },

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl RemoteOpsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::StateRead { .. } => ErrorKind::Io,
            Self::StateParse { .. } | Self::CredentialsParse { .. } => ErrorKind::Parse,
            Self::Config(_)
            | Self::HomeDirUnavailable
            | Self::MissingCredentials { .. }
            | Self::MissingToken { .. } => ErrorKind::Config,
            Self::CredentialsRead { source, .. } => {
                if source.kind() == std::io::ErrorKind::NotFound {
                    ErrorKind::NotFound
                } else {
                    ErrorKind::Io
                }
            }
            Self::TokenNotText { .. } => ErrorKind::Type,
            Self::Client(_) => ErrorKind::Client,
            Self::RemoteApi { .. } => ErrorKind::RemoteApi,
            Self::UnexpectedResponse(_) => ErrorKind::UnexpectedResponse,
        }
    }
}
