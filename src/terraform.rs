pub mod backend;
pub mod state;

pub use backend::{
    BackendResolution, DEFAULT_HOSTNAME, RemoteBackend, WorkspaceSelector, resolve_backend,
};
pub use state::{STATEFILE_PATH, Statefile, load_statefile};
