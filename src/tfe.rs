mod client;
mod error;
mod types;

pub use client::TfeClient;
pub use error::TfeError;
pub use types::{Entitlements, Workspace};
