//! Failures of a scaffolding run and the process exit codes they map to.
//!
//! Steps never terminate the process themselves. They return a
//! [`ScaffoldError`] and the binary turns it into an exit code through
//! [`ScaffoldError::exit_code`].

use std::path::PathBuf;

use thiserror::Error;

use crate::exec::ExecError;

/// Process exit codes, one per failure category.
pub mod exit_code {
    pub const SUCCESS: u8 = 0;
    pub const RUNTIME: u8 = 1;
    /// Reserved for clap usage errors.
    pub const USAGE: u8 = 2;
    pub const REPO_URL_INVALID: u8 = 3;
    pub const BOILERPLATE_CLONE_FAILED: u8 = 4;
    pub const PACKAGE_JSON_NOT_FOUND: u8 = 5;
    pub const UPDATE_PACKAGE_INFO_FAILED: u8 = 6;
    pub const INSTALL_DEPENDENCIES_FAILED: u8 = 7;
    pub const GIT_INIT_FAILED: u8 = 8;
}

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("URL is not a valid git repository: {url}")]
    InvalidRepoUrl { url: String },

    #[error("cannot clone the boilerplate repository: {source}")]
    CloneFailed {
        #[source]
        source: ExecError,
    },

    #[error("package.json not found at {}", path.display())]
    ManifestNotFound { path: PathBuf },

    #[error("cannot update {}: {message}", path.display())]
    UpdateManifestFailed { path: PathBuf, message: String },

    #[error("cannot install project dependencies: {source}")]
    InstallFailed {
        #[source]
        source: ExecError,
    },

    #[error("cannot initialize git repository: {message}")]
    GitInitFailed { message: String },

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScaffoldError {
    pub fn exit_code(&self) -> u8 {
        match self {
            ScaffoldError::InvalidRepoUrl { .. } => exit_code::REPO_URL_INVALID,
            ScaffoldError::CloneFailed { .. } => exit_code::BOILERPLATE_CLONE_FAILED,
            ScaffoldError::ManifestNotFound { .. } => exit_code::PACKAGE_JSON_NOT_FOUND,
            ScaffoldError::UpdateManifestFailed { .. } => exit_code::UPDATE_PACKAGE_INFO_FAILED,
            ScaffoldError::InstallFailed { .. } => exit_code::INSTALL_DEPENDENCIES_FAILED,
            ScaffoldError::GitInitFailed { .. } => exit_code::GIT_INIT_FAILED,
            ScaffoldError::Prompt(_) | ScaffoldError::Io(_) => exit_code::RUNTIME,
        }
    }

    pub(crate) fn update_manifest(path: impl Into<PathBuf>, err: impl ToString) -> Self {
        ScaffoldError::UpdateManifestFailed {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;
