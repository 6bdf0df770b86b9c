//! Bootstrap a new project from a boilerplate repository.
//!
//! [`pipeline::run`] collects the project's identity, prepares
//! `<root>/<name>`, shallow-clones the boilerplate into it, rewrites its
//! `package.json`, installs dependencies and replaces the cloned history with
//! a fresh `git init`.

pub mod config;
pub mod error;
pub mod exec;
pub mod git;
pub mod install;
pub mod license;
pub mod manifest;
pub mod pipeline;
pub mod project;
pub mod prompt;
pub mod target;

pub use config::Config;
pub use error::{exit_code, Result, ScaffoldError};
pub use pipeline::{run, Outcome};
pub use project::ProjectInfo;
pub use prompt::{Prompter, TermPrompter, Validator};
