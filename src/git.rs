use std::{io::ErrorKind, path::Path};

use once_cell::sync::Lazy;
use regex::Regex;
use tokio::fs;
use tracing::{debug, info};

use crate::{
    config::Config,
    error::{Result, ScaffoldError},
    exec,
};

static GIT_REPO_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?:https?|git|ssh)://[^\s/]+/\S+|file://[^\s/]*/\S+|[\w.-]+@[\w.-]+:\S+)$")
        .expect("git repository url pattern is valid")
});

/// Whether `url` looks like something `git clone` accepts as a remote.
pub fn is_valid_repo_url(url: &str) -> bool {
    GIT_REPO_URL.is_match(url)
}

/// Shallow-clones `url` straight into `target_dir`, which must already exist
/// and be empty.
pub async fn clone(config: &Config, url: &str, target_dir: &Path) -> Result<()> {
    let command = format!(
        "{} clone {} --depth 1 .",
        shell_words::quote(&config.git_program),
        shell_words::quote(url)
    );
    info!(url, dir = %target_dir.display(), "cloning boilerplate");
    exec::run(&command, target_dir)
        .await
        .map_err(|source| ScaffoldError::CloneFailed { source })
}

/// Drops the boilerplate's history and starts an empty repository.
pub async fn reinit(config: &Config, project_dir: &Path) -> Result<()> {
    let git_dir = project_dir.join(".git");
    let removed = match fs::symlink_metadata(&git_dir).await {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(&git_dir).await,
        Ok(_) => fs::remove_file(&git_dir).await,
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err),
    };
    removed.map_err(|err| ScaffoldError::GitInitFailed {
        message: format!("cannot remove {}: {err}", git_dir.display()),
    })?;
    debug!(dir = %project_dir.display(), "boilerplate history removed");

    let command = format!("{} init", shell_words::quote(&config.git_program));
    exec::run(&command, project_dir)
        .await
        .map_err(|err| ScaffoldError::GitInitFailed {
            message: err.to_string(),
        })
}
