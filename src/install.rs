use std::path::Path;

use tracing::info;

use crate::{
    config::Config,
    error::{Result, ScaffoldError},
    exec,
};

/// Installs the new project's dependencies with the configured command.
pub async fn install(config: &Config, project_dir: &Path) -> Result<()> {
    info!(command = %config.install_command, "installing dependencies");
    exec::run(&config.install_command, project_dir)
        .await
        .map_err(|source| ScaffoldError::InstallFailed { source })
}
