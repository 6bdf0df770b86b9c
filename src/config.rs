use std::{env, path::PathBuf};

pub const INSTALL_COMMAND_ENV: &str = "REPO_SCAFFOLD_INSTALL_CMD";
pub const GIT_PROGRAM_ENV: &str = "REPO_SCAFFOLD_GIT";

const DEFAULT_INSTALL_COMMAND: &str = "npm install";
const DEFAULT_GIT_PROGRAM: &str = "git";

/// Settings shared by every step of a run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory the project folder is created in.
    pub root: PathBuf,
    /// Command line installing the new project's dependencies.
    pub install_command: String,
    /// git executable used for clone and init.
    pub git_program: String,
}

impl Config {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            install_command: DEFAULT_INSTALL_COMMAND.to_string(),
            git_program: DEFAULT_GIT_PROGRAM.to_string(),
        }
    }

    /// Rooted at the current directory, with commands overridable from the
    /// environment.
    pub fn from_env() -> Self {
        let root = env::current_dir().unwrap_or_else(|_| ".".into());
        let mut config = Self::new(root);
        if let Some(cmd) = non_empty_var(INSTALL_COMMAND_ENV) {
            config.install_command = cmd;
        }
        if let Some(git) = non_empty_var(GIT_PROGRAM_ENV) {
            config.git_program = git;
        }
        config
    }

    pub fn with_install_command(mut self, command: impl Into<String>) -> Self {
        self.install_command = command.into();
        self
    }

    pub fn project_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
