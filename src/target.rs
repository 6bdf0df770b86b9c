//! Preparing the folder the boilerplate is cloned into.

use std::{io::ErrorKind, path::PathBuf};

use tokio::fs;
use tracing::{debug, info};

use crate::{config::Config, error::Result, project::ProjectInfo, prompt::Prompter};

#[derive(Debug, PartialEq, Eq)]
pub enum Prepared {
    /// An empty, writable project directory.
    Ready(PathBuf),
    /// The folder already existed and the user chose not to replace it.
    Declined,
}

/// Makes sure `<root>/<name>` is an empty directory.
///
/// A missing path is created and a non-directory entry is replaced, both
/// without asking. An existing directory is only removed after the user has
/// confirmed twice; declining either question leaves it untouched.
pub async fn prepare(
    config: &Config,
    info: &ProjectInfo,
    prompter: &mut dyn Prompter,
) -> Result<Prepared> {
    let dir = config.project_dir(&info.name);

    let metadata = match fs::metadata(&dir).await {
        Ok(metadata) => Some(metadata),
        Err(err) if err.kind() == ErrorKind::NotFound => None,
        Err(err) => return Err(err.into()),
    };

    match metadata {
        None => {
            debug!(dir = %dir.display(), "creating project directory");
        }
        Some(metadata) if !metadata.is_dir() => {
            info!(dir = %dir.display(), "replacing non-directory entry");
            fs::remove_file(&dir).await?;
        }
        Some(_) => {
            let reuse = prompter.confirm(
                &format!(
                    "Folder named \"{}\" already exists, do you want to continue creating a new project with the same name?",
                    info.name
                ),
                false,
            )?;
            if !reuse {
                return Ok(Prepared::Declined);
            }
            let remove = prompter.confirm(
                "WARNING: To continue, the existing folder will be removed, please confirm.",
                false,
            )?;
            if !remove {
                return Ok(Prepared::Declined);
            }
            info!(dir = %dir.display(), "removing existing directory");
            fs::remove_dir_all(&dir).await?;
        }
    }

    fs::create_dir_all(&dir).await?;
    Ok(Prepared::Ready(dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::testing::ScriptedPrompter;

    fn setup() -> (tempfile::TempDir, Config, ProjectInfo) {
        let root = tempfile::tempdir().unwrap();
        let config = Config::new(root.path());
        (root, config, ProjectInfo::new("app"))
    }

    fn is_empty_dir(path: &std::path::Path) -> bool {
        path.is_dir() && std::fs::read_dir(path).unwrap().next().is_none()
    }

    #[tokio::test]
    async fn missing_directory_is_created_without_prompting() {
        let (root, config, info) = setup();
        let mut prompter = ScriptedPrompter::default();

        let prepared = prepare(&config, &info, &mut prompter).await.unwrap();

        assert_eq!(prepared, Prepared::Ready(root.path().join("app")));
        assert!(is_empty_dir(&root.path().join("app")));
        assert!(prompter.asked.is_empty());
    }

    #[tokio::test]
    async fn file_in_the_way_is_replaced_without_prompting() {
        let (root, config, info) = setup();
        std::fs::write(root.path().join("app"), "not a dir").unwrap();
        let mut prompter = ScriptedPrompter::default();

        let prepared = prepare(&config, &info, &mut prompter).await.unwrap();

        assert_eq!(prepared, Prepared::Ready(root.path().join("app")));
        assert!(is_empty_dir(&root.path().join("app")));
        assert!(prompter.asked.is_empty());
    }

    #[tokio::test]
    async fn declining_the_first_question_keeps_the_folder() {
        let (root, config, info) = setup();
        let existing = root.path().join("app");
        std::fs::create_dir(&existing).unwrap();
        std::fs::write(existing.join("keep.txt"), "data").unwrap();
        let mut prompter = ScriptedPrompter::with_confirms(&[false]);

        let prepared = prepare(&config, &info, &mut prompter).await.unwrap();

        assert_eq!(prepared, Prepared::Declined);
        assert_eq!(prompter.asked.len(), 1);
        assert!(existing.join("keep.txt").is_file());
    }

    #[tokio::test]
    async fn declining_the_removal_keeps_the_folder() {
        let (root, config, info) = setup();
        let existing = root.path().join("app");
        std::fs::create_dir(&existing).unwrap();
        std::fs::write(existing.join("keep.txt"), "data").unwrap();
        let mut prompter = ScriptedPrompter::with_confirms(&[true, false]);

        let prepared = prepare(&config, &info, &mut prompter).await.unwrap();

        assert_eq!(prepared, Prepared::Declined);
        assert_eq!(prompter.asked.len(), 2);
        assert!(existing.join("keep.txt").is_file());
    }

    #[tokio::test]
    async fn two_confirmations_recreate_the_folder_empty() {
        let (root, config, info) = setup();
        let existing = root.path().join("app");
        std::fs::create_dir_all(existing.join("nested")).unwrap();
        std::fs::write(existing.join("nested/old.txt"), "data").unwrap();
        let mut prompter = ScriptedPrompter::with_confirms(&[true, true]);

        let prepared = prepare(&config, &info, &mut prompter).await.unwrap();

        assert_eq!(prepared, Prepared::Ready(existing.clone()));
        assert!(is_empty_dir(&existing));
    }
}
