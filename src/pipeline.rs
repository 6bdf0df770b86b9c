//! The ordered scaffolding steps.
//!
//! Each step runs to completion before the next starts and the first failure
//! ends the run. Nothing is rolled back: a failed run leaves the project
//! folder as the failing step left it.

use std::{future::Future, io::Write, path::PathBuf};

use console::{Emoji, Style};
use tracing::info;

use crate::{
    config::Config,
    error::{Result, ScaffoldError},
    git, install, manifest,
    project::{self, ProjectInfo},
    prompt::Prompter,
    target::{self, Prepared},
};

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The project is ready in this directory.
    Created { info: ProjectInfo, dir: PathBuf },
    /// The user chose to keep an existing folder; nothing was changed.
    Declined,
}

/// Scaffolds a new project from the boilerplate repository at `url`.
///
/// The url is checked before anything is asked.
pub async fn run(config: &Config, url: &str, prompter: &mut dyn Prompter) -> Result<Outcome> {
    if !git::is_valid_repo_url(url) {
        return Err(ScaffoldError::InvalidRepoUrl {
            url: url.to_string(),
        });
    }

    let info = project::collect(prompter)?;

    let dir = match step_with(
        "Checking current environment...",
        target::prepare(config, &info, prompter),
        |prepared| matches!(prepared, Prepared::Ready(_)),
    )
    .await?
    {
        Prepared::Ready(dir) => dir,
        Prepared::Declined => return Ok(Outcome::Declined),
    };

    step(
        "Cloning the boilerplate repository...",
        git::clone(config, url, &dir),
    )
    .await?;
    step("Updating package info...", manifest::update(&dir, &info)).await?;
    step(
        "Installing dependencies of project...",
        install::install(config, &dir),
    )
    .await?;
    step("Initializing git repository...", git::reinit(config, &dir)).await?;

    let green = Style::new().green();
    println!(
        "\n{} {}\n",
        Emoji("🎉", ""),
        green.apply_to(format!(
            "All things done, your project is ready in {}",
            dir.display()
        ))
    );
    info!(name = %info.name, dir = %dir.display(), "project created");
    Ok(Outcome::Created { info, dir })
}

async fn step<T, F>(label: &str, work: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    step_with(label, work, |_| true).await
}

/// Prints `label`, awaits `work`, then marks the line with its outcome.
async fn step_with<T, F>(label: &str, work: F, succeeded: impl Fn(&T) -> bool) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let cyan = Style::new().cyan();
    print!("{}", cyan.apply_to(label));
    std::io::stdout().flush()?;

    let result = work.await;
    let mark = match &result {
        Ok(value) if succeeded(value) => Style::new().green().apply_to("✔"),
        _ => Style::new().red().apply_to("✘"),
    };
    println!(" {mark}");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::exit_code, git::tests::boilerplate, prompt::testing::ScriptedPrompter};

    const MANIFEST: &str = r#"{"name":"boilerplate","version":"9.9.9","homepage":"https://example.com","scripts":{"start":"node index.js"}}"#;

    #[tokio::test]
    async fn step_hands_back_the_work_result() {
        assert_eq!(step("answer...", async { Ok(42) }).await.unwrap(), 42);

        let err = step("failing...", async {
            Err::<(), _>(ScaffoldError::GitInitFailed {
                message: "denied".into(),
            })
        })
        .await
        .unwrap_err();
        assert_eq!(err.exit_code(), exit_code::GIT_INIT_FAILED);

        let declined = step_with("checking...", async { Ok(Prepared::Declined) }, |p| {
            matches!(p, Prepared::Ready(_))
        })
        .await
        .unwrap();
        assert_eq!(declined, Prepared::Declined);
    }

    #[tokio::test]
    async fn invalid_url_fails_before_any_prompt() {
        let root = tempfile::tempdir().unwrap();
        let mut prompter = ScriptedPrompter::default();

        let err = run(&Config::new(root.path()), "not a url", &mut prompter)
            .await
            .unwrap_err();

        assert_eq!(err.exit_code(), exit_code::REPO_URL_INVALID);
        assert!(prompter.asked.is_empty());
    }

    #[tokio::test]
    async fn declined_reuse_stops_quietly() {
        let (_origin, url) = boilerplate(&[("package.json", MANIFEST)]);
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("app")).unwrap();
        let mut prompter = ScriptedPrompter::with_inputs(&["app", "", "", "", ""]);
        prompter.confirms.push_back(false);

        let outcome = run(&Config::new(root.path()), &url, &mut prompter)
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Declined);
        assert!(!root.path().join("app/package.json").exists());
    }

    #[tokio::test]
    async fn missing_manifest_stops_after_the_clone() {
        let (_origin, url) = boilerplate(&[("README.md", "no manifest here")]);
        let root = tempfile::tempdir().unwrap();
        let config = Config::new(root.path()).with_install_command("sh -c 'touch installed'");
        let mut prompter = ScriptedPrompter::with_inputs(&["app", "", "", "", ""]);

        let err = run(&config, &url, &mut prompter).await.unwrap_err();

        assert_eq!(err.exit_code(), exit_code::PACKAGE_JSON_NOT_FOUND);
        assert!(root.path().join("app/README.md").is_file());
        assert!(!root.path().join("app/installed").exists());
    }

    #[tokio::test]
    async fn failed_install_skips_git_reinit() {
        let (_origin, url) = boilerplate(&[("package.json", MANIFEST)]);
        let root = tempfile::tempdir().unwrap();
        let config = Config::new(root.path()).with_install_command("false");
        let mut prompter = ScriptedPrompter::with_inputs(&["app", "", "", "", ""]);

        let err = run(&config, &url, &mut prompter).await.unwrap_err();

        assert_eq!(err.exit_code(), exit_code::INSTALL_DEPENDENCIES_FAILED);
        let repo = git2::Repository::open(root.path().join("app")).unwrap();
        assert!(repo.head().is_ok(), "cloned history is still there");
    }

    #[tokio::test]
    async fn full_run_produces_a_fresh_project() {
        let (_origin, url) = boilerplate(&[("package.json", MANIFEST)]);
        let root = tempfile::tempdir().unwrap();
        let config = Config::new(root.path()).with_install_command("true");
        let mut prompter =
            ScriptedPrompter::with_inputs(&["app", "desc", "1.0.0", "Me", "ISC"]);

        let outcome = run(&config, &url, &mut prompter).await.unwrap();

        let dir = root.path().join("app");
        match outcome {
            Outcome::Created { info, dir: created } => {
                assert_eq!(info.name, "app");
                assert_eq!(created, dir);
            }
            Outcome::Declined => panic!("run was not declined"),
        }
        let manifest: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.join("package.json")).unwrap())
                .unwrap();
        assert_eq!(manifest["name"], "app");
        assert_eq!(manifest["license"], "ISC");
        assert!(manifest.get("homepage").is_none());
        let repo = git2::Repository::open(&dir).unwrap();
        assert!(repo.head().is_err());
    }
}
