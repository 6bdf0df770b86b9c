use console::Style;
use tracing::debug;

use crate::{error::Result, license::validate_license, prompt::Prompter};

pub const DEFAULT_VERSION: &str = "0.0.1";

/// Identity of the project being created, collected once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    pub name: String,
    pub description: String,
    pub version: String,
    pub author: String,
    pub license: String,
}

impl ProjectInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            version: DEFAULT_VERSION.to_string(),
            author: String::new(),
            license: String::new(),
        }
    }
}

/// The project name doubles as the folder name, so it must be one path
/// component.
pub fn validate_name(input: &str) -> std::result::Result<(), String> {
    if input.is_empty() {
        return Err("Project name should not be empty.".to_string());
    }
    if input == "." || input == ".." || input.contains(['/', '\\']) {
        return Err(format!(
            "Project name \"{input}\" cannot be used as a folder name."
        ));
    }
    Ok(())
}

fn accept_any(_: &str) -> std::result::Result<(), String> {
    Ok(())
}

/// Asks for every [`ProjectInfo`] field. Invalid answers are asked again by
/// the prompter instead of failing the run.
pub fn collect(prompter: &mut dyn Prompter) -> Result<ProjectInfo> {
    let cyan = Style::new().cyan();
    println!(
        "{}",
        cyan.apply_to(
            "Firstly, you need to provide some necessary information to initialize your new project:\n"
        )
    );

    let name = prompter.input("Project Name", None, &validate_name)?;
    let description = prompter.input("Description", Some(""), &accept_any)?;
    let version = prompter.input("Version", Some(DEFAULT_VERSION), &accept_any)?;
    let author = prompter.input("Author", Some(""), &accept_any)?;
    let license = prompter.input(
        "License (empty means no license)",
        Some(""),
        &validate_license,
    )?;

    let info = ProjectInfo {
        name,
        description,
        version,
        author,
        license,
    };
    debug!(?info, "collected project info");
    Ok(info)
}
