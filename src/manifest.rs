//! Rewriting the cloned boilerplate's `package.json` for the new project.

use std::{io::ErrorKind, path::Path};

use serde_json::{Map, Value};
use tokio::fs;
use tracing::debug;

use crate::{
    error::{Result, ScaffoldError},
    project::ProjectInfo,
};

pub const MANIFEST_FILE: &str = "package.json";

/// Keys describing the boilerplate itself rather than the new project.
pub const STRIPPED_KEYS: &[&str] = &[
    "repository",
    "bugs",
    "homepage",
    "keywords",
    "contributors",
    "funding",
    "gitHead",
    "readme",
    "readmeFilename",
    "_id",
    "_from",
    "_resolved",
    "_integrity",
];

/// Overwrites the identity fields in place and drops [`STRIPPED_KEYS`].
///
/// Existing keys keep their position; identity keys missing from the
/// boilerplate are appended.
pub fn apply(manifest: &mut Map<String, Value>, info: &ProjectInfo) {
    let identity = [
        ("name", &info.name),
        ("author", &info.author),
        ("license", &info.license),
        ("version", &info.version),
        ("description", &info.description),
    ];
    for (key, value) in identity {
        manifest.insert(key.to_string(), Value::String(value.clone()));
    }
    for key in STRIPPED_KEYS {
        manifest.shift_remove(*key);
    }
}

pub async fn update(project_dir: &Path, info: &ProjectInfo) -> Result<()> {
    let path = project_dir.join(MANIFEST_FILE);
    let content = match fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(ScaffoldError::ManifestNotFound { path })
        }
        Err(err) => return Err(ScaffoldError::update_manifest(path, err)),
    };

    let mut manifest = match serde_json::from_str(&content) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            return Err(ScaffoldError::update_manifest(
                path,
                "manifest is not a JSON object",
            ))
        }
        Err(err) => return Err(ScaffoldError::update_manifest(path, err)),
    };

    apply(&mut manifest, info);

    let mut output = serde_json::to_string_pretty(&manifest)
        .map_err(|err| ScaffoldError::update_manifest(&path, err))?;
    output.push('\n');
    fs::write(&path, output)
        .await
        .map_err(|err| ScaffoldError::update_manifest(&path, err))?;
    debug!(path = %path.display(), "manifest updated");
    Ok(())
}
