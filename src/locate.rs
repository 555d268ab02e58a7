//! Post folder discovery.
//!
//! A run started inside a post folder (one holding `index.md`) uses it
//! directly. Otherwise the first existing posts root is listed and the
//! user picks either the root entry or one of its subfolders.

use crate::config::LocatorConfig;
use crate::error::{ImageError, Result};
use crate::prompt::Prompter;
use std::fs;
use std::path::{Path, PathBuf};

pub const SELECT_PROMPT: &str = "Select the post folder to store image";

/// The posts root that was found, both as shown to the user and on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostsRoot {
    pub relative: PathBuf,
    pub absolute: PathBuf,
}

/// One entry of the selection prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderChoice {
    /// The root entry; resolves to the working directory.
    Root,
    Post(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceItem {
    pub label: String,
    pub choice: FolderChoice,
}

/// Decide which directory receives the image.
pub fn locate(config: &LocatorConfig, prompter: &dyn Prompter) -> Result<PathBuf> {
    if exists(&config.working_dir.join(&config.marker)) {
        tracing::debug!(dir = %config.working_dir.display(), "working directory is a post folder");
        return Ok(config.working_dir.clone());
    }

    let root = find_posts_root(config)?;
    let folders = list_post_folders(&root.absolute)?;
    let items = folder_choices(&root, &folders);
    let labels: Vec<String> = items.iter().map(|item| item.label.clone()).collect();

    let picked = prompter.select(SELECT_PROMPT, &labels)?;
    let choice = items
        .get(picked)
        .map(|item| item.choice.clone())
        .unwrap_or(FolderChoice::Root);
    Ok(resolve_choice(config, &root, &choice))
}

/// First candidate that exists under the working directory.
pub fn find_posts_root(config: &LocatorConfig) -> Result<PostsRoot> {
    for candidate in &config.candidates {
        let absolute = config.working_dir.join(candidate);
        tracing::debug!(candidate = %absolute.display(), "probing posts root");
        if exists(&absolute) {
            return Ok(PostsRoot {
                relative: candidate.clone(),
                absolute,
            });
        }
    }
    Err(ImageError::PostsRootNotFound {
        searched: config
            .candidates
            .iter()
            .map(|c| c.display().to_string())
            .collect(),
    })
}

/// Names of the immediate subdirectories of `root`, sorted.
pub fn list_post_folders(root: &Path) -> Result<Vec<String>> {
    let mut folders = Vec::new();
    for entry in fs::read_dir(root).map_err(ImageError::fs(root))? {
        let entry = entry.map_err(ImageError::fs(root))?;
        let file_type = entry.file_type().map_err(ImageError::fs(entry.path()))?;
        if file_type.is_dir() {
            folders.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    folders.sort();
    Ok(folders)
}

/// Root entry first, then one entry per subfolder.
pub fn folder_choices(root: &PostsRoot, folders: &[String]) -> Vec<ChoiceItem> {
    let root_label = root.relative.display().to_string();
    std::iter::once(ChoiceItem {
        label: root_label.clone(),
        choice: FolderChoice::Root,
    })
    .chain(folders.iter().map(|name| ChoiceItem {
        label: format!("{root_label}/{name}"),
        choice: FolderChoice::Post(name.clone()),
    }))
    .collect()
}

pub fn resolve_choice(config: &LocatorConfig, root: &PostsRoot, choice: &FolderChoice) -> PathBuf {
    match choice {
        FolderChoice::Root => config.working_dir.clone(),
        FolderChoice::Post(name) => root.absolute.join(name),
    }
}

// Errors while probing count as "not there".
fn exists(path: &Path) -> bool {
    path.try_exists().unwrap_or(false)
}
