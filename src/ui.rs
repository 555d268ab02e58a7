// UI layer: the single linear flow of a run. Ask for the image, find the
// post folder, then download or copy into it and report where it landed.
// Errors are returned untouched; the binary prints them and exits.

use crate::config::{Settings, DEFAULT_FILENAME};
use crate::error::{ImageError, Result};
use crate::fetch::ImageFetcher;
use crate::locate;
use crate::prompt::Prompter;
use crate::source::{self, ImageSource};
use crossterm::style::Stylize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const SOURCE_PROMPT: &str = "Enter the image URL or local path:";
pub const FILENAME_PROMPT: &str = "Enter filename e.g. image.png:";

/// Run one interactive session and return the path the image was saved to.
pub fn run(settings: &Settings, prompter: &dyn Prompter, fetcher: &ImageFetcher) -> Result<PathBuf> {
    let input = prompter.input(SOURCE_PROMPT, None, &source::validate_source)?;
    let folder = locate::locate(&settings.locator, prompter)?;
    tracing::info!(folder = %folder.display(), "post folder selected");

    match ImageSource::parse(&input, &settings.working_dir)? {
        ImageSource::Remote(url) => save_remote(&url, &folder, prompter, fetcher),
        ImageSource::Local(path) => save_local(&path, &folder),
    }
}

fn save_remote(url: &Url, folder: &Path, prompter: &dyn Prompter, fetcher: &ImageFetcher) -> Result<PathBuf> {
    let mut filename = source::filename_from_url(url);
    if !source::has_extension(&filename) {
        filename = prompter.input(FILENAME_PROMPT, Some(DEFAULT_FILENAME), &source::validate_filename)?;
    }
    let output = folder.join(filename);

    // spinner while the request is in flight
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Downloading {url}"));
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = fetcher.fetch(url, &output);
    spinner.finish_and_clear();

    let download = result?;
    println!("{}", format!("✅ Image saved to {}", download.path.display()).green());
    println!("📦 Size: {:.2} KB", download.kilobytes());
    Ok(download.path)
}

fn save_local(source_path: &Path, folder: &Path) -> Result<PathBuf> {
    let filename = source::filename_from_path(source_path).ok_or_else(|| ImageError::Filesystem {
        path: source_path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
    })?;
    fs::create_dir_all(folder).map_err(ImageError::fs(folder))?;

    let output = folder.join(filename);
    // copying a file onto itself would truncate it
    if is_same_file(source_path, &output) {
        tracing::debug!(path = %output.display(), "image already in place");
        println!("{}", format!("✅ Image already at {}", output.display()).green());
        return Ok(output);
    }
    tracing::debug!(from = %source_path.display(), to = %output.display(), "copying image");
    fs::copy(source_path, &output).map_err(ImageError::fs(source_path))?;

    println!("{}", format!("✅ Image copied to {}", output.display()).green());
    Ok(output)
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
