// Run settings. Nothing is read from config files or the environment;
// everything hangs off the working directory captured at start-up so
// tests can point the whole flow at a temporary tree.

use crate::error::{ImageError, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File whose presence marks a directory as a post folder.
pub const POST_MARKER: &str = "index.md";

/// Posts root locations, relative to the working directory, in priority order.
pub const POSTS_ROOT_CANDIDATES: [&str; 3] = ["src/content/posts", "content/posts", "posts"];

/// Filename suggested when a URL path carries no extension.
pub const DEFAULT_FILENAME: &str = "image.png";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Everything a single run needs.
#[derive(Debug, Clone)]
pub struct Settings {
    pub working_dir: PathBuf,
    pub locator: LocatorConfig,
    pub fetch: FetchConfig,
}

impl Settings {
    /// Build settings rooted at `working_dir`.
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        let working_dir = working_dir.into();
        Settings {
            locator: LocatorConfig::new(&working_dir),
            fetch: FetchConfig::default(),
            working_dir,
        }
    }

    /// Build settings rooted at the process working directory.
    pub fn from_current_dir() -> Result<Self> {
        let cwd = std::env::current_dir().map_err(|source| ImageError::Filesystem {
            path: PathBuf::from("."),
            source,
        })?;
        Ok(Self::new(cwd))
    }
}

/// Where the post folder locator looks.
#[derive(Debug, Clone)]
pub struct LocatorConfig {
    pub working_dir: PathBuf,
    pub marker: String,
    /// Relative to `working_dir`, checked in order.
    pub candidates: Vec<PathBuf>,
}

impl LocatorConfig {
    pub fn new(working_dir: &Path) -> Self {
        LocatorConfig {
            working_dir: working_dir.to_path_buf(),
            marker: POST_MARKER.to_string(),
            candidates: POSTS_ROOT_CANDIDATES.iter().map(PathBuf::from).collect(),
        }
    }
}

/// Header values sent with every image request. `Referer` is derived per
/// request from the target URL's origin.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
    pub cache_control: String,
    /// Whole-request timeout. `None` waits as long as the host takes.
    pub timeout: Option<Duration>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            user_agent: BROWSER_USER_AGENT.to_string(),
            accept: "image/webp,image/apng,image/*,*/*;q=0.8".to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            cache_control: "no-cache".to_string(),
            timeout: None,
        }
    }
}
