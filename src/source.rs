//! Image source classification and filename helpers.

use crate::error::{ImageError, Result};
use std::path::{Path, PathBuf};
use url::Url;

/// Where the image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Remote(Url),
    Local(PathBuf),
}

impl ImageSource {
    /// Anything starting with `http` is remote and must parse as a URL;
    /// everything else is a path, resolved against `working_dir`.
    pub fn parse(input: &str, working_dir: &Path) -> Result<Self> {
        let input = input.trim();
        if input.starts_with("http") {
            let url = Url::parse(input).map_err(|source| ImageError::InvalidUrl {
                url: input.to_string(),
                source,
            })?;
            Ok(ImageSource::Remote(url))
        } else {
            Ok(ImageSource::Local(working_dir.join(input)))
        }
    }
}

/// Validator for the source prompt. Non-URL input is always accepted as a
/// candidate path; whether it exists is only discovered at copy time.
pub fn validate_source(input: &str) -> std::result::Result<(), String> {
    if input.trim().is_empty() {
        return Err("Please enter an image URL or a local path".to_string());
    }
    Ok(())
}

/// Validator for a custom filename: it needs a non-empty extension.
pub fn validate_filename(input: &str) -> std::result::Result<(), String> {
    if has_extension(input) {
        Ok(())
    } else {
        Err("Filename must include an extension, e.g. image.png".to_string())
    }
}

pub fn has_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .map(|ext| !ext.is_empty())
        .unwrap_or(false)
}

/// Last segment of the URL path, as written in the URL. Empty when the
/// path ends with `/`.
pub fn filename_from_url(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default()
        .to_string()
}

/// Base name of a local path.
pub fn filename_from_path(path: &Path) -> Option<String> {
    path.file_name().map(|name| name.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_prefix_selects_remote() {
        let src = ImageSource::parse("https://example.com/img/photo.jpg", Path::new("/blog")).unwrap();
        match src {
            ImageSource::Remote(url) => assert_eq!(filename_from_url(&url), "photo.jpg"),
            other => panic!("expected remote, got {other:?}"),
        }
    }

    #[test]
    fn malformed_http_input_is_rejected() {
        let err = ImageSource::parse("http//broken", Path::new("/blog")).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidUrl);
    }

    #[test]
    fn relative_path_resolves_against_working_dir() {
        let src = ImageSource::parse("assets/cat.png", Path::new("/blog")).unwrap();
        assert_eq!(src, ImageSource::Local(PathBuf::from("/blog/assets/cat.png")));

        let src = ImageSource::parse("/tmp/cat.png", Path::new("/blog")).unwrap();
        assert_eq!(src, ImageSource::Local(PathBuf::from("/tmp/cat.png")));
    }

    #[test]
    fn source_validator_only_rejects_empty() {
        assert!(validate_source("").is_err());
        assert!(validate_source("   ").is_err());
        assert!(validate_source("not a url, still fine").is_ok());
        assert!(validate_source("https://example.com/a.png").is_ok());
    }

    #[test]
    fn filename_validator_requires_extension() {
        assert!(validate_filename("pic.png").is_ok());
        assert!(validate_filename("pic").is_err());
        assert!(validate_filename("pic.").is_err());
        assert!(validate_filename(".png").is_err());
    }

    #[test]
    fn url_without_extension() {
        let url = Url::parse("https://example.com/image").unwrap();
        let name = filename_from_url(&url);
        assert_eq!(name, "image");
        assert!(!has_extension(&name));

        let url = Url::parse("https://example.com/gallery/").unwrap();
        assert_eq!(filename_from_url(&url), "");
    }

    #[test]
    fn query_string_is_not_part_of_filename() {
        let url = Url::parse("https://cdn.example.com/a/b/shot.webp?w=800").unwrap();
        assert_eq!(filename_from_url(&url), "shot.webp");
    }
}
