// Error type shared by every step of a run. Each variant carries a kind
// tag decided where the failure happens, so reporting never has to
// pattern-match on message text.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("could not resolve host '{host}': {source}")]
    DnsResolution {
        host: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP error! status: {status} {reason}\nheaders:\n{headers}")]
    HttpStatus {
        status: u16,
        reason: String,
        headers: String,
    },

    #[error("invalid content type: {0}")]
    InvalidContentType(String),

    #[error("downloaded file is empty")]
    EmptyBody,

    #[error("could not find posts directory (looked for {})", .searched.join(", "))]
    PostsRootNotFound { searched: Vec<String> },

    #[error("{}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("prompt failed: {0}")]
    Prompt(#[source] std::io::Error),
}

/// Coarse classification of an [`ImageError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidUrl,
    DnsResolution,
    Network,
    Unauthorized,
    HttpStatus,
    InvalidContentType,
    EmptyBody,
    PostsRootNotFound,
    Filesystem,
    Prompt,
}

impl ImageError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ImageError::InvalidUrl { .. } => ErrorKind::InvalidUrl,
            ImageError::DnsResolution { .. } => ErrorKind::DnsResolution,
            ImageError::Network(_) => ErrorKind::Network,
            ImageError::HttpStatus { status: 401, .. } => ErrorKind::Unauthorized,
            ImageError::HttpStatus { .. } => ErrorKind::HttpStatus,
            ImageError::InvalidContentType(_) => ErrorKind::InvalidContentType,
            ImageError::EmptyBody => ErrorKind::EmptyBody,
            ImageError::PostsRootNotFound { .. } => ErrorKind::PostsRootNotFound,
            ImageError::Filesystem { .. } => ErrorKind::Filesystem,
            ImageError::Prompt(_) => ErrorKind::Prompt,
        }
    }

    /// Hint printed under the error for the failures a user can act on.
    pub fn guidance(&self) -> Option<&'static str> {
        match self.kind() {
            ErrorKind::DnsResolution => {
                Some("Could not reach the host. Check your internet connection and the URL.")
            }
            ErrorKind::Unauthorized => {
                Some("Access denied. The image may require authentication.")
            }
            _ => None,
        }
    }

    pub(crate) fn fs(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> ImageError {
        let path = path.into();
        move |source| ImageError::Filesystem { path, source }
    }
}

pub type Result<T> = std::result::Result<T, ImageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_is_tagged_from_status() {
        let err = ImageError::HttpStatus {
            status: 401,
            reason: "Unauthorized".into(),
            headers: String::new(),
        };
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert!(err.guidance().unwrap().contains("Access denied"));
    }

    #[test]
    fn other_statuses_have_no_guidance() {
        let err = ImageError::HttpStatus {
            status: 404,
            reason: "Not Found".into(),
            headers: "content-type: text/plain".into(),
        };
        assert_eq!(err.kind(), ErrorKind::HttpStatus);
        assert!(err.guidance().is_none());
        let msg = err.to_string();
        assert!(msg.contains("404 Not Found"));
        assert!(msg.contains("content-type: text/plain"));
    }

    #[test]
    fn posts_root_message_lists_candidates() {
        let err = ImageError::PostsRootNotFound {
            searched: vec!["content/posts".into(), "posts".into()],
        };
        assert_eq!(
            err.to_string(),
            "could not find posts directory (looked for content/posts, posts)"
        );
    }
}
