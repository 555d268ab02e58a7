// Image fetcher: a small blocking HTTP client that downloads one image,
// checks that what came back really is an image, and writes it to disk.
// Some image hosts refuse non-browser clients, so requests carry the
// headers a desktop browser would send.

use crate::config::FetchConfig;
use crate::error::{ImageError, Result};
use reqwest::blocking::{Client, Response};
use reqwest::header::{
    HeaderMap, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, CONTENT_TYPE, REFERER, USER_AGENT,
};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use url::Url;

/// Blocking HTTP client plus the header values to send.
#[derive(Clone)]
pub struct ImageFetcher {
    client: Client,
    config: FetchConfig,
}

/// An image that made it to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct Download {
    pub path: PathBuf,
    pub size: u64,
}

impl Download {
    pub fn kilobytes(&self) -> f64 {
        self.size as f64 / 1024.0
    }
}

impl ImageFetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(ImageFetcher { client, config })
    }

    /// Download `url` and write it to `output`, replacing any existing file.
    /// Nothing touches the filesystem unless the response passes validation.
    pub fn fetch(&self, url: &Url, output: &Path) -> Result<Download> {
        let bytes = self.download(url)?;
        write_atomic(output, &bytes)?;
        tracing::info!(path = %output.display(), bytes = bytes.len(), "image saved");
        Ok(Download {
            path: output.to_path_buf(),
            size: bytes.len() as u64,
        })
    }

    /// GET `url` and return the body once status, content type and length
    /// have been checked, in that order.
    pub fn download(&self, url: &Url) -> Result<Vec<u8>> {
        let referer = url.origin().ascii_serialization();
        tracing::debug!(%url, %referer, "requesting image");

        let res = self
            .client
            .get(url.clone())
            .header(USER_AGENT, &self.config.user_agent)
            .header(ACCEPT, &self.config.accept)
            .header(ACCEPT_LANGUAGE, &self.config.accept_language)
            .header(REFERER, referer)
            .header(CACHE_CONTROL, &self.config.cache_control)
            .send()
            .map_err(|e| classify_send_error(url, e))?;

        let res = check_status(res)?;

        let content_type = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.starts_with("image/") {
            let shown = if content_type.is_empty() { "<missing>".to_string() } else { content_type };
            return Err(ImageError::InvalidContentType(shown));
        }

        let bytes = res.bytes()?;
        if bytes.is_empty() {
            return Err(ImageError::EmptyBody);
        }
        tracing::debug!(%content_type, len = bytes.len(), "image received");
        Ok(bytes.to_vec())
    }
}

fn check_status(res: Response) -> Result<Response> {
    let status = res.status();
    tracing::debug!(status = status.as_u16(), "response received");
    if status.is_success() {
        return Ok(res);
    }
    Err(ImageError::HttpStatus {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("").to_string(),
        headers: format_headers(res.headers()),
    })
}

fn format_headers(headers: &HeaderMap) -> String {
    headers
        .iter()
        .map(|(name, value)| format!("  {}: {}", name, value.to_str().unwrap_or("<binary>")))
        .collect::<Vec<_>>()
        .join("\n")
}

fn classify_send_error(url: &Url, err: reqwest::Error) -> ImageError {
    if err.is_connect() && is_dns_failure(&err) {
        return ImageError::DnsResolution {
            host: url.host_str().unwrap_or_default().to_string(),
            source: err,
        };
    }
    ImageError::Network(err)
}

// Socket-level io errors rule DNS out; past that the resolver failure is
// only visible in the messages of the error chain.
fn is_dns_failure(err: &(dyn std::error::Error + 'static)) -> bool {
    use std::io::ErrorKind::*;

    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(io) = e.downcast_ref::<std::io::Error>() {
            if matches!(io.kind(), ConnectionRefused | ConnectionReset | ConnectionAborted | TimedOut) {
                return false;
            }
        }
        let msg = e.to_string();
        if msg.contains("dns error") || msg.contains("failed to lookup address") {
            return true;
        }
        current = e.source();
    }
    false
}

/// Write `bytes` to a temporary file next to `path`, then move it into place.
/// Creates the parent directory tree first.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(ImageError::fs(parent))?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(ImageError::fs(parent))?;
    tmp.write_all(bytes).map_err(ImageError::fs(path))?;
    tmp.persist(path).map_err(|e| ImageError::Filesystem {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}
