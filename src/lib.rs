// Library root
// -----------
// This crate exposes the pieces of the `post-image` CLI. The binary
// (`main.rs`) wires them together for a single interactive run.
//
// Module responsibilities:
// - `config`: per-run settings (working directory, posts roots, headers).
// - `error`: the error type shared by every step, with kind tags.
// - `fetch`: downloads an image over HTTP and writes it to disk.
// - `logger`: tracing subscriber setup, logs go to stderr.
// - `locate`: figures out which post folder receives the image.
// - `prompt`: the interactive prompt seam and its dialoguer backend.
// - `source`: classifies the user input and derives filenames.
// - `ui`: the linear flow tying everything together.
pub mod config;
pub mod error;
pub mod fetch;
pub mod locate;
pub mod logger;
pub mod prompt;
pub mod source;
pub mod ui;

pub use error::{ErrorKind, ImageError, Result};
