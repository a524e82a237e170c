//! Resolve Instagram post URLs into direct media URLs and keep the media
//! cached next to the notes that embed them.
//!
//! The entry point for hosts is [`downloader::Downloader::fetch_and_cache`];
//! [`preview::PreviewService`] layers the code-block flow of the editor
//! plugin on top of it.

#[macro_use]
extern crate log;

pub mod config;
pub mod downloader;
pub mod entry;
pub mod error;
pub mod http;
pub mod platform;
pub mod preview;
pub mod storage;
pub mod utils;

pub use error::{Error, ErrorKind, Result};
