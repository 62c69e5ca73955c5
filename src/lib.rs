//! # hlstream-rs
//! A library for parsing and generating HLS master and media playlists
//!
//! # Example
//! ```rust
//! use hlstream_rs::MasterPlaylist;
//!
//! // 1. Parse
//! let playlist = MasterPlaylist::load_raw(concat!(
//!     "#EXTM3U\n",
//!     "#EXT-X-MEDIA:TYPE=AUDIO,GROUP-ID=\"aac\",NAME=\"English\",LANGUAGE=\"en\"\n",
//!     "#EXT-X-STREAM-INF:BANDWIDTH=1500000,RESOLUTION=1920x1080,AUDIO=\"aac\"\n",
//!     "1080p.m3u8\n",
//! )).unwrap();
//! assert_eq!(playlist.streams().len(), 1);
//!
//! // 2. Generate
//! println!("{}", playlist.to_string());
//! ```

pub mod attribute;
mod error;
pub mod export;
pub mod fetch;
pub mod format;
pub mod hooks;
mod registry;
mod render;
mod tag;

pub use error::PlaylistError;
pub use export::PlaylistOptions;
pub use fetch::{Fetch, FetchError};
pub use format::master::MasterPlaylist;
pub use format::media::MediaEntry;
pub use format::segments::{InitMap, Segment, SegmentsPlaylist};
pub use format::stream::StreamEntry;
pub use hooks::Hooks;
pub use registry::{GroupRole, RenditionSet};
pub use tag::{AttributeValue, AttributedTag};
