//! The typed playlist object graph.

pub mod master;
pub mod media;
pub mod segments;
pub mod stream;

/// Directive names of the playlist grammar.
pub mod directives {
    /// The fixed magic header line, with its terminating newline.
    pub const MAGIC: &str = "#EXTM3U\n";

    pub const X_STREAM_INF: &str = "#EXT-X-STREAM-INF:";
    pub const X_MEDIA: &str = "#EXT-X-MEDIA:";
    pub const EXTINF: &str = "#EXTINF:";
    pub const X_TARGETDURATION: &str = "#EXT-X-TARGETDURATION:";
    pub const X_ALLOW_CACHE: &str = "#EXT-X-ALLOW-CACHE:";
    pub const X_PLAYLIST_TYPE: &str = "#EXT-X-PLAYLIST-TYPE:";
    pub const X_VERSION: &str = "#EXT-X-VERSION:";
    pub const X_MEDIA_SEQUENCE: &str = "#EXT-X-MEDIA-SEQUENCE:";
    pub const X_MAP: &str = "#EXT-X-MAP:";
    pub const X_ENDLIST: &str = "#EXT-X-ENDLIST";
}
