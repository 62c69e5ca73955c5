use crate::fetch::FetchError;
use thiserror::Error;

/// Errors surfaced at the parse and lazy-load boundaries.
///
/// A failed parse never exposes a partially built playlist: the parsers
/// build into a fresh value that is only returned on success.
#[derive(Debug, Error)]
pub enum PlaylistError {
    /// The document does not start with the `#EXTM3U\n` magic header.
    #[error("M3U8 content does not start with magic bytes")]
    MissingMagicHeader,

    /// Content is present but fails the playlist-kind test.
    #[error("M3U8 content cannot be considered a {kind} playlist")]
    UnrecognizedDocumentKind { kind: &'static str },

    /// A `KEY=VALUE` fragment without a `=` separator.
    #[error("malformed attribute fragment: {0:?}")]
    MalformedAttribute(String),

    /// A typed attribute value that does not parse, e.g. a non-numeric
    /// bandwidth or a resolution without an `x` separator.
    #[error("malformed {attribute} value: {value:?}")]
    MalformedScalar {
        attribute: &'static str,
        value: String,
    },

    /// The external fetch collaborator returned an error.
    #[error("failed to fetch remote playlist")]
    FetchFailure(#[from] FetchError),

    /// A directive requiring a following URI line found none.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    /// A lazy-load request named a stream index that does not exist.
    #[error("no stream at index {0}")]
    StreamNotFound(usize),

    /// The stream at the requested index carries no URI to load from.
    #[error("stream at index {0} has no URI")]
    MissingStreamUri(usize),

    /// Fetched bytes are not valid UTF-8.
    #[error("remote playlist is not valid UTF-8")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}
