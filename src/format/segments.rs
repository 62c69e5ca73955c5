use log::debug;
use smol_str::SmolStr;

use crate::PlaylistError;
use crate::fetch::Fetch;
use crate::format::directives;
use crate::hooks::Hooks;
use crate::tag::AttributedTag;

/// One time-sliced media segment: an `#EXTINF` line plus its URI line.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Duration in seconds.
    pub duration: f64,
    /// Optional title; an empty title in the source is normalized to absent.
    pub title: Option<SmolStr>,
    pub uri: SmolStr,
}

/// The `#EXT-X-MAP` initialization-segment reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitMap {
    pub uri: SmolStr,
    pub byterange: Option<SmolStr>,
}

/// A media (segment) playlist: an ordered list of segments plus the
/// document-level meta directives.
#[derive(Debug, Clone, Default)]
pub struct SegmentsPlaylist {
    pub target_duration: Option<f64>,
    pub allow_cache: Option<bool>,
    pub playlist_type: Option<SmolStr>,
    pub version: Option<SmolStr>,
    pub media_sequence: Option<u64>,
    pub map: Option<InitMap>,
    segments: Vec<Segment>,
}

impl SegmentsPlaylist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the content passes the media-playlist kind test.
    pub fn test(content: &str) -> bool {
        content.contains(directives::EXTINF)
    }

    /// Parses a media playlist from raw document text.
    ///
    /// The magic header is validated before any directive is examined; a
    /// failed parse returns an error and exposes no partial playlist.
    pub fn load_raw(content: &str) -> Result<Self, PlaylistError> {
        if !content.starts_with(directives::MAGIC) {
            return Err(PlaylistError::MissingMagicHeader);
        }

        if !Self::test(content) {
            return Err(PlaylistError::UnrecognizedDocumentKind {
                kind: "segments",
            });
        }

        let mut playlist = Self::new();
        let mut lines = content.lines().skip(1);

        while let Some(line) = lines.next() {
            let line = line.trim();

            if let Some(payload) = line.strip_prefix(directives::EXTINF) {
                let mut segment = parse_inf(payload)?;
                let uri = lines.next().ok_or(PlaylistError::UnexpectedEndOfInput)?;
                segment.uri = SmolStr::new(uri.trim());
                playlist.segments.push(segment);
            } else if let Some(value) = line.strip_prefix(directives::X_TARGETDURATION) {
                playlist.target_duration =
                    Some(value.trim().parse().map_err(|_| {
                        PlaylistError::MalformedScalar {
                            attribute: "TARGETDURATION",
                            value: value.to_owned(),
                        }
                    })?);
            } else if let Some(value) = line.strip_prefix(directives::X_ALLOW_CACHE) {
                playlist.allow_cache = Some(value.trim() == "YES");
            } else if let Some(value) = line.strip_prefix(directives::X_PLAYLIST_TYPE) {
                playlist.playlist_type = Some(SmolStr::new(value.trim()));
            } else if let Some(value) = line.strip_prefix(directives::X_VERSION) {
                playlist.version = Some(SmolStr::new(value.trim()));
            } else if let Some(value) = line.strip_prefix(directives::X_MEDIA_SEQUENCE) {
                playlist.media_sequence =
                    Some(value.trim().parse().map_err(|_| {
                        PlaylistError::MalformedScalar {
                            attribute: "MEDIA-SEQUENCE",
                            value: value.to_owned(),
                        }
                    })?);
            } else if line.starts_with(directives::X_MAP) {
                let tag = AttributedTag::parse(line)?;
                playlist.map = tag.get_scalar("URI").map(|uri| InitMap {
                    uri,
                    byterange: tag.get_scalar("BYTERANGE"),
                });
            } else {
                // comments, blank lines, end-list and unrecognized directives
            }
        }

        debug!("parsed segments playlist: {} segments", playlist.segments.len());
        Ok(playlist)
    }

    /// Fetches a media playlist through the external fetch capability and
    /// parses it. One fetch per call, no retry.
    pub fn load_remote(url: &str, fetcher: &dyn Fetch) -> Result<Self, PlaylistError> {
        let bytes = fetcher.fetch(url)?;
        let content = std::str::from_utf8(&bytes)?;
        Self::load_raw(content)
    }

    pub fn push(&mut self, segment: Segment) -> &mut Self {
        self.segments.push(segment);
        self
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The map URI after the resolve-URI hook has had a chance to rewrite
    /// it; without a hook the raw URI passes through unchanged.
    pub fn resolved_map_uri(&self, hooks: &Hooks, base_url: Option<&str>) -> Option<String> {
        self.map
            .as_ref()
            .map(|map| hooks.resolve(base_url, &map.uri))
    }
}

/// Parses the `#EXTINF` payload: the duration up to the first comma, the
/// title after it.
fn parse_inf(payload: &str) -> Result<Segment, PlaylistError> {
    let (duration, title) = match payload.split_once(',') {
        Some((duration, title)) => (duration, title),
        None => (payload, ""),
    };

    let duration: f64 = duration
        .trim()
        .parse()
        .map_err(|_| PlaylistError::MalformedScalar {
            attribute: "EXTINF",
            value: payload.to_owned(),
        })?;

    let title = title.trim();
    let title = if title.is_empty() {
        None
    } else {
        Some(SmolStr::new(title))
    };

    Ok(Segment {
        duration,
        title,
        uri: SmolStr::default(),
    })
}
