//! M3U8 text generation, the mirror of parsing.
//!
//! Serialization always re-emits canonical attribute keys in a fixed order,
//! with the non-standard bag appended last, so repeated
//! serialize → parse → serialize passes are stable.

use std::fmt::{self, Display, Write as _};

use smol_str::SmolStr;

use crate::format::directives;
use crate::format::master::MasterPlaylist;
use crate::format::media::MediaEntry;
use crate::format::segments::{Segment, SegmentsPlaylist};
use crate::format::stream::StreamEntry;
use crate::hooks::Hooks;
use crate::tag::AttributeValue;

/// Renders one attribute from the non-standard bag. List values are quoted
/// so their commas survive the next parse.
fn push_extra(parts: &mut Vec<String>, key: &SmolStr, value: &AttributeValue) {
    match value {
        AttributeValue::Scalar(raw) => parts.push(format!("{}={}", key, raw)),
        AttributeValue::List(_) => {
            parts.push(format!("{}=\"{}\"", key, value.to_scalar()));
        }
    }
}

impl StreamEntry {
    /// The `#EXT-X-STREAM-INF` directive line, without the URI line.
    pub fn directive_line(&self) -> String {
        let mut parts = Vec::new();

        if let Some(program_id) = self.program_id() {
            parts.push(program_id.to_m3u8());
        }
        parts.push(self.bandwidth().to_m3u8());
        if let Some(average) = self.average_bandwidth() {
            parts.push(format!("AVERAGE-BANDWIDTH={}", average.bps()));
        }
        if let Some(resolution) = self.resolution() {
            parts.push(resolution.to_m3u8());
        }
        if let Some(frame_rate) = self.frame_rate() {
            parts.push(frame_rate.to_m3u8());
        }
        if let Some(codecs) = self.codecs() {
            parts.push(codecs.to_m3u8());
        }
        if let Some(group) = self.audio_group() {
            parts.push(format!("AUDIO=\"{}\"", group));
        }
        if let Some(group) = self.subtitle_group() {
            parts.push(format!("SUBTITLES=\"{}\"", group));
        }
        for (key, value) in self.extra() {
            push_extra(&mut parts, key, value);
        }

        format!("#EXT-X-STREAM-INF:{}", parts.join(","))
    }
}

impl Display for StreamEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.directive_line())
    }
}

impl MediaEntry {
    /// The `#EXT-X-MEDIA` directive line.
    pub fn directive_line(&self) -> String {
        let mut parts = Vec::new();

        if let Some(media_type) = self.media_type() {
            parts.push(media_type.to_m3u8());
        }
        if let Some(group) = self.group_id() {
            parts.push(group.to_m3u8());
        }
        if let Some(name) = self.name() {
            parts.push(name.to_m3u8());
        }
        if let Some(language) = self.language() {
            parts.push(language.to_m3u8());
        }
        if let Some(default) = self.default().to_m3u8("DEFAULT") {
            parts.push(default);
        }
        if let Some(autoselect) = self.autoselect().to_m3u8("AUTOSELECT") {
            parts.push(autoselect);
        }
        if let Some(uri) = self.uri() {
            parts.push(uri.to_m3u8());
        }
        for (key, value) in self.extra() {
            push_extra(&mut parts, key, value);
        }

        format!("#EXT-X-MEDIA:{}", parts.join(","))
    }
}

impl Display for MediaEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.directive_line())
    }
}

impl MasterPlaylist {
    /// Serializes the document, running the format-URI hook over every
    /// emitted stream URI.
    pub fn to_m3u8_with(&self, hooks: &Hooks) -> String {
        let mut output = String::from(directives::MAGIC);

        // a stream without a URI cannot be expressed in the grammar
        for stream in self.streams() {
            let Some(uri) = stream.uri() else {
                continue;
            };
            let _ = writeln!(output, "{}", stream.directive_line());
            let _ = writeln!(output, "{}", hooks.format(self.url(), uri));
        }

        if !self.medias().is_empty() {
            output.push('\n');
            for media in self.medias() {
                let _ = writeln!(output, "{}", media.directive_line());
            }
        }

        output
    }
}

impl Display for MasterPlaylist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_m3u8_with(&Hooks::default()))
    }
}

impl Display for Segment {
    /// `#EXTINF:<duration>,<title>` followed by the URI line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "#EXTINF:{:.3},{}",
            self.duration,
            self.title.as_deref().unwrap_or_default()
        )?;
        write!(f, "{}", self.uri)
    }
}

impl SegmentsPlaylist {
    /// Serializes the document, running the format-URI hook over every
    /// emitted segment URI.
    pub fn to_m3u8_with(&self, hooks: &Hooks, base_url: Option<&str>) -> String {
        let mut output = String::from(directives::MAGIC);

        if let Some(duration) = self.target_duration {
            let _ = writeln!(output, "{}{}", directives::X_TARGETDURATION, duration);
        }
        if let Some(allow_cache) = self.allow_cache {
            let _ = writeln!(
                output,
                "{}{}",
                directives::X_ALLOW_CACHE,
                if allow_cache { "YES" } else { "NO" }
            );
        }
        if let Some(playlist_type) = &self.playlist_type {
            let _ = writeln!(output, "{}{}", directives::X_PLAYLIST_TYPE, playlist_type);
        }
        if let Some(version) = &self.version {
            let _ = writeln!(output, "{}{}", directives::X_VERSION, version);
        }
        if let Some(sequence) = self.media_sequence {
            let _ = writeln!(output, "{}{}", directives::X_MEDIA_SEQUENCE, sequence);
        }
        if let Some(map) = &self.map {
            let byterange = map
                .byterange
                .as_ref()
                .map(|b| format!(",BYTERANGE=\"{}\"", b))
                .unwrap_or_default();
            let _ = writeln!(
                output,
                "{}URI=\"{}\"{}",
                directives::X_MAP,
                map.uri,
                byterange
            );
        }

        for segment in self.segments() {
            let _ = writeln!(
                output,
                "#EXTINF:{:.3},{}",
                segment.duration,
                segment.title.as_deref().unwrap_or_default()
            );
            let _ = writeln!(output, "{}", hooks.format(base_url, &segment.uri));
        }

        output.push_str(directives::X_ENDLIST);
        output.push('\n');
        output
    }
}

impl Display for SegmentsPlaylist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_m3u8_with(&Hooks::default(), None))
    }
}
