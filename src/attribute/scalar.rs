use std::fmt::Display;

use smol_str::SmolStr;

use crate::PlaylistError;
use crate::tag::AttributeValue;

/// A tri-state boolean attribute.
///
/// Parses case-insensitively from `yes`, `no`, `true` and `false`; anything
/// else leaves the value unset, it is never defaulted and never an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoolAttr {
    value: Option<bool>,
}

impl BoolAttr {
    pub fn parse(raw: &str) -> Self {
        let value = match raw.trim().to_lowercase().as_str() {
            "yes" | "true" => Some(true),
            "no" | "false" => Some(false),
            _ => None,
        };

        Self { value }
    }

    pub fn from_bool(value: bool) -> Self {
        Self { value: Some(value) }
    }

    pub fn value(&self) -> Option<bool> {
        self.value
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    /// The canonical `KEY=YES` / `KEY=NO` form, `None` when unset.
    pub fn to_m3u8(&self, key: &str) -> Option<String> {
        self.value
            .map(|v| format!("{}={}", key, if v { "YES" } else { "NO" }))
    }
}

/// An ordered, non-empty list of codec identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecList {
    pub codecs: Vec<SmolStr>,
}

impl CodecList {
    /// Builds the list from an attribute value: either the pipe-split list
    /// produced by the tag parser or a comma-joined scalar. Empty items are
    /// dropped; a list with nothing left is an error.
    pub fn parse(value: &AttributeValue) -> Result<Self, PlaylistError> {
        let codecs: Vec<SmolStr> = match value {
            AttributeValue::List(items) => items.clone(),
            AttributeValue::Scalar(raw) => raw.split(',').map(SmolStr::new).collect(),
        };
        let codecs: Vec<SmolStr> = codecs
            .into_iter()
            .filter(|c| !c.trim().is_empty())
            .collect();

        if codecs.is_empty() {
            return Err(PlaylistError::MalformedScalar {
                attribute: "CODECS",
                value: value.to_scalar().to_string(),
            });
        }

        Ok(Self { codecs })
    }

    pub fn to_m3u8(&self) -> String {
        format!("CODECS=\"{}\"", self)
    }
}

impl Display for CodecList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .codecs
            .iter()
            .map(|x| x.as_str())
            .collect::<Vec<_>>()
            .join(",");
        write!(f, "{}", joined)
    }
}

/// A frame rate in frames per second.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameRate {
    pub fps: f64,
}

impl FrameRate {
    pub fn parse(raw: &str) -> Result<Self, PlaylistError> {
        let fps: f64 = raw
            .trim()
            .parse()
            .map_err(|_| PlaylistError::MalformedScalar {
                attribute: "FRAME-RATE",
                value: raw.to_owned(),
            })?;

        if !fps.is_finite() || fps < 0.0 {
            return Err(PlaylistError::MalformedScalar {
                attribute: "FRAME-RATE",
                value: raw.to_owned(),
            });
        }

        Ok(Self { fps })
    }

    pub fn to_m3u8(&self) -> String {
        format!("FRAME-RATE={}", self.fps)
    }
}

/// A rendition group identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupId(pub SmolStr);

impl GroupId {
    pub fn new(value: impl AsRef<str>) -> Self {
        Self(SmolStr::new(value.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_m3u8(&self) -> String {
        format!("GROUP-ID=\"{}\"", self.0)
    }
}

impl Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A human-readable rendition name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name(pub SmolStr);

impl Name {
    pub fn new(value: impl AsRef<str>) -> Self {
        Self(SmolStr::new(value.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_m3u8(&self) -> String {
        format!("NAME=\"{}\"", self.0)
    }
}

/// A URI attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uri(pub SmolStr);

impl Uri {
    pub fn new(value: impl AsRef<str>) -> Self {
        Self(SmolStr::new(value.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_m3u8(&self) -> String {
        format!("URI=\"{}\"", self.0)
    }
}

impl Display for Uri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A program identifier, carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramId(pub SmolStr);

impl ProgramId {
    pub fn new(value: impl AsRef<str>) -> Self {
        Self(SmolStr::new(value.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_m3u8(&self) -> String {
        format!("PROGRAM-ID={}", self.0)
    }
}

/// The kind of media a rendition carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaType {
    Audio,
    Video,
    Subtitles,
    ClosedCaptions,
    /// An unrecognized type, carried verbatim so round trips stay lossless.
    Other(SmolStr),
}

impl MediaType {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "AUDIO" => Self::Audio,
            "VIDEO" => Self::Video,
            "SUBTITLES" => Self::Subtitles,
            "CLOSED-CAPTIONS" => Self::ClosedCaptions,
            _ => Self::Other(SmolStr::new(raw)),
        }
    }

    pub fn canonical(&self) -> &str {
        match self {
            Self::Audio => "AUDIO",
            Self::Video => "VIDEO",
            Self::Subtitles => "SUBTITLES",
            Self::ClosedCaptions => "CLOSED-CAPTIONS",
            Self::Other(raw) => raw,
        }
    }

    pub fn to_m3u8(&self) -> String {
        format!("TYPE={}", self.canonical())
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.canonical().to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_attr_states() {
        assert_eq!(BoolAttr::parse("YES").value(), Some(true));
        assert_eq!(BoolAttr::parse("no").value(), Some(false));
        assert_eq!(BoolAttr::parse("True").value(), Some(true));
        assert_eq!(BoolAttr::parse("FALSE").value(), Some(false));
        assert_eq!(BoolAttr::parse("maybe").value(), None);
        assert_eq!(BoolAttr::parse("").value(), None);
    }

    #[test]
    fn test_bool_attr_m3u8() {
        assert_eq!(
            BoolAttr::parse("yes").to_m3u8("DEFAULT").unwrap(),
            "DEFAULT=YES"
        );
        assert!(BoolAttr::parse("junk").to_m3u8("DEFAULT").is_none());
    }

    #[test]
    fn test_codec_list_from_list_value() {
        let value = AttributeValue::List(vec![
            SmolStr::new("avc1.64001f"),
            SmolStr::new("mp4a.40.2"),
        ]);
        let codecs = CodecList::parse(&value).unwrap();
        assert_eq!(codecs.codecs.len(), 2);
        assert_eq!(codecs.to_m3u8(), "CODECS=\"avc1.64001f,mp4a.40.2\"");
    }

    #[test]
    fn test_codec_list_from_scalar_value() {
        let value = AttributeValue::Scalar(SmolStr::new("mp4a.40.2"));
        let codecs = CodecList::parse(&value).unwrap();
        assert_eq!(codecs.codecs, vec![SmolStr::new("mp4a.40.2")]);
    }

    #[test]
    fn test_codec_list_rejects_empty() {
        assert!(CodecList::parse(&AttributeValue::Scalar(SmolStr::new(""))).is_err());
        assert!(CodecList::parse(&AttributeValue::Scalar(SmolStr::new(",,"))).is_err());
    }

    #[test]
    fn test_codec_list_drops_empty_items() {
        let value = AttributeValue::Scalar(SmolStr::new("avc1.64001f,,mp4a.40.2"));
        let codecs = CodecList::parse(&value).unwrap();
        assert_eq!(
            codecs.codecs,
            vec![SmolStr::new("avc1.64001f"), SmolStr::new("mp4a.40.2")]
        );

        let value = AttributeValue::List(vec![
            SmolStr::new("avc1.64001f"),
            SmolStr::new(""),
            SmolStr::new("mp4a.40.2"),
        ]);
        assert_eq!(CodecList::parse(&value).unwrap().codecs.len(), 2);
    }

    #[test]
    fn test_frame_rate() {
        assert_eq!(FrameRate::parse("29.97").unwrap().fps, 29.97);
        assert_eq!(FrameRate::parse("30").unwrap().to_m3u8(), "FRAME-RATE=30");
        assert!(FrameRate::parse("-1").is_err());
        assert!(FrameRate::parse("fast").is_err());
    }

    #[test]
    fn test_media_type() {
        assert_eq!(MediaType::parse("audio"), MediaType::Audio);
        assert_eq!(
            MediaType::parse("closed-captions").to_m3u8(),
            "TYPE=CLOSED-CAPTIONS"
        );
        assert_eq!(
            MediaType::parse("trick-play"),
            MediaType::Other(SmolStr::new("trick-play"))
        );
    }

    #[test]
    fn test_quoted_wrappers() {
        assert_eq!(GroupId::new("aac").to_m3u8(), "GROUP-ID=\"aac\"");
        assert_eq!(Name::new("English").to_m3u8(), "NAME=\"English\"");
        assert_eq!(Uri::new("a.m3u8").to_m3u8(), "URI=\"a.m3u8\"");
        assert_eq!(ProgramId::new("1").to_m3u8(), "PROGRAM-ID=1");
    }
}
