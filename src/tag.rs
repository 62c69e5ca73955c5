use lazy_static::lazy_static;
use regex::{Captures, Regex};
use smol_str::SmolStr;

use crate::PlaylistError;

lazy_static! {
    /// Matches one double-quoted run. The negated class keeps each match
    /// inside a single pair of quotes: a line with two quoted fields must not
    /// be swallowed as one match.
    static ref QUOTED_RUN: Regex = Regex::new("\"[^\"]*\"").expect("Regular expression error");
}

/// The value side of one `KEY=VALUE` attribute.
///
/// Values that contained commas inside their quotes come back as a list,
/// everything else as a scalar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    Scalar(SmolStr),
    List(Vec<SmolStr>),
}

impl AttributeValue {
    /// The scalar form of the value; lists are rejoined with commas.
    pub fn to_scalar(&self) -> SmolStr {
        match self {
            Self::Scalar(value) => value.clone(),
            Self::List(items) => SmolStr::new(
                items
                    .iter()
                    .map(|x| x.as_str())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
        }
    }

    /// The list form of the value; scalars become a one-element list.
    pub fn to_list(&self) -> Vec<SmolStr> {
        match self {
            Self::Scalar(value) => vec![value.clone()],
            Self::List(items) => items.clone(),
        }
    }
}

/// One parsed `#EXT-…` directive that carries key-value attributes.
///
/// Keys are normalized to upper case and kept in document order; if a key
/// repeats, the last occurrence wins (the value is replaced in place).
/// Commas inside double quotes are protected with a pipe placeholder before
/// the payload is split, which is why a value may surface as a list.
///
/// Known limitation: nested or unbalanced quotes are undefined behavior, the
/// scan assumes every `"` opens or closes exactly one run.
#[derive(Debug, Clone, Default)]
pub struct AttributedTag {
    /// The tag name, everything before the first colon.
    pub tag: SmolStr,
    attributes: Vec<(SmolStr, AttributeValue)>,
}

impl AttributedTag {
    /// Parses one raw directive line.
    pub fn parse(raw: &str) -> Result<Self, PlaylistError> {
        let (tag, payload) = match raw.split_once(':') {
            Some((tag, payload)) => (tag, payload),
            None => (raw, ""),
        };

        let mut parsed = Self {
            tag: SmolStr::new(tag),
            attributes: Vec::new(),
        };

        let payload = escape_commas_inside_quotes(payload);
        if payload.trim().is_empty() {
            return Ok(parsed);
        }

        for pair in payload.split(',') {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| PlaylistError::MalformedAttribute(pair.to_owned()))?;

            parsed.set(key, parse_pipes(unquote(value)));
        }

        Ok(parsed)
    }

    /// Stores an attribute, replacing the value of an already-present key
    /// without disturbing its position.
    pub fn set(&mut self, key: &str, value: AttributeValue) {
        let key = key.to_uppercase();

        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.attributes.push((SmolStr::new(key), value)),
        }
    }

    /// Looks up an attribute by key, case-insensitively.
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        let key = key.to_uppercase();
        self.attributes
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    /// Looks up an attribute and returns its scalar form.
    pub fn get_scalar(&self, key: &str) -> Option<SmolStr> {
        self.get(key).map(|v| v.to_scalar())
    }

    /// Iterates the attributes in document order.
    pub fn iter(&self) -> impl Iterator<Item = &(SmolStr, AttributeValue)> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// Replaces commas with pipes inside each double-quoted run.
///
/// Some M3U8 files carry commas inside quoted values, which would otherwise
/// break the split on commas. Quotes themselves are kept at this stage.
fn escape_commas_inside_quotes(payload: &str) -> String {
    QUOTED_RUN
        .replace_all(payload, |m: &Captures| m[0].replace(',', "|"))
        .into_owned()
}

/// Strips one pair of surrounding double quotes, if present.
fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Splits a placeholder-bearing value into a list, otherwise keeps a scalar.
fn parse_pipes(value: &str) -> AttributeValue {
    if value.contains('|') {
        AttributeValue::List(value.split('|').map(SmolStr::new).collect())
    } else {
        AttributeValue::Scalar(SmolStr::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tag_and_pairs() {
        let tag =
            AttributedTag::parse("#EXT-X-MEDIA:TYPE=AUDIO,GROUP-ID=\"aac\",NAME=\"English\"")
                .unwrap();

        assert_eq!(tag.tag, "#EXT-X-MEDIA");
        assert_eq!(tag.len(), 3);
        assert_eq!(tag.get_scalar("TYPE").unwrap(), "AUDIO");
        assert_eq!(tag.get_scalar("group-id").unwrap(), "aac");
        assert_eq!(tag.get_scalar("NAME").unwrap(), "English");
    }

    #[test]
    fn test_quoted_comma_does_not_split() {
        let tag = AttributedTag::parse("#EXT-X-MEDIA:NAME=\"A, B\",TYPE=AUDIO").unwrap();

        assert_eq!(tag.len(), 2);
        assert_eq!(
            tag.get("NAME").unwrap(),
            &AttributeValue::List(vec![SmolStr::new("A"), SmolStr::new(" B")])
        );
        assert_eq!(tag.get_scalar("TYPE").unwrap(), "AUDIO");
    }

    #[test]
    fn test_two_quoted_fields_with_commas() {
        let tag = AttributedTag::parse(
            "#EXT-X-STREAM-INF:CODECS=\"avc1.64001f,mp4a.40.2\",BANDWIDTH=1280000,NAME=\"a, b\"",
        )
        .unwrap();

        assert_eq!(tag.len(), 3);
        assert_eq!(
            tag.get("CODECS").unwrap(),
            &AttributeValue::List(vec![SmolStr::new("avc1.64001f"), SmolStr::new("mp4a.40.2")])
        );
        assert_eq!(tag.get_scalar("BANDWIDTH").unwrap(), "1280000");
    }

    #[test]
    fn test_colons_in_payload_stay_in_payload() {
        let tag = AttributedTag::parse("#EXT-X-MEDIA:URI=\"http://example.com/a.m3u8\"").unwrap();
        assert_eq!(tag.get_scalar("URI").unwrap(), "http://example.com/a.m3u8");
    }

    #[test]
    fn test_empty_payload_yields_no_pairs() {
        let tag = AttributedTag::parse("#EXT-X-ENDLIST").unwrap();
        assert!(tag.is_empty());

        let tag = AttributedTag::parse("#EXT-X-MAP:").unwrap();
        assert!(tag.is_empty());
    }

    #[test]
    fn test_fragment_without_equals_is_an_error() {
        let result = AttributedTag::parse("#EXT-X-MEDIA:TYPE=AUDIO,JUNK");
        assert!(matches!(result, Err(PlaylistError::MalformedAttribute(f)) if f == "JUNK"));
    }

    #[test]
    fn test_repeated_key_last_occurrence_wins() {
        let tag = AttributedTag::parse("#EXT-X-MEDIA:TYPE=AUDIO,TYPE=VIDEO").unwrap();
        assert_eq!(tag.len(), 1);
        assert_eq!(tag.get_scalar("TYPE").unwrap(), "VIDEO");
    }
}
