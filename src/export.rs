//! Structured (JSON) views over the playlist graph.
//!
//! Purely a formatting concern: nothing here feeds back into parsing or
//! serialization. The visibility flags prune fields from the output.

use serde_json::{Map, Value, json};

use crate::format::master::MasterPlaylist;
use crate::format::media::MediaEntry;
use crate::format::segments::{Segment, SegmentsPlaylist};
use crate::format::stream::StreamEntry;

/// Output and loading options, all off by default.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaylistOptions {
    /// Drop media renditions from the export, both the top-level list and
    /// the per-stream rendition arrays.
    pub hide_medias: bool,
    /// Drop the non-standard attribute bags.
    pub hide_non_standard_props: bool,
    /// Drop the group-id fields.
    pub hide_groups: bool,
    /// Drop fields that would be `null`.
    pub hide_null_values: bool,
    /// Drop collections that would be empty.
    pub hide_empty_collections: bool,
    /// Fetch and parse every stream's child playlist during a remote load.
    pub eager_load_segments: bool,
}

impl PlaylistOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

fn set(map: &mut Map<String, Value>, options: &PlaylistOptions, key: &str, value: Value) {
    match &value {
        Value::Null if options.hide_null_values => return,
        Value::Array(items) if items.is_empty() && options.hide_empty_collections => return,
        Value::Object(entries) if entries.is_empty() && options.hide_empty_collections => return,
        _ => {}
    }

    map.insert(key.to_owned(), value);
}

fn extra_bag(extra: &[(smol_str::SmolStr, crate::AttributeValue)]) -> Value {
    let mut bag = Map::new();
    for (key, value) in extra {
        let rendered = match value {
            crate::AttributeValue::Scalar(raw) => json!(raw.as_str()),
            crate::AttributeValue::List(items) => {
                json!(items.iter().map(|x| x.as_str()).collect::<Vec<_>>())
            }
        };
        bag.insert(key.to_string(), rendered);
    }
    Value::Object(bag)
}

impl MediaEntry {
    pub fn to_json(&self, options: &PlaylistOptions) -> Value {
        let mut map = Map::new();

        set(
            &mut map,
            options,
            "type",
            self.media_type()
                .map(|t| json!(t.to_string()))
                .unwrap_or(Value::Null),
        );
        if !options.hide_groups {
            set(
                &mut map,
                options,
                "groupId",
                self.group_id()
                    .map(|g| json!(g.as_str()))
                    .unwrap_or(Value::Null),
            );
        }
        set(
            &mut map,
            options,
            "name",
            self.name().map(|n| json!(n.as_str())).unwrap_or(Value::Null),
        );
        set(
            &mut map,
            options,
            "language",
            self.language()
                .map(|l| {
                    json!({
                        "shortCode": l.short_code(),
                        "name": l.name(),
                        "direction": l.direction(),
                        "flagEmoji": l.flag_emoji(),
                    })
                })
                .unwrap_or(Value::Null),
        );
        set(&mut map, options, "default", json!(self.default().value()));
        set(
            &mut map,
            options,
            "autoselect",
            json!(self.autoselect().value()),
        );
        set(
            &mut map,
            options,
            "uri",
            self.uri().map(|u| json!(u.as_str())).unwrap_or(Value::Null),
        );
        if !options.hide_non_standard_props {
            set(&mut map, options, "nonStandard", extra_bag(self.extra()));
        }

        Value::Object(map)
    }
}

impl StreamEntry {
    fn to_json_in(&self, playlist: &MasterPlaylist, options: &PlaylistOptions) -> Value {
        let mut map = Map::new();

        set(&mut map, options, "bandwidth", json!(self.bandwidth().bps()));
        set(
            &mut map,
            options,
            "averageBandwidth",
            self.average_bandwidth()
                .map(|b| json!(b.bps()))
                .unwrap_or(Value::Null),
        );
        set(
            &mut map,
            options,
            "resolution",
            self.resolution()
                .map(|r| {
                    json!({
                        "width": r.width,
                        "height": r.height,
                        "pixels": r.pixels(),
                        "progressiveName": r.progressive_name(),
                    })
                })
                .unwrap_or(Value::Null),
        );
        set(
            &mut map,
            options,
            "frameRate",
            self.frame_rate().map(|f| json!(f.fps)).unwrap_or(Value::Null),
        );
        set(
            &mut map,
            options,
            "codecs",
            self.codecs()
                .map(|c| json!(c.codecs.iter().map(|x| x.as_str()).collect::<Vec<_>>()))
                .unwrap_or(Value::Null),
        );
        set(
            &mut map,
            options,
            "programId",
            self.program_id()
                .map(|p| json!(p.as_str()))
                .unwrap_or(Value::Null),
        );
        if !options.hide_groups {
            set(
                &mut map,
                options,
                "audioGroup",
                self.audio_group()
                    .map(|g| json!(g.as_str()))
                    .unwrap_or(Value::Null),
            );
            set(
                &mut map,
                options,
                "subtitlesGroup",
                self.subtitle_group()
                    .map(|g| json!(g.as_str()))
                    .unwrap_or(Value::Null),
            );
        }
        set(
            &mut map,
            options,
            "uri",
            self.uri().map(|u| json!(u)).unwrap_or(Value::Null),
        );

        if !options.hide_medias {
            let audios: Vec<Value> = playlist
                .audios_of(self)
                .iter()
                .map(|m| m.to_json(options))
                .collect();
            let subtitles: Vec<Value> = playlist
                .subtitles_of(self)
                .iter()
                .map(|m| m.to_json(options))
                .collect();
            set(&mut map, options, "audios", Value::Array(audios));
            set(&mut map, options, "subtitles", Value::Array(subtitles));
        }

        set(
            &mut map,
            options,
            "segments",
            self.segments()
                .map(|s| s.to_json(options))
                .unwrap_or(Value::Null),
        );
        if !options.hide_non_standard_props {
            set(&mut map, options, "nonStandard", extra_bag(self.extra()));
        }

        Value::Object(map)
    }
}

impl MasterPlaylist {
    pub fn to_json(&self, options: &PlaylistOptions) -> Value {
        let mut map = Map::new();

        set(
            &mut map,
            options,
            "url",
            self.url().map(|u| json!(u)).unwrap_or(Value::Null),
        );

        let streams: Vec<Value> = self
            .streams()
            .iter()
            .map(|s| s.to_json_in(self, options))
            .collect();
        set(&mut map, options, "streams", Value::Array(streams));

        if !options.hide_medias {
            let medias: Vec<Value> = self.medias().iter().map(|m| m.to_json(options)).collect();
            set(&mut map, options, "medias", Value::Array(medias));
        }

        Value::Object(map)
    }
}

impl Segment {
    pub fn to_json(&self, options: &PlaylistOptions) -> Value {
        let mut map = Map::new();
        set(&mut map, options, "duration", json!(self.duration));
        set(
            &mut map,
            options,
            "title",
            self.title
                .as_ref()
                .map(|t| json!(t.as_str()))
                .unwrap_or(Value::Null),
        );
        set(&mut map, options, "uri", json!(self.uri.as_str()));
        Value::Object(map)
    }
}

impl SegmentsPlaylist {
    pub fn to_json(&self, options: &PlaylistOptions) -> Value {
        let mut map = Map::new();

        set(
            &mut map,
            options,
            "targetDuration",
            self.target_duration.map(|d| json!(d)).unwrap_or(Value::Null),
        );
        set(
            &mut map,
            options,
            "allowCache",
            self.allow_cache.map(|c| json!(c)).unwrap_or(Value::Null),
        );
        set(
            &mut map,
            options,
            "type",
            self.playlist_type
                .as_ref()
                .map(|t| json!(t.as_str()))
                .unwrap_or(Value::Null),
        );
        set(
            &mut map,
            options,
            "version",
            self.version
                .as_ref()
                .map(|v| json!(v.as_str()))
                .unwrap_or(Value::Null),
        );
        set(
            &mut map,
            options,
            "mediaSequence",
            self.media_sequence.map(|s| json!(s)).unwrap_or(Value::Null),
        );
        set(
            &mut map,
            options,
            "map",
            self.map
                .as_ref()
                .map(|m| {
                    json!({
                        "uri": m.uri.as_str(),
                        "byterange": m.byterange.as_ref().map(|b| b.as_str()),
                    })
                })
                .unwrap_or(Value::Null),
        );

        let segments: Vec<Value> = self.segments().iter().map(|s| s.to_json(options)).collect();
        set(&mut map, options, "segments", Value::Array(segments));

        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MASTER: &str = "#EXTM3U\n\
        #EXT-X-MEDIA:TYPE=AUDIO,GROUP-ID=\"aac\",NAME=\"English\",LANGUAGE=\"en\",X-PROVIDER=\"cdn\"\n\
        #EXT-X-STREAM-INF:BANDWIDTH=1500000,RESOLUTION=1920x1080,AUDIO=\"aac\"\n\
        1080p.m3u8\n";

    fn parsed() -> MasterPlaylist {
        MasterPlaylist::load_raw(MASTER).unwrap()
    }

    #[test]
    fn test_full_export() {
        let value = parsed().to_json(&PlaylistOptions::new());

        assert_eq!(value["streams"][0]["bandwidth"], 1_500_000);
        assert_eq!(value["streams"][0]["resolution"]["progressiveName"], "1080P");
        assert_eq!(value["streams"][0]["audios"][0]["name"], "English");
        assert_eq!(value["medias"][0]["groupId"], "aac");
        assert_eq!(value["medias"][0]["nonStandard"]["X-PROVIDER"], "cdn");
        assert_eq!(value["medias"][0]["language"]["direction"], "ltr");
    }

    #[test]
    fn test_hide_medias() {
        let options = PlaylistOptions {
            hide_medias: true,
            ..Default::default()
        };
        let value = parsed().to_json(&options);

        assert!(value.get("medias").is_none());
        assert!(value["streams"][0].get("audios").is_none());
    }

    #[test]
    fn test_hide_groups_and_non_standard() {
        let options = PlaylistOptions {
            hide_groups: true,
            hide_non_standard_props: true,
            ..Default::default()
        };
        let value = parsed().to_json(&options);

        assert!(value["streams"][0].get("audioGroup").is_none());
        assert!(value["medias"][0].get("groupId").is_none());
        assert!(value["medias"][0].get("nonStandard").is_none());
    }

    #[test]
    fn test_hide_null_values() {
        let options = PlaylistOptions {
            hide_null_values: true,
            ..Default::default()
        };
        let value = parsed().to_json(&options);

        // no frame rate in the source document
        assert!(value["streams"][0].get("frameRate").is_none());
        assert!(value.get("url").is_none());
    }

    #[test]
    fn test_hide_empty_collections() {
        let options = PlaylistOptions {
            hide_empty_collections: true,
            ..Default::default()
        };
        let value = parsed().to_json(&options);

        // the stream has no subtitle renditions
        assert!(value["streams"][0].get("subtitles").is_none());
        assert!(value["streams"][0].get("audios").is_some());
    }
}
