use smol_str::SmolStr;

use crate::PlaylistError;
use crate::attribute::{Bandwidth, CodecList, FrameRate, GroupId, ProgramId, Resolution};
use crate::format::media::MediaEntry;
use crate::format::segments::SegmentsPlaylist;
use crate::registry::{self, GroupRole, RenditionSet};
use crate::tag::{AttributeValue, AttributedTag};

/// One `#EXT-X-STREAM-INF` variant entry plus the URI line that follows it.
///
/// The audio and subtitle rendition sets hold the stable ids of the
/// [`MediaEntry`] values joined to this stream; the join is re-run whenever a
/// group-id attribute changes and is idempotent.
#[derive(Debug, Clone, Default)]
pub struct StreamEntry {
    bandwidth: Bandwidth,
    average_bandwidth: Option<Bandwidth>,
    resolution: Option<Resolution>,
    codecs: Option<CodecList>,
    program_id: Option<ProgramId>,
    frame_rate: Option<FrameRate>,
    audio_group: Option<GroupId>,
    subtitle_group: Option<GroupId>,
    uri: Option<SmolStr>,
    extra: Vec<(SmolStr, AttributeValue)>,
    audios: RenditionSet,
    subtitles: RenditionSet,
    segments: Option<SegmentsPlaylist>,
}

impl StreamEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a stream entry from a parsed `#EXT-X-STREAM-INF` directive.
    /// The URI line is attached separately by the playlist parser.
    pub fn from_tag(tag: &AttributedTag) -> Result<Self, PlaylistError> {
        let mut stream = Self::new();

        for (key, value) in tag.iter() {
            stream.set_property(key, value)?;
        }

        Ok(stream)
    }

    /// Dispatches one attribute onto the typed fields; unrecognized keys go
    /// to the non-standard bag. Keys arrive already uppercased.
    ///
    /// Group-id changes made through this path leave the rendition sets
    /// untouched; the owning playlist re-runs the join right after.
    pub fn set_property(&mut self, key: &str, value: &AttributeValue) -> Result<(), PlaylistError> {
        let scalar = value.to_scalar();

        match key {
            "BANDWIDTH" => self.bandwidth = Bandwidth::parse(&scalar)?,
            "AVERAGE-BANDWIDTH" => self.average_bandwidth = Some(Bandwidth::parse(&scalar)?),
            "RESOLUTION" => self.resolution = Some(Resolution::parse(&scalar)?),
            "CODECS" => self.codecs = Some(CodecList::parse(value)?),
            "PROGRAM-ID" => self.program_id = Some(ProgramId::new(&scalar)),
            "FRAME-RATE" => self.frame_rate = Some(FrameRate::parse(&scalar)?),
            "AUDIO" => self.audio_group = Some(GroupId::new(&scalar)),
            "SUBTITLES" => self.subtitle_group = Some(GroupId::new(&scalar)),
            _ => self.extra.push((SmolStr::new(key), value.clone())),
        }

        Ok(())
    }

    pub fn bandwidth(&self) -> Bandwidth {
        self.bandwidth
    }

    pub fn set_bandwidth(&mut self, bandwidth: Bandwidth) -> &mut Self {
        self.bandwidth = bandwidth;
        self
    }

    pub fn average_bandwidth(&self) -> Option<Bandwidth> {
        self.average_bandwidth
    }

    pub fn set_average_bandwidth(&mut self, bandwidth: Bandwidth) -> &mut Self {
        self.average_bandwidth = Some(bandwidth);
        self
    }

    pub fn resolution(&self) -> Option<&Resolution> {
        self.resolution.as_ref()
    }

    pub fn set_resolution(&mut self, resolution: Resolution) -> &mut Self {
        self.resolution = Some(resolution);
        self
    }

    pub fn codecs(&self) -> Option<&CodecList> {
        self.codecs.as_ref()
    }

    pub fn set_codecs(&mut self, codecs: CodecList) -> &mut Self {
        self.codecs = Some(codecs);
        self
    }

    pub fn program_id(&self) -> Option<&ProgramId> {
        self.program_id.as_ref()
    }

    pub fn frame_rate(&self) -> Option<FrameRate> {
        self.frame_rate
    }

    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    pub fn set_uri(&mut self, uri: impl AsRef<str>) -> &mut Self {
        self.uri = Some(SmolStr::new(uri.as_ref()));
        self
    }

    pub fn audio_group(&self) -> Option<&GroupId> {
        self.audio_group.as_ref()
    }

    pub fn subtitle_group(&self) -> Option<&GroupId> {
        self.subtitle_group.as_ref()
    }

    /// Sets the audio group id and synchronously rescans the given
    /// registered renditions for matches.
    pub fn set_audio_group(&mut self, group: GroupId, medias: &[MediaEntry]) -> &mut Self {
        self.audio_group = Some(group);
        self.rescan(GroupRole::Audio, medias);
        self
    }

    /// Sets the subtitle group id and synchronously rescans the given
    /// registered renditions for matches.
    pub fn set_subtitle_group(&mut self, group: GroupId, medias: &[MediaEntry]) -> &mut Self {
        self.subtitle_group = Some(group);
        self.rescan(GroupRole::Subtitles, medias);
        self
    }

    /// The non-standard attribute bag, in document order.
    pub fn extra(&self) -> &[(SmolStr, AttributeValue)] {
        &self.extra
    }

    /// Ids of the audio renditions joined to this stream.
    pub fn audio_renditions(&self) -> &RenditionSet {
        &self.audios
    }

    /// Ids of the subtitle renditions joined to this stream.
    pub fn subtitle_renditions(&self) -> &RenditionSet {
        &self.subtitles
    }

    /// Attaches one registered rendition if its type and group id match
    /// either of this stream's group attributes. Safe to call repeatedly,
    /// membership is a set.
    pub fn attach(&mut self, media: &MediaEntry) -> bool {
        let mut attached = false;

        if registry::matches(GroupRole::Audio, self.audio_group.as_ref(), media) {
            attached |= self.audios.insert(media.id);
        }
        if registry::matches(GroupRole::Subtitles, self.subtitle_group.as_ref(), media) {
            attached |= self.subtitles.insert(media.id);
        }

        attached
    }

    /// Clears both rendition sets and rebuilds them from the given
    /// registered renditions.
    pub fn rejoin(&mut self, medias: &[MediaEntry]) {
        self.audios.clear();
        self.subtitles.clear();

        for media in medias {
            self.attach(media);
        }
    }

    fn rescan(&mut self, role: GroupRole, medias: &[MediaEntry]) {
        let (set, group) = match role {
            GroupRole::Audio => (&mut self.audios, self.audio_group.as_ref()),
            GroupRole::Subtitles => (&mut self.subtitles, self.subtitle_group.as_ref()),
        };

        set.clear();
        for media in medias {
            if registry::matches(role, group, media) {
                set.insert(media.id);
            }
        }
    }

    /// The lazily loaded child media playlist, if one has been fetched.
    pub fn segments(&self) -> Option<&SegmentsPlaylist> {
        self.segments.as_ref()
    }

    pub(crate) fn store_segments(&mut self, segments: SegmentsPlaylist) -> &SegmentsPlaylist {
        self.segments.insert(segments)
    }
}
