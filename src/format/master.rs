use log::debug;
use smol_str::SmolStr;

use crate::PlaylistError;
use crate::fetch::Fetch;
use crate::format::directives;
use crate::format::media::MediaEntry;
use crate::format::segments::SegmentsPlaylist;
use crate::format::stream::StreamEntry;
use crate::hooks::Hooks;

/// A master playlist: an ordered sequence of variant streams and an ordered
/// sequence of media renditions, cross-referenced by group ids.
///
/// Appending an entry immediately joins it against everything already
/// present, so the final associations do not depend on document order.
#[derive(Debug, Clone, Default)]
pub struct MasterPlaylist {
    /// The URL this playlist was loaded from, when loaded remotely.
    url: Option<SmolStr>,
    streams: Vec<StreamEntry>,
    medias: Vec<MediaEntry>,
    next_media_id: usize,
}

impl MasterPlaylist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the content passes the master-playlist kind test.
    pub fn test(content: &str) -> bool {
        content.contains(directives::X_STREAM_INF)
    }

    /// Parses a master playlist from raw document text.
    ///
    /// The magic header is validated before any directive is examined; a
    /// failed parse returns an error and exposes no partial playlist.
    pub fn load_raw(content: &str) -> Result<Self, PlaylistError> {
        if !content.starts_with(directives::MAGIC) {
            return Err(PlaylistError::MissingMagicHeader);
        }

        if !Self::test(content) {
            return Err(PlaylistError::UnrecognizedDocumentKind { kind: "master" });
        }

        let mut playlist = Self::new();
        playlist.parse(content)?;
        Ok(playlist)
    }

    /// Fetches a master playlist through the external fetch capability and
    /// parses it. One fetch, no retry.
    pub fn load_remote(url: &str, fetcher: &dyn Fetch) -> Result<Self, PlaylistError> {
        let bytes = fetcher.fetch(url)?;
        let content = std::str::from_utf8(&bytes)?;

        let mut playlist = Self::load_raw(content)?;
        playlist.url = Some(SmolStr::new(url));
        Ok(playlist)
    }

    /// Like [`load_remote`](Self::load_remote), with hooks and options.
    ///
    /// With `eager_load_segments` set, every stream's child playlist is
    /// fetched and parsed as part of the load; the first failure aborts it.
    pub fn load_remote_with(
        url: &str,
        fetcher: &dyn Fetch,
        hooks: &Hooks,
        options: &crate::PlaylistOptions,
    ) -> Result<Self, PlaylistError> {
        let mut playlist = Self::load_remote(url, fetcher)?;

        if options.eager_load_segments {
            for index in 0..playlist.streams.len() {
                playlist.load_segments(index, fetcher, hooks)?;
            }
        }

        Ok(playlist)
    }

    /// Single pass over the document body, one line of lookahead for the URI
    /// following a stream directive. Unrecognized lines are skipped.
    fn parse(&mut self, content: &str) -> Result<(), PlaylistError> {
        let mut lines = content.lines().skip(1);

        while let Some(line) = lines.next() {
            let line = line.trim();

            if line.starts_with(directives::X_STREAM_INF) {
                let tag = crate::AttributedTag::parse(line)?;
                let mut stream = StreamEntry::from_tag(&tag)?;

                let uri = lines.next().ok_or(PlaylistError::UnexpectedEndOfInput)?;
                stream.set_uri(uri.trim());
                self.push_stream(stream);
            } else if line.starts_with(directives::X_MEDIA) {
                let tag = crate::AttributedTag::parse(line)?;
                self.push_media(MediaEntry::from_tag(&tag)?);
            } else {
                // comments, blank lines and unrecognized directives
            }
        }

        debug!(
            "parsed master playlist: {} streams, {} medias",
            self.streams.len(),
            self.medias.len()
        );
        Ok(())
    }

    /// The URL this playlist was loaded from, when loaded remotely.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn set_url(&mut self, url: impl AsRef<str>) -> &mut Self {
        self.url = Some(SmolStr::new(url.as_ref()));
        self
    }

    pub fn streams(&self) -> &[StreamEntry] {
        &self.streams
    }

    pub fn medias(&self) -> &[MediaEntry] {
        &self.medias
    }

    pub fn get_stream(&self, index: usize) -> Option<&StreamEntry> {
        self.streams.get(index)
    }

    pub fn get_stream_mut(&mut self, index: usize) -> Option<&mut StreamEntry> {
        self.streams.get_mut(index)
    }

    pub fn get_media(&self, index: usize) -> Option<&MediaEntry> {
        self.medias.get(index)
    }

    /// Appends a stream and joins it against every already-registered
    /// rendition. Any relation state the entry carried from another playlist
    /// is discarded first.
    pub fn push_stream(&mut self, mut stream: StreamEntry) -> &mut Self {
        stream.rejoin(&self.medias);
        self.streams.push(stream);
        self
    }

    /// Registers a rendition under a fresh stable id and joins it against
    /// every already-present stream.
    pub fn push_media(&mut self, mut media: MediaEntry) -> &mut Self {
        media.id = self.next_media_id;
        self.next_media_id += 1;

        for stream in &mut self.streams {
            stream.attach(&media);
        }

        self.medias.push(media);
        self
    }

    /// Appends every stream, then every media entry, from each playlist in
    /// argument order, using the same append-with-join procedure as parsing.
    /// The merged join state is identical to having parsed the concatenated
    /// sources.
    pub fn merge(&mut self, others: impl IntoIterator<Item = MasterPlaylist>) -> &mut Self {
        for other in others {
            for stream in other.streams {
                self.push_stream(stream);
            }
            for media in other.medias {
                self.push_media(media);
            }
        }

        self
    }

    /// The audio renditions joined to the given stream, in id order.
    pub fn audios_of(&self, stream: &StreamEntry) -> Vec<&MediaEntry> {
        self.resolve(stream.audio_renditions().iter())
    }

    /// The subtitle renditions joined to the given stream, in id order.
    pub fn subtitles_of(&self, stream: &StreamEntry) -> Vec<&MediaEntry> {
        self.resolve(stream.subtitle_renditions().iter())
    }

    fn resolve<'a>(&'a self, ids: impl Iterator<Item = usize>) -> Vec<&'a MediaEntry> {
        ids.filter_map(|id| self.medias.iter().find(|m| m.id == id))
            .collect()
    }

    /// Sets a stream's audio group id and synchronously re-runs the join.
    pub fn set_stream_audio_group(
        &mut self,
        index: usize,
        group: crate::attribute::GroupId,
    ) -> Option<&StreamEntry> {
        let medias = &self.medias;
        self.streams.get_mut(index).map(|stream| {
            stream.set_audio_group(group, medias);
            &*stream
        })
    }

    /// Sets a stream's subtitle group id and synchronously re-runs the join.
    pub fn set_stream_subtitle_group(
        &mut self,
        index: usize,
        group: crate::attribute::GroupId,
    ) -> Option<&StreamEntry> {
        let medias = &self.medias;
        self.streams.get_mut(index).map(|stream| {
            stream.set_subtitle_group(group, medias);
            &*stream
        })
    }

    /// Fetches and parses the child media playlist referenced by a stream's
    /// URI. Exactly one fetch per call, no retry and no caching of failures;
    /// the parsed child replaces whatever was stored on the stream before.
    ///
    /// The resolve-URI hook may rewrite the stream URI against this
    /// playlist's URL before the fetch.
    pub fn load_segments(
        &mut self,
        stream_index: usize,
        fetcher: &dyn Fetch,
        hooks: &Hooks,
    ) -> Result<&SegmentsPlaylist, PlaylistError> {
        let base_url = self.url.clone();
        let stream = self
            .streams
            .get_mut(stream_index)
            .ok_or(PlaylistError::StreamNotFound(stream_index))?;

        let uri = stream
            .uri()
            .ok_or(PlaylistError::MissingStreamUri(stream_index))?;
        let target = hooks.resolve(base_url.as_deref(), uri);

        debug!("lazy-loading segments playlist from {}", target);
        let segments = SegmentsPlaylist::load_remote(&target, fetcher)?;
        Ok(stream.store_segments(segments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use crate::FetchError;

    const MASTER: &str = "#EXTM3U\n\
        #EXT-X-MEDIA:TYPE=AUDIO,GROUP-ID=\"aac\",NAME=\"English\",LANGUAGE=\"en\",DEFAULT=YES\n\
        #EXT-X-MEDIA:TYPE=SUBTITLES,GROUP-ID=\"subs\",NAME=\"English\",LANGUAGE=\"en\"\n\
        #EXT-X-STREAM-INF:BANDWIDTH=1500000,RESOLUTION=1920x1080,AUDIO=\"aac\",SUBTITLES=\"subs\"\n\
        1080p.m3u8\n\
        #EXT-X-STREAM-INF:BANDWIDTH=800000,RESOLUTION=1280x720,AUDIO=\"aac\"\n\
        720p.m3u8\n";

    const SEGMENTS: &str = "#EXTM3U\n\
        #EXT-X-TARGETDURATION:10\n\
        #EXTINF:9.009,\n\
        segment1.ts\n\
        #EXT-X-ENDLIST\n";

    #[test]
    fn test_load_raw() {
        let playlist = MasterPlaylist::load_raw(MASTER).unwrap();

        assert_eq!(playlist.streams().len(), 2);
        assert_eq!(playlist.medias().len(), 2);
        assert_eq!(playlist.get_stream(0).unwrap().uri(), Some("1080p.m3u8"));
        assert_eq!(playlist.get_stream(1).unwrap().uri(), Some("720p.m3u8"));
    }

    #[test]
    fn test_missing_magic_header() {
        let result = MasterPlaylist::load_raw("#EXT-X-STREAM-INF:BANDWIDTH=1\nv.m3u8\n");
        assert!(matches!(result, Err(PlaylistError::MissingMagicHeader)));
    }

    #[test]
    fn test_wrong_document_kind() {
        let result = MasterPlaylist::load_raw("#EXTM3U\n#EXTINF:1.0,\nseg.ts\n");
        assert!(matches!(
            result,
            Err(PlaylistError::UnrecognizedDocumentKind { kind: "master" })
        ));
    }

    #[test]
    fn test_stream_directive_without_uri() {
        let result = MasterPlaylist::load_raw("#EXTM3U\n#EXT-X-STREAM-INF:BANDWIDTH=1");
        assert!(matches!(result, Err(PlaylistError::UnexpectedEndOfInput)));
    }

    #[test]
    fn test_join_from_document() {
        let playlist = MasterPlaylist::load_raw(MASTER).unwrap();

        let first = playlist.get_stream(0).unwrap();
        assert_eq!(playlist.audios_of(first).len(), 1);
        assert_eq!(playlist.subtitles_of(first).len(), 1);
        assert_eq!(
            playlist.audios_of(first)[0].name().unwrap().as_str(),
            "English"
        );

        let second = playlist.get_stream(1).unwrap();
        assert_eq!(playlist.audios_of(second).len(), 1);
        assert!(playlist.subtitles_of(second).is_empty());
    }

    #[test]
    fn test_join_is_order_independent() {
        // same entries, streams before medias
        let reversed = "#EXTM3U\n\
            #EXT-X-STREAM-INF:BANDWIDTH=1500000,RESOLUTION=1920x1080,AUDIO=\"aac\",SUBTITLES=\"subs\"\n\
            1080p.m3u8\n\
            #EXT-X-STREAM-INF:BANDWIDTH=800000,RESOLUTION=1280x720,AUDIO=\"aac\"\n\
            720p.m3u8\n\
            #EXT-X-MEDIA:TYPE=AUDIO,GROUP-ID=\"aac\",NAME=\"English\",LANGUAGE=\"en\",DEFAULT=YES\n\
            #EXT-X-MEDIA:TYPE=SUBTITLES,GROUP-ID=\"subs\",NAME=\"English\",LANGUAGE=\"en\"\n";

        let a = MasterPlaylist::load_raw(MASTER).unwrap();
        let b = MasterPlaylist::load_raw(reversed).unwrap();

        for (x, y) in a.streams().iter().zip(b.streams()) {
            let ax: Vec<_> = a.audios_of(x).iter().map(|m| m.group_id().cloned()).collect();
            let bx: Vec<_> = b.audios_of(y).iter().map(|m| m.group_id().cloned()).collect();
            assert_eq!(ax, bx);
            assert_eq!(
                a.subtitles_of(x).len(),
                b.subtitles_of(y).len()
            );
        }
    }

    #[test]
    fn test_merge_matches_concatenated_parse() {
        let medias_only = "#EXTM3U\n\
            #EXT-X-STREAM-INF:BANDWIDTH=800000,AUDIO=\"aac\"\n\
            low.m3u8\n\
            #EXT-X-MEDIA:TYPE=AUDIO,GROUP-ID=\"aac\",NAME=\"French\",LANGUAGE=\"fr\"\n";

        let mut merged = MasterPlaylist::load_raw(MASTER).unwrap();
        merged.merge([MasterPlaylist::load_raw(medias_only).unwrap()]);

        assert_eq!(merged.streams().len(), 3);
        assert_eq!(merged.medias().len(), 3);

        // the appended French rendition joins the pre-existing aac streams too
        let first = merged.get_stream(0).unwrap();
        assert_eq!(merged.audios_of(first).len(), 2);
        let appended = merged.get_stream(2).unwrap();
        assert_eq!(merged.audios_of(appended).len(), 2);
    }

    #[test]
    fn test_set_stream_audio_group_rejoins() {
        let mut playlist = MasterPlaylist::load_raw(MASTER).unwrap();
        playlist.set_stream_audio_group(0, crate::attribute::GroupId::new("none"));

        let first = playlist.get_stream(0).unwrap();
        assert!(playlist.audios_of(first).is_empty());
        // subtitles untouched
        assert_eq!(playlist.subtitles_of(first).len(), 1);
    }

    #[test]
    fn test_lazy_load_segments() {
        let fetcher = |url: &str| -> Result<Bytes, FetchError> {
            assert_eq!(url, "1080p.m3u8");
            Ok(Bytes::from_static(SEGMENTS.as_bytes()))
        };

        let mut playlist = MasterPlaylist::load_raw(MASTER).unwrap();
        let segments = playlist
            .load_segments(0, &fetcher, &Hooks::default())
            .unwrap();

        assert_eq!(segments.len(), 1);
        assert_eq!(
            playlist.get_stream(0).unwrap().segments().unwrap().len(),
            1
        );
        assert!(playlist.get_stream(1).unwrap().segments().is_none());
    }

    #[test]
    fn test_lazy_load_failure_surfaces() {
        let fetcher = |_: &str| -> Result<Bytes, FetchError> { Err(FetchError::Status(404)) };

        let mut playlist = MasterPlaylist::load_raw(MASTER).unwrap();
        let result = playlist.load_segments(0, &fetcher, &Hooks::default());

        assert!(matches!(result, Err(PlaylistError::FetchFailure(_))));
        assert!(playlist.get_stream(0).unwrap().segments().is_none());
    }

    #[test]
    fn test_lazy_load_uses_resolve_hook() {
        let fetcher = |url: &str| -> Result<Bytes, FetchError> {
            assert_eq!(url, "https://cdn.example.com/1080p.m3u8");
            Ok(Bytes::from_static(SEGMENTS.as_bytes()))
        };

        let hooks = Hooks::default().with_resolve_uri(|base, uri| {
            Some(format!("{}/{}", base.unwrap_or_default(), uri))
        });

        let mut playlist = MasterPlaylist::load_raw(MASTER).unwrap();
        playlist.set_url("https://cdn.example.com");
        playlist.load_segments(0, &fetcher, &hooks).unwrap();
    }

    #[test]
    fn test_load_remote_sets_url() {
        let fetcher = |url: &str| -> Result<Bytes, FetchError> {
            assert_eq!(url, "https://cdn.example.com/master.m3u8");
            Ok(Bytes::from_static(MASTER.as_bytes()))
        };

        let playlist =
            MasterPlaylist::load_remote("https://cdn.example.com/master.m3u8", &fetcher).unwrap();

        assert_eq!(playlist.url(), Some("https://cdn.example.com/master.m3u8"));
        assert_eq!(playlist.streams().len(), 2);
        assert_eq!(playlist.medias().len(), 2);
    }

    #[test]
    fn test_eager_load_populates_every_stream() {
        let fetcher = |url: &str| -> Result<Bytes, FetchError> {
            match url {
                "master.m3u8" => Ok(Bytes::from_static(MASTER.as_bytes())),
                "1080p.m3u8" | "720p.m3u8" => Ok(Bytes::from_static(SEGMENTS.as_bytes())),
                other => panic!("unexpected fetch of {other}"),
            }
        };

        let options = crate::PlaylistOptions {
            eager_load_segments: true,
            ..Default::default()
        };
        let playlist =
            MasterPlaylist::load_remote_with("master.m3u8", &fetcher, &Hooks::default(), &options)
                .unwrap();

        for stream in playlist.streams() {
            assert_eq!(stream.segments().unwrap().len(), 1);
        }
    }

    #[test]
    fn test_eager_load_failure_aborts() {
        let fetcher = |url: &str| -> Result<Bytes, FetchError> {
            match url {
                "master.m3u8" => Ok(Bytes::from_static(MASTER.as_bytes())),
                _ => Err(FetchError::Status(500)),
            }
        };

        let options = crate::PlaylistOptions {
            eager_load_segments: true,
            ..Default::default()
        };
        let result =
            MasterPlaylist::load_remote_with("master.m3u8", &fetcher, &Hooks::default(), &options);

        assert!(matches!(result, Err(PlaylistError::FetchFailure(_))));
    }

    #[test]
    fn test_load_segments_unknown_index() {
        let fetcher = |_: &str| -> Result<Bytes, FetchError> { Err(FetchError::Status(500)) };

        let mut playlist = MasterPlaylist::load_raw(MASTER).unwrap();
        let result = playlist.load_segments(9, &fetcher, &Hooks::default());

        assert!(matches!(result, Err(PlaylistError::StreamNotFound(9))));
    }

    #[test]
    fn test_load_segments_without_uri() {
        let fetcher = |_: &str| -> Result<Bytes, FetchError> { Err(FetchError::Status(500)) };

        let mut playlist = MasterPlaylist::new();
        playlist.push_stream(StreamEntry::new());
        let result = playlist.load_segments(0, &fetcher, &Hooks::default());

        assert!(matches!(result, Err(PlaylistError::MissingStreamUri(0))));
    }

    #[test]
    fn test_round_trip() {
        let playlist = MasterPlaylist::load_raw(MASTER).unwrap();
        let serialized = playlist.to_string();
        let reparsed = MasterPlaylist::load_raw(&serialized).unwrap();
        assert_eq!(reparsed.to_string(), serialized);
    }
}
