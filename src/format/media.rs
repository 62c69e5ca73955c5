use log::trace;
use smol_str::SmolStr;

use crate::PlaylistError;
use crate::attribute::{BoolAttr, GroupId, Language, MediaType, Name, Uri};
use crate::tag::{AttributeValue, AttributedTag};

/// One `#EXT-X-MEDIA` rendition entry.
///
/// Unrecognized attributes are preserved in document order so a
/// parse → serialize round trip stays lossless for unknown extensions.
#[derive(Debug, Clone, Default)]
pub struct MediaEntry {
    pub(crate) id: usize,
    media_type: Option<MediaType>,
    group_id: Option<GroupId>,
    name: Option<Name>,
    language: Option<Language>,
    default: BoolAttr,
    autoselect: BoolAttr,
    uri: Option<Uri>,
    extra: Vec<(SmolStr, AttributeValue)>,
}

impl MediaEntry {
    pub fn new() -> Self {
        <Self as Default>::default()
    }

    /// Builds a media entry from a parsed `#EXT-X-MEDIA` directive.
    pub fn from_tag(tag: &AttributedTag) -> Result<Self, PlaylistError> {
        let mut media = Self::new();

        for (key, value) in tag.iter() {
            media.set_property(key, value)?;
        }

        Ok(media)
    }

    /// Dispatches one attribute onto the typed fields; unrecognized keys go
    /// to the non-standard bag. Keys arrive already uppercased.
    pub fn set_property(&mut self, key: &str, value: &AttributeValue) -> Result<(), PlaylistError> {
        let scalar = value.to_scalar();

        match key {
            "TYPE" => self.media_type = Some(MediaType::parse(&scalar)),
            "GROUP-ID" => self.group_id = Some(GroupId::new(&scalar)),
            "NAME" => self.name = Some(Name::new(&scalar)),
            "LANGUAGE" => self.language = Some(Language::parse(&scalar)),
            "DEFAULT" => self.default = BoolAttr::parse(&scalar),
            "AUTOSELECT" => self.autoselect = BoolAttr::parse(&scalar),
            "URI" => self.uri = Some(Uri::new(&scalar)),
            _ => {
                trace!("keeping non-standard media attribute {}", key);
                self.extra.push((SmolStr::new(key), value.clone()));
            }
        }

        Ok(())
    }

    /// The stable id assigned when the entry was registered with a playlist.
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn media_type(&self) -> Option<&MediaType> {
        self.media_type.as_ref()
    }

    pub fn set_media_type(&mut self, media_type: MediaType) -> &mut Self {
        self.media_type = Some(media_type);
        self
    }

    pub fn group_id(&self) -> Option<&GroupId> {
        self.group_id.as_ref()
    }

    pub fn set_group_id(&mut self, group_id: GroupId) -> &mut Self {
        self.group_id = Some(group_id);
        self
    }

    pub fn name(&self) -> Option<&Name> {
        self.name.as_ref()
    }

    pub fn set_name(&mut self, name: Name) -> &mut Self {
        self.name = Some(name);
        self
    }

    pub fn language(&self) -> Option<&Language> {
        self.language.as_ref()
    }

    pub fn set_language(&mut self, language: Language) -> &mut Self {
        self.language = Some(language);
        self
    }

    pub fn default(&self) -> BoolAttr {
        self.default
    }

    pub fn set_default(&mut self, default: BoolAttr) -> &mut Self {
        self.default = default;
        self
    }

    pub fn autoselect(&self) -> BoolAttr {
        self.autoselect
    }

    pub fn set_autoselect(&mut self, autoselect: BoolAttr) -> &mut Self {
        self.autoselect = autoselect;
        self
    }

    pub fn uri(&self) -> Option<&Uri> {
        self.uri.as_ref()
    }

    pub fn set_uri(&mut self, uri: Uri) -> &mut Self {
        self.uri = Some(uri);
        self
    }

    /// The non-standard attribute bag, in document order.
    pub fn extra(&self) -> &[(SmolStr, AttributeValue)] {
        &self.extra
    }
}
