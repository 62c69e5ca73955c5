use std::collections::{HashMap, HashSet};
use std::fmt::Display;

use lazy_static::lazy_static;
use smol_str::SmolStr;

lazy_static! {
    /// ISO 639-1 code → (human name, flag glyph). Read-only reference data.
    static ref LANGUAGE_MAP: HashMap<&'static str, (&'static str, &'static str)> = HashMap::from([
        ("af", ("Afrikaans", "🇿🇦")),
        ("am", ("Amharic", "🇪🇹")),
        ("ar", ("Arabic", "🇸🇦")),
        ("az", ("Azerbaijani", "🇦🇿")),
        ("be", ("Belarusian", "🇧🇾")),
        ("bg", ("Bulgarian", "🇧🇬")),
        ("bn", ("Bengali", "🇧🇩")),
        ("bs", ("Bosnian", "🇧🇦")),
        ("ca", ("Catalan", "🇪🇸")),
        ("cs", ("Czech", "🇨🇿")),
        ("cy", ("Welsh", "🇬🇧")),
        ("da", ("Danish", "🇩🇰")),
        ("de", ("German", "🇩🇪")),
        ("el", ("Greek", "🇬🇷")),
        ("en", ("English", "🇬🇧")),
        ("eo", ("Esperanto", "🌍")),
        ("es", ("Spanish", "🇪🇸")),
        ("et", ("Estonian", "🇪🇪")),
        ("eu", ("Basque", "🇪🇸")),
        ("fa", ("Persian", "🇮🇷")),
        ("fi", ("Finnish", "🇫🇮")),
        ("fj", ("Fijian", "🇫🇯")),
        ("fo", ("Faroese", "🇫🇴")),
        ("fr", ("French", "🇫🇷")),
        ("ga", ("Irish", "🇮🇪")),
        ("gl", ("Galician", "🇪🇸")),
        ("gu", ("Gujarati", "🇮🇳")),
        ("ha", ("Hausa", "🇳🇬")),
        ("he", ("Hebrew", "🇮🇱")),
        ("hi", ("Hindi", "🇮🇳")),
        ("hr", ("Croatian", "🇭🇷")),
        ("ht", ("Haitian Creole", "🇭🇹")),
        ("hu", ("Hungarian", "🇭🇺")),
        ("hy", ("Armenian", "🇦🇲")),
        ("id", ("Indonesian", "🇮🇩")),
        ("ig", ("Igbo", "🇳🇬")),
        ("is", ("Icelandic", "🇮🇸")),
        ("it", ("Italian", "🇮🇹")),
        ("ja", ("Japanese", "🇯🇵")),
        ("jv", ("Javanese", "🇮🇩")),
        ("ka", ("Georgian", "🇬🇪")),
        ("kk", ("Kazakh", "🇰🇿")),
        ("km", ("Khmer", "🇰🇭")),
        ("kn", ("Kannada", "🇮🇳")),
        ("ko", ("Korean", "🇰🇷")),
        ("ku", ("Kurdish", "🇹🇷")),
        ("ky", ("Kyrgyz", "🇰🇬")),
        ("la", ("Latin", "🌍")),
        ("lb", ("Luxembourgish", "🇱🇺")),
        ("lo", ("Lao", "🇱🇸")),
        ("lt", ("Lithuanian", "🇱🇹")),
        ("lv", ("Latvian", "🇱🇻")),
        ("mg", ("Malagasy", "🇲🇬")),
        ("mi", ("Maori", "🇳🇿")),
        ("mk", ("Macedonian", "🇲🇰")),
        ("ml", ("Malayalam", "🇮🇳")),
        ("mn", ("Mongolian", "🇲🇳")),
        ("mr", ("Marathi", "🇮🇳")),
        ("ms", ("Malay", "🇲🇾")),
        ("mt", ("Maltese", "🇲🇹")),
        ("my", ("Burmese", "🇲🇲")),
        ("nb", ("Norwegian Bokmål", "🇳🇴")),
        ("ne", ("Nepali", "🇳🇵")),
        ("nl", ("Dutch", "🇳🇱")),
        ("nn", ("Norwegian Nynorsk", "🇳🇴")),
        ("no", ("Norwegian", "🇳🇴")),
        ("ny", ("Chichewa", "🇲🇼")),
        ("or", ("Oriya", "🇮🇳")),
        ("pa", ("Punjabi", "🇮🇳")),
        ("pl", ("Polish", "🇵🇱")),
        ("ps", ("Pashto", "🇦🇫")),
        ("pt", ("Portuguese", "🇵🇹")),
        ("qu", ("Quechua", "🇵🇪")),
        ("ro", ("Romanian", "🇷🇴")),
        ("ru", ("Russian", "🇷🇺")),
        ("rw", ("Kinyarwanda", "🇷🇼")),
        ("sd", ("Sindhi", "🇵🇰")),
        ("si", ("Sinhala", "🇱🇰")),
        ("sk", ("Slovak", "🇸🇰")),
        ("sl", ("Slovenian", "🇸🇮")),
        ("sm", ("Samoan", "🇼🇸")),
        ("sn", ("Shona", "🇿🇼")),
        ("so", ("Somali", "🇸🇴")),
        ("sq", ("Albanian", "🇦🇱")),
        ("sr", ("Serbian", "🇷🇸")),
        ("st", ("Southern Sotho", "🇿🇦")),
        ("su", ("Sundanese", "🇮🇩")),
        ("sv", ("Swedish", "🇸🇪")),
        ("sw", ("Swahili", "🇰🇪")),
        ("ta", ("Tamil", "🇮🇳")),
        ("te", ("Telugu", "🇮🇳")),
        ("tg", ("Tajik", "🇹🇯")),
        ("th", ("Thai", "🇹🇭")),
        ("tk", ("Turkmen", "🇹🇲")),
        ("tl", ("Tagalog", "🇵🇭")),
        ("tr", ("Turkish", "🇹🇷")),
        ("tt", ("Tatar", "🇷🇺")),
        ("ug", ("Uighur", "🇨🇳")),
        ("uk", ("Ukrainian", "🇺🇦")),
        ("ur", ("Urdu", "🇵🇰")),
        ("uz", ("Uzbek", "🇺🇿")),
        ("vi", ("Vietnamese", "🇻🇳")),
        ("wo", ("Wolof", "🇸🇳")),
        ("xh", ("Xhosa", "🇿🇦")),
        ("yi", ("Yiddish", "🇩🇪")),
        ("yo", ("Yoruba", "🇳🇬")),
        ("zh", ("Chinese", "🇨🇳")),
        ("zu", ("Zulu", "🇿🇦")),
    ]);

    /// Right-to-left languages.
    static ref RTL_LANGUAGES: HashSet<&'static str> = HashSet::from(["ar", "he", "fa", "ur"]);
}

/// A rendition language, carried as a lowercase two-letter code.
///
/// The code table is process-wide reference data; codes outside it are still
/// carried verbatim, only the lookups come back empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    short_code: SmolStr,
}

impl Language {
    pub fn parse(raw: &str) -> Self {
        Self {
            short_code: SmolStr::new(raw.trim().to_lowercase()),
        }
    }

    pub fn short_code(&self) -> &str {
        &self.short_code
    }

    /// Human-readable language name, if the code is known.
    pub fn name(&self) -> Option<&'static str> {
        LANGUAGE_MAP.get(self.short_code.as_str()).map(|e| e.0)
    }

    /// Flag glyph for the language, if the code is known.
    pub fn flag_emoji(&self) -> Option<&'static str> {
        LANGUAGE_MAP.get(self.short_code.as_str()).map(|e| e.1)
    }

    /// Writing direction, `"rtl"` for right-to-left languages, `"ltr"`
    /// otherwise.
    pub fn direction(&self) -> &'static str {
        if RTL_LANGUAGES.contains(self.short_code.as_str()) {
            "rtl"
        } else {
            "ltr"
        }
    }

    pub fn to_m3u8(&self) -> String {
        format!("LANGUAGE=\"{}\"", self.short_code)
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_code)
    }
}
