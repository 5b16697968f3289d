// ============================================================================
// mkvdefault-core/src/languages.rs
// ============================================================================
//
// LANGUAGE REGISTRY: Accepted Language Codes and Desired-Language Parsing
//
// Matroska tracks carry ISO 639-2 language codes (mkvmerge reports the
// bibliographic form, e.g. "ger", "fre", "chi"). Both the bibliographic and
// terminologic forms are accepted here so that "deu" and "ger" both verify,
// although only the exact code reported by the inspector will match a track.
//
// Every desired code is verified once, when the configuration is built; an
// unknown code is a configuration error and no file is touched.

use crate::error::{CoreError, CoreResult};
use crate::tracks::TrackType;

use once_cell::sync::Lazy;
use serde::Serialize;

use std::collections::BTreeMap;
use std::fmt;

/// Keyword that turns the default subtitle off.
pub const OFF: &str = "off";

static LANGUAGE_CODES: &[(&str, &str)] = &[
    ("aar", "Afar"),
    ("abk", "Abkhazian"),
    ("ace", "Achinese"),
    ("afr", "Afrikaans"),
    ("aka", "Akan"),
    ("alb", "Albanian"),
    ("sqi", "Albanian"),
    ("amh", "Amharic"),
    ("ang", "English, Old"),
    ("ara", "Arabic"),
    ("arc", "Aramaic"),
    ("arg", "Aragonese"),
    ("arm", "Armenian"),
    ("hye", "Armenian"),
    ("asm", "Assamese"),
    ("ast", "Asturian"),
    ("ava", "Avaric"),
    ("ave", "Avestan"),
    ("aym", "Aymara"),
    ("aze", "Azerbaijani"),
    ("bak", "Bashkir"),
    ("bal", "Baluchi"),
    ("bam", "Bambara"),
    ("baq", "Basque"),
    ("eus", "Basque"),
    ("bel", "Belarusian"),
    ("ben", "Bengali"),
    ("ber", "Berber languages"),
    ("bho", "Bhojpuri"),
    ("bis", "Bislama"),
    ("bod", "Tibetan"),
    ("tib", "Tibetan"),
    ("bos", "Bosnian"),
    ("bre", "Breton"),
    ("bul", "Bulgarian"),
    ("bur", "Burmese"),
    ("mya", "Burmese"),
    ("cat", "Catalan"),
    ("ceb", "Cebuano"),
    ("ces", "Czech"),
    ("cze", "Czech"),
    ("cha", "Chamorro"),
    ("che", "Chechen"),
    ("chi", "Chinese"),
    ("zho", "Chinese"),
    ("chr", "Cherokee"),
    ("chu", "Church Slavic"),
    ("chv", "Chuvash"),
    ("cor", "Cornish"),
    ("cos", "Corsican"),
    ("cre", "Cree"),
    ("cym", "Welsh"),
    ("wel", "Welsh"),
    ("dan", "Danish"),
    ("deu", "German"),
    ("ger", "German"),
    ("div", "Divehi"),
    ("dut", "Dutch"),
    ("nld", "Dutch"),
    ("dzo", "Dzongkha"),
    ("ell", "Greek, Modern"),
    ("gre", "Greek, Modern"),
    ("eng", "English"),
    ("enm", "English, Middle"),
    ("epo", "Esperanto"),
    ("est", "Estonian"),
    ("ewe", "Ewe"),
    ("fao", "Faroese"),
    ("fas", "Persian"),
    ("per", "Persian"),
    ("fij", "Fijian"),
    ("fil", "Filipino"),
    ("fin", "Finnish"),
    ("fra", "French"),
    ("fre", "French"),
    ("frm", "French, Middle"),
    ("fro", "French, Old"),
    ("fry", "Western Frisian"),
    ("ful", "Fulah"),
    ("fur", "Friulian"),
    ("geo", "Georgian"),
    ("kat", "Georgian"),
    ("gla", "Gaelic"),
    ("gle", "Irish"),
    ("glg", "Galician"),
    ("glv", "Manx"),
    ("grc", "Greek, Ancient"),
    ("grn", "Guarani"),
    ("gsw", "Swiss German"),
    ("guj", "Gujarati"),
    ("hat", "Haitian"),
    ("hau", "Hausa"),
    ("haw", "Hawaiian"),
    ("heb", "Hebrew"),
    ("her", "Herero"),
    ("hin", "Hindi"),
    ("hmn", "Hmong"),
    ("hmo", "Hiri Motu"),
    ("hrv", "Croatian"),
    ("hun", "Hungarian"),
    ("ibo", "Igbo"),
    ("ice", "Icelandic"),
    ("isl", "Icelandic"),
    ("ido", "Ido"),
    ("iii", "Sichuan Yi"),
    ("iku", "Inuktitut"),
    ("ile", "Interlingue"),
    ("ina", "Interlingua"),
    ("ind", "Indonesian"),
    ("ipk", "Inupiaq"),
    ("ita", "Italian"),
    ("jav", "Javanese"),
    ("jpn", "Japanese"),
    ("kal", "Kalaallisut"),
    ("kan", "Kannada"),
    ("kas", "Kashmiri"),
    ("kau", "Kanuri"),
    ("kaz", "Kazakh"),
    ("khm", "Central Khmer"),
    ("kik", "Kikuyu"),
    ("kin", "Kinyarwanda"),
    ("kir", "Kirghiz"),
    ("kom", "Komi"),
    ("kon", "Kongo"),
    ("kor", "Korean"),
    ("kua", "Kuanyama"),
    ("kur", "Kurdish"),
    ("lao", "Lao"),
    ("lat", "Latin"),
    ("lav", "Latvian"),
    ("lim", "Limburgan"),
    ("lin", "Lingala"),
    ("lit", "Lithuanian"),
    ("ltz", "Luxembourgish"),
    ("lub", "Luba-Katanga"),
    ("lug", "Ganda"),
    ("mac", "Macedonian"),
    ("mkd", "Macedonian"),
    ("mah", "Marshallese"),
    ("mal", "Malayalam"),
    ("mao", "Maori"),
    ("mri", "Maori"),
    ("mar", "Marathi"),
    ("may", "Malay"),
    ("msa", "Malay"),
    ("mis", "Uncoded languages"),
    ("mlg", "Malagasy"),
    ("mlt", "Maltese"),
    ("mon", "Mongolian"),
    ("mul", "Multiple languages"),
    ("nau", "Nauru"),
    ("nav", "Navajo"),
    ("nbl", "Ndebele, South"),
    ("nde", "Ndebele, North"),
    ("ndo", "Ndonga"),
    ("nds", "Low German"),
    ("nep", "Nepali"),
    ("nno", "Norwegian Nynorsk"),
    ("nob", "Norwegian Bokmal"),
    ("nor", "Norwegian"),
    ("nya", "Chichewa"),
    ("oci", "Occitan"),
    ("oji", "Ojibwa"),
    ("ori", "Oriya"),
    ("orm", "Oromo"),
    ("oss", "Ossetian"),
    ("pan", "Panjabi"),
    ("pli", "Pali"),
    ("pol", "Polish"),
    ("por", "Portuguese"),
    ("pus", "Pushto"),
    ("que", "Quechua"),
    ("roh", "Romansh"),
    ("ron", "Romanian"),
    ("rum", "Romanian"),
    ("run", "Rundi"),
    ("rus", "Russian"),
    ("sag", "Sango"),
    ("san", "Sanskrit"),
    ("sin", "Sinhala"),
    ("slk", "Slovak"),
    ("slo", "Slovak"),
    ("slv", "Slovenian"),
    ("sme", "Northern Sami"),
    ("smo", "Samoan"),
    ("sna", "Shona"),
    ("snd", "Sindhi"),
    ("som", "Somali"),
    ("sot", "Sotho, Southern"),
    ("spa", "Spanish"),
    ("srd", "Sardinian"),
    ("srp", "Serbian"),
    ("ssw", "Swati"),
    ("sun", "Sundanese"),
    ("swa", "Swahili"),
    ("swe", "Swedish"),
    ("tah", "Tahitian"),
    ("tam", "Tamil"),
    ("tat", "Tatar"),
    ("tel", "Telugu"),
    ("tgk", "Tajik"),
    ("tgl", "Tagalog"),
    ("tha", "Thai"),
    ("tir", "Tigrinya"),
    ("ton", "Tonga"),
    ("tsn", "Tswana"),
    ("tso", "Tsonga"),
    ("tuk", "Turkmen"),
    ("tur", "Turkish"),
    ("twi", "Twi"),
    ("uig", "Uighur"),
    ("ukr", "Ukrainian"),
    ("und", "Undetermined"),
    ("urd", "Urdu"),
    ("uzb", "Uzbek"),
    ("ven", "Venda"),
    ("vie", "Vietnamese"),
    ("vol", "Volapuk"),
    ("wln", "Walloon"),
    ("wol", "Wolof"),
    ("xho", "Xhosa"),
    ("yid", "Yiddish"),
    ("yor", "Yoruba"),
    ("yue", "Cantonese"),
    ("zha", "Zhuang"),
    ("zul", "Zulu"),
    ("zxx", "No linguistic content"),
];

static REGISTRY: Lazy<BTreeMap<&'static str, &'static str>> =
    Lazy::new(|| LANGUAGE_CODES.iter().copied().collect());

/// Returns true if `code` (case-insensitive) is an accepted language code.
pub fn is_known(code: &str) -> bool {
    REGISTRY.contains_key(code.to_lowercase().as_str())
}

/// Display name for a language code, if known.
pub fn display_name(code: &str) -> Option<&'static str> {
    REGISTRY.get(code.to_lowercase().as_str()).copied()
}

/// All accepted `(code, name)` pairs, sorted by code.
pub fn all() -> impl Iterator<Item = (&'static str, &'static str)> {
    REGISTRY.iter().map(|(code, name)| (*code, *name))
}

/// A verified desire for one track type's default.
///
/// Only constructible through [`DesiredLanguage::parse`] (or the `Off`
/// variant), so holding one means the code has already been verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DesiredLanguage {
    Code(LanguageCode),
    /// No default subtitle track at all.
    Off,
}

/// A lower-cased, registry-verified language code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl DesiredLanguage {
    /// Lower-cases and verifies `raw` as the desired language for `track_type`.
    ///
    /// `off` is only meaningful for subtitles; audio always needs a default.
    pub fn parse(raw: &str, track_type: TrackType) -> CoreResult<Self> {
        let code = raw.trim().to_lowercase();

        if code == OFF {
            return match track_type {
                TrackType::Subtitle => Ok(DesiredLanguage::Off),
                TrackType::Audio => Err(CoreError::Config(
                    "the audio language cannot be set to \"off\"".to_string(),
                )),
            };
        }

        if !is_known(&code) {
            return Err(CoreError::UnknownLanguageCode { track_type, code });
        }

        Ok(DesiredLanguage::Code(LanguageCode(code)))
    }

    pub fn is_off(&self) -> bool {
        matches!(self, DesiredLanguage::Off)
    }

    /// The code as it appears in logs and summaries (`off` for [`DesiredLanguage::Off`]).
    pub fn as_str(&self) -> &str {
        match self {
            DesiredLanguage::Code(code) => code.as_str(),
            DesiredLanguage::Off => OFF,
        }
    }
}

impl fmt::Display for DesiredLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
