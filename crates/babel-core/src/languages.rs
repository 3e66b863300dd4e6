//! Static lookup tables: flag emoji → target languages, code → display name.
//!
//! Both tables are compiled in and never mutated, so concurrent handlers can
//! read them without coordination.

/// Flag emoji → ordered target language codes.
const FLAG_LANGUAGES: &[(&str, &[&str])] = &[
    ("🇺🇸", &["en"]),
    ("🇬🇧", &["en"]),
    ("🇦🇺", &["en"]),
    ("🇨🇦", &["en", "fr"]),
    ("🇫🇷", &["fr"]),
    ("🇧🇪", &["fr", "nl", "de"]),
    ("🇪🇸", &["es"]),
    ("🇲🇽", &["es"]),
    ("🇦🇷", &["es"]),
    ("🇩🇪", &["de"]),
    ("🇦🇹", &["de"]),
    ("🇨🇭", &["de", "fr", "it"]),
    ("🇮🇹", &["it"]),
    ("🇯🇵", &["ja"]),
    ("🇰🇷", &["ko"]),
    ("🇨🇳", &["zh-CN"]),
    ("🇷🇺", &["ru"]),
    ("🇵🇹", &["pt"]),
    ("🇧🇷", &["pt"]),
    ("🇮🇩", &["id"]),
    ("🇳🇱", &["nl"]),
    ("🇸🇪", &["sv"]),
    ("🇳🇴", &["no"]),
    ("🇩🇰", &["da"]),
    ("🇫🇮", &["fi"]),
    ("🇵🇱", &["pl"]),
    ("🇹🇷", &["tr"]),
    ("🇸🇦", &["ar"]),
    ("🇦🇪", &["ar"]),
    ("🇪🇬", &["ar"]),
    ("🇮🇳", &["hi", "en"]),
    ("🇬🇷", &["el"]),
    ("🇻🇳", &["vi"]),
];

/// Language code → display name.
const LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("en", "English"),
    ("fr", "French"),
    ("es", "Spanish"),
    ("de", "German"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("zh-CN", "Chinese (Simplified)"),
    ("ru", "Russian"),
    ("pt", "Portuguese"),
    ("id", "Indonesian"),
    ("nl", "Dutch"),
    ("sv", "Swedish"),
    ("no", "Norwegian"),
    ("da", "Danish"),
    ("fi", "Finnish"),
    ("pl", "Polish"),
    ("tr", "Turkish"),
    ("ar", "Arabic"),
    ("hi", "Hindi"),
    ("he", "Hebrew"),
    ("el", "Greek"),
    ("vi", "Vietnamese"),
];

/// Resolve a reacted emoji to its target language codes.
///
/// Returns `None` for emoji that are not mapped flags. Variation selectors
/// some clients append are ignored.
pub fn languages_for_flag(emoji: &str) -> Option<&'static [&'static str]> {
    let emoji = emoji.trim_end_matches('\u{fe0f}');
    FLAG_LANGUAGES
        .iter()
        .find(|(flag, _)| *flag == emoji)
        .map(|(_, codes)| *codes)
}

/// All flag mappings, in table order.
pub fn flag_table() -> impl Iterator<Item = (&'static str, &'static [&'static str])> {
    FLAG_LANGUAGES.iter().copied()
}

/// Display name for a language code.
///
/// Known codes are matched case-insensitively. Unknown codes fall back to
/// the code itself with its first letter capitalised.
pub fn language_name(code: &str) -> String {
    LANGUAGE_NAMES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| capitalize(code))
}

/// Whether two language codes name the same language.
pub fn same_language(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
