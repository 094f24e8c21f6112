use std::fmt;

/// Sentinel accepted in place of a source language to request detection
pub const AUTO_DETECT: &str = "auto";

/// Language used when a name cannot be resolved
pub const DEFAULT_LANGUAGE: &str = "en";

/// Supported language codes with their display names
pub const LANGUAGES: &[(&str, &str)] = &[
    ("af", "Afrikaans"),
    ("am", "Amharic"),
    ("ar", "Arabic"),
    ("as", "Assamese"),
    ("az", "Azerbaijani"),
    ("be", "Belarusian"),
    ("bg", "Bulgarian"),
    ("bn", "Bengali"),
    ("ca", "Catalan"),
    ("cs", "Czech"),
    ("cy", "Welsh"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("es", "Spanish"),
    ("et", "Estonian"),
    ("eu", "Basque"),
    ("fa", "Persian"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("ga", "Irish"),
    ("gl", "Galician"),
    ("gu", "Gujarati"),
    ("he", "Hebrew"),
    ("hi", "Hindi"),
    ("hr", "Croatian"),
    ("hu", "Hungarian"),
    ("hy", "Armenian"),
    ("id", "Indonesian"),
    ("is", "Icelandic"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ka", "Georgian"),
    ("kk", "Kazakh"),
    ("km", "Khmer"),
    ("kn", "Kannada"),
    ("ko", "Korean"),
    ("ky", "Kyrgyz"),
    ("lo", "Lao"),
    ("lt", "Lithuanian"),
    ("lv", "Latvian"),
    ("mk", "Macedonian"),
    ("ml", "Malayalam"),
    ("mr", "Marathi"),
    ("ms", "Malay"),
    ("mt", "Maltese"),
    ("my", "Burmese"),
    ("ne", "Nepali"),
    ("nl", "Dutch"),
    ("no", "Norwegian"),
    ("or", "Odia"),
    ("pa", "Punjabi"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("si", "Sinhala"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("sq", "Albanian"),
    ("sr", "Serbian"),
    ("sv", "Swedish"),
    ("sw", "Swahili"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("tg", "Tajik"),
    ("th", "Thai"),
    ("tl", "Filipino"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("ur", "Urdu"),
    ("uz", "Uzbek"),
    ("vi", "Vietnamese"),
    ("zh", "Chinese"),
];

/// Source language as chosen by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageSelection {
    Auto,
    Code(String),
}

impl LanguageSelection {
    /// Parse a user-entered language: `auto`/`Auto Detect`, a code, or a name
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case(AUTO_DETECT) || trimmed.eq_ignore_ascii_case("auto detect") {
            Self::Auto
        } else {
            Self::Code(resolve_code(trimmed).to_string())
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }
}

impl fmt::Display for LanguageSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str(AUTO_DETECT),
            Self::Code(code) => f.write_str(code),
        }
    }
}

/// Look up a language by code or display name
pub fn find_code(input: &str) -> Option<&'static str> {
    let normalized = input.trim().to_lowercase();

    LANGUAGES
        .iter()
        .find(|(code, name)| *code == normalized || name.to_lowercase() == normalized)
        .map(|(code, _)| *code)
}

/// Resolve a language code or display name to a code, falling back to English
pub fn resolve_code(input: &str) -> &'static str {
    find_code(input).unwrap_or(DEFAULT_LANGUAGE)
}

/// Display name for a code, or the code itself when unknown
pub fn language_name(code: &str) -> String {
    let normalized = code.to_lowercase();
    LANGUAGES
        .iter()
        .find(|(c, _)| *c == normalized)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| code.to_string())
}
