use std::fmt;

use serde::{Deserialize, Serialize};

/// Output casing for a suggested base name.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum CasingStyle {
    #[default]
    Snake,
    Kebab,
    Camel,
    Pascal,
    Lower,
    Title,
}

impl CasingStyle {
    pub const ALL: [CasingStyle; 6] = [
        CasingStyle::Snake,
        CasingStyle::Kebab,
        CasingStyle::Camel,
        CasingStyle::Pascal,
        CasingStyle::Lower,
        CasingStyle::Title,
    ];

    /// Parses a style name, falling back to snake for anything unrecognized.
    pub fn parse_lossy(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "kebab" => Self::Kebab,
            "camel" => Self::Camel,
            "pascal" => Self::Pascal,
            "lower" => Self::Lower,
            "title" => Self::Title,
            _ => Self::Snake,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Snake => "snake",
            Self::Kebab => "kebab",
            Self::Camel => "camel",
            Self::Pascal => "pascal",
            Self::Lower => "lower",
            Self::Title => "title",
        }
    }

    /// Renders a word sequence in this style. An empty sequence renders to "".
    pub fn render<S: AsRef<str>>(self, words: &[S]) -> String {
        let words = words.iter().map(AsRef::<str>::as_ref);
        match self {
            Self::Snake => join(words, "_"),
            Self::Kebab => join(words, "-"),
            Self::Lower => join(words, " "),
            Self::Title => join(words.map(capitalize), " "),
            Self::Pascal => words.map(capitalize).collect(),
            Self::Camel => words
                .enumerate()
                .map(|(index, word)| {
                    if index == 0 {
                        word.to_lowercase()
                    } else {
                        capitalize(word)
                    }
                })
                .collect(),
        }
    }
}

impl fmt::Display for CasingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Splits free text into lowercase words.
///
/// Whitespace, `-` and `_` separate words and are discarded. An uppercase
/// character directly after a lowercase one starts a new word and is kept as
/// its first letter. Any other character is kept in the current word, so
/// symbol-only words such as `&` survive. Text without a single alphanumeric
/// character yields no words.
pub fn tokenize_words(text: &str) -> Vec<String> {
    if !text.chars().any(char::is_alphanumeric) {
        return Vec::new();
    }

    let mut words = Vec::new();
    let mut current = String::new();
    let mut previous: Option<char> = None;

    for ch in text.chars() {
        if ch.is_whitespace() || ch == '-' || ch == '_' {
            flush_word(&mut current, &mut words);
        } else if ch.is_uppercase() && previous.is_some_and(char::is_lowercase) {
            flush_word(&mut current, &mut words);
            current.push(ch);
        } else {
            current.push(ch);
        }
        previous = Some(ch);
    }
    flush_word(&mut current, &mut words);

    words
}

fn flush_word(current: &mut String, words: &mut Vec<String>) {
    if !current.is_empty() {
        words.push(current.to_lowercase());
        current.clear();
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn join<I, T>(words: I, separator: &str) -> String
where
    I: Iterator<Item = T>,
    T: AsRef<str>,
{
    let mut out = String::new();
    for (index, word) in words.enumerate() {
        if index > 0 {
            out.push_str(separator);
        }
        out.push_str(word.as_ref());
    }
    out
}
