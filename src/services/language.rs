const PT_WORDS: &[&str] = &["da", "dos", "das", "em", "para", "com", "na", "no", "aos"];

const PT_TITLE_WORDS: &[&str] = &[
    "da", "dos", "das", "em", "para", "com", "na", "no", "aos", "geração", "viver", "compra",
    "novo", "secretária", "estado", "apoios", "habitação", "falhada",
];

fn contains_any_word(text: &str, words: &[&str]) -> bool {
    text.to_lowercase()
        .split_whitespace()
        .any(|word| words.contains(&word))
}

/// Guess whether a line is Portuguese from common function words.
///
/// Tokens are compared exactly, so `"para,"` does not count.
pub fn is_portuguese(text: &str) -> bool {
    contains_any_word(text, PT_WORDS)
}

/// Same as [`is_portuguese`] with extra nouns that show up in headlines.
pub fn is_portuguese_title(text: &str) -> bool {
    contains_any_word(text, PT_TITLE_WORDS)
}

/// First line is judged as a title, the rest as body text.
pub fn looks_portuguese(text: &str) -> bool {
    let mut lines = text.lines();
    match lines.next() {
        Some(first) if is_portuguese_title(first) => true,
        Some(_) => lines.any(is_portuguese),
        None => false,
    }
}
