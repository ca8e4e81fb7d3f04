//! Reshapes the agent's markdown before it goes into the transcript.
//!
//! The webhook answers with escaped markdown, sometimes wrapped a second time
//! in the same `[{"output": ...}]` envelope. Article titles in the news
//! sections get a publication date suffix.

use serde_json::Value;

/// Date used for every annotation; the agent does not send one.
pub const DEFAULT_PUBLICATION_DATE: &str = "13 de fevereiro de 2025";

const SECTION_PREFIXES: &[&str] = &["#", "Notícias"];
const ARTICLE_MARKERS: &[&str] = &["Geração Z", "Viver no", "Compra", "Novo Hub", "Apoio à"];
const OTHER_TOPICS_MARKER: &str = "Outros Tópicos";
const DATE_MARKERS: &[&str] = &["Publicado em:", "(Data:"];

const ESCAPES: &[(&str, &str)] = &[("\\n", "\n"), ("\\r", "\r"), ("\\\"", "\""), ("\\t", "\t")];

/// Pull `output` out of a JSON-encoded `[{"output": ...}]` envelope.
///
/// Returns `None` when the text is not such an envelope. A first element
/// without `output`, or with `output: null`, yields an empty string.
pub fn unwrap_envelope(raw: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(raw).ok()?;
    let first = parsed.as_array()?.first()?.as_object()?;
    let output = match first.get("output") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };
    Some(output)
}

/// Turn literal `\n`, `\r`, `\"` and `\t` sequences into the characters they name.
pub fn unescape(text: &str) -> String {
    ESCAPES
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
}

pub fn format_article_with_date(title: &str, date: Option<&str>) -> String {
    match date {
        Some(date) => format!("{} (Publicado em: {})", title.trim(), date),
        None => title.trim().to_string(),
    }
}

fn has_date(line: &str) -> bool {
    DATE_MARKERS.iter().any(|marker| line.contains(marker))
}

fn shape_sections(text: &str) -> Vec<String> {
    let mut shaped = Vec::new();
    let mut in_article_section = false;

    for section in text.split("\n\n") {
        if section.trim().is_empty() {
            continue;
        }

        if SECTION_PREFIXES.iter().any(|prefix| section.starts_with(prefix)) {
            shaped.push(section.to_string());
            in_article_section = true;
            continue;
        }

        if in_article_section && ARTICLE_MARKERS.iter().any(|marker| section.contains(marker)) {
            shaped.push(format_article_with_date(section, Some(DEFAULT_PUBLICATION_DATE)));
        } else {
            // "Leia mais" links and plain paragraphs pass through untouched.
            shaped.push(section.to_string());
        }
    }

    shaped
}

fn date_other_topics(section: &str) -> String {
    let mut lines = section.split('\n');
    let mut dated: Vec<String> = lines.next().map(str::to_string).into_iter().collect();

    for line in lines {
        if !line.trim().is_empty() && !has_date(line) {
            dated.push(format_article_with_date(line, Some(DEFAULT_PUBLICATION_DATE)));
        } else {
            dated.push(line.to_string());
        }
    }

    dated.join("\n")
}

/// Clean up an agent reply for display.
pub fn clean_markdown(raw: &str) -> String {
    let text = unwrap_envelope(raw).unwrap_or_else(|| raw.to_string());
    let text = unescape(&text);

    let mut sections = shape_sections(&text);

    if let Some(topics) = sections
        .iter_mut()
        .find(|section| section.contains(OTHER_TOPICS_MARKER))
    {
        *topics = date_other_topics(topics);
    }

    sections.join("\n\n").trim().to_string()
}
