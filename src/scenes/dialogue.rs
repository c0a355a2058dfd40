//=========================================================================
// Dialogue
//=========================================================================
//
// Parsing and layout of the Magic Words conversation.
//
// Pipeline:
// ```text
//   JSON payload ──parse()──> DialogueLine[]
//        │
//        └─ per line: speaker_label() + segment_text() ──layout()──> LaidOutLine[]
// ```
//
// Text width is estimated from a fixed average glyph advance; the renderer
// owns real text metrics.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

//=== Errors ==============================================================

#[derive(Debug, Error)]
pub enum DialogueError {
    #[error("malformed dialogue payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

//=== Payload =============================================================

/// One spoken line. A missing or blank name is shown as "Unknown".
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DialogueLine {
    #[serde(default)]
    pub name: Option<String>,
    pub text: String,
}

#[derive(Debug, Deserialize)]
struct Payload {
    dialogue: Vec<DialogueLine>,
}

/// Parses `{ "dialogue": [{ "name": .., "text": .. }], .. }`; other
/// top-level fields are ignored.
pub fn parse(json: &str) -> Result<Vec<DialogueLine>, DialogueError> {
    let payload: Payload = serde_json::from_str(json)?;
    Ok(payload.dialogue)
}

pub fn speaker_label(name: Option<&str>) -> &str {
    match name {
        Some(name) if !name.trim().is_empty() => name,
        _ => "Unknown",
    }
}

//=== Emoji ===============================================================

const TWEMOJI_BASE: &str = "https://cdnjs.cloudflare.com/ajax/libs/twemoji/14.0.2/svg";

/// Placeholder name → image URL.
#[derive(Debug, Clone)]
pub struct EmojiMap {
    urls: HashMap<String, String>,
}

impl EmojiMap {
    pub fn new() -> Self {
        Self { urls: HashMap::new() }
    }

    /// The five reactions the conversation uses.
    pub fn twemoji() -> Self {
        [
            ("satisfied", "1f60a"),
            ("intrigued", "1f914"),
            ("neutral", "1f610"),
            ("laughing", "1f602"),
            ("win", "1f389"),
        ]
        .into_iter()
        .fold(Self::new(), |map, (name, code)| {
            map.with(name, format!("{}/{}.svg", TWEMOJI_BASE, code))
        })
    }

    pub fn with(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.urls.insert(name.into(), url.into());
        self
    }

    pub fn url(&self, name: &str) -> Option<&str> {
        self.urls.get(name).map(String::as_str)
    }
}

impl Default for EmojiMap {
    fn default() -> Self {
        Self::twemoji()
    }
}

//=== Segments ============================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Emoji { name: String, url: String },
}

/// Splits `text` on `{name}` placeholders.
///
/// Known names become [`Segment::Emoji`]; unknown ones stay in the text
/// literally, braces included. Empty text runs are dropped.
pub fn segment_text(text: &str, emojis: &EmojiMap) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut pending = String::new();
    let mut rest = text;

    while let Some((before, name, after)) = next_placeholder(rest) {
        pending.push_str(before);
        match emojis.url(name) {
            Some(url) => {
                if !pending.is_empty() {
                    segments.push(Segment::Text(std::mem::take(&mut pending)));
                }
                segments.push(Segment::Emoji {
                    name: name.to_string(),
                    url: url.to_string(),
                });
            }
            None => {
                pending.push('{');
                pending.push_str(name);
                pending.push('}');
            }
        }
        rest = after;
    }

    pending.push_str(rest);
    if !pending.is_empty() {
        segments.push(Segment::Text(pending));
    }
    segments
}

/// Finds the first `{name}` with a non-empty name, returning the text
/// before it, the name, and the text after it.
fn next_placeholder(text: &str) -> Option<(&str, &str, &str)> {
    let mut search_from = 0;
    loop {
        let open = search_from + text[search_from..].find('{')?;
        let close = open + 1 + text[open + 1..].find('}')?;
        if close > open + 1 {
            return Some((&text[..open], &text[open + 1..close], &text[close + 1..]));
        }
        // "{}" is plain text; keep looking after it.
        search_from = open + 1;
    }
}

//=== Layout ==============================================================

pub const PADDING: f32 = 20.0;
pub const MAX_FONT_SIZE: f32 = 24.0;
pub const FONT_SCALE: f32 = 0.03;
pub const EMOJI_GAP: f32 = 5.0;

/// Estimated glyph width as a fraction of the font size.
pub const AVERAGE_GLYPH_ADVANCE: f32 = 0.5;

pub fn font_size(viewport_width: f32) -> f32 {
    MAX_FONT_SIZE.min(viewport_width * FONT_SCALE)
}

fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * AVERAGE_GLYPH_ADVANCE
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedSegment {
    pub x: f32,
    pub segment: Segment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutLine {
    pub y: f32,
    /// Bold "Name: " prefix at x = 0.
    pub speaker: String,
    pub segments: Vec<PlacedSegment>,
}

/// Positions every line for a viewport `viewport_width` wide.
///
/// Lines start at `PADDING` and step down by `font_size + PADDING`; within
/// a line, text advances by its estimated width and each emoji reserves
/// `font_size + EMOJI_GAP`.
pub fn layout(lines: &[DialogueLine], emojis: &EmojiMap, viewport_width: f32) -> Vec<LaidOutLine> {
    let font = font_size(viewport_width);

    lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            let speaker = format!("{}: ", speaker_label(line.name.as_deref()));
            let mut x = text_width(&speaker, font);

            let segments = segment_text(&line.text, emojis)
                .into_iter()
                .map(|segment| {
                    let placed = PlacedSegment { x, segment };
                    x += match &placed.segment {
                        Segment::Text(text) => text_width(text, font),
                        Segment::Emoji { .. } => font + EMOJI_GAP,
                    };
                    placed
                })
                .collect();

            LaidOutLine {
                y: PADDING + index as f32 * (font + PADDING),
                speaker,
                segments,
            }
        })
        .collect()
}

//=========================================================================
// Unit Tests
//=========================================================================
