use std::fmt;
use std::sync::OnceLock;

use linekit_core::constants::{DEFAULT_TEXT_SCALE, DEFAULT_TEXT_STYLE, MAX_ELEMENTS};
use linekit_core::units::parse_leading_float;
use linekit_core::DecodeError;
use regex::Regex;

use crate::model::{Pattern, PatternElement, PatternMetadata, RotationType, TextSpec};

/// A field that was skipped while decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeWarning {
    /// A non-bracketed token had no numeric prefix.
    UnreadableValue(String),
    /// A bracketed token had fewer than two fields.
    MalformedText(String),
}

impl fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnreadableValue(token) => write!(f, "Skipped unreadable value '{}'", token),
            Self::MalformedText(token) => write!(f, "Skipped malformed text element '{}'", token),
        }
    }
}

/// Everything recovered from an imported definition.
#[derive(Debug, Clone)]
pub struct Decoded {
    /// Header name and description, when a `*NAME,DESC` line was present.
    pub metadata: Option<PatternMetadata>,
    pub pattern: Pattern,
    pub warnings: Vec<DecodeWarning>,
}

fn header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^[ \t]*\*([^,\r\n]+)(?:,([^\r\n]*))?")
            .unwrap_or_else(|e| panic!("invalid header pattern: {e}"))
    })
}

fn pattern_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^[ \t]*A,([^\r\n]*)")
            .unwrap_or_else(|e| panic!("invalid pattern-line pattern: {e}"))
    })
}

/// Decode a full definition or a bare pattern line.
///
/// Malformed fields are defaulted or skipped; decoding only fails when the
/// input is blank, when no pattern line can be found, or when the line
/// holds more elements than a pattern may.
pub fn decode(input: &str) -> Result<Decoded, DecodeError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(DecodeError::EmptyInput);
    }

    let metadata = header_regex().captures(input).map(|caps| {
        PatternMetadata::new(
            caps.get(1).map_or("", |m| m.as_str()).trim(),
            caps.get(2).map_or("", |m| m.as_str()).trim(),
        )
    });
    let line = match pattern_line_regex().captures(input) {
        Some(caps) => caps.get(1).map_or("", |m| m.as_str()),
        None => input
            .lines()
            .map(str::trim)
            .find(|l| !l.starts_with('*') && starts_like_values(l))
            .ok_or(DecodeError::NoPatternLine)?,
    };

    let (elements, warnings) = parse_pattern_line(line);
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    let count = elements.len();
    let pattern = Pattern::from_elements(elements).map_err(|_| DecodeError::TooManyElements {
        count,
        max: MAX_ELEMENTS,
    })?;

    tracing::debug!(
        "Decoded {} elements ({} warnings)",
        pattern.len(),
        warnings.len()
    );
    Ok(Decoded {
        metadata,
        pattern,
        warnings,
    })
}

fn starts_like_values(line: &str) -> bool {
    line.starts_with("A,")
        || line
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | ',' | '[' | ']'))
}

fn parse_pattern_line(line: &str) -> (Vec<PatternElement>, Vec<DecodeWarning>) {
    let line = line.trim();
    let body = line.strip_prefix("A,").unwrap_or(line);

    let mut elements = Vec::new();
    let mut warnings = Vec::new();
    for token in split_top_level(body) {
        if token.starts_with('[') && token.ends_with(']') && token.len() >= 2 {
            match parse_text(&token[1..token.len() - 1]) {
                Some(spec) => elements.push(PatternElement::Text(spec)),
                None => warnings.push(DecodeWarning::MalformedText(token.to_string())),
            }
        } else {
            match parse_leading_float(token) {
                Some(value) => elements.push(PatternElement::from_signed(value)),
                None => warnings.push(DecodeWarning::UnreadableValue(token.to_string())),
            }
        }
    }
    (elements, warnings)
}

/// Split on commas outside `[...]` and `"..."`, trimming tokens and
/// dropping empty ones.
pub fn split_top_level(body: &str) -> Vec<&str> {
    split_fields(body, true)
        .into_iter()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Raw comma-separated fields. Commas inside quotes never split; with
/// `brackets`, commas inside `[...]` don't either. Brackets inside quotes
/// are content.
fn split_fields(body: &str, brackets: bool) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut in_brackets = false;
    let mut in_quotes = false;
    let mut start = 0;

    for (i, c) in body.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '[' if brackets && !in_quotes => in_brackets = true,
            ']' if brackets && !in_quotes => in_brackets = false,
            ',' if !in_brackets && !in_quotes => {
                fields.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    fields.push(&body[start..]);
    fields
}

/// Quoted content is taken verbatim; bare content is trimmed.
fn text_content(field: &str) -> String {
    let field = field.trim();
    match field
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(quoted) => quoted.to_string(),
        None => field.replace('"', ""),
    }
}

fn parse_text(inner: &str) -> Option<TextSpec> {
    let fields = split_fields(inner, false);
    if fields.len() < 2 {
        return None;
    }

    let style = fields[1].trim();
    let mut spec = TextSpec {
        content: text_content(fields[0]),
        style: if style.is_empty() {
            DEFAULT_TEXT_STYLE.to_string()
        } else {
            style.to_string()
        },
        scale: DEFAULT_TEXT_SCALE,
        rotation_type: RotationType::Relative,
        rotation_angle: 0.0,
        x_offset: 0.0,
        y_offset: 0.0,
    };

    for field in &fields[2..] {
        let field = field.trim();
        if let Some(rotation) = RotationType::from_code(field) {
            spec.rotation_type = rotation;
            spec.rotation_angle = 0.0;
            continue;
        }
        let Some((key, value)) = field.split_once('=') else {
            continue;
        };
        let number = parse_leading_float(value);
        match key.trim() {
            "S" => spec.scale = number.unwrap_or(DEFAULT_TEXT_SCALE).max(0.0),
            "X" => spec.x_offset = number.unwrap_or(0.0),
            "Y" => spec.y_offset = number.unwrap_or(0.0),
            code => {
                if let Some(rotation) = RotationType::from_code(code) {
                    spec.rotation_type = rotation;
                    spec.rotation_angle = number.unwrap_or(0.0);
                }
            }
        }
    }
    Some(spec)
}
