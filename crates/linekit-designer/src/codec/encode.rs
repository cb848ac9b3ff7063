use linekit_core::constants::{FORBIDDEN_TEXT_CHARS, MAX_NAME_LEN, MIN_ELEMENTS};
use linekit_core::units::format_number;
use linekit_core::EncodeError;

use crate::model::{Pattern, PatternElement, PatternMetadata, TextSpec};

/// Encode a pattern as a `.lin` definition.
///
/// Fails when the pattern has fewer than two elements or the effective name
/// is longer than 31 characters.
pub fn encode(pattern: &Pattern, metadata: &PatternMetadata) -> Result<String, EncodeError> {
    if pattern.len() < MIN_ELEMENTS {
        return Err(EncodeError::too_few(pattern.len()));
    }

    let name = metadata.effective_name();
    let name_len = name.chars().count();
    if name_len > MAX_NAME_LEN {
        return Err(EncodeError::name_too_long(name_len));
    }

    Ok(format!(
        "*{},{}\n{}",
        name.to_uppercase(),
        metadata.effective_description(),
        encode_pattern_line(pattern)
    ))
}

/// Definition text, or the diagnostic comment block when encoding fails.
pub fn output(pattern: &Pattern, metadata: &PatternMetadata) -> String {
    match encode(pattern, metadata) {
        Ok(text) => text,
        Err(err) => err.to_string(),
    }
}

/// The `A,...` line alone.
pub fn encode_pattern_line(pattern: &Pattern) -> String {
    let fields: Vec<String> = pattern.elements().map(encode_element).collect();
    format!("A,{}", fields.join(","))
}

pub fn encode_element(element: &PatternElement) -> String {
    match element {
        PatternElement::Text(spec) => encode_text(spec),
        other => format_number(other.signed_value().unwrap_or(0.0)),
    }
}

/// Quote and line-break characters are dropped from the content so the
/// element stays one quoted field.
fn encode_text(spec: &TextSpec) -> String {
    format!(
        "[\"{}\",{},S={},{}={},X={},Y={}]",
        spec.content.replace(FORBIDDEN_TEXT_CHARS, ""),
        spec.style,
        format_number(spec.scale),
        spec.rotation_type.code(),
        format_number(spec.rotation_angle),
        format_number(spec.x_offset),
        format_number(spec.y_offset)
    )
}
