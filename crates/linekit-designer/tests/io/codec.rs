use linekit_core::{DecodeError, EncodeError};
use linekit_designer::codec::{decode, encode, output, DecodeWarning};
use linekit_designer::model::{
    Pattern, PatternElement, PatternMetadata, RotationType, TextSpec,
};
use proptest::prelude::*;

#[test]
fn test_encode_dashdot() {
    let pattern = Pattern::from_elements([
        PatternElement::dash(1.0),
        PatternElement::gap(0.5),
        PatternElement::Dot,
        PatternElement::dash(0.25),
    ])
    .unwrap();
    let metadata = PatternMetadata::new("DASHDOT", "Dash dot line");
    assert_eq!(
        encode(&pattern, &metadata).unwrap(),
        "*DASHDOT,Dash dot line\nA,1,-0.5,0,0.25"
    );
}

#[test]
fn test_decode_text_line() {
    let decoded =
        decode(r#"A,1,-0.5,["TEXT",STANDARD,S=0.1,R=0,X=-0.2,Y=-0.05],-0.5"#).unwrap();
    assert!(decoded.metadata.is_none());
    assert!(decoded.warnings.is_empty());

    let elements: Vec<_> = decoded.pattern.elements().cloned().collect();
    let mut text = TextSpec::new("TEXT");
    text.rotation_type = RotationType::Relative;
    text.x_offset = -0.2;
    text.y_offset = -0.05;
    assert_eq!(
        elements,
        vec![
            PatternElement::dash(1.0),
            PatternElement::gap(0.5),
            PatternElement::Text(text),
            PatternElement::gap(0.5),
        ]
    );
}

#[test]
fn test_decode_two_line_definition_in_any_order() {
    let input = "A,0.5,-0.25\n\n*BORDER, Border line ,with commas";
    let decoded = decode(input).unwrap();
    let metadata = decoded.metadata.unwrap();
    assert_eq!(metadata.name, "BORDER");
    assert_eq!(metadata.description, "Border line ,with commas");
    assert_eq!(decoded.pattern.len(), 2);
}

#[test]
fn test_decode_ignores_a_inside_description() {
    let decoded = decode("*SAFE,See A,1 below\nA,2,-1").unwrap();
    let elements: Vec<_> = decoded.pattern.elements().cloned().collect();
    assert_eq!(elements, vec![PatternElement::dash(2.0), PatternElement::gap(1.0)]);
}

#[test]
fn test_decode_failures() {
    assert_eq!(decode("").unwrap_err(), DecodeError::EmptyInput);
    assert_eq!(
        decode("*NAME,only a header").unwrap_err(),
        DecodeError::NoPatternLine
    );
    let thirteen = format!("A,{}", vec!["1"; 13].join(","));
    assert_eq!(
        decode(&thirteen).unwrap_err(),
        DecodeError::TooManyElements { count: 13, max: 12 }
    );
}

#[test]
fn test_decode_is_lenient() {
    let decoded = decode("A,1.5mm,,abc,[\"X\"],-0.5").unwrap();
    assert_eq!(
        decoded.warnings,
        vec![
            DecodeWarning::UnreadableValue("abc".into()),
            DecodeWarning::MalformedText("[\"X\"]".into()),
        ]
    );
    let elements: Vec<_> = decoded.pattern.elements().cloned().collect();
    assert_eq!(elements, vec![PatternElement::dash(1.5), PatternElement::gap(0.5)]);
}

#[test]
fn test_output_diagnostics() {
    let single = Pattern::from_elements([PatternElement::dash(1.0)]).unwrap();
    let text = output(&single, &PatternMetadata::default());
    assert_eq!(text, EncodeError::too_few(1).to_string());
    assert!(text.starts_with("; ERROR: Line type requires at least 2 elements (currently 1)"));

    let long = PatternMetadata::new("N".repeat(40), "");
    let text = output(&Pattern::default(), &long);
    assert!(text.starts_with("; ERROR: Line type name too long (40 characters, max 31)"));
}

fn element_strategy() -> impl Strategy<Value = PatternElement> {
    let dash = (1u32..400, any::<bool>()).prop_map(|(hundredths, visible)| PatternElement::Dash {
        length: hundredths as f64 / 100.0,
        visible,
    });
    let text = (
        "[A-Za-z0-9 ,=.\\[\\]-]{1,8}",
        prop::sample::select(vec!["STANDARD", "ROMANS", "MONOTXT"]),
        0u32..100,
        prop::sample::select(vec![
            RotationType::Absolute,
            RotationType::Relative,
            RotationType::Upright,
        ]),
        -360i32..360,
        -200i32..200,
        -200i32..200,
    )
        .prop_map(|(content, style, scale, rotation_type, angle, x, y)| {
            PatternElement::Text(TextSpec {
                content,
                style: style.to_string(),
                scale: scale as f64 / 100.0,
                rotation_type,
                rotation_angle: angle as f64,
                x_offset: x as f64 / 100.0,
                y_offset: y as f64 / 100.0,
            })
        });
    prop_oneof![dash, Just(PatternElement::Dot), text]
}

proptest! {
    #[test]
    fn prop_decode_inverts_encode(
        elements in prop::collection::vec(element_strategy(), 2..=12),
        name in "[A-Z][A-Z0-9_]{0,30}",
        description in "[A-Za-z][A-Za-z ]{0,20}[a-z]",
    ) {
        let pattern = Pattern::from_elements(elements.clone()).unwrap();
        let metadata = PatternMetadata::new(name, description);
        let text = encode(&pattern, &metadata).unwrap();

        let decoded = decode(&text).unwrap();
        prop_assert!(decoded.warnings.is_empty());
        prop_assert_eq!(decoded.metadata, Some(metadata));
        let round_tripped: Vec<_> = decoded.pattern.elements().cloned().collect();
        prop_assert_eq!(round_tripped, elements);
    }
}
