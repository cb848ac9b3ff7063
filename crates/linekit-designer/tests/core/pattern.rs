use linekit_core::PatternError;
use linekit_designer::model::{
    EditMode, EditOutcome, ElementKind, Pattern, PatternElement, TextProperty,
};

#[test]
fn test_size_stays_within_bounds() {
    let mut pattern = Pattern::default();
    while pattern.len() < 12 {
        pattern.add_element(ElementKind::Dash).unwrap();
    }
    assert_eq!(
        pattern.add_element(ElementKind::Dot),
        Err(PatternError::CapacityExceeded { max: 12 })
    );
    assert!(pattern.insert_element(0, ElementKind::Text).is_err());
    assert_eq!(pattern.len(), 12);

    while pattern.len() > 2 {
        let id = pattern.id_at(0).unwrap();
        pattern.remove_element(id).unwrap();
    }
    let id = pattern.id_at(0).unwrap();
    assert_eq!(
        pattern.remove_element(id),
        Err(PatternError::MinimumSize { min: 2 })
    );
    assert_eq!(pattern.len(), 2);
}

#[test]
fn test_length_and_visibility_are_independent() {
    let mut pattern = Pattern::default();
    let id = pattern.id_at(1).unwrap();

    pattern.set_dash_length(id, -2.5).unwrap();
    assert_eq!(pattern.get(id), Some(&PatternElement::gap(2.5)));

    pattern.set_dash_visible(id, true).unwrap();
    assert_eq!(pattern.get(id), Some(&PatternElement::dash(2.5)));

    pattern.set_dash_length(id, 0.75).unwrap();
    assert_eq!(pattern.get(id), Some(&PatternElement::dash(0.75)));
}

#[test]
fn test_reorder_keeps_identity_and_content() {
    let mut pattern = Pattern::default();
    let text_id = pattern.id_at(2).unwrap();
    let text = pattern.get(text_id).cloned();

    pattern.reorder(2, 0).unwrap();
    assert_eq!(pattern.index_of(text_id), Some(0));
    assert_eq!(pattern.get(text_id).cloned(), text);
    assert_eq!(pattern.first_element_length(), 0.0);

    assert!(matches!(
        pattern.reorder(0, 9),
        Err(PatternError::IndexOutOfRange { index: 9, len: 4 })
    ));
}

#[test]
fn test_change_type_resets_value() {
    let mut pattern = Pattern::default();
    let id = pattern.id_at(0).unwrap();
    pattern.change_type(id, ElementKind::Text).unwrap();
    let spec = pattern.text(id).unwrap();
    assert_eq!(spec.content, "TEXT");
    assert_eq!(spec.x_offset, 0.0);

    pattern.change_type(id, ElementKind::Dash).unwrap();
    assert_eq!(pattern.get(id), Some(&PatternElement::dash(0.5)));
    assert_eq!(pattern.index_of(id), Some(0));
}

#[test]
fn test_live_typing_defers_partial_numbers() {
    let mut pattern = Pattern::default();
    let dash = pattern.id_at(0).unwrap();
    let text = pattern.id_at(2).unwrap();

    for partial in ["", "-", ".", "-."] {
        assert_eq!(
            pattern.edit_dash_length(dash, partial, EditMode::Preview),
            Ok(EditOutcome::Deferred)
        );
        assert_eq!(
            pattern.set_text_property(text, TextProperty::XOffset, partial, EditMode::Preview),
            Ok(EditOutcome::Deferred)
        );
    }
    assert_eq!(pattern.get(dash), Some(&PatternElement::dash(1.0)));
    assert_eq!(pattern.text(text).unwrap().x_offset, -0.2);

    pattern
        .set_text_property(text, TextProperty::XOffset, "-", EditMode::Commit)
        .unwrap();
    assert_eq!(pattern.text(text).unwrap().x_offset, 0.0);

    pattern
        .set_text_property(text, TextProperty::Scale, "-3", EditMode::Commit)
        .unwrap();
    assert_eq!(pattern.text(text).unwrap().scale, 0.0);
}

#[test]
fn test_dash_operations_reject_text() {
    let mut pattern = Pattern::default();
    let text = pattern.id_at(2).unwrap();
    assert!(matches!(
        pattern.set_dash_length(text, 1.0),
        Err(PatternError::TypeMismatch { kind: "text", .. })
    ));
    let dash = pattern.id_at(0).unwrap();
    assert!(matches!(
        pattern.increment_text_property(dash, TextProperty::Scale, 0.1),
        Err(PatternError::TypeMismatch { kind: "dash", .. })
    ));
}

#[test]
fn test_steppers_round_and_floor() {
    let mut pattern = Pattern::default();
    let dash = pattern.id_at(0).unwrap();
    assert_eq!(pattern.increment_dash_length(dash, 0.1), Ok(1.1));
    assert_eq!(pattern.increment_dash_length(dash, -5.0), Ok(0.0));

    let text = pattern.id_at(2).unwrap();
    assert_eq!(
        pattern.increment_text_property(text, TextProperty::RotationAngle, 0.26),
        Ok(0.3)
    );
    assert_eq!(
        pattern.increment_text_property(text, TextProperty::Scale, -1.0),
        Ok(0.0)
    );
}
