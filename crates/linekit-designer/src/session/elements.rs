//! Validated pattern edits for the session.
//!
//! Each operation forwards to [`Pattern`](crate::model::Pattern); rejected
//! edits are logged and returned unchanged so the caller can show them.

use linekit_core::PatternError;

use super::EditorSession;
use crate::measure::center_offsets;
use crate::model::{
    EditMode, EditOutcome, ElementId, ElementKind, PatternElement, RotationType, TextCase,
    TextProperty,
};

fn logged<T>(operation: &str, result: Result<T, PatternError>) -> Result<T, PatternError> {
    if let Err(err) = &result {
        tracing::warn!("{} rejected: {}", operation, err);
    }
    result
}

impl EditorSession {
    fn touched<T>(
        &mut self,
        operation: &str,
        result: Result<T, PatternError>,
    ) -> Result<T, PatternError> {
        let result = logged(operation, result);
        if result.is_ok() {
            self.is_modified = true;
        }
        result
    }

    pub fn add_element(&mut self, kind: ElementKind) -> Result<ElementId, PatternError> {
        let result = self.pattern.add_element(kind);
        self.touched("Add element", result)
    }

    pub fn insert_element(
        &mut self,
        position: usize,
        kind: ElementKind,
    ) -> Result<ElementId, PatternError> {
        let result = self.pattern.insert_element(position, kind);
        self.touched("Insert element", result)
    }

    pub fn remove_element(&mut self, id: ElementId) -> Result<PatternElement, PatternError> {
        let result = self.pattern.remove_element(id);
        self.touched("Remove element", result)
    }

    pub fn change_type(&mut self, id: ElementId, kind: ElementKind) -> Result<(), PatternError> {
        let result = self.pattern.change_type(id, kind);
        self.touched("Change type", result)
    }

    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), PatternError> {
        let result = self.pattern.reorder(from, to);
        self.touched("Reorder", result)
    }

    pub fn set_dash_length(&mut self, id: ElementId, length: f64) -> Result<(), PatternError> {
        let result = self.pattern.set_dash_length(id, length);
        self.touched("Set dash length", result)
    }

    pub fn edit_dash_length(
        &mut self,
        id: ElementId,
        input: &str,
        mode: EditMode,
    ) -> Result<EditOutcome, PatternError> {
        let result = self.pattern.edit_dash_length(id, input, mode);
        self.touched("Edit dash length", result)
    }

    pub fn set_dash_visible(&mut self, id: ElementId, visible: bool) -> Result<(), PatternError> {
        let result = self.pattern.set_dash_visible(id, visible);
        self.touched("Set dash visibility", result)
    }

    pub fn increment_dash_length(&mut self, id: ElementId, delta: f64) -> Result<f64, PatternError> {
        let result = self.pattern.increment_dash_length(id, delta);
        self.touched("Step dash length", result)
    }

    pub fn set_text_property(
        &mut self,
        id: ElementId,
        property: TextProperty,
        input: &str,
        mode: EditMode,
    ) -> Result<EditOutcome, PatternError> {
        let result = self.pattern.set_text_property(id, property, input, mode);
        self.touched("Set text property", result)
    }

    pub fn increment_text_property(
        &mut self,
        id: ElementId,
        property: TextProperty,
        delta: f64,
    ) -> Result<f64, PatternError> {
        let result = self.pattern.increment_text_property(id, property, delta);
        self.touched("Step text property", result)
    }

    pub fn set_rotation_type(
        &mut self,
        id: ElementId,
        rotation: RotationType,
    ) -> Result<(), PatternError> {
        let result = self.pattern.set_rotation_type(id, rotation);
        self.touched("Set rotation type", result)
    }

    pub fn change_text_case(&mut self, id: ElementId, case: TextCase) -> Result<(), PatternError> {
        let result = self.pattern.change_text_case(id, case);
        self.touched("Change text case", result)
    }

    /// Centers a text element on its placement point using the session's
    /// measurement backend. Returns the new `(x, y)` offsets.
    pub fn center_text(&mut self, id: ElementId) -> Result<(f64, f64), PatternError> {
        let measurer = self.measurer();
        let result = self
            .pattern
            .text_mut(id, "center text")
            .map(|spec| {
                let (x, y) = center_offsets(spec, measurer);
                spec.x_offset = x;
                spec.y_offset = y;
                (x, y)
            });
        self.touched("Center text", result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::MeasureBackend;

    fn session() -> EditorSession {
        let mut session = EditorSession::new();
        session.backend = MeasureBackend::Approximate;
        session
    }

    #[test]
    fn test_capacity_errors_leave_pattern_alone() {
        let mut session = session();
        while session.pattern().len() < 12 {
            session.add_element(ElementKind::Dot).unwrap();
        }
        let before = session.pattern().clone();
        assert!(session.add_element(ElementKind::Dash).is_err());
        assert_eq!(session.pattern(), &before);
    }

    #[test]
    fn test_center_text_is_idempotent() {
        let mut session = session();
        let id = session.pattern().id_at(2).unwrap();
        let first = session.center_text(id).unwrap();
        let second = session.center_text(id).unwrap();
        assert_eq!(first, second);
        assert_eq!(session.pattern().text(id).unwrap().x_offset, first.0);
    }

    #[test]
    fn test_center_text_on_dash_is_a_type_mismatch() {
        let mut session = session();
        let id = session.pattern().id_at(0).unwrap();
        assert!(matches!(
            session.center_text(id),
            Err(PatternError::TypeMismatch { .. })
        ));
        assert!(!session.is_modified);
    }

    #[test]
    fn test_successful_edit_marks_modified() {
        let mut session = session();
        let id = session.pattern().id_at(0).unwrap();
        session.set_dash_visible(id, false).unwrap();
        assert!(session.is_modified);
        assert!(session.output().contains("A,-1,"));
    }
}
