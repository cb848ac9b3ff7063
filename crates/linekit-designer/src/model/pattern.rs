//! The ordered element sequence and its validated editing operations.
//!
//! Every mutation either succeeds completely or returns a [`PatternError`]
//! with the sequence untouched. Sizes are kept within
//! `MIN_ELEMENTS..=MAX_ELEMENTS` by the operations themselves; only a
//! decoded pattern may arrive below the minimum.

use linekit_core::constants::{
    DEFAULT_DESCRIPTION, DEFAULT_FILE_STEM, DEFAULT_NAME, DEFAULT_TEXT_STYLE,
    FORBIDDEN_TEXT_CHARS, MAX_ELEMENTS, MIN_ELEMENTS,
};
use linekit_core::units::{parse_commit_number, parse_live_number, round_to};
use linekit_core::PatternError;
use serde::{Deserialize, Serialize};

use super::element::{ElementKind, PatternElement};
use super::text::{RotationType, TextCase, TextProperty, TextSpec};
use super::ElementId;

/// Whether a field edit comes from a live keystroke or a committed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    /// Incomplete input is deferred and the model left alone.
    Preview,
    /// Input is normalized (unreadable numbers become 0) and always stored.
    Commit,
}

/// Result of a field edit that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    Deferred,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternEntry {
    pub id: ElementId,
    pub element: PatternElement,
}

impl PatternEntry {
    fn new(element: PatternElement) -> Self {
        Self {
            id: ElementId::new(),
            element,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    entries: Vec<PatternEntry>,
}

impl Default for Pattern {
    /// Visible dash, gap, centered label, gap.
    fn default() -> Self {
        Self {
            entries: vec![
                PatternEntry::new(PatternElement::dash(1.0)),
                PatternEntry::new(PatternElement::gap(0.5)),
                PatternEntry::new(PatternElement::Text(TextSpec::default_label())),
                PatternEntry::new(PatternElement::gap(0.5)),
            ],
        }
    }
}

impl Pattern {
    /// Build a pattern from decoded or hand-made elements.
    ///
    /// Fewer than [`MIN_ELEMENTS`] is accepted as an editable but
    /// unencodable state; more than [`MAX_ELEMENTS`] is rejected.
    pub fn from_elements(
        elements: impl IntoIterator<Item = PatternElement>,
    ) -> Result<Self, PatternError> {
        let entries: Vec<PatternEntry> = elements.into_iter().map(PatternEntry::new).collect();
        if entries.len() > MAX_ELEMENTS {
            return Err(PatternError::capacity());
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when the pattern has enough elements to encode.
    pub fn is_valid(&self) -> bool {
        self.entries.len() >= MIN_ELEMENTS
    }

    pub fn entries(&self) -> &[PatternEntry] {
        &self.entries
    }

    pub fn elements(&self) -> impl Iterator<Item = &PatternElement> + '_ {
        self.entries.iter().map(|e| &e.element)
    }

    pub fn first(&self) -> Option<&PatternElement> {
        self.entries.first().map(|e| &e.element)
    }

    pub fn get(&self, id: ElementId) -> Option<&PatternElement> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| &e.element)
    }

    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    pub fn id_at(&self, index: usize) -> Option<ElementId> {
        self.entries.get(index).map(|e| e.id)
    }

    /// Sum of all dash and gap lengths.
    pub fn pattern_length(&self) -> f64 {
        self.elements().map(PatternElement::advance).sum()
    }

    /// Length of the first element when it is a dash, otherwise zero.
    pub fn first_element_length(&self) -> f64 {
        self.first().map(PatternElement::advance).unwrap_or(0.0)
    }

    pub fn add_element(&mut self, kind: ElementKind) -> Result<ElementId, PatternError> {
        self.insert_element(self.entries.len(), kind)
    }

    /// Insert a default element of `kind` before `position`.
    ///
    /// Positions past the end append.
    pub fn insert_element(
        &mut self,
        position: usize,
        kind: ElementKind,
    ) -> Result<ElementId, PatternError> {
        if self.entries.len() >= MAX_ELEMENTS {
            return Err(PatternError::capacity());
        }
        let entry = PatternEntry::new(kind.default_element());
        let id = entry.id;
        let position = position.min(self.entries.len());
        self.entries.insert(position, entry);
        tracing::debug!("Inserted {} at {} ({} elements)", kind, position, self.len());
        Ok(id)
    }

    pub fn remove_element(&mut self, id: ElementId) -> Result<PatternElement, PatternError> {
        let index = self.require_index(id)?;
        if self.entries.len() <= MIN_ELEMENTS {
            return Err(PatternError::minimum());
        }
        let removed = self.entries.remove(index);
        tracing::debug!("Removed {} at {}", removed.element.kind(), index);
        Ok(removed.element)
    }

    /// Replace the element's value with the default for `kind`, keeping its
    /// identity and position.
    pub fn change_type(&mut self, id: ElementId, kind: ElementKind) -> Result<(), PatternError> {
        let entry = self.entry_mut(id)?;
        entry.element = kind.default_element();
        Ok(())
    }

    /// Move the element at `from` so it ends up at index `to`.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), PatternError> {
        let len = self.entries.len();
        for index in [from, to] {
            if index >= len {
                return Err(PatternError::IndexOutOfRange { index, len });
            }
        }
        if from != to {
            let entry = self.entries.remove(from);
            self.entries.insert(to, entry);
        }
        Ok(())
    }

    /// Store the magnitude of `length`, keeping the current visibility.
    pub fn set_dash_length(&mut self, id: ElementId, length: f64) -> Result<(), PatternError> {
        let (len, _) = self.dash_mut(id, "set dash length")?;
        *len = if length.is_finite() { length.abs() } else { 0.0 };
        Ok(())
    }

    /// Dash length typed into a field.
    pub fn edit_dash_length(
        &mut self,
        id: ElementId,
        input: &str,
        mode: EditMode,
    ) -> Result<EditOutcome, PatternError> {
        self.dash_mut(id, "set dash length")?;
        let value = match mode {
            EditMode::Preview => match parse_live_number(input) {
                Some(v) => v,
                None => return Ok(EditOutcome::Deferred),
            },
            EditMode::Commit => parse_commit_number(input),
        };
        self.set_dash_length(id, value)?;
        Ok(EditOutcome::Applied)
    }

    pub fn set_dash_visible(&mut self, id: ElementId, visible: bool) -> Result<(), PatternError> {
        let (_, vis) = self.dash_mut(id, "set dash visibility")?;
        *vis = visible;
        Ok(())
    }

    /// Stepper edit: add `delta`, round to hundredths, floor at zero.
    pub fn increment_dash_length(&mut self, id: ElementId, delta: f64) -> Result<f64, PatternError> {
        let (len, _) = self.dash_mut(id, "step dash length")?;
        *len = round_to(*len + delta, 2).max(0.0);
        Ok(*len)
    }

    /// Text field typed into a form.
    ///
    /// String fields apply in both modes; committing an empty style restores
    /// the default style. Numeric fields follow [`EditMode`]. Content holding
    /// a quote or line break is rejected.
    pub fn set_text_property(
        &mut self,
        id: ElementId,
        property: TextProperty,
        input: &str,
        mode: EditMode,
    ) -> Result<EditOutcome, PatternError> {
        let spec = self.text_mut(id, "set text property")?;
        if property == TextProperty::Content {
            if let Some(character) = input.chars().find(|c| FORBIDDEN_TEXT_CHARS.contains(c)) {
                return Err(PatternError::InvalidTextCharacter { character });
            }
        }
        match property {
            TextProperty::Content => spec.content = input.to_string(),
            TextProperty::Style => {
                let style = input.trim();
                spec.style = if style.is_empty() && mode == EditMode::Commit {
                    DEFAULT_TEXT_STYLE.to_string()
                } else {
                    style.to_string()
                };
            }
            _ => {
                let value = match mode {
                    EditMode::Preview => match parse_live_number(input) {
                        Some(v) => v,
                        None => return Ok(EditOutcome::Deferred),
                    },
                    EditMode::Commit => parse_commit_number(input),
                };
                spec.set_numeric(property, value);
            }
        }
        Ok(EditOutcome::Applied)
    }

    /// Numeric text field set directly.
    pub fn set_text_number(
        &mut self,
        id: ElementId,
        property: TextProperty,
        value: f64,
    ) -> Result<(), PatternError> {
        let spec = self.text_mut(id, "set text property")?;
        if !property.is_numeric() {
            return Err(PatternError::TypeMismatch {
                operation: "set a string field numerically",
                kind: "text",
            });
        }
        spec.set_numeric(property, if value.is_finite() { value } else { 0.0 });
        Ok(())
    }

    /// Stepper edit on a numeric text field.
    ///
    /// The angle keeps one decimal, other fields two; scale floors at zero.
    pub fn increment_text_property(
        &mut self,
        id: ElementId,
        property: TextProperty,
        delta: f64,
    ) -> Result<f64, PatternError> {
        let spec = self.text_mut(id, "step text property")?;
        let Some(current) = spec.numeric(property) else {
            return Err(PatternError::TypeMismatch {
                operation: "step a string field",
                kind: "text",
            });
        };
        spec.set_numeric(property, round_to(current + delta, property.step_precision()));
        Ok(spec.numeric(property).unwrap_or(0.0))
    }

    pub fn set_rotation_type(
        &mut self,
        id: ElementId,
        rotation: RotationType,
    ) -> Result<(), PatternError> {
        self.text_mut(id, "set rotation type")?.rotation_type = rotation;
        Ok(())
    }

    pub fn change_text_case(&mut self, id: ElementId, case: TextCase) -> Result<(), PatternError> {
        self.text_mut(id, "change text case")?.apply_case(case);
        Ok(())
    }

    pub fn text(&self, id: ElementId) -> Result<&TextSpec, PatternError> {
        match self.get(id) {
            Some(PatternElement::Text(spec)) => Ok(spec),
            Some(other) => Err(PatternError::TypeMismatch {
                operation: "read text",
                kind: other.kind().name(),
            }),
            None => Err(unknown(id)),
        }
    }

    pub(crate) fn text_mut(
        &mut self,
        id: ElementId,
        operation: &'static str,
    ) -> Result<&mut TextSpec, PatternError> {
        match &mut self.entry_mut(id)?.element {
            PatternElement::Text(spec) => Ok(spec),
            other => Err(PatternError::TypeMismatch {
                operation,
                kind: other.kind().name(),
            }),
        }
    }

    fn dash_mut(
        &mut self,
        id: ElementId,
        operation: &'static str,
    ) -> Result<(&mut f64, &mut bool), PatternError> {
        match &mut self.entry_mut(id)?.element {
            PatternElement::Dash { length, visible } => Ok((length, visible)),
            other => Err(PatternError::TypeMismatch {
                operation,
                kind: other.kind().name(),
            }),
        }
    }

    fn entry_mut(&mut self, id: ElementId) -> Result<&mut PatternEntry, PatternError> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| unknown(id))
    }

    fn require_index(&self, id: ElementId) -> Result<usize, PatternError> {
        self.index_of(id).ok_or_else(|| unknown(id))
    }
}

fn unknown(id: ElementId) -> PatternError {
    PatternError::UnknownElement { id: id.to_string() }
}

/// Name and description written on the definition header line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternMetadata {
    pub name: String,
    pub description: String,
}

impl PatternMetadata {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Trimmed name, or the placeholder name when blank.
    pub fn effective_name(&self) -> &str {
        match self.name.trim() {
            "" => DEFAULT_NAME,
            name => name,
        }
    }

    /// Trimmed description, or the placeholder description when blank.
    pub fn effective_description(&self) -> &str {
        match self.description.trim() {
            "" => DEFAULT_DESCRIPTION,
            description => description,
        }
    }

    /// `.lin` file name derived from the name.
    ///
    /// Characters other than ASCII letters, digits, `-` and `_` become `_`.
    pub fn file_name(&self) -> String {
        let name = self.name.trim();
        if name.is_empty() {
            return format!("{}.lin", DEFAULT_FILE_STEM);
        }
        let stem: String = name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!("{}.lin", stem)
    }
}
