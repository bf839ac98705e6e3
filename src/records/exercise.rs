//! Exercise record

use std::fmt;

use crate::codec::{rejected, FieldSpec, FieldValue, LineFault, Record, RecordSchema, ScalarKind};

const EXERCISE_FIELDS: &[FieldSpec] = &[
    FieldSpec::single("name", ScalarKind::Text),
    FieldSpec::list("primaryMuscles", ScalarKind::Text),
    FieldSpec::list("secondaryMuscles", ScalarKind::Text),
    FieldSpec::single("type", ScalarKind::Text),
];

/// A named exercise and the muscles it works.
///
/// Names are unique within the tracker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exercise {
    pub name: String,
    pub primary_muscles: Vec<String>,
    pub secondary_muscles: Vec<String>,
    /// Free-form movement category, e.g. "push"
    pub kind: String,
}

impl Exercise {
    pub fn new(
        name: impl Into<String>,
        primary_muscles: Vec<String>,
        secondary_muscles: Vec<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            primary_muscles,
            secondary_muscles,
            kind: kind.into(),
        }
    }
}

impl Record for Exercise {
    const SCHEMA: RecordSchema = RecordSchema::new("exercise", EXERCISE_FIELDS);

    fn get(&self, field: &str) -> Option<FieldValue> {
        match field {
            "name" => Some(FieldValue::text(self.name.clone())),
            "primaryMuscles" => Some(FieldValue::text_list(&self.primary_muscles)),
            "secondaryMuscles" => Some(FieldValue::text_list(&self.secondary_muscles)),
            "type" => Some(FieldValue::text(self.kind.clone())),
            _ => None,
        }
    }

    fn set(&mut self, field: &str, value: FieldValue) -> Result<(), LineFault> {
        match field {
            "name" => self.name = value.into_text().ok_or_else(|| rejected(field))?,
            "primaryMuscles" => {
                self.primary_muscles = value.into_text_list().ok_or_else(|| rejected(field))?
            }
            "secondaryMuscles" => {
                self.secondary_muscles = value.into_text_list().ok_or_else(|| rejected(field))?
            }
            "type" => self.kind = value.into_text().ok_or_else(|| rejected(field))?,
            _ => return Err(rejected(field)),
        }
        Ok(())
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
