//! Training set record

use std::fmt;

use crate::codec::{
    rejected, FieldSpec, FieldValue, LineFault, Record, RecordSchema, Scalar, ScalarKind,
};

const SET_FIELDS: &[FieldSpec] = &[
    FieldSpec::single("date", ScalarKind::Text),
    FieldSpec::single("exercise", ScalarKind::Text),
    FieldSpec::single("weight", ScalarKind::Float),
    FieldSpec::single("reps", ScalarKind::Integer),
];

/// One performed set of an exercise.
///
/// `exercise` refers to an [`Exercise`](super::Exercise) by name. `date`
/// is kept as entered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingSet {
    pub date: String,
    pub exercise: String,
    /// Kilograms, persisted with two decimals
    pub weight: f64,
    pub reps: i64,
}

impl TrainingSet {
    pub fn new(date: impl Into<String>, exercise: impl Into<String>, weight: f64, reps: i64) -> Self {
        Self {
            date: date.into(),
            exercise: exercise.into(),
            weight,
            reps,
        }
    }
}

impl Record for TrainingSet {
    const SCHEMA: RecordSchema = RecordSchema::new("set", SET_FIELDS);

    fn get(&self, field: &str) -> Option<FieldValue> {
        match field {
            "date" => Some(FieldValue::text(self.date.clone())),
            "exercise" => Some(FieldValue::text(self.exercise.clone())),
            "weight" => Some(FieldValue::Single(Scalar::Float(self.weight))),
            "reps" => Some(FieldValue::Single(Scalar::Integer(self.reps))),
            _ => None,
        }
    }

    fn set(&mut self, field: &str, value: FieldValue) -> Result<(), LineFault> {
        match field {
            "date" => self.date = value.into_text().ok_or_else(|| rejected(field))?,
            "exercise" => self.exercise = value.into_text().ok_or_else(|| rejected(field))?,
            "weight" => self.weight = value.as_float().ok_or_else(|| rejected(field))?,
            "reps" => self.reps = value.as_integer().ok_or_else(|| rejected(field))?,
            _ => return Err(rejected(field)),
        }
        Ok(())
    }
}

impl fmt::Display for TrainingSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.exercise, self.date)
    }
}

/// Formats a weight with at most two decimals and no trailing zeros.
pub fn format_weight(weight: f64) -> String {
    let fixed = format!("{:.2}", weight);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
