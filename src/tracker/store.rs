//! In-memory tracker backed by the record codec
//!
//! Holds every exercise and set, applies the business rules, and persists
//! each change:
//!
//! - additions are appended to the data file
//! - deletions and modifications rewrite the whole file
//!
//! Memory is updated first. A failed write is reported to the caller but
//! never rolled back, so the session keeps the user's change even when
//! the disk does not.
//!
//! A file that stops decoding part way keeps the records read before the
//! bad line. Its next change rewrites it in full instead of appending, so
//! new records never land behind unreadable content.

use std::path::{Path, PathBuf};

use crate::codec::{self, Decoded, Record, RewriteReport};
use crate::records::{Exercise, TrainingSet};

use super::errors::{TrackerError, TrackerResult};

/// Locations of the two data files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub exercises: PathBuf,
    pub sets: PathBuf,
}

impl DataPaths {
    /// Default file names inside `data_dir`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self {
            exercises: data_dir.join("exercises.txt"),
            sets: data_dir.join("sets.txt"),
        }
    }
}

/// Result of the file rewrites triggered by one operation.
///
/// A file that did not need rewriting reports zero records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteSummary {
    pub exercises: RewriteReport,
    pub sets: RewriteReport,
}

/// The exercise and set store.
pub struct Tracker {
    paths: DataPaths,
    exercises: Vec<Exercise>,
    sets: Vec<TrainingSet>,
    /// Files whose on-disk content no longer matches memory
    damaged: Damaged,
}

#[derive(Debug, Clone, Copy)]
struct Damaged {
    exercises: bool,
    sets: bool,
}

impl Tracker {
    /// Loads both data files.
    ///
    /// A file that cannot be fully decoded is logged and its record type
    /// starts with the records read before the failure; the tracker still
    /// opens.
    pub fn open(paths: DataPaths) -> Self {
        let (exercises, exercises_damaged) = load::<Exercise>(&paths.exercises);
        let (sets, sets_damaged) = load::<TrainingSet>(&paths.sets);

        tracing::info!(
            exercises = exercises.len(),
            sets = sets.len(),
            "tracker loaded"
        );

        Self {
            paths,
            exercises,
            sets,
            damaged: Damaged {
                exercises: exercises_damaged,
                sets: sets_damaged,
            },
        }
    }

    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn sets(&self) -> &[TrainingSet] {
        &self.sets
    }

    /// Finds an exercise by exact name.
    pub fn exercise(&self, name: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.name == name)
    }

    /// Sets recorded on `date`, in insertion order.
    pub fn sets_on<'a>(&'a self, date: &'a str) -> impl Iterator<Item = &'a TrainingSet> + 'a {
        self.sets.iter().filter(move |s| s.date == date)
    }

    /// Adds an exercise and appends it to the exercise file.
    ///
    /// # Errors
    ///
    /// - `DuplicateExercise` if the name is taken (nothing changes)
    /// - `Codec` if the append fails (the exercise stays in memory)
    pub fn add_exercise(&mut self, exercise: Exercise) -> TrackerResult<()> {
        if self.exercise(&exercise.name).is_some() {
            return Err(TrackerError::DuplicateExercise(exercise.name));
        }

        self.exercises.push(exercise);
        if self.damaged.exercises {
            self.persist(true, false)?;
            return Ok(());
        }
        let added = &self.exercises[self.exercises.len() - 1];
        codec::append(&self.paths.exercises, added)?;
        Ok(())
    }

    /// Adds a set and appends it to the set file.
    ///
    /// # Errors
    ///
    /// - `UnknownExercise` if the set's exercise does not exist
    /// - `Codec` if the append fails (the set stays in memory)
    pub fn add_set(&mut self, set: TrainingSet) -> TrackerResult<()> {
        if self.exercise(&set.exercise).is_none() {
            return Err(TrackerError::UnknownExercise(set.exercise));
        }

        self.sets.push(set);
        if self.damaged.sets {
            self.persist(false, true)?;
            return Ok(());
        }
        let added = &self.sets[self.sets.len() - 1];
        codec::append(&self.paths.sets, added)?;
        Ok(())
    }

    /// Deletes an exercise together with every set that references it.
    pub fn delete_exercise(&mut self, name: &str) -> TrackerResult<RewriteSummary> {
        let before = self.exercises.len();
        self.exercises.retain(|e| e.name != name);
        if self.exercises.len() == before {
            return Err(TrackerError::UnknownExercise(name.to_string()));
        }

        let sets_before = self.sets.len();
        self.sets.retain(|s| s.exercise != name);
        let sets_changed = self.sets.len() != sets_before;

        tracing::debug!(
            exercise = name,
            sets_removed = sets_before - self.sets.len(),
            "deleted exercise"
        );

        self.persist(true, sets_changed)
    }

    /// Deletes the most recently added set.
    pub fn delete_last_set(&mut self) -> TrackerResult<RewriteSummary> {
        if self.sets.pop().is_none() {
            return Err(TrackerError::NoSets);
        }
        self.persist(false, true)
    }

    /// Removes every exercise and, since sets cannot outlive their
    /// exercise, every set.
    pub fn clear_exercises(&mut self) -> TrackerResult<()> {
        self.exercises.clear();
        self.sets.clear();

        let exercises = codec::clear(&self.paths.exercises);
        let sets = codec::clear(&self.paths.sets);
        self.damaged.exercises &= exercises.is_err();
        self.damaged.sets &= sets.is_err();
        exercises?;
        sets?;
        Ok(())
    }

    /// Removes every set.
    pub fn clear_sets(&mut self) -> TrackerResult<()> {
        self.sets.clear();
        codec::clear(&self.paths.sets)?;
        self.damaged.sets = false;
        Ok(())
    }

    /// Renames an exercise and every set that references it.
    ///
    /// # Errors
    ///
    /// - `UnknownExercise` if `old_name` does not exist
    /// - `DuplicateExercise` if `new_name` belongs to another exercise
    pub fn rename_exercise(
        &mut self,
        old_name: &str,
        new_name: &str,
    ) -> TrackerResult<RewriteSummary> {
        let index = self.position(old_name)?;
        if old_name != new_name && self.exercise(new_name).is_some() {
            return Err(TrackerError::DuplicateExercise(new_name.to_string()));
        }

        self.exercises[index].name = new_name.to_string();

        let mut sets_changed = false;
        for set in self.sets.iter_mut().filter(|s| s.exercise == old_name) {
            set.exercise = new_name.to_string();
            sets_changed = true;
        }

        self.persist(true, sets_changed)
    }

    /// Replaces the primary muscle list of an exercise.
    pub fn set_primary_muscles(
        &mut self,
        name: &str,
        muscles: Vec<String>,
    ) -> TrackerResult<RewriteSummary> {
        let index = self.position(name)?;
        self.exercises[index].primary_muscles = muscles;
        self.persist(true, false)
    }

    /// Replaces the secondary muscle list of an exercise.
    pub fn set_secondary_muscles(
        &mut self,
        name: &str,
        muscles: Vec<String>,
    ) -> TrackerResult<RewriteSummary> {
        let index = self.position(name)?;
        self.exercises[index].secondary_muscles = muscles;
        self.persist(true, false)
    }

    /// Replaces the type of an exercise.
    pub fn set_exercise_type(&mut self, name: &str, kind: &str) -> TrackerResult<RewriteSummary> {
        let index = self.position(name)?;
        self.exercises[index].kind = kind.to_string();
        self.persist(true, false)
    }

    fn position(&self, name: &str) -> TrackerResult<usize> {
        self.exercises
            .iter()
            .position(|e| e.name == name)
            .ok_or_else(|| TrackerError::UnknownExercise(name.to_string()))
    }

    /// Rewrites the requested files from memory.
    ///
    /// Both rewrites are attempted even if the first fails; the first
    /// failure is returned.
    fn persist(&mut self, exercises: bool, sets: bool) -> TrackerResult<RewriteSummary> {
        let mut summary = RewriteSummary::default();
        let mut first_error = None;

        if exercises {
            match rewrite(&self.paths.exercises, &self.exercises) {
                Ok(report) => {
                    summary.exercises = report;
                    self.damaged.exercises = false;
                }
                Err(e) => first_error = Some(e),
            }
        }
        if sets {
            match rewrite(&self.paths.sets, &self.sets) {
                Ok(report) => {
                    summary.sets = report;
                    self.damaged.sets = false;
                }
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e.into()),
            None => Ok(summary),
        }
    }
}

/// Decodes one data file. The flag is set when the file could not be read
/// to the end and must be rewritten before anything is appended to it.
fn load<R: Record>(path: &Path) -> (Vec<R>, bool) {
    let decoded: Decoded<R> = match codec::decode_prefix(path) {
        Ok(decoded) => decoded,
        Err(e) => {
            tracing::error!(
                path = %path.display(),
                record = R::SCHEMA.record_name,
                code = e.code(),
                error = %e,
                "unable to read tracking data, starting empty"
            );
            return (Vec::new(), false);
        }
    };

    if let Some(e) = &decoded.error {
        tracing::error!(
            path = %path.display(),
            record = R::SCHEMA.record_name,
            code = e.code(),
            error = %e,
            kept = decoded.records.len(),
            "tracking data damaged, keeping records read before the error"
        );
    } else if decoded.partial_tail {
        tracing::warn!(
            path = %path.display(),
            record = R::SCHEMA.record_name,
            "data file ends inside a record, it will be rewritten on the next change"
        );
    }

    let damaged = !decoded.is_clean();
    (decoded.records, damaged)
}

fn rewrite<R: Record>(path: &Path, records: &[R]) -> codec::CodecResult<RewriteReport> {
    let report = codec::rewrite(path, records)?;
    if let Err(e) = report.check() {
        tracing::warn!(
            path = %path.display(),
            record = R::SCHEMA.record_name,
            code = e.code(),
            error = %e,
            "records lost during rewrite"
        );
    }
    Ok(report)
}
