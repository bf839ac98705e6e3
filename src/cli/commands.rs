//! Text command parsing
//!
//! One command per input line, words separated by whitespace. Inline
//! record arguments use `;` between fields and `,` between list items:
//!
//! ```text
//! add exercise Bench Press;chest;triceps,shoulders;push
//! add set 2024-05-01;Bench Press;82.5;5
//! ```

use crate::records::{Exercise, TrainingSet};

use super::errors::{CliError, CliResult};

/// Help text, one line per command
pub const COMMANDS: &[&str] = &[
    "add exercise: add exercise with prompts",
    "add exercise <name>;<primary muscles>;<secondary muscles>;<type>: add exercise without prompts",
    "add set: add set with prompts",
    "add set <date>;<exercise>;<weight>;<reps>: add set without prompts",
    "print exercises: print all exercises",
    "print exercises <name>: print one exercise",
    "print sets: print all sets",
    "print sets date <date>: print sets for date",
    "clear exercises: clear all exercises and their sets",
    "clear sets: clear all sets",
    "delete exercise <name>: delete exercise with given name and its sets",
    "delete set: delete set that was added last",
    "modify exercise name: modify exercise name with prompts",
    "modify exercise primary: modify exercise primary muscles with prompts",
    "modify exercise secondary: modify exercise secondary muscles with prompts",
    "modify exercise type: modify exercise type with prompts",
    "quit: exit the program",
    "help: see these instructions",
];

/// Exercise attribute targeted by `modify exercise`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseAttribute {
    Name,
    PrimaryMuscles,
    SecondaryMuscles,
    Type,
}

/// A parsed user command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank line
    Empty,
    Help,
    Quit,
    /// Inline `;`-separated fields, or `None` to prompt
    AddExercise(Option<String>),
    AddSet(Option<String>),
    PrintExercises,
    PrintExercise(String),
    PrintSets,
    PrintSetsForDate(String),
    ClearExercises,
    ClearSets,
    DeleteExercise(String),
    DeleteLastSet,
    ModifyExercise(ExerciseAttribute),
}

/// Parses one input line.
///
/// # Errors
///
/// Returns `CliError::Usage` with a message for the user.
pub fn parse_command(line: &str) -> CliResult<Command> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&operation, args)) = words.split_first() else {
        return Ok(Command::Empty);
    };

    match operation {
        "quit" => Ok(Command::Quit),
        "help" => Ok(Command::Help),
        "add" => parse_add(args),
        "print" => parse_print(args),
        "clear" => parse_clear(args),
        "delete" => parse_delete(args),
        "modify" => parse_modify(args),
        _ => Err(CliError::usage("Incorrect command.")),
    }
}

fn parse_add(args: &[&str]) -> CliResult<Command> {
    let Some((&target, rest)) = args.split_first() else {
        return Err(CliError::usage("Too few arguments for add operation."));
    };
    let inline = if rest.is_empty() {
        None
    } else {
        Some(rest.join(" "))
    };

    match target {
        "exercise" => Ok(Command::AddExercise(inline)),
        "set" => Ok(Command::AddSet(inline)),
        _ => Err(CliError::usage("Add is only possible for exercise or set.")),
    }
}

fn parse_print(args: &[&str]) -> CliResult<Command> {
    match args {
        [] => Err(CliError::usage("Too few arguments for print operation.")),
        ["exercises"] => Ok(Command::PrintExercises),
        ["exercises", name @ ..] => Ok(Command::PrintExercise(name.join(" "))),
        ["sets"] => Ok(Command::PrintSets),
        ["sets", "date"] => Err(CliError::usage("Please specify a date.")),
        ["sets", "date", date] => Ok(Command::PrintSetsForDate(date.to_string())),
        ["sets", "date", ..] => Err(CliError::usage("Date should be a single argument.")),
        ["sets", ..] => Err(CliError::usage("Incorrect format for print sets operation.")),
        _ => Err(CliError::usage("Print is only possible for exercises or sets.")),
    }
}

fn parse_clear(args: &[&str]) -> CliResult<Command> {
    match args {
        [] => Err(CliError::usage("Too few arguments for clear operation.")),
        ["exercises"] => Ok(Command::ClearExercises),
        ["sets"] => Ok(Command::ClearSets),
        [_] => Err(CliError::usage("Clear is only possible for exercises or sets.")),
        _ => Err(CliError::usage("Too many arguments for clear operation.")),
    }
}

fn parse_delete(args: &[&str]) -> CliResult<Command> {
    match args {
        [] => Err(CliError::usage("Too few arguments for delete operation.")),
        ["exercise"] => Err(CliError::usage(
            "Too few arguments for delete exercise operation.",
        )),
        ["exercise", name @ ..] => Ok(Command::DeleteExercise(name.join(" "))),
        ["set"] => Ok(Command::DeleteLastSet),
        ["set", ..] => Err(CliError::usage(
            "Too many arguments for delete set operation.",
        )),
        _ => Err(CliError::usage("Delete is only possible for exercise or set.")),
    }
}

fn parse_modify(args: &[&str]) -> CliResult<Command> {
    match args {
        [] | [_] => Err(CliError::usage("Too few arguments for modify operation.")),
        ["exercise", attribute] => {
            let attribute = match *attribute {
                "name" => ExerciseAttribute::Name,
                "primary" => ExerciseAttribute::PrimaryMuscles,
                "secondary" => ExerciseAttribute::SecondaryMuscles,
                "type" => ExerciseAttribute::Type,
                _ => {
                    return Err(CliError::usage(
                        "Possible arguments for modify exercise are name, primary, secondary and type.",
                    ))
                }
            };
            Ok(Command::ModifyExercise(attribute))
        }
        [_, _] => Err(CliError::usage("Modify is only possible for exercise.")),
        _ => Err(CliError::usage("Too many arguments for modify operation.")),
    }
}

/// Splits a comma-separated list, trimming items and dropping empty ones.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn split_fields(raw: &str) -> Option<[&str; 4]> {
    let fields: Vec<&str> = raw.split(';').map(str::trim).collect();
    fields.try_into().ok()
}

/// Builds an exercise from `<name>;<primary>;<secondary>;<type>`.
pub fn parse_exercise(raw: &str) -> CliResult<Exercise> {
    let invalid = || CliError::usage("Incorrect format for exercise.");
    let [name, primary, secondary, kind] = split_fields(raw).ok_or_else(invalid)?;
    if name.is_empty() {
        return Err(invalid());
    }

    Ok(Exercise::new(
        name,
        parse_list(primary),
        parse_list(secondary),
        kind,
    ))
}

/// Builds a set from `<date>;<exercise>;<weight>;<reps>`.
pub fn parse_set(raw: &str) -> CliResult<TrainingSet> {
    let invalid = || CliError::usage("Incorrect format for set.");
    let [date, exercise, weight, reps] = split_fields(raw).ok_or_else(invalid)?;

    let weight: f64 = weight.parse().map_err(|_| invalid())?;
    let reps: i64 = reps.parse().map_err(|_| invalid())?;
    if date.is_empty() || !weight.is_finite() {
        return Err(invalid());
    }

    Ok(TrainingSet::new(date, exercise, weight, reps))
}
