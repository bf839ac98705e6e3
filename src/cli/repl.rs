//! Interactive command session
//!
//! Reads commands line by line and writes responses to any
//! `BufRead`/`Write` pair, so the same loop serves stdin/stdout and tests.
//! End of input ends the session like `quit`.

use std::io::{BufRead, Write};

use crate::records::format_weight;
use crate::tracker::{RewriteSummary, Tracker, TrackerError};

use super::commands::{
    parse_command, parse_exercise, parse_list, parse_set, Command, ExerciseAttribute, COMMANDS,
};
use super::errors::{CliError, CliResult};

const EXERCISE_PROMPTS: &[&str] = &[
    "name: ",
    "primary muscles (muscle 1, muscle 2, ...): ",
    "secondary muscles (muscle 1, muscle 2, ...): ",
    "type: ",
];

const SET_PROMPTS: &[&str] = &["date: ", "exercise: ", "weight: ", "reps: "];

pub const WELCOME: &str = "Welcome to GymTracker. Type \"help\" to see commands.";

/// Whether the session keeps reading after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// A command session over one tracker.
pub struct Session<'t, R, W> {
    tracker: &'t mut Tracker,
    input: R,
    output: W,
}

impl<'t, R: BufRead, W: Write> Session<'t, R, W> {
    pub fn new(tracker: &'t mut Tracker, input: R, output: W) -> Self {
        Self {
            tracker,
            input,
            output,
        }
    }

    /// Runs until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Only terminal I/O failures end the session with an error; every
    /// command failure is reported to the user and the loop continues.
    pub fn run(&mut self) -> CliResult<()> {
        writeln!(self.output, "{}", WELCOME)?;

        while let Some(line) = self.read_line()? {
            let flow = match parse_command(&line) {
                Ok(command) => self.execute(command)?,
                Err(CliError::Usage(msg)) => {
                    writeln!(self.output, "{}", msg)?;
                    Flow::Continue
                }
                Err(e) => return Err(e),
            };
            if flow == Flow::Quit {
                break;
            }
        }

        self.output.flush()?;
        Ok(())
    }

    fn execute(&mut self, command: Command) -> CliResult<Flow> {
        match command {
            Command::Empty => {}
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => {
                for line in COMMANDS {
                    writeln!(self.output, "{}", line)?;
                }
            }
            Command::AddExercise(inline) => return self.add_exercise(inline),
            Command::AddSet(inline) => return self.add_set(inline),
            Command::PrintExercises => self.print_exercises()?,
            Command::PrintExercise(name) => self.print_exercise(&name)?,
            Command::PrintSets => self.print_sets()?,
            Command::PrintSetsForDate(date) => self.print_sets_for_date(&date)?,
            Command::ClearExercises => {
                let result = self.tracker.clear_exercises();
                self.report_clear(result)?;
            }
            Command::ClearSets => {
                let result = self.tracker.clear_sets();
                self.report_clear(result)?;
            }
            Command::DeleteExercise(name) => {
                let result = self.tracker.delete_exercise(&name);
                self.report_rewrite(
                    result,
                    "Exercise deleted successfully.",
                    "Failed to delete exercise.",
                )?;
            }
            Command::DeleteLastSet => {
                let result = self.tracker.delete_last_set();
                self.report_rewrite(result, "Set deleted successfully.", "Failed to delete set.")?;
            }
            Command::ModifyExercise(attribute) => return self.modify_exercise(attribute),
        }
        Ok(Flow::Continue)
    }

    fn add_exercise(&mut self, inline: Option<String>) -> CliResult<Flow> {
        let Some(raw) = self.inline_or_prompted(inline, EXERCISE_PROMPTS)? else {
            return Ok(Flow::Quit);
        };

        match parse_exercise(&raw) {
            Ok(exercise) => match self.tracker.add_exercise(exercise) {
                Ok(()) => writeln!(self.output, "Exercise added successfully.")?,
                Err(e) => self.report_failure(e, "Failed to add exercise.")?,
            },
            Err(e) => writeln!(self.output, "{}", e)?,
        }
        Ok(Flow::Continue)
    }

    fn add_set(&mut self, inline: Option<String>) -> CliResult<Flow> {
        let Some(raw) = self.inline_or_prompted(inline, SET_PROMPTS)? else {
            return Ok(Flow::Quit);
        };

        match parse_set(&raw) {
            Ok(set) => match self.tracker.add_set(set) {
                Ok(()) => writeln!(self.output, "Set added successfully.")?,
                Err(e) => self.report_failure(e, "Failed to add set.")?,
            },
            Err(e) => writeln!(self.output, "{}", e)?,
        }
        Ok(Flow::Continue)
    }

    fn print_exercises(&mut self) -> CliResult<()> {
        if self.tracker.exercises().is_empty() {
            writeln!(self.output, "No exercises to print.")?;
        }
        for exercise in self.tracker.exercises() {
            writeln!(self.output, "{}", exercise)?;
        }
        Ok(())
    }

    fn print_exercise(&mut self, name: &str) -> CliResult<()> {
        let Some(exercise) = self.tracker.exercise(name) else {
            writeln!(self.output, "No such exercise.")?;
            return Ok(());
        };

        writeln!(self.output, "name: {}", exercise.name)?;
        writeln!(
            self.output,
            "primary muscles:{}",
            spaced(&exercise.primary_muscles)
        )?;
        writeln!(
            self.output,
            "secondary muscles:{}",
            spaced(&exercise.secondary_muscles)
        )?;
        writeln!(self.output, "type: {}", exercise.kind)?;
        Ok(())
    }

    fn print_sets(&mut self) -> CliResult<()> {
        if self.tracker.sets().is_empty() {
            writeln!(self.output, "No sets to print.")?;
        }
        for set in self.tracker.sets() {
            writeln!(self.output, "{}", set)?;
        }
        Ok(())
    }

    fn print_sets_for_date(&mut self, date: &str) -> CliResult<()> {
        let mut any = false;
        for set in self.tracker.sets_on(date) {
            any = true;
            writeln!(
                self.output,
                "{}, {} kg, {} reps",
                set.exercise,
                format_weight(set.weight),
                set.reps
            )?;
        }
        if !any {
            writeln!(self.output, "No exercises for given date.")?;
        }
        Ok(())
    }

    fn modify_exercise(&mut self, attribute: ExerciseAttribute) -> CliResult<Flow> {
        let Some(target) = self.prompt("Exercise to modify: ")? else {
            return Ok(Flow::Quit);
        };
        let value_prompt = match attribute {
            ExerciseAttribute::Name => "New name: ",
            ExerciseAttribute::PrimaryMuscles | ExerciseAttribute::SecondaryMuscles => {
                "New muscles: "
            }
            ExerciseAttribute::Type => "New type: ",
        };
        let Some(value) = self.prompt(value_prompt)? else {
            return Ok(Flow::Quit);
        };
        let target = target.trim();
        let value = value.trim();

        let result = match attribute {
            ExerciseAttribute::Name if value.is_empty() => {
                writeln!(self.output, "Name must not be empty.")?;
                return Ok(Flow::Continue);
            }
            ExerciseAttribute::Name => self.tracker.rename_exercise(target, value),
            ExerciseAttribute::PrimaryMuscles => {
                self.tracker.set_primary_muscles(target, parse_list(value))
            }
            ExerciseAttribute::SecondaryMuscles => {
                self.tracker.set_secondary_muscles(target, parse_list(value))
            }
            ExerciseAttribute::Type => self.tracker.set_exercise_type(target, value),
        };

        self.report_rewrite(
            result,
            "Modifying exercise successful.",
            "Modifying exercise failed.",
        )?;
        Ok(Flow::Continue)
    }

    /// Uses the inline arguments, or prompts for each field and joins the
    /// answers with `;`. `None` means input ended mid-prompt.
    fn inline_or_prompted(
        &mut self,
        inline: Option<String>,
        prompts: &[&str],
    ) -> CliResult<Option<String>> {
        if let Some(raw) = inline {
            return Ok(Some(raw));
        }

        let mut answers = Vec::with_capacity(prompts.len());
        for prompt in prompts {
            match self.prompt(prompt)? {
                Some(answer) => answers.push(answer),
                None => return Ok(None),
            }
        }
        Ok(Some(answers.join(";")))
    }

    fn prompt(&mut self, text: &str) -> CliResult<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        self.read_line()
    }

    fn read_line(&mut self) -> CliResult<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Rejections leave everything untouched. Any other error means the
    /// change was made in memory but not saved.
    fn report_failure(&mut self, err: TrackerError, failed: &str) -> CliResult<()> {
        if err.is_rejection() {
            writeln!(self.output, "{}", err)?;
            writeln!(self.output, "{}", failed)?;
        } else {
            tracing::warn!(code = err.code(), error = %err, "persisting change failed");
            writeln!(
                self.output,
                "Change kept for this session but not saved: {}",
                err
            )?;
        }
        Ok(())
    }

    fn report_rewrite(
        &mut self,
        result: Result<RewriteSummary, TrackerError>,
        succeeded: &str,
        failed: &str,
    ) -> CliResult<()> {
        match result {
            Ok(summary) => {
                if summary.exercises.lost > 0 {
                    writeln!(
                        self.output,
                        "{} exercises lost during operation.",
                        summary.exercises.lost
                    )?;
                }
                if summary.sets.lost > 0 {
                    writeln!(self.output, "{} sets lost during operation.", summary.sets.lost)?;
                }
                writeln!(self.output, "{}", succeeded)?;
                Ok(())
            }
            Err(e) => self.report_failure(e, failed),
        }
    }

    fn report_clear(&mut self, result: Result<(), TrackerError>) -> CliResult<()> {
        match result {
            Ok(()) => Ok(()),
            Err(e) => self.report_failure(e, "Unable to clear file."),
        }
    }
}

/// Each item preceded by a space, so an empty list prints nothing.
fn spaced(items: &[String]) -> String {
    items.iter().map(|item| format!(" {}", item)).collect()
}
