use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::process;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use fitlife_core::models::{Meal, Note, Workout};
use fitlife_core::views::note_preview;

/// Ask a yes/no question on stderr and read the answer from stdin.
pub(crate) fn confirm(question: &str) -> Result<bool> {
    eprint!("{question} [y/N]: ");
    io::stderr().flush()?;
    read_confirmation(io::stdin().lock())
}

pub(crate) fn read_confirmation(input: impl BufRead) -> Result<bool> {
    let line = input.lines().next().context("No input")??;
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Report a missing record the way every command does and exit with status 2.
pub(crate) fn not_found(kind: &str, id: i64, json: bool) -> ! {
    if json {
        println!("{}", json_error(&format!("{kind} {id} not found")));
    } else {
        eprintln!("{kind} {id} not found");
    }
    process::exit(2);
}

pub(crate) fn print_workout_table(workouts: &[&Workout]) {
    #[derive(Tabled)]
    struct WorkoutRow {
        #[tabled(rename = "ID")]
        id: i64,
        #[tabled(rename = "Done")]
        done: &'static str,
        #[tabled(rename = "Exercise")]
        name: String,
        #[tabled(rename = "Sets")]
        sets: u32,
        #[tabled(rename = "Reps")]
        reps: u32,
        #[tabled(rename = "Category")]
        category: &'static str,
    }

    let rows: Vec<WorkoutRow> = workouts
        .iter()
        .map(|w| WorkoutRow {
            id: w.id,
            done: if w.completed { "x" } else { "" },
            name: truncate(&w.name, 35),
            sets: w.sets,
            reps: w.reps,
            category: w.category.as_str(),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(3..5)).with(Alignment::right()))
        .to_string();
    println!("{table}");
}

pub(crate) fn print_meal_table(meals: &[Meal]) {
    #[derive(Tabled)]
    struct MealRow {
        #[tabled(rename = "ID")]
        id: i64,
        #[tabled(rename = "Food")]
        food: String,
        #[tabled(rename = "Portion")]
        portion: String,
        #[tabled(rename = "kcal")]
        calories: u32,
        #[tabled(rename = "Logged")]
        logged: String,
    }

    let rows: Vec<MealRow> = meals
        .iter()
        .map(|m| MealRow {
            id: m.id,
            food: truncate(&m.food, 35),
            portion: truncate(&m.portion, 20),
            calories: m.calories,
            logged: m
                .timestamp
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string(),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(3..4)).with(Alignment::right()))
        .to_string();
    println!("{table}");
}

pub(crate) fn print_note(note: &Note) {
    let id = note.id;
    let title = &note.title;
    let category = &note.category;
    println!("[{id}] {title} ({category})");
    let preview = note_preview(&note.content);
    if !preview.is_empty() {
        println!("    {preview}");
    }
}

pub(crate) fn json_error(message: &str) -> String {
    #[derive(Serialize)]
    struct CliError<'a> {
        error: &'a str,
    }
    serde_json::to_string(&CliError { error: message })
        .unwrap_or_else(|_| format!("{{\"error\":\"{message}\"}}"))
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let end = s.char_indices().nth(max - 3).map_or(s.len(), |(i, _)| i);
        format!("{}...", &s[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_confirmation() {
        assert!(read_confirmation("y\n".as_bytes()).unwrap());
        assert!(read_confirmation(" YES \n".as_bytes()).unwrap());
        assert!(!read_confirmation("n\n".as_bytes()).unwrap());
        assert!(!read_confirmation("\n".as_bytes()).unwrap());
    }

    #[test]
    fn test_read_confirmation_no_input() {
        assert!(read_confirmation("".as_bytes()).is_err());
    }

    #[test]
    fn test_json_error() {
        assert_eq!(json_error("Meal 4 not found"), r#"{"error":"Meal 4 not found"}"#);
        assert_eq!(json_error("say \"hi\""), r#"{"error":"say \"hi\""}"#);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world this is long", 10), "hello w...");
    }

    #[test]
    fn test_truncate_utf8() {
        assert_eq!(truncate("Crème fraîche", 10), "Crème f...");
        assert_eq!(truncate("Müsli", 10), "Müsli");
    }
}
