mod commands;
mod config;
mod logging;

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{
    Store, cmd_dashboard, cmd_export, cmd_import, cmd_meal_add, cmd_meal_delete, cmd_meal_edit,
    cmd_meal_list, cmd_note_add, cmd_note_delete, cmd_note_edit, cmd_note_list, cmd_reset,
    cmd_settings_profile, cmd_settings_set, cmd_settings_show, cmd_workout_add,
    cmd_workout_delete, cmd_workout_list, cmd_workout_toggle,
};
use crate::config::Config;
use fitlife_core::{AppStore, SqliteStorage, StoreError};

#[derive(Parser)]
#[command(
    name = "fitlife",
    version,
    about = "Track workouts, meals, and notes locally",
    long_about = "\n\n  ███████╗██╗████████╗██╗     ██╗███████╗███████╗
  ██╔════╝██║╚══██╔══╝██║     ██║██╔════╝██╔════╝
  █████╗  ██║   ██║   ██║     ██║█████╗  █████╗
  ██╔══╝  ██║   ██║   ██║     ██║██╔══╝  ██╔══╝
  ██║     ██║   ██║   ███████╗██║██║     ███████╗
  ╚═╝     ╚═╝   ╚═╝   ╚══════╝╚═╝╚═╝     ╚══════╝
        train, eat, write it down.
"
)]
struct Cli {
    /// Directory holding fitlife.db (default: platform data dir, or $FITLIFE_DATA_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,
    /// Log store activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show completed workouts, calories, and a motivational tip
    Dashboard {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage exercises
    Workout {
        #[command(subcommand)]
        command: WorkoutCommands,
    },
    /// Log and review meals
    Meal {
        #[command(subcommand)]
        command: MealCommands,
    },
    /// Keep training and nutrition notes
    Note {
        #[command(subcommand)]
        command: NoteCommands,
    },
    /// View and change settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
    /// Write all data to fitlife-backup-<date>.json
    Export {
        /// Directory to write the backup into (default: current directory)
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,
        /// Print the document to stdout instead of writing a file
        #[arg(long, conflicts_with = "out")]
        stdout: bool,
    },
    /// Replace data from a backup file
    Import {
        /// Path to a backup JSON file
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete all stored data (cannot be undone)
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum WorkoutCommands {
    /// List exercises
    List {
        /// Only show one category: legs, arms, core, other
        #[arg(short, long)]
        category: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add an exercise
    Add {
        /// Exercise name
        name: String,
        /// Number of sets
        #[arg(long, default_value = "3")]
        sets: u32,
        /// Reps per set
        #[arg(long, default_value = "10")]
        reps: u32,
        /// Category: legs, arms, core, other
        #[arg(short, long, default_value = "other")]
        category: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark an exercise done, or not done
    Toggle {
        /// Exercise ID
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete an exercise
    Delete {
        /// Exercise ID
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum MealCommands {
    /// List meals with the calorie summary
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Log a meal
    Add {
        /// Food name
        food: String,
        /// Portion description (e.g. "1 bowl")
        portion: String,
        /// Calories
        calories: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change a logged meal
    Edit {
        /// Meal ID
        id: i64,
        /// New food name
        #[arg(long)]
        food: Option<String>,
        /// New portion
        #[arg(long)]
        portion: Option<String>,
        /// New calories
        #[arg(long)]
        calories: Option<u32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a meal
    Delete {
        /// Meal ID
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum NoteCommands {
    /// List notes
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a note
    Add {
        /// Note title
        title: String,
        /// Note body
        #[arg(long, default_value = "")]
        content: String,
        /// Category (e.g. workout, nutrition)
        #[arg(short, long, default_value = "general")]
        category: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change a note
    Edit {
        /// Note ID
        id: i64,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New body
        #[arg(long)]
        content: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a note
    Delete {
        /// Note ID
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum SettingsCommands {
    /// Show all settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change a setting (calorieGoal, units, motivationalQuotes, theme, fontSize,
    /// accentColor, workoutReminders, nutritionReminders, progressUpdates)
    Set {
        key: String,
        value: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change a profile field (name, email, age, weight, height)
    Profile {
        field: String,
        value: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(cli) {
        if let Some(store_err) = e.downcast_ref::<StoreError>() {
            if store_err.is_lost_write() {
                eprintln!(
                    "Warning: unable to save data. Storage may be disabled or full; the change was not kept."
                );
            }
        }
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn open_store(config: &Config) -> Result<Store> {
    let storage = SqliteStorage::open(&config.db_path)?;
    let (store, report) = AppStore::initialize(storage);
    tracing::info!(
        event = "cli.store.opened",
        data_dir = %config.data_dir.display(),
        defaulted = report.substitutions.len()
    );
    Ok(store)
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.data_dir)?;
    let mut store = open_store(&config)?;
    let store = &mut store;

    match cli.command {
        Commands::Dashboard { json } => cmd_dashboard(store, json),
        Commands::Workout { command } => match command {
            WorkoutCommands::List { category, json } => {
                cmd_workout_list(store, category.as_deref(), json)
            }
            WorkoutCommands::Add {
                name,
                sets,
                reps,
                category,
                json,
            } => cmd_workout_add(store, name, sets, reps, &category, json),
            WorkoutCommands::Toggle { id, json } => cmd_workout_toggle(store, id, json),
            WorkoutCommands::Delete { id, json } => cmd_workout_delete(store, id, json),
        },
        Commands::Meal { command } => match command {
            MealCommands::List { json } => cmd_meal_list(store, json),
            MealCommands::Add {
                food,
                portion,
                calories,
                json,
            } => cmd_meal_add(store, food, portion, calories, json),
            MealCommands::Edit {
                id,
                food,
                portion,
                calories,
                json,
            } => cmd_meal_edit(store, id, food, portion, calories, json),
            MealCommands::Delete { id, json } => cmd_meal_delete(store, id, json),
        },
        Commands::Note { command } => match command {
            NoteCommands::List { json } => cmd_note_list(store, json),
            NoteCommands::Add {
                title,
                content,
                category,
                json,
            } => cmd_note_add(store, title, content, category, json),
            NoteCommands::Edit {
                id,
                title,
                content,
                category,
                json,
            } => cmd_note_edit(store, id, title, content, category, json),
            NoteCommands::Delete { id, yes, json } => cmd_note_delete(store, id, yes, json),
        },
        Commands::Settings { command } => match command {
            SettingsCommands::Show { json } => cmd_settings_show(store, json),
            SettingsCommands::Set { key, value, json } => {
                cmd_settings_set(store, &key, &value, json)
            }
            SettingsCommands::Profile { field, value, json } => {
                cmd_settings_profile(store, &field, &value, json)
            }
        },
        Commands::Export { out, stdout } => cmd_export(store, out.as_deref(), stdout),
        Commands::Import { file, json } => cmd_import(store, &file, json),
        Commands::Reset { yes } => cmd_reset(store, yes),
    }
}
