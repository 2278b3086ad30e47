use anyhow::{Result, bail};

use fitlife_core::models::{NewWorkout, WorkoutCategory};

use super::Store;
use super::helpers::{not_found, print_workout_table};

pub(crate) fn cmd_workout_list(store: &Store, category: Option<&str>, json: bool) -> Result<()> {
    let category = match category {
        Some(label) => match WorkoutCategory::from_label(label) {
            Some(c) => Some(c),
            None => {
                let valid: Vec<&str> = WorkoutCategory::ALL.iter().map(|c| c.as_str()).collect();
                bail!("Unknown category '{label}'. Valid: {}", valid.join(", "));
            }
        },
        None => None,
    };
    let workouts = store.workouts_in(category);

    if json {
        println!("{}", serde_json::to_string_pretty(&workouts)?);
        return Ok(());
    }

    if workouts.is_empty() {
        match category {
            Some(c) => eprintln!("No {c} exercises"),
            None => eprintln!("No exercises"),
        }
        return Ok(());
    }

    print_workout_table(&workouts);
    let done = workouts.iter().filter(|w| w.completed).count();
    let total = workouts.len();
    println!("  {done}/{total} completed");
    Ok(())
}

pub(crate) fn cmd_workout_add(
    store: &mut Store,
    name: String,
    sets: u32,
    reps: u32,
    category: &str,
    json: bool,
) -> Result<()> {
    let workout = store.add_workout(NewWorkout {
        name,
        sets,
        reps,
        category: WorkoutCategory::from(category),
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&workout)?);
    } else {
        let id = workout.id;
        let name = &workout.name;
        let (sets, reps) = (workout.sets, workout.reps);
        let category = workout.category;
        println!("Added [{id}] {name}: {sets} sets of {reps} reps ({category})");
    }
    Ok(())
}

pub(crate) fn cmd_workout_toggle(store: &mut Store, id: i64, json: bool) -> Result<()> {
    let Some(completed) = store.toggle_workout_complete(id)? else {
        not_found("Exercise", id, json);
    };

    if json {
        println!(
            "{}",
            serde_json::json!({ "id": id, "completed": completed })
        );
    } else if completed {
        println!("Exercise {id} marked done");
    } else {
        println!("Exercise {id} marked not done");
    }
    Ok(())
}

pub(crate) fn cmd_workout_delete(store: &mut Store, id: i64, json: bool) -> Result<()> {
    if !store.delete_workout(id)? {
        not_found("Exercise", id, json);
    }

    if json {
        println!("{}", serde_json::json!({ "deleted": id }));
    } else {
        println!("Deleted exercise {id}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_store;

    #[test]
    fn test_add_then_toggle_and_delete() {
        let mut store = test_store();
        cmd_workout_add(&mut store, "Plank".to_string(), 3, 60, "core", false).unwrap();

        let plank = store.workouts().last().unwrap().clone();
        assert_eq!(plank.name, "Plank");
        assert_eq!(plank.icon, "self_improvement");

        cmd_workout_toggle(&mut store, plank.id, true).unwrap();
        assert!(store.workouts().last().unwrap().completed);

        cmd_workout_delete(&mut store, plank.id, false).unwrap();
        assert_eq!(store.workouts().len(), 5);
    }

    #[test]
    fn test_list_filters_by_category() {
        let store = test_store();
        cmd_workout_list(&store, Some("legs"), true).unwrap();
        cmd_workout_list(&store, Some("other"), false).unwrap();
        cmd_workout_list(&store, None, false).unwrap();
    }

    #[test]
    fn test_list_rejects_unknown_category() {
        let store = test_store();
        let err = cmd_workout_list(&store, Some("cardio"), false).unwrap_err();
        assert!(err.to_string().contains("legs, arms, core, other"));
        cmd_workout_list(&store, Some("ARMS"), true).unwrap();
    }
}
