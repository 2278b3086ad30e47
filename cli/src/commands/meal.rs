use anyhow::{Result, bail};

use fitlife_core::models::{MealEdit, NewMeal};

use super::Store;
use super::helpers::{not_found, print_meal_table};

pub(crate) fn cmd_meal_list(store: &Store, json: bool) -> Result<()> {
    let summary = store.calorie_summary();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "meals": store.meals(),
                "summary": summary,
            }))?
        );
        return Ok(());
    }

    if store.meals().is_empty() {
        eprintln!("No meals logged");
    } else {
        print_meal_table(store.meals());
    }

    let consumed = summary.consumed;
    let goal = summary.goal;
    let pct = summary.rounded_percentage();
    println!("  {consumed} / {goal} kcal");
    println!("  You've consumed {pct}% of your daily calorie goal.");
    Ok(())
}

pub(crate) fn cmd_meal_add(
    store: &mut Store,
    food: String,
    portion: String,
    calories: u32,
    json: bool,
) -> Result<()> {
    if food.trim().is_empty() {
        bail!("Food name cannot be empty");
    }
    let meal = store.add_meal(NewMeal {
        food,
        portion,
        calories,
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&meal)?);
    } else {
        let id = meal.id;
        let food = &meal.food;
        let portion = &meal.portion;
        let cal = meal.calories;
        let pct = store.calorie_summary().rounded_percentage();
        println!("Logged [{id}] {food} ({portion}) — {cal} kcal, {pct}% of goal");
    }
    Ok(())
}

pub(crate) fn cmd_meal_edit(
    store: &mut Store,
    id: i64,
    food: Option<String>,
    portion: Option<String>,
    calories: Option<u32>,
    json: bool,
) -> Result<()> {
    let edit = MealEdit {
        food,
        portion,
        calories,
    };
    if edit.is_empty() {
        bail!("Nothing to update. Provide at least one of --food, --portion, or --calories");
    }

    let Some(meal) = store.edit_meal(id, edit)? else {
        not_found("Meal", id, json);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&meal)?);
    } else {
        let food = &meal.food;
        let portion = &meal.portion;
        let cal = meal.calories;
        println!("Updated meal {id}: {food} ({portion}) — {cal} kcal");
    }
    Ok(())
}

pub(crate) fn cmd_meal_delete(store: &mut Store, id: i64, json: bool) -> Result<()> {
    if !store.delete_meal(id)? {
        not_found("Meal", id, json);
    }

    if json {
        println!("{}", serde_json::json!({ "deleted": id }));
    } else {
        println!("Deleted meal {id}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_store;

    #[test]
    fn test_add_edit_delete_meal() {
        let mut store = test_store();
        cmd_meal_add(
            &mut store,
            "Oatmeal".to_string(),
            "1 bowl".to_string(),
            300,
            false,
        )
        .unwrap();
        let meal = store.meals().last().unwrap().clone();
        assert_eq!(store.calorie_summary().consumed, 905);

        cmd_meal_edit(&mut store, meal.id, None, None, Some(250), true).unwrap();
        let edited = store.meals().last().unwrap();
        assert_eq!(edited.id, meal.id);
        assert_eq!(edited.calories, 250);
        assert_eq!(edited.timestamp, meal.timestamp);

        cmd_meal_delete(&mut store, meal.id, false).unwrap();
        assert_eq!(store.meals().len(), 3);
    }

    #[test]
    fn test_edit_requires_a_field() {
        let mut store = test_store();
        assert!(cmd_meal_edit(&mut store, 1, None, None, None, false).is_err());
    }

    #[test]
    fn test_add_rejects_blank_food() {
        let mut store = test_store();
        assert!(cmd_meal_add(&mut store, "  ".to_string(), "1".to_string(), 10, false).is_err());
        assert_eq!(store.meals().len(), 3);
    }
}
