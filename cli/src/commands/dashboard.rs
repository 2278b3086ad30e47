use anyhow::Result;
use rand::seq::IndexedRandom;

use fitlife_core::views::MOTIVATIONAL_QUOTES;

use super::Store;

pub(crate) fn cmd_dashboard(store: &Store, json: bool) -> Result<()> {
    let stats = store.dashboard_stats();
    let calories = store.calorie_summary();
    let quote = if store.settings().motivational_quotes {
        MOTIVATIONAL_QUOTES.as_slice().choose(&mut rand::rng()).copied()
    } else {
        None
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "stats": stats,
                "calories": calories,
                "tip": quote,
            }))?
        );
        return Ok(());
    }

    let name = &store.settings().profile.name;
    println!("=== Hi, {name} ===\n");

    let done = stats.completed_workouts;
    let total = stats.total_workouts;
    println!("  Workouts completed: {done}/{total}");

    let consumed = calories.consumed;
    let goal = calories.goal;
    let pct = calories.rounded_percentage();
    let remaining = calories.remaining();
    println!("  Calories: {consumed} / {goal} kcal ({pct}%), {remaining} left");

    if let Some(quote) = quote {
        println!("\n  \"{quote}\"");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_store;
    use fitlife_core::models::SettingUpdate;

    #[test]
    fn test_dashboard_with_and_without_quotes() {
        let mut store = test_store();
        cmd_dashboard(&store, false).unwrap();
        store
            .update_setting(SettingUpdate::MotivationalQuotes(false))
            .unwrap();
        cmd_dashboard(&store, true).unwrap();
    }
}
