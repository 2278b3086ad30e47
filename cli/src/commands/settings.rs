use anyhow::Result;

use fitlife_core::models::{ProfileUpdate, SettingUpdate};

use super::Store;

pub(crate) fn cmd_settings_show(store: &Store, json: bool) -> Result<()> {
    let s = store.settings();

    if json {
        println!("{}", serde_json::to_string_pretty(s)?);
        return Ok(());
    }

    let on_off = |b: bool| if b { "on" } else { "off" };
    println!("=== Settings ===\n");
    println!("  calorieGoal         {}", s.calorie_goal);
    println!("  units               {}", s.units.as_str());
    println!("  motivationalQuotes  {}", on_off(s.motivational_quotes));
    println!("  theme               {}", s.theme);
    println!("  fontSize            {}", s.font_size);
    println!("  accentColor         {}", s.accent_color);
    println!("  workoutReminders    {}", on_off(s.workout_reminders));
    println!("  nutritionReminders  {}", on_off(s.nutrition_reminders));
    println!("  progressUpdates     {}", on_off(s.progress_updates));

    let p = &s.profile;
    println!("\n=== Profile ===\n");
    println!("  name    {}", p.name);
    println!("  email   {}", p.email);
    println!("  age     {}", p.age);
    println!("  weight  {}", p.weight);
    println!("  height  {}", p.height);
    Ok(())
}

pub(crate) fn cmd_settings_set(store: &mut Store, key: &str, value: &str, json: bool) -> Result<()> {
    let update = SettingUpdate::parse(key, value)?;
    let key = update.key();
    store.update_setting(update)?;

    if json {
        println!("{}", serde_json::to_string_pretty(store.settings())?);
    } else {
        println!("Updated {key}");
    }
    Ok(())
}

pub(crate) fn cmd_settings_profile(
    store: &mut Store,
    field: &str,
    value: &str,
    json: bool,
) -> Result<()> {
    let update = ProfileUpdate::parse(field, value)?;
    let field = update.key();
    store.update_profile_setting(update)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&store.settings().profile)?);
    } else {
        println!("Updated profile {field}");
    }
    Ok(())
}
