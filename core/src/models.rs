use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// One of the four persisted entities, each stored under its own key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Workouts,
    Meals,
    Notes,
    Settings,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Workouts,
        Collection::Meals,
        Collection::Notes,
        Collection::Settings,
    ];

    #[must_use]
    pub fn storage_key(self) -> &'static str {
        match self {
            Collection::Workouts => "fitlife_workouts",
            Collection::Meals => "fitlife_meals",
            Collection::Notes => "fitlife_notes",
            Collection::Settings => "fitlife_settings",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Workouts => "workouts",
            Collection::Meals => "meals",
            Collection::Notes => "notes",
            Collection::Settings => "settings",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Workouts ---

pub const GENERIC_WORKOUT_ICON: &str = "exercise";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutCategory {
    Legs,
    Arms,
    Core,
    #[serde(other)]
    Other,
}

impl WorkoutCategory {
    pub const ALL: [WorkoutCategory; 4] = [
        WorkoutCategory::Legs,
        WorkoutCategory::Arms,
        WorkoutCategory::Core,
        WorkoutCategory::Other,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            WorkoutCategory::Legs => "legs",
            WorkoutCategory::Arms => "arms",
            WorkoutCategory::Core => "core",
            WorkoutCategory::Other => "other",
        }
    }

    /// Exact match against the four category labels, for filtering.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().to_lowercase();
        Self::ALL.into_iter().find(|c| c.as_str() == label)
    }

    /// Icon token assigned to a workout of this category when it is created.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            WorkoutCategory::Legs => "directions_run",
            WorkoutCategory::Arms => "fitness_center",
            WorkoutCategory::Core => "self_improvement",
            WorkoutCategory::Other => GENERIC_WORKOUT_ICON,
        }
    }
}

/// Unrecognized labels map to `Other`.
impl From<&str> for WorkoutCategory {
    fn from(label: &str) -> Self {
        WorkoutCategory::from_label(label).unwrap_or(WorkoutCategory::Other)
    }
}

impl fmt::Display for WorkoutCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: i64,
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    pub category: WorkoutCategory,
    pub completed: bool,
    pub icon: String,
}

#[derive(Debug, Clone)]
pub struct NewWorkout {
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    pub category: WorkoutCategory,
}

// --- Meals ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: i64,
    pub food: String,
    pub portion: String,
    pub calories: u32,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewMeal {
    pub food: String,
    pub portion: String,
    pub calories: u32,
}

/// Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default)]
pub struct MealEdit {
    pub food: Option<String>,
    pub portion: Option<String>,
    pub calories: Option<u32>,
}

impl MealEdit {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.food.is_none() && self.portion.is_none() && self.calories.is_none()
    }

    pub(crate) fn apply(self, meal: &mut Meal) {
        if let Some(food) = self.food {
            meal.food = food;
        }
        if let Some(portion) = self.portion {
            meal.portion = portion;
        }
        if let Some(calories) = self.calories {
            meal.calories = calories;
        }
    }
}

// --- Notes ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub category: String,
}

/// Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default)]
pub struct NoteEdit {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
}

impl NoteEdit {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.category.is_none()
    }

    pub(crate) fn apply(self, note: &mut Note) {
        if let Some(title) = self.title {
            note.title = title;
        }
        if let Some(content) = self.content {
            note.content = content;
        }
        if let Some(category) = self.category {
            note.category = category;
        }
    }
}

// --- Settings ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Metric,
    Imperial,
}

impl Units {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub age: f64,
    pub weight: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub calorie_goal: u32,
    pub units: Units,
    pub motivational_quotes: bool,
    pub theme: String,
    pub font_size: f64,
    pub accent_color: String,
    pub workout_reminders: bool,
    pub nutrition_reminders: bool,
    pub progress_updates: bool,
    pub profile: Profile,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            calorie_goal: 2500,
            units: Units::Metric,
            motivational_quotes: true,
            theme: "dark".to_string(),
            font_size: 100.0,
            accent_color: "#13ecc8".to_string(),
            workout_reminders: true,
            nutrition_reminders: true,
            progress_updates: false,
            profile: Profile {
                name: "Alex Johnson".to_string(),
                email: "alex.j@example.com".to_string(),
                age: 28.0,
                weight: 70.0,
                height: 175.0,
            },
        }
    }
}

/// A single top-level settings change, keyed by the stored field name.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingUpdate {
    CalorieGoal(u32),
    Units(Units),
    MotivationalQuotes(bool),
    Theme(String),
    FontSize(f64),
    AccentColor(String),
    WorkoutReminders(bool),
    NutritionReminders(bool),
    ProgressUpdates(bool),
}

pub const SETTING_KEYS: &[&str] = &[
    "calorieGoal",
    "units",
    "motivationalQuotes",
    "theme",
    "fontSize",
    "accentColor",
    "workoutReminders",
    "nutritionReminders",
    "progressUpdates",
];

impl SettingUpdate {
    pub fn parse(key: &str, value: &str) -> Result<Self, StoreError> {
        let value = value.trim();
        let update = match key {
            "calorieGoal" => SettingUpdate::CalorieGoal(parse_whole(key, value)?),
            "units" => SettingUpdate::Units(match value.to_lowercase().as_str() {
                "metric" => Units::Metric,
                "imperial" => Units::Imperial,
                _ => return Err(StoreError::invalid(key, "expected 'metric' or 'imperial'")),
            }),
            "motivationalQuotes" => SettingUpdate::MotivationalQuotes(parse_flag(key, value)?),
            "theme" => SettingUpdate::Theme(parse_token(key, value)?),
            "fontSize" => SettingUpdate::FontSize(parse_positive(key, value)?),
            "accentColor" => SettingUpdate::AccentColor(validate_color(value)?),
            "workoutReminders" => SettingUpdate::WorkoutReminders(parse_flag(key, value)?),
            "nutritionReminders" => SettingUpdate::NutritionReminders(parse_flag(key, value)?),
            "progressUpdates" => SettingUpdate::ProgressUpdates(parse_flag(key, value)?),
            _ => {
                return Err(StoreError::invalid(
                    key,
                    format!("unknown setting. Valid: {}", SETTING_KEYS.join(", ")),
                ));
            }
        };
        Ok(update)
    }

    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            SettingUpdate::CalorieGoal(_) => "calorieGoal",
            SettingUpdate::Units(_) => "units",
            SettingUpdate::MotivationalQuotes(_) => "motivationalQuotes",
            SettingUpdate::Theme(_) => "theme",
            SettingUpdate::FontSize(_) => "fontSize",
            SettingUpdate::AccentColor(_) => "accentColor",
            SettingUpdate::WorkoutReminders(_) => "workoutReminders",
            SettingUpdate::NutritionReminders(_) => "nutritionReminders",
            SettingUpdate::ProgressUpdates(_) => "progressUpdates",
        }
    }

    pub(crate) fn apply(self, settings: &mut Settings) {
        match self {
            SettingUpdate::CalorieGoal(v) => settings.calorie_goal = v,
            SettingUpdate::Units(v) => settings.units = v,
            SettingUpdate::MotivationalQuotes(v) => settings.motivational_quotes = v,
            SettingUpdate::Theme(v) => settings.theme = v,
            SettingUpdate::FontSize(v) => settings.font_size = v,
            SettingUpdate::AccentColor(v) => settings.accent_color = v,
            SettingUpdate::WorkoutReminders(v) => settings.workout_reminders = v,
            SettingUpdate::NutritionReminders(v) => settings.nutrition_reminders = v,
            SettingUpdate::ProgressUpdates(v) => settings.progress_updates = v,
        }
    }
}

/// A single profile field change.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileUpdate {
    Name(String),
    Email(String),
    Age(f64),
    Weight(f64),
    Height(f64),
}

pub const PROFILE_KEYS: &[&str] = &["name", "email", "age", "weight", "height"];

impl ProfileUpdate {
    pub fn parse(key: &str, value: &str) -> Result<Self, StoreError> {
        let trimmed = value.trim();
        let update = match key {
            "name" => ProfileUpdate::Name(trimmed.to_string()),
            "email" => ProfileUpdate::Email(trimmed.to_string()),
            "age" => ProfileUpdate::Age(parse_positive(key, trimmed)?),
            "weight" => ProfileUpdate::Weight(parse_positive(key, trimmed)?),
            "height" => ProfileUpdate::Height(parse_positive(key, trimmed)?),
            _ => {
                return Err(StoreError::invalid(
                    key,
                    format!("unknown profile field. Valid: {}", PROFILE_KEYS.join(", ")),
                ));
            }
        };
        Ok(update)
    }

    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            ProfileUpdate::Name(_) => "name",
            ProfileUpdate::Email(_) => "email",
            ProfileUpdate::Age(_) => "age",
            ProfileUpdate::Weight(_) => "weight",
            ProfileUpdate::Height(_) => "height",
        }
    }

    pub(crate) fn apply(self, profile: &mut Profile) {
        match self {
            ProfileUpdate::Name(v) => profile.name = v,
            ProfileUpdate::Email(v) => profile.email = v,
            ProfileUpdate::Age(v) => profile.age = v,
            ProfileUpdate::Weight(v) => profile.weight = v,
            ProfileUpdate::Height(v) => profile.height = v,
        }
    }
}

fn parse_whole(field: &str, value: &str) -> Result<u32, StoreError> {
    value
        .parse::<u32>()
        .map_err(|_| StoreError::invalid(field, format!("expected a whole number, got '{value}'")))
}

fn parse_positive(field: &str, value: &str) -> Result<f64, StoreError> {
    let n: f64 = value
        .parse()
        .map_err(|_| StoreError::invalid(field, format!("expected a number, got '{value}'")))?;
    if !n.is_finite() || n <= 0.0 {
        return Err(StoreError::invalid(field, "must be greater than 0"));
    }
    Ok(n)
}

fn parse_flag(field: &str, value: &str) -> Result<bool, StoreError> {
    match value.to_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(StoreError::invalid(field, "expected true or false")),
    }
}

fn parse_token(field: &str, value: &str) -> Result<String, StoreError> {
    if value.is_empty() || value.contains(char::is_whitespace) {
        return Err(StoreError::invalid(field, "expected a single word"));
    }
    Ok(value.to_string())
}

/// Accepts `#rgb` or `#rrggbb` hex colors.
pub fn validate_color(value: &str) -> Result<String, StoreError> {
    let hex = value
        .strip_prefix('#')
        .ok_or_else(|| StoreError::invalid("accentColor", "expected a hex color like #13ecc8"))?;
    if !matches!(hex.len(), 3 | 6) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(StoreError::invalid(
            "accentColor",
            format!("'{value}' is not a hex color"),
        ));
    }
    Ok(value.to_lowercase())
}

// --- Seed data ---

#[must_use]
pub fn seed_workouts() -> Vec<Workout> {
    let seed = |id, name: &str, sets, reps, category, icon: &str| Workout {
        id,
        name: name.to_string(),
        sets,
        reps,
        category,
        completed: false,
        icon: icon.to_string(),
    };
    vec![
        seed(1, "Squats", 3, 12, WorkoutCategory::Legs, "fitness_center"),
        seed(2, "Push-ups", 3, 15, WorkoutCategory::Arms, "exercise"),
        seed(3, "Crunches", 3, 20, WorkoutCategory::Core, "self_improvement"),
        seed(4, "Pull-ups", 3, 10, WorkoutCategory::Arms, "sports_gymnastics"),
        seed(5, "Lunges", 3, 15, WorkoutCategory::Legs, "accessibility_new"),
    ]
}

#[must_use]
pub fn seed_meals(now: DateTime<Utc>) -> Vec<Meal> {
    let seed = |id, food: &str, portion: &str, calories| Meal {
        id,
        food: food.to_string(),
        portion: portion.to_string(),
        calories,
        timestamp: now,
    };
    vec![
        seed(1, "Grilled Chicken Salad", "1 bowl", 350),
        seed(2, "Greek Yogurt", "1 cup", 150),
        seed(3, "Banana", "1 medium", 105),
    ]
}

#[must_use]
pub fn seed_notes(now: DateTime<Utc>) -> Vec<Note> {
    let seed = |id, title: &str, content: &str, category: &str| Note {
        id,
        title: title.to_string(),
        content: content.to_string(),
        category: category.to_string(),
        timestamp: now,
    };
    vec![
        seed(1, "Morning Run", "A quick run to start the day", "workout"),
        seed(2, "Evening Yoga", "Relaxing yoga session", "workout"),
        seed(3, "Healthy Recipes", "Collection of healthy recipes", "nutrition"),
    ]
}

// --- Export / Import ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub workouts: Vec<Workout>,
    pub meals: Vec<Meal>,
    pub notes: Vec<Note>,
    pub settings: Settings,
    pub export_date: DateTime<Utc>,
}

/// Any subset of the four entities; unknown keys are ignored and `null` counts as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportDocument {
    #[serde(default)]
    pub workouts: Option<Vec<Workout>>,
    #[serde(default)]
    pub meals: Option<Vec<Meal>>,
    #[serde(default)]
    pub notes: Option<Vec<Note>>,
    #[serde(default)]
    pub settings: Option<Settings>,
}

impl ImportDocument {
    #[must_use]
    pub fn collections(&self) -> Vec<Collection> {
        let mut present = Vec::new();
        if self.workouts.is_some() {
            present.push(Collection::Workouts);
        }
        if self.meals.is_some() {
            present.push(Collection::Meals);
        }
        if self.notes.is_some() {
            present.push(Collection::Notes);
        }
        if self.settings.is_some() {
            present.push(Collection::Settings);
        }
        present
    }
}

#[must_use]
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("fitlife-backup-{}.json", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_keys() {
        let keys: Vec<&str> = Collection::ALL.iter().map(|c| c.storage_key()).collect();
        assert_eq!(
            keys,
            [
                "fitlife_workouts",
                "fitlife_meals",
                "fitlife_notes",
                "fitlife_settings"
            ]
        );
    }

    #[test]
    fn test_category_icons() {
        assert_eq!(WorkoutCategory::Legs.icon(), "directions_run");
        assert_eq!(WorkoutCategory::Arms.icon(), "fitness_center");
        assert_eq!(WorkoutCategory::Core.icon(), "self_improvement");
        assert_eq!(WorkoutCategory::Other.icon(), GENERIC_WORKOUT_ICON);
    }

    #[test]
    fn test_category_from_label() {
        assert_eq!(WorkoutCategory::from("legs"), WorkoutCategory::Legs);
        assert_eq!(WorkoutCategory::from(" ARMS "), WorkoutCategory::Arms);
        assert_eq!(WorkoutCategory::from("cardio"), WorkoutCategory::Other);
        assert_eq!(WorkoutCategory::from(""), WorkoutCategory::Other);
        assert_eq!(
            WorkoutCategory::from_label(" Core"),
            Some(WorkoutCategory::Core)
        );
        assert_eq!(
            WorkoutCategory::from_label("other"),
            Some(WorkoutCategory::Other)
        );
        assert_eq!(WorkoutCategory::from_label("cardio"), None);
    }

    #[test]
    fn test_unknown_category_deserializes_as_other() {
        let json = r#"{"id":9,"name":"Rowing","sets":2,"reps":5,"category":"cardio","completed":false,"icon":"rowing"}"#;
        let w: Workout = serde_json::from_str(json).unwrap();
        assert_eq!(w.category, WorkoutCategory::Other);
        assert_eq!(w.icon, "rowing");
    }

    #[test]
    fn test_settings_wire_names() {
        let value = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(value["calorieGoal"], 2500);
        assert_eq!(value["units"], "metric");
        assert_eq!(value["motivationalQuotes"], true);
        assert_eq!(value["accentColor"], "#13ecc8");
        assert_eq!(value["fontSize"], 100.0);
        assert_eq!(value["progressUpdates"], false);
        assert_eq!(value["profile"]["name"], "Alex Johnson");
        assert_eq!(value["profile"]["height"], 175.0);
    }

    #[test]
    fn test_settings_accepts_camel_case_document() {
        let json = r##"{"calorieGoal":2200,"units":"imperial","motivationalQuotes":false,
            "theme":"light","fontSize":110,"accentColor":"#ff0000","workoutReminders":false,
            "nutritionReminders":true,"progressUpdates":true,
            "profile":{"name":"Sam","email":"sam@example.com","age":31,"weight":80.5,"height":182}}"##;
        let s: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(s.calorie_goal, 2200);
        assert_eq!(s.units, Units::Imperial);
        assert!((s.font_size - 110.0).abs() < f64::EPSILON);
        assert!((s.profile.age - 31.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_settings_missing_field_rejected() {
        let json = r#"{"calorieGoal":2200}"#;
        assert!(serde_json::from_str::<Settings>(json).is_err());
    }

    #[test]
    fn test_setting_update_parse() {
        assert_eq!(
            SettingUpdate::parse("calorieGoal", "1800").unwrap(),
            SettingUpdate::CalorieGoal(1800)
        );
        assert_eq!(
            SettingUpdate::parse("units", "Imperial").unwrap(),
            SettingUpdate::Units(Units::Imperial)
        );
        assert_eq!(
            SettingUpdate::parse("progressUpdates", "on").unwrap(),
            SettingUpdate::ProgressUpdates(true)
        );
        assert_eq!(
            SettingUpdate::parse("accentColor", "#ABCDEF").unwrap(),
            SettingUpdate::AccentColor("#abcdef".to_string())
        );
    }

    #[test]
    fn test_setting_update_rejects_bad_input() {
        assert!(SettingUpdate::parse("calorieGoal", "-5").is_err());
        assert!(SettingUpdate::parse("calorieGoal", "lots").is_err());
        assert!(SettingUpdate::parse("units", "stone").is_err());
        assert!(SettingUpdate::parse("fontSize", "0").is_err());
        assert!(SettingUpdate::parse("accentColor", "teal").is_err());
        assert!(SettingUpdate::parse("theme", "two words").is_err());
        assert!(SettingUpdate::parse("favouriteColour", "blue").is_err());
    }

    #[test]
    fn test_setting_update_apply() {
        let mut s = Settings::default();
        SettingUpdate::Theme("light".to_string()).apply(&mut s);
        SettingUpdate::CalorieGoal(2000).apply(&mut s);
        assert_eq!(s.theme, "light");
        assert_eq!(s.calorie_goal, 2000);
        assert_eq!(s.units, Units::Metric);
    }

    #[test]
    fn test_profile_update_parse_and_apply() {
        let mut p = Settings::default().profile;
        ProfileUpdate::parse("weight", "72.5").unwrap().apply(&mut p);
        ProfileUpdate::parse("name", "  Jo  ").unwrap().apply(&mut p);
        assert!((p.weight - 72.5).abs() < f64::EPSILON);
        assert_eq!(p.name, "Jo");
        assert_eq!(
            ProfileUpdate::parse("age", "28.5").unwrap(),
            ProfileUpdate::Age(28.5)
        );
        assert!(ProfileUpdate::parse("age", "-3").is_err());
        assert!(ProfileUpdate::parse("shoe", "42").is_err());
    }

    #[test]
    fn test_meal_edit_keeps_unset_fields() {
        let mut meal = seed_meals(Utc::now()).remove(0);
        MealEdit {
            calories: Some(400),
            ..MealEdit::default()
        }
        .apply(&mut meal);
        assert_eq!(meal.calories, 400);
        assert_eq!(meal.food, "Grilled Chicken Salad");
        assert!(MealEdit::default().is_empty());
    }

    #[test]
    fn test_import_document_ignores_unknown_keys() {
        let doc: ImportDocument =
            serde_json::from_str(r#"{"notes":[],"theme":"x","exportDate":"2024-01-01"}"#).unwrap();
        assert_eq!(doc.collections(), vec![Collection::Notes]);
        assert!(doc.notes.unwrap().is_empty());
    }

    #[test]
    fn test_import_document_null_is_absent() {
        let doc: ImportDocument = serde_json::from_str(r#"{"workouts":null}"#).unwrap();
        assert!(doc.collections().is_empty());
    }

    #[test]
    fn test_backup_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(backup_file_name(date), "fitlife-backup-2024-03-09.json");
    }
}
