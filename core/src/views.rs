//! Read-only figures derived from the working state for display.

use serde::Serialize;

use crate::models::{Meal, Workout, WorkoutCategory};

pub const MOTIVATIONAL_QUOTES: [&str; 5] = [
    "Consistency is key. Small, daily efforts lead to significant results over time. Keep pushing!",
    "Your body can do it. It's your mind you need to convince.",
    "The groundwork for all happiness is good health.",
    "Success is the sum of small efforts repeated day in and day out.",
    "Take care of your body. It's the only place you have to live.",
];

const NOTE_PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub completed_workouts: usize,
    pub total_workouts: usize,
    pub total_calories: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalorieSummary {
    pub consumed: u64,
    pub goal: u32,
    /// Share of the goal consumed, capped at 100.
    pub percentage: f64,
}

impl CalorieSummary {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(consumed: u64, goal: u32) -> Self {
        let percentage = if goal == 0 {
            if consumed == 0 { 0.0 } else { 100.0 }
        } else {
            (consumed as f64 / f64::from(goal) * 100.0).min(100.0)
        };
        Self {
            consumed,
            goal,
            percentage,
        }
    }

    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn rounded_percentage(&self) -> u32 {
        self.percentage.round() as u32
    }

    /// Calories left before the goal is reached, zero once it is met.
    #[must_use]
    pub fn remaining(&self) -> u64 {
        u64::from(self.goal).saturating_sub(self.consumed)
    }
}

#[must_use]
pub fn total_calories(meals: &[Meal]) -> u64 {
    meals.iter().map(|m| u64::from(m.calories)).sum()
}

#[must_use]
pub fn dashboard_stats(workouts: &[Workout], meals: &[Meal]) -> DashboardStats {
    DashboardStats {
        completed_workouts: workouts.iter().filter(|w| w.completed).count(),
        total_workouts: workouts.len(),
        total_calories: total_calories(meals),
    }
}

/// `None` selects every workout.
#[must_use]
pub fn filter_workouts(workouts: &[Workout], category: Option<WorkoutCategory>) -> Vec<&Workout> {
    workouts
        .iter()
        .filter(|w| category.is_none_or(|c| w.category == c))
        .collect()
}

#[must_use]
pub fn note_preview(content: &str) -> String {
    if content.chars().count() <= NOTE_PREVIEW_CHARS {
        return content.to_string();
    }
    let end = content
        .char_indices()
        .nth(NOTE_PREVIEW_CHARS)
        .map_or(content.len(), |(i, _)| i);
    format!("{}...", &content[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{seed_meals, seed_workouts};
    use chrono::Utc;

    #[test]
    fn test_calorie_percentage_of_seed_meals() {
        let meals = seed_meals(Utc::now());
        let summary = CalorieSummary::new(total_calories(&meals), 2500);
        assert_eq!(summary.consumed, 605);
        assert_eq!(summary.rounded_percentage(), 24);
        assert_eq!(summary.remaining(), 1895);
    }

    #[test]
    fn test_calorie_percentage_capped() {
        let summary = CalorieSummary::new(3000, 2500);
        assert!((summary.percentage - 100.0).abs() < f64::EPSILON);
        assert_eq!(summary.remaining(), 0);
    }

    #[test]
    fn test_calorie_percentage_zero_goal() {
        assert_eq!(CalorieSummary::new(0, 0).rounded_percentage(), 0);
        assert_eq!(CalorieSummary::new(10, 0).rounded_percentage(), 100);
    }

    #[test]
    fn test_dashboard_stats() {
        let mut workouts = seed_workouts();
        workouts[1].completed = true;
        workouts[3].completed = true;
        let stats = dashboard_stats(&workouts, &seed_meals(Utc::now()));
        assert_eq!(stats.completed_workouts, 2);
        assert_eq!(stats.total_workouts, 5);
        assert_eq!(stats.total_calories, 605);
    }

    #[test]
    fn test_filter_workouts() {
        let workouts = seed_workouts();
        assert_eq!(filter_workouts(&workouts, None).len(), 5);
        let arms = filter_workouts(&workouts, Some(WorkoutCategory::Arms));
        let names: Vec<&str> = arms.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, ["Push-ups", "Pull-ups"]);
        assert!(filter_workouts(&workouts, Some(WorkoutCategory::Other)).is_empty());
    }

    #[test]
    fn test_note_preview() {
        assert_eq!(note_preview("short"), "short");
        let exact = "a".repeat(100);
        assert_eq!(note_preview(&exact), exact);
        let long = "é".repeat(120);
        let preview = note_preview(&long);
        assert_eq!(preview.chars().count(), 103);
        assert!(preview.ends_with("..."));
    }
}
