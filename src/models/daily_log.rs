use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FoodSource {
    Home,
    Outside,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodLog {
    pub meal_type: String,
    pub total_meals: u32,
    pub food_type: FoodSource,
    /// Derived on save: 90 for home-cooked, 60 for outside food.
    #[serde(default)]
    pub quality: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseLog {
    #[serde(rename = "type")]
    pub kind: String,
    pub duration: u32,
}

/// One day's manual log: meals, sleep, exercise, medication. Saved
/// whole-blob per calendar day; a second save for the same day replaces
/// the first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyLog {
    pub date: String,
    pub food: FoodLog,
    pub sleep: f64,
    pub exercise: ExerciseLog,
    pub medications: bool,
    pub timestamp: DateTime<Utc>,
}
