use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackerMetric {
    pub value: f64,
    pub target: f64,
    pub unit: String,
}

impl TrackerMetric {
    pub fn new(value: f64, target: f64, unit: &str) -> Self {
        Self {
            value,
            target,
            unit: unit.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HealthTrackers {
    pub sleep: TrackerMetric,
    pub hydration: TrackerMetric,
    pub energy: TrackerMetric,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodTrackers {
    pub meals: TrackerMetric,
    pub outside_food: TrackerMetric,
    pub quality: TrackerMetric,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LearningTrackers {
    pub study_time: TrackerMetric,
    pub streak: TrackerMetric,
    pub progress: TrackerMetric,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalTrackers {
    pub short_term: TrackerMetric,
    pub long_term: TrackerMetric,
    pub weekly: TrackerMetric,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackerData {
    pub health: HealthTrackers,
    pub food: FoodTrackers,
    pub learning: LearningTrackers,
    pub goals: GoalTrackers,
}
