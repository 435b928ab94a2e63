pub mod commands;

use std::sync::Arc;

use anyhow::Result;

use crate::db::Database;
use crate::models::tracker::{
    FoodTrackers, GoalTrackers, HealthTrackers, LearningTrackers, TrackerData, TrackerMetric,
};
use crate::models::{DailyLog, FoodSource};

/// Where baseline tracker figures come from. Injected so tests (and any
/// future backend integration) can substitute deterministic fixtures.
pub trait TrackerSource: Send + Sync {
    fn baseline(&self) -> TrackerData;
}

/// The stock sample figures the app ships with.
pub struct FixtureTrackers;

impl TrackerSource for FixtureTrackers {
    fn baseline(&self) -> TrackerData {
        TrackerData {
            health: HealthTrackers {
                sleep: TrackerMetric::new(7.5, 8.0, "hours"),
                hydration: TrackerMetric::new(6.0, 8.0, "glasses"),
                energy: TrackerMetric::new(75.0, 100.0, "%"),
            },
            food: FoodTrackers {
                meals: TrackerMetric::new(2.0, 3.0, "meals"),
                outside_food: TrackerMetric::new(1.0, 0.0, "times"),
                quality: TrackerMetric::new(80.0, 90.0, "%"),
            },
            learning: LearningTrackers {
                study_time: TrackerMetric::new(2.5, 3.0, "hours"),
                streak: TrackerMetric::new(12.0, 30.0, "days"),
                progress: TrackerMetric::new(65.0, 100.0, "%"),
            },
            goals: GoalTrackers {
                short_term: TrackerMetric::new(3.0, 5.0, "tasks"),
                long_term: TrackerMetric::new(40.0, 100.0, "%"),
                weekly: TrackerMetric::new(5.0, 7.0, "days"),
            },
        }
    }
}

/// Serves tracker snapshots and takes daily-log saves. Snapshots are the
/// source baseline with the latest saved log folded into the health and
/// food groups.
#[derive(Clone)]
pub struct TrackerHub {
    source: Arc<dyn TrackerSource>,
    db: Database,
}

impl TrackerHub {
    pub fn new(db: Database) -> Self {
        Self::with_source(db, Arc::new(FixtureTrackers))
    }

    pub fn with_source(db: Database, source: Arc<dyn TrackerSource>) -> Self {
        Self { source, db }
    }

    pub async fn snapshot(&self) -> Result<TrackerData> {
        let mut data = self.source.baseline();
        if let Some(log) = self.db.latest_daily_log().await? {
            apply_log(&mut data, &log);
        }
        Ok(data)
    }

    /// Derive food quality, persist the blob for its day (replace-whole),
    /// and return the refreshed snapshot.
    pub async fn save_daily_log(&self, mut log: DailyLog) -> Result<TrackerData> {
        log.food.quality = match log.food.food_type {
            FoodSource::Home => 90,
            FoodSource::Outside => 60,
        };

        self.db.save_daily_log(&log).await?;
        self.snapshot().await
    }

    pub async fn daily_log(&self, date: &str) -> Result<Option<DailyLog>> {
        self.db.get_daily_log(date).await
    }
}

fn apply_log(data: &mut TrackerData, log: &DailyLog) {
    data.health.sleep.value = log.sleep;
    data.health.energy.value = if log.sleep >= 7.0 { 85.0 } else { 65.0 };
    data.food.meals.value = f64::from(log.food.total_meals);
    data.food.outside_food.value = match log.food.food_type {
        FoodSource::Home => 0.0,
        FoodSource::Outside => 1.0,
    };
    data.food.quality.value = f64::from(log.food.quality);
}
