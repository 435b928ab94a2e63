pub mod chat;
pub mod daily_log;
pub mod profile;
pub mod timetable;
pub mod tracker;

pub use chat::{ChatMessage, Role};
pub use daily_log::{DailyLog, ExerciseLog, FoodLog, FoodSource};
pub use profile::UserProfile;
pub use timetable::TimetableRecord;
pub use tracker::{TrackerData, TrackerMetric};
