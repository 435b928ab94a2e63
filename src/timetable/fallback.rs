use chrono::{DateTime, Datelike, Local};

use crate::models::TimetableRecord;

pub const HEALTH_FOCUS: &str = "Health & Wellness";
pub const HUSTLE_FOCUS: &str = "Side Hustle";

const GENERIC_GOAL: &str = "your main goal";

/// Build a complete timetable without the backend. Pure function of its
/// inputs; callers inject the instant so the output is reproducible.
///
/// The night focus alternates on weekday parity with Sunday = 0
/// (chrono's `num_days_from_sunday`): even days are Health & Wellness,
/// odd days are Side Hustle. Synthesized records never carry `error`, so
/// they always count as usable.
pub fn synthesize(goals: &[String], now: DateTime<Local>) -> TimetableRecord {
    let health_day = now.weekday().num_days_from_sunday() % 2 == 0;
    let night_focus = if health_day { HEALTH_FOCUS } else { HUSTLE_FOCUS };

    let goal = goals
        .first()
        .map(String::as_str)
        .filter(|g| !g.trim().is_empty())
        .unwrap_or(GENERIC_GOAL);

    let night_line = if health_day {
        "Health focus: yoga, meditation, early sleep prep"
    } else {
        "Side hustle: work on personal projects"
    };

    let schedule_text = format!(
        "Here's your personalized schedule for today!\n\n\
         🌅 Morning (7:30-12:00):\n\
         - Focus work on: {goal}\n\
         - 25-minute focused blocks with 5-min breaks\n\
         - Deep work session\n\n\
         ☀️ Afternoon (12:00-17:00):\n\
         - Continue project work\n\
         - Lunch break (12:30-13:30)\n\
         - Admin tasks and planning\n\n\
         🌆 Evening (17:00-21:00):\n\
         - Personal time and exercise\n\
         - Dinner and relaxation\n\
         - Light reading or hobby time\n\n\
         🌙 Night (21:00-00:30):\n\
         - {night_line}\n\n\
         You got this! 💪"
    );

    TimetableRecord {
        date: now.format("%Y-%m-%d").to_string(),
        day: now.format("%A").to_string(),
        night_focus: night_focus.to_string(),
        schedule_text,
        generated_at: now.to_rfc3339(),
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(year: i32, month: u32, day: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(year, month, day, 9, 30, 0).unwrap()
    }

    fn goals(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn schedule_text_contains_first_goal() {
        let record = synthesize(&goals(&["Learn machine learning", "Get fit"]), at(2025, 3, 3));
        assert!(!record.schedule_text.is_empty());
        assert!(record.schedule_text.contains("Learn machine learning"));
        assert!(!record.schedule_text.contains("Get fit"));
    }

    #[test]
    fn empty_goals_fall_back_to_generic_placeholder() {
        let record = synthesize(&[], at(2025, 3, 3));
        assert!(record.schedule_text.contains("your main goal"));
    }

    #[test]
    fn synthesize_is_deterministic() {
        let g = goals(&["Ship the app"]);
        let now = at(2025, 3, 5);
        let a = synthesize(&g, now);
        let b = synthesize(&g, now);
        assert_eq!(a, b);
    }

    #[test]
    fn weekday_index_is_anchored_to_sunday_zero() {
        // 2025-03-02 is a Sunday: index 0, even, health day.
        let sunday = synthesize(&[], at(2025, 3, 2));
        assert_eq!(sunday.day, "Sunday");
        assert_eq!(sunday.night_focus, HEALTH_FOCUS);

        // Monday is index 1: odd, hustle day.
        let monday = synthesize(&[], at(2025, 3, 3));
        assert_eq!(monday.day, "Monday");
        assert_eq!(monday.night_focus, HUSTLE_FOCUS);
    }

    #[test]
    fn night_focus_alternates_with_period_two_over_a_week() {
        let focuses: Vec<String> = (2..9)
            .map(|day| synthesize(&[], at(2025, 3, day)).night_focus)
            .collect();

        for pair in focuses.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
        // Period 2: every other day matches.
        for pair in focuses.windows(3) {
            assert_eq!(pair[0], pair[2]);
        }
    }

    #[test]
    fn night_line_matches_the_focus() {
        let health = synthesize(&[], at(2025, 3, 2));
        assert!(health.schedule_text.contains("yoga, meditation"));

        let hustle = synthesize(&[], at(2025, 3, 3));
        assert!(hustle.schedule_text.contains("work on personal projects"));
    }

    #[test]
    fn synthesized_records_are_always_usable() {
        let record = synthesize(&[], at(2025, 3, 7));
        assert!(record.error.is_none());
        assert!(record.is_usable());
        assert_eq!(record.date, "2025-03-07");
        // RFC 3339 sorts lexicographically.
        assert!(record.generated_at.starts_with("2025-03-07T"));
    }
}
