// Core algorithm exports
pub mod calendar;
pub mod clock;
pub mod conflict;
pub mod filters;
pub mod matcher;
pub mod scoring;

pub use calendar::{age_in_years, days_between, is_within_window};
pub use clock::{Clock, FixedClock, SystemClock};
pub use conflict::{find_conflicts, has_conflict, validate_interval, ScheduleError};
pub use filters::{calculate_language_score, matches_country};
pub use matcher::{Matcher, MatchResult, DEFAULT_MATCH_LIMIT};
pub use scoring::calculate_match_score;
