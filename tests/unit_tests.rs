// Unit tests for the au pair matching core

use aupair_match::core::{
    calendar::{age_in_years, days_between},
    conflict::{has_conflict, validate_interval, ScheduleError},
    filters::{calculate_language_score, matches_country},
    scoring::calculate_match_score,
};
use aupair_match::models::{
    BookingStatus, CandidateProfile, CounterpartyPreferences, ExistingReservation, ProposedInterval, ScoringWeights,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn instant(m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, m, d, 0, 0, 0).unwrap()
}

fn today() -> NaiveDate {
    date(2024, 3, 1)
}

fn neutral_candidate() -> CandidateProfile {
    CandidateProfile {
        user_id: "aupair".to_string(),
        ..Default::default()
    }
}

fn neutral_preferences() -> CounterpartyPreferences {
    CounterpartyPreferences {
        user_id: "family".to_string(),
        ..Default::default()
    }
}

fn reservation(start: DateTime<Utc>, end: DateTime<Utc>, status: BookingStatus) -> ExistingReservation {
    ExistingReservation {
        id: Uuid::new_v4(),
        party_id: "aupair".to_string(),
        start,
        end,
        status,
    }
}

fn interval(start: DateTime<Utc>, end: DateTime<Utc>) -> ProposedInterval {
    ProposedInterval {
        party_id: "aupair".to_string(),
        start,
        end,
    }
}

#[test]
fn test_language_match_ignores_case_in_score() {
    let mut candidate = neutral_candidate();
    candidate.languages = vec!["French".to_string(), "English".to_string()];
    let mut preferences = neutral_preferences();
    preferences.preferred_languages = vec!["french".to_string()];

    let (score, _) = calculate_language_score(&candidate, &preferences);
    assert_eq!(score, 100.0);

    let result = calculate_match_score(&candidate, &preferences, &ScoringWeights::default(), today());
    // Language is the only non-neutral factor: 30 + 0 + 10 + 7.5 + 5
    assert_eq!(result.score, 53);
}

#[test]
fn test_country_match_is_case_sensitive() {
    let mut candidate = neutral_candidate();
    candidate.preferred_countries = vec!["USA".to_string()];
    let mut preferences = neutral_preferences();
    preferences.country = "usa".to_string();

    assert!(!matches_country(&candidate, &preferences));

    let result = calculate_match_score(&candidate, &preferences, &ScoringWeights::default(), today());
    assert_eq!(result.breakdown.country, 0.0);
}

#[test]
fn test_rate_within_budget_earns_full_budget_points() {
    let mut candidate = neutral_candidate();
    candidate.hourly_rate = Some(15.0);
    let mut preferences = neutral_preferences();
    preferences.max_budget = Some(20.0);

    let with_budget = calculate_match_score(&candidate, &preferences, &ScoringWeights::default(), today());
    let without_budget =
        calculate_match_score(&neutral_candidate(), &neutral_preferences(), &ScoringWeights::default(), today());

    assert_eq!(with_budget.breakdown.budget, 100.0);
    // 10 points instead of the neutral 5
    assert_eq!(with_budget.score - without_budget.score, 5);
}

#[test]
fn test_shared_boundary_conflicts() {
    let request = interval(instant(3, 10), instant(3, 15));
    let existing = vec![reservation(instant(3, 15), instant(3, 20), BookingStatus::Approved)];

    assert!(has_conflict(&request, &existing));
}

#[test]
fn test_rejected_reservation_ignored() {
    let request = interval(instant(3, 1), instant(3, 5));
    let existing = vec![reservation(instant(3, 2), instant(3, 4), BookingStatus::Rejected)];

    assert!(!has_conflict(&request, &existing));
}

#[test]
fn test_empty_language_preferences_contribute_30() {
    let mut with_languages = neutral_candidate();
    with_languages.languages = vec!["Polish".to_string()];

    let weights = ScoringWeights::default();
    let a = calculate_match_score(&neutral_candidate(), &neutral_preferences(), &weights, today());
    let b = calculate_match_score(&with_languages, &neutral_preferences(), &weights, today());

    assert_eq!(a.breakdown.language, 100.0);
    assert_eq!(a.score, b.score);
}

#[test]
fn test_country_match_contributes_exactly_25() {
    let mut candidate = neutral_candidate();
    candidate.preferred_countries = vec!["Norway".to_string()];

    let mut matching = neutral_preferences();
    matching.country = "Norway".to_string();
    let mut other = neutral_preferences();
    other.country = "Sweden".to_string();

    let weights = ScoringWeights::default();
    let hit = calculate_match_score(&candidate, &matching, &weights, today());
    let miss = calculate_match_score(&candidate, &other, &weights, today());

    assert_eq!(hit.score - miss.score, 25);
}

#[test]
fn test_age_uses_reference_date() {
    let mut candidate = neutral_candidate();
    // Turns 30 on 2024-06-01
    candidate.date_of_birth = Some(date(1994, 6, 1));
    let mut preferences = neutral_preferences();
    preferences.children_ages = vec![2];

    let weights = ScoringWeights::default();
    let before = calculate_match_score(&candidate, &preferences, &weights, date(2024, 3, 1));
    let after = calculate_match_score(&candidate, &preferences, &weights, date(2024, 9, 1));

    assert_eq!(before.breakdown.age, 100.0);
    assert_eq!(after.breakdown.age, 70.0);
}

#[test]
fn test_calendar_helpers() {
    assert!((age_in_years(date(2004, 3, 1), date(2024, 3, 1)) - 20.0).abs() < 0.01);
    assert_eq!(days_between(date(2024, 1, 1), date(2024, 12, 31)), 365);
}

#[test]
fn test_validation_rejects_past_and_inverted_intervals() {
    let now = instant(3, 5);

    assert_eq!(
        validate_interval(&interval(instant(3, 10), instant(3, 9)), now),
        Err(ScheduleError::InvalidInterval)
    );
    assert!(matches!(
        validate_interval(&interval(instant(3, 1), instant(3, 9)), now),
        Err(ScheduleError::StartInPast { .. })
    ));
    assert!(validate_interval(&interval(instant(3, 6), instant(3, 9)), now).is_ok());
}
