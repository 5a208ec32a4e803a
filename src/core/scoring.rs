use chrono::NaiveDate;

use crate::core::{
    calendar::{age_in_years, days_between, is_within_window},
    filters::{calculate_language_score, matches_country},
};
use crate::models::{CandidateProfile, CounterpartyPreferences, MatchScore, ScoreBreakdown, ScoringWeights};

/// Sub-score used when a factor lacks the data to be judged
const NEUTRAL_SCORE: f64 = 50.0;

/// Calculate a match score (0-100) for a candidate against counterparty preferences
///
/// Scoring formula:
/// score = round(
///     language_score * 0.30 +      # Share of preferred languages spoken
///     country_score * 0.25 +       # 100 if the country is preferred, else 0
///     age_score * 0.20 +           # Candidate age vs. children's ages
///     availability_score * 0.15 +  # Start date vs. availability window
///     budget_score * 0.10          # Hourly rate vs. maximum budget
/// )
///
/// Every sub-score is on a 0-100 scale, so the country factor contributes
/// exactly 0 or 25 points with the default weights. `today` is the date
/// the candidate's age is computed at.
pub fn calculate_match_score(
    candidate: &CandidateProfile,
    preferences: &CounterpartyPreferences,
    weights: &ScoringWeights,
    today: NaiveDate,
) -> MatchScore {
    let (language_score, shared_languages) = calculate_language_score(candidate, preferences);

    let country_score = if matches_country(candidate, preferences) { 100.0 } else { 0.0 };

    let age_score = calculate_age_score(
        candidate.date_of_birth,
        &preferences.children_ages,
        today,
    );

    let availability_score = calculate_availability_score(
        candidate.available_from,
        candidate.available_to,
        preferences.start_date,
    );

    let budget_score = calculate_budget_score(candidate.hourly_rate, preferences.max_budget);

    let total_score = language_score * weights.language
        + country_score * weights.country
        + age_score * weights.age
        + availability_score * weights.availability
        + budget_score * weights.budget;

    // Snap away float noise so exact half points round up
    let total_score = (total_score * 1e6).round() / 1e6;

    MatchScore {
        score: total_score.clamp(0.0, 100.0).round() as u8,
        breakdown: ScoreBreakdown {
            language: language_score,
            country: country_score,
            age: age_score,
            availability: availability_score,
            budget: budget_score,
        },
        shared_languages,
    }
}

/// Calculate age suitability score (0-100)
///
/// Young children (10 and under) are checked before older ones; the first
/// rule that fits wins.
#[inline]
fn calculate_age_score(date_of_birth: Option<NaiveDate>, children_ages: &[u8], today: NaiveDate) -> f64 {
    let Some(date_of_birth) = date_of_birth else {
        return NEUTRAL_SCORE;
    };
    if children_ages.is_empty() {
        return NEUTRAL_SCORE;
    }

    let age = age_in_years(date_of_birth, today);
    let in_range = |min: f64, max: f64| age >= min && age <= max;

    if children_ages.iter().any(|&child| child <= 10) && in_range(18.0, 30.0) {
        100.0
    } else if children_ages.iter().any(|&child| child >= 11) && in_range(20.0, 35.0) {
        100.0
    } else if in_range(18.0, 35.0) {
        70.0
    } else {
        30.0
    }
}

/// Calculate availability fit score (0-100)
///
/// Outside the window, the score decays with the distance between the
/// desired start and the first available day.
#[inline]
fn calculate_availability_score(
    available_from: Option<NaiveDate>,
    available_to: Option<NaiveDate>,
    start_date: Option<NaiveDate>,
) -> f64 {
    let (Some(from), Some(to), Some(start)) = (available_from, available_to, start_date) else {
        return NEUTRAL_SCORE;
    };

    if is_within_window(start, from, to) {
        return 100.0;
    }

    match days_between(start, from) {
        0..=30 => 80.0,
        31..=90 => 60.0,
        91..=180 => 30.0,
        _ => 10.0,
    }
}

/// Calculate budget fit score (0-100)
#[inline]
fn calculate_budget_score(hourly_rate: Option<f64>, max_budget: Option<f64>) -> f64 {
    let (Some(rate), Some(budget)) = (hourly_rate, max_budget) else {
        return NEUTRAL_SCORE;
    };

    if rate <= budget {
        return 100.0;
    }

    let ratio = rate / budget;
    if ratio <= 1.2 {
        70.0
    } else if ratio <= 1.5 {
        40.0
    } else {
        10.0
    }
}
