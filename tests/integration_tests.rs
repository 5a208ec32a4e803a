// Integration tests for the au pair matching core

use aupair_match::core::{find_conflicts, has_conflict, Clock, FixedClock, Matcher, DEFAULT_MATCH_LIMIT};
use aupair_match::models::{
    Booking, BookingStatus, CandidateProfile, CounterpartyPreferences, ExistingReservation, ProposedInterval,
    ScoringWeights,
};
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn create_test_candidate(id: &str, born: NaiveDate, rate: f64) -> CandidateProfile {
    CandidateProfile {
        user_id: id.to_string(),
        languages: vec!["English".to_string(), "Spanish".to_string()],
        preferred_countries: vec!["Ireland".to_string(), "United Kingdom".to_string()],
        date_of_birth: Some(born),
        available_from: Some(date(2024, 9, 1)),
        available_to: Some(date(2025, 8, 31)),
        hourly_rate: Some(rate),
        currency: "EUR".to_string(),
    }
}

fn create_test_family(id: &str, country: &str, children: Vec<u8>, start: NaiveDate) -> CounterpartyPreferences {
    CounterpartyPreferences {
        user_id: id.to_string(),
        preferred_languages: vec!["english".to_string()],
        country: country.to_string(),
        children_ages: children,
        max_budget: Some(14.0),
        currency: "EUR".to_string(),
        start_date: Some(start),
    }
}

#[test]
fn test_integration_end_to_end_ranking() {
    let clock = FixedClock(Utc.with_ymd_and_hms(2024, 4, 15, 8, 0, 0).unwrap());
    let matcher = Matcher::with_default_weights();
    let candidate = create_test_candidate("aupair_1", date(2002, 7, 1), 12.0);

    let families = vec![
        create_test_family("dublin", "Ireland", vec![3, 6], date(2024, 9, 15)),
        create_test_family("paris", "France", vec![3, 6], date(2024, 9, 15)),
        create_test_family("london_late", "United Kingdom", vec![14], date(2025, 10, 1)),
        create_test_family("cork_early", "Ireland", vec![5], date(2024, 6, 1)),
    ];

    let result = matcher.rank_counterparties(&candidate, families, DEFAULT_MATCH_LIMIT, clock.today());

    assert_eq!(result.total_candidates, 4);
    assert_eq!(result.matches.len(), 4);
    assert_eq!(result.matches[0].user_id, "dublin");
    assert_eq!(result.matches[0].score, 100);

    // Sorted by score
    for i in 1..result.matches.len() {
        assert!(
            result.matches[i - 1].score >= result.matches[i].score,
            "Matches not sorted by score"
        );
    }

    // Country mismatch costs exactly the country weight
    let paris = result.matches.iter().find(|m| m.user_id == "paris").unwrap();
    assert_eq!(paris.score, 75);
}

#[test]
fn test_bidirectional_ranking_agrees() {
    let today = date(2024, 4, 15);
    let matcher = Matcher::new(ScoringWeights::default());
    let family = create_test_family("dublin", "Ireland", vec![3, 6], date(2024, 9, 15));
    let candidate = create_test_candidate("aupair_1", date(2002, 7, 1), 12.0);

    let forward = matcher.rank_counterparties(&candidate, vec![family.clone()], 1, today);
    let backward = matcher.rank_candidates(&family, vec![candidate], 1, today);

    assert_eq!(forward.matches[0].score, backward.matches[0].score);
    assert_eq!(forward.matches[0].breakdown, backward.matches[0].breakdown);
}

#[test]
fn test_booking_schedule_conflicts() {
    let base = Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap();
    let booking = |offset: i64, days: i64, status: BookingStatus| Booking {
        id: Uuid::new_v4(),
        au_pair_id: "aupair_1".to_string(),
        family_id: "family".to_string(),
        start: base + Duration::days(offset),
        end: base + Duration::days(offset + days),
        status,
        notes: None,
        created_at: base,
        updated_at: base,
    };

    let schedule: Vec<ExistingReservation> = vec![
        booking(0, 7, BookingStatus::Approved),
        booking(10, 5, BookingStatus::Pending),
        booking(20, 10, BookingStatus::Cancelled),
        booking(40, 5, BookingStatus::Completed),
    ]
    .iter()
    .map(Booking::reservation)
    .collect();

    let slot = |offset: i64, days: i64| ProposedInterval {
        party_id: "aupair_1".to_string(),
        start: base + Duration::days(offset),
        end: base + Duration::days(offset + days),
    };

    // Gap between the approved and pending bookings
    assert!(!has_conflict(&slot(8, 1), &schedule));
    // Touches the end of the approved booking
    assert!(has_conflict(&slot(7, 2), &schedule));
    // Spans both active bookings
    assert_eq!(find_conflicts(&slot(5, 7), &schedule).len(), 2);
    // Only inactive bookings in the way
    assert!(!has_conflict(&slot(20, 30), &schedule));
}
