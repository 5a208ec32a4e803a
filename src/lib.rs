//! Au pair match - scoring and scheduling core for the au pair marketplace
//!
//! This library provides the match scorer used to rank au pairs and host
//! families against each other, and the availability conflict checker that
//! guards booking creation. Both are pure functions over plain data; the
//! HTTP routes and the PostgreSQL booking store are a thin shell around them.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{calculate_match_score, has_conflict, find_conflicts, validate_interval, Clock, FixedClock, Matcher, SystemClock};
pub use models::{
    BookingStatus, CandidateProfile, CounterpartyPreferences, ExistingReservation, MatchScore, ProposedInterval,
    RankedMatch, ScoringWeights,
};
