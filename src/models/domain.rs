use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Profile attributes of the party being scored
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CandidateProfile {
    #[serde(rename = "userId", default)]
    pub user_id: String,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(rename = "preferredCountries", default)]
    pub preferred_countries: Vec<String>,
    #[serde(rename = "dateOfBirth", default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(rename = "availableFrom", default)]
    pub available_from: Option<NaiveDate>,
    #[serde(rename = "availableTo", default)]
    pub available_to: Option<NaiveDate>,
    #[validate(range(min = 0.0))]
    #[serde(rename = "hourlyRate", default)]
    pub hourly_rate: Option<f64>,
    #[serde(default = "default_currency")]
    pub currency: String,
}

/// Preferences of the opposite party, matched against a candidate
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CounterpartyPreferences {
    #[serde(rename = "userId", default)]
    pub user_id: String,
    #[serde(rename = "preferredLanguages", default)]
    pub preferred_languages: Vec<String>,
    #[serde(default)]
    pub country: String,
    #[serde(rename = "childrenAges", default)]
    pub children_ages: Vec<u8>,
    #[validate(range(min = 0.0))]
    #[serde(rename = "maxBudget", default)]
    pub max_budget: Option<f64>,
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Desired start date; the reference date for availability fit
    #[serde(rename = "startDate", default)]
    pub start_date: Option<NaiveDate>,
}

fn default_currency() -> String {
    "EUR".to_string()
}

/// Scoring weights
///
/// Each weight is the fraction of the 100-point scale a factor may claim.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub language: f64,
    pub country: f64,
    pub age: f64,
    pub availability: f64,
    pub budget: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            language: 0.30,
            country: 0.25,
            age: 0.20,
            availability: 0.15,
            budget: 0.10,
        }
    }
}

/// Per-factor sub-scores, each normalized to 0-100
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub language: f64,
    pub country: f64,
    pub age: f64,
    pub availability: f64,
    pub budget: f64,
}

/// Result of scoring one candidate against one set of preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    pub score: u8,
    pub breakdown: ScoreBreakdown,
    #[serde(rename = "sharedLanguages")]
    pub shared_languages: Vec<String>,
}

/// Ranked match result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedMatch {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub score: u8,
    pub breakdown: ScoreBreakdown,
    #[serde(rename = "sharedLanguages")]
    pub shared_languages: Vec<String>,
}

/// Booking lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
    Completed,
}

impl BookingStatus {
    /// Pending and approved bookings block overlapping requests
    pub fn is_active(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Approved)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Approved => "APPROVED",
            BookingStatus::Rejected => "REJECTED",
            BookingStatus::Cancelled => "CANCELLED",
            BookingStatus::Completed => "COMPLETED",
        }
    }

    /// Whether a booking may move from `self` to `next`
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Approved)
                | (Pending, Rejected)
                | (Pending, Cancelled)
                | (Approved, Cancelled)
                | (Approved, Completed)
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown booking status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for BookingStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(BookingStatus::Pending),
            "APPROVED" => Ok(BookingStatus::Approved),
            "REJECTED" => Ok(BookingStatus::Rejected),
            "CANCELLED" => Ok(BookingStatus::Cancelled),
            "COMPLETED" => Ok(BookingStatus::Completed),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// A requested time slot for a party
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposedInterval {
    #[serde(rename = "partyId")]
    pub party_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// A reservation already on a party's schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExistingReservation {
    pub id: Uuid,
    #[serde(rename = "partyId")]
    pub party_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
}

/// Persisted booking between an au pair and a host family
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    #[serde(rename = "auPairId")]
    pub au_pair_id: String,
    #[serde(rename = "familyId")]
    pub family_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
    pub notes: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Reservation view keyed on the au pair's schedule
    pub fn reservation(&self) -> ExistingReservation {
        ExistingReservation {
            id: self.id,
            party_id: self.au_pair_id.clone(),
            start: self.start,
            end: self.end,
            status: self.status,
        }
    }
}
