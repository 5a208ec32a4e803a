use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{CandidateProfile, CounterpartyPreferences, ProposedInterval};

/// Request to score one candidate against one counterparty
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScoreRequest {
    #[validate(nested)]
    pub candidate: CandidateProfile,
    #[validate(nested)]
    pub counterparty: CounterpartyPreferences,
}

/// Request to rank counterparties for a candidate
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankCounterpartiesRequest {
    #[validate(nested)]
    pub candidate: CandidateProfile,
    #[validate(length(max = 5000), nested)]
    pub counterparties: Vec<CounterpartyPreferences>,
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Request to rank candidates for a counterparty
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankCandidatesRequest {
    #[validate(nested)]
    pub preferences: CounterpartyPreferences,
    #[validate(length(max = 5000), nested)]
    pub candidates: Vec<CandidateProfile>,
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Request to check a time slot against a party's schedule
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ConflictCheckRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "party_id", rename = "partyId")]
    pub party_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ConflictCheckRequest {
    pub fn interval(&self) -> ProposedInterval {
        ProposedInterval {
            party_id: self.party_id.clone(),
            start: self.start,
            end: self.end,
        }
    }
}

/// Request to create a booking
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBookingRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "au_pair_id", rename = "auPairId")]
    pub au_pair_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "family_id", rename = "familyId")]
    pub family_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[validate(length(max = 2000))]
    #[serde(default)]
    pub notes: Option<String>,
}

impl CreateBookingRequest {
    /// The slot requested on the au pair's schedule
    pub fn interval(&self) -> ProposedInterval {
        ProposedInterval {
            party_id: self.au_pair_id.clone(),
            start: self.start,
            end: self.end,
        }
    }
}

/// Request to move a booking to another status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Query string for listing a party's bookings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListBookingsQuery {
    #[serde(alias = "party_id", rename = "partyId")]
    pub party_id: String,
}
