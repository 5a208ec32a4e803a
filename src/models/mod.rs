// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Booking, BookingStatus, CandidateProfile, CounterpartyPreferences, ExistingReservation, MatchScore,
    ProposedInterval, RankedMatch, ScoreBreakdown, ScoringWeights, UnknownStatus,
};
pub use requests::{
    ConflictCheckRequest, CreateBookingRequest, ListBookingsQuery, RankCandidatesRequest,
    RankCounterpartiesRequest, ScoreRequest, UpdateStatusRequest,
};
pub use responses::{ConflictCheckResponse, ErrorResponse, HealthResponse, RankResponse};
