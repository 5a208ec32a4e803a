use chrono::NaiveDate;

use crate::core::scoring::calculate_match_score;
use crate::models::{CandidateProfile, CounterpartyPreferences, MatchScore, RankedMatch, ScoringWeights};

/// Number of ranked matches returned when the caller does not ask for a limit
pub const DEFAULT_MATCH_LIMIT: usize = 20;

/// Result of a ranking pass
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<RankedMatch>,
    pub total_candidates: usize,
}

/// Ranking orchestrator for both sides of the marketplace
///
/// Holds only the scoring weights; every call is a pure function of its
/// arguments, so one `Matcher` can be shared freely across workers.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    /// Score a single candidate against one set of preferences
    pub fn score(
        &self,
        candidate: &CandidateProfile,
        preferences: &CounterpartyPreferences,
        today: NaiveDate,
    ) -> MatchScore {
        calculate_match_score(candidate, preferences, &self.weights, today)
    }

    /// Rank counterparties (e.g. host families) for a candidate
    ///
    /// # Arguments
    /// * `candidate` - The profile being matched
    /// * `counterparties` - Preferences of every potential counterparty
    /// * `limit` - Maximum number of matches to return
    /// * `today` - Reference date for age calculations
    ///
    /// # Returns
    /// MatchResult with matches sorted by descending score; equal scores keep
    /// their input order
    pub fn rank_counterparties(
        &self,
        candidate: &CandidateProfile,
        counterparties: Vec<CounterpartyPreferences>,
        limit: usize,
        today: NaiveDate,
    ) -> MatchResult {
        let total_candidates = counterparties.len();

        let scored = counterparties.into_iter().map(|preferences| {
            let result = self.score(candidate, &preferences, today);
            into_ranked(preferences.user_id, result)
        });

        MatchResult {
            matches: sort_and_truncate(scored.collect(), limit),
            total_candidates,
        }
    }

    /// Rank candidates (e.g. au pairs) against one counterparty's preferences
    pub fn rank_candidates(
        &self,
        preferences: &CounterpartyPreferences,
        candidates: Vec<CandidateProfile>,
        limit: usize,
        today: NaiveDate,
    ) -> MatchResult {
        let total_candidates = candidates.len();

        let scored = candidates.into_iter().map(|candidate| {
            let result = self.score(&candidate, preferences, today);
            into_ranked(candidate.user_id, result)
        });

        MatchResult {
            matches: sort_and_truncate(scored.collect(), limit),
            total_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

fn into_ranked(user_id: String, result: MatchScore) -> RankedMatch {
    RankedMatch {
        user_id,
        score: result.score,
        breakdown: result.breakdown,
        shared_languages: result.shared_languages,
    }
}

/// Sort by score (descending) and keep the top `limit`
///
/// `sort_by` is stable, so ties stay in input order.
fn sort_and_truncate(mut matches: Vec<RankedMatch>, limit: usize) -> Vec<RankedMatch> {
    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches.truncate(limit);
    matches
}
