use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{Clock, Matcher};
use crate::models::{ErrorResponse, RankCandidatesRequest, RankCounterpartiesRequest, RankResponse, ScoreRequest};
use std::sync::Arc;

/// State shared by the matching handlers
#[derive(Clone)]
pub struct MatchState {
    pub matcher: Matcher,
    pub clock: Arc<dyn Clock>,
    pub default_limit: u16,
    pub max_limit: u16,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/matches/score", web::post().to(score_match))
        .route("/matches/rank", web::post().to(rank_counterparties))
        .route("/matches/rank-candidates", web::post().to(rank_candidates));
}

/// Score one candidate against one counterparty
///
/// POST /api/v1/matches/score
///
/// Request body:
/// ```json
/// {
///   "candidate": { "userId": "string", "languages": ["string"], ... },
///   "counterparty": { "userId": "string", "preferredLanguages": ["string"], ... }
/// }
/// ```
async fn score_match(
    state: web::Data<MatchState>,
    req: web::Json<ScoreRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let result = state
        .matcher
        .score(&req.candidate, &req.counterparty, state.clock.today());

    tracing::debug!(
        "Scored {} against {}: {}",
        req.candidate.user_id,
        req.counterparty.user_id,
        result.score
    );

    HttpResponse::Ok().json(result)
}

/// Rank counterparties for a candidate
///
/// POST /api/v1/matches/rank
///
/// Request body:
/// ```json
/// {
///   "candidate": { ... },
///   "counterparties": [{ ... }],
///   "limit": 20
/// }
/// ```
async fn rank_counterparties(
    state: web::Data<MatchState>,
    req: web::Json<RankCounterpartiesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let req = req.into_inner();
    // Cap limit to keep responses bounded
    let limit = req.limit.unwrap_or(state.default_limit).min(state.max_limit) as usize;

    let result = state.matcher.rank_counterparties(
        &req.candidate,
        req.counterparties,
        limit,
        state.clock.today(),
    );

    tracing::info!(
        "Returning {} matches for candidate {} (from {} counterparties)",
        result.matches.len(),
        req.candidate.user_id,
        result.total_candidates
    );

    HttpResponse::Ok().json(RankResponse {
        matches: result.matches,
        total_results: result.total_candidates,
    })
}

/// Rank candidates for a counterparty's preferences
///
/// POST /api/v1/matches/rank-candidates
async fn rank_candidates(
    state: web::Data<MatchState>,
    req: web::Json<RankCandidatesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let req = req.into_inner();
    let limit = req.limit.unwrap_or(state.default_limit).min(state.max_limit) as usize;

    let result = state.matcher.rank_candidates(
        &req.preferences,
        req.candidates,
        limit,
        state.clock.today(),
    );

    tracing::info!(
        "Returning {} candidates for {} (from {} candidates)",
        result.matches.len(),
        req.preferences.user_id,
        result.total_candidates
    );

    HttpResponse::Ok().json(RankResponse {
        matches: result.matches,
        total_results: result.total_candidates,
    })
}

pub(crate) fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    tracing::info!("Validation failed: field_errors={:?}", errors);
    HttpResponse::BadRequest().json(ErrorResponse::new(
        "Validation failed",
        errors.to_string(),
        400,
    ))
}
