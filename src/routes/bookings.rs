use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{find_conflicts, validate_interval, Clock, ScheduleError};
use crate::models::{
    BookingStatus, ConflictCheckRequest, ConflictCheckResponse, CreateBookingRequest, ErrorResponse,
    ListBookingsQuery, UpdateStatusRequest,
};
use crate::routes::matches::validation_failed;
use crate::services::{BookingStore, StoreError};
use std::sync::Arc;
use uuid::Uuid;

/// State shared by the booking handlers
#[derive(Clone)]
pub struct BookingState {
    pub store: Arc<BookingStore>,
    pub clock: Arc<dyn Clock>,
}

/// Configure all booking-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/bookings/check", web::post().to(check_conflict))
        .route("/bookings", web::post().to(create_booking))
        .route("/bookings", web::get().to(list_bookings))
        .route("/bookings/{id}", web::get().to(get_booking))
        .route("/bookings/{id}/status", web::patch().to(update_status));
}

/// Check a time slot against a party's active bookings
///
/// POST /api/v1/bookings/check
///
/// Request body:
/// ```json
/// {
///   "partyId": "string",
///   "start": "2024-03-10T00:00:00Z",
///   "end": "2024-03-15T00:00:00Z"
/// }
/// ```
///
/// The answer is advisory: the slot may be taken before a booking is
/// created, which is why creation re-checks under a lock.
async fn check_conflict(
    state: web::Data<BookingState>,
    req: web::Json<ConflictCheckRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let interval = req.interval();
    if let Err(e) = validate_interval(&interval, state.clock.now()) {
        return schedule_error_response(e);
    }

    let existing = match state
        .store
        .reservations_for_party(&interval.party_id, interval.start, interval.end)
        .await
    {
        Ok(reservations) => reservations,
        Err(e) => return store_error_response(e),
    };

    let conflicting_ids: Vec<Uuid> = find_conflicts(&interval, &existing)
        .into_iter()
        .map(|reservation| reservation.id)
        .collect();

    tracing::debug!(
        "Conflict check for {}: {} overlapping booking(s)",
        interval.party_id,
        conflicting_ids.len()
    );

    HttpResponse::Ok().json(ConflictCheckResponse {
        conflict: !conflicting_ids.is_empty(),
        conflicting_ids,
    })
}

/// Create a booking
///
/// POST /api/v1/bookings
///
/// Request body:
/// ```json
/// {
///   "auPairId": "string",
///   "familyId": "string",
///   "start": "2024-03-10T00:00:00Z",
///   "end": "2024-03-15T00:00:00Z",
///   "notes": "string"
/// }
/// ```
async fn create_booking(
    state: web::Data<BookingState>,
    req: web::Json<CreateBookingRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match state.store.create_booking(&req, state.clock.now()).await {
        Ok(booking) => HttpResponse::Created().json(booking),
        Err(e) => store_error_response(e),
    }
}

/// List bookings of an au pair
///
/// GET /api/v1/bookings?partyId={partyId}
async fn list_bookings(
    state: web::Data<BookingState>,
    query: web::Query<ListBookingsQuery>,
) -> impl Responder {
    match state.store.list_bookings(&query.party_id).await {
        Ok(bookings) => HttpResponse::Ok().json(bookings),
        Err(e) => store_error_response(e),
    }
}

/// GET /api/v1/bookings/{id}
async fn get_booking(
    state: web::Data<BookingState>,
    path: web::Path<Uuid>,
) -> impl Responder {
    match state.store.get_booking(path.into_inner()).await {
        Ok(booking) => HttpResponse::Ok().json(booking),
        Err(e) => store_error_response(e),
    }
}

/// Move a booking through its lifecycle
///
/// PATCH /api/v1/bookings/{id}/status
///
/// Request body:
/// ```json
/// { "status": "APPROVED|REJECTED|CANCELLED|COMPLETED" }
/// ```
async fn update_status(
    state: web::Data<BookingState>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateStatusRequest>,
) -> impl Responder {
    let next: BookingStatus = match req.status.parse() {
        Ok(status) => status,
        Err(e) => {
            return HttpResponse::BadRequest().json(ErrorResponse::new(
                "Invalid status",
                format!("{}; expected one of PENDING, APPROVED, REJECTED, CANCELLED, COMPLETED", e),
                400,
            ));
        }
    };

    match state.store.update_status(path.into_inner(), next, state.clock.now()).await {
        Ok(booking) => {
            tracing::info!("Booking {} is now {}", booking.id, booking.status);
            HttpResponse::Ok().json(booking)
        }
        Err(e) => store_error_response(e),
    }
}

fn schedule_error_response(err: ScheduleError) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new("Invalid time slot", err.to_string(), 400))
}

fn store_error_response(err: StoreError) -> HttpResponse {
    match err {
        StoreError::Schedule(e) => schedule_error_response(e),
        StoreError::Conflict(_) => {
            HttpResponse::Conflict().json(ErrorResponse::new("Booking conflict", err.to_string(), 409))
        }
        StoreError::InvalidTransition { .. } => {
            HttpResponse::BadRequest().json(ErrorResponse::new("Invalid transition", err.to_string(), 400))
        }
        StoreError::NotFound(_) => {
            HttpResponse::NotFound().json(ErrorResponse::new("Not found", err.to_string(), 404))
        }
        other => {
            tracing::error!("Booking store failure: {}", other);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "Internal error",
                other.to_string(),
                500,
            ))
        }
    }
}
