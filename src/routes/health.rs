use actix_web::{web, HttpResponse, Responder};
use crate::models::HealthResponse;
use crate::routes::bookings::BookingState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

/// Health check endpoint
async fn health_check(state: web::Data<BookingState>) -> impl Responder {
    // Check PostgreSQL health
    let pg_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: state.clock.now(),
    })
}
