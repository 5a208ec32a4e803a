// Route exports
pub mod bookings;
pub mod health;
pub mod matches;

use actix_web::web;

pub use bookings::BookingState;
pub use matches::MatchState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(health::configure)
            .configure(matches::configure)
            .configure(bookings::configure),
    );
}
