// Service exports
pub mod postgres;

pub use postgres::{BookingStore, StoreError};
