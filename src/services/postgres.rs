use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgExecutor, PgPool, Row};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::core::{find_conflicts, validate_interval, ScheduleError};
use crate::models::{Booking, BookingStatus, CreateBookingRequest, ExistingReservation, UnknownStatus};

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Requested slot overlaps {} existing booking(s)", .0.len())]
    Conflict(Vec<Uuid>),

    #[error("Cannot move booking from {from} to {to}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error("Corrupt booking row: {0}")]
    InvalidStatus(#[from] UnknownStatus),
}

const BOOKING_COLUMNS: &str =
    "id, au_pair_id, family_id, start_at, end_at, status, notes, created_at, updated_at";

/// PostgreSQL store for bookings
///
/// Owns the authoritative schedule of every au pair. Conflict checks done
/// by callers ahead of time can be stale, so `create_booking` repeats the
/// check inside the inserting transaction.
pub struct BookingStore {
    pool: PgPool,
}

impl BookingStore {
    /// Create a new store from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new store from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Create a booking if the au pair's schedule is free
    ///
    /// Takes a transaction-scoped advisory lock on the au pair so that two
    /// concurrent requests for the same schedule are serialized, then
    /// re-reads the active reservations and re-runs the conflict check
    /// before inserting. The new booking starts out `PENDING`.
    pub async fn create_booking(
        &self,
        request: &CreateBookingRequest,
        now: DateTime<Utc>,
    ) -> Result<Booking, StoreError> {
        let interval = request.interval();
        validate_interval(&interval, now)?;

        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(&request.au_pair_id)
            .execute(&mut *tx)
            .await?;

        let existing =
            active_reservations(&mut *tx, &request.au_pair_id, interval.start, interval.end).await?;

        let conflicts = find_conflicts(&interval, &existing);
        if !conflicts.is_empty() {
            let ids: Vec<Uuid> = conflicts.iter().map(|r| r.id).collect();
            tracing::debug!(
                "Rejected booking for {}: overlaps {:?}",
                request.au_pair_id,
                ids
            );
            return Err(StoreError::Conflict(ids));
        }

        let query = format!(
            r#"
            INSERT INTO bookings (id, au_pair_id, family_id, start_at, end_at, status, notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            RETURNING {BOOKING_COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(Uuid::new_v4())
            .bind(&request.au_pair_id)
            .bind(&request.family_id)
            .bind(interval.start)
            .bind(interval.end)
            .bind(BookingStatus::Pending.as_str())
            .bind(&request.notes)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        let booking = booking_from_row(&row)?;

        tracing::info!(
            "Created booking {} for au pair {} with family {}",
            booking.id,
            booking.au_pair_id,
            booking.family_id
        );

        Ok(booking)
    }

    /// Move a booking to a new status
    ///
    /// Locks the row for the duration of the transaction and rejects any
    /// transition the booking lifecycle does not allow. `now` is stamped as
    /// the update time.
    pub async fn update_status(
        &self,
        booking_id: Uuid,
        next: BookingStatus,
        now: DateTime<Utc>,
    ) -> Result<Booking, StoreError> {
        let mut tx = self.pool.begin().await?;

        let current: Option<String> =
            sqlx::query_scalar("SELECT status FROM bookings WHERE id = $1 FOR UPDATE")
                .bind(booking_id)
                .fetch_optional(&mut *tx)
                .await?;

        let current: BookingStatus = current
            .ok_or_else(|| StoreError::NotFound(format!("Booking {}", booking_id)))?
            .parse()?;

        if !current.can_transition_to(next) {
            return Err(StoreError::InvalidTransition {
                from: current,
                to: next,
            });
        }

        let query = format!(
            r#"
            UPDATE bookings
            SET status = $2, updated_at = $3
            WHERE id = $1
            RETURNING {BOOKING_COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(booking_id)
            .bind(next.as_str())
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!("Booking {}: {} -> {}", booking_id, current, next);

        booking_from_row(&row)
    }

    /// Get a single booking
    pub async fn get_booking(&self, booking_id: Uuid) -> Result<Booking, StoreError> {
        let query = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1");

        let row = sqlx::query(&query)
            .bind(booking_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("Booking {}", booking_id)))?;

        booking_from_row(&row)
    }

    /// Get every booking on an au pair's schedule, earliest first
    pub async fn list_bookings(&self, au_pair_id: &str) -> Result<Vec<Booking>, StoreError> {
        let query = format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE au_pair_id = $1 ORDER BY start_at"
        );

        let rows = sqlx::query(&query)
            .bind(au_pair_id)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(booking_from_row).collect()
    }

    /// Get the active reservations that may collide with `[start, end]`
    pub async fn reservations_for_party(
        &self,
        party_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ExistingReservation>, StoreError> {
        active_reservations(&self.pool, party_id, start, end).await
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

/// Load a party's pending and approved reservations around a window
///
/// The SQL only narrows the rows; the overlap decision itself is left to
/// `find_conflicts`.
async fn active_reservations<'e, E>(
    executor: E,
    party_id: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<ExistingReservation>, StoreError>
where
    E: PgExecutor<'e>,
{
    let query = format!(
        r#"
        SELECT {BOOKING_COLUMNS}
        FROM bookings
        WHERE au_pair_id = $1
          AND status IN ('PENDING', 'APPROVED')
          AND start_at <= $3
          AND end_at >= $2
        "#
    );

    let rows = sqlx::query(&query)
        .bind(party_id)
        .bind(start)
        .bind(end)
        .fetch_all(executor)
        .await?;

    rows.iter()
        .map(|row| booking_from_row(row).map(|booking| booking.reservation()))
        .collect()
}

fn booking_from_row(row: &PgRow) -> Result<Booking, StoreError> {
    let status: String = row.try_get("status")?;

    Ok(Booking {
        id: row.try_get("id")?,
        au_pair_id: row.try_get("au_pair_id")?,
        family_id: row.try_get("family_id")?,
        start: row.try_get("start_at")?,
        end: row.try_get("end_at")?,
        status: status.parse()?,
        notes: row.try_get("notes")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
