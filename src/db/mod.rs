use std::str::FromStr;

use chrono::NaiveDate;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::error::{StorageError, StorageResult};
use crate::models::booking::{Booking, NewBooking};

const CREATE_BOOKINGS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS Bookings (
        Bookingid INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
        Name TEXT NOT NULL,
        Phone TEXT NOT NULL,
        Email TEXT,
        ArrivalDate DATE NOT NULL,
        DepartureDate DATE NOT NULL,
        Notes TEXT
    )
"#;

/// Owner of the `Bookings` table. Cheap to clone; clones share one pool.
#[derive(Clone, Debug)]
pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    /// Open (creating if needed) the SQLite database at `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> StorageResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(StorageError::Unavailable)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(StorageError::Unavailable)?;

        Ok(Self { pool })
    }

    /// Private in-memory database. Pinned to a single connection that is never
    /// recycled, since every SQLite memory connection is its own database.
    pub async fn in_memory() -> StorageResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .map_err(StorageError::Unavailable)?;
        Ok(Self { pool })
    }

    /// Create the bookings table if it does not exist yet.
    pub async fn initialize(&self) -> StorageResult<()> {
        sqlx::query(CREATE_BOOKINGS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Unavailable)?;
        log::debug!("bookings table ready");
        Ok(())
    }

    /// Arrival and departure of every booking, in storage order.
    pub async fn list_booked_ranges(&self) -> StorageResult<Vec<(NaiveDate, NaiveDate)>> {
        let ranges = sqlx::query_as::<_, (NaiveDate, NaiveDate)>(
            "SELECT ArrivalDate, DepartureDate FROM Bookings",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(ranges)
    }

    /// Insert a booking and return its newly assigned id.
    pub async fn create_booking(&self, booking: &NewBooking) -> StorageResult<i64> {
        let (arrival, departure) = booking.required_dates()?;

        let result = sqlx::query(
            r#"
            INSERT INTO Bookings (Name, Phone, ArrivalDate, DepartureDate, Notes, Email)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&booking.name)
        .bind(&booking.phone)
        .bind(arrival)
        .bind(departure)
        .bind(&booking.notes)
        .bind(&booking.email)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        log::debug!("created booking {id} ({arrival} to {departure})");
        Ok(id)
    }

    /// All bookings, or only those arriving strictly after `after`.
    pub async fn list_bookings(&self, after: Option<NaiveDate>) -> StorageResult<Vec<Booking>> {
        let bookings = match after {
            Some(date) => {
                sqlx::query_as::<_, Booking>("SELECT * FROM Bookings WHERE ArrivalDate > ?")
                    .bind(date)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_as::<_, Booking>("SELECT * FROM Bookings")
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(bookings)
    }

    pub async fn get_booking(&self, id: i64) -> StorageResult<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM Bookings WHERE Bookingid = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(booking)
    }

    /// Delete a booking. Unknown ids are not an error.
    pub async fn remove_booking(&self, id: i64) -> StorageResult<()> {
        let result = sqlx::query("DELETE FROM Bookings WHERE Bookingid = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        log::debug!(
            "remove booking {id}: {} row(s) affected",
            result.rows_affected()
        );
        Ok(())
    }

    /// Close the pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests;
