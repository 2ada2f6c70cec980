use sqlx::sqlite::SqliteQueryResult;
use tracing::debug;

use crate::{
    db::TripStore,
    error::AppError,
    models::trip::{FieldValue, Trip, TripSubmission},
};

const INSERT_TRIP: &str = r#"
    INSERT INTO trips (trip_number, origin_lat, origin_long, start_time, destination_lat,
                       destination_long, end_time, mode, distance, purpose, companions,
                       frequency, cost)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
"#;

const SELECT_TRIPS: &str = r#"
    SELECT id, trip_number, origin_lat, origin_long, start_time, destination_lat,
           destination_long, end_time, mode, distance, purpose, companions, frequency, cost
    FROM trips
    ORDER BY id
"#;

/// Insert-one and select-all over the `trips` table. Each call runs on its
/// own connection, released before the result is returned.
#[derive(Debug, Clone)]
pub struct TripRepository {
    store: TripStore,
}

impl TripRepository {
    pub fn new(store: TripStore) -> Self {
        Self { store }
    }

    /// Appends one row and returns its store-assigned id.
    pub async fn insert(&self, submission: &TripSubmission) -> Result<i64, AppError> {
        let mut query = sqlx::query(INSERT_TRIP);
        for value in submission.values() {
            query = match value {
                FieldValue::Null => query.bind(None::<String>),
                FieldValue::Integer(int) => query.bind(*int),
                FieldValue::Real(real) => query.bind(*real),
                FieldValue::Text(text) => query.bind(text.clone()),
            };
        }

        let mut conn = self.store.open().await?;
        let outcome: Result<SqliteQueryResult, sqlx::Error> = query.execute(&mut conn).await;
        self.store.release(conn).await;

        Ok(outcome?.last_insert_rowid())
    }

    /// Every row in insertion order.
    pub async fn list_all(&self) -> Result<Vec<Trip>, AppError> {
        let mut conn = self.store.open().await?;
        let outcome = sqlx::query_as::<_, Trip>(SELECT_TRIPS)
            .fetch_all(&mut conn)
            .await;
        self.store.release(conn).await;

        let trips = outcome?;
        debug!(count = trips.len(), "loaded trips");
        Ok(trips)
    }
}
