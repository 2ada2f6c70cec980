use serde::{Serialize, Serializer};
use serde_json::Value;
use sqlx::{
    error::BoxDynError,
    sqlite::{SqliteTypeInfo, SqliteValueRef},
    Decode, FromRow, Sqlite, Type, TypeInfo, ValueRef,
};

use crate::error::AppError;

/// Keys a submission must carry, in `trips` column order.
pub const REQUIRED_FIELDS: [&str; 13] = [
    "trip_number",
    "origin_lat",
    "origin_long",
    "start_time",
    "destination_lat",
    "destination_long",
    "end_time",
    "mode",
    "distance",
    "purpose",
    "companions",
    "frequency",
    "cost",
];

/// One stored row. Columns other than `id` carry whatever SQLite holds for
/// them, read by the value's runtime type rather than the declared one.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Trip {
    pub id: i64,
    pub trip_number: FieldValue,
    pub origin_lat: FieldValue,
    pub origin_long: FieldValue,
    pub start_time: FieldValue,
    pub destination_lat: FieldValue,
    pub destination_long: FieldValue,
    pub end_time: FieldValue,
    pub mode: FieldValue,
    pub distance: FieldValue,
    pub purpose: FieldValue,
    pub companions: FieldValue,
    pub frequency: FieldValue,
    pub cost: FieldValue,
}

impl Trip {
    /// Distance as a number; see [`FieldValue::amount`].
    pub fn distance_amount(&self) -> Result<f64, AppError> {
        self.distance.amount(self.id, "distance")
    }

    /// Calendar-date key: the first ten characters of `start_time`, or
    /// whatever shorter prefix exists.
    pub fn date_key(&self) -> String {
        match &self.start_time {
            FieldValue::Null => String::new(),
            other => other.key_text().chars().take(10).collect(),
        }
    }
}

/// A scalar as SQLite stores it: bound as-is on insert, read back by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl FieldValue {
    /// Numeric reading for summing and rounding. NULL and empty text read
    /// as zero; any other text is not a number.
    pub fn amount(&self, id: i64, column: &'static str) -> Result<f64, AppError> {
        match self {
            FieldValue::Null => Ok(0.0),
            FieldValue::Integer(int) => Ok(*int as f64),
            FieldValue::Real(real) => Ok(*real),
            FieldValue::Text(text) if text.is_empty() => Ok(0.0),
            FieldValue::Text(_) => Err(AppError::NonNumeric { id, column }),
        }
    }

    /// Text used when the value becomes a grouping key.
    pub fn key_text(&self) -> String {
        match self {
            FieldValue::Null => "null".to_string(),
            FieldValue::Integer(int) => int.to_string(),
            FieldValue::Real(real) => format!("{real:?}"),
            FieldValue::Text(text) => text.clone(),
        }
    }
}

impl From<&Value> for FieldValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(flag) => FieldValue::Integer(i64::from(*flag)),
            Value::Number(number) => match (number.as_i64(), number.as_f64()) {
                (Some(int), _) => FieldValue::Integer(int),
                (None, Some(real)) => FieldValue::Real(real),
                (None, None) => FieldValue::Text(number.to_string()),
            },
            Value::String(text) => FieldValue::Text(text.clone()),
            Value::Array(_) | Value::Object(_) => FieldValue::Text(value.to_string()),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Null => serializer.serialize_none(),
            FieldValue::Integer(int) => serializer.serialize_i64(*int),
            FieldValue::Real(real) => serializer.serialize_f64(*real),
            FieldValue::Text(text) => serializer.serialize_str(text),
        }
    }
}

impl Type<Sqlite> for FieldValue {
    fn type_info() -> SqliteTypeInfo {
        <String as Type<Sqlite>>::type_info()
    }

    fn compatible(_ty: &SqliteTypeInfo) -> bool {
        true
    }
}

impl<'r> Decode<'r, Sqlite> for FieldValue {
    fn decode(value: SqliteValueRef<'r>) -> Result<Self, BoxDynError> {
        if value.is_null() {
            return Ok(FieldValue::Null);
        }
        let kind = value.type_info().name().to_string();
        let decoded = match kind.as_str() {
            "INTEGER" | "BOOLEAN" => {
                FieldValue::Integer(<i64 as Decode<Sqlite>>::decode(value)?)
            }
            "REAL" | "NUMERIC" => FieldValue::Real(<f64 as Decode<Sqlite>>::decode(value)?),
            "BLOB" => {
                let bytes = <Vec<u8> as Decode<Sqlite>>::decode(value)?;
                FieldValue::Text(String::from_utf8_lossy(&bytes).into_owned())
            }
            _ => FieldValue::Text(<String as Decode<Sqlite>>::decode(value)?),
        };
        Ok(decoded)
    }
}

/// The thirteen caller-supplied columns of a new trip, in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct TripSubmission {
    values: Vec<FieldValue>,
}

impl TripSubmission {
    /// Accepts any JSON object carrying every key in [`REQUIRED_FIELDS`].
    /// Only presence is checked; extra keys are ignored.
    pub fn from_json(body: &Value) -> Result<Self, AppError> {
        let Some(object) = body.as_object() else {
            return Err(AppError::MissingFields(REQUIRED_FIELDS.to_vec()));
        };

        let missing: Vec<&'static str> = REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|field| !object.contains_key(*field))
            .collect();
        if !missing.is_empty() {
            return Err(AppError::MissingFields(missing));
        }

        let values = REQUIRED_FIELDS
            .iter()
            .map(|field| FieldValue::from(&object[*field]))
            .collect();
        Ok(Self { values })
    }

    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }
}

/// Export row: coordinates and `id` removed, money and distance rounded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnonymizedTrip {
    pub trip_number: FieldValue,
    pub start_time: FieldValue,
    pub end_time: FieldValue,
    pub mode: FieldValue,
    pub distance: FieldValue,
    pub purpose: FieldValue,
    pub companions: FieldValue,
    pub frequency: FieldValue,
    pub cost: FieldValue,
}
