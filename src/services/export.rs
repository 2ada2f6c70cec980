use crate::{
    error::AppError,
    models::trip::{AnonymizedTrip, FieldValue, Trip},
};

pub const EXPORT_FILENAME: &str = "anonymized_trip_data.json";

/// Strips coordinates and ids, rounds distance to 0.1 and cost to 0.01.
///
/// Fails only when a stored distance or cost is text that cannot be rounded.
pub fn anonymize(trips: &[Trip]) -> Result<Vec<AnonymizedTrip>, AppError> {
    trips
        .iter()
        .map(|trip| {
            Ok(AnonymizedTrip {
                trip_number: trip.trip_number.clone(),
                start_time: trip.start_time.clone(),
                end_time: trip.end_time.clone(),
                mode: trip.mode.clone(),
                distance: round_amount(&trip.distance, trip.id, "distance", 1)?,
                purpose: trip.purpose.clone(),
                companions: trip.companions.clone(),
                frequency: trip.frequency.clone(),
                cost: round_amount(&trip.cost, trip.id, "cost", 2)?,
            })
        })
        .collect()
}

/// Blank amounts become the integer 0 and integers pass through. Reals are
/// rounded on their exact binary value, exact halves going to the even digit.
fn round_amount(
    value: &FieldValue,
    id: i64,
    column: &'static str,
    decimals: usize,
) -> Result<FieldValue, AppError> {
    let amount = value.amount(id, column)?;
    let rounded = match value {
        _ if amount == 0.0 => FieldValue::Integer(0),
        FieldValue::Integer(int) => FieldValue::Integer(*int),
        _ => {
            let rounded = format!("{amount:.decimals$}")
                .parse::<f64>()
                .map_err(|err| AppError::Other(err.into()))?;
            FieldValue::Real(rounded)
        }
    };
    Ok(rounded)
}
