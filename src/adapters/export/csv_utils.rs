//! CSV export of audited evaluations. Uses the `csv` crate for quoting and escaping.

use crate::domain::EvaluationRecord;
use chrono::{DateTime, Utc};

const HEADER: [&str; 9] = [
    "id",
    "timestamp",
    "caller",
    "mode",
    "ck_value",
    "transaminase",
    "bilirubin",
    "muscle_symptoms",
    "recommendation",
];

/// Convert records to a comma-delimited CSV string with a header row.
///
/// Myopathy-only records leave the liver columns empty. The multi-line
/// recommendation text is kept intact inside a quoted field.
pub fn records_to_csv(records: &[EvaluationRecord]) -> Result<String, csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    wtr.write_record(HEADER)?;

    for r in records {
        let timestamp = DateTime::<Utc>::from_timestamp(r.created_at, 0)
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| r.created_at.to_string());
        let optional = |v: Option<f64>| v.map(|x| x.to_string()).unwrap_or_default();

        wtr.write_record([
            r.id.to_string(),
            timestamp,
            r.caller.clone(),
            r.mode.to_string(),
            r.ck_value.to_string(),
            optional(r.transaminase),
            optional(r.bilirubin),
            r.muscle_symptoms.to_string(),
            r.recommendation.clone(),
        ])?;
    }

    wtr.flush()?;
    let bytes = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(std::io::Error::other(e.to_string())))?;

    String::from_utf8(bytes).map_err(|e| {
        csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e.to_string(),
        ))
    })
}
