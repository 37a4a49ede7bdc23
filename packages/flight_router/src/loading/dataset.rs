//! Readers for the two flat datasets which describe the flight network:
//! airport records and route records. Both are headerless CSV files with a
//! variable number of trailing columns; only the leading columns documented
//! here are interpreted. Malformed rows are fatal, but route rows flagged
//! with the unknown-endpoint marker are silently skipped.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::common::error::GraphError;
use crate::common::graph_data::Airport;

/// Marker used in the routes dataset for an endpoint with no known airport
const UNKNOWN_ENDPOINT: &str = "\\N";

/// Column positions of the two endpoint codes within a route row
const ROUTE_SOURCE_COL: usize = 3;
const ROUTE_TARGET_COL: usize = 5;

/// Container for one row of the airports dataset
#[derive(Debug, Clone, PartialEq)]
pub struct AirportRow {
    pub code: i64,
    pub name: String,
    pub city: String,
    pub country: String,
    pub iata: String,
    pub icao: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<AirportRow> for Airport {
    fn from(row: AirportRow) -> Airport {
        Airport {
            code: row.code,
            name: row.name,
            city: row.city,
            country: row.country,
            iata: row.iata,
            icao: row.icao,
            latitude: row.latitude,
            longitude: row.longitude,
        }
    }
}

/// Container for one usable row of the routes dataset: the two endpoint
/// codes. The edge weight is computed later, once both endpoints have been
/// resolved against the vertex table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRow {
    pub source: i64,
    pub target: i64,
}

/// Fetch a column from a record, failing with a descriptive error when the
/// row is too short
fn field<'r>(
    record: &'r StringRecord,
    col: usize,
) -> Result<&'r str, GraphError> {
    record.get(col).ok_or_else(|| {
        GraphError::InvalidDataset(format!(
            "row {:?} is missing column {}",
            record.position().map(|p| p.line()),
            col
        ))
    })
}

/// Parse a numeric column, failing with a descriptive error on junk input
fn numeric<T: std::str::FromStr>(
    record: &StringRecord,
    col: usize,
) -> Result<T, GraphError> {
    let raw = field(record, col)?;
    raw.parse::<T>().map_err(|_| {
        GraphError::InvalidDataset(format!(
            "could not interpret {:?} in column {} as a number",
            raw, col
        ))
    })
}

impl AirportRow {
    /// Interpret one record of the airports dataset. Expected layout:
    /// code, name, city, country, IATA, ICAO, latitude, longitude, ...
    fn from_record(record: &StringRecord) -> Result<AirportRow, GraphError> {
        Ok(AirportRow {
            code: numeric(record, 0)?,
            name: field(record, 1)?.to_string(),
            city: field(record, 2)?.to_string(),
            country: field(record, 3)?.to_string(),
            iata: field(record, 4)?.to_string(),
            icao: field(record, 5)?.to_string(),
            latitude: numeric(record, 6)?,
            longitude: numeric(record, 7)?,
        })
    }
}

impl RouteRow {
    /// Interpret one record of the routes dataset, or None for rows whose
    /// endpoints carry the unknown-airport marker. The dataset stores codes
    /// as doubles, so they are parsed as such and truncated
    fn from_record(
        record: &StringRecord,
    ) -> Result<Option<RouteRow>, GraphError> {
        let source = field(record, ROUTE_SOURCE_COL)?;
        let target = field(record, ROUTE_TARGET_COL)?;

        if source == UNKNOWN_ENDPOINT || target == UNKNOWN_ENDPOINT {
            return Ok(None);
        }

        let source: f64 = numeric(record, ROUTE_SOURCE_COL)?;
        let target: f64 = numeric(record, ROUTE_TARGET_COL)?;

        Ok(Some(RouteRow {
            source: source as i64,
            target: target as i64,
        }))
    }
}

/// Parse the airports dataset from any reader
pub fn parse_airports<R: Read>(
    reader: R,
) -> Result<Vec<AirportRow>, GraphError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::<AirportRow>::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(AirportRow::from_record(&record)?);
    }

    Ok(rows)
}

/// Parse the routes dataset from any reader, dropping rows with an unknown
/// endpoint
pub fn parse_routes<R: Read>(reader: R) -> Result<Vec<RouteRow>, GraphError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::<RouteRow>::new();
    for record in rdr.records() {
        let record = record?;
        if let Some(row) = RouteRow::from_record(&record)? {
            rows.push(row);
        }
    }

    Ok(rows)
}

/// Read the airports dataset from disk
pub fn read_airports(path: &Path) -> Result<Vec<AirportRow>, GraphError> {
    let file = File::open(path)?;
    parse_airports(file)
}

/// Read the routes dataset from disk
pub fn read_routes(path: &Path) -> Result<Vec<RouteRow>, GraphError> {
    let file = File::open(path)?;
    parse_routes(file)
}
