//! Microdata loading.
//!
//! Reads an AHS national microdata CSV extract into immutable [UnitRecord]s. Columns are resolved
//! by name before any row is processed; a missing required column is fatal. Record-level
//! problems, such as an invalid sampling weight, skip the record and never abort the run.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{event, Level};

use crate::categories;
use crate::error::TabulationError;
use crate::models::{FeatureId, Indicator, UnitRecord};

/// Sampling weight column
pub const WEIGHT_COLUMN: &str = "WEIGHT";

/// Year built column
pub const YEAR_BUILT_COLUMN: &str = "YRBUILT";

/// Units-in-structure column
pub const UNITSIZE_COLUMN: &str = "UNITSIZE";

/// AHS topical module variables carrying a direct accessibility indicator.
pub const FEATURE_VARIABLES: [(&str, FeatureId); 6] = [
    ("NOSTEP", FeatureId::NoStepEntrance),
    ("HARAMP", FeatureId::WheelchairRamp),
    ("MHWIDE", FeatureId::WideDoorways),
    ("HMRACCESS", FeatureId::AccessibleBathroom),
    ("HABEDENTRY", FeatureId::BedroomOnEntryLevel),
    ("HABATHENTRY", FeatureId::BathroomOnEntryLevel),
];

/// Variables identifying households with accessibility needs: mobility device use, difficulty
/// accessing rooms, and difficulty walking or climbing stairs.
pub const NEEDS_VARIABLES: [&str; 6] = [
    "CANE",
    "HAGETHOME",
    "HAGETKIT",
    "HAGETBATH",
    "HAGETBED",
    "HHWALK",
];

/// Resolved indices of the required source columns.
struct Columns {
    weight: usize,
    year_built: usize,
    unitsize: usize,
    features: Vec<(FeatureId, usize)>,
    needs: Vec<usize>,
}

impl Columns {
    /// Resolve all required columns against the source header.
    fn resolve(headers: &csv::StringRecord) -> Result<Columns, TabulationError> {
        Ok(Columns {
            weight: find_column(headers, WEIGHT_COLUMN)?,
            year_built: find_column(headers, YEAR_BUILT_COLUMN)?,
            unitsize: find_column(headers, UNITSIZE_COLUMN)?,
            features: FEATURE_VARIABLES
                .iter()
                .map(|(name, feature)| Ok((*feature, find_column(headers, name)?)))
                .collect::<Result<Vec<_>, TabulationError>>()?,
            needs: NEEDS_VARIABLES
                .iter()
                .map(|name| find_column(headers, name))
                .collect::<Result<Vec<_>, TabulationError>>()?,
        })
    }
}

/// Return the index of a named column in the header.
fn find_column(
    headers: &csv::StringRecord,
    name: &'static str,
) -> Result<usize, TabulationError> {
    headers
        .iter()
        .position(|header| header.trim() == name)
        .ok_or(TabulationError::SchemaMismatch { column: name })
}

/// Strip the surrounding single quotes that AHS SAS-flat extracts put around coded values, e.g.
/// `'1'`.
fn strip_code(raw: &str) -> &str {
    raw.trim().trim_matches('\'')
}

/// Parse a sampling weight, returning `None` unless it is a finite positive number.
fn parse_weight(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|raw| strip_code(raw).parse::<f64>().ok())
        .filter(|weight| weight.is_finite() && *weight > 0.0)
}

/// Parse a year-built value, tolerating a decimal representation.
fn parse_year(raw: Option<&str>) -> Option<i32> {
    raw.and_then(|raw| strip_code(raw).parse::<f64>().ok())
        .filter(|year| year.is_finite())
        .map(|year| year as i32)
}

/// Load unit records from an AHS microdata CSV extract.
///
/// # Arguments
///
/// * `path`: Path of the CSV extract
pub fn load_microdata(path: &Path) -> Result<Vec<UnitRecord>, TabulationError> {
    let file = File::open(path).map_err(|source| TabulationError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    read_records(file)
}

/// Read unit records from CSV microdata.
///
/// Schema problems are fatal before any row is read. Rows with an invalid sampling weight are
/// skipped; rows with unmapped bucket values are kept, carrying `None` for that dimension.
pub fn read_records<R: Read>(source: R) -> Result<Vec<UnitRecord>, TabulationError> {
    let mut reader = csv::Reader::from_reader(source);
    let columns = Columns::resolve(reader.headers()?)?;

    let mut records = Vec::new();
    let mut skipped = 0_usize;
    for (row, result) in reader.records().enumerate() {
        let record = result?;
        let Some(weight) = parse_weight(record.get(columns.weight)) else {
            skipped += 1;
            event!(Level::DEBUG, "skipping row {}: invalid sampling weight", row + 1);
            continue;
        };

        let age = parse_year(record.get(columns.year_built)).and_then(categories::age_bucket);
        let structure = record
            .get(columns.unitsize)
            .and_then(|raw| categories::structure_bucket(strip_code(raw)));

        let mut features = BTreeMap::new();
        for (feature, index) in &columns.features {
            let indicator = record
                .get(*index)
                .map_or(Indicator::Missing, |raw| Indicator::from_code(strip_code(raw)));
            features.insert(*feature, indicator);
        }

        let has_accessibility_needs = columns.needs.iter().any(|index| {
            record
                .get(*index)
                .is_some_and(|raw| Indicator::from_code(strip_code(raw)) == Indicator::Present)
        });

        records.push(UnitRecord {
            age,
            structure,
            weight,
            features,
            has_accessibility_needs,
        });
    }

    event!(
        Level::INFO,
        "loaded {} records ({} skipped)",
        records.len(),
        skipped
    );
    Ok(records)
}
