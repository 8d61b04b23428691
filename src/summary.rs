//! Summary table emission.
//!
//! Serialises aggregated rows into the flat JSON artifacts consumed by the visualisation front
//! end: one table keyed by building age, one keyed by structure type, and a metadata record.
//! Emission is deterministic; identical input records always produce identical artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{event, Level};

use crate::error::TabulationError;
use crate::models::{AgeBucket, AggregateRow, FeatureId, StructureBucket, UnitRecord};

/// File name of the age-keyed summary table
pub const BY_AGE_FILE: &str = "accessibility_by_age.json";

/// File name of the structure-keyed summary table
pub const BY_STRUCTURE_FILE: &str = "accessibility_by_structure.json";

/// File name of the metadata record
pub const METADATA_FILE: &str = "metadata.json";

/// One emitted summary table row
///
/// Field names are the stable schema contract with the presentation layer.
#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub struct SummaryRow {
    /// Display label of the feature
    pub feature: String,
    /// Bucket label under the dimension's field name
    #[serde(flatten)]
    pub category: Category,
    /// Weighted percentage of applicable units reporting the feature
    pub percent_with_feature: f64,
    /// Total weight of units behind the percentage
    pub total_units: f64,
    /// Population the row was computed over
    pub population: String,
}

/// A bucket label, tagged with its dimension's field name.
#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub enum Category {
    /// Building age bucket label
    #[serde(rename = "age_category")]
    Age(String),
    /// Structure type bucket label
    #[serde(rename = "structure_type")]
    Structure(String),
}

impl From<&AggregateRow<AgeBucket>> for SummaryRow {
    fn from(row: &AggregateRow<AgeBucket>) -> SummaryRow {
        SummaryRow {
            feature: row.feature.to_string(),
            category: Category::Age(row.bucket.to_string()),
            percent_with_feature: row.percent_with_feature,
            total_units: row.total_units,
            population: row.population.to_string(),
        }
    }
}

impl From<&AggregateRow<StructureBucket>> for SummaryRow {
    fn from(row: &AggregateRow<StructureBucket>) -> SummaryRow {
        SummaryRow {
            feature: row.feature.to_string(),
            category: Category::Structure(row.bucket.to_string()),
            percent_with_feature: row.percent_with_feature,
            total_units: row.total_units,
            population: row.population.to_string(),
        }
    }
}

/// Metadata describing one batch run's output.
#[derive(Debug, Deserialize, Serialize)]
pub struct Metadata {
    /// Survey year
    pub year: u16,
    /// Source survey description
    pub source: String,
    /// Total weighted units represented by the loaded records
    pub total_units: u64,
    /// Number of records loaded
    pub sample_size: usize,
    /// Display labels of the analysed features
    pub features_analyzed: Vec<String>,
    /// Methodology note
    pub note: String,
}

impl Metadata {
    /// Return a Metadata record for a set of loaded records.
    pub fn new(year: u16, records: &[UnitRecord]) -> Metadata {
        Metadata {
            year,
            source: format!(
                "American Housing Survey {} (Accessibility Topical Module)",
                year
            ),
            total_units: records.iter().map(|record| record.weight).sum::<f64>() as u64,
            sample_size: records.len(),
            features_analyzed: FeatureId::ALL
                .iter()
                .map(|feature| feature.to_string())
                .collect(),
            note: "Percentages are weighted estimates; missing and not applicable responses are \
                   excluded."
                .to_string(),
        }
    }
}

/// Serialise a value as pretty JSON into a file in the output directory.
fn write_artifact<T: Serialize>(
    dir: &Path,
    file: &str,
    value: &T,
) -> Result<PathBuf, TabulationError> {
    let path = dir.join(file);
    let body = serde_json::to_string_pretty(value)?;
    fs::write(&path, body).map_err(|source| TabulationError::WriteArtifact {
        path: path.clone(),
        source,
    })?;
    event!(Level::INFO, "wrote {}", path.display());
    Ok(path)
}

/// Write the two summary tables and the metadata artifact.
///
/// Returns the paths of the written artifacts.
///
/// # Arguments
///
/// * `dir`: Output directory, created if absent
/// * `by_age`: Aggregated rows keyed by building age
/// * `by_structure`: Aggregated rows keyed by structure type
/// * `metadata`: Metadata record for the run
pub fn write_tables(
    dir: &Path,
    by_age: &[AggregateRow<AgeBucket>],
    by_structure: &[AggregateRow<StructureBucket>],
    metadata: &Metadata,
) -> Result<Vec<PathBuf>, TabulationError> {
    fs::create_dir_all(dir).map_err(|source| TabulationError::WriteArtifact {
        path: dir.to_path_buf(),
        source,
    })?;
    let age_rows: Vec<SummaryRow> = by_age.iter().map(SummaryRow::from).collect();
    let structure_rows: Vec<SummaryRow> = by_structure.iter().map(SummaryRow::from).collect();
    Ok(vec![
        write_artifact(dir, BY_AGE_FILE, &age_rows)?,
        write_artifact(dir, BY_STRUCTURE_FILE, &structure_rows)?,
        write_artifact(dir, METADATA_FILE, metadata)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    use crate::models::{Indicator, Population};
    use crate::test_utils::{get_test_record, with_feature};

    fn get_test_row() -> AggregateRow<AgeBucket> {
        AggregateRow {
            feature: FeatureId::NoStepEntrance,
            bucket: AgeBucket::Since2010,
            percent_with_feature: 85.7,
            total_units: 3500.0,
            population: Population::All,
        }
    }

    #[test]
    fn summary_row_fields() {
        let row = SummaryRow::from(&get_test_row());
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(
            json!({
                "feature": "No-step entrance",
                "age_category": "2010 or later",
                "percent_with_feature": 85.7,
                "total_units": 3500.0,
                "population": "all",
            }),
            value
        );
    }

    #[test]
    fn structure_row_field_name() {
        let row = AggregateRow {
            feature: FeatureId::WideDoorways,
            bucket: StructureBucket::Units50Plus,
            percent_with_feature: 40.0,
            total_units: 100.0,
            population: Population::WithNeeds,
        };
        let value = serde_json::to_value(SummaryRow::from(&row)).unwrap();
        assert_eq!("50+ units", value["structure_type"]);
        assert_eq!("with_needs", value["population"]);
    }

    #[test]
    fn summary_row_round_trip() {
        let row = SummaryRow::from(&get_test_row());
        let body = serde_json::to_string(&row).unwrap();
        let parsed: SummaryRow = serde_json::from_str(&body).unwrap();
        assert_eq!(row, parsed);
    }

    #[test]
    fn metadata_totals() {
        let records = vec![
            with_feature(
                get_test_record(1000.5),
                FeatureId::NoStepEntrance,
                Indicator::Present,
            ),
            get_test_record(2000.0),
        ];
        let metadata = Metadata::new(2019, &records);
        assert_eq!(2019, metadata.year);
        assert_eq!(3000, metadata.total_units);
        assert_eq!(2, metadata.sample_size);
        assert_eq!(7, metadata.features_analyzed.len());
        assert!(metadata.source.contains("2019"));
    }

    #[test]
    fn write_tables_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let by_age = vec![get_test_row()];
        let by_structure = vec![AggregateRow {
            feature: FeatureId::NoStepEntrance,
            bucket: StructureBucket::SingleFamilyDetached,
            percent_with_feature: 50.0,
            total_units: 200.0,
            population: Population::All,
        }];
        let metadata = Metadata::new(2019, &[]);
        let paths = write_tables(dir.path(), &by_age, &by_structure, &metadata).unwrap();
        assert_eq!(3, paths.len());

        let body = fs::read_to_string(dir.path().join(BY_AGE_FILE)).unwrap();
        let rows: Vec<SummaryRow> = serde_json::from_str(&body).unwrap();
        assert_eq!(1, rows.len());
        assert_eq!(Category::Age("2010 or later".to_string()), rows[0].category);

        let body = fs::read_to_string(dir.path().join(BY_STRUCTURE_FILE)).unwrap();
        let rows: Vec<SummaryRow> = serde_json::from_str(&body).unwrap();
        assert_eq!(
            Category::Structure("Single-family detached".to_string()),
            rows[0].category
        );

        let body = fs::read_to_string(dir.path().join(METADATA_FILE)).unwrap();
        let parsed: Metadata = serde_json::from_str(&body).unwrap();
        assert_eq!(0, parsed.sample_size);
    }

    #[test]
    fn write_tables_deterministic() {
        let by_age = vec![get_test_row()];
        let metadata = Metadata::new(2019, &[]);
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        write_tables(first.path(), &by_age, &[], &metadata).unwrap();
        write_tables(second.path(), &by_age, &[], &metadata).unwrap();
        let first_body = fs::read_to_string(first.path().join(BY_AGE_FILE)).unwrap();
        let second_body = fs::read_to_string(second.path().join(BY_AGE_FILE)).unwrap();
        assert_eq!(first_body, second_body);
    }
}
