//! Weighted aggregation.
//!
//! Prevalence is computed as a pure fold over the record sequence into running weight sums keyed
//! by (feature, bucket). A record contributes to a feature's sums only when its indicator was
//! reported; missingness is per feature, so the same record still contributes to every other
//! feature's sums for its bucket.

use std::collections::BTreeMap;

use crate::models::{AggregateRow, Bucket, FeatureId, Indicator, Population, UnitRecord};

/// Running weight sums for one (feature, bucket) pair.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WeightedTally {
    /// Summed weight of units reporting the feature present
    pub present_weight: f64,
    /// Summed weight of units with a reported indicator, present or absent
    pub applicable_weight: f64,
}

impl WeightedTally {
    /// Add one record's weight to the sums according to its indicator.
    fn add(&mut self, indicator: Indicator, weight: f64) {
        match indicator {
            Indicator::Present => {
                self.present_weight += weight;
                self.applicable_weight += weight;
            }
            Indicator::Absent => self.applicable_weight += weight,
            Indicator::Missing => {}
        }
    }

    /// Percentage of the applicable weight reporting the feature present.
    pub fn percent(&self) -> f64 {
        100.0 * self.present_weight / self.applicable_weight
    }
}

/// Fold records into weight sums keyed by (feature, bucket).
///
/// Records without a bucket along this dimension are dropped here; entries are only created for
/// reported indicators, so every tally has positive applicable weight.
///
/// # Arguments
///
/// * `records`: The records to fold over
/// * `bucket_of`: Returns a record's bucket along the dimension being summarised
pub fn tally<'a, B, F, I>(records: I, bucket_of: F) -> BTreeMap<(FeatureId, B), WeightedTally>
where
    B: Bucket,
    F: Fn(&UnitRecord) -> Option<B>,
    I: IntoIterator<Item = &'a UnitRecord>,
{
    let mut sums: BTreeMap<(FeatureId, B), WeightedTally> = BTreeMap::new();
    for record in records {
        let Some(bucket) = bucket_of(record) else {
            continue;
        };
        for feature in FeatureId::ALL {
            let indicator = record.indicator(feature);
            if indicator == Indicator::Missing {
                continue;
            }
            sums.entry((feature, bucket))
                .or_default()
                .add(indicator, record.weight);
        }
    }
    sums
}

/// Aggregate one population's records along one bucket dimension.
///
/// Emits one [AggregateRow] per (feature, bucket) pair with positive applicable weight, with the
/// percentage rounded to the fixed one decimal emission precision. Pairs without any reported
/// indicator are omitted rather than emitted as zero.
pub fn aggregate<B, F>(
    records: &[UnitRecord],
    population: Population,
    bucket_of: F,
) -> Vec<AggregateRow<B>>
where
    B: Bucket,
    F: Fn(&UnitRecord) -> Option<B>,
{
    let subset = records.iter().filter(|record| population.contains(record));
    tally(subset, bucket_of)
        .into_iter()
        .filter(|(_, tally)| tally.applicable_weight > 0.0)
        .map(|((feature, bucket), tally)| AggregateRow {
            feature,
            bucket,
            percent_with_feature: round_one_decimal(tally.percent()),
            total_units: tally.applicable_weight,
            population,
        })
        .collect()
}

/// Round to the fixed one decimal emission precision.
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
