use std::collections::BTreeMap;

use crate::models::{AgeBucket, FeatureId, Indicator, StructureBucket, UnitRecord};

/// Create a UnitRecord with valid buckets and no reported indicators.
pub(crate) fn get_test_record(weight: f64) -> UnitRecord {
    UnitRecord {
        age: Some(AgeBucket::Since2010),
        structure: Some(StructureBucket::SingleFamilyDetached),
        weight,
        features: BTreeMap::new(),
        has_accessibility_needs: false,
    }
}

/// Return the record with one feature's indicator set.
pub(crate) fn with_feature(
    mut record: UnitRecord,
    feature: FeatureId,
    indicator: Indicator,
) -> UnitRecord {
    record.features.insert(feature, indicator);
    record
}
