//! Data types and associated functions and methods

use std::collections::BTreeMap;

use strum_macros::Display;

/// Tracked accessibility features
///
/// The set is closed and shared by the whole pipeline. All variants except
/// [SingleFloorLiving](FeatureId::SingleFloorLiving) correspond directly to one AHS topical
/// module variable; the composite is derived from its two component indicators at aggregation
/// time.
///
/// Display labels match the published AHS table labels.
#[derive(Clone, Copy, Debug, Display, Eq, Ord, PartialEq, PartialOrd)]
pub enum FeatureId {
    /// No-step entrance to the unit
    #[strum(serialize = "No-step entrance")]
    NoStepEntrance,
    /// Wheelchair ramp
    #[strum(serialize = "Wheelchair ramp")]
    WheelchairRamp,
    /// Wide doorways and hallways
    #[strum(serialize = "Wide doorways/hallways")]
    WideDoorways,
    /// Bathroom accessible to a wheelchair user
    #[strum(serialize = "Accessible bathroom")]
    AccessibleBathroom,
    /// Bedroom on the entry level
    #[strum(serialize = "Bedroom on entry level")]
    BedroomOnEntryLevel,
    /// Bathroom on the entry level
    #[strum(serialize = "Bathroom on entry level")]
    BathroomOnEntryLevel,
    /// Composite of bedroom and bathroom on the entry level
    #[strum(serialize = "Single-floor living (bed + bath on entry)")]
    SingleFloorLiving,
}

impl FeatureId {
    /// Every tracked feature, including the derived composite.
    pub const ALL: [FeatureId; 7] = [
        FeatureId::NoStepEntrance,
        FeatureId::WheelchairRamp,
        FeatureId::WideDoorways,
        FeatureId::AccessibleBathroom,
        FeatureId::BedroomOnEntryLevel,
        FeatureId::BathroomOnEntryLevel,
        FeatureId::SingleFloorLiving,
    ];
}

/// Three-valued per-unit feature indicator
///
/// Missingness is per feature, not per record. A missing indicator excludes the record from both
/// the numerator and the denominator of that feature's percentage only.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Indicator {
    /// The unit reports the feature
    Present,
    /// The unit reports not having the feature
    Absent,
    /// Not reported or not applicable
    Missing,
}

impl Indicator {
    /// Decode an AHS indicator code.
    ///
    /// `1` is yes and `2` is no; sentinel codes (`-6` not applicable, `-9` not reported), blanks
    /// and anything else decode as missing.
    pub fn from_code(code: &str) -> Indicator {
        match code {
            "1" => Indicator::Present,
            "2" => Indicator::Absent,
            _ => Indicator::Missing,
        }
    }

    /// Combine two component indicators into a composite indicator.
    ///
    /// The composite is applicable only when both components were reported, and present only when
    /// both components are present.
    pub fn both(self, other: Indicator) -> Indicator {
        match (self, other) {
            (Indicator::Missing, _) | (_, Indicator::Missing) => Indicator::Missing,
            (Indicator::Present, Indicator::Present) => Indicator::Present,
            _ => Indicator::Absent,
        }
    }
}

/// Trait for categorical grouping keys.
///
/// Each summary dimension's bucket enum implements this. The derived `Ord` follows declaration
/// order, which is the one canonical bucket ordering shared by aggregation and emission.
pub trait Bucket: Clone + Copy + Ord + std::fmt::Debug + std::fmt::Display {}

/// Building age buckets, ordered oldest first
#[derive(Clone, Copy, Debug, Display, Eq, Ord, PartialEq, PartialOrd)]
pub enum AgeBucket {
    /// Built before 1960
    #[strum(serialize = "Before 1960")]
    Before1960,
    /// Built 1960-1979
    #[strum(serialize = "1960-1979")]
    From1960To1979,
    /// Built 1980-1999
    #[strum(serialize = "1980-1999")]
    From1980To1999,
    /// Built 2000-2009
    #[strum(serialize = "2000-2009")]
    From2000To2009,
    /// Built 2010 or later
    #[strum(serialize = "2010 or later")]
    Since2010,
}

impl Bucket for AgeBucket {}

/// Structure type buckets
#[derive(Clone, Copy, Debug, Display, Eq, Ord, PartialEq, PartialOrd)]
pub enum StructureBucket {
    /// One detached unit
    #[strum(serialize = "Single-family detached")]
    SingleFamilyDetached,
    /// One attached unit
    #[strum(serialize = "Single-family attached")]
    SingleFamilyAttached,
    /// Mobile home, trailer or other
    #[strum(serialize = "Mobile home/other")]
    MobileHomeOther,
    /// 2 to 4 units in the structure
    #[strum(serialize = "2-4 units")]
    Units2To4,
    /// 5 to 49 units in the structure
    #[strum(serialize = "5-49 units")]
    Units5To49,
    /// 50 or more units in the structure
    #[strum(serialize = "50+ units")]
    Units50Plus,
}

impl Bucket for StructureBucket {}

/// Household population selector for the emitted tables
#[derive(Clone, Copy, Debug, Display, Eq, Ord, PartialEq, PartialOrd)]
pub enum Population {
    /// All surveyed households
    #[strum(serialize = "all")]
    All,
    /// Households reporting accessibility needs
    #[strum(serialize = "with_needs")]
    WithNeeds,
}

impl Population {
    /// Return whether the record belongs to this population.
    pub fn contains(self, record: &UnitRecord) -> bool {
        match self {
            Population::All => true,
            Population::WithNeeds => record.has_accessibility_needs,
        }
    }
}

/// One surveyed housing unit
///
/// Created once at load time and never mutated. Bucket assignments are `None` when the raw value
/// is a sentinel or otherwise unmapped; such a record is dropped from that dimension's
/// aggregation only.
#[derive(Clone, Debug, PartialEq)]
pub struct UnitRecord {
    /// Building age bucket, if the year built was mapped
    pub age: Option<AgeBucket>,
    /// Structure type bucket, if the unit count code was mapped
    pub structure: Option<StructureBucket>,
    /// Sampling weight; validated positive and finite at load time
    pub weight: f64,
    /// Reported indicators for the directly surveyed features
    pub features: BTreeMap<FeatureId, Indicator>,
    /// Whether any household member reports accessibility needs
    pub has_accessibility_needs: bool,
}

impl UnitRecord {
    /// Return the unit's indicator for a feature.
    ///
    /// The composite feature is derived from its component indicators; features without a
    /// reported indicator are missing.
    pub fn indicator(&self, feature: FeatureId) -> Indicator {
        match feature {
            FeatureId::SingleFloorLiving => self
                .indicator(FeatureId::BedroomOnEntryLevel)
                .both(self.indicator(FeatureId::BathroomOnEntryLevel)),
            _ => self
                .features
                .get(&feature)
                .copied()
                .unwrap_or(Indicator::Missing),
        }
    }
}

/// One aggregated output row for a (feature, bucket) pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AggregateRow<B: Bucket> {
    /// The feature the percentage describes
    pub feature: FeatureId,
    /// The bucket along the dimension being summarised
    pub bucket: B,
    /// Weighted share of applicable units reporting the feature, in [0, 100]
    pub percent_with_feature: f64,
    /// Total weight of units with a reported indicator behind the percentage
    pub total_units: f64,
    /// The population the row was computed over
    pub population: Population,
}
