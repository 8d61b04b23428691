//! Category mapping.
//!
//! Pure functions recoding raw AHS values into the small fixed bucket sets used by the summary
//! tables. Inputs outside the documented coded domain map to `None` rather than a crash; unmapped
//! records are dropped from that dimension's aggregation only.

use crate::models::{AgeBucket, StructureBucket};

/// Map a year-built value to its building age bucket.
///
/// Range boundaries are closed on the lower edge, e.g. `1960 <= year < 1980` maps to 1960-1979.
/// Negative sentinel years ("not reported") are unmapped.
pub fn age_bucket(year_built: i32) -> Option<AgeBucket> {
    if year_built < 0 {
        return None;
    }
    let bucket = if year_built < 1960 {
        AgeBucket::Before1960
    } else if year_built < 1980 {
        AgeBucket::From1960To1979
    } else if year_built < 2000 {
        AgeBucket::From1980To1999
    } else if year_built < 2010 {
        AgeBucket::From2000To2009
    } else {
        AgeBucket::Since2010
    };
    Some(bucket)
}

/// Map an AHS `UNITSIZE` code to its structure type bucket.
///
/// The documented domain is `1` to `9`; any other code (sentinels included) is unmapped.
pub fn structure_bucket(code: &str) -> Option<StructureBucket> {
    let bucket = match code {
        "1" => StructureBucket::SingleFamilyDetached,
        "2" => StructureBucket::SingleFamilyAttached,
        "3" | "4" => StructureBucket::Units2To4,
        "5" | "6" | "7" => StructureBucket::Units5To49,
        "8" => StructureBucket::Units50Plus,
        "9" => StructureBucket::MobileHomeOther,
        _ => return None,
    };
    Some(bucket)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_bucket_boundaries() {
        assert_eq!(Some(AgeBucket::Before1960), age_bucket(0));
        assert_eq!(Some(AgeBucket::Before1960), age_bucket(1959));
        assert_eq!(Some(AgeBucket::From1960To1979), age_bucket(1960));
        assert_eq!(Some(AgeBucket::From1960To1979), age_bucket(1979));
        assert_eq!(Some(AgeBucket::From1980To1999), age_bucket(1980));
        assert_eq!(Some(AgeBucket::From1980To1999), age_bucket(1999));
        assert_eq!(Some(AgeBucket::From2000To2009), age_bucket(2000));
        assert_eq!(Some(AgeBucket::From2000To2009), age_bucket(2009));
        assert_eq!(Some(AgeBucket::Since2010), age_bucket(2010));
        assert_eq!(Some(AgeBucket::Since2010), age_bucket(2023));
    }

    #[test]
    fn age_bucket_sentinels() {
        assert_eq!(None, age_bucket(-6));
        assert_eq!(None, age_bucket(-9));
    }

    #[test]
    fn structure_bucket_codes() {
        assert_eq!(
            Some(StructureBucket::SingleFamilyDetached),
            structure_bucket("1")
        );
        assert_eq!(
            Some(StructureBucket::SingleFamilyAttached),
            structure_bucket("2")
        );
        assert_eq!(Some(StructureBucket::Units2To4), structure_bucket("3"));
        assert_eq!(Some(StructureBucket::Units2To4), structure_bucket("4"));
        assert_eq!(Some(StructureBucket::Units5To49), structure_bucket("5"));
        assert_eq!(Some(StructureBucket::Units5To49), structure_bucket("6"));
        assert_eq!(Some(StructureBucket::Units5To49), structure_bucket("7"));
        assert_eq!(Some(StructureBucket::Units50Plus), structure_bucket("8"));
        assert_eq!(Some(StructureBucket::MobileHomeOther), structure_bucket("9"));
    }

    #[test]
    fn structure_bucket_sentinels() {
        assert_eq!(None, structure_bucket("-6"));
        assert_eq!(None, structure_bucket("-9"));
        assert_eq!(None, structure_bucket("10"));
        assert_eq!(None, structure_bucket(""));
    }
}
