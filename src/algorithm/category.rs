//! Attainment code to years of schooling
//!
//! Survey attainment codes are ordinal credential levels. The index needs a
//! continuous schooling measure, so each code maps to the years of schooling it
//! represents.

/// Years of schooling assigned to codes above the table
pub const SCHOOLING_CEILING: f64 = 18.0;

/// Highest code with an explicit table entry
const MAX_TABULATED_CODE: i64 = 21;

/// Map an attainment code to years of schooling
///
/// Codes 4 to 21 follow the credential table, codes above 21 map to
/// [`SCHOOLING_CEILING`] and every other code (no schooling, pre-school,
/// negative sentinels) maps to 0.
#[must_use]
pub const fn years_of_schooling(code: i64) -> f64 {
    if code > MAX_TABULATED_CODE {
        return SCHOOLING_CEILING;
    }
    match code {
        4 => 1.0,
        5 => 2.0,
        6 => 3.0,
        7 => 4.0,
        8 => 5.0,
        9 => 6.0,
        10 => 7.0,
        11 => 8.0,
        12 => 9.0,
        13 => 10.0,
        14 | 15 => 11.0,
        16 | 17 => 12.0,
        18 => 12.5,
        19 => 13.0,
        20 => 14.0,
        21 => 16.0,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_entries() {
        assert_eq!(years_of_schooling(4), 1.0);
        assert_eq!(years_of_schooling(15), 11.0);
        assert_eq!(years_of_schooling(18), 12.5);
        assert_eq!(years_of_schooling(21), 16.0);
    }

    #[test]
    fn test_mapping_is_total() {
        assert_eq!(years_of_schooling(22), SCHOOLING_CEILING);
        assert_eq!(years_of_schooling(i64::MAX), SCHOOLING_CEILING);
        assert_eq!(years_of_schooling(3), 0.0);
        assert_eq!(years_of_schooling(0), 0.0);
        assert_eq!(years_of_schooling(-1), 0.0);
        assert_eq!(years_of_schooling(i64::MIN), 0.0);

        for code in -50..=50 {
            let years = years_of_schooling(code);
            assert!((0.0..=SCHOOLING_CEILING).contains(&years), "code {code}");
        }
    }

    #[test]
    fn test_monotone_over_tabulated_codes() {
        for code in 4..=MAX_TABULATED_CODE {
            assert!(years_of_schooling(code + 1) >= years_of_schooling(code), "code {code}");
        }
    }
}
