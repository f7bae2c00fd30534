//! Display formatting of raw metric values.

use crate::record::NOT_AVAILABLE;

/// Shown in place of a metric the solver did not report
pub const PLACEHOLDER: &str = "-";

/// Precision used for objective, bound and time columns
pub const DEFAULT_PRECISION: usize = 2;

const INTEGER_TOLERANCE: f64 = 1e-6;

/// Format a raw metric value for the report.
///
/// `"NA"` becomes [`PLACEHOLDER`], non-numeric values are returned unchanged,
/// values within 1e-6 of an integer are printed without a decimal point and
/// anything else gets exactly `precision` decimals. Never fails.
pub fn format_value(raw: &str, precision: usize) -> String {
    if raw == NOT_AVAILABLE {
        return PLACEHOLDER.to_string();
    }

    let num: f64 = match raw.parse() {
        Ok(n) => n,
        Err(_) => return raw.to_string(),
    };
    if !num.is_finite() {
        return raw.to_string();
    }

    let rounded = num.round();
    if (num - rounded).abs() < INTEGER_TOLERANCE {
        // avoid "-0" for tiny negative values
        if rounded == 0.0 {
            return "0".to_string();
        }
        return format!("{:.0}", rounded);
    }

    format!("{:.*}", precision, num)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_available() {
        assert_eq!(format_value("NA", 2), PLACEHOLDER);
        assert_eq!(format_value("NA", 0), PLACEHOLDER);
    }

    #[test]
    fn test_integers() {
        assert_eq!(format_value("3", 2), "3");
        assert_eq!(format_value("3.0000001", 2), "3");
        assert_eq!(format_value("2.9999999", 2), "3");
        assert_eq!(format_value("-12.0", 2), "-12");
        assert_eq!(format_value("-0.0000001", 2), "0");
        assert_eq!(format_value("1e3", 2), "1000");
    }

    #[test]
    fn test_decimals() {
        assert_eq!(format_value("3.456", 2), "3.46");
        assert_eq!(format_value("1.234", 2), "1.23");
        assert_eq!(format_value("0.5", 2), "0.50");
    }

    #[test]
    fn test_zero_precision_for_counts() {
        assert_eq!(format_value("5", 0), "5");
        assert_eq!(format_value("41.7", 0), "42");
    }

    #[test]
    fn test_non_numeric_passthrough() {
        assert_eq!(format_value("abc", 2), "abc");
        assert_eq!(format_value("OPT", 2), "OPT");
        assert_eq!(format_value("TIME_LIMIT", 0), "TIME_LIMIT");
        assert_eq!(format_value("inf", 2), "inf");
        assert_eq!(format_value("", 2), "");
    }
}
