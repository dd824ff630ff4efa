//! Pure arithmetic operations backing the calculator tools
//!
//! Operations work on IEEE-754 doubles. Only `divide` can fail.

use crate::errors::ToolError;

pub fn add(a: f64, b: f64) -> f64 {
    a + b
}

pub fn subtract(a: f64, b: f64) -> f64 {
    a - b
}

pub fn multiply(a: f64, b: f64) -> f64 {
    a * b
}

/// `-0.0` compares equal to zero and is rejected as well.
pub fn divide(a: f64, b: f64) -> Result<f64, ToolError> {
    if b == 0.0 {
        return Err(ToolError::DivisionByZero);
    }

    Ok(a / b)
}

/// Renders a number the way MCP clients of this server expect to read it:
/// integral values without a fraction, signed exponent for very large or
/// very small magnitudes, and `Infinity`/`NaN` spelled out.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        };
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let formatted = format!("{value:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        };
    }

    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_matches_ieee_semantics() {
        let pairs = [(10.0, 5.0), (-3.5, 2.0), (0.1, 0.2), (1e300, 1e10)];
        for (a, b) in pairs {
            assert_eq!(add(a, b), a + b);
            assert_eq!(subtract(a, b), a - b);
            assert_eq!(multiply(a, b), a * b);
            assert_eq!(divide(a, b), Ok(a / b));
        }
    }

    #[test]
    fn divide_by_zero_is_a_tool_error() {
        assert_eq!(divide(10.0, 0.0), Err(ToolError::DivisionByZero));
        assert_eq!(divide(0.0, -0.0), Err(ToolError::DivisionByZero));
    }

    #[test]
    fn formats_integral_values_without_fraction() {
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(-7.0), "-7");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn formats_extreme_values() {
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(123456789.0), "123456789");
    }
}
