//! Number formatting for tables, stat cards and chart axes

/// Formats a number with a thousands separator (comma) and the given decimals
///
/// ```text
/// format_number_with_decimals(1234.567, 2) == "1,234.57"
/// ```
pub fn format_number_with_decimals(value: f64, decimals: u8) -> String {
    if !value.is_finite() {
        return "—".to_string();
    }

    let formatted = format!("{:.prec$}", value, prec = decimals.min(3) as usize);

    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((int, dec)) => (int, Some(dec)),
        None => (formatted.as_str(), None),
    };

    let mut result = String::new();
    for (i, c) in integer_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 && c != '-' {
            result.push(',');
        }
        result.push(c);
    }
    let formatted_integer = result.chars().rev().collect::<String>();

    match decimal_part {
        Some(d) => format!("{}.{}", formatted_integer, d),
        None => formatted_integer,
    }
}

/// Whole-dollar revenue, `$1,234,567`
pub fn format_money(value: f64) -> String {
    let body = format_number_with_decimals(value.abs(), 0);
    if value < 0.0 {
        format!("-${}", body)
    } else {
        format!("${}", body)
    }
}

pub fn format_number_int(value: f64) -> String {
    format_number_with_decimals(value, 0)
}

/// Ticket counts are optional upstream
pub fn format_tickets(value: Option<f64>) -> String {
    match value {
        Some(v) => format_number_int(v),
        None => "未提供".to_string(),
    }
}

/// Axis and card shorthand: 億 (1e8) above one hundred million, 萬 (1e4) otherwise
pub fn format_compact(value: f64) -> String {
    if value.abs() >= 100_000_000.0 {
        format!("{:.1}億", value / 100_000_000.0)
    } else {
        format!("{:.0}萬", value / 10_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234.0), "$1,234");
        assert_eq!(format_money(1234567.89), "$1,234,568");
        assert_eq!(format_money(0.0), "$0");
        assert_eq!(format_money(-1234.0), "-$1,234");
    }

    #[test]
    fn test_format_number_with_decimals() {
        assert_eq!(format_number_with_decimals(1234.567, 0), "1,235");
        assert_eq!(format_number_with_decimals(1234.567, 1), "1,234.6");
        assert_eq!(format_number_with_decimals(1234.567, 2), "1,234.57");
        assert_eq!(format_number_with_decimals(-123456.0, 0), "-123,456");
        assert_eq!(format_number_with_decimals(f64::NAN, 2), "—");
    }

    #[test]
    fn test_format_tickets() {
        assert_eq!(format_tickets(Some(98765.0)), "98,765");
        assert_eq!(format_tickets(None), "未提供");
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact(350_000_000.0), "3.5億");
        assert_eq!(format_compact(1_250_000.0), "125萬");
        assert_eq!(format_compact(0.0), "0萬");
    }
}
