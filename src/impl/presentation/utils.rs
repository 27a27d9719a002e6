use num_format::{Locale, ToFormattedString as _};

/// Format a dollar amount with thousands separators and two decimal places.
///
/// For consistency, uses en locale ('.' as decimal mark, i.e. 1,000.00)
/// regardless of user's locale.
pub(crate) fn format_amount(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as i64;
    format!(
        "{}${}.{:02}",
        if amount < 0.0 && cents != 0 { "-" } else { "" },
        (cents / 100).to_formatted_string(&Locale::en),
        cents % 100
    )
}

pub(crate) fn format_count(count: u64) -> String {
    count.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "$0.00");
        assert_eq!(format_amount(1234567.891), "$1,234,567.89");
        assert_eq!(format_amount(-2500.5), "-$2,500.50");
        assert_eq!(format_amount(-0.001), "$0.00");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(1_000_000), "1,000,000");
    }
}
