//! Currency display formatting
//!
//! Used only when interpolating amounts into replies, never for arithmetic.

/// Formats an amount for display in the given ISO currency code.
pub trait CurrencyFormatter: Send + Sync {
    fn format(&self, amount: f64, currency_code: &str) -> String;
}

/// en-US currency style: symbol prefix, `,` grouping, two fraction digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnUsFormatter;

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code.to_uppercase().as_str() {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "INR" => Some("₹"),
        "JPY" => Some("¥"),
        "CAD" => Some("CA$"),
        "AUD" => Some("A$"),
        _ => None,
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

impl CurrencyFormatter for EnUsFormatter {
    fn format(&self, amount: f64, currency_code: &str) -> String {
        if !amount.is_finite() {
            return format!("{} {}", currency_code, amount);
        }

        let fixed = format!("{:.2}", amount.abs());
        let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        let number = format!("{}.{}", group_thousands(whole), fraction);
        let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };

        match currency_symbol(currency_code) {
            Some(symbol) => format!("{}{}{}", sign, symbol, number),
            None => format!("{}{} {}", sign, currency_code.to_uppercase(), number),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_symbols() {
        let f = EnUsFormatter;
        assert_eq!(f.format(1234.5, "USD"), "$1,234.50");
        assert_eq!(f.format(0.0, "EUR"), "€0.00");
        assert_eq!(f.format(99.999, "gbp"), "£100.00");
        assert_eq!(f.format(1_000_000.0, "INR"), "₹1,000,000.00");
    }

    #[test]
    fn test_negative_and_unknown() {
        let f = EnUsFormatter;
        assert_eq!(f.format(-42.1, "USD"), "-$42.10");
        assert_eq!(f.format(-0.001, "USD"), "$0.00");
        assert_eq!(f.format(12.0, "CHF"), "CHF 12.00");
    }

    #[test]
    fn test_grouping() {
        assert_eq!(group_thousands("0"), "0");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }

    #[test]
    fn test_amounts_beyond_integer_range() {
        let f = EnUsFormatter;
        assert_eq!(f.format(1e20, "USD"), "$100,000,000,000,000,000,000.00");
        assert_eq!(f.format(-1e20, "EUR"), "-€100,000,000,000,000,000,000.00");
        assert_ne!(f.format(1e25, "USD"), f.format(1e20, "USD"));
    }
}
