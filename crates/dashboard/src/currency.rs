use configuration::CurrencySettings;
use rust_decimal::{Decimal, RoundingStrategy};

/// Formats amounts as a localized currency string, e.g. `Rp 1.234.567,89`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub code: String,
    pub symbol: String,
    pub grouping_separator: String,
    pub decimal_separator: String,
    pub fraction_digits: u32,
    pub space_after_symbol: bool,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::from(&CurrencySettings::default())
    }
}

impl From<&CurrencySettings> for CurrencyFormat {
    fn from(settings: &CurrencySettings) -> Self {
        Self {
            code: settings.code.clone(),
            symbol: settings.symbol.clone(),
            grouping_separator: settings.grouping_separator.clone(),
            decimal_separator: settings.decimal_separator.clone(),
            fraction_digits: settings.fraction_digits,
            space_after_symbol: settings.space_after_symbol,
        }
    }
}

impl CurrencyFormat {
    /// Rounds half-to-even to `fraction_digits` and applies the separators.
    pub fn format(&self, amount: Decimal) -> String {
        let rounded = amount
            .round_dp_with_strategy(self.fraction_digits, RoundingStrategy::MidpointNearestEven);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let digits = format!("{:.*}", self.fraction_digits as usize, rounded.abs());

        let (integer, fraction) = match digits.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (digits.as_str(), None),
        };

        let mut out = String::with_capacity(digits.len() + self.symbol.len() + 8);
        if negative {
            out.push('-');
        }
        out.push_str(&self.symbol);
        if self.space_after_symbol {
            out.push(' ');
        }
        out.push_str(&group_digits(integer, &self.grouping_separator));
        if let Some(fraction) = fraction {
            out.push_str(&self.decimal_separator);
            out.push_str(fraction);
        }
        out
    }

    /// Formats a count with the same grouping separator, without symbol or fraction.
    pub fn format_count(&self, count: usize) -> String {
        group_digits(&count.to_string(), &self.grouping_separator)
    }
}

fn group_digits(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rupiah_formatting() {
        let idr = CurrencyFormat::default();
        assert_eq!(idr.format(dec!(1234567.891)), "Rp 1.234.567,89");
        assert_eq!(idr.format(dec!(65)), "Rp 65,00");
        assert_eq!(idr.format(dec!(0)), "Rp 0,00");
        assert_eq!(idr.format(dec!(999.999)), "Rp 1.000,00");
    }

    #[test]
    fn test_rounding_is_half_to_even() {
        let idr = CurrencyFormat::default();
        assert_eq!(idr.format(dec!(0.125)), "Rp 0,12");
        assert_eq!(idr.format(dec!(0.135)), "Rp 0,14");
    }

    #[test]
    fn test_negative_and_custom_conventions() {
        let usd = CurrencyFormat {
            code: "USD".to_string(),
            symbol: "$".to_string(),
            grouping_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
            fraction_digits: 2,
            space_after_symbol: false,
        };
        assert_eq!(usd.format(dec!(-1234.5)), "-$1,234.50");

        let whole = CurrencyFormat {
            fraction_digits: 0,
            ..CurrencyFormat::default()
        };
        assert_eq!(whole.format(dec!(15843553.24)), "Rp 15.843.553");
    }

    #[test]
    fn test_count_grouping() {
        let idr = CurrencyFormat::default();
        assert_eq!(idr.format_count(0), "0");
        assert_eq!(idr.format_count(999), "999");
        assert_eq!(idr.format_count(118315), "118.315");
        assert_eq!(idr.format_count(1000000), "1.000.000");
    }
}
