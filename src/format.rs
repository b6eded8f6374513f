//! Display formatting for converted amounts

/// Codes conventionally displayed without decimal places.
const ZERO_DECIMAL_CODES: &[&str] = &["JPY", "KRW", "VND", "CLP", "ISK"];

/// Display symbol for well-known codes; everything else is prefixed with the
/// code itself.
fn symbol_for(code: &str) -> Option<&'static str> {
    Some(match code {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" | "CNY" => "¥",
        "INR" => "₹",
        "RUB" => "₽",
        "KRW" => "₩",
        "BRL" => "R$",
        "CAD" => "CA$",
        "AUD" => "A$",
        _ => return None,
    })
}

/// Formats an amount as a currency string for `code`: symbol (or code)
/// prefix, comma-grouped integral part, two decimals except for
/// zero-decimal currencies.
pub fn format_currency(amount: f64, code: &str) -> String {
    let decimals = if ZERO_DECIMAL_CODES.contains(&code) { 0 } else { 2 };
    let sign = if amount < 0.0 { "-" } else { "" };
    let number = group_thousands(amount.abs(), decimals);
    match symbol_for(code) {
        Some(symbol) => format!("{sign}{symbol}{number}"),
        None => format!("{sign}{code} {number}"),
    }
}

fn group_thousands(amount: f64, decimals: usize) -> String {
    // callers pass a non-negative amount; the sign goes before the symbol
    let rendered = format!("{amount:.decimals$}");
    let (integral, fraction) = match rendered.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rendered.as_str(), None),
    };

    let mut grouped = String::with_capacity(integral.len() + integral.len() / 3);
    for (i, digit) in integral.chars().enumerate() {
        if i > 0 && (integral.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(f) => format!("{grouped}.{f}"),
        None => grouped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(12.5, "USD", "$12.50")]
    #[test_case(1234.56, "EUR", "€1,234.56")]
    #[test_case(1234567.891, "GBP", "£1,234,567.89")]
    #[test_case(100.0, "JPY", "¥100")]
    #[test_case(15000.0, "KRW", "₩15,000")]
    #[test_case(99.9, "CHF", "CHF 99.90")]
    #[test_case(-5.25, "USD", "-$5.25")]
    #[test_case(-1234.5, "EUR", "-€1,234.50")]
    #[test_case(-99.9, "CHF", "-CHF 99.90" ; "negative_99_9_chf")]
    fn test_format_currency(amount: f64, code: &str, expected: &str) {
        assert_eq!(format_currency(amount, code), expected);
    }

    #[test]
    fn test_formatting_is_stable() {
        let once = format_currency(11.111, "EUR");
        let twice = format_currency(11.111, "EUR");
        assert_eq!(once, twice);
    }
}
