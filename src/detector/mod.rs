//! Price detection in arbitrary display text using regex patterns

use lazy_static::lazy_static;
use regex::Regex;

/// Currency symbols recognized next to an amount.
pub const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£', '¥', '₹', '₽', '₩'];

lazy_static! {
    // Optional symbol on either side of digits. The integral part is either
    // separator-grouped (groups of three) or a plain digit run; a trailing
    // group of one or two digits is the decimal part. Comma and dot are both
    // accepted as separators. Grouped comes first so "1,234" is not cut at
    // the separator.
    static ref PRICE_PATTERN: Regex = {
        let symbols: String = CURRENCY_SYMBOLS.iter().collect();
        Regex::new(&format!(
            r"(?:[{s}]\s?)?(?:\d{{1,3}}(?:[.,]\d{{3}})+|\d+)(?:[.,]\d{{1,2}})?(?:\s?[{s}])?",
            s = regex::escape(&symbols)
        ))
        .unwrap()
    };
}

/// Extracts the first price-like value from `text`.
///
/// Only the first match is used; multi-price strings yield their first
/// occurrence. Returns `None` when nothing matches or the match does not
/// parse to a finite number.
pub fn extract_price(text: &str) -> Option<f64> {
    let matched = PRICE_PATTERN.find(text)?;
    parse_amount(matched.as_str())
}

/// Whether `text` contains any detectable price.
pub fn contains_price(text: &str) -> bool {
    extract_price(text).is_some()
}

/// Normalizes a matched amount: symbols and spaces stripped, thousands
/// separators dropped, a final comma treated as a decimal point.
fn parse_amount(matched: &str) -> Option<f64> {
    let cleaned: String = matched
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let normalized = match cleaned.rfind(['.', ',']) {
        Some(idx) => {
            let fraction = &cleaned[idx + 1..];
            if fraction.len() <= 2 {
                // last separator is the decimal point
                let integral: String = cleaned[..idx]
                    .chars()
                    .filter(char::is_ascii_digit)
                    .collect();
                format!("{integral}.{fraction}")
            } else {
                // all separators are thousands groups
                cleaned.chars().filter(char::is_ascii_digit).collect()
            }
        }
        None => cleaned,
    };

    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("$12.50", 12.5; "dollar prefix")]
    #[test_case("12,50€", 12.5; "euro suffix comma decimal")]
    #[test_case("¥100", 100.0; "yen no decimals")]
    #[test_case("£ 9.99", 9.99; "symbol with space")]
    #[test_case("$1,234.56", 1234.56; "thousands and decimals")]
    #[test_case("1.234,56 €", 1234.56; "european grouping")]
    #[test_case("₹2,500", 2500.0; "thousands only")]
    #[test_case("$1500", 1500.0; "ungrouped four digits")]
    #[test_case("¥1000", 1000.0; "ungrouped four digits suffix free")]
    #[test_case("1500.50 kr", 1500.5; "ungrouped with decimals")]
    #[test_case("$123456", 123456.0; "ungrouped six digits")]
    #[test_case("42", 42.0; "bare number")]
    fn test_extract_price(text: &str, expected: f64) {
        assert_eq!(extract_price(text), Some(expected));
    }

    #[test]
    fn test_no_price() {
        assert_eq!(extract_price("no price here"), None);
        assert_eq!(extract_price(""), None);
        assert_eq!(extract_price("free shipping!"), None);
    }

    #[test]
    fn test_first_match_wins() {
        assert_eq!(extract_price("from $5.00 to $10.00"), Some(5.0));
    }

    #[test]
    fn test_embedded_in_sentence() {
        assert_eq!(extract_price("Now only $19.95 while stocks last"), Some(19.95));
    }
}
