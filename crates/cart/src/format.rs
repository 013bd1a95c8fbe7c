//! Locale-aware money rendering for the presentation layer.

use storefront_core::Money;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum SymbolPosition {
    Prefix,
    Suffix,
}

/// Digit grouping and currency symbol for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    group_separator: Option<char>,
    symbol: Option<&'static str>,
    position: SymbolPosition,
}

impl CurrencyFormat {
    /// Known locales get grouping and a symbol; anything else renders bare
    /// digits.
    pub fn for_locale(locale: &str) -> Self {
        match locale.to_ascii_lowercase().replace('_', "-").as_str() {
            "ru" | "ru-ru" => Self {
                group_separator: Some('\u{a0}'),
                symbol: Some("₽"),
                position: SymbolPosition::Suffix,
            },
            "en" | "en-us" => Self {
                group_separator: Some(','),
                symbol: Some("$"),
                position: SymbolPosition::Prefix,
            },
            "de" | "de-de" => Self {
                group_separator: Some('.'),
                symbol: Some("€"),
                position: SymbolPosition::Suffix,
            },
            other => {
                tracing::debug!(locale = other, "unknown currency locale, using plain digits");
                Self {
                    group_separator: None,
                    symbol: None,
                    position: SymbolPosition::Suffix,
                }
            }
        }
    }

    /// Digits with locale grouping, no symbol.
    pub fn format_amount(&self, amount: Money) -> String {
        let digits = amount.amount().to_string();
        let Some(sep) = self.group_separator else {
            return digits;
        };

        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(sep);
            }
            out.push(ch);
        }
        out
    }

    /// Grouped digits with the currency symbol attached.
    pub fn format(&self, amount: Money) -> String {
        let digits = self.format_amount(amount);
        match (self.symbol, self.position) {
            (None, _) => digits,
            (Some(symbol), SymbolPosition::Prefix) => format!("{symbol}{digits}"),
            (Some(symbol), SymbolPosition::Suffix) => format!("{digits}\u{a0}{symbol}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn russian_locale_groups_with_no_break_space() {
        let fmt = CurrencyFormat::for_locale("ru-RU");
        assert_eq!(fmt.format(Money::new(12_990)), "12\u{a0}990\u{a0}₽");
        assert_eq!(fmt.format(Money::new(300)), "300\u{a0}₽");
        assert_eq!(fmt.format_amount(Money::new(1_234_567)), "1\u{a0}234\u{a0}567");
    }

    #[test]
    fn english_locale_prefixes_dollar() {
        let fmt = CurrencyFormat::for_locale("en_US");
        assert_eq!(fmt.format(Money::new(24_990)), "$24,990");
        assert_eq!(fmt.format(Money::ZERO), "$0");
    }

    #[test]
    fn german_locale_uses_dots() {
        let fmt = CurrencyFormat::for_locale("de-DE");
        assert_eq!(fmt.format(Money::new(1_000_000)), "1.000.000\u{a0}€");
    }

    #[test]
    fn unknown_locale_renders_plain_digits() {
        let fmt = CurrencyFormat::for_locale("xx-YY");
        assert_eq!(fmt.format(Money::new(123_456)), "123456");
    }
}
