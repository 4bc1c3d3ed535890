//! Currency codes and locale-aware amount formatting.

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static DEFAULT_LOCALE: Lazy<LocaleConfig> = Lazy::new(LocaleConfig::default);
static DEFAULT_OPTIONS: Lazy<FormatOptions> = Lazy::new(FormatOptions::default);

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("USD")
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Locale-aware formatting preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            language_tag: "en-US".into(),
            decimal_separator: '.',
            grouping_separator: ',',
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormatOptions {
    pub currency_display: CurrencyDisplay,
    pub negative_style: NegativeStyle,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            currency_display: CurrencyDisplay::Symbol,
            negative_style: NegativeStyle::Sign,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NegativeStyle {
    Sign,
    Parentheses,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CurrencyDisplay {
    Symbol,
    Code,
    SymbolAndCode,
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "CAD" => "C$".into(),
        "AUD" => "A$".into(),
        "CHF" => "CHF".into(),
        _ => code.into(),
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" | "KRW" | "VND" => 0,
        "KWD" | "BHD" | "OMR" => 3,
        _ => 2,
    }
}

/// Converts an amount stored in minor units (cents for USD) to major units.
pub fn from_minor_units(amount: i64, code: &CurrencyCode) -> f64 {
    let precision = minor_units_for(code.as_str()) as i32;
    amount as f64 / 10f64.powi(precision)
}

pub fn format_number(locale: &LocaleConfig, value: f64, precision: u8) -> String {
    let mut body = format!("{:.*}", precision as usize, value);
    if locale.decimal_separator != '.' {
        if let Some(pos) = body.find('.') {
            body.replace_range(pos..=pos, &locale.decimal_separator.to_string());
        }
    }
    if precision > 0 {
        if let Some(pos) = body.rfind(locale.decimal_separator) {
            let mut int_part = body[..pos].to_string();
            insert_grouping(&mut int_part, locale.grouping_separator);
            return format!("{}{}", int_part, &body[pos..]);
        }
    }
    insert_grouping(&mut body, locale.grouping_separator);
    body
}

fn insert_grouping(int_part: &mut String, separator: char) {
    let mut cleaned = int_part.replace(separator, "");
    if cleaned.starts_with('-') {
        let sign = cleaned.remove(0);
        *int_part = format!("{}{}", sign, group_digits(&cleaned, separator));
    } else {
        *int_part = group_digits(&cleaned, separator);
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

pub fn format_currency_value(
    amount: f64,
    code: &CurrencyCode,
    locale: &LocaleConfig,
    options: &FormatOptions,
) -> String {
    let precision = minor_units_for(code.as_str());
    let mut body = format_number(locale, amount.abs(), precision);
    if amount < 0.0 {
        body = match options.negative_style {
            NegativeStyle::Sign => format!("-{}", body),
            NegativeStyle::Parentheses => format!("({})", body),
        };
    }
    let symbol = symbol_for(code.as_str());
    match options.currency_display {
        CurrencyDisplay::Symbol => match body.strip_prefix('-') {
            Some(unsigned) => format!("-{}{}", symbol, unsigned),
            None => format!("{}{}", symbol, body),
        },
        CurrencyDisplay::Code => format!("{} {}", code.as_str(), body),
        CurrencyDisplay::SymbolAndCode => format!("{} {} ({})", symbol, body, code.as_str()),
    }
}

/// Formats an amount in minor units with the default locale, e.g. `10000` USD
/// renders as `$100.00`.
pub fn convert_to_display_string(amount: i64, code: &CurrencyCode) -> String {
    convert_to_display_string_with(amount, code, &DEFAULT_LOCALE, &DEFAULT_OPTIONS)
}

pub fn convert_to_display_string_with(
    amount: i64,
    code: &CurrencyCode,
    locale: &LocaleConfig,
    options: &FormatOptions,
) -> String {
    format_currency_value(from_minor_units(amount, code), code, locale, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_cents_with_symbol_and_grouping() {
        let usd = CurrencyCode::new("usd");
        assert_eq!(convert_to_display_string(10_000, &usd), "$100.00");
        assert_eq!(convert_to_display_string(123_456_789, &usd), "$1,234,567.89");
        assert_eq!(convert_to_display_string(-2_550, &usd), "-$25.50");
    }

    #[test]
    fn zero_decimal_currencies_skip_fraction() {
        let yen = CurrencyCode::new("JPY");
        assert_eq!(convert_to_display_string(15_000, &yen), "¥15,000");
    }

    #[test]
    fn honours_locale_separators_and_code_display() {
        let locale = LocaleConfig {
            language_tag: "de-DE".into(),
            decimal_separator: ',',
            grouping_separator: '.',
        };
        let options = FormatOptions {
            currency_display: CurrencyDisplay::Code,
            negative_style: NegativeStyle::Parentheses,
        };
        let eur = CurrencyCode::new("EUR");
        assert_eq!(
            convert_to_display_string_with(-123_456, &eur, &locale, &options),
            "EUR (1.234,56)"
        );
    }
}
