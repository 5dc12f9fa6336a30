//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Formats a square footage with thousands separators: `2500` becomes
/// `2,500 sq ft`.
#[askama::filter_fn]
pub fn sqft(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format!("{} sq ft", group_thousands(&value.to_string())))
}

/// Formats whole dollars: `1850` becomes `$1,850`.
#[askama::filter_fn]
pub fn money(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format!("${}", group_thousands(&value.to_string())))
}

fn group_thousands(digits: &str) -> String {
    let (sign, digits) = digits
        .strip_prefix('-')
        .map_or(("", digits), |rest| ("-", rest));
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    format!("{sign}{out}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("0"), "0");
        assert_eq!(group_thousands("950"), "950");
        assert_eq!(group_thousands("2500"), "2,500");
        assert_eq!(group_thousands("1234567"), "1,234,567");
        assert_eq!(group_thousands("-4200"), "-4,200");
    }
}
