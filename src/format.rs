// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Display formatting for prices, volumes, market caps and 24h changes.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const BILLION: f64 = 1e9;
const MILLION: f64 = 1e6;

/// Format a dollar amount the way the watchlist tables show it.
///
/// - missing, zero or non-finite: `$0`
/// - below one cent: 8 decimals (`$0.00000123`)
/// - below one dollar: 4 decimals (`$0.5000`)
/// - billions / millions: 2 decimals with a `B` / `M` suffix
/// - anything else: thousands separators, exactly 2 decimals (`$1,234.56`)
pub fn format_usd(value: Option<f64>) -> String {
    let num = match value {
        Some(n) if n != 0.0 && n.is_finite() => n,
        _ => return "$0".to_string(),
    };

    if num < 0.01 {
        format!("${num:.8}")
    } else if num < 1.0 {
        format!("${num:.4}")
    } else if num >= BILLION {
        format!("${:.2}B", num / BILLION)
    } else if num >= MILLION {
        format!("${:.2}M", num / MILLION)
    } else {
        format!("${}", group_thousands(&format!("{num:.2}")))
    }
}

/// Format a 24h percentage change with an explicit sign (`+1.23%`, `-0.40%`).
///
/// Missing values render as an empty string.
pub fn format_change(value: Option<f64>) -> String {
    match value {
        Some(p) if p.is_finite() && p >= 0.0 => format!("+{p:.2}%"),
        Some(p) if p.is_finite() => format!("{p:.2}%"),
        _ => String::new(),
    }
}

/// Direction of a 24h change, used by the front end to color the cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum ChangeDirection {
    Up,
    Down,
    Neutral,
}

impl ChangeDirection {
    pub fn of(value: Option<f64>) -> Self {
        match value {
            Some(p) if p.is_finite() && p >= 0.0 => ChangeDirection::Up,
            Some(p) if p.is_finite() => ChangeDirection::Down,
            _ => ChangeDirection::Neutral,
        }
    }
}

/// Insert `,` every three digits of the integer part of a plain decimal string.
fn group_thousands(plain: &str) -> String {
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain, ""));
    let digits = int_part.len();

    let mut out = String::with_capacity(plain.len() + digits / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_and_missing() {
        assert_eq!(format_usd(Some(0.0)), "$0");
        assert_eq!(format_usd(None), "$0");
        assert_eq!(format_usd(Some(f64::NAN)), "$0");
    }

    #[test]
    fn test_small_values() {
        assert_eq!(format_usd(Some(0.000_001_23)), "$0.00000123");
        assert_eq!(format_usd(Some(0.5)), "$0.5000");
        assert_eq!(format_usd(Some(0.012_345)), "$0.0123");
    }

    #[test]
    fn test_large_values() {
        assert_eq!(format_usd(Some(1_500_000_000.0)), "$1.50B");
        assert_eq!(format_usd(Some(2_500_000.0)), "$2.50M");
        assert_eq!(format_usd(Some(1_000_000.0)), "$1.00M");
    }

    #[test]
    fn test_grouped_values() {
        assert_eq!(format_usd(Some(1.0)), "$1.00");
        assert_eq!(format_usd(Some(999.999)), "$1,000.00");
        assert_eq!(format_usd(Some(1234.5)), "$1,234.50");
        assert_eq!(format_usd(Some(65_432.1)), "$65,432.10");
        assert_eq!(format_usd(Some(123_456.789)), "$123,456.79");
    }

    #[test]
    fn test_change_formatting() {
        assert_eq!(format_change(Some(1.234)), "+1.23%");
        assert_eq!(format_change(Some(0.0)), "+0.00%");
        assert_eq!(format_change(Some(-4.5)), "-4.50%");
        assert_eq!(format_change(None), "");

        assert_eq!(ChangeDirection::of(Some(0.0)), ChangeDirection::Up);
        assert_eq!(ChangeDirection::of(Some(-0.1)), ChangeDirection::Down);
        assert_eq!(ChangeDirection::of(None), ChangeDirection::Neutral);
    }
}
