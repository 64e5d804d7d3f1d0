//! # Formatting Utilities
//!
//! Pure, total functions turning raw values into display-ready strings and
//! categories. Currency lives in [`crate::money`].
//!
//! ## Stock Status Bands
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  0 ─────────── threshold ─────────── threshold × 1.25 ──────────► ∞     │
//! │  │      LOW       ]│       MEDIUM        ]│          HIGH               │
//! │                                                                         │
//! │  Both boundaries are inclusive on the lower band:                       │
//! │    stock == threshold         → Low                                     │
//! │    stock == threshold × 1.25  → Medium                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::PaymentMethod;

/// Multiplier above the threshold that still counts as Medium.
pub const MEDIUM_STOCK_FACTOR: f64 = 1.25;

/// Digits in a complete CNIC.
pub const CNIC_DIGITS: usize = 13;

// =============================================================================
// Stock Status
// =============================================================================

/// Display category for a stock level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum StockStatus {
    Low,
    Medium,
    High,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Low => "Low",
            StockStatus::Medium => "Medium",
            StockStatus::High => "High",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categorizes a stock level against its reorder threshold.
///
/// ```rust
/// use bistro_core::format::{calculate_status, StockStatus};
///
/// assert_eq!(calculate_status(10.0, 10.0), StockStatus::Low);
/// assert_eq!(calculate_status(12.5, 10.0), StockStatus::Medium);
/// assert_eq!(calculate_status(12.6, 10.0), StockStatus::High);
/// ```
pub fn calculate_status(stock: f64, threshold: f64) -> StockStatus {
    if stock <= threshold {
        StockStatus::Low
    } else if stock <= threshold * MEDIUM_STOCK_FACTOR {
        StockStatus::Medium
    } else {
        StockStatus::High
    }
}

// =============================================================================
// Identifiers
// =============================================================================

/// Formats a CNIC as the user types.
///
/// ## Grouping
/// ```text
/// digits    output
/// ───────   ───────────────────
/// 1-5       "12345"            (as typed)
/// 6-12      "12345-6789012"    (first dash only)
/// 13+       "12345-6789012-3"  (5-7-1, extra digits dropped)
/// ```
///
/// Every non-digit character is stripped first, so pasting an already
/// dashed value gives the same result.
pub fn format_cnic(value: &str) -> String {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();

    match digits.len() {
        0..=5 => digits,
        6..=12 => format!("{}-{}", &digits[..5], &digits[5..]),
        _ => format!("{}-{}-{}", &digits[..5], &digits[5..12], &digits[12..13]),
    }
}

/// Returns true when the value holds exactly one full CNIC worth of digits.
pub fn is_complete_cnic(value: &str) -> bool {
    value.chars().filter(char::is_ascii_digit).count() == CNIC_DIGITS
}

/// Formats a staff identifier as `#` plus at least three digits.
///
/// ```rust
/// use bistro_core::format::format_staff_id;
///
/// assert_eq!(format_staff_id("7"), "#007");
/// assert_eq!(format_staff_id(1234), "#1234");
/// ```
pub fn format_staff_id(id: impl fmt::Display) -> String {
    format!("#{:0>3}", id.to_string())
}

// =============================================================================
// Payment Method Stats
// =============================================================================

/// Summary shown at the top of the payment methods settings page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStats {
    /// Methods whose status is exactly `"Active"`.
    pub active_methods_count: usize,

    /// Most used tax type and how many methods use it. `None` for an empty list.
    pub top_tax_type: Option<(String, usize)>,
}

/// Counts active methods and finds the most common tax type.
///
/// Every method is tallied regardless of status. Ties go to the tax type
/// seen first in `methods`.
pub fn calculate_payment_stats(methods: &[PaymentMethod]) -> PaymentStats {
    let active_methods_count = methods.iter().filter(|m| m.is_active()).count();

    // Insertion-ordered tally; lists are a handful of entries long.
    let mut tally: Vec<(&str, usize)> = Vec::new();
    for method in methods {
        match tally.iter_mut().find(|(tax, _)| *tax == method.tax_type) {
            Some((_, count)) => *count += 1,
            None => tally.push((method.tax_type.as_str(), 1)),
        }
    }

    let mut top: Option<(&str, usize)> = None;
    for (tax, count) in tally {
        if top.map_or(true, |(_, best)| count > best) {
            top = Some((tax, count));
        }
    }

    PaymentStats {
        active_methods_count,
        top_tax_type: top.map(|(tax, count)| (tax.to_string(), count)),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn method(status: &str, tax_type: &str) -> PaymentMethod {
        PaymentMethod {
            id: None,
            name: String::new(),
            status: status.to_string(),
            tax_type: tax_type.to_string(),
            tax_rate: None,
        }
    }

    #[test]
    fn test_status_boundaries() {
        for t in [1.0, 4.0, 10.0, 80.0, 1000.0] {
            assert_eq!(calculate_status(t, t), StockStatus::Low, "t = {}", t);
            assert_eq!(calculate_status(1.25 * t, t), StockStatus::Medium, "t = {}", t);
            assert_eq!(calculate_status(1.26 * t, t), StockStatus::High, "t = {}", t);
        }
    }

    #[test]
    fn test_status_below_threshold_and_zero() {
        assert_eq!(calculate_status(0.0, 5.0), StockStatus::Low);
        assert_eq!(calculate_status(5.5, 5.0), StockStatus::Medium);
        assert_eq!(calculate_status(1.0, 0.0), StockStatus::High);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(StockStatus::Low.to_string(), "Low");
        assert_eq!(StockStatus::Medium.to_string(), "Medium");
        assert_eq!(StockStatus::High.to_string(), "High");
    }

    #[test]
    fn test_format_staff_id() {
        assert_eq!(format_staff_id("7"), "#007");
        assert_eq!(format_staff_id("42"), "#042");
        assert_eq!(format_staff_id("123"), "#123");
        assert_eq!(format_staff_id(5u32), "#005");
        assert_eq!(format_staff_id(12345), "#12345");
    }

    #[test]
    fn test_format_cnic_progressive() {
        assert_eq!(format_cnic(""), "");
        assert_eq!(format_cnic("123"), "123");
        assert_eq!(format_cnic("12345"), "12345");
        assert_eq!(format_cnic("123456"), "12345-6");
        assert_eq!(format_cnic("123456789012"), "12345-6789012");
        // 5-7-1 grouping, not the 5-6-1 "12345-678901-2" once listed as an example
        assert_eq!(format_cnic("1234567890123"), "12345-6789012-3");
    }

    #[test]
    fn test_format_cnic_strips_and_truncates() {
        assert_eq!(format_cnic("12345-6789012-3"), "12345-6789012-3");
        assert_eq!(format_cnic("ab12 3"), "123");
        assert_eq!(format_cnic("12345678901234567"), "12345-6789012-3");
    }

    #[test]
    fn test_is_complete_cnic() {
        assert!(is_complete_cnic("35202-1234567-1"));
        assert!(!is_complete_cnic("35202-1234567"));
    }

    #[test]
    fn test_payment_stats_scenario() {
        let methods = vec![
            method("Active", "VAT"),
            method("Active", "VAT"),
            method("Inactive", "GST"),
        ];
        let stats = calculate_payment_stats(&methods);
        assert_eq!(stats.active_methods_count, 2);
        assert_eq!(stats.top_tax_type, Some(("VAT".to_string(), 2)));
    }

    #[test]
    fn test_payment_stats_tie_goes_to_first_seen() {
        let methods = vec![
            method("Inactive", "GST"),
            method("Active", "VAT"),
            method("Active", "VAT"),
            method("Active", "GST"),
        ];
        let stats = calculate_payment_stats(&methods);
        assert_eq!(stats.active_methods_count, 3);
        assert_eq!(stats.top_tax_type, Some(("GST".to_string(), 2)));
    }

    #[test]
    fn test_payment_stats_empty() {
        let stats = calculate_payment_stats(&[]);
        assert_eq!(stats, PaymentStats::default());
    }
}
