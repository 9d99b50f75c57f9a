//! Internal helpers for model validation and conversion.
//!
//! They centralize validation and mapping logic so the engine enforces
//! consistent invariants. Only [`normalize_text`] and [`MAX_AMOUNT`] are
//! exported, for callers that build filters or validate input up front.

use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use crate::{EngineError, MoneyCents, ResultEngine};

/// Trim and NFC-normalize a free-text label, rejecting empty values.
///
/// Case is preserved: categories group by their exact spelling.
pub(crate) fn normalize_required_label(value: &str, label: &str) -> ResultEngine<String> {
    let normalized = normalize_text(value);
    if normalized.is_empty() {
        return Err(EngineError::InvalidName(format!("{label} must not be empty")));
    }
    Ok(normalized)
}

/// Trim and NFC-normalize free text that may legitimately be empty.
pub fn normalize_text(value: &str) -> String {
    value.trim().nfc().collect()
}

/// Largest accepted transaction amount: ten trillion in major units.
///
/// Keeps totals over millions of rows far below `i64::MAX`.
pub const MAX_AMOUNT: MoneyCents = MoneyCents::new(1_000_000_000_000_000);

/// Reject negative or out-of-range transaction amounts.
pub(crate) fn validate_amount(amount: MoneyCents) -> ResultEngine<MoneyCents> {
    if amount.is_negative() {
        return Err(EngineError::InvalidAmount(format!(
            "amount must be >= 0, got {amount}"
        )));
    }
    if amount > MAX_AMOUNT {
        return Err(EngineError::InvalidAmount(format!(
            "amount must be <= {MAX_AMOUNT}, got {amount}"
        )));
    }
    Ok(amount)
}

/// Parse a UUID from storage and return a labeled error on failure.
pub(crate) fn parse_uuid(value: &str, label: &str) -> ResultEngine<Uuid> {
    Uuid::parse_str(value).map_err(|_| EngineError::KeyNotFound(format!("invalid {label} id")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_trimmed_and_keep_case() {
        assert_eq!(
            normalize_required_label("  Mutual Fund ", "category").unwrap(),
            "Mutual Fund"
        );
    }

    #[test]
    fn blank_label_is_rejected() {
        assert_eq!(
            normalize_required_label("   ", "bank_cash"),
            Err(EngineError::InvalidName("bank_cash must not be empty".to_string()))
        );
    }

    #[test]
    fn decomposed_text_is_composed() {
        // "e" + combining acute accent
        assert_eq!(normalize_text("Caf\u{0065}\u{0301}"), "Caf\u{00e9}");
    }

    #[test]
    fn negative_amount_is_rejected() {
        assert!(validate_amount(MoneyCents::new(-1)).is_err());
        assert_eq!(validate_amount(MoneyCents::ZERO), Ok(MoneyCents::ZERO));
    }

    #[test]
    fn oversized_amount_is_rejected() {
        assert_eq!(validate_amount(MAX_AMOUNT), Ok(MAX_AMOUNT));
        assert!(matches!(
            validate_amount(MoneyCents::new(i64::MAX)),
            Err(EngineError::InvalidAmount(_))
        ));
    }
}
