//! IMEI field validation and normalization.
//!
//! An IMEI is stored as a 15-digit ASCII string. Validation here is purely
//! local (no checksum verification, no I/O) -- the Luhn check digit is part
//! of the 15 digits and carriers are not consistent about it, so we accept
//! any 15-digit value.

/// Number of digits in a well-formed IMEI.
pub const IMEI_LENGTH: usize = 15;

/// Static CSV template served to admins as a starting point for bulk
/// uploads: the required header plus one sample row.
pub const IMPORT_CSV_TEMPLATE: &str = "imei,product_id,is_registered\n358128870236764,1,true\n";

/// Normalize a raw IMEI field: trim surrounding whitespace and validate
/// that exactly [`IMEI_LENGTH`] ASCII digits remain.
///
/// Returns the trimmed value on success, or `None` if the input is not a
/// well-formed IMEI.
pub fn normalize_imei(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.len() == IMEI_LENGTH && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        Some(trimmed)
    } else {
        None
    }
}

/// Parse the optional `is_registered` flag from an untyped CSV field.
///
/// `"true"` and `"1"` (after trim, case-insensitive) mean registered;
/// anything else, including an absent field, means not registered.
pub fn parse_registered_flag(raw: Option<&str>) -> bool {
    match raw {
        Some(value) => {
            let v = value.trim().to_lowercase();
            v == "true" || v == "1"
        }
        None => false,
    }
}

// ── Tests ────────────────────────────────────────────────────────────
