//! Swiss canton codes for patient addresses.

/// Check whether `code` is one of the 26 Swiss canton abbreviations.
pub fn is_known_canton(code: &str) -> bool {
    CANTONS.binary_search(&code).is_ok()
}

/// Sorted for binary search.
static CANTONS: &[&str] = &[
    "AG", "AI", "AR", "BE", "BL", "BS", "FR", "GE", "GL", "GR", "JU", "LU", "NE", "NW", "OW", "SG",
    "SH", "SO", "SZ", "TG", "TI", "UR", "VD", "VS", "ZG", "ZH",
];
