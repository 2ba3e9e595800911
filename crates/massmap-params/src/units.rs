//! Unit conversions used while reading and writing parameter documents
//!
//! Angles are always held in degrees inside a [`ParameterSet`](crate::ParameterSet).
//! Parameter documents express pixel sizes in arcminutes and encode
//! on/off controls as integer switches (`1`/`0`).

/// Arcminutes per degree
pub const ARCMIN_PER_DEG: f64 = 60.0;

/// Arcseconds per degree
pub const ARCSEC_PER_DEG: f64 = 3600.0;

/// Convert arcminutes to degrees
#[inline]
#[must_use]
pub fn arcmin_to_deg(arcmin: f64) -> f64 {
    arcmin / ARCMIN_PER_DEG
}

/// Convert arcseconds to degrees
#[inline]
#[must_use]
pub fn arcsec_to_deg(arcsec: f64) -> f64 {
    arcsec / ARCSEC_PER_DEG
}

/// Convert degrees to arcminutes
#[inline]
#[must_use]
pub fn deg_to_arcmin(deg: f64) -> f64 {
    deg * ARCMIN_PER_DEG
}

/// Map a boolean control to the integer switch the map maker expects
#[inline]
#[must_use]
pub fn switch_value(flag: bool) -> u8 {
    u8::from(flag)
}

/// Interpret a switch written either as an integer or as an XML boolean
///
/// Accepts `1`/`0` and `true`/`false` (surrounding whitespace ignored).
#[must_use]
pub fn switch_from_str(raw: &str) -> Option<bool> {
    match raw.trim() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}

/// Serde adapter for switch-valued elements
pub(crate) mod switch {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub(crate) fn serialize<S>(flag: &bool, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(super::switch_value(*flag))
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::switch_from_str(&raw).ok_or_else(|| {
            de::Error::invalid_value(de::Unexpected::Str(&raw), &"one of 1, 0, true, false")
        })
    }
}
