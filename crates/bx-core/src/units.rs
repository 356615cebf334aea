//! Scalar unit conversions to the SI forms the condition model stores.
//!
//! Config collaborators apply these before values reach the conditions
//! manager; everything downstream is seconds, Pascals, Kelvin, and mol m-3.
//! An unrecognized unit returns `None` so the caller can report the raw
//! input in its own error.

/// Convert a time value to seconds.
///
/// Accepted units: `sec`, `min`, `hour`, `hr`, `day`.
#[inline]
pub fn time_to_seconds(value: f64, unit: &str) -> Option<f64> {
    match unit {
        "sec" => Some(value),
        "min" => Some(value * 60.0),
        "hour" | "hr" => Some(value * 3600.0),
        "day" => Some(value * 86400.0),
        _ => None,
    }
}

/// Convert a pressure value to Pascals.
///
/// Accepted units: `Pa`, `atm`, `bar`, `kPa`, `hPa`, `mbar`.
#[inline]
pub fn pressure_to_pascals(value: f64, unit: &str) -> Option<f64> {
    match unit {
        "Pa" => Some(value),
        "atm" => Some(value * 101_325.0),
        "bar" => Some(value * 100_000.0),
        "kPa" => Some(value * 1000.0),
        "hPa" | "mbar" => Some(value * 100.0),
        _ => None,
    }
}

/// Convert a temperature value to Kelvin.
///
/// Accepted units: `K`, `C`, `F`.
#[inline]
pub fn temperature_to_kelvin(value: f64, unit: &str) -> Option<f64> {
    match unit {
        "K" => Some(value),
        "C" => Some(value + 273.15),
        "F" => Some((value - 32.0) * 5.0 / 9.0 + 273.15),
        _ => None,
    }
}

/// Convert a concentration value to mol m-3.
///
/// Accepted units: `mol m-3`, `mol cm-3`, `molec m-3`, `molec cm-3`.
#[inline]
pub fn concentration_to_mol_m3(value: f64, unit: &str) -> Option<f64> {
    match unit {
        "mol m-3" => Some(value),
        "mol cm-3" => Some(value * 1e3),
        "molec m-3" => Some(value / crate::constants::AVOGADRO_CONSTANT),
        "molec cm-3" => Some(value * 1e3 / crate::constants::AVOGADRO_CONSTANT),
        _ => None,
    }
}
