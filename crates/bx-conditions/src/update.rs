//! Sparse per-time condition payloads.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The conditions to set at one time point.
///
/// Every field is optional; omitted fields leave whatever was previously
/// stored untouched, both when upserting into a [`ConditionsManager`] row
/// and when the driver merges an evolving condition into its running state.
///
/// [`ConditionsManager`]: crate::ConditionsManager
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionUpdate {
    pub temperature: Option<f64>,
    pub pressure: Option<f64>,
    /// Species name to concentration in mol m-3. Applied at the exact time
    /// only, never interpolated.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub concentrations: BTreeMap<String, f64>,
    /// Canonical `PREFIX.label[.unit]` name to value.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rate_parameters: BTreeMap<String, f64>,
}

impl ConditionUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_temperature(mut self, kelvin: f64) -> Self {
        self.temperature = Some(kelvin);
        self
    }

    pub fn with_pressure(mut self, pascals: f64) -> Self {
        self.pressure = Some(pascals);
        self
    }

    pub fn with_concentration(mut self, species: impl Into<String>, mol_m3: f64) -> Self {
        self.concentrations.insert(species.into(), mol_m3);
        self
    }

    pub fn with_rate_parameter(mut self, name: impl Into<String>, value: f64) -> Self {
        self.rate_parameters.insert(name.into(), value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.temperature.is_none()
            && self.pressure.is_none()
            && self.concentrations.is_empty()
            && self.rate_parameters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_fields() {
        let update = ConditionUpdate::new()
            .with_temperature(300.0)
            .with_concentration("O3", 1e-6)
            .with_rate_parameter("PHOTO.jNO2.s-1", 0.01);

        assert_eq!(update.temperature, Some(300.0));
        assert_eq!(update.pressure, None);
        assert_eq!(update.concentrations["O3"], 1e-6);
        assert_eq!(update.rate_parameters["PHOTO.jNO2.s-1"], 0.01);
        assert!(!update.is_empty());
    }

    #[test]
    fn default_is_empty() {
        assert!(ConditionUpdate::new().is_empty());
    }
}
