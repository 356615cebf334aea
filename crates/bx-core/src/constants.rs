//! Physical constants.

/// Boltzmann constant (J K-1).
pub const BOLTZMANN_CONSTANT: f64 = 1.380_649e-23;

/// Avogadro constant (mol-1).
pub const AVOGADRO_CONSTANT: f64 = 6.022_140_76e23;

/// Universal gas constant (J K-1 mol-1).
pub const GAS_CONSTANT: f64 = BOLTZMANN_CONSTANT * AVOGADRO_CONSTANT;
