//! Mathematical constants

/// 0.5 ln(2π)
pub const HALF_LN_2PI: f64 = 0.918_938_533_204_672_7;
/// Maximum allowed deviation of a probability vector's sum from 1
pub const SIMPLEX_TOL: f64 = 1E-10;
