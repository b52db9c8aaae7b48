use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter},
};

use ordered_float::OrderedFloat;

/// Accumulated irradiance in watt-hours per square metre.
///
/// The only quantity this crate sums and compares: hourly `Wh/m²`
/// contributions accumulated over a period, never averaged.
#[repr(transparent)]
#[derive(
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::Sub,
    derive_more::Sum,
    Clone,
    Copy,
)]
pub struct WattHoursPerSquareMetre(pub f64);

impl WattHoursPerSquareMetre {
    pub const ZERO: Self = Self(0.0);

    /// Strictly below any attainable total, so the first real candidate
    /// always replaces it.
    pub const SENTINEL: Self = Self(f64::NEG_INFINITY);
}

impl Display for WattHoursPerSquareMetre {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{:.0} Wh/m²", self.0)
    }
}

impl Debug for WattHoursPerSquareMetre {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.0, formatter)?;
        write!(formatter, " Wh/m²")
    }
}

impl PartialOrd for WattHoursPerSquareMetre {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WattHoursPerSquareMetre {
    fn cmp(&self, other: &Self) -> Ordering {
        OrderedFloat(self.0).cmp(&OrderedFloat(other.0))
    }
}

impl PartialEq for WattHoursPerSquareMetre {
    fn eq(&self, other: &Self) -> bool {
        OrderedFloat(self.0).eq(&OrderedFloat(other.0))
    }
}

impl Eq for WattHoursPerSquareMetre {}
