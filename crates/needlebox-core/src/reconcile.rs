//! Unit reconciliation
//!
//! Every physical measurement on a tool record is stored twice, once in a
//! primary (metric) unit and once in a secondary unit. Before a record is
//! saved each pair is reconciled:
//!
//! - if only one side is present, the other is derived from it
//! - if both are present, they must agree within the dimension's tolerance
//! - if neither is present, nothing is fabricated
//!
//! Supplied values are never overwritten and never averaged. NaN and
//! infinite values are rejected before any of the above.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::units::{self, Unit};

/// Maximum disagreement between the two units of a length, in inches
pub const INCH_TOLERANCE: f64 = 0.5;

/// Maximum disagreement between grams and ounces, in ounces
pub const OUNCE_TOLERANCE: f64 = 0.5;

/// Maximum disagreement between centimeters and millimeters, in millimeters
pub const MILLIMETER_TOLERANCE: f64 = 0.5;

/// A physical quantity tracked in two units, with the rule for relating them
#[derive(Debug, Clone, Copy)]
pub struct Dimension {
    /// Human-readable name, used in validation messages
    pub name: &'static str,
    pub primary_unit: Unit,
    pub secondary_unit: Unit,
    /// Maximum allowed disagreement, in the secondary unit
    pub tolerance: f64,
    to_secondary: fn(f64) -> f64,
    to_primary: fn(f64) -> f64,
}

impl Dimension {
    /// A length stored in centimeters and inches
    pub const fn length(name: &'static str) -> Self {
        Self {
            name,
            primary_unit: Unit::Centimeter,
            secondary_unit: Unit::Inch,
            tolerance: INCH_TOLERANCE,
            to_secondary: units::cm_to_in,
            to_primary: units::in_to_cm,
        }
    }

    /// A small length stored in centimeters and millimeters
    pub const fn diameter(name: &'static str) -> Self {
        Self {
            name,
            primary_unit: Unit::Centimeter,
            secondary_unit: Unit::Millimeter,
            tolerance: MILLIMETER_TOLERANCE,
            to_secondary: units::cm_to_mm,
            to_primary: units::mm_to_cm,
        }
    }

    /// A mass stored in grams and ounces
    pub const fn mass(name: &'static str) -> Self {
        Self {
            name,
            primary_unit: Unit::Gram,
            secondary_unit: Unit::Ounce,
            tolerance: OUNCE_TOLERANCE,
            to_secondary: units::g_to_oz,
            to_primary: units::oz_to_g,
        }
    }

    /// Convert a primary-unit value into the secondary unit
    pub fn to_secondary(&self, primary: f64) -> f64 {
        (self.to_secondary)(primary)
    }

    /// Convert a secondary-unit value into the primary unit
    pub fn to_primary(&self, secondary: f64) -> f64 {
        (self.to_primary)(secondary)
    }

    /// Field name of the primary value on a record (`total_length_cm`)
    pub fn primary_field(&self) -> String {
        format!("{}_{}", self.name.replace(' ', "_"), self.primary_unit.symbol())
    }

    /// Field name of the secondary value on a record (`total_length_in`)
    pub fn secondary_field(&self) -> String {
        format!("{}_{}", self.name.replace(' ', "_"), self.secondary_unit.symbol())
    }

    /// Pair this dimension with the current values of its two fields
    pub fn snapshot(
        self,
        primary: Option<f64>,
        secondary: Option<f64>,
    ) -> (Dimension, MeasurementPair) {
        (self, MeasurementPair { primary, secondary })
    }

    fn check_finite(&self, value: Option<f64>, unit: Unit) -> Result<(), ReconcileError> {
        match value {
            Some(value) if !value.is_finite() => {
                warn!("{} {} is not a finite number: {}", self.name, unit, value);
                Err(ReconcileError::NonFinite {
                    dimension: self.name,
                    unit,
                    value,
                })
            }
            _ => Ok(()),
        }
    }

    /// Fill in or validate a measurement pair
    ///
    /// The agreement check always converts the primary value into the
    /// secondary unit and compares against the supplied secondary value. A
    /// difference exactly equal to the tolerance is accepted.
    pub fn reconcile(&self, pair: MeasurementPair) -> Result<MeasurementPair, ReconcileError> {
        self.check_finite(pair.primary, self.primary_unit)?;
        self.check_finite(pair.secondary, self.secondary_unit)?;

        match (pair.primary, pair.secondary) {
            (None, Some(secondary)) => {
                let primary = self.to_primary(secondary);
                debug!(
                    "Derived {} {} {} from {} {}",
                    self.name, primary, self.primary_unit, secondary, self.secondary_unit
                );
                Ok(MeasurementPair::new(primary, secondary))
            }
            (Some(primary), None) => {
                let secondary = self.to_secondary(primary);
                debug!(
                    "Derived {} {} {} from {} {}",
                    self.name, secondary, self.secondary_unit, primary, self.primary_unit
                );
                Ok(MeasurementPair::new(primary, secondary))
            }
            (Some(primary), Some(secondary)) => {
                let diff = (self.to_secondary(primary) - secondary).abs();
                if diff > self.tolerance {
                    warn!(
                        "{} mismatch: {} {} vs {} {} (off by {:.3} {})",
                        self.name,
                        primary,
                        self.primary_unit,
                        secondary,
                        self.secondary_unit,
                        diff,
                        self.secondary_unit
                    );
                    return Err(ReconcileError::Mismatch(UnitMismatchError {
                        dimension: self.name,
                        primary_unit: self.primary_unit,
                        secondary_unit: self.secondary_unit,
                        primary,
                        secondary,
                    }));
                }
                Ok(pair)
            }
            (None, None) => Ok(pair),
        }
    }

    /// Reconcile two record fields in place
    ///
    /// On failure the fields are left untouched.
    pub fn reconcile_in_place(
        &self,
        primary: &mut Option<f64>,
        secondary: &mut Option<f64>,
    ) -> Result<(), ReconcileError> {
        let reconciled = self.reconcile(MeasurementPair {
            primary: *primary,
            secondary: *secondary,
        })?;
        *primary = reconciled.primary;
        *secondary = reconciled.secondary;
        Ok(())
    }
}

pub const TOTAL_LENGTH: Dimension = Dimension::length("total length");
pub const TIP_LENGTH: Dimension = Dimension::length("tip length");
pub const HANDLE_LENGTH: Dimension = Dimension::length("handle length");
pub const CORD_LENGTH: Dimension = Dimension::length("cord length");
pub const WHORL_DIAMETER: Dimension = Dimension::diameter("whorl diameter");
pub const WEIGHT: Dimension = Dimension::mass("weight");

static ALL_DIMENSIONS: [Dimension; 6] = [
    TOTAL_LENGTH,
    TIP_LENGTH,
    HANDLE_LENGTH,
    CORD_LENGTH,
    WHORL_DIAMETER,
    WEIGHT,
];

/// Every dimension a tool record can carry
pub fn all_dimensions() -> &'static [Dimension] {
    &ALL_DIMENSIONS
}

/// The two values of one dimension on one record
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementPair {
    pub primary: Option<f64>,
    pub secondary: Option<f64>,
}

impl MeasurementPair {
    /// A pair with both values present
    pub fn new(primary: f64, secondary: f64) -> Self {
        Self {
            primary: Some(primary),
            secondary: Some(secondary),
        }
    }

    pub fn primary_only(primary: f64) -> Self {
        Self {
            primary: Some(primary),
            secondary: None,
        }
    }

    pub fn secondary_only(secondary: f64) -> Self {
        Self {
            primary: None,
            secondary: Some(secondary),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.secondary.is_none()
    }
}

/// Both units of a dimension were supplied and disagree beyond tolerance
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error(
    "{dimension} in {} {secondary} and {} {primary} don't agree",
    .secondary_unit.plural(),
    .primary_unit.plural()
)]
pub struct UnitMismatchError {
    pub dimension: &'static str,
    pub primary_unit: Unit,
    pub secondary_unit: Unit,
    /// The primary value as supplied
    pub primary: f64,
    /// The secondary value as supplied
    pub secondary: f64,
}

/// Why a measurement pair could not be reconciled
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReconcileError {
    #[error(transparent)]
    Mismatch(UnitMismatchError),

    #[error("{dimension} in {} is not a finite number: {value}", .unit.plural())]
    NonFinite {
        dimension: &'static str,
        unit: Unit,
        value: f64,
    },
}

impl ReconcileError {
    /// Name of the dimension that failed
    pub fn dimension(&self) -> &'static str {
        match self {
            ReconcileError::Mismatch(e) => e.dimension,
            ReconcileError::NonFinite { dimension, .. } => *dimension,
        }
    }

    pub fn mismatch(&self) -> Option<&UnitMismatchError> {
        match self {
            ReconcileError::Mismatch(e) => Some(e),
            ReconcileError::NonFinite { .. } => None,
        }
    }
}

/// A mutable view of one dimension pair on a record
pub struct Measurement<'a> {
    pub dimension: Dimension,
    pub primary: &'a mut Option<f64>,
    pub secondary: &'a mut Option<f64>,
}

impl<'a> Measurement<'a> {
    pub fn new(
        dimension: Dimension,
        primary: &'a mut Option<f64>,
        secondary: &'a mut Option<f64>,
    ) -> Self {
        Self {
            dimension,
            primary,
            secondary,
        }
    }

    /// Current values of the pair
    pub fn pair(&self) -> MeasurementPair {
        MeasurementPair {
            primary: *self.primary,
            secondary: *self.secondary,
        }
    }
}

/// A record with dimension pairs that must be reconciled before saving
pub trait Measured {
    /// The record's dimension pairs, in declaration order
    fn measurements(&mut self) -> Vec<Measurement<'_>>;

    /// Reconcile every dimension pair on the record
    ///
    /// All pairs are checked before any field is written, so a failure
    /// leaves the record exactly as it was. The first failing dimension (in
    /// declaration order) is reported.
    fn reconcile(&mut self) -> Result<(), ReconcileError> {
        let mut slots = self.measurements();
        let reconciled = slots
            .iter()
            .map(|slot| slot.dimension.reconcile(slot.pair()))
            .collect::<Result<Vec<_>, _>>()?;

        for (slot, pair) in slots.iter_mut().zip(reconciled) {
            *slot.primary = pair.primary;
            *slot.secondary = pair.secondary;
        }
        Ok(())
    }

    /// Current values of every dimension pair, in the same order as
    /// `measurements`
    fn measurement_pairs(&self) -> Vec<(Dimension, MeasurementPair)>;
}
