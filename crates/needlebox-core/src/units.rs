//! Unit conversions
//!
//! Pure conversion functions between the metric and imperial units used by
//! tool measurements, plus a small `Unit` enum for callers that pick units
//! at runtime (the CLI `convert` command, error messages).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Centimeters in one inch
pub const CM_PER_INCH: f64 = 2.54;

/// Grams in one ounce
pub const GRAMS_PER_OUNCE: f64 = 28.35;

/// Millimeters in one centimeter
pub const MM_PER_CM: f64 = 10.0;

pub fn in_to_cm(inches: f64) -> f64 {
    inches * CM_PER_INCH
}

pub fn cm_to_in(centimeters: f64) -> f64 {
    centimeters / CM_PER_INCH
}

pub fn g_to_oz(grams: f64) -> f64 {
    grams / GRAMS_PER_OUNCE
}

pub fn oz_to_g(ounces: f64) -> f64 {
    ounces * GRAMS_PER_OUNCE
}

pub fn mm_to_cm(millimeters: f64) -> f64 {
    millimeters / MM_PER_CM
}

pub fn cm_to_mm(centimeters: f64) -> f64 {
    centimeters * MM_PER_CM
}

/// The physical quantity a unit measures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Length,
    Mass,
}

/// A unit of measure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Centimeter,
    Millimeter,
    Inch,
    Gram,
    Ounce,
}

impl Unit {
    /// Short symbol, as used in field names (`cm`, `in`, ...)
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Centimeter => "cm",
            Unit::Millimeter => "mm",
            Unit::Inch => "in",
            Unit::Gram => "g",
            Unit::Ounce => "oz",
        }
    }

    /// Plural name, as used in validation messages
    pub fn plural(&self) -> &'static str {
        match self {
            Unit::Centimeter => "centimeters",
            Unit::Millimeter => "millimeters",
            Unit::Inch => "inches",
            Unit::Gram => "grams",
            Unit::Ounce => "ounces",
        }
    }

    pub fn quantity(&self) -> Quantity {
        match self {
            Unit::Centimeter | Unit::Millimeter | Unit::Inch => Quantity::Length,
            Unit::Gram | Unit::Ounce => Quantity::Mass,
        }
    }

    /// Express `value` (in this unit) in the base unit of its quantity
    /// (centimeters for length, grams for mass)
    fn to_base(self, value: f64) -> f64 {
        match self {
            Unit::Centimeter | Unit::Gram => value,
            Unit::Millimeter => mm_to_cm(value),
            Unit::Inch => in_to_cm(value),
            Unit::Ounce => oz_to_g(value),
        }
    }

    fn from_base(self, value: f64) -> f64 {
        match self {
            Unit::Centimeter | Unit::Gram => value,
            Unit::Millimeter => cm_to_mm(value),
            Unit::Inch => cm_to_in(value),
            Unit::Ounce => g_to_oz(value),
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.symbol())
    }
}

impl std::str::FromStr for Unit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cm" | "centimeter" | "centimeters" => Ok(Unit::Centimeter),
            "mm" | "millimeter" | "millimeters" => Ok(Unit::Millimeter),
            "in" | "inch" | "inches" | "\"" => Ok(Unit::Inch),
            "g" | "gram" | "grams" => Ok(Unit::Gram),
            "oz" | "ounce" | "ounces" => Ok(Unit::Ounce),
            _ => Err(ConversionError::UnknownUnit(s.to_string())),
        }
    }
}

/// Errors from runtime unit conversion
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("Unknown unit: '{0}'. Expected one of: cm, mm, in, g, oz")]
    UnknownUnit(String),

    #[error("Cannot convert {from} to {to}: units measure different quantities")]
    Incompatible { from: Unit, to: Unit },
}

/// Convert `value` from one unit to another of the same quantity
pub fn convert(value: f64, from: Unit, to: Unit) -> Result<f64, ConversionError> {
    if from.quantity() != to.quantity() {
        return Err(ConversionError::Incompatible { from, to });
    }
    if from == to {
        return Ok(value);
    }
    Ok(to.from_base(from.to_base(value)))
}
