//! Shared record components
//!
//! Tool records are composed from these pieces. Each component that carries
//! a dimension pair exposes it as a `Measurement` so records can list their
//! pairs without repeating the field plumbing.

use serde::{Deserialize, Serialize};

use crate::reconcile::{
    Dimension, Measurement, MeasurementPair, CORD_LENGTH, TIP_LENGTH, TOTAL_LENGTH,
};

/// Overall length of a tool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TotalLength {
    #[serde(default)]
    pub total_length_cm: Option<f64>,
    #[serde(default)]
    pub total_length_in: Option<f64>,
}

impl TotalLength {
    pub fn from_cm(cm: f64) -> Self {
        Self {
            total_length_cm: Some(cm),
            total_length_in: None,
        }
    }

    pub fn from_in(inches: f64) -> Self {
        Self {
            total_length_cm: None,
            total_length_in: Some(inches),
        }
    }

    pub fn measurement(&mut self) -> Measurement<'_> {
        Measurement::new(
            TOTAL_LENGTH,
            &mut self.total_length_cm,
            &mut self.total_length_in,
        )
    }

    pub fn pair(&self) -> (Dimension, MeasurementPair) {
        TOTAL_LENGTH.snapshot(self.total_length_cm, self.total_length_in)
    }
}

/// The working end of a knitting needle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NeedleTip {
    pub diameter_mm: f64,
    #[serde(default)]
    pub tip_color: String,
    #[serde(default)]
    pub tip_length_cm: Option<f64>,
    #[serde(default)]
    pub tip_length_in: Option<f64>,
    pub us_size: String,
}

impl NeedleTip {
    pub fn new(diameter_mm: f64, us_size: impl Into<String>) -> Self {
        Self {
            diameter_mm,
            us_size: us_size.into(),
            ..Default::default()
        }
    }

    /// Metric and US size, e.g. `4 mm (US 6)`
    pub fn size_string(&self) -> String {
        format!("{} mm (US {})", self.diameter_mm, self.us_size)
    }

    pub fn measurement(&mut self) -> Measurement<'_> {
        Measurement::new(TIP_LENGTH, &mut self.tip_length_cm, &mut self.tip_length_in)
    }

    pub fn pair(&self) -> (Dimension, MeasurementPair) {
        TIP_LENGTH.snapshot(self.tip_length_cm, self.tip_length_in)
    }
}

/// The cable joining the tips of a circular needle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CircularCord {
    #[serde(default)]
    pub cord_color: String,
    #[serde(default)]
    pub cord_length_cm: Option<f64>,
    #[serde(default)]
    pub cord_length_in: Option<f64>,
    #[serde(default)]
    pub has_swivel: bool,
}

impl CircularCord {
    pub fn measurement(&mut self) -> Measurement<'_> {
        Measurement::new(
            CORD_LENGTH,
            &mut self.cord_length_cm,
            &mut self.cord_length_in,
        )
    }

    pub fn pair(&self) -> (Dimension, MeasurementPair) {
        CORD_LENGTH.snapshot(self.cord_length_cm, self.cord_length_in)
    }
}

/// Format an optional length in inches for display (`9 in`), empty if unknown
pub(crate) fn inches(value: Option<f64>) -> String {
    value.map(|v| format!("{} in", v)).unwrap_or_default()
}

/// Join display words with single spaces, skipping blanks
pub(crate) fn join_words(words: &[&str]) -> String {
    words
        .iter()
        .map(|w| w.trim())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
