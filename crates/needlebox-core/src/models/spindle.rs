//! Drop spindle records

use serde::{Deserialize, Serialize};
use std::fmt;

use super::components::{join_words, TotalLength};
use super::ToolInfo;
use crate::reconcile::{
    Dimension, Measured, Measurement, MeasurementPair, WEIGHT, WHORL_DIAMETER,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpindleType {
    Drop,
    Supported,
    Turkish,
}

impl SpindleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpindleType::Drop => "drop",
            SpindleType::Supported => "supported",
            SpindleType::Turkish => "turkish",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SpindleType::Drop => "Drop spindle",
            SpindleType::Supported => "Supported spindle",
            SpindleType::Turkish => "Turkish spindle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WhorlPosition {
    Top,
    Bottom,
    Middle,
    Convertible,
}

impl WhorlPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            WhorlPosition::Top => "top",
            WhorlPosition::Bottom => "bottom",
            WhorlPosition::Middle => "middle",
            WhorlPosition::Convertible => "convertible",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spindle {
    #[serde(flatten)]
    pub info: ToolInfo,
    #[serde(flatten)]
    pub length: TotalLength,
    pub spindle_type: SpindleType,
    pub whorl_position: WhorlPosition,
    #[serde(default)]
    pub weight_g: Option<f64>,
    #[serde(default)]
    pub weight_oz: Option<f64>,
    #[serde(default)]
    pub whorl_diameter_cm: Option<f64>,
    #[serde(default)]
    pub whorl_diameter_mm: Option<f64>,
}

impl Measured for Spindle {
    fn measurements(&mut self) -> Vec<Measurement<'_>> {
        vec![
            self.length.measurement(),
            Measurement::new(
                WHORL_DIAMETER,
                &mut self.whorl_diameter_cm,
                &mut self.whorl_diameter_mm,
            ),
            Measurement::new(WEIGHT, &mut self.weight_g, &mut self.weight_oz),
        ]
    }

    fn measurement_pairs(&self) -> Vec<(Dimension, MeasurementPair)> {
        vec![
            self.length.pair(),
            WHORL_DIAMETER.snapshot(self.whorl_diameter_cm, self.whorl_diameter_mm),
            WEIGHT.snapshot(self.weight_g, self.weight_oz),
        ]
    }
}

impl fmt::Display for Spindle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-whorl {} spindle",
            join_words(&[
                &self.info.brand,
                &self.info.model,
                &self.info.material,
                self.whorl_position.as_str(),
            ]),
            self.spindle_type.as_str()
        )
    }
}
