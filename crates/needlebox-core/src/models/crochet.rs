//! Crochet hook records

use serde::{Deserialize, Serialize};
use std::fmt;

use super::components::join_words;
use super::ToolInfo;
use crate::reconcile::{Dimension, Measured, Measurement, MeasurementPair, HANDLE_LENGTH};

/// Shape of the hook throat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HookStyle {
    Inline,
    Tapered,
}

impl HookStyle {
    pub fn label(&self) -> &'static str {
        match self {
            HookStyle::Inline => "Inline",
            HookStyle::Tapered => "Tapered",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrochetHook {
    #[serde(flatten)]
    pub info: ToolInfo,
    pub diameter_mm: f64,
    #[serde(default)]
    pub handle_length_cm: Option<f64>,
    #[serde(default)]
    pub handle_length_in: Option<f64>,
    #[serde(default)]
    pub handle_material: String,
    pub style: HookStyle,
    pub us_size: String,
}

impl CrochetHook {
    /// Metric and US size, e.g. `5 mm (US H-8)`
    pub fn size_string(&self) -> String {
        format!("{} mm (US {})", self.diameter_mm, self.us_size)
    }
}

impl Measured for CrochetHook {
    fn measurements(&mut self) -> Vec<Measurement<'_>> {
        vec![Measurement::new(
            HANDLE_LENGTH,
            &mut self.handle_length_cm,
            &mut self.handle_length_in,
        )]
    }

    fn measurement_pairs(&self) -> Vec<(Dimension, MeasurementPair)> {
        vec![HANDLE_LENGTH.snapshot(self.handle_length_cm, self.handle_length_in)]
    }
}

impl fmt::Display for CrochetHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.size_string();
        write!(
            f,
            "{} crochet hook",
            join_words(&[
                &size,
                &self.handle_material,
                &self.info.brand,
                &self.info.model,
                &self.info.material,
            ])
        )
    }
}
