//! Data models for needlebox
//!
//! Tool records are composed from shared components rather than a type
//! hierarchy: every record carries a `ToolInfo`, and the measured parts
//! (`TotalLength`, `NeedleTip`, `CircularCord`) bring their dimension pairs
//! with them. The `Tool` enum ties the record variants together and is the
//! unit callers load, reconcile and render.

mod components;
mod crochet;
mod needles;
mod spindle;

pub use components::{CircularCord, NeedleTip, TotalLength};
pub use crochet::{CrochetHook, HookStyle};
pub use needles::{
    CableNeedle, DoublePointedNeedle, FixedCircular, InterchangeableCord, InterchangeableTip,
    StraightNeedle,
};
pub use spindle::{Spindle, SpindleType, WhorlPosition};

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::reconcile::{Dimension, Measured, Measurement, MeasurementPair};

/// The kind of tool a record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolType {
    #[serde(rename = "cable")]
    Cable,
    #[serde(rename = "circular")]
    Circular,
    #[serde(rename = "crochet")]
    Crochet,
    #[serde(rename = "dpn")]
    Dpn,
    #[serde(rename = "interchangeable cable")]
    InterchangeableCable,
    #[serde(rename = "interchangeable tip")]
    InterchangeableTip,
    #[serde(rename = "straight")]
    Straight,
    #[serde(rename = "spindle")]
    Spindle,
    #[serde(rename = "loom")]
    Loom,
}

impl ToolType {
    /// Stored value
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolType::Cable => "cable",
            ToolType::Circular => "circular",
            ToolType::Crochet => "crochet",
            ToolType::Dpn => "dpn",
            ToolType::InterchangeableCable => "interchangeable cable",
            ToolType::InterchangeableTip => "interchangeable tip",
            ToolType::Straight => "straight",
            ToolType::Spindle => "spindle",
            ToolType::Loom => "loom",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            ToolType::Cable => "Cable needle",
            ToolType::Circular => "Fixed circular needle",
            ToolType::Crochet => "Crochet hook",
            ToolType::Dpn => "Double pointed needle",
            ToolType::InterchangeableCable => "Interchangeable cable",
            ToolType::InterchangeableTip => "Interchangeable tip",
            ToolType::Straight => "Straight needle",
            ToolType::Spindle => "Spindle",
            ToolType::Loom => "Weaving loom",
        }
    }
}

impl fmt::Display for ToolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn default_quantity() -> u32 {
    1
}

/// Accept a date either as a `YYYY-MM-DD` string or as a native TOML date
fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum DateRepr {
        Text(String),
        Toml(toml::value::Datetime),
    }

    match DateRepr::deserialize(deserializer)? {
        DateRepr::Text(text) => text
            .parse::<NaiveDate>()
            .map_err(|e| de::Error::custom(format!("invalid date '{}': {}", text, e))),
        DateRepr::Toml(datetime) => {
            let date = match (datetime.date, datetime.time) {
                (Some(date), None) => date,
                _ => {
                    return Err(de::Error::custom(format!(
                        "expected a date without a time, found {}",
                        datetime
                    )))
                }
            };
            NaiveDate::from_ymd_opt(date.year.into(), date.month.into(), date.day.into())
                .ok_or_else(|| de::Error::custom(format!("invalid date {}", date)))
        }
    }
}

/// Fields shared by every tool record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub brand: String,
    #[serde(default)]
    pub comment: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub date_acquired: NaiveDate,
    #[serde(default)]
    pub is_retired: bool,
    pub material: String,
    pub model: String,
    /// Identical tools are tracked as one record with a count
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// Where the tool was bought or who gave it
    #[serde(default)]
    pub source: String,
    /// Name of the storage location, if any
    #[serde(default)]
    pub storage_location: Option<String>,
}

impl ToolInfo {
    pub fn new(
        brand: impl Into<String>,
        model: impl Into<String>,
        material: impl Into<String>,
        date_acquired: NaiveDate,
    ) -> Self {
        Self {
            brand: brand.into(),
            comment: String::new(),
            date_acquired,
            is_retired: false,
            material: material.into(),
            model: model.into(),
            quantity: default_quantity(),
            source: String::new(),
            storage_location: None,
        }
    }
}

/// A place tools are kept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageLocation {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl StorageLocation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
        }
    }
}

impl fmt::Display for StorageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Storage location {}", self.name)
    }
}

/// Any tool record, tagged by its `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Tool {
    #[serde(rename = "cable")]
    Cable(CableNeedle),
    #[serde(rename = "circular")]
    Circular(FixedCircular),
    #[serde(rename = "crochet")]
    Crochet(CrochetHook),
    #[serde(rename = "dpn")]
    Dpn(DoublePointedNeedle),
    #[serde(rename = "interchangeable cable")]
    InterchangeableCord(InterchangeableCord),
    #[serde(rename = "interchangeable tip")]
    InterchangeableTip(InterchangeableTip),
    #[serde(rename = "straight")]
    Straight(StraightNeedle),
    #[serde(rename = "spindle")]
    Spindle(Spindle),
}

impl Tool {
    pub fn tool_type(&self) -> ToolType {
        match self {
            Tool::Cable(_) => ToolType::Cable,
            Tool::Circular(_) => ToolType::Circular,
            Tool::Crochet(_) => ToolType::Crochet,
            Tool::Dpn(_) => ToolType::Dpn,
            Tool::InterchangeableCord(_) => ToolType::InterchangeableCable,
            Tool::InterchangeableTip(_) => ToolType::InterchangeableTip,
            Tool::Straight(_) => ToolType::Straight,
            Tool::Spindle(_) => ToolType::Spindle,
        }
    }

    pub fn info(&self) -> &ToolInfo {
        match self {
            Tool::Cable(t) => &t.info,
            Tool::Circular(t) => &t.info,
            Tool::Crochet(t) => &t.info,
            Tool::Dpn(t) => &t.info,
            Tool::InterchangeableCord(t) => &t.info,
            Tool::InterchangeableTip(t) => &t.info,
            Tool::Straight(t) => &t.info,
            Tool::Spindle(t) => &t.info,
        }
    }
}

impl Measured for Tool {
    fn measurements(&mut self) -> Vec<Measurement<'_>> {
        match self {
            Tool::Cable(t) => t.measurements(),
            Tool::Circular(t) => t.measurements(),
            Tool::Crochet(t) => t.measurements(),
            Tool::Dpn(t) => t.measurements(),
            Tool::InterchangeableCord(t) => t.measurements(),
            Tool::InterchangeableTip(t) => t.measurements(),
            Tool::Straight(t) => t.measurements(),
            Tool::Spindle(t) => t.measurements(),
        }
    }

    fn measurement_pairs(&self) -> Vec<(Dimension, MeasurementPair)> {
        match self {
            Tool::Cable(t) => t.measurement_pairs(),
            Tool::Circular(t) => t.measurement_pairs(),
            Tool::Crochet(t) => t.measurement_pairs(),
            Tool::Dpn(t) => t.measurement_pairs(),
            Tool::InterchangeableCord(t) => t.measurement_pairs(),
            Tool::InterchangeableTip(t) => t.measurement_pairs(),
            Tool::Straight(t) => t.measurement_pairs(),
            Tool::Spindle(t) => t.measurement_pairs(),
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tool::Cable(t) => fmt::Display::fmt(t, f),
            Tool::Circular(t) => fmt::Display::fmt(t, f),
            Tool::Crochet(t) => fmt::Display::fmt(t, f),
            Tool::Dpn(t) => fmt::Display::fmt(t, f),
            Tool::InterchangeableCord(t) => fmt::Display::fmt(t, f),
            Tool::InterchangeableTip(t) => fmt::Display::fmt(t, f),
            Tool::Straight(t) => fmt::Display::fmt(t, f),
            Tool::Spindle(t) => fmt::Display::fmt(t, f),
        }
    }
}
