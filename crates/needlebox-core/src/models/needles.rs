//! Knitting needle records

use serde::{Deserialize, Serialize};
use std::fmt;

use super::components::{inches, join_words, CircularCord, NeedleTip, TotalLength};
use super::ToolInfo;
use crate::reconcile::{Dimension, Measured, Measurement, MeasurementPair};

fn default_set_count() -> u32 {
    2
}

/// A pair (or single survivor) of straight needles
///
/// The total length is the tip length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StraightNeedle {
    #[serde(flatten)]
    pub info: ToolInfo,
    #[serde(flatten)]
    pub length: TotalLength,
    #[serde(flatten)]
    pub tip: NeedleTip,
    /// Usually 2; can be 1 if one has been lost
    #[serde(default = "default_set_count")]
    pub set_count: u32,
}

impl Measured for StraightNeedle {
    fn measurements(&mut self) -> Vec<Measurement<'_>> {
        vec![self.length.measurement(), self.tip.measurement()]
    }

    fn measurement_pairs(&self) -> Vec<(Dimension, MeasurementPair)> {
        vec![self.length.pair(), self.tip.pair()]
    }
}

impl fmt::Display for StraightNeedle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} straight needles",
            needle_words(&self.tip, &self.length, &self.info)
        )
    }
}

/// A tip from an interchangeable needle system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterchangeableTip {
    #[serde(flatten)]
    pub info: ToolInfo,
    #[serde(flatten)]
    pub length: TotalLength,
    #[serde(flatten)]
    pub tip: NeedleTip,
    pub interchangeable_system: String,
}

impl Measured for InterchangeableTip {
    fn measurements(&mut self) -> Vec<Measurement<'_>> {
        vec![self.length.measurement(), self.tip.measurement()]
    }

    fn measurement_pairs(&self) -> Vec<(Dimension, MeasurementPair)> {
        vec![self.length.pair(), self.tip.pair()]
    }
}

impl fmt::Display for InterchangeableTip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} interchangeable needle tips from the {} system",
            needle_words(&self.tip, &self.length, &self.info),
            self.interchangeable_system
        )
    }
}

/// A cord from an interchangeable needle system
///
/// The total length is the cord length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterchangeableCord {
    #[serde(flatten)]
    pub info: ToolInfo,
    #[serde(flatten)]
    pub length: TotalLength,
    #[serde(flatten)]
    pub cord: CircularCord,
    pub interchangeable_system: String,
}

impl Measured for InterchangeableCord {
    fn measurements(&mut self) -> Vec<Measurement<'_>> {
        vec![self.length.measurement(), self.cord.measurement()]
    }

    fn measurement_pairs(&self) -> Vec<(Dimension, MeasurementPair)> {
        vec![self.length.pair(), self.cord.pair()]
    }
}

impl fmt::Display for InterchangeableCord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let length = inches(self.length.total_length_in);
        write!(
            f,
            "{} interchangeable circular cord from the {} system",
            join_words(&[
                &length,
                &self.cord.cord_color,
                &self.info.brand,
                &self.info.model,
                &self.info.material,
            ]),
            self.interchangeable_system
        )
    }
}

/// A fixed circular needle: two tips joined by a permanent cord
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedCircular {
    #[serde(flatten)]
    pub info: ToolInfo,
    #[serde(flatten)]
    pub length: TotalLength,
    #[serde(flatten)]
    pub tip: NeedleTip,
    #[serde(flatten)]
    pub cord: CircularCord,
}

impl Measured for FixedCircular {
    fn measurements(&mut self) -> Vec<Measurement<'_>> {
        vec![
            self.length.measurement(),
            self.tip.measurement(),
            self.cord.measurement(),
        ]
    }

    fn measurement_pairs(&self) -> Vec<(Dimension, MeasurementPair)> {
        vec![self.length.pair(), self.tip.pair(), self.cord.pair()]
    }
}

impl fmt::Display for FixedCircular {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} fixed circular needle",
            needle_words(&self.tip, &self.length, &self.info)
        )
    }
}

/// A set of double-pointed needles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoublePointedNeedle {
    #[serde(flatten)]
    pub info: ToolInfo,
    #[serde(flatten)]
    pub length: TotalLength,
    #[serde(flatten)]
    pub tip: NeedleTip,
    pub set_count: u32,
}

impl Measured for DoublePointedNeedle {
    fn measurements(&mut self) -> Vec<Measurement<'_>> {
        vec![self.length.measurement(), self.tip.measurement()]
    }

    fn measurement_pairs(&self) -> Vec<(Dimension, MeasurementPair)> {
        vec![self.length.pair(), self.tip.pair()]
    }
}

impl fmt::Display for DoublePointedNeedle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Set of {} {} double-pointed needles",
            self.set_count,
            needle_words(&self.tip, &self.length, &self.info)
        )
    }
}

/// A cable needle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CableNeedle {
    #[serde(flatten)]
    pub info: ToolInfo,
    #[serde(flatten)]
    pub length: TotalLength,
    #[serde(flatten)]
    pub tip: NeedleTip,
}

impl Measured for CableNeedle {
    fn measurements(&mut self) -> Vec<Measurement<'_>> {
        vec![self.length.measurement(), self.tip.measurement()]
    }

    fn measurement_pairs(&self) -> Vec<(Dimension, MeasurementPair)> {
        vec![self.length.pair(), self.tip.pair()]
    }
}

impl fmt::Display for CableNeedle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} cable needle",
            needle_words(&self.tip, &self.length, &self.info)
        )
    }
}

/// Size, length, color, brand, model and material, in that order
fn needle_words(tip: &NeedleTip, length: &TotalLength, info: &ToolInfo) -> String {
    let size = tip.size_string();
    let length = inches(length.total_length_in);
    join_words(&[
        &size,
        &length,
        &tip.tip_color,
        &info.brand,
        &info.model,
        &info.material,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::sample_info;

    fn tip() -> NeedleTip {
        NeedleTip {
            tip_color: "red".to_string(),
            ..NeedleTip::new(4.0, "6")
        }
    }

    #[test]
    fn test_straight_needle_display() {
        let needle = StraightNeedle {
            info: sample_info(),
            length: TotalLength::from_in(9.0),
            tip: tip(),
            set_count: 2,
        };
        assert_eq!(
            needle.to_string(),
            "4 mm (US 6) 9 in red Addi Turbo metal straight needles"
        );
    }

    #[test]
    fn test_display_without_length() {
        let needle = CableNeedle {
            info: sample_info(),
            length: TotalLength::default(),
            tip: NeedleTip::new(3.5, "4"),
        };
        assert_eq!(needle.to_string(), "3.5 mm (US 4) Addi Turbo metal cable needle");
    }

    #[test]
    fn test_dpn_display() {
        let dpn = DoublePointedNeedle {
            info: sample_info(),
            length: TotalLength::from_in(6.0),
            tip: tip(),
            set_count: 5,
        };
        assert_eq!(
            dpn.to_string(),
            "Set of 5 4 mm (US 6) 6 in red Addi Turbo metal double-pointed needles"
        );
    }

    #[test]
    fn test_interchangeable_display() {
        let tip = InterchangeableTip {
            info: sample_info(),
            length: TotalLength::from_in(5.0),
            tip: tip(),
            interchangeable_system: "Click".to_string(),
        };
        assert_eq!(
            tip.to_string(),
            "4 mm (US 6) 5 in red Addi Turbo metal interchangeable needle tips from the Click system"
        );

        let cord = InterchangeableCord {
            info: sample_info(),
            length: TotalLength::from_in(24.0),
            cord: CircularCord {
                cord_color: "blue".to_string(),
                ..Default::default()
            },
            interchangeable_system: "Click".to_string(),
        };
        assert_eq!(
            cord.to_string(),
            "24 in blue Addi Turbo metal interchangeable circular cord from the Click system"
        );
    }

    #[test]
    fn test_fixed_circular_reconciles_three_pairs() {
        let mut circular = FixedCircular {
            info: sample_info(),
            length: TotalLength::from_in(32.0),
            tip: NeedleTip {
                tip_length_cm: Some(12.7),
                ..tip()
            },
            cord: CircularCord {
                cord_length_in: Some(24.0),
                ..Default::default()
            },
        };
        assert_eq!(circular.measurements().len(), 3);
        circular.reconcile().unwrap();

        assert!((circular.length.total_length_cm.unwrap() - 81.28).abs() < 1e-9);
        assert!((circular.tip.tip_length_in.unwrap() - 5.0).abs() < 1e-9);
        assert!((circular.cord.cord_length_cm.unwrap() - 60.96).abs() < 1e-9);
    }

    #[test]
    fn test_straight_needle_tip_mismatch() {
        let mut needle = StraightNeedle {
            info: sample_info(),
            length: TotalLength::from_in(9.0),
            tip: NeedleTip {
                tip_length_cm: Some(23.0),
                tip_length_in: Some(14.0),
                ..tip()
            },
            set_count: 2,
        };
        let err = needle.reconcile().unwrap_err();
        let err = err.mismatch().unwrap();
        assert_eq!(err.dimension, "tip length");
        assert_eq!(err.primary, 23.0);
        assert_eq!(err.secondary, 14.0);
        // The total length was not filled in either
        assert_eq!(needle.length.total_length_cm, None);
    }
}
