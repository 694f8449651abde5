//! needlebox Core Library
//!
//! This crate provides the data layer for needlebox, a personal inventory
//! of fiber-arts tools: knitting needles, crochet hooks and spindles.
//!
//! # Unit reconciliation
//!
//! Every measurement on a tool (lengths, whorl diameter, weight) is stored in
//! two units. Before a record is saved, each pair is reconciled: a missing
//! value is derived from the other one, and two supplied values must agree
//! within a fixed tolerance.
//!
//! # Quick Start
//!
//! ```text
//! let mut inventory = Inventory::load(Path::new("tools.toml"))?;
//! let report = inventory.reconcile();
//! for failure in report.failures() {
//!     eprintln!("{}: {}", failure.description, failure.error.as_ref().unwrap());
//! }
//! ```
//!
//! # Modules
//!
//! - `units`: Pure unit conversions
//! - `reconcile`: Dimension pairs and the fill-or-validate rule
//! - `models`: Tool records composed from shared components
//! - `inventory`: Reading tool records from TOML/JSON documents
//! - `config`: Application configuration

pub mod config;
pub mod error;
pub mod inventory;
pub mod models;
pub mod reconcile;
pub mod units;

pub use config::{Config, Format};
pub use error::{InventoryError, InventoryResult};
pub use inventory::{Inventory, InventoryFormat, ReconcileReport, ToolReport};
pub use models::{
    CableNeedle, CircularCord, CrochetHook, DoublePointedNeedle, FixedCircular, HookStyle,
    InterchangeableCord, InterchangeableTip, NeedleTip, Spindle, SpindleType, StorageLocation,
    StraightNeedle, Tool, ToolInfo, ToolType, TotalLength, WhorlPosition,
};
pub use reconcile::{
    Dimension, Measured, Measurement, MeasurementPair, ReconcileError, UnitMismatchError,
};
pub use units::{convert, ConversionError, Unit};
