//! Inventory documents
//!
//! An inventory is a list of tool records (and optionally the storage
//! locations they live in) read from a TOML or JSON document:
//!
//! ```toml
//! [[tools]]
//! type = "straight"
//! brand = "Addi"
//! model = "Turbo"
//! material = "metal"
//! date_acquired = "2024-03-01"
//! diameter_mm = 4.0
//! us_size = "6"
//! total_length_in = 9
//! ```
//!
//! Dates may also be written as native TOML dates (`date_acquired = 2024-03-01`).
//! Unrecognised fields on a tool and storage locations that the document
//! does not declare are logged as warnings at load time.
//!
//! Reconciling an inventory runs the save-time unit checks on every tool
//! and reports each outcome, rather than stopping at the first bad record.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::error::{InventoryError, InventoryResult};
use crate::models::{StorageLocation, Tool, ToolType};
use crate::reconcile::{Measured, ReconcileError};

/// Document formats an inventory can be read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryFormat {
    Toml,
    Json,
}

impl InventoryFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("toml") => Some(InventoryFormat::Toml),
            Some("json") => Some(InventoryFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    pub locations: Vec<StorageLocation>,
    #[serde(default)]
    pub tools: Vec<Tool>,
}

impl Inventory {
    pub fn from_toml_str(content: &str) -> InventoryResult<Self> {
        let inventory: Self = toml::from_str(content)?;
        let raw: serde_json::Value = toml::from_str(content)?;
        inventory.warn_unchecked(&raw);
        Ok(inventory)
    }

    pub fn from_json_str(content: &str) -> InventoryResult<Self> {
        let inventory: Self = serde_json::from_str(content)?;
        let raw: serde_json::Value = serde_json::from_str(content)?;
        inventory.warn_unchecked(&raw);
        Ok(inventory)
    }

    /// Fields of the raw document's tool records that no tool field accounts for
    ///
    /// Flattened records cannot deny unknown fields, so a misspelled key
    /// would otherwise vanish silently. Each record is compared against its
    /// own serialized form; returns `(tool index, field name)` pairs.
    pub fn unknown_fields(&self, raw: &serde_json::Value) -> Vec<(usize, String)> {
        let raw_tools = match raw.get("tools").and_then(serde_json::Value::as_array) {
            Some(tools) => tools,
            None => return Vec::new(),
        };

        let mut unknown = Vec::new();
        for (index, (raw_tool, tool)) in raw_tools.iter().zip(&self.tools).enumerate() {
            let (fields, known) = match (raw_tool.as_object(), serde_json::to_value(tool)) {
                (Some(fields), Ok(serde_json::Value::Object(known))) => (fields, known),
                _ => continue,
            };
            unknown.extend(
                fields
                    .keys()
                    .filter(|key| !known.contains_key(key.as_str()))
                    .map(|key| (index, key.clone())),
            );
        }
        unknown
    }

    /// Tools whose storage location is not among the declared locations
    ///
    /// Empty when the inventory declares no locations at all.
    pub fn unknown_locations(&self) -> Vec<(usize, &str)> {
        if self.locations.is_empty() {
            return Vec::new();
        }
        self.tools
            .iter()
            .enumerate()
            .filter_map(|(index, tool)| {
                let name = tool.info().storage_location.as_deref()?;
                let declared = self.locations.iter().any(|location| location.name == name);
                (!declared).then_some((index, name))
            })
            .collect()
    }

    fn warn_unchecked(&self, raw: &serde_json::Value) {
        for (index, field) in self.unknown_fields(raw) {
            warn!("Tool #{}: ignoring unknown field '{}'", index + 1, field);
        }
        for (index, name) in self.unknown_locations() {
            warn!(
                "Tool #{}: storage location '{}' is not declared in this inventory",
                index + 1,
                name
            );
        }
    }

    /// Read an inventory from a `.toml` or `.json` file
    pub fn load(path: &Path) -> InventoryResult<Self> {
        let format =
            InventoryFormat::from_path(path).ok_or_else(|| InventoryError::UnsupportedFormat {
                path: path.to_path_buf(),
            })?;

        let content = std::fs::read_to_string(path)
            .map_err(|e| InventoryError::from_io(e, path.to_path_buf()))?;

        let inventory = match format {
            InventoryFormat::Toml => Self::from_toml_str(&content)?,
            InventoryFormat::Json => Self::from_json_str(&content)?,
        };

        info!(
            "Loaded {} tool(s) and {} location(s) from {:?}",
            inventory.tools.len(),
            inventory.locations.len(),
            path
        );
        Ok(inventory)
    }

    /// Reconcile every tool in place
    ///
    /// Tools that fail are left exactly as they were loaded.
    pub fn reconcile(&mut self) -> ReconcileReport {
        let entries = self
            .tools
            .iter_mut()
            .enumerate()
            .map(|(index, tool)| {
                let error = tool.reconcile().err();
                if let Some(ref e) = error {
                    warn!("Tool #{} ({}) failed reconciliation: {}", index + 1, tool, e);
                }
                ToolReport {
                    index,
                    tool_type: tool.tool_type(),
                    description: tool.to_string(),
                    tool: tool.clone(),
                    error,
                }
            })
            .collect();

        ReconcileReport { entries }
    }
}

/// Outcome of reconciling one tool
#[derive(Debug, Clone, Serialize)]
pub struct ToolReport {
    /// Position of the tool in its inventory, from 0
    pub index: usize,
    pub tool_type: ToolType,
    pub description: String,
    /// The tool after reconciliation (unchanged if it failed)
    pub tool: Tool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ReconcileError>,
}

impl ToolReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcome of reconciling a whole inventory
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReconcileReport {
    pub entries: Vec<ToolReport>,
}

impl ReconcileReport {
    pub fn is_ok(&self) -> bool {
        self.entries.iter().all(ToolReport::is_ok)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ToolReport> {
        self.entries.iter().filter(|entry| !entry.is_ok())
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const SAMPLE_TOML: &str = r#"
[[locations]]
name = "Hall closet"
description = "Top shelf, blue box"

[[tools]]
type = "straight"
brand = "Addi"
model = "Turbo"
material = "metal"
date_acquired = "2024-03-01"
diameter_mm = 4.0
us_size = "6"
total_length_in = 9
storage_location = "Hall closet"

[[tools]]
type = "spindle"
brand = "Louet"
model = "Classic"
material = "wood"
date_acquired = 2023-11-12
spindle_type = "drop"
whorl_position = "top"
weight_g = 100
weight_oz = 10
"#;

    #[test]
    fn test_from_toml_str() {
        let inventory = Inventory::from_toml_str(SAMPLE_TOML).unwrap();
        assert_eq!(inventory.locations.len(), 1);
        assert_eq!(inventory.locations[0].name, "Hall closet");
        assert_eq!(inventory.tools.len(), 2);
        assert_eq!(inventory.tools[0].tool_type(), ToolType::Straight);
        assert_eq!(
            inventory.tools[0].info().storage_location.as_deref(),
            Some("Hall closet")
        );
        assert_eq!(inventory.tools[1].tool_type(), ToolType::Spindle);
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"{
            "tools": [{
                "type": "crochet",
                "brand": "Clover",
                "model": "Amour",
                "material": "aluminum",
                "date_acquired": "2022-06-30",
                "diameter_mm": 5.0,
                "style": "inline",
                "us_size": "H-8",
                "handle_length_in": 5
            }]
        }"#;
        let inventory = Inventory::from_json_str(json).unwrap();
        assert!(inventory.locations.is_empty());
        assert_eq!(inventory.tools[0].tool_type(), ToolType::Crochet);
    }

    #[test]
    fn test_unknown_type_rejected() {
        let json = r#"{"tools": [{"type": "loom", "brand": "Ashford"}]}"#;
        let err = Inventory::from_json_str(json).unwrap_err();
        assert!(matches!(err, InventoryError::Json(_)));
    }

    #[test]
    fn test_reconcile_reports_each_tool() {
        let mut inventory = Inventory::from_toml_str(SAMPLE_TOML).unwrap();
        let report = inventory.reconcile();

        assert_eq!(report.entries.len(), 2);
        assert!(!report.is_ok());
        assert_eq!(report.failure_count(), 1);

        let straight = &report.entries[0];
        assert!(straight.is_ok());
        match &straight.tool {
            Tool::Straight(needle) => {
                assert!((needle.length.total_length_cm.unwrap() - 22.86).abs() < 1e-9);
            }
            other => panic!("expected straight needle, got {:?}", other),
        }

        let spindle = report.failures().next().unwrap();
        assert_eq!(spindle.index, 1);
        assert_eq!(spindle.description, "Louet Classic wood top-whorl drop spindle");
        let err = spindle.error.as_ref().unwrap().mismatch().unwrap();
        assert_eq!(err.dimension, "weight");
        assert_eq!(err.primary, 100.0);
        assert_eq!(err.secondary, 10.0);
    }

    #[test]
    fn test_reconcile_updates_tools_in_place() {
        let mut inventory = Inventory::from_toml_str(SAMPLE_TOML).unwrap();
        inventory.reconcile();
        match &inventory.tools[0] {
            Tool::Straight(needle) => assert!(needle.length.total_length_cm.is_some()),
            other => panic!("expected straight needle, got {:?}", other),
        }
    }

    #[test]
    fn test_report_serializes_error() {
        let mut inventory = Inventory::from_toml_str(SAMPLE_TOML).unwrap();
        let report = inventory.reconcile();
        let value = serde_json::to_value(&report).unwrap();

        assert!(value["entries"][0].get("error").is_none());
        assert_eq!(value["entries"][1]["error"]["kind"], "mismatch");
        assert_eq!(value["entries"][1]["error"]["dimension"], "weight");
        assert_eq!(value["entries"][1]["tool_type"], "spindle");
    }

    #[test]
    fn test_native_toml_date() {
        let inventory = Inventory::from_toml_str(SAMPLE_TOML).unwrap();
        assert_eq!(
            inventory.tools[1].info().date_acquired,
            chrono::NaiveDate::from_ymd_opt(2023, 11, 12).unwrap()
        );
    }

    #[test]
    fn test_non_finite_values_fail_reconciliation() {
        let content = r#"
[[tools]]
type = "spindle"
brand = "Louet"
model = "Classic"
material = "wood"
date_acquired = 2023-11-12
spindle_type = "drop"
whorl_position = "top"
weight_g = 100
weight_oz = nan
total_length_cm = inf
total_length_in = inf
"#;
        let mut inventory = Inventory::from_toml_str(content).unwrap();
        let report = inventory.reconcile();

        assert!(!report.is_ok());
        let err = report.entries[0].error.as_ref().unwrap();
        assert!(matches!(
            err,
            ReconcileError::NonFinite {
                dimension: "total length",
                ..
            }
        ));

        let content = content
            .replace("total_length_cm = inf\n", "")
            .replace("total_length_in = inf\n", "");
        let mut inventory = Inventory::from_toml_str(&content).unwrap();
        let report = inventory.reconcile();
        let err = report.entries[0].error.as_ref().unwrap();
        assert_eq!(err.dimension(), "weight");
        assert!(err.mismatch().is_none());
    }

    #[test]
    fn test_unknown_fields() {
        let content = r#"
[[tools]]
type = "cable"
brand = "Clover"
model = "Cable Stitch"
material = "bamboo"
date_acquired = 2021-01-15
diameter_mm = 3.5
us_size = "4"
total_lenght_in = 9
"#;
        let inventory = Inventory::from_toml_str(content).unwrap();
        let raw: serde_json::Value = toml::from_str(content).unwrap();
        assert_eq!(
            inventory.unknown_fields(&raw),
            vec![(0, "total_lenght_in".to_string())]
        );

        let inventory = Inventory::from_toml_str(SAMPLE_TOML).unwrap();
        let raw: serde_json::Value = toml::from_str(SAMPLE_TOML).unwrap();
        assert!(inventory.unknown_fields(&raw).is_empty());
    }

    #[test]
    fn test_unknown_locations() {
        let mut inventory = Inventory::from_toml_str(SAMPLE_TOML).unwrap();
        assert!(inventory.unknown_locations().is_empty());

        inventory.locations[0].name = "Attic".to_string();
        assert_eq!(inventory.unknown_locations(), vec![(0, "Hall closet")]);

        inventory.locations.clear();
        assert!(inventory.unknown_locations().is_empty());
    }

    #[test]
    fn test_load_by_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tools.toml");
        std::fs::write(&path, SAMPLE_TOML).unwrap();

        let inventory = Inventory::load(&path).unwrap();
        assert_eq!(inventory.tools.len(), 2);
    }

    #[test]
    fn test_load_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tools.yaml");
        std::fs::write(&path, "tools: []").unwrap();

        let err = Inventory::load(&path).unwrap_err();
        assert!(matches!(err, InventoryError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Inventory::load(&PathBuf::from("/nonexistent/tools.json")).unwrap_err();
        assert!(matches!(err, InventoryError::NotFound { .. }));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            InventoryFormat::from_path(Path::new("a/b.TOML")),
            Some(InventoryFormat::Toml)
        );
        assert_eq!(
            InventoryFormat::from_path(Path::new("b.json")),
            Some(InventoryFormat::Json)
        );
        assert_eq!(InventoryFormat::from_path(Path::new("noext")), None);
    }
}
