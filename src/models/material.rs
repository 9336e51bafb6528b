use serde::{Deserialize, Serialize};

/// Unit used when none is given, "Stück".
pub const DEFAULT_UNIT: &str = "Stk";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Material {
    pub id: u32,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    /// `None` means the material is general inventory stock.
    pub project_id: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct NewMaterial {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub project_id: Option<u32>,
}

impl NewMaterial {
    pub fn new(name: impl Into<String>, quantity: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: DEFAULT_UNIT.to_string(),
            project_id: None,
        }
    }
}
