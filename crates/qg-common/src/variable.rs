//! The closed set of plotted variables and their display metadata.

use serde::{Deserialize, Serialize};

/// A scalar variable that gets its own figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variable {
    /// Streamfunction, stored as `x`.
    #[serde(rename = "x")]
    Streamfunction,
    /// Potential vorticity, stored as `q`.
    #[serde(rename = "q")]
    PotentialVorticity,
}

/// Labels used when drawing a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableDisplay {
    pub label: &'static str,
    pub unit: &'static str,
    /// Colorbar ticks use `%.1e` formatting.
    pub scientific_colorbar: bool,
}

const DISPLAY_TABLE: [(Variable, VariableDisplay); 2] = [
    (
        Variable::Streamfunction,
        VariableDisplay {
            label: "Streamfunction",
            unit: "m²s⁻¹",
            scientific_colorbar: false,
        },
    ),
    (
        Variable::PotentialVorticity,
        VariableDisplay {
            label: "Potential vorticity",
            unit: "s⁻¹",
            scientific_colorbar: true,
        },
    ),
];

impl Variable {
    /// Every plotted variable, in processing order.
    pub const ALL: [Variable; 2] = [Variable::Streamfunction, Variable::PotentialVorticity];

    /// Name of the variable inside a grid file.
    pub fn code(&self) -> &'static str {
        match self {
            Variable::Streamfunction => "x",
            Variable::PotentialVorticity => "q",
        }
    }

    /// Parse a grid-file variable name.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.code() == s.trim())
    }

    pub fn display(&self) -> VariableDisplay {
        DISPLAY_TABLE
            .iter()
            .find(|(v, _)| v == self)
            .map(|(_, d)| *d)
            .unwrap_or(DISPLAY_TABLE[0].1)
    }

    /// Figure title, e.g. "Streamfunction in m²s⁻¹".
    pub fn title(&self) -> String {
        let display = self.display();
        format!("{} in {}", display.label, display.unit)
    }
}

impl std::fmt::Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Horizontal wind components used for the vector overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindComponent {
    U,
    V,
}

impl WindComponent {
    pub const ALL: [WindComponent; 2] = [WindComponent::U, WindComponent::V];

    pub fn code(&self) -> &'static str {
        match self {
            WindComponent::U => "u",
            WindComponent::V => "v",
        }
    }
}
