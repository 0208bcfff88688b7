use serde::{Deserialize, Serialize};

/// Whether a hall has had its seat template allocated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TemplateStatus {
    /// No floors/sections/rows/seats have been written yet
    #[default]
    Empty,
    /// A template build committed for this hall
    Ready,
}

impl TemplateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateStatus::Empty => "Empty",
            TemplateStatus::Ready => "Ready",
        }
    }
}

impl std::fmt::Display for TemplateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TemplateStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Empty" => Ok(TemplateStatus::Empty),
            "Ready" => Ok(TemplateStatus::Ready),
            other => Err(format!("Unknown template status: {}", other)),
        }
    }
}
