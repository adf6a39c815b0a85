//! Shared domain enumerations aligned with the backend schema.

use serde::{Deserialize, Serialize};

/// Timeline entry kind; the backend constrains `experience.category` to
/// exactly these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceCategory {
    Work,
    Education,
}

impl ExperienceCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ExperienceCategory::Work => "work",
            ExperienceCategory::Education => "education",
        }
    }
}
