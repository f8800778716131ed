use serde::{Deserialize, Serialize};

/// A course from the catalog
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: u32,
    /// Catalog code, e.g. "MAT101"
    pub code: String,
    pub name: String,
    /// Credit count (1-9)
    pub credits: u8,
    #[serde(default)]
    pub description: Option<String>,
}

impl Course {
    pub fn new(id: u32, code: &str, name: &str, credits: u8) -> Self {
        Self {
            id,
            code: code.to_string(),
            name: name.to_string(),
            credits,
            description: None,
        }
    }

    /// Stand-in for a course id that the backend did not return
    pub fn placeholder(id: u32) -> Self {
        Self {
            id,
            code: format!("C{}", id),
            name: format!("Curso {}", id),
            credits: 0,
            description: None,
        }
    }
}

/// Body of the create/update course form
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseForm {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub credits: i64,
    #[serde(default)]
    pub description: Option<String>,
}

impl CourseForm {
    /// Copy with surrounding whitespace removed, as sent to the backend
    pub fn trimmed(&self) -> Self {
        Self {
            code: self.code.trim().to_string(),
            name: self.name.trim().to_string(),
            credits: self.credits,
            description: self
                .description
                .as_ref()
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
        }
    }
}
