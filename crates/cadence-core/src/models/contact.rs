use serde::{Deserialize, Serialize};

/// Directory entry resolving a contact to its organization and category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub contact_id: String,
    #[serde(default)]
    pub organization_id: Option<String>,
    pub professional_category: String,
}
