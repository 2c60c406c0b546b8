use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{LadleError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: Option<Uuid>,
    pub name: String,
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub is_essential: bool,
    #[serde(default)]
    pub usage_count: i32,
}

impl Tag {
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)
    }
}

/// Groups tags into logical sections ("Cuisine", "Diet").
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Option<Uuid>,
    pub name: String,
    pub description: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Category {
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        let len = self.description.chars().count();
        if !(5..=500).contains(&len) {
            return Err(LadleError::Validation(
                "description must be between 5 and 500 characters".into(),
            ));
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<()> {
    let len = name.chars().count();
    if !(2..=100).contains(&len) {
        return Err(LadleError::Validation(
            "name must be between 2 and 100 characters".into(),
        ));
    }
    Ok(())
}
