use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::{
    dto::validation::validate_label,
    state::{
        roles::Role,
        roster::RosterEntry,
        tracker::PlayerId,
    },
};

/// League member as supplied by the league backend.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RosterEntryInput {
    pub id: PlayerId,
    pub name: String,
    pub team: String,
    /// Role label; unknown labels are treated as `starter`.
    #[serde(default)]
    pub role: Option<String>,
}

impl Validate for RosterEntryInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_label(&self.name) {
            errors.add("name", e);
        }
        if let Err(e) = validate_label(&self.team) {
            errors.add("team", e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl From<RosterEntryInput> for RosterEntry {
    fn from(value: RosterEntryInput) -> Self {
        Self {
            id: value.id,
            name: value.name.trim().to_string(),
            team: value.team.trim().to_string(),
            role: value
                .role
                .as_deref()
                .map(Role::from_label)
                .unwrap_or_default(),
        }
    }
}

/// Full roster replacement payload.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ReplaceRosterRequest {
    #[validate(nested)]
    pub players: Vec<RosterEntryInput>,
}

/// League member as exposed by the API.
#[derive(Debug, Serialize, ToSchema, Clone, PartialEq, Eq)]
pub struct RosterEntrySummary {
    pub id: PlayerId,
    pub name: String,
    pub team: String,
    pub role: Role,
}

impl From<&RosterEntry> for RosterEntrySummary {
    fn from(entry: &RosterEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name.clone(),
            team: entry.team.clone(),
            role: entry.role,
        }
    }
}
