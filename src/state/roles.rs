use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

/// Per-half cap applied to s-class players (20 minutes).
pub const S_CLASS_MAX_PER_HALF_SECS: u32 = 20 * 60;
/// Per-half warning threshold for s-class players (80% of the cap).
pub const S_CLASS_WARNING_PER_HALF_SECS: u32 = 16 * 60;
/// Minimum total playing time expected from starters (10 minutes).
pub const STARTER_MIN_TOTAL_SECS: u32 = 10 * 60;

/// Playing role of a league member, as far as playtime rules are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Team captain, plays without restriction.
    Captain,
    /// Restricted player capped per half.
    SClass,
    /// Regular player with a minimum total playing time.
    #[default]
    Starter,
}

impl Role {
    /// Parse a role label coming from the league backend.
    ///
    /// Labels are trimmed and case-folded. Anything unrecognised is logged and
    /// treated as [`Role::Starter`].
    pub fn from_label(label: &str) -> Self {
        match Self::parse(label) {
            Some(role) => role,
            None => {
                warn!(role = label, "unknown player role; defaulting to starter");
                Role::Starter
            }
        }
    }

    /// Strict variant of [`Role::from_label`] returning `None` for unknown labels.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "captain" => Some(Role::Captain),
            "s-class" | "s_class" | "sclass" => Some(Role::SClass),
            "starter" => Some(Role::Starter),
            _ => None,
        }
    }

    /// Canonical label used in API payloads and messages.
    pub fn label(self) -> &'static str {
        match self {
            Role::Captain => "captain",
            Role::SClass => "s-class",
            Role::Starter => "starter",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Time thresholds attached to a role, all expressed in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct PlayerConstraints {
    /// Hard cap of playing time within a single half.
    pub max_per_half: Option<u32>,
    /// Minimum total playing time over the whole match.
    pub min_total: u32,
    /// Threshold within a half after which a warning is raised.
    pub warning_per_half: Option<u32>,
}

/// Constraint table for the given role.
pub fn role_constraints(role: Role) -> PlayerConstraints {
    match role {
        Role::Captain => PlayerConstraints {
            max_per_half: None,
            min_total: 0,
            warning_per_half: None,
        },
        Role::SClass => PlayerConstraints {
            max_per_half: Some(S_CLASS_MAX_PER_HALF_SECS),
            min_total: 0,
            warning_per_half: Some(S_CLASS_WARNING_PER_HALF_SECS),
        },
        Role::Starter => PlayerConstraints {
            max_per_half: None,
            min_total: STARTER_MIN_TOTAL_SECS,
            warning_per_half: None,
        },
    }
}

/// Constraint table for a raw role label (see [`Role::from_label`]).
pub fn constraints_for_label(label: &str) -> PlayerConstraints {
    role_constraints(Role::from_label(label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_case_folded() {
        assert_eq!(Role::from_label("Captain"), Role::Captain);
        assert_eq!(Role::from_label("  S-CLASS "), Role::SClass);
        assert_eq!(Role::from_label("s_class"), Role::SClass);
        assert_eq!(Role::from_label("STARTER"), Role::Starter);
    }

    #[test]
    fn unknown_label_falls_back_to_starter() {
        assert_eq!(Role::parse("goalkeeper"), None);
        assert_eq!(Role::from_label("goalkeeper"), Role::Starter);
        assert_eq!(
            constraints_for_label(""),
            role_constraints(Role::Starter)
        );
    }

    #[test]
    fn captain_is_unrestricted() {
        let constraints = role_constraints(Role::Captain);
        assert_eq!(constraints.max_per_half, None);
        assert_eq!(constraints.min_total, 0);
        assert_eq!(constraints.warning_per_half, None);
    }

    #[test]
    fn s_class_has_cap_and_warning() {
        let constraints = role_constraints(Role::SClass);
        assert_eq!(constraints.max_per_half, Some(1200));
        assert_eq!(constraints.warning_per_half, Some(960));
        assert_eq!(constraints.min_total, 0);
    }

    #[test]
    fn starter_has_minimum_only() {
        let constraints = role_constraints(Role::Starter);
        assert_eq!(constraints.max_per_half, None);
        assert_eq!(constraints.min_total, 600);
        assert_eq!(constraints.warning_per_half, None);
    }

    #[test]
    fn serde_uses_canonical_labels() {
        assert_eq!(serde_json::to_string(&Role::SClass).unwrap(), "\"s-class\"");
        let role: Role = serde_json::from_str("\"captain\"").unwrap();
        assert_eq!(role, Role::Captain);
    }
}
