use serde::Serialize;
use utoipa::ToSchema;

use crate::state::{
    clock::Half,
    roles::{Role, role_constraints},
};

/// Outcome of checking a player's accumulated time against the role rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct PlaytimeValidation {
    /// True when no rule is violated.
    pub valid: bool,
    /// Broken rules.
    pub violations: Vec<String>,
    /// Rules close to being broken.
    pub warnings: Vec<String>,
}

/// Check accumulated time against the rules of `role`.
pub fn validate_playtime(
    total_time: u32,
    first_half: u32,
    second_half: u32,
    role: Role,
) -> PlaytimeValidation {
    let constraints = role_constraints(role);
    let mut violations = Vec::new();
    let mut warnings = Vec::new();

    for (half, played) in [(Half::First, first_half), (Half::Second, second_half)] {
        if let Some(max) = constraints.max_per_half {
            if played >= max {
                violations.push(format!(
                    "{} half limit of {} reached ({} played)",
                    half_label(half),
                    format_minutes(max),
                    format_minutes(played)
                ));
                continue;
            }
        }
        if let Some(warning) = constraints.warning_per_half {
            if played >= warning {
                warnings.push(format!(
                    "{} half approaching limit ({} played)",
                    half_label(half),
                    format_minutes(played)
                ));
            }
        }
    }

    if total_time < constraints.min_total {
        violations.push(format!(
            "minimum playtime of {} not reached ({} played)",
            format_minutes(constraints.min_total),
            format_minutes(total_time)
        ));
    }

    PlaytimeValidation {
        valid: violations.is_empty(),
        violations,
        warnings,
    }
}

fn half_label(half: Half) -> &'static str {
    match half {
        Half::First => "first",
        Half::Second => "second",
    }
}

/// Render seconds as `mm:ss`.
pub fn format_minutes(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captain_is_always_valid() {
        let result = validate_playtime(0, 0, 0, Role::Captain);
        assert!(result.valid);
        assert!(result.violations.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn starter_below_minimum_is_violation() {
        let result = validate_playtime(500, 500, 0, Role::Starter);
        assert!(!result.valid);
        assert_eq!(result.violations.len(), 1);
        assert!(result.violations[0].contains("10:00"));

        assert!(validate_playtime(600, 300, 300, Role::Starter).valid);
    }

    #[test]
    fn s_class_cap_and_warning_per_half() {
        let result = validate_playtime(2200, 1200, 1000, Role::SClass);
        assert!(!result.valid);
        assert_eq!(result.violations.len(), 1);
        assert!(result.violations[0].starts_with("first half"));
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].starts_with("second half"));

        let fine = validate_playtime(1800, 900, 900, Role::SClass);
        assert!(fine.valid);
        assert!(fine.warnings.is_empty());
    }

    #[test]
    fn minutes_are_zero_padded() {
        assert_eq!(format_minutes(0), "0:00");
        assert_eq!(format_minutes(965), "16:05");
    }
}
