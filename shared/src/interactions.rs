//! Advisory drug-interaction check run after a medication is added
//!
//! The check never blocks anything: by the time it runs the server has
//! already stored the new medication. It only decides which toast to show.

use crate::Medication;

/// One declarative interaction rule
///
/// `applies` receives the newly added medication first and an existing
/// snapshot entry second.
#[derive(Clone, Copy)]
pub struct InteractionRule {
    pub name: &'static str,
    pub applies: fn(&Medication, &Medication) -> bool,
    pub message: fn(&Medication, &Medication) -> String,
}

impl std::fmt::Debug for InteractionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InteractionRule").field("name", &self.name).finish()
    }
}

/// Rules in evaluation order
pub const STANDARD_RULES: &[InteractionRule] = &[
    InteractionRule {
        name: "aspirin-warfarin",
        applies: aspirin_with_warfarin,
        message: bleeding_risk_message,
    },
    InteractionRule {
        name: "cipro-food-sensitive",
        applies: cipro_with_food_sensitive,
        message: food_sensitive_message,
    },
];

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn aspirin_with_warfarin(new: &Medication, existing: &Medication) -> bool {
    let pair = |a: &str, b: &str| {
        contains_ignore_case(&new.name, a) && contains_ignore_case(&existing.name, b)
    };
    pair("aspirin", "warfarin") || pair("warfarin", "aspirin")
}

fn cipro_with_food_sensitive(new: &Medication, existing: &Medication) -> bool {
    contains_ignore_case(&new.name, "cipro")
        && existing
            .attributes
            .as_deref()
            .is_some_and(|attrs| contains_ignore_case(attrs, "food sensitive"))
}

fn bleeding_risk_message(new: &Medication, existing: &Medication) -> String {
    format!(
        "⚠️ CRITICAL INTERACTION: {} and {} may cause bleeding risks!",
        new.name, existing.name
    )
}

fn food_sensitive_message(new: &Medication, existing: &Medication) -> String {
    format!(
        "⚠️ Interaction Warning: {} might interact with food-sensitive med {}.",
        new.name, existing.name
    )
}

/// Check a new medication against the snapshot with the standard rules
pub fn check_interactions(new: &Medication, existing: &[Medication]) -> Option<String> {
    check_with_rules(STANDARD_RULES, new, existing)
}

/// First match wins, scanning the snapshot in order and the rules in order
/// for each entry. The new medication itself is skipped if a poll already
/// put it in the snapshot.
pub fn check_with_rules(
    rules: &[InteractionRule],
    new: &Medication,
    existing: &[Medication],
) -> Option<String> {
    existing
        .iter()
        .filter(|other| other.id != new.id)
        .find_map(|other| {
            rules
                .iter()
                .find(|rule| (rule.applies)(new, other))
                .map(|rule| (rule.message)(new, other))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn med(id: i64, name: &str, attributes: &str) -> Medication {
        Medication {
            id,
            name: name.to_string(),
            dosage_form: "Tablet".to_string(),
            dosages_per_day: Some(1),
            attributes: Some(attributes.to_string()),
            next_due_time: None,
        }
    }

    #[test]
    fn test_aspirin_then_warfarin() {
        let snapshot = vec![med(1, "Aspirin", "Standard"), med(2, "Vitamin D", "Standard")];
        let warning = check_interactions(&med(3, "Warfarin", "Standard"), &snapshot).unwrap();
        assert!(warning.contains("CRITICAL INTERACTION"));
        assert!(warning.contains("Warfarin and Aspirin"));
    }

    #[test]
    fn test_warfarin_then_aspirin() {
        let snapshot = vec![med(1, "warfarin sodium", "Standard")];
        let warning = check_interactions(&med(2, "Baby ASPIRIN", "Standard"), &snapshot).unwrap();
        assert!(warning.contains("CRITICAL INTERACTION"));
        assert!(warning.contains("Baby ASPIRIN"));
        assert!(warning.contains("warfarin sodium"));
    }

    #[test]
    fn test_cipro_with_food_sensitive() {
        let snapshot = vec![
            med(1, "Ibuprofen", "Standard"),
            med(2, "Iron", "Food Sensitive (Take with food)"),
        ];
        let warning = check_interactions(&med(3, "Ciprofloxacin", "Standard"), &snapshot).unwrap();
        assert_eq!(
            warning,
            "⚠️ Interaction Warning: Ciprofloxacin might interact with food-sensitive med Iron."
        );
    }

    #[test]
    fn test_cipro_rule_is_one_directional() {
        let snapshot = vec![med(1, "Cipro", "Standard")];
        let new = med(2, "Iron", "Food Sensitive (Take with food)");
        assert_eq!(check_interactions(&new, &snapshot), None);
    }

    #[test]
    fn test_no_match() {
        let snapshot = vec![med(1, "Vitamin C", "Standard"), med(2, "Metformin", "Standard")];
        assert_eq!(check_interactions(&med(3, "Aspirin", "Standard"), &snapshot), None);
        assert_eq!(check_interactions(&med(3, "Aspirin", "Standard"), &[]), None);
    }

    #[test]
    fn test_first_snapshot_match_wins() {
        let snapshot = vec![
            med(1, "Calcium", "Food Sensitive (Take with food)"),
            med(2, "Aspirin", "Standard"),
        ];
        // A made-up name that trips both rules against different entries
        let new = med(3, "Warfarin-Cipro", "Standard");
        let warning = check_interactions(&new, &snapshot).unwrap();
        assert!(warning.contains("food-sensitive med Calcium"));
    }

    #[test]
    fn test_new_medication_is_not_checked_against_itself() {
        let new = med(5, "Cipro", "Food Sensitive (Take with food)");
        let snapshot = vec![new.clone()];
        assert_eq!(check_interactions(&new, &snapshot), None);
    }

    #[test]
    fn test_custom_rules_extend_without_control_flow_changes() {
        fn grapefruit(new: &Medication, existing: &Medication) -> bool {
            new.name.to_lowercase().contains("statin") && existing.name.to_lowercase().contains("grapefruit")
        }
        fn grapefruit_message(new: &Medication, existing: &Medication) -> String {
            format!("{} + {}", new.name, existing.name)
        }

        let mut rules = STANDARD_RULES.to_vec();
        rules.push(InteractionRule {
            name: "statin-grapefruit",
            applies: grapefruit,
            message: grapefruit_message,
        });

        let snapshot = vec![med(1, "Grapefruit extract", "Standard")];
        let warning = check_with_rules(&rules, &med(2, "Atorvastatin", "Standard"), &snapshot);
        assert_eq!(warning.as_deref(), Some("Atorvastatin + Grapefruit extract"));
    }
}
