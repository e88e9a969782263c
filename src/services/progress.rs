//! Progress service — derived statistics for the dashboard view.

use serde::Serialize;

use crate::types::{BuildingStats, ContactStatus, Neighbor, PetitionStatus, RoadmapStep};

/// Compute aggregate signature statistics from the current neighbor list.
///
/// `target_units` is the 50% threshold that triggers the next legal step,
/// rounded up. Callers must guarantee `total_units > 0`; a zero-capacity
/// building is a programming error, not a recoverable state.
pub fn compute_stats(neighbors: &[Neighbor], total_units: u32) -> BuildingStats {
    assert!(total_units > 0, "total_units must be positive");

    let signed_units = neighbors
        .iter()
        .filter(|n| n.status == PetitionStatus::Signed)
        .count() as u32;

    BuildingStats {
        total_units,
        signed_units,
        target_units: total_units.div_ceil(2),
    }
}

/// Percentage of units signed, rounded to the nearest integer (half up).
pub fn signed_percent(stats: &BuildingStats) -> u32 {
    round_percent(stats.signed_units, stats.total_units)
}

/// Percentage of units needed to reach the threshold.
pub fn target_percent(stats: &BuildingStats) -> u32 {
    round_percent(stats.target_units, stats.total_units)
}

fn round_percent(units: u32, total: u32) -> u32 {
    (f64::from(units) * 100.0 / f64::from(total)).round() as u32
}

/// Resident vs off-site owner counts for the ownership mix panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnershipMix {
    pub residents: u32,
    pub off_site: u32,
}

pub fn ownership_mix(neighbors: &[Neighbor]) -> OwnershipMix {
    let residents = neighbors.iter().filter(|n| n.is_resident).count() as u32;
    OwnershipMix {
        residents,
        off_site: neighbors.len() as u32 - residents,
    }
}

/// One entry in the dashboard's priority-action panel.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityAction {
    pub title: String,
    pub detail: String,
    pub in_progress: bool,
}

/// Derive the priority-action panel from live state: the step currently in
/// progress, a contact-hunting task while any owner is unreachable, and the
/// step after that.
pub fn priority_actions(neighbors: &[Neighbor], steps: &[RoadmapStep]) -> Vec<PriorityAction> {
    let mut actions = Vec::new();
    let mut incomplete = steps.iter().filter(|s| !s.is_completed);

    if let Some(step) = incomplete.next() {
        actions.push(PriorityAction {
            title: step.title.clone(),
            detail: step.description.clone(),
            in_progress: true,
        });
    }

    let missing = neighbors
        .iter()
        .filter(|n| n.contact_status == ContactStatus::Missing)
        .count();
    if missing > 0 {
        actions.push(PriorityAction {
            title: "Find Missing Contacts".to_string(),
            detail: format!(
                "Contact details needed for {} owner{} before formal notices can be served.",
                missing,
                if missing == 1 { "" } else { "s" }
            ),
            in_progress: false,
        });
    }

    if let Some(step) = incomplete.next() {
        actions.push(PriorityAction {
            title: step.title.clone(),
            detail: step.description.clone(),
            in_progress: false,
        });
    }

    actions
}

/// The single owner most blocking progress: contact missing, off-site
/// owners first.
pub fn blocker(neighbors: &[Neighbor]) -> Option<String> {
    let missing = |n: &&Neighbor| n.contact_status == ContactStatus::Missing;

    neighbors
        .iter()
        .find(|n| missing(n) && !n.is_resident)
        .or_else(|| neighbors.iter().find(missing))
        .map(|n| {
            format!(
                "Missing contact details for {} ({}).",
                n.unit,
                if n.is_resident { "Resident" } else { "Non-resident" }
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::roadmap::roadmap_steps;
    use crate::state::{seed_neighbors, SEED_TOTAL_UNITS};

    fn all_pending(mut neighbors: Vec<Neighbor>) -> Vec<Neighbor> {
        for n in &mut neighbors {
            n.status = PetitionStatus::Pending;
        }
        neighbors
    }

    #[test]
    fn signed_units_counts_signed_status_only() {
        let neighbors = seed_neighbors();
        let stats = compute_stats(&neighbors, SEED_TOTAL_UNITS);
        assert_eq!(stats.signed_units, 2);
        assert!(stats.signed_units <= stats.total_units);
    }

    #[test]
    fn target_is_half_rounded_up() {
        let neighbors = seed_neighbors();
        assert_eq!(compute_stats(&neighbors, 12).target_units, 6);
        assert_eq!(compute_stats(&neighbors, 13).target_units, 7);
        assert_eq!(compute_stats(&neighbors, 1).target_units, 1);
    }

    #[test]
    #[should_panic(expected = "total_units must be positive")]
    fn zero_capacity_building_is_a_caller_bug() {
        compute_stats(&seed_neighbors(), 0);
    }

    #[test]
    fn fresh_campaign_reads_zero_and_fifty_percent() {
        let neighbors = all_pending(seed_neighbors());
        let stats = compute_stats(&neighbors, SEED_TOTAL_UNITS);
        assert_eq!(stats.total_units, 12);
        assert_eq!(stats.signed_units, 0);
        assert_eq!(stats.target_units, 6);
        assert_eq!(signed_percent(&stats), 0);
        assert_eq!(target_percent(&stats), 50);
    }

    #[test]
    fn two_signatures_round_to_seventeen_percent() {
        let mut neighbors = all_pending(seed_neighbors());
        for n in &mut neighbors {
            if n.id == "1" || n.id == "2" {
                n.status = PetitionStatus::Signed;
            }
        }
        let stats = compute_stats(&neighbors, SEED_TOTAL_UNITS);
        assert_eq!(stats.signed_units, 2);
        assert_eq!(signed_percent(&stats), 17);
    }

    #[test]
    fn ownership_mix_splits_residents_from_investors() {
        let mix = ownership_mix(&seed_neighbors());
        assert_eq!(mix.residents, 4);
        assert_eq!(mix.off_site, 2);
    }

    #[test]
    fn priority_panel_surfaces_contact_hunt_while_owners_are_unreachable() {
        let steps = roadmap_steps();
        let actions = priority_actions(&seed_neighbors(), &steps);

        assert!(actions[0].in_progress);
        assert_eq!(actions[0].title, "Build the Team");
        assert!(actions
            .iter()
            .any(|a| a.title == "Find Missing Contacts" && a.detail.contains("2 owners")));
    }

    #[test]
    fn contact_hunt_disappears_once_everyone_is_reachable() {
        let mut neighbors = seed_neighbors();
        for n in &mut neighbors {
            n.contact_status = ContactStatus::Available;
        }
        let actions = priority_actions(&neighbors, &roadmap_steps());
        assert!(actions.iter().all(|a| a.title != "Find Missing Contacts"));
    }

    #[test]
    fn blocker_prefers_off_site_owners() {
        // Flat 4 (resident) is listed before Flat 6 (off-site); the off-site
        // owner is still the one called out.
        let blocker = blocker(&seed_neighbors()).unwrap();
        assert!(blocker.contains("Flat 6"));
        assert!(blocker.contains("Non-resident"));
    }

    #[test]
    fn no_blocker_when_contacts_are_complete() {
        let mut neighbors = seed_neighbors();
        for n in &mut neighbors {
            n.contact_status = ContactStatus::Available;
        }
        assert!(blocker(&neighbors).is_none());
    }
}
