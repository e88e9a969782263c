//! Command layer — the functions views call with a borrowed `AppState`.
//!
//! Views read slices of shared state through these functions and request
//! mutations through them; nothing else writes the store. Payloads are
//! camelCase-serializable so a richer front-end can consume them unchanged.

use serde::Serialize;

use crate::services::directory::{
    available_actions, filter_neighbors, DirectoryFilter, NeighborAction,
};
use crate::services::progress::{
    blocker, compute_stats, ownership_mix, priority_actions, signed_percent, target_percent,
    OwnershipMix, PriorityAction,
};
use crate::services::roadmap::roadmap_steps;
use crate::state::AppState;
use crate::types::{
    ActivityEntry, BuildingFacts, BuildingStats, ContactStatus, Neighbor, PetitionStatus,
    RoadmapStep, ViewTab,
};

/// How many activity entries the dashboard shows.
const DASHBOARD_ACTIVITY_LIMIT: usize = 5;

/// Everything the dashboard view renders, in one payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub building_name: String,
    pub stats: BuildingStats,
    pub signed_percent: u32,
    pub target_percent: u32,
    pub ownership_mix: OwnershipMix,
    pub facts: BuildingFacts,
    pub priority_actions: Vec<PriorityAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocker: Option<String>,
    pub recent_activity: Vec<ActivityEntry>,
}

pub fn get_dashboard_data(state: &AppState) -> DashboardData {
    let neighbors = state.neighbors_snapshot();
    let stats = compute_stats(&neighbors, state.total_units);
    let steps = roadmap_steps();

    DashboardData {
        building_name: state.building_name.clone(),
        stats,
        signed_percent: signed_percent(&stats),
        target_percent: target_percent(&stats),
        ownership_mix: ownership_mix(&neighbors),
        facts: state.building_facts.clone(),
        priority_actions: priority_actions(&neighbors, &steps),
        blocker: blocker(&neighbors),
        recent_activity: state.recent_activity(DASHBOARD_ACTIVITY_LIMIT),
    }
}

/// One directory card: the neighbor plus the affordances offered on it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighborCard {
    #[serde(flatten)]
    pub neighbor: Neighbor,
    pub actions: Vec<NeighborAction>,
}

pub fn get_directory(state: &AppState, filter: DirectoryFilter) -> Vec<NeighborCard> {
    filter_neighbors(&state.neighbors_snapshot(), filter)
        .into_iter()
        .map(|neighbor| NeighborCard {
            actions: available_actions(&neighbor),
            neighbor,
        })
        .collect()
}

pub fn get_roadmap() -> Vec<RoadmapStep> {
    roadmap_steps()
}

/// Record an owner's decision on the petition. `id` is the sole identity
/// used for the lookup; unknown ids are an error.
pub fn set_neighbor_status(
    state: &AppState,
    id: &str,
    status: PetitionStatus,
) -> Result<Neighbor, String> {
    let mut snapshot = None;
    state.update_neighbor(id, |n| {
        n.status = status;
        snapshot = Some(n.clone());
    });

    let neighbor = snapshot.ok_or_else(|| format!("No neighbor with id '{}'", id))?;
    log::info!("Neighbor {} ({}) -> {}", neighbor.id, neighbor.unit, status.as_str());

    match status {
        PetitionStatus::Signed => {
            state.record_activity(format!("{} signed the petition", neighbor.unit));
        }
        PetitionStatus::Opposed => {
            state.record_activity(format!("{} opposed the conversion", neighbor.unit));
        }
        PetitionStatus::Pending => {}
    }

    Ok(neighbor)
}

/// Add a unit/owner record discovered during outreach. New records start
/// pending with no known contact route.
pub fn add_neighbor(state: &AppState, unit: &str, name: &str, is_resident: bool) -> Neighbor {
    let name = name.trim();
    let neighbor = Neighbor {
        id: uuid::Uuid::new_v4().to_string(),
        unit: unit.to_string(),
        name: if name.is_empty() {
            "Unknown Owner".to_string()
        } else {
            name.to_string()
        },
        status: PetitionStatus::Pending,
        is_resident,
        role: None,
        contact_status: ContactStatus::Missing,
    };

    state.push_neighbor(neighbor.clone());
    state.record_activity(format!("You added {}", neighbor.unit));

    neighbor
}

/// Mark an owner as reachable once contact details have been collected.
pub fn add_contact_details(state: &AppState, id: &str) -> Result<Neighbor, String> {
    let mut snapshot = None;
    state.update_neighbor(id, |n| {
        n.contact_status = ContactStatus::Available;
        snapshot = Some(n.clone());
    });

    let neighbor = snapshot.ok_or_else(|| format!("No neighbor with id '{}'", id))?;
    state.record_activity(format!("You added {} contact", neighbor.unit));

    Ok(neighbor)
}

pub fn get_active_tab(state: &AppState) -> ViewTab {
    state.active_tab()
}

pub fn set_active_tab(state: &AppState, tab: ViewTab) {
    state.set_active_tab(tab);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Config;

    fn seeded_state() -> AppState {
        AppState::new(Config::default())
    }

    fn all_pending_state() -> AppState {
        let neighbors = crate::state::seed_neighbors()
            .into_iter()
            .map(|mut n| {
                n.status = PetitionStatus::Pending;
                n
            })
            .collect();
        AppState::with_neighbors(Config::default(), neighbors)
    }

    #[test]
    fn fresh_campaign_dashboard_reads_zero_of_twelve() {
        let state = all_pending_state();
        let data = get_dashboard_data(&state);

        assert_eq!(data.stats.total_units, 12);
        assert_eq!(data.stats.signed_units, 0);
        assert_eq!(data.stats.target_units, 6);
        assert_eq!(data.signed_percent, 0);
        assert_eq!(data.target_percent, 50);
        assert_eq!(data.building_name, "Victoria Garden Courts");
        assert_eq!(data.facts.freeholder_name, "Earls Court Freeholds Ltd");
    }

    #[test]
    fn signing_two_units_moves_the_needle_to_seventeen_percent() {
        let state = all_pending_state();
        set_neighbor_status(&state, "1", PetitionStatus::Signed).unwrap();
        set_neighbor_status(&state, "2", PetitionStatus::Signed).unwrap();

        let data = get_dashboard_data(&state);
        assert_eq!(data.stats.signed_units, 2);
        assert_eq!(data.signed_percent, 17);

        // Both signings land on the activity feed, newest first.
        assert_eq!(data.recent_activity.len(), 2);
        assert_eq!(data.recent_activity[0].message, "Flat 2 signed the petition");
    }

    #[test]
    fn directory_missing_contact_view_lists_flats_four_and_six() {
        let state = seeded_state();
        let cards = get_directory(&state, DirectoryFilter::MissingContact);

        let ids: Vec<&str> = cards.iter().map(|c| c.neighbor.id.as_str()).collect();
        assert_eq!(ids, ["4", "6"]);
        assert!(cards
            .iter()
            .all(|c| c.actions == [NeighborAction::AddDetails]));
    }

    #[test]
    fn collecting_contact_details_unlocks_outreach_actions() {
        let state = seeded_state();
        let updated = add_contact_details(&state, "4").unwrap();
        assert_eq!(updated.contact_status, ContactStatus::Available);

        let cards = get_directory(&state, DirectoryFilter::All);
        let flat4 = cards.iter().find(|c| c.neighbor.id == "4").unwrap();
        assert_eq!(
            flat4.actions,
            [NeighborAction::Message, NeighborAction::Remind]
        );
    }

    #[test]
    fn unknown_neighbor_id_is_an_error() {
        let state = seeded_state();
        assert!(set_neighbor_status(&state, "99", PetitionStatus::Signed).is_err());
        assert!(add_contact_details(&state, "99").is_err());
    }

    #[test]
    fn added_neighbor_starts_pending_and_unreachable() {
        let state = seeded_state();
        let added = add_neighbor(&state, "Flat 7", "  ", false);

        assert_eq!(added.status, PetitionStatus::Pending);
        assert_eq!(added.contact_status, ContactStatus::Missing);
        assert_eq!(added.name, "Unknown Owner");
        assert!(!added.id.is_empty());

        let neighbors = state.neighbors_snapshot();
        assert_eq!(neighbors.len(), 7);
        assert_eq!(neighbors.last().unwrap().unit, "Flat 7");
    }

    #[test]
    fn tab_selection_round_trips() {
        let state = seeded_state();
        assert_eq!(get_active_tab(&state), ViewTab::Dashboard);
        set_active_tab(&state, ViewTab::Advisor);
        assert_eq!(get_active_tab(&state), ViewTab::Advisor);
    }
}
