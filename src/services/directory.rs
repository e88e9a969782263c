//! Directory service — neighbor filtering and per-card affordances.

use serde::{Deserialize, Serialize};

use crate::types::{ContactStatus, Neighbor, PetitionStatus};

/// The four named directory filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectoryFilter {
    All,
    Signed,
    NonResident,
    MissingContact,
}

impl DirectoryFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Signed => "signed",
            Self::NonResident => "non_resident",
            Self::MissingContact => "missing_contact",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Self::All),
            "signed" => Some(Self::Signed),
            "non_resident" => Some(Self::NonResident),
            "missing_contact" => Some(Self::MissingContact),
            _ => None,
        }
    }
}

/// Filter a neighbor list by one of the four named predicates.
///
/// Single pass, stable: matching records keep their input order and the
/// input is left untouched.
pub fn filter_neighbors(neighbors: &[Neighbor], filter: DirectoryFilter) -> Vec<Neighbor> {
    neighbors
        .iter()
        .filter(|n| matches_filter(n, filter))
        .cloned()
        .collect()
}

fn matches_filter(neighbor: &Neighbor, filter: DirectoryFilter) -> bool {
    match filter {
        DirectoryFilter::All => true,
        DirectoryFilter::Signed => neighbor.status == PetitionStatus::Signed,
        DirectoryFilter::NonResident => !neighbor.is_resident,
        DirectoryFilter::MissingContact => neighbor.contact_status == ContactStatus::Missing,
    }
}

/// UI affordances available on one neighbor card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeighborAction {
    Message,
    Remind,
    AddDetails,
}

/// Actions offered for a neighbor.
///
/// An owner without contact details cannot receive messages or reminders;
/// the only offer is to collect their details. Reminders are reserved for
/// reachable owners still sitting on the petition.
pub fn available_actions(neighbor: &Neighbor) -> Vec<NeighborAction> {
    if neighbor.contact_status == ContactStatus::Missing {
        return vec![NeighborAction::AddDetails];
    }

    let mut actions = vec![NeighborAction::Message];
    if neighbor.status == PetitionStatus::Pending {
        actions.push(NeighborAction::Remind);
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::seed_neighbors;
    use crate::types::Role;

    fn neighbor(id: &str, status: PetitionStatus, is_resident: bool, contact: ContactStatus) -> Neighbor {
        Neighbor {
            id: id.to_string(),
            unit: format!("Flat {}", id),
            name: "Owner".to_string(),
            status,
            is_resident,
            role: None,
            contact_status: contact,
        }
    }

    #[test]
    fn all_filter_returns_everything_in_order() {
        let neighbors = seed_neighbors();
        let filtered = filter_neighbors(&neighbors, DirectoryFilter::All);
        let ids: Vec<&str> = filtered.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn signed_filter_matches_status_only() {
        let neighbors = seed_neighbors();
        let filtered = filter_neighbors(&neighbors, DirectoryFilter::Signed);
        assert!(filtered.iter().all(|n| n.status == PetitionStatus::Signed));
        let ids: Vec<&str> = filtered.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
    }

    #[test]
    fn missing_contact_filter_returns_flats_four_and_six() {
        let neighbors = seed_neighbors();
        let filtered = filter_neighbors(&neighbors, DirectoryFilter::MissingContact);
        let ids: Vec<&str> = filtered.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["4", "6"]);
    }

    #[test]
    fn non_resident_filter_is_independent_of_status() {
        let neighbors = vec![
            neighbor("1", PetitionStatus::Signed, false, ContactStatus::Available),
            neighbor("2", PetitionStatus::Opposed, false, ContactStatus::Missing),
            neighbor("3", PetitionStatus::Pending, true, ContactStatus::Available),
        ];
        let filtered = filter_neighbors(&neighbors, DirectoryFilter::NonResident);
        let ids: Vec<&str> = filtered.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let neighbors = seed_neighbors();
        for filter in [
            DirectoryFilter::All,
            DirectoryFilter::Signed,
            DirectoryFilter::NonResident,
            DirectoryFilter::MissingContact,
        ] {
            let once = filter_neighbors(&neighbors, filter);
            let twice = filter_neighbors(&once, filter);
            let once_ids: Vec<&str> = once.iter().map(|n| n.id.as_str()).collect();
            let twice_ids: Vec<&str> = twice.iter().map(|n| n.id.as_str()).collect();
            assert_eq!(once_ids, twice_ids, "{} filter not idempotent", filter.as_str());
        }
    }

    #[test]
    fn filtering_does_not_mutate_input() {
        let neighbors = seed_neighbors();
        let before: Vec<String> = neighbors.iter().map(|n| n.id.clone()).collect();
        let _ = filter_neighbors(&neighbors, DirectoryFilter::Signed);
        let after: Vec<String> = neighbors.iter().map(|n| n.id.clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn missing_contact_owner_only_gets_add_details() {
        let n = neighbor("4", PetitionStatus::Pending, true, ContactStatus::Missing);
        assert_eq!(available_actions(&n), [NeighborAction::AddDetails]);
    }

    #[test]
    fn pending_reachable_owner_gets_message_and_remind() {
        let n = neighbor("5", PetitionStatus::Pending, true, ContactStatus::Available);
        assert_eq!(
            available_actions(&n),
            [NeighborAction::Message, NeighborAction::Remind]
        );
    }

    #[test]
    fn signed_owner_is_not_reminded() {
        let mut n = neighbor("1", PetitionStatus::Signed, true, ContactStatus::Available);
        n.role = Some(Role::Admin);
        assert_eq!(available_actions(&n), [NeighborAction::Message]);
    }

    #[test]
    fn filter_parses_the_wire_ids() {
        assert_eq!(DirectoryFilter::parse("all"), Some(DirectoryFilter::All));
        assert_eq!(
            DirectoryFilter::parse("missing_contact"),
            Some(DirectoryFilter::MissingContact)
        );
        assert_eq!(DirectoryFilter::parse("unknown"), None);
    }
}
