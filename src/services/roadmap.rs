//! Process guide content — the fixed five-step conversion roadmap.

use crate::types::{RiskLevel, RoadmapStep};

fn step(
    id: u32,
    title: &str,
    description: &str,
    is_completed: bool,
    estimated_time: &str,
    risk_level: RiskLevel,
) -> RoadmapStep {
    RoadmapStep {
        id,
        title: title.to_string(),
        description: description.to_string(),
        is_completed,
        estimated_time: estimated_time.to_string(),
        risk_level,
    }
}

/// The fixed, ordered conversion roadmap. Content is static; no interaction
/// mutates it.
pub fn roadmap_steps() -> Vec<RoadmapStep> {
    vec![
        step(
            1,
            "Establish the Facts",
            "Identify the freeholder, managing agent, and collect info on current fees (service charges).",
            true,
            "1 week",
            RiskLevel::Low,
        ),
        step(
            2,
            "Build the Team",
            "Find contact details for all owners, specifically identifying non-resident investors.",
            false,
            "2-3 weeks",
            RiskLevel::Medium,
        ),
        step(
            3,
            "Make the Case",
            "Communicate benefits of Right to Manage/Commonhold to all owners to build consensus.",
            false,
            "1 month",
            RiskLevel::Low,
        ),
        step(
            4,
            "Get Commitment",
            "Secure formal agreement (signatures) from at least 50% of owners.",
            false,
            "2-3 months",
            RiskLevel::High,
        ),
        step(
            5,
            "Legal Process",
            "Serve formal notices to the freeholder and form the RTM/Commonhold company.",
            false,
            "3-6 months",
            RiskLevel::Medium,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_are_ordered_by_sequence_position() {
        let steps = roadmap_steps();
        assert_eq!(steps.len(), 5);
        let ids: Vec<u32> = steps.iter().map(|s| s.id).collect();
        assert_eq!(ids, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn only_the_fact_finding_step_is_complete() {
        let steps = roadmap_steps();
        let completed: Vec<u32> = steps.iter().filter(|s| s.is_completed).map(|s| s.id).collect();
        assert_eq!(completed, [1]);
    }

    #[test]
    fn commitment_step_carries_the_high_risk_label() {
        let steps = roadmap_steps();
        let commitment = steps.iter().find(|s| s.id == 4).unwrap();
        assert_eq!(commitment.risk_level, RiskLevel::High);
        assert_eq!(commitment.estimated_time, "2-3 months");
    }
}
