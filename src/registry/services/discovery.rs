//! Skill discovery over a snapshot of registered agents.

use crate::registry::domain::{AgentRecord, SkillQuery};

/// Returns the records in `snapshot` that match `query`, in snapshot order.
///
/// A record matches when, ignoring case, one of its skills carries a tag
/// equal to the query, a skill name or description contains it, or the
/// card's own name or description contains it.
#[must_use]
pub fn match_agents(snapshot: Vec<AgentRecord>, query: &SkillQuery) -> Vec<AgentRecord> {
    snapshot
        .into_iter()
        .filter(|record| record_matches(record, query))
        .collect()
}

/// Returns whether a single record matches `query`.
#[must_use]
pub fn record_matches(record: &AgentRecord, query: &SkillQuery) -> bool {
    let needle = query.as_str();
    let card = record.card();

    let skill_hit = card.skills().iter().any(|skill| {
        skill.has_tag(needle)
            || contains_folded(skill.name(), needle)
            || contains_folded(skill.description(), needle)
    });

    skill_hit || contains_folded(card.name(), needle) || contains_folded(card.description(), needle)
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
