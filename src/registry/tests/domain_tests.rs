//! Unit tests for registry domain types.

use super::ManualClock;
use crate::registry::domain::{
    AgentCard, AgentRecord, AgentUrl, RegistryDomainError, Skill, SkillQuery,
};
use mockable::Clock;
use rstest::rstest;
use serde_json::json;
use std::time::Duration;

// ── AgentUrl ───────────────────────────────────────────────────────

#[rstest]
#[case("https://example.com", "https://example.com")]
#[case("https://example.com/", "https://example.com")]
#[case("https://example.com///", "https://example.com")]
#[case("  http://localhost:8000/  ", "http://localhost:8000")]
#[case("https://Example.COM/agents/", "https://example.com/agents")]
fn agent_urls_are_normalized(#[case] input: &str, #[case] expected: &str) {
    let url = AgentUrl::new(input).expect("valid url");
    assert_eq!(url.as_str(), expected);
}

#[rstest]
fn card_url_points_at_well_known_document() {
    let url = AgentUrl::new("https://example.com/").expect("valid url");
    assert_eq!(
        url.card_url(),
        "https://example.com/.well-known/agent-card.json"
    );
}

#[rstest]
#[case("")]
#[case("   ")]
fn blank_urls_are_rejected(#[case] input: &str) {
    assert_eq!(AgentUrl::new(input), Err(RegistryDomainError::EmptyUrl));
}

#[rstest]
#[case("not-a-valid-url")]
#[case("/relative/path")]
fn relative_urls_are_rejected(#[case] input: &str) {
    assert!(matches!(
        AgentUrl::new(input),
        Err(RegistryDomainError::InvalidUrl { .. })
    ));
}

#[rstest]
#[case("ftp://example.com")]
#[case("mailto:agent@example.com")]
fn non_http_schemes_are_rejected(#[case] input: &str) {
    assert!(matches!(
        AgentUrl::new(input),
        Err(RegistryDomainError::UnsupportedScheme(_))
    ));
}

#[rstest]
fn agent_urls_deserialize_through_validation() {
    let parsed: AgentUrl =
        serde_json::from_value(json!("https://Example.com/")).expect("valid url");
    assert_eq!(parsed.as_str(), "https://example.com");
    assert_eq!(
        serde_json::to_value(&parsed).expect("serializable url"),
        json!("https://example.com")
    );

    assert!(serde_json::from_value::<AgentUrl>(json!("ftp://example.com")).is_err());
    assert!(serde_json::from_value::<AgentUrl>(json!("   ")).is_err());
}

// ── AgentCard ──────────────────────────────────────────────────────

#[rstest]
fn card_parses_with_defaults() {
    let card = AgentCard::from_json(json!({"name": "Minimal"})).expect("valid card");

    assert_eq!(card.name(), "Minimal");
    assert_eq!(card.description(), "");
    assert!(card.skills().is_empty());
}

#[rstest]
fn card_keeps_unknown_fields_for_clients() {
    let document = json!({
        "name": "Test Agent",
        "version": "1.2.0",
        "skills": [{"id": "tr", "name": "translation", "tags": ["translate"]}],
    });

    let card = AgentCard::from_json(document).expect("valid card");
    let echoed = serde_json::to_value(&card).expect("serializable card");

    assert_eq!(card.extra("version"), Some(&json!("1.2.0")));
    assert_eq!(echoed["skills"][0]["id"], json!("tr"));
    assert_eq!(echoed["skills"][0]["description"], json!(""));
}

#[rstest]
#[case(json!({"invalid": "card"}))]
#[case(json!({"name": 42}))]
#[case(json!({"name": "x", "skills": [{"tags": []}]}))]
#[case(json!(["not", "an", "object"]))]
fn malformed_cards_are_rejected(#[case] document: serde_json::Value) {
    assert!(matches!(
        AgentCard::from_json(document),
        Err(RegistryDomainError::InvalidCard(_))
    ));
}

#[rstest]
fn blank_card_name_is_rejected() {
    assert_eq!(
        AgentCard::from_json(json!({"name": "  "})),
        Err(RegistryDomainError::EmptyCardName)
    );
}

#[rstest]
fn skill_tags_match_ignoring_case() {
    let skill = Skill::new("translation").with_tags(["Translation", "I18N"]);

    assert_eq!(skill.tags(), ["Translation", "I18N"]);
    assert!(skill.has_tag("translation"));
    assert!(skill.has_tag("i18n"));
    assert!(!skill.has_tag("trans"));
}

// ── SkillQuery ─────────────────────────────────────────────────────

#[rstest]
fn query_is_trimmed_and_folded() {
    let query = SkillQuery::new("  TRANSLATE ").expect("valid query");
    assert_eq!(query.as_str(), "translate");
}

#[rstest]
#[case("")]
#[case("\t  ")]
fn blank_query_is_rejected(#[case] input: &str) {
    assert_eq!(SkillQuery::new(input), Err(RegistryDomainError::EmptyQuery));
}

// ── AgentRecord ────────────────────────────────────────────────────

fn test_record(clock: &ManualClock) -> AgentRecord {
    AgentRecord::new(
        AgentUrl::new("https://example.com").expect("valid url"),
        AgentCard::new("Test Agent").expect("valid card"),
        clock,
    )
}

#[rstest]
fn new_record_is_seen_at_registration() {
    let clock = ManualClock::new();
    let record = test_record(&clock);

    assert_eq!(record.registered_at(), record.last_seen());
    assert_eq!(record.failure_count(), 0);
}

#[rstest]
fn failures_accumulate_until_seen_again() {
    let clock = ManualClock::new();
    let mut record = test_record(&clock);

    assert_eq!(record.mark_unreachable(), 1);
    assert_eq!(record.mark_unreachable(), 2);

    clock.advance(Duration::from_secs(30));
    let card = record.card().clone();
    record.mark_alive(card, clock.utc());

    assert_eq!(record.failure_count(), 0);
    assert!(record.last_seen() > record.registered_at());
}
