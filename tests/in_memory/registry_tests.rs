//! In-memory integration tests for registration, discovery, and removal.

use super::helpers::{Registry, agent_url, registry};
use a2a_registry::registry::{
    ports::{AgentStore, FetchError},
    services::RegistryServiceError,
};
use futures::future::join_all;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registered_agents_are_listed_in_registration_order(registry: Registry) {
    registry.serve("http://agents.test:9001", "translator", &["translate"]);
    registry.serve("http://agents.test:9002", "painter", &["paint"]);

    registry
        .service
        .register("http://agents.test:9001/")
        .await
        .expect("translator registers");
    registry
        .service
        .register("http://agents.test:9002")
        .await
        .expect("painter registers");

    let names: Vec<String> = registry
        .service
        .list_agents()
        .iter()
        .map(|record| record.card().name().to_owned())
        .collect();
    assert_eq!(names, ["translator", "painter"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn discovery_finds_agents_by_tag_and_by_text(registry: Registry) {
    registry.serve("http://agents.test:9001", "translator", &["translate", "i18n"]);
    registry.serve("http://agents.test:9002", "painter", &["paint"]);
    for raw in ["http://agents.test:9001", "http://agents.test:9002"] {
        registry.service.register(raw).await.expect("registers");
    }

    let by_tag = registry.service.discover("I18N").expect("valid query");
    assert_eq!(by_tag.len(), 1);
    assert_eq!(by_tag[0].card().name(), "translator");

    let by_text = registry.service.discover("test agent").expect("valid query");
    assert_eq!(by_text.len(), 2);

    let nothing = registry.service.discover("sculpt").expect("valid query");
    assert!(nothing.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_registrations_of_distinct_agents_all_land(registry: Registry) {
    let raws: Vec<String> = (0..16)
        .map(|port| format!("http://agents.test:{}", 9100 + port))
        .collect();
    for (index, raw) in raws.iter().enumerate() {
        registry.serve(raw, &format!("agent-{index}"), &["batch"]);
    }

    let results = join_all(raws.iter().map(|raw| registry.service.register(raw))).await;

    assert!(results.iter().all(Result::is_ok));
    assert_eq!(registry.store.size(), raws.len());
    assert_eq!(
        registry.service.discover("batch").expect("valid query").len(),
        raws.len()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_registrations_of_one_agent_keep_a_single_record(registry: Registry) {
    registry.serve("http://agents.test:9001", "translator", &["translate"]);

    let attempts = (0..8).map(|_| registry.service.register("http://agents.test:9001"));
    let results = join_all(attempts).await;

    assert!(results.iter().all(Result::is_ok));
    assert_eq!(registry.store.size(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unreachable_agent_is_not_registered(registry: Registry) {
    let result = registry.service.register("http://agents.test:9404").await;

    assert!(matches!(
        result,
        Err(RegistryServiceError::Fetch(FetchError::Unreachable { .. }))
    ));
    assert_eq!(registry.store.size(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unregistered_agent_disappears_from_discovery(registry: Registry) {
    registry.serve("http://agents.test:9001", "translator", &["translate"]);
    registry
        .service
        .register("http://agents.test:9001")
        .await
        .expect("registers");

    let removed = registry
        .service
        .unregister("http://agents.test:9001/")
        .expect("agent is known");

    assert_eq!(removed, agent_url("http://agents.test:9001"));
    assert!(
        registry
            .service
            .discover("translate")
            .expect("valid query")
            .is_empty()
    );
    assert!(matches!(
        registry.service.unregister("http://agents.test:9001"),
        Err(RegistryServiceError::NotFound(_))
    ));
}
