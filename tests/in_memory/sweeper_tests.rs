//! In-memory integration tests for liveness probing.

use super::helpers::{MAX_FAILURES, Registry, registry};
use a2a_registry::registry::{ports::AgentStore, services::SweepReport};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn healthy_and_dark_agents_are_tallied_separately(registry: Registry) {
    registry.serve("http://agents.test:9001", "translator", &["translate"]);
    let dark = registry.serve("http://agents.test:9002", "painter", &["paint"]);
    for raw in ["http://agents.test:9001", "http://agents.test:9002"] {
        registry.service.register(raw).await.expect("registers");
    }
    registry.fetcher.fail(&dark, "connection refused");

    let report = registry.sweeper.sweep_once().await;

    assert_eq!(
        report,
        SweepReport {
            probed: 2,
            alive: 1,
            failed: 1,
            evicted: 0,
            skipped: false,
        }
    );
    let record = registry.store.get(&dark).expect("still registered");
    assert_eq!(record.failure_count(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn agent_that_stays_dark_is_deregistered(registry: Registry) {
    let dark = registry.serve("http://agents.test:9002", "painter", &["paint"]);
    registry
        .service
        .register("http://agents.test:9002")
        .await
        .expect("registers");
    registry.fetcher.fail(&dark, "connection refused");

    for _ in 1..MAX_FAILURES {
        registry.sweeper.sweep_once().await;
    }
    assert_eq!(registry.store.size(), 1);
    assert_eq!(registry.service.health().agents, 1);

    let report = registry.sweeper.sweep_once().await;

    assert_eq!(report.evicted, 1);
    assert_eq!(registry.service.health().agents, 0);
    assert!(registry.service.list_agents().is_empty());
    assert!(registry.service.discover("paint").expect("valid query").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn evicted_agent_can_register_again(registry: Registry) {
    let agent = registry.serve("http://agents.test:9002", "painter", &["paint"]);
    registry
        .service
        .register("http://agents.test:9002")
        .await
        .expect("registers");
    registry.fetcher.fail(&agent, "connection refused");
    for _ in 0..MAX_FAILURES {
        registry.sweeper.sweep_once().await;
    }
    assert_eq!(registry.store.size(), 0);

    registry.serve("http://agents.test:9002", "painter", &["paint"]);
    let record = registry
        .service
        .register("http://agents.test:9002")
        .await
        .expect("registers again");

    assert_eq!(record.failure_count(), 0);
    assert_eq!(registry.store.size(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn recovered_agent_sheds_its_failures(registry: Registry) {
    let agent = registry.serve("http://agents.test:9001", "translator", &["translate"]);
    registry
        .service
        .register("http://agents.test:9001")
        .await
        .expect("registers");
    registry.fetcher.fail(&agent, "timed out");
    registry.sweeper.sweep_once().await;
    registry.sweeper.sweep_once().await;

    registry.serve("http://agents.test:9001", "translator", &["translate", "i18n"]);
    let report = registry.sweeper.sweep_once().await;

    assert_eq!(report.alive, 1);
    let record = registry.store.get(&agent).expect("still registered");
    assert_eq!(record.failure_count(), 0);
    assert!(record.card().skills()[0].has_tag("i18n"));
}
