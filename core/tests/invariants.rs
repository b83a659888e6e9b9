//! Properties that must hold at every event of a seeded run.

use mm1_core::{engine::ServerStatus, event::EventType, SimConfig, SimEngine};

#[test]
fn state_invariants_hold_after_every_event() {
    let _ = env_logger::builder().is_test(true).try_init();

    let config = SimConfig::new(1.0, 0.95, 2000).with_seed(0xC0FFEE).with_trace(true);
    let mut engine = SimEngine::new(config).unwrap();

    let mut last = *engine.accumulators();
    let mut last_time = engine.clock().now;

    while engine.step().unwrap().is_some() {
        let busy = engine.server() == ServerStatus::Busy;
        assert_eq!(
            busy,
            engine.calendar().is_pending(EventType::Departure),
            "server busy must match a pending departure at time {}",
            engine.clock().now
        );
        assert!(engine.calendar().is_pending(EventType::Arrival));

        let acc = *engine.accumulators();
        assert!(acc.customers_delayed >= last.customers_delayed);
        assert!(acc.total_delay >= last.total_delay);
        assert!(acc.area_queue_len >= last.area_queue_len);
        assert!(acc.area_server_busy >= last.area_server_busy);
        assert!(engine.clock().now >= last_time);

        last = acc;
        last_time = engine.clock().now;
    }

    assert_eq!(engine.customers_delayed(), 2000);

    // Every arrival either started service or is still waiting, never both.
    let arrivals = engine
        .trace()
        .iter()
        .filter(|t| t.event == EventType::Arrival)
        .count() as u64;
    assert_eq!(arrivals, engine.customers_delayed() + engine.queue_len() as u64);
}

#[test]
fn utilization_vanishes_when_arrivals_are_rare() {
    let config = SimConfig::new(1000.0, 1.0, 200).with_seed(11);
    let report = SimEngine::new(config).unwrap().run().unwrap();

    assert!(
        report.server_utilization < 0.05,
        "utilization {:.4} should be near zero",
        report.server_utilization
    );
    assert!(report.average_queue_length < 0.05);
}

#[test]
fn utilization_tracks_offered_load() {
    let config = SimConfig::new(1.0, 0.5, 20_000).with_seed(5);
    let report = SimEngine::new(config).unwrap().run().unwrap();

    assert!(
        (report.server_utilization - 0.5).abs() < 0.05,
        "utilization {:.4} far from offered load 0.5",
        report.server_utilization
    );
    assert!(report.server_utilization <= 1.0);
    assert!(report.average_delay >= 0.0);
}
