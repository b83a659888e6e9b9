//! Hand-computable runs driven by stub variate sources.

use mm1_core::{
    engine::ServerStatus,
    event::EventType,
    rng::{ConstantSource, ScriptedSource, VariateSource},
    SimConfig, SimEngine, SimError,
};

/// Every draw returns its mean: a deterministic D/D/1 queue.
struct MeanEcho;

impl VariateSource for MeanEcho {
    fn exponential(&mut self, mean: f64) -> f64 {
        mean
    }
}

#[test]
fn single_customer_with_constant_draws() {
    let c = 2.5;
    let mut engine = SimEngine::with_source(SimConfig::new(1.0, 1.0, 1), ConstantSource(c)).unwrap();

    assert_eq!(engine.calendar().time_of(EventType::Arrival), c);
    assert!(!engine.calendar().is_pending(EventType::Departure));

    let report = engine.run().unwrap();

    assert_eq!(engine.customers_delayed(), 1);
    assert_eq!(report.simulation_end_time, c);
    assert_eq!(report.average_delay, 0.0);
    assert_eq!(report.average_queue_length, 0.0);
    assert_eq!(report.server_utilization, 0.0);
    assert_eq!(engine.server(), ServerStatus::Busy);
}

#[test]
fn deterministic_queue_matches_hand_computation() {
    // Arrivals every 2.0, services of 3.0, three customers.
    let config = SimConfig::new(2.0, 3.0, 3).with_trace(true);
    let mut engine = SimEngine::with_source(config, MeanEcho).unwrap();

    let report = engine.run().unwrap();

    assert_eq!(report.average_delay, 1.0);
    assert_eq!(report.average_queue_length, 0.375);
    assert_eq!(report.server_utilization, 0.75);
    assert_eq!(report.simulation_end_time, 8.0);
    assert_eq!(report.customers_delayed, 3);

    let events: Vec<(EventType, f64)> = engine.trace().iter().map(|t| (t.event, t.time)).collect();
    assert_eq!(
        events,
        vec![
            (EventType::Arrival, 2.0),
            (EventType::Arrival, 4.0),
            (EventType::Departure, 5.0),
            (EventType::Arrival, 6.0),
            // Arrival and departure both due at 8.0: arrival goes first.
            (EventType::Arrival, 8.0),
            (EventType::Departure, 8.0),
        ]
    );
    assert_eq!(engine.trace()[4].queue_len, 2);
}

#[test]
fn zero_required_customers_is_rejected_up_front() {
    let result = SimEngine::with_source(SimConfig::new(1.0, 1.0, 0), ConstantSource(1.0));
    assert!(matches!(
        result,
        Err(SimError::InvalidParameter { name: "num_delays_required", .. })
    ));
}

#[test]
fn nonpositive_means_are_rejected() {
    assert!(matches!(
        SimEngine::new(SimConfig::new(0.0, 1.0, 10)),
        Err(SimError::InvalidParameter { name: "mean_interarrival", .. })
    ));
    assert!(matches!(
        SimEngine::new(SimConfig::new(1.0, -1.0, 10)),
        Err(SimError::InvalidParameter { name: "mean_service", .. })
    ));
}

#[test]
fn overflow_aborts_the_run_without_statistics() {
    // Arrivals at 1, 2, 3, ...; the first service ends at 11.
    // Customers arriving at 2, 3, 4 fill a queue of 3; the one at 5 overflows.
    let config = SimConfig::new(1.0, 10.0, 100).with_queue_limit(3);
    let mut engine = SimEngine::with_source(config, MeanEcho).unwrap();

    let err = engine.run().unwrap_err();
    match err {
        SimError::QueueOverflow { time, capacity } => {
            assert_eq!(time, 5.0);
            assert_eq!(capacity, 3);
        }
        ref other => panic!("expected QueueOverflow, got {other:?}"),
    }
    assert_eq!(err.exit_code(), 2);
    assert!(err.is_fatal_run());

    assert!(engine.is_aborted());
    assert!(matches!(engine.report(), Err(SimError::RunAborted)));
    assert!(matches!(engine.step(), Err(SimError::RunAborted)));
}

#[test]
fn overloaded_server_overflows_with_fixed_seed() {
    let config = SimConfig::new(1.0, 100.0, 50).with_queue_limit(5).with_seed(31337);
    let mut engine = SimEngine::new(config).unwrap();

    assert!(matches!(engine.run(), Err(SimError::QueueOverflow { capacity: 5, .. })));
}

#[test]
fn report_before_completion_is_refused() {
    let engine = SimEngine::new(SimConfig::new(1.0, 0.5, 10).with_seed(1)).unwrap();
    assert!(matches!(
        engine.report(),
        Err(SimError::RunIncomplete { delayed: 0, required: 10 })
    ));
}

#[test]
fn step_after_completion_is_a_no_op() {
    let mut engine = SimEngine::with_source(SimConfig::new(1.0, 1.0, 1), ConstantSource(1.0)).unwrap();
    engine.run().unwrap();
    let now = engine.clock().now;

    assert_eq!(engine.step().unwrap(), None);
    assert_eq!(engine.clock().now, now);
}

#[test]
fn scripted_draws_with_unequal_gaps_and_services() {
    // Draw order: first arrival, then per arrival its successor's gap,
    // then a service time whenever a customer enters service.
    let script = ScriptedSource::new(vec![1.0, 0.5, 4.0, 3.0, 10.0, 2.0, 1.0]).unwrap();
    let mut engine = SimEngine::with_source(SimConfig::new(1.0, 1.0, 3), script).unwrap();

    let report = engine.run().unwrap();

    // Customers arrive at 1.0, 1.5, 4.5 and start service at 1.0, 5.0, 7.0.
    assert_eq!(report.simulation_end_time, 7.0);
    assert_eq!(report.average_delay, 2.0);
    assert_eq!(report.average_queue_length, 6.0 / 7.0);
    assert_eq!(report.server_utilization, 6.0 / 7.0);
    assert_eq!(engine.queue_len(), 0);
}

#[test]
fn unbounded_queue_limit_runs_to_completion() {
    let config = SimConfig::new(1.0, 0.5, 10).with_seed(1).with_queue_limit(usize::MAX);
    assert!(config.validate().is_ok());

    let report = SimEngine::new(config).unwrap().run().unwrap();
    assert_eq!(report.customers_delayed, 10);
}

#[test]
fn run_ending_at_time_zero_is_reported_distinctly() {
    let mut engine = SimEngine::with_source(SimConfig::new(1.0, 1.0, 1), ConstantSource(0.0)).unwrap();

    let err = engine.run().unwrap_err();
    assert!(matches!(err, SimError::ZeroLengthRun { end_time } if end_time == 0.0));
    assert_eq!(err.exit_code(), 1);
}
