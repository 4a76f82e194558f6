//! Tests for the search and classification heuristics.

mod common;

use pqloop_core::{Bit, BitSequence, NetError, OracleKind, RunState, SeededEntropy};

use common::{controller, quiet_controller};

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn zero_iterations_returns_initial_measurement() {
    let net = quiet_controller(Bit::One);
    net.start(3).await.unwrap();

    let target: BitSequence = "101".parse().unwrap();
    let outcome = net.amplify_towards(&target, 0).await.unwrap();

    assert!(!outcome.success);
    assert_eq!(outcome.iterations, 0);
    assert_eq!(outcome.measurement.to_string(), "000");
    net.stop().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn search_succeeds_after_randomize() {
    let net = quiet_controller(Bit::One);
    net.start(3).await.unwrap();

    let target: BitSequence = "111".parse().unwrap();
    let outcome = net.amplify_towards(&target, 5).await.unwrap();

    assert!(outcome.success);
    assert_eq!(outcome.iterations, 2);
    assert_eq!(outcome.measurement, target);
    net.stop().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn exhausted_search_reports_failure() {
    let net = quiet_controller(Bit::Zero);
    net.start(3).await.unwrap();

    let target: BitSequence = "101".parse().unwrap();
    let outcome = net.amplify_towards(&target, 4).await.unwrap();

    assert!(!outcome.success);
    assert_eq!(outcome.iterations, 4);
    assert_eq!(outcome.measurement.to_string(), "000");
    net.stop().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn target_length_must_match_network() {
    let net = quiet_controller(Bit::Zero);
    net.start(4).await.unwrap();

    let target: BitSequence = "101".parse().unwrap();
    assert!(matches!(
        net.amplify_towards(&target, 3).await,
        Err(NetError::TargetLength {
            expected: 4,
            found: 3
        })
    ));
    net.stop().await.unwrap();
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn all_zero_randomization_classifies_constant() {
    let net = quiet_controller(Bit::Zero);
    let verdict = net.classify(4, OracleKind::Constant).await.unwrap();
    assert_eq!(verdict, OracleKind::Constant);
    assert_eq!(net.run_state().await, RunState::Idle);
}

#[tokio::test(start_paused = true)]
async fn set_bit_classifies_balanced() {
    let net = quiet_controller(Bit::One);
    let verdict = net.classify(4, OracleKind::Balanced).await.unwrap();
    assert_eq!(verdict, OracleKind::Balanced);
    assert_eq!(net.run_state().await, RunState::Idle);
}

#[tokio::test(start_paused = true)]
async fn classify_stops_a_running_network_first() {
    let net = quiet_controller(Bit::Zero);
    net.start(8).await.unwrap();

    net.classify(4, OracleKind::Constant).await.unwrap();
    assert_eq!(net.run_state().await, RunState::Idle);
    assert_eq!(net.len().await, 4);
    assert_eq!(net.active_units().await, 0);
}

#[tokio::test(start_paused = true)]
async fn classify_zero_units_is_invalid_configuration() {
    let net = quiet_controller(Bit::Zero);
    assert!(matches!(
        net.classify(0, OracleKind::Balanced).await,
        Err(NetError::InvalidConfiguration(_))
    ));
    assert_eq!(net.run_state().await, RunState::Idle);
}

#[tokio::test(start_paused = true)]
async fn seeded_classification_is_reproducible() {
    let config = common::slow_config();
    let mut verdicts = Vec::new();
    for _ in 0..2 {
        let net = controller(config.clone(), SeededEntropy::from_seed(2024));
        let mut run = Vec::new();
        for oracle in [OracleKind::Constant, OracleKind::Balanced, OracleKind::Balanced] {
            run.push(net.classify(6, oracle).await.unwrap());
        }
        verdicts.push(run);
    }
    assert_eq!(verdicts[0], verdicts[1]);
}
