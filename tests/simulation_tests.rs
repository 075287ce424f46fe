// tests/simulation_tests.rs

use parity_check::simulation::ReadoutError;
use parity_check::{
    Bit, CellId, FrequencyTable, NetworkBuilder, Operation, ParityCheck, ParityError, ParityLabel,
    SimulationConfig, Simulator, build, classify, simulate,
};

const SHOTS: u64 = 1024;

// Helper: full build -> simulate -> classify chain
fn check(input: &str, trials: u64) -> Result<(FrequencyTable, ParityLabel, Bit), ParityError> {
    let network = build(input)?;
    let table = simulate(&network, trials)?;
    let (label, dominant) = classify(&table)?;
    Ok((table, label, dominant))
}

#[test]
fn test_input_00_is_even() -> Result<(), ParityError> {
    let (table, label, dominant) = check("00", SHOTS)?;
    assert_eq!(table, FrequencyTable::from_counts(SHOTS, 0));
    assert_eq!(label, ParityLabel::Even);
    assert_eq!(dominant, Bit::Zero);
    Ok(())
}

#[test]
fn test_input_11_is_even() -> Result<(), ParityError> {
    let (table, label, _) = check("11", SHOTS)?;
    assert_eq!(table.count(Bit::Zero), SHOTS);
    assert_eq!(table.count(Bit::One), 0);
    assert_eq!(label, ParityLabel::Even);
    Ok(())
}

#[test]
fn test_input_01_is_odd() -> Result<(), ParityError> {
    let (table, label, dominant) = check("01", SHOTS)?;
    assert_eq!(table, FrequencyTable::from_counts(0, SHOTS));
    assert_eq!(label, ParityLabel::Odd);
    assert_eq!(dominant, Bit::One);
    Ok(())
}

#[test]
fn test_input_10_is_odd() -> Result<(), ParityError> {
    let (table, label, _) = check("10", SHOTS)?;
    assert_eq!(table.count(Bit::One), SHOTS);
    assert_eq!(label, ParityLabel::Odd);
    Ok(())
}

#[test]
fn test_short_input_fails() {
    assert!(matches!(build("0"), Err(ParityError::InvalidInput { .. })));
}

#[test]
fn test_zero_trials_fails() -> Result<(), ParityError> {
    let network = build("01")?;
    assert!(matches!(simulate(&network, 0), Err(ParityError::InvalidTrialCount(0))));
    Ok(())
}

#[test]
fn test_single_trial_has_one_key() -> Result<(), ParityError> {
    for input in ["00", "01", "10", "11"] {
        let (table, _, _) = check(input, 1)?;
        assert_eq!(table.len(), 1, "input {input}");
        assert_eq!(table.total(), 1, "input {input}");
    }
    Ok(())
}

#[test]
fn test_repeated_simulation_is_identical() -> Result<(), ParityError> {
    let network = build("11")?;
    assert_eq!(simulate(&network, 500)?, simulate(&network, 500)?);

    let noisy = || {
        Simulator::new()
            .with_model(Box::new(ReadoutError::new(0.25).unwrap()))
            .with_seed(2024)
    };
    assert_eq!(noisy().run(&network, 500)?, noisy().run(&network, 500)?);
    Ok(())
}

#[test]
fn test_hand_built_network_without_readout_is_rejected() {
    let network = NetworkBuilder::new()
        .add_op(Operation::ConditionalInvert { control: CellId(0), target: CellId(2) })
        .add_op(Operation::ConditionalInvert { control: CellId(1), target: CellId(2) })
        .build();
    assert!(matches!(simulate(&network, SHOTS), Err(ParityError::MalformedNetwork(_))));
}

#[test]
fn test_hand_built_valid_network_simulates() -> Result<(), ParityError> {
    // Same shape as build("01"), assembled by hand.
    let network = NetworkBuilder::new()
        .add_ops([
            Operation::Set { cell: CellId(1), value: Bit::One },
            Operation::ConditionalInvert { control: CellId(0), target: CellId(2) },
            Operation::ConditionalInvert { control: CellId(1), target: CellId(2) },
            Operation::Readout { source: CellId(2), slot: 0 },
        ])
        .build();
    assert_eq!(network, build("01")?);
    assert_eq!(simulate(&network, 8)?.count(Bit::One), 8);
    Ok(())
}

#[test]
fn test_full_readout_error_inverts_every_outcome() -> Result<(), ParityError> {
    let simulator = Simulator::new().with_model(Box::new(ReadoutError::new(1.0)?));
    let table = simulator.run(&build("01")?, SHOTS)?;
    assert_eq!(table, FrequencyTable::from_counts(SHOTS, 0));
    Ok(())
}

#[test]
fn test_pipeline_from_json_config() -> Result<(), ParityError> {
    let config = SimulationConfig::from_json_str(r#"{ "trials": 64, "parallel": false }"#)?;
    let check = ParityCheck::new(&config)?;
    for (input, label) in [("00", ParityLabel::Even), ("01", ParityLabel::Odd)] {
        let report = check.run(input)?;
        assert_eq!(report.label, label);
        assert_eq!(report.table.total(), 64);
    }
    Ok(())
}

#[test]
fn test_classify_empty_table_fails() {
    assert!(matches!(classify(&FrequencyTable::new()), Err(ParityError::EmptyResult)));
}
