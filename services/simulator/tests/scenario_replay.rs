use std::path::Path;

use assert_matches::assert_matches;
use config::{Amount, SimulatorConfig};
use exchange::ExchangeError;
use rust_decimal_macros::dec;
use simulator::{Report, Scenario, Simulation, Step, StepError, StepOutcome};

const SETTINGS: &str = r#"
[clock]
start_timestamp = 1000

[[tokens]]
symbol = "USDC"
name = "USD Coin"
decimals = 6

[tokens.balances]
alice = "10_000_000_000"
bob = "1_000_000_000"

[[tokens]]
symbol = "WETH"
name = "Wrapped Ether"

[tokens.balances]
alice = "100_000_000_000_000_000_000"
bob = "1_000_000_000_000_000_000"
"#;

const SEED: &str = r#"
name = "seed"

[[steps]]
action = "approve"
account = "alice"
token = "WETH"

[[steps]]
action = "approve"
account = "alice"
token = "USDC"

[[steps]]
action = "add_liquidity"
account = "alice"
token_a = "WETH"
token_b = "USDC"
amount_a = "10_000_000_000_000_000_000"
amount_b = "20_000_000_000"

[[steps]]
action = "price"
token_a = "WETH"
token_b = "USDC"
"#;

fn simulation() -> Simulation {
    let settings: SimulatorConfig = toml::from_str(SETTINGS).unwrap();
    Simulation::from_config(&settings).unwrap()
}

#[test]
fn sample_scenario_parses() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios/basic.toml");
    let scenario = Scenario::from_file(&path).unwrap();

    assert_eq!(scenario.name.as_deref(), Some("seed, trade and withdraw"));
    assert_matches!(scenario.steps[0], Step::Approve { amount: None, .. });
    assert!(scenario
        .steps
        .iter()
        .any(|step| matches!(step, Step::RemoveLiquidity { liquidity: None, .. })));
}

#[test]
fn sample_configuration_loads() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/simulator.toml");
    let settings = SimulatorConfig::load(&path, Some("ci")).unwrap();

    assert_eq!(settings.tokens.len(), 3);
    assert!(settings.logging.json);
    assert_eq!(settings.token("DAI").unwrap().decimals, 18);
}

#[test]
fn seeding_reports_decimal_adjusted_price() {
    let mut sim = simulation();
    let scenario = Scenario::parse(SEED).unwrap();

    let records = sim.run(&scenario, true);
    assert_eq!(records.len(), 4);
    assert!(records.iter().all(|r| r.is_ok()));

    assert_matches!(
        &records[3].outcome,
        Some(StepOutcome::Price { display: Some(price), .. }) if *price == dec!(2000)
    );

    let report = Report::build(&sim, &scenario, records);
    assert_eq!(report.failed_steps, 0);
    assert_eq!(report.pairs.len(), 1);
    let pair = &report.pairs[0];
    assert_eq!((pair.token_a.as_str(), pair.token_b.as_str()), ("WETH", "USDC"));
    assert_eq!(pair.price, Some(dec!(2000)));
    assert_eq!(pair.reserve_b, Amount::from(20_000_000_000u64));

    let json: serde_json::Value = serde_json::from_str(&report.to_json(false).unwrap()).unwrap();
    assert_eq!(json["pairs"][0]["price"], "2000");
    assert_eq!(json["pairs"][0]["reserve_b"], "20000000000");
    assert_eq!(json["steps"][2]["outcome"]["outcome"], "liquidity_added");
    assert_eq!(json["scenario"], "seed");
}

#[test]
fn failures_are_recorded_and_replay_continues() {
    let mut sim = simulation();
    sim.run(&Scenario::parse(SEED).unwrap(), true);

    let trades = Scenario::parse(
        r#"
[[steps]]
action = "swap"
account = "bob"
path = ["USDC", "WETH"]
amount_in = "1000"

[[steps]]
action = "approve"
account = "bob"
token = "WETH"

[[steps]]
action = "swap"
account = "bob"
path = ["WETH", "USDC"]
amount_in = "1_000_000_000_000_000_000"
"#,
    )
    .unwrap();

    let records = sim.run(&trades, false);
    assert_eq!(records.len(), 3);
    assert!(records[0].error.as_deref().unwrap().contains("Pair not found"));
    assert!(records[1].is_ok());
    assert_matches!(
        &records[2].outcome,
        Some(StepOutcome::Swapped { amount_out, .. }) if !amount_out.value().is_zero()
    );
}

#[test]
fn fail_fast_stops_at_first_failure() {
    let mut sim = simulation();
    let scenario = Scenario::parse(
        r#"
[[steps]]
action = "price"
token_a = "WETH"
token_b = "USDC"

[[steps]]
action = "advance_time"
seconds = 10
"#,
    )
    .unwrap();

    let records = sim.run(&scenario, true);
    assert_eq!(records.len(), 1);
    assert!(!records[0].is_ok());
    assert_eq!(sim.ledger().timestamp(), 1000);

    let records = sim.run(&scenario, false);
    assert_eq!(records.len(), 2);
    assert_eq!(sim.ledger().timestamp(), 1010);
}

#[test]
fn step_errors_are_typed() {
    let mut sim = simulation();

    let unknown = Step::Price {
        token_a: "WETH".to_string(),
        token_b: "DOGE".to_string(),
    };
    assert_matches!(sim.execute(&unknown), Err(StepError::UnknownToken(symbol)) if symbol == "DOGE");

    let empty = Step::Price {
        token_a: "WETH".to_string(),
        token_b: "USDC".to_string(),
    };
    assert_matches!(
        sim.execute(&empty),
        Err(StepError::Exchange(ExchangeError::InsufficientReserves))
    );

    let quote = Step::Quote {
        amount_in: Amount::from(1_000u64),
        reserve_in: Amount::from(1_000_000u64),
        reserve_out: Amount::from(1_000_000u64),
    };
    assert_eq!(
        sim.execute(&quote).unwrap(),
        StepOutcome::Quote {
            amount_out: Amount::from(996u64)
        }
    );
}
