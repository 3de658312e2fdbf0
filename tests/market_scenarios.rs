//! End-to-end behaviour of the market through its public API.

use coin_market_sim::{
    Agent, AgentHandle, AgentType, EntryRange, Market, MarketPhase, Order, Population, RunSummary,
    SimConfig, SimError, match_orders,
};

fn config(pool_size: usize) -> SimConfig {
    SimConfig {
        pool_size,
        ..SimConfig::default()
    }
}

fn handle(id: u64, kind: AgentType) -> AgentHandle {
    AgentHandle { id, kind, index: 0 }
}

#[test]
fn single_cross_trades_at_the_bid_and_drops_the_rest() {
    // Arrange: price 10, buy (12, 5) against sell (8, 3).
    let bids = vec![Order::new(12.0, 5, handle(1, AgentType::Altruist))];
    let asks = vec![Order::new(8.0, 3, handle(2, AgentType::Miner))];

    // Act
    let outcome = match_orders(bids, asks, 10.0);

    // Assert
    assert_eq!(outcome.trades.len(), 1);
    assert_eq!(outcome.trades[0].quantity, 3);
    assert_eq!(outcome.trades[0].price, 12.0, "Trades clear at the buyer's limit.");
    assert_eq!(outcome.price, 12.0);
    assert_eq!(outcome.residual_bids.len(), 1);
    assert_eq!(outcome.residual_bids[0].quantity, 2);
}

#[test]
fn market_without_miners_keeps_running() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut config = config(300);
    config.miner_entry = EntryRange { min: 0, max: 0 };

    let summary = Market::new(config, 31).run(40).unwrap();

    assert_eq!(summary.total_coins_issued, 0.0, "No miners, no issuance.");
    assert_eq!(summary.price_history.len(), 40, "History advances every step.");
    assert!(summary.hash_power.is_empty());
    assert_eq!(summary.wealth.miners, 0.0);
    assert!(summary.population_history.iter().all(|c| c.miners == 0));
}

#[test]
fn exhausted_pools_stay_exhausted() {
    let mut market = Market::new(config(5), 37);
    market.run(100).unwrap();

    // speculator entry depends on price streaks, so only the steady entrants are checked
    for kind in [AgentType::Altruist, AgentType::Miner] {
        assert_eq!(market.population().pool_remaining(kind), 0, "{kind} pool should be drained");
    }
    let retired_altruists = market
        .population()
        .retired()
        .iter()
        .filter(|a| a.agent_type() == AgentType::Altruist)
        .count();
    assert_eq!(
        market.altruists().len() + retired_altruists,
        5,
        "Nobody beyond the pool may ever enter."
    );
}

#[test]
fn loss_tolerance_threshold_is_exclusive() {
    let config = SimConfig::default();
    let mut params = config.altruist;
    params.loss_tolerance = 0.4;

    // ratio 0.5 < 0.6 -> out, ratio 0.65 -> stays
    let mut losing = Agent::altruist(0, 1_000.0, params);
    losing.capital_to_coins(50, 10.0).unwrap();
    let mut holding = Agent::altruist(1, 1_000.0, params);
    holding.capital_to_coins(35, 10.0).unwrap();
    assert!(losing.has_exited());
    assert!(!holding.has_exited());

    let entry = SimConfig {
        altruist_entry: EntryRange { min: 2, max: 2 },
        miner_entry: EntryRange { min: 0, max: 0 },
        momentum_enabled: false,
        fixed_momentum: 0,
        ..config
    };
    let population = Population::from_pools(&entry, vec![holding, losing], vec![], vec![]);
    let mut market = Market::with_population(entry, 3, population).unwrap();
    let report = market.step_once().unwrap();

    assert_eq!(report.admission.altruists, 2);
    assert!(market.altruists().iter().all(|a| a.id() != 0), "Agent 0 must have been pruned.");
    assert!(market.population().retired().iter().any(|a| a.id() == 0));
}

#[test]
fn coins_are_conserved_across_a_long_run() {
    for upgrades in [false, true] {
        let mut config = config(500);
        config.equipment_upgrades = upgrades;
        let mut market = Market::new(config, 41);
        market.run(200).unwrap();

        let held = market.population().coins_in_circulation();
        assert!(
            (held - market.coins_issued()).abs() < 1e-6,
            "upgrades={upgrades}: held {held} but issued {}",
            market.coins_issued()
        );
    }
}

#[test]
fn outputs_are_well_formed() {
    let mut market = Market::new(config(500), 43);
    let summary = market.run(120).unwrap();

    assert!(summary.price_history.iter().all(|p| p.is_finite() && *p > 0.0));
    assert!(summary.hash_power.windows(2).all(|w| w[0] >= w[1]), "Hash power is sorted descending.");
    if !summary.hash_power.is_empty() {
        let total: f64 = summary.hash_power.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }
    assert!(summary.wealth.altruists >= 0.0 && summary.wealth.speculators >= 0.0);
    assert!(summary.total_coins_issued > 0.0, "Miners enter over the run and collect rewards.");

    let stats = summary.price_stats().expect("non-empty history");
    assert_eq!(stats.last, *summary.price_history.last().unwrap());
    assert!(stats.min <= stats.mean && stats.mean <= stats.max);
}

#[test]
fn summary_survives_a_json_round_trip() {
    let mut market = Market::new(config(200), 47);
    let summary = market.run(30).unwrap();

    let json = summary.to_json().unwrap();
    let restored: RunSummary = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.price_history, summary.price_history);
    assert_eq!(restored.population_history, summary.population_history);
}

#[test]
fn config_from_json_fills_defaults_and_validates() {
    let config = SimConfig::from_json(r#"{ "pool_size": 12, "momentum_enabled": false }"#).unwrap();
    assert_eq!(config.pool_size, 12);
    assert!(!config.momentum_enabled);
    assert_eq!(config.starting_price, SimConfig::default().starting_price);

    let bad = SimConfig::from_json(r#"{ "miner_entry": { "min": 5, "max": 1 } }"#);
    assert!(matches!(bad, Err(SimError::InvalidConfig(_))));

    let garbled = SimConfig::from_json("{ not json");
    assert!(matches!(garbled, Err(SimError::Serialization(_))));
}

#[test]
fn completed_market_refuses_more_work() {
    let mut market = Market::new(config(100), 53);
    market.run(5).unwrap();

    assert_eq!(market.phase(), MarketPhase::Completed);
    assert!(matches!(market.step_once(), Err(SimError::AlreadyCompleted)));
    assert!(matches!(market.run(5), Err(SimError::AlreadyCompleted)));
    assert_eq!(market.step_count(), 5);
}
