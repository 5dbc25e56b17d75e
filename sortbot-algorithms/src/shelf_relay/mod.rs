pub mod cheapest_slot;
pub mod partner_first;
pub mod random_slot;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use sortbot_challenges::shelf_relay::{Challenge, InsertionStrategy, PairAdjacent, RoundOutcome};
use sortbot_utils::load_json_or_path;

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    #[default]
    PairAdjacent,
    RandomSlot,
    PartnerFirst,
    CheapestSlot,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::PairAdjacent,
        StrategyKind::RandomSlot,
        StrategyKind::PartnerFirst,
        StrategyKind::CheapestSlot,
    ];
}

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct SolverConfig {
    pub strategy: StrategyKind,
    /// Only read by the randomised strategies.
    pub seed: u64,
}

impl SolverConfig {
    pub fn from_json_or_path(input: &str) -> Result<Self> {
        load_json_or_path(input)
    }

    pub fn build_strategy(&self) -> Box<dyn InsertionStrategy> {
        match self.strategy {
            StrategyKind::PairAdjacent => Box::new(PairAdjacent),
            StrategyKind::RandomSlot => Box::new(random_slot::RandomSlot::new(self.seed)),
            StrategyKind::PartnerFirst => Box::new(partner_first::PartnerFirst::new(self.seed)),
            StrategyKind::CheapestSlot => Box::new(cheapest_slot::CheapestSlot),
        }
    }
}

pub fn solve_challenge(challenge: &Challenge, config: &SolverConfig) -> Result<RoundOutcome> {
    let mut strategy = config.build_strategy();
    challenge.solve(strategy.as_mut())
}
