pub mod baselines;
mod container;
mod cost;
mod ids;
mod layout;
mod planner;
mod steps;
mod zones;

pub use container::*;
pub use cost::*;
pub use ids::*;
pub use layout::*;
pub use planner::*;
pub use steps::*;
pub use zones::*;

use anyhow::{anyhow, Result};
use baselines::exhaustive::{self, ExhaustiveMode, ExhaustiveResult};
use rand::{rngs::SmallRng, seq::SliceRandom, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Solution {
    pub pickup_order: Vec<Shelf>,
}

impl Solution {
    pub fn new() -> Self {
        Self {
            pickup_order: Vec::new(),
        }
    }
}

/// One round: the two draws and the task assignment they imply.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Challenge {
    /// `None` when the round was drawn from a caller-supplied rng.
    pub seed: Option<[u8; 32]>,
    pub layout: Layout,
    pub shelf_boxes: Vec<(Shelf, BoxId)>,
    pub stack_zones: Vec<(StackId, Zone)>,
    pub empty_zone: Zone,
    pub task_map: BTreeMap<Shelf, Zone>,
    pub special_shelf: Option<Shelf>,
}

impl Challenge {
    pub fn generate_instance(seed: &[u8; 32], layout: &Layout) -> Result<Self> {
        let mut rng = SmallRng::from_seed(*seed);
        let mut c = Self::generate_with_rng(&mut rng, layout)?;
        c.seed = Some(*seed);
        Ok(c)
    }

    pub fn generate_with_rng<R: Rng + ?Sized>(rng: &mut R, layout: &Layout) -> Result<Self> {
        let mut boxes = BoxId::ALL.to_vec();
        boxes.shuffle(rng);
        let mut zones = Zone::ALL.to_vec();
        zones.shuffle(rng);
        Self::from_draws(layout, &boxes, &zones)
    }

    /// Builds a round from already shuffled draws. `boxes[i]` sits on shelf
    /// `i + 1`; the last zone of `zones` stays empty and the rest go to stacks
    /// 1..=5 in order, so stack 6 never gets a zone.
    pub fn from_draws(layout: &Layout, boxes: &[BoxId], zones: &[Zone]) -> Result<Self> {
        layout.validate()?;
        if boxes.len() != BoxId::ALL.len() || boxes.iter().collect::<HashSet<_>>().len() != boxes.len() {
            return Err(anyhow!("Box draw {:?} is not a permutation of all boxes", boxes));
        }
        if boxes.iter().any(|b| !BoxId::ALL.contains(b)) {
            return Err(anyhow!("Box draw {:?} contains unknown boxes", boxes));
        }
        if zones.len() != Zone::ALL.len() || zones.iter().collect::<HashSet<_>>().len() != zones.len() {
            return Err(anyhow!("Zone draw {:?} is not a permutation of all zones", zones));
        }

        let shelf_boxes: Vec<(Shelf, BoxId)> =
            Shelf::ALL.iter().copied().zip(boxes.iter().copied()).collect();
        let mut zones = zones.to_vec();
        let empty_zone = zones
            .pop()
            .ok_or_else(|| anyhow!("Zone draw is empty"))?;
        let stack_zones: Vec<(StackId, Zone)> =
            StackId::ALL.iter().copied().zip(zones.into_iter()).collect();

        let mut task_map = BTreeMap::new();
        let mut special_shelf = None;
        for &(shelf, box_id) in &shelf_boxes {
            match stack_zones.iter().find(|(stack, _)| *stack == box_id.stack()) {
                Some(&(_, zone)) => {
                    task_map.insert(shelf, zone);
                }
                None => special_shelf = Some(shelf),
            }
        }

        Ok(Self {
            seed: None,
            layout: layout.clone(),
            shelf_boxes,
            stack_zones,
            empty_zone,
            task_map,
            special_shelf,
        })
    }

    pub fn zone_order(&self) -> Vec<Zone> {
        zone_order(self.empty_zone)
    }

    pub fn route_type(&self) -> u8 {
        route_type(self.empty_zone)
    }

    /// Maps each zone back to the shelf whose box is headed there.
    pub fn shelves_for(&self, zones: &[Zone]) -> Result<Vec<Shelf>> {
        zones
            .iter()
            .map(|&zone| {
                self.task_map
                    .iter()
                    .find(|(_, z)| **z == zone)
                    .map(|(&shelf, _)| shelf)
                    .ok_or_else(|| anyhow!("No shelf is assigned to {}", zone))
            })
            .collect()
    }

    pub fn delivery_order(&self, solution: &Solution) -> Vec<Shelf> {
        self.layout.container().delivery_order(&solution.pickup_order)
    }

    pub fn evaluate_cost(&self, solution: &Solution) -> Result<CostBreakdown> {
        evaluate_cost(
            &self.layout,
            &self.task_map,
            self.special_shelf,
            &solution.pickup_order,
            None,
        )
    }

    pub fn evaluate_with_trace(&self, solution: &Solution) -> Result<(CostBreakdown, Vec<TraceEvent>)> {
        let mut trace = Vec::new();
        let cost = evaluate_cost(
            &self.layout,
            &self.task_map,
            self.special_shelf,
            &solution.pickup_order,
            Some(&mut trace),
        )?;
        Ok((cost, trace))
    }

    pub fn evaluate_total_cost(&self, solution: &Solution) -> Result<f64> {
        Ok(self.evaluate_cost(solution)?.total())
    }

    pub fn verify_solution(&self, solution: &Solution) -> Result<()> {
        check_shelf_permutation(&solution.pickup_order)?;
        let delivery_order = self.delivery_order(solution);
        check_shelf_permutation(&delivery_order)?;
        if let Some(special) = self.special_shelf {
            if delivery_order.first() == Some(&special) {
                return Err(anyhow!(
                    "Special {} cannot be the first shelf delivered",
                    special
                ));
            }
        }
        Ok(())
    }

    /// `<pickup shelf numbers>:<special index in delivery or -1>;<route type>`
    pub fn summary(&self, solution: &Solution) -> Result<String> {
        check_shelf_permutation(&solution.pickup_order)?;
        let pickup = solution
            .pickup_order
            .iter()
            .map(|shelf| shelf.number().to_string())
            .collect::<Vec<_>>()
            .join(",");
        let special_position = match self.special_shelf {
            Some(special) => position_of(&self.delivery_order(solution), special)? as i64,
            None => -1,
        };
        Ok(format!(
            "{}:{};{}",
            pickup,
            special_position,
            self.route_type()
        ))
    }

    pub fn delivery_steps(&self, solution: &Solution) -> Result<Vec<DeliveryStep>> {
        delivery_steps(
            &self.delivery_order(solution),
            &self.task_map,
            self.special_shelf,
        )
    }

    /// Plans the round with `strategy` and prices the result.
    pub fn solve(&self, strategy: &mut dyn InsertionStrategy) -> Result<RoundOutcome> {
        let plan = plan_round(self, strategy)?;
        RoundOutcome::from_plan(self, plan)
    }

    pub fn compute_exhaustive_baseline(&self, mode: ExhaustiveMode) -> Result<ExhaustiveResult> {
        exhaustive::solve_challenge(self, mode)?
            .ok_or_else(|| anyhow!("No valid ordering for mode {:?}", mode))
    }
}

/// Everything a round hands to reporting.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RoundOutcome {
    pub empty_zone: Zone,
    pub special_shelf: Option<Shelf>,
    pub zone_order: Vec<Zone>,
    pub pickup_order: Vec<Shelf>,
    pub delivery_order: Vec<Shelf>,
    pub total_cost: f64,
    pub cost: CostBreakdown,
    pub summary: String,
    pub strategy: String,
    pub repaired: bool,
    pub steps: Vec<DeliveryStep>,
    pub trace: Vec<TraceEvent>,
}

impl RoundOutcome {
    pub fn from_plan(challenge: &Challenge, plan: Plan) -> Result<Self> {
        let solution = Solution {
            pickup_order: plan.pickup_order.clone(),
        };
        challenge.verify_solution(&solution)?;
        let (cost, eval_trace) = challenge.evaluate_with_trace(&solution)?;
        let mut trace = plan.trace;
        trace.extend(eval_trace);
        Ok(Self {
            empty_zone: challenge.empty_zone,
            special_shelf: challenge.special_shelf,
            zone_order: plan.zone_order,
            pickup_order: plan.pickup_order,
            delivery_order: plan.delivery_order,
            total_cost: cost.total(),
            cost,
            summary: challenge.summary(&solution)?,
            strategy: plan.strategy,
            repaired: plan.repaired,
            steps: challenge.delivery_steps(&solution)?,
            trace,
        })
    }

    pub fn solution(&self) -> Solution {
        Solution {
            pickup_order: self.pickup_order.clone(),
        }
    }
}
