use crate::shelf_relay::{Challenge, Shelf, Solution};
use anyhow::Result;
use logging_timer::time;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustiveMode {
    #[default]
    AllOrderings,
    /// Only orderings that pick the special shelf at this pickup position.
    FixedSpecialPickupIndex(usize),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExhaustiveResult {
    pub solution: Solution,
    pub total_cost: f64,
    /// Number of valid orderings that were priced.
    pub evaluated: usize,
}

/// Prices every pickup ordering whose delivery does not start with the
/// special shelf and keeps the cheapest. Ties go to the ordering seen first.
#[time]
pub fn solve_challenge(challenge: &Challenge, mode: ExhaustiveMode) -> Result<Option<ExhaustiveResult>> {
    let container = challenge.layout.container();
    let mut best: Option<ExhaustiveResult> = None;
    let mut evaluated = 0;

    let mut visit = |order: &[Shelf]| -> Result<()> {
        if let (ExhaustiveMode::FixedSpecialPickupIndex(index), Some(special)) =
            (mode, challenge.special_shelf)
        {
            if order.get(index) != Some(&special) {
                return Ok(());
            }
        }
        let delivery = container.delivery_order(order);
        if challenge.special_shelf.is_some() && delivery.first() == challenge.special_shelf.as_ref() {
            return Ok(());
        }
        let solution = Solution {
            pickup_order: order.to_vec(),
        };
        let total_cost = challenge.evaluate_total_cost(&solution)?;
        evaluated += 1;
        if best.as_ref().map_or(true, |b| total_cost < b.total_cost) {
            best = Some(ExhaustiveResult {
                solution,
                total_cost,
                evaluated: 0,
            });
        }
        Ok(())
    };

    // Heap's algorithm
    let mut order = Shelf::ALL.to_vec();
    let n = order.len();
    let mut c = vec![0usize; n];
    visit(&order)?;
    let mut i = 1;
    while i < n {
        if c[i] < i {
            if i % 2 == 0 {
                order.swap(0, i);
            } else {
                order.swap(c[i], i);
            }
            visit(&order)?;
            c[i] += 1;
            i = 1;
        } else {
            c[i] = 0;
            i += 1;
        }
    }

    Ok(best.map(|mut b| {
        b.evaluated = evaluated;
        b
    }))
}
