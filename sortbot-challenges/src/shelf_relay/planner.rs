use super::cost::TraceEvent;
use super::ids::{check_shelf_permutation, Shelf, Zone};
use super::zones::zone_order;
use super::Challenge;
use anyhow::{anyhow, Result};
use logging_timer::time;
use serde::{Deserialize, Serialize};

/// Everything a strategy may look at when placing the overflow shelf.
#[derive(Debug, Clone)]
pub struct InsertionContext<'a> {
    pub challenge: &'a Challenge,
    pub zone_order: &'a [Zone],
    /// The five regular shelves, in the order their zones are visited.
    pub delivery_shelves: &'a [Shelf],
    pub special_shelf: Shelf,
}

impl<'a> InsertionContext<'a> {
    /// Number of insertion slots, `0..=delivery_shelves.len()`.
    pub fn num_slots(&self) -> usize {
        self.delivery_shelves.len() + 1
    }

    pub fn delivery_with(&self, slot: usize) -> Result<Vec<Shelf>> {
        if slot >= self.num_slots() {
            return Err(anyhow!(
                "Insertion slot ({}) out of range 0..={}",
                slot,
                self.delivery_shelves.len()
            ));
        }
        let mut delivery = self.delivery_shelves.to_vec();
        delivery.insert(slot, self.special_shelf);
        Ok(delivery)
    }

    pub fn pickup_with(&self, slot: usize) -> Result<Vec<Shelf>> {
        let delivery = self.delivery_with(slot)?;
        Ok(self.challenge.layout.container().pickup_for(&delivery))
    }

    /// A slot is valid when the overflow shelf is not the first one placed.
    pub fn is_valid_slot(&self, slot: usize) -> bool {
        self.delivery_with(slot)
            .map(|delivery| delivery.first() != Some(&self.special_shelf))
            .unwrap_or(false)
    }

    pub fn valid_slots(&self) -> Vec<usize> {
        (0..self.num_slots())
            .filter(|&slot| self.is_valid_slot(slot))
            .collect()
    }

    pub fn partner(&self) -> Option<Shelf> {
        self.challenge
            .layout
            .partner_of(self.special_shelf)
            .filter(|partner| self.delivery_shelves.contains(partner))
    }
}

/// Decides where the overflow shelf goes.
///
/// The returned slot must lie in `0..ctx.num_slots()`; anything else aborts
/// the round. Strategies should only return valid slots, but a slot that puts
/// the overflow shelf first is repaired by the planner rather than rejected.
pub trait InsertionStrategy {
    fn name(&self) -> &str;

    fn choose_slot(&mut self, ctx: &InsertionContext<'_>) -> Result<usize>;
}

/// Picks the overflow shelf in the same stop as its partner, right before it
/// where possible. Falls back to the last valid slot.
#[derive(Debug, Copy, Clone, Default)]
pub struct PairAdjacent;

impl InsertionStrategy for PairAdjacent {
    fn name(&self) -> &str {
        "pair_adjacent"
    }

    fn choose_slot(&mut self, ctx: &InsertionContext<'_>) -> Result<usize> {
        let valid_slots = ctx.valid_slots();
        if let Some(partner) = ctx.partner() {
            let mut picked_after = None;
            for &slot in &valid_slots {
                let pickup = ctx.pickup_with(slot)?;
                let special_pos = position_of(&pickup, ctx.special_shelf)?;
                let partner_pos = position_of(&pickup, partner)?;
                if special_pos + 1 == partner_pos {
                    return Ok(slot);
                }
                if partner_pos + 1 == special_pos && picked_after.is_none() {
                    picked_after = Some(slot);
                }
            }
            if let Some(slot) = picked_after {
                return Ok(slot);
            }
        }
        valid_slots
            .last()
            .copied()
            .ok_or_else(|| anyhow!("No valid slot for {}", ctx.special_shelf))
    }
}

pub fn position_of(order: &[Shelf], shelf: Shelf) -> Result<usize> {
    order
        .iter()
        .position(|&s| s == shelf)
        .ok_or_else(|| anyhow!("{} missing from order", shelf))
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Plan {
    pub strategy: String,
    pub zone_order: Vec<Zone>,
    /// Slot returned by the strategy, before any repair.
    pub slot: usize,
    pub pickup_order: Vec<Shelf>,
    pub delivery_order: Vec<Shelf>,
    pub repaired: bool,
    pub trace: Vec<TraceEvent>,
}

#[time]
pub fn plan_round(challenge: &Challenge, strategy: &mut dyn InsertionStrategy) -> Result<Plan> {
    let special_shelf = challenge
        .special_shelf
        .ok_or_else(|| anyhow!("Round has no special shelf to place"))?;
    let zone_order = zone_order(challenge.empty_zone);
    let delivery_shelves = challenge.shelves_for(&zone_order)?;

    let ctx = InsertionContext {
        challenge,
        zone_order: &zone_order,
        delivery_shelves: &delivery_shelves,
        special_shelf,
    };
    let slot = strategy.choose_slot(&ctx)?;
    let mut delivery_order = ctx.delivery_with(slot)?;
    log::debug!(
        "{}: {} inserted at slot {} of {:?}",
        strategy.name(),
        special_shelf,
        slot,
        delivery_shelves
    );

    let mut trace = Vec::new();
    let mut repaired = false;
    if delivery_order[0] == special_shelf {
        delivery_order.swap(0, 1);
        log::warn!(
            "{} placed {} first; swapped with {}",
            strategy.name(),
            special_shelf,
            delivery_order[0]
        );
        trace.push(TraceEvent::Repaired {
            strategy: strategy.name().to_string(),
            swapped: (special_shelf, delivery_order[0]),
        });
        repaired = true;
    }

    let container = challenge.layout.container();
    let pickup_order = container.pickup_for(&delivery_order);
    check_shelf_permutation(&pickup_order)?;
    if container.delivery_order(&pickup_order) != delivery_order {
        return Err(anyhow!(
            "Pickup order {:?} does not reproduce delivery order {:?}",
            pickup_order,
            delivery_order
        ));
    }

    Ok(Plan {
        strategy: strategy.name().to_string(),
        zone_order,
        slot,
        pickup_order,
        delivery_order,
        repaired,
        trace,
    })
}
