use super::ids::{check_shelf_permutation, Shelf, Zone};
use super::layout::{distance, Layout, Point};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Default)]
pub struct CostBreakdown {
    pub pickup: f64,
    /// Travel between zones, penalties excluded.
    pub delivery: f64,
    pub rotation: f64,
    pub return_leg: f64,
}

impl CostBreakdown {
    pub fn total(&self) -> f64 {
        self.pickup + self.delivery + self.rotation + self.return_leg
    }
}

/// One step of a planned round, in the order it happens.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    Pickup {
        shelf: Shelf,
        access_point: usize,
        distance: f64,
    },
    Deliver {
        shelf: Shelf,
        zone: Zone,
        distance: f64,
        rotation_penalty: f64,
    },
    /// The overflow box goes on top of whatever was placed at the last stop.
    Stack { shelf: Shelf, onto: Option<Zone> },
    Return { distance: f64 },
    /// The strategy put the overflow shelf first in line; positions 0 and 1
    /// of the delivery order were swapped.
    Repaired {
        strategy: String,
        swapped: (Shelf, Shelf),
    },
}

/// Walks the pickup order, then the delivery order it implies, and prices
/// every move.
pub fn evaluate_cost(
    layout: &Layout,
    task_map: &BTreeMap<Shelf, Zone>,
    special_shelf: Option<Shelf>,
    pickup_order: &[Shelf],
    mut trace: Option<&mut Vec<TraceEvent>>,
) -> Result<CostBreakdown> {
    check_shelf_permutation(pickup_order)?;
    for &shelf in pickup_order {
        if Some(shelf) == special_shelf {
            if task_map.contains_key(&shelf) {
                return Err(anyhow!("Special {} must not have a zone", shelf));
            }
        } else if !task_map.contains_key(&shelf) {
            return Err(anyhow!("{} has no zone assigned", shelf));
        }
    }

    let mut cost = CostBreakdown::default();
    let mut pos: Point = layout.start;

    for &shelf in pickup_order {
        let access_point = layout.access_point_of(shelf)?;
        let ap_pos = layout.access_point_position(shelf)?;
        let mut leg = 0.0;
        if ap_pos != pos {
            leg = distance(pos, ap_pos);
            cost.pickup += leg;
            pos = ap_pos;
        }
        if let Some(trace) = trace.as_deref_mut() {
            trace.push(TraceEvent::Pickup {
                shelf,
                access_point,
                distance: leg,
            });
        }
    }

    let delivery_order = layout.container().delivery_order(pickup_order);
    let mut prev_zone: Option<Zone> = None;
    for shelf in delivery_order {
        if Some(shelf) == special_shelf {
            if let Some(trace) = trace.as_deref_mut() {
                trace.push(TraceEvent::Stack {
                    shelf,
                    onto: prev_zone,
                });
            }
            continue;
        }
        let zone = task_map[&shelf];
        let zone_pos = layout.zone_position(zone)?;
        let leg = distance(pos, zone_pos);
        let entering_rotation =
            zone.is_rotation() && !prev_zone.map_or(false, |prev| prev.is_rotation());
        let penalty = if entering_rotation {
            layout.rotation_penalty
        } else {
            0.0
        };
        cost.delivery += leg;
        cost.rotation += penalty;
        pos = zone_pos;
        prev_zone = Some(zone);
        if let Some(trace) = trace.as_deref_mut() {
            trace.push(TraceEvent::Deliver {
                shelf,
                zone,
                distance: leg,
                rotation_penalty: penalty,
            });
        }
    }

    if pos.0 >= layout.return_trigger_x {
        cost.return_leg = distance(pos, (layout.return_line_x, pos.1));
    }
    if let Some(trace) = trace.as_deref_mut() {
        trace.push(TraceEvent::Return {
            distance: cost.return_leg,
        });
    }

    Ok(cost)
}
