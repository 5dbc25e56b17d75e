use super::ids::{Shelf, Zone};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StepAction {
    Place { zone: Zone },
    /// Stacked on the box placed in the step before.
    Stack,
}

/// One unloading step, numbered from 1.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct DeliveryStep {
    pub step: usize,
    pub shelf: Shelf,
    #[serde(flatten)]
    pub action: StepAction,
}

pub fn delivery_steps(
    delivery_order: &[Shelf],
    task_map: &BTreeMap<Shelf, Zone>,
    special_shelf: Option<Shelf>,
) -> Result<Vec<DeliveryStep>> {
    delivery_order
        .iter()
        .enumerate()
        .map(|(i, &shelf)| {
            let action = if Some(shelf) == special_shelf {
                StepAction::Stack
            } else {
                let zone = task_map
                    .get(&shelf)
                    .copied()
                    .ok_or_else(|| anyhow!("{} has no zone assigned", shelf))?;
                StepAction::Place { zone }
            };
            Ok(DeliveryStep {
                step: i + 1,
                shelf,
                action,
            })
        })
        .collect()
}
