use super::ids::{Shelf, LAYER_CAPACITY};
use serde::{Deserialize, Serialize};

/// How a single layer gives up its items. Layer 2 is always emptied before
/// layer 1 starts.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Discipline {
    /// Top-loaded bins: the last shelf loaded into a layer is placed first.
    #[default]
    LayerLifo,
    /// The first shelf loaded into a layer is placed first.
    LayerFifo,
}

/// Two stacked layers of `LAYER_CAPACITY` slots, filled in pickup order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Container {
    pub discipline: Discipline,
}

impl Container {
    pub fn new(discipline: Discipline) -> Self {
        Self { discipline }
    }

    /// Splits a pickup order into (layer 1, layer 2).
    pub fn layers<'a>(&self, pickup_order: &'a [Shelf]) -> (&'a [Shelf], &'a [Shelf]) {
        pickup_order.split_at(pickup_order.len().min(LAYER_CAPACITY))
    }

    pub fn delivery_order(&self, pickup_order: &[Shelf]) -> Vec<Shelf> {
        let (first_layer, second_layer) = self.layers(pickup_order);
        match self.discipline {
            Discipline::LayerLifo => second_layer
                .iter()
                .rev()
                .chain(first_layer.iter().rev())
                .copied()
                .collect(),
            Discipline::LayerFifo => second_layer
                .iter()
                .chain(first_layer.iter())
                .copied()
                .collect(),
        }
    }

    /// Inverse of `delivery_order`: the pickup order that yields `delivery_order`.
    pub fn pickup_for(&self, delivery_order: &[Shelf]) -> Vec<Shelf> {
        // the first `k` deliveries come out of layer 2
        let k = delivery_order.len().saturating_sub(LAYER_CAPACITY);
        let (from_second, from_first) = delivery_order.split_at(k);
        match self.discipline {
            Discipline::LayerLifo => from_first
                .iter()
                .rev()
                .chain(from_second.iter().rev())
                .copied()
                .collect(),
            Discipline::LayerFifo => from_first
                .iter()
                .chain(from_second.iter())
                .copied()
                .collect(),
        }
    }
}
