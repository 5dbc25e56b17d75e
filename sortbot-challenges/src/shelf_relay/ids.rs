use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const NUM_SHELVES: usize = 6;
pub const NUM_ZONES: usize = 6;
pub const LAYER_CAPACITY: usize = 3;

/// Pickup slot, numbered 1..=6 as printed on the floor.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Shelf(pub usize);

impl Shelf {
    pub const ALL: [Shelf; NUM_SHELVES] = [Shelf(1), Shelf(2), Shelf(3), Shelf(4), Shelf(5), Shelf(6)];

    pub fn from_index(index: usize) -> Result<Self> {
        if index >= NUM_SHELVES {
            return Err(anyhow!("Shelf index ({}) out of range", index));
        }
        Ok(Shelf(index + 1))
    }

    pub fn number(self) -> usize {
        self.0
    }

    pub fn index(self) -> Result<usize> {
        if self.0 == 0 || self.0 > NUM_SHELVES {
            return Err(anyhow!("Unknown shelf ({})", self.0));
        }
        Ok(self.0 - 1)
    }
}

impl fmt::Display for Shelf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shelf_{}", self.0)
    }
}

/// Boxed item sitting on a shelf. Box `i` belongs on paper stack `i`.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct BoxId(pub usize);

impl BoxId {
    pub const ALL: [BoxId; NUM_SHELVES] = [BoxId(1), BoxId(2), BoxId(3), BoxId(4), BoxId(5), BoxId(6)];

    pub fn stack(self) -> StackId {
        StackId(self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct StackId(pub usize);

impl StackId {
    pub const ALL: [StackId; NUM_SHELVES] = [
        StackId(1),
        StackId(2),
        StackId(3),
        StackId(4),
        StackId(5),
        StackId(6),
    ];
}

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Zone {
    pub const ALL: [Zone; NUM_ZONES] = [Zone::A, Zone::B, Zone::C, Zone::D, Zone::E, Zone::F];

    pub fn index(self) -> usize {
        self as usize
    }

    /// A and F sit at the two ends of the delivery arc; the vehicle has to
    /// turn to enter them.
    pub fn is_rotation(self) -> bool {
        matches!(self, Zone::A | Zone::F)
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Zone::A => "a",
            Zone::B => "b",
            Zone::C => "c",
            Zone::D => "d",
            Zone::E => "e",
            Zone::F => "f",
        };
        write!(f, "zone_{}", name)
    }
}

/// Checks that `order` holds every shelf exactly once.
pub fn check_shelf_permutation(order: &[Shelf]) -> Result<()> {
    if order.len() != NUM_SHELVES {
        return Err(anyhow!(
            "Order length ({}) does not match number of shelves ({})",
            order.len(),
            NUM_SHELVES
        ));
    }
    let mut seen = [false; NUM_SHELVES];
    for &shelf in order {
        let index = shelf.index()?;
        if seen[index] {
            return Err(anyhow!("Order contains duplicate shelf ({})", shelf));
        }
        seen[index] = true;
    }
    Ok(())
}
