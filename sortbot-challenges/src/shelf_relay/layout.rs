use super::container::{Container, Discipline};
use super::ids::{Shelf, Zone, NUM_SHELVES, NUM_ZONES};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use sortbot_utils::load_json_or_path;

pub type Point = (f64, f64);

pub fn distance(a: Point, b: Point) -> f64 {
    (a.0 - b.0).hypot(a.1 - b.1)
}

/// Fixed floor description shared by every round.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Layout {
    /// Positions the vehicle stops at to reach the shelves.
    pub access_points: Vec<Point>,
    /// `shelf_access_points[i]` is the access point of shelf `i + 1`.
    pub shelf_access_points: Vec<usize>,
    /// Zone coordinates, indexed a..f.
    pub zones: Vec<Point>,
    pub start: Point,
    pub rotation_penalty: f64,
    /// A route ending at or beyond this x pays the leg back to `return_line_x`.
    pub return_trigger_x: f64,
    pub return_line_x: f64,
    pub discipline: Discipline,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            access_points: vec![(180.0, 1500.0), (180.0, 1000.0), (180.0, 500.0)],
            shelf_access_points: vec![0, 1, 2, 0, 1, 2],
            zones: vec![
                (3250.0, 1895.0),
                (3850.0, 1605.0),
                (3850.0, 1235.0),
                (3850.0, 845.0),
                (3850.0, 455.0),
                (3250.0, 105.0),
            ],
            start: (2000.0, 1000.0),
            rotation_penalty: 2000.0,
            return_trigger_x: 2000.0,
            return_line_x: 1999.0,
            discipline: Discipline::LayerLifo,
        }
    }
}

impl Layout {
    /// Parses a layout from inline json or a `.json` file and validates it.
    pub fn from_json_or_path(input: &str) -> Result<Self> {
        let layout: Layout = load_json_or_path(input)?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn validate(&self) -> Result<()> {
        if self.shelf_access_points.len() != NUM_SHELVES {
            return Err(anyhow!(
                "Layout binds {} shelves, expected {}",
                self.shelf_access_points.len(),
                NUM_SHELVES
            ));
        }
        let mut shelves_per_point = vec![0usize; self.access_points.len()];
        for (i, &point) in self.shelf_access_points.iter().enumerate() {
            if point >= self.access_points.len() {
                return Err(anyhow!(
                    "Shelf {} references unknown access point ({})",
                    i + 1,
                    point
                ));
            }
            shelves_per_point[point] += 1;
        }
        if let Some(point) = shelves_per_point.iter().position(|&n| n != 2) {
            return Err(anyhow!(
                "Access point {} is shared by {} shelves, expected 2",
                point,
                shelves_per_point[point]
            ));
        }
        if self.zones.len() != NUM_ZONES {
            return Err(anyhow!(
                "Layout defines {} zones, expected {}",
                self.zones.len(),
                NUM_ZONES
            ));
        }
        let all_finite = self
            .access_points
            .iter()
            .chain(self.zones.iter())
            .chain(std::iter::once(&self.start))
            .all(|p| p.0.is_finite() && p.1.is_finite());
        if !all_finite {
            return Err(anyhow!("Layout coordinates must be finite"));
        }
        if !(self.rotation_penalty.is_finite() && self.rotation_penalty >= 0.0) {
            return Err(anyhow!(
                "Rotation penalty ({}) must be a non-negative number",
                self.rotation_penalty
            ));
        }
        if !(self.return_line_x <= self.return_trigger_x) {
            return Err(anyhow!(
                "Return line ({}) must not lie beyond the return trigger ({})",
                self.return_line_x,
                self.return_trigger_x
            ));
        }
        Ok(())
    }

    pub fn container(&self) -> Container {
        Container::new(self.discipline)
    }

    pub fn access_point_of(&self, shelf: Shelf) -> Result<usize> {
        self.shelf_access_points
            .get(shelf.index()?)
            .copied()
            .ok_or_else(|| anyhow!("No access point configured for {}", shelf))
    }

    pub fn access_point_position(&self, shelf: Shelf) -> Result<Point> {
        let point = self.access_point_of(shelf)?;
        self.access_points
            .get(point)
            .copied()
            .ok_or_else(|| anyhow!("Access point {} of {} has no coordinate", point, shelf))
    }

    pub fn zone_position(&self, zone: Zone) -> Result<Point> {
        self.zones
            .get(zone.index())
            .copied()
            .ok_or_else(|| anyhow!("{} is missing from the zone table", zone))
    }

    /// The other shelf served from the same access point.
    pub fn partner_of(&self, shelf: Shelf) -> Option<Shelf> {
        let point = self.access_point_of(shelf).ok()?;
        Shelf::ALL
            .iter()
            .copied()
            .find(|&other| other != shelf && self.access_point_of(other).ok() == Some(point))
    }
}
