use super::ids::Zone;

/// Default visiting arc, starting next to the a end and wrapping back to a.
pub const FORWARD_ARC: [Zone; 6] = [Zone::B, Zone::C, Zone::D, Zone::E, Zone::F, Zone::A];

/// Arc used when f is empty: e back up to a.
pub const REVERSE_ARC: [Zone; 5] = [Zone::E, Zone::D, Zone::C, Zone::B, Zone::A];

/// Canonical order in which the five populated zones are delivered.
pub fn zone_order(empty_zone: Zone) -> Vec<Zone> {
    if empty_zone == Zone::F {
        REVERSE_ARC.to_vec()
    } else {
        FORWARD_ARC
            .iter()
            .copied()
            .filter(|&zone| zone != empty_zone)
            .collect()
    }
}

/// `2` when the round runs the reverse arc, `1` otherwise.
pub fn route_type(empty_zone: Zone) -> u8 {
    if empty_zone == Zone::F {
        2
    } else {
        1
    }
}
