use anyhow::Result;
use rand::{rngs::SmallRng, SeedableRng};
use sortbot_challenges::shelf_relay::{
    check_shelf_permutation, plan_round, BoxId, Challenge, Discipline, InsertionContext,
    InsertionStrategy, Layout, PairAdjacent, Shelf, StepAction, TraceEvent, Zone,
};

fn shelves(numbers: &[usize]) -> Vec<Shelf> {
    numbers.iter().map(|&n| Shelf(n)).collect()
}

fn f_empty_round() -> Challenge {
    Challenge::from_draws(&Layout::default(), &BoxId::ALL, &Zone::ALL).unwrap()
}

struct FixedSlot(usize);

impl InsertionStrategy for FixedSlot {
    fn name(&self) -> &str {
        "fixed_slot"
    }

    fn choose_slot(&mut self, _ctx: &InsertionContext<'_>) -> Result<usize> {
        Ok(self.0)
    }
}

#[test]
fn test_pair_adjacent_picks_special_before_partner() {
    let c = f_empty_round();
    let plan = plan_round(&c, &mut PairAdjacent).unwrap();
    assert_eq!(
        plan.zone_order,
        vec![Zone::E, Zone::D, Zone::C, Zone::B, Zone::A]
    );
    assert_eq!(plan.slot, 3);
    assert_eq!(plan.delivery_order, shelves(&[5, 4, 3, 6, 2, 1]));
    assert_eq!(plan.pickup_order, shelves(&[1, 2, 6, 3, 4, 5]));
    assert!(!plan.repaired);
    assert!(plan.trace.is_empty());
}

#[test]
fn test_solve_reports_summary() {
    let c = f_empty_round();
    let outcome = c.solve(&mut PairAdjacent).unwrap();
    assert_eq!(outcome.summary, "1,2,6,3,4,5:3;2");
    assert_eq!(outcome.empty_zone, Zone::F);
    assert_eq!(outcome.special_shelf, Some(Shelf(6)));
    assert_eq!(outcome.strategy, "pair_adjacent");
    assert_eq!(
        outcome.total_cost,
        c.evaluate_total_cost(&outcome.solution()).unwrap()
    );
    assert_eq!(outcome.steps.len(), 6);
    assert_eq!(outcome.steps[0].step, 1);
    assert_eq!(outcome.steps[0].action, StepAction::Place { zone: Zone::E });
    assert_eq!(outcome.steps[3].shelf, Shelf(6));
    assert_eq!(outcome.steps[3].action, StepAction::Stack);
}

#[test]
fn test_summary_forward_route() {
    // b empty, shelf 1 is special
    let boxes = [BoxId(6), BoxId(1), BoxId(2), BoxId(3), BoxId(4), BoxId(5)];
    let zones = [Zone::C, Zone::A, Zone::F, Zone::E, Zone::D, Zone::B];
    let c = Challenge::from_draws(&Layout::default(), &boxes, &zones).unwrap();
    let outcome = c.solve(&mut PairAdjacent).unwrap();
    // zone order c,d,e,f,a -> shelves 2,6,5,4,3; partner of 1 is 4
    assert_eq!(outcome.delivery_order, shelves(&[2, 6, 5, 4, 1, 3]));
    assert_eq!(outcome.pickup_order, shelves(&[3, 1, 4, 5, 6, 2]));
    assert_eq!(outcome.summary, "3,1,4,5,6,2:4;1");
}

#[test]
fn test_slot_zero_is_repaired() {
    let c = f_empty_round();
    let plan = plan_round(&c, &mut FixedSlot(0)).unwrap();
    assert!(plan.repaired);
    assert_eq!(plan.slot, 0);
    assert_eq!(plan.delivery_order, shelves(&[5, 6, 4, 3, 2, 1]));
    assert_eq!(plan.pickup_order, shelves(&[1, 2, 3, 4, 6, 5]));
    assert_eq!(
        plan.trace,
        vec![TraceEvent::Repaired {
            strategy: "fixed_slot".to_string(),
            swapped: (Shelf(6), Shelf(5)),
        }]
    );

    let outcome = c.solve(&mut FixedSlot(0)).unwrap();
    assert!(outcome.repaired);
    assert_ne!(outcome.delivery_order[0], Shelf(6));
    assert!(matches!(outcome.trace[0], TraceEvent::Repaired { .. }));
}

#[test]
fn test_slot_out_of_range_fails() {
    let c = f_empty_round();
    assert!(plan_round(&c, &mut FixedSlot(6)).is_err());
    assert!(c.solve(&mut FixedSlot(42)).is_err());
}

#[test]
fn test_context_slots() {
    let c = f_empty_round();
    let zone_order = c.zone_order();
    let delivery_shelves = c.shelves_for(&zone_order).unwrap();
    let ctx = InsertionContext {
        challenge: &c,
        zone_order: &zone_order,
        delivery_shelves: &delivery_shelves,
        special_shelf: Shelf(6),
    };
    assert_eq!(ctx.num_slots(), 6);
    assert_eq!(ctx.valid_slots(), vec![1, 2, 3, 4, 5]);
    assert!(!ctx.is_valid_slot(0));
    assert!(!ctx.is_valid_slot(6));
    assert_eq!(ctx.partner(), Some(Shelf(3)));
    assert_eq!(ctx.delivery_with(5).unwrap(), shelves(&[5, 4, 3, 2, 1, 6]));
    assert_eq!(ctx.pickup_with(5).unwrap(), shelves(&[6, 1, 2, 3, 4, 5]));
}

#[test]
fn test_round_without_special_cannot_be_planned() {
    let mut c = f_empty_round();
    c.special_shelf = None;
    assert!(plan_round(&c, &mut PairAdjacent).is_err());
}

#[test]
fn test_plans_hold_invariants_for_random_rounds() {
    let mut rng = SmallRng::seed_from_u64(2024);
    for discipline in [Discipline::LayerLifo, Discipline::LayerFifo] {
        let layout = Layout {
            discipline,
            ..Layout::default()
        };
        for _ in 0..200 {
            let c = Challenge::generate_with_rng(&mut rng, &layout).unwrap();
            let special = c.special_shelf.unwrap();
            let outcome = c.solve(&mut PairAdjacent).unwrap();
            check_shelf_permutation(&outcome.pickup_order).unwrap();
            check_shelf_permutation(&outcome.delivery_order).unwrap();
            assert_ne!(outcome.delivery_order[0], special);
            assert!(!outcome.repaired);
            assert!(outcome.total_cost >= 0.0);
            let route = if c.empty_zone == Zone::F { "2" } else { "1" };
            assert!(outcome.summary.ends_with(&format!(";{}", route)));
            assert_eq!(
                outcome.delivery_order,
                layout.container().delivery_order(&outcome.pickup_order)
            );
            // regular shelves are delivered in zone order
            let regular: Vec<Shelf> = outcome
                .delivery_order
                .iter()
                .copied()
                .filter(|&s| s != special)
                .collect();
            assert_eq!(regular, c.shelves_for(&outcome.zone_order).unwrap());
            if discipline != Discipline::LayerLifo {
                continue;
            }
            // the overflow shelf is picked up in the same stop as its partner
            let partner = layout.partner_of(special).unwrap();
            let i = outcome
                .pickup_order
                .iter()
                .position(|&s| s == special)
                .unwrap();
            let j = outcome
                .pickup_order
                .iter()
                .position(|&s| s == partner)
                .unwrap();
            assert_eq!((i as i64 - j as i64).abs(), 1);
        }
    }
}

#[test]
fn test_lifo_delivery_formula_on_planned_rounds() {
    let layout = Layout::default();
    for nonce in 0..50u8 {
        let c = Challenge::generate_instance(&[nonce; 32], &layout).unwrap();
        let outcome = c.solve(&mut PairAdjacent).unwrap();
        let p = &outcome.pickup_order;
        let mut expected: Vec<Shelf> = p[3..6].iter().rev().copied().collect();
        expected.extend(p[0..3].iter().rev());
        assert_eq!(outcome.delivery_order, expected);
    }
}

#[test]
fn test_seeded_round_is_reproducible() {
    let layout = Layout::default();
    let seed = sortbot_utils::calc_seed("rand_hash", 3);
    let a = Challenge::generate_instance(&seed, &layout)
        .unwrap()
        .solve(&mut PairAdjacent)
        .unwrap();
    let b = Challenge::generate_instance(&seed, &layout)
        .unwrap()
        .solve(&mut PairAdjacent)
        .unwrap();
    assert_eq!(a, b);
}
