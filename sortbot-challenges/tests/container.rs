use sortbot_challenges::shelf_relay::{Container, Discipline, Shelf};

fn shelves(numbers: &[usize]) -> Vec<Shelf> {
    numbers.iter().map(|&n| Shelf(n)).collect()
}

#[test]
fn test_lifo_delivery_reverses_each_layer() {
    let container = Container::new(Discipline::LayerLifo);
    let pickup = shelves(&[1, 2, 3, 4, 5, 6]);
    assert_eq!(
        container.delivery_order(&pickup),
        shelves(&[6, 5, 4, 3, 2, 1])
    );

    let pickup = shelves(&[3, 6, 2, 5, 1, 4]);
    let mut expected: Vec<Shelf> = pickup[3..6].iter().rev().copied().collect();
    expected.extend(pickup[0..3].iter().rev());
    assert_eq!(container.delivery_order(&pickup), expected);
}

#[test]
fn test_fifo_delivery_keeps_layer_order() {
    let container = Container::new(Discipline::LayerFifo);
    assert_eq!(
        container.delivery_order(&shelves(&[1, 2, 3, 4, 5, 6])),
        shelves(&[4, 5, 6, 1, 2, 3])
    );
}

#[test]
fn test_layers_split_at_capacity() {
    let container = Container::default();
    let pickup = shelves(&[2, 4, 6, 1, 3, 5]);
    let (first, second) = container.layers(&pickup);
    assert_eq!(first, &shelves(&[2, 4, 6])[..]);
    assert_eq!(second, &shelves(&[1, 3, 5])[..]);

    let short = shelves(&[2, 4]);
    let (first, second) = container.layers(&short);
    assert_eq!(first, &shelves(&[2, 4])[..]);
    assert!(second.is_empty());
}

#[test]
fn test_partial_pickup_orders() {
    let lifo = Container::new(Discipline::LayerLifo);
    assert_eq!(lifo.delivery_order(&shelves(&[1, 2])), shelves(&[2, 1]));
    assert_eq!(
        lifo.delivery_order(&shelves(&[1, 2, 3, 4])),
        shelves(&[4, 3, 2, 1])
    );
    let fifo = Container::new(Discipline::LayerFifo);
    assert_eq!(
        fifo.delivery_order(&shelves(&[1, 2, 3, 4])),
        shelves(&[4, 1, 2, 3])
    );
    assert!(lifo.delivery_order(&[]).is_empty());
}

#[test]
fn test_pickup_for_inverts_delivery_order() {
    let orders = [
        shelves(&[1, 2, 3, 4, 5, 6]),
        shelves(&[3, 6, 2, 5, 1, 4]),
        shelves(&[5, 1, 4]),
        shelves(&[6, 2, 1, 3]),
    ];
    for discipline in [Discipline::LayerLifo, Discipline::LayerFifo] {
        let container = Container::new(discipline);
        for pickup in &orders {
            let delivery = container.delivery_order(pickup);
            assert_eq!(&container.pickup_for(&delivery), pickup);
        }
    }
}

#[test]
fn test_delivery_is_permutation_of_pickup() {
    let container = Container::default();
    let pickup = shelves(&[4, 1, 6, 3, 5, 2]);
    let mut delivery = container.delivery_order(&pickup);
    let mut sorted_pickup = pickup.clone();
    delivery.sort();
    sorted_pickup.sort();
    assert_eq!(delivery, sorted_pickup);
}
