use seating::{
    simulate, Cell, ChgForOccupiedN, Env8Neighbors, Error, Layout, LineOfSight, NeighborRule,
    Position, SeatMap, SeatRule,
};

const SAMPLE: &str = "L.LL.LL.LL
LLLLLLL.LL
L.L.L..L..
LLLL.LL.LL
L.LL.LL.LL
L.LLLLL.LL
..L.L.....
LLLLLLLLLL
L.LLLLLL.L
L.LLLLL.LL
";

fn sample_layout() -> Layout {
    SAMPLE.parse().unwrap()
}

fn assert_floor_never_occupied(seat_map: &SeatMap) {
    let layout = seat_map.layout();
    for pos in layout.positions() {
        if layout.cell(&pos) == Some(&Cell::Floor) {
            assert!(!seat_map.occupancy().is_occupied(&pos), "floor at {:?} is occupied", pos);
        }
    }
}

#[test]
fn sample_stabilizes_with_37_seats_by_adjacent_rule() {
    assert_eq!(simulate(&sample_layout(), NeighborRule::Adjacent), 37);
}

#[test]
fn sample_stabilizes_with_26_seats_by_line_of_sight() {
    assert_eq!(simulate(&sample_layout(), NeighborRule::LineOfSight), 26);
}

#[test]
fn simulate_is_deterministic() {
    let layout = sample_layout();
    for rule in [NeighborRule::Adjacent, NeighborRule::LineOfSight] {
        assert_eq!(simulate(&layout, rule), simulate(&layout, rule));
    }
}

#[test]
fn first_step_fills_every_seat() {
    let layout = sample_layout();
    let mut seat_map = SeatMap::new(layout.clone());
    assert_eq!(seat_map.occupied_n(), 0);

    let chg_count = seat_map.step(&Env8Neighbors, &ChgForOccupiedN::new(4));
    assert_eq!(chg_count, layout.seat_n());
    assert_eq!(seat_map.occupied_n(), layout.seat_n());
    assert!(seat_map.occupancy().is_occupied(&Position::new(0, 0)));
    assert!(!seat_map.occupancy().is_occupied(&Position::new(0, 1)));
}

#[test]
fn floor_stays_empty_and_shape_stays_fixed_on_every_step() {
    for rule in [NeighborRule::Adjacent, NeighborRule::LineOfSight] {
        let layout = sample_layout();
        let mut seat_map = SeatMap::new(layout.clone());
        let seat_rule = rule.seat_rule();
        for _ in 0..100 {
            let chg_count = seat_map.step(rule.counter(), &seat_rule);
            assert_floor_never_occupied(&seat_map);
            assert_eq!(seat_map.occupancy().dims(), layout.dims());
            assert_eq!(seat_map.dims(), layout.dims());
            if chg_count == 0 {
                break;
            }
        }
    }
}

#[test]
fn fixed_point_maps_to_itself() {
    for rule in [NeighborRule::Adjacent, NeighborRule::LineOfSight] {
        let mut seat_map = SeatMap::new(sample_layout());
        let seat_rule = rule.seat_rule();
        seat_map.stabilize(rule.counter(), &seat_rule);
        let fixed = seat_map.occupancy().clone();

        assert_eq!(seat_map.step(rule.counter(), &seat_rule), 0);
        assert_eq!(seat_map.occupancy(), &fixed);
    }
}

#[test]
fn single_seat_fills_and_stays() {
    let mut seat_map = SeatMap::new("L".parse().unwrap());
    let rule = ChgForOccupiedN::new(4);
    assert_eq!(seat_map.step(&Env8Neighbors, &rule), 1);
    assert_eq!(seat_map.occupied_n(), 1);

    assert_eq!(seat_map.stabilize(&Env8Neighbors, &rule), 0);
    assert_eq!(seat_map.occupied_n(), 1);
}

#[test]
fn all_floor_never_gets_occupied() {
    let layout: Layout = "...\n...\n...".parse().unwrap();
    assert_eq!(layout.seat_n(), 0);

    let mut seat_map = SeatMap::new(layout.clone());
    for _ in 0..5 {
        assert_eq!(seat_map.step(&Env8Neighbors, &ChgForOccupiedN::new(4)), 0);
        assert_eq!(seat_map.occupied_n(), 0);
    }
    assert_eq!(simulate(&layout, NeighborRule::Adjacent), 0);
    assert_eq!(simulate(&layout, NeighborRule::LineOfSight), 0);
}

#[test]
fn edges_do_not_wrap_around() {
    // With wraparound the corners of a full 3x3 block would each see 8 neighbors.
    let seat_map = SeatMap::from_snapshot("###\n###\n###").unwrap();
    assert_eq!(seat_map.neighbor_count(&Env8Neighbors, &Position::new(0, 0)), 3);
    assert_eq!(seat_map.neighbor_count(&Env8Neighbors, &Position::new(0, 1)), 5);
    assert_eq!(seat_map.neighbor_count(&Env8Neighbors, &Position::new(1, 1)), 8);
    assert_eq!(seat_map.neighbor_count(&Env8Neighbors, &Position::new(2, 2)), 3);
}

#[test]
fn line_of_sight_sees_eight_seats_across_floor() {
    let seat_map = SeatMap::from_snapshot(
        ".......#.
...#.....
.#.......
.........
..#L....#
....#....
.........
#........
...#.....",
    )
    .unwrap();
    let pos = Position::new(4, 3);
    assert_eq!(seat_map.neighbor_count(&LineOfSight, &pos), 8);
    assert_eq!(seat_map.neighbor_count(&Env8Neighbors, &pos), 2);
}

#[test]
fn line_of_sight_sees_nothing_in_empty_directions() {
    let seat_map = SeatMap::from_snapshot(
        ".##.##.
#.#.#.#
##...##
...L...
##...##
#.#.#.#
.##.##.",
    )
    .unwrap();
    assert_eq!(seat_map.neighbor_count(&LineOfSight, &Position::new(3, 3)), 0);
}

#[test]
fn line_of_sight_is_blocked_by_empty_seat() {
    let seat_map = SeatMap::from_snapshot(
        ".............
.L.L.#.#.#.#.
.............",
    )
    .unwrap();
    assert_eq!(seat_map.neighbor_count(&LineOfSight, &Position::new(1, 1)), 0);
    assert_eq!(seat_map.neighbor_count(&LineOfSight, &Position::new(1, 3)), 1);
}

#[test]
fn snapshot_renders_back_to_same_text() {
    let text = "#.L\nL##\n..#\n";
    let seat_map = SeatMap::from_snapshot(text).unwrap();
    assert_eq!(seat_map.occupied_n(), 4);
    assert_eq!(seat_map.to_string(), text);
}

#[test]
fn seat_rule_follows_tolerance() {
    let rule = ChgForOccupiedN::new(4);
    assert!(rule.next(false, 0));
    assert!(!rule.next(false, 1));
    assert!(rule.next(true, 3));
    assert!(!rule.next(true, 4));
    assert!(!rule.next(true, 8));

    let rule = NeighborRule::LineOfSight.seat_rule();
    assert_eq!(rule.tolerance(), 5);
    assert!(rule.next(true, 4));
    assert!(!rule.next(true, 5));
}

#[test]
fn stabilize_within_fails_when_limit_too_small() {
    let rule = NeighborRule::Adjacent;
    let mut seat_map = SeatMap::new(sample_layout());
    assert!(matches!(
        seat_map.stabilize_within(rule.counter(), &rule.seat_rule(), Some(2)),
        Err(Error::NotConverged(2))
    ));
}

#[test]
fn stabilize_within_matches_uncapped_run() {
    let rule = NeighborRule::Adjacent;
    let mut uncapped = SeatMap::new(sample_layout());
    let step_count = uncapped.stabilize(rule.counter(), &rule.seat_rule());
    assert!(step_count > 0);

    let mut capped = SeatMap::new(sample_layout());
    let capped_step_count = capped
        .stabilize_within(rule.counter(), &rule.seat_rule(), Some(step_count))
        .unwrap();
    assert_eq!(capped_step_count, step_count);
    assert_eq!(capped.occupancy(), uncapped.occupancy());
    assert_eq!(capped.occupied_n(), 37);
}
