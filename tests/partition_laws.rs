//! Property-based laws for the array model, pointer state and layout mapper.
//!
//! 1. Swap law: two clicks on different boxes exchange exactly those two
//! 2. Toggle law: two clicks on the same box change nothing
//! 3. Clamping law: pointers never leave `[0, n-1]`; repeats at the bound are no-ops
//! 4. Reset law: reset restores the initial data and pointers from any state
//! 5. Path independence: `m` advances equal the direct clamped formula
//! 6. Walkthroughs on the default data and the three-box geometry case

use partition_trace::config::DEFAULT_DATA;
use partition_trace::layout::{ArrayGeometry, ArrayLayoutStyle, Bounds, compute_array_layout};
use partition_trace::{
    Action, ArrayModel, ClickOutcome, LayoutMapper, PointerKind, PointerState, Pointers,
    TraceConfig, TraceSession,
};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

fn data_strategy() -> impl Strategy<Value = Vec<char>> {
    prop::collection::vec(prop::sample::select(vec!['A', 'B', 'C', 'D', 'R']), 1..40)
}

/// Data plus one valid index.
fn indexed_data() -> impl Strategy<Value = (Vec<char>, usize)> {
    data_strategy().prop_flat_map(|data| {
        let n = data.len();
        (Just(data), 0..n)
    })
}

/// Data plus two distinct valid indices.
fn swap_case() -> impl Strategy<Value = (Vec<char>, usize, usize)> {
    prop::collection::vec(prop::sample::select(vec!['A', 'B', 'C', 'D', 'R']), 2..40)
        .prop_flat_map(|data| {
            let n = data.len();
            (Just(data), 0..n, 0..n)
        })
        .prop_filter("indices must differ", |(_, a, b)| a != b)
}

/// Length plus an in-bounds starting triple.
fn pointer_case() -> impl Strategy<Value = (usize, Pointers)> {
    (1usize..40).prop_flat_map(|n| {
        (Just(n), 0..n, 0..n, 0..n).prop_map(|(n, lt, i, gt)| (n, Pointers::new(lt, i, gt)))
    })
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Click(usize),
    AdvanceLtAndI,
    AdvanceI,
    DecrementGt,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..40).prop_map(Op::Click),
        Just(Op::AdvanceLtAndI),
        Just(Op::AdvanceI),
        Just(Op::DecrementGt),
    ]
}

fn session_for(data: &[char]) -> TraceSession {
    TraceSession::new(&TraceConfig::new(data.iter().copied())).expect("non-empty data is valid")
}

// ═══════════════════════════════════════════════════════════════════════
// 1-2. Click laws
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn swap_law((data, k1, k2) in swap_case()) {
        let model = ArrayModel::new(&data);
        prop_assert_eq!(model.handle_box_click(k1), ClickOutcome::Selected(k1));
        prop_assert_eq!(model.handle_box_click(k2), ClickOutcome::Swapped(k1, k2));

        let mut expected = data.clone();
        expected.swap(k1, k2);
        prop_assert_eq!(model.values(), expected);
        prop_assert_eq!(model.selection(), None);
    }

    #[test]
    fn swap_moves_identities_not_just_values((data, k1, k2) in swap_case()) {
        let model = ArrayModel::new(&data);
        let before = model.state().item_ids();
        model.handle_box_click(k1);
        model.handle_box_click(k2);
        let after = model.state().item_ids();

        prop_assert_eq!(after[k1], before[k2]);
        prop_assert_eq!(after[k2], before[k1]);
    }

    #[test]
    fn toggle_law((data, k) in indexed_data()) {
        let model = ArrayModel::new(&data);
        let ids = model.state().item_ids();

        model.handle_box_click(k);
        prop_assert_eq!(model.handle_box_click(k), ClickOutcome::Deselected(k));
        prop_assert_eq!(model.selection(), None);
        prop_assert_eq!(model.values(), data);
        prop_assert_eq!(model.state().item_ids(), ids);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Clamping law
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn pointers_stay_in_bounds(
        (n, start) in pointer_case(),
        moves in prop::collection::vec(0u8..3, 0..100),
    ) {
        let state = PointerState::new(n, start);
        for m in moves {
            let p = match m {
                0 => state.advance_lt_and_i(),
                1 => state.advance_i(),
                _ => state.decrement_gt(),
            };
            prop_assert!(p.lt < n && p.i < n && p.gt < n);
        }
    }

    #[test]
    fn repeats_at_bound_are_idempotent((n, start) in pointer_case()) {
        let state = PointerState::new(n, start);
        for _ in 0..n {
            state.advance_lt_and_i();
        }
        let at_bound = state.get();
        prop_assert_eq!(at_bound.lt, n - 1);
        prop_assert_eq!(at_bound.i, n - 1);
        prop_assert_eq!(state.advance_lt_and_i(), at_bound);
        prop_assert_eq!(state.advance_i(), at_bound);

        for _ in 0..n {
            state.decrement_gt();
        }
        let floor = state.get();
        prop_assert_eq!(floor.gt, 0);
        prop_assert_eq!(state.decrement_gt(), floor);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4-5. Reset law and path independence
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn reset_law(data in data_strategy(), ops in prop::collection::vec(op_strategy(), 0..60)) {
        let session = session_for(&data);
        let initial_pointers = session.pointers().initial();

        for op in ops {
            let action = match op {
                Op::Click(k) => Action::ClickBox(k),
                Op::AdvanceLtAndI => Action::AdvanceLtAndI,
                Op::AdvanceI => Action::AdvanceI,
                Op::DecrementGt => Action::DecrementGt,
            };
            session.apply(action);
        }

        let ids_before_reset = session.array().state().item_ids();
        let outcome = session.apply(Action::Reset);

        prop_assert!(outcome.structure_changed);
        prop_assert_eq!(session.array().values(), data);
        prop_assert_eq!(session.array().selection(), None);
        prop_assert_eq!(session.pointers().get(), initial_pointers);

        // Fresh identities: nothing survives a reset
        let ids_after_reset = session.array().state().item_ids();
        prop_assert!(ids_after_reset.iter().all(|id| !ids_before_reset.contains(id)));
    }

    #[test]
    fn advance_is_path_independent((n, start) in pointer_case(), m in 0usize..80) {
        let state = PointerState::new(n, start);
        for _ in 0..m {
            state.advance_lt_and_i();
        }
        let expected = Pointers::new(
            (start.lt + m).min(n - 1),
            (start.i + m).min(n - 1),
            start.gt,
        );
        prop_assert_eq!(state.get(), expected);
    }

    #[test]
    fn pivot_never_moves(
        data in data_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let session = session_for(&data);
        for op in ops {
            if let Op::Click(k) = op {
                session.apply(Action::ClickBox(k));
            }
        }
        prop_assert_eq!(session.pivot(), data[0]);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Layout mapper over real layouts
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn markers_center_on_their_box(
        (count, index) in (1usize..30).prop_flat_map(|n| (Just(n), 0..n)),
        width in 20u16..160,
    ) {
        let style = ArrayLayoutStyle::default();
        let geometry = compute_array_layout(count, (0, 5), width, &style).expect("layout succeeds");
        let target = geometry.boxes()[index];
        let container = geometry.container().expect("container laid out");

        let mapper = LayoutMapper::new(geometry.clone());
        let placement = mapper.compute_offset(PointerKind::I, index).expect("box exists");

        prop_assert_eq!(container.left() + placement.left_offset, target.center_x());
        prop_assert_eq!(container.top() + placement.top_offset, target.bottom());
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Walkthroughs
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn swap_first_two_then_advance() {
    let session = TraceSession::new(&TraceConfig::default()).expect("default config is valid");
    assert_eq!(session.pointers().get(), Pointers::new(0, 1, 14));

    session.apply(Action::ClickBox(0));
    session.apply(Action::ClickBox(1));

    let mut expected = DEFAULT_DATA.to_vec();
    expected.swap(0, 1);
    assert_eq!(&session.array().values()[..4], &['A', 'B', 'B', 'A']);
    assert_eq!(session.array().values(), expected);
    assert_eq!(session.array().selection(), None);

    session.apply(Action::AdvanceLtAndI);
    assert_eq!(session.pointers().get(), Pointers::new(1, 2, 14));
}

#[test]
fn decrement_gt_to_zero_and_hold() {
    let session = TraceSession::new(&TraceConfig::default()).expect("default config is valid");
    for _ in 0..14 {
        session.apply(Action::DecrementGt);
    }
    assert_eq!(session.pointers().get().gt, 0);

    let outcome = session.apply(Action::DecrementGt);
    assert_eq!(session.pointers().get().gt, 0);
    assert!(!outcome.pointers_changed);
}

#[test]
fn offset_for_index_one_is_one_and_a_half_widths() {
    let w = 12.0;
    let boxes = (0..3).map(|i| Bounds::new(i as f32 * w, 0.0, w, w)).collect();
    let geometry = ArrayGeometry::from_bounds(Bounds::new(0.0, 0.0, 3.0 * w, w), boxes);

    let mapper = LayoutMapper::new(geometry);
    let placement = mapper.compute_offset(PointerKind::Lt, 1).expect("box 1 exists");
    assert_eq!(placement.left_offset, w + w / 2.0);
}
