//! Moving items up and down within a scope.
//!
//! Items in a scope are displayed in ascending rank order. After every move
//! the visible items (rank >= 0) are renumbered `0, 1, ..., k - 1` so gaps
//! left by deleted items are closed. Hidden items (rank < 0) keep their rank.
//!
//! Moving up and moving down use different strategies:
//! - Up inserts the item one slot earlier and shifts every item at or after
//!   that slot back by one.
//! - Down swaps the item's rank with the next visible item.
//!
//! Both give the same result on a contiguous sequence but differ when ranks
//! contain ties or gaps.

use serde::Deserialize;

use crate::item::core::{Item, ItemId, is_visible};

/// Which way to move an item in the displayed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Towards the top of the list (lower rank).
    Up,
    /// Towards the bottom of the list (higher rank).
    Down,
}

/// Move the item `target_id` one place in `direction` and renumber the
/// visible items.
///
/// `items` must be every item in one scope, sorted by ascending rank. The
/// returned items are sorted by ascending rank.
///
/// The move does nothing and `items` is returned as is when:
/// - no item has the ID `target_id`,
/// - the item is hidden,
/// - the item is already first (moving up) or last (moving down).
pub fn move_item(mut items: Vec<Item>, target_id: ItemId, direction: Direction) -> Vec<Item> {
    let moved = match direction {
        Direction::Up => shift_up(&mut items, target_id),
        Direction::Down => swap_down(&mut items, target_id),
    };

    if moved {
        renumber(&mut items);
    }

    items
}

fn shift_up(items: &mut [Item], target_id: ItemId) -> bool {
    let Some(target_rank) = items
        .iter()
        .find(|item| item.id == target_id)
        .map(|item| item.rank)
    else {
        return false;
    };

    let Some(min_rank) = items
        .iter()
        .map(|item| item.rank)
        .filter(|&rank| is_visible(rank))
        .min()
    else {
        return false;
    };

    // Also true for hidden targets since min_rank is never negative.
    if target_rank <= min_rank {
        return false;
    }

    let new_rank = target_rank - 1;

    for item in items.iter_mut() {
        if item.id == target_id {
            item.rank = new_rank;
        } else if item.rank >= new_rank {
            // Saturating keeps a rank at the top of the range visible. The
            // stable sort in `renumber` keeps tied items in their old order.
            item.rank = item.rank.saturating_add(1);
        }
    }

    true
}

fn swap_down(items: &mut [Item], target_id: ItemId) -> bool {
    let mut visible: Vec<usize> = (0..items.len())
        .filter(|&index| is_visible(items[index].rank))
        .collect();
    visible.sort_by_key(|&index| items[index].rank);

    let Some(position) = visible
        .iter()
        .position(|&index| items[index].id == target_id)
    else {
        return false;
    };

    let Some(&next) = visible.get(position + 1) else {
        return false;
    };

    let target = visible[position];
    let target_rank = items[target].rank;
    items[target].rank = items[next].rank;
    items[next].rank = target_rank;

    true
}

/// Sort `items` by rank and reassign ranks `0, 1, ...` to the visible items
/// in that order.
///
/// Items with equal ranks keep their relative order. Hidden items keep their
/// negative rank.
pub fn renumber(items: &mut [Item]) {
    items.sort_by_key(|item| item.rank);

    let mut next_rank = 0;

    for item in items.iter_mut().filter(|item| is_visible(item.rank)) {
        item.rank = next_rank;
        next_rank += 1;
    }
}






#[cfg(test)]
mod property_tests {
    use std::collections::HashMap;

    use proptest::prelude::*;

    use crate::item::core::{Item, ItemId, Rank, is_visible};

    use super::{Direction, move_item, renumber, test_items::item};

    fn arb_items() -> impl Strategy<Value = Vec<Item>> {
        prop::collection::vec(-3i64..20, 0..12).prop_map(|ranks| {
            let mut items: Vec<Item> = ranks
                .into_iter()
                .enumerate()
                .map(|(index, rank)| item(index as ItemId + 1, &format!("item {index}"), rank))
                .collect();
            items.sort_by_key(|item| item.rank);
            items
        })
    }

    fn arb_moves() -> impl Strategy<Value = Vec<(ItemId, Direction)>> {
        prop::collection::vec(
            (
                1i64..14,
                prop_oneof![Just(Direction::Up), Just(Direction::Down)],
            ),
            1..20,
        )
    }

    fn visible_ranks(items: &[Item]) -> Vec<Rank> {
        items
            .iter()
            .map(|item| item.rank)
            .filter(|&rank| is_visible(rank))
            .collect()
    }

    fn hidden_ranks(items: &[Item]) -> HashMap<ItemId, Rank> {
        items
            .iter()
            .filter(|item| !is_visible(item.rank))
            .map(|item| (item.id, item.rank))
            .collect()
    }

    proptest! {
        #[test]
        fn visible_ranks_are_contiguous_after_moves(items in arb_items(), moves in arb_moves()) {
            let mut items = items;
            renumber(&mut items);
            let visible_count = visible_ranks(&items).len() as Rank;

            for (target_id, direction) in moves {
                items = move_item(items, target_id, direction);
                prop_assert_eq!(visible_ranks(&items), (0..visible_count).collect::<Vec<_>>());
            }
        }

        #[test]
        fn hidden_items_never_change(items in arb_items(), moves in arb_moves()) {
            let want = hidden_ranks(&items);
            let mut items = items;

            for (target_id, direction) in moves {
                items = move_item(items, target_id, direction);
            }

            prop_assert_eq!(hidden_ranks(&items), want);
        }

        #[test]
        fn moves_keep_the_same_items(items in arb_items(), moves in arb_moves()) {
            let mut want: Vec<ItemId> = items.iter().map(|item| item.id).collect();
            want.sort();
            let mut items = items;

            for (target_id, direction) in moves {
                items = move_item(items, target_id, direction);
            }

            let mut got: Vec<ItemId> = items.iter().map(|item| item.id).collect();
            got.sort();
            prop_assert_eq!(got, want);
        }

        #[test]
        fn first_item_up_and_last_item_down_are_no_ops(items in arb_items()) {
            let mut items = items;
            renumber(&mut items);
            let visible: Vec<ItemId> = items
                .iter()
                .filter(|item| is_visible(item.rank))
                .map(|item| item.id)
                .collect();

            if let (Some(&first), Some(&last)) = (visible.first(), visible.last()) {
                prop_assert_eq!(move_item(items.clone(), first, Direction::Up), items.clone());
                prop_assert_eq!(move_item(items.clone(), last, Direction::Down), items.clone());
            }
        }
    }
}
