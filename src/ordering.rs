//! List Ordering
//!
//! In-memory reorder algorithms shared by every orderable list. Positions
//! are 0-based and equal to the array index after each operation.

use serde::{Deserialize, Serialize};

use crate::models::{OrderEntry, Orderable};

/// Direction of an adjacent move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            other => Err(format!("expected up or down, got {}", other)),
        }
    }
}

/// Stable sort by position; ties keep their incoming order
pub fn sort_by_position<T: Orderable>(items: &mut [T]) {
    items.sort_by_key(|item| item.position());
}

/// Set every position to its array index
pub fn renumber<T: Orderable>(items: &mut [T]) {
    for (index, item) in items.iter_mut().enumerate() {
        item.set_position(index as u32);
    }
}

/// Positions are exactly 0..len in array order
pub fn is_dense<T: Orderable>(items: &[T]) -> bool {
    items
        .iter()
        .enumerate()
        .all(|(index, item)| item.position() == index as u32)
}

/// Swap the item at `index` with its neighbour.
///
/// Returns false (list untouched) when `index` is out of range or already at
/// the boundary in `direction`. Only the two swapped items get new positions.
pub fn move_item<T: Orderable>(items: &mut [T], index: usize, direction: Direction) -> bool {
    if index >= items.len() {
        return false;
    }
    let neighbour = match direction {
        Direction::Up => index.checked_sub(1),
        Direction::Down => Some(index + 1).filter(|&next| next < items.len()),
    };
    let Some(neighbour) = neighbour else {
        return false;
    };

    items.swap(index, neighbour);
    items[index].set_position(index as u32);
    items[neighbour].set_position(neighbour as u32);
    true
}

/// Move the item at `source` to `destination` and renumber the whole list.
///
/// `None` (dropped outside a target), an out-of-range source or
/// `source == destination` is a no-op. A destination past the end means
/// "last".
pub fn drag_reorder<T: Orderable>(items: &mut Vec<T>, source: usize, destination: Option<usize>) -> bool {
    let Some(destination) = destination else {
        return false;
    };
    if source >= items.len() {
        return false;
    }
    let destination = destination.min(items.len() - 1);
    if source == destination {
        return false;
    }

    let item = items.remove(source);
    items.insert(destination, item);
    renumber(items);
    true
}

/// Append at the end with the next position
pub fn append<T: Orderable>(items: &mut Vec<T>, mut item: T) {
    item.set_position(items.len() as u32);
    items.push(item);
}

/// Remove the item at `index`; the rest are renumbered to stay dense
pub fn remove_at<T: Orderable>(items: &mut Vec<T>, index: usize) -> Option<T> {
    if index >= items.len() {
        return None;
    }
    let removed = items.remove(index);
    renumber(items);
    Some(removed)
}

/// `{id, position}` pairs of the current order
pub fn order_payload<T: Orderable>(items: &[T]) -> Vec<OrderEntry<T::Id>> {
    items
        .iter()
        .map(|item| OrderEntry::new(item.id(), item.position()))
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::Entity;

    /// Minimal orderable item
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) struct Row {
        pub id: u32,
        pub pos: u32,
    }

    impl Entity for Row {
        type Id = u32;

        fn id(&self) -> u32 {
            self.id
        }
    }

    impl Orderable for Row {
        fn position(&self) -> u32 {
            self.pos
        }

        fn set_position(&mut self, position: u32) {
            self.pos = position;
        }
    }

    pub(crate) fn rows(ids: &[u32]) -> Vec<Row> {
        ids.iter()
            .enumerate()
            .map(|(pos, &id)| Row { id, pos: pos as u32 })
            .collect()
    }

    fn pairs(items: &[Row]) -> Vec<(u32, u32)> {
        items.iter().map(|r| (r.id, r.pos)).collect()
    }

    #[test]
    fn test_move_up_scenario() {
        let mut items = rows(&[1, 2, 3]);
        assert!(move_item(&mut items, 1, Direction::Up));
        assert_eq!(pairs(&items), vec![(2, 0), (1, 1), (3, 2)]);
    }

    #[test]
    fn test_move_boundaries_are_noops() {
        let mut items = rows(&[1, 2, 3]);
        assert!(!move_item(&mut items, 0, Direction::Up));
        assert!(!move_item(&mut items, 2, Direction::Down));
        assert!(!move_item(&mut items, 7, Direction::Down));
        assert_eq!(items, rows(&[1, 2, 3]));

        let mut empty: Vec<Row> = Vec::new();
        assert!(!move_item(&mut empty, 0, Direction::Up));
    }

    #[test]
    fn test_move_keeps_permutation() {
        for len in 1..6u32 {
            let ids: Vec<u32> = (10..10 + len).collect();
            for index in 0..len as usize {
                for direction in [Direction::Up, Direction::Down] {
                    let mut items = rows(&ids);
                    let moved = move_item(&mut items, index, direction);

                    let sum: u32 = items.iter().map(|r| r.pos).sum();
                    assert_eq!(sum, (0..len).sum::<u32>());
                    assert!(is_dense(&items));

                    let changed = items
                        .iter()
                        .zip(rows(&ids).iter())
                        .filter(|(a, b)| a.id != b.id)
                        .count();
                    assert_eq!(changed, if moved { 2 } else { 0 });
                }
            }
        }
    }

    #[test]
    fn test_move_down() {
        let mut items = rows(&[1, 2, 3]);
        assert!(move_item(&mut items, 0, Direction::Down));
        assert_eq!(pairs(&items), vec![(2, 0), (1, 1), (3, 2)]);
    }

    #[test]
    fn test_drag_scenario() {
        let mut items = rows(&[1, 2, 3]);
        assert!(drag_reorder(&mut items, 0, Some(2)));
        assert_eq!(pairs(&items), vec![(2, 0), (3, 1), (1, 2)]);
    }

    #[test]
    fn test_drag_lands_at_destination() {
        for source in 0..5 {
            for destination in 0..5 {
                let mut items = rows(&[1, 2, 3, 4, 5]);
                let dragged = items[source].id;
                drag_reorder(&mut items, source, Some(destination));
                assert_eq!(items[destination].id, dragged);
                assert!(is_dense(&items));
            }
        }
    }

    #[test]
    fn test_drag_without_destination() {
        let mut items = rows(&[1, 2, 3]);
        assert!(!drag_reorder(&mut items, 0, None));
        assert!(!drag_reorder(&mut items, 1, Some(1)));
        assert!(!drag_reorder(&mut items, 5, Some(0)));
        assert_eq!(items, rows(&[1, 2, 3]));
    }

    #[test]
    fn test_drag_destination_clamped() {
        let mut items = rows(&[1, 2, 3]);
        assert!(drag_reorder(&mut items, 0, Some(10)));
        assert_eq!(pairs(&items), vec![(2, 0), (3, 1), (1, 2)]);
    }

    #[test]
    fn test_append_and_remove() {
        let mut items = rows(&[1, 2, 3]);
        append(&mut items, Row { id: 4, pos: 99 });
        assert_eq!(items[3].pos, 3);

        let removed = remove_at(&mut items, 1).unwrap();
        assert_eq!(removed.id, 2);
        assert_eq!(pairs(&items), vec![(1, 0), (3, 1), (4, 2)]);
        assert!(remove_at(&mut items, 3).is_none());
    }

    #[test]
    fn test_sort_is_stable() {
        let mut items = vec![
            Row { id: 1, pos: 2 },
            Row { id: 2, pos: 1 },
            Row { id: 3, pos: 1 },
        ];
        sort_by_position(&mut items);
        assert_eq!(items.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2, 3, 1]);
        assert!(!is_dense(&items));
        renumber(&mut items);
        assert!(is_dense(&items));
    }

    #[test]
    fn test_order_payload() {
        let items = rows(&[5, 6]);
        assert_eq!(order_payload(&items), vec![OrderEntry::new(5, 0), OrderEntry::new(6, 1)]);
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("UP".parse::<Direction>(), Ok(Direction::Up));
        assert!("left".parse::<Direction>().is_err());
    }
}
