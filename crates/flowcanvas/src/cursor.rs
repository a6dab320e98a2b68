//! Keyboard focus navigation over rendered elements.
//!
//! The registry of [`SelectorElement`]s belongs to the rendering layer and is
//! passed in with every query. [`find_next`] picks the nearest element in a
//! direction; [`CursorTracker`] adds tab-order stepping on top of it.

use std::cmp::Ordering;

use log::trace;
use serde::Deserialize;

use flowcanvas_core::{geometry::BoundRect, selection::SelectorElement};

use crate::index::NodeItem;

/// An arrow-key direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Whether the move runs along the horizontal axis.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// For a candidate strictly in this direction from `current`, returns
    /// `(misalignment, distance)`: the offset between centers across the
    /// movement axis and the gap along it. Returns `None` for any other
    /// candidate.
    fn rank(self, current: BoundRect, candidate: BoundRect) -> Option<(f32, f32)> {
        let distance = match self {
            Self::Right if candidate.left() >= current.right() => {
                candidate.left() - current.right()
            }
            Self::Left if candidate.right() <= current.left() => {
                current.left() - candidate.right()
            }
            Self::Down if candidate.top() >= current.bottom() => {
                candidate.top() - current.bottom()
            }
            Self::Up if candidate.bottom() <= current.top() => current.top() - candidate.bottom(),
            _ => return None,
        };

        let misalignment = if self.is_horizontal() {
            (candidate.center_y() - current.center_y()).abs()
        } else {
            (candidate.center_x() - current.center_x()).abs()
        };

        Some((misalignment, distance))
    }
}

/// Finds the element focus should move to from `current_id` in `direction`.
///
/// Candidates are all other elements lying entirely past the current element
/// in that direction. The winner is the candidate best aligned with the
/// current element, then the nearest; ties keep registry order.
///
/// Returns `None` when `current_id` is not registered or nothing qualifies.
pub fn find_next<'e>(
    current_id: &str,
    direction: Direction,
    elements: &'e [SelectorElement],
) -> Option<&'e str> {
    find_next_where(current_id, direction, elements, |_, _| true)
}

/// [`find_next`] over the candidates accepted by `keep(current, candidate)`.
fn find_next_where<'e>(
    current_id: &str,
    direction: Direction,
    elements: &'e [SelectorElement],
    keep: impl Fn(&SelectorElement, &SelectorElement) -> bool,
) -> Option<&'e str> {
    let current = elements.iter().find(|element| element.id() == current_id)?;

    let next = elements
        .iter()
        .filter(|element| element.id() != current_id && keep(current, *element))
        .filter_map(|element| {
            direction
                .rank(current.rect(), element.rect())
                .map(|rank| (element, rank))
        })
        .min_by(|(_, a), (_, b)| compare_rank(*a, *b))
        .map(|(element, _)| element.id());

    trace!(current = current_id, direction:?, next:?; "Directional move");
    next
}

fn compare_rank(a: (f32, f32), b: (f32, f32)) -> Ordering {
    a.0.total_cmp(&b.0).then_with(|| a.1.total_cmp(&b.1))
}

/// The inclusive run of ids between `start` and `end` in `ordered`.
///
/// The endpoints may be given in either order. Returns an empty list when
/// either id is missing from `ordered`.
pub fn range_selection<'a, S: AsRef<str>>(
    start: &str,
    end: &str,
    ordered: &'a [S],
) -> Vec<&'a str> {
    let position = |id: &str| ordered.iter().position(|item| item.as_ref() == id);

    let (Some(start), Some(end)) = (position(start), position(end)) else {
        return Vec::new();
    };
    let (from, to) = if start <= end { (start, end) } else { (end, start) };

    ordered[from..=to].iter().map(|item| item.as_ref()).collect()
}

/// A focus movement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    /// Arrow-key move.
    Move(Direction),
    /// Tab.
    Next,
    /// Shift-Tab.
    Previous,
}

/// Moves focus over one snapshot of the rendered elements.
#[derive(Debug, Clone)]
pub struct CursorTracker<'e> {
    elements: &'e [SelectorElement],
    tab_order: Vec<&'e str>,
    tab_fallback: bool,
    group_tags: bool,
}

impl<'e> CursorTracker<'e> {
    /// Creates a tracker over `elements` with an empty tab order.
    pub fn new(elements: &'e [SelectorElement]) -> Self {
        Self {
            elements,
            tab_order: Vec::new(),
            tab_fallback: false,
            group_tags: false,
        }
    }

    /// Sets the tab order from a generator's item list.
    ///
    /// Items without a registered element are dropped.
    pub fn with_tab_order(mut self, items: &[NodeItem]) -> Self {
        let mut items: Vec<&NodeItem> = items.iter().collect();
        items.sort_by_key(|item| item.index());

        let elements = self.elements;
        self.tab_order = items
            .into_iter()
            .filter_map(|item| {
                elements
                    .iter()
                    .find(|element| element.id() == item.id())
                    .map(SelectorElement::id)
            })
            .collect();
        self
    }

    /// Lets arrow keys fall back to the tab order when nothing lies in their direction.
    pub fn with_tab_fallback(mut self, enabled: bool) -> Self {
        self.tab_fallback = enabled;
        self
    }

    /// Treats elements sharing a tag as one node for arrow keys.
    ///
    /// A directional move then never lands on another part of the node it
    /// starts from, such as the choice diamond under its condition box.
    pub fn with_tag_grouping(mut self, enabled: bool) -> Self {
        self.group_tags = enabled;
        self
    }

    /// Ids in tab order.
    pub fn tab_order(&self) -> &[&'e str] {
        &self.tab_order
    }

    /// Returns the id focus moves to from `current`, or `None` for no move.
    pub fn move_focus(&self, current: &str, command: Command) -> Option<&'e str> {
        match command {
            Command::Move(direction) => self.find_spatial(current, direction).or_else(|| {
                if !self.tab_fallback {
                    return None;
                }
                match direction {
                    Direction::Down | Direction::Right => self.step(current, true),
                    Direction::Up | Direction::Left => self.step(current, false),
                }
            }),
            Command::Next => self.step(current, true),
            Command::Previous => self.step(current, false),
        }
    }

    fn find_spatial(&self, current: &str, direction: Direction) -> Option<&'e str> {
        if self.group_tags {
            find_next_where(current, direction, self.elements, |from, candidate| {
                !candidate.shares_tag_with(from)
            })
        } else {
            find_next(current, direction, self.elements)
        }
    }

    /// Neighbour of `current` in tab order, wrapping at both ends.
    fn step(&self, current: &str, forward: bool) -> Option<&'e str> {
        let position = self.tab_order.iter().position(|id| *id == current)?;
        let len = self.tab_order.len();
        let next = if forward {
            (position + 1) % len
        } else {
            (position + len - 1) % len
        };
        self.tab_order.get(next).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::NodeIndexGenerator;

    fn element(id: &str, top: f32, left: f32, bottom: f32, right: f32) -> SelectorElement {
        SelectorElement::new(id, BoundRect::new(top, left, bottom, right))
    }

    /// ```text
    ///        [a]
    ///  [b]   [c]   [d]
    ///        [e]
    /// ```
    fn grid() -> Vec<SelectorElement> {
        vec![
            element("a", 0.0, 100.0, 50.0, 200.0),
            element("b", 100.0, 0.0, 150.0, 60.0),
            element("c", 100.0, 100.0, 150.0, 200.0),
            element("d", 100.0, 240.0, 150.0, 340.0),
            element("e", 200.0, 100.0, 250.0, 200.0),
        ]
    }

    #[test]
    fn test_find_next_in_each_direction() {
        let elements = grid();
        assert_eq!(find_next("c", Direction::Up, &elements), Some("a"));
        assert_eq!(find_next("c", Direction::Down, &elements), Some("e"));
        assert_eq!(find_next("c", Direction::Left, &elements), Some("b"));
        assert_eq!(find_next("c", Direction::Right, &elements), Some("d"));
    }

    #[test]
    fn test_find_next_without_candidates() {
        let elements = grid();
        assert_eq!(find_next("a", Direction::Up, &elements), None);
        assert_eq!(find_next("d", Direction::Right, &elements), None);
    }

    #[test]
    fn test_find_next_unknown_current() {
        assert_eq!(find_next("missing", Direction::Down, &grid()), None);
        assert_eq!(find_next("a", Direction::Down, &[]), None);
    }

    #[test]
    fn test_alignment_beats_distance() {
        let elements = vec![
            element("cur", 0.0, 0.0, 50.0, 100.0),
            // Close but far off to the side.
            element("near", 60.0, 300.0, 110.0, 400.0),
            // Farther but straight below.
            element("aligned", 400.0, 0.0, 450.0, 100.0),
        ];
        assert_eq!(find_next("cur", Direction::Down, &elements), Some("aligned"));
    }

    #[test]
    fn test_distance_breaks_alignment_ties() {
        let elements = vec![
            element("cur", 0.0, 0.0, 50.0, 100.0),
            element("far", 300.0, 0.0, 350.0, 100.0),
            element("near", 100.0, 0.0, 150.0, 100.0),
        ];
        assert_eq!(find_next("cur", Direction::Down, &elements), Some("near"));
    }

    #[test]
    fn test_full_ties_keep_registry_order() {
        let elements = vec![
            element("cur", 0.0, 100.0, 50.0, 200.0),
            element("left", 100.0, 0.0, 150.0, 100.0),
            element("right", 100.0, 200.0, 150.0, 300.0),
        ];
        assert_eq!(find_next("cur", Direction::Down, &elements), Some("left"));
    }

    #[test]
    fn test_overlapping_elements_are_not_candidates() {
        let elements = vec![
            element("cur", 0.0, 0.0, 50.0, 100.0),
            element("overlap", 40.0, 0.0, 90.0, 100.0),
        ];
        assert_eq!(find_next("cur", Direction::Down, &elements), None);
    }

    /// A condition box, its choice diamond and a branch below them.
    fn tagged_conditional() -> Vec<SelectorElement> {
        vec![
            element("cond", 0.0, 0.0, 50.0, 180.0).with_tag_id("cond"),
            element("cond.condition", 70.0, 65.0, 90.0, 115.0).with_tag_id("cond"),
            element("branch", 120.0, 0.0, 170.0, 180.0),
        ]
    }

    #[test]
    fn test_find_next_ignores_tags() {
        let elements = tagged_conditional();
        assert_eq!(
            find_next("cond", Direction::Down, &elements),
            Some("cond.condition")
        );
        assert_eq!(
            find_next("branch", Direction::Up, &elements),
            Some("cond.condition")
        );
    }

    #[test]
    fn test_tag_grouping_skips_same_node() {
        let elements = tagged_conditional();

        let plain = CursorTracker::new(&elements);
        assert_eq!(
            plain.move_focus("cond", Command::Move(Direction::Down)),
            Some("cond.condition")
        );

        let grouped = CursorTracker::new(&elements).with_tag_grouping(true);
        assert_eq!(
            grouped.move_focus("cond", Command::Move(Direction::Down)),
            Some("branch")
        );
        assert_eq!(
            grouped.move_focus("cond.condition", Command::Move(Direction::Up)),
            None
        );
        // Elements of other nodes are still reachable.
        assert_eq!(
            grouped.move_focus("branch", Command::Move(Direction::Up)),
            Some("cond.condition")
        );
    }

    #[test]
    fn test_range_selection_is_symmetric() {
        let ordered = ["a", "b", "c", "d"];
        assert_eq!(range_selection("b", "d", &ordered), vec!["b", "c", "d"]);
        assert_eq!(range_selection("d", "b", &ordered), vec!["b", "c", "d"]);
        assert_eq!(range_selection("c", "c", &ordered), vec!["c"]);
    }

    #[test]
    fn test_range_selection_missing_endpoint() {
        let ordered = vec!["a".to_string(), "b".to_string()];
        assert!(range_selection("a", "z", &ordered).is_empty());
        assert!(range_selection("z", "a", &ordered).is_empty());
    }

    fn tracker_items(ids: &[&str]) -> Vec<NodeItem> {
        let mut generator = NodeIndexGenerator::default();
        for id in ids {
            generator.get_node_index(id);
        }
        generator.item_list()
    }

    #[test]
    fn test_tab_navigation_wraps() {
        let elements = grid();
        let items = tracker_items(&["a", "b", "c", "d", "e"]);
        let tracker = CursorTracker::new(&elements).with_tab_order(&items);

        assert_eq!(tracker.move_focus("a", Command::Next), Some("b"));
        assert_eq!(tracker.move_focus("e", Command::Next), Some("a"));
        assert_eq!(tracker.move_focus("a", Command::Previous), Some("e"));
        assert_eq!(tracker.move_focus("missing", Command::Next), None);
    }

    #[test]
    fn test_tab_order_skips_unregistered_ids() {
        let elements = grid();
        let items = tracker_items(&["a", "gone", "c"]);
        let tracker = CursorTracker::new(&elements).with_tab_order(&items);

        assert_eq!(tracker.tab_order(), &["a", "c"]);
        assert_eq!(tracker.move_focus("a", Command::Next), Some("c"));
    }

    #[test]
    fn test_directional_fallback() {
        let elements = grid();
        let items = tracker_items(&["a", "b", "c", "d", "e"]);

        let strict = CursorTracker::new(&elements).with_tab_order(&items);
        assert_eq!(strict.move_focus("d", Command::Move(Direction::Right)), None);

        let lenient = strict.clone().with_tab_fallback(true);
        assert_eq!(
            lenient.move_focus("d", Command::Move(Direction::Right)),
            Some("e")
        );
        assert_eq!(
            lenient.move_focus("a", Command::Move(Direction::Up)),
            Some("e")
        );
        // A spatial winner always takes precedence.
        assert_eq!(
            lenient.move_focus("c", Command::Move(Direction::Right)),
            Some("d")
        );
    }

    #[test]
    fn test_empty_tab_order() {
        let elements = grid();
        let tracker = CursorTracker::new(&elements).with_tab_fallback(true);
        assert_eq!(tracker.move_focus("a", Command::Next), None);
        assert_eq!(tracker.move_focus("a", Command::Move(Direction::Up)), None);
    }
}
