//! Flex-box tree encoding of the layout.
//!
//! Reshapes the squarifier's committed row sequence into a binary recursive
//! structure a flex-box style renderer can consume directly: each node holds
//! one row and nests the remaining rows under `children`, alternating flow as
//! the remaining rectangle's orientation flips. Geometry is never re-derived
//! here; everything follows mechanically from the rows.

use serde::Serialize;

use crate::model::Entry;

use super::squarify::{squarify, Flow, Row};
use super::{normalize, Rect};

/// One tile inside a flex row: its fractional share of the row plus the
/// originating entry's label, total, and passthrough payload.
#[derive(Debug, Clone, Serialize)]
pub struct FlexItem<'a, M> {
    pub flex: f64,
    pub label: &'a str,
    pub total: f64,
    pub meta: &'a M,
    /// Nested flex tree for entries with a sub-hierarchy, laid out inside
    /// this item's own rectangle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Box<FlexNode<'a, M>>>,
}

/// One committed row and, under `children`, everything committed after it.
#[derive(Debug, Clone, Serialize)]
pub struct FlexNode<'a, M> {
    /// The row's share of the rectangle that remained when it was committed.
    pub flex: f64,
    /// Axis along which `items` are arranged.
    pub flow: Flow,
    /// Recursion depth within this row sequence, starting at 0.
    pub child_index: usize,
    pub items: Vec<FlexItem<'a, M>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Box<FlexNode<'a, M>>>,
}

/// Lay `entries` out inside a `width` x `height` container and emit the
/// flex-box tree encoding. Same algorithm and guarantees as [`super::pack`];
/// only the output shape differs. Returns `None` when nothing survives
/// filtering or the container is degenerate.
pub fn pack_flex<M>(width: f64, height: f64, entries: &[Entry<M>]) -> Option<FlexNode<'_, M>> {
    let container = Rect { x: 0.0, y: 0.0, w: width, h: height };
    if container.is_degenerate() {
        tracing::debug!("degenerate {}x{} container, emitting empty flex tree", width, height);
        return None;
    }
    emit(entries, container)
}

/// Run the pipeline for one level and fold its rows into a flex chain.
fn emit<M>(entries: &[Entry<M>], container: Rect) -> Option<FlexNode<'_, M>> {
    if container.is_degenerate() {
        return None;
    }
    let ranked = normalize(entries);
    if ranked.is_empty() {
        return None;
    }

    let total_all: f64 = ranked.iter().map(|&(_, t)| t).sum();
    let areas: Vec<f64> = ranked
        .iter()
        .map(|&(_, t)| t / total_all * container.area())
        .collect();

    let rows = squarify(&areas, container);
    chain(&rows, entries, &ranked, 0)
}

fn chain<'a, M>(
    rows: &[Row],
    entries: &'a [Entry<M>],
    ranked: &[(usize, f64)],
    child_index: usize,
) -> Option<FlexNode<'a, M>> {
    let (row, rest) = rows.split_first()?;

    let items = row
        .cells
        .iter()
        .map(|cell| {
            let (entry_idx, total) = ranked[cell.item];
            let entry = &entries[entry_idx];
            let children = if entry.children.is_empty() {
                None
            } else {
                emit(&entry.children, cell.rect).map(Box::new)
            };
            FlexItem {
                flex: cell.share,
                label: &entry.label,
                total,
                meta: &entry.meta,
                children,
            }
        })
        .collect();

    Some(FlexNode {
        flex: row.fraction,
        flow: row.flow,
        child_index,
        items,
        children: chain(rest, entries, ranked, child_index + 1).map(Box::new),
    })
}

#[cfg(test)]
mod tests {
    use super::{pack_flex, FlexNode};
    use crate::layout::squarify::Flow;
    use crate::model::Entry;

    const TOL: f64 = 1e-9;

    fn leaf(label: &str, total: f64) -> Entry {
        Entry::leaf(label, total)
    }

    #[test]
    fn empty_and_degenerate_inputs_emit_nothing() {
        let entries = [leaf("a", 1.0)];
        assert!(pack_flex(0.0, 5.0, &entries).is_none());
        let none: [Entry; 0] = [];
        assert!(pack_flex(5.0, 5.0, &none).is_none());
    }

    #[test]
    fn rows_match_the_positioned_encoding() {
        // Same 10x6 scenario as the block tests: rows [baz], [foo], [bar].
        let entries = [leaf("foo", 12.0), leaf("bar", 3.0), leaf("baz", 15.0)];
        let root = pack_flex(10.0, 6.0, &entries).expect("non-empty tree");

        assert_eq!(root.child_index, 0);
        assert_eq!(root.flow, Flow::Column);
        assert_eq!(root.items.len(), 1);
        assert_eq!(root.items[0].label, "baz");
        // baz's row takes half of the full container.
        assert!((root.flex - 0.5).abs() < TOL);

        let second = root.children.as_deref().expect("second row");
        assert_eq!(second.child_index, 1);
        assert_eq!(second.flow, Flow::Row);
        assert_eq!(second.items[0].label, "foo");
        // foo's row takes 24/30 of the remaining 5x6 rect.
        assert!((second.flex - 0.8).abs() < TOL);

        let third = second.children.as_deref().expect("third row");
        assert_eq!(third.items[0].label, "bar");
        assert!((third.flex - 1.0).abs() < TOL);
        assert!(third.children.is_none());
    }

    #[test]
    fn item_flexes_sum_to_one_per_row() {
        let entries = [
            leaf("a", 6.0),
            leaf("b", 6.0),
            leaf("c", 4.0),
            leaf("d", 3.0),
            leaf("e", 2.0),
            leaf("f", 2.0),
            leaf("g", 1.0),
        ];
        let mut node = Some(pack_flex(100.0, 100.0, &entries).expect("tree"));
        let mut rows = 0;
        let mut tiles = 0;
        while let Some(n) = node {
            let sum: f64 = n.items.iter().map(|i| i.flex).sum();
            assert!((sum - 1.0).abs() < TOL);
            tiles += n.items.len();
            rows += 1;
            node = n.children.map(|b| *b);
        }
        assert!(rows >= 2);
        assert_eq!(tiles, entries.len());
    }

    #[test]
    fn subtrees_nest_under_their_item() {
        let entries = vec![
            Entry::branch("home", vec![leaf("rent", 3.0), leaf("power", 1.0)]),
            leaf("food", 2.0),
        ];
        let root = pack_flex(12.0, 8.0, &entries).expect("tree");

        fn find<'a, M>(node: &'a FlexNode<'a, M>, label: &str) -> Option<&'a super::FlexItem<'a, M>> {
            node.items
                .iter()
                .find(|i| i.label == label)
                .or_else(|| node.children.as_deref().and_then(|c| find(c, label)))
        }

        let home = find(&root, "home").expect("home item");
        let nested = home.children.as_deref().expect("nested tree");
        let labels: Vec<&str> = nested.items.iter().map(|i| i.label).collect();
        assert!(labels.contains(&"rent") || {
            let deeper = nested.children.as_deref().expect("second nested row");
            deeper.items.iter().any(|i| i.label == "rent")
        });
        assert!(find(&root, "food").expect("food item").children.is_none());
    }
}
