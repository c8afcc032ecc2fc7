pub mod flex;
pub mod squarify;

use serde::Serialize;

use crate::model::Entry;

use self::squarify::squarify;

/// A positioned rectangle, in the root container's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    /// True when the rect cannot host any layout: zero, negative, or
    /// non-finite dimensions.
    pub(crate) fn is_degenerate(&self) -> bool {
        !(self.w > 0.0 && self.h > 0.0 && self.w.is_finite() && self.h.is_finite())
    }
}

/// One placed tile: the originating entry's label and passthrough payload,
/// its normalized total, its rectangle, and — for entries with a
/// sub-hierarchy — the nested layout computed inside that rectangle.
#[derive(Debug, Clone, Serialize)]
pub struct Block<'a, M> {
    pub label: &'a str,
    pub total: f64,
    pub rect: Rect,
    pub meta: &'a M,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block<'a, M>>,
}

/// The full layout result for one container.
#[derive(Debug, Clone, Serialize)]
pub struct Layout<'a, M> {
    pub width: f64,
    pub height: f64,
    /// Placed blocks in total-descending order.
    pub blocks: Vec<Block<'a, M>>,
}

/// Lay `entries` out inside a `width` x `height` container.
///
/// Pure and deterministic: the input is never mutated and the same input
/// always yields the same output, regardless of entry order. Block areas are
/// proportional to entry totals and sum to the container area at every
/// nesting level. Entries whose normalized total is not positive are dropped
/// at every depth. Recursion depth equals the depth of the input hierarchy.
///
/// A degenerate container (zero, negative, or non-finite dimensions) yields
/// an empty layout.
pub fn pack<M>(width: f64, height: f64, entries: &[Entry<M>]) -> Layout<'_, M> {
    let container = Rect { x: 0.0, y: 0.0, w: width, h: height };
    let blocks = if container.is_degenerate() {
        tracing::debug!("degenerate {}x{} container, emitting empty layout", width, height);
        Vec::new()
    } else {
        pack_into(entries, container)
    };
    Layout { width, height, blocks }
}

/// Normalize, allocate, squarify, and recursively embed one level.
fn pack_into<M>(entries: &[Entry<M>], container: Rect) -> Vec<Block<'_, M>> {
    if container.is_degenerate() {
        return Vec::new();
    }
    let ranked = normalize(entries);
    if ranked.is_empty() {
        return Vec::new();
    }

    let total_all: f64 = ranked.iter().map(|&(_, t)| t).sum();
    let areas: Vec<f64> = ranked
        .iter()
        .map(|&(_, t)| t / total_all * container.area())
        .collect();

    let rows = squarify(&areas, container);

    let mut blocks = Vec::with_capacity(ranked.len());
    for row in &rows {
        for cell in &row.cells {
            let (entry_idx, total) = ranked[cell.item];
            let entry = &entries[entry_idx];
            let children = if entry.children.is_empty() {
                Vec::new()
            } else {
                // Recursive embedding: the block's own rect becomes the
                // nested container.
                pack_into(&entry.children, cell.rect)
            };
            blocks.push(Block {
                label: &entry.label,
                total,
                rect: cell.rect,
                meta: &entry.meta,
                children,
            });
        }
    }
    blocks
}

/// Filter out entries with a non-positive normalized total and rank the rest
/// by total descending. Returns (index into `entries`, normalized total).
///
/// Ties are broken by label so the ranking never depends on input order;
/// entries identical in both total and label fall back to input index, which
/// is safe because such entries are geometrically interchangeable.
pub(crate) fn normalize<M>(entries: &[Entry<M>]) -> Vec<(usize, f64)> {
    let mut ranked: Vec<(usize, f64)> = entries
        .iter()
        .enumerate()
        .filter_map(|(i, e)| {
            let total = e.normalized_total();
            if total > 0.0 {
                Some((i, total))
            } else {
                tracing::debug!("dropping entry '{}' with non-positive total", e.label);
                None
            }
        })
        .collect();

    ranked.sort_by(|&(ai, at), &(bi, bt)| {
        bt.partial_cmp(&at)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| entries[ai].label.cmp(&entries[bi].label))
            .then(ai.cmp(&bi))
    });
    ranked
}
