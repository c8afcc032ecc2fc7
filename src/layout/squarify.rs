use serde::Serialize;

use super::Rect;

/// Axis along which a committed row's members are laid out.
///
/// A landscape remainder is consumed by a vertical strip whose members stack
/// downward (`Column`); a portrait or square remainder by a horizontal strip
/// whose members run rightward (`Row`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    Row,
    Column,
}

/// One member of a committed row.
#[derive(Debug, Clone, Copy)]
pub struct Cell {
    /// Index into the area slice passed to `squarify`.
    pub item: usize,
    /// The member's rectangle, in the same coordinate space as the container.
    pub rect: Rect,
    /// The member's share of the row's total area.
    pub share: f64,
}

/// A committed row: a contiguous run of items laid out together along one
/// axis of the then-remaining rectangle.
#[derive(Debug, Clone)]
pub struct Row {
    pub flow: Flow,
    /// The strip this row occupies.
    pub rect: Rect,
    /// The row's share of the area of the rectangle that remained when it
    /// was committed.
    pub fraction: f64,
    pub cells: Vec<Cell>,
}

/// Squarified treemap layout (Bruls, Huizing, van Wijk).
///
/// `areas` must be positive, sorted descending, and sum (up to rounding) to
/// the area of `container`. Returns the committed rows in placement order.
pub fn squarify(areas: &[f64], container: Rect) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut remaining = container;
    let mut start = 0;

    while start < areas.len() {
        if !(remaining.w > 0.0 && remaining.h > 0.0) {
            break;
        }

        // Grow the pending row while appending the next item does not make
        // its worst aspect ratio worse.
        let mut end = start + 1;
        let mut row_sum = areas[start];
        let mut best = worst(&areas[start..end], row_sum, remaining);
        while end < areas.len() {
            let next_sum = row_sum + areas[end];
            let next = worst(&areas[start..end + 1], next_sum, remaining);
            if next > best {
                break;
            }
            row_sum = next_sum;
            best = next;
            end += 1;
        }

        let (row, rest) = commit(&areas[start..end], start, row_sum, remaining);
        rows.push(row);
        remaining = rest;
        start = end;
    }

    rows
}

/// Worst aspect ratio over `row` if it were laid out as a strip against the
/// shorter side of `rect`. An empty row rates infinitely bad so the first
/// candidate always joins.
fn worst(row: &[f64], row_sum: f64, rect: Rect) -> f64 {
    if row.is_empty() || row_sum <= 0.0 {
        return f64::INFINITY;
    }
    let short = rect.w.min(rect.h);
    if short <= 0.0 {
        return f64::INFINITY;
    }
    let thickness = row_sum / short;
    let t2 = thickness * thickness;
    row.iter()
        .fold(0.0f64, |acc, &a| acc.max((t2 / a).max(a / t2)))
}

/// Lay `row` out across the shorter side of `rect` and shrink `rect` along
/// its long axis by the row's thickness. Each member's length along the strip
/// is proportional to its area within the row, so member areas are exact.
fn commit(row: &[f64], first: usize, row_sum: f64, rect: Rect) -> (Row, Rect) {
    let fraction = row_sum / (rect.w * rect.h);
    let mut cells = Vec::with_capacity(row.len());

    if rect.w > rect.h {
        // Vertical strip against the left edge, members stacking downward.
        let thickness = row_sum / rect.h;
        let mut y = rect.y;
        for (i, &area) in row.iter().enumerate() {
            let share = area / row_sum;
            let h = rect.h * share;
            cells.push(Cell {
                item: first + i,
                rect: Rect { x: rect.x, y, w: thickness, h },
                share,
            });
            y += h;
        }
        let strip = Rect { x: rect.x, y: rect.y, w: thickness, h: rect.h };
        let rest = Rect {
            x: rect.x + thickness,
            y: rect.y,
            w: rect.w - thickness,
            h: rect.h,
        };
        (Row { flow: Flow::Column, rect: strip, fraction, cells }, rest)
    } else {
        // Horizontal strip against the top edge, members running rightward.
        let thickness = row_sum / rect.w;
        let mut x = rect.x;
        for (i, &area) in row.iter().enumerate() {
            let share = area / row_sum;
            let w = rect.w * share;
            cells.push(Cell {
                item: first + i,
                rect: Rect { x, y: rect.y, w, h: thickness },
                share,
            });
            x += w;
        }
        let strip = Rect { x: rect.x, y: rect.y, w: rect.w, h: thickness };
        let rest = Rect {
            x: rect.x,
            y: rect.y + thickness,
            w: rect.w,
            h: rect.h - thickness,
        };
        (Row { flow: Flow::Row, rect: strip, fraction, cells }, rest)
    }
}

#[cfg(test)]
mod tests {
    use super::{squarify, Flow, Rect};

    fn container(w: f64, h: f64) -> Rect {
        Rect { x: 0.0, y: 0.0, w, h }
    }

    #[test]
    fn single_item_fills_container_without_axis_swap() {
        let rows = squarify(&[1920.0 * 1080.0], container(1920.0, 1080.0));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cells.len(), 1);
        let r = rows[0].cells[0].rect;
        assert!((r.w - 1920.0).abs() < 1e-9);
        assert!((r.h - 1080.0).abs() < 1e-9);
    }

    #[test]
    fn layout_preserves_area_for_simple_case() {
        let areas = [400.0, 300.0, 200.0, 100.0];
        let rows = squarify(&areas, container(50.0, 20.0));
        let total_in: f64 = areas.iter().sum();
        let total_out: f64 = rows
            .iter()
            .flat_map(|row| row.cells.iter())
            .map(|c| c.rect.w * c.rect.h)
            .sum();
        assert!((total_in - total_out).abs() < 1e-9);
    }

    #[test]
    fn each_cell_area_matches_its_input_area() {
        let areas = [48.0, 24.0, 16.0, 8.0, 4.0];
        let rows = squarify(&areas, container(10.0, 10.0));
        let mut seen = 0;
        for row in &rows {
            for cell in &row.cells {
                let got = cell.rect.w * cell.rect.h;
                assert!(
                    (got - areas[cell.item]).abs() < 1e-9,
                    "cell {} area {} != {}",
                    cell.item,
                    got,
                    areas[cell.item]
                );
                seen += 1;
            }
        }
        assert_eq!(seen, areas.len());
    }

    #[test]
    fn flow_matches_remaining_orientation() {
        // 10x6 landscape: first row is a vertical strip (Column flow).
        let rows = squarify(&[30.0, 24.0, 6.0], container(10.0, 6.0));
        assert_eq!(rows[0].flow, Flow::Column);
        // After the 5-wide strip the remainder is 5x6 portrait: Row flow.
        assert_eq!(rows[1].flow, Flow::Row);
    }

    #[test]
    fn row_fractions_cover_their_remainders() {
        let areas = [40.0, 30.0, 20.0, 10.0];
        let rows = squarify(&areas, container(10.0, 10.0));
        // Each fraction is relative to the then-remaining rect, so the last
        // committed row always covers what is left of it.
        assert!((rows.last().unwrap().fraction - 1.0).abs() < 1e-9);
        for row in &rows {
            assert!(row.fraction > 0.0 && row.fraction <= 1.0 + 1e-9);
            let shares: f64 = row.cells.iter().map(|c| c.share).sum();
            assert!((shares - 1.0).abs() < 1e-9);
        }
    }
}
