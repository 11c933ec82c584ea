//! Lattice table detection.
//!
//! Finds tables from ruling lines: edges are snapped, joined, intersected,
//! turned into cells, and cells that touch are grouped into tables. This is
//! the pdfplumber "lines" strategy with its default tolerances.

use std::cmp::Ordering;

use crate::edges::Edge;
use crate::geometry::{BBox, Orientation};

/// Configuration for table detection.
///
/// All tolerance values default to 3.0, matching Python pdfplumber defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSettings {
    /// Snap tolerance for aligning vertical edges along x.
    pub snap_x_tolerance: f64,
    /// Snap tolerance for aligning horizontal edges along y.
    pub snap_y_tolerance: f64,
    /// Join tolerance for horizontal edges.
    pub join_x_tolerance: f64,
    /// Join tolerance for vertical edges.
    pub join_y_tolerance: f64,
    /// Minimum edge length to consider for table detection.
    pub edge_min_length: f64,
    pub intersection_x_tolerance: f64,
    pub intersection_y_tolerance: f64,
    /// Groups with fewer cells than this are not reported as tables.
    pub min_cells: usize,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            snap_x_tolerance: 3.0,
            snap_y_tolerance: 3.0,
            join_x_tolerance: 3.0,
            join_y_tolerance: 3.0,
            edge_min_length: 3.0,
            intersection_x_tolerance: 3.0,
            intersection_y_tolerance: 3.0,
            min_cells: 2,
        }
    }
}

/// A detected table cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub bbox: BBox,
}

/// A detected table.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Bounding box enclosing the entire table.
    pub bbox: BBox,
    /// Cells, top-to-bottom then left-to-right.
    pub cells: Vec<Cell>,
}

/// An axis-aligned ruling line.
///
/// `pos` is the coordinate across the line (y for horizontals, x for
/// verticals); `start..=end` is its extent along the line.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Ruling {
    pos: f64,
    start: f64,
    end: f64,
}

/// The horizontal and vertical rulings of a page.
#[derive(Debug, Default)]
struct Rulings {
    horizontal: Vec<Ruling>,
    vertical: Vec<Ruling>,
}

impl Rulings {
    /// Keep axis-aligned edges at least `min_length` long.
    fn from_edges(edges: &[Edge], min_length: f64) -> Self {
        let mut rulings = Self::default();
        for edge in edges.iter().filter(|e| e.length() >= min_length) {
            match edge.orientation {
                Orientation::Horizontal => rulings.horizontal.push(Ruling {
                    pos: edge.top,
                    start: edge.x0,
                    end: edge.x1,
                }),
                Orientation::Vertical => rulings.vertical.push(Ruling {
                    pos: edge.x0,
                    start: edge.top,
                    end: edge.bottom,
                }),
                Orientation::Diagonal => {}
            }
        }
        rulings
    }

    fn is_empty(&self) -> bool {
        self.horizontal.is_empty() && self.vertical.is_empty()
    }

    fn snap(&mut self, x_tolerance: f64, y_tolerance: f64) {
        snap_positions(&mut self.horizontal, y_tolerance);
        snap_positions(&mut self.vertical, x_tolerance);
    }

    fn join(&mut self, x_tolerance: f64, y_tolerance: f64) {
        self.horizontal = join_spans(std::mem::take(&mut self.horizontal), x_tolerance);
        self.vertical = join_spans(std::mem::take(&mut self.vertical), y_tolerance);
    }

    /// Points `(x, y)` where a vertical ruling crosses a horizontal one,
    /// each ruling widened by the tolerances. Sorted and deduplicated.
    fn crossings(&self, x_tolerance: f64, y_tolerance: f64) -> Vec<(f64, f64)> {
        let mut points = Vec::new();
        for v in &self.vertical {
            for h in &self.horizontal {
                let x_hit = (h.start - x_tolerance..=h.end + x_tolerance).contains(&v.pos);
                let y_hit = (v.start - y_tolerance..=v.end + y_tolerance).contains(&h.pos);
                if x_hit && y_hit {
                    points.push((v.pos, h.pos));
                }
            }
        }
        points.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
        points.dedup();
        points
    }
}

/// Move clusters of nearby parallel rulings onto their mean position.
///
/// A cluster grows while each ruling is within `tolerance` of the previous
/// one, so positions can drift further than `tolerance` in total.
fn snap_positions(rulings: &mut [Ruling], tolerance: f64) {
    rulings.sort_by(|a, b| a.pos.total_cmp(&b.pos));
    for cluster in rulings.chunk_by_mut(|a, b| b.pos - a.pos <= tolerance) {
        let mean = cluster.iter().map(|r| r.pos).sum::<f64>() / cluster.len() as f64;
        for ruling in cluster {
            ruling.pos = mean;
        }
    }
}

/// Merge collinear rulings whose gap is at most `tolerance`.
fn join_spans(mut rulings: Vec<Ruling>, tolerance: f64) -> Vec<Ruling> {
    rulings.sort_by(|a, b| a.pos.total_cmp(&b.pos).then(a.start.total_cmp(&b.start)));

    let mut joined: Vec<Ruling> = Vec::with_capacity(rulings.len());
    for ruling in rulings {
        match joined.last_mut() {
            // Snapped rulings share the exact same position
            Some(last) if last.pos == ruling.pos && ruling.start <= last.end + tolerance => {
                last.end = last.end.max(ruling.end);
            }
            _ => joined.push(ruling),
        }
    }
    joined
}

/// Cells of the crossing grid: every rectangle between neighbouring
/// distinct x and y positions whose four corners are all crossings.
fn grid_cells(points: &[(f64, f64)]) -> Vec<Cell> {
    let has_point = |x: f64, y: f64| {
        points
            .binary_search_by(|p| p.0.total_cmp(&x).then(p.1.total_cmp(&y)))
            .is_ok()
    };

    let mut xs: Vec<f64> = points.iter().map(|p| p.0).collect();
    let mut ys: Vec<f64> = points.iter().map(|p| p.1).collect();
    xs.dedup();
    ys.sort_by(f64::total_cmp);
    ys.dedup();

    let mut cells = Vec::new();
    for rows in ys.windows(2) {
        for cols in xs.windows(2) {
            let bbox = BBox::new(cols[0], rows[0], cols[1], rows[1]);
            if corners(&bbox).iter().all(|&(x, y)| has_point(x, y)) {
                cells.push(Cell { bbox });
            }
        }
    }
    cells
}

fn corners(bbox: &BBox) -> [(f64, f64); 4] {
    [
        (bbox.x0, bbox.top),
        (bbox.x1, bbox.top),
        (bbox.x0, bbox.bottom),
        (bbox.x1, bbox.bottom),
    ]
}

fn share_corner(a: &BBox, b: &BBox) -> bool {
    let theirs = corners(b);
    corners(a).iter().any(|ours| theirs.contains(ours))
}

fn reading_order(a: &BBox, b: &BBox) -> Ordering {
    a.top.total_cmp(&b.top).then(a.x0.total_cmp(&b.x0))
}

/// Flood-fill cells that share a corner into tables.
///
/// Groups with fewer than `min_cells` cells are dropped. Tables and the
/// cells inside them come back in reading order.
fn group_cells(cells: &[Cell], min_cells: usize) -> Vec<Table> {
    let mut seen = vec![false; cells.len()];
    let mut tables = Vec::new();

    for first in 0..cells.len() {
        if seen[first] {
            continue;
        }
        seen[first] = true;
        let mut members = vec![first];
        let mut cursor = 0;
        while let Some(&current) = members.get(cursor) {
            cursor += 1;
            for (i, cell) in cells.iter().enumerate() {
                if !seen[i] && share_corner(&cells[current].bbox, &cell.bbox) {
                    seen[i] = true;
                    members.push(i);
                }
            }
        }
        if members.len() < min_cells.max(1) {
            continue;
        }

        let mut group: Vec<Cell> = members.into_iter().map(|i| cells[i].clone()).collect();
        group.sort_by(|a, b| reading_order(&a.bbox, &b.bbox));
        let bbox = group[1..]
            .iter()
            .fold(group[0].bbox, |acc, cell| acc.union(&cell.bbox));
        tables.push(Table { bbox, cells: group });
    }

    tables.sort_by(|a, b| reading_order(&a.bbox, &b.bbox));
    tables
}

/// Orchestrator for the table detection pipeline.
pub struct TableFinder {
    edges: Vec<Edge>,
    settings: TableSettings,
}

impl TableFinder {
    pub fn new(edges: Vec<Edge>, settings: TableSettings) -> Self {
        Self { edges, settings }
    }

    pub fn settings(&self) -> &TableSettings {
        &self.settings
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Run the pipeline: filter → snap → join → crossings → cells → tables.
    pub fn find_tables(&self) -> Vec<Table> {
        let s = &self.settings;
        let mut rulings = Rulings::from_edges(&self.edges, s.edge_min_length);
        if rulings.is_empty() {
            return Vec::new();
        }
        rulings.snap(s.snap_x_tolerance, s.snap_y_tolerance);
        rulings.join(s.join_x_tolerance, s.join_y_tolerance);

        let points = rulings.crossings(s.intersection_x_tolerance, s.intersection_y_tolerance);
        group_cells(&grid_cells(&points), s.min_cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::EdgeSource;

    fn hedge(x0: f64, y: f64, x1: f64) -> Edge {
        Edge {
            x0,
            top: y,
            x1,
            bottom: y,
            orientation: Orientation::Horizontal,
            source: EdgeSource::Line,
        }
    }

    fn vedge(x: f64, top: f64, bottom: f64) -> Edge {
        Edge {
            x0: x,
            top,
            x1: x,
            bottom,
            orientation: Orientation::Vertical,
            source: EdgeSource::Line,
        }
    }

    /// Ruling of a `cols` x `rows` grid starting at (x, y) with square cells.
    fn grid(x: f64, y: f64, cols: usize, rows: usize, size: f64) -> Vec<Edge> {
        let width = cols as f64 * size;
        let height = rows as f64 * size;
        let mut edges = Vec::new();
        for r in 0..=rows {
            edges.push(hedge(x, y + r as f64 * size, x + width));
        }
        for c in 0..=cols {
            edges.push(vedge(x + c as f64 * size, y, y + height));
        }
        edges
    }

    #[test]
    fn test_table_settings_default_values() {
        let settings = TableSettings::default();
        assert_eq!(settings.snap_x_tolerance, 3.0);
        assert_eq!(settings.snap_y_tolerance, 3.0);
        assert_eq!(settings.join_x_tolerance, 3.0);
        assert_eq!(settings.join_y_tolerance, 3.0);
        assert_eq!(settings.edge_min_length, 3.0);
        assert_eq!(settings.intersection_x_tolerance, 3.0);
        assert_eq!(settings.intersection_y_tolerance, 3.0);
        assert_eq!(settings.min_cells, 2);
    }

    fn ruling(pos: f64, start: f64, end: f64) -> Ruling {
        Ruling { pos, start, end }
    }

    #[test]
    fn snap_moves_close_rulings_to_their_mean() {
        let mut rulings = vec![ruling(100.0, 0.0, 50.0), ruling(102.0, 60.0, 120.0)];
        snap_positions(&mut rulings, 3.0);
        assert!(rulings.iter().all(|r| r.pos == 101.0));
    }

    #[test]
    fn snap_keeps_distant_rulings_apart() {
        let mut rulings = vec![ruling(20.0, 0.0, 50.0), ruling(10.0, 0.0, 50.0)];
        snap_positions(&mut rulings, 3.0);
        let positions: Vec<f64> = rulings.iter().map(|r| r.pos).collect();
        assert_eq!(positions, vec![10.0, 20.0]);
    }

    #[test]
    fn join_merges_gap_within_tolerance() {
        let joined = join_spans(vec![ruling(10.0, 52.0, 100.0), ruling(10.0, 0.0, 50.0)], 3.0);
        assert_eq!(joined, vec![ruling(10.0, 0.0, 100.0)]);
    }

    #[test]
    fn join_keeps_large_gap_and_other_lines() {
        let joined = join_spans(
            vec![
                ruling(10.0, 0.0, 20.0),
                ruling(10.0, 40.0, 60.0),
                ruling(30.0, 0.0, 20.0),
            ],
            3.0,
        );
        assert_eq!(joined.len(), 3);
    }

    #[test]
    fn crossing_of_two_rulings() {
        let rulings = Rulings::from_edges(
            &[hedge(0.0, 50.0, 100.0), vedge(50.0, 0.0, 100.0)],
            3.0,
        );
        assert_eq!(rulings.crossings(3.0, 3.0), vec![(50.0, 50.0)]);
    }

    #[test]
    fn crossing_requires_overlap() {
        let rulings =
            Rulings::from_edges(&[hedge(0.0, 50.0, 40.0), vedge(50.0, 0.0, 100.0)], 3.0);
        assert!(rulings.crossings(3.0, 3.0).is_empty());
    }

    #[test]
    fn cell_needs_all_four_corners() {
        assert!(grid_cells(&[(0.0, 0.0), (0.0, 10.0), (10.0, 0.0)]).is_empty());
        let cells = grid_cells(&[(0.0, 0.0), (0.0, 10.0), (10.0, 0.0), (10.0, 10.0)]);
        assert_eq!(cells, vec![Cell { bbox: BBox::new(0.0, 0.0, 10.0, 10.0) }]);
    }

    #[test]
    fn cells_touching_only_at_a_corner_form_one_table() {
        let cells = vec![
            Cell { bbox: BBox::new(0.0, 0.0, 10.0, 10.0) },
            Cell { bbox: BBox::new(10.0, 10.0, 20.0, 20.0) },
            Cell { bbox: BBox::new(50.0, 50.0, 60.0, 60.0) },
        ];
        let tables = group_cells(&cells, 2);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].bbox, BBox::new(0.0, 0.0, 20.0, 20.0));
    }

    #[test]
    fn test_find_tables_two_by_two_grid() {
        let finder = TableFinder::new(grid(100.0, 92.0, 2, 2, 20.0), TableSettings::default());
        let tables = finder.find_tables();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].cells.len(), 4);
        assert_eq!(tables[0].bbox, BBox::new(100.0, 92.0, 140.0, 132.0));
    }

    #[test]
    fn test_find_tables_single_cell_box_is_not_a_table() {
        let finder = TableFinder::new(grid(10.0, 10.0, 1, 1, 50.0), TableSettings::default());
        assert!(finder.find_tables().is_empty());
    }

    #[test]
    fn test_find_tables_single_cell_allowed_when_min_cells_is_one() {
        let settings = TableSettings {
            min_cells: 1,
            ..TableSettings::default()
        };
        let finder = TableFinder::new(grid(10.0, 10.0, 1, 1, 50.0), settings);
        assert_eq!(finder.find_tables().len(), 1);
    }

    #[test]
    fn test_find_tables_sorted_top_to_bottom() {
        let mut edges = grid(50.0, 400.0, 2, 1, 30.0);
        edges.extend(grid(300.0, 100.0, 3, 2, 20.0));
        let tables = TableFinder::new(edges, TableSettings::default()).find_tables();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].bbox.top, 100.0);
        assert_eq!(tables[0].cells.len(), 6);
        assert_eq!(tables[1].bbox.top, 400.0);
    }

    #[test]
    fn test_find_tables_ignores_short_and_diagonal_edges() {
        let mut edges = vec![hedge(0.0, 0.0, 2.0), vedge(1.0, 0.0, 2.0)];
        edges.push(Edge {
            x0: 0.0,
            top: 0.0,
            x1: 100.0,
            bottom: 100.0,
            orientation: Orientation::Diagonal,
            source: EdgeSource::Curve,
        });
        let finder = TableFinder::new(edges, TableSettings::default());
        assert!(finder.find_tables().is_empty());
    }

    #[test]
    fn test_find_tables_tolerates_slightly_misaligned_ruling() {
        // Lines that miss the grid by up to 2pt still form a 2x1 table
        let edges = vec![
            hedge(0.0, 0.0, 100.0),
            hedge(1.0, 51.5, 99.0),
            vedge(0.0, 0.0, 50.0),
            vedge(51.0, 1.0, 50.0),
            vedge(100.0, 0.0, 51.0),
        ];
        let tables = TableFinder::new(edges, TableSettings::default()).find_tables();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].cells.len(), 2);
    }

    #[test]
    fn test_cells_in_reading_order() {
        let tables =
            TableFinder::new(grid(0.0, 0.0, 2, 2, 10.0), TableSettings::default()).find_tables();
        let tops: Vec<(f64, f64)> = tables[0]
            .cells
            .iter()
            .map(|c| (c.bbox.top, c.bbox.x0))
            .collect();
        assert_eq!(tops, vec![(0.0, 0.0), (0.0, 10.0), (10.0, 0.0), (10.0, 10.0)]);
    }
}
