//! Obstacle grid and A* cost provider.
//!
//! # Algorithm
//!
//! Each node is snapped to the grid cell nearest its coordinates. A* then
//! searches the free cells with a move set and step price chosen by the
//! [`Metric`]:
//!
//! ```text
//! Manhattan  4 moves, step 1                  h = dx + dy
//! Euclidean  8 moves, step 1 or √2            h = max + (√2 - 1)·min
//! Chebyshev  8 moves, step 1                  h = max(dx, dy)
//! ```
//!
//! Diagonal moves never squeeze between two blocked orthogonal cells.
//!
//! # Reference
//!
//! Hart, P.E., Nilsson, N.J. & Raphael, B. (1968). "A Formal Basis for the
//! Heuristic Determination of Minimum Cost Paths", *IEEE Transactions on
//! Systems Science and Cybernetics* 4(2), 100-107.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::{DistanceProvider, Leg, Metric};
use crate::models::Node;

/// A rectangular floorplan of free and blocked cells.
///
/// # Examples
///
/// ```
/// use u_tour::distance::ObstacleGrid;
///
/// let grid = ObstacleGrid::from_rows(&[
///     "...",
///     ".#.",
///     "...",
/// ]).unwrap();
/// assert_eq!((grid.width(), grid.height()), (3, 3));
/// assert!(grid.is_blocked(1, 1));
/// assert!(!grid.is_blocked(0, 1));
/// ```
#[derive(Debug, Clone)]
pub struct ObstacleGrid {
    width: usize,
    height: usize,
    blocked: Vec<bool>,
}

impl ObstacleGrid {
    /// Creates an obstacle-free grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            blocked: vec![false; width * height],
        }
    }

    /// Parses rows of text, `#` marking a blocked cell. Row `y` of the grid
    /// is `rows[y]`.
    ///
    /// Returns `None` if rows differ in length.
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let width = rows.first().map_or(0, |r| r.chars().count());
        let mut grid = Self::new(width, rows.len());
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return None;
            }
            for (x, ch) in row.chars().enumerate() {
                if ch == '#' {
                    grid.block(x, y);
                }
            }
        }
        Some(grid)
    }

    /// Marks a cell as blocked. Out-of-range cells are ignored.
    pub fn block(&mut self, x: usize, y: usize) {
        if x < self.width && y < self.height {
            self.blocked[y * self.width + x] = true;
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `true` for blocked or out-of-range cells.
    pub fn is_blocked(&self, x: usize, y: usize) -> bool {
        x >= self.width || y >= self.height || self.blocked[y * self.width + x]
    }

    /// Snaps a node to its nearest cell, if that cell lies on the grid.
    pub fn cell_of(&self, node: &Node) -> Option<(usize, usize)> {
        let x = node.x().round();
        let y = node.y().round();
        if !x.is_finite() || !y.is_finite() || x < 0.0 || y < 0.0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        (x < self.width && y < self.height).then_some((x, y))
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }
}

#[derive(Copy, Clone, PartialEq)]
struct State {
    estimate: f64,
    cost: f64,
    cell: usize,
}

// Min-heap by estimate
impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .partial_cmp(&self.estimate)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.cell.cmp(&other.cell))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

const AXIS_MOVES: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL_MOVES: [(isize, isize); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Shortest-path cost provider over an [`ObstacleGrid`].
///
/// Nodes outside the grid or on a blocked cell are unreachable.
///
/// # Examples
///
/// ```
/// use u_tour::distance::{DistanceProvider, GridSearch, Metric, ObstacleGrid};
/// use u_tour::models::Node;
///
/// let grid = ObstacleGrid::from_rows(&[
///     ".#.",
///     ".#.",
///     "...",
/// ]).unwrap();
/// let search = GridSearch::new(grid);
/// let leg = search.query(&Node::at(0.0, 0.0), &Node::at(2.0, 0.0), true, Metric::Manhattan);
/// assert!((leg.cost - 6.0).abs() < 1e-10);
/// assert_eq!(leg.route.unwrap().len(), 7);
/// ```
#[derive(Debug, Clone)]
pub struct GridSearch {
    grid: ObstacleGrid,
}

impl GridSearch {
    /// Creates a provider searching the given grid.
    pub fn new(grid: ObstacleGrid) -> Self {
        Self { grid }
    }

    /// The grid being searched.
    pub fn grid(&self) -> &ObstacleGrid {
        &self.grid
    }

    fn heuristic(metric: Metric, from: (usize, usize), to: (usize, usize)) -> f64 {
        let dx = from.0.abs_diff(to.0) as f64;
        let dy = from.1.abs_diff(to.1) as f64;
        match metric {
            Metric::Manhattan => dx + dy,
            Metric::Chebyshev => dx.max(dy),
            Metric::Euclidean => dx.max(dy) + (std::f64::consts::SQRT_2 - 1.0) * dx.min(dy),
        }
    }

    fn step(&self, x: usize, y: usize, dx: isize, dy: isize) -> Option<(usize, usize)> {
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        (!self.grid.is_blocked(nx, ny)).then_some((nx, ny))
    }

    /// Runs A* between two cells, returning the cost and the cell sequence.
    fn search(
        &self,
        source: (usize, usize),
        target: (usize, usize),
        metric: Metric,
    ) -> Option<(f64, Vec<(usize, usize)>)> {
        let grid = &self.grid;
        let n = grid.width * grid.height;
        let mut cost = vec![f64::INFINITY; n];
        let mut parent = vec![usize::MAX; n];
        let mut heap = BinaryHeap::new();

        let start = grid.index(source.0, source.1);
        let goal = grid.index(target.0, target.1);
        cost[start] = 0.0;
        heap.push(State {
            estimate: Self::heuristic(metric, source, target),
            cost: 0.0,
            cell: start,
        });

        let diagonal_cost = match metric {
            Metric::Euclidean => std::f64::consts::SQRT_2,
            _ => 1.0,
        };

        while let Some(State { cost: g, cell, .. }) = heap.pop() {
            if cell == goal {
                break;
            }
            if g > cost[cell] {
                continue;
            }
            let (x, y) = (cell % grid.width, cell / grid.width);

            let mut moves: Vec<((usize, usize), f64)> = AXIS_MOVES
                .iter()
                .filter_map(|&(dx, dy)| self.step(x, y, dx, dy).map(|c| (c, 1.0)))
                .collect();
            if metric != Metric::Manhattan {
                for &(dx, dy) in &DIAGONAL_MOVES {
                    if self.step(x, y, dx, 0).is_none() || self.step(x, y, 0, dy).is_none() {
                        continue;
                    }
                    if let Some(c) = self.step(x, y, dx, dy) {
                        moves.push((c, diagonal_cost));
                    }
                }
            }

            for ((nx, ny), w) in moves {
                let next = grid.index(nx, ny);
                let next_cost = g + w;
                if next_cost < cost[next] {
                    cost[next] = next_cost;
                    parent[next] = cell;
                    heap.push(State {
                        estimate: next_cost + Self::heuristic(metric, (nx, ny), target),
                        cost: next_cost,
                        cell: next,
                    });
                }
            }
        }

        if !cost[goal].is_finite() {
            return None;
        }

        let mut cells = vec![target];
        let mut cur = goal;
        while cur != start {
            cur = parent[cur];
            cells.push((cur % grid.width, cur / grid.width));
        }
        cells.reverse();
        Some((cost[goal], cells))
    }
}

impl DistanceProvider for GridSearch {
    fn query(&self, from: &Node, to: &Node, want_route: bool, metric: Metric) -> Leg {
        let (Some(source), Some(target)) = (self.grid.cell_of(from), self.grid.cell_of(to)) else {
            return Leg::unreachable();
        };
        if self.grid.is_blocked(source.0, source.1) || self.grid.is_blocked(target.0, target.1) {
            return Leg::unreachable();
        }

        let Some((cost, cells)) = self.search(source, target, metric) else {
            return Leg::unreachable();
        };
        if !want_route {
            return Leg::new(cost);
        }

        if cells.len() == 1 {
            return Leg::new(cost).with_route(vec![from.clone(), to.clone()]);
        }
        let last = cells.len() - 1;
        let route = cells
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| match i {
                0 => from.clone(),
                i if i == last => to.clone(),
                _ => Node::at(x as f64, y as f64),
            })
            .collect();
        Leg::new(cost).with_route(route)
    }
}
