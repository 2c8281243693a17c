use std::collections::VecDeque;

use fnv::{FnvHashMap, FnvHashSet};
use smallvec::SmallVec;

use crate::cells::Cell;
use crate::grid::GridModel;
use crate::utils;

/// Shortest route from `start` to `goal` over open cells, moving only up, right, down or left.
///
/// The route includes both end points, so a hint overlay skips the first cell (the player's own
/// position). `start == goal` gives the single cell route. An empty route means there is no way
/// through, which includes either end being a wall or lying outside the grid.
///
/// Plain breadth-first search: every step costs the same, so the first time the goal leaves the
/// frontier it has been reached by a shortest route. Neighbours are expanded in the fixed order
/// up, right, down, left, which makes the choice between equally short routes deterministic.
pub fn solve(grid: &GridModel, start: Cell, goal: Cell) -> Vec<Cell> {

    if !grid.is_path(start) || !grid.is_path(goal) {
        return Vec::new();
    }

    let mut came_from: FnvHashMap<Cell, Cell> = utils::fnv_hashmap(grid.size() / 2);
    let mut visited: FnvHashSet<Cell> = utils::fnv_hashset(grid.size() / 2);
    let mut frontier = VecDeque::new();

    visited.insert(start);
    frontier.push_back(start);

    while let Some(cell) = frontier.pop_front() {

        if cell == goal {
            return walk_back(&came_from, start, goal);
        }

        for next in grid.path_neighbours(cell) {
            if visited.insert(next) {
                came_from.insert(next, cell);
                frontier.push_back(next);
            }
        }
    }

    Vec::new()
}

fn walk_back(came_from: &FnvHashMap<Cell, Cell>, start: Cell, goal: Cell) -> Vec<Cell> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        match came_from.get(&current) {
            Some(&previous) => {
                path.push(previous);
                current = previous;
            }
            None => return Vec::new(),
        }
    }
    path.reverse();
    path
}

/// Step counts from one start cell to every open cell reachable from it.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: Cell,
    distances: FnvHashMap<Cell, u32>,
    max_distance: u32,
}

impl Distances {
    /// Flood fill outwards from `start_coordinate`. None if the start is a wall or off the grid.
    pub fn for_grid(grid: &GridModel, start_coordinate: Cell) -> Option<Distances> {

        if !grid.is_path(start_coordinate) {
            return None;
        }

        let mut distances: FnvHashMap<Cell, u32> = utils::fnv_hashmap(grid.size() / 2);
        distances.insert(start_coordinate, 0);
        let mut max = 0;

        // Unweighted steps, so a cell's distance is final the first time it is reached; the map
        // doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        let mut steps = 0;
        while !frontier.is_empty() {
            steps += 1;
            let mut new_frontier = vec![];
            for cell in &frontier {
                for neighbour in grid.path_neighbours(*cell) {
                    if !distances.contains_key(&neighbour) {
                        distances.insert(neighbour, steps);
                        max = steps;
                        new_frontier.push(neighbour);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> Cell {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, cell: Cell) -> Option<u32> {
        self.distances.get(&cell).cloned()
    }

    /// Number of cells reachable from the start, the start included.
    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    /// The cells at the maximum distance, sorted.
    pub fn furthest_points_on_grid(&self) -> SmallVec<[Cell; 8]> {
        let mut furthest = self.distances
            .iter()
            .filter(|&(_, distance)| *distance == self.max_distance)
            .map(|(cell, _)| *cell)
            .collect::<SmallVec<[Cell; 8]>>();
        furthest.sort();
        furthest
    }
}
