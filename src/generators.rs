use bit_set::BitSet;
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::cells::{Cell, Direction};
use crate::errors::*;
use crate::grid::{CellSmallVec, GridModel};
use crate::units::{Height, Width};

/// Generate a maze of the given size.
///
/// With a seed the result is a pure function of `(width, height, seed)`; without one the random
/// source is seeded from the operating system.
pub fn generate(width: Width, height: Height, seed: Option<u64>) -> Result<GridModel> {
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    recursive_backtracker(width, height, &mut rng)
}

/// Apply the recursive backtracker maze generation algorithm to a new all-wall grid.
///
/// Rooms are the odd/odd cells and the cells between two rooms are the walls that can be
/// knocked through. Starting from room (1, 1) we repeatedly look at the room on top of the
/// stack: if it has unvisited neighbouring rooms (two cells away) we pick one at random, carve
/// the wall between and the room itself and push it; if it has none we pop it and backtrack.
/// When the stack empties every room has been visited, so all rooms are connected and, as a
/// wall is only ever carved towards an unvisited room, no cycles exist. It is a perfect maze.
///
/// The iteration is explicit, so stack depth is bounded by the room count and not the call
/// stack. Long winding corridors with few dead ends are typical of this algorithm.
pub fn recursive_backtracker<R>(width: Width, height: Height, rng: &mut R) -> Result<GridModel>
    where R: Rng + ?Sized
{
    let mut grid = GridModel::new(width, height)?;

    let mut visited = BitSet::with_capacity(grid.size());
    let mut stack: Vec<Cell> = Vec::with_capacity(grid.room_count());

    let start = grid.start_room();
    grid.set_path(start)?;
    mark_visited(&grid, &mut visited, start);
    stack.push(start);

    let mut carved_rooms = 1;
    while let Some(&current) = stack.last() {

        let candidates = unvisited_neighbour_rooms(&grid, &visited, current);

        if let Some(&next) = candidates.choose(&mut *rng) {
            grid.set_path(current.midpoint(next))?;
            grid.set_path(next)?;
            mark_visited(&grid, &mut visited, next);
            stack.push(next);
            carved_rooms += 1;
        } else {
            let _ = stack.pop();
        }
    }

    open_exit(&mut grid)?;

    debug!("carved {} of {} rooms in a {}x{} maze",
           carved_rooms, grid.room_count(), width, height);
    Ok(grid)
}

/// Make sure the exit room is open and can be entered.
///
/// Only when the exit has no open neighbour at all is the cell to its left knocked through. A
/// fully carved maze never hits that case, and carving unconditionally would join two branches
/// of the spanning tree whenever they were not already connected through that wall, creating a
/// loop.
pub fn open_exit(grid: &mut GridModel) -> Result<()> {
    let exit = grid.exit_room();
    grid.set_path(exit)?;

    if exit != grid.start_room() && grid.path_neighbours(exit).is_empty() {
        if let Some(left) = exit.offset(Direction::Left).filter(|c| c.x > 0) {
            debug!("exit room {:?} was isolated, opening {:?}", exit, left);
            grid.set_path(left)?;
        }
    }
    Ok(())
}

/// Rooms two cells away from `room` that are still inside the room lattice and not yet carved.
fn unvisited_neighbour_rooms(grid: &GridModel, visited: &BitSet, room: Cell) -> CellSmallVec {
    let max_x = grid.width().0 as u32 - 2;
    let max_y = grid.height().0 as u32 - 2;

    Direction::ALL
        .iter()
        .filter_map(|dir| room.offset_by(*dir, 2))
        .filter(|next| next.x >= 1 && next.x <= max_x && next.y >= 1 && next.y <= max_y)
        .filter(|next| !is_visited(grid, visited, *next))
        .collect()
}

#[inline]
fn mark_visited(grid: &GridModel, visited: &mut BitSet, room: Cell) {
    if let Some(index) = grid.grid_coordinate_to_index(room) {
        let _ = visited.insert(index);
    }
}

#[inline]
fn is_visited(grid: &GridModel, visited: &BitSet, room: Cell) -> bool {
    grid.grid_coordinate_to_index(room)
        .map_or(false, |index| visited.contains(index))
}

#[cfg(test)]
mod tests {
    use petgraph::algo::{connected_components, is_cyclic_undirected};
    use quickcheck::quickcheck;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::cells::CellState;
    use crate::pathing::Distances;

    fn odd(n: u8, max: usize) -> usize {
        3 + 2 * (n as usize % ((max - 1) / 2))
    }

    fn all_rooms_reachable_from_start(grid: &GridModel) -> bool {
        let distances = Distances::for_grid(grid, grid.start_room())
            .expect("start room must be open");
        grid.rooms().all(|room| distances.distance_from_start_to(room).is_some())
    }

    fn is_spanning_tree(grid: &GridModel) -> bool {
        let graph = grid.room_graph();
        graph.edge_count() == grid.room_count() - 1 &&
        connected_components(&graph) == 1 &&
        !is_cyclic_undirected(&graph)
    }

    #[test]
    fn invalid_dimensions_are_rejected() {
        for &(w, h) in &[(2, 5), (5, 2), (4, 4), (1, 3), (3, 1), (0, 0), (10, 21)] {
            let err = generate(Width(w), Height(h), Some(1)).unwrap_err();
            match *err.kind() {
                ErrorKind::InvalidDimensions(ew, eh) => assert_eq!((ew, eh), (w, h)),
                ref other => panic!("unexpected error kind {:?}", other),
            }
        }
    }

    #[test]
    fn start_room_is_always_open() {
        for seed in 0..20 {
            let g = generate(Width(11), Height(9), Some(seed)).unwrap();
            assert_eq!(g.cell_state(Cell::new(1, 1)).unwrap(), CellState::Path);
            assert!(g.is_path(g.exit_room()));
        }
    }

    #[test]
    fn smallest_maze_is_a_single_room() {
        let g = generate(Width(3), Height(3), Some(7)).unwrap();
        assert_eq!(g.to_string(), "###\n#.#\n###");
    }

    #[test]
    fn corridor_mazes() {
        let wide = generate(Width(9), Height(3), Some(3)).unwrap();
        assert_eq!(wide.to_string(), "#########\n#.......#\n#########");

        let tall = generate(Width(3), Height(7), Some(3)).unwrap();
        assert_eq!(tall.to_string(), "###\n#.#\n#.#\n#.#\n#.#\n#.#\n###");
    }

    #[test]
    fn border_is_never_carved() {
        let g = generate(Width(31), Height(21), Some(42)).unwrap();
        let (w, h) = (g.width().0 as u32, g.height().0 as u32);
        for cell in g.iter() {
            if cell.x == 0 || cell.y == 0 || cell.x == w - 1 || cell.y == h - 1 {
                assert!(!g.is_path(cell), "border cell {:?} carved", cell);
            }
        }
    }

    #[test]
    fn lattice_corners_are_never_carved() {
        let g = generate(Width(21), Height(15), Some(9)).unwrap();
        for cell in g.iter().filter(|c| c.x % 2 == 0 && c.y % 2 == 0) {
            assert!(!g.is_path(cell));
        }
    }

    #[test]
    fn default_level_maze_is_a_perfect_maze() {
        let g = generate(Width(31), Height(21), Some(2024)).unwrap();
        assert!(all_rooms_reachable_from_start(&g));
        assert!(is_spanning_tree(&g));
        // rooms plus one carved wall per tree edge
        let open_cells = g.iter().filter(|c| g.is_path(*c)).count();
        assert_eq!(open_cells, 2 * g.room_count() - 1);
    }

    #[test]
    fn same_seed_same_maze() {
        let a = generate(Width(25), Height(17), Some(99)).unwrap();
        let b = generate(Width(25), Height(17), Some(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_usually_differ() {
        let mazes = (0..8)
            .map(|seed| generate(Width(21), Height(21), Some(seed)).unwrap().to_string())
            .collect::<Vec<_>>();
        let first = &mazes[0];
        assert!(mazes.iter().any(|m| m != first));
    }

    #[test]
    fn unseeded_generation_is_still_perfect() {
        let g = generate(Width(15), Height(13), None).unwrap();
        assert!(is_spanning_tree(&g));
    }

    #[test]
    fn isolated_exit_gets_a_left_opening() {
        let mut g: GridModel = "#####\n\
                                #...#\n\
                                #####\n\
                                #####\n\
                                #####".parse().unwrap();
        // exit room (3, 3) is walled in
        open_exit(&mut g).unwrap();
        assert!(g.is_path(Cell::new(3, 3)));
        assert!(g.is_path(Cell::new(2, 3)));
    }

    #[test]
    fn connected_exit_is_left_alone() {
        let mut g = generate(Width(11), Height(11), Some(5)).unwrap();
        let before = g.clone();
        open_exit(&mut g).unwrap();
        assert_eq!(g, before);
    }

    #[test]
    fn quickcheck_generated_mazes_are_perfect() {
        fn prop(w: u8, h: u8, seed: u64) -> bool {
            let mut rng = StdRng::seed_from_u64(seed);
            let g = recursive_backtracker(Width(odd(w, 41)), Height(odd(h, 41)), &mut rng)
                .expect("odd dimensions are valid");
            all_rooms_reachable_from_start(&g) && is_spanning_tree(&g)
        }
        quickcheck(prop as fn(u8, u8, u64) -> bool);
    }
}
