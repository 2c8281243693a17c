use std::fmt;
use std::str::FromStr;

use fnv::FnvHashMap;
use itertools::Itertools;
use petgraph::graph::NodeIndex;
use petgraph::{Graph, Undirected};
use smallvec::SmallVec;

use crate::cells::{Cell, CellState, Direction};
use crate::errors::*;
use crate::units::{is_valid_dimension, Height, Width};
use crate::utils;

pub type CellSmallVec = SmallVec<[Cell; 4]>;

/// Undirected graph of rooms, with an edge wherever the wall between two rooms has been carved.
pub type RoomGraph = Graph<Cell, (), Undirected>;

const WALL_GLYPH: char = '#';
const PATH_GLYPH: char = '.';

/// Wall/path classification of every cell in an odd sized rectangular grid.
///
/// Cells live in a flat row-major buffer. A grid starts out all wall; the generator carves
/// paths into it and after that it is only read until the next level replaces it.
#[derive(Clone, PartialEq, Eq)]
pub struct GridModel {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
}

impl fmt::Debug for GridModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "GridModel :: width: {:?}, height: {:?}\n{}", self.width, self.height, self)
    }
}

impl GridModel {
    pub fn new(width: Width, height: Height) -> Result<GridModel> {
        if !is_valid_dimension(width.0) || !is_valid_dimension(height.0) {
            return Err(ErrorKind::InvalidDimensions(width.0, height.0).into());
        }

        Ok(GridModel {
            width: width.0,
            height: height.0,
            cells: vec![CellState::Wall; width.0 * height.0],
        })
    }

    #[inline]
    pub fn width(&self) -> Width {
        Width(self.width)
    }

    #[inline]
    pub fn height(&self) -> Height {
        Height(self.height)
    }

    /// Total number of cells, walls included.
    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Number of cells on the odd/odd room lattice.
    #[inline]
    pub fn room_count(&self) -> usize {
        ((self.width - 1) / 2) * ((self.height - 1) / 2)
    }

    /// The room every player starts in.
    #[inline]
    pub fn start_room(&self) -> Cell {
        Cell::new(1, 1)
    }

    /// The bottom right room, where the exit goes.
    #[inline]
    pub fn exit_room(&self) -> Cell {
        Cell::new(self.width as u32 - 2, self.height as u32 - 2)
    }

    pub fn cell_state(&self, cell: Cell) -> Result<CellState> {
        self.grid_coordinate_to_index(cell)
            .map(|index| self.cells[index])
            .ok_or_else(|| ErrorKind::OutOfBounds(cell.x, cell.y).into())
    }

    /// Carve `cell` into a path.
    pub fn set_path(&mut self, cell: Cell) -> Result<()> {
        debug_assert!(self.is_valid_coordinate(cell), "carving outside the grid at {:?}", cell);
        match self.grid_coordinate_to_index(cell) {
            Some(index) => {
                self.cells[index] = CellState::Path;
                Ok(())
            }
            None => Err(ErrorKind::OutOfBounds(cell.x, cell.y).into()),
        }
    }

    /// Is `cell` inside the grid and open? Out of bounds cells count as walls.
    #[inline]
    pub fn is_path(&self, cell: Cell) -> bool {
        self.grid_coordinate_to_index(cell)
            .map_or(false, |index| self.cells[index] == CellState::Path)
    }

    #[inline]
    pub fn is_valid_coordinate(&self, cell: Cell) -> bool {
        (cell.x as usize) < self.width && (cell.y as usize) < self.height
    }

    /// Convert a cell to its index in the row-major cell buffer, None if outside the grid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, cell: Cell) -> Option<usize> {
        if self.is_valid_coordinate(cell) {
            Some(cell.y as usize * self.width + cell.x as usize)
        } else {
            None
        }
    }

    /// The in-bounds neighbour of `cell` in `direction`.
    pub fn neighbour_at_direction(&self, cell: Cell, direction: Direction) -> Option<Cell> {
        cell.offset(direction).filter(|neighbour| self.is_valid_coordinate(*neighbour))
    }

    /// Open cells adjacent to `cell`, in the order up, right, down, left.
    pub fn path_neighbours(&self, cell: Cell) -> CellSmallVec {
        Direction::ALL
            .iter()
            .filter_map(|dir| cell.offset(*dir))
            .filter(|neighbour| self.is_path(*neighbour))
            .collect()
    }

    /// All cells in row-major order.
    pub fn iter(&self) -> CellIter {
        CellIter {
            width: self.width,
            current_cell_number: 0,
            cells_count: self.cells.len(),
        }
    }

    /// The room lattice in row-major order.
    pub fn rooms<'a>(&'a self) -> impl Iterator<Item = Cell> + 'a {
        self.iter().filter(Cell::is_room)
    }

    /// Build the room graph: every room is a node and every carved wall between two
    /// horizontally or vertically adjacent open rooms is an edge.
    pub fn room_graph(&self) -> RoomGraph {
        let mut graph = RoomGraph::with_capacity(self.room_count(), self.room_count());
        let mut nodes: FnvHashMap<Cell, NodeIndex> = utils::fnv_hashmap(self.room_count());

        for room in self.rooms() {
            nodes.insert(room, graph.add_node(room));
        }

        for room in self.rooms().filter(|room| self.is_path(*room)) {
            for &dir in &[Direction::Right, Direction::Down] {
                let next_room = match room.offset_by(dir, 2) {
                    Some(next) if self.is_path(next) => next,
                    _ => continue,
                };
                if !self.is_path(room.midpoint(next_room)) {
                    continue;
                }
                if let (Some(&a), Some(&b)) = (nodes.get(&room), nodes.get(&next_room)) {
                    graph.add_edge(a, b, ());
                }
            }
        }

        graph
    }

    /// Text rendering, one line per row. `overlay` may replace the glyph of any cell.
    pub fn to_text_with_overlay<F>(&self, overlay: F) -> String
        where F: Fn(Cell) -> Option<char>
    {
        (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| {
                        let cell = Cell::new(x as u32, y as u32);
                        overlay(cell).unwrap_or_else(|| self.glyph(cell))
                    })
                    .collect::<String>()
            })
            .join("\n")
    }

    fn glyph(&self, cell: Cell) -> char {
        if self.is_path(cell) { PATH_GLYPH } else { WALL_GLYPH }
    }
}

impl fmt::Display for GridModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_text_with_overlay(|_| None))
    }
}

/// Parses the `Display` form: `#` is a wall, `.` or a space is a path.
impl FromStr for GridModel {
    type Err = Error;

    fn from_str(s: &str) -> Result<GridModel> {
        let rows = s.lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>();

        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        if let Some((y, row)) = rows.iter().enumerate().find(|&(_, row)| row.chars().count() != width) {
            return Err(ErrorKind::Parse(format!("row {} has {} cells, expected {}",
                                                y, row.chars().count(), width)).into());
        }

        let mut grid = GridModel::new(Width(width), Height(height))?;
        for (y, row) in rows.iter().enumerate() {
            for (x, glyph) in row.chars().enumerate() {
                match glyph {
                    WALL_GLYPH => {}
                    PATH_GLYPH | ' ' => grid.set_path(Cell::new(x as u32, y as u32))?,
                    other => {
                        return Err(ErrorKind::Parse(format!("unexpected glyph {:?} at ({}, {})",
                                                            other, x, y)).into())
                    }
                }
            }
        }
        Ok(grid)
    }
}

#[derive(Clone)]
pub struct CellIter {
    width: usize,
    current_cell_number: usize,
    cells_count: usize,
}

impl fmt::Debug for CellIter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "CellIter :: current_cell_number: {:?}, cells_count: {:?}",
               self.current_cell_number,
               self.cells_count)
    }
}

impl Iterator for CellIter {
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let n = self.current_cell_number;
            self.current_cell_number += 1;
            Some(Cell::new((n % self.width) as u32, (n / self.width) as u32))
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_cell_number;
        (remaining, Some(remaining))
    }
}
impl ExactSizeIterator for CellIter {} // default impl using size_hint()
