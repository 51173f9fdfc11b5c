//! 1-indexed cell coordinates with dense linear indexing
//!
//! Cells are addressed as `(x, y)` with `1 <= x <= W` and `1 <= y <= H`,
//! mapping to the linear index `(x-1) + (y-1)*W`. All constructors validate
//! against the grid size, so a held `Cell` is always in bounds for the grid
//! it was created for.

use std::fmt;

/// Grid dimensions in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    /// Number of columns
    pub horizontal_cells: usize,
    /// Number of rows
    pub vertical_cells: usize,
}

impl GridSize {
    /// Total number of cells in the grid
    pub const fn cell_count(self) -> usize {
        self.horizontal_cells * self.vertical_cells
    }
}

/// Orthogonal direction, ordered by neighbour bitmask weight
///
/// The ordering (up, left, right, down) matches the bit weights 1, 2, 4, 8
/// used by the road bitmask lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrthogonalDirection {
    /// Towards smaller y
    Up,
    /// Towards smaller x
    Left,
    /// Towards larger x
    Right,
    /// Towards larger y
    Down,
}

impl OrthogonalDirection {
    /// All directions in bitmask-weight order
    pub const ALL: [Self; 4] = [Self::Up, Self::Left, Self::Right, Self::Down];

    /// The direction pointing the opposite way
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
        }
    }

    /// Coordinate delta `(dx, dy)` for one step in this direction
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
        }
    }
}

/// Diagonal direction naming the four quadrant corners around a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagonalDirection {
    /// Up and left
    TopLeft,
    /// Up and right
    TopRight,
    /// Down and left
    BottomLeft,
    /// Down and right
    BottomRight,
}

impl DiagonalDirection {
    /// All diagonal directions
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Coordinate delta `(dx, dy)` for one diagonal step
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::TopLeft => (-1, -1),
            Self::TopRight => (1, -1),
            Self::BottomLeft => (-1, 1),
            Self::BottomRight => (1, 1),
        }
    }
}

/// Which map edges a cell touches
///
/// An edge flag is true when the cell sits on that boundary of the grid,
/// meaning the corresponding neighbour is off-map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundaryEdges {
    /// Cell is on the top row
    pub up: bool,
    /// Cell is on the leftmost column
    pub left: bool,
    /// Cell is on the rightmost column
    pub right: bool,
    /// Cell is on the bottom row
    pub down: bool,
}

/// A 1-indexed position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    x: usize,
    y: usize,
}

impl Cell {
    /// Create a cell, validating it lies inside the grid
    pub const fn new(size: GridSize, x: usize, y: usize) -> Option<Self> {
        if x >= 1 && x <= size.horizontal_cells && y >= 1 && y <= size.vertical_cells {
            Some(Self { x, y })
        } else {
            None
        }
    }

    /// Column coordinate, starting at 1
    pub const fn x(self) -> usize {
        self.x
    }

    /// Row coordinate, starting at 1
    pub const fn y(self) -> usize {
        self.y
    }

    /// Dense linear index of this cell
    pub const fn index(self, size: GridSize) -> usize {
        (self.x - 1) + (self.y - 1) * size.horizontal_cells
    }

    /// Recover a cell from its dense linear index
    pub const fn from_index(size: GridSize, index: usize) -> Option<Self> {
        if index >= size.cell_count() {
            return None;
        }
        Some(Self {
            x: index % size.horizontal_cells + 1,
            y: index / size.horizontal_cells + 1,
        })
    }

    /// Move the cell by a bounded delta, failing when it leaves the grid
    pub const fn translate_by(self, size: GridSize, dx: i32, dy: i32) -> Option<Self> {
        let nx = self.x as i32 + dx;
        let ny = self.y as i32 + dy;
        if nx < 1 || ny < 1 {
            return None;
        }
        Self::new(size, nx as usize, ny as usize)
    }

    /// The orthogonal neighbour in the given direction, if in bounds
    pub const fn next_orthogonal(self, size: GridSize, dir: OrthogonalDirection) -> Option<Self> {
        let (dx, dy) = dir.offset();
        self.translate_by(size, dx, dy)
    }

    /// The diagonal neighbour in the given direction, if in bounds
    pub const fn next_diagonal(self, size: GridSize, dir: DiagonalDirection) -> Option<Self> {
        let (dx, dy) = dir.offset();
        self.translate_by(size, dx, dy)
    }

    /// The three neighbours surrounding a quadrant corner, clockwise
    ///
    /// For the top-right quadrant these are up, the top-right diagonal, and
    /// right. Off-map neighbours are omitted.
    pub fn quadrant_neighbors(self, size: GridSize, dir: DiagonalDirection) -> Vec<Self> {
        let walk: [Option<Self>; 3] = match dir {
            DiagonalDirection::TopLeft => [
                self.next_orthogonal(size, OrthogonalDirection::Left),
                self.next_diagonal(size, dir),
                self.next_orthogonal(size, OrthogonalDirection::Up),
            ],
            DiagonalDirection::TopRight => [
                self.next_orthogonal(size, OrthogonalDirection::Up),
                self.next_diagonal(size, dir),
                self.next_orthogonal(size, OrthogonalDirection::Right),
            ],
            DiagonalDirection::BottomRight => [
                self.next_orthogonal(size, OrthogonalDirection::Right),
                self.next_diagonal(size, dir),
                self.next_orthogonal(size, OrthogonalDirection::Down),
            ],
            DiagonalDirection::BottomLeft => [
                self.next_orthogonal(size, OrthogonalDirection::Down),
                self.next_diagonal(size, dir),
                self.next_orthogonal(size, OrthogonalDirection::Left),
            ],
        };
        walk.into_iter().flatten().collect()
    }

    /// Place a subgrid-local cell relative to a global top-left origin
    ///
    /// `local` is 1-indexed within the subgrid; the result is the matching
    /// global cell, or `None` when it falls outside the grid.
    pub const fn place_in(size: GridSize, origin: Self, local: Self) -> Option<Self> {
        origin.translate_by(size, local.x as i32 - 1, local.y as i32 - 1)
    }

    /// Direction from one cell to another along a shared row or column
    ///
    /// Returns `None` when the cells coincide or are not collinear.
    pub const fn orthogonal_direction(from: Self, to: Self) -> Option<OrthogonalDirection> {
        if from.x == to.x && from.y != to.y {
            if to.y < from.y {
                Some(OrthogonalDirection::Up)
            } else {
                Some(OrthogonalDirection::Down)
            }
        } else if from.y == to.y && from.x != to.x {
            if to.x < from.x {
                Some(OrthogonalDirection::Left)
            } else {
                Some(OrthogonalDirection::Right)
            }
        } else {
            None
        }
    }

    /// Which map edges this cell touches
    ///
    /// Edge neighbours are off-map and treated as matching the default
    /// socket, so boundary cells seed their superpositions from this record.
    pub const fn connected_bounds(self, size: GridSize) -> BoundaryEdges {
        BoundaryEdges {
            up: self.y == 1,
            left: self.x == 1,
            right: self.x == size.horizontal_cells,
            down: self.y == size.vertical_cells,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
