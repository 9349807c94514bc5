/// Fixed-size cell store for the simulation.
///
/// Cells are kept row-major, so the cell at `(x, y)` lives at `x + width * y`.
/// Coordinates outside `[0, width) x [0, height)` are a caller bug: clamp
/// pointer positions before calling `set`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create an all-dead grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Build a grid from row-major cell values.
    pub fn from_cells(width: usize, height: usize, cells: Vec<bool>) -> Self {
        assert_eq!(cells.len(), width * height, "cell count must match grid dimensions");
        Self { width, height, cells }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    pub fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            self.contains(x, y),
            "cell ({x}, {y}) outside {}x{} grid",
            self.width,
            self.height
        );
        x + self.width * y
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[self.index(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        let idx = self.index(x, y);
        self.cells[idx] = alive;
    }

    /// Kill every cell.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Deep copy of the current cell values.
    pub fn snapshot(&self) -> Grid {
        self.clone()
    }

    /// Replace every cell with the contents of `other`.
    pub fn restore(&mut self, other: Grid) {
        assert!(
            other.width == self.width && other.height == self.height,
            "cannot restore a {}x{} grid into a {}x{} grid",
            other.width,
            other.height,
            self.width,
            self.height
        );
        self.cells = other.cells;
    }

    /// Read-only row-major view, used by the rasterizer and the file codec.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }
}
