//! Dense cell assignment for the sheet grid

use std::path::{Path, PathBuf};

use super::GridConfig;

/// Which source image (if any) sits in each grid cell.
///
/// Stored row-major as a dense `rows × cols` array.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Option<PathBuf>>,
}

impl CellGrid {
    /// Create an empty grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols, cells: vec![None; rows * cols] }
    }

    /// Create an empty grid sized to a grid configuration.
    pub fn for_grid(grid: &GridConfig) -> Self {
        Self::new(grid.rows as usize, grid.cols as usize)
    }

    /// Build from nested rows, clipping or padding to `rows × cols`.
    pub fn from_rows(rows: usize, cols: usize, data: Vec<Vec<Option<PathBuf>>>) -> Self {
        let mut grid = Self::new(rows, cols);
        for (r, row) in data.into_iter().enumerate().take(rows) {
            for (c, cell) in row.into_iter().enumerate().take(cols) {
                grid.cells[r * cols + c] = cell;
            }
        }
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn offset(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    /// Source image at a cell, `None` when empty or out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<&Path> {
        self.offset(row, col).and_then(|i| self.cells[i].as_deref())
    }

    /// Assign (or clear with `None`) a cell. Returns false when out of range.
    pub fn set(&mut self, row: usize, col: usize, path: Option<PathBuf>) -> bool {
        match self.offset(row, col) {
            Some(i) => {
                self.cells[i] = path;
                true
            }
            None => false,
        }
    }

    /// Clear a cell, returning what was there.
    pub fn take(&mut self, row: usize, col: usize) -> Option<PathBuf> {
        self.offset(row, col).and_then(|i| self.cells[i].take())
    }

    /// Cells of one row, left to right. Empty for out-of-range rows.
    pub fn row(&self, row: usize) -> &[Option<PathBuf>] {
        if row < self.rows {
            &self.cells[row * self.cols..(row + 1) * self.cols]
        } else {
            &[]
        }
    }

    /// Assigned images of one row, left to right, skipping empty cells.
    pub fn row_images(&self, row: usize) -> Vec<PathBuf> {
        self.row(row).iter().flatten().cloned().collect()
    }

    /// Number of assigned cells.
    pub fn assigned(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Change the grid size, keeping placements that still fit.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        *self = Self::from_rows(rows, cols, self.to_rows());
    }

    /// Fill cells row-major from `images`, replacing all placements.
    ///
    /// Returns how many images were placed; extra images are ignored.
    pub fn fill_sequential(&mut self, images: &[PathBuf]) -> usize {
        let placed = images.len().min(self.cells.len());
        for (i, cell) in self.cells.iter_mut().enumerate() {
            *cell = images.get(i).cloned();
        }
        placed
    }

    /// Nested rows of paths, as stored in project files.
    pub fn to_rows(&self) -> Vec<Vec<Option<PathBuf>>> {
        (0..self.rows).map(|r| self.row(r).to_vec()).collect()
    }

    /// Nested rows of file names, for projects moved to another folder.
    pub fn basenames(&self) -> Vec<Vec<Option<String>>> {
        (0..self.rows)
            .map(|r| {
                self.row(r)
                    .iter()
                    .map(|cell| {
                        cell.as_ref()
                            .and_then(|p| p.file_name())
                            .map(|n| n.to_string_lossy().into_owned())
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(name: &str) -> PathBuf {
        PathBuf::from(format!("/frames/{}", name))
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = CellGrid::new(2, 3);
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.assigned(), 0);
        assert_eq!(grid.row(1).len(), 3);
    }

    #[test]
    fn test_set_and_get() {
        let mut grid = CellGrid::new(2, 2);
        assert!(grid.set(1, 0, Some(p("a.png"))));
        assert_eq!(grid.get(1, 0), Some(Path::new("/frames/a.png")));
        assert_eq!(grid.get(0, 0), None);
        assert!(!grid.set(2, 0, Some(p("b.png"))));
        assert_eq!(grid.get(5, 5), None);
    }

    #[test]
    fn test_take_clears_cell() {
        let mut grid = CellGrid::new(1, 1);
        grid.set(0, 0, Some(p("a.png")));
        assert_eq!(grid.take(0, 0), Some(p("a.png")));
        assert_eq!(grid.assigned(), 0);
    }

    #[test]
    fn test_row_images_skip_empty() {
        let grid =
            CellGrid::from_rows(1, 3, vec![vec![Some(p("a.png")), None, Some(p("b.png"))]]);
        assert_eq!(grid.row_images(0), vec![p("a.png"), p("b.png")]);
        assert!(grid.row_images(4).is_empty());
    }

    #[test]
    fn test_from_rows_clips_and_pads() {
        let data = vec![
            vec![Some(p("a.png")), Some(p("b.png")), Some(p("c.png"))],
            vec![Some(p("d.png"))],
            vec![Some(p("e.png"))],
        ];
        let grid = CellGrid::from_rows(2, 2, data);
        assert_eq!(grid.to_rows(), vec![
            vec![Some(p("a.png")), Some(p("b.png"))],
            vec![Some(p("d.png")), None],
        ]);
    }

    #[test]
    fn test_resize_keeps_fitting_cells() {
        let mut grid = CellGrid::new(2, 2);
        grid.set(0, 1, Some(p("a.png")));
        grid.set(1, 1, Some(p("b.png")));
        grid.resize(3, 1);
        assert_eq!(grid.assigned(), 0);

        let mut grid = CellGrid::new(2, 2);
        grid.set(0, 0, Some(p("a.png")));
        grid.resize(3, 4);
        assert_eq!(grid.get(0, 0), Some(Path::new("/frames/a.png")));
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 4);
    }

    #[test]
    fn test_fill_sequential_row_major() {
        let mut grid = CellGrid::new(2, 2);
        let images = vec![p("1.png"), p("2.png"), p("3.png")];
        assert_eq!(grid.fill_sequential(&images), 3);
        assert_eq!(grid.get(0, 1), Some(Path::new("/frames/2.png")));
        assert_eq!(grid.get(1, 0), Some(Path::new("/frames/3.png")));
        assert_eq!(grid.get(1, 1), None);
    }

    #[test]
    fn test_fill_sequential_ignores_overflow() {
        let mut grid = CellGrid::new(1, 2);
        let images: Vec<PathBuf> = (0..5).map(|i| p(&format!("{}.png", i))).collect();
        assert_eq!(grid.fill_sequential(&images), 2);
        assert_eq!(grid.assigned(), 2);
    }

    #[test]
    fn test_basenames() {
        let grid = CellGrid::from_rows(1, 2, vec![vec![Some(p("00001.png")), None]]);
        assert_eq!(grid.basenames(), vec![vec![Some("00001.png".to_string()), None]]);
    }
}
