//! Layout data types
//!
//! These types carry layout results from the engines to the renderer.

/// Axis-aligned rectangle in millimetres, origin at the bottom-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }
}

/// Position within a grid (column, row)
///
/// Rows are counted from the bottom, matching PDF coordinates, so the
/// visually top row has the highest index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    pub col: usize,
    pub row: usize,
}

impl GridPosition {
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    /// Position of the `index`-th card in a `size` x `size` grid filled
    /// left to right, top row first
    pub fn top_down(index: usize, size: usize) -> Self {
        debug_assert!(index < size * size);
        Self {
            col: index % size,
            row: size - 1 - index / size,
        }
    }
}

/// One card image placed on a page
#[derive(Debug, Clone, PartialEq)]
pub struct CardPlacement {
    pub name: String,
    pub grid_pos: GridPosition,
    pub rect: Rect,
}
