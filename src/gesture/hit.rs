use ratatui::layout::Rect;

/// Maps a pointer position to a calendar day.
///
/// Placeholder cells and points outside the grid map to `None`; a day of 0 is
/// never returned.
pub trait DayHitTest {
    /// Day whose cell contains the point
    fn day_at(&self, x: u16, y: u16) -> Option<u32>;

    /// Day whose column contains `x`. Among cells in that column, the one on
    /// the pointer's row wins; when the pointer is above or below the grid the
    /// first cell of the column (in grid order) is used.
    fn day_at_column(&self, x: u16, y: u16) -> Option<u32>;
}

fn contains(rect: Rect, x: u16, y: u16) -> bool {
    contains_x(rect, x) && y >= rect.y && y < rect.y.saturating_add(rect.height)
}

fn contains_x(rect: Rect, x: u16) -> bool {
    x >= rect.x && x < rect.x.saturating_add(rect.width)
}

/// Cell rectangles of the last rendered grid, row-major
#[derive(Debug, Clone, Default)]
pub struct GridGeometry {
    cells: Vec<(Rect, Option<u32>)>,
}

impl GridGeometry {
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Record the next cell in grid order
    pub fn push(&mut self, rect: Rect, day: Option<u32>) {
        self.cells.push((rect, day.filter(|&d| d > 0)));
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[(Rect, Option<u32>)] {
        &self.cells
    }

    /// Rectangle of a numbered day's cell
    pub fn rect_for_day(&self, day: u32) -> Option<Rect> {
        self.cells
            .iter()
            .find(|(_, d)| *d == Some(day))
            .map(|(rect, _)| *rect)
    }

    /// Bounding box of the whole grid
    pub fn bounds(&self) -> Option<Rect> {
        self.cells
            .iter()
            .map(|(rect, _)| *rect)
            .reduce(|acc, rect| acc.union(rect))
    }
}

impl DayHitTest for GridGeometry {
    fn day_at(&self, x: u16, y: u16) -> Option<u32> {
        self.cells
            .iter()
            .find(|(rect, _)| contains(*rect, x, y))
            .and_then(|(_, day)| *day)
    }

    fn day_at_column(&self, x: u16, y: u16) -> Option<u32> {
        let mut column = self.cells.iter().filter(|(rect, _)| contains_x(*rect, x));
        let first = column.clone().next();
        column
            .find(|(rect, _)| y >= rect.y && y < rect.y.saturating_add(rect.height))
            .or(first)
            .and_then(|(_, day)| *day)
    }
}
