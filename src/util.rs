use crate::consts;
use crate::game::Grid;
use ratatui::layout::{Flex, Layout, Rect, Size};

/// Return a `Rect` of the given size centered within `area`.  If `size` is
/// larger than `area` along either axis, the result is clipped to `area`.
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [rect] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(rect);
    rect
}

/// The size of the whole game display for a given grid: a score bar, the
/// bordered board (two columns per cell), and a message line
pub(crate) fn display_size(grid: Grid) -> Size {
    let side = grid.size();
    let board_width = side.saturating_mul(2).saturating_add(2);
    Size {
        width: board_width.max(consts::MIN_DISPLAY_WIDTH),
        height: side.saturating_add(4),
    }
}

pub(crate) fn get_display_area(buffer_area: Rect, grid: Grid) -> Rect {
    center_rect(buffer_area, display_size(grid))
}
