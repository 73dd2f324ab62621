use crate::consts;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};

/// The pop-up shown once the snake has crashed
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct GameOver {
    pub(super) score: u32,
    pub(super) high_score: u32,
    pub(super) new_record: bool,
}

impl GameOver {
    pub(super) const HEIGHT: u16 = 6;
    pub(super) const WIDTH: u16 = 22;
}

impl Widget for GameOver {
    /*
     * ┌──── GAME OVER ─────┐
     * │ Score: 12          │
     * │ New high score!    │
     * │ Again (Enter)      │
     * │ Quit (q)           │
     * └────────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" GAME OVER ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(area);
        Clear.render(area, buf);
        block.render(area, buf);
        let record = if self.new_record {
            Line::from(Span::styled("New high score!", consts::RECORD_STYLE))
        } else {
            Line::from(format!("High score: {}", self.high_score))
        };
        let lines = [
            Line::from(format!("Score: {}", self.score)),
            record,
            Line::from_iter([
                Span::raw("Again ("),
                Span::styled("Enter", consts::KEY_STYLE),
                Span::raw(")"),
            ]),
            Line::from_iter([
                Span::raw("Quit ("),
                Span::styled("q", consts::KEY_STYLE),
                Span::raw(")"),
            ]),
        ];
        for (line, row) in lines.into_iter().zip(inner.rows()) {
            line.render(row, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(panel: GameOver) -> Buffer {
        let area = Rect::new(0, 0, GameOver::WIDTH, GameOver::HEIGHT);
        let mut buffer = Buffer::empty(area);
        panel.render(area, &mut buffer);
        buffer
    }

    #[test]
    fn new_record() {
        let buffer = render(GameOver {
            score: 12,
            high_score: 12,
            new_record: true,
        });
        let mut expected = Buffer::with_lines([
            "┌──── GAME OVER ─────┐",
            "│ Score: 12          │",
            "│ New high score!    │",
            "│ Again (Enter)      │",
            "│ Quit (q)           │",
            "└────────────────────┘",
        ]);
        expected.set_style(Rect::new(2, 2, 15, 1), consts::RECORD_STYLE);
        expected.set_style(Rect::new(9, 3, 5, 1), consts::KEY_STYLE);
        expected.set_style(Rect::new(8, 4, 1, 1), consts::KEY_STYLE);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn no_record() {
        let buffer = render(GameOver {
            score: 3,
            high_score: 40,
            new_record: false,
        });
        let mut expected = Buffer::with_lines([
            "┌──── GAME OVER ─────┐",
            "│ Score: 3           │",
            "│ High score: 40     │",
            "│ Again (Enter)      │",
            "│ Quit (q)           │",
            "└────────────────────┘",
        ]);
        expected.set_style(Rect::new(9, 3, 5, 1), consts::KEY_STYLE);
        expected.set_style(Rect::new(8, 4, 1, 1), consts::KEY_STYLE);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn hides_what_is_underneath() {
        let area = Rect::new(0, 0, GameOver::WIDTH, GameOver::HEIGHT);
        let mut buffer = Buffer::with_lines((0..6).map(|_| "#".repeat(22)));
        GameOver {
            score: 1,
            high_score: 2,
            new_record: false,
        }
        .render(area, &mut buffer);
        assert_eq!(row(&buffer, 2), "│ High score: 2      │");
        assert_eq!(row(&buffer, 4), "│ Quit (q)           │");
    }

    fn row(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .filter_map(|x| buffer.cell((x, y)))
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }
}
