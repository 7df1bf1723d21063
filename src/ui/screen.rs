use super::{Mask, Message, PresentationCommand};
use crate::grid::{Grid, Row};

/// Which part of the display must be redrawn after a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Redraw {
    /// Clear and draw grid, cursor and mask.
    Full,
    /// Clear the cursor column and draw the marker.
    Cursor,
    /// Clear the mask area and draw the mask.
    Mask,
    /// Clear and draw the message alone.
    Message,
    Nothing,
}

/// What the display currently shows.
///
/// Cursor moves are dropped while no grid is visible; mask updates are
/// stored and shown with the next grid.
#[derive(Clone, Debug, Default)]
pub struct Screen {
    grid: Option<Grid>,
    cursor: Row,
    mask: Mask,
    message: Option<Message>,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    pub fn cursor(&self) -> Row {
        self.cursor
    }

    pub fn mask(&self) -> &str {
        &self.mask
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn grid_visible(&self) -> bool {
        self.grid.is_some() && self.message.is_none()
    }

    pub fn apply(&mut self, command: PresentationCommand) -> Redraw {
        match command {
            PresentationCommand::ShowGrid(grid) => {
                self.grid = Some(grid);
                self.message = None;
                Redraw::Full
            }
            PresentationCommand::ShowCursor(row) => {
                if !self.grid_visible() {
                    return Redraw::Nothing;
                }
                self.cursor = row;
                Redraw::Cursor
            }
            PresentationCommand::ShowMask(mask) => {
                self.mask = mask;
                if self.grid_visible() {
                    Redraw::Mask
                } else {
                    Redraw::Nothing
                }
            }
            PresentationCommand::ShowMessage(message) => {
                self.message = Some(message);
                Redraw::Message
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(s: &str) -> Mask {
        let mut m = Mask::new();
        m.push_str(s).unwrap();
        m
    }

    fn message(s: &str) -> Message {
        let mut m = Message::new();
        m.push_str(s).unwrap();
        m
    }

    #[test]
    fn grid_then_cursor_then_mask() {
        let mut screen = Screen::new();
        assert_eq!(screen.apply(PresentationCommand::ShowGrid(Grid::IDENTITY)), Redraw::Full);
        assert_eq!(screen.grid(), Some(&Grid::IDENTITY));

        let row = Row::new(2).unwrap();
        assert_eq!(screen.apply(PresentationCommand::ShowCursor(row)), Redraw::Cursor);
        assert_eq!(screen.cursor(), row);

        assert_eq!(screen.apply(PresentationCommand::ShowMask(mask("**"))), Redraw::Mask);
        assert_eq!(screen.mask(), "**");
    }

    #[test]
    fn message_hides_grid_and_drops_cursor_moves() {
        let mut screen = Screen::new();
        screen.apply(PresentationCommand::ShowGrid(Grid::IDENTITY));
        assert_eq!(
            screen.apply(PresentationCommand::ShowMessage(message("PIN CORRECT"))),
            Redraw::Message
        );
        assert!(!screen.grid_visible());
        assert_eq!(screen.message(), Some("PIN CORRECT"));

        assert_eq!(
            screen.apply(PresentationCommand::ShowCursor(Row::LAST)),
            Redraw::Nothing
        );
        assert_eq!(screen.cursor(), Row::FIRST);
    }

    #[test]
    fn mask_under_message_is_kept_for_next_grid() {
        let mut screen = Screen::new();
        screen.apply(PresentationCommand::ShowMessage(message("PIN INCORRECT")));
        assert_eq!(screen.apply(PresentationCommand::ShowMask(Mask::new())), Redraw::Nothing);
        assert_eq!(screen.mask(), "");

        assert_eq!(screen.apply(PresentationCommand::ShowGrid(Grid::IDENTITY)), Redraw::Full);
        assert!(screen.grid_visible());
        assert_eq!(screen.message(), None);
    }

    #[test]
    fn nothing_is_redrawn_before_the_first_grid() {
        let mut screen = Screen::new();
        assert!(!screen.grid_visible());
        assert_eq!(screen.apply(PresentationCommand::ShowCursor(Row::LAST)), Redraw::Nothing);
        assert_eq!(screen.apply(PresentationCommand::ShowMask(mask("*"))), Redraw::Nothing);
        assert_eq!(screen.cursor(), Row::FIRST);

        // The stored mask comes up with the grid.
        assert_eq!(screen.apply(PresentationCommand::ShowGrid(Grid::IDENTITY)), Redraw::Full);
        assert_eq!(screen.mask(), "*");
    }
}
