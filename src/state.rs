use crate::command::{MoveDirection, ShiftType, State};

/// Software copy of everything the display can't report back
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct DisplayState {
    display_on: State,
    cursor_on: State,
    cursor_blink: State,
    direction: MoveDirection,
    shift_type: ShiftType,
    backlight: State,
    cursor_pos: (u8, u8),
    // the last write landed on the final column, next write starts a new row
    wrap_pending: bool,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            display_on: State::On,
            cursor_on: State::Off,
            cursor_blink: State::Off,
            direction: MoveDirection::LeftToRight,
            shift_type: ShiftType::CursorOnly,
            backlight: State::On,
            cursor_pos: (0, 0),
            wrap_pending: false,
        }
    }
}

impl DisplayState {
    pub(crate) fn get_backlight(&self) -> State {
        self.backlight
    }

    pub(crate) fn set_backlight(&mut self, backlight: State) {
        self.backlight = backlight;
    }

    pub(crate) fn get_display_state(&self) -> State {
        self.display_on
    }

    pub(crate) fn set_display_state(&mut self, display: State) {
        self.display_on = display;
    }

    pub(crate) fn get_cursor_state(&self) -> State {
        self.cursor_on
    }

    pub(crate) fn set_cursor_state(&mut self, cursor: State) {
        self.cursor_on = cursor;
    }

    pub(crate) fn get_cursor_blink(&self) -> State {
        self.cursor_blink
    }

    pub(crate) fn set_cursor_blink(&mut self, blink: State) {
        self.cursor_blink = blink;
    }

    pub(crate) fn get_direction(&self) -> MoveDirection {
        self.direction
    }

    pub(crate) fn set_direction(&mut self, dir: MoveDirection) {
        self.direction = dir;
    }

    pub(crate) fn get_shift_type(&self) -> ShiftType {
        self.shift_type
    }

    pub(crate) fn set_shift_type(&mut self, shift: ShiftType) {
        self.shift_type = shift;
    }

    pub(crate) fn get_cursor_pos(&self) -> (u8, u8) {
        self.cursor_pos
    }

    pub(crate) fn set_cursor_pos(&mut self, pos: (u8, u8)) {
        self.cursor_pos = pos;
        self.wrap_pending = false;
    }

    pub(crate) fn is_wrap_pending(&self) -> bool {
        self.wrap_pending
    }

    /// Mirror the address counter after a RAM write
    ///
    /// The column never leaves the display, stepping off either edge marks a
    /// pending wrap instead.
    pub(crate) fn advance_cursor(&mut self, columns: u8) {
        let (col, row) = self.cursor_pos;

        match self.direction {
            MoveDirection::LeftToRight => {
                if col + 1 >= columns {
                    self.wrap_pending = true;
                } else {
                    self.cursor_pos = (col + 1, row);
                }
            }
            MoveDirection::RightToLeft => {
                if col == 0 {
                    self.wrap_pending = true;
                } else {
                    self.cursor_pos = (col - 1, row);
                }
            }
        }
    }

    /// Start of the following row, in writing direction. The last row wraps to the first.
    pub(crate) fn next_line_pos(&self, columns: u8, rows: u8) -> (u8, u8) {
        let row = (self.cursor_pos.1 + 1) % rows;

        match self.direction {
            MoveDirection::LeftToRight => (0, row),
            MoveDirection::RightToLeft => (columns - 1, row),
        }
    }

    /// Mirror a cursor shift of the address counter
    ///
    /// One step past the last column in writing direction is the same pending wrap a
    /// write leaves behind. Any other step off the row is clamped to the row, and
    /// `false` tells the caller the display must be re-addressed to match.
    pub(crate) fn shift_cursor(&mut self, dir: MoveDirection, columns: u8) -> bool {
        let (col, row) = self.cursor_pos;
        let last = columns as i16 - 1;

        // with a pending wrap the address counter is already one past the edge
        let writing_edge = match self.direction {
            MoveDirection::LeftToRight => last + 1,
            MoveDirection::RightToLeft => -1,
        };
        let current = match self.wrap_pending {
            true => writing_edge,
            false => col as i16,
        };

        let target = match dir {
            MoveDirection::LeftToRight => current + 1,
            MoveDirection::RightToLeft => current - 1,
        };

        self.set_cursor_pos((target.clamp(0, last) as u8, row));

        if (0..=last).contains(&target) {
            true
        } else if target == writing_edge {
            self.wrap_pending = true;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_power_on_setup() {
        let state = DisplayState::default();
        assert_eq!(state.get_display_state(), State::On);
        assert_eq!(state.get_cursor_state(), State::Off);
        assert_eq!(state.get_cursor_blink(), State::Off);
        assert_eq!(state.get_direction(), MoveDirection::LeftToRight);
        assert_eq!(state.get_shift_type(), ShiftType::CursorOnly);
        assert_eq!(state.get_cursor_pos(), (0, 0));
    }

    #[test]
    fn wrap_is_deferred_until_the_last_column_is_written() {
        let mut state = DisplayState::default();
        state.set_cursor_pos((14, 0));

        state.advance_cursor(16);
        assert_eq!(state.get_cursor_pos(), (15, 0));
        assert!(!state.is_wrap_pending());

        state.advance_cursor(16);
        assert_eq!(state.get_cursor_pos(), (15, 0));
        assert!(state.is_wrap_pending());
        assert_eq!(state.next_line_pos(16, 2), (0, 1));

        state.set_cursor_pos((0, 1));
        assert!(!state.is_wrap_pending());
    }

    #[test]
    fn right_to_left_wraps_at_column_zero() {
        let mut state = DisplayState::default();
        state.set_direction(MoveDirection::RightToLeft);
        state.set_cursor_pos((1, 1));

        state.advance_cursor(16);
        assert_eq!(state.get_cursor_pos(), (0, 1));
        state.advance_cursor(16);
        assert!(state.is_wrap_pending());
        // last row wraps to the first
        assert_eq!(state.next_line_pos(16, 2), (15, 0));
    }

    #[test]
    fn cursor_shift_inside_the_row() {
        let mut state = DisplayState::default();
        state.set_cursor_pos((5, 1));

        assert!(state.shift_cursor(MoveDirection::LeftToRight, 16));
        assert_eq!(state.get_cursor_pos(), (6, 1));
        assert!(state.shift_cursor(MoveDirection::RightToLeft, 16));
        assert!(state.shift_cursor(MoveDirection::RightToLeft, 16));
        assert_eq!(state.get_cursor_pos(), (4, 1));
        assert!(!state.is_wrap_pending());
    }

    #[test]
    fn cursor_shift_back_from_pending_wrap_keeps_the_last_column() {
        let mut state = DisplayState::default();
        state.set_cursor_pos((15, 0));
        state.advance_cursor(16);
        assert!(state.is_wrap_pending());

        // the address counter sits on column 16, one step back is column 15
        assert!(state.shift_cursor(MoveDirection::RightToLeft, 16));
        assert_eq!(state.get_cursor_pos(), (15, 0));
        assert!(!state.is_wrap_pending());
    }

    #[test]
    fn cursor_shift_past_the_last_column_is_a_pending_wrap() {
        let mut state = DisplayState::default();
        state.set_cursor_pos((15, 0));

        assert!(state.shift_cursor(MoveDirection::LeftToRight, 16));
        assert_eq!(state.get_cursor_pos(), (15, 0));
        assert!(state.is_wrap_pending());

        // two past the edge can't be mirrored
        assert!(!state.shift_cursor(MoveDirection::LeftToRight, 16));
        assert_eq!(state.get_cursor_pos(), (15, 0));
        assert!(!state.is_wrap_pending());
    }

    #[test]
    fn cursor_shift_against_writing_direction_off_the_row() {
        let mut state = DisplayState::default();
        assert!(!state.shift_cursor(MoveDirection::RightToLeft, 16));
        assert_eq!(state.get_cursor_pos(), (0, 0));
        assert!(!state.is_wrap_pending());

        state.set_direction(MoveDirection::RightToLeft);
        state.set_cursor_pos((15, 1));
        assert!(!state.shift_cursor(MoveDirection::LeftToRight, 16));
        assert_eq!(state.get_cursor_pos(), (15, 1));

        // right to left, the writing edge is left of column 0
        state.set_cursor_pos((0, 1));
        assert!(state.shift_cursor(MoveDirection::RightToLeft, 16));
        assert!(state.is_wrap_pending());
        assert!(state.shift_cursor(MoveDirection::LeftToRight, 16));
        assert_eq!(state.get_cursor_pos(), (0, 1));
        assert!(!state.is_wrap_pending());
    }
}
