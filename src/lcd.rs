//! The display controller
//!
//! Every operation of [`Lcd`] turns into one or more command or data bytes, each
//! followed by the execution delay of its instruction class. The mirrored
//! display state is only updated after the bytes went out.

use embedded_hal::delay::DelayNs;

use crate::{
    command::{Command, CommandSet, MoveDirection, ShiftType, State},
    error::{ArgumentError, Error},
    sender::SendCommand,
    state::DisplayState,
};

mod init;
mod layout;

pub use init::Config;
pub use layout::DisplayLayout;

/// Where the controller is in its life
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lifecycle {
    /// Created, [`Lcd::init()`] not completed yet
    Uninitialized,
    /// Accepting operations
    Ready,
    /// A bus write failed, the display is in an unknown mode until the next [`Lcd::init()`]
    Faulted,
}

/// HD44780 driver on top of a [`SendCommand`] sender
///
/// Borrows the sender and the delayer for its whole life, so nothing else can put
/// bytes on the bus in the middle of a transfer.
pub struct Lcd<'a, 'b, Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    sender: &'a mut Sender,
    delayer: &'b mut Delayer,
    config: Config,
    state: DisplayState,
    lifecycle: Lifecycle,
}

impl<'a, 'b, Sender, Delayer> Lcd<'a, 'b, Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    /// Current [`Lifecycle`] state
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// `true` once [`Lcd::init()`] succeeded and no bus write failed since
    pub fn is_ready(&self) -> bool {
        self.lifecycle == Lifecycle::Ready
    }

    /// Geometry the driver was configured with
    pub fn get_layout(&self) -> DisplayLayout {
        self.config.get_layout()
    }

    /// Send a raw instruction opcode (RS low)
    ///
    /// Waits the execution time of the opcode class before returning. The mirrored
    /// state is not touched, prefer the dedicated methods.
    pub fn send_command(&mut self, opcode: u8) -> Result<(), Error<Sender::Error>> {
        self.transmit(Command::instruction(opcode))
    }

    /// Send a raw data byte (RS high) to wherever the address counter points
    ///
    /// The mirrored cursor is not moved, use [`Lcd::write_u8_to_cur`] to keep it in
    /// step with the display.
    pub fn send_data(&mut self, byte: u8) -> Result<(), Error<Sender::Error>> {
        self.transmit(Command::data(byte))
    }

    /// Clear the whole display and move the cursor to the top left
    ///
    /// The controller also switches back to left to right entry.
    pub fn clear_display(&mut self) -> Result<(), Error<Sender::Error>> {
        self.transmit(CommandSet::ClearDisplay)?;

        self.state.set_direction(MoveDirection::LeftToRight);
        self.state.set_cursor_pos((0, 0));
        Ok(())
    }

    /// Move the cursor to the top left and undo any display shift
    pub fn return_home(&mut self) -> Result<(), Error<Sender::Error>> {
        self.transmit(CommandSet::ReturnHome)?;

        self.state.set_cursor_pos((0, 0));
        Ok(())
    }

    /// Move the cursor to `(column, row)`
    pub fn set_cursor_pos(&mut self, pos: (u8, u8)) -> Result<(), Error<Sender::Error>> {
        self.ensure_ready()?;

        let raw_pos = self.get_layout().ddram_address(pos)?;
        self.transmit(CommandSet::SetDDRAM(raw_pos))?;

        self.state.set_cursor_pos(pos);
        Ok(())
    }

    /// Mirrored cursor position as `(column, row)`
    pub fn get_cursor_pos(&self) -> (u8, u8) {
        self.state.get_cursor_pos()
    }

    /// Write a byte of the character ROM (or a custom glyph index) at the cursor
    ///
    /// A write that follows the last column first moves to the next row, unless
    /// auto-scroll is on.
    pub fn write_u8_to_cur(&mut self, byte: u8) -> Result<(), Error<Sender::Error>> {
        self.ensure_ready()?;

        let layout = self.get_layout();

        if self.state.is_wrap_pending() && self.state.get_shift_type() == ShiftType::CursorOnly {
            let next_line = self.state.next_line_pos(layout.columns(), layout.rows());
            self.set_cursor_pos(next_line)?;
        }

        self.transmit(CommandSet::WriteDataToRAM(byte))?;

        self.state.advance_cursor(layout.columns());
        Ok(())
    }

    /// Write raw bytes at the cursor, see [`Lcd::write_u8_to_cur`]
    pub fn write_bytes_to_cur(&mut self, bytes: &[u8]) -> Result<(), Error<Sender::Error>> {
        bytes.iter().try_for_each(|&byte| self.write_u8_to_cur(byte))
    }

    /// Write [char] to current position
    ///
    /// `'\n'` moves to the start of the next row. Other characters outside
    /// ASCII 0x20 (white space) to 0x7D (`}`) are shown as a full rectangle.
    pub fn write_char_to_cur(&mut self, char: char) -> Result<(), Error<Sender::Error>> {
        if char == '\n' {
            self.ensure_ready()?;

            let layout = self.get_layout();
            let next_line = self.state.next_line_pos(layout.columns(), layout.rows());
            return self.set_cursor_pos(next_line);
        }

        // map char out side of ASCII 0x20 and 0x7D to full rectangle
        let out_byte = match char.is_ascii() {
            true if (0x20 <= char as u8) && (char as u8 <= 0x7D) => char as u8,
            _ => 0xFF,
        };

        self.write_u8_to_cur(out_byte)
    }

    /// Write string to current position
    pub fn write_str_to_cur(&mut self, str: &str) -> Result<(), Error<Sender::Error>> {
        str.chars().try_for_each(|char| self.write_char_to_cur(char))
    }

    /// Write string to specific position
    pub fn write_str_to_pos(&mut self, str: &str, pos: (u8, u8)) -> Result<(), Error<Sender::Error>> {
        self.set_cursor_pos(pos)?;
        self.write_str_to_cur(str)
    }

    /// Store a custom glyph in CGRAM slot `index`
    ///
    /// Each row of `graph_data` uses its lower 5 bits, top row first. Afterwards the
    /// cursor is back where it was, and the glyph can be shown with
    /// [`Lcd::write_graph_to_cur`].
    pub fn write_graph_to_cgram(
        &mut self,
        index: u8,
        graph_data: &[u8; 8],
    ) -> Result<(), Error<Sender::Error>> {
        self.ensure_ready()?;

        if index >= 8 {
            return Err(ArgumentError::GlyphIndexOutOfRange(index).into());
        }

        if let Some(&line) = graph_data.iter().find(|&&line| line >= 1 << 5) {
            return Err(ArgumentError::GlyphRowOutOfRange(line).into());
        }

        // with right to left entry the address counter decrements in CGRAM too,
        // and the rows would land bottom up
        let direction = self.state.get_direction();
        let shift_type = self.state.get_shift_type();

        if direction == MoveDirection::RightToLeft {
            self.transmit(CommandSet::EntryModeSet(MoveDirection::LeftToRight, shift_type))?;
        }

        self.transmit(CommandSet::SetCGRAM(index << 3))?;
        graph_data
            .iter()
            .try_for_each(|&line_data| self.transmit(CommandSet::WriteDataToRAM(line_data)))?;

        if direction == MoveDirection::RightToLeft {
            self.transmit(CommandSet::EntryModeSet(direction, shift_type))?;
        }

        // data writes keep landing in CGRAM until a DDRAM address is set
        let raw_pos = self.get_layout().ddram_address(self.state.get_cursor_pos())?;
        self.transmit(CommandSet::SetDDRAM(raw_pos))
    }

    /// Show custom glyph `index` at the cursor
    pub fn write_graph_to_cur(&mut self, index: u8) -> Result<(), Error<Sender::Error>> {
        self.ensure_ready()?;

        if index >= 8 {
            return Err(ArgumentError::GlyphIndexOutOfRange(index).into());
        }

        self.write_u8_to_cur(index)
    }

    /// Turn the whole display on or off, DDRAM content is kept
    pub fn set_display_state(&mut self, display: State) -> Result<(), Error<Sender::Error>> {
        self.ensure_ready()?;
        self.state.set_display_state(display);
        self.send_display_control()
    }

    /// Get the display state
    pub fn get_display_state(&self) -> State {
        self.state.get_display_state()
    }

    /// Show or hide the underline cursor
    pub fn set_cursor_state(&mut self, cursor: State) -> Result<(), Error<Sender::Error>> {
        self.ensure_ready()?;
        self.state.set_cursor_state(cursor);
        self.send_display_control()
    }

    /// Get the cursor state
    pub fn get_cursor_state(&self) -> State {
        self.state.get_cursor_state()
    }

    /// Blink the character block at the cursor
    pub fn set_cursor_blink_state(&mut self, blink: State) -> Result<(), Error<Sender::Error>> {
        self.ensure_ready()?;
        self.state.set_cursor_blink(blink);
        self.send_display_control()
    }

    /// Get the cursor blink state
    pub fn get_cursor_blink_state(&self) -> State {
        self.state.get_cursor_blink()
    }

    /// Switch the backlight, takes effect immediately
    pub fn set_backlight(&mut self, backlight: State) -> Result<(), Error<Sender::Error>> {
        self.ensure_ready()?;

        if let Err(e) = self.sender.set_backlight(backlight) {
            return Err(self.fault(e));
        }

        self.state.set_backlight(backlight);
        Ok(())
    }

    /// Get the backlight state
    pub fn get_backlight(&self) -> State {
        self.state.get_backlight()
    }

    /// Direction the cursor moves after each write
    pub fn set_direction(&mut self, dir: MoveDirection) -> Result<(), Error<Sender::Error>> {
        self.ensure_ready()?;
        self.state.set_direction(dir);
        self.send_entry_mode()
    }

    /// Get the cursor move direction
    pub fn get_direction(&self) -> MoveDirection {
        self.state.get_direction()
    }

    /// [`ShiftType::CursorAndDisplay`] turns on auto-scroll
    pub fn set_shift_type(&mut self, shift: ShiftType) -> Result<(), Error<Sender::Error>> {
        self.ensure_ready()?;
        self.state.set_shift_type(shift);
        self.send_entry_mode()
    }

    /// Get the shift type after each write
    pub fn get_shift_type(&self) -> ShiftType {
        self.state.get_shift_type()
    }

    /// Move the cursor, or scroll the whole display, by one position without writing
    pub fn shift_cursor_or_display(
        &mut self,
        shift_type: ShiftType,
        dir: MoveDirection,
    ) -> Result<(), Error<Sender::Error>> {
        self.transmit(CommandSet::CursorOrDisplayShift(shift_type, dir))?;

        if shift_type == ShiftType::CursorOnly {
            let layout = self.get_layout();

            // the address counter left the row, pull it back to the mirrored position
            if !self.state.shift_cursor(dir, layout.columns()) {
                let raw_pos = layout.ddram_address(self.state.get_cursor_pos())?;
                self.transmit(CommandSet::SetDDRAM(raw_pos))?;
            }
        }
        Ok(())
    }

    /// Wait for specified milliseconds
    pub fn delay_ms(&mut self, ms: u32) {
        self.delayer.delay_ms(ms);
    }

    /// Wait for specified microseconds
    pub fn delay_us(&mut self, us: u32) {
        self.delayer.delay_us(us)
    }

    fn send_display_control(&mut self) -> Result<(), Error<Sender::Error>> {
        self.transmit(CommandSet::DisplayOnOff {
            display: self.state.get_display_state(),
            cursor: self.state.get_cursor_state(),
            cursor_blink: self.state.get_cursor_blink(),
        })
    }

    fn send_entry_mode(&mut self) -> Result<(), Error<Sender::Error>> {
        self.transmit(CommandSet::EntryModeSet(
            self.state.get_direction(),
            self.state.get_shift_type(),
        ))
    }

    fn ensure_ready(&self) -> Result<(), Error<Sender::Error>> {
        match self.lifecycle {
            Lifecycle::Ready => Ok(()),
            Lifecycle::Uninitialized => Err(Error::NotInitialized),
            Lifecycle::Faulted => Err(Error::Faulted),
        }
    }

    fn transmit(&mut self, command: impl Into<Command>) -> Result<(), Error<Sender::Error>> {
        self.ensure_ready()?;

        match self.sender.send_and_settle(command.into(), self.delayer) {
            Ok(()) => Ok(()),
            Err(e) => Err(self.fault(e)),
        }
    }

    fn fault(&mut self, err: Sender::Error) -> Error<Sender::Error> {
        #[cfg(feature = "defmt")]
        defmt::warn!("LCD bus write failed, re-init required");

        self.lifecycle = Lifecycle::Faulted;
        Error::Transport(err)
    }
}

impl<'a, 'b, Sender, Delayer> core::fmt::Write for Lcd<'a, 'b, Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.write_str_to_cur(s).map_err(|_| core::fmt::Error)
    }
}
