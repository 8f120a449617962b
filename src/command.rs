//! HD44780 instruction set
//!
//! [`CommandSet`] names every instruction this driver issues, and converts into a
//! [`Command`]: the raw bits plus the register they go to. Read instructions are not
//! listed, the RW line of the backpack is always held low.

use crate::{timing, utils::BitOps};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum CommandSet {
    ClearDisplay,
    ReturnHome,
    EntryModeSet(MoveDirection, ShiftType),
    DisplayOnOff {
        display: State,
        cursor: State,
        cursor_blink: State,
    },
    CursorOrDisplayShift(ShiftType, MoveDirection),
    // these two are not commands from datasheet,
    // they are the single nibbles sent before the display is in 4 bit mode
    // we name them, to make things tidy
    HalfReset,
    HalfFunctionSet,
    FunctionSet(LineMode, Font),
    SetCGRAM(u8),
    SetDDRAM(u8),
    WriteDataToRAM(u8),
}

/// Address counter direction after each RAM write
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoveDirection {
    /// Address counter decrements
    RightToLeft,
    /// Address counter increments
    #[default]
    LeftToRight,
}

/// Whether the display window follows the cursor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShiftType {
    /// Only the cursor moves
    #[default]
    CursorOnly,
    /// The whole display shifts with the cursor (auto-scroll)
    CursorAndDisplay,
}

/// On/off switch of a display feature
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Switched off
    Off,
    /// Switched on
    #[default]
    On,
}

impl From<bool> for State {
    fn from(on: bool) -> Self {
        match on {
            true => State::On,
            false => State::Off,
        }
    }
}

impl From<State> for bool {
    fn from(state: State) -> Self {
        state == State::On
    }
}

/// Number of lines the controller drives
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineMode {
    /// One line
    OneLine,
    /// Two lines, also used by four row modules
    #[default]
    TwoLine,
}

/// Character font
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Font {
    /// 5x8 dots
    #[default]
    Font5x8,
    /// 5x10 dots, one line mode only
    Font5x10,
}

/// Which register of the display a byte goes to (the RS line)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterSelection {
    /// RS low
    Command,
    /// RS high
    Data,
}

/// Payload of a [`Command`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bits {
    /// A single nibble in the lower 4 bits, only used during the reset handshake
    Bit4(u8),
    /// A full byte, sent as two nibbles
    Bit8(u8),
}

/// A byte ready to be put on the bus
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command {
    rs: RegisterSelection,
    data: Bits,
}

impl Command {
    pub(crate) const fn new(rs: RegisterSelection, data: Bits) -> Self {
        Self { rs, data }
    }

    /// Any raw instruction opcode, sent with RS low
    pub const fn instruction(opcode: u8) -> Self {
        Self::new(RegisterSelection::Command, Bits::Bit8(opcode))
    }

    /// Any raw data byte, sent with RS high
    pub const fn data(byte: u8) -> Self {
        Self::new(RegisterSelection::Data, Bits::Bit8(byte))
    }

    /// Register the byte goes to
    pub fn get_register_selection(&self) -> RegisterSelection {
        self.rs
    }

    /// Raw bits to put on the data lines
    pub fn get_data(&self) -> Bits {
        self.data
    }

    /// How long the display stays busy after latching this command
    ///
    /// "Clear display" and "return home" (opcodes `0x01..=0x03`) are two orders
    /// of magnitude slower than everything else.
    pub fn execution_time_us(&self) -> u32 {
        match (self.rs, self.data) {
            (RegisterSelection::Data, _) => timing::DATA_WRITE_US,
            (RegisterSelection::Command, Bits::Bit8(opcode)) if opcode & 0b1111_1100 == 0 => {
                timing::CLEAR_HOME_US
            }
            (RegisterSelection::Command, _) => timing::INSTRUCTION_US,
        }
    }
}

impl From<CommandSet> for Command {
    fn from(command: CommandSet) -> Self {
        match command {
            CommandSet::ClearDisplay => Self::instruction(0b0000_0001),

            CommandSet::ReturnHome => Self::instruction(0b0000_0010),

            CommandSet::EntryModeSet(dir, st) => {
                let mut raw_bits: u8 = 0b0000_0100;

                raw_bits.put_bit(1, dir == MoveDirection::LeftToRight);
                raw_bits.put_bit(0, st == ShiftType::CursorAndDisplay);

                Self::instruction(raw_bits)
            }

            CommandSet::DisplayOnOff {
                display,
                cursor,
                cursor_blink,
            } => {
                let mut raw_bits: u8 = 0b0000_1000;

                raw_bits.put_bit(2, display.into());
                raw_bits.put_bit(1, cursor.into());
                raw_bits.put_bit(0, cursor_blink.into());

                Self::instruction(raw_bits)
            }

            CommandSet::CursorOrDisplayShift(st, dir) => {
                let mut raw_bits: u8 = 0b0001_0000;

                raw_bits.put_bit(3, st == ShiftType::CursorAndDisplay);
                raw_bits.put_bit(2, dir == MoveDirection::LeftToRight);

                Self::instruction(raw_bits)
            }

            CommandSet::HalfReset => Self::new(RegisterSelection::Command, Bits::Bit4(0b0011)),

            CommandSet::HalfFunctionSet => {
                Self::new(RegisterSelection::Command, Bits::Bit4(0b0010))
            }

            // DL bit (4) stays clear, this driver only speaks 4 bit mode
            CommandSet::FunctionSet(line, font) => {
                let mut raw_bits: u8 = 0b0010_0000;

                raw_bits.put_bit(3, line == LineMode::TwoLine);
                raw_bits.put_bit(2, font == Font::Font5x10);

                Self::instruction(raw_bits)
            }

            CommandSet::SetCGRAM(addr) => Self::instruction(0b0100_0000 | (addr & 0b0011_1111)),

            CommandSet::SetDDRAM(addr) => Self::instruction(0b1000_0000 | (addr & 0b0111_1111)),

            CommandSet::WriteDataToRAM(data) => Self::data(data),
        }
    }
}
