//! Errors returned by the driver

use core::fmt;

/// Errors of a [`Lcd`](crate::lcd::Lcd) operation
///
/// `E` is the error type of the underlying sender, usually the I2C bus error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// The bus write failed, the controller is now [`Lifecycle::Faulted`](crate::lcd::Lifecycle::Faulted)
    Transport(E),
    /// [`Lcd::init()`](crate::lcd::Lcd::init) has not completed yet
    NotInitialized,
    /// A previous bus failure left the display in an unknown mode, call
    /// [`Lcd::init()`](crate::lcd::Lcd::init) again
    Faulted,
    /// Argument rejected before anything was sent
    InvalidArgument(ArgumentError),
}

/// Out-of-range arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ArgumentError {
    /// Column is not on the display
    ColumnOutOfRange(u8),
    /// Row is not on the display
    RowOutOfRange(u8),
    /// Only 8 custom glyphs fit in CGRAM
    GlyphIndexOutOfRange(u8),
    /// Glyph rows only use the lower 5 bits
    GlyphRowOutOfRange(u8),
}

/// Rejected configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Expander bit position above 7
    PinOutOfRange(u8),
    /// Two roles mapped to the same expander bit
    PinConflict(u8),
    /// Displays have 1 to 4 rows
    InvalidRowCount(u8),
    /// Zero columns
    InvalidColumnCount(u8),
    /// Row base address plus column count runs past the DDRAM address space
    RowOutOfDdram(u8),
    /// The 5x10 font only works in one line mode
    FontNeedsSingleLine,
}

impl<E> From<ArgumentError> for Error<E> {
    fn from(err: ArgumentError) -> Self {
        Error::InvalidArgument(err)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(e) => write!(f, "bus write failed: {:?}", e),
            Error::NotInitialized => f.write_str("display not initialized"),
            Error::Faulted => f.write_str("display faulted, re-initialization required"),
            Error::InvalidArgument(e) => write!(f, "invalid argument: {}", e),
        }
    }
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentError::ColumnOutOfRange(col) => write!(f, "column {} out of range", col),
            ArgumentError::RowOutOfRange(row) => write!(f, "row {} out of range", row),
            ArgumentError::GlyphIndexOutOfRange(index) => {
                write!(f, "glyph index {} out of range, should be less than 8", index)
            }
            ArgumentError::GlyphRowOutOfRange(line) => {
                write!(f, "glyph row {:#04x} uses more than 5 bits", line)
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::PinOutOfRange(bit) => write!(f, "expander bit {} out of range", bit),
            ConfigError::PinConflict(bit) => write!(f, "expander bit {} mapped twice", bit),
            ConfigError::InvalidRowCount(rows) => write!(f, "{} rows not supported", rows),
            ConfigError::InvalidColumnCount(cols) => write!(f, "{} columns not supported", cols),
            ConfigError::RowOutOfDdram(row) => write!(f, "row {} does not fit in DDRAM", row),
            ConfigError::FontNeedsSingleLine => f.write_str("5x10 font needs a one row display"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E> defmt::Format for Error<E> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Error::Transport(_e) => defmt::write!(fmt, "Transport error"),
            Error::NotInitialized => defmt::write!(fmt, "Not initialized"),
            Error::Faulted => defmt::write!(fmt, "Faulted"),
            Error::InvalidArgument(e) => defmt::write!(fmt, "Invalid argument: {}", e),
        }
    }
}
