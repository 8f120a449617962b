use crate::{
    command::LineMode,
    error::{ArgumentError, ConfigError},
};

/// Size of the physical display, and where each row starts in DDRAM
///
/// Row 0 and row 1 always start at `0x00` and `0x40`. Rows 2 and 3 continue the
/// first two lines, so their base depends on the width: `0x10`/`0x50` on 16 column
/// modules, `0x14`/`0x54` on 20 column modules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayLayout {
    columns: u8,
    rows: u8,
    row_offsets: [u8; 4],
}

impl DisplayLayout {
    /// 8 columns, 2 rows
    pub const LCD8X2: Self = Self::preset(8, 2, [0x00, 0x40, 0x00, 0x40]);
    /// 16 columns, 1 row
    pub const LCD16X1: Self = Self::preset(16, 1, [0x00, 0x00, 0x00, 0x00]);
    /// 16 columns, 2 rows, the LCD1602
    pub const LCD16X2: Self = Self::preset(16, 2, [0x00, 0x40, 0x10, 0x50]);
    /// 16 columns, 4 rows
    pub const LCD16X4: Self = Self::preset(16, 4, [0x00, 0x40, 0x10, 0x50]);
    /// 20 columns, 2 rows
    pub const LCD20X2: Self = Self::preset(20, 2, [0x00, 0x40, 0x14, 0x54]);
    /// 20 columns, 4 rows, the LCD2004
    pub const LCD20X4: Self = Self::preset(20, 4, [0x00, 0x40, 0x14, 0x54]);
    /// 40 columns, 2 rows, a full DDRAM line per row
    pub const LCD40X2: Self = Self::preset(40, 2, [0x00, 0x40, 0x00, 0x40]);

    const fn preset(columns: u8, rows: u8, row_offsets: [u8; 4]) -> Self {
        Self {
            columns,
            rows,
            row_offsets,
        }
    }

    /// A custom geometry, entries of `row_offsets` past `rows` are ignored
    pub const fn new(columns: u8, rows: u8, row_offsets: [u8; 4]) -> Result<Self, ConfigError> {
        if rows == 0 || rows > 4 {
            return Err(ConfigError::InvalidRowCount(rows));
        }

        if columns == 0 || columns > 0x80 {
            return Err(ConfigError::InvalidColumnCount(columns));
        }

        let mut row = 0;
        while row < rows {
            // DDRAM addresses are 7 bit wide
            if row_offsets[row as usize] as u16 + columns as u16 > 0x80 {
                return Err(ConfigError::RowOutOfDdram(row));
            }
            row += 1;
        }

        Ok(Self::preset(columns, rows, row_offsets))
    }

    /// Visible columns per row
    pub const fn columns(&self) -> u8 {
        self.columns
    }

    /// Visible rows
    pub const fn rows(&self) -> u8 {
        self.rows
    }

    /// Line mode for "function set", every multi-row module runs the controller in two line mode
    pub const fn line_mode(&self) -> LineMode {
        match self.rows {
            1 => LineMode::OneLine,
            _ => LineMode::TwoLine,
        }
    }

    /// DDRAM address of `(column, row)`
    pub fn ddram_address(&self, pos: (u8, u8)) -> Result<u8, ArgumentError> {
        let (col, row) = pos;

        if row >= self.rows {
            return Err(ArgumentError::RowOutOfRange(row));
        }

        if col >= self.columns {
            return Err(ArgumentError::ColumnOutOfRange(col));
        }

        Ok(self.row_offsets[row as usize] + col)
    }
}

impl Default for DisplayLayout {
    fn default() -> Self {
        Self::LCD16X2
    }
}
