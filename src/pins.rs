//! Wiring between the I2C port expander and the LCD

use crate::{error::ConfigError, utils::BitOps};

/// Which bit of the expander output port drives each LCD line
///
/// All eight roles must sit on distinct bits, so a valid mapping always covers the
/// whole port. The RW bit is mapped only so that it is known to stay low: this
/// driver never reads back.
///
/// ```
/// use lcd1602_i2c_driver::pins::PinMapping;
///
/// // P0 -> P7: RS/RW/EN/BL/DB4/DB5/DB6/DB7
/// assert_eq!(PinMapping::default(), PinMapping::PCF8574);
///
/// // a backpack with the data lines on the low half of the port
/// let low_data = PinMapping::new(4, 5, 6, 7, [0, 1, 2, 3]).unwrap();
/// assert_eq!(low_data.data_bits(0b1001), 0b0000_1001);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinMapping {
    rs: u8,
    rw: u8,
    en: u8,
    backlight: u8,
    data: [u8; 4],
}

impl PinMapping {
    /// The common PCF8574(T/AT) backpack
    ///
    /// P7 -> P0: DB7/DB6/DB5/DB4/BL/EN/RW/RS
    pub const PCF8574: Self = Self {
        rs: 0,
        rw: 1,
        en: 2,
        backlight: 3,
        data: [4, 5, 6, 7],
    };

    /// Build a mapping, `data` lists the bits of DB4, DB5, DB6, DB7 in order
    pub const fn new(
        rs: u8,
        rw: u8,
        en: u8,
        backlight: u8,
        data: [u8; 4],
    ) -> Result<Self, ConfigError> {
        let bits = [rs, rw, en, backlight, data[0], data[1], data[2], data[3]];

        let mut seen: u8 = 0;
        let mut index = 0;
        while index < bits.len() {
            let bit = bits[index];
            if bit > 7 {
                return Err(ConfigError::PinOutOfRange(bit));
            }
            if seen & (1 << bit) != 0 {
                return Err(ConfigError::PinConflict(bit));
            }
            seen |= 1 << bit;
            index += 1;
        }

        Ok(Self {
            rs,
            rw,
            en,
            backlight,
            data,
        })
    }

    /// Port bit of the RS line
    pub const fn rs_mask(&self) -> u8 {
        1 << self.rs
    }

    /// Port bit of the RW line, never set by this driver
    pub const fn rw_mask(&self) -> u8 {
        1 << self.rw
    }

    /// Port bit of the EN line
    pub const fn en_mask(&self) -> u8 {
        1 << self.en
    }

    /// Port bit of the backlight transistor
    pub const fn backlight_mask(&self) -> u8 {
        1 << self.backlight
    }

    /// Place the lower 4 bits of `nibble` on the DB4-DB7 positions
    pub fn data_bits(&self, nibble: u8) -> u8 {
        let mut port = 0u8;
        self.data
            .iter()
            .enumerate()
            .for_each(|(index, &bit)| {
                port.put_bit(bit, (nibble >> index) & 1 == 1);
            });
        port
    }

    /// Read the DB4-DB7 positions of a port value back into a nibble
    pub fn nibble_from_port(&self, port: u8) -> u8 {
        let mut nibble = 0u8;
        self.data
            .iter()
            .enumerate()
            .for_each(|(index, &bit)| {
                nibble.put_bit(index as u8, (port >> bit) & 1 == 1);
            });
        nibble
    }
}

impl Default for PinMapping {
    fn default() -> Self {
        Self::PCF8574
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_masks() {
        let pins = PinMapping::default();
        assert_eq!(pins.rs_mask(), 0b0000_0001);
        assert_eq!(pins.rw_mask(), 0b0000_0010);
        assert_eq!(pins.en_mask(), 0b0000_0100);
        assert_eq!(pins.backlight_mask(), 0b0000_1000);
        assert_eq!(pins.data_bits(0x4), 0x40);
        assert_eq!(pins.data_bits(0xF), 0xF0);
    }

    #[test]
    fn data_bits_only_touch_data_lines() {
        let pins = PinMapping::PCF8574;
        let control = pins.rs_mask() | pins.rw_mask() | pins.en_mask() | pins.backlight_mask();
        for nibble in 0..16 {
            assert_eq!(pins.data_bits(nibble) & control, 0);
        }
    }

    #[test]
    fn scrambled_mapping_round_trips() {
        let pins = PinMapping::new(7, 6, 5, 4, [3, 1, 2, 0]).unwrap();
        assert_eq!(pins.data_bits(0b0001), 0b0000_1000);
        assert_eq!(pins.data_bits(0b1000), 0b0000_0001);
        for nibble in 0..16 {
            assert_eq!(pins.nibble_from_port(pins.data_bits(nibble)), nibble);
        }
    }

    #[test]
    fn rejects_overlapping_bits() {
        assert_eq!(
            PinMapping::new(0, 1, 2, 3, [4, 5, 6, 2]),
            Err(ConfigError::PinConflict(2))
        );
    }

    #[test]
    fn rejects_bits_outside_the_port() {
        assert_eq!(
            PinMapping::new(0, 1, 2, 8, [4, 5, 6, 7]),
            Err(ConfigError::PinOutOfRange(8))
        );
    }

    #[test]
    fn const_construction() {
        const CUSTOM: Result<PinMapping, ConfigError> = PinMapping::new(0, 1, 2, 3, [4, 5, 6, 7]);
        assert_eq!(CUSTOM, Ok(PinMapping::PCF8574));
    }
}
