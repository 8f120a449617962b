//! HD44780 timing, in microseconds
//!
//! Values follow the datasheet at the nominal 270 kHz oscillator. The driver never
//! relies on I2C transaction latency to satisfy any of them.

/// Wait after power-up before the first reset nibble (datasheet: more than 15 ms)
pub const POWER_ON_US: u32 = 50_000;

/// Wait after the first reset nibble (datasheet: more than 4.1 ms)
pub const FIRST_RESET_US: u32 = 4_500;

/// Wait after the following reset nibbles (datasheet: more than 100 us)
pub const NEXT_RESET_US: u32 = 150;

/// Hold time after each edge of the Enable pulse (datasheet: PW_EH 450 ns, t_cycE 1 us)
pub const ENABLE_PULSE_US: u32 = 1;

/// "Clear display" and "return home" (datasheet: 1.52 ms)
pub const CLEAR_HOME_US: u32 = 1_600;

/// Every other instruction (datasheet: 37 us)
pub const INSTRUCTION_US: u32 = 40;

/// Write data to CG/DDRAM (datasheet: 37 us + t_ADD 4 us)
pub const DATA_WRITE_US: u32 = 45;
