/*!
# LCD 1602 I2C Driver

Driver for HD44780 character LCDs behind a PCF8574 I2C backpack, in 4-bit mode.

Basic Usage:

1. Initialize a "sender" <br/>
    This crate includes [`sender::I2cSender`], which drives the backpack over any
    [`embedded_hal::i2c::I2c`] bus. Other adapters only need to implement [`sender::SendCommand`].
<br/>
<br/>
2. Use [`lcd::Lcd::new()`] to create a [`lcd::Lcd`], then [`lcd::Lcd::init()`] to run the
   power-on handshake
<br/>
<br/>
3. Use any methods provided by [`lcd::Lcd`] to control the display

```no_run
use core::fmt::Write;
use embedded_hal::{delay::DelayNs, i2c::I2c};
use lcd1602_i2c_driver::{
    command::State,
    lcd::{Config, DisplayLayout, Lcd},
    pins::PinMapping,
    sender::I2cSender,
};

fn hello(i2c: &mut impl I2c, delay: &mut impl DelayNs) {
    let mut sender = I2cSender::new(i2c, 0x27, PinMapping::PCF8574);
    let config = Config::default()
        .set_layout(DisplayLayout::LCD20X4)
        .set_cursor_state(State::On);

    let mut lcd = Lcd::new(&mut sender, delay, config).unwrap();
    if lcd.init().is_ok() {
        let _ = write!(lcd, "hello\nworld");
    }
}
```

Every operation fails with [`error::Error::NotInitialized`] until [`lcd::Lcd::init()`]
succeeded. A failed bus write leaves the driver [`lcd::Lifecycle::Faulted`], only another
[`lcd::Lcd::init()`] brings it back.
*/

#![no_std]
#![warn(missing_docs)]

pub mod command;
pub mod error;
pub mod lcd;
pub mod pins;
pub mod sender;
mod state;
pub mod timing;
pub mod utils;

#[cfg(test)]
mod test_support;
