//! Built-in sender
//! If you want to drive the LCD through another bus adapter, you will need to implement [`SendCommand`] trait

use embedded_hal::delay::DelayNs;

use crate::command::{Command, State};

mod i2c_sender;

pub use i2c_sender::I2cSender;

/// [`SendCommand`] is the trait a sender should implement to communicate with the hardware
pub trait SendCommand<Delayer: DelayNs> {
    /// Error of the underlying bus
    type Error;

    /// Put a [`Command`] on the bus
    ///
    /// On return the display has latched the command, but may still be executing it.
    fn send(&mut self, command: Command, delayer: &mut Delayer) -> Result<(), Self::Error>;

    /// Wait specific duration, and send command
    fn delay_and_send(
        &mut self,
        command: Command,
        delayer: &mut Delayer,
        delay_us: u32,
    ) -> Result<(), Self::Error> {
        delayer.delay_us(delay_us);
        self.send(command, delayer)
    }

    /// Send command, then wait until the display has executed it
    fn send_and_settle(&mut self, command: Command, delayer: &mut Delayer) -> Result<(), Self::Error> {
        self.send(command, delayer)?;
        delayer.delay_us(command.execution_time_us());
        Ok(())
    }

    /// Get the current backlight
    ///
    /// Note:
    /// If a driver doesn't support backlight control, just report the default
    fn get_backlight(&self) -> State {
        State::default()
    }

    /// Set the backlight, it should take effect immediately
    ///
    /// Note:
    /// If a driver doesn't support change backlight, just silently bypass it
    #[allow(unused_variables)]
    fn set_backlight(&mut self, backlight: State) -> Result<(), Self::Error> {
        Ok(())
    }
}
