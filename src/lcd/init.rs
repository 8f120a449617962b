use embedded_hal::delay::DelayNs;

use crate::{
    command::{CommandSet, Font, MoveDirection, ShiftType, State},
    error::{ConfigError, Error},
    lcd::{DisplayLayout, Lcd, Lifecycle},
    sender::SendCommand,
    state::DisplayState,
    timing,
};

/// [`Config`] is the init config of a [`Lcd`]
///
/// The defaults are a 16x2 module with the 5x8 font, display on, cursor and blink off,
/// left to right without auto-scroll, and the backlight on.
#[derive(Clone, Copy, Debug, Default)]
pub struct Config {
    layout: DisplayLayout,
    font: Font,
    state: DisplayState,
}

impl Config {
    /// Get the display geometry
    pub fn get_layout(&self) -> DisplayLayout {
        self.layout
    }

    /// Set the display geometry, default is [`DisplayLayout::LCD16X2`]
    pub fn set_layout(mut self, layout: DisplayLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Get the font
    pub fn get_font(&self) -> Font {
        self.font
    }

    /// [`Font::Font5x10`] needs a one row layout
    pub fn set_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    /// Get the backlight state applied by [`Lcd::init()`]
    pub fn get_backlight(&self) -> State {
        self.state.get_backlight()
    }

    /// Set the backlight state applied by [`Lcd::init()`]
    pub fn set_backlight(mut self, backlight: State) -> Self {
        self.state.set_backlight(backlight);
        self
    }

    /// Get the initial display state
    pub fn get_display_state(&self) -> State {
        self.state.get_display_state()
    }

    /// Set the initial display state
    pub fn set_display_state(mut self, display: State) -> Self {
        self.state.set_display_state(display);
        self
    }

    /// Get the initial cursor state
    pub fn get_cursor_state(&self) -> State {
        self.state.get_cursor_state()
    }

    /// Set the initial cursor state
    pub fn set_cursor_state(mut self, cursor: State) -> Self {
        self.state.set_cursor_state(cursor);
        self
    }

    /// Get the initial cursor blink state
    pub fn get_cursor_blink(&self) -> State {
        self.state.get_cursor_blink()
    }

    /// Set the initial cursor blink state
    pub fn set_cursor_blink(mut self, blink: State) -> Self {
        self.state.set_cursor_blink(blink);
        self
    }

    /// Get the initial cursor move direction
    pub fn get_direction(&self) -> MoveDirection {
        self.state.get_direction()
    }

    /// Set the initial cursor move direction
    pub fn set_direction(mut self, dir: MoveDirection) -> Self {
        self.state.set_direction(dir);
        self
    }

    /// Get the initial shift type
    pub fn get_shift_type(&self) -> ShiftType {
        self.state.get_shift_type()
    }

    /// Set the initial shift type, [`ShiftType::CursorAndDisplay`] turns on auto-scroll
    pub fn set_shift_type(mut self, shift: ShiftType) -> Self {
        self.state.set_shift_type(shift);
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.font == Font::Font5x10 && self.layout.rows() > 1 {
            return Err(ConfigError::FontNeedsSingleLine);
        }

        Ok(())
    }
}

impl<'a, 'b, Sender, Delayer> Lcd<'a, 'b, Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    /// Create a [`Lcd`] driver, nothing is sent until [`Lcd::init()`]
    pub fn new(
        sender: &'a mut Sender,
        delayer: &'b mut Delayer,
        config: Config,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Lcd {
            sender,
            delayer,
            state: config.state,
            config,
            lifecycle: Lifecycle::Uninitialized,
        })
    }

    /// Run the power-on reset handshake, then apply the [`Config`]
    ///
    /// Can be called again at any time, it's the only way out of [`Lifecycle::Faulted`].
    pub fn init(&mut self) -> Result<(), Error<Sender::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("LCD init, layout {}", self.config.get_layout());

        self.lifecycle = Lifecycle::Uninitialized;

        match self.reset_sequence() {
            Ok(()) => {
                self.state = self.config.state;
                self.lifecycle = Lifecycle::Ready;
                Ok(())
            }
            Err(e) => Err(self.fault(e)),
        }
    }

    fn reset_sequence(&mut self) -> Result<(), Sender::Error> {
        let initial = self.config.state;
        let sender = &mut *self.sender;
        let delayer = &mut *self.delayer;

        // put the port in a known state, EN low
        sender.set_backlight(initial.get_backlight())?;

        // the display may still be in 8 bit mode, so only single nibbles until
        // "function set" switched it to 4 bit
        sender.delay_and_send(CommandSet::HalfReset.into(), delayer, timing::POWER_ON_US)?;
        sender.delay_and_send(CommandSet::HalfReset.into(), delayer, timing::FIRST_RESET_US)?;
        sender.delay_and_send(CommandSet::HalfReset.into(), delayer, timing::NEXT_RESET_US)?;
        sender.delay_and_send(
            CommandSet::HalfFunctionSet.into(),
            delayer,
            timing::NEXT_RESET_US,
        )?;
        delayer.delay_us(timing::NEXT_RESET_US);

        // line mode and font can't be changed after this
        [
            CommandSet::FunctionSet(self.config.get_layout().line_mode(), self.config.get_font()),
            CommandSet::DisplayOnOff {
                display: initial.get_display_state(),
                cursor: initial.get_cursor_state(),
                cursor_blink: initial.get_cursor_blink(),
            },
            CommandSet::ClearDisplay,
            CommandSet::EntryModeSet(initial.get_direction(), initial.get_shift_type()),
        ]
        .into_iter()
        .try_for_each(|command| sender.send_and_settle(command.into(), delayer))
    }
}
