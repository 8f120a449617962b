use embedded_hal::{delay::DelayNs, i2c::I2c};

use crate::{
    command::{Bits, Command, RegisterSelection, State},
    pins::PinMapping,
    sender::SendCommand,
    timing,
    utils::split_nibbles,
};

/// Sender for a PCF8574-style I2C backpack
///
/// Every write to the expander is a single byte that sets all eight port lines at
/// once. One nibble takes two writes: first with EN high, then the same byte with
/// EN low. The display latches on that falling edge.
///
/// With [`PinMapping::PCF8574`], P7 -> P0 is DB7/DB6/DB5/DB4/BL/EN/RW/RS.
pub struct I2cSender<'a, I2cLcd: I2c> {
    i2c: &'a mut I2cLcd,
    addr: u8,
    pins: PinMapping,
    backlight: State,
}

impl<'a, I2cLcd: I2c> I2cSender<'a, I2cLcd> {
    /// `addr` is the 7-bit address of the expander, usually `0x27` or `0x3F`
    ///
    /// Backlight starts off, it's set by the first [`SendCommand::set_backlight`].
    pub fn new(i2c: &'a mut I2cLcd, addr: u8, pins: PinMapping) -> Self {
        Self {
            i2c,
            addr,
            pins,
            backlight: State::Off,
        }
    }

    /// 7-bit address of the expander
    pub fn address(&self) -> u8 {
        self.addr
    }

    /// Wiring between expander and display
    pub fn pins(&self) -> PinMapping {
        self.pins
    }

    /// Port value for one nibble, EN low
    ///
    /// RW is never set.
    fn port_value(&self, nibble: u8, rs: RegisterSelection) -> u8 {
        let mut port = self.pins.data_bits(nibble);

        if rs == RegisterSelection::Data {
            port |= self.pins.rs_mask();
        }

        if self.backlight == State::On {
            port |= self.pins.backlight_mask();
        }

        port
    }

    /// The only place EN is driven
    ///
    /// The two writes must not be split or reordered, any other port change
    /// while EN is high corrupts the transfer.
    fn pulse_nibble<Delayer: DelayNs>(
        &mut self,
        port: u8,
        delayer: &mut Delayer,
    ) -> Result<(), I2cLcd::Error> {
        let en = self.pins.en_mask();

        self.i2c.write(self.addr, &[port | en])?;
        delayer.delay_us(timing::ENABLE_PULSE_US);
        self.i2c.write(self.addr, &[port & !en])?;
        delayer.delay_us(timing::ENABLE_PULSE_US);

        Ok(())
    }

    fn write_byte<Delayer: DelayNs>(
        &mut self,
        byte: u8,
        rs: RegisterSelection,
        delayer: &mut Delayer,
    ) -> Result<(), I2cLcd::Error> {
        let (high, low) = split_nibbles(byte);

        self.pulse_nibble(self.port_value(high, rs), delayer)?;
        self.pulse_nibble(self.port_value(low, rs), delayer)
    }
}

impl<'a, I2cLcd: I2c, Delayer: DelayNs> SendCommand<Delayer> for I2cSender<'a, I2cLcd> {
    type Error = I2cLcd::Error;

    fn send(&mut self, command: Command, delayer: &mut Delayer) -> Result<(), Self::Error> {
        let rs = command.get_register_selection();

        match command.get_data() {
            Bits::Bit4(nibble) => self.pulse_nibble(self.port_value(nibble, rs), delayer),
            Bits::Bit8(byte) => self.write_byte(byte, rs, delayer),
        }
    }

    fn get_backlight(&self) -> State {
        self.backlight
    }

    // a lone idle byte, EN stays low so the display doesn't latch anything
    fn set_backlight(&mut self, backlight: State) -> Result<(), Self::Error> {
        self.backlight = backlight;

        let idle = self.port_value(0, RegisterSelection::Command);
        self.i2c.write(self.addr, &[idle])
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::{
        command::CommandSet,
        test_support::{RecordingBus, RecordingDelay},
    };
    use embedded_hal_mock::eh1::{
        delay::NoopDelay,
        i2c::{Mock as I2cMock, Transaction as I2cTransaction},
    };

    const ADDR: u8 = 0x27;

    #[test]
    fn command_is_two_enable_pulses_high_nibble_first() {
        let expected = std::vec![
            // 0x28 - high nibble
            I2cTransaction::write(ADDR, std::vec![0b0010_0100]), // enable=1
            I2cTransaction::write(ADDR, std::vec![0b0010_0000]), // enable=0
            // 0x28 - low nibble
            I2cTransaction::write(ADDR, std::vec![0b1000_0100]), // enable=1
            I2cTransaction::write(ADDR, std::vec![0b1000_0000]), // enable=0
        ];

        let mut i2c = I2cMock::new(&expected);
        let mut sender = I2cSender::new(&mut i2c, ADDR, PinMapping::PCF8574);

        sender
            .send(Command::instruction(0x28), &mut NoopDelay::new())
            .unwrap();

        i2c.done();
    }

    #[test]
    fn data_sets_rs_on_every_write() {
        let expected = std::vec![
            I2cTransaction::write(ADDR, std::vec![0b0100_0101]), // 'A' 0x41 - high nibble, rs=1, enable=1
            I2cTransaction::write(ADDR, std::vec![0b0100_0001]), // 'A' 0x41 - high nibble, rs=1, enable=0
            I2cTransaction::write(ADDR, std::vec![0b0001_0101]), // 'A' 0x41 - low nibble, rs=1, enable=1
            I2cTransaction::write(ADDR, std::vec![0b0001_0001]), // 'A' 0x41 - low nibble, rs=1, enable=0
        ];

        let mut i2c = I2cMock::new(&expected);
        let mut sender = I2cSender::new(&mut i2c, ADDR, PinMapping::PCF8574);

        sender
            .send(CommandSet::WriteDataToRAM(b'A').into(), &mut NoopDelay::new())
            .unwrap();

        i2c.done();
    }

    #[test]
    fn half_command_is_a_single_pulse() {
        let expected = std::vec![
            I2cTransaction::write(ADDR, std::vec![0b0011_0100]),
            I2cTransaction::write(ADDR, std::vec![0b0011_0000]),
        ];

        let mut i2c = I2cMock::new(&expected);
        let mut sender = I2cSender::new(&mut i2c, ADDR, PinMapping::PCF8574);

        sender
            .send(CommandSet::HalfReset.into(), &mut NoopDelay::new())
            .unwrap();

        i2c.done();
    }

    #[test]
    fn backlight_is_an_idle_byte_then_rides_along() {
        let expected = std::vec![
            I2cTransaction::write(ADDR, std::vec![0b0000_1000]), // backlight on
            I2cTransaction::write(ADDR, std::vec![0b0000_1100]), // 0x01 - high nibble, enable=1
            I2cTransaction::write(ADDR, std::vec![0b0000_1000]), // 0x01 - high nibble, enable=0
            I2cTransaction::write(ADDR, std::vec![0b0001_1100]), // 0x01 - low nibble, enable=1
            I2cTransaction::write(ADDR, std::vec![0b0001_1000]), // 0x01 - low nibble, enable=0
            I2cTransaction::write(ADDR, std::vec![0b0000_0000]), // backlight off
        ];

        let mut i2c = I2cMock::new(&expected);
        let mut sender = I2cSender::new(&mut i2c, ADDR, PinMapping::PCF8574);
        let mut delay = NoopDelay::new();

        SendCommand::<NoopDelay>::set_backlight(&mut sender, State::On).unwrap();
        assert_eq!(SendCommand::<NoopDelay>::get_backlight(&sender), State::On);
        sender.send(Command::instruction(0x01), &mut delay).unwrap();
        SendCommand::<NoopDelay>::set_backlight(&mut sender, State::Off).unwrap();

        i2c.done();
    }

    #[test]
    fn enable_edge_and_rw_hold_for_every_byte() {
        let pins = PinMapping::PCF8574;

        for rs in [RegisterSelection::Command, RegisterSelection::Data] {
            for byte in 0..=u8::MAX {
                let mut bus = RecordingBus::default();
                let mut sender = I2cSender::new(&mut bus, ADDR, pins);

                sender
                    .send(Command::new(rs, Bits::Bit8(byte)), &mut NoopDelay::new())
                    .unwrap();

                let writes = &bus.writes;
                assert_eq!(writes.len(), 4);
                assert!(writes.iter().all(|w| w & pins.rw_mask() == 0));

                for pulse in writes.chunks(2) {
                    // second write differs from the first only by EN
                    assert_eq!(pulse[0] & pins.en_mask(), pins.en_mask());
                    assert_eq!(pulse[0] ^ pulse[1], pins.en_mask());
                }

                let high = pins.nibble_from_port(writes[0]);
                let low = pins.nibble_from_port(writes[2]);
                assert_eq!(crate::utils::join_nibbles(high, low), byte);
            }
        }
    }

    #[test]
    fn custom_wiring_moves_every_line() {
        // data on the low half, control on the high half
        let pins = PinMapping::new(4, 5, 6, 7, [0, 1, 2, 3]).unwrap();
        let expected = std::vec![
            I2cTransaction::write(ADDR, std::vec![0b1101_0100]), // 0x41 - high nibble, bl, en, rs
            I2cTransaction::write(ADDR, std::vec![0b1001_0100]),
            I2cTransaction::write(ADDR, std::vec![0b1101_0001]), // 0x41 - low nibble, bl, en, rs
            I2cTransaction::write(ADDR, std::vec![0b1001_0001]),
        ];

        let mut i2c = I2cMock::new(&expected);
        let mut sender = I2cSender::new(&mut i2c, ADDR, pins);
        // skip the idle byte, only the flag matters here
        sender.backlight = State::On;

        sender
            .send(Command::data(0x41), &mut NoopDelay::new())
            .unwrap();

        i2c.done();
    }

    #[test]
    fn pulse_holds_enable_and_settles() {
        let mut bus = RecordingBus::default();
        let mut sender = I2cSender::new(&mut bus, ADDR, PinMapping::PCF8574);
        let mut delay = RecordingDelay::default();

        sender
            .send_and_settle(Command::instruction(0x01), &mut delay)
            .unwrap();

        // one hold after each of the four writes, then the execution time
        assert_eq!(delay.delays_ns.len(), 5);
        assert!(delay.delays_ns[..4]
            .iter()
            .all(|&ns| ns == timing::ENABLE_PULSE_US * 1_000));
        assert!(delay.delays_ns[4] >= 1_520_000);
    }
}
