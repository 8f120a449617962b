//! Drive a LCD2004 through a PCF8574 backpack with a STM32F411RET6
//!
//! Wiring diagram
//!
//! PCF8574 backpack <-> STM32F411RET6
//!              GND <-> GND
//!              VCC <-> 5V
//!              SCL <-> PB6
//!              SDA <-> PB7
//!
//! Most backpacks already carry pull-up resistors on SCL and SDA. Unplug the
//! backpack while the demo runs to see the driver fault, plug it back to recover.

#![no_std]
#![no_main]

use core::fmt::Write;

use panic_rtt_target as _;
use rtt_target::{rprintln, rtt_init_print};
use stm32f4xx_hal::{
    i2c::{self, I2c},
    pac,
    prelude::*,
};

use lcd1602_i2c_driver::{
    command::{MoveDirection, ShiftType, State},
    lcd::{Config, DisplayLayout, Lcd, Lifecycle},
    pins::PinMapping,
    sender::I2cSender,
};

// a heart shape
const HEART: [u8; 8] = [
    0b00000, 0b00000, 0b01010, 0b11111, 0b01110, 0b00100, 0b00000, 0b00000,
];

// a smiley face
const SMILEY: [u8; 8] = [
    0b00000, 0b01010, 0b01010, 0b00000, 0b10001, 0b01110, 0b00000, 0b00000,
];

#[cortex_m_rt::entry]
fn main() -> ! {
    rtt_init_print!();

    let dp = pac::Peripherals::take().expect("Cannot take device peripherals");
    let cp = pac::CorePeripherals::take().expect("Cannot take core peripherals");

    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.use_hse(12.MHz()).freeze();

    let mut delayer = cp.SYST.delay(&clocks);

    let gpiob = dp.GPIOB.split();

    let mut i2c = I2c::new(
        dp.I2C1,
        (gpiob.pb6, gpiob.pb7),
        i2c::Mode::standard(100.kHz()), // The PCF8574T max I2C speed
        &clocks,
    );

    let mut sender = I2cSender::new(&mut i2c, 0x27, PinMapping::PCF8574);

    let config = Config::default()
        .set_layout(DisplayLayout::LCD20X4)
        .set_cursor_state(State::On)
        .set_cursor_blink(State::On);

    let mut lcd = Lcd::new(&mut sender, &mut delayer, config).expect("Invalid LCD config");

    while let Err(e) = lcd.init() {
        rprintln!("LCD init failed: {}", e);
        lcd.delay_ms(1_000);
    }
    rprintln!("LCD ready");

    if let Err(e) = run_demo(&mut lcd) {
        rprintln!("LCD demo stopped: {}", e);
    }

    // heartbeat counter, survives a pulled cable
    let mut seconds: u32 = 0;
    loop {
        lcd.delay_ms(1_000);
        seconds = seconds.wrapping_add(1);

        if lcd.lifecycle() == Lifecycle::Faulted {
            rprintln!("LCD faulted, re-init");
            if lcd.init().is_err() {
                continue;
            }
        }

        if lcd.set_cursor_pos((12, 3)).is_ok() {
            let _ = write!(lcd, "{:>6}s", seconds);
        }
    }
}

fn run_demo<S, D>(lcd: &mut Lcd<'_, '_, S, D>) -> Result<(), lcd1602_i2c_driver::error::Error<S::Error>>
where
    S: lcd1602_i2c_driver::sender::SendCommand<D>,
    D: embedded_hal::delay::DelayNs,
{
    lcd.write_graph_to_cgram(1, &HEART)?;
    lcd.write_graph_to_cgram(2, &SMILEY)?;

    lcd.set_cursor_pos((1, 0))?;
    lcd.write_str_to_cur("hello,")?;

    // '~' is not in the character ROM, it shows as a full rectangle
    lcd.write_str_to_cur(" world~")?;
    lcd.delay_ms(500);

    // wraps from the end of row 0 to the start of row 1
    lcd.set_cursor_pos((18, 0))?;
    lcd.write_str_to_cur("<<>>")?;
    lcd.delay_ms(500);

    lcd.set_cursor_blink_state(State::Off)?;

    lcd.set_direction(MoveDirection::RightToLeft)?;
    lcd.write_str_to_pos("!tfel", (19, 2))?;
    lcd.set_direction(MoveDirection::LeftToRight)?;

    lcd.set_cursor_pos((0, 3))?;
    lcd.write_graph_to_cur(1)?;
    lcd.write_graph_to_cur(2)?;

    lcd.set_cursor_state(State::Off)?;

    // scroll the whole picture out and back
    for _ in 0..4 {
        lcd.delay_ms(250);
        lcd.shift_cursor_or_display(ShiftType::CursorAndDisplay, MoveDirection::RightToLeft)?;
    }
    lcd.return_home()?;

    for _ in 0..3 {
        lcd.delay_ms(500);
        lcd.set_backlight(State::Off)?;
        lcd.delay_ms(500);
        lcd.set_backlight(State::On)?;
    }

    Ok(())
}
