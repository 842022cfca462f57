//! GPIO / peripheral pin assignments for the Reloj7 board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers. Change a pin here and it propagates everywhere.

/// TM1637 7-segment display clock line.
pub const TM1637_CLK_GPIO: i32 = 16;
/// TM1637 7-segment display data line (open-drain, pulled up on the module).
pub const TM1637_DIO_GPIO: i32 = 17;

/// I2C bus for the LCD1602 PCF8574 backpack.
pub const I2C_SDA_GPIO: i32 = 21;
pub const I2C_SCL_GPIO: i32 = 22;
/// PCF8574 backpack address (A0-A2 open).
pub const LCD_I2C_ADDR: u8 = 0x27;
/// I2C master clock (the PCF8574 tops out at standard mode).
pub const I2C_FREQ_HZ: u32 = 100_000;

/// Passive buzzer, driven by an LEDC PWM channel.
pub const BUZZER_GPIO: i32 = 25;

/// Buzzer PWM base frequency (Hz). Retuned per note at play time.
pub const BUZZER_PWM_FREQ_HZ: u32 = 2000;
