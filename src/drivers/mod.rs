//! Hardware drivers — dumb peripherals over raw ESP-IDF sys calls.
//!
//! | Driver    | Peripheral                          | Bus            |
//! |-----------|-------------------------------------|----------------|
//! | `hw_init` | GPIO, I2C master, LEDC PWM setup    | —              |
//! | `tm1637`  | 4-digit 7-segment time display      | 2-wire bit-bang|
//! | `lcd1602` | 2×16 character display (HD44780)    | I2C (PCF8574)  |
//! | `buzzer`  | Piezo chime tones                   | LEDC PWM       |
//!
//! Every driver compiles on the host with the hardware calls stubbed to
//! no-ops, so the adapters above them stay testable off-target.

pub mod buzzer;
pub mod hw_init;
pub mod lcd1602;
pub mod tm1637;
