//! TM1637 4-digit 7-segment display driver.
//!
//! Two-wire protocol bit-banged over GPIO (not I2C: no address byte, LSB
//! first). The driver caches the four digit values and the colon state
//! and rewrites the whole display RAM on any change, which keeps the
//! colon (wired to the segment-8 bit of grid 2) consistent.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the real bus via hw_init GPIO helpers.
//! On host/test: tracks the displayed state in-memory only.

use crate::drivers::hw_init;
use crate::pins;

/// Segment patterns for digits 0-9 (gfedcba order).
const DIGIT_SEGMENTS: [u8; 10] = [
    0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F,
];

/// Data command: write display RAM, auto-increment address.
const CMD_DATA_AUTO: u8 = 0x40;
/// Address command: display RAM base (grid 0).
const CMD_ADDR_BASE: u8 = 0xC0;
/// Control command: display on, brightness in the low 3 bits.
const CMD_DISPLAY_ON: u8 = 0x88;

/// Colon is the MSB of the second grid byte.
const COLON_BIT: u8 = 0x80;

/// Half-period of the bit clock (us). The TM1637 tops out around 250 kHz.
const BIT_DELAY_US: u32 = 5;

pub struct Tm1637 {
    digits: [u8; 4],
    colon: bool,
    brightness: u8,
}

impl Tm1637 {
    /// Brightness 0-7.
    pub fn new(brightness: u8) -> Self {
        Self {
            digits: [0; 4],
            colon: false,
            brightness: brightness.min(7),
        }
    }

    /// Display four digit values, most significant first. Values above 9
    /// render as blank.
    pub fn set_digits(&mut self, digits: [u8; 4]) {
        if self.digits != digits {
            self.digits = digits;
            self.flush();
        }
    }

    pub fn set_colon(&mut self, on: bool) {
        if self.colon != on {
            self.colon = on;
            self.flush();
        }
    }

    pub fn clear(&mut self) {
        self.digits = [0xFF; 4];
        self.colon = false;
        self.flush();
    }

    pub fn digits(&self) -> [u8; 4] {
        self.digits
    }

    pub fn colon(&self) -> bool {
        self.colon
    }

    /// Rewrite the full display RAM from the cached state.
    fn flush(&self) {
        let mut frame = [0u8; 4];
        for (i, &d) in self.digits.iter().enumerate() {
            frame[i] = DIGIT_SEGMENTS.get(d as usize).copied().unwrap_or(0x00);
        }
        if self.colon {
            frame[1] |= COLON_BIT;
        }

        self.start();
        self.write_byte(CMD_DATA_AUTO);
        self.stop();

        self.start();
        self.write_byte(CMD_ADDR_BASE);
        for &b in &frame {
            self.write_byte(b);
        }
        self.stop();

        self.start();
        self.write_byte(CMD_DISPLAY_ON | self.brightness);
        self.stop();
    }

    // ── Bus primitives ────────────────────────────────────────

    /// Start condition: DIO falls while CLK is high.
    fn start(&self) {
        hw_init::gpio_write(pins::TM1637_CLK_GPIO, true);
        hw_init::gpio_write(pins::TM1637_DIO_GPIO, true);
        hw_init::delay_us(BIT_DELAY_US);
        hw_init::gpio_write(pins::TM1637_DIO_GPIO, false);
        hw_init::delay_us(BIT_DELAY_US);
    }

    /// Stop condition: DIO rises while CLK is high.
    fn stop(&self) {
        hw_init::gpio_write(pins::TM1637_CLK_GPIO, false);
        hw_init::gpio_write(pins::TM1637_DIO_GPIO, false);
        hw_init::delay_us(BIT_DELAY_US);
        hw_init::gpio_write(pins::TM1637_CLK_GPIO, true);
        hw_init::delay_us(BIT_DELAY_US);
        hw_init::gpio_write(pins::TM1637_DIO_GPIO, true);
        hw_init::delay_us(BIT_DELAY_US);
    }

    /// Clock out one byte LSB first, then release DIO for the ACK slot.
    fn write_byte(&self, mut byte: u8) {
        for _ in 0..8 {
            hw_init::gpio_write(pins::TM1637_CLK_GPIO, false);
            hw_init::gpio_write(pins::TM1637_DIO_GPIO, byte & 1 != 0);
            hw_init::delay_us(BIT_DELAY_US);
            hw_init::gpio_write(pins::TM1637_CLK_GPIO, true);
            hw_init::delay_us(BIT_DELAY_US);
            byte >>= 1;
        }

        // ACK slot: release DIO (open-drain high) and clock once. The
        // chip's pull-low is not read back.
        hw_init::gpio_write(pins::TM1637_CLK_GPIO, false);
        hw_init::gpio_write(pins::TM1637_DIO_GPIO, true);
        hw_init::delay_us(BIT_DELAY_US);
        hw_init::gpio_write(pins::TM1637_CLK_GPIO, true);
        hw_init::delay_us(BIT_DELAY_US);
        hw_init::gpio_write(pins::TM1637_CLK_GPIO, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caches_digits_and_colon() {
        let mut d = Tm1637::new(7);
        d.set_digits([1, 2, 3, 4]);
        d.set_colon(true);
        assert_eq!(d.digits(), [1, 2, 3, 4]);
        assert!(d.colon());
    }

    #[test]
    fn clear_blanks_everything() {
        let mut d = Tm1637::new(7);
        d.set_digits([8, 8, 8, 8]);
        d.set_colon(true);
        d.clear();
        assert_eq!(d.digits(), [0xFF; 4]);
        assert!(!d.colon());
    }

    #[test]
    fn brightness_clamped_to_hw_range() {
        let d = Tm1637::new(200);
        assert_eq!(d.brightness, 7);
    }
}
