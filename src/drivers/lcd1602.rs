//! LCD1602 character display behind a PCF8574 I2C backpack.
//!
//! Standard HD44780 4-bit initialization, with the backpack wiring
//! everyone ships: RS=P0, RW=P1 (tied low here), EN=P2, backlight=P3,
//! data nibble on P4-P7.
//!
//! Characters are Latin-1-ish: ASCII passes through, `°` maps to the
//! HD44780 ROM code 0xDF, anything else renders as a space.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: writes through the hw_init I2C helper.
//! On host/test: stores both lines in memory for assertions.

use crate::drivers::hw_init;
use crate::pins;

pub const COLUMNS: usize = 16;

const BACKLIGHT: u8 = 0x08;
const ENABLE: u8 = 0x04;
const RS_DATA: u8 = 0x01;

/// DDRAM base address per row.
const ROW_ADDR: [u8; 2] = [0x00, 0x40];

pub struct Lcd1602 {
    addr: u8,
    #[cfg(not(target_os = "espidf"))]
    lines: [String; 2],
}

impl Lcd1602 {
    /// Initialize the controller into 4-bit, 2-line mode with the cursor
    /// hidden. Must run after the I2C master is up.
    pub fn new() -> Self {
        let lcd = Self {
            addr: pins::LCD_I2C_ADDR,
            #[cfg(not(target_os = "espidf"))]
            lines: [String::new(), String::new()],
        };

        // HD44780 datasheet wake-up dance, then function set 4-bit/2-line,
        // display on / cursor off, clear, entry mode left-to-right.
        lcd.write_nibble(0x30, false);
        hw_init::delay_us(4500);
        lcd.write_nibble(0x30, false);
        hw_init::delay_us(4500);
        lcd.write_nibble(0x30, false);
        hw_init::delay_us(150);
        lcd.write_nibble(0x20, false);

        lcd.command(0x28);
        lcd.command(0x0C);
        lcd.command(0x01);
        hw_init::delay_us(2000);
        lcd.command(0x06);

        lcd
    }

    /// Write a full line (row 0 or 1), padded or truncated to 16 columns.
    pub fn write_line(&mut self, row: u8, text: &str) {
        let row = (row as usize).min(1);

        #[cfg(not(target_os = "espidf"))]
        {
            self.lines[row] = rendered(text);
        }

        self.command(0x80 | ROW_ADDR[row]);
        let mut written = 0;
        for ch in text.chars().take(COLUMNS) {
            self.data(encode(ch));
            written += 1;
        }
        for _ in written..COLUMNS {
            self.data(b' ');
        }
    }

    pub fn clear(&mut self) {
        #[cfg(not(target_os = "espidf"))]
        {
            self.lines = [" ".repeat(COLUMNS), " ".repeat(COLUMNS)];
        }
        self.command(0x01);
        hw_init::delay_us(2000);
    }

    /// Line content as rendered (host only).
    #[cfg(not(target_os = "espidf"))]
    pub fn line(&self, row: usize) -> &str {
        &self.lines[row]
    }

    // ── Bus primitives ────────────────────────────────────────

    fn command(&self, byte: u8) {
        self.write_byte(byte, false);
    }

    fn data(&self, byte: u8) {
        self.write_byte(byte, true);
    }

    fn write_byte(&self, byte: u8, is_data: bool) {
        self.write_nibble(byte & 0xF0, is_data);
        self.write_nibble(byte << 4, is_data);
    }

    /// Clock the high nibble of `bits` onto P4-P7 with an EN pulse.
    fn write_nibble(&self, bits: u8, is_data: bool) {
        let base = (bits & 0xF0) | BACKLIGHT | if is_data { RS_DATA } else { 0 };
        hw_init::i2c_write(self.addr, &[base | ENABLE]);
        hw_init::delay_us(1);
        hw_init::i2c_write(self.addr, &[base]);
        hw_init::delay_us(50);
    }
}

impl Default for Lcd1602 {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a character to HD44780 ROM code A00.
fn encode(ch: char) -> u8 {
    match ch {
        '\u{00b0}' => 0xDF,
        c if c.is_ascii() && !c.is_ascii_control() => c as u8,
        _ => b' ',
    }
}

#[cfg(not(target_os = "espidf"))]
fn rendered(text: &str) -> String {
    let mut out: String = text
        .chars()
        .take(COLUMNS)
        .map(|c| encode(c) as char)
        .collect();
    for _ in out.chars().count()..COLUMNS {
        out.push(' ');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_short_lines_to_full_width() {
        let mut lcd = Lcd1602::new();
        lcd.write_line(0, "P:1013HPa");
        assert_eq!(lcd.line(0), "P:1013HPa       ");
        assert_eq!(lcd.line(0).len(), COLUMNS);
    }

    #[test]
    fn truncates_long_lines() {
        let mut lcd = Lcd1602::new();
        lcd.write_line(1, "this line is much longer than sixteen");
        assert_eq!(lcd.line(1), "this line is muc");
    }

    #[test]
    fn degree_sign_maps_to_rom_code() {
        assert_eq!(encode('\u{00b0}'), 0xDF);
        assert_eq!(encode('T'), b'T');
        assert_eq!(encode('\u{00f1}'), b' ');
    }

    #[test]
    fn clear_blanks_both_lines() {
        let mut lcd = Lcd1602::default();
        lcd.write_line(0, "abc");
        lcd.clear();
        assert_eq!(lcd.line(0), " ".repeat(COLUMNS));
        assert_eq!(lcd.line(1), " ".repeat(COLUMNS));
    }
}
