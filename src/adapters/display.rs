//! Display adapters: port traits over the dumb display drivers.

use crate::app::ports::{SegmentDisplayPort, TextDisplayPort};
use crate::drivers::lcd1602::Lcd1602;
use crate::drivers::tm1637::Tm1637;

/// 7-segment time display behind [`SegmentDisplayPort`].
pub struct SegmentDisplay {
    driver: Tm1637,
}

impl SegmentDisplay {
    pub fn new(brightness: u8) -> Self {
        Self {
            driver: Tm1637::new(brightness),
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn driver(&self) -> &Tm1637 {
        &self.driver
    }
}

impl SegmentDisplayPort for SegmentDisplay {
    fn show_digits(&mut self, digits: [u8; 4]) {
        self.driver.set_digits(digits);
    }

    fn set_colon(&mut self, on: bool) {
        self.driver.set_colon(on);
    }

    fn clear(&mut self) {
        self.driver.clear();
    }
}

/// Character display behind [`TextDisplayPort`].
pub struct TextDisplay {
    driver: Lcd1602,
}

impl TextDisplay {
    pub fn new() -> Self {
        Self {
            driver: Lcd1602::new(),
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn driver(&self) -> &Lcd1602 {
        &self.driver
    }
}

impl Default for TextDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl TextDisplayPort for TextDisplay {
    fn write_line(&mut self, row: u8, text: &str) {
        self.driver.write_line(row, text);
    }

    fn clear(&mut self) {
        self.driver.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ports::{SegmentDisplayPort, TextDisplayPort};

    #[test]
    fn segment_port_drives_the_tm1637_cache() {
        let mut d = SegmentDisplay::new(7);
        d.show_digits([2, 1, 3, 0]);
        d.set_colon(true);
        assert_eq!(d.driver().digits(), [2, 1, 3, 0]);
        assert!(d.driver().colon());
    }

    #[test]
    fn text_port_renders_through_the_lcd() {
        let mut d = TextDisplay::new();
        d.write_line(1, "T:21\u{00b0}C  H:63%");
        assert_eq!(d.driver().line(1), "T:21\u{00df}C  H:63%   ");
    }
}
