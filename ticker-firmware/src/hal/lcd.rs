//! HD44780 Text-LCD über PCF8574 I2C-Backpack
//!
//! 4-Bit-Modus, Pinbelegung des Backpacks:
//! P0 = RS, P1 = RW, P2 = E, P3 = Hintergrundlicht, P4..P7 = D4..D7.
//! Die Pfeile für die Kursrichtung liegen als eigene Zeichen im CGRAM.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use ticker_core::{DisplayError, Glyph, TextDisplay};

/// HD44780 Kommandos
mod cmd {
    pub const CLEAR: u8 = 0x01;
    pub const ENTRY_MODE_INCREMENT: u8 = 0x06;
    pub const DISPLAY_ON: u8 = 0x0C;
    pub const FUNCTION_SET_4BIT_2LINE: u8 = 0x28;
    pub const SET_CGRAM_ADDR: u8 = 0x40;
    pub const SET_DDRAM_ADDR: u8 = 0x80;
}

/// PCF8574 Bits
const RS: u8 = 0x01;
const ENABLE: u8 = 0x04;
const BACKLIGHT: u8 = 0x08;

/// DDRAM-Startadresse jeder Zeile (gilt auch für 20x4)
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// CGRAM-Slots der Richtungs-Glyphen
const CHAR_ARROW_UP: u8 = 0;
const CHAR_ARROW_DOWN: u8 = 1;
const CHAR_LEVEL: u8 = 2;

/// 5x8 Bitmaps, eine Zeile pro Byte
const GLYPHS: [(u8, [u8; 8]); 3] = [
    (
        CHAR_ARROW_UP,
        [0x04, 0x0E, 0x15, 0x04, 0x04, 0x04, 0x04, 0x00],
    ),
    (
        CHAR_ARROW_DOWN,
        [0x04, 0x04, 0x04, 0x04, 0x15, 0x0E, 0x04, 0x00],
    ),
    (CHAR_LEVEL, [0x00, 0x00, 0x1F, 0x00, 0x1F, 0x00, 0x00, 0x00]),
];

pub struct I2cLcd<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    cols: u8,
    rows: u8,
}

impl<I2C: I2c, D: DelayNs> I2cLcd<I2C, D> {
    pub fn new(i2c: I2C, delay: D, address: u8, cols: u8, rows: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
            cols,
            rows,
        }
    }

    /// Init-Sequenz laut Datenblatt (Umschalten in den 4-Bit-Modus)
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.delay.delay_ms(50);

        // Dreimal 8-Bit-Modus, dann 4-Bit
        self.write_nibble(0x03, 0)?;
        self.delay.delay_us(4_500);
        self.write_nibble(0x03, 0)?;
        self.delay.delay_us(4_500);
        self.write_nibble(0x03, 0)?;
        self.delay.delay_us(150);
        self.write_nibble(0x02, 0)?;

        self.command(cmd::FUNCTION_SET_4BIT_2LINE)?;
        self.command(cmd::DISPLAY_ON)?;
        self.command(cmd::ENTRY_MODE_INCREMENT)?;

        for (slot, bitmap) in GLYPHS {
            self.command(cmd::SET_CGRAM_ADDR | (slot << 3))?;
            for row in bitmap {
                self.data(row)?;
            }
        }

        self.clear()
    }

    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError> {
        let offset = ROW_OFFSETS
            .get(usize::from(row))
            .ok_or(DisplayError::OutOfBounds)?;
        self.command(cmd::SET_DDRAM_ADDR | (offset + col))
    }

    fn command(&mut self, value: u8) -> Result<(), DisplayError> {
        self.write_byte(value, 0)
    }

    fn data(&mut self, value: u8) -> Result<(), DisplayError> {
        self.write_byte(value, RS)
    }

    fn write_byte(&mut self, value: u8, mode: u8) -> Result<(), DisplayError> {
        self.write_nibble(value >> 4, mode)?;
        self.write_nibble(value & 0x0F, mode)
    }

    /// Ein Nibble an D4..D7 anlegen und mit E übernehmen
    fn write_nibble(&mut self, nibble: u8, mode: u8) -> Result<(), DisplayError> {
        let bits = (nibble << 4) | mode | BACKLIGHT;
        self.i2c
            .write(self.address, &[bits | ENABLE])
            .map_err(|_| DisplayError::BusError)?;
        self.delay.delay_us(1);
        self.i2c
            .write(self.address, &[bits])
            .map_err(|_| DisplayError::BusError)?;
        self.delay.delay_us(50);
        Ok(())
    }
}

impl<I2C: I2c, D: DelayNs> TextDisplay for I2cLcd<I2C, D> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.command(cmd::CLEAR)?;
        // Clear braucht 1.52 ms
        self.delay.delay_ms(2);
        Ok(())
    }

    fn write_at(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        if row >= self.rows || col >= self.cols {
            return Err(DisplayError::OutOfBounds);
        }
        self.set_cursor(row, col)?;

        let room = usize::from(self.cols - col);
        for ch in text.chars().take(room) {
            // Zeichensatz des HD44780 ist nur im ASCII-Bereich sicher
            let code = if ch.is_ascii() && !ch.is_ascii_control() {
                ch as u8
            } else {
                b'?'
            };
            self.data(code)?;
        }
        Ok(())
    }

    /// Slot n = n-te Spalte von rechts in Zeile 0
    fn set_indicator(&mut self, slot: u8, glyph: Glyph) -> Result<(), DisplayError> {
        if slot >= self.cols {
            return Err(DisplayError::OutOfBounds);
        }
        let code = match glyph {
            Glyph::ArrowUp => CHAR_ARROW_UP,
            Glyph::ArrowDown => CHAR_ARROW_DOWN,
            Glyph::Level => CHAR_LEVEL,
        };
        self.set_cursor(0, self.cols - 1 - slot)?;
        self.data(code)
    }
}
