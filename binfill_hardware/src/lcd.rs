//! JHD1313-class Grove RGB character LCD (Linux, `hardware` feature).
//!
//! Two I2C devices behind one connector: an HD44780-style text controller
//! and a PCA9633 backlight driver.

use rppal::i2c::I2c;

use crate::error::{HwError, Result};
use binfill_traits::{DisplayDevice, Rgb};

const LCD_ADDR: u16 = 0x3e;
const RGB_ADDR: u16 = 0x62;

// Text controller registers
const REG_CMD: u8 = 0x80;
const REG_DATA: u8 = 0x40;
const CMD_CLEAR: u8 = 0x01;
const CMD_DISPLAY_ON: u8 = 0x08 | 0x04;
const CMD_TWO_LINES: u8 = 0x28;
const CMD_ROW2: u8 = 0x80 | 0x40;

// Backlight driver registers
const REG_MODE1: u8 = 0x00;
const REG_MODE2: u8 = 0x01;
const REG_OUTPUT: u8 = 0x08;
const REG_BLUE: u8 = 0x02;
const REG_GREEN: u8 = 0x03;
const REG_RED: u8 = 0x04;

pub struct RgbLcd {
    bus: I2c,
    width: usize,
}

impl RgbLcd {
    pub fn new(width: usize) -> Result<Self> {
        let bus = I2c::new().map_err(|e| HwError::I2c(e.to_string()))?;
        let mut lcd = Self {
            bus,
            width: width.max(1),
        };
        lcd.command(CMD_TWO_LINES)?;
        lcd.command(CMD_DISPLAY_ON)?;
        lcd.command(CMD_CLEAR)?;
        // Backlight out of standby, PWM on all channels.
        lcd.backlight_reg(REG_MODE1, 0x00)?;
        lcd.backlight_reg(REG_MODE2, 0x00)?;
        lcd.backlight_reg(REG_OUTPUT, 0xaa)?;
        Ok(lcd)
    }

    fn command(&mut self, cmd: u8) -> Result<()> {
        self.bus
            .set_slave_address(LCD_ADDR)
            .map_err(|e| HwError::I2c(e.to_string()))?;
        self.bus
            .write(&[REG_CMD, cmd])
            .map_err(|e| HwError::I2c(e.to_string()))?;
        Ok(())
    }

    fn write_row(&mut self, text: &str) -> Result<()> {
        self.bus
            .set_slave_address(LCD_ADDR)
            .map_err(|e| HwError::I2c(e.to_string()))?;
        for b in text.bytes().take(self.width) {
            self.bus
                .write(&[REG_DATA, b])
                .map_err(|e| HwError::I2c(e.to_string()))?;
        }
        Ok(())
    }

    fn backlight_reg(&mut self, reg: u8, value: u8) -> Result<()> {
        self.bus
            .set_slave_address(RGB_ADDR)
            .map_err(|e| HwError::I2c(e.to_string()))?;
        self.bus
            .write(&[reg, value])
            .map_err(|e| HwError::I2c(e.to_string()))?;
        Ok(())
    }

    fn set_color(&mut self, color: Rgb) -> Result<()> {
        self.backlight_reg(REG_RED, color.r)?;
        self.backlight_reg(REG_GREEN, color.g)?;
        self.backlight_reg(REG_BLUE, color.b)?;
        Ok(())
    }
}

impl DisplayDevice for RgbLcd {
    fn render(
        &mut self,
        percentage: u8,
        bar: &str,
        color: Rgb,
    ) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.set_color(color)?;
        self.command(CMD_CLEAR)?;
        self.write_row(&format!("full {percentage}%"))?;
        self.command(CMD_ROW2)?;
        self.write_row(bar)?;
        Ok(())
    }
}
