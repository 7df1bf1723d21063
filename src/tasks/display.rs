//! SSD1306 OLED rendering of the [`Screen`] model.
//!
//! ```text
//!  x=10  x=25              x=80
//!   ▶    7 C 1 E            y=5
//!        0 5 B 2            y=20
//!        A 3 6 F           ***      (mask at y=27)
//!        9 8 D 4            y=50
//! ```

use defmt::{error, info, warn};
use embassy_nrf::peripherals::TWISPI0;
use embassy_nrf::twim::Twim;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle, Triangle};
use embedded_graphics::text::{Baseline, Text};
use gridpin::ui::{Redraw, Screen};
use gridpin::{Error, Pipeline, Result, Row};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

/// Type alias for the concrete display driver.
pub type Display<I2C> = Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

const GRID_X: i32 = 25;
const GRID_TOP: i32 = 5;
const ROW_PITCH: i32 = 15;
const CURSOR_X: i32 = 10;
const MASK_ORIGIN: Point = Point::new(80, 27);
const MESSAGE_ORIGIN: Point = Point::new(15, 30);

#[embassy_executor::task]
pub async fn display_task(i2c: Twim<'static, TWISPI0>, pipeline: &'static Pipeline) -> ! {
    let mut display = match init(i2c) {
        Ok(display) => {
            info!("Display: SSD1306 ready");
            Some(display)
        }
        Err(e) => {
            error!("Display: init failed: {}", e);
            None
        }
    };
    let mut screen = Screen::new();

    loop {
        // Commands are consumed even without a panel so producers never
        // see a permanently full queue.
        let command = pipeline.presentation.receive().await;
        let redraw = screen.apply(command);

        if let Some(display) = display.as_mut() {
            if let Err(e) = render(display, &screen, redraw) {
                warn!("Display: {}", e);
            }
        }
    }
}

/// Initialise the SSD1306 display and clear the screen.
pub fn init<I2C>(i2c: I2C) -> Result<Display<I2C>>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new(i2c);
    let mut display =
        Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0).into_buffered_graphics_mode();
    display.init().map_err(|_| Error::Display)?;
    display.clear_buffer();
    display.flush().map_err(|_| Error::Display)?;
    Ok(display)
}

fn text_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::On)
        .build()
}

fn blank() -> PrimitiveStyle<BinaryColor> {
    PrimitiveStyle::with_fill(BinaryColor::Off)
}

pub fn render<I2C>(display: &mut Display<I2C>, screen: &Screen, redraw: Redraw) -> Result<()>
where
    I2C: embedded_hal::i2c::I2c,
{
    match redraw {
        Redraw::Nothing => return Ok(()),
        Redraw::Full => {
            display.clear_buffer();
            if let Some(grid) = screen.grid() {
                for row in Row::all() {
                    let origin = Point::new(GRID_X, row_y(row));
                    let line = grid.row_text(row);
                    let _ = Text::with_baseline(&line, origin, text_style(), Baseline::Top).draw(display);
                }
            }
            draw_cursor(display, screen.cursor());
            draw_mask(display, screen.mask());
        }
        Redraw::Cursor => draw_cursor(display, screen.cursor()),
        Redraw::Mask => draw_mask(display, screen.mask()),
        Redraw::Message => {
            display.clear_buffer();
            let message = screen.message().unwrap_or_default();
            let _ = Text::with_baseline(message, MESSAGE_ORIGIN, text_style(), Baseline::Top).draw(display);
        }
    }

    display.flush().map_err(|_| Error::Display)
}

fn row_y(row: Row) -> i32 {
    GRID_TOP + row.index() as i32 * ROW_PITCH
}

/// Clear the marker column and draw a right-pointing triangle at `row`.
fn draw_cursor<I2C>(display: &mut Display<I2C>, row: Row)
where
    I2C: embedded_hal::i2c::I2c,
{
    let column = Rectangle::new(Point::zero(), Size::new((GRID_X - 1) as u32, 64));
    let _ = column.into_styled(blank()).draw(display);

    let y = row_y(row);
    let marker = Triangle::new(
        Point::new(CURSOR_X, y + 1),
        Point::new(CURSOR_X, y + 9),
        Point::new(CURSOR_X + 6, y + 5),
    );
    let _ = marker
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
        .draw(display);
}

fn draw_mask<I2C>(display: &mut Display<I2C>, mask: &str)
where
    I2C: embedded_hal::i2c::I2c,
{
    let area = Rectangle::new(MASK_ORIGIN, Size::new(48, 10));
    let _ = area.into_styled(blank()).draw(display);
    if !mask.is_empty() {
        let _ = Text::with_baseline(mask, MASK_ORIGIN, text_style(), Baseline::Top).draw(display);
    }
}
