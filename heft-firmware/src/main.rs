//! Heft - Kitchen Scale Firmware
//!
//! Main firmware binary for the RP2040 scale board: a rotary encoder with
//! push button, an HX711 load-cell amplifier and a 320x240 ST7789 panel.
//!
//! Pin map:
//! - Encoder A/B/SW: GPIO2/3/4 (pull-up, active low)
//! - HX711 DOUT/SCK: GPIO6/7
//! - LCD on SPI1: SCK GPIO10, MOSI GPIO11, CS GPIO9, DC GPIO8, RST GPIO12,
//!   backlight GPIO13

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::SPI1;
use embassy_rp::spi::{self, Blocking, Spi};
use embassy_time::Delay;
use embedded_hal_bus::spi::ExclusiveDevice;
use mipidsi::interface::SpiInterface;
use mipidsi::models::ST7789;
use mipidsi::options::{ColorInversion, Orientation, Rotation};
use mipidsi::Builder;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use heft_display::{EgCanvas, Renderer, SCREEN_HEIGHT, SCREEN_WIDTH};
use heft_drivers::sensor::Hx711;

mod config;
mod shared;
mod tasks;

/// LCD SPI clock
const LCD_SPI_HZ: u32 = 62_500_000;

/// Blocking SPI device for the panel
type LcdSpi = ExclusiveDevice<Spi<'static, SPI1, Blocking>, Output<'static>, Delay>;

/// ST7789 panel in landscape
pub type Lcd =
    mipidsi::Display<SpiInterface<'static, LcdSpi, Output<'static>>, ST7789, Output<'static>>;

/// Load cell on GPIO6/7
pub type Scale = Hx711<Input<'static>, Output<'static>, Delay>;

// Pixel staging buffer for the display interface (must live forever)
static LCD_BUF: StaticCell<[u8; 512]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Heft firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Display
    let mut spi_config = spi::Config::default();
    spi_config.frequency = LCD_SPI_HZ;
    let spi = Spi::new_blocking_txonly(p.SPI1, p.PIN_10, p.PIN_11, spi_config);
    let cs = Output::new(p.PIN_9, Level::High);
    let dc = Output::new(p.PIN_8, Level::Low);
    let rst = Output::new(p.PIN_12, Level::Low);
    let backlight = Output::new(p.PIN_13, Level::High);
    // Dropping an Output releases the pin; the backlight stays on for good
    core::mem::forget(backlight);

    let spi_device = match ExclusiveDevice::new(spi, cs, Delay) {
        Ok(device) => device,
        Err(e) => match e {},
    };
    let interface = SpiInterface::new(spi_device, dc, LCD_BUF.init([0u8; 512]));
    let display = match Builder::new(ST7789, interface)
        .display_size(SCREEN_HEIGHT, SCREEN_WIDTH)
        .orientation(Orientation::new().rotate(Rotation::Deg90))
        .invert_colors(ColorInversion::Inverted)
        .reset_pin(rst)
        .init(&mut Delay)
    {
        Ok(display) => display,
        Err(_) => defmt::panic!("LCD init failed"),
    };
    let mut canvas = EgCanvas::new(display);
    let mut renderer = Renderer::new();
    renderer.render_boot(&mut canvas, "Starting...", "");
    info!("LCD initialized");

    // Configuration
    let ui_config = config::load();
    renderer.render_boot(&mut canvas, "Config loaded", "Load cell...");

    // Load cell
    let dout = Input::new(p.PIN_6, Pull::None);
    let sck = Output::new(p.PIN_7, Level::Low);
    let scale = match Hx711::new(dout, sck, Delay) {
        Ok(scale) => scale,
        Err(e) => defmt::panic!("HX711 init failed: {}", e),
    };
    renderer.render_boot(&mut canvas, "Config loaded", "Load cell ready");
    info!("HX711 initialized");

    // Encoder
    let pins = tasks::UiPins {
        a: Input::new(p.PIN_2, Pull::Up),
        b: Input::new(p.PIN_3, Pull::Up),
        button: Input::new(p.PIN_4, Pull::Up),
    };

    spawner
        .spawn(tasks::ui_task(pins, scale, canvas, renderer, ui_config))
        .unwrap();

    info!("All tasks spawned, firmware running");
}
