//! gridpin firmware - shoulder-surfing resistant PIN pad on nRF52840.
//!
//! Three executors run the tasks:
//!
//! | Context                  | Priority | Tasks                              |
//! |--------------------------|----------|------------------------------------|
//! | `EGU1_SWI1` interrupt    | P6       | auth                               |
//! | `EGU0_SWI0` interrupt    | P7       | display                            |
//! | thread mode              | -        | input, button, shuffler, feedback  |
//!
//! Everything the tasks share lives in the static [`Pipeline`].

#![no_std]
#![no_main]

mod tasks;

use cortex_m_rt::entry;
use defmt::{info, unwrap};
use embassy_executor::{Executor, InterruptExecutor};
use embassy_nrf::gpio::{Input, Pull};
use embassy_nrf::interrupt;
use embassy_nrf::interrupt::{InterruptExt, Priority};
use embassy_nrf::pwm::{Prescaler, SimplePwm};
use embassy_nrf::rng::{self, Rng};
use embassy_nrf::saadc::{self, ChannelConfig, Saadc};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use gridpin::Pipeline;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
    RNG => rng::InterruptHandler<peripherals::RNG>;
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

static PIPELINE: Pipeline = Pipeline::new();

static EXECUTOR_AUTH: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_DISPLAY: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_THREAD: StaticCell<Executor> = StaticCell::new();

#[interrupt]
unsafe fn EGU1_SWI1() {
    EXECUTOR_AUTH.on_interrupt()
}

#[interrupt]
unsafe fn EGU0_SWI0() {
    EXECUTOR_DISPLAY.on_interrupt()
}

#[entry]
fn main() -> ! {
    info!("gridpin starting");

    let p = embassy_nrf::init(Default::default());

    // ── Peripherals ─────────────────────────────────────────────────────
    let mut adc_config = saadc::Config::default();
    adc_config.resolution = saadc::Resolution::_12BIT;
    // VDD/4 reference with 1/4 gain: full scale is the supply rail.
    let mut axis = ChannelConfig::single_ended(p.P0_02);
    axis.reference = saadc::Reference::VDD1_4;
    axis.gain = saadc::Gain::GAIN1_4;
    let joystick = Saadc::new(p.SAADC, Irqs, adc_config, [axis]);
    let button = Input::new(p.P0_11, Pull::Up);
    let rng = Rng::new(p.RNG, Irqs);

    let mut i2c_config = twim::Config::default();
    i2c_config.frequency = twim::Frequency::K400;
    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, i2c_config);

    let buzzer = SimplePwm::new_1ch(p.PWM0, p.P0_28);
    buzzer.set_prescaler(Prescaler::Div16);
    let leds = SimplePwm::new_2ch(p.PWM1, p.P0_13, p.P0_14);
    leds.set_prescaler(Prescaler::Div16);

    // ── Auth: highest priority ──────────────────────────────────────────
    interrupt::EGU1_SWI1.set_priority(Priority::P6);
    let spawner = EXECUTOR_AUTH.start(interrupt::EGU1_SWI1);
    unwrap!(spawner.spawn(tasks::auth::auth_task(&PIPELINE)));

    // ── Display ─────────────────────────────────────────────────────────
    interrupt::EGU0_SWI0.set_priority(Priority::P7);
    let spawner = EXECUTOR_DISPLAY.start(interrupt::EGU0_SWI0);
    unwrap!(spawner.spawn(tasks::display::display_task(i2c, &PIPELINE)));

    // ── Thread mode: input, shuffling, feedback ─────────────────────────
    let executor = EXECUTOR_THREAD.init(Executor::new());
    executor.run(|spawner| {
        unwrap!(spawner.spawn(tasks::button::button_task(button, &PIPELINE)));
        unwrap!(spawner.spawn(tasks::input::input_task(joystick, &PIPELINE)));
        unwrap!(spawner.spawn(tasks::shuffler::shuffler_task(rng, &PIPELINE)));
        unwrap!(spawner.spawn(tasks::feedback::feedback_task(buzzer, leds, &PIPELINE)));
    })
}
