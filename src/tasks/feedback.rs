//! Buzzer and LED feedback for finished attempts.

use defmt::{debug, info};
use embassy_nrf::peripherals::{PWM0, PWM1};
use embassy_nrf::pwm::SimplePwm;
use embassy_time::{Duration, Timer};
use gridpin::config::{LED_PWM_LEVEL, LED_PWM_PERIOD};
use gridpin::feedback::{plan_for, Led, Tone};
use gridpin::Pipeline;

/// PWM channel of each LED on the LED PWM instance.
fn led_channel(led: Led) -> usize {
    match led {
        Led::Green => 0,
        Led::Red => 1,
    }
}

#[embassy_executor::task]
pub async fn feedback_task(
    mut buzzer: SimplePwm<'static, PWM0>,
    mut leds: SimplePwm<'static, PWM1>,
    pipeline: &'static Pipeline,
) -> ! {
    buzzer.disable();
    leds.set_max_duty(LED_PWM_PERIOD);
    leds.set_duty(0, 0);
    leds.set_duty(1, 0);
    info!("Feedback: buzzer and LEDs ready");

    loop {
        let result = pipeline.results.receive().await;
        let plan = plan_for(result);
        info!("Feedback: {} LED, {} ms melody", plan.led, plan.duration_ms());

        let channel = led_channel(plan.led);
        leds.set_duty(channel, LED_PWM_LEVEL);

        for tone in plan.melody {
            play(&mut buzzer, tone).await;
        }

        leds.set_duty(channel, 0);
    }
}

async fn play(buzzer: &mut SimplePwm<'static, PWM0>, tone: &Tone) {
    match (tone.pwm_top(), tone.pwm_duty()) {
        (Some(top), Some(duty)) => {
            buzzer.set_max_duty(top);
            buzzer.set_duty(0, duty);
            buzzer.enable();
            Timer::after(Duration::from_millis(tone.duration_ms)).await;
            buzzer.disable();
        }
        _ => {
            debug!("Feedback: {} Hz out of PWM range, resting", tone.freq_hz);
            Timer::after(Duration::from_millis(tone.duration_ms)).await;
        }
    }
    Timer::after(Duration::from_millis(tone.gap_ms)).await;
}
