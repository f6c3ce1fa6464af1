//! Launch sequence: a fixed script of warning chase, countdown, power-up,
//! sustained thrust, power-down and afterglow, played start to finish.

use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use smart_leds::RGB8;

use crate::canvas::Canvas;
use crate::color;
use crate::config::launch::*;
use crate::config::sound::{
    COUNTDOWN_BEEP, ENGINE_START, THRUST_TONE_JITTER, VOLUME_LAUNCH, WARNING_BEEP,
};
use crate::flame;
use crate::sound::Buzzer;
use crate::strip::Strip;

pub struct LaunchSequence<S, B, D, const N: usize> {
    strip: S,
    buzzer: B,
    delay: D,
    frame: [RGB8; N],
    rng: SmallRng,
}

impl<S, B, D, const N: usize> LaunchSequence<S, B, D, N>
where
    S: Strip<N>,
    B: Buzzer,
    D: DelayNs,
{
    pub fn new(mut strip: S, buzzer: B, delay: D, seed: u64) -> Self {
        strip.set_brightness(BRIGHTNESS);
        Self {
            strip,
            buzzer,
            delay,
            frame: [color::BLACK; N],
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn into_parts(self) -> (S, B, D) {
        (self.strip, self.buzzer, self.delay)
    }

    /// Play the whole script once.
    pub async fn run(&mut self) {
        self.warning().await;
        self.countdown().await;
        self.power_up().await;
        self.sustained_thrust().await;
        self.power_down().await;
        self.afterglow().await;

        self.buzzer.silence();
        self.frame.clear();
        self.strip.show(&self.frame);
        self.delay.delay_ms(REST_MS).await;
    }

    async fn warning(&mut self) {
        info!("launch: warning");
        self.beep(WARNING_BEEP, 500);
        for _ in 0..CHASE_PASSES {
            self.chase(CHASE_DURATION_MS).await;
        }
        self.buzzer.silence();
    }

    async fn countdown(&mut self) {
        info!("launch: countdown");
        for t in (0..=COUNTDOWN_FROM).rev() {
            debug!("T-{}", t);
            if t > 0 {
                self.beep(COUNTDOWN_BEEP, 100);
                self.pulse(color::RED, 900).await;
            } else {
                self.beep(WARNING_BEEP, 200);
                self.pulse(color::WHITE, 100).await;
                self.pulse(color::RED, 100).await;
            }
            self.delay.delay_ms(COUNTDOWN_PAUSE_MS).await;
        }
    }

    async fn power_up(&mut self) {
        info!("launch: power up");
        for intensity in (0..=100u32).step_by(POWER_UP_STEP) {
            self.ramp_step(intensity).await;
        }
    }

    async fn sustained_thrust(&mut self) {
        info!("launch: thrust");
        let base = ENGINE_START + 1000;
        for i in 0..THRUST_ITERATIONS {
            self.flame(100).await;
            if i % TURBULENCE_EVERY == 0 {
                let jitter = self.rng.gen_range(-THRUST_TONE_JITTER..THRUST_TONE_JITTER);
                self.buzzer
                    .tone(base.saturating_add_signed(jitter), VOLUME_LAUNCH);
                self.strip.set_brightness(TURBULENCE_BRIGHTNESS);
                self.strip.show(&self.frame);
                self.delay.delay_ms(TURBULENCE_HOLD_MS).await;
                self.strip.set_brightness(BRIGHTNESS);
            } else {
                self.buzzer.tone(base, VOLUME_LAUNCH);
            }
            self.delay.delay_ms(THRUST_STEP_MS).await;
        }
    }

    async fn power_down(&mut self) {
        info!("launch: power down");
        for intensity in (0..=100u32).rev().step_by(POWER_DOWN_STEP) {
            self.ramp_step(intensity).await;
        }
        self.buzzer.silence();
    }

    async fn afterglow(&mut self) {
        info!("launch: afterglow");
        for _ in 0..AFTERGLOW_CYCLES {
            self.beep(ENGINE_START / 2, 200);
            self.pulse(color::ORANGE_RED, 500).await;
            self.delay.delay_ms(AFTERGLOW_PAUSE_MS).await;
        }
    }

    async fn ramp_step(&mut self, intensity: u32) {
        self.buzzer.tone(ENGINE_START + intensity * 10, VOLUME_LAUNCH);
        self.flame(intensity).await;
        self.delay.delay_ms(RAMP_STEP_MS).await;
    }

    async fn flame(&mut self, intensity: u32) {
        flame::flame(&mut self.frame, &mut self.rng, intensity);
        self.strip.show(&self.frame);
        self.delay.delay_ms(FLAME_FRAME_MS).await;
    }

    /// Fade `color` in and out over `duration_ms`.
    async fn pulse(&mut self, color: RGB8, duration_ms: u32) {
        let step_ms = duration_ms / PULSE_SLOTS;
        let up = (0..=255u8).step_by(PULSE_STEP);
        let down = (0..=255u8).rev().step_by(PULSE_STEP);
        self.frame.fill_color(color);
        for level in up.chain(down) {
            self.strip.set_brightness(level);
            self.strip.show(&self.frame);
            self.delay.delay_ms(step_ms).await;
        }
        self.strip.set_brightness(BRIGHTNESS);
    }

    /// Yellow head with an orange and a dim red trail running up the strip.
    async fn chase(&mut self, duration_ms: u32) {
        let step_ms = duration_ms / N as u32;
        for i in 0..N {
            self.frame.clear();
            let _ = self.frame.set(i, color::YELLOW);
            if let Some(j) = i.checked_sub(1) {
                let _ = self.frame.set(j, color::ORANGE);
            }
            if let Some(j) = i.checked_sub(2) {
                let _ = self.frame.set(j, color::dim(color::RED, 0.3));
            }
            self.strip.show(&self.frame);
            self.delay.delay_ms(step_ms).await;
        }
    }

    fn beep(&mut self, freq_hz: u32, duration_ms: u64) {
        self.buzzer
            .beep(freq_hz, VOLUME_LAUNCH, Duration::from_millis(duration_ms));
    }
}
