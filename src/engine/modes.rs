use embassy_time::Instant;
use micromath::F32Ext;
use rand::Rng;
use smart_leds::RGB8;

use super::{Engine, Malfunction, Mode};
use crate::canvas::Canvas;
use crate::color;
use crate::config::engine::*;
use crate::config::sound::{FREQ_ERROR, FREQ_IDLE, FREQ_START};
use crate::sound::Buzzer;

/// Glow of the igniter check during the quiet part of a startup.
const IGNITER: RGB8 = RGB8 { r: 40, g: 8, b: 0 };

impl Engine {
    pub(super) fn render_idle<const N: usize, B: Buzzer>(
        &mut self,
        leds: &mut [RGB8; N],
        buzzer: &mut B,
    ) -> Option<Mode> {
        leds.clear();
        buzzer.tone(FREQ_IDLE, self.volume);
        None
    }

    /// Quiet igniter check, then a linear power ramp. Hands over to Thrust
    /// once the ramp is done.
    pub(super) fn render_startup<const N: usize, B: Buzzer>(
        &mut self,
        now: Instant,
        leds: &mut [RGB8; N],
        buzzer: &mut B,
    ) -> Option<Mode> {
        let start = *self.startup_started.get_or_insert(now);
        let elapsed = Self::elapsed_since(now, start);

        if elapsed < STARTUP_TEST_PHASE {
            let progress = elapsed.as_millis() as f32 / STARTUP_TEST_PHASE.as_millis() as f32;
            leds.clear();
            if let Some(led) = leds.first_mut() {
                *led = color::lerp(color::BLACK, IGNITER, progress);
            }
            buzzer.silence();
            None
        } else if elapsed < STARTUP_RAMP_END {
            let ramp = (STARTUP_RAMP_END - STARTUP_TEST_PHASE).as_millis();
            let done = (elapsed - STARTUP_TEST_PHASE).as_millis();
            self.power = (done * 255 / ramp) as u8;
            self.turbulence(leds, STARTUP_TURBULENCE);
            buzzer.tone(
                FREQ_START + (FREQ_IDLE - FREQ_START) * self.power as u32 / 255,
                self.volume,
            );
            None
        } else {
            self.power = 255;
            Some(Mode::Thrust)
        }
    }

    pub(super) fn render_thrust<const N: usize, B: Buzzer>(
        &mut self,
        leds: &mut [RGB8; N],
        buzzer: &mut B,
    ) -> Option<Mode> {
        self.turbulence(leds, THRUST_TURBULENCE);
        let nudge = self
            .rng
            .gen_range(-THRUST_POWER_JITTER..THRUST_POWER_JITTER);
        self.power = (self.power as i16 + nudge)
            .clamp(THRUST_POWER_MIN as i16, THRUST_POWER_MAX as i16) as u8;
        let jitter = self
            .rng
            .gen_range(-THRUST_TONE_JITTER..THRUST_TONE_JITTER);
        buzzer.tone(FREQ_IDLE.saturating_add_signed(jitter), self.volume);
        None
    }

    /// One step of the ramp down. Goes to Idle once power reaches zero.
    /// The mode timer skips Shutdown, so the ramp always runs to the end.
    pub(super) fn render_shutdown<const N: usize, B: Buzzer>(
        &mut self,
        leds: &mut [RGB8; N],
        buzzer: &mut B,
    ) -> Option<Mode> {
        self.power = self.power.saturating_sub(SHUTDOWN_STEP);
        if self.power == 0 {
            leds.clear();
            buzzer.silence();
            self.emergency_shutdown = false;
            return Some(Mode::Idle);
        }

        let glow = RGB8::new(self.power, (self.power as f32 * 0.3) as u8, 0);
        leds.fill_color(glow);
        buzzer.tone(FREQ_START * self.power as u32 / 255, self.volume);
        None
    }

    pub(super) fn render_malfunction<const N: usize, B: Buzzer>(
        &mut self,
        now: Instant,
        leds: &mut [RGB8; N],
        buzzer: &mut B,
    ) -> Option<Mode> {
        let jitter = self
            .rng
            .gen_range(-MALFUNCTION_TONE_JITTER..MALFUNCTION_TONE_JITTER);
        buzzer.tone(FREQ_ERROR.saturating_add_signed(jitter), self.volume);

        match self.malfunction {
            Some(Malfunction::UnstableCombustion) => {
                self.turbulence(leds, UNSTABLE_TURBULENCE);
                let decay = self.rng.gen_range(0..UNSTABLE_POWER_DECAY);
                self.power = (self.power as i16 - decay).clamp(0, 255) as u8;
            }
            Some(Malfunction::Pulsation) => {
                let phase = now.as_millis() as f32 / PULSATION_PERIOD_MS;
                let power = self.power as f32 + phase.sin() * PULSATION_AMPLITUDE;
                self.power = power.clamp(0.0, 255.0) as u8;
                self.turbulence(leds, PULSATION_TURBULENCE);
            }
            Some(Malfunction::AsymmetricThrust) => {
                for led in leds.iter_mut().step_by(2) {
                    *led = color::BLACK;
                }
            }
            None => {}
        }

        if self.rng.gen_range(0..100) < MALFUNCTION_SHUTDOWN_PERCENT {
            Some(Mode::Shutdown)
        } else {
            None
        }
    }
}
