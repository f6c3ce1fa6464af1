//! Engine simulator: a cosmetic mode state machine.
//!
//! Every tick [`Engine::update`] first lets the mode timer pick a random mode
//! once [`MODE_CHANGE_INTERVAL`] has passed (never during a shutdown), then
//! renders the current mode into the pixel buffer and the buzzer. Startup,
//! Malfunction and Shutdown can also move on by themselves; those hand-overs
//! leave the mode timer alone.

use embassy_time::{Duration, Instant};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use smart_leds::RGB8;

use crate::config::engine::MODE_CHANGE_INTERVAL;
use crate::config::sound::{VOLUME_DEFAULT, VOLUME_MAX};
use crate::flame;
use crate::sound::Buzzer;

mod modes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    Idle,
    Startup,
    Thrust,
    Shutdown,
    Malfunction,
}

impl Mode {
    /// Draw table for the mode timer.
    pub const ALL: [Mode; 5] = [
        Mode::Idle,
        Mode::Startup,
        Mode::Thrust,
        Mode::Shutdown,
        Mode::Malfunction,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Malfunction {
    /// Heavy turbulence while power drains away.
    UnstableCombustion,
    /// Power swings on a sine wave.
    Pulsation,
    /// Every other LED goes dark.
    AsymmetricThrust,
}

impl Malfunction {
    pub const ALL: [Malfunction; 3] = [
        Malfunction::UnstableCombustion,
        Malfunction::Pulsation,
        Malfunction::AsymmetricThrust,
    ];
}

pub struct Engine {
    mode: Mode,
    power: u8,
    volume: u8,
    last_mode_change: Instant,
    emergency_shutdown: bool,
    startup_started: Option<Instant>,
    malfunction: Option<Malfunction>,
    rng: SmallRng,
}

impl Engine {
    pub fn new(seed: u64, now: Instant) -> Self {
        Self {
            mode: Mode::Idle,
            power: 0,
            volume: VOLUME_DEFAULT,
            last_mode_change: now,
            emergency_shutdown: false,
            startup_started: None,
            malfunction: None,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn power(&self) -> u8 {
        self.power
    }

    pub fn set_power(&mut self, power: u8) {
        self.power = power;
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    /// Capped at [`VOLUME_MAX`].
    pub fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(VOLUME_MAX);
    }

    pub fn adjust_volume(&mut self, adjustment: i8) {
        let v = (self.volume as i16 + adjustment as i16).clamp(0, VOLUME_MAX as i16);
        self.volume = v as u8;
    }

    pub fn last_mode_change(&self) -> Instant {
        self.last_mode_change
    }

    /// Sub-type of the running malfunction, `None` outside Malfunction.
    pub fn malfunction(&self) -> Option<Malfunction> {
        self.malfunction
    }

    /// Set while a shutdown triggered by a malfunction is running.
    pub fn emergency_shutdown(&self) -> bool {
        self.emergency_shutdown
    }

    /// Switch to `mode` right away, restarting it even if it is already
    /// active, and restart the mode timer.
    pub fn set_mode(&mut self, mode: Mode, now: Instant) {
        self.last_mode_change = now;
        self.enter(mode);
    }

    /// Flame flicker for the current power level.
    pub fn turbulence<const N: usize>(&mut self, leds: &mut [RGB8; N], intensity: u8) {
        flame::turbulence(leds, &mut self.rng, intensity, self.power);
    }

    /// One animation tick.
    pub fn update<const N: usize, B: Buzzer>(
        &mut self,
        now: Instant,
        leds: &mut [RGB8; N],
        buzzer: &mut B,
    ) {
        if self.mode != Mode::Shutdown && self.mode_timer_expired(now) {
            self.last_mode_change = now;
            let next = Mode::ALL[self.rng.gen_range(0..Mode::ALL.len())];
            if next != self.mode {
                self.enter(next);
            }
        }

        let next = match self.mode {
            Mode::Idle => self.render_idle(leds, buzzer),
            Mode::Startup => self.render_startup(now, leds, buzzer),
            Mode::Thrust => self.render_thrust(leds, buzzer),
            Mode::Shutdown => self.render_shutdown(leds, buzzer),
            Mode::Malfunction => self.render_malfunction(now, leds, buzzer),
        };
        trace!("tick: {} power {}", self.mode, self.power);

        if let Some(next) = next {
            self.enter(next);
        }
    }

    fn mode_timer_expired(&self, now: Instant) -> bool {
        now.checked_duration_since(self.last_mode_change)
            .map_or(false, |elapsed| elapsed > MODE_CHANGE_INTERVAL)
    }

    fn enter(&mut self, mode: Mode) {
        info!("mode: {} -> {}", self.mode, mode);
        if mode == Mode::Shutdown && self.mode == Mode::Malfunction {
            info!("emergency shutdown");
            self.emergency_shutdown = true;
        }
        self.mode = mode;
        self.startup_started = None;
        self.malfunction = None;
        if mode == Mode::Malfunction {
            let kind = Malfunction::ALL[self.rng.gen_range(0..Malfunction::ALL.len())];
            info!("malfunction: {}", kind);
            self.malfunction = Some(kind);
        }
    }

    fn elapsed_since(now: Instant, start: Instant) -> Duration {
        now.checked_duration_since(start).unwrap_or(Duration::from_ticks(0))
    }
}
