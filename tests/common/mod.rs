//! Shared test infrastructure for the integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use embassy_time::{Duration, Instant};
use embedded_hal_async::delay::DelayNs;
use rocket_engine_embassy::prelude::*;

pub fn at(ms: u64) -> Instant {
    Instant::from_millis(ms)
}

// ============================================================================
// Mock Buzzer
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    Tone { freq_hz: u32, volume: u8 },
    Beep { freq_hz: u32, duration: Duration },
    Silence,
}

/// Buzzer that records every call
#[derive(Default)]
pub struct MockBuzzer {
    pub sounds: Vec<Sound>,
}

impl MockBuzzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<Sound> {
        self.sounds.last().copied()
    }

    pub fn tones(&self) -> Vec<u32> {
        self.sounds
            .iter()
            .filter_map(|s| match s {
                Sound::Tone { freq_hz, .. } => Some(*freq_hz),
                _ => None,
            })
            .collect()
    }

    pub fn beeps(&self) -> Vec<(u32, u64)> {
        self.sounds
            .iter()
            .filter_map(|s| match s {
                Sound::Beep { freq_hz, duration } => Some((*freq_hz, duration.as_millis())),
                _ => None,
            })
            .collect()
    }
}

impl Buzzer for MockBuzzer {
    fn tone(&mut self, freq_hz: u32, volume: u8) {
        self.sounds.push(Sound::Tone { freq_hz, volume });
    }

    fn beep(&mut self, freq_hz: u32, _volume: u8, duration: Duration) {
        self.sounds.push(Sound::Beep { freq_hz, duration });
    }

    fn silence(&mut self) {
        self.sounds.push(Sound::Silence);
    }
}

// ============================================================================
// Mock Strip
// ============================================================================

/// Strip that keeps every frame it was shown, with the brightness in effect
pub struct MockStrip<const N: usize> {
    pub brightness: u8,
    pub frames: Vec<(u8, [RGB8; N])>,
}

impl<const N: usize> MockStrip<N> {
    pub fn new() -> Self {
        Self {
            brightness: 255,
            frames: Vec::new(),
        }
    }
}

impl<const N: usize> Strip<N> for MockStrip<N> {
    fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    fn show(&mut self, frame: &[RGB8; N]) {
        self.frames.push((self.brightness, *frame));
    }
}

// ============================================================================
// Mock Delay
// ============================================================================

/// Delay that returns immediately and adds up the time it was asked to wait
#[derive(Default)]
pub struct FakeClock {
    pub elapsed_ns: u64,
    pub calls: usize,
}

impl FakeClock {
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ns / 1_000_000
    }
}

impl DelayNs for FakeClock {
    async fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += ns as u64;
        self.calls += 1;
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.elapsed_ns += ms as u64 * 1_000_000;
        self.calls += 1;
    }
}
