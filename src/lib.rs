#![cfg_attr(not(test), no_std)]

//! Lighting and sound effects for a toy rocket: an addressable LED strip and a
//! piezo buzzer.
//!
//! Two firmwares are built from this crate. `rocket-engine` runs the
//! [`engine::Engine`] mode state machine on a 30 ms ticker; `launch-sequence`
//! plays the [`launch::LaunchSequence`] script in a loop. Both render into a
//! plain `[RGB8; N]` buffer and hand it to a [`strip::Strip`]; tones go to a
//! [`sound::Buzzer`]. The RP2040 implementations of those (PIO ws2812 and PWM
//! buzzer) are behind the `rp2040` feature.

pub(crate) mod fmt;

pub use smart_leds::RGB8;

pub mod canvas;
pub mod color;
pub mod config;
pub mod engine;
pub mod flame;
pub mod launch;
pub mod sound;
pub mod strip;

#[cfg(feature = "rp2040")]
pub mod pwm_buzzer;
#[cfg(feature = "rp2040")]
pub mod ws2812;

pub mod prelude {
    pub use super::{
        canvas::Canvas,
        color, config,
        engine::{Engine, Malfunction, Mode},
        launch::LaunchSequence,
        sound::{Buzzer, SignalBuzzer, ToneCommand},
        strip::{SignalStrip, Strip},
        RGB8,
    };
}
