//! Frame output. Renderers hand finished frames to a [`Strip`]; on the
//! firmware that is a [`SignalStrip`] feeding the ws2812 writer task.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;
use smart_leds::{brightness, RGB8};

pub trait Strip<const N: usize> {
    /// Global brightness applied to every following frame.
    fn set_brightness(&mut self, brightness: u8);
    fn show(&mut self, frame: &[RGB8; N]);
}

/// Apply global brightness the way the strip would see it.
pub fn scaled<const N: usize>(frame: &[RGB8; N], level: u8) -> [RGB8; N] {
    let mut out = [RGB8::default(); N];
    for (o, c) in out.iter_mut().zip(brightness(frame.iter().cloned(), level)) {
        *o = c;
    }
    out
}

/// Publishes brightness-scaled frames on a signal. The newest frame wins if the
/// writer falls behind.
pub struct SignalStrip<'a, M: RawMutex, const N: usize> {
    leds: &'a Signal<M, [RGB8; N]>,
    brightness: u8,
}

impl<'a, M: RawMutex, const N: usize> SignalStrip<'a, M, N> {
    pub fn new(leds: &'a Signal<M, [RGB8; N]>, brightness: u8) -> Self {
        Self { leds, brightness }
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }
}

impl<'a, M: RawMutex, const N: usize> Strip<N> for SignalStrip<'a, M, N> {
    fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    fn show(&mut self, frame: &[RGB8; N]) {
        self.leds.signal(scaled(frame, self.brightness));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    #[test]
    fn full_brightness_is_identity() {
        let frame = [color::ORANGE, color::RED, color::BLACK];
        assert_eq!(scaled(&frame, 255), frame);
    }

    #[test]
    fn signal_strip_publishes_latest_scaled_frame() {
        let leds: Signal<NoopRawMutex, [RGB8; 2]> = Signal::new();
        let mut strip = SignalStrip::new(&leds, 255);
        strip.show(&[color::RED, color::RED]);
        strip.set_brightness(0);
        assert_eq!(strip.brightness(), 0);
        strip.show(&[color::WHITE, color::WHITE]);
        assert_eq!(leds.try_take(), Some([color::BLACK, color::BLACK]));
        assert_eq!(leds.try_take(), None);
    }
}
