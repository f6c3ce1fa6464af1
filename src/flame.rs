//! Flame renderers shared by the engine simulator and the launch sequence.

use rand::Rng;
use smart_leds::RGB8;

use crate::color::{self, clamp_channel};
use crate::config::launch::{FLAME_BASE, FLAME_TIP};

/// Red and green multipliers for the bottom, middle and top third of the strip.
const THIRDS: [(f32, f32); 3] = [(1.0, 0.8), (0.9, 0.6), (0.8, 0.4)];

/// Randomized flame flicker over the whole strip. `intensity` is the per-pixel
/// jitter range, `power` scales the result.
pub fn turbulence<R: Rng, const N: usize>(
    leds: &mut [RGB8; N],
    rng: &mut R,
    intensity: u8,
    power: u8,
) {
    let jitter = intensity as i32;
    for (i, led) in leds.iter_mut().enumerate() {
        let variation = if jitter > 0 {
            rng.gen_range(-jitter..jitter)
        } else {
            0
        };
        let g = 100 + rng.gen_range(0..50u8);
        let b = rng.gen_range(0..20u8);

        let (rf, gf) = if i < N / 3 {
            THIRDS[0]
        } else if i < N * 2 / 3 {
            THIRDS[1]
        } else {
            THIRDS[2]
        };
        let r = (255.0 * rf) as u8;
        let g = (g as f32 * gf) as u8;

        let channel = |c: u8| clamp_channel(c as i32 + variation);
        *led = color::scale(RGB8::new(channel(r), channel(g), channel(b)), power);
    }
}

/// One frame of the launch flame. `intensity` is a percentage; LED 0 of the
/// loop is the bottom of the rocket, which is the last LED on the strip.
pub fn flame<R: Rng, const N: usize>(leds: &mut [RGB8; N], rng: &mut R, intensity: u32) {
    for i in 0..N {
        let led = N - 1 - i;
        let adjusted = (intensity as f32 * (1.0 - i as f32 / N as f32 * 0.3)) as u32;

        leds[led] = if i < FLAME_BASE || rng.gen_range(0..100) < adjusted {
            let c = color::FLAME[rng.gen_range(0..color::FLAME.len())];
            if i >= N.saturating_sub(FLAME_TIP) {
                color::dim(c, 0.5)
            } else {
                c
            }
        } else {
            color::BLACK
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn zero_power_is_dark() {
        let mut leds = [color::WHITE; 10];
        let mut rng = SmallRng::seed_from_u64(3);
        turbulence(&mut leds, &mut rng, 100, 0);
        assert!(leds.iter().all(|c| *c == color::BLACK));
    }

    #[test]
    fn zero_intensity_keeps_thirds_palette() {
        let mut leds = [color::BLACK; 9];
        let mut rng = SmallRng::seed_from_u64(3);
        turbulence(&mut leds, &mut rng, 0, 255);
        assert!(leds[..3].iter().all(|c| c.r == 255 && (80..120).contains(&c.g)));
        assert!(leds[3..6].iter().all(|c| c.r == 229 && (60..90).contains(&c.g)));
        assert!(leds[6..].iter().all(|c| c.r == 204 && (40..60).contains(&c.g)));
        assert!(leds.iter().all(|c| c.b < 20));
    }

    #[test]
    fn flame_base_always_lit() {
        let mut leds = [color::WHITE; 16];
        let mut rng = SmallRng::seed_from_u64(11);
        flame(&mut leds, &mut rng, 0);
        assert!(leds[13..].iter().all(|c| *c != color::BLACK));
        assert!(leds[..13].iter().all(|c| *c == color::BLACK));
    }

    #[test]
    fn flame_tip_is_dimmed() {
        let mut leds = [color::BLACK; 16];
        let mut rng = SmallRng::seed_from_u64(5);
        flame(&mut leds, &mut rng, 100);
        // top of the rocket is the start of the strip
        for c in &leds[..3] {
            assert!(c.r == 0 || c.r == 127, "{:?}", c);
        }
    }
}
