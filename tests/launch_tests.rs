mod common;

use common::{FakeClock, MockBuzzer, MockStrip, Sound};
use embassy_futures::block_on;
use rocket_engine_embassy::prelude::*;

const N: usize = config::launch::NUM_PIXELS;

fn run_once(seed: u64) -> (MockStrip<N>, MockBuzzer, FakeClock) {
    let mut launch: LaunchSequence<_, _, _, N> =
        LaunchSequence::new(MockStrip::new(), MockBuzzer::new(), FakeClock::default(), seed);
    block_on(launch.run());
    launch.into_parts()
}

#[test]
fn countdown_beeps_in_order() {
    let (_, buzzer, _) = run_once(1);

    let mut expected = vec![(1760, 500)];
    expected.extend(std::iter::repeat((880, 100)).take(10));
    expected.push((1760, 200));
    expected.extend(std::iter::repeat((220, 200)).take(3));
    assert_eq!(buzzer.beeps(), expected);
}

#[test]
fn engine_tones_follow_script() {
    let (_, buzzer, _) = run_once(2);
    let tones = buzzer.tones();
    assert_eq!(tones.len(), 21 + 40 + 51);

    let (up, rest) = tones.split_at(21);
    let (thrust, down) = rest.split_at(40);

    let expected_up: Vec<u32> = (0..=100).step_by(5).map(|i| 440 + i * 10).collect();
    assert_eq!(up, &expected_up[..]);

    for (i, f) in thrust.iter().enumerate() {
        if i % 5 == 0 {
            assert!((1340..1540).contains(f), "iteration {}: {}", i, f);
        } else {
            assert_eq!(*f, 1440, "iteration {}", i);
        }
    }

    let expected_down: Vec<u32> = (0..=100).rev().step_by(2).map(|i| 440 + i * 10).collect();
    assert_eq!(down, &expected_down[..]);
}

#[test]
fn ends_quiet_and_dark() {
    let (strip, buzzer, _) = run_once(3);

    assert_eq!(buzzer.last(), Some(Sound::Silence));
    let (brightness, frame) = strip.frames.last().copied().unwrap();
    assert_eq!(brightness, config::launch::BRIGHTNESS);
    assert!(frame.iter().all(|c| *c == color::BLACK));
}

#[test]
fn scripted_duration_is_fixed() {
    // chase 1488, countdown 11396, power up 2100, thrust 6400,
    // power down 5100, afterglow 2520, rest 3000
    let (_, _, clock) = run_once(4);
    assert_eq!(clock.elapsed_ms(), 32_004);

    let (_, _, clock) = run_once(5);
    assert_eq!(clock.elapsed_ms(), 32_004);
}

#[test]
fn turbulence_flashes_brighter() {
    let (strip, _, _) = run_once(6);
    let flashes = strip
        .frames
        .iter()
        .filter(|(b, _)| *b == config::launch::TURBULENCE_BRIGHTNESS)
        .count();
    assert_eq!(flashes, 8);
}

#[test]
fn chase_leads_with_yellow() {
    let (strip, _, _) = run_once(7);

    // third step of the first chase: head at 2, trail at 1 and 0
    let (_, frame) = strip.frames[2];
    assert_eq!(frame[2], color::YELLOW);
    assert_eq!(frame[1], color::ORANGE);
    assert_eq!(frame[0], color::dim(color::RED, 0.3));
    assert!(frame[3..].iter().all(|c| *c == color::BLACK));
}

#[test]
fn pulse_sweeps_brightness_up_and_down() {
    let (strip, _, _) = run_once(8);

    // first countdown pulse starts right after the three chase passes
    let start = 3 * N;
    let levels: Vec<u8> = strip.frames[start..start + 36].iter().map(|(b, _)| *b).collect();
    let up: Vec<u8> = (0..=255).step_by(15).collect();
    let down: Vec<u8> = (0..=255).rev().step_by(15).collect();
    assert_eq!(&levels[..18], &up[..]);
    assert_eq!(&levels[18..], &down[..]);
    assert!(strip.frames[start..start + 36]
        .iter()
        .all(|(_, f)| f.iter().all(|c| *c == color::RED)));
}

#[test]
fn flame_frames_light_the_base() {
    let (strip, _, _) = run_once(9);
    let flames = strip
        .frames
        .iter()
        .filter(|(_, f)| {
            f[N - 3..].iter().all(|c| color::FLAME.contains(c))
                && f[..3].iter().all(|c| c.r != 255)
        })
        .count();
    // power up, thrust, power down, plus the brighter re-shows during thrust
    assert_eq!(flames, 21 + 40 + 51 + 8);
}
