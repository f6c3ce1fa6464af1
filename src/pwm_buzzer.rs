//! Piezo buzzer on an RP2040 PWM slice, fed with [`ToneCommand`]s.

use embassy_futures::select::{select, Either};
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::pwm::{Config, Pwm};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Timer};
use fixed::FixedU16;

use crate::sound::{PwmSetting, ToneCommand};

fn apply(pwm: &mut Pwm<'_>, setting: PwmSetting) {
    let mut config = Config::default();
    config.divider = FixedU16::from_num(setting.divider);
    config.top = setting.top;
    config.compare_a = setting.compare;
    pwm.set_config(&config);
}

/// Play a command and report how long it should last.
fn play(pwm: &mut Pwm<'_>, cmd: ToneCommand) -> Option<Duration> {
    match cmd {
        ToneCommand::Play {
            freq_hz,
            volume,
            duration,
        } => {
            let setting = PwmSetting::for_tone(clk_sys_freq(), freq_hz, volume);
            trace!("tone {} Hz -> {}", freq_hz, setting);
            apply(pwm, setting);
            duration
        }
        ToneCommand::Silence => {
            apply(pwm, PwmSetting::OFF);
            None
        }
    }
}

/// Buzzer task body. A timed beep goes quiet at its deadline unless a newer
/// command arrives first.
pub async fn run<M: RawMutex>(mut pwm: Pwm<'_>, tone: &Signal<M, ToneCommand>) -> ! {
    apply(&mut pwm, PwmSetting::OFF);
    let mut next = tone.wait().await;
    loop {
        next = match play(&mut pwm, next) {
            Some(d) => match select(Timer::after(d), tone.wait()).await {
                Either::First(()) => ToneCommand::Silence,
                Either::Second(cmd) => cmd,
            },
            None => tone.wait().await,
        };
    }
}
