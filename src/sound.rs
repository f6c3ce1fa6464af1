//! Buzzer output: the [`Buzzer`] trait renderers talk to, the commands the
//! buzzer task executes, and the PWM arithmetic behind a tone.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;
use embassy_time::Duration;

pub trait Buzzer {
    /// Sound `freq_hz` until the next call.
    fn tone(&mut self, freq_hz: u32, volume: u8);
    /// Sound `freq_hz` for `duration`, then go quiet unless replaced earlier.
    fn beep(&mut self, freq_hz: u32, volume: u8, duration: Duration);
    fn silence(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ToneCommand {
    Play {
        freq_hz: u32,
        volume: u8,
        duration: Option<Duration>,
    },
    Silence,
}

/// Forwards tones to the buzzer task.
pub struct SignalBuzzer<'a, M: RawMutex> {
    tone: &'a Signal<M, ToneCommand>,
}

impl<'a, M: RawMutex> SignalBuzzer<'a, M> {
    pub fn new(tone: &'a Signal<M, ToneCommand>) -> Self {
        Self { tone }
    }
}

impl<'a, M: RawMutex> Buzzer for SignalBuzzer<'a, M> {
    fn tone(&mut self, freq_hz: u32, volume: u8) {
        self.tone.signal(ToneCommand::Play {
            freq_hz,
            volume,
            duration: None,
        });
    }

    fn beep(&mut self, freq_hz: u32, volume: u8, duration: Duration) {
        self.tone.signal(ToneCommand::Play {
            freq_hz,
            volume,
            duration: Some(duration),
        });
    }

    fn silence(&mut self) {
        self.tone.signal(ToneCommand::Silence);
    }
}

/// Register values for one tone on a PWM slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmSetting {
    /// Integer clock divider, 1..=255.
    pub divider: u8,
    pub top: u16,
    pub compare: u16,
}

impl PwmSetting {
    /// Off: zero duty cycle.
    pub const OFF: PwmSetting = PwmSetting {
        divider: 1,
        top: u16::MAX,
        compare: 0,
    };

    /// Pick the smallest divider that lets `top` fit in 16 bits, so the
    /// frequency error stays small. Volume 255 gives 50 % duty.
    pub fn for_tone(sys_clk_hz: u32, freq_hz: u32, volume: u8) -> PwmSetting {
        if freq_hz == 0 || volume == 0 {
            return Self::OFF;
        }
        let period = (sys_clk_hz / freq_hz).max(1);
        let divider = (period / 65_536 + 1).clamp(1, 255);
        let top = (period / divider).saturating_sub(1).clamp(1, u16::MAX as u32);
        let compare = (top + 1) * volume as u32 / 510;
        PwmSetting {
            divider: divider as u8,
            top: top as u16,
            compare: compare as u16,
        }
    }

    /// Frequency this setting actually produces.
    pub fn freq_hz(&self, sys_clk_hz: u32) -> u32 {
        sys_clk_hz / (self.divider as u32 * (self.top as u32 + 1))
    }
}
