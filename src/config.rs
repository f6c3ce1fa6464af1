//! Compile-time tunables for both firmwares.

/// Engine simulator (`rocket-engine` binary).
pub mod engine {
    use embassy_time::Duration;

    /// Strip data line is GPIO 8.
    pub const NUM_PIXELS: usize = 10;
    pub const BRIGHTNESS: u8 = 100;

    pub const TICK_INTERVAL: Duration = Duration::from_millis(30);
    pub const MODE_CHANGE_INTERVAL: Duration = Duration::from_millis(10_000);

    pub const STARTUP_TEST_PHASE: Duration = Duration::from_millis(500);
    pub const STARTUP_RAMP_END: Duration = Duration::from_millis(2500);
    pub const STARTUP_TURBULENCE: u8 = 10;

    pub const THRUST_TURBULENCE: u8 = 30;
    pub const THRUST_POWER_MIN: u8 = 200;
    pub const THRUST_POWER_MAX: u8 = 255;
    pub const THRUST_POWER_JITTER: i16 = 5;
    pub const THRUST_TONE_JITTER: i32 = 50;

    pub const SHUTDOWN_STEP: u8 = 5;

    /// Chance per tick, in percent, that a malfunction ends in a shutdown.
    pub const MALFUNCTION_SHUTDOWN_PERCENT: u32 = 5;
    pub const MALFUNCTION_TONE_JITTER: i32 = 200;
    pub const UNSTABLE_TURBULENCE: u8 = 100;
    pub const UNSTABLE_POWER_DECAY: i16 = 10;
    pub const PULSATION_TURBULENCE: u8 = 50;
    pub const PULSATION_AMPLITUDE: f32 = 50.0;
    pub const PULSATION_PERIOD_MS: f32 = 100.0;
}

/// Launch sequence (`launch-sequence` binary).
pub mod launch {
    /// Strip data line is GPIO 20.
    pub const NUM_PIXELS: usize = 16;
    pub const BRIGHTNESS: u8 = 150;
    pub const TURBULENCE_BRIGHTNESS: u8 = 200;

    pub const CHASE_PASSES: u32 = 3;
    pub const CHASE_DURATION_MS: u32 = 500;
    pub const COUNTDOWN_FROM: u32 = 10;
    pub const POWER_UP_STEP: usize = 5;
    pub const POWER_DOWN_STEP: usize = 2;
    pub const THRUST_ITERATIONS: u32 = 40;
    pub const TURBULENCE_EVERY: u32 = 5;
    pub const AFTERGLOW_CYCLES: u32 = 3;

    pub const FLAME_FRAME_MS: u32 = 50;
    pub const RAMP_STEP_MS: u32 = 50;
    pub const THRUST_STEP_MS: u32 = 100;
    pub const TURBULENCE_HOLD_MS: u32 = 50;
    pub const COUNTDOWN_PAUSE_MS: u32 = 100;
    pub const AFTERGLOW_PAUSE_MS: u32 = 300;
    pub const REST_MS: u32 = 3000;

    pub const PULSE_STEP: usize = 15;
    /// A pulse divides its duration into this many slots.
    pub const PULSE_SLOTS: u32 = 32;
    /// Bottom LEDs that are lit in every flame frame.
    pub const FLAME_BASE: usize = 3;
    /// Top LEDs that are dimmed in every flame frame.
    pub const FLAME_TIP: usize = 3;
}

/// Buzzer tones and volume.
pub mod sound {
    /// Buzzer is on GPIO 6, PWM slice 3 channel A.
    pub const FREQ_START: u32 = 1000;
    pub const FREQ_IDLE: u32 = 1500;
    pub const FREQ_ERROR: u32 = 2500;

    pub const COUNTDOWN_BEEP: u32 = 880;
    pub const WARNING_BEEP: u32 = 1760;
    pub const ENGINE_START: u32 = 440;
    pub const THRUST_TONE_JITTER: i32 = 100;

    pub const VOLUME_MAX: u8 = 155;
    pub const VOLUME_DEFAULT: u8 = 64;
    /// Fixed volume used by the launch sequence.
    pub const VOLUME_LAUNCH: u8 = 128;
}
