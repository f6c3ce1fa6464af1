//! Engine simulator firmware: the mode state machine on a 10 LED strip.

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use defmt::*;
use embassy_executor::Executor;
use embassy_rp::bind_interrupts;
use embassy_rp::clocks::RoscRng;
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::{InterruptHandler, Pio};
use embassy_rp::pwm::{self, Pwm};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Instant, Ticker};
use rand_core::RngCore;
use rocket_engine_embassy::prelude::*;
use rocket_engine_embassy::pwm_buzzer;
use rocket_engine_embassy::ws2812::{PioWs2812, PioWs2812Program};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

const NUM_LEDS: usize = config::engine::NUM_PIXELS;

static LEDS: Signal<CriticalSectionRawMutex, [RGB8; NUM_LEDS]> = Signal::new();
static TONE: Signal<CriticalSectionRawMutex, ToneCommand> = Signal::new();

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => InterruptHandler<PIO0>;
});

#[embassy_executor::task]
async fn engine_task(seed: u64) {
    let mut strip = SignalStrip::new(&LEDS, config::engine::BRIGHTNESS);
    let mut buzzer = SignalBuzzer::new(&TONE);
    let mut engine = Engine::new(seed, Instant::now());
    let mut data = [RGB8::default(); NUM_LEDS];
    let mut ticker = Ticker::every(config::engine::TICK_INTERVAL);
    loop {
        engine.update(Instant::now(), &mut data, &mut buzzer);
        strip.show(&data);
        ticker.next().await;
    }
}

#[embassy_executor::task]
async fn rgb_writer_task(mut ws2812: PioWs2812<'static, PIO0, 0, NUM_LEDS>) {
    loop {
        let leds = LEDS.wait().await;
        ws2812.write(&leds).await;
    }
}

#[embassy_executor::task]
async fn buzzer_task(pwm: Pwm<'static>) {
    pwm_buzzer::run(pwm, &TONE).await
}

static EXECUTOR: StaticCell<Executor> = StaticCell::new();

#[entry]
fn main() -> ! {
    info!("Start");
    let p = embassy_rp::init(Default::default());
    let seed = RoscRng.next_u64();
    info!("seed: {}", seed);

    let ws2812 = {
        let Pio {
            mut common, sm0, ..
        } = Pio::new(p.PIO0, Irqs);
        let program = PioWs2812Program::new(&mut common);
        PioWs2812::new(&mut common, sm0, p.DMA_CH0, p.PIN_8, &program)
    };

    let buzzer = Pwm::new_output_a(p.PWM_SLICE3, p.PIN_6, pwm::Config::default());

    let executor = EXECUTOR.init(Executor::new());
    executor.run(|spawner| {
        unwrap!(spawner.spawn(rgb_writer_task(ws2812)));
        unwrap!(spawner.spawn(buzzer_task(buzzer)));
        unwrap!(spawner.spawn(engine_task(seed)));
    });
}
