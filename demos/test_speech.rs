//! Manual check of the speech driver on real hardware
//!
//! Run with: cargo run --example test_speech
//!
//! Speaks one keyword/sentence pair with the default settings, firing cues
//! from a plain sleep loop instead of the terminal event loop.

use speechcards::model::{SentencePair, Settings};
use speechcards::speech::{create_synth, SpeechDriver};
use std::time::{Duration, Instant};

fn main() {
    env_logger::init();

    println!("Creating synthesizer...");
    let synth = match create_synth() {
        Ok(s) => {
            println!("✓ Synthesizer created successfully");
            s
        }
        Err(e) => {
            eprintln!("✗ Failed to create synthesizer: {}", e);
            std::process::exit(1);
        }
    };

    let mut driver = SpeechDriver::new(Some(synth));
    let pair = SentencePair::seed();
    let settings = Settings {
        word_delay: 3,
        repeat_count: 2,
        ..Settings::default()
    };

    println!(
        "Speaking '{}' then '{}' ({}s delay, x{})",
        pair.keyword, pair.sentence, settings.word_delay, settings.repeat_count
    );
    if let Err(e) = driver.speak_pair(&pair.keyword, &pair.sentence, &settings, Instant::now()) {
        eprintln!("✗ Speech failed: {}", e);
        std::process::exit(1);
    }

    while driver.is_busy() {
        std::thread::sleep(Duration::from_millis(50));
        driver.tick(Instant::now());
    }

    println!("✓ Sequence finished");
}
