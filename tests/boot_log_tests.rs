// Host-side tests for the loading-screen terminal log.

use neural_hangar::boot_log::{BootLog, BOOT_LOG_VISIBLE_LINES, BOOT_MESSAGES};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn prints_every_message_as_a_prompt_line() {
    let mut log = BootLog::default();
    let mut lines = Vec::new();
    while let Some(line) = log.advance() {
        lines.push(line);
    }
    assert_eq!(lines.len(), BOOT_MESSAGES.len());
    assert_eq!(lines[0], "> Initializing Neural Net...");
    assert_eq!(lines[9], "> System Ready.");
    assert!(log.is_finished());
    assert!(log.advance().is_none());
}

#[test]
fn keeps_only_the_newest_lines() {
    let mut log = BootLog::default();
    for _ in 0..7 {
        log.advance();
    }
    let visible: Vec<&str> = log.visible().collect();
    assert_eq!(visible.len(), BOOT_LOG_VISIBLE_LINES);
    assert_eq!(visible[0], format!("> {}", BOOT_MESSAGES[2]));
    assert_eq!(visible[4], format!("> {}", BOOT_MESSAGES[6]));
}

#[test]
fn empty_log_is_finished_immediately() {
    let mut log = BootLog::new(Vec::new());
    assert!(log.is_finished());
    assert!(log.advance().is_none());
    assert_eq!(log.visible().count(), 0);
}

#[test]
fn delays_stay_in_range() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..100 {
        let d = BootLog::next_delay_ms(&mut rng);
        assert!((150.0..550.0).contains(&d), "delay {d}");
    }
}
