//! Shared helpers for the integration tests

#![allow(dead_code)]

use fex_core::Script;

/// Route model logs to the test writer at TRACE, once per test binary
pub fn init_test_logger() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

pub const BOOT_CLOCK: u32 = 24_000_000;
pub const SYSTEM_BYTES: [u8; 3] = [0x41, 0x00, 0x42];
pub const LED_DATA: [i32; 4] = [1, -1, 0, 7];

/// Script with one section "target" holding one entry of every kind:
/// `sw` (null), `boot_clock` (word), `system` (string), `led` (gpio).
pub fn build_target_script() -> Script {
    let mut script = Script::new();
    let section = script.new_section("target").expect("section");
    section.new_null("sw").expect("null entry");
    section.new_single_word("boot_clock", BOOT_CLOCK).expect("word entry");
    section.new_string("system", &SYSTEM_BYTES).expect("string entry");
    section.new_gpio("led", 1, 5, LED_DATA).expect("gpio entry");
    script
}

/// Script with `sections` sections, section `i` holding `i + 1` entries of
/// rotating kinds.
pub fn build_wide_script(sections: usize) -> Script {
    let mut script = Script::new();
    for i in 0..sections {
        let section = script.new_section(format!("section_{i}")).expect("section");
        for j in 0..=i {
            let name = format!("entry_{j}");
            let appended = match j % 4 {
                0 => section.new_null(&name),
                1 => section.new_single_word(&name, j as u32),
                2 => section.new_string(&name, name.as_bytes()),
                _ => section.new_gpio(&name, i as u32, j as u32, [j as i32, -(j as i32), 0, 1]),
            };
            appended.expect("entry");
        }
    }
    script
}
