use std::sync::OnceLock;

/// Numeric env knob; unset or unparsable falls back to `default`
fn env_number(name: &str, default: u8) -> u8 {
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or(default),
        Err(_) => default,
    }
}

/// On/off env knob: `0`, `false`, `off` or `no` switch it off, any other value switches it on
fn env_switch(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(raw) => !matches!(
            raw.trim().to_ascii_lowercase().as_str(),
            "0" | "false" | "off" | "no"
        ),
        Err(_) => default,
    }
}

static PARALLEL_MASKS: OnceLock<bool> = OnceLock::new();
static PARALLEL_MASK_MIN_VERSION: OnceLock<u8> = OnceLock::new();

/// Default for `EncodeOptions::parallel_masks` (`QR_PARALLEL_MASKS`)
pub(crate) fn parallel_masks() -> bool {
    *PARALLEL_MASKS.get_or_init(|| env_switch("QR_PARALLEL_MASKS", true))
}

/// Smallest version whose mask candidates go to the rayon pool
/// (`QR_PARALLEL_MASK_MIN_VERSION`, 1-40)
pub(crate) fn parallel_mask_min_version() -> u8 {
    *PARALLEL_MASK_MIN_VERSION
        .get_or_init(|| env_number("QR_PARALLEL_MASK_MIN_VERSION", 10).clamp(1, 40))
}
