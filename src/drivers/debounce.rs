//! Majority-vote debounced line read.
//!
//! ## Hardware
//!
//! Inputs are pulled up and switched to ground, so a line is *active* when
//! it reads LOW. Contact bounce and induced noise show up as single-sample
//! glitches; three samples 100 µs apart with a 2-of-3 vote reject them.
//!
//! No state is kept between calls. A read blocks for about 300 µs.

use embedded_hal::delay::DelayNs;

use crate::app::ports::LinePort;

/// Samples taken per read.
pub const SAMPLES: u8 = 3;
/// Active samples required for an active result.
pub const MAJORITY: u8 = 2;
/// Gap after each sample (microseconds).
pub const SAMPLE_GAP_US: u32 = 100;

/// `true` when at least two of three samples read the line LOW.
pub fn read_stable<H>(hw: &mut H, pin: u8) -> bool
where
    H: LinePort + DelayNs + ?Sized,
{
    let mut active = 0u8;
    for _ in 0..SAMPLES {
        if !hw.raw_read(pin) {
            active += 1;
        }
        hw.delay_us(SAMPLE_GAP_US);
    }
    active >= MAJORITY
}
