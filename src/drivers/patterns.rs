//! Indicator pattern engine for the blocking episodes.
//!
//! A [`BlinkPattern`] is a square wave (`on_ms` lit, `off_ms` dark).  An
//! episode expands it into timed [`Segment`]s covering a fixed window and
//! plays them back through a caller-supplied output function, blocking on
//! [`DelayNs`] between segments.
//!
//! ```text
//!   Alarm   (800/200, 3000 ms)  ████████░░████████░░████████░░
//!   Locked  (500/500, 7000 ms)  █████░░░░░█████░░░░░ … ×7
//! ```
//!
//! The final segment is truncated when the window is not a whole number of
//! cycles, so an episode never overruns its window.

use embedded_hal::delay::DelayNs;

/// On/off square wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkPattern {
    pub on_ms: u32,
    pub off_ms: u32,
}

/// One lit or dark stretch of an episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub lit: bool,
    pub duration_ms: u32,
}

impl BlinkPattern {
    pub const fn new(on_ms: u32, off_ms: u32) -> Self {
        Self { on_ms, off_ms }
    }

    pub const fn period_ms(self) -> u32 {
        self.on_ms.saturating_add(self.off_ms)
    }

    /// Output level `t_ms` into the pattern.
    pub fn is_lit_at(self, t_ms: u32) -> bool {
        match self.period_ms() {
            0 => false,
            p => t_ms % p < self.on_ms,
        }
    }

    /// Segments covering exactly `window_ms`, starting with the lit half.
    pub fn segments(self, window_ms: u32) -> Segments {
        Segments {
            pattern: self,
            remaining_ms: if self.period_ms() == 0 { 0 } else { window_ms },
            lit: true,
        }
    }
}

/// Iterator returned by [`BlinkPattern::segments`].
pub struct Segments {
    pattern: BlinkPattern,
    remaining_ms: u32,
    lit: bool,
}

impl Iterator for Segments {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        while self.remaining_ms > 0 {
            let lit = self.lit;
            let nominal = if lit {
                self.pattern.on_ms
            } else {
                self.pattern.off_ms
            };
            self.lit = !self.lit;
            if nominal == 0 {
                continue;
            }
            let duration_ms = nominal.min(self.remaining_ms);
            self.remaining_ms -= duration_ms;
            return Some(Segment { lit, duration_ms });
        }
        None
    }
}

/// Play `pattern` for `window_ms`, calling `apply(hw, lit)` at every
/// segment edge.  `apply(hw, false)` is called once more at the end.
///
/// Returns the number of lit segments played.
pub fn run_episode<H: DelayNs>(
    hw: &mut H,
    pattern: BlinkPattern,
    window_ms: u32,
    mut apply: impl FnMut(&mut H, bool),
) -> u32 {
    let mut flashes = 0;
    for seg in pattern.segments(window_ms) {
        if seg.lit {
            flashes += 1;
        }
        apply(hw, seg.lit);
        hw.delay_ms(seg.duration_ms);
    }
    apply(hw, false);
    flashes
}
