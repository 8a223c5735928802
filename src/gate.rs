//! Keypad credential gate.
//!
//! Accumulates key presses into a bounded candidate buffer and compares it
//! against the stored access code when the submit key (`*`) arrives.
//!
//! ```text
//!   key ──▶ '*'? ──no──▶ buffer full? ──no──▶ append ──▶ Masked{position}
//!            │                  └─yes──▶ Ignored
//!            yes
//!            ▼
//!   compare(buffer, credential) ; clear buffer
//!            │
//!     match ─┴─ mismatch ──▶ failures += 1 ──▶ failures >= limit? ──▶ Locked
//!       │                                         └──────────────────▶ Denied
//!       ▼
//!   failures = 0 ──▶ Granted
//! ```
//!
//! The gate has no display or actuator side effects; the caller turns the
//! returned [`GateSignal`] into feedback.

use heapless::{String, Vec};
use log::{info, warn};
use subtle::ConstantTimeEq;

use crate::config::{MAX_CODE_LEN, SystemConfig};

/// Key that submits the buffered code.
pub const SUBMIT_KEY: char = '*';

/// Placeholder echoed for every accepted key.
pub const MASK_CHAR: char = '*';

/// Outcome of a single key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateSignal {
    /// Key stored; echo one mask character at `position` (0-based column).
    Masked { position: u8 },
    /// Buffer already full; key dropped.
    Ignored,
    /// Code matched.
    Granted,
    /// Code rejected; `failures` consecutive mismatches so far.
    Denied { failures: u8 },
    /// Code rejected and the attempt limit was reached.
    Locked,
}

/// Immutable access code.
///
/// Comparison always walks the full buffer capacity so that timing does
/// not reveal how long a matching prefix was.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    bytes: [u8; MAX_CODE_LEN],
    len: u8,
}

impl Credential {
    /// Build from a configured code.  Characters beyond `MAX_CODE_LEN`
    /// bytes cannot occur because the config type is bounded.
    pub fn new(code: &str) -> Self {
        let mut bytes = [0u8; MAX_CODE_LEN];
        let len = code.len().min(MAX_CODE_LEN);
        bytes[..len].copy_from_slice(&code.as_bytes()[..len]);
        Self {
            bytes,
            len: len as u8,
        }
    }

    /// Exact equality against a candidate, without early exit.
    pub fn matches(&self, candidate: &str) -> bool {
        let cand = candidate.as_bytes();
        let mut padded = [0u8; MAX_CODE_LEN];
        let n = cand.len().min(MAX_CODE_LEN);
        padded[..n].copy_from_slice(&cand[..n]);

        let same_bytes = self.bytes[..].ct_eq(&padded[..]);
        let same_len = (cand.len() as u64).ct_eq(&u64::from(self.len));
        bool::from(same_bytes & same_len)
    }
}

impl core::fmt::Debug for Credential {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Credential(len={})", self.len)
    }
}

/// The gate itself: candidate buffer plus failure counter.
pub struct CredentialGate {
    credential: Credential,
    buffer: String<MAX_CODE_LEN>,
    failures: u8,
    max_failures: u8,
}

impl CredentialGate {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            credential: Credential::new(&config.credential),
            buffer: String::new(),
            failures: 0,
            max_failures: config.max_failed_attempts,
        }
    }

    /// Feed one key press.
    pub fn submit_key(&mut self, key: char) -> GateSignal {
        if key == SUBMIT_KEY {
            return self.finalize();
        }

        let position = self.buffer.len();
        if self.buffer.push(key).is_err() {
            return GateSignal::Ignored;
        }
        GateSignal::Masked {
            position: position as u8,
        }
    }

    /// Consecutive mismatches since the last success or reset.
    pub fn failures(&self) -> u8 {
        self.failures
    }

    /// Characters currently buffered.
    pub fn pending_len(&self) -> usize {
        self.buffer.len()
    }

    /// Forget the partial entry and the failure count.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.failures = 0;
    }

    /// Drop the partial entry only.
    pub fn clear_input(&mut self) {
        self.buffer.clear();
    }

    fn finalize(&mut self) -> GateSignal {
        let granted = self.credential.matches(&self.buffer);
        let entered = self.buffer.len();
        self.buffer.clear();

        if granted {
            self.failures = 0;
            info!("Gate: access granted");
            return GateSignal::Granted;
        }

        self.failures = self.failures.saturating_add(1);
        warn!(
            "Gate: wrong code ({} chars), {}/{} failures",
            entered, self.failures, self.max_failures
        );
        if self.failures >= self.max_failures {
            GateSignal::Locked
        } else {
            GateSignal::Denied {
                failures: self.failures,
            }
        }
    }
}

/// Feed every key of `keys` and collect the signals (at most 32).
pub fn feed_keys(gate: &mut CredentialGate, keys: &str) -> Vec<GateSignal, 32> {
    let mut out = Vec::new();
    for key in keys.chars() {
        if out.push(gate.submit_key(key)).is_err() {
            break;
        }
    }
    out
}
