//! Fuzz target: arbitrary key streams into the credential gate.
//!
//! Each input byte is folded onto the 4x4 keypad alphabet.  The gate must
//! never panic, never buffer more than the code capacity, and report
//! `Locked` exactly when the failure count reaches the limit.

#![no_main]

use comfortctl::config::{MAX_CODE_LEN, SystemConfig};
use comfortctl::gate::{CredentialGate, GateSignal};
use libfuzzer_sys::fuzz_target;

const KEYS: [char; 16] = [
    '1', '2', '3', 'A', '4', '5', '6', 'B', '7', '8', '9', 'C', '*', '0', '#', 'D',
];

fuzz_target!(|data: &[u8]| {
    let config = SystemConfig::default();
    let mut gate = CredentialGate::new(&config);

    for &byte in data {
        let key = KEYS[usize::from(byte & 0x0F)];
        match gate.submit_key(key) {
            GateSignal::Locked => assert!(gate.failures() >= config.max_failed_attempts),
            GateSignal::Denied { failures } => {
                assert!(failures < config.max_failed_attempts);
                assert_eq!(failures, gate.failures());
            }
            GateSignal::Granted => assert_eq!(gate.failures(), 0),
            GateSignal::Masked { position } => assert!(usize::from(position) < MAX_CODE_LEN),
            GateSignal::Ignored => assert_eq!(gate.pending_len(), MAX_CODE_LEN),
        }
        assert!(gate.pending_len() <= MAX_CODE_LEN);
    }
});
