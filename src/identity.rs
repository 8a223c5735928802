//! RFID identity reader.
//!
//! One non-blocking transaction per call: check for a freshly presented
//! tag, read its UID, classify it against the two reference tags, and
//! close the read session.  The raw UID is returned alongside the class
//! for the diagnostic log.

use log::debug;

use crate::app::ports::RfidPort;
use crate::config::SystemConfig;

/// Length of a tag UID in bytes.
pub const UID_LEN: usize = 4;

/// Raw tag identifier.
pub type Uid = [u8; UID_LEN];

/// How a presented tag biases the comfort score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityClass {
    Raise,
    Lower,
    Neutral,
}

/// A completed identity transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityRead {
    pub uid: Uid,
    pub class: IdentityClass,
}

pub struct IdentityReader {
    raise: Uid,
    lower: Uid,
}

impl IdentityReader {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            raise: config.raise_tag,
            lower: config.lower_tag,
        }
    }

    /// Exact-match classification of a UID.
    pub fn classify(&self, uid: &Uid) -> IdentityClass {
        if *uid == self.raise {
            IdentityClass::Raise
        } else if *uid == self.lower {
            IdentityClass::Lower
        } else {
            IdentityClass::Neutral
        }
    }

    /// Poll the reader once.
    ///
    /// Returns `None` when no new tag is in the field.  Once a tag has been
    /// detected the session is halted before returning, whether or not
    /// the UID could be read.
    pub fn poll_identity(&self, rfid: &mut impl RfidPort) -> Option<IdentityRead> {
        if !rfid.new_card_present() {
            return None;
        }

        let uid = rfid.read_uid();
        rfid.halt();

        let uid = uid?;
        let class = self.classify(&uid);
        debug!("Identity: {:02X?} -> {:?}", uid, class);
        Some(IdentityRead { uid, class })
    }
}
