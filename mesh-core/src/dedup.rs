//! Duplikat-Erkennung für eingehende Payloads
//!
//! Vergleicht Byte für Byte mit dem zuletzt akzeptierten Payload. Payloads
//! mit falscher Länge sind nie Duplikate und lassen den Cache unverändert.

use crate::payload::Payload;

/// Ergebnis der Prüfung eines eingehenden Payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DedupVerdict {
    /// Identisch mit dem Cache - verwerfen
    Duplicate,
    /// Neuer Payload, Cache wurde aktualisiert
    Fresh(Payload),
    /// Länge != 8, kein Vergleich möglich
    Unframed,
}

#[derive(Debug, Clone, Default)]
pub struct ReceiveDeduper {
    cache: Payload,
}

impl ReceiveDeduper {
    /// Cache startet mit acht Null-Bytes
    pub const fn new() -> Self {
        Self {
            cache: Payload::ZERO,
        }
    }

    pub fn check(&mut self, bytes: &[u8]) -> DedupVerdict {
        let Some(payload) = Payload::from_slice(bytes) else {
            return DedupVerdict::Unframed;
        };

        if payload == self.cache {
            return DedupVerdict::Duplicate;
        }

        self.cache = payload;
        DedupVerdict::Fresh(payload)
    }

    pub fn cache(&self) -> &Payload {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_zero_payload_is_duplicate() {
        let mut deduper = ReceiveDeduper::new();
        assert_eq!(deduper.check(&[0; 8]), DedupVerdict::Duplicate);
    }

    #[test]
    fn test_repeated_payload_is_dropped() {
        let mut deduper = ReceiveDeduper::new();
        let bytes = [1, 2, 3, 4, 5, 6, 7, 8];
        assert_eq!(
            deduper.check(&bytes),
            DedupVerdict::Fresh(Payload::from_bytes(bytes))
        );
        assert_eq!(deduper.check(&bytes), DedupVerdict::Duplicate);
    }

    #[test]
    fn test_one_byte_difference_is_fresh() {
        let mut deduper = ReceiveDeduper::new();
        deduper.check(&[1, 2, 3, 4, 5, 6, 7, 8]);
        let changed = [1, 2, 3, 4, 5, 6, 7, 9];
        assert_eq!(
            deduper.check(&changed),
            DedupVerdict::Fresh(Payload::from_bytes(changed))
        );
        assert_eq!(deduper.cache().as_bytes(), &changed);
    }

    #[test]
    fn test_wrong_length_never_matches() {
        let mut deduper = ReceiveDeduper::new();
        assert_eq!(deduper.check(&[]), DedupVerdict::Unframed);
        assert_eq!(deduper.check(&[0; 9]), DedupVerdict::Unframed);
        assert_eq!(deduper.check(&[0; 7]), DedupVerdict::Unframed);
        assert_eq!(deduper.cache(), &Payload::ZERO);
    }
}
