//! Ringpuffer für empfangene Payloads
//!
//! 8 Slots mit gefalteten u64-Werten (siehe [`Payload::fold`]). Jeder neue
//! Wert überschreibt den Slot am Cursor, der Cursor läuft modulo 8 weiter.
//!
//! [`Payload::fold`]: crate::payload::Payload::fold

/// Anzahl der Slots
pub const RING_SLOTS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RingStore {
    slots: [u64; RING_SLOTS],
    cursor: usize,
}

impl RingStore {
    pub const fn new() -> Self {
        Self {
            slots: [0; RING_SLOTS],
            cursor: 0,
        }
    }

    /// Schreibt einen Wert am Cursor und gibt den beschriebenen Slot zurück
    pub fn push(&mut self, value: u64) -> usize {
        let slot = self.cursor;
        self.slots[slot] = value;
        self.cursor = (slot + 1) % RING_SLOTS;
        slot
    }

    /// Slot der beim nächsten `push` beschrieben wird
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn slot(&self, index: usize) -> Option<u64> {
        self.slots.get(index).copied()
    }

    pub fn slots(&self) -> &[u64; RING_SLOTS] {
        &self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_advances_cursor() {
        let mut store = RingStore::new();
        assert_eq!(store.push(0xAA), 0);
        assert_eq!(store.cursor(), 1);
        assert_eq!(store.slot(0), Some(0xAA));
    }

    #[test]
    fn test_ninth_value_overwrites_first_slot() {
        let mut store = RingStore::new();
        for value in 1..=9u64 {
            store.push(value);
        }
        assert_eq!(store.slot(0), Some(9));
        assert_eq!(store.slot(1), Some(2));
        assert_eq!(store.slot(7), Some(8));
        assert_eq!(store.cursor(), 1);
    }

    #[test]
    fn test_slot_out_of_range() {
        let store = RingStore::new();
        assert_eq!(store.slot(RING_SLOTS), None);
        assert_eq!(store.slots(), &[0; RING_SLOTS]);
    }
}
