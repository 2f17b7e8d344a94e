//! Auswahl der Update-Periode mit zwei Tastern
//!
//! ```text
//!            PB1 short/medium
//!   Idle ─────────────────────────▶ Selecting ──┐ PB0 short: index + 1
//!    ▲                                 │  ▲      │ PB1 short: index - 1
//!    └──────── PB0 long (commit) ──────┘  └──────┘ (zyklisch)
//! ```
//!
//! Im Zustand `Selecting` gehören alle Tasten der Auswahl. Im Zustand
//! `Idle` sendet PB0 einmalig Daten. Die State Machine hat keine
//! Seiteneffekte, sie liefert nur eine [`SelectorAction`].

use crate::time_codec::{Interval, StepResolution};
use crate::types::{Button, ButtonEvent, PressDuration};

/// Angebotene Update-Perioden: 1 s, 10 s, 1 min, 10 min, kein Update
pub const PERIOD_CANDIDATES: [Interval; 5] = [
    Interval::encode(StepResolution::Millis100, 10),
    Interval::encode(StepResolution::Seconds1, 10),
    Interval::encode(StepResolution::Seconds10, 6),
    Interval::encode(StepResolution::Minutes10, 1),
    Interval::DISABLED,
];

const CADENCE_NAMES: [&str; 4] = ["1 second", "10 seconds", "1 minute", "10 minutes"];
const CADENCE_LABELS: [&str; 4] = ["1s", "10s", "1m", "10m"];
const NO_UPDATE: &str = "No update";

/// Anzeigename einer Periode, ab Index 4 "No update"
pub fn cadence_name(index: usize) -> &'static str {
    CADENCE_NAMES.get(index).copied().unwrap_or(NO_UPDATE)
}

/// Kurzname für das Log
pub fn cadence_label(index: usize) -> &'static str {
    CADENCE_LABELS.get(index).copied().unwrap_or(NO_UPDATE)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SelectorMode {
    Idle,
    Selecting,
}

/// Was der Node nach einem Tastendruck tun soll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorAction {
    /// Idle, PB0: Messwert einmalig senden
    PublishOnce,
    /// Idle, PB1: Auswahl gestartet, Index steht auf 0
    EnterSelection { index: usize },
    /// Auswahl verschoben
    Moved { index: usize },
    /// Auswahl bestätigt, zurück in Idle
    Committed { index: usize, interval: Interval },
    /// Taste ohne Bedeutung im aktuellen Zustand
    Ignored,
}

#[derive(Debug, Clone)]
pub struct PeriodSelector {
    mode: SelectorMode,
    index: usize,
    candidates: &'static [Interval],
}

impl Default for PeriodSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl PeriodSelector {
    pub const fn new() -> Self {
        Self::with_candidates(&PERIOD_CANDIDATES)
    }

    pub const fn with_candidates(candidates: &'static [Interval]) -> Self {
        Self {
            mode: SelectorMode::Idle,
            index: 0,
            candidates,
        }
    }

    pub fn mode(&self) -> SelectorMode {
        self.mode
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_selecting(&self) -> bool {
        self.mode == SelectorMode::Selecting
    }

    pub fn candidates(&self) -> &'static [Interval] {
        self.candidates
    }

    pub fn on_button(&mut self, event: ButtonEvent) -> SelectorAction {
        match self.mode {
            SelectorMode::Idle => self.on_idle(event),
            SelectorMode::Selecting => self.on_selecting(event),
        }
    }

    fn on_idle(&mut self, event: ButtonEvent) -> SelectorAction {
        match (event.duration, event.button) {
            (PressDuration::Short | PressDuration::Medium, Button::Pb0) => {
                SelectorAction::PublishOnce
            }
            (PressDuration::Short | PressDuration::Medium, Button::Pb1) => {
                if self.candidates.is_empty() {
                    return SelectorAction::Ignored;
                }
                self.mode = SelectorMode::Selecting;
                self.index = 0;
                SelectorAction::EnterSelection { index: 0 }
            }
            _ => SelectorAction::Ignored,
        }
    }

    fn on_selecting(&mut self, event: ButtonEvent) -> SelectorAction {
        let last = self.candidates.len().saturating_sub(1);

        match (event.duration, event.button) {
            (PressDuration::Short, Button::Pb0) => {
                self.index = if self.index < last { self.index + 1 } else { 0 };
                SelectorAction::Moved { index: self.index }
            }
            (PressDuration::Short, Button::Pb1) => {
                self.index = if self.index > 0 { self.index - 1 } else { last };
                SelectorAction::Moved { index: self.index }
            }
            (PressDuration::Long, Button::Pb0) => {
                let interval = self
                    .candidates
                    .get(self.index)
                    .copied()
                    .unwrap_or(Interval::DISABLED);
                self.mode = SelectorMode::Idle;
                SelectorAction::Committed {
                    index: self.index,
                    interval,
                }
            }
            // PB1 long ist nicht belegt, medium/very long ebenfalls nicht
            _ => SelectorAction::Ignored,
        }
    }
}
