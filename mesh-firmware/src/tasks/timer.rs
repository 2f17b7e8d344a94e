// Timer Task - Software-Timer für periodische Updates und verzögerten Reset
use defmt::debug;
use embassy_futures::select::{Either, select};
use embassy_time::{Duration, Instant, Timer};
use mesh_core::TimerId;

use crate::{EventSender, FirmwareEvent, TimerCommand, TimerSignal};

/// Laufender Timer: nächster Ablauf und Periode (None = einmalig)
struct Armed {
    deadline: Instant,
    period: Option<Duration>,
}

impl Armed {
    fn from_command(command: TimerCommand) -> Option<Self> {
        match command {
            TimerCommand::Start {
                period_ms,
                repeating,
            } => {
                let period = Duration::from_millis(u64::from(period_ms));
                Some(Self {
                    deadline: Instant::now() + period,
                    period: repeating.then_some(period),
                })
            }
            TimerCommand::Stop => None,
        }
    }
}

/// Timer Task - eine Instanz pro [`TimerId`]
///
/// Wartet auf Kommandos über das Signal. Ein neues Kommando ersetzt den
/// laufenden Timer. Wiederholende Timer laufen ohne Drift auf festen
/// Deadlines weiter.
#[embassy_executor::task(pool_size = 2)]
pub async fn timer_task(timer: TimerId, signal: &'static TimerSignal, events: EventSender) {
    let mut armed: Option<Armed> = None;

    loop {
        let Some(current) = armed.as_mut() else {
            armed = Armed::from_command(signal.wait().await);
            debug!("Timer {}: armed={}", timer, armed.is_some());
            continue;
        };

        match select(Timer::at(current.deadline), signal.wait()).await {
            Either::First(()) => {
                events.send(FirmwareEvent::TimerExpired(timer)).await;
                match current.period {
                    Some(period) => current.deadline += period,
                    None => armed = None,
                }
            }
            Either::Second(command) => {
                armed = Armed::from_command(command);
                debug!("Timer {}: rearmed={}", timer, armed.is_some());
            }
        }
    }
}
