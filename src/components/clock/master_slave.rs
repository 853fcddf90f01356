use std::time::Duration;
use tracing::info;

use crate::timeline::{Step, TickOutcome, Timeline};
use crate::types::Bit;

/// Display for one latch (master or slave) of the two-stage flip-flop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageView {
    pub label: &'static str,
    pub active: bool,
}

impl StageView {
    const fn new(label: &'static str, active: bool) -> Self {
        Self { label, active }
    }
}

/// One phase of the master-slave walkthrough.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterSlavePhase {
    pub clock: Bit,
    pub master: StageView,
    pub slave: StageView,
}

pub const DEFAULT_PHASES_MS: [u64; 3] = [1500, 1500, 1000];

const PLAY_LABEL: &str = "Play Animation";
const BUSY_LABEL: &str = "Animating...";

/// Scripted two-phase clock walkthrough.
///
/// While the clock is low the master follows the inputs and the slave holds;
/// on the high phase the master holds and the slave copies it to the outputs.
/// Nothing is computed here; the phases are a fixed script.
#[derive(Debug, Clone)]
pub struct MasterSlaveDemo {
    timeline: Timeline<MasterSlavePhase>,
}

impl MasterSlaveDemo {
    pub fn new() -> Self {
        Self::with_durations(DEFAULT_PHASES_MS.map(Duration::from_millis))
    }

    pub fn with_durations(durations: [Duration; 3]) -> Self {
        let [master_active, slave_active, settle] = durations;
        let steps = vec![
            Step::new(
                MasterSlavePhase {
                    clock: Bit::Zero,
                    master: StageView::new("Active (Latches Input)", true),
                    slave: StageView::new("Hold (Previous State)", false),
                },
                master_active,
            ),
            Step::new(
                MasterSlavePhase {
                    clock: Bit::One,
                    master: StageView::new("Hold (Input Latched)", false),
                    slave: StageView::new("Active (Transfers to Output)", true),
                },
                slave_active,
            ),
            Step::new(
                MasterSlavePhase {
                    clock: Bit::Zero,
                    master: StageView::new("Active (Latches)", true),
                    slave: StageView::new("Hold", false),
                },
                settle,
            ),
        ];
        // After the last phase the master keeps its text but loses the highlight.
        let resting = MasterSlavePhase {
            clock: Bit::Zero,
            master: StageView::new("Active (Latches)", false),
            slave: StageView::new("Hold", false),
        };
        Self {
            timeline: Timeline::new(steps, resting),
        }
    }

    /// Starts the walkthrough; ignored while it is already playing.
    pub fn play(&mut self) -> bool {
        let started = self.timeline.start();
        if started {
            info!("master-slave walkthrough started");
        }
        started
    }

    pub fn tick(&mut self, dt: Duration) -> TickOutcome {
        let outcome = self.timeline.tick(dt);
        if outcome == TickOutcome::Completed {
            info!("master-slave walkthrough finished");
        }
        outcome
    }

    pub fn phase(&self) -> &MasterSlavePhase {
        self.timeline.state()
    }

    /// Index of the running phase, `None` when idle.
    pub fn phase_index(&self) -> Option<usize> {
        self.timeline.current_step()
    }

    pub fn is_busy(&self) -> bool {
        self.timeline.is_busy()
    }

    /// Label for the play control.
    pub fn control_label(&self) -> &'static str {
        if self.is_busy() {
            BUSY_LABEL
        } else {
            PLAY_LABEL
        }
    }
}

impl Default for MasterSlaveDemo {
    fn default() -> Self {
        Self::new()
    }
}
