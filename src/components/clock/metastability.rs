use std::time::Duration;
use tracing::info;

use crate::timeline::{Step, TickOutcome, Timeline};

pub const DEFAULT_STEPS: usize = 8;
pub const DEFAULT_STEP_MS: u64 = 100;

/// Baseline of the trace in diagram coordinates.
pub const MID_LEVEL: f32 = 40.0;
pub const HIGH_EXTREME: f32 = 10.0;
pub const LOW_EXTREME: f32 = 70.0;

/// Stroke colour of the trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceColor {
    /// `#ff0000` while the line oscillates.
    Unstable,
    /// `#ff6b6b` once it has settled.
    Settled,
}

impl TraceColor {
    pub fn rgb(&self) -> [u8; 3] {
        match self {
            TraceColor::Unstable => [0xff, 0x00, 0x00],
            TraceColor::Settled => [0xff, 0x6b, 0x6b],
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            TraceColor::Unstable => "#ff0000",
            TraceColor::Settled => "#ff6b6b",
        }
    }
}

/// A polyline in a 200 x 80 diagram box.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalTrace {
    pub points: [(f32, f32); 7],
    pub color: TraceColor,
}

impl SignalTrace {
    const XS: [f32; 7] = [0.0, 50.0, 70.0, 90.0, 110.0, 150.0, 200.0];

    pub fn settled() -> Self {
        Self {
            points: Self::XS.map(|x| (x, MID_LEVEL)),
            color: TraceColor::Settled,
        }
    }

    /// The trace for oscillation step `step`; even and odd steps mirror each other.
    pub fn oscillating(step: usize) -> Self {
        let (y1, y2) = if step % 2 == 0 {
            (HIGH_EXTREME, LOW_EXTREME)
        } else {
            (LOW_EXTREME, HIGH_EXTREME)
        };
        let ys = [MID_LEVEL, MID_LEVEL, y1, y2, y1, MID_LEVEL, MID_LEVEL];
        let mut points = [(0.0, 0.0); 7];
        for (point, (x, y)) in points.iter_mut().zip(Self::XS.into_iter().zip(ys)) {
            *point = (x, y);
        }
        Self {
            points,
            color: TraceColor::Unstable,
        }
    }

    /// SVG-style `x,y` list, e.g. `"0,40 50,40 ..."`.
    pub fn to_points_string(&self) -> String {
        self.points
            .iter()
            .map(|(x, y)| format!("{},{}", x, y))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Cosmetic metastability illustration: the output swings between the two
/// extremes for a fixed number of steps, then settles on the midline.
#[derive(Debug, Clone)]
pub struct MetastabilityDemo {
    timeline: Timeline<SignalTrace>,
}

impl MetastabilityDemo {
    pub fn new() -> Self {
        Self::with_steps(DEFAULT_STEPS, Duration::from_millis(DEFAULT_STEP_MS))
    }

    pub fn with_steps(count: usize, step_duration: Duration) -> Self {
        let steps = (0..count)
            .map(|i| Step::new(SignalTrace::oscillating(i), step_duration))
            .collect();
        Self {
            timeline: Timeline::new(steps, SignalTrace::settled()),
        }
    }

    pub fn play(&mut self) -> bool {
        let started = self.timeline.start();
        if started {
            info!(steps = self.timeline.len(), "metastability illustration started");
        }
        started
    }

    pub fn tick(&mut self, dt: Duration) -> TickOutcome {
        self.timeline.tick(dt)
    }

    pub fn trace(&self) -> &SignalTrace {
        self.timeline.state()
    }

    pub fn is_busy(&self) -> bool {
        self.timeline.is_busy()
    }

    pub fn step_index(&self) -> Option<usize> {
        self.timeline.current_step()
    }
}

impl Default for MetastabilityDemo {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oscillates_then_settles() {
        let mut demo = MetastabilityDemo::new();
        assert!(demo.play());
        assert_eq!(
            demo.trace().to_points_string(),
            "0,40 50,40 70,10 90,70 110,10 150,40 200,40"
        );
        assert_eq!(demo.trace().color, TraceColor::Unstable);

        demo.tick(Duration::from_millis(100));
        assert_eq!(
            demo.trace().to_points_string(),
            "0,40 50,40 70,70 90,10 110,70 150,40 200,40"
        );

        for _ in 1..7 {
            assert!(matches!(
                demo.tick(Duration::from_millis(100)),
                TickOutcome::Running { changed: true }
            ));
        }
        assert_eq!(demo.step_index(), Some(7));
        assert_eq!(demo.tick(Duration::from_millis(100)), TickOutcome::Completed);
        assert_eq!(*demo.trace(), SignalTrace::settled());
        assert_eq!(demo.trace().color.hex(), "#ff6b6b");
    }

    #[test]
    fn test_play_ignored_while_oscillating() {
        let mut demo = MetastabilityDemo::new();
        demo.play();
        demo.tick(Duration::from_millis(250));
        assert!(!demo.play());
        assert_eq!(demo.step_index(), Some(2));
    }
}
