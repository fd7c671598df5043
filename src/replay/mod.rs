//! Event replay engine.
//!
//! Applies an ordered sequence of retained log lines to a topology graph.
//! The engine is the sole mutator of the graph; renderers observe it through
//! a notify-after-mutation contract. No event-application failure aborts the
//! replay: malformed lines are logged and skipped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::ValueEnum;

use crate::config::PacingConfig;
use crate::parser::{classify_line, Event, EventError, EventKind, LineClass};
use crate::render::Renderer;
use crate::topology::TopologyGraph;

/// Replay scheduling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReplayMode {
    /// Apply every event with no delay and render the end state once.
    Final,
    /// Reproduce inter-event timing, with large gaps collapsed.
    Interval,
}

/// Collapse an inter-event gap per the pacing policy.
///
/// While the remaining delta exceeds `skip_threshold`, advance the reference
/// clock by `skip_step` without sleeping. Returns the number of collapsed
/// steps and the residual delay (in milliseconds) that is actually slept.
pub fn collapse_gap(delta_ms: u64, pacing: &PacingConfig) -> (u64, u64) {
    let threshold = pacing.skip_threshold.as_millis() as u64;
    let step = pacing.skip_step.as_millis() as u64;
    if step == 0 {
        // A zero step cannot make progress; sleep the capped delta instead.
        return (0, delta_ms.min(threshold));
    }

    let mut residual = delta_ms;
    let mut steps = 0;
    while residual > threshold {
        residual -= step.min(residual);
        steps += 1;
    }
    (steps, residual)
}

/// Replays OPEN/CLOSE events into a topology graph it exclusively owns.
pub struct ReplayEngine {
    graph: TopologyGraph,
    pacing: PacingConfig,
    cancel: Arc<AtomicBool>,
}

impl ReplayEngine {
    pub fn new(pacing: PacingConfig) -> Self {
        Self {
            graph: TopologyGraph::new(),
            pacing,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Shared flag that stops a paced replay before its next suspension.
    /// Already-applied events are not rolled back.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn graph(&self) -> &TopologyGraph {
        &self.graph
    }

    pub fn into_graph(self) -> TopologyGraph {
        self.graph
    }

    /// Replay the retained lines in the selected mode.
    pub fn run(&mut self, lines: &[String], mode: ReplayMode, renderer: &mut dyn Renderer) {
        match mode {
            ReplayMode::Final => self.run_final(lines, renderer),
            ReplayMode::Interval => self.run_interval(lines, renderer),
        }
    }

    /// Apply everything as fast as possible, then render once.
    fn run_final(&mut self, lines: &[String], renderer: &mut dyn Renderer) {
        for line in lines {
            match classify_line(line) {
                LineClass::Event(event) => self.apply(&event),
                LineClass::Malformed => {
                    log::warn!("Skipping: {}", EventError::Malformed(line.clone()));
                }
                LineClass::Ignored => {}
            }
        }
        renderer.refresh(&self.graph);
    }

    /// Pace events by their timestamp deltas, refreshing the renderer after
    /// each applied event. The first event establishes the reference clock
    /// and is applied immediately.
    fn run_interval(&mut self, lines: &[String], renderer: &mut dyn Renderer) {
        let mut prev_ts: Option<u64> = None;

        for line in lines {
            if self.cancel.load(Ordering::Relaxed) {
                log::info!("Replay cancelled; remaining events not applied");
                return;
            }

            let event = match classify_line(line) {
                LineClass::Event(event) => event,
                LineClass::Malformed => {
                    log::warn!("Skipping: {}", EventError::Malformed(line.clone()));
                    continue;
                }
                LineClass::Ignored => continue,
            };

            // Paced replay needs the leading timestamp of the original line.
            let Some(ts) = event.timestamp else {
                log::warn!("Skipping: {}", EventError::MissingTimestamp(line.clone()));
                continue;
            };

            if let Some(prev) = prev_ts {
                // Lexicographic order can regress numerically; clamp to zero.
                let delta = ts.saturating_sub(prev);
                let (steps, residual) = collapse_gap(delta, &self.pacing);
                if steps > 0 {
                    log::debug!(
                        "Skipping some time: collapsed {} steps of a {}ms gap",
                        steps,
                        delta
                    );
                }
                if residual > 0 {
                    thread::sleep(Duration::from_millis(residual));
                }
            }
            prev_ts = Some(ts);

            self.apply(&event);
            renderer.refresh(&self.graph);
        }
    }

    fn apply(&mut self, event: &Event) {
        match event.kind {
            EventKind::Open => {
                log::debug!("OPEN {} <-> {}", event.endpoint_a, event.endpoint_b);
                self.graph.ensure_vertex(&event.endpoint_a);
                self.graph.ensure_vertex(&event.endpoint_b);
                if let Err(e) = self.graph.add_edge(&event.endpoint_a, &event.endpoint_b) {
                    log::error!("Failed to apply OPEN event: {}", e);
                }
            }
            EventKind::Close => {
                log::debug!("CLOSE {} <-> {}", event.endpoint_a, event.endpoint_b);
                self.graph
                    .remove_edge(&event.endpoint_a, &event.endpoint_b);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use crate::render::NullRenderer;
    use crate::topology::BOOTSTRAP_NODES;

    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn fast_pacing() -> PacingConfig {
        PacingConfig {
            skip_threshold: Duration::from_millis(30),
            skip_step: Duration::from_millis(20),
        }
    }

    #[test]
    fn test_final_mode_open_then_close() {
        let mut engine = ReplayEngine::new(PacingConfig::default());
        engine.run(
            &lines(&["10 OPEN a -> b", "20 CLOSE a -> b"]),
            ReplayMode::Final,
            &mut NullRenderer,
        );

        let graph = engine.graph();
        assert_eq!(graph.vertex_count(), 4); // a, b, two bootstrap vertices
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.degree("a").unwrap(), 0);
        assert_eq!(graph.degree("b").unwrap(), 0);
    }

    #[test]
    fn test_final_mode_degrees() {
        let mut engine = ReplayEngine::new(PacingConfig::default());
        engine.run(
            &lines(&["10 OPEN a -> b", "20 OPEN a -> c"]),
            ReplayMode::Final,
            &mut NullRenderer,
        );

        let graph = engine.graph();
        assert_eq!(graph.degree("a").unwrap(), 2);
        assert_eq!(graph.degree("b").unwrap(), 1);
        assert_eq!(graph.degree("c").unwrap(), 1);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_malformed_lines_are_skipped_not_fatal() {
        let mut engine = ReplayEngine::new(PacingConfig::default());
        engine.run(
            &lines(&["10 OPEN a", "garbage OPEN", "20 OPEN a -> b"]),
            ReplayMode::Final,
            &mut NullRenderer,
        );

        assert_eq!(engine.graph().degree("a").unwrap(), 1);
    }

    #[test]
    fn test_overlay_wrapper_unwrapped() {
        let mut engine = ReplayEngine::new(PacingConfig::default());
        engine.run(
            &lines(&["10 Overlay OPEN a -> b"]),
            ReplayMode::Final,
            &mut NullRenderer,
        );

        assert_eq!(engine.graph().degree("a").unwrap(), 1);
        assert!(engine.graph().neighbors("a").unwrap().contains("b"));
    }

    #[test]
    fn test_symmetry_invariant_after_replay() {
        let mut engine = ReplayEngine::new(PacingConfig::default());
        engine.run(
            &lines(&[
                "10 OPEN a -> b",
                "20 OPEN b -> c",
                "30 CLOSE a -> b",
                "40 OPEN c -> a",
            ]),
            ReplayMode::Final,
            &mut NullRenderer,
        );

        let graph = engine.graph();
        let vertices: Vec<&str> = graph.vertices().collect();
        for &a in &vertices {
            for &b in &vertices {
                assert_eq!(
                    graph.neighbors(a).unwrap().contains(b),
                    graph.neighbors(b).unwrap().contains(a),
                    "asymmetry between {} and {}",
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn test_collapse_gap_below_threshold() {
        let (steps, residual) = collapse_gap(1500, &PacingConfig::default());
        assert_eq!(steps, 0);
        assert_eq!(residual, 1500);
    }

    #[test]
    fn test_collapse_gap_skip_bound() {
        let pacing = PacingConfig::default();
        let delta = 10_000u64;
        let (steps, residual) = collapse_gap(delta, &pacing);

        // At most ceil((D - threshold) / step) collapsed steps.
        let threshold = pacing.skip_threshold.as_millis() as u64;
        let step = pacing.skip_step.as_millis() as u64;
        let bound = (delta - threshold).div_ceil(step);
        assert!(steps <= bound, "{} steps exceeds bound {}", steps, bound);

        // The actual suspension is strictly less than the full gap.
        assert!(residual <= threshold);
        assert!(residual < delta);
    }

    #[test]
    fn test_collapse_gap_zero_step_still_bounded() {
        let pacing = PacingConfig {
            skip_threshold: Duration::from_millis(30),
            skip_step: Duration::from_millis(0),
        };
        let (steps, residual) = collapse_gap(1000, &pacing);
        assert_eq!(steps, 0);
        assert_eq!(residual, 30);
    }

    #[test]
    fn test_interval_mode_compresses_large_gaps() {
        let mut engine = ReplayEngine::new(fast_pacing());
        let start = Instant::now();
        engine.run(
            // 200ms gap against a 30ms threshold / 20ms step policy.
            &lines(&["100 OPEN a -> b", "300 OPEN a -> c"]),
            ReplayMode::Interval,
            &mut NullRenderer,
        );
        let elapsed = start.elapsed();

        assert!(elapsed < Duration::from_millis(200), "slept {:?}", elapsed);
        assert_eq!(engine.graph().degree("a").unwrap(), 2);
    }

    #[test]
    fn test_interval_mode_requires_timestamps() {
        let mut engine = ReplayEngine::new(fast_pacing());
        engine.run(
            &lines(&["OPEN a -> b", "100 OPEN a -> c"]),
            ReplayMode::Interval,
            &mut NullRenderer,
        );

        // The untimestamped event is skipped; the timestamped one applies.
        assert!(!engine.graph().contains_vertex("b"));
        assert!(engine.graph().contains_vertex("c"));
    }

    #[test]
    fn test_cancellation_stops_before_applying() {
        let mut engine = ReplayEngine::new(fast_pacing());
        engine.cancel_flag().store(true, Ordering::Relaxed);
        engine.run(
            &lines(&["100 OPEN a -> b"]),
            ReplayMode::Interval,
            &mut NullRenderer,
        );

        assert!(!engine.graph().contains_vertex("a"));
        assert_eq!(engine.graph().vertex_count(), BOOTSTRAP_NODES.len());
    }

    #[test]
    fn test_renderer_notified_per_event_in_interval_mode() {
        struct CountingRenderer(usize);
        impl Renderer for CountingRenderer {
            fn refresh(&mut self, _graph: &TopologyGraph) {
                self.0 += 1;
            }
        }

        let mut renderer = CountingRenderer(0);
        let mut engine = ReplayEngine::new(fast_pacing());
        engine.run(
            &lines(&["100 OPEN a -> b", "110 OPEN a -> c"]),
            ReplayMode::Interval,
            &mut renderer,
        );
        assert_eq!(renderer.0, 2);

        let mut renderer = CountingRenderer(0);
        let mut engine = ReplayEngine::new(fast_pacing());
        engine.run(
            &lines(&["100 OPEN a -> b", "110 OPEN a -> c"]),
            ReplayMode::Final,
            &mut renderer,
        );
        assert_eq!(renderer.0, 1);
    }
}
