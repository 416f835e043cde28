//! Mutable timing data carried by a timer machine.

use super::config::TimerConfig;
use serde::{Deserialize, Serialize};

/// Bookkeeping the machine keeps for itself.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Internal {
    /// Sum of all closed segments
    pub(crate) elapsed_last_ms: Option<i64>,
    /// One clock sample shared by every action of a transition
    pub(crate) now: Option<i64>,
}

/// Config plus timing data of one machine.
///
/// `start_times` and `stop_times` pair up positionally into segments; while
/// running the last start has no matching stop yet. `elapsed_ms` and
/// `remaining_ms` are absent until the first segment is measured.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerContext {
    pub(crate) config: TimerConfig,
    pub(crate) start_times: Vec<i64>,
    pub(crate) stop_times: Vec<i64>,
    pub(crate) elapsed_ms: Option<i64>,
    pub(crate) remaining_ms: Option<i64>,
    #[serde(rename = "_")]
    pub(crate) internal: Internal,
}

/// One contiguous running interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub start_ms: i64,
    /// `None` while the segment is still open
    pub stop_ms: Option<i64>,
}

impl Segment {
    /// Length of a closed segment.
    pub fn duration_ms(&self) -> Option<i64> {
        self.stop_ms.map(|stop| stop - self.start_ms)
    }

    pub fn is_open(&self) -> bool {
        self.stop_ms.is_none()
    }
}

impl TimerContext {
    pub fn new(config: TimerConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn start_times(&self) -> &[i64] {
        &self.start_times
    }

    pub fn stop_times(&self) -> &[i64] {
        &self.stop_times
    }

    pub fn elapsed_ms(&self) -> Option<i64> {
        self.elapsed_ms
    }

    /// Remaining countdown time; always `None` in stopwatch mode.
    pub fn remaining_ms(&self) -> Option<i64> {
        self.remaining_ms
    }

    pub(crate) fn elapsed_last_ms(&self) -> Option<i64> {
        self.internal.elapsed_last_ms
    }

    /// Segments in the order they were opened.
    pub fn segments(&self) -> Vec<Segment> {
        self.start_times
            .iter()
            .enumerate()
            .map(|(i, &start_ms)| Segment {
                start_ms,
                stop_ms: self.stop_times.get(i).copied(),
            })
            .collect()
    }

    /// True if the last segment has no stop yet.
    pub fn has_open_segment(&self) -> bool {
        self.start_times.len() == self.stop_times.len() + 1
    }

    /// `stop_times` never outgrow `start_times`, and trail them by at most one.
    pub fn segments_consistent(&self) -> bool {
        let (starts, stops) = (self.start_times.len(), self.stop_times.len());
        stops <= starts && starts <= stops + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_with(starts: &[i64], stops: &[i64]) -> TimerContext {
        TimerContext {
            start_times: starts.to_vec(),
            stop_times: stops.to_vec(),
            ..TimerContext::new(TimerConfig::default())
        }
    }

    #[test]
    fn new_context_is_empty() {
        let ctx = TimerContext::new(TimerConfig::default());

        assert!(ctx.start_times().is_empty());
        assert!(ctx.stop_times().is_empty());
        assert_eq!(ctx.elapsed_ms(), None);
        assert_eq!(ctx.remaining_ms(), None);
        assert_eq!(ctx.elapsed_last_ms(), None);
    }

    #[test]
    fn segments_pair_starts_with_stops() {
        let ctx = context_with(&[0, 5_000, 9_000], &[3_000, 8_000]);
        let segments = ctx.segments();

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].duration_ms(), Some(3_000));
        assert_eq!(segments[1].duration_ms(), Some(3_000));
        assert!(segments[2].is_open());
        assert_eq!(segments[2].duration_ms(), None);
        assert!(ctx.has_open_segment());
    }

    #[test]
    fn segment_counts_are_checked() {
        assert!(context_with(&[], &[]).segments_consistent());
        assert!(context_with(&[1], &[]).segments_consistent());
        assert!(context_with(&[1], &[2]).segments_consistent());
        assert!(!context_with(&[], &[2]).segments_consistent());
        assert!(!context_with(&[1, 2], &[]).segments_consistent());
    }

    #[test]
    fn internal_fields_serialize_under_underscore() {
        let json = serde_json::to_value(TimerContext::new(TimerConfig::default())).unwrap();
        assert!(json.get("_").is_some());
        assert!(json.get("internal").is_none());
    }
}
