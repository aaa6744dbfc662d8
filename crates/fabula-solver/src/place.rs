//! Conversion of shortest-path distances into display coordinates
//!
//! Distances from the virtual source are upper bounds relative to it; the
//! placer linearly rescales them into the padded display range. A reverse
//! pass would yield true lower bounds as well, but that is deliberately
//! omitted, so do not add one.

use crate::config::SolverConfig;
use fabula_domain::{DurationKind, Event, Position};
use std::collections::HashMap;

/// Map each event's endpoint distances onto the display axis.
///
/// An event whose endpoints received no finite distance is omitted from the
/// output; callers tolerate a partial list for such pathological inputs.
pub fn place(
    events: &[Event],
    distances: &HashMap<String, f64>,
    config: &SolverConfig,
) -> Vec<Position> {
    let finite = |name: &str| -> Option<f64> {
        distances.get(name).copied().filter(|d| d.is_finite())
    };

    let endpoints: Vec<Option<(f64, f64)>> = events
        .iter()
        .map(|event| {
            let start = finite(&event.id.start_variable())?;
            let end = finite(&event.id.end_variable())?;
            Some((start, end))
        })
        .collect();

    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for (start, end) in endpoints.iter().flatten() {
        lo = lo.min(*start).min(*end);
        hi = hi.max(*start).max(*end);
    }

    // Degenerate single-point layout: everything placed at the midpoint.
    if hi <= lo {
        let mid = config.scale / 2.0;
        return events
            .iter()
            .zip(&endpoints)
            .filter(|(_, e)| e.is_some())
            .map(|(event, _)| Position::new(event.id.clone(), mid, mid))
            .collect();
    }

    let normalize = |v: f64| config.padding + (v - lo) / (hi - lo) * config.usable_range();

    events
        .iter()
        .zip(&endpoints)
        .filter_map(|(event, endpoints)| {
            let (start_dist, end_dist) = (*endpoints)?;
            let position = match event.duration_type {
                DurationKind::Instant => {
                    let at = normalize(start_dist);
                    Position::new(event.id.clone(), at, at)
                }
                DurationKind::Interval => {
                    let start = normalize(start_dist);
                    let mut end = normalize(end_dist);
                    if end - start < config.min_interval_width {
                        end = start + config.min_interval_width;
                    }
                    Position::new(event.id.clone(), start, end)
                }
            };
            Some(position)
        })
        .collect()
}

/// Space events evenly across the padded range, ignoring distances.
///
/// Used when there are no assertions to honor, and when relaxation ends
/// unfeasible and the layout must still show something sensible. Each event
/// gets one slot in input order; intervals occupy 80% of their slot.
pub fn fallback_placement(events: &[Event], config: &SolverConfig) -> Vec<Position> {
    if events.is_empty() {
        return Vec::new();
    }

    let step = config.usable_range() / events.len() as f64;

    events
        .iter()
        .enumerate()
        .map(|(i, event)| {
            let center = config.padding + step * (i as f64 + 0.5);
            match event.duration_type {
                DurationKind::Instant => Position::new(event.id.clone(), center, center),
                DurationKind::Interval => {
                    let width = step * 0.8;
                    Position::new(event.id.clone(), center - width / 2.0, center + width / 2.0)
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fabula_domain::EventId;

    fn config() -> SolverConfig {
        SolverConfig::default()
    }

    fn distances(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_endpoints_span_the_padded_range() {
        let events = vec![Event::instant("a"), Event::instant("b")];
        let dists = distances(&[
            ("a_start", 0.0),
            ("a_end", 0.0),
            ("b_start", -10.0),
            ("b_end", -10.0),
        ]);

        let positions = place(&events, &dists, &config());
        assert_eq!(positions.len(), 2);
        // The extreme distances land exactly on the pads.
        assert_eq!(positions[0].start, 950.0);
        assert_eq!(positions[1].start, 50.0);
    }

    #[test]
    fn test_instants_collapse_to_points() {
        let events = vec![Event::instant("a"), Event::instant("b")];
        let dists = distances(&[
            ("a_start", -3.0),
            ("a_end", -3.0),
            ("b_start", 0.0),
            ("b_end", 0.0),
        ]);

        let positions = place(&events, &dists, &config());
        assert_eq!(positions[0].start, positions[0].end);
        assert_eq!(positions[1].start, positions[1].end);
    }

    #[test]
    fn test_narrow_interval_is_widened() {
        let events = vec![Event::interval("a"), Event::instant("z")];
        let dists = distances(&[
            ("a_start", -1.0),
            ("a_end", 0.0),
            ("z_start", -1000.0),
            ("z_end", -1000.0),
        ]);

        let positions = place(&events, &dists, &config());
        let a = &positions[0];
        // Raw width would be under a display unit; the minimum applies.
        assert_eq!(a.width(), config().min_interval_width);
    }

    #[test]
    fn test_event_without_distance_is_omitted() {
        let events = vec![Event::instant("a"), Event::instant("ghost")];
        let dists = distances(&[("a_start", 0.0), ("a_end", 0.0), ("other", -5.0)]);

        let positions = place(&events, &dists, &config());
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].event_id, EventId::new("a"));
    }

    #[test]
    fn test_degenerate_layout_uses_midpoint() {
        let events = vec![Event::instant("a"), Event::instant("b")];
        let dists = distances(&[
            ("a_start", -2.0),
            ("a_end", -2.0),
            ("b_start", -2.0),
            ("b_end", -2.0),
        ]);

        let positions = place(&events, &dists, &config());
        for p in &positions {
            assert_eq!(p.start, 500.0);
            assert_eq!(p.end, 500.0);
        }
    }

    #[test]
    fn test_fallback_spaces_events_evenly() {
        let events = vec![
            Event::instant("a"),
            Event::interval("b"),
            Event::instant("c"),
        ];
        let positions = fallback_placement(&events, &config());

        assert_eq!(positions.len(), 3);
        // Monotone in input order, inside the pads.
        assert!(positions[0].end < positions[1].start);
        assert!(positions[1].end < positions[2].start);
        assert!(positions[0].start >= config().padding);
        assert!(positions[2].end <= config().scale - config().padding);
        // The interval occupies 80% of its slot.
        let step = config().usable_range() / 3.0;
        assert!((positions[1].width() - step * 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_fallback_singleton_sits_at_midpoint() {
        let events = vec![Event::instant("only")];
        let positions = fallback_placement(&events, &config());
        assert_eq!(positions[0].start, 500.0);
        assert_eq!(positions[0].end, 500.0);
    }

    #[test]
    fn test_fallback_empty_input() {
        assert!(fallback_placement(&[], &config()).is_empty());
    }
}
