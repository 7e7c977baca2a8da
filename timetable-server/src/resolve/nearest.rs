//! Nearest-journey resolution.
//!
//! Given a candidate list and a requested departure or arrival instant,
//! find the journey closest to that instant on the matching axis, then
//! step forward if the closest one is already in the past relative to the
//! request. The result is an index into the candidate list; an index equal
//! to the list length means no journey qualifies.

use crate::domain::{Instant, Journey};

use super::axis::Axis;

/// The instant a caller wants to travel at.
///
/// When both are given, `arrival` wins: it selects the arrival axis and is
/// the instant compared against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Target {
    pub departure: Option<Instant>,
    pub arrival: Option<Instant>,
}

impl Target {
    /// Depart at or after `at`.
    pub fn departing(at: Instant) -> Self {
        Self {
            departure: Some(at),
            arrival: None,
        }
    }

    /// Arrive at or after `at`.
    pub fn arriving(at: Instant) -> Self {
        Self {
            departure: None,
            arrival: Some(at),
        }
    }

    /// The axis comparisons are made on.
    pub fn axis(&self) -> Axis {
        Axis::select(self.arrival.is_some())
    }

    /// The instant to search for; `now` when neither time is given.
    pub fn instant(&self, now: Instant) -> Instant {
        self.arrival.or(self.departure).unwrap_or(now)
    }

    /// Whether a candidate at `value` needs skipping because it is earlier
    /// than the requested time.
    ///
    /// Only an explicitly requested time biases the result forward.
    fn is_behind(&self, value: Instant) -> bool {
        match (self.departure, self.arrival) {
            (_, Some(arrival)) => value < arrival,
            (Some(departure), None) => value < departure,
            (None, None) => false,
        }
    }
}

/// Index of the instant closest to `target`, or `None` for an empty axis.
///
/// Ties are broken deterministically:
/// - between two equidistant instants, the later one wins;
/// - between identical instants, the last occurrence wins if the instant is
///   before the target, the first occurrence otherwise.
///
/// On a non-decreasing axis this puts the result next to the boundary
/// between "before target" and "at or after target".
pub fn nearest_index(axis: &[Instant], target: Instant) -> Option<usize> {
    let mut best: Option<(usize, chrono::TimeDelta)> = None;

    for (idx, &value) in axis.iter().enumerate() {
        let distance = (value - target).abs();
        let better = match best {
            None => true,
            Some((best_idx, best_distance)) => {
                distance < best_distance
                    || (distance == best_distance && wins_tie(value, axis[best_idx], target))
            }
        };
        if better {
            best = Some((idx, distance));
        }
    }

    best.map(|(idx, _)| idx)
}

/// Whether a later-positioned `candidate` replaces an equidistant `current`.
fn wins_tie(candidate: Instant, current: Instant, target: Instant) -> bool {
    if candidate != current {
        candidate > current
    } else {
        candidate < target
    }
}

/// Index of the first journey that satisfies `target`, in `0..=len`.
///
/// Precondition: `journeys` is non-decreasing along `target.axis()`.
pub fn resolve_index(journeys: &[Journey], target: &Target, now: Instant) -> usize {
    let axis = target.axis();
    let values = axis.values(journeys);
    let wanted = target.instant(now);

    let Some(mut idx) = nearest_index(&values, wanted) else {
        return 0;
    };

    if target.is_behind(values[idx]) {
        idx += 1;
    }

    tracing::debug!(?axis, %wanted, idx, candidates = journeys.len(), "resolved nearest journey");
    idx
}

/// Candidates together with the resolved index.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    journeys: Vec<Journey>,
    index: usize,
}

impl Resolution {
    /// Resolve `target` against `journeys`.
    ///
    /// If the journeys are not ordered along the target's axis they are
    /// stably sorted along it first, so the resolved index and the tail
    /// refer to the sorted order.
    pub fn new(mut journeys: Vec<Journey>, target: &Target, now: Instant) -> Self {
        let axis = target.axis();
        if !axis.is_ordered(&journeys) {
            tracing::warn!(
                ?axis,
                candidates = journeys.len(),
                "candidate journeys out of order, sorting before resolution"
            );
            journeys.sort_by_key(|j| axis.instant(j));
        }

        let index = resolve_index(&journeys, target, now);
        Self { journeys, index }
    }

    /// The resolved index; equal to the candidate count when nothing qualifies.
    pub fn index(&self) -> usize {
        self.index
    }

    /// All candidates, in resolution order.
    pub fn candidates(&self) -> &[Journey] {
        &self.journeys
    }

    /// The nearest qualifying journey.
    pub fn next(&self) -> Option<&Journey> {
        self.journeys.get(self.index)
    }

    /// The nearest qualifying journey and every later one.
    pub fn tail(&self) -> &[Journey] {
        self.journeys.get(self.index..).unwrap_or(&[])
    }

    pub fn into_next(mut self) -> Option<Journey> {
        if self.index < self.journeys.len() {
            Some(self.journeys.swap_remove(self.index))
        } else {
            None
        }
    }

    pub fn into_tail(mut self) -> Vec<Journey> {
        let start = self.index.min(self.journeys.len());
        self.journeys.split_off(start)
    }
}
