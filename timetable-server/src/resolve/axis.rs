//! Time axis selection.

use crate::domain::{Instant, Journey};

/// Which time of a journey's first leg is compared against a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Departure,
    Arrival,
}

impl Axis {
    /// The arrival axis when `by_arrival`, else the departure axis.
    pub fn select(by_arrival: bool) -> Self {
        if by_arrival {
            Axis::Arrival
        } else {
            Axis::Departure
        }
    }

    /// This axis' instant for a journey.
    pub fn instant(self, journey: &Journey) -> Instant {
        match self {
            Axis::Departure => journey.departure(),
            Axis::Arrival => journey.arrival(),
        }
    }

    /// Instants along this axis, one per journey, in list order.
    pub fn values(self, journeys: &[Journey]) -> Vec<Instant> {
        journeys.iter().map(|j| self.instant(j)).collect()
    }

    /// Whether the journeys are non-decreasing along this axis.
    pub fn is_ordered(self, journeys: &[Journey]) -> bool {
        journeys
            .windows(2)
            .all(|pair| self.instant(&pair[0]) <= self.instant(&pair[1]))
    }
}
