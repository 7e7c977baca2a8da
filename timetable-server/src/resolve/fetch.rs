//! Two-day candidate fetching.

use chrono::{Days, Local, TimeDelta, TimeZone};

use crate::domain::{Instant, Journey};
use crate::timetable::{TimetableError, TimetableProvider};

/// The same local wall-clock time one calendar day after `reference`.
///
/// Uses calendar arithmetic in the server's zone, so a day containing a DST
/// change is 23 or 25 hours long. Falls back to +24h when the wall-clock
/// time does not exist on the following day.
pub fn day_after(reference: Instant) -> Instant {
    day_after_in(reference, &Local)
}

/// [`day_after`] in the zone `tz`.
pub fn day_after_in<Tz: TimeZone>(reference: Instant, tz: &Tz) -> Instant {
    reference
        .with_timezone(tz)
        .checked_add_days(Days::new(1))
        .map(|next| next.fixed_offset())
        .unwrap_or_else(|| reference + TimeDelta::days(1))
}

/// Fetch journeys for the day of `reference` and the day after, merged.
///
/// Both provider calls run concurrently and must both succeed. The result
/// is the reference day's journeys followed by the next day's, each in
/// provider order.
pub async fn fetch_two_days<P: TimetableProvider>(
    provider: &P,
    origin: &str,
    destination: &str,
    reference: Instant,
) -> Result<Vec<Journey>, TimetableError> {
    let next_day = day_after(reference);

    let (mut candidates, following) = futures::try_join!(
        provider.journeys(origin, destination, reference),
        provider.journeys(origin, destination, next_day)
    )?;

    tracing::debug!(
        origin,
        destination,
        %reference,
        first_day = candidates.len(),
        second_day = following.len(),
        "fetched candidate journeys"
    );

    candidates.extend(following);
    Ok(candidates)
}
