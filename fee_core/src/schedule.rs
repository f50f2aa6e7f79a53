//! Visit schedule generation.

use crate::{FollowupFrequency, MonthNumber, MONTHS};

/// Months of the projection year in which a visit occurs
pub type VisitSchedule = [bool; MONTHS];

/// Expand a follow-up rule into a 12-slot visit vector
///
/// Marks `next_month` and every `frequency` months after it. Stepping stops at
/// December; the horizon never wraps back to earlier months.
pub fn generate_schedule(next_month: MonthNumber, frequency: FollowupFrequency) -> VisitSchedule {
    let mut schedule = [false; MONTHS];
    for index in (next_month.index()..MONTHS).step_by(usize::from(frequency.months())) {
        schedule[index] = true;
    }
    schedule
}

/// 1-based months marked in a schedule
pub fn visit_months(schedule: &VisitSchedule) -> Vec<MonthNumber> {
    schedule
        .iter()
        .enumerate()
        .filter(|(_, &visit)| visit)
        .filter_map(|(index, _)| MonthNumber::from_index(index))
        .collect()
}
