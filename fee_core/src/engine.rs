//! Fee projection engine.
//!
//! Folds every specialty's visit schedule and medication profile into
//! monthly cost vectors, then summarizes them and classifies the annual
//! total against the spending cap. All functions are pure.

use crate::schedule::generate_schedule;
use crate::summary::{advise, summarize};
use crate::tables::{default_tables, RateTables};
use crate::{CalculationResult, MonthlyBreakdown, SpecialtyEntry, MONTHS};

/// Accumulate visit and medication costs of all entries month by month
///
/// Amounts saturate at `u64::MAX` rather than wrap.
pub fn aggregate(entries: &[SpecialtyEntry], tables: &RateTables) -> MonthlyBreakdown {
    let mut breakdown = MonthlyBreakdown::default();

    for entry in entries {
        let fees = tables.fees_for(entry.service_type);
        let schedule = generate_schedule(entry.next_followup_month, entry.followup_frequency_months);
        let units = tables.units_for(entry.medication_tier);

        for month in 0..MONTHS {
            if schedule[month] {
                breakdown.visits[month] = breakdown.visits[month].saturating_add(fees.visit);
            }
            let medication = units[month].saturating_mul(fees.medication_unit);
            breakdown.medications[month] = breakdown.medications[month].saturating_add(medication);
        }
    }

    breakdown
}

/// Project a year of charges using the published rate tables
pub fn calculate(entries: &[SpecialtyEntry]) -> CalculationResult {
    calculate_with(entries, default_tables())
}

/// Project a year of charges using the given rate tables
///
/// An empty entry list yields the all-zero result with no advisory.
pub fn calculate_with(entries: &[SpecialtyEntry], tables: &RateTables) -> CalculationResult {
    if entries.is_empty() {
        tracing::debug!("No specialties entered, returning zero projection");
        return CalculationResult::zero();
    }

    let breakdown = aggregate(entries, tables);
    let monthly_totals = breakdown.monthly_totals();
    let summary = summarize(&monthly_totals);
    let advisory = advise(summary.annual_total, tables.asc_cap);

    tracing::debug!(
        "Projected {} specialties: annual total {}, advisory {}",
        entries.len(),
        summary.annual_total,
        advisory.level
    );

    CalculationResult {
        monthly_totals,
        breakdown,
        summary,
        asc_advisory: advisory.level,
    }
}
