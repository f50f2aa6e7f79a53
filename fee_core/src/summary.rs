//! Annual summary and spending cap advisory.
//!
//! This module reduces the monthly totals of a projection:
//! - Annual total, monthly average and peak month(s)
//! - Banding of the annual total against the annual spending cap

use crate::{AscAdvisory, AscAdvisoryLevel, CalculationSummary, MonthNumber, MonthlyAmounts};
use std::num::NonZeroU64;

/// Lower bound of an advisory band, as the ratio `numerator / denominator`
#[derive(Clone, Copy, Debug)]
pub struct AdvisoryBand {
    pub level: AscAdvisoryLevel,
    pub numerator: u64,
    pub denominator: u64,
}

impl AdvisoryBand {
    /// Inclusive lower bound check, exact in integers
    fn admits(&self, annual_total: u64, cap: NonZeroU64) -> bool {
        u128::from(annual_total) * u128::from(self.denominator)
            >= u128::from(cap.get()) * u128::from(self.numerator)
    }

    pub fn min_ratio(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

/// Bands ordered strongest first; the first band admitting a total wins
pub const ADVISORY_BANDS: [AdvisoryBand; 3] = [
    AdvisoryBand {
        level: AscAdvisoryLevel::StrongAdvisory,
        numerator: 1,
        denominator: 1,
    },
    AdvisoryBand {
        level: AscAdvisoryLevel::Advisory,
        numerator: 4,
        denominator: 5,
    },
    AdvisoryBand {
        level: AscAdvisoryLevel::Notice,
        numerator: 1,
        denominator: 2,
    },
];

/// Reduce twelve monthly totals into an annual summary
///
/// Ties for the peak are all reported, in ascending month order.
pub fn summarize(monthly_totals: &MonthlyAmounts) -> CalculationSummary {
    let annual_total = monthly_totals.iter().fold(0u64, |sum, &t| sum.saturating_add(t));
    let peak_total = monthly_totals.iter().copied().max().unwrap_or(0);

    let peak_months = monthly_totals
        .iter()
        .enumerate()
        .filter(|(_, &total)| total == peak_total)
        .filter_map(|(index, _)| MonthNumber::from_index(index))
        .collect();

    CalculationSummary {
        annual_total,
        monthly_average: monthly_average(annual_total),
        peak_months,
        peak_total,
    }
}

/// annual_total / 12, rounded half-up to cents
fn monthly_average(annual_total: u64) -> f64 {
    let months = crate::MONTHS as u128;
    let cents = (u128::from(annual_total) * 100 + months / 2) / months;
    cents as f64 / 100.0
}

/// Classify an annual total against the spending cap
pub fn advise(annual_total: u64, cap: NonZeroU64) -> AscAdvisory {
    let ratio = annual_total as f64 / cap.get() as f64;

    let level = ADVISORY_BANDS
        .iter()
        .find(|band| band.admits(annual_total, cap))
        .map(|band| band.level)
        .unwrap_or(AscAdvisoryLevel::None);

    AscAdvisory {
        level,
        ratio,
        should_display: level != AscAdvisoryLevel::None,
    }
}
