//! Regulator-fixed rate tables.
//!
//! Fee schedules per service type, medication unit profiles per tier and the
//! annual spending cap. The default tables are built once and shared; the
//! engine takes them by reference so alternate tables can be substituted.

use crate::types::*;
use crate::{Error, Result};
use once_cell::sync::Lazy;
use std::num::NonZeroU64;

/// Annual spending cap in currency units
pub const DEFAULT_ASC_AMOUNT: u64 = 10_000;

const DEFAULT_ASC_CAP: NonZeroU64 = match NonZeroU64::new(DEFAULT_ASC_AMOUNT) {
    Some(cap) => cap,
    None => panic!("annual spending cap must be positive"),
};

/// Largest accepted fee per visit or per medication unit
pub const MAX_FEE: u64 = 1_000_000;

/// Largest accepted medication units in one month
pub const MAX_MONTHLY_UNITS: u64 = 1_000;

/// Cached default tables - built once and reused across all calculations
static DEFAULT_TABLES: Lazy<RateTables> = Lazy::new(build_default_tables);

/// Get a reference to the cached default rate tables
pub fn default_tables() -> &'static RateTables {
    &DEFAULT_TABLES
}

/// Visit and medication fees for one service type
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeSchedule {
    /// Charge per attendance
    pub visit: u64,
    /// Charge per medication unit (one unit covers 4 weeks)
    pub medication_unit: u64,
}

/// Medication units dispensed in each month for every tier
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MedicationProfiles {
    pub none: MonthlyAmounts,
    pub low: MonthlyAmounts,
    pub medium: MonthlyAmounts,
    pub high: MonthlyAmounts,
}

impl MedicationProfiles {
    pub fn units_for(&self, tier: MedicationTier) -> &MonthlyAmounts {
        match tier {
            MedicationTier::None => &self.none,
            MedicationTier::Low => &self.low,
            MedicationTier::Medium => &self.medium,
            MedicationTier::High => &self.high,
        }
    }
}

/// Complete set of read-only rates consumed by the engine
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateTables {
    pub sopc: FeeSchedule,
    pub gopc: FeeSchedule,
    pub profiles: MedicationProfiles,
    pub asc_cap: NonZeroU64,
}

impl RateTables {
    pub fn fees_for(&self, service_type: ServiceType) -> FeeSchedule {
        match service_type {
            ServiceType::Sopc => self.sopc,
            ServiceType::Gopc => self.gopc,
        }
    }

    pub fn units_for(&self, tier: MedicationTier) -> &MonthlyAmounts {
        self.profiles.units_for(tier)
    }

    /// Check the tables for inconsistencies
    ///
    /// Returns a list of validation errors (empty if valid).
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.profiles.none.iter().any(|&u| u != 0) {
            errors.push("Tier 'none' must dispense zero units every month".to_string());
        }

        // Higher tiers never dispense less than lower ones
        let ordered = [
            (MedicationTier::None, MedicationTier::Low),
            (MedicationTier::Low, MedicationTier::Medium),
            (MedicationTier::Medium, MedicationTier::High),
        ];
        for (lower, higher) in ordered {
            let below = self.units_for(lower);
            let above = self.units_for(higher);
            if let Some(month) = (0..MONTHS).find(|&m| above[m] < below[m]) {
                errors.push(format!(
                    "Tier '{}' dispenses fewer units than '{}' in month {}",
                    higher,
                    lower,
                    month + 1
                ));
            }
        }

        for tier in MedicationTier::ALL {
            let units = self.units_for(tier);
            if let Some(month) = (0..MONTHS).find(|&m| units[m] > MAX_MONTHLY_UNITS) {
                errors.push(format!(
                    "Tier '{}' exceeds {} units in month {}",
                    tier,
                    MAX_MONTHLY_UNITS,
                    month + 1
                ));
            }
        }

        for service_type in ServiceType::ALL {
            let fees = self.fees_for(service_type);
            if fees.visit == 0 {
                errors.push(format!("Service type '{}' has a zero visit fee", service_type));
            }
            if fees.visit > MAX_FEE || fees.medication_unit > MAX_FEE {
                errors.push(format!(
                    "Service type '{}' has a fee above {}",
                    service_type, MAX_FEE
                ));
            }
        }

        errors
    }

    /// Build custom tables, rejecting a zero cap or inconsistent profiles
    pub fn new(
        sopc: FeeSchedule,
        gopc: FeeSchedule,
        profiles: MedicationProfiles,
        asc_cap: u64,
    ) -> Result<Self> {
        let asc_cap = NonZeroU64::new(asc_cap)
            .ok_or_else(|| Error::Tables("annual spending cap must be positive".into()))?;
        let tables = Self {
            sopc,
            gopc,
            profiles,
            asc_cap,
        };

        let errors = tables.validate();
        if !errors.is_empty() {
            return Err(Error::Tables(errors.join("; ")));
        }
        Ok(tables)
    }
}

/// Builds the published fee schedule
pub fn build_default_tables() -> RateTables {
    RateTables {
        sopc: FeeSchedule {
            visit: 250,
            medication_unit: 20,
        },
        gopc: FeeSchedule {
            visit: 150,
            medication_unit: 5,
        },
        profiles: MedicationProfiles {
            none: [0; MONTHS],
            low: [1; MONTHS],
            medium: [2; MONTHS],
            high: [3; MONTHS],
        },
        asc_cap: DEFAULT_ASC_CAP,
    }
}
