//! Core domain types for the public charge estimator.
//!
//! This module defines the fundamental types used throughout the system:
//! - Closed input enumerations (service type, medication tier, frequency, month)
//! - Specialty entries tracked by the patient
//! - Monthly breakdowns, summaries and the annual spending cap advisory

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of months in the projection horizon
pub const MONTHS: usize = 12;

/// A value for each month of the projection year, January first
pub type MonthlyAmounts = [u64; MONTHS];

// ============================================================================
// Input Enumerations
// ============================================================================

/// Outpatient service type, selects the fee schedule
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    /// Specialist outpatient clinic
    #[default]
    Sopc,
    /// General outpatient clinic
    Gopc,
}

impl ServiceType {
    pub const ALL: [ServiceType; 2] = [ServiceType::Sopc, ServiceType::Gopc];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Sopc => "sopc",
            ServiceType::Gopc => "gopc",
        }
    }

    /// Human readable clinic name
    pub fn label(&self) -> &'static str {
        match self {
            ServiceType::Sopc => "Specialist outpatient clinic",
            ServiceType::Gopc => "General outpatient clinic",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "sopc" => Ok(ServiceType::Sopc),
            "gopc" => Ok(ServiceType::Gopc),
            other => Err(Error::InvalidInput(format!(
                "unknown service type '{}' (expected sopc or gopc)",
                other
            ))),
        }
    }
}

/// Coarse medication usage, selects a fixed 12-month unit profile
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum MedicationTier {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl MedicationTier {
    pub const ALL: [MedicationTier; 4] = [
        MedicationTier::None,
        MedicationTier::Low,
        MedicationTier::Medium,
        MedicationTier::High,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MedicationTier::None => "none",
            MedicationTier::Low => "low",
            MedicationTier::Medium => "medium",
            MedicationTier::High => "high",
        }
    }
}

impl fmt::Display for MedicationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MedicationTier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(MedicationTier::None),
            "low" => Ok(MedicationTier::Low),
            "medium" => Ok(MedicationTier::Medium),
            "high" => Ok(MedicationTier::High),
            other => Err(Error::InvalidInput(format!(
                "unknown medication tier '{}' (expected none, low, medium or high)",
                other
            ))),
        }
    }
}

/// Follow-up interval in months
///
/// Serialized as the plain month count. Only 1, 2, 3, 4 and 6 are accepted.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum FollowupFrequency {
    Monthly,
    EveryTwoMonths,
    #[default]
    Quarterly,
    EveryFourMonths,
    HalfYearly,
}

impl FollowupFrequency {
    pub const ALL: [FollowupFrequency; 5] = [
        FollowupFrequency::Monthly,
        FollowupFrequency::EveryTwoMonths,
        FollowupFrequency::Quarterly,
        FollowupFrequency::EveryFourMonths,
        FollowupFrequency::HalfYearly,
    ];

    /// Interval length in months
    pub fn months(&self) -> u8 {
        match self {
            FollowupFrequency::Monthly => 1,
            FollowupFrequency::EveryTwoMonths => 2,
            FollowupFrequency::Quarterly => 3,
            FollowupFrequency::EveryFourMonths => 4,
            FollowupFrequency::HalfYearly => 6,
        }
    }
}

impl TryFrom<u8> for FollowupFrequency {
    type Error = Error;

    fn try_from(months: u8) -> Result<Self> {
        FollowupFrequency::ALL
            .into_iter()
            .find(|f| f.months() == months)
            .ok_or_else(|| {
                Error::InvalidInput(format!(
                    "follow-up frequency must be one of 1, 2, 3, 4, 6 months (got {})",
                    months
                ))
            })
    }
}

impl From<FollowupFrequency> for u8 {
    fn from(frequency: FollowupFrequency) -> u8 {
        frequency.months()
    }
}

impl FromStr for FollowupFrequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let months: u8 = s.trim().parse().map_err(|_| {
            Error::InvalidInput(format!("follow-up frequency '{}' is not a number", s))
        })?;
        FollowupFrequency::try_from(months)
    }
}

impl fmt::Display for FollowupFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.months())
    }
}

/// Calendar month number, 1 (January) through 12 (December)
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub struct MonthNumber(u8);

impl MonthNumber {
    pub const JANUARY: MonthNumber = MonthNumber(1);

    pub fn new(month: u8) -> Result<Self> {
        if (1..=MONTHS as u8).contains(&month) {
            Ok(MonthNumber(month))
        } else {
            Err(Error::InvalidInput(format!(
                "month must be between 1 and 12 (got {})",
                month
            )))
        }
    }

    /// 1-based month number
    pub fn get(&self) -> u8 {
        self.0
    }

    /// 0-based position in a monthly array
    pub fn index(&self) -> usize {
        usize::from(self.0 - 1)
    }

    /// Month for a 0-based array position; positions past December yield None
    pub fn from_index(index: usize) -> Option<Self> {
        (index < MONTHS).then(|| MonthNumber(index as u8 + 1))
    }

    /// All twelve months in canonical order
    pub fn all() -> impl Iterator<Item = MonthNumber> {
        (1..=MONTHS as u8).map(MonthNumber)
    }
}

impl Default for MonthNumber {
    fn default() -> Self {
        MonthNumber::JANUARY
    }
}

impl TryFrom<u8> for MonthNumber {
    type Error = Error;

    fn try_from(month: u8) -> Result<Self> {
        MonthNumber::new(month)
    }
}

impl From<MonthNumber> for u8 {
    fn from(month: MonthNumber) -> u8 {
        month.0
    }
}

impl FromStr for MonthNumber {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let month: u8 = s
            .trim()
            .parse()
            .map_err(|_| Error::InvalidInput(format!("month '{}' is not a number", s)))?;
        MonthNumber::new(month)
    }
}

impl fmt::Display for MonthNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Specialty Entries
// ============================================================================

/// One recurring care relationship the patient tracks
///
/// Every field is a closed type, so an entry that deserializes or is built
/// through the `TryFrom` conversions is always valid input for the engine.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SpecialtyEntry {
    /// Caller-supplied correlation key, ignored by the engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub specialty_label: String,
    pub service_type: ServiceType,
    pub followup_frequency_months: FollowupFrequency,
    pub next_followup_month: MonthNumber,
    pub medication_tier: MedicationTier,
}

impl SpecialtyEntry {
    pub fn new(
        service_type: ServiceType,
        followup_frequency_months: FollowupFrequency,
        next_followup_month: MonthNumber,
        medication_tier: MedicationTier,
    ) -> Self {
        Self {
            id: None,
            specialty_label: String::new(),
            service_type,
            followup_frequency_months,
            next_followup_month,
            medication_tier,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.specialty_label = label.into();
        self
    }
}

// ============================================================================
// Results
// ============================================================================

/// Visit and medication costs per month
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct MonthlyBreakdown {
    pub visits: MonthlyAmounts,
    pub medications: MonthlyAmounts,
}

impl MonthlyBreakdown {
    /// Element-wise sum of visits and medications
    pub fn monthly_totals(&self) -> MonthlyAmounts {
        std::array::from_fn(|m| self.visits[m].saturating_add(self.medications[m]))
    }
}

/// Annual reduction of the monthly totals
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct CalculationSummary {
    pub annual_total: u64,
    /// Rounded half-up to 2 decimal places
    pub monthly_average: f64,
    /// Every month reaching `peak_total`, ascending
    pub peak_months: Vec<MonthNumber>,
    pub peak_total: u64,
}

/// Severity of the annual spending cap advisory
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum AscAdvisoryLevel {
    #[default]
    None,
    Notice,
    Advisory,
    StrongAdvisory,
}

impl AscAdvisoryLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AscAdvisoryLevel::None => "none",
            AscAdvisoryLevel::Notice => "notice",
            AscAdvisoryLevel::Advisory => "advisory",
            AscAdvisoryLevel::StrongAdvisory => "strong_advisory",
        }
    }

    /// Readable heading for this level
    pub fn title(&self) -> &'static str {
        match self {
            AscAdvisoryLevel::None => "No advisory",
            AscAdvisoryLevel::Notice => "Notice",
            AscAdvisoryLevel::Advisory => "Advisory",
            AscAdvisoryLevel::StrongAdvisory => "Strong advisory",
        }
    }

    /// Advisory text shown to the patient for this level
    pub fn message(&self) -> Option<&'static str> {
        match self {
            AscAdvisoryLevel::None => None,
            AscAdvisoryLevel::Notice => Some(
                "Your projected public healthcare charges this year may be high. \
                 An annual spending cap arrangement is available.",
            ),
            AscAdvisoryLevel::Advisory => Some(
                "Your projected charges may be approaching the annual spending cap. \
                 Consider learning about the arrangement early (application and approval required).",
            ),
            AscAdvisoryLevel::StrongAdvisory => Some(
                "Your projected charges may reach or exceed the annual spending cap. \
                 The cap only applies after you apply and are approved; it is not automatic. \
                 Contact the medical social services department for details.",
            ),
        }
    }
}

impl fmt::Display for AscAdvisoryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Projected spend measured against the annual spending cap
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AscAdvisory {
    pub level: AscAdvisoryLevel,
    /// annual_total / cap_amount
    pub ratio: f64,
    pub should_display: bool,
}

/// Complete output of a projection
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CalculationResult {
    pub monthly_totals: MonthlyAmounts,
    pub breakdown: MonthlyBreakdown,
    pub summary: CalculationSummary,
    pub asc_advisory: AscAdvisoryLevel,
}

impl CalculationResult {
    /// The all-zero result returned for an empty entry list
    pub fn zero() -> Self {
        Self {
            monthly_totals: [0; MONTHS],
            breakdown: MonthlyBreakdown::default(),
            summary: CalculationSummary::default(),
            asc_advisory: AscAdvisoryLevel::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advisory_titles_are_readable() {
        assert_eq!(AscAdvisoryLevel::StrongAdvisory.title(), "Strong advisory");
        assert_eq!(AscAdvisoryLevel::Advisory.title(), "Advisory");
        assert_eq!(AscAdvisoryLevel::Notice.title(), "Notice");
        assert_eq!(AscAdvisoryLevel::StrongAdvisory.as_str(), "strong_advisory");
    }

    #[test]
    fn test_frequency_accepts_only_allowed_values() {
        for months in [1u8, 2, 3, 4, 6] {
            assert_eq!(FollowupFrequency::try_from(months).unwrap().months(), months);
        }
        for months in [0u8, 5, 7, 12] {
            assert!(matches!(
                FollowupFrequency::try_from(months),
                Err(Error::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_month_number_bounds() {
        assert!(MonthNumber::new(0).is_err());
        assert!(MonthNumber::new(13).is_err());
        assert_eq!(MonthNumber::new(12).unwrap().index(), 11);
        assert_eq!(MonthNumber::from_index(12), None);
        assert_eq!(MonthNumber::all().count(), 12);
    }

    #[test]
    fn test_entry_wire_format() {
        let json = r#"{
            "id": "row-1",
            "specialty_label": "Cardiology",
            "service_type": "sopc",
            "followup_frequency_months": 3,
            "next_followup_month": 2,
            "medication_tier": "medium"
        }"#;
        let entry: SpecialtyEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.service_type, ServiceType::Sopc);
        assert_eq!(entry.followup_frequency_months, FollowupFrequency::Quarterly);
        assert_eq!(entry.next_followup_month.get(), 2);
        assert_eq!(entry.medication_tier, MedicationTier::Medium);

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["followup_frequency_months"], 3);
        assert_eq!(value["service_type"], "sopc");
    }

    #[test]
    fn test_entry_rejects_out_of_range_values() {
        let bad_frequency = r#"{"service_type":"gopc","followup_frequency_months":5,
            "next_followup_month":1,"medication_tier":"none"}"#;
        let bad_month = r#"{"service_type":"gopc","followup_frequency_months":1,
            "next_followup_month":13,"medication_tier":"none"}"#;
        let bad_tier = r#"{"service_type":"gopc","followup_frequency_months":1,
            "next_followup_month":1,"medication_tier":"extreme"}"#;
        let bad_service = r#"{"service_type":"er","followup_frequency_months":1,
            "next_followup_month":1,"medication_tier":"none"}"#;

        for json in [bad_frequency, bad_month, bad_tier, bad_service] {
            assert!(serde_json::from_str::<SpecialtyEntry>(json).is_err());
        }
    }

    #[test]
    fn test_default_entry_matches_new_row() {
        let entry = SpecialtyEntry::default();
        assert_eq!(entry.service_type, ServiceType::Sopc);
        assert_eq!(entry.followup_frequency_months.months(), 3);
        assert_eq!(entry.next_followup_month, MonthNumber::JANUARY);
        assert_eq!(entry.medication_tier, MedicationTier::None);
    }

    #[test]
    fn test_from_str_parsers() {
        assert_eq!("GOPC".parse::<ServiceType>().unwrap(), ServiceType::Gopc);
        assert_eq!("high".parse::<MedicationTier>().unwrap(), MedicationTier::High);
        assert_eq!(
            "6".parse::<FollowupFrequency>().unwrap(),
            FollowupFrequency::HalfYearly
        );
        assert!("x".parse::<MonthNumber>().is_err());
    }

    #[test]
    fn test_breakdown_totals_are_elementwise() {
        let mut breakdown = MonthlyBreakdown::default();
        breakdown.visits[0] = 250;
        breakdown.medications[0] = 40;
        breakdown.medications[5] = 5;
        let totals = breakdown.monthly_totals();
        assert_eq!(totals[0], 290);
        assert_eq!(totals[5], 5);
        assert_eq!(totals[1], 0);
    }
}
