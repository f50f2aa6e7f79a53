//! Golden case validation for the projection engine.
//!
//! Each fixture pairs a list of specialties with the expected projection.
//! Integer fields must match exactly; the monthly average within 0.01.

use fee_core::{calculate, AscAdvisoryLevel, SpecialtyEntry};
use serde::Deserialize;

const FIXTURES: &str = include_str!("fixtures/golden_cases.json");

#[derive(Debug, Deserialize)]
struct GoldenFile {
    test_cases: Vec<GoldenCase>,
}

#[derive(Debug, Deserialize)]
struct GoldenCase {
    case_id: String,
    description: String,
    inputs: GoldenInputs,
    expected: Expected,
}

#[derive(Debug, Deserialize)]
struct GoldenInputs {
    specialties: Vec<SpecialtyEntry>,
}

#[derive(Debug, Deserialize)]
struct ExpectedBreakdown {
    visits: Vec<u64>,
    medications: Vec<u64>,
}

#[derive(Debug, Deserialize)]
struct Expected {
    monthly_totals: Vec<u64>,
    breakdown: ExpectedBreakdown,
    annual_total: u64,
    monthly_average: f64,
    peak_months: Vec<u8>,
    peak_total: u64,
    asc_advisory: AscAdvisoryLevel,
}

fn load_cases() -> Vec<GoldenCase> {
    let file: GoldenFile = serde_json::from_str(FIXTURES).expect("Failed to parse golden cases");
    file.test_cases
}

/// Compare one case, collecting every mismatch
fn validate_case(case: &GoldenCase) -> Vec<String> {
    let mut errors = Vec::new();
    let result = calculate(&case.inputs.specialties);
    let expected = &case.expected;

    if result.monthly_totals.to_vec() != expected.monthly_totals {
        errors.push(format!(
            "Monthly totals mismatch. Expected: {:?}, Got: {:?}",
            expected.monthly_totals, result.monthly_totals
        ));
    }
    if result.breakdown.visits.to_vec() != expected.breakdown.visits {
        errors.push(format!(
            "Breakdown visits mismatch. Expected: {:?}, Got: {:?}",
            expected.breakdown.visits, result.breakdown.visits
        ));
    }
    if result.breakdown.medications.to_vec() != expected.breakdown.medications {
        errors.push(format!(
            "Breakdown medications mismatch. Expected: {:?}, Got: {:?}",
            expected.breakdown.medications, result.breakdown.medications
        ));
    }
    if result.summary.annual_total != expected.annual_total {
        errors.push(format!(
            "Annual total mismatch. Expected: {}, Got: {}",
            expected.annual_total, result.summary.annual_total
        ));
    }
    if (result.summary.monthly_average - expected.monthly_average).abs() > 0.01 {
        errors.push(format!(
            "Monthly average mismatch. Expected: {}, Got: {}",
            expected.monthly_average, result.summary.monthly_average
        ));
    }
    let peak_months: Vec<u8> = result.summary.peak_months.iter().map(|m| m.get()).collect();
    if peak_months != expected.peak_months {
        errors.push(format!(
            "Peak months mismatch. Expected: {:?}, Got: {:?}",
            expected.peak_months, peak_months
        ));
    }
    if result.summary.peak_total != expected.peak_total {
        errors.push(format!(
            "Peak total mismatch. Expected: {}, Got: {}",
            expected.peak_total, result.summary.peak_total
        ));
    }
    if result.asc_advisory != expected.asc_advisory {
        errors.push(format!(
            "Advisory mismatch. Expected: {}, Got: {}",
            expected.asc_advisory, result.asc_advisory
        ));
    }

    errors
}

#[test]
fn test_all_golden_cases_pass() {
    let cases = load_cases();
    assert!(!cases.is_empty(), "No golden cases found");

    let failures: Vec<String> = cases
        .iter()
        .filter_map(|case| {
            let errors = validate_case(case);
            (!errors.is_empty()).then(|| {
                format!(
                    "{} ({}):\n  - {}",
                    case.case_id,
                    case.description,
                    errors.join("\n  - ")
                )
            })
        })
        .collect();

    assert!(
        failures.is_empty(),
        "{} of {} golden cases failed:\n{}",
        failures.len(),
        cases.len(),
        failures.join("\n")
    );
}

#[test]
fn test_case_ids_are_unique() {
    let cases = load_cases();
    let mut ids: Vec<&str> = cases.iter().map(|c| c.case_id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), cases.len());
}

#[test]
fn test_fixture_invariants_hold() {
    for case in load_cases() {
        let expected = &case.expected;
        for m in 0..12 {
            assert_eq!(
                expected.monthly_totals[m],
                expected.breakdown.visits[m] + expected.breakdown.medications[m],
                "{} month {}",
                case.case_id,
                m + 1
            );
        }
        assert_eq!(
            expected.annual_total,
            expected.monthly_totals.iter().sum::<u64>(),
            "{}",
            case.case_id
        );
    }
}

#[test]
fn test_fixtures_cover_every_advisory_level() {
    let cases = load_cases();
    for level in [
        AscAdvisoryLevel::None,
        AscAdvisoryLevel::Notice,
        AscAdvisoryLevel::Advisory,
        AscAdvisoryLevel::StrongAdvisory,
    ] {
        assert!(
            cases.iter().any(|c| c.expected.asc_advisory == level),
            "no golden case expects {}",
            level
        );
    }
}
