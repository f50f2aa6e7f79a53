use chrono::Datelike;
use clap::{Parser, Subcommand};
use fee_core::config::GridView;
use fee_core::schedule::visit_months;
use fee_core::tables::{default_tables, RateTables};
use fee_core::*;
use std::path::{Path, PathBuf};

const MONTH_NAMES: [&str; MONTHS] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const DISCLAIMER: &str = "Estimate for reference only; actual charges follow the hospital \
     authority's billing. The annual spending cap requires an application and approval.";

const CAP_CYCLE: &str = "The cap runs per calendar year (1 January to 31 December) \
     and applies only after an application is approved.";

#[derive(Parser)]
#[command(name = "feecast")]
#[command(about = "Public healthcare annual charge estimator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override roster file location
    #[arg(long, global = true)]
    roster: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Project the next 12 months of charges (default)
    Estimate {
        /// Read specialties from this JSON file instead of the roster
        #[arg(long)]
        input: Option<PathBuf>,

        /// Show visit and medication columns for every month
        #[arg(long)]
        itemized: bool,

        /// Print the result as JSON
        #[arg(long, conflicts_with = "itemized")]
        json: bool,

        /// Also write the monthly breakdown to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// First month shown in the grid (display only)
        #[arg(long)]
        start_month: Option<MonthNumber>,
    },

    /// Add a specialty to the roster
    Add {
        /// Specialty name, e.g. "Cardiology"
        #[arg(long, default_value = "")]
        label: String,

        /// Service type (sopc, gopc)
        #[arg(long, default_value = "sopc")]
        service: ServiceType,

        /// Follow-up interval in months (1, 2, 3, 4, 6)
        #[arg(long, default_value = "3")]
        frequency: FollowupFrequency,

        /// Month of the next follow-up (1-12)
        #[arg(long, default_value = "1")]
        next_month: MonthNumber,

        /// Medication tier (none, low, medium, high)
        #[arg(long, default_value = "none")]
        tier: MedicationTier,

        /// Explicit correlation id (generated if omitted)
        #[arg(long)]
        id: Option<String>,
    },

    /// Remove a specialty from the roster
    Remove {
        /// Id printed by `add` or `list`
        #[arg(long)]
        id: String,
    },

    /// List the specialties in the roster
    List,

    /// Show the fixed fee schedule, medication profiles and cap
    Tables,
}

fn main() -> Result<()> {
    fee_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let roster_path = cli
        .roster
        .unwrap_or_else(|| config.data.roster_path.clone());

    match cli.command {
        Some(Commands::Estimate {
            input,
            itemized,
            json,
            csv,
            start_month,
        }) => cmd_estimate(
            &roster_path,
            input,
            itemized,
            json,
            csv,
            start_month,
            &config,
        ),
        Some(Commands::Add {
            label,
            service,
            frequency,
            next_month,
            tier,
            id,
        }) => {
            let mut entry =
                SpecialtyEntry::new(service, frequency, next_month, tier).with_label(label);
            entry.id = id;
            cmd_add(&roster_path, entry)
        }
        Some(Commands::Remove { id }) => cmd_remove(&roster_path, &id),
        Some(Commands::List) => cmd_list(&roster_path),
        Some(Commands::Tables) => {
            display_tables(default_tables());
            Ok(())
        }
        None => cmd_estimate(&roster_path, None, false, false, None, None, &config),
    }
}

fn cmd_estimate(
    roster_path: &Path,
    input: Option<PathBuf>,
    itemized: bool,
    json: bool,
    csv: Option<PathBuf>,
    start_month: Option<MonthNumber>,
    config: &Config,
) -> Result<()> {
    let roster = match input {
        Some(path) => Roster::parse(&std::fs::read_to_string(&path)?)?,
        None => Roster::load(roster_path)?,
    };

    tracing::info!("Estimating charges for {} specialties", roster.entries().len());

    let tables = default_tables();
    let result = calculate_with(roster.entries(), tables);

    if let Some(ref path) = csv {
        fee_core::export::write_breakdown_csv(&result, path)?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if roster.entries().is_empty() {
        println!("No specialties entered yet. Add one with `feecast add`.");
        return Ok(());
    }

    let view = if itemized {
        GridView::Itemized
    } else {
        config.display.view
    };
    let start = start_month.unwrap_or_else(|| {
        if config.display.rotate_to_current_month {
            current_month()
        } else {
            MonthNumber::JANUARY
        }
    });

    display_grid(&result, view, start);
    display_summary(&result);
    display_advisory(&advise(result.summary.annual_total, tables.asc_cap));

    if let Some(path) = csv {
        println!("  Breakdown written to {}", path.display());
    }
    println!();
    println!("  {}", DISCLAIMER);
    Ok(())
}

fn cmd_add(roster_path: &Path, entry: SpecialtyEntry) -> Result<()> {
    let id = Roster::update(roster_path, |roster| roster.add(entry))?;
    println!("✓ Added specialty {}", id);
    Ok(())
}

fn cmd_remove(roster_path: &Path, id: &str) -> Result<()> {
    let removed = Roster::update(roster_path, |roster| Ok(roster.remove(id)))?;
    match removed {
        Some(entry) => {
            println!("✓ Removed specialty {} {}", id, entry.specialty_label);
            Ok(())
        }
        None => Err(Error::Roster(format!("No specialty with id '{}'", id))),
    }
}

fn cmd_list(roster_path: &Path) -> Result<()> {
    let roster = Roster::load(roster_path)?;
    if roster.entries().is_empty() {
        println!("No specialties entered yet.");
        return Ok(());
    }

    for entry in roster.entries() {
        let visits: Vec<&str> = visit_months(&generate_schedule(
            entry.next_followup_month,
            entry.followup_frequency_months,
        ))
        .iter()
        .map(|m| MONTH_NAMES[m.index()])
        .collect();
        println!(
            "{}  {:<20} {}  every {} month(s), visits {}  medication: {}",
            entry.id.as_deref().unwrap_or("-"),
            entry.specialty_label,
            entry.service_type,
            entry.followup_frequency_months,
            visits.join(" "),
            entry.medication_tier,
        );
    }
    Ok(())
}

/// Calendar month today, used only to rotate the grid
fn current_month() -> MonthNumber {
    MonthNumber::new(chrono::Local::now().month() as u8).unwrap_or(MonthNumber::JANUARY)
}

/// Twelve months in display order beginning at `start`
fn display_order(start: MonthNumber) -> Vec<MonthNumber> {
    (0..MONTHS)
        .filter_map(|offset| MonthNumber::from_index((start.index() + offset) % MONTHS))
        .collect()
}

fn format_amount(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("HK${}", grouped)
}

fn display_grid(result: &CalculationResult, view: GridView, start: MonthNumber) {
    let peaks = &result.summary.peak_months;

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  MONTHLY DISTRIBUTION");
    println!("╰─────────────────────────────────────────╯");

    match view {
        GridView::Compact => {
            for month in display_order(start) {
                let m = month.index();
                let marker = if peaks.contains(&month) { " ▲ peak" } else { "" };
                println!(
                    "  {}  {:>10}   (visits {} + medication {}){}",
                    MONTH_NAMES[m],
                    format_amount(result.monthly_totals[m]),
                    result.breakdown.visits[m],
                    result.breakdown.medications[m],
                    marker
                );
            }
        }
        GridView::Itemized => {
            println!(
                "  {:<5} {:>10} {:>12} {:>10}",
                "Month", "Visits", "Medication", "Total"
            );
            for month in display_order(start) {
                let m = month.index();
                let marker = if peaks.contains(&month) { " ▲" } else { "" };
                println!(
                    "  {:<5} {:>10} {:>12} {:>10}{}",
                    MONTH_NAMES[m],
                    format_amount(result.breakdown.visits[m]),
                    format_amount(result.breakdown.medications[m]),
                    format_amount(result.monthly_totals[m]),
                    marker
                );
            }
        }
    }
}

fn display_summary(result: &CalculationResult) {
    let summary = &result.summary;
    let peak_names: Vec<&str> = summary
        .peak_months
        .iter()
        .map(|m| MONTH_NAMES[m.index()])
        .collect();

    println!();
    println!("  Annual total:     {}", format_amount(summary.annual_total));
    println!("  Monthly average:  HK${:.2}", summary.monthly_average);
    println!(
        "  Peak month(s):    {} ({})",
        peak_names.join(", "),
        format_amount(summary.peak_total)
    );
}

fn display_advisory(advisory: &AscAdvisory) {
    if !advisory.should_display {
        return;
    }

    println!();
    println!("  ⚠ Annual spending cap: {}", advisory.level.title());
    println!("    Projected spend is {:.0}% of the cap.", advisory.ratio * 100.0);
    if let Some(message) = advisory.level.message() {
        println!("    {}", message);
    }
    println!("    {}", CAP_CYCLE);
}

fn display_tables(tables: &RateTables) {
    println!("Fee schedule");
    for service_type in ServiceType::ALL {
        let fees = tables.fees_for(service_type);
        println!(
            "  {} ({}): {} per visit, {} per medication unit (4 weeks)",
            service_type.label(),
            service_type,
            format_amount(fees.visit),
            format_amount(fees.medication_unit)
        );
    }

    println!("\nMedication units per month");
    for tier in MedicationTier::ALL {
        let units: Vec<String> = tables.units_for(tier).iter().map(u64::to_string).collect();
        println!("  {:<7} {}", tier.as_str(), units.join(" "));
    }

    println!(
        "\nAnnual spending cap: {} (application and approval required)",
        format_amount(tables.asc_cap.get())
    );
    println!("Advisory bands:");
    for band in fee_core::summary::ADVISORY_BANDS {
        println!("  ≥ {:>3.0}%  {}", band.min_ratio() * 100.0, band.level.title());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_order_rotates_without_changing_months() {
        let order = display_order(MonthNumber::new(10).unwrap());
        let numbers: Vec<u8> = order.iter().map(|m| m.get()).collect();
        assert_eq!(numbers, vec![10, 11, 12, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_display_order_from_january_is_canonical() {
        let numbers: Vec<u8> = display_order(MonthNumber::JANUARY)
            .iter()
            .map(|m| m.get())
            .collect();
        assert_eq!(numbers, (1..=12).collect::<Vec<u8>>());
    }

    #[test]
    fn test_format_amount_groups_thousands() {
        assert_eq!(format_amount(0), "HK$0");
        assert_eq!(format_amount(250), "HK$250");
        assert_eq!(format_amount(10_000), "HK$10,000");
        assert_eq!(format_amount(1_234_567), "HK$1,234,567");
    }
}
