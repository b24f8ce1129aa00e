//! Subcommand implementations.

use std::io::{self, Write};

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, Table};
use moyers_core::report::reference_table_title;
use moyers_core::{render_text, AnalysisReport, ArchType, ABOUT_TEXT};
use tracing::info;

use crate::cli::OutputArgs;
use crate::measurements::{Collector, MeasurementFlags};

/// Collect measurements, analyze, and print the result to stdout.
pub fn run_analysis(arch: ArchType, flags: &MeasurementFlags, output: OutputArgs) -> anyhow::Result<()> {
    info!(%arch, json = output.json, "starting analysis");

    let stdin = io::stdin();
    let mut collector = Collector::new(stdin.lock(), io::stderr(), !output.no_prompt);
    let result = collector.analyze(arch, flags)?;

    let mut stdout = io::stdout().lock();
    if output.json {
        let report = AnalysisReport::new(result);
        writeln!(stdout, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        writeln!(stdout, "{}", arch.display_name())?;
        writeln!(stdout)?;
        write!(stdout, "{}", render_text(&result))?;
    }
    Ok(())
}

/// Print an arch's reference prediction table.
pub fn run_table(arch: ArchType) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", reference_table_title(arch))?;
    writeln!(stdout, "{}", reference_table(arch))?;
    Ok(())
}

pub fn run_about() -> anyhow::Result<()> {
    write!(io::stdout().lock(), "{ABOUT_TEXT}")?;
    Ok(())
}

fn reference_table(arch: ArchType) -> Table {
    let sum_header = match arch {
        ArchType::Lower => "Sum of Incisors (mm)",
        ArchType::Upper => "Sum of Mand. Incisors (mm)",
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_header(vec![sum_header, "Canine (mm)", "Premolars (mm)"]);

    for row in arch.reference_table() {
        table.add_row(vec![
            Cell::new(format!("{:.1}", row.sum_of_incisors_mm)).set_alignment(CellAlignment::Center),
            Cell::new(format!("{:.1}", row.canine_mm)).set_alignment(CellAlignment::Center),
            Cell::new(format!("{:.1}", row.premolars_mm)).set_alignment(CellAlignment::Center),
        ]);
    }
    table
}
