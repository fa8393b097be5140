use std::io::Write;

use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::report::ring;
use crate::report::view::{ReportView, ScoreTier};
use crate::toast::{ToastKind, ToastMessage};

/// Render a colored terminal report. `animate` redraws the score gauge in
/// place and should only be set when `out` is a terminal.
pub async fn render<W: Write>(
    out: &mut W,
    view: &ReportView<'_>,
    url: &str,
    collapse: bool,
    quiet: bool,
    animate: bool,
) -> Result<()> {
    let report = view.report;

    if quiet {
        writeln!(
            out,
            "Score: {}  Total: {}  Up to date: {}  Outdated: {}",
            paint_tier(format!("{:.0}", report.health_score), view.tier),
            report.total_packages,
            view.up_to_date_count.to_string().green(),
            report.outdated_count.to_string().red(),
        )?;
        return Ok(());
    }

    writeln!(
        out,
        "\n {} v{}",
        "deadrepo-doctor".bold(),
        env!("CARGO_PKG_VERSION")
    )?;
    writeln!(out, " Repository: {}\n", url)?;

    writeln!(out, " {}", "Health Score".bold())?;
    if animate {
        let tier = view.tier;
        ring::animate(out, view.ring_target, |s| paint_tier(s, tier).to_string()).await?;
    } else {
        writeln!(
            out,
            " {}",
            paint_tier(ring::gauge(view.ring_target, ring::GAUGE_WIDTH), view.tier)
        )?;
    }
    if report.partial_analysis {
        writeln!(out, " {} Partial analysis - large repository", "⚠".yellow())?;
    }
    writeln!(out)?;

    writeln!(out, " ┌────────────────────────────────────────────────────┐")?;
    writeln!(out, " │  {:<48} │", "SUMMARY".bold())?;
    writeln!(
        out,
        " │  {:<48} │",
        format!("Total packages : {:>6}", report.total_packages)
    )?;
    writeln!(
        out,
        " │  {:<48} │",
        format!("{}  Up to date   : {:>6}", "✓".green(), view.up_to_date_count)
    )?;
    writeln!(
        out,
        " │  {:<48} │",
        format!("{}  Outdated     : {:>6}", "✗".red(), report.outdated_count)
    )?;
    writeln!(out, " └────────────────────────────────────────────────────┘\n")?;

    if view.has_outdated_list {
        let rows = view.rows();
        writeln!(
            out,
            " {} Outdated Packages ({})\n",
            "[OUTDATED]".red().bold(),
            rows.len()
        )?;
        if !collapse {
            render_table(out, view)?;
            writeln!(out)?;
        }
    } else if view.all_clear {
        writeln!(out, " {} All Dependencies Up to Date!", "✓".green().bold())?;
        writeln!(out, " Your repository has no outdated packages.\n")?;
    }

    Ok(())
}

fn render_table<W: Write>(out: &mut W, view: &ReportView<'_>) -> Result<()> {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Package").add_attribute(Attribute::Bold),
            Cell::new("Current").add_attribute(Attribute::Bold),
            Cell::new("").add_attribute(Attribute::Bold),
            Cell::new("Latest").add_attribute(Attribute::Bold),
        ]);

    for row in view.rows() {
        table.add_row(vec![
            Cell::new(&row.package.name),
            Cell::new(&row.package.current_version).fg(Color::Red),
            Cell::new("→").set_alignment(CellAlignment::Center),
            Cell::new(&row.package.latest_version).fg(Color::Green),
        ]);
    }

    writeln!(out, "{}", table)?;
    Ok(())
}

/// Print live notifications, oldest first.
pub fn render_toasts(toasts: &[ToastMessage]) {
    for toast in toasts {
        let icon = match toast.kind {
            ToastKind::Success => "✓".green(),
            ToastKind::Error => "✗".red(),
            ToastKind::Warning => "⚠".yellow(),
            ToastKind::Info => "ℹ".cyan(),
        };
        eprintln!(" {} {}", icon, toast.message);
    }
}

fn paint_tier(text: String, tier: ScoreTier) -> ColoredString {
    match tier {
        ScoreTier::Good => text.green().bold(),
        ScoreTier::Warning => text.yellow().bold(),
        ScoreTier::Critical => text.red().bold(),
    }
}
