//! Summary tables for the dependency scanner and the site downloader

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::deps::{ModuleKind, ScanReport};
use crate::web::DownloadReport;

fn kind_color(kind: ModuleKind) -> Color {
    match kind {
        ModuleKind::Builtin | ModuleKind::Stdlib => Color::White,
        ModuleKind::Local => Color::Cyan,
        ModuleKind::ThirdParty => Color::Yellow,
    }
}

fn print_indented(table: &Table) {
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}

/// Every import of a scanned file with its classification
pub fn dependency_table(report: &ScanReport) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Module").add_attribute(Attribute::Bold),
        Cell::new("Kind").add_attribute(Attribute::Bold),
        Cell::new("Origin").add_attribute(Attribute::Bold),
    ]);

    for module in &report.modules {
        table.add_row(vec![
            Cell::new(&module.name),
            Cell::new(module.kind.label()).fg(kind_color(module.kind)),
            Cell::new(module.origin.as_deref().unwrap_or("-")),
        ]);
    }
    table
}

pub fn display_dependency_table(report: &ScanReport) {
    println!();
    println!(
        "    {} {}",
        style("📋").cyan(),
        style(format!("IMPORTS IN {}", report.path.display())).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    print_indented(&dependency_table(report));
    println!();
}

/// Saved/failed counts plus the list of failures
pub fn display_download_summary(report: &DownloadReport) {
    println!();
    println!(
        "    {} {}",
        style("📋").cyan(),
        style("DOWNLOAD SUMMARY").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Metric").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("📄 Page"),
        Cell::new(report.html_path.display()),
    ]);
    table.add_row(vec![
        Cell::new("✅ Assets saved"),
        Cell::new(report.saved.len()).fg(Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("⚠️  Assets failed"),
        Cell::new(report.failed.len()).fg(if report.failed.is_empty() {
            Color::White
        } else {
            Color::Red
        }),
    ]);
    let bytes: usize = report.saved.iter().map(|a| a.bytes).sum();
    table.add_row(vec![
        Cell::new("💾 Downloaded"),
        Cell::new(format!("{:.1} KB", bytes as f64 / 1024.0)),
    ]);
    print_indented(&table);

    if !report.failed.is_empty() {
        println!();
        println!(
            "      {} {}:",
            style("Skipped assets").yellow(),
            style(format!("({})", report.failed.len())).dim()
        );
        for failed in &report.failed {
            println!(
                "        {} {} {}",
                style("•").dim(),
                failed.url,
                style(&failed.reason).dim()
            );
        }
    }
}
