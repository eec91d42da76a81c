//! Console output for the generator.
//!
//! Separate from the scanners so the library can be used without printing.

use std::io::{self, Write};

use colored::Colorize;

use super::run::RunSummary;
use crate::config::CONFIG_FILE_NAME;
use crate::parsers::Diagnostic;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Print the run summary to stdout, preceded by diagnostics when `verbose`.
pub fn print(summary: &RunSummary, verbose: bool) {
    print_to(summary, verbose, &mut io::stdout().lock());
}

/// Print the run summary to a custom writer.
pub fn print_to<W: Write>(summary: &RunSummary, verbose: bool, writer: &mut W) {
    if verbose {
        for diagnostic in &summary.diagnostics {
            print_diagnostic(diagnostic, writer);
        }
    }
    print_summary(summary, writer);
}

fn print_diagnostic<W: Write>(diagnostic: &Diagnostic, writer: &mut W) {
    let _ = match diagnostic {
        Diagnostic::StyleRowSkipped { line, key, reason } => writeln!(
            writer,
            "{} {} {}",
            "skip".dimmed(),
            key,
            format!("(line {}: {})", line, reason).dimmed()
        ),
        Diagnostic::LayerVisited { id } => {
            writeln!(writer, "{} {}", "layer".bold(), id)
        }
        Diagnostic::UnknownGeometry { layer, geometry } => writeln!(
            writer,
            "  {}: layer '{}' has unsupported geometry '{}'",
            "warning".bold().yellow(),
            layer,
            geometry
        ),
        Diagnostic::UnguessableTable { layer, table } => writeln!(
            writer,
            "  {}: no known table in query of layer '{}'\n    {}",
            "warning".bold().yellow(),
            layer,
            table.dimmed()
        ),
        Diagnostic::KeyFound {
            layer: _,
            key,
            geometry,
        } => {
            let geometry = geometry.map_or("unknown", |g| g.as_str());
            writeln!(writer, "  {} {} {}", "-->".blue(), key.cyan(), geometry)
        }
    };
}

fn print_summary<W: Write>(summary: &RunSummary, writer: &mut W) {
    if summary.config_from_file {
        let _ = writeln!(writer, "{}", format!("Using {}", CONFIG_FILE_NAME).dimmed());
    }
    let total = summary.style_tags + summary.layer_tags;
    let msg = format!(
        "Wrote {} tags ({} from style, {} from {} layers) to {}",
        total,
        summary.style_tags,
        summary.layer_tags,
        summary.layers_scanned,
        summary.output_file.display()
    );
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green());
}
