use chargeval_core::{Severity, ValidationReport};
use colored::Colorize;
use serde_json::json;

pub fn print_report(report: &ValidationReport, format: &str) {
    match format {
        "json" => print_json_report(report),
        _ => print_text_report(report),
    }
}

fn print_text_report(report: &ValidationReport) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  VALIDATION REPORT".bold());
    println!("{}", "═".repeat(60));

    if report.passed() {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Validation PASSED".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        );
    }
    if report.strict {
        println!("  (strict mode: warnings fail the run)");
    }

    let errors: Vec<_> = report.issues_with_severity(Severity::Error).collect();
    if !errors.is_empty() {
        println!("\n{}", "Errors:".red().bold());
        for (i, issue) in errors.iter().enumerate() {
            println!("  {}. {}", i + 1, issue.to_string().red());
        }
    }

    let warnings: Vec<_> = report.issues_with_severity(Severity::Warning).collect();
    if !warnings.is_empty() {
        println!("\n{}", "Warnings:".yellow().bold());
        for (i, issue) in warnings.iter().enumerate() {
            println!("  {}. {}", i + 1, issue.to_string().yellow());
        }
    }

    let infos: Vec<_> = report.issues_with_severity(Severity::Info).collect();
    if !infos.is_empty() {
        println!("\n{}", "Info:".bold());
        for issue in infos {
            println!("  - {}", issue.message);
        }
    }

    println!("\n{}", "Summary:".bold());
    println!("  Rows scanned:   {}", report.rows_scanned);
    println!("  Total errors:   {}", report.error_count());
    println!("  Total warnings: {}", report.warning_count());
    println!("{}", "═".repeat(60));
}

fn print_json_report(report: &ValidationReport) {
    let output = json!({
        "passed": report.passed(),
        "strict": report.strict,
        "issues": report.issues,
        "summary": {
            "rows_scanned": report.rows_scanned,
            "errors": report.error_count(),
            "warnings": report.warning_count(),
            "infos": report.info_count(),
        }
    });

    // json! output over serializable values cannot fail.
    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}
