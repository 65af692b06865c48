//! Docbinder CLI - Word-to-binder assembly tool
//!
//! Usage: docbinder <COMMAND>
//!
//! Commands:
//!   run     Copy the referenced PDFs into a binder folder and write the index
//!   links   List the PDF links found in a document

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use docbinder::{Docx, RunConfig, RunEvent};

mod cli;
mod ui;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            document,
            source,
            dest,
            recursive,
            no_rename,
            no_cover,
            prefix,
            report,
        } => {
            let config = RunConfig::new(document, source, dest)
                .with_recursive(recursive)
                .with_rename(!no_rename)
                .with_cover_page(!no_cover)
                .with_prefix(prefix)
                .with_report_name(report);
            cmd_run(&config, cli.json, cli.verbose)
        }
        Commands::Links { document } => cmd_links(&document, cli.json),
    }
}

fn cmd_run(config: &RunConfig, json: bool, verbose: u8) -> Result<()> {
    if !json {
        println!("📎 Docbinder Run");
        println!("Document: {}", config.document.display());
        println!("Source: {}", config.source_dir.display());
        println!("Destination: {}", config.dest_dir.display());
        if config.recursive {
            println!("Mode: Recursive search");
        }
        if !config.rename_with_prefix {
            println!("Mode: Keep original filenames");
        }
        if !config.add_cover_page {
            println!("Mode: No cover pages");
        }
        println!();
    }

    // Ctrl+C requests a cooperative stop between entries.
    let cancel = Arc::new(AtomicBool::new(false));
    let cancel_handler = cancel.clone();
    ctrlc::set_handler(move || {
        cancel_handler.store(true, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl+C handler");

    let summary = docbinder::run(config, &cancel, |event| {
        if json {
            print_json_event(&event);
        } else {
            match event {
                RunEvent::Extracted { total } => {
                    println!("Found {total} PDF links in document");
                }
                RunEvent::Resolved { found, missing } => {
                    println!("Resolved {found} distinct files, {missing} missing");
                }
                RunEvent::Record {
                    index,
                    total,
                    target,
                    status,
                } => {
                    if verbose > 0 {
                        ui::print_record(index, total, &target, status);
                    }
                }
                RunEvent::ReportWritten { path } => {
                    println!("Index written to {}", path.display());
                }
            }
        }
    })?;

    if json {
        let output = serde_json::json!({
            "event": "summary",
            "rows": summary.rows,
            "distinct": summary.distinct,
            "found": summary.found,
            "missing": summary.missing,
            "failed": summary.failed.len(),
            "report": summary.report_path.display().to_string(),
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("\n📊 Run Results:");
        println!(
            "  {} Copied: {} files",
            ui::paint(ui::icons::SUCCESS, ui::colors::SUCCESS),
            summary.found
        );
        if summary.missing > 0 {
            println!(
                "  {} Missing: {} files",
                ui::paint(ui::icons::WARNING, ui::colors::WARNING),
                summary.missing
            );
        }
        if !summary.failed.is_empty() {
            println!(
                "  {} Failed: {} files",
                ui::paint(ui::icons::ERROR, ui::colors::ERROR),
                summary.failed.len()
            );
            for note in &summary.failed {
                println!(
                    "    {} {}: {}",
                    ui::paint(ui::icons::ARROW, ui::colors::DIM),
                    note.target,
                    note.message
                );
            }
        }
        println!(
            "  Report: {} rows ({} distinct targets)",
            summary.rows, summary.distinct
        );
        println!();
    }

    Ok(())
}

fn print_json_event(event: &RunEvent) {
    let value = match event {
        RunEvent::Extracted { total } => {
            serde_json::json!({ "event": "extracted", "total": total })
        }
        RunEvent::Resolved { found, missing } => {
            serde_json::json!({ "event": "resolved", "found": found, "missing": missing })
        }
        RunEvent::Record {
            index,
            total,
            target,
            status,
        } => serde_json::json!({
            "event": "record",
            "index": index,
            "total": total,
            "target": target,
            "status": status.label(),
        }),
        RunEvent::ReportWritten { path } => serde_json::json!({
            "event": "report",
            "path": path.display().to_string(),
        }),
    };
    println!("{value}");
}

fn cmd_links(document: &Path, json: bool) -> Result<()> {
    if !json {
        println!("🔍 Extracting links: {}", document.display());
    }

    let docx = Docx::open(document)?;
    let links: Vec<_> = docx.pdf_links().collect();

    if json {
        for link in &links {
            println!("{}", serde_json::to_string(link)?);
        }
    } else {
        println!("\nFound {} PDF links:\n", links.len());
        for link in &links {
            println!("┌─ {}", link.target);
            println!("│  Text: {}", link.text);
            println!("│  Occurrence: {}", link.sequence + 1);
            println!("└─");
        }
    }

    Ok(())
}
