//! Index spreadsheet
//!
//! One row per link occurrence, duplicates included, in document order.
//! Found rows carry a clickable `file://` reference to the copied file;
//! Missing and Failed rows carry a plain marker and no number. An empty
//! run still produces a header-only sheet.

use std::path::Path;

use chrono::Local;
use rust_xlsxwriter::{Color, DocProperties, Format, Url, Workbook};

use crate::assemble::Assignments;
use crate::error::BinderResult;
use crate::models::{LinkRecord, LinkStatus};

pub const HEADERS: [&str; 4] = ["Reference", "Number", "Status", "Original Text"];

const SHEET_NAME: &str = "All Links";

// Status fills from the original report styling.
const FILL_FOUND_ROW: u32 = 0xE6FFE6;
const FILL_FOUND_STATUS: u32 = 0x92D050;
const FILL_MISSING_STATUS: u32 = 0xFF6B6B;
const FILL_FAILED_STATUS: u32 = 0xFFC000;

/// Write the report for `records` to `path`.
pub fn write(
    records: &[LinkRecord],
    assignments: &Assignments,
    path: &Path,
) -> BinderResult<()> {
    let buffer = build(records, assignments)?;
    crate::fs::atomic_write(path, &buffer)
}

/// Build the spreadsheet in memory.
pub fn build(records: &[LinkRecord], assignments: &Assignments) -> BinderResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    workbook.set_properties(
        &DocProperties::new()
            .set_author("docbinder")
            .set_comment(format!(
                "Generated {}",
                Local::now().format("%Y-%m-%d %H:%M:%S")
            )),
    );

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let header = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xD9D9D9));
    for (col, title) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &header)?;
    }

    let found_row = Format::new().set_background_color(Color::RGB(FILL_FOUND_ROW));
    let found_status = Format::new().set_background_color(Color::RGB(FILL_FOUND_STATUS));
    let missing_status = Format::new().set_background_color(Color::RGB(FILL_MISSING_STATUS));
    let failed_status = Format::new().set_background_color(Color::RGB(FILL_FAILED_STATUS));

    // Column width bookkeeping, seeded with the headers.
    let mut widths: [usize; 4] = [0; 4];
    for (col, title) in HEADERS.iter().enumerate() {
        widths[col] = title.len();
    }

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        let entry = assignments.get(&record.target_key());
        let status = entry.map(|e| e.status).unwrap_or(LinkStatus::Missing);

        match (status, entry.and_then(|e| e.destination.as_ref())) {
            (LinkStatus::Found, Some(destination)) => {
                let text = destination
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or(&record.target)
                    .to_string();
                widths[0] = widths[0].max(text.len());
                worksheet.write_url(row, 0, Url::new(file_url(destination)).set_text(text))?;
            }
            _ => {
                widths[0] = widths[0].max(status.label().len());
                worksheet.write_string(row, 0, status.label())?;
            }
        }

        if status == LinkStatus::Found {
            if let Some(number) = entry.and_then(|e| e.number) {
                worksheet.write_number_with_format(row, 1, number as f64, &found_row)?;
            }
        }

        let status_format = match status {
            LinkStatus::Found => &found_status,
            LinkStatus::Missing => &missing_status,
            LinkStatus::Failed => &failed_status,
        };
        worksheet.write_string_with_format(row, 2, status.label(), status_format)?;
        widths[2] = widths[2].max(status.label().len());

        let text_format = match status {
            LinkStatus::Found => Some(&found_row),
            _ => None,
        };
        match text_format {
            Some(format) => {
                worksheet.write_string_with_format(row, 3, record.text.as_str(), format)?;
            }
            None => {
                worksheet.write_string(row, 3, record.text.as_str())?;
            }
        }
        widths[3] = widths[3].max(record.text.chars().count());
    }

    for (col, width) in widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, (*width as f64 + 2.0) * 1.2)?;
    }

    let buffer = workbook.save_to_buffer()?;
    Ok(buffer)
}

/// `file://` URL for an absolute destination path.
fn file_url(path: &Path) -> String {
    let normalized = path.display().to_string().replace('\\', "/");
    if normalized.starts_with('/') {
        format!("file://{normalized}")
    } else {
        format!("file:///{normalized}")
    }
}
