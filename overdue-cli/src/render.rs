//! Turn a [`Report`] into a deliverable artifact (plain text, JSON or HTML).
//!
//! Layout only; no styling or pagination.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use overdue_core::Report;

use crate::config::OutputFormat;

pub const NO_RECORDS_MESSAGE: &str = "No records matched the chosen criteria.";

const HEADERS: [&str; 5] = ["Client Code", "Name", "Contact", "Balance", "Date of Last Payment"];

pub fn render(report: &Report, format: OutputFormat, generated: NaiveDate) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report, generated)),
        OutputFormat::Json => render_json(report),
        OutputFormat::Html => Ok(render_html(report, generated)),
    }
}

/// File name suggested for a saved report, e.g. `30_37_report.html`.
pub fn suggested_file_name(report: &Report, format: OutputFormat) -> String {
    format!("{}_report.{}", report.report_type.selector(), format.extension())
}

fn table_rows(report: &Report) -> Vec<[String; 5]> {
    report
        .records
        .iter()
        .map(|r| {
            [
                r.code.clone(),
                r.name.clone(),
                r.contact.clone(),
                r.balance_display.clone(),
                r.last_payment_date.format("%Y-%m-%d").to_string(),
            ]
        })
        .collect()
}

pub fn render_text(report: &Report, generated: NaiveDate) -> String {
    let mut out = String::new();
    out.push_str(&report.label);
    out.push('\n');
    out.push_str(&format!(
        "Generated: {} | Date range: {}\n\n",
        generated.format("%Y-%m-%d"),
        report.range_description
    ));

    if report.no_records {
        out.push_str(NO_RECORDS_MESSAGE);
        out.push('\n');
        return out;
    }

    let rows = table_rows(report);
    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }
    let total_label = "Total outstanding";
    let lead = widths[0] + widths[1] + widths[2] + 6;
    let lead = lead.max(total_label.chars().count());

    let line = |cells: [&str; 5]| -> String {
        let mut s = String::new();
        for (i, (cell, w)) in cells.iter().zip(widths).enumerate() {
            if i > 0 {
                s.push_str(" | ");
            }
            // Balances line up on the right.
            if i == 3 {
                s.push_str(&format!("{cell:>w$}"));
            } else {
                s.push_str(&format!("{cell:<w$}"));
            }
        }
        s.trim_end().to_string()
    };

    out.push_str(&line(HEADERS));
    out.push('\n');
    out.push_str(&"-".repeat(widths.iter().sum::<usize>() + 3 * (widths.len() - 1)));
    out.push('\n');
    for row in &rows {
        out.push_str(&line(row.each_ref().map(String::as_str)));
        out.push('\n');
    }
    out.push_str(&format!(
        "{total_label:<lead$} | {:>w$}\n",
        report.total_display,
        w = widths[3]
    ));
    out
}

pub fn render_json(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).context("serialize report")
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            c => out.push(c),
        }
    }
    out
}

pub fn render_html(report: &Report, generated: NaiveDate) -> String {
    let h = escape_html;
    let mut html = String::from(
        "<!doctype html><html lang=\"en\" dir=\"ltr\"><head><meta charset=\"utf-8\">",
    );
    html.push_str(&format!("<title>{}</title></head><body>", h(&report.label)));
    html.push_str(&format!(
        "<header><div class=\"brand\">{}</div><div class=\"sub\">Generated: {} | Date range: {}</div></header>",
        h(&report.label),
        generated.format("%Y-%m-%d"),
        h(&report.range_description)
    ));

    if report.no_records {
        html.push_str(&format!("<p>{}</p>", h(NO_RECORDS_MESSAGE)));
    } else {
        html.push_str("<table><thead><tr>");
        for header in HEADERS {
            html.push_str(&format!("<th>{header}</th>"));
        }
        html.push_str("</tr></thead><tbody>");
        for row in table_rows(report) {
            html.push_str("<tr>");
            for cell in &row {
                html.push_str(&format!("<td>{}</td>", h(cell)));
            }
            html.push_str("</tr>");
        }
        html.push_str(&format!(
            "<tr class=\"totals\"><td colspan=\"3\">Total outstanding</td><td>{}</td><td></td></tr>",
            h(&report.total_display)
        ));
        html.push_str("</tbody></table>");
    }

    html.push_str("</body></html>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use overdue_core::{build_report, select_policy, RawRow};

    fn day(d: &str) -> NaiveDate {
        d.parse().unwrap()
    }

    fn sample() -> Report {
        let policy = select_policy("overdue", day("2024-06-15"));
        build_report(
            vec![
                RawRow::new("C-1", "Dupont & Fils", "", "1 234,5", "2024-03-14"),
                RawRow::new("C-22", "<Martin>", "m@x.fr", "20", "01/02/2024"),
            ],
            &policy,
        )
    }

    fn empty() -> Report {
        build_report(Vec::new(), &select_policy("30_37", day("2024-06-15")))
    }

    #[test]
    fn test_text_table() {
        let text = render_text(&sample(), day("2024-06-15"));
        assert!(text.starts_with("Over 30 days overdue (overdue)\n"));
        assert!(text.contains("Date range: 1900-01-01 → 2024-05-16"));
        assert!(text.contains("Client Code"));
        assert!(text.contains("Dupont & Fils"));
        assert!(text.contains("inconnu"));
        assert!(text.contains("2024-01-02"));
        let last = text.lines().last().unwrap();
        assert!(last.starts_with("Total outstanding"));
        assert!(last.ends_with("1 254,50"));
    }

    #[test]
    fn test_text_empty() {
        let text = render_text(&empty(), day("2024-06-15"));
        assert!(text.contains(NO_RECORDS_MESSAGE));
        assert!(!text.contains("Client Code"));
    }

    #[test]
    fn test_html_escapes_cells() {
        let html = render_html(&sample(), day("2024-06-15"));
        assert!(html.contains("Dupont &amp; Fils"));
        assert!(html.contains("&lt;Martin&gt;"));
        assert!(html.contains("<td colspan=\"3\">Total outstanding</td><td>1 254,50</td>"));
        assert!(!html.contains(NO_RECORDS_MESSAGE));
    }

    #[test]
    fn test_html_empty_fallback() {
        let html = render_html(&empty(), day("2024-06-15"));
        assert!(html.contains("<p>No records matched the chosen criteria.</p>"));
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn test_json_round_trip_fields() {
        let json = render_json(&sample()).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["label"], "Over 30 days overdue (overdue)");
        assert_eq!(v["records"].as_array().unwrap().len(), 2);
        assert_eq!(v["no_records"], false);
    }

    #[test]
    fn test_suggested_file_name() {
        assert_eq!(suggested_file_name(&empty(), OutputFormat::Html), "30_37_report.html");
        assert_eq!(suggested_file_name(&sample(), OutputFormat::Json), "overdue_report.json");
    }
}
