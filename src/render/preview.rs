// src/render/preview.rs
//! Interactive preview renderer: plain text, pretty month names

use chrono::NaiveDate;

use super::{section_visibility, PRESENT};
use crate::types::resume::ResumeDocument;

/// Format a year-month value ("2023-05") as "May 2023". Empty values
/// stay empty and anything unparseable passes through raw.
pub fn format_date(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    match NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d") {
        Ok(date) => date.format("%b %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// End dates fall back to "Present" when empty.
pub fn format_end_date(raw: &str) -> String {
    if raw.is_empty() {
        PRESENT.to_string()
    } else {
        format_date(raw)
    }
}

fn heading(out: &mut String, title: &str) {
    out.push('\n');
    out.push_str(title);
    out.push('\n');
    out.push_str(&"-".repeat(title.len()));
    out.push('\n');
}

/// Render the live text preview of the document.
pub fn render_preview(doc: &ResumeDocument) -> String {
    let vis = section_visibility(doc);
    let mut out = String::new();

    let name = if doc.personal_info.name.is_empty() {
        "Your Name"
    } else {
        &doc.personal_info.name
    };
    let title = if doc.job_title.is_empty() {
        "Professional Title"
    } else {
        &doc.job_title
    };
    out.push_str(name);
    out.push('\n');
    out.push_str(title);
    out.push('\n');

    let contact: Vec<&str> = [
        doc.personal_info.email.as_str(),
        doc.personal_info.phone.as_str(),
        doc.personal_info.location.as_str(),
        doc.personal_info.linkedin.as_str(),
        doc.personal_info.website.as_str(),
        doc.personal_info.github.as_str(),
    ]
    .into_iter()
    .filter(|value| !value.is_empty())
    .collect();
    if !contact.is_empty() {
        out.push_str(&contact.join(" | "));
        out.push('\n');
    }

    if vis.summary {
        heading(&mut out, "Professional Summary");
        out.push_str(&doc.summary);
        out.push('\n');
    }

    if vis.experience {
        heading(&mut out, "Work Experience");
        for entry in doc.experience.iter().filter(|e| !e.company.is_empty()) {
            out.push_str(&entry.position);
            out.push('\n');
            out.push_str(&entry.company);
            out.push('\n');
            out.push_str(&format!(
                "{} - {}\n",
                format_date(&entry.start_date),
                format_end_date(&entry.end_date)
            ));
            if !entry.description.is_empty() {
                out.push_str(&entry.description);
                out.push('\n');
            }
            out.push('\n');
        }
    }

    if vis.education {
        heading(&mut out, "Education");
        for entry in doc.education.iter().filter(|e| !e.institution.is_empty()) {
            out.push_str(&entry.degree);
            if !entry.field.is_empty() {
                out.push_str(&format!(" in {}", entry.field));
            }
            out.push('\n');
            out.push_str(&entry.institution);
            out.push('\n');
            out.push_str(&format!(
                "{} - {}\n",
                format_date(&entry.start_date),
                format_end_date(&entry.end_date)
            ));
            if !entry.gpa.is_empty() {
                out.push_str(&format!("GPA: {}\n", entry.gpa));
            }
            out.push('\n');
        }
    }

    if vis.skills {
        heading(&mut out, "Skills");
        let badges: Vec<String> = doc.skills.iter().map(|s| format!("[{s}]")).collect();
        out.push_str(&badges.join(" "));
        out.push('\n');
    }

    if vis.achievements {
        heading(&mut out, "Achievements & Awards");
        for achievement in &doc.achievements {
            out.push_str(&format!("• {achievement}\n"));
        }
    }

    for section in &doc.custom_sections {
        heading(&mut out, &section.title);
        out.push_str(&section.content);
        out.push('\n');
    }

    out
}
