// src/render/export.rs
//! Export renderer: fixed-layout Typst document, raw date strings

use super::{section_visibility, PRESENT};
use crate::types::resume::ResumeDocument;

/// Escape characters Typst treats as markup so user text renders
/// literally.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' | '#' | '$' | '*' | '_' | '[' | ']' | '<' | '>' | '@' | '`' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}

fn date_range(start: &str, end: &str) -> String {
    let end = if end.is_empty() { PRESENT } else { end };
    format!("{start} - {end}")
}

/// Render the export document. Sections with no qualifying content are
/// omitted entirely; entry order is input order, never date-sorted.
pub fn to_typst(doc: &ResumeDocument) -> String {
    let vis = section_visibility(doc);
    let mut out = String::new();

    out.push_str("#set page(paper: \"a4\", margin: (x: 1.6cm, y: 1.4cm))\n");
    out.push_str("#set text(size: 10pt)\n");
    out.push_str("#show heading.where(level: 1): set text(size: 12pt)\n\n");

    // Name/title header
    let name = if doc.personal_info.name.is_empty() {
        "Your Name".to_string()
    } else {
        escape(&doc.personal_info.name)
    };
    let title = if doc.job_title.is_empty() {
        "Professional Title".to_string()
    } else {
        escape(&doc.job_title)
    };
    out.push_str("#align(center)[\n");
    out.push_str(&format!(
        "  #text(size: 17pt, weight: \"bold\")[{name}]\n"
    ));
    out.push_str("  #linebreak()\n");
    out.push_str(&format!(
        "  #text(size: 12pt, fill: rgb(\"#555555\"))[{title}]\n"
    ));
    out.push_str("]\n");

    let contact: Vec<String> = [
        &doc.personal_info.email,
        &doc.personal_info.phone,
        &doc.personal_info.location,
        &doc.personal_info.linkedin,
        &doc.personal_info.website,
        &doc.personal_info.github,
    ]
    .into_iter()
    .filter(|value| !value.is_empty())
    .map(|value| escape(value))
    .collect();
    if !contact.is_empty() {
        out.push_str(&format!("#align(center)[{}]\n", contact.join(" | ")));
    }
    out.push('\n');

    if vis.summary {
        out.push_str("= Professional Summary\n");
        out.push_str(&escape(&doc.summary));
        out.push_str("\n\n");
    }

    if vis.experience {
        out.push_str("= Work Experience\n");
        for entry in doc.experience.iter().filter(|e| !e.company.is_empty()) {
            out.push_str(&format!(
                "*{}* #h(1fr) {} \\\n",
                escape(&entry.position),
                date_range(&entry.start_date, &entry.end_date)
            ));
            out.push_str(&format!("_{}_ \\\n", escape(&entry.company)));
            if !entry.description.is_empty() {
                out.push_str(&escape(&entry.description));
                out.push('\n');
            }
            out.push('\n');
        }
    }

    if vis.education {
        out.push_str("= Education\n");
        for entry in doc.education.iter().filter(|e| !e.institution.is_empty()) {
            let mut degree = escape(&entry.degree);
            if !entry.field.is_empty() {
                degree.push_str(&format!(" in {}", escape(&entry.field)));
            }
            out.push_str(&format!(
                "*{}* #h(1fr) {} \\\n",
                degree,
                date_range(&entry.start_date, &entry.end_date)
            ));
            out.push_str(&format!("_{}_ \\\n", escape(&entry.institution)));
            if !entry.gpa.is_empty() {
                out.push_str(&format!("GPA: {}\n", escape(&entry.gpa)));
            }
            out.push('\n');
        }
    }

    if vis.skills {
        out.push_str("= Skills\n");
        let badges: Vec<String> = doc
            .skills
            .iter()
            .map(|skill| {
                format!(
                    "#box(fill: rgb(\"#eeeeee\"), inset: (x: 4pt, y: 2pt), radius: 2pt)[{}]",
                    escape(skill)
                )
            })
            .collect();
        out.push_str(&badges.join(" #h(4pt) "));
        out.push_str("\n\n");
    }

    if vis.achievements {
        out.push_str("= Achievements & Awards\n");
        for achievement in &doc.achievements {
            out.push_str(&format!("- {}\n", escape(achievement)));
        }
        out.push('\n');
    }

    for section in &doc.custom_sections {
        out.push_str(&format!("= {}\n", escape(&section.title)));
        out.push_str(&escape(&section.content));
        out.push_str("\n\n");
    }

    out
}
