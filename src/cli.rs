// src/cli.rs
//! Command-line interface for the resume builder and its relay server.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use crate::ai::SuggestionClient;
use crate::config::AppConfig;
use crate::session::{BuilderSession, DeliveryOutcome, SuggestOutcome, SuggestionSection};
use crate::store::ResumeStore;
use crate::web::start_relay_server;

#[derive(Parser)]
#[command(name = "resumake")]
#[command(about = "Build a resume with AI-assisted suggestions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the Gemini suggestion relay server
    Serve {
        #[arg(long, default_value_t = 5000)]
        port: u16,
    },
    /// Print the resume as plain text
    Preview,
    /// Show which sections are complete
    Status {
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set a top-level field (name, email, phone, location, linkedin,
    /// website, github, job-title, summary, skills, achievements,
    /// industry, dream-job)
    Set { field: String, value: String },
    /// Add a blank experience entry
    AddExperience,
    /// Add a blank education entry
    AddEducation,
    /// Add a custom section
    AddSection {
        title: String,
        #[arg(default_value = "")]
        content: String,
    },
    /// Remove an experience entry by id
    RemoveExperience { id: i64 },
    /// Remove an education entry by id
    RemoveEducation { id: i64 },
    /// Remove a custom section by id
    RemoveSection { id: i64 },
    /// Update fields of an experience entry
    EditExperience {
        id: i64,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        position: Option<String>,
        #[arg(long = "start")]
        start_date: Option<String>,
        #[arg(long = "end")]
        end_date: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Update fields of an education entry
    EditEducation {
        id: i64,
        #[arg(long)]
        institution: Option<String>,
        #[arg(long)]
        degree: Option<String>,
        #[arg(long)]
        field: Option<String>,
        #[arg(long = "start")]
        start_date: Option<String>,
        #[arg(long = "end")]
        end_date: Option<String>,
        #[arg(long)]
        gpa: Option<String>,
    },
    /// Update a custom section
    EditSection {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Fetch suggestions for a section (summary, achievements, skills)
    Suggest {
        #[arg(long)]
        section: String,
        /// Apply the numbered option (1-based) instead of just listing
        #[arg(long)]
        pick: Option<usize>,
        #[arg(long)]
        industry: Option<String>,
        #[arg(long)]
        dream_job: Option<String>,
    },
    /// Generate a cover letter once the resume is complete
    CoverLetter,
    /// Write the typeset export, optionally compiling it to PDF
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
        /// Run `typst compile` on the exported file
        #[arg(long)]
        pdf: bool,
    },
}

pub async fn handle_command(cli: Cli, config: AppConfig) -> Result<()> {
    if let Command::Serve { port } = cli.command {
        return start_relay_server(config.gemini_api_url, config.gemini_api_key, port).await;
    }

    config.ensure_directories().await?;
    let mut session = BuilderSession::new(ResumeStore::new(config.store_path.clone()));
    session.enter_builder();

    match cli.command {
        Command::Serve { .. } => Ok(()), // handled above
        Command::Preview => {
            println!("{}", session.preview());
            Ok(())
        }
        Command::Status { json } => print_status(&session, json),
        Command::Set { field, value } => set_field(&mut session, &field, value),
        Command::AddExperience => {
            let id = session.add_experience()?;
            println!("✅ Added experience entry {}", id);
            Ok(())
        }
        Command::AddEducation => {
            let id = session.add_education()?;
            println!("✅ Added education entry {}", id);
            Ok(())
        }
        Command::AddSection { title, content } => {
            let id = session.add_custom_section(&title, &content)?;
            println!("✅ Added section '{}' ({})", title, id);
            Ok(())
        }
        Command::RemoveExperience { id } => {
            if session.remove_experience(id)? {
                println!("✅ Removed experience entry {}", id);
            } else {
                println!("❌ Entry {} not removed (not found, or it is the last one)", id);
            }
            Ok(())
        }
        Command::RemoveEducation { id } => {
            if session.remove_education(id)? {
                println!("✅ Removed education entry {}", id);
            } else {
                println!("❌ Entry {} not removed (not found, or it is the last one)", id);
            }
            Ok(())
        }
        Command::RemoveSection { id } => {
            if session.remove_custom_section(id)? {
                println!("✅ Removed section {}", id);
            } else {
                println!("❌ No custom section with id {}", id);
            }
            Ok(())
        }
        Command::EditExperience {
            id,
            company,
            position,
            start_date,
            end_date,
            description,
        } => {
            let found = session.edit_experience(id, |entry| {
                if let Some(company) = company {
                    entry.company = company;
                }
                if let Some(position) = position {
                    entry.position = position;
                }
                if let Some(start_date) = start_date {
                    entry.start_date = start_date;
                }
                if let Some(end_date) = end_date {
                    entry.end_date = end_date;
                }
                if let Some(description) = description {
                    entry.description = description;
                }
            })?;
            report_edit(found, "experience entry", id);
            Ok(())
        }
        Command::EditEducation {
            id,
            institution,
            degree,
            field,
            start_date,
            end_date,
            gpa,
        } => {
            let found = session.edit_education(id, |entry| {
                if let Some(institution) = institution {
                    entry.institution = institution;
                }
                if let Some(degree) = degree {
                    entry.degree = degree;
                }
                if let Some(field) = field {
                    entry.field = field;
                }
                if let Some(start_date) = start_date {
                    entry.start_date = start_date;
                }
                if let Some(end_date) = end_date {
                    entry.end_date = end_date;
                }
                if let Some(gpa) = gpa {
                    entry.gpa = gpa;
                }
            })?;
            report_edit(found, "education entry", id);
            Ok(())
        }
        Command::EditSection { id, title, content } => {
            let found = session.edit_custom_section(id, |section| {
                if let Some(title) = title {
                    section.title = title;
                }
                if let Some(content) = content {
                    section.content = content;
                }
            })?;
            report_edit(found, "custom section", id);
            Ok(())
        }
        Command::Suggest {
            section,
            pick,
            industry,
            dream_job,
        } => handle_suggest(&mut session, &config, &section, pick, industry, dream_job).await,
        Command::CoverLetter => {
            let client = SuggestionClient::new(config.relay_url.clone())?;
            let letter = session.generate_cover_letter(&client).await?;
            println!("{}", letter);
            Ok(())
        }
        Command::Export { out, pdf } => handle_export(&session, &config, out, pdf),
    }
}

fn print_status(session: &BuilderSession, json: bool) -> Result<()> {
    let report = session.completion();
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for section in &report.sections {
        let mark = if section.complete { "✅" } else { "❌" };
        println!("{} {}", mark, section.section);
    }
    if report.complete {
        println!("\nResume is complete. Cover letter generation is available.");
    } else {
        println!("\nResume is incomplete. Fill the remaining sections to unlock the cover letter.");
    }
    Ok(())
}

fn set_field(session: &mut BuilderSession, field: &str, value: String) -> Result<()> {
    match field {
        "job-title" => session.update_job_title(&value)?,
        "summary" => session.update_summary(&value)?,
        "skills" => session.update_skills_text(&value)?,
        "achievements" => session.update_achievements_text(&value)?,
        "industry" => {
            let dream_job = session.document().dream_job.clone();
            session.provide_context(&value, &dream_job)?;
        }
        "dream-job" => {
            let industry = session.document().industry.clone();
            session.provide_context(&industry, &value)?;
        }
        "name" | "email" | "phone" | "location" | "linkedin" | "website" | "github" => {
            let mut info = session.document().personal_info.clone();
            match field {
                "name" => info.name = value,
                "email" => info.email = value,
                "phone" => info.phone = value,
                "location" => info.location = value,
                "linkedin" => info.linkedin = value,
                "website" => info.website = value,
                _ => info.github = value,
            }
            session.update_personal_info(info)?;
        }
        other => bail!(
            "Unknown field '{}'. Expected one of: name, email, phone, location, linkedin, \
             website, github, job-title, summary, skills, achievements, industry, dream-job",
            other
        ),
    }
    println!("✅ Updated {}", field);
    Ok(())
}

fn report_edit(found: bool, kind: &str, id: i64) {
    if found {
        println!("✅ Updated {} {}", kind, id);
    } else {
        println!("❌ No {} with id {}", kind, id);
    }
}

async fn handle_suggest(
    session: &mut BuilderSession,
    config: &AppConfig,
    section: &str,
    pick: Option<usize>,
    industry: Option<String>,
    dream_job: Option<String>,
) -> Result<()> {
    let section = parse_section(section)?;
    let client = SuggestionClient::new(config.relay_url.clone())?;

    if industry.is_some() || dream_job.is_some() {
        session.provide_context(
            industry.as_deref().unwrap_or(""),
            dream_job.as_deref().unwrap_or(""),
        )?;
    }

    let request = match session.request_suggestions(section)? {
        SuggestOutcome::Requested(request) => request,
        SuggestOutcome::NeedsContext => {
            println!("No industry context set; pass --industry/--dream-job to tailor suggestions.");
            match session.provide_context("", "")? {
                Some(request) => request,
                None => bail!("Suggestion request was dropped"),
            }
        }
    };

    let result = session.fetch_suggestions(&client, &request).await;
    match session.deliver_suggestions(&request, result) {
        DeliveryOutcome::Applied => {}
        DeliveryOutcome::Stale => bail!("Suggestion response was superseded"),
        DeliveryOutcome::Failed(error) => return Err(error.into()),
    }

    let options = session.suggestion_options().to_vec();
    if options.is_empty() {
        session.cancel_suggestions();
        println!("No suggestions came back. Try again.");
        return Ok(());
    }

    println!("Suggestions for {}:", section);
    for (index, option) in options.iter().enumerate() {
        println!("\n[{}] {}", index + 1, option);
    }

    match pick {
        Some(number) if number >= 1 => {
            session.select_suggestion(number - 1)?;
            println!("\n✅ Applied option {}", number);
        }
        Some(_) => bail!("--pick is 1-based"),
        None => {
            session.cancel_suggestions();
            println!("\nNothing applied. Re-run with --pick <n> to apply an option.");
        }
    }
    Ok(())
}

fn parse_section(raw: &str) -> Result<SuggestionSection> {
    match raw.to_lowercase().as_str() {
        "summary" => Ok(SuggestionSection::Summary),
        "achievements" => Ok(SuggestionSection::Achievements),
        "skills" => Ok(SuggestionSection::Skills),
        other => bail!(
            "Unknown section '{}'. Expected summary, achievements, or skills",
            other
        ),
    }
}

fn handle_export(
    session: &BuilderSession,
    config: &AppConfig,
    out: Option<PathBuf>,
    pdf: bool,
) -> Result<()> {
    let stem = sanitize_filename(&session.document().personal_info.name);
    let stem = if stem.is_empty() {
        "resume".to_string()
    } else {
        stem
    };

    let typ_path = match out {
        Some(path) => path,
        None => config.output_path.join(format!("{}.typ", stem)),
    };

    if let Some(parent) = typ_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    fs::write(&typ_path, session.export_markup())
        .with_context(|| format!("Failed to write {}", typ_path.display()))?;
    println!("✅ Wrote {}", typ_path.display());

    if pdf {
        let pdf_path = typ_path.with_extension("pdf");
        let status = std::process::Command::new("typst")
            .arg("compile")
            .arg(&typ_path)
            .arg(&pdf_path)
            .status()
            .context("Failed to execute typst. Is it installed?")?;
        if !status.success() {
            bail!("Typst compilation failed");
        }
        println!("✅ Compiled {}", pdf_path.display());
    }

    Ok(())
}

fn sanitize_filename(input: &str) -> String {
    input
        .trim()
        .replace(char::is_whitespace, "_")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}
