// src/ai/prompts.rs
//! Prompt builders for each generation intent. Every prompt instructs the
//! model to separate options with a line of three dashes; the client owns
//! the matching parser.

use crate::types::resume::{ExperienceEntry, ResumeDocument};

// Few-shot examples keep the output style on-register.
const SUMMARY_EXAMPLES: &str = "
Example 1: Creative and detail-oriented Frontend Developer with 3+ years of experience building responsive web applications. Skilled in React and UI/UX, with a proven track record of improving user engagement and driving business results.

Example 2: Results-driven Software Engineer with expertise in JavaScript, React, and modern UI/UX practices. Adept at collaborating with cross-functional teams to deliver high-quality products on time.

Example 3: Passionate developer with a strong background in frontend technologies and a keen eye for design. Experienced in leading projects from concept to launch, ensuring seamless user experiences.";

const ACHIEVEMENT_EXAMPLES: &str = "
Example 1:
- Increased website conversion rate by 20% through UI redesign
- Led a team of 4 developers to deliver a project 2 weeks ahead of schedule
- Automated deployment process, reducing release time by 30%

Example 2:
- Developed a reusable component library adopted across 3 teams
- Mentored 2 junior developers, improving team productivity
- Implemented analytics tracking, providing actionable insights to stakeholders
";

const SKILLS_EXAMPLES: &str = "
Example 1: React, JavaScript, HTML5, CSS3, Redux, TypeScript, Figma, Responsive Design, Git, Agile, Communication, Problem Solving

Example 2: Node.js, Express, MongoDB, REST APIs, Docker, CI/CD, Teamwork, Adaptability, Time Management, Testing, Debugging
";

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}

/// Professional summary prompt. Works from whatever the document has,
/// with placeholder text for anything missing.
pub fn professional_summary(doc: &ResumeDocument, n: usize) -> String {
    let skills = if doc.skills.is_empty() {
        "various technical skills".to_string()
    } else {
        doc.skills.join(", ")
    };
    let experience_level = if doc.experience.is_empty() {
        "entry-level".to_string()
    } else {
        format!("{} years of experience", doc.experience.len())
    };

    format!(
        "You are an expert resume writer. Write {n} compelling, distinct professional summaries for a resume with the following details:\n\n\
Name: {}\n\
Job Title: {}\n\
Industry: {}\n\
Skills: {}\n\
Experience Level: {}\n\n\
Each summary should be 2-3 sentences, highlight key strengths and career objectives, and be engaging and professional. Use a confident, modern tone. Here are some examples of the style you should follow:\n\
{SUMMARY_EXAMPLES}\n\n\
Separate each summary with a line containing only three dashes (---).",
        or_placeholder(&doc.personal_info.name, "Professional"),
        or_placeholder(&doc.job_title, "Professional"),
        or_placeholder(&doc.industry, "General"),
        skills,
        experience_level,
    )
}

/// Achievement bullet prompt built from the most recent experience entry,
/// or a generic-professional variant when there is none.
pub fn achievements(experience: &[ExperienceEntry], n: usize) -> String {
    match experience.first() {
        None => format!(
            "You are an expert resume writer. Generate {n} sets of 3-5 professional achievement bullet points for a general professional. Focus on measurable accomplishments, leadership, and impact. Use a confident, modern tone. Here are some examples of the style you should follow:\n\
{ACHIEVEMENT_EXAMPLES}\n\
Separate each set with a line containing only three dashes (---)."
        ),
        Some(latest) => format!(
            "You are an expert resume writer. Generate {n} sets of 3-5 professional achievement bullet points for this job experience:\n\n\
Position: {}\n\
Company: {}\n\
Description: {}\n\n\
Each set should be specific, measurable achievements that would be impressive on a resume. Use action verbs, include metrics where possible, and keep the tone confident and modern. Here are some examples of the style you should follow:\n\
{ACHIEVEMENT_EXAMPLES}\n\
Separate each set with a line containing only three dashes (---).",
            or_placeholder(&latest.position, "Professional"),
            or_placeholder(&latest.company, "Company"),
            or_placeholder(&latest.description, "General professional work"),
        ),
    }
}

pub fn job_description(position: &str, company: &str) -> String {
    format!(
        "Write a professional job description for this position:\n\n\
Position: {position}\n\
Company: {company}\n\n\
Write 2-3 bullet points describing key responsibilities and achievements. Make it specific and professional."
    )
}

/// Skill list prompt. Each option comes back as one comma-separated line.
pub fn skills_recommendations(
    job_title: &str,
    existing_skills: &[String],
    industry: &str,
    n: usize,
) -> String {
    let existing = if existing_skills.is_empty() {
        "none".to_string()
    } else {
        existing_skills.join(", ")
    };
    format!(
        "You are an expert resume writer. Recommend {n} distinct lists of 8-12 relevant skills for a {job_title} position in the {} industry.\n\
Include both technical and soft skills that would be valuable for this role.\n\
If the following skills are already present, include them if relevant: {existing}.\n\
Here are some examples of the style you should follow:\n\
{SKILLS_EXAMPLES}\n\
Return only the skills separated by commas for each list, and separate each list with a line containing only three dashes (---).",
        or_placeholder(industry, "general"),
    )
}

/// Cover letter prompt: the whole document flattened into labeled lines,
/// with literal fallbacks for empty sequences.
pub fn cover_letter(doc: &ResumeDocument) -> String {
    let experience = if doc.experience.is_empty() {
        "No experience provided.".to_string()
    } else {
        doc.experience
            .iter()
            .map(|e| {
                format!(
                    "- {} at {} ({} - {}): {}",
                    e.position, e.company, e.start_date, e.end_date, e.description
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };
    let education = if doc.education.is_empty() {
        "No education provided.".to_string()
    } else {
        doc.education
            .iter()
            .map(|e| {
                format!(
                    "- {} in {} from {} ({} - {})",
                    e.degree, e.field, e.institution, e.start_date, e.end_date
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };
    let skills = if doc.skills.is_empty() {
        "No skills provided.".to_string()
    } else {
        doc.skills.join(", ")
    };
    let achievements = if doc.achievements.is_empty() {
        "No achievements provided.".to_string()
    } else {
        doc.achievements.join("; ")
    };

    format!(
        "Write a professional, personalized cover letter for a job application using the following resume details. The letter should be engaging, highlight the candidate's strengths, and be suitable for a modern job search. Use a friendly but professional tone.\n\n\
Name: {}\n\
Email: {}\n\
Phone: {}\n\
Location: {}\n\
LinkedIn: {}\n\
Website: {}\n\
GitHub: {}\n\
Job Title: {}\n\
Industry: {}\n\
Dream Job: {}\n\
Summary: {}\n\n\
Experience:\n{experience}\n\n\
Education:\n{education}\n\n\
Skills: {skills}\n\
Achievements: {achievements}\n\n\
The letter should be 3-5 paragraphs, tailored to a generic job application, and ready to be customized for a specific employer.\n\n\
Return only the cover letter text, no extra commentary or formatting.",
        doc.personal_info.name,
        doc.personal_info.email,
        doc.personal_info.phone,
        doc.personal_info.location,
        doc.personal_info.linkedin,
        doc.personal_info.website,
        doc.personal_info.github,
        doc.job_title,
        doc.industry,
        doc.dream_job,
        doc.summary,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_prompt_uses_placeholders_for_missing_fields() {
        let mut doc = ResumeDocument::default();
        doc.experience.clear();
        let prompt = professional_summary(&doc, 3);
        assert!(prompt.contains("Write 3 compelling"));
        assert!(prompt.contains("Name: Professional"));
        assert!(prompt.contains("Job Title: Professional"));
        assert!(prompt.contains("Industry: General"));
        assert!(prompt.contains("Skills: various technical skills"));
        assert!(prompt.contains("Experience Level: entry-level"));
    }

    #[test]
    fn test_summary_prompt_uses_document_fields() {
        let mut doc = ResumeDocument::default();
        doc.personal_info.name = "Jane".into();
        doc.job_title = "Frontend Developer".into();
        doc.industry = "Fintech".into();
        doc.skills = vec!["React".into(), "TypeScript".into()];
        doc.add_experience();
        let prompt = professional_summary(&doc, 2);
        assert!(prompt.contains("Name: Jane"));
        assert!(prompt.contains("Industry: Fintech"));
        assert!(prompt.contains("Skills: React, TypeScript"));
        assert!(prompt.contains("Experience Level: 2 years of experience"));
    }

    #[test]
    fn test_achievements_prompt_falls_back_to_generic_variant() {
        let prompt = achievements(&[], 3);
        assert!(prompt.contains("for a general professional"));
        assert!(!prompt.contains("Position:"));
    }

    #[test]
    fn test_achievements_prompt_uses_latest_entry_with_fallbacks() {
        let mut entry = ExperienceEntry::blank(1);
        entry.company = "Acme".into();
        let prompt = achievements(&[entry], 3);
        assert!(prompt.contains("Position: Professional"));
        assert!(prompt.contains("Company: Acme"));
        assert!(prompt.contains("Description: General professional work"));
    }

    #[test]
    fn test_skills_prompt_mentions_counts_and_existing() {
        let prompt =
            skills_recommendations("Data Engineer", &["SQL".to_string()], "", 3);
        assert!(prompt.contains("Recommend 3 distinct lists"));
        assert!(prompt.contains("for a Data Engineer position in the general industry"));
        assert!(prompt.contains("include them if relevant: SQL."));
    }

    #[test]
    fn test_cover_letter_fallback_literals() {
        let mut doc = ResumeDocument::default();
        doc.experience.clear();
        doc.education.clear();
        let prompt = cover_letter(&doc);
        assert!(prompt.contains("Experience:\nNo experience provided."));
        assert!(prompt.contains("Education:\nNo education provided."));
        assert!(prompt.contains("Skills: No skills provided."));
        assert!(prompt.contains("Achievements: No achievements provided."));
    }

    #[test]
    fn test_cover_letter_assembles_bulleted_entries() {
        let mut doc = ResumeDocument::default();
        doc.experience[0].position = "Engineer".into();
        doc.experience[0].company = "Acme".into();
        doc.experience[0].start_date = "2021-05".into();
        doc.experience[0].end_date = "2023-01".into();
        doc.experience[0].description = "Built the pipeline.".into();
        doc.education[0].degree = "BSc".into();
        doc.education[0].field = "CS".into();
        doc.education[0].institution = "State".into();
        doc.achievements = vec!["A".into(), "B".into()];
        let prompt = cover_letter(&doc);
        assert!(prompt.contains("- Engineer at Acme (2021-05 - 2023-01): Built the pipeline."));
        assert!(prompt.contains("- BSc in CS from State ( - )"));
        assert!(prompt.contains("Achievements: A; B"));
    }
}
