//! All LLM prompt constants and builders for the cover letter pipeline.
//!
//! Both builders are pure: identical inputs produce byte-identical prompts.
//! Empty-input validation happens one layer up, in the pipeline controller.

use serde_json::{json, Value};

use crate::letter::extraction::JobExtraction;

// Artifact URLs woven into every generated letter.
pub const REACT_GITHUB_URL: &str = "https://github.com/ksprabin/world-clock-app";
pub const AI_WEB_APP_URL: &str = "https://fund-management-sooty.vercel.app/";
pub const PORTFOLIO_URL: &str = "https://prabin-portfolio-nu.vercel.app/";

/// Sentence every generated letter must contain, word for word.
pub const MANDATORY_SENTENCE: &str = "Possessing a rare skill for front-end fidelity, I deliver screens that are visually and functionally identical to the original UX design, guaranteeing a flawless UI.";

/// System prompt for the extraction stage — schema-conformant JSON only.
pub const EXTRACTION_SYSTEM: &str = "You are an efficient data extractor. \
    Your only goal is to parse the input and return a JSON object that strictly \
    conforms to the provided schema. Do not include any external commentary.";

/// Extraction user query template. Replace `{job_description}` before sending.
const EXTRACTION_PROMPT_TEMPLATE: &str = r#"Analyze the job description below. Identify the hiring company name and list the 5 most critical, specific skills or requirements for this role.

--- JOB DESCRIPTION ---
{job_description}"#;

/// System prompt template for the generation stage. This is the product's
/// contract with the model: the letter's formatting and content rules live
/// here, not in any post-processing step.
/// Replace: {react_github_url}, {ai_web_app_url}, {portfolio_url},
///          {mandatory_sentence}
const GENERATION_SYSTEM_TEMPLATE: &str = r#"You are an expert career consultant. Write a persuasive and professional, single-page cover letter in a standard business format, using placeholders for the date and recipient name. Adopt a warm, impact-focused, and collaborative tone.

FORMATTING RULES FOR READABILITY:
1. Short Paragraphs: Use concise paragraphs (max 3-4 sentences). Avoid large blocks of dense text.
2. Bullet Points: You MUST use a bulleted list to highlight key technical skills, achievements, or specific matches to the job requirements. This is essential for readability.
3. No Markdown Bolding: Do NOT use double asterisks (**) anywhere. Do not bold words. Keep the text clean and plain.

CONTENT REQUIREMENTS:
1. Value Focus: Focus entirely on what the candidate can contribute to the company's business.
2. Addressing Gaps: Identify gaps between the JD and the candidate's profile and frame the candidate's existing expertise as a solution or highly transferable skill.
3. Artifact Integration: Integrate the following URLs naturally into the letter (e.g., within the bullet points or a relevant paragraph):
   - React Practice: {react_github_url}
   - AI App: {ai_web_app_url}
   - Portfolio: {portfolio_url}
4. Mandatory Sentence: You MUST include this exact sentence: "{mandatory_sentence}"
5. Performance Nuance: Mention in a subtle, professional manner that while the candidate may consider themselves an average performer during interviews, their actual work performance and delivery are consistently exceptional."#;

/// Generation user query template.
/// Replace: {company}, {requirements_list}, {resume}
const GENERATION_PROMPT_TEMPLATE: &str = r#"Write a professional cover letter. The letter should be addressed to the hiring manager at "{company}".
The letter MUST explicitly address how the candidate meets these key requirements: {requirements_list}.
The candidate's relevant experience is: {resume}."#;

/// Rendered payload for the extraction call.
#[derive(Debug, Clone)]
pub struct ExtractionPrompt {
    pub system: &'static str,
    pub user: String,
    pub response_schema: Value,
}

/// Rendered payload for the generation call. Free-text mode, no schema.
#[derive(Debug, Clone)]
pub struct GenerationPrompt {
    pub system: String,
    pub user: String,
}

/// Response schema for the extraction call, in the provider's schema dialect.
/// Advisory to the model — the extraction stage still validates the parsed
/// record locally.
pub fn extraction_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "company": {
                "type": "STRING",
                "description": "The name of the hiring company."
            },
            "requirements": {
                "type": "ARRAY",
                "description": "A list of the top 5 most critical skills, tools, or requirements for the job.",
                "items": { "type": "STRING" },
                "minItems": 5,
                "maxItems": 5
            }
        },
        "required": ["company", "requirements"]
    })
}

/// Builds the extraction prompt. The job description is embedded verbatim
/// after the instruction header.
pub fn build_extraction_prompt(job_description: &str) -> ExtractionPrompt {
    ExtractionPrompt {
        system: EXTRACTION_SYSTEM,
        user: EXTRACTION_PROMPT_TEMPLATE.replace("{job_description}", job_description),
        response_schema: extraction_response_schema(),
    }
}

/// Builds the generation prompt from the extraction record and the resume.
/// Requirements are joined with ", " into a single list clause.
pub fn build_generation_prompt(extraction: &JobExtraction, resume: &str) -> GenerationPrompt {
    let requirements_list = extraction.requirements.join(", ");

    GenerationPrompt {
        system: GENERATION_SYSTEM_TEMPLATE
            .replace("{react_github_url}", REACT_GITHUB_URL)
            .replace("{ai_web_app_url}", AI_WEB_APP_URL)
            .replace("{portfolio_url}", PORTFOLIO_URL)
            .replace("{mandatory_sentence}", MANDATORY_SENTENCE),
        user: GENERATION_PROMPT_TEMPLATE
            .replace("{company}", &extraction.company)
            .replace("{requirements_list}", &requirements_list)
            .replace("{resume}", resume),
    }
}
