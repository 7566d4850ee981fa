//! Prompt construction for completion providers

use crate::context::ReportContext;

/// A system prompt plus a single user turn
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

pub fn system_prompt(ctx: &ReportContext) -> String {
    format!(
        "You are a medical documentation assistant. Write a {label} from the consultation \
         transcript provided by the clinician.\n\
         \n\
         Requirements:\n\
         - Protect patient privacy and include only identifiers that are given to you.\n\
         - Use only information present in the transcript.\n\
         - Where information is missing, write \"[Not documented]\" rather than inventing it.\n\
         - Use professional medical terminology and a clear section structure.",
        label = ctx.report_type.label()
    )
}

pub fn user_prompt(
    ctx: &ReportContext,
    template: Option<&str>,
    custom_instructions: Option<&str>,
) -> String {
    let mut prompt = format!("Report type: {}\n", ctx.report_type.label());

    if let Some(name) = &ctx.patient_name {
        prompt.push_str(&format!("Patient: {}\n", name));
    }
    if let Some(dob) = ctx.formatted_date_of_birth() {
        prompt.push_str(&format!("Date of birth: {}\n", dob));
    }
    prompt.push_str(&format!("Date: {}\n", ctx.formatted_date()));

    prompt.push_str("\nTranscript:\n");
    if ctx.has_transcript() {
        prompt.push_str(ctx.transcript.trim());
    } else {
        prompt.push_str("[No transcript available]");
    }
    prompt.push('\n');

    if let Some(template) = template.filter(|t| !t.trim().is_empty()) {
        prompt.push_str("\nFollow the structure of this template:\n");
        prompt.push_str(template.trim());
        prompt.push('\n');
    }

    if let Some(instructions) = custom_instructions.filter(|i| !i.trim().is_empty()) {
        prompt.push_str("\nAdditional instructions:\n");
        prompt.push_str(instructions.trim());
        prompt.push('\n');
    }

    prompt
}

pub fn build_prompt(
    ctx: &ReportContext,
    template: Option<&str>,
    custom_instructions: Option<&str>,
) -> Prompt {
    Prompt {
        system: system_prompt(ctx),
        user: user_prompt(ctx, template, custom_instructions),
    }
}
