//! Deterministic report text used when the provider call fails
//!
//! With a template, the four known placeholders are replaced blindly and any
//! other `{token}` stays in the output as written. Without one, a canned text
//! for the report type is filled with the patient name and a transcript excerpt.

use record_store::ReportType;

use crate::context::ReportContext;

const PATIENT_NAME_DEFAULT: &str = "[Patient Name]";
const DOB_DEFAULT: &str = "[DOB]";
const TRANSCRIPTION_DEFAULT: &str = "[Transcription]";

const EXCERPT_CHARS: usize = 200;
const SOAP_EXCERPT_CHARS: usize = 150;

pub fn generate_fallback(ctx: &ReportContext, template: Option<&str>) -> String {
    match template {
        Some(template) => substitute_placeholders(template, ctx),
        None => canned_report(ctx),
    }
}

/// Replace `{patient_name}`, `{date}`, `{date_of_birth}` and `{transcription}`
pub fn substitute_placeholders(template: &str, ctx: &ReportContext) -> String {
    let dob = ctx.formatted_date_of_birth();
    let transcription = if ctx.transcript.is_empty() {
        TRANSCRIPTION_DEFAULT
    } else {
        ctx.transcript.as_str()
    };

    template
        .replace(
            "{patient_name}",
            ctx.patient_name.as_deref().unwrap_or(PATIENT_NAME_DEFAULT),
        )
        .replace("{date}", &ctx.formatted_date())
        .replace("{date_of_birth}", dob.as_deref().unwrap_or(DOB_DEFAULT))
        .replace("{transcription}", transcription)
}

/// First `max_chars` characters of `text`, with an ellipsis only if anything was cut
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn canned_report(ctx: &ReportContext) -> String {
    match ctx.report_type {
        ReportType::Consultation => consultation_note(ctx),
        ReportType::Soap => soap_note(ctx),
        ReportType::Followup => followup_email(ctx),
        ReportType::Discharge => discharge_summary(ctx),
    }
}

fn consultation_note(ctx: &ReportContext) -> String {
    let history = if ctx.has_transcript() {
        format!("From the recorded session: {}", excerpt(&ctx.transcript, EXCERPT_CHARS))
    } else {
        "Details from consultation recording will be analyzed here.".to_string()
    };

    format!(
        "CONSULTATION NOTE\n\
         \n\
         Date: {date}\n\
         Patient: {name}\n\
         DOB: {dob}\n\
         \n\
         CHIEF COMPLAINT:\n\
         Based on the consultation recording, the patient presents with the concerns discussed during the session.\n\
         \n\
         HISTORY OF PRESENT ILLNESS:\n\
         {history}\n\
         \n\
         PHYSICAL EXAMINATION:\n\
         Physical examination findings as documented during the session.\n\
         \n\
         ASSESSMENT AND PLAN:\n\
         Clinical assessment and treatment plan based on the consultation.",
        date = ctx.formatted_date(),
        name = ctx.patient_name.as_deref().unwrap_or("Patient Name"),
        dob = ctx.formatted_date_of_birth().as_deref().unwrap_or("DOB"),
    )
}

fn soap_note(ctx: &ReportContext) -> String {
    let subjective = if ctx.has_transcript() {
        format!("Patient reports: {}", excerpt(&ctx.transcript, SOAP_EXCERPT_CHARS))
    } else {
        "Patient subjective information from recording.".to_string()
    };

    format!(
        "SOAP NOTE\n\
         \n\
         Patient: {name}\n\
         Date: {date}\n\
         \n\
         SUBJECTIVE:\n\
         {subjective}\n\
         \n\
         OBJECTIVE:\n\
         Physical examination and vital signs as documented.\n\
         \n\
         ASSESSMENT:\n\
         Clinical assessment based on subjective and objective findings.\n\
         \n\
         PLAN:\n\
         Treatment plan and follow-up recommendations.",
        name = ctx.patient_name.as_deref().unwrap_or("Patient Name"),
        date = ctx.formatted_date(),
    )
}

fn followup_email(ctx: &ReportContext) -> String {
    let name = ctx.patient_name.as_deref().unwrap_or("Patient");
    let summary = if ctx.has_transcript() {
        excerpt(&ctx.transcript, EXCERPT_CHARS)
    } else {
        "Summary of consultation will be provided here.".to_string()
    };

    format!(
        "Subject: Follow-up Instructions - {name}\n\
         \n\
         Dear {name},\n\
         \n\
         Thank you for your recent consultation. Based on our discussion:\n\
         \n\
         SUMMARY:\n\
         {summary}\n\
         \n\
         RECOMMENDATIONS:\n\
         • Follow-up as discussed\n\
         • Continue prescribed treatments\n\
         • Monitor symptoms as instructed\n\
         \n\
         Please contact our office if you have any questions.\n\
         \n\
         Best regards,\n\
         Dr. [Your Name]"
    )
}

fn discharge_summary(ctx: &ReportContext) -> String {
    let course = if ctx.has_transcript() {
        format!("Course summary: {}", excerpt(&ctx.transcript, EXCERPT_CHARS))
    } else {
        "Hospital course details.".to_string()
    };

    format!(
        "DISCHARGE SUMMARY\n\
         \n\
         Patient: {name}\n\
         Date: {date}\n\
         \n\
         REASON FOR ADMISSION:\n\
         Based on consultation records.\n\
         \n\
         HOSPITAL COURSE:\n\
         {course}\n\
         \n\
         DISCHARGE INSTRUCTIONS:\n\
         Follow-up care and discharge planning as discussed.",
        name = ctx.patient_name.as_deref().unwrap_or("Patient Name"),
        date = ctx.formatted_date(),
    )
}
