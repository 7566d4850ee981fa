//! Strict template resolution
//!
//! Unlike fallback substitution, every `{token}` in the template must be
//! known. Unknown tokens are collected and reported together.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;

use crate::context::ReportContext;
use crate::error::{ReportError, ReportResult};

lazy_static! {
    static ref PLACEHOLDER_REGEX: Regex = Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap();
}

/// Tokens the resolver can fill from a [`ReportContext`]
pub const KNOWN_TOKENS: [&str; 4] = ["patient_name", "date", "date_of_birth", "transcription"];

#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateResolver;

impl TemplateResolver {
    pub fn new() -> Self {
        Self
    }

    /// Distinct placeholder names in the template, sorted
    pub fn placeholders(&self, template: &str) -> Vec<String> {
        PLACEHOLDER_REGEX
            .captures_iter(template)
            .map(|caps| caps[1].to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Placeholder names the resolver cannot fill, sorted
    pub fn unresolved(&self, template: &str) -> Vec<String> {
        self.placeholders(template)
            .into_iter()
            .filter(|token| !KNOWN_TOKENS.contains(&token.as_str()))
            .collect()
    }

    pub fn resolve(&self, template: &str, ctx: &ReportContext) -> ReportResult<String> {
        let unresolved = self.unresolved(template);
        if !unresolved.is_empty() {
            return Err(ReportError::UnresolvedTokens(unresolved));
        }

        let resolved = PLACEHOLDER_REGEX.replace_all(template, |caps: &regex::Captures| {
            Self::value(&caps[1], ctx)
        });
        Ok(resolved.into_owned())
    }

    fn value(token: &str, ctx: &ReportContext) -> String {
        match token {
            "patient_name" => ctx
                .patient_name
                .clone()
                .unwrap_or_else(|| "[Patient Name]".to_string()),
            "date" => ctx.formatted_date(),
            "date_of_birth" => ctx
                .formatted_date_of_birth()
                .unwrap_or_else(|| "[DOB]".to_string()),
            "transcription" if ctx.transcript.is_empty() => "[Transcription]".to_string(),
            "transcription" => ctx.transcript.clone(),
            other => format!("{{{}}}", other),
        }
    }
}
