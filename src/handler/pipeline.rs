//! Detection and concurrent translation fan-out.

use babel_core::{
    error::BabelError,
    languages::same_language,
    traits::{Translator, AUTO_SOURCE},
};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// What happened for one target language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotOutcome {
    /// A real translation.
    Translated(String),
    /// The detected source already is this language; no backend call was made.
    AlreadyInLanguage,
    /// The backend returned the original text (modulo case and whitespace).
    SameAsSource,
    /// The backend returned nothing.
    Empty,
    /// The backend call failed.
    Failed(String),
}

/// One target language and its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationSlot {
    pub code: String,
    pub outcome: SlotOutcome,
}

/// Leading `max_chars` characters of `text`.
pub fn char_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((i, _)) => &text[..i],
        None => text,
    }
}

/// Best-effort source-language detection on a capped prefix.
///
/// Returns `None` when detection fails or yields no usable code.
pub async fn detect_source(
    translator: &dyn Translator,
    text: &str,
    max_chars: usize,
) -> Option<String> {
    match translator.detect(char_prefix(text, max_chars)).await {
        Ok(code) => {
            let code = code.trim();
            if code.is_empty() || code == AUTO_SOURCE || code == "und" {
                debug!("detection returned no usable language ({code:?})");
                None
            } else {
                Some(code.to_string())
            }
        }
        Err(e) => {
            warn!("language detection failed, assuming auto: {e}");
            None
        }
    }
}

/// Collapse whitespace runs and lowercase, for "same text" comparison.
fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Classify one backend result against the original text.
pub fn classify(original: &str, result: Result<String, BabelError>) -> SlotOutcome {
    match result {
        Err(e) => SlotOutcome::Failed(e.to_string()),
        Ok(text) if text.trim().is_empty() => SlotOutcome::Empty,
        Ok(text) if normalize(&text) == normalize(original) => SlotOutcome::SameAsSource,
        Ok(text) => SlotOutcome::Translated(text),
    }
}

/// Distinct codes, first occurrence wins.
fn distinct<'a>(codes: &[&'a str]) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::with_capacity(codes.len());
    for code in codes {
        if !out.iter().any(|seen| same_language(seen, code)) {
            out.push(*code);
        }
    }
    out
}

/// Translate `text` into every target concurrently.
///
/// Targets equal to `source` are marked [`SlotOutcome::AlreadyInLanguage`]
/// without a backend call. Slots come back in target order.
pub async fn translate_targets(
    translator: Arc<dyn Translator>,
    text: Arc<str>,
    source: Option<&str>,
    targets: &[&str],
) -> Vec<TranslationSlot> {
    let targets = distinct(targets);
    let mut outcomes: Vec<Option<SlotOutcome>> = vec![None; targets.len()];
    let mut tasks = JoinSet::new();

    for (idx, target) in targets.iter().enumerate() {
        if source.is_some_and(|src| same_language(src, target)) {
            outcomes[idx] = Some(SlotOutcome::AlreadyInLanguage);
            continue;
        }

        let translator = translator.clone();
        let text = text.clone();
        let source = source.unwrap_or(AUTO_SOURCE).to_string();
        let target = target.to_string();
        tasks.spawn(async move {
            let result = translator.translate(&text, &source, &target).await;
            if let Err(ref e) = result {
                warn!("translation to {target} failed: {e}");
            }
            (idx, result)
        });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((idx, result)) => outcomes[idx] = Some(classify(&text, result)),
            Err(e) => warn!("translation task did not complete: {e}"),
        }
    }

    targets
        .into_iter()
        .zip(outcomes)
        .map(|(code, outcome)| TranslationSlot {
            code: code.to_string(),
            outcome: outcome
                .unwrap_or_else(|| SlotOutcome::Failed("translation task did not complete".into())),
        })
        .collect()
}
