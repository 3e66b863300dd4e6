//! Reply and notice text.

use super::pipeline::{SlotOutcome, TranslationSlot};
use babel_core::languages::language_name;

/// Build the reply: a header line, then one line per target language.
///
/// ```text
/// Reacted with 🇫🇷 for <@42> (from English):
/// **French:** Bonjour le monde
/// ```
pub fn compose_reply(
    emoji: &str,
    requester: &str,
    source: Option<&str>,
    slots: &[TranslationSlot],
) -> String {
    let source_name = source
        .map(language_name)
        .unwrap_or_else(|| "unknown".to_string());

    let mut lines = Vec::with_capacity(slots.len() + 1);
    lines.push(format!(
        "Reacted with {emoji} for {requester} (from {source_name}):"
    ));
    for slot in slots {
        lines.push(format!(
            "**{}:** {}",
            language_name(&slot.code),
            slot_text(&slot.outcome)
        ));
    }
    lines.join("\n")
}

fn slot_text(outcome: &SlotOutcome) -> &str {
    match outcome {
        SlotOutcome::Translated(text) => text,
        SlotOutcome::AlreadyInLanguage => "(Already in this language)",
        SlotOutcome::SameAsSource => "(Same as the original text)",
        SlotOutcome::Empty => "(Translation returned no text)",
        SlotOutcome::Failed(_) => "(Failed to translate)",
    }
}

/// Notice for messages without text.
pub fn empty_message_notice(requester: &str) -> String {
    format!(
        "Sorry {requester}, I can't translate an empty message or a message with only an embed/image."
    )
}

/// Generic apology for unexpected failures.
pub fn apology_notice(requester: &str) -> String {
    format!("Sorry {requester}, an unexpected error occurred while trying to translate.")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(code: &str, outcome: SlotOutcome) -> TranslationSlot {
        TranslationSlot {
            code: code.into(),
            outcome,
        }
    }

    #[test]
    fn test_reply_with_detected_source() {
        let reply = compose_reply(
            "🇫🇷",
            "<@42>",
            Some("en"),
            &[slot("fr", SlotOutcome::Translated("Bonjour le monde".into()))],
        );
        assert_eq!(
            reply,
            "Reacted with 🇫🇷 for <@42> (from English):\n**French:** Bonjour le monde"
        );
    }

    #[test]
    fn test_reply_with_unknown_source() {
        let reply = compose_reply(
            "🇩🇪",
            "<@1>",
            None,
            &[slot("de", SlotOutcome::Translated("Hallo".into()))],
        );
        assert!(reply.starts_with("Reacted with 🇩🇪 for <@1> (from unknown):"));
    }

    #[test]
    fn test_reply_markers() {
        let reply = compose_reply(
            "🇨🇭",
            "<@1>",
            Some("de"),
            &[
                slot("de", SlotOutcome::AlreadyInLanguage),
                slot("fr", SlotOutcome::Failed("timeout".into())),
                slot("it", SlotOutcome::SameAsSource),
            ],
        );
        let lines: Vec<&str> = reply.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "**German:** (Already in this language)");
        assert_eq!(lines[2], "**French:** (Failed to translate)");
        assert_eq!(lines[3], "**Italian:** (Same as the original text)");
        // Backend error details stay in the logs.
        assert!(!reply.contains("timeout"));
    }

    #[test]
    fn test_reply_unknown_code_falls_back() {
        let reply = compose_reply("🏳️", "<@1>", Some("xx"), &[slot("yy", SlotOutcome::Empty)]);
        assert!(reply.contains("(from Xx)"));
        assert!(reply.contains("**Yy:** (Translation returned no text)"));
    }

    #[test]
    fn test_notices_mention_requester() {
        assert!(empty_message_notice("<@9>").starts_with("Sorry <@9>,"));
        assert!(apology_notice("<@9>").contains("unexpected error"));
    }
}
