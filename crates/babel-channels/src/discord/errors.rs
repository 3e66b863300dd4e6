//! Mapping of Discord API failures onto [`BabelError`].

use babel_core::error::BabelError;
use serenity::http::HttpError;

// Discord JSON error codes.
// Docs: <https://discord.com/developers/docs/topics/opcodes-and-status-codes#json>
const UNKNOWN_CHANNEL: i64 = 10003;
const UNKNOWN_MESSAGE: i64 = 10008;
const UNKNOWN_USER: i64 = 10013;
const MISSING_ACCESS: i64 = 50001;
const MISSING_PERMISSIONS: i64 = 50013;
const INVALID_FORM_BODY: i64 = 50035;
const THREAD_ARCHIVED: i64 = 50083;
const REPLY_WITHOUT_HISTORY: i64 = 160002;

/// What the failed request was trying to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Op {
    Fetch,
    Send,
    Reply,
}

/// Classify a Discord error response by HTTP status and JSON error code.
pub(crate) fn classify_response(op: Op, status: u16, code: i64, message: &str) -> BabelError {
    let detail = format!("discord {status} (code {code}): {message}");

    if op == Op::Reply
        && matches!(
            code,
            REPLY_WITHOUT_HISTORY | UNKNOWN_MESSAGE | INVALID_FORM_BODY | THREAD_ARCHIVED
        )
    {
        return BabelError::ReplyRejected(detail);
    }

    match (status, code) {
        (_, UNKNOWN_CHANNEL | UNKNOWN_MESSAGE | UNKNOWN_USER) | (404, _) => {
            BabelError::NotFound(detail)
        }
        (_, MISSING_ACCESS | MISSING_PERMISSIONS) | (403, _) => BabelError::Forbidden(detail),
        _ => BabelError::Channel(detail),
    }
}

/// Convert a serenity error into a [`BabelError`].
pub(crate) fn classify(op: Op, err: serenity::Error) -> BabelError {
    let http_err: &HttpError = match &err {
        serenity::Error::Http(e) => e,
        _ => return BabelError::Channel(format!("discord error: {err}")),
    };
    match http_err {
        HttpError::UnsuccessfulRequest(resp) => classify_response(
            op,
            resp.status_code.as_u16(),
            resp.error.code as i64,
            &resp.error.message,
        ),
        other => BabelError::Channel(format!("discord http error: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_without_history_is_rejected_reply() {
        let e = classify_response(Op::Reply, 400, REPLY_WITHOUT_HISTORY, "Cannot reply");
        assert!(matches!(e, BabelError::ReplyRejected(_)));
    }

    #[test]
    fn test_archived_thread_reply_is_rejected_reply() {
        let e = classify_response(Op::Reply, 400, THREAD_ARCHIVED, "archived");
        assert!(matches!(e, BabelError::ReplyRejected(_)));
    }

    #[test]
    fn test_same_code_on_plain_send_is_not_reply_rejection() {
        let e = classify_response(Op::Send, 400, INVALID_FORM_BODY, "bad body");
        assert!(matches!(e, BabelError::Channel(_)));
    }

    #[test]
    fn test_missing_permissions_on_reply_is_forbidden() {
        let e = classify_response(Op::Reply, 403, MISSING_PERMISSIONS, "Missing Permissions");
        assert!(matches!(e, BabelError::Forbidden(_)));
    }

    #[test]
    fn test_fetch_unknown_message_is_not_found() {
        let e = classify_response(Op::Fetch, 404, UNKNOWN_MESSAGE, "Unknown Message");
        assert!(matches!(e, BabelError::NotFound(_)));
        assert!(e.is_missing_entity());
    }

    #[test]
    fn test_fetch_missing_access_is_forbidden() {
        let e = classify_response(Op::Fetch, 403, MISSING_ACCESS, "Missing Access");
        assert!(matches!(e, BabelError::Forbidden(_)));
    }

    #[test]
    fn test_server_error_is_generic() {
        let e = classify_response(Op::Fetch, 502, 0, "Bad Gateway");
        assert!(matches!(e, BabelError::Channel(_)));
        assert!(e.to_string().contains("502"));
    }
}
