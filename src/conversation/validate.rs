use std::fmt;

use crate::chat::Message;

/// A break in the call/result pairing of a message sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairingIssue {
    /// A tool message whose id matches no call of the assistant message
    /// directly before it.
    UnmatchedResult { index: usize, tool_call_id: String },
    /// A call that never received a tool message.
    UnansweredCall { index: usize, tool_call_id: String },
}

impl fmt::Display for PairingIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PairingIssue::UnmatchedResult {
                index,
                tool_call_id,
            } => write!(
                f,
                "message {index}: tool result '{tool_call_id}' answers no preceding call"
            ),
            PairingIssue::UnansweredCall {
                index,
                tool_call_id,
            } => write!(
                f,
                "message {index}: tool call '{tool_call_id}' has no result"
            ),
        }
    }
}

/// Check that every tool message answers a call of the nearest preceding
/// assistant message, with only tool messages in between.
pub fn validate_tool_pairing(messages: &[Message]) -> Vec<PairingIssue> {
    let mut issues = Vec::new();
    // (index of the assistant message, ids still waiting for a result)
    let mut open: Option<(usize, Vec<String>)> = None;

    for (index, message) in messages.iter().enumerate() {
        match message {
            Message::Tool { tool_call_id, .. } => {
                let answered = open.as_mut().and_then(|(_, pending)| {
                    let pos = pending.iter().position(|id| id == tool_call_id)?;
                    Some(pending.remove(pos))
                });
                if answered.is_none() {
                    issues.push(PairingIssue::UnmatchedResult {
                        index,
                        tool_call_id: tool_call_id.clone(),
                    });
                }
            }
            other => {
                close_group(open.take(), &mut issues);
                let calls = other.tool_calls();
                if !calls.is_empty() {
                    open = Some((index, calls.iter().map(|c| c.id.clone()).collect()));
                }
            }
        }
    }
    close_group(open, &mut issues);

    issues
}

fn close_group(group: Option<(usize, Vec<String>)>, issues: &mut Vec<PairingIssue>) {
    if let Some((index, pending)) = group {
        issues.extend(
            pending
                .into_iter()
                .map(|tool_call_id| PairingIssue::UnansweredCall {
                    index,
                    tool_call_id,
                }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ToolCallRequest;

    fn call(id: &str) -> ToolCallRequest {
        ToolCallRequest::new(id, "list_directory", Default::default())
    }

    #[test]
    fn well_formed_cycle_has_no_issues() {
        let messages = vec![
            Message::system("s"),
            Message::user("u"),
            Message::assistant_tool_calls(None, vec![call("a"), call("b")]),
            Message::tool_result("a", "1"),
            Message::tool_result("b", "2"),
            Message::assistant("done"),
        ];
        assert!(validate_tool_pairing(&messages).is_empty());
    }

    #[test]
    fn result_after_user_message_is_unmatched() {
        let messages = vec![
            Message::system("s"),
            Message::assistant_tool_calls(None, vec![call("a")]),
            Message::tool_result("a", "1"),
            Message::user("u"),
            Message::tool_result("a", "again"),
        ];
        assert_eq!(
            validate_tool_pairing(&messages),
            vec![PairingIssue::UnmatchedResult {
                index: 4,
                tool_call_id: "a".to_string()
            }]
        );
    }

    #[test]
    fn interrupted_dispatch_leaves_unanswered_calls() {
        let messages = vec![
            Message::system("s"),
            Message::user("u"),
            Message::assistant_tool_calls(None, vec![call("a"), call("b")]),
            Message::tool_result("a", "1"),
        ];
        let issues = validate_tool_pairing(&messages);
        assert_eq!(
            issues,
            vec![PairingIssue::UnansweredCall {
                index: 2,
                tool_call_id: "b".to_string()
            }]
        );
        assert_eq!(issues[0].to_string(), "message 2: tool call 'b' has no result");
    }

    #[test]
    fn mismatched_id_reports_both_sides() {
        let messages = vec![
            Message::assistant_tool_calls(None, vec![call("a")]),
            Message::tool_result("z", "1"),
        ];
        assert_eq!(validate_tool_pairing(&messages).len(), 2);
    }
}
