//! Prompt assembly for troubleshooting and shop chat.

use crate::diagnosis::IssueReport;
use crate::message::{ChatMessage, CompletionRequest};

/// System prompt for structured troubleshooting answers.
pub const TROUBLESHOOT_SYSTEM_PROMPT: &str = "You are an experienced computer repair technician \
helping customers of an IT repair shop troubleshoot their devices. \
Respond ONLY with a JSON object of the form \
{\"diagnosis\": string, \"confidence\": number from 0 to 100, \"steps\": [string], \
\"escalate\": boolean, \"estimatedTime\": string, \"difficulty\": \"easy\" | \"medium\" | \"hard\"}. \
Keep steps short and safe for a non-technical customer. \
Set escalate to true when the fix needs professional tools, opening the device, or data recovery.";

/// System prompt for the shop's chat widget.
pub const CHAT_SYSTEM_PROMPT: &str = "You are the friendly assistant of a local IT repair shop. \
Answer questions about repairs, pricing, opening hours (Mon-Fri 9:00-18:00, Sat 10:00-16:00, closed Sunday), \
booking appointments and tracking repairs. Keep answers under 120 words and suggest booking a \
diagnostic when a problem needs hands-on inspection.";

/// Temperature used for structured troubleshooting output.
pub const TROUBLESHOOT_TEMPERATURE: f32 = 0.3;

/// Temperature used for conversational replies.
pub const CHAT_TEMPERATURE: f32 = 0.7;

/// Build the completion request for a troubleshooting report.
pub fn troubleshoot_request(report: &IssueReport) -> CompletionRequest {
    let mut user = String::new();
    if let Some(device_type) = report.device_type.as_deref().filter(|s| !s.trim().is_empty()) {
        user.push_str(&format!("Device type: {}\n", device_type.trim()));
    }
    if let Some(model) = report.device_model.as_deref().filter(|s| !s.trim().is_empty()) {
        user.push_str(&format!("Device model: {}\n", model.trim()));
    }
    user.push_str(&format!("Problem: {}", report.description.trim()));

    CompletionRequest::new(vec![
        ChatMessage::system(TROUBLESHOOT_SYSTEM_PROMPT),
        ChatMessage::user(user),
    ])
    .temperature(TROUBLESHOOT_TEMPERATURE)
    .max_tokens(800)
}

/// Build the completion request for a chat message.
pub fn chat_request(text: &str) -> CompletionRequest {
    CompletionRequest::new(vec![
        ChatMessage::system(CHAT_SYSTEM_PROMPT),
        ChatMessage::user(text.trim()),
    ])
    .temperature(CHAT_TEMPERATURE)
    .max_tokens(400)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Role;

    #[test]
    fn test_troubleshoot_request_includes_device() {
        let report = IssueReport::new(" battery dies fast ").device("Laptop", "XPS 13");
        let request = troubleshoot_request(&report);

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, Role::System);
        assert_eq!(
            request.last_user_text(),
            Some("Device type: Laptop\nDevice model: XPS 13\nProblem: battery dies fast")
        );
        assert_eq!(request.temperature, Some(TROUBLESHOOT_TEMPERATURE));
    }

    #[test]
    fn test_troubleshoot_request_without_device() {
        let request = troubleshoot_request(&IssueReport::new("no sound"));
        assert_eq!(request.last_user_text(), Some("Problem: no sound"));
    }
}
