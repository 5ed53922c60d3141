//! Deterministic offline assistant.
//!
//! Fallback responder used when no hosted assistant is wired in. Answers
//! a handful of common questions about the platform from a keyword table;
//! everything else gets a generic pointer to the FAQ.

use facrev_core::traits::IAssistant;

#[derive(Default)]
pub struct OfflineAssistant;

impl OfflineAssistant {
    pub fn new() -> Self {
        Self
    }
}

const RESPONSES: &[(&[&str], &str)] = &[
    (
        &["review", "rate", "rating"],
        "Open a faculty profile and use the review form. Your review stays pending until an admin approves it, and you can have one pending review per faculty member at a time.",
    ),
    (
        &["suggest", "missing", "add faculty"],
        "If a faculty member is missing from the directory, submit a suggestion with their name and department. An admin will review it and add the listing if approved.",
    ),
    (
        &["paper", "question paper", "exam"],
        "You can upload scanned question papers with the course name and slot. Uploads are reviewed before they appear to other students.",
    ),
    (
        &["register", "sign up", "account"],
        "Registration needs your institute email address. After registering you can sign in from the student portal.",
    ),
    (
        &["logout", "sign out"],
        "Use the logout button in the header. If an admin has approved a pending logout request, your session ends on the next page load.",
    ),
];

const FALLBACK: &str =
    "I can help with reviews, faculty suggestions, question papers, and account questions. \
     For anything else, check the FAQ page.";

impl IAssistant for OfflineAssistant {
    fn reply(&self, message: &str) -> Option<String> {
        let needle = message.to_lowercase();
        for (keywords, response) in RESPONSES {
            if keywords.iter().any(|k| needle.contains(k)) {
                return Some((*response).to_string());
            }
        }
        Some(FALLBACK.to_string())
    }
}
