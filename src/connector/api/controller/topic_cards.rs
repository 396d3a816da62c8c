use indicatif::{ProgressBar, ProgressStyle};

use crate::application::TopicSession;
use crate::domain::ThesisTopic;

pub const TOPICS_HEADER: &str = "موضوعات پیشنهادی:";
pub const EMPTY_TOPICS_MESSAGE: &str =
    "هیچ موضوعی یافت نشد! لطفاً با کلیدواژه‌های متفاوت دوباره تلاش کنید.";
pub const CREDENTIAL_PROMPT: &str = "کلید API نیاز است!\n\
برای استفاده از این برنامه، یک کلید API گوگل جیمینی نیاز است.\n\
برای اطلاعات بیشتر در مورد صورت‌حساب: https://ai.google.dev/gemini-api/docs/billing";

const KEYWORDS_LABEL: &str = "کلمات کلیدی:";
const QUESTIONS_LABEL: &str = "پرسش‌های تحقیقاتی احتمالی:";
const ERROR_LABEL: &str = "خطا:";

pub fn format_topic(topic: &ThesisTopic) -> String {
    let mut out = format!("{}\n{}\n", topic.title(), topic.description());

    if !topic.keywords().is_empty() {
        out.push_str(&format!("{} {}\n", KEYWORDS_LABEL, topic.keywords().join(" · ")));
    }

    if let Some(questions) = topic.potential_research_questions().filter(|q| !q.is_empty()) {
        out.push_str(QUESTIONS_LABEL);
        out.push('\n');
        for question in questions {
            out.push_str(&format!("  • {}\n", question));
        }
    }

    out
}

pub fn format_topics(topics: &[ThesisTopic]) -> String {
    if topics.is_empty() {
        return EMPTY_TOPICS_MESSAGE.to_string();
    }

    let mut out = format!("{TOPICS_HEADER}\n\n");
    for (i, topic) in topics.iter().enumerate() {
        out.push_str(&format!("{}. ", i + 1));
        out.push_str(&format_topic(topic));
        out.push('\n');
    }
    out
}

/// Renders what the page would show for the session's current state.
pub fn format_session(session: &TopicSession) -> String {
    let mut out = String::new();

    if let Some(error) = session.error() {
        out.push_str(&format!("{ERROR_LABEL} {error}\n"));
    }

    match session.topics() {
        Some(topics) if !topics.is_empty() => out.push_str(&format_topics(topics)),
        Some(_) if !session.credential_prompt_visible() => {
            out.push_str(EMPTY_TOPICS_MESSAGE);
            out.push('\n');
        }
        _ => {}
    }

    out
}

pub fn spinner(message: &'static str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message);
    bar.enable_steady_tick(std::time::Duration::from_millis(100));
    bar
}
