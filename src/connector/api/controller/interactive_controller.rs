use std::io::Write;

use anyhow::Result;

use crate::application::TopicSession;

use super::super::Container;
use super::topic_cards::{format_session, spinner, CREDENTIAL_PROMPT};

const BANNER: &str = "پیشنهاد موضوع پایان‌نامه با هوش مصنوعی\n\
کلیدواژه‌های خود را با کاما از هم جدا کنید. برای خروج :quit را وارد کنید.";
const KEYWORDS_PROMPT: &str = "کلیدواژه‌ها> ";
const SELECT_KEY_PROMPT: &str = "[Enter] انتخاب کلید API، یا :quit> ";

fn is_quit(line: &str) -> bool {
    matches!(line.trim(), ":quit" | ":q" | "exit")
}

pub struct InteractiveController<'a> {
    container: &'a Container,
}

impl<'a> InteractiveController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn run(&self) -> Result<String> {
        let mut stdout = std::io::stdout();
        self.run_with(&mut stdout, true).await
    }

    /// Reads from the container's input until `:quit` or end of input, writing
    /// each rendered state to `out`.
    pub async fn run_with<W: Write>(&self, out: &mut W, show_progress: bool) -> Result<String> {
        let mut session = self.container.interactive_session();
        let input = self.container.input();
        let mut submissions = 0usize;

        writeln!(out, "{BANNER}\n")?;

        loop {
            if session.credential_prompt_visible() {
                writeln!(out, "{CREDENTIAL_PROMPT}")?;
                let Some(line) = input.read_line(SELECT_KEY_PROMPT).await? else {
                    break;
                };
                if is_quit(&line) {
                    break;
                }
                session.reselect_credential().await;
                Self::render(out, &session)?;
                continue;
            }

            let Some(line) = input.read_line(KEYWORDS_PROMPT).await? else {
                break;
            };
            if is_quit(&line) {
                break;
            }

            let progress = show_progress.then(|| spinner("در حال پردازش..."));
            session.submit(line).await;
            if let Some(progress) = progress {
                progress.finish_and_clear();
            }
            submissions += 1;

            Self::render(out, &session)?;
        }

        Ok(format!("Session ended after {submissions} submission(s)."))
    }

    fn render<W: Write>(out: &mut W, session: &TopicSession) -> Result<()> {
        let rendered = format_session(session);
        if !rendered.is_empty() {
            writeln!(out, "{rendered}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_commands() {
        assert!(is_quit(":quit"));
        assert!(is_quit("  :q "));
        assert!(is_quit("exit"));
        assert!(!is_quit("exit strategies in startups"));
    }
}
