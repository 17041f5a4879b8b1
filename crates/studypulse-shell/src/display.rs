//! Terminal rendering of the application state.

use colored::Colorize;
use studypulse_application::{AppState, ViewState};
use studypulse_core::{Notification, PageId, Severity};

pub fn print_notifications(notifications: &[Notification]) {
    for n in notifications {
        let line = format!("[{}] {}", n.severity.icon(), n.message);
        let line = match n.severity {
            Severity::Success => line.bright_green(),
            Severity::Error => line.bright_red(),
            Severity::Warning => line.yellow(),
            Severity::Info => line.bright_blue(),
        };
        println!("{}", line);
    }
}

pub fn print_state(state: &AppState) {
    match state.view {
        ViewState::Landing => {
            println!("{}", "=== StudyPulse ===".bright_magenta().bold());
            println!(
                "{}",
                "Log in with 'login <username> <password>' or create an account with 'register'."
                    .bright_black()
            );
        }
        ViewState::Shell => {
            print_sidebar(state);
            println!();
            println!("{}", format!("## {}", state.content.title).bold());
            for line in html_to_text(&state.content.html).lines() {
                println!("  {}", line);
            }
        }
    }
}

fn print_sidebar(state: &AppState) {
    if let Some(badge) = &state.badge {
        println!(
            "{} {}",
            format!("({})", badge.initial).bright_magenta(),
            badge.display_name.bold()
        );
    }

    let show_admin = state.badge.as_ref().is_some_and(|b| b.show_admin_menu);
    let entries: Vec<String> = PageId::MENU
        .iter()
        .filter(|page| **page != PageId::Admin || show_admin)
        .map(|page| {
            if *page == state.navigation.current_menu_selection {
                format!("[{}]", page.as_str()).bright_cyan().to_string()
            } else {
                page.as_str().bright_black().to_string()
            }
        })
        .collect();
    println!("{}", entries.join(" "));
}

/// Plain-text view of a rendered page: tags dropped, one line per text run,
/// entity escapes undone.
pub fn html_to_text(html: &str) -> String {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => {
                in_tag = true;
                flush(&mut current, &mut lines);
            }
            '>' if in_tag => in_tag = false,
            _ if in_tag => {}
            _ => current.push(c),
        }
    }
    flush(&mut current, &mut lines);
    lines.join("\n")
}

fn flush(current: &mut String, lines: &mut Vec<String>) {
    let text = current.split_whitespace().collect::<Vec<_>>().join(" ");
    if !text.is_empty() {
        lines.push(unescape(&text));
    }
    current.clear();
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#x2f;", "/")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_to_text_keeps_text_runs() {
        let html = r#"<div class="stat-card">
            <h3 id="friends-count">2</h3>
            <p>好友數量</p>
        </div>"#;
        assert_eq!(html_to_text(html), "2\n好友數量");
    }

    #[test]
    fn test_html_to_text_unescapes_entities() {
        assert_eq!(
            html_to_text("<h2>Amy &lt;b&gt; &amp; co</h2><p>a&#x2f;b</p>"),
            "Amy <b> & co\na/b"
        );
    }
}
