//! Rustyline helper: completes command words and page ids.

use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use studypulse_core::PageId;

use crate::command::COMMAND_WORDS;

#[derive(Clone)]
pub struct ShellHelper {
    commands: Vec<String>,
    pages: Vec<String>,
}

impl ShellHelper {
    pub fn new() -> Self {
        Self {
            commands: COMMAND_WORDS.iter().map(|c| c.to_string()).collect(),
            pages: PageId::MENU.iter().map(|p| p.as_str().to_string()).collect(),
        }
    }

    fn candidates(&self, line: &str) -> (usize, Vec<&String>) {
        match line.split_once(' ') {
            None => (0, self.commands.iter().filter(|c| c.starts_with(line)).collect()),
            Some((word, arg)) if matches!(word, "menu" | "go") && !arg.contains(' ') => (
                word.len() + 1,
                self.pages.iter().filter(|p| p.starts_with(arg)).collect(),
            ),
            Some(_) => (0, Vec::new()),
        }
    }
}

impl Helper for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, matches) = self.candidates(&line[..pos]);
        let pairs = matches
            .into_iter()
            .map(|m| Pair {
                display: m.clone(),
                replacement: m.clone(),
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Highlighter for ShellHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let word = line.split_whitespace().next().unwrap_or_default();
        if self.commands.iter().any(|c| c == word) {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ShellHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let typed = &line[..pos];
        let (start, matches) = self.candidates(typed);
        let partial = &typed[start..];
        if partial.is_empty() {
            return None;
        }
        matches
            .into_iter()
            .find(|m| m.len() > partial.len())
            .map(|m| m[partial.len()..].to_string())
    }
}

impl Validator for ShellHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_for_command_word() {
        let helper = ShellHelper::new();
        let (start, matches) = helper.candidates("lo");
        assert_eq!(start, 0);
        assert_eq!(matches, vec!["login", "logout"]);
    }

    #[test]
    fn test_candidates_for_page_argument() {
        let helper = ShellHelper::new();
        let (start, matches) = helper.candidates("menu stu");
        assert_eq!(start, 5);
        assert_eq!(matches, vec!["study", "study-room"]);

        let (_, matches) = helper.candidates("accept 1");
        assert!(matches.is_empty());
    }
}
