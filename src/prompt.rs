// Prompt layer: the rest of the crate only talks to `Prompter`, so the
// flow can run against scripted answers in tests. `DialoguerPrompter` is
// the terminal implementation used by the binary.

use crate::error::{ImageError, Result};
use dialoguer::{Input, Select};

/// Checks a free-text answer; `Err` carries the message shown before re-asking.
pub type Validator<'a> = &'a dyn Fn(&str) -> std::result::Result<(), String>;

pub trait Prompter {
    /// Ask for one line of text. Invalid answers are re-prompted, never returned.
    fn input(&self, prompt: &str, default: Option<&str>, validate: Validator<'_>) -> Result<String>;

    /// Ask the user to pick one of `items`; returns the chosen index.
    fn select(&self, prompt: &str, items: &[String]) -> Result<usize>;
}

/// Keyboard-driven prompts on the current terminal.
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn input(&self, prompt: &str, default: Option<&str>, validate: Validator<'_>) -> Result<String> {
        let mut input = Input::<String>::new();
        input
            .with_prompt(prompt)
            .validate_with(|answer: &String| validate(answer.trim()));
        if let Some(default) = default {
            input.default(default.to_string());
        }
        let answer = input.interact_text().map_err(ImageError::Prompt)?;
        Ok(answer.trim().to_string())
    }

    fn select(&self, prompt: &str, items: &[String]) -> Result<usize> {
        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()
            .map_err(ImageError::Prompt)
    }
}
