use post_image::prompt::{Prompter, Validator};
use post_image::Result;
use std::cell::RefCell;
use std::collections::VecDeque;

/// Answers prompts from a script. Answers rejected by the validator are
/// recorded and the next one is tried, like a user retyping.
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<String>>,
    selection: usize,
    pub prompts: RefCell<Vec<String>>,
    pub rejected: RefCell<Vec<String>>,
    pub choices: RefCell<Vec<Vec<String>>>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str], selection: usize) -> Self {
        ScriptedPrompter {
            answers: RefCell::new(answers.iter().map(|a| a.to_string()).collect()),
            selection,
            prompts: RefCell::new(Vec::new()),
            rejected: RefCell::new(Vec::new()),
            choices: RefCell::new(Vec::new()),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&self, prompt: &str, default: Option<&str>, validate: Validator<'_>) -> Result<String> {
        self.prompts.borrow_mut().push(prompt.to_string());
        loop {
            let answer = self
                .answers
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| panic!("no scripted answer left for '{prompt}'"));
            let answer = match default {
                Some(d) if answer.is_empty() => d.to_string(),
                _ => answer,
            };
            match validate(&answer) {
                Ok(()) => return Ok(answer),
                Err(_) => self.rejected.borrow_mut().push(answer),
            }
        }
    }

    fn select(&self, prompt: &str, items: &[String]) -> Result<usize> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.choices.borrow_mut().push(items.to_vec());
        Ok(self.selection)
    }
}
