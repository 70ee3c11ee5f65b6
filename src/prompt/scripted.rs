use std::collections::VecDeque;
use crate::prompt::{InputError, LineSource};

/// Feeds canned answers to the validator in tests
pub(crate) struct ScriptedInput {
    lines: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedInput {
    pub(crate) fn new(lines: &[&str]) -> ScriptedInput {
        ScriptedInput {
            lines: lines.iter().map(|s| s.to_string()).collect(),
            prompts: vec![],
        }
    }

    pub(crate) fn prompts_shown(&self) -> usize {
        self.prompts.len()
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, InputError> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front())
    }
}
