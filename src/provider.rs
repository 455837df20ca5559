/*!
 * Sources for the project root path
 */

use std::path::PathBuf;

use dialoguer::Input;

use crate::error::Result;

/// Yields the directory to process, or `None` when the user cancelled
pub trait PathProvider {
    /// Obtain the root path
    fn provide(&self) -> Result<Option<PathBuf>>;
}

/// Root path passed on the command line
#[derive(Debug, Clone)]
pub struct ArgPathProvider {
    path: Option<String>,
}

impl ArgPathProvider {
    /// Wrap a possibly missing command-line value
    pub fn new(path: Option<String>) -> Self {
        Self { path }
    }
}

impl PathProvider for ArgPathProvider {
    fn provide(&self) -> Result<Option<PathBuf>> {
        Ok(self
            .path
            .as_deref()
            .filter(|path| !path.is_empty())
            .map(PathBuf::from))
    }
}

/// Asks for the root path on the terminal; an empty answer cancels
#[derive(Debug, Clone)]
pub struct PromptPathProvider {
    prompt: String,
}

impl Default for PromptPathProvider {
    fn default() -> Self {
        Self {
            prompt: "Select project folder".to_string(),
        }
    }
}

impl PathProvider for PromptPathProvider {
    fn provide(&self) -> Result<Option<PathBuf>> {
        let answer: String = Input::new()
            .with_prompt(&self.prompt)
            .allow_empty(true)
            .interact_text()?;

        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(None);
        }
        Ok(Some(PathBuf::from(answer)))
    }
}
