//! Editor integration for composing entry content

use crate::error::{MjourError, Result};
use std::fs;
use std::path::Path;
use std::process::Command;

/// Session for editing text in an external editor
pub struct EditorSession {
    command: String,
}

impl EditorSession {
    /// Create a new editor session with the given command
    pub fn new(editor_command: String) -> Self {
        EditorSession {
            command: editor_command,
        }
    }

    /// Write `initial` to `draft_path`, wait for the editor to exit and return
    /// the edited text. The draft file is removed afterwards.
    pub fn edit(&self, draft_path: &Path, initial: &str) -> Result<String> {
        fs::write(draft_path, initial)?;

        let (program, mut args) = self.parse_command();
        args.push(draft_path.to_string_lossy().to_string());

        // On Windows, use cmd /c to ensure .bat and .cmd files are found
        #[cfg(windows)]
        let status = Command::new("cmd")
            .arg("/C")
            .arg(&program)
            .args(&args)
            .status();

        #[cfg(not(windows))]
        let status = Command::new(&program).args(&args).status();

        let failure = match status {
            Ok(status) if status.success() => None,
            Ok(status) => Some(format!("Editor '{}' exited with {}", program, status)),
            Err(e) => Some(format!("Failed to launch editor '{}': {}", program, e)),
        };
        if let Some(message) = failure {
            if let Err(e) = fs::remove_file(draft_path) {
                log::debug!("Could not remove draft {}: {}", draft_path.display(), e);
            }
            return Err(MjourError::Editor(message));
        }

        let content = fs::read_to_string(draft_path)?;
        fs::remove_file(draft_path)?;
        Ok(content)
    }

    /// Parse command into program and arguments
    fn parse_command(&self) -> (String, Vec<String>) {
        let parts: Vec<&str> = self.command.split_whitespace().collect();

        if parts.is_empty() {
            let fallback = if cfg!(windows) { "notepad" } else { "nano" };
            return (fallback.to_string(), vec![]);
        }

        let program = parts[0].to_string();
        let args = parts[1..].iter().map(|s| s.to_string()).collect();

        (program, args)
    }
}
