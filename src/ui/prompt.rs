//! Per-component confirmation
//!
//! Enter, "y" or an empty answer confirm; "n" declines. Other input is
//! rejected by the prompt and asked again.

use inquire::{Confirm, InquireError};

use crate::error::Result;

/// Asks whether one component should be installed
pub trait Confirmer {
    /// `installed` tells whether the component is already present locally
    fn confirm(&mut self, name: &str, installed: bool) -> Result<bool>;
}

/// Terminal confirmation using inquire
#[derive(Debug, Default)]
pub struct InquireConfirmer;

impl Confirmer for InquireConfirmer {
    fn confirm(&mut self, name: &str, installed: bool) -> Result<bool> {
        let question = if installed {
            format!("Overwrite {name} with the registry version?")
        } else {
            format!("Install {name}?")
        };

        match Confirm::new(&question)
            .with_default(true)
            .with_help_message("Press Enter to confirm, or 'n' to skip")
            .prompt()
        {
            Ok(answer) => Ok(answer),
            // Esc declines this component rather than ending the session
            Err(InquireError::OperationCanceled) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
