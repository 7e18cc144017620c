use crate::prelude::{eprintln, *};
use architect_core::i18n::{I18n, MessageKey};
use colored::Colorize;

#[cfg(feature = "clipboard-support")]
pub fn copy_to_clipboard(content: &str) -> Result<(), Error> {
    use ::clipboard::{ClipboardContext, ClipboardProvider};

    let mut ctx: ClipboardContext =
        ClipboardProvider::new().map_err(|e| Error::Clipboard(e.to_string()))?;

    ctx.set_contents(content.to_owned())
        .map_err(|e| Error::Clipboard(e.to_string()))?;

    log::info!("Copied {} bytes to clipboard", content.len());
    Ok(())
}

#[cfg(not(feature = "clipboard-support"))]
pub fn copy_to_clipboard(_content: &str) -> Result<(), Error> {
    Err(Error::Clipboard(
        "built without clipboard support".to_string(),
    ))
}

/// Copy and report the outcome. Failures never abort the caller.
pub fn copy_best_effort(content: &str, i18n: I18n) -> bool {
    match copy_to_clipboard(content) {
        Ok(()) => {
            eprintln!("{}", i18n.t(MessageKey::Copied).green());
            true
        }
        Err(e) => {
            log::warn!("Failed to copy text: {e}");
            eprintln!("{}", i18n.t(MessageKey::CopyFail).red());
            false
        }
    }
}
