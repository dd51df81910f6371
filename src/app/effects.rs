use crate::app::{App, Message, Model, ToastLevel};
use crate::io::{FileError, display_name};

use super::model::PromptKind;

impl App {
    pub(super) fn handle_message_side_effects(&self, model: &mut Model, msg: &Message) {
        if matches!(msg, Message::PromptSubmit) {
            self.run_prompt(model);
        }
    }

    fn run_prompt(&self, model: &mut Model) {
        let Some(prompt) = model.prompt.take() else {
            return;
        };
        match prompt.kind {
            PromptKind::Open => match self.files.open(&prompt.input) {
                Ok(opened) => {
                    let name = opened.name.clone();
                    model.load_opened(opened);
                    model.show_toast(ToastLevel::Info, format!("Opened {name}"));
                }
                Err(err) => report_file_error(model, "open", &err),
            },
            PromptKind::Save => {
                model.commit_active();
                let content = model.document.to_markdown();
                match self.files.save(&content, &prompt.input) {
                    Ok(path) => {
                        let name = display_name(&path);
                        model.document.mark_clean();
                        model.file_path = Some(path);
                        model.show_toast(ToastLevel::Success, format!("File saved as {name}"));
                        model.file_name = name;
                    }
                    Err(err) => report_file_error(model, "save", &err),
                }
            }
        }
        model.relayout();
    }
}

/// Cancellation is silent; everything else becomes an error toast.
fn report_file_error(model: &mut Model, action: &str, err: &FileError) {
    if matches!(err, FileError::UserCancelled) {
        tracing::debug!(action, "file dialog cancelled");
        return;
    }
    tracing::warn!(action, error = %err, "file operation failed");
    model.show_toast(ToastLevel::Error, format!("Failed to {action} file: {err}"));
}
