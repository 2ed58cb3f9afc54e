use crate::application::errors::ValidationError;

/// Command asking for a message to be sent
///
/// Built by the API layer and consumed once by the send handler. The text is
/// checked here so nothing downstream has to re-validate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMessage {
    text: String,
}

impl SendMessage {
    pub fn new(text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::TextRequired);
        }
        Ok(Self { text })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_text() {
        assert_eq!(SendMessage::new(""), Err(ValidationError::TextRequired));
        assert_eq!(SendMessage::new("   "), Err(ValidationError::TextRequired));
    }

    #[test]
    fn keeps_text_verbatim() {
        let cmd = SendMessage::new(" 123 ").unwrap();
        assert_eq!(cmd.text(), " 123 ");
    }
}
