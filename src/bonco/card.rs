use crate::hangul::{card_label, choseong, Labeled};

/// One flashcard: the image to show and the answer behind it.
///
/// Generated image lists rename the pictures to `001.jpg`, `002.jpg`, ... and keep
/// the real name only as a label, so the answer is the label when there is one and
/// the file name otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub path: String,
    pub label: Option<String>,
}

impl Card {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: None,
        }
    }

    pub fn labeled(path: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: Some(label.into()),
        }
    }

    pub fn answer(&self) -> &str {
        match self.label.as_deref() {
            Some(label) if !label.trim().is_empty() => label,
            _ => card_label(&self.path),
        }
    }

    /// Bucket of the card's answer.
    pub fn choseong(&self) -> Option<char> {
        choseong(self.answer())
    }
}

impl From<String> for Card {
    fn from(path: String) -> Self {
        Card::new(path)
    }
}

impl From<&str> for Card {
    fn from(path: &str) -> Self {
        Card::new(path)
    }
}

impl Labeled for Card {
    fn label(&self) -> &str {
        self.answer()
    }
}
