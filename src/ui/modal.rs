//! Dialog lifecycle shared by the create, edit and detail views.

/// Where a dialog is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    /// Not shown
    #[default]
    Closed,
    /// Shown and editable
    Open,
    /// Waiting for the API to answer a submit
    Submitting,
    /// The last submit failed; the message is shown and the dialog stays open.
    Error(String),
}

/// Inputs that move a dialog between states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalEvent {
    /// The dialog was opened
    OpenRequested,
    /// The dialog was dismissed
    CloseRequested,
    /// The submit button was pressed
    SubmitRequested,
    /// The API accepted the submit
    SubmitSucceeded,
    /// The API rejected the submit with this message
    SubmitFailed(String),
}

impl ModalState {
    /// Applies `event`. Events that make no sense in the current state leave it unchanged.
    #[must_use]
    pub fn transition(self, event: ModalEvent) -> Self {
        match (self, event) {
            (_, ModalEvent::CloseRequested) => Self::Closed,
            (Self::Closed, ModalEvent::OpenRequested) => Self::Open,
            (Self::Open | Self::Error(_), ModalEvent::SubmitRequested) => Self::Submitting,
            (Self::Submitting, ModalEvent::SubmitSucceeded) => Self::Closed,
            (Self::Submitting, ModalEvent::SubmitFailed(message)) => Self::Error(message),
            (state, _) => state,
        }
    }

    /// Whether the dialog is shown in any form.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Message of the last failed submit, if the dialog is showing one.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}
