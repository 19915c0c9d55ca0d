use std::fmt;

/// Which of the session's elements an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Container,
    Content,
    Target,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Container => "container",
            Self::Content => "content",
            Self::Target => "target",
        })
    }
}

/// Error returned by session resolution, repositioning and configuration.
///
/// None of these reach the end user: the orchestrator logs them with
/// `tracing::warn!` and treats the triggering event as a no-op.
#[derive(Debug, thiserror::Error)]
pub enum ViewportError {
    /// No element with this id exists in the document.
    #[error("{role} element `{id}` not found")]
    MissingElement { role: Role, id: String },
    /// The element was resolved once but has since left the document.
    #[error("{role} element is no longer attached to the document")]
    Detached { role: Role },
    /// The centering target is not a descendant of the content element.
    #[error("centering target `{id}` is not a descendant of the content element")]
    InvalidTarget { id: String },
    /// Configuration JSON could not be parsed.
    #[error("invalid viewport config: {0}")]
    InvalidConfig(#[from] serde_json::Error),
    /// The session was invalidated by teardown.
    #[error("viewport session has been torn down")]
    TornDown,
    /// A DOM call failed while wiring the viewport into the page.
    #[error("browser api call failed: {0}")]
    Browser(String),
}
