/// Failure while moving a store to or from text.
///
/// Leniency toward foreign content is handled before this layer;
/// anything that reaches a variant here means the operation as a whole
/// did not finish.
#[derive(Debug)]
pub enum SerdeError {
    /// The XML input is not structurally well formed
    Xml(quick_xml::Error),

    /// The JSON encoder rejected the exported value
    Json(serde_json::Error),

    /// The underlying reader or writer failed
    Io(std::io::Error),

    /// A condition with no better variant, described in the message
    Custom(String),
}

impl std::fmt::Display for SerdeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SerdeError::Xml(e) => write!(f, "XML error: {}", e),
            SerdeError::Json(e) => write!(f, "JSON error: {}", e),
            SerdeError::Io(e) => write!(f, "IO error: {}", e),
            SerdeError::Custom(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for SerdeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SerdeError::Xml(e) => Some(e),
            SerdeError::Json(e) => Some(e),
            SerdeError::Io(e) => Some(e),
            SerdeError::Custom(_) => None,
        }
    }
}

impl From<quick_xml::Error> for SerdeError {
    fn from(err: quick_xml::Error) -> Self {
        SerdeError::Xml(err)
    }
}

impl From<serde_json::Error> for SerdeError {
    fn from(err: serde_json::Error) -> Self {
        SerdeError::Json(err)
    }
}

impl From<std::io::Error> for SerdeError {
    fn from(err: std::io::Error) -> Self {
        SerdeError::Io(err)
    }
}

impl From<String> for SerdeError {
    fn from(msg: String) -> Self {
        SerdeError::Custom(msg)
    }
}

impl From<&str> for SerdeError {
    fn from(msg: &str) -> Self {
        SerdeError::Custom(msg.to_string())
    }
}

/// Shorthand for results carrying a [`SerdeError`].
pub type Result<T> = std::result::Result<T, SerdeError>;
