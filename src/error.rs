use miette::Diagnostic;
use thiserror::Error;

/// Main error type for map loading.
///
/// Every variant is fatal: a load either produces a complete object graph
/// or one of these.
#[derive(Error, Diagnostic, Debug)]
pub enum TmxError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(tmx::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Resource not found: {path}")]
    #[diagnostic(
        code(tmx::not_found),
        help("relative sources resolve against the directory of the referencing file")
    )]
    ResourceNotFound { path: std::path::PathBuf },

    #[error("XML error: {message}")]
    #[diagnostic(code(tmx::xml))]
    Xml { message: String },

    #[error("Format error: {message}")]
    #[diagnostic(code(tmx::format))]
    Format {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("<{element}> is missing required attribute '{attribute}'")]
    #[diagnostic(code(tmx::missing_attribute))]
    MissingAttribute {
        element: String,
        attribute: String,
    },

    #[error("<{element}> has invalid value '{value}' for attribute '{attribute}'")]
    #[diagnostic(code(tmx::invalid_attribute))]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
    },
}

impl TmxError {
    /// Shorthand for a format error without help text.
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
            help: None,
        }
    }

    /// True for errors caused by malformed document content.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::Format { .. } | Self::InvalidAttribute { .. } | Self::Xml { .. }
        )
    }
}

impl From<quick_xml::Error> for TmxError {
    fn from(e: quick_xml::Error) -> Self {
        Self::Xml {
            message: e.to_string(),
        }
    }
}

impl From<quick_xml::events::attributes::AttrError> for TmxError {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        Self::Xml {
            message: e.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TmxError>;
