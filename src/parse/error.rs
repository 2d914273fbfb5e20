use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An element or field the report layout relies on is absent.
    MarkupShape(String),
    TextNode(String),
    AddressParse(String),
}

impl Error {
    pub fn markup_shape_error(msg: &str) -> Self {
        Self::MarkupShape(msg.to_string())
    }
    pub fn text_node_error(msg: &str) -> Self {
        Self::TextNode(msg.to_string())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MarkupShape(msg) => write!(f, "Markup Shape Error: {msg}"),
            Self::TextNode(msg) => write!(f, "Text Node Error: {msg}"),
            Self::AddressParse(msg) => write!(f, "Address Parse Error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
