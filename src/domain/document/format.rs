/// Document container formats accepted for conversion.
///
/// Classification happens once, from the content type the upload declares;
/// everything downstream dispatches on this enum so an added format that is
/// not wired into the extractor fails to compile instead of silently
/// falling through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Txt,
    Docx,
    Epub,
}

pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

impl DocumentFormat {
    /// Classify a declared content type. `None` means the upload is of an
    /// unsupported type and no extraction should be attempted.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type {
            "application/pdf" => Some(DocumentFormat::Pdf),
            "text/plain" => Some(DocumentFormat::Txt),
            DOCX_CONTENT_TYPE => Some(DocumentFormat::Docx),
            "application/epub+zip" => Some(DocumentFormat::Epub),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Txt => "txt",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Epub => "epub",
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
