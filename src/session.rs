use std::io;

use thiserror::Error;

use crate::coordinates::trim_text;
use crate::markers::analyze;
use crate::regenerate::{RegenerateError, regenerate};

/// File extensions accepted for upload, compared case-insensitively.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["til", "txt"];

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("'{name}' is not a .til or .txt file")]
    UnsupportedFileType { name: String },

    #[error("could not read '{name}': {source}")]
    FileRead { name: String, source: io::Error },

    #[error("no file loaded; open a .til or .txt file first")]
    NoFileLoaded,

    #[error("enter at least one coordinate line (x,y,w,h)")]
    EmptyCoordinateInput,

    #[error(transparent)]
    MalformedCoordinateLine(#[from] RegenerateError),

    #[error("nothing to copy; update the coordinates first")]
    ClipboardUnavailable,
}

/// Whether `name` ends in one of [`SUPPORTED_EXTENSIONS`].
pub fn is_supported_file_name(name: &str) -> bool {
    name.rsplit_once('.').is_some_and(|(_, ext)| {
        SUPPORTED_EXTENSIONS
            .iter()
            .any(|supported| ext.eq_ignore_ascii_case(supported))
    })
}

/// The uploaded file, as text. Replaced wholesale on every load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawDocument {
    file_name: String,
    content: String,
}

impl RawDocument {
    /// Decode `bytes` as UTF-8, replacing invalid sequences and dropping a leading BOM.
    pub fn from_bytes(file_name: impl Into<String>, bytes: &[u8]) -> Self {
        let text = String::from_utf8_lossy(bytes);
        let content = text.strip_prefix('\u{feff}').unwrap_or(&text).to_owned();
        Self {
            file_name: file_name.into(),
            content,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// State for one editing session: the loaded file and the last generated text.
///
/// Failed operations never touch the state.
#[derive(Debug, Default)]
pub struct Session {
    document: Option<RawDocument>,
    region_count: usize,
    output: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the file called `name`, calling `read` for its bytes only once the file
    /// type has been accepted. Returns the number of region markers found.
    ///
    /// # Errors
    ///
    /// [`SessionError::UnsupportedFileType`] or [`SessionError::FileRead`].
    pub fn load(
        &mut self,
        name: &str,
        read: impl FnOnce() -> io::Result<Vec<u8>>,
    ) -> Result<usize, SessionError> {
        check_file_type(name)?;
        let bytes = read().map_err(|source| SessionError::FileRead {
            name: name.to_owned(),
            source,
        })?;
        Ok(self.install(RawDocument::from_bytes(name, &bytes)))
    }

    /// Like [`Self::load`] for bytes the host has already read.
    ///
    /// # Errors
    ///
    /// [`SessionError::UnsupportedFileType`].
    pub fn load_bytes(&mut self, name: &str, bytes: &[u8]) -> Result<usize, SessionError> {
        check_file_type(name)?;
        Ok(self.install(RawDocument::from_bytes(name, bytes)))
    }

    fn install(&mut self, document: RawDocument) -> usize {
        let count = analyze(document.content());
        log::info!(
            "loaded '{}' ({} bytes, {count} region markers)",
            document.file_name(),
            document.content().len()
        );
        self.document = Some(document);
        self.region_count = count;
        // The previous output was generated from another file.
        self.output = None;
        count
    }

    /// Regenerate the file text from `coordinate_text` and keep it as the current output.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoFileLoaded`], [`SessionError::EmptyCoordinateInput`] or
    /// [`SessionError::MalformedCoordinateLine`]; the previous output is kept.
    pub fn regenerate(&mut self, coordinate_text: &str) -> Result<&str, SessionError> {
        let document = self.document.as_ref().ok_or(SessionError::NoFileLoaded)?;
        if trim_text(coordinate_text).is_empty() {
            return Err(SessionError::EmptyCoordinateInput);
        }
        let text = regenerate(document.content(), coordinate_text)?;
        log::debug!("regenerated {} bytes for '{}'", text.len(), document.file_name());
        Ok(self.output.insert(text).as_str())
    }

    /// The text to put on the clipboard.
    ///
    /// # Errors
    ///
    /// [`SessionError::ClipboardUnavailable`] until something has been generated.
    pub fn clipboard_text(&self) -> Result<&str, SessionError> {
        self.output().ok_or(SessionError::ClipboardUnavailable)
    }

    pub fn document(&self) -> Option<&RawDocument> {
        self.document.as_ref()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.document.as_ref().map(RawDocument::file_name)
    }

    /// Region markers in the loaded file, `None` before the first load.
    pub fn region_count(&self) -> Option<usize> {
        self.document.as_ref().map(|_| self.region_count)
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }
}

fn check_file_type(name: &str) -> Result<(), SessionError> {
    if is_supported_file_name(name) {
        Ok(())
    } else {
        log::warn!("rejected upload '{name}': unsupported file type");
        Err(SessionError::UnsupportedFileType {
            name: name.to_owned(),
        })
    }
}
