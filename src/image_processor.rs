use std::{fs, io::Cursor, path::Path};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{ImageFormat, ImageReader};

use crate::{
    constants::FALLBACK_MIME_TYPE,
    error::{Error, Result},
};

/// A file picked for analysis, held entirely in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self::from_bytes(name, bytes))
    }

    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime_type = detect_mime_type(&name, &bytes);
        Self {
            name,
            mime_type,
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the file satisfies the picker's `image/*` hint.
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

/// Content sniffing wins over the extension; neither is trusted to reject the file.
fn detect_mime_type(name: &str, bytes: &[u8]) -> String {
    image::guess_format(bytes)
        .or_else(|_| ImageFormat::from_path(name))
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|_| FALLBACK_MIME_TYPE.to_string())
}

/// Local display handle for a selected file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub data_url: String,
    /// `None` when the bytes do not decode as an image header.
    pub dimensions: Option<(u32, u32)>,
}

impl Preview {
    pub fn from_file(file: &SelectedFile) -> Self {
        let data_url = format!("data:{};base64,{}", file.mime_type, STANDARD.encode(&file.bytes));
        let dimensions = ImageReader::new(Cursor::new(&file.bytes))
            .with_guessed_format()
            .ok()
            .and_then(|reader| reader.into_dimensions().ok());

        Self {
            data_url,
            dimensions,
        }
    }
}
