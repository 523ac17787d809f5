//! Unexpected faults during augmentation

/// Inconsistent host data met while augmenting a result
///
/// Never used for "no table here"; that is `None`.
#[derive(Debug, thiserror::Error)]
pub enum AugmentError {
    #[error("span [{start}, {end}) does not fit {file_name} ({len} bytes)")]
    InvalidSpan {
        file_name: String,
        start: usize,
        end: usize,
        len: usize,
    },

    #[error("source file not in program: {0}")]
    MissingSourceFile(String),

    #[error("panic during augmentation: {0}")]
    Panicked(String),
}

impl AugmentError {
    /// Convert a caught panic payload
    pub fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        Self::Panicked(message)
    }
}

pub type Result<T> = std::result::Result<T, AugmentError>;

/// Slice `[start, end)` out of a file's text
pub(crate) fn slice<'a>(file_name: &str, text: &'a str, start: usize, end: usize) -> Result<&'a str> {
    text.get(start..end).ok_or_else(|| AugmentError::InvalidSpan {
        file_name: file_name.to_string(),
        start,
        end,
        len: text.len(),
    })
}
