//! Setup errors
//!
//! Only mounting can fail. Once the loop runs, drawing and audio swallow
//! their own failures.

pub type HeaderResult<T> = Result<T, HeaderError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HeaderError {
    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("canvas element #{0} not found")]
    CanvasNotFound(String),

    #[error("element #{0} is not a canvas")]
    NotACanvas(String),

    #[error("canvas has no 2d rendering context")]
    NoContext2d,

    #[error("javascript error: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for HeaderError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_missing_piece() {
        assert_eq!(
            HeaderError::CanvasNotFound("pixel-header".into()).to_string(),
            "canvas element #pixel-header not found"
        );
        assert!(HeaderError::NoContext2d.to_string().contains("2d"));
        assert!(HeaderError::Js("boom".into()).to_string().starts_with("javascript error:"));
    }
}
