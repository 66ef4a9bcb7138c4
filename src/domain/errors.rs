use derive_more::Display;
use wasm_bindgen::JsValue;

/// Everything that can go wrong in the dotplot. None of it is fatal: callers
/// log and keep the previous view.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum DotplotError {
    #[display(fmt = "Invalid range: {}", _0)]
    InvalidRange(f64),
    #[display(fmt = "Invalid tick options: {}", _0)]
    InvalidTickOptions(String),
    #[display(fmt = "Degenerate viewBox: {}", _0)]
    DegenerateViewBox(String),
    #[display(fmt = "Render surface unavailable: {}", _0)]
    SurfaceUnavailable(String),
    #[display(fmt = "Network Error: {}", _0)]
    Network(String),
    #[display(fmt = "Browser API Error: {}", _0)]
    Browser(String),
    #[display(fmt = "No data: {}", _0)]
    NoData(String),
}

impl std::error::Error for DotplotError {}

impl From<JsValue> for DotplotError {
    fn from(value: JsValue) -> Self {
        DotplotError::Browser(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<DotplotError> for JsValue {
    fn from(error: DotplotError) -> Self {
        JsValue::from_str(&error.to_string())
    }
}

pub type DotplotResult<T> = Result<T, DotplotError>;
