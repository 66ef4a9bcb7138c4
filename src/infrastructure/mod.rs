pub mod export;
pub mod http;
pub mod persistence;
pub mod rendering;
pub mod services;

pub use http::HttpCoordinateSource;
pub use persistence::{MemoryStateStore, UrlStateStore};
pub use rendering::{RecordingSurface, SvgDomSurface};
pub use services::{BrowserTimeProvider, ConsoleLogger};
