pub mod coordinator;
pub mod selection;
pub mod use_cases;
pub mod viewport;

pub use coordinator::*;
pub use selection::*;
pub use use_cases::*;
pub use viewport::*;
