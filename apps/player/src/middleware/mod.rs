pub mod cors;
pub mod error_guard;
pub mod structured_logger;

pub use cors::PermissiveCors;
pub use error_guard::ErrorGuard;
pub use structured_logger::StructuredLogger;
