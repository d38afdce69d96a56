//! Command implementations.

pub mod ingest;
pub mod serve;
pub mod show;

pub use self::ingest::execute_ingest;
pub use self::serve::execute_serve;
pub use self::show::execute_show;
