pub mod error;
pub mod page;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use router::{app_router, AppState};
pub use server::{start_server, ApiServer};
