pub mod auth_usecase;
pub mod bootstrap;
pub mod library;
pub mod session_context;

pub use auth_usecase::AuthUseCase;
pub use bootstrap::AppContext;
pub use library::Library;
pub use session_context::SessionContext;
