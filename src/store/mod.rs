pub mod repository;
pub mod storage;
pub mod types;

pub use repository::{FileStore, MemoryStore, ProfileRepository, SessionRepository};
pub use storage::{get_state_path, load_state, save_state};
pub use types::{AuthSession, StoredState};
