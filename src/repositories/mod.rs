// Storage interfaces the services and routes depend on

pub mod memory;

pub use memory::InMemoryStore;

use thiserror::Error;

use crate::models::{ConversationMessage, PersonaKind, UserAccount};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Username already exists")]
    UsernameTaken,
    #[error("Email already exists")]
    EmailTaken,
    #[error("User not found: {0}")]
    NotFound(String),
    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// Records whose id is assigned by the store on append.
pub trait Sequenced: Clone + Send + Sync + 'static {
    fn assign_id(&mut self, id: u64);
}

#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send + Sync {
    fn get(&self, username: &str) -> Result<Option<UserAccount>, RepositoryError>;
    fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, RepositoryError>;
    /// Fails when the username or email is already registered.
    fn insert(&self, account: UserAccount) -> Result<(), RepositoryError>;
    fn update(&self, account: UserAccount) -> Result<(), RepositoryError>;
}

/// Append-only, per-user record sequence.
pub trait RecordRepository<T: Sequenced>: Send + Sync {
    fn list(&self, username: &str) -> Result<Vec<T>, RepositoryError>;
    /// Stores `record` under the next id and returns the stored copy.
    fn append(&self, username: &str, record: T) -> Result<T, RepositoryError>;
    fn next_id(&self, username: &str) -> Result<u64, RepositoryError>;
}

pub trait ConversationRepository: Send + Sync {
    fn list(
        &self,
        username: &str,
        persona: PersonaKind,
    ) -> Result<Vec<ConversationMessage>, RepositoryError>;
    /// Appends the user's message and the reply as adjacent entries and
    /// returns both stored copies.
    fn append_exchange(
        &self,
        username: &str,
        persona: PersonaKind,
        user_message: String,
        reply: String,
    ) -> Result<(ConversationMessage, ConversationMessage), RepositoryError>;
}
