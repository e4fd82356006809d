use thiserror::Error;

/// Errors produced by the user directory actor.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DirectoryError {
    #[error("Username and password are required")]
    MissingCredentials,

    #[error("All fields are required")]
    MissingFields,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists")]
    AlreadyExists,

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
