use std::collections::HashMap;

use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

use crate::clients::DirectoryClient;
use crate::domain::{hash_password, verify_password, Credentials, User, UserCreate};
use crate::messages::{DirectoryRequest, ServiceResponse};

use super::error::DirectoryError;

/// Actor owning the user directory, keyed by username.
pub struct DirectoryService {
    receiver: mpsc::Receiver<DirectoryRequest>,
    users: HashMap<String, User>,
    next_id: u64,
}

impl DirectoryService {
    /// Creates the service together with a client for its channel.
    pub fn new(buffer_size: usize) -> (Self, DirectoryClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            users: HashMap::new(),
            next_id: 1,
        };
        let client = DirectoryClient::new(sender);
        (service, client)
    }

    #[instrument(name = "directory_service", skip(self))]
    pub async fn run(mut self) {
        info!("DirectoryService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                DirectoryRequest::Register { params, respond_to } => {
                    self.handle_register(params, respond_to);
                }
                DirectoryRequest::VerifyCredentials {
                    credentials,
                    respond_to,
                } => {
                    self.handle_verify_credentials(credentials, respond_to);
                }
                DirectoryRequest::Shutdown => {
                    info!("DirectoryService shutting down");
                    break;
                }
                #[cfg(test)]
                DirectoryRequest::GetUserCount { respond_to } => {
                    let _ = respond_to.send(Ok(self.users.len()));
                }
            }
        }

        info!("DirectoryService stopped");
    }

    #[instrument(fields(username = %params.username), skip(self, params, respond_to))]
    fn handle_register(
        &mut self,
        params: UserCreate,
        respond_to: ServiceResponse<User, DirectoryError>,
    ) {
        debug!("Processing register request");
        let result = self.register(params);
        match &result {
            Ok(user) => info!(user_id = user.id, "User registered successfully"),
            Err(e) => error!(error = %e, "Registration rejected"),
        }
        let _ = respond_to.send(result);
    }

    #[instrument(fields(username = %credentials.username), skip(self, credentials, respond_to))]
    fn handle_verify_credentials(
        &self,
        credentials: Credentials,
        respond_to: ServiceResponse<User, DirectoryError>,
    ) {
        debug!("Processing verify_credentials request");
        let result = self.verify(&credentials);
        match &result {
            Ok(user) => info!(user_id = user.id, "Credentials verified"),
            Err(e) => warn!(error = %e, "Credential verification failed"),
        }
        let _ = respond_to.send(result);
    }

    fn register(&mut self, params: UserCreate) -> Result<User, DirectoryError> {
        if params.username.is_empty() || params.password.is_empty() || params.name.is_empty() {
            return Err(DirectoryError::MissingFields);
        }
        if self.users.contains_key(&params.username) {
            return Err(DirectoryError::AlreadyExists);
        }

        let user = User {
            id: self.next_id,
            username: params.username.clone(),
            name: params.name,
            password_hash: hash_password(&params.password),
        };
        self.next_id += 1;
        self.users.insert(params.username, user.clone());
        Ok(user)
    }

    fn verify(&self, credentials: &Credentials) -> Result<User, DirectoryError> {
        if credentials.username.is_empty() || credentials.password.is_empty() {
            return Err(DirectoryError::MissingCredentials);
        }
        // Unknown users and wrong passwords get the same answer.
        let user = self
            .users
            .get(&credentials.username)
            .ok_or(DirectoryError::InvalidCredentials)?;
        if !verify_password(&credentials.password, &user.password_hash) {
            return Err(DirectoryError::InvalidCredentials);
        }
        Ok(user.clone())
    }
}
