pub mod attachment;
pub mod capability;
pub mod config;
pub mod dispatch;
pub mod intent;
pub mod live;
pub mod messages;
pub mod pipeline;
pub mod safety;
pub mod sanitize;

#[cfg(test)]
pub mod testing;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum PrismError {
    #[error("Capability error: {0}")]
    CapabilityError(String),

    #[error("Credential error: {0}")]
    CredentialError(String),

    #[error("Live session error: {0}")]
    SessionError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Channel error: {0}")]
    ChannelError(String),

    #[error("Dispatch error: {0}")]
    DispatchError(String),
}

impl PrismError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Capability failures are typically transient
            PrismError::CapabilityError(_) => true,
            // Recoverable by the user selecting a key
            PrismError::CredentialError(_) => true,
            // The live session tears down and can be restarted
            PrismError::SessionError(_) => true,
            PrismError::ConfigError(_) => false,
            PrismError::ChannelError(_) => false,
            PrismError::DispatchError(_) => true,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            PrismError::CapabilityError(_) => {
                "Sorry, an error occurred. Please try again.".to_string()
            }
            PrismError::CredentialError(_) => {
                "An API key is required for this request. Please select one.".to_string()
            }
            PrismError::SessionError(_) => "Error. Please try again.".to_string(),
            PrismError::ConfigError(_) => {
                "Configuration error. Please check settings.".to_string()
            }
            PrismError::ChannelError(_) => {
                "Internal communication error. Please restart the application.".to_string()
            }
            PrismError::DispatchError(_) => {
                "Sorry, an error occurred. Please try again.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, PrismError>;
