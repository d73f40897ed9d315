//! Error handling for the HTTP transport

use thiserror::Error;

/// Failures starting or running the listener
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid address '{addr}': {reason}")]
    InvalidAddress { addr: String, reason: String },

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

impl ServerError {
    /// True when another process already holds the port
    pub fn is_address_in_use(&self) -> bool {
        matches!(
            self,
            ServerError::Bind { source, .. } if source.kind() == std::io::ErrorKind::AddrInUse
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_error_display() {
        let error = ServerError::Bind {
            addr: "0.0.0.0:7000".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use"),
        };
        assert!(error.is_address_in_use());
        assert_eq!(error.to_string(), "Failed to bind 0.0.0.0:7000: address in use");
    }

    #[test]
    fn test_invalid_address_display() {
        let error = ServerError::InvalidAddress {
            addr: "nowhere".to_string(),
            reason: "invalid socket address syntax".to_string(),
        };
        assert!(!error.is_address_in_use());
        assert!(error.to_string().starts_with("Invalid address 'nowhere'"));
    }
}
