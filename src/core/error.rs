use std::fmt;

/// Tassonomia degli errori del core.
///
/// Nessuno di questi errori arriva all'utente finale: lo store li ritorna al chiamante
/// che li tratta come "l'azione non ha avuto effetto" e li logga.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// id di richiesta (o amico) non presente
    NotFound,
    /// operazione su una richiesta in stato terminale o non ammessa dallo stato corrente
    InvalidTransition,
    /// l'utente non ha il permesso per l'operazione (es. creatore che accetta il proprio ketchup)
    Forbidden,
    /// input non valido
    Validation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppError {
    kind: ErrorKind,
    message: &'static str,
    details: Option<String>,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: &'static str) -> Self {
        Self {
            kind,
            message,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Common error constructors
    pub fn not_found(message: &'static str) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn invalid_transition(message: &'static str) -> Self {
        Self::new(ErrorKind::InvalidTransition, message)
    }

    pub fn forbidden(message: &'static str) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    pub fn bad_request(message: &'static str) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.details {
            Some(details) => write!(f, "{:?}: {} ({})", self.kind, self.message, details),
            None => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

impl std::error::Error for AppError {}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::bad_request("Validation error").with_details(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_details() {
        let err = AppError::invalid_transition("Request is not pending").with_details("status: Matched");
        assert_eq!(err.kind(), ErrorKind::InvalidTransition);
        assert_eq!(
            err.to_string(),
            "InvalidTransition: Request is not pending (status: Matched)"
        );
        assert_eq!(AppError::not_found("Request not found").to_string(), "NotFound: Request not found");
    }
}
