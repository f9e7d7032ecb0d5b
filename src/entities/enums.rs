//! Enumerazioni - Tipi enumerati utilizzati nelle entità e nella configurazione

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ********************* ENUMERAZIONI UTILI **********************//

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Matched,
    Expired,
    Cancelled,
}

impl RequestStatus {
    /// Matched, Expired e Cancelled non hanno transizioni in uscita
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

/// Semantica di `match_ketchup` su una richiesta già Matched
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// first-acceptance-wins: dopo il primo match la richiesta non accetta altri partecipanti
    #[default]
    Exclusive,
    /// ketchup di gruppo: altri amici già notificati possono unirsi
    Group,
}

impl FromStr for MatchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exclusive" => Ok(MatchPolicy::Exclusive),
            "group" => Ok(MatchPolicy::Group),
            other => Err(format!("unknown match policy '{}'", other)),
        }
    }
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchPolicy::Exclusive => write!(f, "exclusive"),
            MatchPolicy::Group => write!(f, "group"),
        }
    }
}

/// Quando il controller delle notifiche cerca una richiesta da mostrare
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryMode {
    /// ricontrolla ad ogni modifica dello store finché non c'è un prompt attivo
    #[default]
    Continuous,
    /// un solo controllo per attivazione
    OneShot,
}

impl FromStr for DeliveryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "continuous" => Ok(DeliveryMode::Continuous),
            "one-shot" | "oneshot" | "one_shot" => Ok(DeliveryMode::OneShot),
            other => Err(format!("unknown delivery mode '{}'", other)),
        }
    }
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryMode::Continuous => write!(f, "continuous"),
            DeliveryMode::OneShot => write!(f, "one-shot"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_pending_is_not_terminal() {
        assert!(!RequestStatus::Pending.is_terminal());
        assert!(RequestStatus::Matched.is_terminal());
        assert!(RequestStatus::Expired.is_terminal());
        assert!(RequestStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("Group".parse::<MatchPolicy>(), Ok(MatchPolicy::Group));
        assert_eq!(" exclusive ".parse::<MatchPolicy>(), Ok(MatchPolicy::Exclusive));
        assert!("first-wins".parse::<MatchPolicy>().is_err());

        assert_eq!("one-shot".parse::<DeliveryMode>(), Ok(DeliveryMode::OneShot));
        assert_eq!("continuous".parse::<DeliveryMode>(), Ok(DeliveryMode::Continuous));
        assert!("sometimes".parse::<DeliveryMode>().is_err());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&RequestStatus::Matched).unwrap();
        assert_eq!(json, "\"matched\"");
    }
}
