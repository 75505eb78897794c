//! Status and mode enums for various entities.

use serde::{Deserialize, Serialize};

/// Shopper persona controlling which price field and which screens apply.
///
/// `Guest` is priced like `B2c`; only `B2b` sees wholesale pricing and the
/// purchasing portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Persona {
    Guest,
    #[default]
    B2c,
    B2b,
}

impl Persona {
    /// Whether wholesale pricing applies.
    #[must_use]
    pub const fn is_wholesale(self) -> bool {
        matches!(self, Self::B2b)
    }

    /// Human label shown in the persona switcher.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::B2b => "B2B Purchaser",
            Self::B2c | Self::Guest => "B2C Customer",
        }
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Guest => write!(f, "GUEST"),
            Self::B2c => write!(f, "B2C"),
            Self::B2b => write!(f, "B2B"),
        }
    }
}

/// The screen currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum View {
    #[default]
    Storefront,
    Admin,
    Cart,
}

/// Mock order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Processing,
    Shipped,
    Delivered,
    #[serde(rename = "Return Requested")]
    ReturnRequested,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Processing => write!(f, "Processing"),
            Self::Shipped => write!(f, "Shipped"),
            Self::Delivered => write!(f, "Delivered"),
            Self::ReturnRequested => write!(f, "Return Requested"),
        }
    }
}

/// Which sales channel an order came through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderChannel {
    B2b,
    B2c,
}

/// Content staging status of a CMS draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DraftStatus {
    Draft,
    Staged,
    Live,
}

/// Chat message author.
///
/// Serialized with the role names the generative language API expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    /// Wire name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persona_display() {
        assert_eq!(Persona::B2c.to_string(), "B2C");
        assert_eq!(Persona::Guest.to_string(), "GUEST");
    }

    #[test]
    fn test_persona_serde_names() {
        let json = serde_json::to_string(&Persona::B2b).expect("serialize");
        assert_eq!(json, "\"B2B\"");
        let view: View = serde_json::from_str("\"ADMIN\"").expect("deserialize");
        assert_eq!(view, View::Admin);
    }

    #[test]
    fn test_only_b2b_is_wholesale() {
        assert!(Persona::B2b.is_wholesale());
        assert!(!Persona::B2c.is_wholesale());
        assert!(!Persona::Guest.is_wholesale());
    }

    #[test]
    fn test_order_status_wire_name() {
        let json = serde_json::to_string(&OrderStatus::ReturnRequested).expect("serialize");
        assert_eq!(json, "\"Return Requested\"");
        assert_eq!(OrderStatus::ReturnRequested.to_string(), "Return Requested");
    }
}
