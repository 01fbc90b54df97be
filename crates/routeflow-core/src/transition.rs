use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named edge out of a node.
///
/// The eight standard names have their own variants; anything else is kept
/// verbatim in [`Transition::Custom`]. A [`CustomName`] can only be made by
/// normalising a string, so a custom transition never shadows a standard one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Transition {
    Success,
    Fail,
    Error,
    Timeout,
    Retry,
    Skip,
    Pending,
    Cancel,
    /// User-defined transition name
    Custom(CustomName),
}

/// Name of a user-defined transition. Never one of the standard names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CustomName(String);

impl CustomName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CustomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Transition {
    /// The standard transitions, in declaration order.
    pub const STANDARD: [Transition; 8] = [
        Transition::Success,
        Transition::Fail,
        Transition::Error,
        Transition::Timeout,
        Transition::Retry,
        Transition::Skip,
        Transition::Pending,
        Transition::Cancel,
    ];

    /// Parse a transition name, mapping the standard names onto their variants.
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        match name.as_str() {
            "onSuccess" => Self::Success,
            "onFail" => Self::Fail,
            "onError" => Self::Error,
            "onTimeout" => Self::Timeout,
            "onRetry" => Self::Retry,
            "onSkip" => Self::Skip,
            "onPending" => Self::Pending,
            "onCancel" => Self::Cancel,
            _ => Self::Custom(CustomName(name)),
        }
    }

    /// Create a user-defined transition.
    pub fn custom(name: impl Into<String>) -> Self {
        Self::from_name(name)
    }

    /// The wire name of this transition (`onSuccess`, `onRetry`, ...).
    pub fn name(&self) -> &str {
        match self {
            Self::Success => "onSuccess",
            Self::Fail => "onFail",
            Self::Error => "onError",
            Self::Timeout => "onTimeout",
            Self::Retry => "onRetry",
            Self::Skip => "onSkip",
            Self::Pending => "onPending",
            Self::Cancel => "onCancel",
            Self::Custom(name) => name.as_str(),
        }
    }

    pub fn is_standard(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Transition {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl From<&str> for Transition {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl From<String> for Transition {
    fn from(name: String) -> Self {
        Self::from_name(name)
    }
}

impl From<Transition> for String {
    fn from(transition: Transition) -> Self {
        match transition {
            Transition::Custom(name) => name.into_string(),
            other => other.name().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_names() {
        let names: Vec<&str> = Transition::STANDARD.iter().map(Transition::name).collect();
        assert_eq!(
            names,
            vec![
                "onSuccess",
                "onFail",
                "onError",
                "onTimeout",
                "onRetry",
                "onSkip",
                "onPending",
                "onCancel"
            ]
        );
    }

    #[test]
    fn test_standard_name_normalised() {
        assert_eq!(Transition::from("onRetry"), Transition::Retry);
        assert_eq!(Transition::custom("onCancel"), Transition::Cancel);
        assert!(Transition::from("onRetry").is_standard());
    }

    #[test]
    fn test_custom_transition() {
        let t = Transition::custom("onEscalate");
        assert!(matches!(&t, Transition::Custom(name) if name.as_str() == "onEscalate"));
        assert_eq!(t.name(), "onEscalate");
        assert!(!t.is_standard());
        assert_eq!(t.to_string(), "onEscalate");
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Transition::Timeout).unwrap();
        assert_eq!(json, "\"onTimeout\"");
        let back: Transition = serde_json::from_str("\"onAudit\"").unwrap();
        assert_eq!(back, Transition::custom("onAudit"));
        assert_eq!(back.name(), "onAudit");
    }

    #[test]
    fn test_custom_name_cannot_shadow_standard() {
        let spelled = Transition::custom("onRetry");
        assert_eq!(spelled, Transition::Retry);
        assert!(!matches!(spelled, Transition::Custom(_)));

        let mut set = std::collections::BTreeSet::new();
        set.insert(Transition::Retry);
        set.insert(Transition::from("onRetry".to_string()));
        assert_eq!(set.len(), 1);
    }
}
