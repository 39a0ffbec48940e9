use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

/// Model providers reachable through the model-invocation collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    Google,
    OpenAi,
}

impl Provider {
    /// The setting holding this provider's API credential.
    pub fn credential_key(&self) -> SettingKey {
        match self {
            Self::Google => SettingKey::GeminiApiKey,
            Self::OpenAi => SettingKey::OpenaiApiKey,
        }
    }
}

/// Recognized setting keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    OpenaiApiKey,
    GeminiApiKey,
}

impl SettingKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenaiApiKey => "openai_api_key",
            Self::GeminiApiKey => "gemini_api_key",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "openai_api_key" => Ok(Self::OpenaiApiKey),
            "gemini_api_key" => Ok(Self::GeminiApiKey),
            other => Err(CoreError::UnknownSettingKey(other.to_string())),
        }
    }
}

impl Serialize for SettingKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SettingKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Models available for prompt testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelId {
    Gemini25Flash,
    Gpt4oMini,
}

impl ModelId {
    pub const ALL: [ModelId; 2] = [ModelId::Gemini25Flash, ModelId::Gpt4oMini];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini25Flash => "gemini-2.5-flash",
            Self::Gpt4oMini => "gpt-4o-mini",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Gemini25Flash => "Gemini 2.5 Flash",
            Self::Gpt4oMini => "GPT-4o Mini",
        }
    }

    pub fn provider(&self) -> Provider {
        match self {
            Self::Gemini25Flash => Provider::Google,
            Self::Gpt4oMini => Provider::OpenAi,
        }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| CoreError::UnknownModel(s.to_string()))
    }
}

impl Serialize for ModelId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ModelId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_models() {
        assert_eq!("gpt-4o-mini".parse::<ModelId>().unwrap(), ModelId::Gpt4oMini);
        assert_eq!(
            "gemini-2.5-flash".parse::<ModelId>().unwrap(),
            ModelId::Gemini25Flash
        );
    }

    #[test]
    fn parse_unknown_model() {
        let err = "claude".parse::<ModelId>().unwrap_err();
        assert_eq!(err, CoreError::UnknownModel("claude".into()));
    }

    #[test]
    fn provider_credentials() {
        assert_eq!(
            ModelId::Gpt4oMini.provider().credential_key(),
            SettingKey::OpenaiApiKey
        );
        assert_eq!(
            ModelId::Gemini25Flash.provider().credential_key().as_str(),
            "gemini_api_key"
        );
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&ModelId::Gemini25Flash).unwrap();
        assert_eq!(json, "\"gemini-2.5-flash\"");
        let key: SettingKey = serde_json::from_str("\"openai_api_key\"").unwrap();
        assert_eq!(key, SettingKey::OpenaiApiKey);
        assert!(serde_json::from_str::<SettingKey>("\"nope\"").is_err());
    }
}
