//! Command text value object

use super::{COMMAND_SUFFIX, TERMINATOR};
use crate::core::error::DomainError;
use serde::Serialize;

/// The literal text of a command (Value Object)
///
/// The wire suffix is not stored; it is appended by [`CommandText::to_wire`]
/// at transmission time. Text containing the suffix or the prompt symbol is
/// rejected because either would corrupt the framing of the exchange.
///
/// An empty command is valid: adapters of the ELM327 family repeat the
/// previous command when they receive a bare carriage return.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CommandText {
    text: String,
}

impl CommandText {
    /// Validate and wrap a command string
    pub fn parse(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        if let Some(found) = text
            .chars()
            .find(|c| *c == COMMAND_SUFFIX || *c == TERMINATOR)
        {
            return Err(DomainError::ReservedCharacter {
                command: text,
                found,
            });
        }
        Ok(Self { text })
    }

    /// Get the command text
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Bytes to put on the wire: UTF-8 text followed by the command suffix
    pub fn to_wire(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.text.len() + 1);
        bytes.extend_from_slice(self.text.as_bytes());
        bytes.push(COMMAND_SUFFIX as u8);
        bytes
    }
}

impl std::fmt::Display for CommandText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl std::str::FromStr for CommandText {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_wire_bytes() {
        let cmd = CommandText::parse("21 0D 01").unwrap();
        assert_eq!(cmd.to_wire(), b"21 0D 01\r".to_vec());
        assert_eq!(cmd.as_str(), "21 0D 01");
    }

    #[test]
    fn test_empty_command_is_repeat() {
        let cmd = CommandText::parse("").unwrap();
        assert_eq!(cmd.to_wire(), b"\r".to_vec());
    }

    #[test]
    fn test_rejects_terminator() {
        let err = CommandText::parse("AT Z>").unwrap_err();
        assert_eq!(
            err,
            DomainError::ReservedCharacter {
                command: "AT Z>".to_string(),
                found: '>',
            }
        );
    }

    #[test]
    fn test_rejects_carriage_return() {
        assert!("ATZ\rATI".parse::<CommandText>().is_err());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let cmd = CommandText::parse("AT E0").unwrap();
        assert_eq!(serde_json::to_string(&cmd).unwrap(), "\"AT E0\"");
    }
}
