//! Reply payload extraction

use crate::core::error::DomainError;

/// Number of hex digits of the reply header (service + identifier echo)
const HEADER_DIGITS: usize = 4;

/// Extract the integer payload from a gauge reply.
///
/// The reply `"61 0D 32\r\r"` is compacted to `"610D32"`, the four-digit
/// header is dropped and the remainder is read as hexadecimal.
pub fn parse_raw_value(response: &str) -> Result<u32, DomainError> {
    let compact: String = response.chars().filter(|c| !c.is_whitespace()).collect();

    let malformed = |reason: &str| DomainError::MalformedResponse {
        raw: response.to_string(),
        reason: reason.to_string(),
    };

    if !compact.is_ascii() {
        return Err(malformed("non-ASCII reply"));
    }
    if compact.len() <= HEADER_DIGITS {
        return Err(malformed("no payload after header"));
    }

    let payload = &compact[HEADER_DIGITS..];
    u32::from_str_radix(payload, 16).map_err(|e| malformed(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_speed_reply() {
        assert_eq!(parse_raw_value("41 0D 32").unwrap(), 0x32);
    }

    #[test]
    fn parses_reply_with_line_endings() {
        assert_eq!(parse_raw_value("61 0C 1F 40\r\r").unwrap(), 0x1F40);
    }

    #[test]
    fn rejects_no_data() {
        let err = parse_raw_value("NO DATA").unwrap_err();
        assert!(err.is_response_error());
    }

    #[test]
    fn rejects_header_only() {
        assert!(parse_raw_value("61 0D").is_err());
        assert!(parse_raw_value("").is_err());
    }

    #[test]
    fn rejects_payload_overflow() {
        assert!(parse_raw_value("610D 11 22 33 44 55").is_err());
    }
}
