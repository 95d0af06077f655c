//! Adapter initialization sequence

/// Commands sent once after connecting, in order.
///
/// Sets up an ELM327-compatible adapter for a KWP2000 (ISO 14230) ECU:
/// protocol 5 at 10.4 kbaud, echo and headers off, extended response
/// timeout, and the functional request header. The final command asks
/// the ECU which local identifiers it supports.
pub const INITIALIZE_COMMANDS: &[&str] = &[
    // battery voltage
    "AT RV",
    // adapter identification
    "ATI",
    "AT PC",
    "AT D",
    "AT E0",
    "AT SP 5",
    "AT IB 10",
    "AT KW0",
    // response timeout
    "AT ST 80",
    "AT IIA 10",
    "AT SH 81 10 F0",
    "21 00 01",
];
