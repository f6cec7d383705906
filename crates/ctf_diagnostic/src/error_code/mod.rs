use std::fmt;

/// Codes for every diagnostic the CTF crates emit.
///
/// Format: E#### where the first digit indicates the area:
/// - E1xxx: Declaration and definition construction
/// - E2xxx: Symbol resolution
/// - E3xxx: Structural mismatches and transcoding
/// - E4xxx: Trace collection and clock correlation
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Construction (E1xxx)
    /// Field name added twice to the same compound declaration
    E1001,
    /// Integer size outside 1..=64 bits
    E1002,
    /// Alignment is zero or not a power of two
    E1003,
    /// Enumerator range is empty or inverted
    E1004,
    /// Untagged variant instantiated without a tag
    E1005,
    /// Name bound twice in the same definition scope
    E1006,
    /// Declaration registered twice in the same declaration scope
    E1007,

    // Resolution (E2xxx)
    /// Variant tag path does not resolve
    E2001,

    // Structure (E3xxx)
    /// Variant tag is not an enumeration
    E3001,
    /// Variant choice count differs from enumerator count
    E3002,
    /// Variant choice is not an enumerator tag
    E3003,
    /// Tag value maps to zero or several enumerators
    E3004,
    /// Source or destination format failure
    E3101,

    // Trace collection (E4xxx)
    /// No clock of the trace correlates with the collection
    E4001,
    /// More than one clock identity in a collection
    E4002,
    /// Clock offset delta between traces
    E4003,
    /// Clock offset differs between traces
    E4004,
    /// Trace is not part of the collection
    E4005,
    /// Trace is already part of the collection
    E4006,
    /// Clock name declared twice in a trace
    E4007,
}

impl ErrorCode {
    /// Get the string representation of this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E3101 => "E3101",
            ErrorCode::E4001 => "E4001",
            ErrorCode::E4002 => "E4002",
            ErrorCode::E4003 => "E4003",
            ErrorCode::E4004 => "E4004",
            ErrorCode::E4005 => "E4005",
            ErrorCode::E4006 => "E4006",
            ErrorCode::E4007 => "E4007",
        }
    }

    /// Check if this is a construction error (E1xxx).
    pub fn is_construction_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    /// Check if this is a resolution error (E2xxx).
    pub fn is_resolution_error(&self) -> bool {
        self.as_str().starts_with("E2")
    }

    /// Check if this is a structural error (E3xxx).
    pub fn is_structural_error(&self) -> bool {
        self.as_str().starts_with("E3")
    }

    /// Check if this is a trace collection code (E4xxx).
    pub fn is_collection_code(&self) -> bool {
        self.as_str().starts_with("E4")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
