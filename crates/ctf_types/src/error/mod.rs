//! Errors raised while building declarations, instantiating definitions, and
//! transcoding them.

use ctf_diagnostic::{Diagnostic, ErrorCode};
use ctf_ir::{Name, ScopePath, StringInterner};

use crate::{FormatError, Namespace};

/// Broad classification of a [`TypeError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeErrorKind {
    /// Malformed declaration, or an instance could not be built.
    Construction,
    /// A tag path did not resolve.
    Resolution,
    /// A variant and its tag enumeration disagree.
    StructuralMismatch,
    /// A concrete format failed.
    Format,
}

/// Type system error.
///
/// Names are reported raw; use [`TypeError::to_diagnostic`] to render them
/// through the interner.
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
    #[error("field {name:?} is declared twice")]
    DuplicateField { name: Name },

    #[error("enumerator {tag:?} is declared twice")]
    DuplicateEnumerator { tag: Name },

    #[error("integer size {size} is outside 1..=64 bits")]
    InvalidIntegerSize { size: u32 },

    #[error("alignment {alignment} is not a non-zero power of two")]
    InvalidAlignment { alignment: u32 },

    #[error("enumerator {tag:?} has inverted range {start}..={end}")]
    InvalidRange { tag: Name, start: u64, end: u64 },

    #[error("untagged variant {name:?} cannot be instantiated without a tag")]
    UntaggedInstantiation { name: Name },

    #[error("{name:?} is already bound in scope {scope:?}")]
    DuplicateBinding { name: Name, scope: ScopePath },

    #[error("{namespace:?} {name:?} is already declared in this scope")]
    DuplicateDeclaration { namespace: Namespace, name: Name },

    #[error("tag path {path:?} does not resolve from scope {scope:?}")]
    UnresolvedTag { path: ScopePath, scope: ScopePath },

    #[error("tag path {path:?} does not name an enumeration")]
    TagNotEnumeration { path: ScopePath },

    #[error("variant has {choices} choices but its tag has {enumerators} enumerators")]
    ChoiceCountMismatch { choices: usize, enumerators: usize },

    #[error("variant choice {choice:?} is not an enumerator of its tag")]
    UnknownChoice { choice: Name },

    #[error("tag value {value:?} maps to {count} enumerators, expected exactly one")]
    TagValue { value: Option<u64>, count: usize },

    #[error(transparent)]
    Format(#[from] FormatError),
}

impl TypeError {
    pub fn kind(&self) -> TypeErrorKind {
        match self {
            TypeError::DuplicateField { .. }
            | TypeError::DuplicateEnumerator { .. }
            | TypeError::InvalidIntegerSize { .. }
            | TypeError::InvalidAlignment { .. }
            | TypeError::InvalidRange { .. }
            | TypeError::UntaggedInstantiation { .. }
            | TypeError::DuplicateBinding { .. }
            | TypeError::DuplicateDeclaration { .. } => TypeErrorKind::Construction,
            TypeError::UnresolvedTag { .. } => TypeErrorKind::Resolution,
            TypeError::TagNotEnumeration { .. }
            | TypeError::ChoiceCountMismatch { .. }
            | TypeError::UnknownChoice { .. }
            | TypeError::TagValue { .. } => TypeErrorKind::StructuralMismatch,
            TypeError::Format(_) => TypeErrorKind::Format,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            TypeError::DuplicateField { .. } | TypeError::DuplicateEnumerator { .. } => {
                ErrorCode::E1001
            }
            TypeError::InvalidIntegerSize { .. } => ErrorCode::E1002,
            TypeError::InvalidAlignment { .. } => ErrorCode::E1003,
            TypeError::InvalidRange { .. } => ErrorCode::E1004,
            TypeError::UntaggedInstantiation { .. } => ErrorCode::E1005,
            TypeError::DuplicateBinding { .. } => ErrorCode::E1006,
            TypeError::DuplicateDeclaration { .. } => ErrorCode::E1007,
            TypeError::UnresolvedTag { .. } => ErrorCode::E2001,
            TypeError::TagNotEnumeration { .. } => ErrorCode::E3001,
            TypeError::ChoiceCountMismatch { .. } => ErrorCode::E3002,
            TypeError::UnknownChoice { .. } => ErrorCode::E3003,
            TypeError::TagValue { .. } => ErrorCode::E3004,
            TypeError::Format(_) => ErrorCode::E3101,
        }
    }

    /// Convert to a diagnostic with names resolved through `interner`.
    pub fn to_diagnostic(&self, interner: &StringInterner) -> Diagnostic {
        let message = match self {
            TypeError::DuplicateField { name } => {
                format!("field `{}` is declared twice", interner.lookup(*name))
            }
            TypeError::DuplicateEnumerator { tag } => {
                format!("enumerator `{}` is declared twice", interner.lookup(*tag))
            }
            TypeError::InvalidRange { tag, start, end } => format!(
                "enumerator `{}` has inverted range {start}..={end}",
                interner.lookup(*tag)
            ),
            TypeError::UntaggedInstantiation { name } => format!(
                "untagged variant `{}` cannot be instantiated without a tag",
                interner.lookup(*name)
            ),
            TypeError::DuplicateBinding { name, scope } => format!(
                "`{}` is already bound in scope `{}`",
                interner.lookup(*name),
                scope.display(interner)
            ),
            TypeError::DuplicateDeclaration { namespace, name } => format!(
                "{namespace} `{}` is already declared in this scope",
                interner.lookup(*name)
            ),
            TypeError::UnresolvedTag { path, scope } => {
                return Diagnostic::error(self.code())
                    .with_message(format!(
                        "cannot resolve variant tag `{}`",
                        path.display(interner)
                    ))
                    .with_note(format!(
                        "searched upward from scope `{}`",
                        scope.display(interner)
                    ));
            }
            TypeError::TagNotEnumeration { path } => format!(
                "variant tag `{}` is not an enumeration",
                path.display(interner)
            ),
            TypeError::UnknownChoice { choice } => format!(
                "variant choice `{}` is not an enumerator of its tag",
                interner.lookup(*choice)
            ),
            TypeError::InvalidIntegerSize { .. }
            | TypeError::InvalidAlignment { .. }
            | TypeError::ChoiceCountMismatch { .. }
            | TypeError::TagValue { .. }
            | TypeError::Format(_) => self.to_string(),
        };
        Diagnostic::error(self.code()).with_message(message)
    }
}
