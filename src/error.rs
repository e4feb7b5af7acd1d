/// Result type used across the crate.
pub type BatchResult<T> = Result<T, BatchError>;

/// Faults raised by the catalog and the sprite batch.
///
/// Only configuration mistakes and font/text mismatches end up here. A missing
/// texture, a missing font or a submission outside of a session is not an
/// error: those calls are skipped so per-frame code does not need to branch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BatchError {
    /// The character map handed to a catalog was not strictly ascending.
    #[error("invalid character map: {next:?} follows {previous:?}, characters must be strictly ascending")]
    InvalidLayout {
        /// Last accepted character.
        previous: char,
        /// Character that broke the ordering.
        next: char,
    },

    /// Parallel glyph lists of a font asset disagree in length.
    #[error("glyph data mismatch: {field} has {found} entries, expected {expected}")]
    MismatchedGlyphData {
        /// Name of the offending list.
        field: &'static str,
        /// Number of characters.
        expected: usize,
        /// Number of entries in the offending list.
        found: usize,
    },

    /// The character is not covered by the font and no default glyph applies.
    #[error("character {0:?} cannot be resolved by this font")]
    UnresolvableCharacter(char),

    /// `begin` was called while a session was already open.
    #[error("begin cannot be called again until end has been called")]
    AlreadyActive,

    /// A session operation was called without a preceding `begin`.
    #[error("begin must be called before {0}")]
    NotActive(&'static str),
}
