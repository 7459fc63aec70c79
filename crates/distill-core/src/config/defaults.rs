//! Default values for distiller configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// File Locations
// ============================================================================

/// Project-local configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "distill.toml";

/// Directory under the user config dir holding `config.toml`.
pub const DEFAULT_CONFIG_DIR: &str = "distill";

// ============================================================================
// Comment Defaults
// ============================================================================

/// Merge consecutive line comments separated only by whitespace.
pub const DEFAULT_MERGE_LINE_COMMENTS: bool = true;

/// Drop comments that look like commented-out code.
pub const DEFAULT_DROP_COMMENTED_CODE: bool = true;

/// Marker of translator annotations, which are never merged.
pub const DEFAULT_TRANSLATOR_MARKER: &str = "NON-NLS";

// ============================================================================
// Association Defaults
// ============================================================================

/// Rating of a comment and code separated only by spaces on one line.
pub const DEFAULT_ADJACENT_RATING: u32 = 4;

/// Rating of a comment and code separated by exactly one line break.
pub const DEFAULT_LINE_BREAK_RATING: u32 = 2;

/// Attach a comment to the following code when every score ties.
pub const DEFAULT_PREFER_SUCCEEDING: bool = true;

// ============================================================================
// Classification Defaults
// ============================================================================

/// Name of the empty return type.
pub const DEFAULT_VOID_TYPE_NAME: &str = "void";
