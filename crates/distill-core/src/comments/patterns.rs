//! Regex patterns for recognising commented-out code.
//!
//! Each pattern is matched against one trimmed line of a comment body with
//! the comment markers removed. A comment counts as code when every
//! non-blank line matches one of them.

/// Lines that look like Java statements.
pub const COMMENTED_CODE_PATTERNS: &[&str] = &[
    // Assignment or local declaration: `x = 1;`, `int x = 1;`, `a.b += c;`
    r"^[\w.\[\]<>,]+(\s+[\w\[\]<>]+)?\s*[-+*/%&|^]?=\s*[^=].*;$",
    // Declaration without initializer: `String name;`
    r"^[\w.<>\[\]]+\s+\w+\s*;$",
    // Method call statement: `foo(bar);`, `this.x.run();`
    r"^(new\s+)?[\w.<>]+\s*\(.*\)\s*;$",
    // Return / throw / break / continue
    r"^(return|throw|break|continue)\b.*;$",
    // if / else if, optionally closing a previous block
    r"^(\}\s*)?(else\s+)?if\s*\(.*\)\s*\{?$",
    // else
    r"^(\}\s*)?else\s*\{?$",
    // try / finally
    r"^(\}\s*)?(try|finally)\s*\{?$",
    // catch
    r"^(\}\s*)?catch\s*\(.*\)\s*\{?$",
    // for / while loops
    r"^(for|while)\s*\(.*\)\s*\{?$",
    // Lone braces
    r"^[{}\s;]+$",
];

/// Embedded Javadoc in the text of a declaration.
pub const JAVADOC_PATTERN: &str = r"(?s)/\*\*.*?\*/";

/// Separators for the words compared between a comment and code.
pub const WORD_SEPARATORS: &[char] = &['.', ' ', '\t', '\n', '\r'];
