//! # Record Factory Constants
//!
//! Constants shared by the descriptor builder (`descriptor`), the identifier
//! validator (`ident`) and the synthesized constructors (`records`).
//!
//! ## Dependency Graph
//!
//! ```text
//! MAX_FIELDS (8192)
//!       │
//!       ├─> Descriptor builder rejects field lists longer than this
//!       │
//!       ├─> Constructors reject argument lists longer than this
//!       │
//!       └─> MAX_FIELDS <= u16::MAX (codec writes the field count as u16)
//!
//! MAX_NAME_LEN (255)
//!       │
//!       ├─> Identifier validation rejects longer type and field names
//!       │
//!       └─> MAX_NAME_LEN <= u16::MAX (codec writes each name length as u16)
//!
//! PLACEHOLDER_PREFIX ('_')
//!       │
//!       └─> Must be the same character user field names may not start with,
//!           otherwise a renamed slot could collide with a user-supplied name
//! ```
//!
//! ## Critical Invariants
//!
//! Enforced by compile-time assertions at the bottom of this file:
//!
//! 1. `MAX_FIELDS <= u16::MAX` (codec header width)
//! 2. `PLACEHOLDER_PREFIX == RESERVED_FIELD_PREFIX` (rename placeholders never collide)
//! 3. `MAX_NAME_LEN <= u16::MAX` (codec name length width)
//!
//! ## Reserved Words
//!
//! `DEFAULT_RESERVED_WORDS` is the "invalid at use site" set for this host:
//! Rust's strict and reserved keywords. A field called `type` or `fn` could
//! never be turned into an accessor by a code generator, so the default
//! policy rejects it. Callers that do not need this restriction pass
//! `IdentPolicy::empty()`.

/// Maximum number of fields in a record type, and of arguments in a single
/// constructor call.
pub const MAX_FIELDS: usize = 8192;

/// Maximum length in bytes of a type name or field name.
pub const MAX_NAME_LEN: usize = 255;

/// Characters that separate field names when the field list is given as a
/// single delimited string. Any Unicode whitespace also separates.
pub const FIELD_DELIMITERS: &[char] = &[','];

/// Prefix of the positional placeholder (`_<slot>`) used by the rename policy.
pub const PLACEHOLDER_PREFIX: char = '_';

/// Field names may not start with this character.
pub const RESERVED_FIELD_PREFIX: char = '_';

/// Rust strict and reserved keywords.
pub const DEFAULT_RESERVED_WORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final",
    "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

const _: () = assert!(MAX_FIELDS <= u16::MAX as usize);
const _: () = assert!(PLACEHOLDER_PREFIX == RESERVED_FIELD_PREFIX);
const _: () = assert!(MAX_NAME_LEN <= u16::MAX as usize);
