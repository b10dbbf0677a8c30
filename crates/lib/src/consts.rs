//! Fixed names and markers shared across the compiler.

/// Prefix of a directive line. The trailing space is part of the marker.
pub const DIRECTIVE_MARKER: &str = "#> ";

/// Byte order mark some editors put at the start of a source file.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Prefix of a content line that should be stripped before writing.
pub const STRIP_MARKER: &str = "##";

/// Tracing target for messages from the `log` directive.
pub const LOG_TARGET: &str = "mcfc::log";

pub const DEFAULT_PACK_FORMAT: u32 = 4;
pub const DEFAULT_DESCRIPTION: &str = "A simple datapack";

pub const PACK_META_FILE: &str = "pack.mcmeta";
pub const DATA_DIR: &str = "data";
pub const FUNCTIONS_DIR: &str = "functions";

/// Tag directory for function tags, relative to the datapack root.
pub const FUNCTION_TAGS_DIR: [&str; 4] = ["data", "minecraft", "tags", "functions"];

pub const ARCHIVE_EXTENSION: &str = "zip";
