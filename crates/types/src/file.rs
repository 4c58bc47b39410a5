//! Source language detection.

use std::path::Path;

/// Source language of a file (determines which parser dialect is used).
///
/// `.ts` files are parsed without JSX so that angle-bracket type assertions
/// keep working; `.tsx` files enable JSX.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// TypeScript (.ts, .mts, .cts)
    TypeScript,
    /// TypeScript with JSX (.tsx)
    Tsx,
    /// JavaScript, JSX enabled (.js, .jsx, .mjs, .cjs)
    JavaScript,
}

impl Language {
    /// Detect language from a file path based on its extension.
    ///
    /// Returns `None` if the extension is not a JavaScript-family extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        Self::from_extension(extension)
    }

    /// Detect language from a bare extension (without the leading dot).
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "tsx" => Some(Self::Tsx),
            "js" | "jsx" | "mjs" | "cjs" => Some(Self::JavaScript),
            _ => None,
        }
    }

    /// Whether type annotations may be emitted into rewritten code.
    #[must_use]
    pub const fn is_typescript(self) -> bool {
        matches!(self, Self::TypeScript | Self::Tsx)
    }

    /// Whether the parser should accept JSX.
    #[must_use]
    pub const fn allows_jsx(self) -> bool {
        matches!(self, Self::Tsx | Self::JavaScript)
    }
}
