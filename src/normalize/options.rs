//! Normalization options.

/// Options for the text cleanup that follows markup removal.
///
/// Markup removal, entity decoding and whitespace collapsing always run;
/// these switches only control the Unicode cleanup stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Compose Unicode to NFC form (`e` + U+0301 → `é`)
    pub normalize_unicode: bool,

    /// Expand typographic ligatures (ﬁ, ﬂ, ...)
    pub fix_ligatures: bool,

    /// Remove the Unicode replacement character (U+FFFD)
    pub remove_replacement_char: bool,
}

impl NormalizeOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with every cleanup step disabled.
    pub fn minimal() -> Self {
        Self {
            normalize_unicode: false,
            fix_ligatures: false,
            remove_replacement_char: false,
        }
    }

    /// Enable or disable NFC composition.
    pub fn with_unicode_normalization(mut self, enabled: bool) -> Self {
        self.normalize_unicode = enabled;
        self
    }

    /// Enable or disable ligature expansion.
    pub fn with_ligature_fix(mut self, enabled: bool) -> Self {
        self.fix_ligatures = enabled;
        self
    }

    /// Enable or disable removal of U+FFFD.
    pub fn with_replacement_char_removal(mut self, enabled: bool) -> Self {
        self.remove_replacement_char = enabled;
        self
    }
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            normalize_unicode: true,
            fix_ligatures: true,
            remove_replacement_char: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let options = NormalizeOptions::new()
            .with_unicode_normalization(false)
            .with_ligature_fix(true);
        assert!(!options.normalize_unicode);
        assert!(options.fix_ligatures);
        assert!(options.remove_replacement_char);
    }

    #[test]
    fn test_minimal() {
        let options = NormalizeOptions::minimal();
        assert!(!options.normalize_unicode);
        assert!(!options.fix_ligatures);
        assert!(!options.remove_replacement_char);
    }
}
