//! Loader configuration.

/// Options controlling how strictly a document is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Fail when a key names a property that is not in the effective
    /// property set. When false, a string property is synthesized for the
    /// missing name and a warning is logged.
    pub strict_key_properties: bool,

    /// Fail when a class has neither an own nor an inherited primary key.
    pub require_primary_key: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            strict_key_properties: false,
            require_primary_key: true,
        }
    }
}

impl LoaderConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration with every optional check enabled.
    pub fn strict() -> Self {
        Self {
            strict_key_properties: true,
            require_primary_key: true,
        }
    }

    /// Set whether unresolved key properties are errors.
    pub fn with_strict_key_properties(mut self, strict: bool) -> Self {
        self.strict_key_properties = strict;
        self
    }

    /// Set whether every class needs a primary key.
    pub fn with_require_primary_key(mut self, required: bool) -> Self {
        self.require_primary_key = required;
        self
    }
}
