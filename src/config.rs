//! Parser options.

use std::fmt;

/// Default limit on the include expansion chain.
pub const DEFAULT_INCLUDE_MAX_DEPTH: usize = 16;

/// Resolver for `[@](target)` file includes. Receives the target and the
/// chain of targets currently being expanded, returns the file's text or
/// `None` when it cannot be read.
pub type LoadFile = dyn Fn(&str, &[String]) -> Option<String>;

pub struct ParseOptions {
    /// Expand include directives during post-processing. Tag includes work
    /// without a loader; file includes additionally need [`load_file`].
    ///
    /// [`load_file`]: ParseOptions::load_file
    pub expand_include: bool,
    pub include_max_depth: usize,
    pub load_file: Option<Box<LoadFile>>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            expand_include: true,
            include_max_depth: DEFAULT_INCLUDE_MAX_DEPTH,
            load_file: None,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_expand_include(mut self, expand: bool) -> Self {
        self.expand_include = expand;
        self
    }

    pub fn with_include_max_depth(mut self, depth: usize) -> Self {
        self.include_max_depth = depth;
        self
    }

    pub fn with_load_file<F>(mut self, load_file: F) -> Self
    where
        F: Fn(&str, &[String]) -> Option<String> + 'static,
    {
        self.load_file = Some(Box::new(load_file));
        self
    }
}

impl fmt::Debug for ParseOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseOptions")
            .field("expand_include", &self.expand_include)
            .field("include_max_depth", &self.include_max_depth)
            .field("load_file", &self.load_file.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = ParseOptions::default();
        assert!(options.expand_include);
        assert_eq!(options.include_max_depth, DEFAULT_INCLUDE_MAX_DEPTH);
        assert!(options.load_file.is_none());
    }

    #[test]
    fn debug_hides_the_loader_body() {
        let options = ParseOptions::new().with_load_file(|_, _| None);
        let rendered = format!("{options:?}");
        assert!(rendered.contains("load_file: Some(\"<fn>\")"));
    }
}
