//! Span mixin for tokens and warnings.
//!
//! [`SourceRangeMixin`] attaches a byte range of the source text to a value,
//! so warnings can be reported against the offending line without every
//! warning type carrying its own position fields.

/// A generic wrapper that attaches a source byte range to a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceRangeMixin<T> {
    /// Wrapped content value.
    content: T,
    /// Start index in the source string (0-based, inclusive).
    start: usize,
    /// End index in the source string (0-based, exclusive).
    end: usize,
}

impl<T> SourceRangeMixin<T> {
    /// Wraps `content` with the byte range `start..end`.
    pub const fn new(content: T, start: usize, end: usize) -> Self {
        Self {
            content,
            start,
            end,
        }
    }

    /// Returns the wrapped content.
    pub const fn content(&self) -> &T {
        &self.content
    }

    /// Moves the content out of the wrapper.
    pub fn into_content(self) -> T {
        self.content
    }

    /// Returns the start index of the source range.
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Returns the end index of the source range.
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Returns the source range as a `(start, end)` tuple.
    pub const fn as_span(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    /// Maps the content of the wrapper, keeping the range.
    pub fn map<U, F>(self, f: F) -> SourceRangeMixin<U>
    where
        F: FnOnce(T) -> U,
    {
        SourceRangeMixin::new(f(self.content), self.start, self.end)
    }
}

impl<T: std::fmt::Display> std::fmt::Display for SourceRangeMixin<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at indices [{}, {})",
            self.content, self.start, self.end
        )
    }
}

impl<T: std::error::Error + 'static> std::error::Error for SourceRangeMixin<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.content)
    }
}

/// Extension methods to wrap values into a [`SourceRangeMixin`].
pub trait SourceRangeMixinExt {
    /// Wraps `self` with the same range as another wrapper.
    fn into_wrapper<W>(self, wrapper: &SourceRangeMixin<W>) -> SourceRangeMixin<Self>
    where
        Self: Sized,
    {
        SourceRangeMixin::new(self, wrapper.start, wrapper.end)
    }

    /// Wraps `self` with the given start and end indices.
    fn into_wrapper_manual(self, start: usize, end: usize) -> SourceRangeMixin<Self>
    where
        Self: Sized,
    {
        SourceRangeMixin::new(self, start, end)
    }
}

impl<T> SourceRangeMixinExt for T {}
