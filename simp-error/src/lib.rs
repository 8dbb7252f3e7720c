//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages.
//!
//! Expressions have no source text of their own, so the spans of an [`Error`] index into the
//! **rendering** of the expression the failing operation was given. Reports are built against that
//! rendering.

// `#[derive(ErrorKind)]` output refers to `simp_error::EXPR`
extern crate self as simp_error;

use ariadne::{Color, Report, Source};
use std::{any::Any, fmt::Debug, io, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send + Sync {
    /// Returns this error kind as [`Any`], so callers can inspect the concrete kind.
    fn as_any(&self) -> &dyn Any;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of a rendered expression that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the rendered expression that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Returns the kind of this error if it is of type `K`.
    pub fn downcast_kind<K: ErrorKind + 'static>(&self) -> Option<&K> {
        self.kind.as_any().downcast_ref::<K>()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Writes the report for this error to the given writer, with `input` as the source the spans
    /// index into.
    pub fn write_report<W: io::Write>(&self, src_id: &str, input: &str, w: W) -> io::Result<()> {
        self.build_report(src_id).write((src_id, Source::from(input)), w)
    }

    /// Report this error to stderr.
    ///
    /// The `ariadne` crate's [`Report`] type does not have a `Display` implementation, so we can
    /// only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) -> io::Result<()> {
        self.build_report(src_id).eprint((src_id, Source::from(input)))
    }
}

#[cfg(test)]
mod tests {
    use simp_attrs::ErrorKind;
    use super::*;

    #[derive(Debug, ErrorKind)]
    #[error(
        message = format!("`{}` is not allowed here", self.name),
        labels = ["this symbol"],
        help = "remove it",
    )]
    struct Forbidden {
        name: String,
    }

    #[derive(Debug, ErrorKind)]
    #[error(message = "something went wrong")]
    struct Plain;

    fn render(err: &Error, input: &str) -> String {
        let mut buf = Vec::new();
        err.write_report("expr", input, &mut buf).unwrap();
        String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap()
    }

    #[test]
    fn report_contains_message_label_and_help() {
        let err = Error::new(vec![4..5], Forbidden { name: "y".to_string() });
        let report = render(&err, "x + y");
        assert!(report.contains("`y` is not allowed here"));
        assert!(report.contains("this symbol"));
        assert!(report.contains("remove it"));
    }

    #[test]
    fn report_without_labels() {
        let err = Error::new(vec![0..1], Plain);
        let report = render(&err, "x");
        assert!(report.contains("something went wrong"));
    }

    #[test]
    fn downcast_to_concrete_kind() {
        let err = Error::new(vec![0..1], Forbidden { name: "z".to_string() });
        assert_eq!(err.downcast_kind::<Forbidden>().map(|k| k.name.as_str()), Some("z"));
        assert!(err.downcast_kind::<Plain>().is_none());
    }
}
