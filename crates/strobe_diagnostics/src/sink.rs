//! Thread-safe diagnostic accumulator.

use crate::code::DiagnosticCode;
use crate::diagnostic::Diagnostic;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Collects diagnostics emitted during binding.
///
/// The sink is shared by reference through every binding call. It can be
/// shared between threads binding independent scopes; diagnostics keep the
/// order in which [`emit`](Self::emit) calls acquired the lock.
pub struct DiagnosticSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
    error_count: AtomicUsize,
}

impl DiagnosticSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self {
            diagnostics: Mutex::new(Vec::new()),
            error_count: AtomicUsize::new(0),
        }
    }

    /// Records a diagnostic.
    pub fn emit(&self, diag: Diagnostic) {
        if diag.is_error() {
            self.error_count.fetch_add(1, Ordering::Relaxed);
        }
        let mut diagnostics = self.diagnostics.lock().unwrap();
        diagnostics.push(diag);
    }

    /// Returns `true` if any error has been emitted.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Number of errors emitted so far. Not reset by [`take_all`](Self::take_all).
    pub fn error_count(&self) -> usize {
        self.error_count.load(Ordering::Relaxed)
    }

    /// Number of diagnostics currently held.
    pub fn len(&self) -> usize {
        self.diagnostics.lock().unwrap().len()
    }

    /// Returns `true` if the sink currently holds no diagnostics.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drains all held diagnostics.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        let mut diagnostics = self.diagnostics.lock().unwrap();
        std::mem::take(&mut *diagnostics)
    }

    /// Returns a copy of all held diagnostics.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.lock().unwrap().clone()
    }

    /// Returns the codes of all held diagnostics in emission order.
    pub fn codes(&self) -> Vec<DiagnosticCode> {
        self.diagnostics
            .lock()
            .unwrap()
            .iter()
            .map(|d| d.code)
            .collect()
    }
}

impl Default for DiagnosticSink {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::Category;
    use strobe_source::Span;

    fn error() -> Diagnostic {
        Diagnostic::error(DiagnosticCode::new(Category::Error, 301), "e", Span::DUMMY)
    }

    fn warning() -> Diagnostic {
        Diagnostic::warning(DiagnosticCode::new(Category::Warning, 300), "w", Span::DUMMY)
    }

    #[test]
    fn new_sink_is_empty() {
        let sink = DiagnosticSink::new();
        assert!(sink.is_empty());
        assert!(!sink.has_errors());
    }

    #[test]
    fn warnings_do_not_count_as_errors() {
        let sink = DiagnosticSink::new();
        sink.emit(warning());
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.error_count(), 0);
        sink.emit(error());
        assert_eq!(sink.error_count(), 1);
    }

    #[test]
    fn codes_in_emission_order() {
        let sink = DiagnosticSink::new();
        sink.emit(error());
        sink.emit(warning());
        let codes: Vec<String> = sink.codes().iter().map(|c| c.to_string()).collect();
        assert_eq!(codes, ["E301", "W300"]);
    }

    #[test]
    fn take_all_drains_but_keeps_error_count() {
        let sink = DiagnosticSink::new();
        sink.emit(error());
        assert_eq!(sink.take_all().len(), 1);
        assert!(sink.is_empty());
        assert_eq!(sink.error_count(), 1);
    }

    #[test]
    fn concurrent_emitters() {
        use std::sync::Arc;
        use std::thread;

        let sink = Arc::new(DiagnosticSink::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let sink = Arc::clone(&sink);
                thread::spawn(move || {
                    for _ in 0..50 {
                        sink.emit(error());
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(sink.error_count(), 400);
        assert_eq!(sink.len(), 400);
    }
}
