//! Where the `print` built-in's output goes.
//!
//! Lets the host redirect interpreter output away from real stdout (for
//! embedding inside a larger process, or for capturing output in tests)
//! instead of hard-coding `println!`.

/// A destination for text the running program asks to print.
pub trait PrintSink {
    fn print(&mut self, text: &str);
}

/// Writes straight to the process's standard output.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl PrintSink for StdoutSink {
    fn print(&mut self, text: &str) {
        println!("{text}");
    }
}

/// Collects everything printed into an in-memory buffer, one entry per call.
///
/// Used by embedding hosts that want to capture output rather than let it
/// reach the process's stdout, and by this crate's own tests.
#[derive(Debug, Default)]
pub struct CollectSink {
    pub lines: Vec<String>,
}

impl CollectSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrintSink for CollectSink {
    fn print(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }
}
