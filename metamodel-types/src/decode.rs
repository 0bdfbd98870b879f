use crate::order::{self, OrderSequencer};

/// State threaded through one decode pass.
///
/// Holds the sequencer that numbers members and the `collection.field` path of
/// the node being decoded, used to name the node in errors.
#[derive(Debug)]
pub struct DecodeContext<'a> {
    sequencer: &'a OrderSequencer,
    path: Vec<String>,
}

impl<'a> DecodeContext<'a> {
    pub fn new(sequencer: &'a OrderSequencer) -> Self {
        Self {
            sequencer,
            path: Vec::new(),
        }
    }

    /// A context numbering members from the process-wide sequencer.
    pub fn global() -> DecodeContext<'static> {
        DecodeContext::new(order::global())
    }

    pub fn sequencer(&self) -> &'a OrderSequencer {
        self.sequencer
    }

    /// Dotted path of the current node, `<root>` at the top.
    pub fn path(&self) -> String {
        if self.path.is_empty() {
            "<root>".to_string()
        } else {
            self.path.join(".")
        }
    }

    /// Run `f` with `segment` appended to the current path.
    pub fn scoped<T>(&mut self, segment: &str, f: impl FnOnce(&mut Self) -> T) -> T {
        self.path.push(segment.to_string());
        let out = f(self);
        self.path.pop();
        out
    }

    pub(crate) fn next_order(&self) -> i32 {
        self.sequencer.next()
    }
}
