// Chirilica Native-Insertion Guard
// One-shot flag that blocks the host field's own text insertion

use strum_macros::{Display, EnumString};

/// Kinds of native edits a host field may attempt on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum NativeInput {
    InsertText,
    InsertCompositionText,
    /// Legacy single-shot text event some platforms still send
    TextInput,
    DeleteContentBackward,
    DeleteContentForward,
    InsertLineBreak,
    Other,
}

impl NativeInput {
    /// Insertions the guard is allowed to block.
    pub fn is_insertion(self) -> bool {
        matches!(
            self,
            NativeInput::InsertText | NativeInput::InsertCompositionText | NativeInput::TextInput
        )
    }
}

/// Handle for a scheduled reset. Ids are never reused within one guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

/// A cancellable task that runs on the next cooperative tick.
///
/// At most one task is outstanding; scheduling again cancels the old one.
#[derive(Debug, Clone, Default)]
pub struct DeferredReset {
    pending: Option<TaskId>,
    next_id: u64,
}

impl DeferredReset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a new reset, replacing any pending one.
    pub fn schedule(&mut self) -> TaskId {
        if let Some(old) = self.pending.take() {
            log::trace!("cancelling pending reset {:?}", old);
        }
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.pending = Some(id);
        id
    }

    pub fn cancel(&mut self) -> Option<TaskId> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<TaskId> {
        self.pending
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Run the pending task, if any. Returns the id that fired.
    pub fn fire(&mut self) -> Option<TaskId> {
        self.pending.take()
    }
}

/// Tells the host to reject its default insertion for the event currently
/// being intercepted.
///
/// `arm` is synchronous; the flag drops on the next `tick`, after all
/// synchronous work for the event has run.
#[derive(Debug, Clone, Default)]
pub struct SuppressionGuard {
    armed: bool,
    reset: DeferredReset,
}

impl SuppressionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self) -> TaskId {
        self.armed = true;
        let id = self.reset.schedule();
        log::trace!("suppression armed, reset {:?} scheduled", id);
        id
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn pending_reset(&self) -> Option<TaskId> {
        self.reset.pending()
    }

    /// Secondary guard consulted where the default insertion would happen.
    pub fn blocks(&self, input: NativeInput) -> bool {
        self.armed && input.is_insertion()
    }

    /// One turn of the cooperative loop. Returns true if a reset fired.
    pub fn tick(&mut self) -> bool {
        match self.reset.fire() {
            Some(id) => {
                log::trace!("suppression reset {:?} fired", id);
                self.armed = false;
                true
            }
            None => false,
        }
    }
}
