// Chirilica Output Layer
// Contract between the engine and the host field's native insertion

mod guard;

pub use guard::{DeferredReset, NativeInput, SuppressionGuard, TaskId};
