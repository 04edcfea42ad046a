use crate::task::{Task, WithCancellation, with_cancellation};

/// Extend `Task` with adapter operations.
pub trait TaskExt<In>: Task<In> {
    fn with_cancellation(self) -> WithCancellation<Self>
    where
        Self: Sized,
    {
        with_cancellation(self)
    }
}

impl<In, T> TaskExt<In> for T where T: Task<In> {}
