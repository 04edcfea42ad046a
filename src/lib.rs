//! Generic promise handles and task combinators for asynchronous control flow.
//!
//! `promix` provides a small set of primitives for launching parameterized
//! computations concurrently, obtaining handles to their eventual results,
//! chaining dependent computations, and joining over sets of in-flight
//! handles, with cooperative cancellation threaded through everything.
//!
//! The crate is designed to work independently of any specific async runtime,
//! making it flexible and adaptable to various execution environments.
//!
//! Features include:
//! - A `Promise` handle with blocking (`get`, `wait`) and non-blocking
//!   (`try_get`) readers, backed by a one-shot completion signal
//! - `run` for launching a `Task` concurrently and `then` for chaining a
//!   continuation onto a promise, with error propagation that skips the
//!   continuation entirely
//! - `wait` for joining over promises of heterogeneous value types through
//!   the narrow `Waiting` capability, with first-error-wins semantics
//! - `with_cancellation` for adapting any `Task` into one that races
//!   completion against a context's cancellation signal
//!
//! Cancellation is advisory, never preemptive: a cancelled context makes
//! waiters stop waiting, while work already in flight runs to natural
//! completion and has its result discarded.

pub mod cancel;
pub mod error;
pub mod join;
mod pool;
pub mod promise;
pub mod run;
pub mod task;
pub mod task_ext;

pub use cancel::{CancelReason, Cancellation, Context};
pub use error::TaskError;
pub use join::wait;
pub use promise::{Promise, Waiting};
pub use run::{run, then};
pub use task::{Task, TaskFn, WithCancellation, task_fn, with_cancellation};
