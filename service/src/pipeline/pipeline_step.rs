/// The action to take after a step completes.
///
/// Steps return this enum to control pipeline flow:
/// - `Continue`: Proceed to the next step normally
/// - `Skip`: Successfully exit early without running remaining steps
/// - `Abort`: Stop the pipeline with an error
#[derive(Debug, Clone, PartialEq)]
pub enum StepAction<E> {
    /// Continue to the next step
    Continue,
    /// Skip all remaining steps (successful early exit)
    Skip,
    /// Abort the pipeline with an error
    Abort(E),
}

/// A trait for defining pipeline steps.
///
/// Each step receives a mutable reference to the context and can:
/// - Read from the context to access shared state and dependencies
/// - Modify the context to store results or update state
/// - Return a `StepAction` to control pipeline execution flow
///
/// # Type Parameters
///
/// * `T` - The context type that contains all state and dependencies needed by steps
/// * `E` - The error a step aborts the pipeline with
#[async_trait::async_trait]
pub trait PipelineStep<T, E>: Send + Sync {
    /// Returns the name of this step for logging and debugging.
    fn name(&self) -> &'static str;

    /// Determines if this step should execute based on current context.
    ///
    /// Steps that return `false` are skipped without affecting the pipeline flow.
    /// By default, always returns `true`.
    fn should_execute(&self, _context: &T) -> bool {
        true
    }

    /// Execute the step, modifying the context and returning the next action.
    async fn execute(&self, context: &mut T) -> StepAction<E>;
}
