use std::fmt::Display;

use super::pipeline_step::{PipelineStep, StepAction};

/// A generic pipeline that executes a series of steps in sequence.
///
/// Each step can decide whether to continue, skip remaining steps, or abort the
/// entire pipeline. Steps run one at a time, a step only starts after the
/// previous one has returned.
///
/// # Type Parameters
///
/// * `T` - The context passed through all steps. It holds the dependencies and
///   the results steps need to read or modify.
/// * `E` - The error returned when a step aborts.
///
/// # Example
///
/// ```ignore
/// struct MyContext {
///     results: Vec<String>,
/// }
///
/// struct Step1;
/// #[async_trait::async_trait]
/// impl PipelineStep<MyContext, MyError> for Step1 {
///     fn name(&self) -> &'static str { "step_1" }
///     async fn execute(&self, context: &mut MyContext) -> StepAction<MyError> {
///         context.results.push("step1".to_string());
///         StepAction::Continue
///     }
/// }
///
/// let pipeline = Pipeline::with_steps(vec![Box::new(Step1)]);
/// let mut context = MyContext { results: Vec::new() };
/// pipeline.execute(&mut context).await?;
/// ```
pub struct Pipeline<T, E> {
    pub steps: Vec<Box<dyn PipelineStep<T, E>>>,
}

impl<T, E: Display> Pipeline<T, E> {
    /// Create a pipeline with the given steps.
    pub fn with_steps(steps: Vec<Box<dyn PipelineStep<T, E>>>) -> Self {
        Self { steps }
    }

    /// Execute all steps in the pipeline in sequence.
    ///
    /// Returns `Ok(())` if all steps complete or a step returns `Skip`,
    /// `Err(error)` as soon as a step returns `Abort(error)`.
    pub async fn execute(&self, context: &mut T) -> Result<(), E> {
        for step in &self.steps {
            if !step.should_execute(context) {
                tracing::info!("Step {} will be skipped based on context", step.name());
                continue;
            }

            tracing::info!("Executing step: {}", step.name());

            match step.execute(context).await {
                StepAction::Continue => continue,
                StepAction::Skip => {
                    tracing::info!("Step {} requested skip - stopping pipeline", step.name());
                    return Ok(());
                }
                StepAction::Abort(error) => {
                    tracing::info!("Step {} aborted the pipeline", step.name());
                    tracing::debug!("Abort reason: {}", error);
                    return Err(error);
                }
            }
        }

        Ok(())
    }
}
