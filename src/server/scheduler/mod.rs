//! Cron scheduler running the jobs contributed by plugins.

use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::error::AppError;

/// Registers the jobs and starts the scheduler.
///
/// The returned scheduler must be kept alive; dropping it stops the jobs.
///
/// # Arguments
/// - `jobs` - Jobs built by the plugin registry
///
/// # Returns
/// - `Ok(JobScheduler)` - Scheduler running every job
/// - `Err(AppError::SchedulerErr)` - Scheduler could not be created, or a job rejected
pub async fn start_scheduler(jobs: Vec<Job>) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let count = jobs.len();
    for job in jobs {
        scheduler.add(job).await?;
    }

    scheduler.start().await?;

    tracing::info!("Scheduler started with {} jobs", count);

    Ok(scheduler)
}
