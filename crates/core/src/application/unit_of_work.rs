// Unit of work completion

use crate::error::Result;
use crate::port::UnitOfWork;
use tracing::{debug, warn};

/// Close a unit of work according to the outcome of the work done in it
///
/// `Ok` commits and returns the value; a failed commit is returned as the
/// storage error it is. `Err` rolls back and returns the original error
/// unchanged; if the rollback itself fails that is only logged. Either way
/// the handle is consumed and its connection goes back to the provider.
pub async fn finish<T>(uow: Box<dyn UnitOfWork>, outcome: Result<T>) -> Result<T> {
    match outcome {
        Ok(value) => {
            uow.commit().await?;
            debug!("Transaction committed");
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = uow.rollback().await {
                warn!(
                    error = %rollback_err,
                    original_error = %err,
                    "Rollback failed"
                );
            } else {
                debug!(error = %err, "Transaction rolled back");
            }
            Err(err)
        }
    }
}
