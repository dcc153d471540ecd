//! `DryRun` short-circuit.

use ruststack_ec2_model::error::Ec2Error;
use ruststack_ec2_query::QueryParams;

/// Fail with `DryRunOperation` when `DryRun=true`.
///
/// Call after validating the request and before touching the store, so a dry
/// run reports what a real call would have done without mutating anything.
/// A malformed `DryRun` value is an `InvalidParameterValue` error.
pub fn check_dry_run(params: &QueryParams, action: &str) -> Result<(), Ec2Error> {
    if params.is_dry_run()? {
        tracing::debug!(action, "dry run requested, short-circuiting");
        return Err(Ec2Error::dry_run());
    }
    Ok(())
}
