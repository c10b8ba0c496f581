use std::{fmt, io::Write};

use anyhow::{Context, Result};

use crate::framework::{Deployed, DeploymentFramework};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployStage {
    ResolveFactory,
    Submit,
    Confirm,
}

impl fmt::Display for DeployStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeployStage::ResolveFactory => f.write_str("failed to resolve contract factory"),
            DeployStage::Submit => f.write_str("failed to submit deployment"),
            DeployStage::Confirm => f.write_str("failed to confirm deployment"),
        }
    }
}

/// Deploys `contract_name` and writes `contract deployed to : <address>`
/// to `out`. Nothing is written when any step fails.
pub async fn run_deployment<F, W>(
    framework: &F,
    contract_name: &str,
    out: &mut W,
) -> Result<Deployed>
where
    F: DeploymentFramework,
    W: Write,
{
    log::info!("resolving contract factory for {}", contract_name);
    let factory = framework
        .contract_factory(contract_name)
        .await
        .context(DeployStage::ResolveFactory)?;

    log::info!("submitting deployment of {}", contract_name);
    let pending = framework
        .deploy(&factory)
        .await
        .context(DeployStage::Submit)?;

    log::info!("waiting for deployment of {} to be confirmed", contract_name);
    let deployed = framework
        .confirm(pending)
        .await
        .context(DeployStage::Confirm)?;

    writeln!(out, "contract deployed to : {:?}", deployed.address)?;
    Ok(deployed)
}

/// Maps the outcome of a run to the process exit status, writing the error
/// chain to `out` on failure.
pub fn exit_status<T, W: Write>(result: &Result<T>, out: &mut W) -> u8 {
    match result {
        Ok(_) => 0,
        Err(err) => {
            log::error!("deployment failed: {:#}", err);
            if let Err(write_err) = writeln!(out, "{:?}", err) {
                log::warn!("could not print deployment error: {}", write_err);
            }
            1
        }
    }
}
