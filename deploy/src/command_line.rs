use std::{io::Write, path::PathBuf, time::Duration};

use anyhow::Result;
use clap::Parser;

use crate::{
    deploy::Deploy, framework::Deployed, record::DeploymentRecord, runner::run_deployment,
};

/// Deploys a compiled contract and prints its address.
#[derive(Debug, Parser)]
pub struct CommandLine {
    #[clap(short, long, env = "DEPLOY_RPC_URL", default_value = "http://127.0.0.1:8545")]
    rpc: String,

    #[clap(long, env = "DEPLOY_PRIVATE_KEY", hide_env_values = true)]
    sk: String,

    /// Contract name, or `path/Foo.sol:Foo` when the name is ambiguous
    #[clap(short, long, env = "DEPLOY_CONTRACT", default_value = "NFTMarketplace")]
    contract: String,

    /// Hardhat artifacts directory
    #[clap(short, long, env = "DEPLOY_ARTIFACTS", default_value = "artifacts")]
    artifacts: PathBuf,

    #[clap(long, env = "DEPLOY_CONFIRMATIONS", default_value_t = 1)]
    confirmations: usize,

    #[clap(long, env = "DEPLOY_POLL_INTERVAL_MS", default_value_t = 1000)]
    poll_interval_ms: u64,

    /// Send a legacy (pre EIP-1559) transaction
    #[clap(long, env = "DEPLOY_LEGACY")]
    legacy: bool,

    /// Write the deployment record as JSON to this file
    #[clap(short, long, env = "DEPLOY_OUTPUT")]
    output: Option<PathBuf>,
}

impl CommandLine {
    pub async fn execute<W: Write>(self, out: &mut W) -> Result<Deployed> {
        let deploy = Deploy::new(&self.rpc, &self.sk, &self.artifacts)
            .await?
            .confirmations(self.confirmations)
            .poll_interval(Duration::from_millis(self.poll_interval_ms))
            .legacy(self.legacy);

        let deployed = run_deployment(&deploy, &self.contract, out).await?;

        if let Some(output) = &self.output {
            DeploymentRecord::new(&self.contract, deploy.chain_id(), &deployed).save(output)?;
        }
        Ok(deployed)
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn argument(id: &str) -> clap::Arg {
        CommandLine::command()
            .get_arguments()
            .find(|arg| arg.get_id() == id)
            .cloned()
            .unwrap()
    }

    fn default_of(id: &str) -> String {
        argument(id).get_default_values()[0]
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn defaults() {
        assert_eq!(default_of("rpc"), "http://127.0.0.1:8545");
        assert_eq!(default_of("contract"), "NFTMarketplace");
        assert_eq!(default_of("artifacts"), "artifacts");
        assert_eq!(default_of("confirmations"), "1");
        assert_eq!(default_of("poll_interval_ms"), "1000");
        assert!(argument("output").get_default_values().is_empty());
    }

    #[test]
    fn every_flag_reads_the_environment() {
        for (id, env) in [
            ("rpc", "DEPLOY_RPC_URL"),
            ("sk", "DEPLOY_PRIVATE_KEY"),
            ("contract", "DEPLOY_CONTRACT"),
            ("artifacts", "DEPLOY_ARTIFACTS"),
            ("confirmations", "DEPLOY_CONFIRMATIONS"),
            ("poll_interval_ms", "DEPLOY_POLL_INTERVAL_MS"),
            ("legacy", "DEPLOY_LEGACY"),
            ("output", "DEPLOY_OUTPUT"),
        ] {
            assert_eq!(argument(id).get_env(), Some(std::ffi::OsStr::new(env)));
        }
    }

    #[test]
    fn private_key_is_required() {
        assert!(argument("sk").is_required_set());
        assert!(!argument("contract").is_required_set());
    }

    #[test]
    fn flags_override_defaults() {
        let cmd = CommandLine::try_parse_from([
            "contract-deployer",
            "--sk",
            "0x01",
            "--contract",
            "contracts/Token.sol:Token",
            "--confirmations",
            "3",
            "--legacy",
            "--output",
            "deployment.json",
        ])
        .unwrap();
        assert_eq!(cmd.contract, "contracts/Token.sol:Token");
        assert_eq!(cmd.confirmations, 3);
        assert!(cmd.legacy);
        assert_eq!(cmd.output, Some(PathBuf::from("deployment.json")));
    }
}
