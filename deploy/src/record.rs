use std::{fs::File, path::Path};

use anyhow::{Context, Result};
use ethers::types::{H160, H256};
use serde::{Deserialize, Serialize};

use crate::framework::Deployed;

/// What a frontend needs to find the deployed contract later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    pub contract_name: String,
    pub address: H160,
    pub transaction_hash: Option<H256>,
    pub block_number: Option<u64>,
    pub chain_id: u64,
}

impl DeploymentRecord {
    pub fn new(contract_name: &str, chain_id: u64, deployed: &Deployed) -> Self {
        Self {
            contract_name: contract_name.to_string(),
            address: deployed.address,
            transaction_hash: deployed.transaction_hash,
            block_number: deployed.block_number,
            chain_id,
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.write(path).with_context(|| {
            format!(
                "deployment succeeded but record could not be written to {}",
                path.display()
            )
        })?;
        log::info!("deployment record written to {}", path.display());
        Ok(())
    }

    fn write(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}
