use anyhow::{anyhow, Result};
use async_trait::async_trait;
use ethers::types::{TransactionReceipt, H160, H256};

/// The three calls a deployment goes through: resolve a factory for a
/// named contract, submit its deployment, then wait for the chain to
/// accept it.
#[async_trait]
pub trait DeploymentFramework: Send + Sync {
    type Factory: Send + Sync;
    type Pending: Send;

    async fn contract_factory(&self, name: &str) -> Result<Self::Factory>;

    async fn deploy(&self, factory: &Self::Factory) -> Result<Self::Pending>;

    async fn confirm(&self, pending: Self::Pending) -> Result<Deployed>;
}

/// A confirmed deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deployed {
    pub address: H160,
    pub transaction_hash: Option<H256>,
    pub block_number: Option<u64>,
}

impl Deployed {
    pub fn from_receipt(receipt: &TransactionReceipt) -> Result<Self> {
        let address = receipt.contract_address.ok_or(anyhow!(
            "transaction {:?} did not create a contract",
            receipt.transaction_hash
        ))?;
        Ok(Self {
            address,
            transaction_hash: Some(receipt.transaction_hash),
            block_number: receipt.block_number.map(|n| n.as_u64()),
        })
    }
}
