use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use ethers::{
    contract::ContractFactory,
    middleware::SignerMiddleware,
    providers::{Http, Middleware, Provider},
    signers::{LocalWallet, Signer},
    types::{transaction::eip2718::TypedTransaction, H256},
    utils::hex,
};

use crate::{
    artifacts::Artifact,
    framework::{Deployed, DeploymentFramework},
    utils::{creation_transaction, send_transaction, wait_receipt},
};

pub struct Deploy<M> {
    client: Arc<M>,
    chain_id: u64,
    artifacts: PathBuf,
    confirmations: usize,
    poll_interval: Duration,
    legacy: bool,
}

impl Deploy<SignerMiddleware<Provider<Http>, LocalWallet>> {
    pub async fn new(rpc: &str, sk: &str, artifacts: &Path) -> Result<Self> {
        let wallet = LocalWallet::from_bytes(&hex::decode(sk.strip_prefix("0x").unwrap_or(sk))?)?;
        let provider = Provider::<Http>::try_from(rpc)?;

        let chain_id = provider.get_chainid().await?.as_u64();
        let client = Arc::new(SignerMiddleware::new(
            provider,
            wallet.with_chain_id(chain_id),
        ));
        log::info!(
            "deployer {:?} on chain {}",
            client.signer().address(),
            chain_id
        );

        Ok(Self::with_client(client, chain_id, artifacts))
    }
}

impl<M> Deploy<M>
where
    M: Middleware + 'static,
    M::Error: 'static,
{
    pub fn with_client(client: Arc<M>, chain_id: u64, artifacts: &Path) -> Self {
        Self {
            client,
            chain_id,
            artifacts: artifacts.to_path_buf(),
            confirmations: 1,
            poll_interval: Duration::from_secs(1),
            legacy: false,
        }
    }

    pub fn confirmations(mut self, confirmations: usize) -> Self {
        self.confirmations = confirmations;
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn legacy(mut self, legacy: bool) -> Self {
        self.legacy = legacy;
        self
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// The no-argument constructor call encoded by `factory`.
    pub fn creation_tx(&self, factory: &ContractFactory<M>) -> Result<TypedTransaction> {
        let init_code = factory
            .clone()
            .deploy(())?
            .tx
            .data()
            .ok_or(anyhow!("tx data not found"))?
            .clone();
        Ok(creation_transaction(init_code, self.legacy))
    }
}

#[async_trait]
impl<M> DeploymentFramework for Deploy<M>
where
    M: Middleware + 'static,
    M::Error: 'static,
{
    type Factory = ContractFactory<M>;
    type Pending = H256;

    async fn contract_factory(&self, name: &str) -> Result<Self::Factory> {
        let artifact = Artifact::find(&self.artifacts, name)?;
        let bytecode = artifact.deployable_bytecode()?;
        log::debug!(
            "loaded {}:{} ({} bytes)",
            artifact.source_name,
            artifact.contract_name,
            bytecode.len()
        );

        Ok(ContractFactory::new(
            artifact.abi,
            bytecode,
            self.client.clone(),
        ))
    }

    async fn deploy(&self, factory: &Self::Factory) -> Result<H256> {
        let tx = self.creation_tx(factory)?;
        send_transaction(self.client.as_ref(), tx).await
    }

    async fn confirm(&self, transaction_hash: H256) -> Result<Deployed> {
        let receipt = wait_receipt(
            self.client.as_ref(),
            transaction_hash,
            self.confirmations,
            self.poll_interval,
        )
        .await?;
        Deployed::from_receipt(&receipt)
    }
}
