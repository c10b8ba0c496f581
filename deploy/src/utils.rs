use std::time::Duration;

use anyhow::{anyhow, Result};
use ethers::{
    providers::Middleware,
    types::{
        transaction::eip2718::TypedTransaction, Bytes, Eip1559TransactionRequest,
        TransactionReceipt, TransactionRequest, H256, U64,
    },
};

/// Contract creation transaction for `code`; `to` stays unset.
pub fn creation_transaction(code: Bytes, legacy: bool) -> TypedTransaction {
    if legacy {
        TypedTransaction::Legacy(TransactionRequest::new().data(code))
    } else {
        TypedTransaction::Eip1559(Eip1559TransactionRequest::new().data(code))
    }
}

pub async fn send_transaction<M>(client: &M, mut tx: TypedTransaction) -> Result<H256>
where
    M: Middleware,
    M::Error: 'static,
{
    client.fill_transaction(&mut tx, None).await?;

    let transaction_hash = client.send_transaction(tx, None).await?.tx_hash();
    log::info!("transaction hash:{:?}", transaction_hash);
    Ok(transaction_hash)
}

/// Polls until the transaction is mined and `confirmations` blocks deep,
/// then returns its receipt. A reverted transaction is an error.
pub async fn wait_receipt<M>(
    client: &M,
    transaction_hash: H256,
    confirmations: usize,
    interval: Duration,
) -> Result<TransactionReceipt>
where
    M: Middleware,
    M::Error: 'static,
{
    let confirmations = confirmations.max(1) as u64;
    loop {
        if let Some(receipt) = client.get_transaction_receipt(transaction_hash).await? {
            if let Some(mined_at) = receipt.block_number {
                let depth = if confirmations == 1 {
                    1
                } else {
                    let current = client.get_block_number().await?;
                    current.saturating_sub(mined_at).as_u64() + 1
                };
                if depth >= confirmations {
                    ensure_succeeded(&receipt)?;
                    return Ok(receipt);
                }
                log::debug!(
                    "transaction {:?} has {}/{} confirmations",
                    transaction_hash,
                    depth,
                    confirmations
                );
            }
        }
        tokio::time::sleep(interval).await;
    }
}

fn ensure_succeeded(receipt: &TransactionReceipt) -> Result<()> {
    match receipt.status {
        Some(status) if status == U64::zero() => Err(anyhow!(
            "transaction {:?} reverted in block {:?}",
            receipt.transaction_hash,
            receipt.block_number.unwrap_or_default()
        )),
        _ => Ok(()),
    }
}
