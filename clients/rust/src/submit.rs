use std::time::Duration;

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    instruction::Instruction,
    signature::Signature,
    signer::Signer,
    signers::Signers,
    transaction::{Transaction, TransactionError},
};

use crate::error::ClientError;

/// Default time to wait for a submitted transaction to be confirmed.
pub const DEFAULT_CONFIRMATION_DEADLINE: Duration = Duration::from_secs(60);

const STATUS_POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug)]
pub enum SubmissionOutcome {
    Confirmed(Signature),
    /// The transaction was rejected, either before sending or by the cluster.
    Failed(SubmissionError),
    /// The deadline passed before confirmation. The transaction may still land,
    /// state has to be queried again before retrying.
    Unknown(Signature),
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("Transaction {signature} failed: {error}")]
    Transaction {
        signature: Signature,
        error: TransactionError,
    },
}

impl SubmissionOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed(_))
    }

    pub fn signature(&self) -> Option<&Signature> {
        match self {
            Self::Confirmed(signature) | Self::Unknown(signature) => Some(signature),
            Self::Failed(SubmissionError::Transaction { signature, .. }) => Some(signature),
            Self::Failed(SubmissionError::Client(_)) => None,
        }
    }
}

impl From<ClientError> for SubmissionOutcome {
    fn from(value: ClientError) -> Self {
        Self::Failed(value.into())
    }
}

/// Sign and send `instructions` paid by `payer`, then wait up to `deadline` for
/// the cluster to confirm it.
pub async fn submit<T: Signers>(
    rpc_client: &RpcClient,
    instructions: &[Instruction],
    payer: &dyn Signer,
    signers: &T,
    deadline: Duration,
) -> SubmissionOutcome {
    let signature = match send(rpc_client, instructions, payer, signers).await {
        Ok(signature) => signature,
        Err(err) => return err.into(),
    };
    log::debug!("sent {signature}, waiting up to {deadline:?}");

    match tokio::time::timeout(deadline, await_confirmation(rpc_client, &signature)).await {
        Ok(Ok(())) => SubmissionOutcome::Confirmed(signature),
        Ok(Err(error)) => SubmissionOutcome::Failed(SubmissionError::Transaction { signature, error }),
        Err(_) => {
            log::warn!("{signature} not confirmed after {deadline:?}");
            SubmissionOutcome::Unknown(signature)
        }
    }
}

async fn send<T: Signers>(
    rpc_client: &RpcClient,
    instructions: &[Instruction],
    payer: &dyn Signer,
    signers: &T,
) -> Result<Signature, ClientError> {
    let blockhash = rpc_client.get_latest_blockhash().await?;
    let mut transaction = Transaction::new_with_payer(instructions, Some(&payer.pubkey()));
    transaction.try_partial_sign(&[payer], blockhash)?;
    transaction.try_sign(signers, blockhash)?;
    Ok(rpc_client.send_transaction(&transaction).await?)
}

/// Poll the signature status until the transaction is confirmed or failed.
/// RPC errors while polling are transient and retried.
async fn await_confirmation(
    rpc_client: &RpcClient,
    signature: &Signature,
) -> Result<(), TransactionError> {
    loop {
        match rpc_client.get_signature_status(signature).await {
            Ok(Some(status)) => return status,
            Ok(None) => {}
            Err(err) => log::debug!("status of {signature} unavailable: {err}"),
        }
        tokio::time::sleep(STATUS_POLL_INTERVAL).await;
    }
}
