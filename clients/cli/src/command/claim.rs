use std::io::Write;

use nft_staking_pool_client::{StakingClient, SubmissionOutcome};
use solana_sdk::{pubkey::Pubkey, signer::Signer};

use super::confirmed;

/// Claim for one StakeRecord, or for every active one in batches. Every batch
/// outcome is printed before a failure is reported.
pub async fn process_claim(
    client: &StakingClient,
    signer: &dyn Signer,
    stake_record: Option<Pubkey>,
) -> Result<(), Box<dyn std::error::Error>> {
    let outcomes = match stake_record {
        Some(stake_record) => vec![client.claim(signer, &stake_record).await],
        None => client.claim_all(signer).await?,
    };
    if outcomes.is_empty() {
        println!("Nothing to claim");
        return Ok(());
    }

    let batches = outcomes.len();
    let failed = write_outcomes(outcomes, &mut std::io::stdout(), &mut std::io::stderr())?;
    if failed > 0 {
        return Err(format!("{failed} of {batches} claim transactions did not confirm").into());
    }
    Ok(())
}

/// Write one line per batch and return how many did not confirm.
fn write_outcomes(
    outcomes: Vec<SubmissionOutcome>,
    out: &mut impl Write,
    err: &mut impl Write,
) -> std::io::Result<usize> {
    let batches = outcomes.len();
    let mut failed = 0;
    for (batch, outcome) in outcomes.into_iter().enumerate() {
        let batch = batch + 1;
        if !outcome.is_confirmed() {
            failed += 1;
        }
        match confirmed(outcome) {
            Ok(signature) => writeln!(out, "Batch {batch}/{batches}: {signature}")?,
            Err(reason) => writeln!(err, "Batch {batch}/{batches}: {reason}")?,
        }
    }
    Ok(failed)
}

pub async fn process_claimable(
    client: &StakingClient,
    owner: Pubkey,
) -> Result<(), Box<dyn std::error::Error>> {
    let estimate = client.get_claimable_amount(&owner).await?;
    for record in &estimate.records {
        println!(
            "{}: {} periods earned, {} payable, {} reward",
            record.address, record.accrual.periods_elapsed, record.accrual.payable, record.amount
        );
    }
    println!("Claimable at {}: {}", estimate.now, estimate.total);
    Ok(())
}
