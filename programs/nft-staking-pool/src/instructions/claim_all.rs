use anchor_lang::{prelude::*, AccountsExit};

use super::claim_base::*;
use crate::{accrual::plan_claim, errors::ErrorCode};

#[derive(Accounts)]
pub struct ClaimAll<'info> {
    pub claim_base: ClaimBase<'info>,
}

pub fn handler<'info>(ctx: Context<'_, '_, '_, 'info, ClaimAll<'info>>) -> Result<()> {
    let claim_base = &mut ctx.accounts.claim_base;
    let mut additional_records = claim_base.load_additional_records(ctx.remaining_accounts)?;

    let now = claim_base.clock.unix_timestamp;
    let plan = plan_claim(
        &claim_base.pool,
        std::iter::once(&*claim_base.stake_record)
            .chain(additional_records.iter().map(|record| &**record)),
        now,
    )?;

    claim_base.pay_out(&plan)?;

    let (first, rest) = plan
        .withdrawn_numbers
        .split_first()
        .ok_or(ErrorCode::InvalidStakeRecord)?;
    claim_base.stake_record.withdrawn_number = *first;
    for (record, withdrawn_number) in additional_records.iter_mut().zip(rest) {
        record.withdrawn_number = *withdrawn_number;
        // remaining accounts are not persisted by the Accounts struct
        record.exit(&crate::ID)?;
    }
    Ok(())
}
