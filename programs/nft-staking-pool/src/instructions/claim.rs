use anchor_lang::prelude::*;

use super::claim_base::*;
use crate::accrual::plan_claim;

#[derive(Accounts)]
pub struct Claim<'info> {
    pub claim_base: ClaimBase<'info>,
}

pub fn handler(ctx: Context<Claim>) -> Result<()> {
    let claim_base = &mut ctx.accounts.claim_base;
    let now = claim_base.clock.unix_timestamp;
    let plan = plan_claim(&claim_base.pool, [&*claim_base.stake_record], now)?;

    claim_base.pay_out(&plan)?;
    claim_base.stake_record.withdrawn_number = plan.withdrawn_numbers[0];
    Ok(())
}
