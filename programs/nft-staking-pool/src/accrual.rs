//! Time based reward accrual.
//!
//! A StakeRecord earns `reward_amount` for every whole `period` that has elapsed since
//! `stake_time`, up to `withdrawable` periods in total. `withdrawn_number` counts the
//! periods already paid out, so the payable amount is the difference between the two.
//! `now` must always be the cluster clock.
use anchor_lang::prelude::*;

use crate::{
    errors::ErrorCode,
    state::{Pool, StakeRecord},
};

/// Periods a StakeRecord has earned at a point in time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Accrual {
    /// Whole periods since staking, capped at the Pool's `withdrawable`.
    pub periods_elapsed: u8,
    /// Periods earned but not yet paid out.
    pub payable: u8,
}

pub fn accrued(
    now: i64,
    stake_time: i64,
    period: i64,
    withdrawable: u8,
    withdrawn_number: u8,
) -> Result<Accrual> {
    require!(period > 0, ErrorCode::InvalidPeriod);

    let elapsed = now
        .checked_sub(stake_time)
        .ok_or(ErrorCode::ArithmeticError)?;
    let periods_elapsed = if elapsed <= 0 {
        0
    } else {
        // floor division, partial periods never count
        u8::try_from(i64::min(elapsed / period, i64::from(withdrawable)))
            .map_err(|_| ErrorCode::ArithmeticError)?
    };

    Ok(Accrual {
        periods_elapsed,
        payable: periods_elapsed.saturating_sub(withdrawn_number),
    })
}

/// Reward token amount for `periods` at `reward_amount` per period.
pub fn reward_for(periods: u8, reward_amount: u64) -> Result<u64> {
    u64::from(periods)
        .checked_mul(reward_amount)
        .ok_or_else(|| error!(ErrorCode::ArithmeticError))
}

/// Outcome of settling a batch of StakeRecords against a Pool at one instant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClaimPlan {
    /// Total reward token amount to transfer to the owner.
    pub total: u64,
    /// `withdrawn_number` each record must be set to, in input order.
    pub withdrawn_numbers: Vec<u8>,
}

/// Compute the payout of a batch of StakeRecords without mutating them.
///
/// Unstaked records contribute nothing and keep their `withdrawn_number`. The new
/// `withdrawn_number` of a record is never lower than the current one.
pub fn plan_claim<'a, I>(pool: &Pool, records: I, now: i64) -> Result<ClaimPlan>
where
    I: IntoIterator<Item = &'a StakeRecord>,
{
    let mut plan = ClaimPlan::default();
    for record in records {
        if record.unstaked {
            plan.withdrawn_numbers.push(record.withdrawn_number);
            continue;
        }
        let accrual = record.accrued(pool, now)?;
        let amount = reward_for(accrual.payable, pool.reward_amount)?;
        plan.total = plan
            .total
            .checked_add(amount)
            .ok_or(ErrorCode::ArithmeticError)?;
        plan.withdrawn_numbers
            .push(u8::max(record.withdrawn_number, accrual.periods_elapsed));
    }
    Ok(plan)
}
