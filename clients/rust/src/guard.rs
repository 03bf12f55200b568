use std::{
    collections::HashSet,
    sync::{Arc, Mutex, MutexGuard},
};

use solana_sdk::pubkey::Pubkey;

use crate::error::ClientError;

/// Tracks StakeRecords with a mutating request in flight, so a session never
/// submits two requests against the same record at once.
#[derive(Clone, Debug, Default)]
pub struct SubmissionGuard {
    in_flight: Arc<Mutex<HashSet<Pubkey>>>,
}

impl SubmissionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<Pubkey>> {
        // the set stays consistent even if a holder panicked
        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Reserve every record in `records`. Fails without reserving anything when
    /// one of them is already reserved. The reservation ends when the returned
    /// [Submission] is dropped.
    pub fn acquire(&self, records: &[Pubkey]) -> Result<Submission, ClientError> {
        let mut in_flight = self.lock();
        if let Some(busy) = records.iter().find(|record| in_flight.contains(*record)) {
            return Err(ClientError::SubmissionInFlight(*busy));
        }
        in_flight.extend(records.iter().copied());
        Ok(Submission {
            guard: self.clone(),
            records: records.to_vec(),
        })
    }

    pub fn is_in_flight(&self, record: &Pubkey) -> bool {
        self.lock().contains(record)
    }
}

#[must_use]
#[derive(Debug)]
pub struct Submission {
    guard: SubmissionGuard,
    records: Vec<Pubkey>,
}

impl Drop for Submission {
    fn drop(&mut self) {
        let mut in_flight = self.guard.lock();
        for record in &self.records {
            in_flight.remove(record);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn rejects_second_submission_for_same_record() {
        let guard = SubmissionGuard::new();
        let record = Pubkey::new_unique();

        let first = guard.acquire(&[record]).unwrap();
        assert_matches!(
            guard.acquire(&[record]),
            Err(ClientError::SubmissionInFlight(busy)) if busy == record
        );
        drop(first);
        assert!(!guard.is_in_flight(&record));
        assert!(guard.acquire(&[record]).is_ok());
    }

    #[test]
    fn batch_is_reserved_all_or_nothing() {
        let guard = SubmissionGuard::new();
        let (a, b, c) = (Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique());

        let _held = guard.acquire(&[b]).unwrap();
        assert!(guard.acquire(&[a, b, c]).is_err());
        assert!(!guard.is_in_flight(&a));
        assert!(!guard.is_in_flight(&c));

        let _other = guard.acquire(&[a, c]).unwrap();
        assert!(guard.is_in_flight(&a));
    }

    #[test]
    fn clones_share_reservations() {
        let guard = SubmissionGuard::new();
        let record = Pubkey::new_unique();
        let _held = guard.acquire(&[record]).unwrap();
        assert!(guard.clone().acquire(&[record]).is_err());
    }
}
