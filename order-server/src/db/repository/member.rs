//! Member repository - the loyalty points ledger
//!
//! All balance changes go through a single redb write transaction, which
//! serializes concurrent mutations to the same member. A debit re-reads
//! the balance inside its own transaction, so two simultaneous redemptions
//! can never both succeed on an insufficient balance.

use redb::ReadableTable;

use crate::db::store::{MEMBERS_TABLE, MEMBER_PHONES_TABLE};
use crate::db::{Store, StoreError, StoreResult};
use shared::models::Member;
use shared::util::{new_id, now_millis};

/// Points credited once when a phone number is first seen
pub const FIRST_ORDER_BONUS: i64 = 5000;

/// Loyalty ledger access, keyed by member ID with a phone index
#[derive(Clone)]
pub struct MemberRepository {
    store: Store,
}

impl MemberRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Look up a member by phone number
    pub fn find_by_phone(&self, phone: &str) -> StoreResult<Option<Member>> {
        let read_txn = self.store.begin_read()?;
        let phones = read_txn.open_table(MEMBER_PHONES_TABLE)?;

        let member_id = match phones.get(phone)? {
            Some(guard) => guard.value().to_string(),
            None => return Ok(None),
        };

        let members = read_txn.open_table(MEMBERS_TABLE)?;
        match members.get(member_id.as_str())? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Look up a member by ID
    pub fn find_by_id(&self, member_id: &str) -> StoreResult<Option<Member>> {
        let read_txn = self.store.begin_read()?;
        let members = read_txn.open_table(MEMBERS_TABLE)?;
        match members.get(member_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Get the member for a phone, creating one with the signup bonus if absent
    ///
    /// New members start with [`FIRST_ORDER_BONUS`] points and the bonus flag
    /// set, all written in the same transaction as the phone index entry.
    pub fn get_or_create(&self, phone: &str) -> StoreResult<Member> {
        let txn = self.store.begin_write()?;
        let member = {
            let mut phones = txn.open_table(MEMBER_PHONES_TABLE)?;
            let existing_id = phones.get(phone)?.map(|g| g.value().to_string());

            let mut members = txn.open_table(MEMBERS_TABLE)?;
            match existing_id {
                Some(id) => match members.get(id.as_str())? {
                    Some(value) => serde_json::from_slice(value.value())?,
                    None => return Err(StoreError::MemberNotFound(phone.to_string())),
                },
                None => {
                    let now = now_millis();
                    let member = Member {
                        id: new_id(),
                        phone: phone.to_string(),
                        points: FIRST_ORDER_BONUS,
                        first_bonus_awarded: true,
                        created_at: now,
                        updated_at: now,
                    };
                    let value = serde_json::to_vec(&member)?;
                    members.insert(member.id.as_str(), value.as_slice())?;
                    phones.insert(phone, member.id.as_str())?;
                    member
                }
            }
        };
        txn.commit()?;
        Ok(member)
    }

    /// Backfill the signup bonus for members created before it existed
    ///
    /// No-op for members whose flag is already set, so the bonus is credited
    /// at most once per member no matter how often this runs.
    pub fn apply_first_bonus_if_missing(&self, member_id: &str) -> StoreResult<Member> {
        self.mutate(member_id, |member| {
            if !member.first_bonus_awarded {
                member.points += FIRST_ORDER_BONUS;
                member.first_bonus_awarded = true;
                member.updated_at = now_millis();
            }
            Ok(())
        })
    }

    /// Add points to a member's balance
    pub fn credit(&self, member_id: &str, amount: i64) -> StoreResult<Member> {
        self.mutate(member_id, |member| {
            member.points += amount;
            member.updated_at = now_millis();
            Ok(())
        })
    }

    /// Deduct points, failing without commit if the balance is too low
    ///
    /// The balance check happens inside the write transaction. An
    /// insufficient balance aborts the transaction, leaving the ledger
    /// untouched.
    pub fn debit(&self, member_id: &str, amount: i64) -> StoreResult<Member> {
        self.mutate(member_id, |member| {
            if member.points < amount {
                return Err(StoreError::InsufficientPoints {
                    balance: member.points,
                    required: amount,
                });
            }
            member.points -= amount;
            member.updated_at = now_millis();
            Ok(())
        })
    }

    /// Read-modify-write a member record in one write transaction
    fn mutate(
        &self,
        member_id: &str,
        apply: impl FnOnce(&mut Member) -> StoreResult<()>,
    ) -> StoreResult<Member> {
        let txn = self.store.begin_write()?;
        let member = {
            let mut members = txn.open_table(MEMBERS_TABLE)?;

            // Read and clone first, the guard borrows the table
            let mut member: Member = match members.get(member_id)? {
                Some(value) => serde_json::from_slice(value.value())?,
                None => return Err(StoreError::MemberNotFound(member_id.to_string())),
            };

            apply(&mut member)?;

            let value = serde_json::to_vec(&member)?;
            members.insert(member.id.as_str(), value.as_slice())?;
            member
        };
        txn.commit()?;
        Ok(member)
    }
}
