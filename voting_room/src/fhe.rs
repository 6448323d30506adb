use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};
use near_sdk::collections::LookupMap;
use near_sdk::serde::{Deserialize, Serialize};
use near_sdk::{env, AccountId};

use crate::storage::StorageKey;

/// Opaque handle to an encrypted integer held by the encryption engine.
/// The contract never interprets the ciphertext behind a handle, it only
/// combines handles and manages decryption grants.
#[derive(BorshDeserialize, BorshSerialize, Serialize, Deserialize, Clone, Copy)]
#[serde(crate = "near_sdk::serde")]
#[cfg_attr(not(target_arch = "wasm32"), derive(Debug, PartialEq))]
pub struct CiphertextId(pub u64);

#[derive(BorshDeserialize, BorshSerialize)]
pub struct CipherRecord {
    /// opaque ciphertext bytes, owned by the encryption engine
    pub payload: Vec<u8>,
    /// accounts allowed to request decryption of this handle
    pub acl: Vec<AccountId>,
}

/// Handle table of the encryption engine. Handles are append-only: combining
/// two ciphertexts produces a fresh handle, prior handles stay untouched.
#[derive(BorshDeserialize, BorshSerialize)]
pub struct CipherArena {
    counter: u64,
    records: LookupMap<u64, CipherRecord>,
}

impl CipherArena {
    pub fn new() -> Self {
        Self {
            counter: 0,
            records: LookupMap::new(StorageKey::Ciphertexts),
        }
    }

    /// Materializes an explicit encrypted zero. Every tally must start from
    /// such a handle: the engine rejects operations on defaulted values.
    pub fn new_zero(&mut self) -> CiphertextId {
        self.insert(vec![0; 32])
    }

    /// Converts an externally supplied ciphertext into an internal handle.
    /// Returns None when the proof does not bind the ciphertext to the given
    /// sender and this contract.
    pub fn from_external(
        &mut self,
        ciphertext: &[u8],
        proof: &[u8],
        sender: &AccountId,
    ) -> Option<CiphertextId> {
        if ciphertext.is_empty() || proof != input_proof(ciphertext, sender).as_slice() {
            return None;
        }
        Some(self.insert(ciphertext.to_vec()))
    }

    /// Homomorphic addition: combines two handles into a new one. The new
    /// handle starts with an empty grant list.
    pub fn add(&mut self, a: CiphertextId, b: CiphertextId) -> CiphertextId {
        let mut buf = self.record(a).payload;
        buf.extend_from_slice(&self.record(b).payload);
        self.insert(env::sha256(&buf))
    }

    /// Grants `account` the right to decrypt `id`. Idempotent.
    pub fn allow(&mut self, id: CiphertextId, account: &AccountId) {
        let mut rec = self.record(id);
        if !rec.acl.contains(account) {
            rec.acl.push(account.clone());
            self.records.insert(&id.0, &rec);
        }
    }

    pub fn acl(&self, id: CiphertextId) -> Option<Vec<AccountId>> {
        self.records.get(&id.0).map(|r| r.acl)
    }

    fn insert(&mut self, payload: Vec<u8>) -> CiphertextId {
        self.counter += 1;
        self.records
            .insert(&self.counter, &CipherRecord { payload, acl: vec![] });
        CiphertextId(self.counter)
    }

    fn record(&self, id: CiphertextId) -> CipherRecord {
        self.records.get(&id.0).expect("ciphertext not materialized")
    }
}

/// Proof binding a ciphertext to its sender and this contract. Stands in for
/// the engine's input knowledge proof; the client SDK computes the same value
/// when it encrypts a vote.
pub fn input_proof(ciphertext: &[u8], sender: &AccountId) -> Vec<u8> {
    let mut buf = ciphertext.to_vec();
    buf.extend_from_slice(sender.as_str().as_bytes());
    buf.extend_from_slice(env::current_account_id().as_str().as_bytes());
    env::sha256(&buf)
}
