use std::cmp::min;

use near_sdk::serde::Serialize;
use near_sdk::{env, near_bindgen, require, AccountId};

use crate::*;

/// Page of rooms returned by `get_rooms_paginated`. `has_more` tells the
/// caller whether another page follows the returned slice.
#[derive(Serialize)]
#[serde(crate = "near_sdk::serde")]
#[cfg_attr(not(target_arch = "wasm32"), derive(Debug, PartialEq))]
pub struct RoomPage {
    pub rooms: Vec<RoomView>,
    pub has_more: bool,
}

#[near_bindgen]
impl Contract {
    pub(crate) fn _room(&self, code: &String) -> Room {
        self.rooms.get(code).expect("room not found")
    }

    pub(crate) fn _candidate(&self, code: String, candidate: u32) -> Candidate {
        self.candidates
            .get(&(code, candidate))
            .expect("candidate not found")
    }

    /**********
     * QUERIES
     **********/

    pub fn get_room(&self, code: String) -> RoomView {
        self._room(&code).to_view(code)
    }

    pub fn get_candidate(&self, code: String, candidate: u32) -> CandidateView {
        self._candidate(code, candidate).to_view(candidate)
    }

    /// Returns the opaque handle of the candidate's encrypted running total.
    /// Decryption happens off-chain and only for accounts on the handle's
    /// grant list.
    pub fn get_candidate_votes(&self, code: String, candidate: u32) -> CiphertextId {
        self._candidate(code, candidate).votes_enc
    }

    /// Accounts allowed to decrypt the given handle.
    pub fn get_ciphertext_acl(&self, id: CiphertextId) -> Vec<AccountId> {
        self.ciphertexts.acl(id).expect("ciphertext not materialized")
    }

    pub fn has_user_voted(&self, code: String, user: AccountId) -> bool {
        self.voted.contains(&(code, user))
    }

    pub fn is_user_participant(&self, code: String, user: AccountId) -> bool {
        self.participants.contains(&(code, user))
    }

    pub fn get_total_votes(&self, code: String) -> u32 {
        self._room(&code).total_votes
    }

    pub fn get_candidate_vote_count(&self, code: String, candidate: u32) -> u64 {
        self._candidate(code, candidate).vote_count
    }

    pub fn get_total_rooms_count(&self) -> u64 {
        self.room_codes.len()
    }

    pub fn get_all_room_codes(&self) -> Vec<String> {
        self.room_codes.to_vec()
    }

    /// Rooms which still accept joins and votes. Filters on time as well, so
    /// a room past its end time is excluded even before anyone called
    /// `check_and_end_room`.
    pub fn get_active_rooms(&self) -> Vec<RoomView> {
        let now = env::block_timestamp_ms();
        self.room_codes
            .iter()
            .filter_map(|code| {
                let room = self._room(&code);
                if room.is_open(now) {
                    Some(room.to_view(code))
                } else {
                    None
                }
            })
            .collect()
    }

    /// Get rooms in paginated view, in registration order.
    pub fn get_rooms_paginated(&self, from_index: u64, limit: u64) -> RoomPage {
        require!(limit > 0, "limit must be positive");
        let total = self.room_codes.len();
        let end = min(total, from_index.saturating_add(limit));
        let rooms = (from_index..end)
            .map(|i| {
                let code = self.room_codes.get(i).unwrap();
                self._room(&code).to_view(code)
            })
            .collect();
        RoomPage {
            rooms,
            has_more: end < total,
        }
    }

    /// Creator-attested plaintext tally, in candidate order.
    pub fn get_clear_results(&self, code: String) -> Vec<u64> {
        let room = self._room(&code);
        require!(room.results_published, "results not published");
        room.clear_results
    }

    pub fn are_results_published(&self, code: String) -> bool {
        self._room(&code).results_published
    }

    /// Bulk dump of every candidate with its public vote counter.
    pub fn get_all_voting_results(&self, code: String) -> Vec<CandidateView> {
        let room = self._room(&code);
        (0..room.candidate_count)
            .map(|i| self._candidate(code.clone(), i).to_view(i))
            .collect()
    }
}
