use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};
use near_sdk::serde::Serialize;
use near_sdk::{env, AccountId};
use uint::hex;

use crate::fhe::CiphertextId;

#[derive(BorshDeserialize, BorshSerialize)]
#[cfg_attr(not(target_arch = "wasm32"), derive(Debug))]
pub struct Room {
    pub creator: AccountId,
    pub title: String,
    pub description: String,
    /// membership cap, fixed at creation
    pub max_participants: u32,
    /// starts at 1: the creator joins their own room
    pub participant_count: u32,
    /// end of voting as Unix timestamp (in milliseconds)
    pub end_time: u64,
    /// lowercase hex of sha256(password); Some iff the room is password gated
    pub password_hash: Option<String>,
    /// flips to false exactly once, never back
    pub is_active: bool,
    /// set when the room fills up, never unset
    pub is_closed: bool,
    pub candidate_count: u32,
    /// plaintext liveness counter, one increment per recorded vote
    pub total_votes: u32,
    /// creator-attested tally, empty until published
    pub clear_results: Vec<u64>,
    pub results_published: bool,
}

impl Room {
    /// true while the room accepts joins and votes
    pub fn is_open(&self, now: u64) -> bool {
        self.is_active && now < self.end_time
    }

    pub fn verify_password(&self, password: &Option<String>) -> bool {
        match (&self.password_hash, password) {
            (None, _) => true,
            (Some(expected), Some(given)) => expected == &hash_password(given),
            (Some(_), None) => false,
        }
    }

    pub fn to_view(self, code: String) -> RoomView {
        RoomView {
            code,
            creator: self.creator,
            title: self.title,
            description: self.description,
            max_participants: self.max_participants,
            participant_count: self.participant_count,
            end_time: self.end_time,
            has_password: self.password_hash.is_some(),
            is_active: self.is_active,
            is_closed: self.is_closed,
            candidate_count: self.candidate_count,
            total_votes: self.total_votes,
            results_published: self.results_published,
        }
    }
}

/// hash stored for password-gated rooms; clients submit the same value to
/// `create_room` and the matching plaintext to `join_room`
pub fn hash_password(password: &str) -> String {
    hex::encode(env::sha256(password.as_bytes()))
}

#[derive(BorshDeserialize, BorshSerialize)]
#[cfg_attr(not(target_arch = "wasm32"), derive(Debug))]
pub struct Candidate {
    pub name: String,
    pub description: String,
    pub image_url: String,
    /// running encrypted total; replaced by a fresh handle on every vote
    pub votes_enc: CiphertextId,
    /// public mirror of the encrypted total
    pub vote_count: u64,
}

impl Candidate {
    pub fn to_view(self, id: u32) -> CandidateView {
        CandidateView {
            id,
            name: self.name,
            description: self.description,
            image_url: self.image_url,
            vote_count: self.vote_count,
        }
    }
}

/// This is format of output via JSON for the room.
#[derive(Serialize)]
#[serde(crate = "near_sdk::serde")]
#[cfg_attr(not(target_arch = "wasm32"), derive(Debug, PartialEq, Clone))]
pub struct RoomView {
    pub code: String,
    pub creator: AccountId,
    pub title: String,
    pub description: String,
    pub max_participants: u32,
    pub participant_count: u32,
    /// end of voting as Unix timestamp (in milliseconds)
    pub end_time: u64,
    pub has_password: bool,
    pub is_active: bool,
    pub is_closed: bool,
    pub candidate_count: u32,
    pub total_votes: u32,
    pub results_published: bool,
}

/// This is format of output via JSON for a candidate.
#[derive(Serialize)]
#[serde(crate = "near_sdk::serde")]
#[cfg_attr(not(target_arch = "wasm32"), derive(Debug, PartialEq, Clone))]
pub struct CandidateView {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub vote_count: u64,
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod unit_tests {
    use near_sdk::test_utils::VMContextBuilder;
    use near_sdk::testing_env;

    use super::*;

    fn mk_account(i: u16) -> AccountId {
        AccountId::new_unchecked(format!("acc{}", i))
    }

    fn mk_room(password_hash: Option<String>) -> Room {
        Room {
            creator: mk_account(1),
            title: "Lunch vote".to_owned(),
            description: "where do we go".to_owned(),
            max_participants: 5,
            participant_count: 3,
            end_time: 111_222,
            password_hash,
            is_active: true,
            is_closed: false,
            candidate_count: 2,
            total_votes: 1,
            clear_results: vec![],
            results_published: false,
        }
    }

    #[test]
    fn to_room_view() {
        testing_env!(VMContextBuilder::new().build());
        let r = mk_room(Some(hash_password("hunter2")));
        assert_eq!(
            RoomView {
                code: "pizza".to_owned(),
                creator: mk_account(1),
                title: r.title.clone(),
                description: r.description.clone(),
                max_participants: 5,
                participant_count: 3,
                end_time: 111_222,
                has_password: true,
                is_active: true,
                is_closed: false,
                candidate_count: 2,
                total_votes: 1,
                results_published: false,
            },
            r.to_view("pizza".to_owned())
        )
    }

    #[test]
    fn password_verification() {
        testing_env!(VMContextBuilder::new().build());
        let open = mk_room(None);
        assert!(open.verify_password(&None));
        assert!(open.verify_password(&Some("anything".to_owned())));

        let gated = mk_room(Some(hash_password("hunter2")));
        assert!(gated.verify_password(&Some("hunter2".to_owned())));
        assert!(!gated.verify_password(&Some("Hunter2".to_owned())));
        assert!(!gated.verify_password(&None));
    }

    #[test]
    fn room_open_window() {
        testing_env!(VMContextBuilder::new().build());
        let mut r = mk_room(None);
        assert!(r.is_open(r.end_time - 1));
        // the end time itself is already past the voting window
        assert!(!r.is_open(r.end_time));
        r.is_active = false;
        assert!(!r.is_open(0));
    }
}
