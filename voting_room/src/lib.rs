use common::finalize_storage_check;
use events::*;
use itertools::izip;
use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};
use near_sdk::collections::{LookupMap, LookupSet, Vector};
use near_sdk::json_types::Base64VecU8;
use near_sdk::{env, near_bindgen, AccountId, PanicOnDefault};

mod constants;
mod errors;
mod events;
pub mod fhe;
pub mod room;
mod storage;
pub mod view;

pub use crate::constants::*;
pub use crate::errors::*;
pub use crate::fhe::*;
pub use crate::room::*;
use crate::storage::*;
pub use crate::view::*;

#[near_bindgen]
#[derive(BorshDeserialize, BorshSerialize, PanicOnDefault)]
pub struct Contract {
    /// room records, keyed by their caller-chosen code
    pub rooms: LookupMap<String, Room>,
    /// registration order of room codes, for enumeration
    pub room_codes: Vector<String>,
    /// flat candidate table, keyed by (room code, candidate index)
    pub candidates: LookupMap<(String, u32), Candidate>,
    /// membership records per (room code, account)
    participants: LookupSet<(String, AccountId)>,
    /// accounts which already cast their vote, per room
    voted: LookupSet<(String, AccountId)>,
    /// handle table of the encryption engine
    pub ciphertexts: CipherArena,
}

#[near_bindgen]
impl Contract {
    #[init]
    pub fn new() -> Self {
        Self {
            rooms: LookupMap::new(StorageKey::Rooms),
            room_codes: Vector::new(StorageKey::RoomCodes),
            candidates: LookupMap::new(StorageKey::Candidates),
            participants: LookupSet::new(StorageKey::Participants),
            voted: LookupSet::new(StorageKey::Voted),
            ciphertexts: CipherArena::new(),
        }
    }

    /*
     * Queries are in view.rs
     */

    /**********
     * TRANSACTIONS
     **********/

    /// Creates a new voting room without candidates. The caller becomes the
    /// creator and the first participant.
    /// `password_hash` is the lowercase hex of sha256(password); `None` makes
    /// the room open. Caller is required to attach enough deposit to cover
    /// the room storage as well as all future joins and votes.
    #[payable]
    #[handle_result]
    pub fn create_room(
        &mut self,
        code: String,
        title: String,
        description: String,
        max_participants: u32,
        end_time: u64,
        password_hash: Option<String>,
    ) -> Result<(), CreateRoomError> {
        let storage_start = env::storage_usage();
        let user = env::predecessor_account_id();
        self.insert_room(
            user.clone(),
            code.clone(),
            title,
            description,
            max_participants,
            end_time,
            password_hash,
        )?;
        emit_room_created(&code);
        self.reserve_room_storage(storage_start, max_participants, user)
    }

    /// Creates a room together with its initial candidates as one atomic
    /// operation, so other participants can never observe a half-configured
    /// room. The three candidate arrays must have equal length and at least
    /// two entries.
    #[payable]
    #[handle_result]
    pub fn create_room_with_candidates(
        &mut self,
        code: String,
        title: String,
        description: String,
        max_participants: u32,
        end_time: u64,
        password_hash: Option<String>,
        candidate_names: Vec<String>,
        candidate_descriptions: Vec<String>,
        candidate_image_urls: Vec<String>,
    ) -> Result<(), CreateRoomError> {
        let storage_start = env::storage_usage();
        let user = env::predecessor_account_id();
        if candidate_names.len() != candidate_descriptions.len()
            || candidate_names.len() != candidate_image_urls.len()
        {
            return Err(CreateRoomError::CandidateArityMismatch);
        }
        if candidate_names.len() < MIN_LAUNCH_CANDIDATES {
            return Err(CreateRoomError::TooFewCandidates);
        }
        self.insert_room(
            user.clone(),
            code.clone(),
            title,
            description,
            max_participants,
            end_time,
            password_hash,
        )?;
        let mut room = self.rooms.get(&code).unwrap();
        for (name, description, image_url) in
            izip!(candidate_names, candidate_descriptions, candidate_image_urls)
        {
            self.push_candidate(&code, &mut room, name, description, image_url);
        }
        self.rooms.insert(&code, &room);
        emit_room_created(&code);
        self.reserve_room_storage(storage_start, max_participants, user)
    }

    /// Appends a single candidate to an active room. Restricted to the room
    /// creator. Returns the new candidate index.
    #[payable]
    #[handle_result]
    pub fn add_candidate(
        &mut self,
        code: String,
        name: String,
        description: String,
        image_url: String,
    ) -> Result<u32, CandidateError> {
        let storage_start = env::storage_usage();
        let user = env::predecessor_account_id();
        let mut room = self.assert_can_add(&code, &user)?;
        let id = self.push_candidate(&code, &mut room, name, description, image_url);
        self.rooms.insert(&code, &room);
        emit_candidate_added(&code, id);
        if let Err(reason) = finalize_storage_check(storage_start, 0, user) {
            return Err(CandidateError::Storage(reason));
        }
        Ok(id)
    }

    /// Batch variant of `add_candidate`.
    #[payable]
    #[handle_result]
    pub fn add_candidates(
        &mut self,
        code: String,
        names: Vec<String>,
        descriptions: Vec<String>,
        image_urls: Vec<String>,
    ) -> Result<(), CandidateError> {
        let storage_start = env::storage_usage();
        let user = env::predecessor_account_id();
        if names.len() != descriptions.len() || names.len() != image_urls.len() {
            return Err(CandidateError::ArityMismatch);
        }
        let mut room = self.assert_can_add(&code, &user)?;
        for (name, description, image_url) in izip!(names, descriptions, image_urls) {
            let id = self.push_candidate(&code, &mut room, name, description, image_url);
            emit_candidate_added(&code, id);
        }
        self.rooms.insert(&code, &room);
        if let Err(reason) = finalize_storage_check(storage_start, 0, user) {
            return Err(CandidateError::Storage(reason));
        }
        Ok(())
    }

    /// Joins the caller to a room. Password-gated rooms require the matching
    /// plaintext password. Filling the last seat closes the room for further
    /// joins, permanently.
    #[handle_result]
    pub fn join_room(&mut self, code: String, password: Option<String>) -> Result<(), JoinError> {
        let user = env::predecessor_account_id();
        let mut room = self.rooms.get(&code).ok_or(JoinError::RoomNotFound)?;
        if !room.is_open(env::block_timestamp_ms()) {
            return Err(JoinError::NotActive);
        }
        if room.is_closed {
            return Err(JoinError::RoomClosed);
        }
        let key = (code.clone(), user);
        if self.participants.contains(&key) {
            return Err(JoinError::AlreadyJoined);
        }
        if room.participant_count >= room.max_participants {
            return Err(JoinError::RoomFull);
        }
        if !room.verify_password(&password) {
            return Err(JoinError::InvalidPassword);
        }
        self.participants.insert(&key);
        room.participant_count += 1;
        if room.participant_count == room.max_participants {
            room.is_closed = true;
        }
        self.rooms.insert(&code, &room);
        emit_join(&code);
        Ok(())
    }

    /// Casts an encrypted vote for a candidate. The ciphertext is converted
    /// through its input proof and added homomorphically into the candidate's
    /// running total; the contract never decrypts it. Decrypt access to the
    /// new aggregate is granted to the contract, the voter and the room
    /// creator on every vote, so the latest total stays readable by the same
    /// three parties.
    /// Once everyone eligible has voted, the room ends within the same
    /// transaction, without waiting for its end time.
    #[handle_result]
    pub fn vote(
        &mut self,
        code: String,
        candidate: u32,
        ciphertext: Base64VecU8,
        proof: Base64VecU8,
    ) -> Result<(), VoteError> {
        let user = env::predecessor_account_id();
        let mut room = self.rooms.get(&code).ok_or(VoteError::RoomNotFound)?;
        let key = (code.clone(), user.clone());
        if !self.participants.contains(&key) {
            return Err(VoteError::NotParticipant);
        }
        if self.voted.contains(&key) {
            return Err(VoteError::AlreadyVoted);
        }
        if !room.is_open(env::block_timestamp_ms()) {
            return Err(VoteError::NotActive);
        }
        if candidate >= room.candidate_count {
            return Err(VoteError::NoSuchCandidate);
        }
        let mut cand = self
            .candidates
            .get(&(code.clone(), candidate))
            .ok_or(VoteError::NoSuchCandidate)?;

        let incoming = self
            .ciphertexts
            .from_external(&ciphertext.0, &proof.0, &user)
            .ok_or(VoteError::InvalidProof)?;
        let total = self.ciphertexts.add(cand.votes_enc, incoming);
        self.ciphertexts.allow(total, &env::current_account_id());
        self.ciphertexts.allow(total, &user);
        self.ciphertexts.allow(total, &room.creator);

        cand.votes_enc = total;
        cand.vote_count += 1;
        self.candidates.insert(&(code.clone(), candidate), &cand);
        self.voted.insert(&key);
        room.total_votes += 1;
        emit_vote(&code);
        if room.total_votes >= room.max_participants {
            room.is_active = false;
            emit_room_ended(&code);
        }
        self.rooms.insert(&code, &room);
        Ok(())
    }

    /// Ends the room. Restricted to the room creator.
    #[handle_result]
    pub fn end_room(&mut self, code: String) -> Result<(), LifecycleError> {
        let user = env::predecessor_account_id();
        let mut room = self.rooms.get(&code).ok_or(LifecycleError::RoomNotFound)?;
        if room.creator != user {
            return Err(LifecycleError::NotCreator);
        }
        self.finish_room(code, room)
    }

    /// Permissionless maintenance: ends the room once its end time has
    /// passed, so the lifecycle does not depend on the creator being online.
    #[handle_result]
    pub fn check_and_end_room(&mut self, code: String) -> Result<(), LifecycleError> {
        let room = self.rooms.get(&code).ok_or(LifecycleError::RoomNotFound)?;
        if room.is_active && env::block_timestamp_ms() < room.end_time {
            return Err(LifecycleError::NotExpired);
        }
        self.finish_room(code, room)
    }

    /// Publishes the plaintext tally for an ended room. Restricted to the
    /// room creator. The array is stored as submitted: it is an attestation,
    /// the contract does not check it against the encrypted totals or the
    /// public counters, and calling again replaces the previous values.
    #[handle_result]
    pub fn publish_results(
        &mut self,
        code: String,
        results: Vec<u64>,
    ) -> Result<(), PublishError> {
        let user = env::predecessor_account_id();
        let mut room = self.rooms.get(&code).ok_or(PublishError::RoomNotFound)?;
        if room.creator != user {
            return Err(PublishError::NotCreator);
        }
        if room.is_active {
            return Err(PublishError::StillActive);
        }
        if results.len() != room.candidate_count as usize {
            return Err(PublishError::WrongLength);
        }
        room.clear_results = results;
        room.results_published = true;
        self.rooms.insert(&code, &room);
        emit_results_published(&code);
        Ok(())
    }

    /*****************
     * INTERNAL
     ****************/

    fn insert_room(
        &mut self,
        creator: AccountId,
        code: String,
        title: String,
        description: String,
        max_participants: u32,
        end_time: u64,
        password_hash: Option<String>,
    ) -> Result<(), CreateRoomError> {
        if !(MIN_CODE_LEN..=MAX_CODE_LEN).contains(&code.len()) {
            return Err(CreateRoomError::CodeLength);
        }
        if title.len() > MAX_TITLE_LEN {
            return Err(CreateRoomError::TitleLength);
        }
        if max_participants == 0 {
            return Err(CreateRoomError::ZeroCapacity);
        }
        if end_time <= env::block_timestamp_ms() {
            return Err(CreateRoomError::EndTimeNotFuture);
        }
        if self.rooms.get(&code).is_some() {
            return Err(CreateRoomError::CodeTaken);
        }
        let room = Room {
            creator: creator.clone(),
            title,
            description,
            max_participants,
            participant_count: 1,
            end_time,
            password_hash,
            is_active: true,
            is_closed: false,
            candidate_count: 0,
            total_votes: 0,
            clear_results: vec![],
            results_published: false,
        };
        self.rooms.insert(&code, &room);
        self.room_codes.push(&code);
        self.participants.insert(&(code, creator));
        Ok(())
    }

    /// Appends a candidate with an explicitly materialized encrypted zero
    /// and grants the contract and the room creator access to it.
    fn push_candidate(
        &mut self,
        code: &str,
        room: &mut Room,
        name: String,
        description: String,
        image_url: String,
    ) -> u32 {
        let id = room.candidate_count;
        let votes_enc = self.ciphertexts.new_zero();
        self.ciphertexts.allow(votes_enc, &env::current_account_id());
        self.ciphertexts.allow(votes_enc, &room.creator);
        self.candidates.insert(
            &(code.to_string(), id),
            &Candidate {
                name,
                description,
                image_url,
                votes_enc,
                vote_count: 0,
            },
        );
        room.candidate_count += 1;
        id
    }

    fn assert_can_add(&self, code: &String, user: &AccountId) -> Result<Room, CandidateError> {
        let room = self.rooms.get(code).ok_or(CandidateError::RoomNotFound)?;
        if &room.creator != user {
            return Err(CandidateError::NotCreator);
        }
        if !room.is_active {
            return Err(CandidateError::NotActive);
        }
        Ok(room)
    }

    fn finish_room(&mut self, code: String, mut room: Room) -> Result<(), LifecycleError> {
        if !room.is_active {
            return Err(LifecycleError::AlreadyEnded);
        }
        room.is_active = false;
        self.rooms.insert(&code, &room);
        emit_room_ended(&code);
        Ok(())
    }

    /// Joins and votes happen without a deposit, so room creation reserves
    /// storage for all of them up front.
    fn reserve_room_storage(
        &self,
        storage_start: u64,
        max_participants: u32,
        user: AccountId,
    ) -> Result<(), CreateRoomError> {
        let extra = PARTICIPANT_STORAGE * (max_participants - 1) as u64
            + VOTE_STORAGE * max_participants as u64;
        finalize_storage_check(storage_start, extra, user).map_err(CreateRoomError::Storage)
    }
}
