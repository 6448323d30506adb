use near_sdk::{Balance, ONE_NEAR};

pub const MILI_NEAR: Balance = ONE_NEAR / 1_000;

/// room codes are caller-chosen storage keys, so their size is bounded
pub const MIN_CODE_LEN: usize = 1;
pub const MAX_CODE_LEN: usize = 64;
pub const MAX_TITLE_LEN: usize = 120;

/// a room must launch with at least two choices
pub const MIN_LAUNCH_CANDIDATES: usize = 2;

// 1byte (prefix) + 64bytes (room code) + 64bytes (accountID) = 129B -> round up to 140B
pub const PARTICIPANT_STORAGE: u64 = 140;
// voted entry (~140B) + converted input record + aggregate record with 3 grants
// (9bytes key + 32bytes payload + 3*64bytes ACL each) < 560B
pub const VOTE_STORAGE: u64 = 560;
