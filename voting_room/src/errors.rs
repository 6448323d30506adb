use near_sdk::env::panic_str;
use near_sdk::FunctionError;

#[cfg_attr(not(target_arch = "wasm32"), derive(PartialEq, Debug))]
pub enum CreateRoomError {
    CodeTaken,
    CodeLength,
    TitleLength,
    EndTimeNotFuture,
    ZeroCapacity,
    CandidateArityMismatch,
    TooFewCandidates,
    Storage(String),
}

impl FunctionError for CreateRoomError {
    fn panic(&self) -> ! {
        match self {
            CreateRoomError::CodeTaken => panic_str("room code already taken"),
            CreateRoomError::CodeLength => {
                panic_str("room code length must be between 1 and 64 bytes")
            }
            CreateRoomError::TitleLength => panic_str("title length must be at most 120 bytes"),
            CreateRoomError::EndTimeNotFuture => {
                panic_str("room end time must be in the future")
            }
            CreateRoomError::ZeroCapacity => panic_str("max participants must be positive"),
            CreateRoomError::CandidateArityMismatch => {
                panic_str("candidate arrays must have equal length")
            }
            CreateRoomError::TooFewCandidates => {
                panic_str("room must launch with at least two candidates")
            }
            CreateRoomError::Storage(reason) => panic_str(reason),
        }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), derive(PartialEq, Debug))]
pub enum CandidateError {
    RoomNotFound,
    NotCreator,
    NotActive,
    ArityMismatch,
    Storage(String),
}

impl FunctionError for CandidateError {
    fn panic(&self) -> ! {
        match self {
            CandidateError::RoomNotFound => panic_str("room not found"),
            CandidateError::NotCreator => panic_str("not a room creator"),
            CandidateError::NotActive => panic_str("room is not active"),
            CandidateError::ArityMismatch => panic_str("candidate arrays must have equal length"),
            CandidateError::Storage(reason) => panic_str(reason),
        }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), derive(PartialEq, Debug))]
pub enum JoinError {
    RoomNotFound,
    NotActive,
    RoomClosed,
    AlreadyJoined,
    RoomFull,
    InvalidPassword,
}

impl FunctionError for JoinError {
    fn panic(&self) -> ! {
        match self {
            JoinError::RoomNotFound => panic_str("room not found"),
            JoinError::NotActive => panic_str("room is not active or voting time is over"),
            JoinError::RoomClosed => panic_str("room is closed"),
            JoinError::AlreadyJoined => panic_str("caller is already a participant"),
            JoinError::RoomFull => panic_str("room is full"),
            JoinError::InvalidPassword => panic_str("invalid password"),
        }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), derive(PartialEq, Debug))]
pub enum VoteError {
    RoomNotFound,
    NotParticipant,
    AlreadyVoted,
    NotActive,
    NoSuchCandidate,
    InvalidProof,
}

impl FunctionError for VoteError {
    fn panic(&self) -> ! {
        match self {
            VoteError::RoomNotFound => panic_str("room not found"),
            VoteError::NotParticipant => panic_str("caller is not a room participant"),
            VoteError::AlreadyVoted => panic_str("caller already voted"),
            VoteError::NotActive => panic_str("room is not active or voting time is over"),
            VoteError::NoSuchCandidate => panic_str("candidate not found"),
            VoteError::InvalidProof => panic_str("invalid ciphertext proof"),
        }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), derive(PartialEq, Debug))]
pub enum LifecycleError {
    RoomNotFound,
    NotCreator,
    AlreadyEnded,
    NotExpired,
}

impl FunctionError for LifecycleError {
    fn panic(&self) -> ! {
        match self {
            LifecycleError::RoomNotFound => panic_str("room not found"),
            LifecycleError::NotCreator => panic_str("not a room creator"),
            LifecycleError::AlreadyEnded => panic_str("room already ended"),
            LifecycleError::NotExpired => panic_str("room end time has not passed yet"),
        }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), derive(PartialEq, Debug))]
pub enum PublishError {
    RoomNotFound,
    NotCreator,
    StillActive,
    WrongLength,
}

impl FunctionError for PublishError {
    fn panic(&self) -> ! {
        match self {
            PublishError::RoomNotFound => panic_str("room not found"),
            PublishError::NotCreator => panic_str("not a room creator"),
            PublishError::StillActive => panic_str("room is still active"),
            PublishError::WrongLength => panic_str("results length must match candidate count"),
        }
    }
}
