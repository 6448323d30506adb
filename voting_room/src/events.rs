use near_sdk::serde::Serialize;
use serde_json::json;

use common::{EventPayload, NearEvent};

fn emit_event<T: Serialize>(event: EventPayload<T>) {
    NearEvent {
        standard: "voting-rooms",
        version: "1.0.0",
        event,
    }
    .emit();
}

pub(crate) fn emit_room_created(code: &str) {
    emit_event(EventPayload {
        event: "room-created",
        data: json!({ "code": code }),
    });
}

pub(crate) fn emit_candidate_added(code: &str, candidate: u32) {
    emit_event(EventPayload {
        event: "candidate-added",
        data: json!({ "code": code, "candidate": candidate }),
    });
}

pub(crate) fn emit_join(code: &str) {
    emit_event(EventPayload {
        event: "join",
        data: json!({ "code": code }),
    });
}

pub(crate) fn emit_vote(code: &str) {
    emit_event(EventPayload {
        event: "vote",
        data: json!({ "code": code }),
    });
}

/// emitted both on explicit ends and on the auto-close after full turnout
pub(crate) fn emit_room_ended(code: &str) {
    emit_event(EventPayload {
        event: "room-ended",
        data: json!({ "code": code }),
    });
}

pub(crate) fn emit_results_published(code: &str) {
    emit_event(EventPayload {
        event: "results-published",
        data: json!({ "code": code }),
    });
}
