//! Command Dispatch
//!
//! Routes a named command with JSON arguments to its handler and returns
//! the serialized response envelope.

use pitch_writer_core::{PitchField, PitchFields, PitchPatch};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error};

use super::{ai, analytics, health, pitches};
use crate::models::generation::GenerationRequest;
use crate::models::pitch::NewPitch;
use crate::models::response::CommandResponse;
use crate::state::AppState;

/// One request from the caller bridge
#[derive(Debug, Clone, Deserialize)]
pub struct CommandRequest {
    /// Caller-chosen correlation id, echoed back verbatim
    #[serde(default)]
    pub id: Option<Value>,
    pub command: String,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub args: Value,
}

/// Response to one [`CommandRequest`]
#[derive(Debug, Clone, Serialize)]
pub struct CommandReply {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub response: Value,
}

impl CommandReply {
    /// A failure reply for a request that could not be parsed at all
    pub fn malformed(id: Option<Value>) -> Self {
        Self {
            id,
            response: to_json(CommandResponse::<()>::err("Malformed request")),
        }
    }
}

#[derive(Deserialize)]
struct FieldArgs {
    field: PitchField,
    #[serde(default)]
    pitch: PitchFields,
}

#[derive(Deserialize)]
struct EnhanceArgs {
    content: String,
    #[serde(default)]
    style: Option<String>,
}

#[derive(Deserialize)]
struct SummaryArgs {
    #[serde(alias = "pitchData", alias = "pitch_data")]
    pitch: PitchFields,
}

#[derive(Deserialize)]
struct IdArgs {
    id: String,
}

#[derive(Deserialize)]
struct UpdateArgs {
    id: String,
    #[serde(flatten)]
    patch: PitchPatch,
}

fn to_json<T: Serialize>(response: CommandResponse<T>) -> Value {
    serde_json::to_value(&response).unwrap_or_else(|e| {
        error!("Failed to serialize command response: {}", e);
        json!({
            "success": false,
            "data": null,
            "error": "Internal error",
            "error_kind": "failure",
        })
    })
}

fn invalid_args(command: &str, err: &serde_json::Error) -> Value {
    debug!("Invalid arguments for {}: {}", command, err);
    to_json(CommandResponse::<()>::err("Invalid arguments"))
}

macro_rules! with_args {
    ($command:expr, $args:expr, |$a:ident: $ty:ty| $call:expr) => {
        match serde_json::from_value::<$ty>($args) {
            Ok($a) => to_json($call.await),
            Err(e) => invalid_args($command, &e),
        }
    };
}

/// Run one command against the shared state
pub async fn dispatch(state: &AppState, request: CommandRequest) -> CommandReply {
    let CommandRequest {
        id,
        command,
        token,
        args,
    } = request;
    let cmd = command.as_str();
    let token = token.as_str();
    debug!("Dispatching command {}", cmd);

    let response = match cmd {
        "get_health" => to_json(health::get_health(state).await),
        "generate_content" => with_args!(cmd, args, |a: GenerationRequest| {
            ai::generate_content(state, token, a)
        }),
        "generate_field" => with_args!(cmd, args, |a: FieldArgs| {
            ai::generate_field(state, token, a.field, a.pitch)
        }),
        "enhance_content" => with_args!(cmd, args, |a: EnhanceArgs| {
            ai::enhance_content(state, token, a.content, a.style)
        }),
        "generate_summary" => with_args!(cmd, args, |a: SummaryArgs| {
            ai::generate_summary(state, token, a.pitch)
        }),
        "list_pitches" => to_json(pitches::list_pitches(state, token).await),
        "get_pitch" => with_args!(cmd, args, |a: IdArgs| {
            pitches::get_pitch(state, token, &a.id)
        }),
        "create_pitch" => with_args!(cmd, args, |a: NewPitch| {
            pitches::create_pitch(state, token, a)
        }),
        "update_pitch" => with_args!(cmd, args, |a: UpdateArgs| {
            pitches::update_pitch(state, token, &a.id, a.patch)
        }),
        "delete_pitch" => with_args!(cmd, args, |a: IdArgs| {
            pitches::delete_pitch(state, token, &a.id)
        }),
        "export_pitch" => with_args!(cmd, args, |a: IdArgs| {
            pitches::export_pitch(state, token, &a.id)
        }),
        "get_analytics" => to_json(analytics::get_analytics(state, token).await),
        other => {
            debug!("Unknown command {}", other);
            to_json(CommandResponse::<()>::err(format!("Unknown command: {}", other)))
        }
    };

    CommandReply { id, response }
}
