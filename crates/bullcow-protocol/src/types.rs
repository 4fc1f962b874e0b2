//! Core protocol types for bullcow's wire format.
//!
//! Every outbound message is a JSON object whose `type` field names the
//! message kind; the remaining fields are the payload. The shapes here are
//! what browser clients parse, so the tests below pin them down exactly.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// RoomCode
// ---------------------------------------------------------------------------

/// Number of characters in a room code.
pub const ROOM_CODE_LEN: usize = 6;

/// Characters a room code is drawn from: `[a-z0-9]`.
pub const ROOM_CODE_ALPHABET: &[u8; 36] =
    b"abcdefghijklmnopqrstuvwxyz0123456789";

/// A short room identifier, exactly [`ROOM_CODE_LEN`] characters of
/// `[a-z0-9]`.
///
/// Serialized as a plain string (`"ab12cd"`). Deserialization validates
/// the format, so a `RoomCode` in hand is always well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoomCode(String);

impl RoomCode {
    /// Validates and wraps a room code.
    ///
    /// # Errors
    /// Returns [`ProtocolError::InvalidRoomCode`] unless `code` is exactly
    /// six lowercase ASCII letters or digits.
    pub fn parse(code: &str) -> Result<Self, ProtocolError> {
        let well_formed = code.len() == ROOM_CODE_LEN
            && code.bytes().all(|b| ROOM_CODE_ALPHABET.contains(&b));
        if !well_formed {
            return Err(ProtocolError::InvalidRoomCode(code.to_string()));
        }
        Ok(Self(code.to_string()))
    }

    /// Draws a uniformly random room code.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let code = (0..ROOM_CODE_LEN)
            .map(|_| {
                let idx = rng.random_range(0..ROOM_CODE_ALPHABET.len());
                ROOM_CODE_ALPHABET[idx] as char
            })
            .collect();
        Self(code)
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RoomCode {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RoomCode {
    type Error = ProtocolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RoomCode> for String {
    fn from(code: RoomCode) -> Self {
        code.0
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// A participant's role in a room. Serialized as its number (1 or 2).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Role {
    /// Role 1: first to join, supplies the secret word.
    Setter,
    /// Role 2: second to join, submits guesses.
    Guesser,
}

impl Role {
    /// The role number used on the wire and in player-facing text.
    pub fn number(self) -> u8 {
        match self {
            Self::Setter => 1,
            Self::Guesser => 2,
        }
    }

    /// The other role of the pair.
    pub fn opposite(self) -> Self {
        match self {
            Self::Setter => Self::Guesser,
            Self::Guesser => Self::Setter,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl From<Role> for u8 {
    fn from(role: Role) -> Self {
        role.number()
    }
}

impl TryFrom<u8> for Role {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Setter),
            2 => Ok(Self::Guesser),
            other => Err(ProtocolError::InvalidRole(other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Recipient
// ---------------------------------------------------------------------------

/// Who an outbound message is for, relative to the participant whose
/// inbound message (or departure) produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    /// Only the participant that triggered the message.
    Sender,
    /// Only the other participant, if present.
    Other,
    /// Both participants.
    Both,
}

// ---------------------------------------------------------------------------
// ServerMessage — what the game channel sends
// ---------------------------------------------------------------------------

/// Messages sent to a participant on a game channel.
///
/// `#[serde(tag = "type", rename_all = "snake_case")]` produces e.g.
/// `{"type":"attempt","n":1,"word":"apple","bulls":5,"cows":5}` and
/// `{"type":"lock_input"}` for the unit variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Terminal rejection (room missing or full). The connection closes.
    Error { message: String },

    /// Role assignment, always the first message after a successful join.
    Role { role: Role, message: String },

    /// Secret word length, sent to the guesser when the game starts.
    Length { length: usize },

    /// Tells the setter its input is over.
    LockInput,

    /// Transient status text.
    Info { message: String },

    /// Result of one scored guess. `word` is the guess as typed.
    Attempt {
        n: u32,
        word: String,
        bulls: usize,
        cows: usize,
    },

    /// The guess matched; `attempts` guesses were made in total.
    Win { attempts: u32 },
}

// ---------------------------------------------------------------------------
// Lobby — room creation and leaderboard
// ---------------------------------------------------------------------------

/// A leaderboard entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Store-assigned id, ascending in insertion order.
    pub id: u64,
    /// Unique player name.
    pub name: String,
    /// Attempts needed to win. Lower is better.
    pub record: u32,
}

/// Requests accepted on the lobby channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LobbyRequest {
    /// Allocate a fresh room.
    CreateRoom,

    /// List leaderboard records, at most `n` of them when given.
    ListRecords {
        #[serde(default)]
        n: Option<usize>,
    },

    /// Add a record under a new, unique name.
    CreateRecord { name: String, record: u32 },

    /// Fetch the lowest record value.
    BestRecord,
}

/// Responses sent on the lobby channel, one per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LobbyResponse {
    /// A room was allocated.
    RoomCreated { room_id: RoomCode },

    /// Leaderboard records in insertion order.
    Records { records: Vec<Record> },

    /// The record that was stored.
    RecordCreated { record: Record },

    /// Lowest record value, `null` when the leaderboard is empty.
    BestRecord { record: Option<u32> },

    /// The request could not be served. The lobby stays open.
    Error { message: String },
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // =====================================================================
    // RoomCode
    // =====================================================================

    #[test]
    fn test_room_code_accepts_lowercase_alphanumeric() {
        let code = RoomCode::parse("ab12cd").unwrap();
        assert_eq!(code.as_str(), "ab12cd");
        assert_eq!(code.to_string(), "ab12cd");
    }

    #[test]
    fn test_room_code_rejects_bad_input() {
        for bad in ["", "abc", "abcdefg", "ABCDEF", "ab-12c", "ab 12c", "абвгде"]
        {
            assert!(RoomCode::parse(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_room_code_generate_is_well_formed() {
        let mut rng = rand::rng();
        for _ in 0..200 {
            let code = RoomCode::generate(&mut rng);
            assert!(RoomCode::parse(code.as_str()).is_ok(), "{code}");
        }
    }

    #[test]
    fn test_room_code_serializes_as_plain_string() {
        let code: RoomCode = "zz9900".parse().unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"zz9900\"");
    }

    #[test]
    fn test_room_code_deserialize_validates() {
        let bad: Result<RoomCode, _> = serde_json::from_str("\"NOPE\"");
        assert!(bad.is_err());
    }

    // =====================================================================
    // Role
    // =====================================================================

    #[test]
    fn test_role_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Role::Setter).unwrap(), "1");
        assert_eq!(serde_json::to_string(&Role::Guesser).unwrap(), "2");
    }

    #[test]
    fn test_role_rejects_unknown_number() {
        let bad: Result<Role, _> = serde_json::from_str("3");
        assert!(bad.is_err());
    }

    #[test]
    fn test_role_opposite() {
        assert_eq!(Role::Setter.opposite(), Role::Guesser);
        assert_eq!(Role::Guesser.opposite(), Role::Setter);
    }

    // =====================================================================
    // ServerMessage — one test per kind to pin the JSON shape
    // =====================================================================

    fn to_json(msg: &ServerMessage) -> serde_json::Value {
        serde_json::to_value(msg).unwrap()
    }

    #[test]
    fn test_server_message_error_json_format() {
        let json = to_json(&ServerMessage::Error {
            message: "room full".into(),
        });
        assert_eq!(json, serde_json::json!({"type": "error", "message": "room full"}));
    }

    #[test]
    fn test_server_message_role_json_format() {
        let json = to_json(&ServerMessage::Role {
            role: Role::Guesser,
            message: "You are player 2".into(),
        });
        assert_eq!(json["type"], "role");
        assert_eq!(json["role"], 2);
        assert_eq!(json["message"], "You are player 2");
    }

    #[test]
    fn test_server_message_length_json_format() {
        let json = to_json(&ServerMessage::Length { length: 5 });
        assert_eq!(json, serde_json::json!({"type": "length", "length": 5}));
    }

    #[test]
    fn test_server_message_lock_input_has_only_type() {
        let json = to_json(&ServerMessage::LockInput);
        assert_eq!(json, serde_json::json!({"type": "lock_input"}));
    }

    #[test]
    fn test_server_message_attempt_json_format() {
        let json = to_json(&ServerMessage::Attempt {
            n: 3,
            word: "Melon".into(),
            bulls: 5,
            cows: 3,
        });
        assert_eq!(
            json,
            serde_json::json!({
                "type": "attempt", "n": 3, "word": "Melon", "bulls": 5, "cows": 3
            })
        );
    }

    #[test]
    fn test_server_message_win_json_format() {
        let json = to_json(&ServerMessage::Win { attempts: 4 });
        assert_eq!(json, serde_json::json!({"type": "win", "attempts": 4}));
    }

    // =====================================================================
    // Lobby
    // =====================================================================

    #[test]
    fn test_lobby_request_create_room_decodes() {
        let req: LobbyRequest =
            serde_json::from_str(r#"{"type":"create_room"}"#).unwrap();
        assert_eq!(req, LobbyRequest::CreateRoom);
    }

    #[test]
    fn test_lobby_request_list_records_n_is_optional() {
        let req: LobbyRequest =
            serde_json::from_str(r#"{"type":"list_records"}"#).unwrap();
        assert_eq!(req, LobbyRequest::ListRecords { n: None });

        let req: LobbyRequest =
            serde_json::from_str(r#"{"type":"list_records","n":10}"#).unwrap();
        assert_eq!(req, LobbyRequest::ListRecords { n: Some(10) });
    }

    #[test]
    fn test_lobby_request_unknown_type_fails() {
        let req: Result<LobbyRequest, _> =
            serde_json::from_str(r#"{"type":"fly_to_moon"}"#);
        assert!(req.is_err());
    }

    #[test]
    fn test_lobby_response_room_created_json_format() {
        let resp = LobbyResponse::RoomCreated {
            room_id: RoomCode::parse("q1w2e3").unwrap(),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "room_created", "room_id": "q1w2e3"})
        );
    }

    #[test]
    fn test_lobby_response_best_record_null_when_empty() {
        let json =
            serde_json::to_value(LobbyResponse::BestRecord { record: None })
                .unwrap();
        assert_eq!(json["type"], "best_record");
        assert!(json["record"].is_null());
    }
}
