//! The per-room game session: two seats, a secret word, and the phase
//! machine that reacts to each inbound line of text.
//!
//! Everything here is synchronous. The room actor owns one
//! [`GameSession`] and is the only thing that ever touches it, so every
//! read and write for a room is serialized by construction.

use bullcow_protocol::{Recipient, Role, ServerMessage};
use bullcow_transport::ConnectionId;

use crate::score::{score, ScoreError};
use crate::{Phase, MAX_PARTICIPANTS};

/// Outbound instructions produced by the session.
pub type Outbound = Vec<(Recipient, ServerMessage)>;

/// State of one room's game.
#[derive(Debug)]
pub struct GameSession {
    /// Participants in join order, each with the role it was given.
    participants: Vec<(ConnectionId, Role)>,
    secret: Option<String>,
    attempts: u32,
    phase: Phase,
}

impl GameSession {
    /// Creates an empty session waiting for its secret word.
    pub fn new() -> Self {
        Self {
            participants: Vec::with_capacity(MAX_PARTICIPANTS),
            secret: None,
            attempts: 0,
            phase: Phase::WaitingWord,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn secret(&self) -> Option<&str> {
        self.secret.as_deref()
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Connections currently seated, in join order.
    pub fn participants(&self) -> impl Iterator<Item = ConnectionId> + '_ {
        self.participants.iter().map(|(conn, _)| *conn)
    }

    /// Returns the role held by `conn`, if it is seated.
    pub fn role_of(&self, conn: ConnectionId) -> Option<Role> {
        self.participants
            .iter()
            .find(|(c, _)| *c == conn)
            .map(|(_, role)| *role)
    }

    /// Seats a new participant and returns its role.
    ///
    /// The first participant becomes the setter and the second the guesser.
    /// If one player has already left, the newcomer takes whichever role
    /// is vacant. Returns `None`, without touching any state, when both
    /// seats are taken.
    pub fn join(&mut self, conn: ConnectionId) -> Option<Role> {
        if self.participants.len() >= MAX_PARTICIPANTS {
            return None;
        }
        let role = match self.participants.first() {
            Some((_, taken)) => taken.opposite(),
            None => Role::Setter,
        };
        self.participants.push((conn, role));
        Some(role)
    }

    /// Removes a participant. Returns its role together with the notice
    /// for whoever remains, or `None` if `conn` was not seated.
    ///
    /// The notice is addressed [`Recipient::Other`] relative to the
    /// departed connection.
    pub fn leave(&mut self, conn: ConnectionId) -> Option<(Role, Outbound)> {
        let idx = self.participants.iter().position(|(c, _)| *c == conn)?;
        let (_, role) = self.participants.remove(idx);

        let notices = if self.participants.is_empty() {
            Vec::new()
        } else {
            vec![(
                Recipient::Other,
                ServerMessage::Info {
                    message: format!("Player {role} disconnected"),
                },
            )]
        };
        Some((role, notices))
    }

    /// Applies one inbound line from the participant holding `role`.
    pub fn handle_message(&mut self, role: Role, text: &str) -> Outbound {
        match (self.phase, role) {
            (Phase::WaitingWord, _)
                if self.participants.len() < MAX_PARTICIPANTS =>
            {
                vec![(
                    Recipient::Sender,
                    ServerMessage::Info {
                        message: "Waiting for the second player to join"
                            .into(),
                    },
                )]
            }
            (Phase::WaitingWord, Role::Setter) => self.set_secret(text),
            (Phase::WaitingWord, Role::Guesser) => vec![(
                Recipient::Sender,
                ServerMessage::Info {
                    message: "Waiting for player 1 to choose the word".into(),
                },
            )],
            (Phase::Playing, Role::Guesser) => self.guess(text),
            (Phase::Playing, Role::Setter) | (Phase::Finished, _) => {
                tracing::debug!(
                    phase = %self.phase,
                    %role,
                    "no action for message, ignoring"
                );
                Vec::new()
            }
        }
    }

    fn set_secret(&mut self, text: &str) -> Outbound {
        if text.trim().is_empty() {
            return vec![(
                Recipient::Sender,
                ServerMessage::Info {
                    message: "The word must not be empty".into(),
                },
            )];
        }

        let word = text.to_lowercase();
        let length = word.chars().count();
        self.secret = Some(word);
        self.advance(Phase::Playing);

        vec![
            (Recipient::Other, ServerMessage::Length { length }),
            (Recipient::Sender, ServerMessage::LockInput),
            (
                Recipient::Sender,
                ServerMessage::Info {
                    message: "Word saved. The game has started.".into(),
                },
            ),
        ]
    }

    fn guess(&mut self, text: &str) -> Outbound {
        let Some(secret) = self.secret.as_deref() else {
            return Vec::new();
        };
        self.attempts += 1;
        let guess = text.to_lowercase();

        match score(secret, &guess) {
            Err(ScoreError::LengthMismatch { expected, .. }) => vec![(
                Recipient::Both,
                ServerMessage::Info {
                    message: format!(
                        "The word {guess} does not have {expected} letters"
                    ),
                },
            )],
            Ok(result) => {
                let won = guess == secret;
                let mut out = vec![(
                    Recipient::Both,
                    ServerMessage::Attempt {
                        n: self.attempts,
                        word: text.to_string(),
                        bulls: result.bulls,
                        cows: result.cows,
                    },
                )];
                if won {
                    out.push((
                        Recipient::Both,
                        ServerMessage::Win {
                            attempts: self.attempts,
                        },
                    ));
                    self.advance(Phase::Finished);
                }
                out
            }
        }
    }

    fn advance(&mut self, target: Phase) {
        debug_assert!(self.phase.can_transition_to(target));
        self.phase = target;
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
