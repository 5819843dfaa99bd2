//! The scripted assistant widget: panel state, message log and canned replies.

use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::motion::{Ease, Pose, Tween, BACK_OUT};

pub const REPLY_DELAY_MS: u32 = 1_000;
pub const OPEN_SECONDS: f64 = 0.3;
pub const CLOSE_SECONDS: f64 = 0.2;

/// Where the panel rests before opening and after closing.
pub const PANEL_HIDDEN: Pose = Pose::offset(0.0, 20.0).with_scale(0.8).with_opacity(0.0);
pub const PANEL_OPEN: Tween = Tween::new(PANEL_HIDDEN, Pose::IDENTITY, OPEN_SECONDS, BACK_OUT);
pub const PANEL_CLOSE: Tween = Tween::new(Pose::IDENTITY, PANEL_HIDDEN, CLOSE_SECONDS, Ease::PowerOut(1));

/// The launcher spins in once the intro is nearly over.
pub const BUTTON_INTRO: Tween = Tween::new(
    Pose::IDENTITY.with_scale(0.0).with_rotation(-180.0),
    Pose::IDENTITY,
    1.0,
    BACK_OUT,
)
.delayed(2.0);

pub const GREETING: &str = "Hi! I'm Mayur's assistant. How can I help you today?";

pub const CANNED_REPLIES: [&str; 4] = [
    "Thanks for reaching out! Mayur is currently working on some exciting projects. Would you like to know more about his services?",
    "That's a great question! Mayur specializes in fast, responsive interfaces built with React, Next.js and TypeScript.",
    "I'd be happy to help you get in touch with Mayur. You can use the contact section above or send an email directly!",
    "Mayur is passionate about building clean, maintainable front ends. What kind of project do you have in mind?",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    System,
    User,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DisplayMessage {
    pub id: u32,
    pub text: String,
    pub origin: Origin,
    pub created_at_ms: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatPhase {
    Closed,
    Open,
    /// The exit animation is playing; the panel is still on screen.
    Closing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    Opened,
    StartedClosing,
    Ignored,
}

/// Uniform choice over [`CANNED_REPLIES`].
#[derive(Clone, Debug)]
pub struct ReplyPicker {
    rng: SmallRng,
}

impl ReplyPicker {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn pick(&mut self) -> &'static str {
        CANNED_REPLIES[self.rng.random_range(0..CANNED_REPLIES.len())]
    }
}

/// Claim on one scheduled reply. Not `Clone`: each ticket delivers once.
#[derive(Debug, PartialEq, Eq)]
pub struct PendingReply {
    ticket: u64,
}

#[derive(Clone, Debug)]
pub struct ChatSession {
    phase: ChatPhase,
    draft: String,
    messages: Vec<DisplayMessage>,
    next_id: u32,
    next_ticket: u64,
    outstanding: Vec<u64>,
    picker: ReplyPicker,
    disposed: bool,
}

impl ChatSession {
    /// A closed widget holding only the greeting.
    pub fn new(picker: ReplyPicker, now_ms: f64) -> Self {
        let mut session = Self {
            phase: ChatPhase::Closed,
            draft: String::new(),
            messages: Vec::new(),
            next_id: 1,
            next_ticket: 1,
            outstanding: Vec::new(),
            picker,
            disposed: false,
        };
        session.push(GREETING.to_string(), Origin::System, now_ms);
        session
    }

    pub fn phase(&self) -> ChatPhase {
        self.phase
    }

    /// The panel stays mounted until the exit animation is over.
    pub fn is_panel_visible(&self) -> bool {
        matches!(self.phase, ChatPhase::Open | ChatPhase::Closing)
    }

    pub fn messages(&self) -> &[DisplayMessage] {
        &self.messages
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, value: impl Into<String>) {
        self.draft = value.into();
    }

    pub fn has_pending_reply(&self) -> bool {
        !self.outstanding.is_empty()
    }

    pub fn toggle(&mut self) -> Toggle {
        match self.phase {
            ChatPhase::Closed => {
                self.phase = ChatPhase::Open;
                Toggle::Opened
            }
            ChatPhase::Open => {
                self.phase = ChatPhase::Closing;
                Toggle::StartedClosing
            }
            ChatPhase::Closing => Toggle::Ignored,
        }
    }

    /// Called when the exit animation ends. Returns whether the panel hid.
    pub fn finish_closing(&mut self) -> bool {
        if self.phase != ChatPhase::Closing {
            return false;
        }
        self.phase = ChatPhase::Closed;
        true
    }

    /// Sends the current draft. Blank drafts are ignored; otherwise the user
    /// message is appended right away, the draft is cleared, and the returned
    /// ticket should be delivered after [`REPLY_DELAY_MS`].
    pub fn submit(&mut self, now_ms: f64) -> Option<PendingReply> {
        if self.disposed || self.draft.trim().is_empty() {
            return None;
        }

        let text = std::mem::take(&mut self.draft);
        self.push(text, Origin::User, now_ms);

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.outstanding.push(ticket);
        Some(PendingReply { ticket })
    }

    /// Appends one canned reply for `reply`. Stale tickets and tickets for a
    /// disposed session append nothing.
    pub fn deliver(&mut self, reply: PendingReply, now_ms: f64) -> Option<&DisplayMessage> {
        if self.disposed {
            return None;
        }
        let index = self
            .outstanding
            .iter()
            .position(|ticket| *ticket == reply.ticket)?;
        self.outstanding.remove(index);

        let text = self.picker.pick().to_string();
        self.push(text, Origin::System, now_ms);
        log::debug!("delivered canned reply for ticket {}", reply.ticket);
        self.messages.last()
    }

    /// Drops every outstanding ticket; nothing is appended afterwards.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.outstanding.clear();
    }

    fn push(&mut self, text: String, origin: Origin, now_ms: f64) {
        self.messages.push(DisplayMessage {
            id: self.next_id,
            text,
            origin,
            created_at_ms: now_ms,
        });
        self.next_id += 1;
    }
}
