//! # reception-core
//!
//! Platform-neutral logic for the reception chat widget.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Widget                                │
//! │  ┌─────────────┐  ┌──────────────┐  ┌─────────────────────┐   │
//! │  │   Input     │  │  Dispatcher  │  │  ReceptionTransport │   │
//! │  │  Handler    │──│ (Pending     │──│   (Strategy)        │   │
//! │  │             │  │  guard)      │  │                     │   │
//! │  └─────────────┘  └──────────────┘  └─────────────────────┘   │
//! │         │                 │                                   │
//! │         └──────── ChatUi (UI context) ── format_message       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `ChatUi` trait is the seam between the dispatch flow and whatever
//! renders the conversation: the Leptos widget in the browser, or the
//! in-memory `HeadlessUi` used by tests.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod input;
pub mod message;
pub mod timer;
pub mod transport;
pub mod view;
pub mod wire;

pub use config::WidgetConfig;
pub use dispatch::{DispatchOutcome, Dispatcher, PendingRequest};
pub use error::{ReceptionError, Result};
pub use format::{FormatPolicy, format_message};
pub use message::{ConversationLog, Message, MessageId, Sender};
pub use timer::Timer;
pub use transport::{BodyObserver, HttpTransport, ReceptionTransport};
pub use view::{ChatUi, HeadlessUi};
pub use wire::{AskRequest, AskResponse};

pub use tokio_util::sync::CancellationToken;
