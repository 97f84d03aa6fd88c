//! Domain layer for the watch-together session.
//!
//! This module contains the session state and the rules for how client
//! actions mutate it and who gets told about it. It is independent of
//! data transfer objects (DTOs) and transport concerns.

pub mod chat_log;
pub mod entity;
pub mod error;
pub mod event;
pub mod factory;
pub mod playback;
pub mod poll;
pub mod registry;
pub mod router;
pub mod session;
pub mod value_object;

pub use chat_log::{ChatLog, TRIGGER_WORDS};
pub use entity::{ChatMessage, LoadedVideo, Participant, PlaybackSnapshot, Poll, Vote};
pub use error::{PollError, ValueObjectError};
pub use event::{Delivery, Recipients, SessionEvent};
pub use factory::{ConnectionIdFactory, PollIdFactory};
pub use playback::PlaybackState;
pub use poll::PollEngine;
pub use registry::SessionRegistry;
pub use router::{BroadcastRouter, PusherChannel, deliver};
pub use session::Session;
pub use value_object::{
    Award, ConnectionId, MessageContent, PlaybackTime, PollId, PollOption, Timestamp, Username,
    VideoId, VideoUrl,
};
