// File: src/platforms/discord.rs
//
// Host bindings for a twilight gateway client.
//
// Ordering matters: hand each gateway event to the logger *before* calling
// `InMemoryCache::update` with it, otherwise the lookup already sees the
// post-edit content (or no message at all after a delete).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use twilight_cache_inmemory::InMemoryCache;
use twilight_gateway::Event;
use twilight_model::channel::Message as DiscordMessage;
use twilight_model::id::marker::{MessageMarker, UserMarker};
use twilight_model::id::Id;
use twilight_model::util::Timestamp;

use msglog_common::models::{CurrentUser, Message, MessageAuthor, MessageEvent};
use msglog_common::traits::{CurrentUserProvider, MessageLookup};

fn to_utc(ts: Timestamp) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_micros(ts.as_micros()).unwrap_or_default()
}

/// Copy the fields the logger needs out of a gateway message.
pub fn message_from_model(msg: &DiscordMessage) -> Message {
    Message {
        id: msg.id.to_string(),
        channel_id: msg.channel_id.to_string(),
        guild_id: msg.guild_id.map(|g| g.to_string()),
        author: MessageAuthor {
            id: msg.author.id.to_string(),
            username: msg.author.name.clone(),
            bot: msg.author.bot,
        },
        content: msg.content.clone(),
        mentions: msg
            .mentions
            .iter()
            .map(|m| MessageAuthor {
                id: m.id.to_string(),
                username: m.name.clone(),
                bot: m.bot,
            })
            .collect(),
        timestamp: to_utc(msg.timestamp),
        edited_timestamp: msg.edited_timestamp.map(to_utc),
    }
}

/// Map the three message-changed gateway events; everything else is `None`.
pub fn message_event_from_gateway(event: &Event) -> Option<MessageEvent> {
    match event {
        Event::MessageDelete(d) => Some(MessageEvent::Deleted {
            channel_id: d.channel_id.to_string(),
            id: d.id.to_string(),
        }),
        Event::MessageDeleteBulk(b) => Some(MessageEvent::BulkDeleted {
            channel_id: b.channel_id.to_string(),
            ids: b.ids.iter().map(ToString::to_string).collect(),
        }),
        Event::MessageUpdate(u) => Some(MessageEvent::Updated {
            message: message_from_model(u),
        }),
        _ => None,
    }
}

/// `MessageLookup` backed by twilight's in-memory cache.
#[derive(Clone)]
pub struct TwilightMessageLookup {
    cache: Arc<InMemoryCache>,
}

impl TwilightMessageLookup {
    pub fn new(cache: Arc<InMemoryCache>) -> Self {
        Self { cache }
    }

    fn user(&self, id: Id<UserMarker>) -> MessageAuthor {
        match self.cache.user(id) {
            Some(user) => MessageAuthor {
                id: id.to_string(),
                username: user.name.clone(),
                bot: user.bot,
            },
            None => MessageAuthor {
                id: id.to_string(),
                username: String::new(),
                bot: false,
            },
        }
    }
}

impl MessageLookup for TwilightMessageLookup {
    fn get_message(&self, channel_id: &str, message_id: &str) -> Option<Message> {
        let id: Id<MessageMarker> = Id::new_checked(message_id.parse::<u64>().ok()?)?;
        let cached = self.cache.message(id)?;
        if cached.channel_id().to_string() != channel_id {
            return None;
        }

        Some(Message {
            id: message_id.to_string(),
            channel_id: channel_id.to_string(),
            guild_id: cached.guild_id().map(|g| g.to_string()),
            author: self.user(cached.author()),
            content: cached.content().to_string(),
            mentions: cached.mentions().iter().map(|u| self.user(*u)).collect(),
            timestamp: to_utc(cached.timestamp()),
            edited_timestamp: cached.edited_timestamp().map(to_utc),
        })
    }
}

/// `CurrentUserProvider` reading the READY user from the cache. Before READY
/// arrives the id is empty, which matches nobody.
#[derive(Clone)]
pub struct TwilightCurrentUser {
    cache: Arc<InMemoryCache>,
}

impl TwilightCurrentUser {
    pub fn new(cache: Arc<InMemoryCache>) -> Self {
        Self { cache }
    }
}

impl CurrentUserProvider for TwilightCurrentUser {
    fn current_user(&self) -> CurrentUser {
        match self.cache.current_user() {
            Some(user) => CurrentUser {
                id: user.id.to_string(),
                username: user.name,
            },
            None => CurrentUser {
                id: String::new(),
                username: String::new(),
            },
        }
    }
}
