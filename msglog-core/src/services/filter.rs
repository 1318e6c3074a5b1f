use msglog_common::models::{FilterSettings, Message};

/// Split a comma-separated id list, trimming entries and dropping empty ones.
pub fn parse_id_list(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .collect()
}

/// Decide whether a message event should be left unrecorded.
///
/// Rules are checked in order and the first match wins:
/// own messages, bot authors, ignored users, ignored channels.
pub fn should_ignore(message: &Message, filters: &FilterSettings, current_user_id: &str) -> bool {
    if filters.ignore_own_messages && message.author.id == current_user_id {
        return true;
    }

    if filters.ignore_bots && message.author.bot {
        return true;
    }

    if parse_id_list(&filters.ignored_users).contains(&message.author.id.as_str()) {
        return true;
    }

    if parse_id_list(&filters.ignored_channels).contains(&message.channel_id.as_str()) {
        return true;
    }

    false
}
