use msglog_common::models::Message;

/// A deleted message is a ghost ping when it mentioned the current user.
pub fn is_ghost_ping(message: &Message, current_user_id: &str) -> bool {
    message.mentions_user(current_user_id)
}

pub(crate) fn ghost_ping_notice(message: &Message) -> String {
    format!("Ghost ping detected from {}", message.author.username)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use msglog_common::models::MessageAuthor;

    fn user(id: &str) -> MessageAuthor {
        MessageAuthor { id: id.into(), username: format!("user{id}"), bot: false }
    }

    #[test]
    fn detects_mention_of_current_user_only() {
        let mut message = Message {
            id: "m".into(),
            channel_id: "c".into(),
            guild_id: None,
            author: user("1"),
            content: "hey".into(),
            mentions: vec![user("2"), user("3")],
            timestamp: Utc::now(),
            edited_timestamp: None,
        };
        assert!(is_ghost_ping(&message, "3"));
        assert!(!is_ghost_ping(&message, "4"));

        message.mentions.clear();
        assert!(!is_ghost_ping(&message, "3"));
        assert_eq!(ghost_ping_notice(&message), "Ghost ping detected from user1");
    }
}
