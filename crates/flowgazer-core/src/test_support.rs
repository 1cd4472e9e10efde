//! Event fixtures shared by the unit tests.

use crate::constants::kinds;
use crate::models::Event;

pub const ME: &str = "me";

pub fn event(id: &str, author: &str, kind: u16, created_at: u64, content: &str, tags: Vec<Vec<String>>) -> Event {
    Event {
        id: id.to_string(),
        pubkey: author.to_string(),
        created_at,
        kind,
        tags,
        content: content.to_string(),
        sig: String::new(),
    }
}

fn tag(name: &str, value: &str) -> Vec<String> {
    vec![name.to_string(), value.to_string()]
}

pub fn note(id: &str, author: &str, created_at: u64, content: &str) -> Event {
    event(id, author, kinds::TEXT_NOTE, created_at, content, Vec::new())
}

/// Note that p-tags `pubkey`.
pub fn mention(id: &str, author: &str, created_at: u64, pubkey: &str) -> Event {
    event(id, author, kinds::TEXT_NOTE, created_at, "hey", vec![tag("p", pubkey)])
}

pub fn reaction(id: &str, author: &str, created_at: u64, target_id: &str, target_author: &str) -> Event {
    event(
        id,
        author,
        kinds::REACTION,
        created_at,
        "+",
        vec![tag("e", target_id), tag("p", target_author)],
    )
}

pub fn repost(id: &str, author: &str, created_at: u64, target_id: &str, target_author: &str) -> Event {
    event(
        id,
        author,
        kinds::REPOST,
        created_at,
        "",
        vec![tag("e", target_id), tag("p", target_author)],
    )
}

pub fn channel_message(id: &str, author: &str, created_at: u64) -> Event {
    event(
        id,
        author,
        kinds::CHANNEL_MESSAGE,
        created_at,
        "chat",
        vec![tag("e", "channel")],
    )
}
