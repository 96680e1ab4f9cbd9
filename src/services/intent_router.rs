//! Decides which flow an inbound message belongs to.
//!
//! Telegram offers no session, so the flow is recovered from the reply chain:
//! a reply to one of our prompts continues that prompt's flow, and a priced
//! reply to anything else is treated as a correction of a recorded item.

use crate::models::ledger::{InboundMessage, MessageRef};
use crate::services::formatting::texts;
use crate::services::period::PeriodSelector;
use crate::services::price_parser;

pub const INSERT_COMMAND: &str = "catat";
pub const LIST_COMMAND: &str = "lihat";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// `/catat`: ask what to record
    StartInsert,
    /// Reply to the insert prompt, one item per line
    ContinueInsert,
    /// `/lihat`: offer the period keyboard
    StartList,
    /// Reply to the list prompt with a period label
    ContinueList(PeriodSelector),
    /// Priced reply to some other message, possibly a confirmation
    Update(MessageRef),
    Unrecognized,
}

pub fn route(msg: &InboundMessage) -> Intent {
    match msg.command.as_deref() {
        Some(INSERT_COMMAND) => return Intent::StartInsert,
        Some(LIST_COMMAND) => return Intent::StartList,
        _ => {}
    }

    let Some(replied) = &msg.replied_to else {
        return Intent::Unrecognized;
    };

    if replied.text == texts::INSERT_PROMPT {
        return Intent::ContinueInsert;
    }

    if replied.text == texts::LIST_PROMPT {
        return match PeriodSelector::from_label(&msg.text) {
            Some(selector) => Intent::ContinueList(selector),
            None => Intent::Unrecognized,
        };
    }

    if price_parser::has_price(&msg.text) {
        return Intent::Update(MessageRef {
            chat_id: msg.chat_id,
            message_id: replied.message_id,
        });
    }

    Intent::Unrecognized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ledger::{ChatId, MessageId};

    #[test]
    fn test_commands() {
        let msg = InboundMessage::text(1, 10, "/catat").with_command("catat");
        assert_eq!(route(&msg), Intent::StartInsert);

        let msg = InboundMessage::text(1, 10, "/lihat").with_command("lihat");
        assert_eq!(route(&msg), Intent::StartList);
    }

    #[test]
    fn test_command_wins_over_reply() {
        let msg = InboundMessage::text(1, 10, "/lihat")
            .with_command("lihat")
            .replying_to(9, texts::INSERT_PROMPT);
        assert_eq!(route(&msg), Intent::StartList);
    }

    #[test]
    fn test_other_commands_are_unrecognized() {
        let msg = InboundMessage::text(1, 10, "/start").with_command("start");
        assert_eq!(route(&msg), Intent::Unrecognized);
    }

    #[test]
    fn test_reply_to_insert_prompt() {
        let msg = InboundMessage::text(1, 11, "kopi 15 ribu\nroti 8rb")
            .replying_to(9, texts::INSERT_PROMPT);
        assert_eq!(route(&msg), Intent::ContinueInsert);
    }

    #[test]
    fn test_sentinel_match_is_exact() {
        let msg = InboundMessage::text(1, 11, "kopi 15 ribu")
            .replying_to(9, "apa saja yang pengen dicatat, bos");
        // Not the prompt, but a priced reply: classified as a correction attempt
        assert!(matches!(route(&msg), Intent::Update(_)));

        let msg = InboundMessage::text(1, 11, "kemarin")
            .replying_to(9, "pengen lihat daftar catatan yang mana bos?");
        assert_eq!(route(&msg), Intent::Unrecognized);
    }

    #[test]
    fn test_reply_to_list_prompt() {
        let msg = InboundMessage::text(1, 12, "kemarin").replying_to(9, texts::LIST_PROMPT);
        assert_eq!(route(&msg), Intent::ContinueList(PeriodSelector::Yesterday));
    }

    #[test]
    fn test_unknown_period_label() {
        let msg = InboundMessage::text(1, 12, "tahun lalu").replying_to(9, texts::LIST_PROMPT);
        assert_eq!(route(&msg), Intent::Unrecognized);
    }

    #[test]
    fn test_priced_reply_targets_replied_message() {
        let msg = InboundMessage::text(1, 13, "kopi susu 18rb")
            .replying_to(20, "*kopi 15.000* dicatat ya bos 👌");
        assert_eq!(
            route(&msg),
            Intent::Update(MessageRef {
                chat_id: ChatId(1),
                message_id: MessageId(20),
            })
        );
    }

    #[test]
    fn test_unpriced_reply_is_unrecognized() {
        let msg = InboundMessage::text(1, 13, "makasih").replying_to(20, "*kopi 15.000* dicatat ya bos 👌");
        assert_eq!(route(&msg), Intent::Unrecognized);
    }

    #[test]
    fn test_plain_message_is_unrecognized() {
        let msg = InboundMessage::text(1, 14, "kopi 15 ribu");
        assert_eq!(route(&msg), Intent::Unrecognized);
    }
}
