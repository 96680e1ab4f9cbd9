//! Routes inbound messages to the flow that owns them.

use std::sync::Arc;

use crate::errors::LedgerError;
use crate::models::ledger::InboundMessage;
use crate::services::clock::Clock;
use crate::services::formatting::texts;
use crate::services::intent_router::{self, Intent};
use crate::services::ledger_reporter::LedgerReporter;
use crate::services::ledger_writer::LedgerWriter;
use crate::services::period::{PeriodResolver, PeriodSelector};
use crate::services::ports::{Markup, MessagingPort, OutboundMessage, StoragePort};
use crate::services::update_handler::{UpdateHandler, UpdateOutcome};

/// What the bot did with a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    PromptedInsert,
    Recorded(usize),
    PromptedList,
    Reported(PeriodSelector),
    Updated,
    /// Not addressed to any flow
    Ignored,
}

#[derive(Clone)]
pub struct Dispatcher {
    messenger: Arc<dyn MessagingPort>,
    writer: LedgerWriter,
    reporter: LedgerReporter,
    updater: UpdateHandler,
}

impl Dispatcher {
    pub fn new(
        messenger: Arc<dyn MessagingPort>,
        storage: Arc<dyn StoragePort>,
        clock: Arc<dyn Clock>,
        periods: PeriodResolver,
    ) -> Self {
        Self {
            writer: LedgerWriter::new(messenger.clone(), storage.clone(), clock.clone()),
            reporter: LedgerReporter::new(messenger.clone(), storage.clone(), clock, periods),
            updater: UpdateHandler::new(messenger.clone(), storage),
            messenger,
        }
    }

    pub async fn handle(&self, msg: &InboundMessage) -> Result<Dispatch, LedgerError> {
        let intent = intent_router::route(msg);
        tracing::debug!(chat_id = %msg.chat_id, message_id = %msg.message_id, ?intent, "Routed message");

        match intent {
            Intent::StartInsert => {
                let prompt = OutboundMessage::new(texts::INSERT_PROMPT)
                    .reply_to(msg.message_id)
                    .markup(Markup::ForceReply);
                self.messenger.send(msg.chat_id, prompt).await?;
                Ok(Dispatch::PromptedInsert)
            }
            Intent::ContinueInsert => {
                let recorded = self.writer.record_lines(msg).await?;
                Ok(Dispatch::Recorded(recorded.len()))
            }
            Intent::StartList => {
                let prompt = OutboundMessage::new(texts::LIST_PROMPT)
                    .reply_to(msg.message_id)
                    .markup(period_keyboard());
                self.messenger.send(msg.chat_id, prompt).await?;
                Ok(Dispatch::PromptedList)
            }
            Intent::ContinueList(selector) => {
                self.reporter.send_report(msg.chat_id, selector).await?;
                Ok(Dispatch::Reported(selector))
            }
            Intent::Update(target) => match self.updater.apply(msg, target).await? {
                UpdateOutcome::Updated { .. } => Ok(Dispatch::Updated),
                UpdateOutcome::NotApplicable => Ok(Dispatch::Ignored),
            },
            Intent::Unrecognized => Ok(Dispatch::Ignored),
        }
    }
}

/// The six period labels, two per row.
pub fn period_keyboard() -> Markup {
    let rows = PeriodSelector::ALL
        .chunks(2)
        .map(|pair| pair.iter().map(|s| s.label().to_string()).collect())
        .collect();
    Markup::Keyboard(rows)
}
