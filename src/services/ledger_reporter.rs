//! Renders recorded items of a period as a Markdown summary.

use chrono::NaiveDate;
use std::sync::Arc;

use crate::errors::LedgerError;
use crate::models::ledger::{ChatId, Record};
use crate::services::clock::Clock;
use crate::services::formatting::{escape_markdown, format_day, format_price};
use crate::services::period::{PeriodResolver, PeriodSelector};
use crate::services::ports::{Markup, MessagingPort, OutboundMessage, StoragePort};

#[derive(Clone)]
pub struct LedgerReporter {
    messenger: Arc<dyn MessagingPort>,
    storage: Arc<dyn StoragePort>,
    clock: Arc<dyn Clock>,
    periods: PeriodResolver,
}

impl LedgerReporter {
    pub fn new(
        messenger: Arc<dyn MessagingPort>,
        storage: Arc<dyn StoragePort>,
        clock: Arc<dyn Clock>,
        periods: PeriodResolver,
    ) -> Self {
        Self {
            messenger,
            storage,
            clock,
            periods,
        }
    }

    /// Records of `chat_id` within `selector`, oldest first.
    pub async fn items(&self, chat_id: ChatId, selector: PeriodSelector) -> Result<Vec<Record>, LedgerError> {
        let range = self.periods.resolve(selector, self.clock.now());
        let records = self.storage.query(chat_id, &range).await?;

        tracing::debug!(
            chat_id = %chat_id,
            period = selector.label(),
            start = %range.start,
            end = %range.end,
            count = records.len(),
            "Queried items"
        );
        Ok(records)
    }

    pub async fn report(&self, chat_id: ChatId, selector: PeriodSelector) -> Result<String, LedgerError> {
        let records = self.items(chat_id, selector).await?;
        let title = format!("catatan {}", selector.label());
        Ok(format_items(&title, &records, &self.periods))
    }

    /// Sends the report and closes the period keyboard.
    pub async fn send_report(&self, chat_id: ChatId, selector: PeriodSelector) -> Result<(), LedgerError> {
        let text = self.report(chat_id, selector).await?;
        let message = OutboundMessage::new(text)
            .markdown()
            .markup(Markup::RemoveKeyboard);
        self.messenger.send(chat_id, message).await?;
        Ok(())
    }
}

/// Title, then items grouped under a header per calendar day, then the total.
///
/// Days are taken in the resolver's reference offset; `records` must already
/// be ordered by `created_at`.
pub fn format_items(title: &str, records: &[Record], periods: &PeriodResolver) -> String {
    let mut text = format!("*==== {} ====*\n", title.to_uppercase());
    let mut sum: i64 = 0;
    let mut last_day: Option<NaiveDate> = None;

    for record in records {
        let day = periods.local_date(record.created_at);
        if last_day != Some(day) {
            text.push_str(&format!("\n_{}_\n", format_day(day)));
            last_day = Some(day);
        }
        text.push_str(&format!(
            "- {} {}\n",
            escape_markdown(&record.name),
            format_price(record.price)
        ));
        sum = sum.saturating_add(record.price);
    }

    format!("{}\n*TOTAL: {}*", text, format_price(sum))
}
