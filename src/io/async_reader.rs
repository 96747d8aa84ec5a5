//! Asynchronous CSV reader with batch interface
//!
//! Provides a streaming interface over preview requests from a CSV file.
//! Supports batch reading for efficient async processing.
//!
//! # Architecture
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of PreviewRequests
//!                  ↓
//!           csv_format module
//!           (RequestCsvRecord, convert_request_record)
//! ```

use crate::io::csv_format::{convert_request_record, RequestCsvRecord};
use crate::types::PreviewRequest;
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;

/// Asynchronous CSV reader over preview requests
///
/// Maintains streaming behavior with constant memory usage per batch.
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a new AsyncReader from an async reader
    ///
    /// # Arguments
    ///
    /// * `reader` - Async reader providing CSV data
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self { csv_reader }
    }

    /// Read a batch of preview requests
    ///
    /// Reads up to `batch_size` records, converting them to
    /// `PreviewRequest`s. Invalid records are logged to stderr and skipped,
    /// matching the sync pipeline's recoverable-error policy.
    ///
    /// # Returns
    ///
    /// A vector of successfully converted requests; empty at end of file.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<PreviewRequest> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<RequestCsvRecord>();

        while batch.len() < batch_size {
            match records.next().await {
                Some(Ok(csv_record)) => match convert_request_record(csv_record) {
                    Ok(request) => batch.push(request),
                    Err(e) => eprintln!("Record conversion error: {}", e),
                },
                Some(Err(e)) => eprintln!("CSV parse error: {}", e),
                None => break,
            }
        }

        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ActionType, FeeDirection};
    use futures::io::Cursor;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_async_reader_read_batch() {
        let csv_content = "action,target,amount,direction\n\
                           send_money,USER,2000,add_on_top\n\
                           merchant_withdrawal,MERCHANT,30,deduct\n\
                           recharge_virement,USER,500,add_on_top\n";
        let reader = Cursor::new(csv_content.as_bytes());
        let mut async_reader = AsyncReader::new(reader);

        let batch = async_reader.read_batch(2).await;
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].action, ActionType::SendMoney);
        assert_eq!(batch[0].amount, Decimal::from(2000));
        assert_eq!(batch[1].direction, FeeDirection::DeductFromAmount);

        let batch = async_reader.read_batch(2).await;
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].action, ActionType::RechargeVirement);

        let batch = async_reader.read_batch(2).await;
        assert!(batch.is_empty());
    }

    #[tokio::test]
    async fn test_async_reader_skips_invalid_records() {
        let csv_content = "action,target,amount,direction\n\
                           send_money,USER,2000,add_on_top\n\
                           send_money,USER,garbage,add_on_top\n\
                           send_money,USER,100,deduct\n";
        let reader = Cursor::new(csv_content.as_bytes());
        let mut async_reader = AsyncReader::new(reader);

        let batch = async_reader.read_batch(10).await;
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[1].amount, Decimal::from(100));
    }

    #[tokio::test]
    async fn test_async_reader_empty_input() {
        let reader = Cursor::new(b"action,target,amount,direction\n".to_vec());
        let mut async_reader = AsyncReader::new(reader);
        assert!(async_reader.read_batch(5).await.is_empty());
    }
}
