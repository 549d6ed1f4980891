//! Analytics sinks for mulligan records.
//!
//! Submitting a record must never block or fail the request that produced
//! it, so sinks swallow their own errors after logging them.

use std::io::{self, Read, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, TrySendError};
use std::thread::{self, JoinHandle};

use crate::core::DEFAULT_ANALYTICS_QUEUE_CAPACITY;
use crate::mulligan::MulliganRecord;

/// Receives one record per successful mulligan.
pub trait AnalyticsSink: Send + Sync {
    fn submit(&self, record: MulliganRecord);
}

/// Drops every record.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl AnalyticsSink for NullSink {
    fn submit(&self, _record: MulliganRecord) {}
}

/// Logs every record as JSON.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl AnalyticsSink for TracingSink {
    fn submit(&self, record: MulliganRecord) {
        match serde_json::to_string(&record) {
            Ok(json) => tracing::info!(
                target: "mulligan_sim::analytics",
                session_id = %record.session_id,
                record = %json,
                "mulligan recorded"
            ),
            Err(err) => tracing::warn!(session_id = %record.session_id, error = %err, "could not encode mulligan record"),
        }
    }
}

impl<F> AnalyticsSink for F
where
    F: Fn(MulliganRecord) + Send + Sync,
{
    fn submit(&self, record: MulliganRecord) {
        self(record);
    }
}

/// Writes records from a background thread.
///
/// Records are length-prefixed bincode (`u32` little endian, then payload).
/// The queue is bounded; a record submitted while it is full is dropped with
/// a warning rather than blocking the request. Dropping the sink drains the
/// queue and joins the worker.
#[derive(Debug)]
pub struct BackgroundSink {
    sender: Option<mpsc::SyncSender<MulliganRecord>>,
    worker: Option<JoinHandle<u64>>,
    dropped: AtomicU64,
}

impl BackgroundSink {
    /// Start the worker thread writing to `writer` with the default queue.
    pub fn spawn<W>(writer: W) -> io::Result<Self>
    where
        W: Write + Send + 'static,
    {
        Self::with_capacity(writer, DEFAULT_ANALYTICS_QUEUE_CAPACITY)
    }

    /// Start the worker thread with room for `capacity` queued records.
    pub fn with_capacity<W>(writer: W, capacity: usize) -> io::Result<Self>
    where
        W: Write + Send + 'static,
    {
        let (sender, receiver) = mpsc::sync_channel(capacity.max(1));
        let worker = thread::Builder::new()
            .name("mulligan-analytics".into())
            .spawn(move || drain(receiver, writer))?;
        Ok(Self {
            sender: Some(sender),
            worker: Some(worker),
            dropped: AtomicU64::new(0),
        })
    }

    /// Records discarded because the queue was full or the worker was gone.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Stop accepting records, flush, and return how many were written.
    pub fn close(mut self) -> u64 {
        self.shutdown()
    }

    fn shutdown(&mut self) -> u64 {
        self.sender.take();
        match self.worker.take().map(JoinHandle::join) {
            Some(Ok(written)) => written,
            Some(Err(_)) => {
                tracing::error!("analytics worker panicked");
                0
            }
            None => 0,
        }
    }
}

impl AnalyticsSink for BackgroundSink {
    fn submit(&self, record: MulliganRecord) {
        let Some(sender) = &self.sender else {
            return;
        };
        match sender.try_send(record) {
            Ok(()) => {}
            Err(TrySendError::Full(record)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(session_id = %record.session_id, "analytics queue full, record dropped");
            }
            Err(TrySendError::Disconnected(record)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(session_id = %record.session_id, "analytics worker gone, record dropped");
            }
        }
    }
}

impl Drop for BackgroundSink {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn drain<W: Write>(receiver: mpsc::Receiver<MulliganRecord>, mut writer: W) -> u64 {
    let mut written = 0;
    for record in receiver {
        match write_record(&mut writer, &record) {
            Ok(()) => written += 1,
            Err(err) => tracing::warn!(session_id = %record.session_id, error = %err, "failed to persist mulligan record"),
        }
    }
    if let Err(err) = writer.flush() {
        tracing::warn!(error = %err, "failed to flush mulligan records");
    }
    written
}

/// Append one length-prefixed record.
pub fn write_record<W: Write>(writer: &mut W, record: &MulliganRecord) -> io::Result<()> {
    let payload = bincode::serialize(record).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let len = u32::try_from(payload.len()).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writer.write_all(&len.to_le_bytes())?;
    writer.write_all(&payload)
}

/// Read the next record, or `None` at a clean end of input.
pub fn read_record<R: Read>(reader: &mut R) -> io::Result<Option<MulliganRecord>> {
    let mut len = [0u8; 4];
    match reader.read_exact(&mut len) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(err) => return Err(err),
    }
    let mut payload = vec![0u8; u32::from_le_bytes(len) as usize];
    reader.read_exact(&mut payload)?;
    bincode::deserialize(&payload)
        .map(Some)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
