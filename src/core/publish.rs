//! Remote sink: the caller-registered delivery function

use super::log_entry::LogEntry;
use std::fmt;
use std::sync::Arc;

/// Delivery function handing entries to an external transport
///
/// Invoked synchronously while the owning logger's lock is held. It must be
/// fast, must not block, and must not log through the same logger.
pub type PublishCallback = Arc<dyn Fn(&LogEntry) + Send + Sync>;

/// Holds at most one delivery function; the latest registration wins
#[derive(Default, Clone)]
pub struct RemoteSink {
    callback: Option<PublishCallback>,
}

impl RemoteSink {
    pub fn new(callback: Option<PublishCallback>) -> Self {
        Self { callback }
    }

    /// Replace the delivery function, returning the previous one
    pub fn replace(&mut self, callback: Option<PublishCallback>) -> Option<PublishCallback> {
        std::mem::replace(&mut self.callback, callback)
    }

    #[inline]
    pub fn is_registered(&self) -> bool {
        self.callback.is_some()
    }

    /// Deliver `entry`; returns whether a function was registered to receive it
    pub fn publish(&self, entry: &LogEntry) -> bool {
        match self.callback {
            Some(ref callback) => {
                callback(entry);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for RemoteSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteSink")
            .field("registered", &self.is_registered())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;
    use parking_lot::Mutex;

    #[test]
    fn test_publish_without_callback() {
        let sink = RemoteSink::default();
        let entry = LogEntry::new(LogLevel::Info, "node", 0, "x".to_string());
        assert!(!sink.is_registered());
        assert!(!sink.publish(&entry));
    }

    #[test]
    fn test_latest_registration_wins() {
        let first = Arc::new(Mutex::new(Vec::new()));
        let second = Arc::new(Mutex::new(Vec::new()));

        let first_clone = Arc::clone(&first);
        let mut sink = RemoteSink::new(Some(Arc::new(move |entry: &LogEntry| {
            first_clone.lock().push(entry.message.clone());
        })));

        let second_clone = Arc::clone(&second);
        let previous = sink.replace(Some(Arc::new(move |entry: &LogEntry| {
            second_clone.lock().push(entry.message.clone());
        })));
        assert!(previous.is_some());

        let entry = LogEntry::new(LogLevel::Info, "node", 0, "hello".to_string());
        assert!(sink.publish(&entry));

        assert!(first.lock().is_empty());
        assert_eq!(second.lock().as_slice(), ["hello".to_string()]);
    }

    #[test]
    fn test_debug_hides_callback() {
        let sink = RemoteSink::new(Some(Arc::new(|_: &LogEntry| {})));
        assert_eq!(format!("{:?}", sink), "RemoteSink { registered: true }");
    }
}
