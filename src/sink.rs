//! Delivery of resolved paths to the native core.
//!
//! The call is one-way: no return value, no acknowledgment.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::types::ResolvedPath;

pub trait PathSink {
    fn set_file_path_from_intent(&self, path: &str);
}

/// Adapts a closure into a sink.
pub struct FnSink<F>(pub F);

impl<F> PathSink for FnSink<F>
where
    F: Fn(&str),
{
    fn set_file_path_from_intent(&self, path: &str) {
        (self.0)(path)
    }
}

impl<S: PathSink + ?Sized> PathSink for &S {
    fn set_file_path_from_intent(&self, path: &str) {
        (**self).set_file_path_from_intent(path)
    }
}

impl<S: PathSink + ?Sized> PathSink for Box<S> {
    fn set_file_path_from_intent(&self, path: &str) {
        (**self).set_file_path_from_intent(path)
    }
}

impl<S: PathSink + ?Sized> PathSink for Arc<S> {
    fn set_file_path_from_intent(&self, path: &str) {
        (**self).set_file_path_from_intent(path)
    }
}

/// Forwards paths into a channel drained by the core's event loop.
#[derive(Clone, Debug)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<ResolvedPath>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<ResolvedPath>) -> Self {
        Self { tx }
    }

    /// Create a sink together with the receiving end.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ResolvedPath>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl PathSink for ChannelSink {
    fn set_file_path_from_intent(&self, path: &str) {
        if self.tx.send(ResolvedPath::new(path)).is_err() {
            log::warn!("Core stopped listening, dropping path {}", path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_closure_sink() {
        let received = RefCell::new(Vec::new());
        let sink = FnSink(|path: &str| received.borrow_mut().push(path.to_string()));
        sink.set_file_path_from_intent("/a/b.mp3");
        drop(sink);
        assert_eq!(received.into_inner(), vec!["/a/b.mp3".to_string()]);
    }

    #[test]
    fn test_channel_sink() {
        let (sink, mut rx) = ChannelSink::channel();
        sink.set_file_path_from_intent("/sdcard/Music/x.ogg");
        assert_eq!(rx.try_recv().unwrap(), ResolvedPath::new("/sdcard/Music/x.ogg"));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_channel_sink_closed_receiver() {
        let (sink, rx) = ChannelSink::channel();
        drop(rx);
        // Must not panic
        sink.set_file_path_from_intent("/x");
    }

    #[test]
    fn test_boxed_sink() {
        let (sink, mut rx) = ChannelSink::channel();
        let boxed: Box<dyn PathSink> = Box::new(sink);
        boxed.set_file_path_from_intent("/y");
        assert_eq!(rx.try_recv().unwrap().as_str(), "/y");
    }
}
