//! Depth-1 frame hand-off between a tracker thread and the session
//!
//! At most one frame waits in the channel. Live trackers use
//! [`FrameSender::offer`], which drops a frame when the previous one has not
//! been consumed yet, so the session never works through a backlog.
//! Recorded streams use [`FrameSender::send`], which waits instead.

use crossbeam_channel::{Receiver, Sender, TrySendError};

use super::FrameSource;
use crate::domain::FrameInput;

type Message = anyhow::Result<FrameInput>;

/// Create a connected sender/receiver pair
pub fn frame_channel() -> (FrameSender, FrameReceiver) {
    let (tx, rx) = crossbeam_channel::bounded(1);
    (FrameSender { tx }, FrameReceiver { rx })
}

/// Producer side, owned by the tracker
#[derive(Clone)]
pub struct FrameSender {
    tx: Sender<Message>,
}

impl FrameSender {
    /// Push a frame unless one is still pending
    ///
    /// Returns false if the frame was dropped or the session has gone away.
    pub fn offer(&self, frame: FrameInput) -> bool {
        match self.tx.try_send(Ok(frame)) {
            Ok(()) => true,
            Err(TrySendError::Full(Ok(frame))) => {
                log::debug!("Session busy, dropping frame at {}ms", frame.timestamp_ms);
                false
            }
            Err(TrySendError::Full(Err(_))) | Err(TrySendError::Disconnected(_)) => false,
        }
    }

    /// Push a frame, waiting for the pending one to be consumed
    ///
    /// Returns false if the session has gone away.
    pub fn send(&self, frame: FrameInput) -> bool {
        self.tx.send(Ok(frame)).is_ok()
    }

    /// Report a tracking failure; the session stops after receiving it
    pub fn fail(self, err: anyhow::Error) {
        if self.tx.send(Err(err)).is_err() {
            log::debug!("Session already closed, tracking failure not delivered");
        }
    }
}

/// Consumer side, drained by the session loop
pub struct FrameReceiver {
    rx: Receiver<Message>,
}

impl FrameSource for FrameReceiver {
    fn next_frame(&mut self) -> anyhow::Result<Option<FrameInput>> {
        match self.rx.recv() {
            Ok(Ok(frame)) => Ok(Some(frame)),
            Ok(Err(err)) => Err(err),
            Err(_) => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::TryRecvError;

    /// Take the pending frame without waiting
    fn try_next(rx: &FrameReceiver) -> anyhow::Result<Option<FrameInput>> {
        match rx.rx.try_recv() {
            Ok(message) => message.map(Some),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => Ok(None),
        }
    }

    fn frame(timestamp_ms: u64) -> FrameInput {
        FrameInput {
            timestamp_ms,
            landmarks: Vec::new(),
        }
    }

    #[test]
    fn test_offer_drops_when_pending() {
        let (tx, rx) = frame_channel();
        assert!(tx.offer(frame(1)));
        assert!(!tx.offer(frame(2)));
        assert_eq!(try_next(&rx).unwrap().map(|f| f.timestamp_ms), Some(1));
        assert!(try_next(&rx).unwrap().is_none());
        assert!(tx.offer(frame(3)));
    }

    #[test]
    fn test_sender_drop_ends_stream() {
        let (tx, mut rx) = frame_channel();
        assert!(tx.send(frame(1)));
        drop(tx);
        assert_eq!(rx.next_frame().unwrap().map(|f| f.timestamp_ms), Some(1));
        assert!(rx.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_failure_is_reported_once() {
        let (tx, mut rx) = frame_channel();
        let worker = std::thread::spawn(move || {
            tx.send(frame(1));
            tx.fail(anyhow::anyhow!("camera unplugged"));
        });
        assert!(rx.next_frame().unwrap().is_some());
        let err = rx.next_frame().unwrap_err();
        assert!(err.to_string().contains("camera unplugged"));
        worker.join().unwrap();
        assert!(rx.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_send_after_receiver_gone() {
        let (tx, rx) = frame_channel();
        drop(rx);
        assert!(!tx.send(frame(1)));
        assert!(!tx.offer(frame(2)));
    }
}
