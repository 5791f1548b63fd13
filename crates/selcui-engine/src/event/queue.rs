use std::sync::mpsc;

/// Creates the hand-off between the network thread and the frame thread.
pub fn channel() -> (EventSender, EventQueue) {
    let (tx, rx) = mpsc::channel();
    (EventSender { tx }, EventQueue { rx })
}

/// Network side. Cheap to clone; only carries raw payloads.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::Sender<String>,
}

impl EventSender {
    /// Returns `false` once the frame thread has gone away.
    pub fn send(&self, raw: impl Into<String>) -> bool {
        self.tx.send(raw.into()).is_ok()
    }
}

/// Frame side. Never blocks.
#[derive(Debug)]
pub struct EventQueue {
    rx: mpsc::Receiver<String>,
}

impl EventQueue {
    /// Everything received so far, in arrival order.
    pub fn drain(&self) -> impl Iterator<Item = String> + '_ {
        self.rx.try_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_in_order_across_threads() {
        let (tx, rx) = channel();
        let worker = std::thread::spawn(move || {
            for i in 0..5 {
                assert!(tx.send(format!("u|{i}")));
            }
        });
        worker.join().unwrap();

        let got: Vec<String> = rx.drain().collect();
        assert_eq!(got, vec!["u|0", "u|1", "u|2", "u|3", "u|4"]);
        assert_eq!(rx.drain().count(), 0);
    }

    #[test]
    fn send_fails_after_queue_drop() {
        let (tx, rx) = channel();
        drop(rx);
        assert!(!tx.send("u"));
    }
}
