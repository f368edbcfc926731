// crates/vidcore-media/src/worker.rs
//
// MediaWorker: owns the thumbnail probe threads and the playback decode
// thread. All public API that vidcore-ui calls lives here.

use std::path::PathBuf;
use std::sync::{Arc, Condvar, Mutex, atomic::{AtomicBool, AtomicU64, Ordering}};
use std::thread;

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError};
use tracing::{debug, warn};

use vidcore_core::media_types::{MediaResult, PlaybackFrame};

use crate::decode::LiveDecoder;
use crate::probe::probe_thumbnail;

/// Concurrent thumbnail probes. Each holds an open demuxer + decoder.
const PROBE_CONCURRENCY: u32 = 4;

enum PlaybackCmd {
    Start { session: u64, path: PathBuf },
    Stop,
}

pub struct MediaWorker {
    /// Shared result channel: thumbnails, errors, end-of-playback.
    pub rx:    Receiver<MediaResult>,
    tx:        Sender<MediaResult>,
    /// Dedicated playback pipeline.
    pb_tx:     Sender<PlaybackCmd>,
    pub pb_rx: Receiver<PlaybackFrame>,
    shutdown:  Arc<AtomicBool>,
    /// Last session number handed out by `start_playback`.
    pb_session: AtomicU64,
    /// Limits concurrent probe threads: (active_count, Condvar).
    probe_sem: Arc<(Mutex<u32>, Condvar)>,
}

impl MediaWorker {
    pub fn new() -> Self {
        let (tx, rx) = bounded(256);

        // ── Playback decode thread ────────────────────────────────────────────
        // Runs ahead of the UI filling a bounded channel. send() blocks when
        // the channel is full. That IS the rate-limiter.
        let (pb_tx, pb_cmd_rx)   = bounded::<PlaybackCmd>(4);
        let (pb_frame_tx, pb_rx) = bounded::<PlaybackFrame>(16);
        let ended_tx = tx.clone();

        thread::spawn(move || {
            let mut decoder: Option<(u64, LiveDecoder)> = None;
            loop {
                let cmd = if decoder.is_some() {
                    match pb_cmd_rx.try_recv() {
                        Ok(cmd) => Some(cmd),
                        Err(TryRecvError::Empty) => None,
                        Err(TryRecvError::Disconnected) => return,
                    }
                } else {
                    match pb_cmd_rx.recv() {
                        Ok(cmd) => Some(cmd),
                        Err(_) => return,
                    }
                };

                match cmd {
                    Some(PlaybackCmd::Start { session, path }) => {
                        decoder = match LiveDecoder::open(&path) {
                            Ok(d) => {
                                debug!("[pb] start #{session} {} ({}x{})", path.display(), d.out_w, d.out_h);
                                Some((session, d))
                            }
                            Err(e) => {
                                warn!("[pb] open {}: {e:#}", path.display());
                                let _ = ended_tx.send(MediaResult::PlaybackEnded { session });
                                None
                            }
                        };
                        continue;
                    }
                    Some(PlaybackCmd::Stop) => { decoder = None; continue; }
                    None => {}
                }

                let ended = match decoder.as_mut() {
                    Some((session, d)) => match d.next_frame() {
                        Some((data, width, height, timestamp)) => {
                            let f = PlaybackFrame { session: *session, timestamp, width, height, data };
                            if pb_frame_tx.send(f).is_err() { return; }
                            false
                        }
                        None => {
                            let _ = ended_tx.send(MediaResult::PlaybackEnded { session: *session });
                            true
                        }
                    },
                    None => false,
                };
                if ended { decoder = None; }
            }
        });

        Self {
            rx, tx, pb_tx, pb_rx,
            shutdown:   Arc::new(AtomicBool::new(false)),
            pb_session: AtomicU64::new(0),
            probe_sem: Arc::new((Mutex::new(0), Condvar::new())),
        }
    }

    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
        self.stop_playback();
    }

    /// Queue a thumbnail decode for a record's file.
    pub fn probe_clip(&self, id: String, path: PathBuf) {
        let tx  = self.tx.clone();
        let sd  = self.shutdown.clone();
        let sem = self.probe_sem.clone();

        // One gatekeeper thread per request that acquires the semaphore before
        // doing the real work, so at most PROBE_CONCURRENCY decoders are open.
        thread::spawn(move || {
            {
                let (lock, cvar) = &*sem;
                let mut count = lock.lock().unwrap_or_else(|p| p.into_inner());
                while *count >= PROBE_CONCURRENCY {
                    count = cvar.wait(count).unwrap_or_else(|p| p.into_inner());
                }
                *count += 1;
            }
            // RAII release guard: decrements count and wakes next waiter on drop
            struct SemGuard(Arc<(Mutex<u32>, Condvar)>);
            impl Drop for SemGuard {
                fn drop(&mut self) {
                    let (lock, cvar) = &*self.0;
                    *lock.lock().unwrap_or_else(|p| p.into_inner()) -= 1;
                    cvar.notify_one();
                }
            }
            let _guard = SemGuard(sem);

            if sd.load(Ordering::Relaxed) { return; }
            probe_thumbnail(&path, &id, &tx);
        });
    }

    /// Start playback of `path` from its first frame, replacing any session
    /// already running. Frames and the end notice carry the returned number.
    pub fn start_playback(&self, path: PathBuf) -> u64 {
        let session = self.pb_session.fetch_add(1, Ordering::Relaxed) + 1;
        // Flush stale frames from the previous session. The decode thread may
        // still push one more if it was blocked in send(); the session number
        // lets the player drop it.
        while self.pb_rx.try_recv().is_ok() {}
        let _ = self.pb_tx.try_send(PlaybackCmd::Start { session, path });
        session
    }

    pub fn stop_playback(&self) {
        let _ = self.pb_tx.try_send(PlaybackCmd::Stop);
        while self.pb_rx.try_recv().is_ok() {}
    }
}

impl Default for MediaWorker {
    fn default() -> Self { Self::new() }
}
