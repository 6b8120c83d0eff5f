use crate::core::geo::TileCoord;
use crossbeam_channel::{Receiver, Sender};
use std::path::{Path, PathBuf};
use std::thread;

/// Loads tile images from the offline tile store on background threads and
/// sends the raw bytes back over a channel.
///
/// Delivery is order-independent and idempotent from the consumer's point
/// of view: each message carries its tile coordinate, and a tile that fails
/// to read is simply never delivered (the failure is logged).
pub struct TileLoader {
    tx: Sender<(TileCoord, Vec<u8>)>,
}

impl TileLoader {
    /// Create a new tile loader given a sender to report completed reads.
    pub fn new(tx: Sender<(TileCoord, Vec<u8>)>) -> Self {
        Self { tx }
    }

    /// Create a loader together with the receiving end of its channel.
    pub fn unbounded() -> (Self, Receiver<(TileCoord, Vec<u8>)>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self::new(tx), rx)
    }

    /// Start reading the specified tile. The read occurs on a detached
    /// thread so that it does not block the caller; when it finishes the
    /// bytes arrive on the channel. A send after the receiver is gone is
    /// silently dropped.
    pub fn start_load(&self, root: &Path, ext: &str, coord: TileCoord) {
        let path = tile_path(root, ext, coord);
        let tx = self.tx.clone();

        thread::spawn(move || {
            log::debug!("reading tile {:?} from {}", coord, path.display());
            match std::fs::read(&path) {
                Ok(bytes) => {
                    log::debug!("loaded tile {:?} ({} bytes)", coord, bytes.len());
                    let _ = tx.send((coord, bytes));
                }
                Err(e) => {
                    log::warn!("tile {:?} read failed at {}: {}", coord, path.display(), e);
                }
            }
        });
    }
}

/// Path of a tile inside the `<root>/<zoom>/<x>/<y>.<ext>` store layout.
pub fn tile_path(root: &Path, ext: &str, coord: TileCoord) -> PathBuf {
    root.join(coord.z.to_string())
        .join(coord.x.to_string())
        .join(format!("{}.{}", coord.y, ext))
}
