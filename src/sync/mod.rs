pub mod bridge;
pub mod cache;
pub mod debounce;
pub mod journal;
pub mod remote;
pub mod session;

pub use bridge::{Bridge, BridgeError, FlushOutcome, LoadOutcome, LoadSource, SyncEvent};
pub use cache::{read_cache, write_cache};
pub use debounce::{Debounce, SaveDecision};
pub use remote::{ApiError, PushReceipt, RemoteStore};
pub use session::{SessionError, SessionLock};
