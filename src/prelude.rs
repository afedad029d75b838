pub use crate::ds::{EntryId, FreqList, SlotArena, SlotId};
pub use crate::error::InvariantError;
pub use crate::policy::lfu::LfuCache;
pub use crate::traits::{CoreCache, LfuCacheTrait, MutableCache};
