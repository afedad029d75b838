pub mod freq_list;
pub mod slot_arena;

pub use freq_list::{EntryId, FreqList};
pub use slot_arena::{SlotArena, SlotId};
