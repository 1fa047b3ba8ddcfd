pub mod calls;
pub mod channels;
pub mod fixups;
pub mod mapper;

pub use calls::patch_calls;
pub use channels::{audit_channel_locations, patch_channel_locations, ChannelAudit};
pub use fixups::{apply_fixups, Fixups, Guard, Poke};
pub use mapper::patch_mapper;
