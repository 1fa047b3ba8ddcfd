pub mod error;
pub mod validate;

pub mod rom;
pub mod integrity;
pub mod scan;
pub mod reloc;
pub mod passes;
pub mod fragment;
pub mod container;
pub mod profile;
pub mod pipeline;

pub use crate::error::{PatchError, Result};
pub use crate::fragment::fragment::Fragment;
pub use crate::pipeline::{BuildOutput, FragmentSource, MusicCompiler, MusicJob, Pipeline};
pub use crate::profile::profile::Profile;
pub use crate::rom::RomImage;
