pub mod format;
pub mod fragment;
pub mod merge;
pub mod naming;

pub use fragment::Fragment;
pub use merge::merge_fragments;
pub use naming::FragmentNaming;
