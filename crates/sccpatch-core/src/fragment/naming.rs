// crates/sccpatch-core/src/fragment/naming.rs
//
// Assembler output naming: `prefix + <width hex digits> + suffix`, the digits
// being the destination offset in the image (e.g. vkiller_patch1a3f0.bin).
// Files ending in `structured_suffix` are SPF1 and carry their own offset.

use serde::{Deserialize, Serialize};

use crate::error::{PatchError, Result};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentNaming {
    pub prefix: String,
    pub suffix: String,
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_structured_suffix")]
    pub structured_suffix: String,
}

fn default_width() -> usize {
    5
}

fn default_structured_suffix() -> String {
    ".spf".to_string()
}

impl FragmentNaming {
    pub fn new(prefix: &str, suffix: &str, width: usize) -> Self {
        Self {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            width,
            structured_suffix: default_structured_suffix(),
        }
    }

    /// SPF1 fragment file (any stem).
    pub fn is_structured_name(&self, name: &str) -> bool {
        !self.structured_suffix.is_empty()
            && name.len() > self.structured_suffix.len()
            && name.ends_with(&self.structured_suffix)
    }

    /// Does `name` follow the convention at all (prefix and suffix)?
    pub fn is_candidate(&self, name: &str) -> bool {
        name.len() >= self.prefix.len() + self.suffix.len()
            && name.starts_with(&self.prefix)
            && name.ends_with(&self.suffix)
    }

    pub fn decode_offset(&self, name: &str) -> Result<u32> {
        if !self.is_candidate(name) {
            return Err(PatchError::Decoding(format!(
                "{name:?} is not {}<offset>{}",
                self.prefix, self.suffix
            )));
        }
        let digits = &name[self.prefix.len()..name.len() - self.suffix.len()];
        if digits.len() != self.width || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(PatchError::Decoding(format!(
                "{name:?}: offset {digits:?} is not {} hex digits",
                self.width
            )));
        }
        u32::from_str_radix(digits, 16)
            .map_err(|e| PatchError::Decoding(format!("{name:?}: {e}")))
    }

    pub fn file_name(&self, offset: u32) -> String {
        format!(
            "{}{:0width$x}{}",
            self.prefix,
            offset,
            self.suffix,
            width = self.width
        )
    }
}
