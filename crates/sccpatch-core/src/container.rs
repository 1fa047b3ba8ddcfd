// crates/sccpatch-core/src/container.rs
//
// KSS playback container: a fixed header followed by 8 KiB pages cut out of
// the image, in map order. The same bank may appear more than once.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{PatchError, Result};
use crate::rom::out_of_range;

pub const KSS_PAGE_SIZE: usize = 8 * 1024;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMap {
    /// Bank numbers; page offset = bank * page_size.
    pub banks: Vec<usize>,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    KSS_PAGE_SIZE
}

impl PageMap {
    pub fn new(banks: &[usize]) -> Self {
        Self {
            banks: banks.to_vec(),
            page_size: KSS_PAGE_SIZE,
        }
    }

    /// Image range of `bank`; `None` when it does not fit in `usize`.
    pub fn page_range(&self, bank: usize) -> Option<Range<usize>> {
        let start = bank.checked_mul(self.page_size)?;
        let end = start.checked_add(self.page_size)?;
        Some(start..end)
    }
}

pub fn assemble_container(header: &[u8], image: &[u8], map: &PageMap) -> Result<Vec<u8>> {
    // Every page is resolved before anything is allocated.
    let mut pages = Vec::with_capacity(map.banks.len());
    for &bank in &map.banks {
        let range = map.page_range(bank).ok_or_else(|| {
            PatchError::OutOfRange(format!(
                "bank {bank} * page size {} overflows",
                map.page_size
            ))
        })?;
        let page = image
            .get(range.clone())
            .ok_or_else(|| out_of_range(range.start, map.page_size, image.len()))?;
        pages.push(page);
    }

    let body: usize = pages.iter().map(|p| p.len()).sum();
    let mut out = Vec::with_capacity(header.len() + body);
    out.extend_from_slice(header);
    for page in pages {
        out.extend_from_slice(page);
    }
    tracing::info!(pages = map.banks.len(), bytes = out.len(), "kss container assembled");
    Ok(out)
}
