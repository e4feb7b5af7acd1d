use crate::error::{BatchError, BatchResult};

/// Contiguous run of character codes mapped onto a contiguous run of glyph
/// indices starting at `start_index`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CharacterRegion {
    pub start: char,
    pub end: char,
    pub start_index: usize,
}

impl CharacterRegion {
    pub const fn single(character: char, index: usize) -> Self {
        Self {
            start: character,
            end: character,
            start_index: index,
        }
    }

    pub fn contains(&self, c: char) -> bool {
        self.start <= c && c <= self.end
    }

    /// Number of characters covered by the region.
    pub fn char_count(&self) -> usize {
        (u32::from(self.end) - u32::from(self.start)) as usize + 1
    }
}

/// Builds the sorted region index of a character list.
///
/// `characters[i]` is the character of glyph `i`. Runs of consecutive codes are
/// coalesced into one region; a gap starts a new one. The list must be
/// strictly ascending.
pub fn build_regions(
    characters: impl IntoIterator<Item = char>,
) -> BatchResult<Vec<CharacterRegion>> {
    let mut regions: Vec<CharacterRegion> = Vec::new();

    for (index, c) in characters.into_iter().enumerate() {
        let Some(last) = regions.last_mut() else {
            regions.push(CharacterRegion::single(c, index));
            continue;
        };

        let end = u32::from(last.end);
        let code = u32::from(c);
        if code == end + 1 {
            last.end = c;
        } else if code > end + 1 {
            regions.push(CharacterRegion::single(c, index));
        } else {
            return Err(BatchError::InvalidLayout {
                previous: last.end,
                next: c,
            });
        }
    }

    Ok(regions)
}

/// Binary search over `regions` for the glyph index of `c`.
///
/// `None` means no region covers the character.
pub fn find_glyph_index(regions: &[CharacterRegion], c: char) -> Option<usize> {
    let mut low = 0usize;
    let mut high = regions.len();

    while low < high {
        let mid = low + (high - low) / 2;
        let region = &regions[mid];
        if region.contains(c) {
            let offset = u32::from(c) - u32::from(region.start);
            return Some(region.start_index + offset as usize);
        }

        if region.end < c {
            low = mid + 1;
        } else {
            high = mid;
        }
    }

    None
}
