use std::fmt::Display;

/// Index of a file in a file store. `FileId::NONE` never names a stored file.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId(u32);

impl FileId {
    const OFFSET: u32 = 1;
    pub const NONE: Self = FileId(0);

    pub fn new(index: usize) -> FileId {
        u32::try_from(index)
            .ok()
            .and_then(|index| index.checked_add(Self::OFFSET))
            .map_or(FileId(u32::MAX), FileId)
    }

    pub fn get(self) -> usize {
        (self.0 - Self::OFFSET) as usize
    }
}

impl Display for FileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
