use crate::error::FormatError;
use crate::header::MAGIC;
use crate::record::Record;

/// A fully scanned archive.
///
/// All members are located when the reader is created; if any of them is malformed no
/// reader is returned at all.
#[derive(Debug, Clone)]
pub struct ArchiveReader<'a> {
    data: &'a [u8],
    records: Vec<Record<'a>>,
}

impl<'a> ArchiveReader<'a> {
    pub fn new(data: &'a [u8]) -> Result<ArchiveReader<'a>, FormatError> {
        let records = records(data)?.collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(records = records.len(), bytes = data.len(), "scanned archive");
        Ok(ArchiveReader { data, records })
    }

    /// Members in the order they appear in the archive.
    #[inline(always)]
    pub fn records(&self) -> &[Record<'a>] {
        &self.records
    }

    #[inline(always)]
    pub fn iter(&self) -> std::slice::Iter<'_, Record<'a>> {
        self.records.iter()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline(always)]
    pub fn get(&self, index: usize) -> Option<&Record<'a>> {
        self.records.get(index)
    }

    /// First member with the given name.
    pub fn find(&self, name: &str) -> Option<&Record<'a>> {
        self.records
            .iter()
            .find(|r| r.name_bytes().as_ref() == name.as_bytes())
    }

    /// The archive bytes this reader borrows.
    #[inline(always)]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }
}

impl<'r, 'a> IntoIterator for &'r ArchiveReader<'a> {
    type Item = &'r Record<'a>;
    type IntoIter = std::slice::Iter<'r, Record<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Walk the members of `data` one at a time.
///
/// Only the magic header is checked up front. The iterator can be cloned to restart
/// the walk from the current position, and it stops after the first error.
pub fn records(data: &[u8]) -> Result<Records<'_>, FormatError> {
    if !data.starts_with(MAGIC) {
        return Err(FormatError::MissingMagic);
    }

    Ok(Records {
        data,
        offset: MAGIC.len(),
        failed: false,
    })
}

#[derive(Debug, Clone)]
pub struct Records<'a> {
    data: &'a [u8],
    offset: usize,
    failed: bool,
}

impl<'a> Iterator for Records<'a> {
    type Item = Result<Record<'a>, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.data.len() {
            return None;
        }

        match Record::parse(self.data, self.offset) {
            Ok(record) => {
                // The last member may omit its pad byte.
                self.offset += record.total_size();
                Some(Ok(record))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl std::iter::FusedIterator for Records<'_> {}
