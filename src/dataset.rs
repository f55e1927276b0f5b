use std::{
    fs::File,
    io::{BufRead, BufReader},
    str::FromStr,
};

use crate::{
    error::{Error, Result},
    hmm::{END, START},
};

/// One labeled sequence: `items[t]` is the observation at #t and
/// `labels[t]` its tag.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Sequence {
    items: Vec<String>,
    labels: Vec<String>,
}

impl Sequence {
    /// Pairs `items` with `labels`; both must have the same length.
    pub fn from_parts(items: Vec<String>, labels: Vec<String>) -> Result<Self> {
        if items.len() != labels.len() {
            return Err(Error::LengthMismatch {
                observations: items.len(),
                tags: labels.len(),
            });
        }
        Ok(Self { items, labels })
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn push(&mut self, item: impl Into<String>, label: impl Into<String>) {
        self.items.push(item.into());
        self.labels.push(label.into());
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.labels.clear();
    }

    /// `(observation, tag)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.items
            .iter()
            .map(String::as_str)
            .zip(self.labels.iter().map(String::as_str))
    }
}

impl<O: Into<String>, T: Into<String>> FromIterator<(O, T)> for Sequence {
    fn from_iter<I: IntoIterator<Item = (O, T)>>(iter: I) -> Self {
        let mut seq = Self::default();
        for (item, label) in iter {
            seq.push(item, label);
        }
        seq
    }
}

/// A corpus of labeled sequences.
///
/// The text format has one `TAG<TAB>observation` pair per line and a blank
/// line after every sequence.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Dataset {
    pub seqs: Vec<Sequence>,
}

impl Dataset {
    pub fn read<R: BufRead>(reader: R) -> Result<Self> {
        let mut ds = Self::default();
        let mut seq = Sequence::default();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                if !seq.is_empty() {
                    ds.seqs.push(std::mem::take(&mut seq));
                }
                continue;
            }
            let (label, item) = parse_line(line).ok_or_else(|| Error::InvalidLine {
                line: i + 1,
                content: line.to_string(),
            })?;
            if label == START || label == END {
                return Err(Error::ReservedTag {
                    line: i + 1,
                    tag: label.to_string(),
                });
            }
            seq.push(item, label);
        }
        if !seq.is_empty() {
            ds.seqs.push(seq);
        }
        log::info!("read {} sequences ({} items)", ds.len(), ds.total_items());
        Ok(ds)
    }

    pub fn push(&mut self, seq: Sequence) {
        if !seq.is_empty() {
            self.seqs.push(seq);
        }
    }

    pub fn len(&self) -> usize {
        self.seqs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seqs.is_empty()
    }

    pub fn max_seq_length(&self) -> usize {
        self.seqs.iter().map(|x| x.len()).max().unwrap_or_default()
    }

    pub fn total_items(&self) -> usize {
        self.seqs.iter().map(|x| x.len()).sum()
    }
}

fn parse_line(line: &str) -> Option<(&str, &str)> {
    let (label, item) = line.split_once('\t')?;
    let (label, item) = (label.trim(), item.trim());
    if label.is_empty() || item.is_empty() || item.contains('\t') {
        return None;
    }
    Some((label, item))
}

impl AsRef<[Sequence]> for Dataset {
    fn as_ref(&self) -> &[Sequence] {
        &self.seqs
    }
}

impl FromIterator<Sequence> for Dataset {
    fn from_iter<I: IntoIterator<Item = Sequence>>(iter: I) -> Self {
        let mut ds = Self::default();
        for seq in iter {
            ds.push(seq);
        }
        ds
    }
}

impl TryFrom<File> for Dataset {
    type Error = Error;

    fn try_from(value: File) -> Result<Self> {
        Self::read(BufReader::new(value))
    }
}

impl FromStr for Dataset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::read(s.as_bytes())
    }
}
