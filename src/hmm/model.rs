use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    hmm::{table::Table, tagger::Tagger},
    quark::Quark,
};

/// A trained first-order HMM.
///
/// `transitions` is keyed `prev -> next` over `Tags ∪ {START}` and
/// `Tags ∪ {END}`; `emissions` is keyed `tag -> observation` over `Tags` and
/// the vocabulary. A model never changes after training.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    transitions: Table,
    emissions: Table,
    tags: Quark,
    vocabulary: Quark,
}

impl Model {
    pub(crate) fn new(transitions: Table, emissions: Table, tags: Quark, vocabulary: Quark) -> Self {
        Self {
            transitions,
            emissions,
            tags,
            vocabulary,
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let buffer = std::fs::read(path)
            .map_err(|e| Error::InvalidModel(format!("failed to read {}: {e}", path.display())))?;
        Self::from_memory(&buffer)
    }

    pub fn from_memory(buffer: &[u8]) -> Result<Self> {
        let model: Self =
            serde_json::from_slice(buffer).map_err(|e| Error::InvalidModel(e.to_string()))?;
        model.validate()?;
        Ok(model)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut w = BufWriter::new(File::create(path)?);
        self.to_writer(&mut w)?;
        w.flush()?;
        Ok(())
    }

    pub fn to_writer<W: Write>(&self, w: W) -> Result<()> {
        serde_json::to_writer(w, self)?;
        Ok(())
    }

    pub fn tagger(&self) -> Tagger<'_> {
        Tagger::new(self)
    }

    pub fn transitions(&self) -> &Table {
        &self.transitions
    }

    pub fn emissions(&self) -> &Table {
        &self.emissions
    }

    pub fn tags(&self) -> &Quark {
        &self.tags
    }

    pub fn vocabulary(&self) -> &Quark {
        &self.vocabulary
    }

    /// Writes both tables in plain text, one row per block.
    pub fn dump<W: Write>(&self, mut w: W) -> Result<()> {
        writeln!(w, "TRANSITIONS = {{")?;
        dump_table(&mut w, &self.transitions)?;
        writeln!(w, "}}")?;
        writeln!(w)?;
        writeln!(w, "EMISSIONS = {{")?;
        dump_table(&mut w, &self.emissions)?;
        writeln!(w, "}}")?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        self.transitions.validate()?;
        self.emissions.validate()?;
        if self.emissions.rows() != &self.tags || self.emissions.cols() != &self.vocabulary {
            return Err(Error::InvalidModel(
                "emission table does not match the tag set and vocabulary".into(),
            ));
        }
        if let Some(tag) = self.tags.iter().find(|t| {
            self.transitions.row_id(t).is_none() || self.transitions.col_id(t).is_none()
        }) {
            return Err(Error::InvalidModel(format!("tag {tag} missing from transition table")));
        }
        Ok(())
    }
}

fn dump_table<W: Write>(w: &mut W, table: &Table) -> Result<()> {
    for row in table.rows().iter() {
        writeln!(w, "  {row}:")?;
        if let Some(entries) = table.entries(row) {
            for (col, p) in entries {
                writeln!(w, "    {col}: {p:.6}")?;
            }
        }
    }
    Ok(())
}
