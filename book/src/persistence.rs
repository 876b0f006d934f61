//! Book files are big endian throughout:
//!
//! ```text
//! u32 entry count
//! per entry, ordered by empty count then key:
//!   u64 mover bits, u64 opponent bits   canonical key
//!   u8  node kind                       0 leaf, 1 branch, 2 solved
//!   i32 score                           centi-disks
//!   i8  square or sentinel              -1 in book, -2 no legal moves
//! u32 entry count, repeated as a terminator
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use log::info;

use super::{Book, CanonicalKey, Data, NodeKind};

// Caps the up-front allocation so a corrupt count cannot exhaust memory.
const MAX_PREALLOCATED_ENTRIES: usize = 1 << 20;

impl Book {
    pub fn write<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = writer;
        let count = u32::try_from(self.len())
            .map_err(|_| anyhow!("Book of {} entries is too large to write", self.len()))?;

        writer.write_u32::<BigEndian>(count)?;

        for (key, data) in self.iter() {
            writer.write_u64::<BigEndian>(key.player())?;
            writer.write_u64::<BigEndian>(key.opponent())?;
            writer.write_u8(data.kind().tag())?;
            writer.write_i32::<BigEndian>(data.score())?;
            writer.write_i8(data.square_code())?;
        }

        writer.write_u32::<BigEndian>(count)?;

        Ok(())
    }

    pub fn read<R: Read>(reader: R) -> Result<Self> {
        let mut reader = reader;
        let count = reader
            .read_u32::<BigEndian>()
            .context("Failed to read the entry count")? as usize;

        let mut entries = Vec::with_capacity(count.min(MAX_PREALLOCATED_ENTRIES));

        for index in 0..count {
            let entry = read_entry(&mut reader)
                .with_context(|| format!("Failed to read entry {} of {}", index, count))?;
            entries.push(entry);
        }

        let terminator = reader
            .read_u32::<BigEndian>()
            .context("Failed to read the entry count terminator")? as usize;

        if terminator != count {
            bail!(
                "Entry count terminator {} does not match the header count {}",
                terminator,
                count
            );
        }

        let mut book = Book::new();
        for (key, data) in entries {
            if book.insert(key, data).is_some() {
                bail!("Duplicate entry for key {:?}", key);
            }
        }

        Ok(book)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
        let mut writer = BufWriter::new(file);

        self.write(&mut writer)?;
        writer.flush()?;

        info!("Saved {} positions to {:?}", self.len(), path);

        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
        let book = Self::read(BufReader::new(file))
            .with_context(|| format!("Failed to decode book {:?}", path))?;

        info!("Loaded {} positions from {:?}", book.len(), path);

        Ok(book)
    }
}

fn read_entry<R: Read>(reader: &mut R) -> Result<(CanonicalKey, Data)> {
    let player = reader.read_u64::<BigEndian>()?;
    let opponent = reader.read_u64::<BigEndian>()?;
    let kind = NodeKind::from_tag(reader.read_u8()?)?;
    let score = reader.read_i32::<BigEndian>()?;
    let square_code = reader.read_i8()?;

    let key = CanonicalKey::from_bits(player, opponent)?;
    let data = Data::decode(kind, score, square_code)?;

    Ok((key, data))
}
