use std::{fmt::Display, fs::File, io::{BufWriter, Write}, path::Path};
use anyhow::Result;

use located_error::LocatedError;

pub mod error;
pub use error::WriterError;

/// A generic line-oriented writer.
/// - source: Boxed `BufWriter` (can either handle file-writing, or any in-memory buffer).
pub struct GenericWriter<'a> {
    source: BufWriter<Box<dyn Write + 'a>>
}

impl<'a> GenericWriter<'a> {
    /// Instantiate a new `GenericWriter`, linked to a file. Any existing file is truncated.
    ///
    /// # Errors
    /// if `path` is either an invalid file, or the user does not have the proper
    /// UNIX permissions to write at this location.
    pub fn new(path: impl AsRef<Path>) -> Result<GenericWriter<'a>> {
        use WriterError::CreateFile;
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|e| CreateFile(path.display().to_string(), e))
            .loc("While creating file")?;
        Ok(Self::from_writer(file))
    }

    /// Wrap any `Write` implementor.
    pub fn from_writer(writer: impl Write + 'a) -> GenericWriter<'a> {
        GenericWriter{source: BufWriter::new(Box::new(writer))}
    }

    /// Write a single item, followed by a newline.
    ///
    /// # Errors
    /// - if the underlying writer fails.
    pub fn write_line(&mut self, obj: impl Display) -> Result<()> {
        writeln!(self.source, "{obj}")
            .map_err(WriterError::IOError)
            .loc("While writing contents into file")
    }

    /// Write the contents of a generic iterator. One iteration step = one line.
    ///
    /// # Errors
    /// - If any of the Items within `iter` fails to get written within the file.
    pub fn write_iter<T, I>(&mut self, iter: T) -> Result<()>
    where   T: IntoIterator<Item = I>,
            I: Display,
    {
        for obj in iter {
            self.write_line(obj)?;
        }
        Ok(())
    }

    /// Flush buffered contents into the inner writer.
    ///
    /// # Errors
    /// - if the underlying writer fails.
    pub fn flush(&mut self) -> Result<()> {
        self.source.flush()
            .map_err(WriterError::IOError)
            .loc("While flushing buffer contents of Writer")
    }
}
