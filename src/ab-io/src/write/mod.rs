pub mod generic_writer;
pub use generic_writer::{GenericWriter, WriterError};

pub mod plink;
pub use plink::{PlinkSink, PlinkWriter, TfamRecord, TpedRecord};
