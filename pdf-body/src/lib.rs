//! Body serialization for PDF writers.
//!
//! Two pieces do the heavy lifting: [`NumberTree`] turns a sparse `u32` keyed
//! index into the balanced `/Nums` + `/Kids` dictionary structure and back, and
//! [`StreamEncoder`] writes stream objects with the right filter chain and
//! `Length` when compression and encryption are involved. The object model,
//! the [`SimpleEncoder`] serializer and the [`DocumentWriter`] are the plumbing
//! both of them run on.

pub use error::BodyError;
pub use graph::ObjectGraph;
pub use pdf::{
    number_tree::NumberTree,
    page_labels::{NumberingStyle, PageLabel, PageLabels},
    Array, Bytes, CbString, Dictionary, Name, Object, PdfSection, Reference, Stream, Trailer,
};
pub use simple_encode::SimpleEncoder;
pub use stream_encode::{EncodedStream, LengthEntry, PayloadSource, StreamEncoder, StreamPayload};
pub use writer::{CountingWriter, DocumentWriter, Encoder};

pub mod crypto;
mod error;
pub mod graph;
pub mod pdf;
pub mod simple_encode;
pub mod stream_encode;
pub mod writer;
