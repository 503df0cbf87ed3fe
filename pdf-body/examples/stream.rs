use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::PathBuf,
};

use flate2::Compression;
use pdf_body::{
    pdf::document::{catalog, page_tree},
    BodyError, Dictionary, DocumentWriter, LengthEntry, Name, Object, ObjectGraph, PdfSection, StreamPayload,
    Trailer,
};
use structopt::StructOpt;

/// Embed a file as a stream object. The file is streamed through the encoder,
/// its length is written as a separate object afterwards.
#[derive(StructOpt, Debug)]
#[structopt(name = "stream")]
struct Opt {
    /// Input file
    #[structopt(short, long, parse(from_os_str))]
    input: PathBuf,

    /// Output file
    #[structopt(short, long, parse(from_os_str))]
    output: PathBuf,

    /// Flate compression level, 0 to store the payload as is
    #[structopt(short, long, default_value = "6")]
    level: u32,
}

fn build(opt: &Opt) -> Result<(), BodyError> {
    let mut section = PdfSection::new();
    let stream_ref = section.reserve()?;
    let length_ref = section.reserve()?;
    // stream and length are written by hand, the section only holds the rest
    let pages_ref = section.allocate(page_tree(&[]).into())?;
    let catalog_ref = section.allocate(catalog(&pages_ref, None).into())?;

    let dictionary = Dictionary::from([
        (Name::from_str("Type"), Object::from(Name::from_str("EmbeddedFile"))),
        (Name::from_str("Length"), Object::from(length_ref.clone())),
    ]);
    let compression = (opt.level > 0).then(|| Compression::new(opt.level.min(9)));

    let mut input = BufReader::new(File::open(&opt.input)?);
    let mut writer = DocumentWriter::new(BufWriter::new(File::create(&opt.output)?), (1, 7))?;
    let encoded = writer.append_stream(
        &stream_ref,
        &dictionary,
        StreamPayload::reader(&mut input).with_compression(compression),
    )?;
    if encoded.length == LengthEntry::Deferred {
        writer.append_body(&length_ref, &Object::Integer(encoded.written as i64))?;
    }
    writer.write_section(&section)?;
    writer.finish(Trailer::new(catalog_ref))?;

    log::debug!("stream body has {} bytes", encoded.written);
    println!("{}: {} bytes", opt.output.display(), encoded.written);
    Ok(())
}

pub fn main() {
    env_logger::init();
    let opt = Opt::from_args();

    if let Err(e) = build(&opt) {
        log::error!("Error while writing: {}", e);
    }
}
