use std::{fs::File, io::BufWriter, path::PathBuf};

use pdf_body::{
    pdf::document::{catalog, page_tree},
    BodyError, Dictionary, DocumentWriter, Name, NumberingStyle, Object, ObjectGraph, PageLabel, PageLabels,
    PdfSection, Trailer,
};
use structopt::StructOpt;

/// Write an empty PDF whose pages carry roman front matter labels, followed by
/// decimal labels with a chapter prefix.
#[derive(StructOpt, Debug)]
#[structopt(name = "page-labels")]
struct Opt {
    /// Output file
    #[structopt(short, long, parse(from_os_str))]
    output: PathBuf,

    /// Number of pages
    #[structopt(short, long, default_value = "12")]
    pages: u32,

    /// Number of front matter pages
    #[structopt(short, long, default_value = "4")]
    front: u32,
}

fn build(opt: &Opt) -> Result<(), BodyError> {
    let mut section = PdfSection::new();

    let pages_ref = section.reserve()?;
    let mut kids = Vec::with_capacity(opt.pages as usize);
    for _ in 0..opt.pages {
        let page = Dictionary::from([
            (Name::from_str("Type"), Object::from(Name::from_str("Page"))),
            (Name::from_str("Parent"), Object::from(pages_ref.clone())),
            (
                Name::from_str("MediaBox"),
                Object::from(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(595),
                    Object::Integer(842),
                ]),
            ),
        ]);
        kids.push(section.allocate(page.into())?);
    }
    section.set(&pages_ref, page_tree(&kids).into())?;

    let mut labels = PageLabels::new();
    if opt.front > 0 {
        labels.add(1, PageLabel::new(NumberingStyle::LowercaseRoman))?;
    }
    labels.add(
        opt.front + 1,
        PageLabel::new(NumberingStyle::DecimalArabic).with_prefix("Ch. 1-"),
    )?;
    for (page, label) in labels.labels(opt.pages).iter().enumerate() {
        log::debug!("page {} is labelled {}", page + 1, label);
    }

    let labels_root = labels.to_dictionary(&mut section)?;
    let catalog_ref = section.allocate(catalog(&pages_ref, labels_root).into())?;

    let file = File::create(&opt.output)?;
    let mut writer = DocumentWriter::new(BufWriter::new(file), (1, 7))?;
    writer.write_section(&section)?;
    writer.finish(Trailer::new(catalog_ref))?;

    println!("{}", labels.labels(opt.pages).join(", "));
    Ok(())
}

pub fn main() {
    env_logger::init();
    let opt = Opt::from_args();

    if let Err(e) = build(&opt) {
        log::error!("Error while writing: {}", e);
    }
}
