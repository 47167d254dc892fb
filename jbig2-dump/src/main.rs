//! Prints one line per segment of a JBIG2 file, without decoding any
//! payloads.

use jbig2_scan::{Scanner, SegmentDetail};
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Ok(()) = log::set_logger(&LOGGER) {
        log::set_max_level(log::LevelFilter::Warn);
    }

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: jbig2-dump <file>");
        return ExitCode::FAILURE;
    };

    let data = match std::fs::read(&path) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("{path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    match dump(&data) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{path}: {e}");
            ExitCode::FAILURE
        }
    }
}

fn dump(data: &[u8]) -> jbig2_scan::Result<()> {
    let mut scanner = Scanner::new(data)?;

    match scanner.file_header().number_of_pages {
        Some(pages) => println!("number of pages = {pages}"),
        None => println!("number of pages = unknown"),
    }

    while let Some(record) = scanner.next_segment()? {
        let header = &record.header;
        println!(
            "segment number = {}, flags = {:02x}, page {}, {} bytes",
            header.number, header.flags, header.page_association, header.data_length
        );

        match record.detail {
            SegmentDetail::SymbolDictionary(dictionary) => {
                println!(
                    "segment type = symbol dictionary, flags = {:04x}, numexsyms = {}, numnewsyms = {}",
                    dictionary.flags, dictionary.exported_symbols, dictionary.new_symbols
                );
            }
            SegmentDetail::EndOfFile => println!("segment type = end of file"),
            SegmentDetail::Opaque => {}
        }
    }

    Ok(())
}

/// A simple stderr logger.
static LOGGER: SimpleLogger = SimpleLogger;
struct SimpleLogger;
impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::LevelFilter::Warn
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let target = if !record.target().is_empty() {
                record.target()
            } else {
                record.module_path().unwrap_or_default()
            };

            eprintln!("{}: {}", target, record.args());
        }
    }

    fn flush(&self) {}
}
