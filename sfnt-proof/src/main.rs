//! Print the contents of SFNT font files.
//!
//! Lists the table directory of each font in a file, or pretty-prints the
//! tables that have a decoder, as text or JSON.

use std::{collections::HashSet, path::Path, str::FromStr};

use sfnt_read::{
    types::Tag, AnyTable, DecodeError, FontDirectory, FontFile, ReadError, TableRecord,
};

mod print;

use print::PrettyPrinter;

fn main() -> Result<(), Error> {
    let args = flags::Args::from_env().map_err(Error::new)?;
    init_logging(args.verbose);
    let filter = TableFilter::from_args(&args)?;

    let bytes = std::fs::read(&args.input)
        .map_err(|e| Error(format!("Failed to read file '{}': {e}", args.input.display())))?;
    let file = FontFile::new(&bytes);
    if file.is_empty() {
        println!("Failed to parse file '{}'", args.input.display());
        for anomaly in file.anomalies() {
            println!("  {anomaly}");
        }
        return Ok(());
    }

    print_file_header(&args.input, &file);
    let indices = font_indices(&file, args.index)?;

    let mut json_fonts = Vec::new();
    for index in indices {
        let font = match &file.fonts()[index] {
            Ok(font) => font,
            Err(e) => {
                if file.len() > 1 {
                    println!("Index={index}");
                }
                println!("  Error: '{e}'");
                continue;
            }
        };
        if args.json {
            json_fonts.push(font_to_json(index, font, &filter));
            continue;
        }
        if file.len() > 1 {
            println!("Index={index}");
        }
        if args.list {
            list_tables(font, &filter);
        } else {
            print_tables(font, &filter).map_err(Error::new)?;
        }
    }

    if args.json {
        let json = serde_json::to_string_pretty(&json_fonts).map_err(Error::new)?;
        println!("{json}");
    }
    Ok(())
}

/// The fonts to print: one, if an index was given, otherwise all of them.
fn font_indices(file: &FontFile, index: Option<u32>) -> Result<Vec<usize>, Error> {
    match index {
        Some(index) if (index as usize) < file.len() => Ok(vec![index as usize]),
        Some(index) => Err(Error::new(ReadError::InvalidCollectionIndex(index))),
        None => Ok((0..file.len()).collect()),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn print_file_header(path: &Path, file: &FontFile) {
    println!("File path: '{}'", path.display());
    for anomaly in file.anomalies() {
        println!("  {anomaly}");
    }
}

fn list_tables(font: &FontDirectory, filter: &TableFilter) {
    for record in font.table_records() {
        if filter.should_print(record.tag()) {
            println!("{}", format_record(record));
        }
    }
}

fn format_record(record: &TableRecord) -> String {
    format!(
        "{}, 0x{:08X}, {:10}, {:10}",
        record.tag(),
        record.checksum(),
        record.offset(),
        record.length()
    )
}

fn print_tables(font: &FontDirectory, filter: &TableFilter) -> std::io::Result<()> {
    for (record, table) in font.decode_all() {
        let tag = record.tag();
        if !filter.should_print(tag) {
            continue;
        }
        match table {
            Ok(table) => {
                fancy_print_table(&table)?;
                for anomaly in table.anomalies() {
                    println!("{tag}: Warning '{anomaly}'");
                }
            }
            Err(DecodeError::NoDecoder(_)) => println!("{tag}: no decoder available"),
            Err(err) => println!("{tag}: Error '{err}'"),
        }
    }
    Ok(())
}

fn font_to_json(index: usize, font: &FontDirectory, filter: &TableFilter) -> serde_json::Value {
    let mut tables = Vec::new();
    let mut skipped = Vec::new();
    let mut errors = Vec::new();
    for (record, table) in font.decode_all() {
        let tag = record.tag();
        if !filter.should_print(tag) {
            continue;
        }
        match table {
            Ok(table) => match serde_json::to_value(&table) {
                Ok(value) => tables.push(value),
                Err(e) => errors.push(format!("{tag}: {e}")),
            },
            Err(DecodeError::NoDecoder(_)) => skipped.push(tag.to_string()),
            Err(err) => errors.push(err.to_string()),
        }
    }
    serde_json::json!({
        "index": index,
        "ttc_index": font.ttc_index(),
        "tables": tables,
        "no_decoder": skipped,
        "errors": errors,
    })
}

enum TableFilter {
    All,
    Include(HashSet<Tag>),
    Exclude(HashSet<Tag>),
}

impl TableFilter {
    fn from_args(args: &flags::Args) -> Result<Self, Error> {
        if args.tables.is_some() && args.exclude.is_some() {
            return Err(Error::new("pass only one of --tables and --exclude"));
        }
        if let Some(tags) = &args.tables {
            make_tag_set(tags).map(TableFilter::Include)
        } else if let Some(tags) = &args.exclude {
            make_tag_set(tags).map(TableFilter::Exclude)
        } else {
            Ok(TableFilter::All)
        }
    }

    fn should_print(&self, tag: Tag) -> bool {
        match self {
            TableFilter::All => true,
            TableFilter::Include(tags) => tags.contains(&tag),
            TableFilter::Exclude(tags) => !tags.contains(&tag),
        }
    }
}

fn make_tag_set(inp: &str) -> Result<HashSet<Tag>, Error> {
    inp.split(' ')
        .filter(|raw| !raw.is_empty())
        .map(|raw| match Tag::from_str(raw) {
            Ok(tag) => Ok(tag),
            Err(e) => Err(Error(format!(
                "Invalid tag '{}': {e}",
                raw.escape_default()
            ))),
        })
        .collect()
}

#[derive(Debug, Clone)]
struct Error(String);

impl Error {
    fn new(t: impl std::fmt::Display) -> Self {
        Self(t.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for Error {}

fn fancy_print_table(table: &AnyTable) -> std::io::Result<()> {
    let stdout = std::io::stdout();
    let mut locked = stdout.lock();
    let mut formatter = PrettyPrinter::new(&mut locked);
    formatter.print_root_table(table.as_some_table().as_ref())
}

mod flags {
    use std::path::PathBuf;

    xflags::xflags! {
        /// Print the table directory and decoded tables of a font file
        cmd args {
                required input: PathBuf
                /// list the table directory instead of decoding tables
                optional -l, --list
                /// only this font of a collection
                optional -i, --index index: u32
                /// space separated tags of the tables to include
                optional -t, --tables include: String
                /// space separated tags of the tables to skip
                optional -x, --exclude exclude: String
                /// print decoded tables as JSON
                optional --json
                /// log debug output
                optional -v, --verbose
            }

    }
}
