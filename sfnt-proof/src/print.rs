//! pretty printing implementation

use std::io::Write;

use ansi_term::{Color, Style};
use sfnt_read::{
    traversal::{FieldType, SomeArray, SomeTable},
    types::Scalar,
};

static MANY_SPACES: [u8; 200] = [0x20; 200];
// width of the left column, which contains the textual representation.
const L_COLUMN_WIDTH: usize = 62;
// position of array indexes, if they are printed
const ARRAY_POS_WIDTH: usize = 53;

pub struct PrettyPrinter<'a> {
    depth: usize,
    line_pos: usize,
    is_tty: bool,
    cur_array_item: Option<usize>,
    indent_size: usize,
    writer: &'a mut (dyn std::io::Write + 'a),
}

impl std::io::Write for PrettyPrinter<'_> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let len = self.writer.write(buf)?;
        let wrote_buf = &buf[..len];
        let wrote_str = String::from_utf8_lossy(wrote_buf);
        self.line_pos = match wrote_buf.iter().rev().position(|b| *b == b'\n') {
            Some(pos) => pos,
            None => self.line_pos + wrote_str.chars().count(),
        };
        Ok(len)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}

impl<'a> PrettyPrinter<'a> {
    pub fn new(writer: &'a mut (dyn std::io::Write + 'a)) -> Self {
        PrettyPrinter {
            depth: 0,
            line_pos: 0,
            cur_array_item: None,
            is_tty: atty::is(atty::Stream::Stdout),
            indent_size: 2,
            writer,
        }
    }

    pub fn print_table_header(&mut self) -> std::io::Result<()> {
        writeln!(
            self,
            "┌─────────────────────────────────────────────────────────────┬─────────────┐"
        )
    }

    pub fn print_table_footer(&mut self) -> std::io::Result<()> {
        writeln!(
            self,
            "└─────────────────────────────────────────────────────────────┴─────────────┘"
        )
    }

    fn print_indent(&mut self) -> std::io::Result<()> {
        let indent_len = (self.depth * self.indent_size)
            .min(MANY_SPACES.len())
            .saturating_sub(1);
        write!(self, "│")?;
        self.write_all(&MANY_SPACES[..indent_len])
    }

    fn indented(
        &mut self,
        f: impl FnOnce(&mut PrettyPrinter) -> std::io::Result<()>,
    ) -> std::io::Result<()> {
        self.depth += 1;
        let r = f(self);
        self.depth -= 1;
        r
    }

    pub fn print_newline(&mut self) -> std::io::Result<()> {
        writeln!(self)
    }

    pub fn print_root_table<'b>(
        &mut self,
        table: &(dyn SomeTable<'b> + 'b),
    ) -> std::io::Result<()> {
        self.print_table_header()?;
        self.print_indent()?;
        write!(self, "{}", table.type_name())?;
        self.print_hex(&[])?;
        self.print_newline()?;
        self.indented(|this| this.print_fields(table))?;
        self.print_newline()?;
        self.print_table_footer()
    }

    fn print_with_style(
        &mut self,
        style: Style,
        f: impl FnOnce(&mut PrettyPrinter) -> std::io::Result<()>,
    ) -> std::io::Result<()> {
        if !self.is_tty {
            f(self)?;
        } else {
            // ansi styles aren't counted for the purpose of width calculations
            let pos = self.line_pos;
            write!(self, "{}", style.prefix())?;
            self.line_pos = pos;
            f(self)?;
            let pos = self.line_pos;
            write!(self, "{}", style.suffix())?;
            self.line_pos = pos;
        }
        Ok(())
    }

    fn print_fields<'b>(&mut self, table: &(dyn SomeTable<'b> + 'b)) -> std::io::Result<()> {
        for (i, field) in table.iter().enumerate() {
            if i != 0 {
                self.print_newline()?;
            }
            self.print_indent()?;
            self.print_with_style(Color::Cyan.into(), |this| write!(this, "{}", field.name))?;
            write!(self, ": ")?;
            if let FieldType::Record(record) = &field.value {
                // nested records start on their own line
                self.print_with_style(Color::Blue.into(), |this| {
                    write!(this, "{}", record.type_name())
                })?;
                self.print_hex(&[])?;
                self.print_newline()?;
                self.indented(|this| this.print_fields(record.as_ref()))?;
            } else {
                self.print_field(&field.value)?;
            }
        }
        Ok(())
    }

    fn print_array<'b>(&mut self, array: &(dyn SomeArray<'b> + 'b)) -> std::io::Result<()> {
        write!(self, "[{}]", array.type_name())?;
        self.print_hex(&[])?;
        if array.is_empty() {
            return Ok(());
        }
        self.print_newline()?;
        self.indented(|this| {
            for (i, item) in array.iter().enumerate() {
                this.cur_array_item = Some(i);
                if i != 0 {
                    this.print_newline()?;
                }
                this.print_indent()?;
                this.print_field(&item)?;
            }
            Ok(())
        })
    }

    pub fn print_field(&mut self, field: &FieldType<'_>) -> std::io::Result<()> {
        match &field {
            FieldType::U16(val) => write!(self, "{val}")?,
            FieldType::I16(val) => write!(self, "{val}")?,
            FieldType::U32(val) => write!(self, "{val}")?,
            FieldType::Hex32(val) => write!(self, "0x{val:08X}")?,
            FieldType::Tag(val) => write!(self, "{val}")?,
            FieldType::FWord(val) => write!(self, "{val}")?,
            FieldType::UfWord(val) => write!(self, "{val}")?,
            FieldType::Fixed(val) => write!(self, "{val}")?,
            FieldType::MajorMinor(val) => write!(self, "{val}")?,
            FieldType::LongDateTime(val) => write!(self, "{}", val.as_secs())?,
            FieldType::NameId(val) => write!(self, "{val}")?,
            FieldType::String(string) => self.print_string(string)?,
            FieldType::Absent => {
                self.print_with_style(Color::Blue.into(), |this| write!(this, "None"))?
            }
            FieldType::Record(record) => {
                write!(self, "{}", record.type_name())?;
                self.print_current_array_pos()?;
                self.print_hex(&[])?;
                self.print_newline()?;
                self.indented(|this| this.print_fields(record.as_ref()))?;
                return Ok(());
            }
            FieldType::Array(array) => {
                self.print_array(array.as_ref())?;
                return Ok(());
            }
        }

        self.print_current_array_pos()?;

        match &field {
            FieldType::U16(val) => self.print_hex(&raw_bytes(*val))?,
            FieldType::I16(val) => self.print_hex(&raw_bytes(*val))?,
            FieldType::U32(val) | FieldType::Hex32(val) => self.print_hex(&raw_bytes(*val))?,
            FieldType::Tag(val) => self.print_hex(&val.to_be_bytes())?,
            FieldType::FWord(val) => self.print_hex(&raw_bytes(*val))?,
            FieldType::UfWord(val) => self.print_hex(&raw_bytes(*val))?,
            FieldType::Fixed(val) => self.print_hex(&raw_bytes(*val))?,
            FieldType::MajorMinor(val) => self.print_hex(&val.to_be_bytes())?,
            FieldType::LongDateTime(val) => self.print_hex(&raw_bytes(*val))?,
            FieldType::NameId(val) => self.print_hex(&raw_bytes(*val))?,
            FieldType::String(_) | FieldType::Absent => (),
            FieldType::Record(_) | FieldType::Array(_) => (),
        }
        Ok(())
    }

    // handles very naive linebreaking
    fn print_string(&mut self, string: &str) -> std::io::Result<()> {
        let mut words = string.split_inclusive(' ').peekable();
        if words.peek().is_none() {
            return self.print_with_style(Style::default().italic(), |this| write!(this, "\"\""));
        }
        for word in words {
            let len = word.chars().count();
            if self.line_pos + len >= L_COLUMN_WIDTH {
                self.print_hex(&[])?;
                self.print_newline()?;
                self.print_indent()?;
            }
            self.print_with_style(Style::default().italic(), |this| write!(this, "{word}"))?;
        }
        Ok(())
    }

    fn print_current_array_pos(&mut self) -> std::io::Result<()> {
        if let Some(idx) = self.cur_array_item.take() {
            let padding = ARRAY_POS_WIDTH.saturating_sub(self.line_pos);
            let wspace = &MANY_SPACES[..padding];
            self.write_all(wspace)?;
            self.print_with_style(Color::Fixed(243).italic(), |this| write!(this, " {idx}"))?;
        }
        Ok(())
    }

    fn print_hex(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        if bytes.len() > 4 {
            let (head, tail) = bytes.split_at(4);
            self.print_hex(head)?;
            self.print_newline()?;
            self.print_indent()?;
            self.print_hex(tail)?;
            return Ok(());
        }
        let padding = L_COLUMN_WIDTH.saturating_sub(self.line_pos);
        let wspace = &MANY_SPACES[..padding];
        self.write_all(wspace)?;
        self.print_with_style(Color::Fixed(250).into(), |this| {
            write!(this, "│")?;
            for b in bytes {
                write!(this, " {b:02X}")?
            }
            Ok(())
        })?;
        let padding = (4 - bytes.len()) * 3;
        let wspace = &MANY_SPACES[..padding];
        self.write_all(wspace)?;
        write!(self, " │")
    }
}

/// The big-endian encoding of a scalar, as it appears in the font.
fn raw_bytes<T: Scalar>(val: T) -> Vec<u8> {
    val.to_raw().as_ref().to_vec()
}
