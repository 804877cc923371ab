/// Line-oriented source writer with block indentation.
#[derive(Debug, Default)]
pub struct Formatter {
    lines: Vec<String>,
    indent: usize,
}

const INDENT: &str = "    ";

impl Formatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one line at the current indentation.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if text.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines.push(format!("{}{}", INDENT.repeat(self.indent), text));
        }
    }

    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Runs `f` one indentation level deeper.
    pub fn indent<T>(&mut self, f: impl FnOnce(&mut Formatter) -> T) -> T {
        self.indent += 1;
        let result = f(self);
        self.indent -= 1;
        result
    }

    /// Writes `open`, runs `f` indented, then writes `close`.
    pub fn indent_with<T>(
        &mut self,
        open: impl AsRef<str>,
        close: impl AsRef<str>,
        f: impl FnOnce(&mut Formatter) -> T,
    ) -> T {
        self.line(open);
        let result = self.indent(f);
        self.line(close);
        result
    }

    /// The written text, newline-terminated.
    pub fn finish(self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}
