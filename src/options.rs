/// Scanner settings.
///
/// The defaults are not a strictly verbatim capture: a value's trailing `\r`
/// is dropped and a leading byte-order mark is skipped. Disable both to store
/// every value byte-for-byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Drop a single `\r` that ends a value, so CRLF input reads like LF input.
    /// Defaults to `true`.
    pub trim_carriage_return: bool,
    /// Skip a leading U+FEFF byte-order mark. Defaults to `true`.
    pub strip_bom: bool,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trim_carriage_return(mut self, trim_carriage_return: bool) -> Self {
        self.trim_carriage_return = trim_carriage_return;
        self
    }

    pub fn with_strip_bom(mut self, strip_bom: bool) -> Self {
        self.strip_bom = strip_bom;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            trim_carriage_return: true,
            strip_bom: true,
        }
    }
}
